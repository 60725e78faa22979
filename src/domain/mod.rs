// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`.
//
// The domain never touches storage. Checks that need to know whether an
// identifier exists go through the lookup traits below, which the
// registries implement.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod constraint;
pub mod enumeration;
pub mod movie;
pub mod person;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Constraint taxonomy
pub use constraint::{parse_integer, ConstraintViolation, Outcome, OutcomeExt, ViolationKind};

// Enumerations
pub use enumeration::{
    Enumeration, EnumerationError, IndexNames, GENRE, MOVIE_CATEGORY, MOVIE_RATING,
};

// Person Domain
pub use person::{
    check_agent, check_name, check_person_id, check_person_id_as_primary_key,
    check_person_id_as_reference, ActorRole, DirectorRole, Person, PersonKind, PersonSlots,
};

// Movie Domain
pub use movie::{
    check_about, check_actor, check_category, check_director, check_episode_no, check_genre,
    check_genres, check_movie_id, check_movie_id_as_primary_key, check_rating,
    check_release_date, check_title, check_tv_series_name, validate_movie, Movie, MovieCategory,
    MovieSlots,
};

// ============================================================================
// IDENTIFIERS AND LOOKUPS
// ============================================================================

pub type PersonId = u32;
pub type MovieId = u32;

/// Existence queries over the person registry, one view per role.
pub trait PersonLookup {
    fn has_person(&self, kind: PersonKind, id: PersonId) -> bool;
}

/// Existence queries over the movie registry.
pub trait MovieLookup {
    fn has_movie(&self, id: MovieId) -> bool;
}

/// Domain result type
pub type DomainResult<T> = Result<T, ConstraintViolation>;
