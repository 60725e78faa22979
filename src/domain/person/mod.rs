//! Person aggregate.
//!
//! Critical Person Invariants:
//!
//! 1. `person_id` is a positive integer, unique, immutable after creation
//! 2. `name` is a non-blank string of at most 120 characters
//! 3. Actor and Director are roles attached to one Person core, never copies
//! 4. `played_movies` / `directed_movies` are derived from movie references
//!    and only change when a movie association changes
//! 5. An actor's agent, when present, refers to an existing person

pub mod entity;
pub mod invariants;

pub use entity::{ActorRole, DirectorRole, Person, PersonKind, PersonSlots};
pub use invariants::{
    check_agent, check_name, check_person_id, check_person_id_as_primary_key,
    check_person_id_as_reference,
};
