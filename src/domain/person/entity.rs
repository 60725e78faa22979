use std::collections::BTreeSet;

use serde::Serialize;

use super::invariants::{check_agent, check_name, check_person_id};
use crate::domain::{ConstraintViolation, DomainResult, MovieId, PersonId, PersonLookup};

/// Which registry view an identifier is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonKind {
    /// Any person, with or without roles
    Person,
    Actor,
    Director,
}

/// Raw construction input for a person, actor or director.
///
/// Identifiers are signed so that a form value such as "-3" reaches the
/// range check instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSlots {
    pub person_id: Option<i64>,
    pub name: Option<String>,
    /// Only meaningful for actors
    pub agent_id: Option<i64>,
}

/// A person known to the catalog.
///
/// The actor and director specializations are roles attached to the same
/// core record, so one individual who both acts and directs is stored once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    person_id: PersonId,
    name: String,
    actor: Option<ActorRole>,
    director: Option<DirectorRole>,
}

/// Actor specialization of a person
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorRole {
    agent: Option<PersonId>,
    /// Derived inverse of `Movie::actors`
    played_movies: BTreeSet<MovieId>,
}

/// Director specialization of a person
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorRole {
    /// Derived inverse of `Movie::director`
    directed_movies: BTreeSet<MovieId>,
}

impl Person {
    /// Create a plain person without roles.
    /// Primary-key uniqueness is the registry's concern, not checked here.
    pub fn new(person_id: i64, name: &str) -> DomainResult<Self> {
        check_person_id(Some(person_id))?;
        check_name(Some(name))?;
        Ok(Self {
            person_id: person_id as PersonId,
            name: name.to_string(),
            actor: None,
            director: None,
        })
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        check_name(Some(name))?;
        self.name = name.to_string();
        Ok(())
    }

    pub fn actor(&self) -> Option<&ActorRole> {
        self.actor.as_ref()
    }

    pub fn director(&self) -> Option<&DirectorRole> {
        self.director.as_ref()
    }

    pub fn is(&self, kind: PersonKind) -> bool {
        match kind {
            PersonKind::Person => true,
            PersonKind::Actor => self.actor.is_some(),
            PersonKind::Director => self.director.is_some(),
        }
    }

    pub fn has_roles(&self) -> bool {
        self.actor.is_some() || self.director.is_some()
    }

    /// Attach the actor role. Attaching twice keeps the existing role.
    pub fn make_actor(&mut self) {
        if self.actor.is_none() {
            self.actor = Some(ActorRole::default());
        }
    }

    pub fn make_director(&mut self) {
        if self.director.is_none() {
            self.director = Some(DirectorRole::default());
        }
    }

    /// Detach the actor role, returning it with its derived movie set
    pub fn take_actor_role(&mut self) -> Option<ActorRole> {
        self.actor.take()
    }

    pub fn take_director_role(&mut self) -> Option<DirectorRole> {
        self.director.take()
    }

    pub fn agent(&self) -> Option<PersonId> {
        self.actor.as_ref().and_then(|role| role.agent)
    }

    /// Replace (or with `None`, unset) the agent of this actor.
    pub fn set_agent(&mut self, persons: &dyn PersonLookup, agent_id: Option<i64>) -> DomainResult<()> {
        check_agent(persons, agent_id)?;
        let person_id = self.person_id;
        let role = self.actor.as_mut().ok_or_else(|| {
            ConstraintViolation::Generic(format!(
                "Person {} is not an actor and cannot have an agent!",
                person_id
            ))
        })?;
        role.agent = agent_id.map(|id| id as PersonId);
        Ok(())
    }

    /// Drops a dangling agent reference. Returns true when one was removed.
    pub(crate) fn clear_agent_if(&mut self, agent: PersonId) -> bool {
        match self.actor.as_mut() {
            Some(role) if role.agent == Some(agent) => {
                role.agent = None;
                true
            }
            _ => false,
        }
    }

    pub fn played_movies(&self) -> Option<&BTreeSet<MovieId>> {
        self.actor.as_ref().map(|role| &role.played_movies)
    }

    pub fn directed_movies(&self) -> Option<&BTreeSet<MovieId>> {
        self.director.as_ref().map(|role| &role.directed_movies)
    }

    // Inverse-reference bookkeeping. Only the catalog's association
    // synchronisation calls these.

    pub(crate) fn link_played_movie(&mut self, movie_id: MovieId) {
        if let Some(role) = self.actor.as_mut() {
            role.played_movies.insert(movie_id);
        }
    }

    pub(crate) fn unlink_played_movie(&mut self, movie_id: MovieId) {
        if let Some(role) = self.actor.as_mut() {
            role.played_movies.remove(&movie_id);
        }
    }

    pub(crate) fn link_directed_movie(&mut self, movie_id: MovieId) {
        if let Some(role) = self.director.as_mut() {
            role.directed_movies.insert(movie_id);
        }
    }

    pub(crate) fn unlink_directed_movie(&mut self, movie_id: MovieId) {
        if let Some(role) = self.director.as_mut() {
            role.directed_movies.remove(&movie_id);
        }
    }
}

impl ActorRole {
    pub fn agent(&self) -> Option<PersonId> {
        self.agent
    }

    pub fn played_movies(&self) -> &BTreeSet<MovieId> {
        &self.played_movies
    }
}

impl DirectorRole {
    pub fn directed_movies(&self) -> &BTreeSet<MovieId> {
        &self.directed_movies
    }
}

impl std::fmt::Display for PersonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonKind::Person => write!(f, "person"),
            PersonKind::Actor => write!(f, "actor"),
            PersonKind::Director => write!(f, "director"),
        }
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Person{{ person ID: {}, name: {}", self.person_id, self.name)?;
        if let Some(agent) = self.agent() {
            write!(f, ", agent: {}", agent)?;
        }
        write!(f, " }}")
    }
}
