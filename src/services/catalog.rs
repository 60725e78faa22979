// src/services/catalog.rs
//
// The catalog: person and movie registries plus their storage
//
// CRITICAL RULES:
// - Forward references (movie -> director, actors, about) are authoritative
// - Inverse sets (played/directed movies) change only through
//   link_movie / unlink_movie, on every committed movie change
// - A failed operation leaves both registries untouched

use std::sync::Arc;

use crate::config::CollectionNames;
use crate::domain::{ConstraintViolation, Movie, MovieId, Person, PersonId};
use crate::error::AppError;
use crate::events::EventBus;
use crate::repositories::{CollectionStorage, MovieRegistry, PersonRegistry};

/// Property names touched by a successful update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub updated_properties: Vec<String>,
}

impl UpdateReport {
    pub(crate) fn push(&mut self, property: &str) {
        if !self.updated_properties.iter().any(|p| p == property) {
            self.updated_properties.push(property.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.updated_properties.is_empty()
    }

    pub(crate) fn describe(&self, subject: &str) -> String {
        match self.updated_properties.len() {
            0 => format!("No property value changed for {}!", subject),
            1 => format!(
                "Property {} modified for {}",
                self.updated_properties[0], subject
            ),
            _ => format!(
                "Properties {} modified for {}",
                self.updated_properties.join(", "),
                subject
            ),
        }
    }
}

pub struct Catalog {
    pub(crate) persons: PersonRegistry,
    pub(crate) movies: MovieRegistry,
    pub(crate) storage: Arc<dyn CollectionStorage>,
    pub(crate) event_bus: Arc<EventBus>,
    pub(crate) collections: CollectionNames,
}

impl Catalog {
    pub fn new(
        storage: Arc<dyn CollectionStorage>,
        event_bus: Arc<EventBus>,
        collections: CollectionNames,
    ) -> Self {
        Self {
            persons: PersonRegistry::new(),
            movies: MovieRegistry::new(),
            storage,
            event_bus,
            collections,
        }
    }

    pub fn persons(&self) -> &PersonRegistry {
        &self.persons
    }

    pub fn movies(&self) -> &MovieRegistry {
        &self.movies
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(id)
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    pub fn collections(&self) -> &CollectionNames {
        &self.collections
    }

    /// Put a validated movie into the registry, replacing any previous
    /// version and moving the inverse references along.
    pub(crate) fn commit_movie(&mut self, movie: Movie) {
        if let Some(previous) = self.movies.remove(movie.movie_id()) {
            unlink_movie(&mut self.persons, &previous);
        }
        link_movie(&mut self.persons, &movie);
        self.movies.insert(movie);
    }

    /// Forget every movie and person, without touching storage
    pub(crate) fn reset(&mut self) {
        self.movies.clear();
        self.persons.clear();
    }
}

/// Record `movie` in the inverse sets of its director and cast
pub(crate) fn link_movie(persons: &mut PersonRegistry, movie: &Movie) {
    let movie_id = movie.movie_id();
    if let Some(director) = persons.get_mut(movie.director()) {
        director.link_directed_movie(movie_id);
    }
    for &actor_id in movie.actors() {
        if let Some(actor) = persons.get_mut(actor_id) {
            actor.link_played_movie(movie_id);
        }
    }
}

/// Remove `movie` from the inverse sets of its director and cast
pub(crate) fn unlink_movie(persons: &mut PersonRegistry, movie: &Movie) {
    let movie_id = movie.movie_id();
    if let Some(director) = persons.get_mut(movie.director()) {
        director.unlink_directed_movie(movie_id);
    }
    for &actor_id in movie.actors() {
        if let Some(actor) = persons.get_mut(actor_id) {
            actor.unlink_played_movie(movie_id);
        }
    }
}

/// Log a rejected operation and turn its violation into an error
pub(crate) fn rejected(violation: ConstraintViolation) -> AppError {
    log::warn!("{}: {}", violation.kind(), violation);
    AppError::Constraint(violation)
}

/// A violation raised while changing one named property during an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertyViolation {
    pub property: &'static str,
    pub violation: ConstraintViolation,
}

impl PropertyViolation {
    pub(crate) fn describe(&self, subject: &str) -> String {
        format!(
            "Changing property {} of {} failed. {}: {}",
            self.property,
            subject,
            self.violation.kind(),
            self.violation
        )
    }
}

/// Tag a violation with the property whose change raised it
pub(crate) fn on_property(
    property: &'static str,
) -> impl FnOnce(ConstraintViolation) -> PropertyViolation {
    move |violation| PropertyViolation {
        property,
        violation,
    }
}

/// Log a rejected property change and turn it into an error
pub(crate) fn rejected_change(subject: &str, failure: PropertyViolation) -> AppError {
    log::warn!("{}", failure.describe(subject));
    AppError::Constraint(failure.violation)
}

/// Comma-separated ids for log and error messages
pub(crate) fn join_ids<I: IntoIterator<Item = u32>>(ids: I) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_report_wording() {
        let mut report = UpdateReport::default();
        assert_eq!(report.describe("movie 2"), "No property value changed for movie 2!");

        report.push("title");
        report.push("title");
        assert_eq!(report.describe("movie 2"), "Property title modified for movie 2");

        report.push("director");
        assert_eq!(
            report.describe("movie 2"),
            "Properties title, director modified for movie 2"
        );
    }

    #[test]
    fn test_property_violation_wording() {
        let failure = on_property("releaseDate")(ConstraintViolation::Interval(
            "The release date must not be before 1895-12-28!".to_string(),
        ));
        assert_eq!(
            failure.describe("movie 2"),
            "Changing property releaseDate of movie 2 failed. IntervalConstraintViolation: \
             The release date must not be before 1895-12-28!"
        );
        assert!(matches!(
            rejected_change("movie 2", failure),
            AppError::Constraint(ConstraintViolation::Interval(_))
        ));
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids([1, 3]), "1, 3");
        assert_eq!(join_ids(Vec::new()), "");
    }
}
