// src/services/persistence.rs
//
// Bulk load and save of the catalog collections
//
// Stored collections:
// - persons:   every person core
// - directors: persons with the director role
// - actors:    persons with the actor role, with their agent
// - movies:    forward references only
//
// Inverse sets are never stored; committing each loaded movie rebuilds them.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    ConstraintViolation, DomainResult, Movie, MovieSlots, Person, PersonId,
    PersonKind,
};
use crate::error::AppResult;
use crate::events::{CatalogLoaded, CatalogSaved};
use crate::repositories::{
    ActorRecord, CollectionStorageExt, MovieRecord, PersonRecord, Records,
};
use crate::services::catalog::Catalog;

/// Counts of what `retrieve_all` loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub persons: usize,
    pub actors: usize,
    pub directors: usize,
    pub movies: usize,
    /// Records dropped because they were malformed or violated a constraint
    pub rejected: usize,
}

impl Catalog {
    /// Replace the registries with the stored collections.
    ///
    /// Never fails: unreadable collections count as empty and invalid
    /// records are logged and skipped.
    pub fn retrieve_all(&mut self) -> LoadReport {
        self.reset();
        let mut report = LoadReport::default();

        let persons: Vec<PersonRecord> =
            self.load_records(&self.collections.persons, &mut report);
        for record in persons {
            let person_id = record.person_id;
            match self.load_person(record) {
                Ok(()) => report.persons += 1,
                Err(e) => reject_record("person", person_id, &e, &mut report),
            }
        }

        let directors: Vec<PersonRecord> =
            self.load_records(&self.collections.directors, &mut report);
        for record in directors {
            let person_id = record.person_id;
            match self.load_role(PersonKind::Director, record.person_id, &record.name) {
                Ok(()) => report.directors += 1,
                Err(e) => reject_record("director", person_id, &e, &mut report),
            }
        }

        // agents may point at actors further down the collection, so they
        // are attached once every actor is in place
        let actors: Vec<ActorRecord> =
            self.load_records(&self.collections.actors, &mut report);
        let mut agents = Vec::new();
        for record in actors {
            let person_id = record.person_id;
            match self.load_role(PersonKind::Actor, record.person_id, &record.name) {
                Ok(()) => {
                    report.actors += 1;
                    if record.agent.is_some() {
                        agents.push((person_id, record.agent));
                    }
                }
                Err(e) => reject_record("actor", person_id, &e, &mut report),
            }
        }
        for (person_id, agent) in agents {
            if let Err(e) = self.load_agent(person_id as PersonId, agent) {
                reject_record("agent of actor", person_id, &e, &mut report);
            }
        }

        let movies: Vec<MovieRecord> =
            self.load_records(&self.collections.movies, &mut report);
        for record in movies {
            let movie_id = record.movie_id;
            match Movie::new(&MovieSlots::from(record), &self.persons, &self.movies) {
                Ok(movie) => {
                    self.commit_movie(movie);
                    report.movies += 1;
                }
                Err(e) => reject_record("movie", movie_id, &e, &mut report),
            }
        }

        log::info!(
            "{} person, {} actor, {} director and {} movie records loaded ({} rejected).",
            report.persons,
            report.actors,
            report.directors,
            report.movies,
            report.rejected
        );
        self.event_bus.emit(CatalogLoaded::new(
            self.persons.len(),
            self.movies.len(),
            report.rejected,
        ));
        report
    }

    /// Write every collection in one all-or-nothing batch. On failure the
    /// stored catalog is the previous one, the registries stay the unsaved
    /// source of truth and the error is returned.
    pub fn save_all(&self) -> AppResult<()> {
        let persons: Vec<PersonRecord> = self.persons.iter().map(PersonRecord::from).collect();
        let directors: Vec<PersonRecord> = self
            .persons
            .iter_kind(PersonKind::Director)
            .map(PersonRecord::from)
            .collect();
        let actors: Vec<ActorRecord> = self
            .persons
            .iter()
            .filter_map(ActorRecord::from_person)
            .collect();
        let movies: Vec<MovieRecord> = self.movies.iter().map(MovieRecord::from).collect();

        let collections = [
            (
                self.collections.persons.as_str(),
                records_of(persons.iter().map(|r| (r.person_id, r)))?,
            ),
            (
                self.collections.directors.as_str(),
                records_of(directors.iter().map(|r| (r.person_id, r)))?,
            ),
            (
                self.collections.actors.as_str(),
                records_of(actors.iter().map(|r| (r.person_id, r)))?,
            ),
            (
                self.collections.movies.as_str(),
                records_of(movies.iter().map(|r| (r.movie_id, r)))?,
            ),
        ];
        self.storage
            .save_collections(&collections)
            .inspect_err(|e| log::error!("Error when writing the catalog: {}", e))?;
        for (name, records) in &collections {
            log::info!("{} records saved to '{}'.", records.len(), name);
        }

        self.event_bus.emit(CatalogSaved::new(
            persons.len(),
            actors.len(),
            directors.len(),
            movies.len(),
        ));
        Ok(())
    }

    fn load_records<R: DeserializeOwned>(&self, name: &str, report: &mut LoadReport) -> Vec<R> {
        let records = self.storage.load_collection(name);
        let mut parsed = Vec::with_capacity(records.len());
        for (key, value) in records {
            match serde_json::from_value::<R>(value) {
                Ok(record) => parsed.push(record),
                Err(e) => {
                    log::warn!("Malformed record {} in collection '{}': {}", key, name, e);
                    report.rejected += 1;
                }
            }
        }
        parsed
    }

    fn load_person(&mut self, record: PersonRecord) -> DomainResult<()> {
        if self.stored_person(record.person_id).is_some() {
            return Err(ConstraintViolation::Uniqueness(format!(
                "There is already a person record with person ID {}!",
                record.person_id
            )));
        }
        let person = Person::new(record.person_id, &record.name)?;
        self.persons.insert(person);
        Ok(())
    }

    /// Attach a role to the stored person, creating the core when the
    /// persons collection did not have it.
    fn load_role(&mut self, kind: PersonKind, person_id: i64, name: &str) -> DomainResult<()> {
        let mut person = match self.stored_person(person_id) {
            Some(existing) if existing.name() == name => existing.clone(),
            Some(existing) => {
                return Err(ConstraintViolation::Uniqueness(format!(
                    "Person {} is stored with the name {}!",
                    person_id,
                    existing.name()
                )))
            }
            None => Person::new(person_id, name)?,
        };
        if person.is(kind) {
            return Err(ConstraintViolation::Uniqueness(format!(
                "There is already a {} record with person ID {}!",
                kind, person_id
            )));
        }
        match kind {
            PersonKind::Actor => person.make_actor(),
            PersonKind::Director => person.make_director(),
            PersonKind::Person => {}
        }
        self.persons.insert(person);
        Ok(())
    }

    fn stored_person(&self, person_id: i64) -> Option<&Person> {
        PersonId::try_from(person_id)
            .ok()
            .and_then(|id| self.persons.get(id))
    }

    fn load_agent(&mut self, person_id: PersonId, agent: Option<i64>) -> DomainResult<()> {
        let Some(mut actor) = self.persons.get(person_id).cloned() else {
            return Ok(());
        };
        actor.set_agent(&self.persons, agent)?;
        self.persons.insert(actor);
        Ok(())
    }
}

fn records_of<'a, R: Serialize + 'a>(
    records: impl Iterator<Item = (i64, &'a R)>,
) -> AppResult<Records> {
    let mut collection = Records::new();
    for (id, record) in records {
        collection.insert(id.to_string(), serde_json::to_value(record)?);
    }
    Ok(collection)
}

fn reject_record(what: &str, id: i64, violation: &ConstraintViolation, report: &mut LoadReport) {
    log::warn!(
        "{} while deserializing {} {}: {}",
        violation.kind(),
        what,
        id,
        violation
    );
    report.rejected += 1;
}
