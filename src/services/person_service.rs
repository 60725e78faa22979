// src/services/person_service.rs
//
// Add / update / destroy for persons, actors and directors
//
// Actor and director are roles on one person entry: adding an actor whose
// id is already a known person attaches the role, destroying an actor
// detaches it and keeps the person.

use crate::domain::{
    check_name, check_person_id_as_primary_key, ConstraintViolation, DomainResult, Person,
    PersonId, PersonKind, PersonSlots,
};
use crate::error::{AppError, AppResult};
use crate::events::{PersonAdded, PersonDestroyed, PersonUpdated};
use crate::repositories::PersonRegistry;
use crate::services::catalog::{
    join_ids, on_property, rejected, rejected_change, Catalog, PropertyViolation, UpdateReport,
};

#[derive(Debug, Clone, Default)]
pub struct UpdatePersonRequest {
    pub person_id: PersonId,
    pub name: Option<String>,
    /// `Some(None)` unsets the agent, `Some(Some(id))` replaces it
    pub agent: Option<Option<i64>>,
}

impl Catalog {
    pub fn add_person(&mut self, slots: PersonSlots) -> AppResult<PersonId> {
        self.add_in_role(PersonKind::Person, slots)
    }

    pub fn add_actor(&mut self, slots: PersonSlots) -> AppResult<PersonId> {
        self.add_in_role(PersonKind::Actor, slots)
    }

    pub fn add_director(&mut self, slots: PersonSlots) -> AppResult<PersonId> {
        self.add_in_role(PersonKind::Director, slots)
    }

    pub fn update_person(&mut self, request: UpdatePersonRequest) -> AppResult<UpdateReport> {
        self.update_in_role(PersonKind::Person, request)
    }

    pub fn update_actor(&mut self, request: UpdatePersonRequest) -> AppResult<UpdateReport> {
        self.update_in_role(PersonKind::Actor, request)
    }

    pub fn update_director(&mut self, request: UpdatePersonRequest) -> AppResult<UpdateReport> {
        self.update_in_role(PersonKind::Director, request)
    }

    /// Remove a person entirely.
    ///
    /// The person is dropped from every cast and unset as agent wherever
    /// it was one. Fails while the person still directs a movie or is the
    /// subject of a biography. Returns false when there is no such person.
    pub fn destroy_person(&mut self, person_id: PersonId) -> AppResult<bool> {
        let Some(person) = self.persons.get(person_id) else {
            log::warn!("There is no person with ID {} in the database!", person_id);
            return Ok(false);
        };
        let name = person.name().to_string();

        self.ensure_not_directing(person_id).map_err(rejected)?;
        let biographies: Vec<_> = self.movies.about(person_id).map(|m| m.movie_id()).collect();
        if !biographies.is_empty() {
            return Err(rejected(ConstraintViolation::ReferentialIntegrity(format!(
                "Person {} is the subject of movies {}!",
                person_id,
                join_ids(biographies)
            ))));
        }

        self.forget_actor_everywhere(person_id);
        for other in self.persons.iter_mut() {
            if other.clear_agent_if(person_id) {
                log::info!(
                    "Agent {} unset for actor {}",
                    person_id,
                    other.person_id()
                );
            }
        }
        self.persons.remove(person_id);

        log::info!("Person {} deleted.", name);
        self.event_bus
            .emit(PersonDestroyed::new(person_id, PersonKind::Person));
        Ok(true)
    }

    /// Detach the actor role, removing the actor from every cast.
    pub fn destroy_actor(&mut self, person_id: PersonId) -> AppResult<bool> {
        if self.persons.get_as(PersonKind::Actor, person_id).is_none() {
            log::warn!("There is no actor with ID {} in the database!", person_id);
            return Ok(false);
        }

        self.forget_actor_everywhere(person_id);
        if let Some(person) = self.persons.get_mut(person_id) {
            person.take_actor_role();
            log::info!("Actor {} deleted.", person.name());
        }
        self.event_bus
            .emit(PersonDestroyed::new(person_id, PersonKind::Actor));
        Ok(true)
    }

    /// Detach the director role. Fails while the director has movies.
    pub fn destroy_director(&mut self, person_id: PersonId) -> AppResult<bool> {
        if self.persons.get_as(PersonKind::Director, person_id).is_none() {
            log::warn!("There is no director with ID {} in the database!", person_id);
            return Ok(false);
        }

        self.ensure_not_directing(person_id).map_err(rejected)?;
        if let Some(person) = self.persons.get_mut(person_id) {
            person.take_director_role();
            log::info!("Director {} deleted.", person.name());
        }
        self.event_bus
            .emit(PersonDestroyed::new(person_id, PersonKind::Director));
        Ok(true)
    }

    fn add_in_role(&mut self, kind: PersonKind, slots: PersonSlots) -> AppResult<PersonId> {
        let person = self.stage_new_person(kind, &slots).map_err(rejected)?;
        let person_id = person.person_id();

        log::info!("Saved {} {}: {}", kind, person_id, person.name());
        self.persons.insert(person);
        self.event_bus.emit(PersonAdded::new(person_id, kind));
        Ok(person_id)
    }

    /// Build the entry `slots` describes, without touching the registry.
    fn stage_new_person(&self, kind: PersonKind, slots: &PersonSlots) -> DomainResult<Person> {
        check_person_id_as_primary_key(&self.persons, kind, slots.person_id)?;
        check_name(slots.name.as_deref())?;
        let (Some(person_id), Some(name)) = (slots.person_id, slots.name.as_deref()) else {
            return Err(ConstraintViolation::MandatoryValueMissing(
                "Person ID and name are required!".to_string(),
            ));
        };

        let mut person = match self.persons.get(person_id as PersonId) {
            Some(existing) if existing.name() == name => existing.clone(),
            Some(existing) => {
                return Err(ConstraintViolation::Uniqueness(format!(
                    "Person {} already exists with the name {}!",
                    person_id,
                    existing.name()
                )))
            }
            None => Person::new(person_id, name)?,
        };

        match kind {
            PersonKind::Actor => person.make_actor(),
            PersonKind::Director => person.make_director(),
            PersonKind::Person => {}
        }
        if slots.agent_id.is_some() {
            // fails for anything but an actor
            person.set_agent(&self.persons, slots.agent_id)?;
        }
        Ok(person)
    }

    fn update_in_role(
        &mut self,
        kind: PersonKind,
        request: UpdatePersonRequest,
    ) -> AppResult<UpdateReport> {
        let person_id = request.person_id;
        let subject = format!("{} {}", kind, person_id);
        let mut staged = self
            .persons
            .get_as(kind, person_id)
            .cloned()
            .ok_or_else(|| {
                log::warn!("There is no {} with ID {} in the database!", kind, person_id);
                AppError::NotFound(format!("{} {}", kind, person_id))
            })?;

        let mut report = UpdateReport::default();
        apply_person_update(&mut staged, &self.persons, &request, &mut report)
            .map_err(|failure| rejected_change(&subject, failure))?;

        log::info!("{}", report.describe(&subject));
        if !report.is_empty() {
            self.persons.insert(staged);
            self.event_bus
                .emit(PersonUpdated::new(person_id, report.updated_properties.clone()));
        }
        Ok(report)
    }

    fn ensure_not_directing(&self, person_id: PersonId) -> DomainResult<()> {
        let directed: Vec<_> = self
            .movies
            .directed_by(person_id)
            .map(|m| m.movie_id())
            .collect();
        if directed.is_empty() {
            return Ok(());
        }
        Err(ConstraintViolation::ReferentialIntegrity(format!(
            "Person {} still directs movies {}!",
            person_id,
            join_ids(directed)
        )))
    }

    fn forget_actor_everywhere(&mut self, person_id: PersonId) {
        for movie in self.movies.iter_mut() {
            if movie.forget_actor(person_id) {
                log::debug!(
                    "Actor {} removed from movie {}",
                    person_id,
                    movie.movie_id()
                );
            }
        }
        if let Some(person) = self.persons.get_mut(person_id) {
            let played: Vec<_> = person
                .played_movies()
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default();
            for movie_id in played {
                person.unlink_played_movie(movie_id);
            }
        }
    }
}

pub(super) fn apply_person_update(
    staged: &mut Person,
    persons: &PersonRegistry,
    request: &UpdatePersonRequest,
    report: &mut UpdateReport,
) -> Result<(), PropertyViolation> {
    if let Some(name) = request.name.as_deref() {
        if staged.name() != name {
            staged.set_name(name).map_err(on_property("name"))?;
            report.push("name");
        }
    }
    if let Some(agent) = request.agent {
        if staged.agent().map(i64::from) != agent {
            staged.set_agent(persons, agent).map_err(on_property("agent"))?;
            report.push("agent");
        }
    }
    Ok(())
}
