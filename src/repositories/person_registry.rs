// src/repositories/person_registry.rs
//
// In-memory registry of persons
//
// One entry per person id. Actor and director views are filters over the
// same entries, selected by role.

use std::collections::BTreeMap;

use crate::domain::{Person, PersonId, PersonKind, PersonLookup};

#[derive(Debug, Clone, Default)]
pub struct PersonRegistry {
    persons: BTreeMap<PersonId, Person>,
}

impl PersonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.get_mut(&id)
    }

    /// Entry of `id` if it has the `kind` role
    pub fn get_as(&self, kind: PersonKind, id: PersonId) -> Option<&Person> {
        self.persons.get(&id).filter(|p| p.is(kind))
    }

    /// Insert or replace the entry keyed by the person's id
    pub(crate) fn insert(&mut self, person: Person) -> Option<Person> {
        self.persons.insert(person.person_id(), person)
    }

    pub(crate) fn remove(&mut self, id: PersonId) -> Option<Person> {
        self.persons.remove(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.persons.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        self.persons.values_mut()
    }

    /// Entries having the `kind` role, in id order
    pub fn iter_kind(&self, kind: PersonKind) -> impl Iterator<Item = &Person> {
        self.persons.values().filter(move |p| p.is(kind))
    }

    pub fn count(&self, kind: PersonKind) -> usize {
        self.iter_kind(kind).count()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

impl PersonLookup for PersonRegistry {
    fn has_person(&self, kind: PersonKind, id: PersonId) -> bool {
        self.get_as(kind, id).is_some()
    }
}
