// src/repositories/records.rs
//
// Plain storage records
//
// Records mirror the stored JSON shape: camelCase keys, references as ids.
// Identifiers are signed on the way in so that corrupt values reach the
// domain checks instead of failing inside serde.

use serde::{Deserialize, Serialize};

use crate::domain::{Movie, MovieSlots, Person, PersonSlots};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub person_id: i64,
    pub name: String,
}

/// Stored form of the actor role, including the core fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRecord {
    pub person_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub movie_id: i64,
    pub title: String,
    pub release_date: String,
    pub director: i64,
    #[serde(default)]
    pub actors: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv_series_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_no: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<i64>,
}

impl From<&Person> for PersonRecord {
    fn from(person: &Person) -> Self {
        Self {
            person_id: person.person_id() as i64,
            name: person.name().to_string(),
        }
    }
}

impl From<PersonRecord> for PersonSlots {
    fn from(record: PersonRecord) -> Self {
        Self {
            person_id: Some(record.person_id),
            name: Some(record.name),
            agent_id: None,
        }
    }
}

impl ActorRecord {
    /// `None` when the person does not have the actor role
    pub fn from_person(person: &Person) -> Option<Self> {
        person.actor()?;
        Some(Self {
            person_id: person.person_id() as i64,
            name: person.name().to_string(),
            agent: person.agent().map(i64::from),
        })
    }
}

impl From<ActorRecord> for PersonSlots {
    fn from(record: ActorRecord) -> Self {
        Self {
            person_id: Some(record.person_id),
            name: Some(record.name),
            agent_id: record.agent,
        }
    }
}

impl From<&Movie> for MovieRecord {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.movie_id() as i64,
            title: movie.title().to_string(),
            release_date: movie.release_date().format("%Y-%m-%d").to_string(),
            director: movie.director() as i64,
            actors: movie.actors().iter().map(|&id| id as i64).collect(),
            category: movie.category().map(|c| c.code() as i64),
            about: movie.about().map(i64::from),
            tv_series_name: movie.tv_series_name().map(str::to_string),
            episode_no: movie.episode_no().map(i64::from),
            rating: movie.rating().map(i64::from),
            genres: movie.genres().iter().map(|&g| g as i64).collect(),
        }
    }
}

impl From<MovieRecord> for MovieSlots {
    fn from(record: MovieRecord) -> Self {
        Self {
            movie_id: Some(record.movie_id),
            title: Some(record.title),
            release_date: Some(record.release_date),
            director_id: Some(record.director),
            actor_ids: record.actors,
            category: record.category,
            about_id: record.about,
            tv_series_name: record.tv_series_name,
            episode_no: record.episode_no,
            rating: record.rating,
            genres: if record.genres.is_empty() {
                None
            } else {
                Some(record.genres)
            },
        }
    }
}
