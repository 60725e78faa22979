// src/repositories/movie_registry.rs
//
// In-memory registry of movies

use std::collections::BTreeMap;

use crate::domain::{Movie, MovieId, MovieLookup, PersonId};

#[derive(Debug, Clone, Default)]
pub struct MovieRegistry {
    movies: BTreeMap<MovieId, Movie>,
}

impl MovieRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub(crate) fn insert(&mut self, movie: Movie) -> Option<Movie> {
        self.movies.insert(movie.movie_id(), movie)
    }

    pub(crate) fn remove(&mut self, id: MovieId) -> Option<Movie> {
        self.movies.remove(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.movies.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Movie> {
        self.movies.values_mut()
    }

    /// Movies directed by `director`
    pub fn directed_by(&self, director: PersonId) -> impl Iterator<Item = &Movie> {
        self.movies.values().filter(move |m| m.director() == director)
    }

    /// Biographies whose subject is `person`
    pub fn about(&self, person: PersonId) -> impl Iterator<Item = &Movie> {
        self.movies.values().filter(move |m| m.about() == Some(person))
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl MovieLookup for MovieRegistry {
    fn has_movie(&self, id: MovieId) -> bool {
        self.movies.contains_key(&id)
    }
}
