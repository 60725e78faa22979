use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::category::MovieCategory;
use super::invariants::{
    check_about, check_actor, check_category, check_director, check_episode_no, check_genres,
    check_movie_id_as_primary_key, check_rating, check_title, check_tv_series_name,
    parse_release_date, validate_movie,
};
use crate::domain::{
    ConstraintViolation, DomainResult, MovieId, MovieLookup, PersonId, PersonLookup, GENRE,
    MOVIE_RATING,
};

/// Raw construction input for a movie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieSlots {
    pub movie_id: Option<i64>,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub director_id: Option<i64>,
    pub actor_ids: Vec<i64>,
    pub category: Option<i64>,
    pub about_id: Option<i64>,
    pub tv_series_name: Option<String>,
    pub episode_no: Option<i64>,
    pub rating: Option<i64>,
    pub genres: Option<Vec<i64>>,
}

/// A movie with its forward references.
///
/// References to people are ids into the person registry. The inverse
/// collections on the referenced people are not touched here; the catalog
/// reconciles them whenever a movie is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    movie_id: MovieId,
    title: String,
    release_date: NaiveDate,
    director: PersonId,
    actors: BTreeSet<PersonId>,
    category: Option<MovieCategory>,
    about: Option<PersonId>,
    tv_series_name: Option<String>,
    episode_no: Option<u32>,
    rating: Option<u32>,
    genres: Vec<u32>,
}

impl Movie {
    /// Build a fully validated movie. Fails with the first violated rule.
    pub fn new(
        slots: &MovieSlots,
        persons: &dyn PersonLookup,
        movies: &dyn MovieLookup,
    ) -> DomainResult<Self> {
        check_movie_id_as_primary_key(movies, slots.movie_id)?;
        check_title(slots.title.as_deref())?;
        let release_date = parse_release_date(slots.release_date.as_deref())?;
        check_director(persons, slots.director_id)?;

        // The checks above guarantee presence of these values
        let (Some(movie_id), Some(title), Some(director)) =
            (slots.movie_id, slots.title.as_deref(), slots.director_id)
        else {
            return Err(ConstraintViolation::MandatoryValueMissing(
                "Movie ID, title and director are required!".to_string(),
            ));
        };

        let mut movie = Self {
            movie_id: movie_id as MovieId,
            title: title.to_string(),
            release_date,
            director: director as PersonId,
            actors: BTreeSet::new(),
            category: None,
            about: None,
            tv_series_name: None,
            episode_no: None,
            rating: None,
            genres: Vec::new(),
        };

        movie.set_actors(persons, &slots.actor_ids)?;
        movie.set_category(slots.category)?;
        movie.set_about(persons, slots.about_id)?;
        movie.set_tv_series_name(slots.tv_series_name.as_deref())?;
        movie.set_episode_no(slots.episode_no)?;
        movie.set_rating(slots.rating)?;
        if slots.genres.is_some() {
            movie.set_genres(slots.genres.as_deref())?;
        }

        validate_movie(&movie, persons)?;
        Ok(movie)
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> DomainResult<()> {
        check_title(Some(title))?;
        self.title = title.to_string();
        Ok(())
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn set_release_date(&mut self, date: &str) -> DomainResult<()> {
        self.release_date = parse_release_date(Some(date))?;
        Ok(())
    }

    pub fn director(&self) -> PersonId {
        self.director
    }

    /// Point the movie at another director, returning the previous one.
    pub fn set_director(
        &mut self,
        persons: &dyn PersonLookup,
        director_id: i64,
    ) -> DomainResult<PersonId> {
        check_director(persons, Some(director_id))?;
        Ok(std::mem::replace(&mut self.director, director_id as PersonId))
    }

    pub fn actors(&self) -> &BTreeSet<PersonId> {
        &self.actors
    }

    pub fn has_actor(&self, actor_id: PersonId) -> bool {
        self.actors.contains(&actor_id)
    }

    /// Replace the whole cast. Nothing changes if any id is invalid.
    pub fn set_actors(&mut self, persons: &dyn PersonLookup, actor_ids: &[i64]) -> DomainResult<()> {
        let mut actors = BTreeSet::new();
        for &id in actor_ids {
            check_actor(persons, Some(id))?;
            actors.insert(id as PersonId);
        }
        self.actors = actors;
        Ok(())
    }

    pub fn add_actor(&mut self, persons: &dyn PersonLookup, actor_id: i64) -> DomainResult<()> {
        check_actor(persons, Some(actor_id))?;
        self.actors.insert(actor_id as PersonId);
        Ok(())
    }

    /// Remove an actor. Returns false when the actor was not in the cast.
    pub fn remove_actor(&mut self, persons: &dyn PersonLookup, actor_id: i64) -> DomainResult<bool> {
        check_actor(persons, Some(actor_id))?;
        Ok(self.actors.remove(&(actor_id as PersonId)))
    }

    /// Drop an actor reference without validation, used when the actor
    /// itself is being destroyed.
    pub(crate) fn forget_actor(&mut self, actor_id: PersonId) -> bool {
        self.actors.remove(&actor_id)
    }

    pub fn category(&self) -> Option<MovieCategory> {
        self.category
    }

    /// Categories are write-once: Unset -> Biography | TvSeriesEpisode.
    /// Re-assigning the current value is a no-op.
    pub fn set_category(&mut self, category: Option<i64>) -> DomainResult<()> {
        let requested = match category {
            None => None,
            Some(code) => {
                check_category(Some(code))?;
                MovieCategory::from_code(code as u32)
            }
        };
        match (self.category, requested) {
            (current, requested) if current == requested => Ok(()),
            (None, Some(new)) => {
                self.category = Some(new);
                Ok(())
            }
            (Some(_), None) => Err(ConstraintViolation::FrozenValue(
                "The movie category cannot be unset!".to_string(),
            )),
            _ => Err(ConstraintViolation::FrozenValue(
                "The category cannot be changed!".to_string(),
            )),
        }
    }

    pub fn about(&self) -> Option<PersonId> {
        self.about
    }

    pub fn set_about(&mut self, persons: &dyn PersonLookup, about_id: Option<i64>) -> DomainResult<()> {
        check_about(persons, about_id, self.category)?;
        self.about = about_id.map(|id| id as PersonId);
        Ok(())
    }

    pub fn tv_series_name(&self) -> Option<&str> {
        self.tv_series_name.as_deref()
    }

    pub fn set_tv_series_name(&mut self, name: Option<&str>) -> DomainResult<()> {
        let name = name.filter(|n| !n.is_empty());
        check_tv_series_name(name, self.category)?;
        self.tv_series_name = name.map(str::to_string);
        Ok(())
    }

    pub fn episode_no(&self) -> Option<u32> {
        self.episode_no
    }

    pub fn set_episode_no(&mut self, episode_no: Option<i64>) -> DomainResult<()> {
        check_episode_no(episode_no, self.category)?;
        self.episode_no = episode_no.map(|n| n as u32);
        Ok(())
    }

    pub fn rating(&self) -> Option<u32> {
        self.rating
    }

    pub fn set_rating(&mut self, rating: Option<i64>) -> DomainResult<()> {
        check_rating(rating)?;
        self.rating = rating.map(|r| r as u32);
        Ok(())
    }

    pub fn genres(&self) -> &[u32] {
        &self.genres
    }

    /// `None` clears the genres; `Some` must be a non-empty list of valid codes.
    pub fn set_genres(&mut self, genres: Option<&[i64]>) -> DomainResult<()> {
        check_genres(genres)?;
        let mut codes: Vec<u32> = Vec::new();
        for &g in genres.unwrap_or_default() {
            let code = g as u32;
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        self.genres = codes;
        Ok(())
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Movie{{ movie ID: {}, title: {}, release date: {}, director: {}",
            self.movie_id, self.title, self.release_date, self.director
        )?;
        if !self.actors.is_empty() {
            let actors: Vec<String> = self.actors.iter().map(u32::to_string).collect();
            write!(f, ", actors: [{}]", actors.join(", "))?;
        }
        if let Some(rating) = self.rating.and_then(|r| MOVIE_RATING.name(r)) {
            write!(f, ", rating: {}", rating)?;
        }
        if !self.genres.is_empty() {
            write!(f, ", genres: {}", GENRE.convert_indexes_to_names(&self.genres))?;
        }
        match self.category {
            Some(MovieCategory::Biography) => {
                if let Some(about) = self.about {
                    write!(f, ", biography about: {}", about)?;
                }
            }
            Some(MovieCategory::TvSeriesEpisode) => {
                write!(
                    f,
                    ", series episode from {} episode {}",
                    self.tv_series_name.as_deref().unwrap_or(""),
                    self.episode_no.unwrap_or(0)
                )?;
            }
            None => {}
        }
        write!(f, " }}")
    }
}
