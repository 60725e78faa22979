// src/services/movie_service.rs
//
// Add / update / destroy for movies and the movie-person associations
//
// Every change is staged on a copy of the movie, checked as a whole and
// only then committed, so a failed call never leaves a half-updated movie
// or a stale inverse reference behind.

use crate::domain::{validate_movie, DomainResult, Movie, MovieId, MovieSlots};
use crate::error::{AppError, AppResult};
use crate::events::{MovieAdded, MovieDestroyed, MovieUpdated};
use crate::repositories::PersonRegistry;
use crate::services::catalog::{
    on_property, rejected, rejected_change, unlink_movie, Catalog, PropertyViolation,
    UpdateReport,
};

/// Changes to apply to one movie. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct UpdateMovieRequest {
    pub movie_id: MovieId,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub director_id: Option<i64>,
    pub actor_ids_to_add: Vec<i64>,
    pub actor_ids_to_remove: Vec<i64>,
    /// `Some(None)` asks to unset the category, which is only accepted
    /// while no category is set
    pub category: Option<Option<i64>>,
    pub about_id: Option<i64>,
    pub tv_series_name: Option<String>,
    pub episode_no: Option<i64>,
    pub rating: Option<Option<i64>>,
    pub genres: Option<Option<Vec<i64>>>,
}

impl Catalog {
    pub fn add_movie(&mut self, slots: MovieSlots) -> AppResult<MovieId> {
        let movie = Movie::new(&slots, &self.persons, &self.movies).map_err(rejected)?;
        let movie_id = movie.movie_id();
        let title = movie.title().to_string();

        self.commit_movie(movie);
        log::info!("Movie {} created!", movie_id);
        self.event_bus.emit(MovieAdded::new(movie_id, title));
        Ok(movie_id)
    }

    /// Apply all requested changes or none of them.
    pub fn update_movie(&mut self, request: UpdateMovieRequest) -> AppResult<UpdateReport> {
        let movie_id = request.movie_id;
        let subject = format!("movie {}", movie_id);
        let mut staged = self.staged_movie(movie_id)?;

        let mut report = UpdateReport::default();
        apply_movie_update(&mut staged, &self.persons, &request, &mut report)
            .map_err(|failure| rejected_change(&subject, failure))?;
        validate_movie(&staged, &self.persons).map_err(rejected)?;
        self.commit_movie(staged);

        log::info!("{}", report.describe(&subject));
        if !report.is_empty() {
            self.event_bus
                .emit(MovieUpdated::new(movie_id, report.updated_properties.clone()));
        }
        Ok(report)
    }

    /// Remove a movie and its entries in the director's and actors'
    /// inverse sets. Returns false when there is no such movie.
    pub fn destroy_movie(&mut self, movie_id: MovieId) -> AppResult<bool> {
        let Some(movie) = self.movies.remove(movie_id) else {
            log::warn!("There is no movie with ID {} in the database!", movie_id);
            return Ok(false);
        };

        unlink_movie(&mut self.persons, &movie);
        log::info!("{} deleted!", movie);
        self.event_bus.emit(MovieDestroyed::new(movie_id));
        Ok(true)
    }

    /// Point a movie at another director, moving the movie between the
    /// two directors' directed-movie sets.
    pub fn set_movie_director(&mut self, movie_id: MovieId, director_id: i64) -> AppResult<()> {
        let previous = self.modify_movie(movie_id, |movie, persons| {
            movie.set_director(persons, director_id)
        })?;
        if i64::from(previous) != director_id {
            self.event_bus
                .emit(MovieUpdated::new(movie_id, vec!["director".to_string()]));
        }
        Ok(())
    }

    /// Add an actor to a cast. Adding a current cast member changes nothing.
    pub fn add_movie_actor(&mut self, movie_id: MovieId, actor_id: i64) -> AppResult<()> {
        let changed = self.modify_movie(movie_id, |movie, persons| {
            let before = movie.actors().clone();
            movie.add_actor(persons, actor_id)?;
            Ok(*movie.actors() != before)
        })?;
        if changed {
            self.event_bus
                .emit(MovieUpdated::new(movie_id, vec!["actors".to_string()]));
        }
        Ok(())
    }

    /// Remove an actor from a cast. Removing a valid actor that is not in
    /// the cast is a no-op returning false.
    pub fn remove_movie_actor(&mut self, movie_id: MovieId, actor_id: i64) -> AppResult<bool> {
        let removed = self.modify_movie(movie_id, |movie, persons| {
            movie.remove_actor(persons, actor_id)
        })?;
        if removed {
            self.event_bus
                .emit(MovieUpdated::new(movie_id, vec!["actors".to_string()]));
        }
        Ok(removed)
    }

    /// Replace the whole cast of a movie
    pub fn set_movie_actors(&mut self, movie_id: MovieId, actor_ids: &[i64]) -> AppResult<()> {
        let changed = self.modify_movie(movie_id, |movie, persons| {
            let before = movie.actors().clone();
            movie.set_actors(persons, actor_ids)?;
            Ok(*movie.actors() != before)
        })?;
        if changed {
            self.event_bus
                .emit(MovieUpdated::new(movie_id, vec!["actors".to_string()]));
        }
        Ok(())
    }

    /// Run `change` on a copy of the movie, validate the result and commit it.
    fn modify_movie<T, F>(&mut self, movie_id: MovieId, change: F) -> AppResult<T>
    where
        F: FnOnce(&mut Movie, &PersonRegistry) -> DomainResult<T>,
    {
        let mut staged = self.staged_movie(movie_id)?;
        let outcome = change(&mut staged, &self.persons)
            .and_then(|value| validate_movie(&staged, &self.persons).map(|()| value))
            .map_err(rejected)?;

        self.commit_movie(staged);
        Ok(outcome)
    }

    fn staged_movie(&self, movie_id: MovieId) -> AppResult<Movie> {
        self.movies.get(movie_id).cloned().ok_or_else(|| {
            log::warn!("There is no movie with ID {} in the database!", movie_id);
            AppError::NotFound(format!("movie {}", movie_id))
        })
    }
}

pub(super) fn apply_movie_update(
    movie: &mut Movie,
    persons: &PersonRegistry,
    request: &UpdateMovieRequest,
    report: &mut UpdateReport,
) -> Result<(), PropertyViolation> {
    if let Some(title) = request.title.as_deref() {
        if movie.title() != title {
            movie.set_title(title).map_err(on_property("title"))?;
            report.push("title");
        }
    }
    if let Some(date) = request.release_date.as_deref() {
        let before = movie.release_date();
        movie.set_release_date(date).map_err(on_property("releaseDate"))?;
        if movie.release_date() != before {
            report.push("releaseDate");
        }
    }

    let cast_before = movie.actors().clone();
    for &actor_id in &request.actor_ids_to_add {
        movie.add_actor(persons, actor_id).map_err(on_property("actors"))?;
    }
    for &actor_id in &request.actor_ids_to_remove {
        movie.remove_actor(persons, actor_id).map_err(on_property("actors"))?;
    }
    if *movie.actors() != cast_before {
        report.push("actors");
    }

    if let Some(director_id) = request.director_id {
        if i64::from(movie.director()) != director_id {
            movie.set_director(persons, director_id).map_err(on_property("director"))?;
            report.push("director");
        }
    }
    if let Some(category) = request.category {
        if movie.category().map(|c| i64::from(c.code())) != category {
            movie.set_category(category).map_err(on_property("category"))?;
            report.push("category");
        }
    }
    if let Some(about_id) = request.about_id {
        if movie.about().map(i64::from) != Some(about_id) {
            movie.set_about(persons, Some(about_id)).map_err(on_property("about"))?;
            report.push("about");
        }
    }
    if let Some(name) = request.tv_series_name.as_deref() {
        if movie.tv_series_name() != Some(name) {
            movie.set_tv_series_name(Some(name)).map_err(on_property("tvSeriesName"))?;
            report.push("tvSeriesName");
        }
    }
    if let Some(episode_no) = request.episode_no {
        if movie.episode_no().map(i64::from) != Some(episode_no) {
            movie.set_episode_no(Some(episode_no)).map_err(on_property("episodeNo"))?;
            report.push("episodeNo");
        }
    }
    if let Some(rating) = request.rating {
        if movie.rating().map(i64::from) != rating {
            movie.set_rating(rating).map_err(on_property("rating"))?;
            report.push("rating");
        }
    }
    if let Some(genres) = request.genres.as_ref() {
        let before = movie.genres().to_vec();
        movie.set_genres(genres.as_deref()).map_err(on_property("genres"))?;
        if movie.genres() != before.as_slice() {
            report.push("genres");
        }
    }
    Ok(())
}
