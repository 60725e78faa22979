use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::category::MovieCategory;
use super::entity::Movie;
use crate::domain::constraint::check_bounded_text;
use crate::domain::person::check_person_id_as_reference;
use crate::domain::{
    ConstraintViolation, MovieId, MovieLookup, Outcome, PersonKind, PersonLookup, GENRE,
    MOVIE_CATEGORY, MOVIE_RATING,
};

/// Longest accepted title or series name, in characters
pub const MAX_TITLE_LENGTH: usize = 120;

/// Release of the first public film screening
pub const CINEMA_EPOCH: (i32, u32, u32) = (1895, 12, 28);

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern compiles"));

pub fn cinema_epoch() -> NaiveDate {
    let (y, m, d) = CINEMA_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// An absent id is valid; a present one must be a positive integer.
pub fn check_movie_id(id: Option<i64>) -> Outcome {
    match id {
        None => Ok(()),
        Some(id) if id >= 1 && id <= MovieId::MAX as i64 => Ok(()),
        Some(_) => Err(ConstraintViolation::Range(
            "The movie ID must be a positive integer!".to_string(),
        )),
    }
}

pub fn check_movie_id_as_primary_key(movies: &dyn MovieLookup, id: Option<i64>) -> Outcome {
    check_movie_id(id)?;
    let id = id.ok_or_else(|| {
        ConstraintViolation::MandatoryValueMissing(
            "A value for the movie ID must be provided!".to_string(),
        )
    })?;
    if movies.has_movie(id as MovieId) {
        return Err(ConstraintViolation::Uniqueness(
            "There is already a movie record with this movie ID!".to_string(),
        ));
    }
    Ok(())
}

pub fn check_title(title: Option<&str>) -> Outcome {
    check_bounded_text(title, "title", MAX_TITLE_LENGTH)
}

/// Release dates are mandatory `YYYY-MM-DD` calendar dates on or after
/// the cinema epoch.
pub fn check_release_date(date: Option<&str>) -> Outcome {
    parse_release_date(date).map(|_| ())
}

pub(crate) fn parse_release_date(date: Option<&str>) -> Result<NaiveDate, ConstraintViolation> {
    let raw = match date.map(str::trim) {
        None | Some("") => {
            return Err(ConstraintViolation::MandatoryValueMissing(
                "The movie needs a release date!".to_string(),
            ))
        }
        Some(raw) => raw,
    };
    let invalid = || {
        ConstraintViolation::Range(
            "The release date must be a real date in the form YYYY-MM-DD!".to_string(),
        )
    };
    if !ISO_DATE.is_match(raw) {
        return Err(invalid());
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())?;
    if parsed < cinema_epoch() {
        return Err(ConstraintViolation::Interval(
            "A release date must be 1895-12-28 or later!".to_string(),
        ));
    }
    Ok(parsed)
}

pub fn check_director(persons: &dyn PersonLookup, director_id: Option<i64>) -> Outcome {
    if director_id.is_none() {
        return Err(ConstraintViolation::MandatoryValueMissing(
            "A director must be chosen from the list!".to_string(),
        ));
    }
    check_person_id_as_reference(persons, PersonKind::Director, director_id)
}

/// Actors are optional per element; a given id must be an existing actor.
pub fn check_actor(persons: &dyn PersonLookup, actor_id: Option<i64>) -> Outcome {
    check_person_id_as_reference(persons, PersonKind::Actor, actor_id)
}

pub fn check_category(category: Option<i64>) -> Outcome {
    match category {
        None => Ok(()),
        Some(code) if code >= 1 && code <= MOVIE_CATEGORY.max() as i64 => Ok(()),
        Some(code) => Err(ConstraintViolation::Range(format!(
            "Invalid value for category: {}",
            code
        ))),
    }
}

/// `about` is required for a biography and forbidden for anything else.
pub fn check_about(
    persons: &dyn PersonLookup,
    about_id: Option<i64>,
    category: Option<MovieCategory>,
) -> Outcome {
    let is_biography = category == Some(MovieCategory::Biography);
    match (is_biography, about_id) {
        (true, None) => Err(ConstraintViolation::MandatoryValueMissing(
            "A person must be provided for a biography!".to_string(),
        )),
        (false, Some(_)) => Err(ConstraintViolation::Generic(
            "About should be empty if the movie is not a biography!".to_string(),
        )),
        _ => check_person_id_as_reference(persons, PersonKind::Person, about_id),
    }
}

pub fn check_tv_series_name(name: Option<&str>, category: Option<MovieCategory>) -> Outcome {
    let is_episode = category == Some(MovieCategory::TvSeriesEpisode);
    let name = name.filter(|n| !n.is_empty());
    match (is_episode, name) {
        (true, None) => Err(ConstraintViolation::MandatoryValueMissing(
            "A TV series must have a name!".to_string(),
        )),
        (false, Some(_)) => Err(ConstraintViolation::Generic(
            "A series name should be empty if the movie is not a TV series episode!".to_string(),
        )),
        (_, Some(n)) => check_bounded_text(Some(n), "series name", MAX_TITLE_LENGTH),
        (false, None) => Ok(()),
    }
}

pub fn check_episode_no(episode_no: Option<i64>, category: Option<MovieCategory>) -> Outcome {
    let is_episode = category == Some(MovieCategory::TvSeriesEpisode);
    match (is_episode, episode_no) {
        (true, None) => Err(ConstraintViolation::MandatoryValueMissing(
            "A TV series episode must have an episode number!".to_string(),
        )),
        (false, Some(_)) => Err(ConstraintViolation::Generic(
            "An episode number should be empty if the movie is not a TV series episode!"
                .to_string(),
        )),
        (_, Some(n)) if n < 1 || n > u32::MAX as i64 => Err(ConstraintViolation::Range(
            "The episode number must be a positive integer!".to_string(),
        )),
        _ => Ok(()),
    }
}

pub fn check_rating(rating: Option<i64>) -> Outcome {
    match rating {
        None => Ok(()),
        Some(code) if code >= 1 && code <= MOVIE_RATING.max() as i64 => Ok(()),
        Some(code) => Err(ConstraintViolation::Range(format!(
            "Invalid value for movie rating: {}",
            code
        ))),
    }
}

pub fn check_genre(genre: i64) -> Outcome {
    if genre < 1 || genre > GENRE.max() as i64 {
        return Err(ConstraintViolation::Range(format!(
            "Invalid value for genre: {}",
            genre
        )));
    }
    Ok(())
}

/// Genres are optional, but an explicitly supplied list may not be empty.
pub fn check_genres(genres: Option<&[i64]>) -> Outcome {
    match genres {
        None => Ok(()),
        Some([]) => Err(ConstraintViolation::MandatoryValueMissing(
            "No genre provided!".to_string(),
        )),
        Some(list) => list.iter().try_for_each(|&g| check_genre(g)),
    }
}

/// Whole-object invariants, checked whenever a movie is committed to the
/// registry. Field setters validate against the category current at call
/// time; this re-checks every category-dependent field against the final
/// category and every reference against the registries.
pub fn validate_movie(movie: &Movie, persons: &dyn PersonLookup) -> Outcome {
    let category = movie.category();
    check_director(persons, Some(movie.director() as i64))?;
    for &actor in movie.actors() {
        check_actor(persons, Some(actor as i64))?;
    }
    check_about(persons, movie.about().map(i64::from), category)?;
    check_tv_series_name(movie.tv_series_name(), category)?;
    check_episode_no(movie.episode_no().map(i64::from), category)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OutcomeExt, PersonId, ViolationKind};

    struct Fixture;

    impl PersonLookup for Fixture {
        fn has_person(&self, kind: PersonKind, id: PersonId) -> bool {
            match kind {
                PersonKind::Person => id <= 20,
                PersonKind::Director => id == 1 || id == 9,
                PersonKind::Actor => (3..=12).contains(&id),
            }
        }
    }

    struct Movies;

    impl MovieLookup for Movies {
        fn has_movie(&self, id: MovieId) -> bool {
            id == 1
        }
    }

    #[test]
    fn test_release_date_boundary() {
        assert_eq!(
            check_release_date(Some("1895-12-27")).kind(),
            ViolationKind::IntervalViolation
        );
        assert!(check_release_date(Some("1895-12-28")).is_ok());
        assert_eq!(
            check_release_date(Some("not-a-date")).kind(),
            ViolationKind::RangeViolation
        );
    }

    #[test]
    fn test_release_date_format_and_presence() {
        assert_eq!(
            check_release_date(None).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert_eq!(
            check_release_date(Some("  ")).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert!(check_release_date(Some("1977-5-25")).is_err());
        assert!(check_release_date(Some("1977-02-30")).is_err());
        assert!(check_release_date(Some("1977-05-25")).is_ok());
    }

    #[test]
    fn test_movie_id_as_primary_key() {
        assert_eq!(
            check_movie_id_as_primary_key(&Movies, None).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert_eq!(
            check_movie_id_as_primary_key(&Movies, Some(1)).kind(),
            ViolationKind::UniquenessViolation
        );
        assert_eq!(
            check_movie_id_as_primary_key(&Movies, Some(-1)).kind(),
            ViolationKind::RangeViolation
        );
        assert!(check_movie_id_as_primary_key(&Movies, Some(2)).is_ok());
    }

    #[test]
    fn test_director_is_mandatory_reference() {
        assert_eq!(
            check_director(&Fixture, None).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert_eq!(
            check_director(&Fixture, Some(2)).kind(),
            ViolationKind::ReferentialIntegrityViolation
        );
        assert!(check_director(&Fixture, Some(9)).is_ok());
    }

    #[test]
    fn test_actor_reference() {
        assert!(check_actor(&Fixture, None).is_ok());
        assert!(check_actor(&Fixture, Some(4)).is_ok());
        assert_eq!(
            check_actor(&Fixture, Some(1)).kind(),
            ViolationKind::ReferentialIntegrityViolation
        );
    }

    #[test]
    fn test_category_range() {
        assert!(check_category(None).is_ok());
        assert!(check_category(Some(2)).is_ok());
        assert_eq!(check_category(Some(3)).kind(), ViolationKind::RangeViolation);
        assert_eq!(check_category(Some(0)).kind(), ViolationKind::RangeViolation);
    }

    #[test]
    fn test_about_follows_category() {
        let bio = Some(MovieCategory::Biography);
        let tv = Some(MovieCategory::TvSeriesEpisode);
        assert!(check_about(&Fixture, Some(14), bio).is_ok());
        assert_eq!(
            check_about(&Fixture, None, bio).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert_eq!(
            check_about(&Fixture, Some(14), tv).kind(),
            ViolationKind::GenericConstraintViolation
        );
        assert_eq!(
            check_about(&Fixture, Some(14), None).kind(),
            ViolationKind::GenericConstraintViolation
        );
        assert_eq!(
            check_about(&Fixture, Some(99), bio).kind(),
            ViolationKind::ReferentialIntegrityViolation
        );
        assert!(check_about(&Fixture, None, None).is_ok());
    }

    #[test]
    fn test_series_fields_follow_category() {
        let tv = Some(MovieCategory::TvSeriesEpisode);
        assert!(check_tv_series_name(Some("The Loudest Voice"), tv).is_ok());
        assert_eq!(
            check_tv_series_name(None, tv).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert_eq!(
            check_tv_series_name(Some("Lost"), None).kind(),
            ViolationKind::GenericConstraintViolation
        );
        assert_eq!(
            check_tv_series_name(Some("   "), tv).kind(),
            ViolationKind::RangeViolation
        );
        assert!(check_tv_series_name(None, Some(MovieCategory::Biography)).is_ok());

        assert!(check_episode_no(Some(6), tv).is_ok());
        assert_eq!(
            check_episode_no(Some(0), tv).kind(),
            ViolationKind::RangeViolation
        );
        assert_eq!(
            check_episode_no(None, tv).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert_eq!(
            check_episode_no(Some(6), Some(MovieCategory::Biography)).kind(),
            ViolationKind::GenericConstraintViolation
        );
    }

    #[test]
    fn test_rating_and_genres() {
        assert!(check_rating(None).is_ok());
        assert!(check_rating(Some(5)).is_ok());
        assert!(check_rating(Some(6)).is_err());
        assert!(check_genres(None).is_ok());
        assert!(check_genres(Some(&[5, 7])).is_ok());
        assert_eq!(
            check_genres(Some(&[])).kind(),
            ViolationKind::MandatoryValueMissing
        );
        assert_eq!(
            check_genres(Some(&[1, 16])).kind(),
            ViolationKind::RangeViolation
        );
    }
}
