// src/services/movie_service_tests.rs
//
// Scenario tests for movie operations and inverse-reference bookkeeping
//
// INVARIANTS TESTED:
// - directed_movies / played_movies always mirror the movies' references
// - A rejected update changes nothing, including inverse sets
// - The category is write-once

#[cfg(test)]
mod movie_scenarios {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::domain::{ConstraintViolation, MovieCategory, MovieId, MovieSlots, PersonId};
    use crate::error::AppError;
    use crate::events::MovieUpdated;
    use crate::services::movie_service::apply_movie_update;
    use crate::services::test_support::{empty_catalog, movie, sample_catalog, slots};
    use crate::services::{Catalog, UpdateMovieRequest, UpdateReport};

    fn directed(catalog: &Catalog, director: PersonId) -> Vec<MovieId> {
        catalog
            .person(director)
            .and_then(|p| p.directed_movies())
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn played(catalog: &Catalog, actor: PersonId) -> Vec<MovieId> {
        catalog
            .person(actor)
            .and_then(|p| p.played_movies())
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn lucas_and_crowe() -> Catalog {
        let mut catalog = empty_catalog();
        catalog.add_director(slots(1, "Lucas")).unwrap();
        catalog.add_director(slots(9, "Russell Crowe")).unwrap();
        catalog.add_actor(slots(6, "Ewan McGregor")).unwrap();
        catalog.add_actor(slots(7, "Natalie Portman")).unwrap();
        catalog.add_person(slots(14, "John Forbes Nash")).unwrap();
        catalog
    }

    #[test]
    fn test_director_reassignment_moves_inverse_reference() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[])).unwrap();
        assert_eq!(directed(&catalog, 1), vec![2]);

        catalog.set_movie_director(2, 9).unwrap();
        assert!(directed(&catalog, 1).is_empty());
        assert_eq!(directed(&catalog, 9), vec![2]);
        assert_eq!(catalog.movie(2).unwrap().director(), 9);
    }

    #[test]
    fn test_add_movie_links_cast() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[6, 7])).unwrap();
        assert_eq!(played(&catalog, 6), vec![2]);
        assert_eq!(played(&catalog, 7), vec![2]);
    }

    #[test]
    fn test_rejected_movie_is_not_linked() {
        let mut catalog = lucas_and_crowe();
        // 14 is not an actor
        let err = catalog.add_movie(movie(2, "Star Wars", 1, &[6, 14])).unwrap_err();
        assert!(matches!(
            err.violation(),
            Some(ConstraintViolation::ReferentialIntegrity(_))
        ));
        assert!(catalog.movies().is_empty());
        assert!(played(&catalog, 6).is_empty());
        assert!(directed(&catalog, 1).is_empty());

        catalog.add_movie(movie(2, "Star Wars", 1, &[])).unwrap();
        let err = catalog.add_movie(movie(2, "Star Wars II", 1, &[])).unwrap_err();
        assert!(matches!(
            err.violation(),
            Some(ConstraintViolation::Uniqueness(_))
        ));
        assert_eq!(catalog.movie(2).unwrap().title(), "Star Wars");
    }

    #[test]
    fn test_remove_actor_twice() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[6, 7])).unwrap();

        assert!(catalog.remove_movie_actor(2, 6).unwrap());
        assert!(played(&catalog, 6).is_empty());

        assert!(!catalog.remove_movie_actor(2, 6).unwrap());
        assert!(played(&catalog, 6).is_empty());

        // an id that is not an actor at all fails
        assert!(catalog.remove_movie_actor(2, 14).is_err());
        assert!(catalog.remove_movie_actor(2, -1).is_err());
    }

    #[test]
    fn test_cast_replacement_relinks() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[6])).unwrap();

        catalog.set_movie_actors(2, &[7]).unwrap();
        assert!(played(&catalog, 6).is_empty());
        assert_eq!(played(&catalog, 7), vec![2]);

        // invalid replacement leaves the cast alone
        assert!(catalog.set_movie_actors(2, &[6, 99]).is_err());
        assert_eq!(played(&catalog, 7), vec![2]);
        assert!(played(&catalog, 6).is_empty());

        catalog.add_movie_actor(2, 6).unwrap();
        assert_eq!(played(&catalog, 6), vec![2]);
    }

    #[test]
    fn test_unchanged_cast_emits_no_update() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[6, 7])).unwrap();

        let updates = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&updates);
        catalog
            .event_bus()
            .subscribe::<MovieUpdated, _>(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        // already in the cast
        catalog.add_movie_actor(2, 6).unwrap();
        catalog.set_movie_actors(2, &[7, 6]).unwrap();
        assert_eq!(updates.load(Ordering::SeqCst), 0);

        catalog.set_movie_actors(2, &[6]).unwrap();
        catalog.add_movie_actor(2, 7).unwrap();
        assert_eq!(updates.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_update_names_the_property() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[6])).unwrap();

        let mut staged = catalog.movie(2).unwrap().clone();
        let mut report = UpdateReport::default();
        let request = UpdateMovieRequest {
            movie_id: 2,
            title: Some("Star Wars: A New Hope".to_string()),
            release_date: Some("1895-12-27".to_string()),
            ..Default::default()
        };

        let failure =
            apply_movie_update(&mut staged, catalog.persons(), &request, &mut report).unwrap_err();
        assert_eq!(failure.property, "releaseDate");
        assert!(matches!(failure.violation, ConstraintViolation::Interval(_)));
        assert!(failure.describe("movie 2").starts_with("Changing property releaseDate of movie 2"));
        assert_eq!(report.updated_properties, vec!["title"]);
    }

    #[test]
    fn test_destroy_movie_cleans_inverse_references() {
        let mut catalog = sample_catalog();
        assert_eq!(directed(&catalog, 1), vec![3, 4]);
        assert_eq!(played(&catalog, 4), vec![1, 3]);

        assert!(catalog.destroy_movie(3).unwrap());
        assert!(catalog.movie(3).is_none());
        assert_eq!(directed(&catalog, 1), vec![4]);
        assert_eq!(played(&catalog, 4), vec![1]);
        assert!(played(&catalog, 8).is_empty());

        assert!(!catalog.destroy_movie(3).unwrap());
    }

    #[test]
    fn test_category_is_frozen() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(5, "A Beautiful Mind", 9, &[])).unwrap();

        catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 5,
                category: Some(Some(i64::from(MovieCategory::Biography.code()))),
                about_id: Some(14),
                ..Default::default()
            })
            .unwrap();

        let err = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 5,
                category: Some(Some(i64::from(MovieCategory::TvSeriesEpisode.code()))),
                tv_series_name: Some("Numb3rs".to_string()),
                episode_no: Some(1),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err.violation(),
            Some(ConstraintViolation::FrozenValue(_))
        ));

        let err = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 5,
                category: Some(None),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err.violation(),
            Some(ConstraintViolation::FrozenValue(_))
        ));

        let stored = catalog.movie(5).unwrap();
        assert_eq!(stored.category(), Some(MovieCategory::Biography));
        assert_eq!(stored.about(), Some(14));
        assert_eq!(stored.tv_series_name(), None);
    }

    #[test]
    fn test_biography_needs_about_at_commit() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(5, "A Beautiful Mind", 9, &[])).unwrap();

        let err = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 5,
                category: Some(Some(i64::from(MovieCategory::Biography.code()))),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err.violation(),
            Some(ConstraintViolation::MandatoryValueMissing(_))
        ));
        assert_eq!(catalog.movie(5).unwrap().category(), None);

        let slots = MovieSlots {
            category: Some(i64::from(MovieCategory::Biography.code())),
            ..movie(8, "The Insider", 9, &[])
        };
        assert!(catalog.add_movie(slots).is_err());
    }

    #[test]
    fn test_about_rejected_for_other_categories() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[])).unwrap();

        let err = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 2,
                about_id: Some(14),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err.violation(), Some(ConstraintViolation::Generic(_))));
        assert_eq!(catalog.movie(2).unwrap().about(), None);
    }

    #[test]
    fn test_failed_update_changes_nothing() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[6])).unwrap();
        let before = catalog.movie(2).unwrap().clone();

        // every change is valid except the release date
        let err = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 2,
                title: Some("Star Wars: A New Hope".to_string()),
                director_id: Some(9),
                actor_ids_to_add: vec![7],
                actor_ids_to_remove: vec![6],
                release_date: Some("1895-12-27".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err.violation(), Some(ConstraintViolation::Interval(_))));

        assert_eq!(catalog.movie(2).unwrap(), &before);
        assert_eq!(directed(&catalog, 1), vec![2]);
        assert!(directed(&catalog, 9).is_empty());
        assert_eq!(played(&catalog, 6), vec![2]);
        assert!(played(&catalog, 7).is_empty());
    }

    #[test]
    fn test_update_reports_and_relinks() {
        let mut catalog = lucas_and_crowe();
        catalog.add_movie(movie(2, "Star Wars", 1, &[6])).unwrap();

        let report = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 2,
                title: Some("Star Wars: A New Hope".to_string()),
                director_id: Some(9),
                actor_ids_to_add: vec![7],
                rating: Some(Some(2)),
                genres: Some(Some(vec![1, 14])),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            report.updated_properties,
            vec!["title", "actors", "director", "rating", "genres"]
        );
        assert_eq!(directed(&catalog, 9), vec![2]);
        assert_eq!(played(&catalog, 7), vec![2]);

        let stored = catalog.movie(2).unwrap();
        assert_eq!(stored.rating(), Some(2));
        assert_eq!(stored.genres(), &[1, 14]);

        let report = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 2,
                title: Some("Star Wars: A New Hope".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_update_unknown_movie() {
        let mut catalog = empty_catalog();
        let err = catalog
            .update_movie(UpdateMovieRequest {
                movie_id: 42,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(catalog.set_movie_director(42, 1).is_err());
    }

    #[test]
    fn test_sample_data_display() {
        let catalog = sample_catalog();
        assert_eq!(catalog.movies().len(), 6);
        assert_eq!(
            catalog.movie(4).unwrap().to_string(),
            "Movie{ movie ID: 4, title: 2015, release date: 2019-06-30, director: 1, \
             actors: [9, 10, 11], series episode from The Loudest Voice episode 6 }"
        );
        assert_eq!(
            catalog.movie(5).unwrap().to_string(),
            "Movie{ movie ID: 5, title: A Beautiful Mind, release date: 2001-12-21, \
             director: 9, actors: [9, 12], biography about: 14 }"
        );
    }
}
