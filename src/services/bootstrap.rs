// src/services/bootstrap.rs
//
// Sample data and reset of the stored catalog

use crate::domain::{MovieCategory, MovieSlots, PersonSlots};
use crate::error::AppResult;
use crate::repositories::CollectionStorageExt;
use crate::services::catalog::Catalog;

const DIRECTORS: &[(i64, &str)] = &[
    (1, "Stephen Frears"),
    (2, "George Lucas"),
    (3, "Quentin Tarantino"),
    (9, "Russell Crowe"),
    (13, "Marc Forster"),
];

const PERSONS: &[(i64, &str)] = &[
    (14, "John Forbes Nash"),
    (15, "John Doe"),
    (16, "Jane Doe"),
];

const ACTORS: &[(i64, &str, Option<i64>)] = &[
    (3, "Quentin Tarantino", None),
    (4, "Uma Thurman", Some(15)),
    (5, "John Travolta", None),
    (6, "Ewan McGregor", None),
    (7, "Natalie Portman", None),
    (8, "Keanu Reeves", Some(16)),
    (9, "Russell Crowe", Some(16)),
    (10, "Seth MacFarlane", None),
    (11, "Naomi Watts", None),
    (12, "Ed Harris", Some(15)),
];

fn sample_movie(id: i64, title: &str, release_date: &str, director: i64, actors: &[i64]) -> MovieSlots {
    MovieSlots {
        movie_id: Some(id),
        title: Some(title.to_string()),
        release_date: Some(release_date.to_string()),
        director_id: Some(director),
        actor_ids: actors.to_vec(),
        ..Default::default()
    }
}

fn sample_movies() -> Vec<MovieSlots> {
    vec![
        sample_movie(1, "Pulp Fiction", "1994-05-12", 3, &[3, 4, 5]),
        sample_movie(2, "Star Wars", "1999-08-19", 2, &[6, 7]),
        sample_movie(3, "Dangerous Liaisons", "1988-12-16", 1, &[8, 4]),
        MovieSlots {
            category: Some(i64::from(MovieCategory::TvSeriesEpisode.code())),
            tv_series_name: Some("The Loudest Voice".to_string()),
            episode_no: Some(6),
            ..sample_movie(4, "2015", "2019-06-30", 1, &[9, 10, 11])
        },
        MovieSlots {
            category: Some(i64::from(MovieCategory::Biography.code())),
            about_id: Some(14),
            ..sample_movie(5, "A Beautiful Mind", "2001-12-21", 9, &[9, 12])
        },
        sample_movie(6, "Stay", "2005-09-24", 13, &[6, 11]),
    ]
}

impl Catalog {
    /// Replace the catalog with the sample data set and save it
    pub fn create_test_data(&mut self) -> AppResult<()> {
        self.reset();

        for &(person_id, name) in DIRECTORS {
            self.add_director(PersonSlots {
                person_id: Some(person_id),
                name: Some(name.to_string()),
                agent_id: None,
            })?;
        }
        for &(person_id, name) in PERSONS {
            self.add_person(PersonSlots {
                person_id: Some(person_id),
                name: Some(name.to_string()),
                agent_id: None,
            })?;
        }
        for &(person_id, name, agent_id) in ACTORS {
            self.add_actor(PersonSlots {
                person_id: Some(person_id),
                name: Some(name.to_string()),
                agent_id,
            })?;
        }
        for slots in sample_movies() {
            self.add_movie(slots)?;
        }

        self.save_all()
    }

    /// Forget all data, in memory and in storage
    pub fn clear_data(&mut self) -> AppResult<()> {
        self.reset();
        for name in self.collections.all() {
            self.storage.clear_collection(name)?;
        }
        log::info!("All data cleared.");
        Ok(())
    }
}
