//! Movie aggregate.
//!
//! Critical Movie Invariants:
//!
//! 1. `movie_id` is a positive integer, unique, immutable after creation
//! 2. Every movie has exactly one director, which exists in the director registry
//! 3. Every actor reference exists in the actor registry
//! 4. Release date is a real `YYYY-MM-DD` date, not before 1895-12-28
//! 5. Category is write-once
//! 6. `about` is set iff category is Biography;
//!    `tv_series_name` and `episode_no` are set iff category is TV series episode

pub mod category;
pub mod entity;
pub mod invariants;

pub use category::MovieCategory;
pub use entity::{Movie, MovieSlots};
pub use invariants::{
    check_about, check_actor, check_category, check_director, check_episode_no, check_genre,
    check_genres, check_movie_id, check_movie_id_as_primary_key, check_rating,
    check_release_date, check_title, check_tv_series_name, validate_movie,
};
