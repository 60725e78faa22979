use serde::{Deserialize, Serialize};

use crate::domain::MOVIE_CATEGORY;

/// Closed classification of a movie. Codes follow `MOVIE_CATEGORY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MovieCategory {
    Biography = 1,
    TvSeriesEpisode = 2,
}

impl MovieCategory {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(MovieCategory::Biography),
            2 => Some(MovieCategory::TvSeriesEpisode),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        MOVIE_CATEGORY.label(self.code()).unwrap_or("Unknown")
    }
}

impl TryFrom<u32> for MovieCategory {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("Invalid value for category: {}", code))
    }
}

impl From<MovieCategory> for u32 {
    fn from(category: MovieCategory) -> Self {
        category.code()
    }
}

impl std::fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
