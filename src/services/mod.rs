// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// All operations live on `Catalog`, split by concern across files.

pub mod bootstrap;
pub mod catalog;
pub mod movie_service;
pub mod persistence;
pub mod person_service;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod movie_service_tests;

pub use catalog::{Catalog, UpdateReport};
pub use movie_service::UpdateMovieRequest;
pub use persistence::LoadReport;
pub use person_service::UpdatePersonRequest;
