//! Movie models

pub mod movie;

// Re-export for convenience
pub use movie::{MessageResponse, Movie, MovieInput, MoviePage, MovieQuery, MovieResponse};
