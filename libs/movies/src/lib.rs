//! Movie library client
//!
//! Typed CRUD calls against `/movies`, validation of the movie form,
//! page-number pagination, and the list and form flows built on them.

pub mod browser;
pub mod client;
pub mod editor;
pub mod models;
pub mod pagination;
pub mod validation;

pub use browser::{DeleteOutcome, MovieBrowser};
pub use client::MovieClient;
pub use editor::MovieEditor;
pub use models::{Movie, MovieInput, MoviePage, MovieQuery, MovieResponse};
pub use pagination::{PageControl, Pagination};
pub use validation::MovieForm;
