//! Common library for the moviedeck client
//!
//! This crate provides the plumbing shared by every client crate: the HTTP
//! wrapper with its envelope normalization and unauthorized policy, the
//! error taxonomy, persisted key/value storage, view routes and
//! configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use common::{ClientConfig, HttpClient, MemoryNavigator, Route, TokenProvider};
//!
//! struct Anonymous;
//!
//! impl TokenProvider for Anonymous {
//!     fn access_token(&self) -> Option<String> {
//!         None
//!     }
//!
//!     fn clear_tokens(&self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let navigator = Arc::new(MemoryNavigator::new(&Route::Movies));
//!     let client = HttpClient::new(&config, Arc::new(Anonymous), navigator)?;
//!     let body: serde_json::Value = client.get_with_query("/movies", &[("page", 1)], &["movies"]).await?;
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod navigation;
pub mod storage;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ValidationErrors};
pub use http::{HttpClient, TokenProvider};
pub use navigation::{MemoryNavigator, Navigator, Route};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
