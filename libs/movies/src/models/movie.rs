//! Movie models for the movies API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::total_pages;

/// Movie record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub publish_year: i32,
    #[serde(rename = "imageURL", alias = "imageUrl")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: String,
    pub publish_year: i32,
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

/// Query parameters for movie listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieQuery {
    /// Page number (1-based)
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
    /// Search term for titles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl MovieQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());
        self
    }
}

/// Movie listing as sent by the API, after envelope unwrapping
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMoviePage {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub total: u64,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total_pages: Option<u32>,
}

/// One page of the movie listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl MoviePage {
    /// Fill what the API left out from the query that produced the page
    pub(crate) fn from_raw(raw: RawMoviePage, query: &MovieQuery) -> Self {
        let page = raw.page.unwrap_or(query.page).max(1);
        let limit = raw.limit.filter(|l| *l > 0).unwrap_or(query.limit);
        let total_pages = raw
            .total_pages
            .unwrap_or_else(|| total_pages(raw.total, limit));

        Self {
            movies: raw.movies,
            total: raw.total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Single movie response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieResponse {
    pub movie: Movie,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying only a message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
