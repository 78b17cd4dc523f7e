//! Movie client for the movies API

use common::{ClientResult, HttpClient, ValidationErrors};
use tracing::{error, info};

use crate::{
    models::{
        MessageResponse, Movie, MovieInput, MoviePage, MovieQuery, MovieResponse,
        movie::RawMoviePage,
    },
    validation::validate_movie_input,
};

/// Movie client for CRUD operations
#[derive(Clone)]
pub struct MovieClient {
    http: HttpClient,
}

impl MovieClient {
    /// Create a new movie client
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Create a movie
    ///
    /// The payload is validated first; an invalid one never reaches the API.
    pub async fn create(&self, input: &MovieInput) -> ClientResult<Movie> {
        validate_movie_input(input)?;
        info!("Creating movie: {}", input.title);

        let response: MovieResponse = self
            .http
            .post("/movies", input, &["movie"])
            .await
            .inspect_err(|e| error!("Failed to create movie: {}", e))?;

        info!("Created movie {}", response.movie.id);
        Ok(response.movie)
    }

    /// Get one page of movies
    pub async fn list(&self, query: &MovieQuery) -> ClientResult<MoviePage> {
        info!(
            "Listing movies: page={}, limit={}, search={:?}",
            query.page, query.limit, query.search
        );

        let raw: RawMoviePage = self
            .http
            .get_with_query("/movies", query, &["movies"])
            .await
            .inspect_err(|e| error!("Failed to list movies: {}", e))?;

        Ok(MoviePage::from_raw(raw, query))
    }

    /// Get a movie by ID
    pub async fn get_one(&self, id: &str) -> ClientResult<MovieResponse> {
        let path = movie_path(id)?;
        info!("Fetching movie {}", id);

        self.http
            .get(&path, &["movie"])
            .await
            .inspect_err(|e| error!("Failed to fetch movie {}: {}", id, e))
    }

    /// Update a movie
    pub async fn update(&self, id: &str, input: &MovieInput) -> ClientResult<Movie> {
        let path = movie_path(id)?;
        validate_movie_input(input)?;
        info!("Updating movie {}", id);

        let response: MovieResponse = self
            .http
            .patch(&path, input, &["movie"])
            .await
            .inspect_err(|e| error!("Failed to update movie {}: {}", id, e))?;

        Ok(response.movie)
    }

    /// Delete a movie, returning the server message if any
    pub async fn delete(&self, id: &str) -> ClientResult<Option<String>> {
        let path = movie_path(id)?;
        info!("Deleting movie {}", id);

        let response: MessageResponse = self
            .http
            .delete(&path, &["message", "movie"])
            .await
            .inspect_err(|e| error!("Failed to delete movie {}: {}", id, e))?;

        Ok(response.message)
    }
}

fn movie_path(id: &str) -> Result<String, ValidationErrors> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') {
        return Err(ValidationErrors::single("id", "Invalid movie id"));
    }
    Ok(format!("/movies/{}", id))
}
