//! Create and edit flows of the movie form

use std::path::Path;

use common::ClientResult;
use tracing::info;
use upload::UploadClient;

use crate::{client::MovieClient, models::Movie, validation::MovieForm};

/// Movie form submission: optional image upload, then create or update
#[derive(Clone)]
pub struct MovieEditor {
    movies: MovieClient,
    uploads: UploadClient,
}

impl MovieEditor {
    pub fn new(movies: MovieClient, uploads: UploadClient) -> Self {
        Self { movies, uploads }
    }

    /// Load a movie into an edit form
    pub async fn open(&self, id: &str) -> ClientResult<(Movie, MovieForm)> {
        let response = self.movies.get_one(id).await?;
        let form = MovieForm::from_movie(&response.movie);
        Ok((response.movie, form))
    }

    /// Submit the create form
    pub async fn create(&self, form: MovieForm, image: Option<&Path>) -> ClientResult<Movie> {
        let form = self.attach_image(form, image).await?;
        let input = form.validate()?;
        self.movies.create(&input).await
    }

    /// Submit the edit form
    ///
    /// Without a new image the form keeps the URL it was opened with.
    pub async fn update(&self, id: &str, form: MovieForm, image: Option<&Path>) -> ClientResult<Movie> {
        let form = self.attach_image(form, image).await?;
        let input = form.validate()?;
        self.movies.update(id, &input).await
    }

    async fn attach_image(&self, mut form: MovieForm, image: Option<&Path>) -> ClientResult<MovieForm> {
        if let Some(path) = image {
            form.validate_details()?;
            let url = self.uploads.upload_path(path).await?;
            info!("Attached image {}", url);
            form.image_url = Some(url);
        }
        Ok(form)
    }
}
