//! Input validation for the movie form

use chrono::{Datelike, Utc};
use common::ValidationErrors;

use crate::models::{Movie, MovieInput};

/// Year of the first motion picture
pub const FIRST_MOVIE_YEAR: i32 = 1888;

/// Maximum title length, in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Current calendar year (UTC)
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Validate movie title
pub fn validate_title(title: &str) -> Result<(), String> {
    let title = title.trim();

    if title.is_empty() {
        return Err("Title is required".to_string());
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title must be at most {} characters long",
            MAX_TITLE_LENGTH
        ));
    }

    Ok(())
}

/// Parse the publishing year as typed into the form
pub fn parse_publish_year(input: &str) -> Result<i32, String> {
    let input = input.trim();

    if input.is_empty() {
        return Err("Publishing year is required".to_string());
    }

    input
        .parse::<i32>()
        .map_err(|_| "Publishing year must be a whole number".to_string())
}

/// Validate publishing year against `[1888, current_year + 1]`
pub fn validate_publish_year(year: i32, current_year: i32) -> Result<(), String> {
    let latest = current_year + 1;

    if year < FIRST_MOVIE_YEAR || year > latest {
        return Err(format!(
            "Publishing year must be between {} and {}",
            FIRST_MOVIE_YEAR, latest
        ));
    }

    Ok(())
}

/// Validate image URL
pub fn validate_image_url(image_url: Option<&str>) -> Result<(), String> {
    match image_url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(()),
        _ => Err("Please upload an image".to_string()),
    }
}

/// Movie form state, as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub publish_year: String,
    pub image_url: Option<String>,
}

impl MovieForm {
    /// Form pre-filled from an existing movie
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            publish_year: movie.publish_year.to_string(),
            image_url: Some(movie.image_url.clone()),
        }
    }

    /// Validate against the current year
    pub fn validate(&self) -> Result<MovieInput, ValidationErrors> {
        self.validate_at(current_year())
    }

    /// Validate title and year only, before an image has been uploaded
    pub fn validate_details(&self) -> Result<(), ValidationErrors> {
        self.details_errors(current_year()).into_result()
    }

    /// Validate every field, collecting all errors
    pub fn validate_at(&self, current_year: i32) -> Result<MovieInput, ValidationErrors> {
        let mut errors = self.details_errors(current_year);
        errors.check("imageURL", validate_image_url(self.image_url.as_deref()));
        errors.into_result()?;

        match (parse_publish_year(&self.publish_year), &self.image_url) {
            (Ok(publish_year), Some(image_url)) => Ok(MovieInput {
                title: self.title.trim().to_string(),
                publish_year,
                image_url: image_url.trim().to_string(),
            }),
            _ => Err(ValidationErrors::single("imageURL", "Please upload an image")),
        }
    }

    fn details_errors(&self, current_year: i32) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        errors.check("title", validate_title(&self.title));
        match parse_publish_year(&self.publish_year) {
            Ok(year) => errors.check("publishYear", validate_publish_year(year, current_year)),
            Err(message) => errors.add("publishYear", message),
        }

        errors
    }
}

/// Validate an already-typed movie payload
pub fn validate_movie_input(input: &MovieInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("title", validate_title(&input.title));
    errors.check(
        "publishYear",
        validate_publish_year(input.publish_year, current_year()),
    );
    errors.check("imageURL", validate_image_url(Some(&input.image_url)));
    errors.into_result()
}
