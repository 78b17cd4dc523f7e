//! State of the paginated movie list view

use common::ClientResult;
use tracing::{debug, info};

use crate::{
    client::MovieClient,
    models::{Movie, MovieQuery},
    pagination::{PageControl, Pagination},
};

/// Result of a confirmed delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted {
        title: String,
        message: Option<String>,
    },
    Cancelled,
}

/// Movie list view: current page, search term and the movies on screen
pub struct MovieBrowser {
    client: MovieClient,
    pagination: Pagination,
    search: Option<String>,
    movies: Vec<Movie>,
}

impl MovieBrowser {
    pub fn new(client: MovieClient, limit: u32) -> Self {
        Self {
            client,
            pagination: Pagination::new(limit),
            search: None,
            movies: Vec::new(),
        }
    }

    /// Start with a search term applied
    pub fn with_search(mut self, term: Option<String>) -> Self {
        self.search = MovieQuery::new(1, self.pagination.limit)
            .with_search(term)
            .search;
        self
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn controls(&self) -> Vec<PageControl> {
        self.pagination.controls()
    }

    /// Fetch the current page
    pub async fn load(&mut self) -> ClientResult<()> {
        self.fetch(self.pagination.page).await
    }

    /// Fetch a given page, with no bounds check against the last known total
    ///
    /// Used for the first load, when the total is not known yet.
    pub async fn open(&mut self, page: u32) -> ClientResult<()> {
        self.fetch(page.max(1)).await
    }

    /// Move to `page`
    ///
    /// Pages outside `[1, total_pages]` and the current page are ignored;
    /// no request is sent and `false` is returned.
    pub async fn go_to_page(&mut self, page: u32) -> ClientResult<bool> {
        if page == self.pagination.page || !self.pagination.contains(page) {
            debug!("Ignoring move to page {}", page);
            return Ok(false);
        }

        self.fetch(page).await?;
        Ok(true)
    }

    pub async fn next(&mut self) -> ClientResult<bool> {
        self.go_to_page(self.pagination.page.saturating_add(1)).await
    }

    pub async fn previous(&mut self) -> ClientResult<bool> {
        self.go_to_page(self.pagination.page.saturating_sub(1)).await
    }

    /// Apply a search term and go back to the first page
    pub async fn search(&mut self, term: Option<String>) -> ClientResult<()> {
        self.search = MovieQuery::new(1, self.pagination.limit)
            .with_search(term)
            .search;
        self.fetch(1).await
    }

    /// Ask `confirm` about the movie, then delete it if accepted
    ///
    /// The movie is looked up on the current page first and fetched
    /// otherwise. Nothing is deleted when `confirm` declines.
    pub async fn delete_with_confirmation<F>(
        &mut self,
        id: &str,
        confirm: F,
    ) -> ClientResult<DeleteOutcome>
    where
        F: FnOnce(&Movie) -> bool,
    {
        let movie = match self.movies.iter().find(|movie| movie.id == id) {
            Some(movie) => movie.clone(),
            None => self.client.get_one(id).await?.movie,
        };

        if !confirm(&movie) {
            info!("Delete of movie {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        let message = self.delete(id).await?;
        Ok(DeleteOutcome::Deleted {
            title: movie.title,
            message,
        })
    }

    /// Delete a movie and refetch the current page
    ///
    /// Steps back one page when the current page ends up empty.
    pub async fn delete(&mut self, id: &str) -> ClientResult<Option<String>> {
        let message = self.client.delete(id).await?;

        self.fetch(self.pagination.page).await?;
        if self.movies.is_empty() && self.pagination.page > 1 {
            info!("Page {} is now empty, stepping back", self.pagination.page);
            self.fetch(self.pagination.page - 1).await?;
        }

        Ok(message)
    }

    async fn fetch(&mut self, page: u32) -> ClientResult<()> {
        let query = MovieQuery::new(page, self.pagination.limit).with_search(self.search.clone());
        let result = self.client.list(&query).await?;

        self.pagination = Pagination {
            page: result.page,
            limit: result.limit,
            total: result.total,
        };
        self.movies = result.movies;
        Ok(())
    }
}
