//! Terminal rendering of views, inline errors and toasts.
//!
//! Views and inline messages go to stdout, toasts to stderr.

use common::{ClientError, Route};
use movies::{Movie, PageControl, Pagination};

/// Kind of toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    Success,
    Error,
}

pub fn toast(kind: Toast, message: &str) {
    eprintln!("{}", toast_line(kind, message));
}

fn toast_line(kind: Toast, message: &str) -> String {
    match kind {
        Toast::Success => format!("[ok] {}", message),
        Toast::Error => format!("[error] {}", message),
    }
}

/// Inline message shown under the form, one line per field error
pub fn inline_error(err: &ClientError) -> Vec<String> {
    match err.validation() {
        Some(errors) => errors
            .iter()
            .map(|e| format!("  {}: {}", e.field, e.message))
            .collect(),
        None => vec![format!("  {}", err.user_message())],
    }
}

/// Report a failed operation inline and as a toast
pub fn failure(err: &ClientError) {
    if matches!(err, ClientError::SessionExpired) {
        toast(Toast::Error, &err.user_message());
        return;
    }

    for line in inline_error(err) {
        println!("{}", line);
    }
    toast(Toast::Error, &err.user_message());
}

pub fn redirected(route: &Route) {
    println!("{}", redirect_line(route));
}

fn redirect_line(route: &Route) -> String {
    match route {
        Route::Login => format!("Redirected to {}. Run `moviedeck login` first.", route),
        Route::Movies => format!(
            "Already logged in, redirected to {}. Run `moviedeck logout` first.",
            route
        ),
        other => format!("Redirected to {}.", other),
    }
}

pub fn movie_details(movie: &Movie) {
    println!("{}", movie.title);
    println!("  id:        {}", movie.id);
    println!("  year:      {}", movie.publish_year);
    println!("  image:     {}", movie.image_url);
    println!("  updated:   {}", movie.updated_at.format("%Y-%m-%d %H:%M"));
}

pub fn movie_list(movies: &[Movie], pagination: &Pagination) {
    if movies.is_empty() {
        println!("Your movie list is empty");
        return;
    }

    for line in movie_rows(movies) {
        println!("{}", line);
    }
    println!();
    println!("{}", page_controls(&pagination.controls()));
    println!(
        "Page {} of {} ({} movies)",
        pagination.page,
        pagination.total_pages(),
        pagination.total
    );
}

fn movie_rows(movies: &[Movie]) -> Vec<String> {
    let width = movies.iter().map(|m| m.id.len()).max().unwrap_or(0);
    movies
        .iter()
        .map(|m| format!("{:<width$}  {}  {}", m.id, m.publish_year, m.title, width = width))
        .collect()
}

fn page_controls(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|control| match control {
            PageControl::Previous { disabled: true, .. } => " Prev ".to_string(),
            PageControl::Previous { .. } => "[Prev]".to_string(),
            PageControl::Page {
                number,
                current: true,
            } => format!("({})", number),
            PageControl::Page { number, .. } => format!("[{}]", number),
            PageControl::Next { disabled: true, .. } => " Next ".to_string(),
            PageControl::Next { .. } => "[Next]".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
