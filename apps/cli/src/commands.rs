//! Command dispatch.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use auth::models::RegisterForm;
use common::{ClientConfig, ClientError, ClientResult, Navigator, Route, ValidationErrors};
use movies::{DeleteOutcome, MovieBrowser, MovieForm};
use tracing::{info, warn};

use crate::app::App;
use crate::cli::{Commands, MovieCommands};
use crate::render::{self, Toast};
use crate::terminal;

/// Run one command against the view it stands for
pub async fn run(command: Commands, config: ClientConfig) -> Result<ExitCode> {
    let route = command.route();
    let app = App::new(config, &route).context("Failed to initialize the client")?;

    let shown = app.authorize(&route);
    if shown != route {
        render::redirected(&shown);
        return Ok(ExitCode::FAILURE);
    }

    let result = match command {
        Commands::Login {
            identifier,
            password,
            remember,
        } => {
            let password = password_or_prompt(password, "Password")?;
            login(&app, &identifier, &password, remember).await
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let password = password_or_prompt(password, "Password")?;
            let confirm_password = password_or_prompt(confirm_password, "Confirm password")?;
            register(
                &app,
                RegisterForm {
                    name,
                    email,
                    password,
                    confirm_password,
                },
            )
            .await
        }
        Commands::Logout => logout(&app),
        Commands::Whoami => {
            whoami(&app);
            Ok(())
        }
        Commands::Upload { file } => upload(&app, &file).await,
        Commands::Movies { command } => movies(&app, command).await,
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            render::failure(&err);
            if app.redirected_to_login(&route) {
                render::redirected(&Route::Login);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn login(app: &App, identifier: &str, password: &str, remember: bool) -> ClientResult<()> {
    let session = app.auth.login(identifier, password, remember).await?;
    render::toast(
        Toast::Success,
        &format!("Welcome back, {}", session.user.display_name()),
    );
    Ok(())
}

async fn register(app: &App, form: RegisterForm) -> ClientResult<()> {
    let response = app.auth.register(&form).await?;
    let message = response
        .message
        .unwrap_or_else(|| "Registration successful!".to_string());
    render::toast(Toast::Success, &message);
    println!(
        "Continue at {}: moviedeck login {}",
        app.navigator.current_path(),
        form.email.trim()
    );
    Ok(())
}

fn logout(app: &App) -> ClientResult<()> {
    app.auth.logout()?;
    render::toast(Toast::Success, "Logged out");
    Ok(())
}

fn whoami(app: &App) {
    match app.sessions.current_session() {
        Some(session) => {
            println!("{} <{}>", session.user.display_name(), session.user.email);
            if let Some(scope) = app.sessions.scope() {
                println!("  session: {:?}", scope);
            }
        }
        None => println!("Not logged in"),
    }
}

async fn upload(app: &App, file: &Path) -> ClientResult<()> {
    let url = app.uploads.upload_path(file).await?;
    println!("{}", url);
    render::toast(Toast::Success, "Image uploaded");
    Ok(())
}

async fn movies(app: &App, command: MovieCommands) -> ClientResult<()> {
    match command {
        MovieCommands::List {
            page,
            limit,
            search,
        } => {
            let limit = limit.unwrap_or(app.config.page_size);
            let mut browser = MovieBrowser::new(app.movies.clone(), limit).with_search(search);
            browser.open(page).await?;

            let pagination = browser.pagination();
            if pagination.is_past_end(page) {
                return Err(missing_page(page, pagination.total_pages()).into());
            }
            render::movie_list(browser.movies(), pagination);
        }
        MovieCommands::Show { id } => {
            let response = app.movies.get_one(&id).await?;
            render::movie_details(&response.movie);
        }
        MovieCommands::Create { title, year, image } => {
            let form = MovieForm {
                title,
                publish_year: year,
                image_url: None,
            };
            let movie = app.editor.create(form, Some(&image)).await?;
            render::toast(Toast::Success, "Movie created");
            render::movie_details(&movie);
        }
        MovieCommands::Edit {
            id,
            title,
            year,
            image,
        } => {
            let (_, mut form) = app.editor.open(&id).await?;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(year) = year {
                form.publish_year = year;
            }

            let movie = app.editor.update(&id, form, image.as_deref()).await?;
            render::toast(Toast::Success, "Movie updated");
            render::movie_details(&movie);
        }
        MovieCommands::Delete { id, page, yes } => {
            let mut browser = MovieBrowser::new(app.movies.clone(), app.config.page_size);
            browser.open(page).await?;

            let outcome = browser
                .delete_with_confirmation(&id, |movie| yes || confirm_delete(&movie.title))
                .await?;

            match outcome {
                DeleteOutcome::Cancelled => println!("Delete cancelled"),
                DeleteOutcome::Deleted { title, message } => {
                    info!("Deleted movie {}", id);
                    let message = message.unwrap_or_else(|| format!("Deleted \"{}\"", title));
                    render::toast(Toast::Success, &message);
                    render::movie_list(browser.movies(), browser.pagination());
                }
            }
        }
    }

    Ok(())
}

fn confirm_delete(title: &str) -> bool {
    let question = format!("Are you sure you want to delete \"{}\"?", title);
    terminal::confirm(&question).unwrap_or_else(|e| {
        warn!("Could not read the answer: {}", e);
        false
    })
}

fn missing_page(page: u32, total_pages: u32) -> ValidationErrors {
    ValidationErrors::single(
        "page",
        format!(
            "Page {} does not exist, the last page is {}",
            page,
            total_pages.max(1)
        ),
    )
}

fn password_or_prompt(value: Option<String>, label: &str) -> ClientResult<String> {
    match value {
        Some(value) => Ok(value),
        None => terminal::read_password(label).map_err(|source| ClientError::File {
            path: "<stdin>".to_string(),
            source,
        }),
    }
}
