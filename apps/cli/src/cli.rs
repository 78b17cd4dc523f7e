//! Command line definition.

use std::path::PathBuf;

use clap::Parser;
use common::Route;

#[derive(Parser)]
#[command(name = "moviedeck")]
#[command(version)]
#[command(about = "Manage your movie library from the terminal")]
pub struct Cli {
    /// API base URL (overrides MOVIEDECK_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Log in with an email address or a user name
    Login {
        /// Email address or user name
        identifier: String,

        /// Password (prompted for when omitted)
        #[arg(long, env = "MOVIEDECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Keep the session after the OS session ends
        #[arg(long)]
        remember: bool,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Password confirmation (prompted for when omitted)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage your movies
    Movies {
        #[command(subcommand)]
        command: MovieCommands,
    },

    /// Upload an image and print its URL
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(clap::Subcommand)]
pub enum MovieCommands {
    /// List one page of movies
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Movies per page (default: MOVIEDECK_PAGE_SIZE)
        #[arg(long)]
        limit: Option<u32>,

        /// Only titles matching this term
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one movie
    Show { id: String },

    /// Add a movie
    Create {
        #[arg(long)]
        title: String,

        /// Publishing year
        #[arg(long)]
        year: String,

        /// Poster image
        #[arg(long, value_name = "FILE")]
        image: PathBuf,
    },

    /// Edit a movie; omitted fields keep their value
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Publishing year
        #[arg(long)]
        year: Option<String>,

        /// New poster image
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// Delete a movie after confirmation and show the refreshed page
    Delete {
        id: String,

        /// Page the movie is listed on
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Commands {
    /// View the command stands for
    pub fn route(&self) -> Route {
        match self {
            Commands::Login { .. } => Route::Login,
            Commands::Register { .. } => Route::Register,
            Commands::Logout | Commands::Whoami => Route::Root,
            Commands::Upload { .. } => Route::CreateMovie,
            Commands::Movies { command } => match command {
                MovieCommands::List { .. } | MovieCommands::Delete { .. } => Route::Movies,
                MovieCommands::Show { id } | MovieCommands::Edit { id, .. } => {
                    Route::EditMovie(id.clone())
                }
                MovieCommands::Create { .. } => Route::CreateMovie,
            },
        }
    }
}
