//! Music Book - review albums from the terminal
mod commands;
mod config;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crate::commands::{HomeAction, Outcome};
use crate::config::CliConfig;
use musicbook_client::{FileCredentialStore, MusicBookClient, Rating, Session};
use musicbook_screens::App;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musicbook")]
#[command(about = "Search albums and share reviews on Music Book", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(long, global = true, env = "MUSICBOOK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Show whether a token is stored
    Status,
    /// Show the screen at a path (/login, /home, /album/<id>, /my-reviews)
    Open {
        path: String,
    },
    /// Search albums by name
    Search {
        query: String,
    },
    /// Show an album with its reviews
    Album {
        id: String,
    },
    /// Review an album
    Review {
        /// Catalog id of the album
        album_id: String,
        /// Rating from 1 to 5
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        /// Review text
        #[arg(short, long, default_value = "")]
        comment: String,
    },
    /// List your own reviews
    MyReviews,
    /// Show newly released albums
    NewReleases,
    /// List the albums of an artist
    ArtistAlbums {
        artist_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing; stdout is reserved for screens
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "musicbook=info,musicbook_client=info,musicbook_screens=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let token_path = config.token_path();
    tracing::debug!(path = ?token_path, base_url = %config.api.base_url, "Configuration loaded");

    let session = Session::load(FileCredentialStore::new(token_path))
        .await
        .context("Failed to read stored credential")?;
    let client = MusicBookClient::new(config.client_config(), Arc::new(session))?;
    let mut app = App::new(client);

    let outcome = match cli.command {
        Commands::Login { username, password } => {
            commands::login(&mut app, &username, &password).await
        }
        Commands::Logout => commands::logout(&mut app).await,
        Commands::Status => commands::status(&app).await,
        Commands::Open { path } => commands::open(&mut app, &path).await,
        Commands::Search { query } => commands::home(&mut app, HomeAction::Search(&query)).await,
        Commands::Album { id } => commands::open(&mut app, &format!("/album/{id}")).await,
        Commands::Review {
            album_id,
            rating,
            comment,
        } => {
            let rating = Rating::new(rating).context("Rating must be between 1 and 5")?;
            commands::review(&mut app, &album_id, rating, &comment).await
        }
        Commands::MyReviews => commands::open(&mut app, "/my-reviews").await,
        Commands::NewReleases => commands::home(&mut app, HomeAction::NewReleases).await,
        Commands::ArtistAlbums { artist_id } => {
            commands::home(&mut app, HomeAction::ArtistAlbums(&artist_id)).await
        }
    };

    Ok(exit_code(outcome))
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Done => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
        // Distinguishes "log in first" from a failed request
        Outcome::Redirected => ExitCode::from(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn review_rating_defaults_to_five() {
        let cli = Cli::try_parse_from(["musicbook", "review", "abc"]).unwrap();
        match cli.command {
            Commands::Review {
                album_id,
                rating,
                comment,
            } => {
                assert_eq!(album_id, "abc");
                assert_eq!(rating, 5);
                assert!(comment.is_empty());
            }
            _ => panic!("Expected review command"),
        }
    }

    #[test]
    fn review_rating_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["musicbook", "review", "abc", "--rating", "6"]).is_err());
        assert!(Cli::try_parse_from(["musicbook", "review", "abc", "-r", "0"]).is_err());
    }

    #[test]
    fn login_takes_short_flags() {
        let cli = Cli::try_parse_from(["musicbook", "login", "-u", "alice", "-p", "secret"]).unwrap();
        assert!(matches!(cli.command, Commands::Login { .. }));
    }
}
