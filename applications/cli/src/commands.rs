//! Command handlers. Each one drives the [`App`] the way a user would and
//! reports whether the requested screen ended up on display.

use crate::render;
use musicbook_client::Rating;
use musicbook_screens::{App, GuardDecision, ScreenError};
use tracing::{debug, warn};

/// What a command left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked
    Done,
    /// The guard sent us to the login screen instead
    Redirected,
    /// The screen is showing its error state
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Done)
    }
}

/// Log in and show the landing screen.
pub async fn login(app: &mut App, username: &str, password: &str) -> Outcome {
    let outcome = settle(app.login(username, password).await);
    println!("{}", render::app(app));
    outcome
}

/// Forget the stored credential. Always succeeds.
pub async fn logout(app: &mut App) -> Outcome {
    app.logout().await;
    println!("Logged out.");
    Outcome::Done
}

/// Report whether a credential is stored and where requests go.
pub async fn status(app: &App) -> Outcome {
    let client = app.client();
    let state = if client.session().is_authenticated().await {
        "logged in"
    } else {
        "logged out"
    };
    println!("API: {}", client.base_url());
    println!("Session: {state}");
    Outcome::Done
}

/// Show the screen at `path`.
pub async fn open(app: &mut App, path: &str) -> Outcome {
    let outcome = visit(app, path).await;
    println!("{}", render::app(app));
    outcome
}

/// What to fill the home screen's result list with.
#[derive(Debug, Clone, Copy)]
pub enum HomeAction<'a> {
    Search(&'a str),
    NewReleases,
    ArtistAlbums(&'a str),
}

/// Go home, fill the result list and render it.
pub async fn home(app: &mut App, action: HomeAction<'_>) -> Outcome {
    let mut outcome = visit(app, "/home").await;
    if outcome.is_success() {
        let result = match action {
            HomeAction::Search(query) => app.search(query).await,
            HomeAction::NewReleases => app.new_releases().await,
            HomeAction::ArtistAlbums(artist_id) => app.artist_albums(artist_id).await,
        };
        outcome = settle(result);
    }
    println!("{}", render::app(app));
    outcome
}

/// Open an album and post a review for it.
pub async fn review(app: &mut App, album_id: &str, rating: Rating, comment: &str) -> Outcome {
    let mut outcome = visit(app, &format!("/album/{album_id}")).await;
    if outcome.is_success() {
        outcome = settle(app.submit_review(rating, comment).await);
    }
    println!("{}", render::app(app));
    outcome
}

async fn visit(app: &mut App, path: &str) -> Outcome {
    match app.navigate(path).await {
        Ok(GuardDecision::Render(route)) => {
            debug!(route = %route, "Screen mounted");
            Outcome::Done
        }
        Ok(GuardDecision::Redirect(_)) => Outcome::Redirected,
        Err(e) => settle(Err(e)),
    }
}

fn settle(result: musicbook_screens::Result<()>) -> Outcome {
    match result {
        Ok(()) => Outcome::Done,
        // Already on screen; keep the detail in the log
        Err(ScreenError::Client(e)) => {
            debug!(error = %e, kind = ?e.kind(), "Screen operation failed");
            Outcome::Failed
        }
        Err(e) => {
            warn!(error = %e, "Screen operation refused");
            Outcome::Failed
        }
    }
}
