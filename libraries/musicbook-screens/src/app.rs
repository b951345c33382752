//! Navigator tying routes, the session guard and the screens together.

use crate::album_detail::AlbumDetailScreen;
use crate::chrome::Chrome;
use crate::error::{Result, ScreenError};
use crate::guard::{GuardDecision, SessionGuard};
use crate::login::LoginScreen;
use crate::my_reviews::MyReviewsScreen;
use crate::route::Route;
use crate::search::SearchScreen;
use musicbook_client::{ClientError, MusicBookClient, Rating};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The screen currently mounted.
#[derive(Debug)]
pub enum Screen {
    Login(LoginScreen),
    Search(SearchScreen),
    AlbumDetail(Box<AlbumDetailScreen>),
    MyReviews(MyReviewsScreen),
}

impl Screen {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login(_) => "login",
            Screen::Search(_) => "search",
            Screen::AlbumDetail(_) => "album detail",
            Screen::MyReviews(_) => "my reviews",
        }
    }

    pub fn as_login(&self) -> Option<&LoginScreen> {
        match self {
            Screen::Login(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn as_search(&self) -> Option<&SearchScreen> {
        match self {
            Screen::Search(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn as_album_detail(&self) -> Option<&AlbumDetailScreen> {
        match self {
            Screen::AlbumDetail(screen) => Some(&**screen),
            _ => None,
        }
    }

    pub fn as_my_reviews(&self) -> Option<&MyReviewsScreen> {
        match self {
            Screen::MyReviews(screen) => Some(screen),
            _ => None,
        }
    }

    fn blank(route: &Route) -> Self {
        match route {
            Route::Login => Screen::Login(LoginScreen::new()),
            Route::Home => Screen::Search(SearchScreen::new()),
            Route::Album(id) => Screen::AlbumDetail(Box::new(AlbumDetailScreen::new(id.as_str()))),
            Route::MyReviews => Screen::MyReviews(MyReviewsScreen::new()),
        }
    }
}

/// One user's view of the application.
///
/// Every navigation goes through the [`SessionGuard`]. A screen operation
/// that fails with an authorization error from the backend clears the
/// session and puts the login screen up.
#[derive(Debug)]
pub struct App {
    client: MusicBookClient,
    guard: SessionGuard,
    chrome: Chrome,
    route: Route,
    screen: Screen,
}

impl App {
    /// Start on the login screen. Call [`App::navigate`] to go anywhere else.
    pub fn new(client: MusicBookClient) -> Self {
        let session = Arc::clone(client.session());
        Self {
            guard: SessionGuard::new(Arc::clone(&session)),
            chrome: Chrome::new(session),
            client,
            route: Route::Login,
            screen: Screen::Login(LoginScreen::new()),
        }
    }

    pub fn client(&self) -> &MusicBookClient {
        &self.client
    }

    /// Route of the screen on display.
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Navigation chrome, present only around protected screens.
    pub fn chrome(&self) -> Option<&Chrome> {
        self.route.is_protected().then_some(&self.chrome)
    }

    /// Go to `path`.
    ///
    /// The stored credential is re-read first so one removed behind our back
    /// is noticed. The returned decision says whether the requested route or
    /// the login screen is showing. A failed initial load leaves the screen
    /// mounted in its error state and is returned as the error.
    pub async fn navigate(&mut self, path: &str) -> Result<GuardDecision> {
        let requested = Route::resolve(path);

        if let Err(e) = self.client.session().sync().await {
            warn!(error = %e, "Could not re-read stored credential");
        }

        let decision = self.guard.check(requested).await;
        self.mount(decision.route().clone()).await?;
        Ok(decision)
    }

    /// Submit the login form and, on success, go to the landing screen.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if !matches!(self.screen, Screen::Login(_)) {
            self.show(Route::Login);
        }
        let screen = match &mut self.screen {
            Screen::Login(screen) => screen,
            _ => return Err(wrong_screen("login", &self.route)),
        };

        screen.username = username.to_string();
        screen.password = password.to_string();
        let next = screen.submit(&self.client).await?;

        self.navigate(&next.path()).await?;
        Ok(())
    }

    /// Search albums from the home screen.
    pub async fn search(&mut self, query: &str) -> Result<()> {
        let screen = match &mut self.screen {
            Screen::Search(screen) => screen,
            _ => return Err(wrong_screen("search", &self.route)),
        };

        screen.query = query.to_string();
        let result = screen.submit(&self.client).await;
        self.settle(result).await
    }

    /// Fill the home screen with new releases.
    pub async fn new_releases(&mut self) -> Result<()> {
        let screen = match &mut self.screen {
            Screen::Search(screen) => screen,
            _ => return Err(wrong_screen("search", &self.route)),
        };

        let result = screen.show_new_releases(&self.client).await;
        self.settle(result).await
    }

    /// Fill the home screen with one artist's albums.
    pub async fn artist_albums(&mut self, artist_id: &str) -> Result<()> {
        let screen = match &mut self.screen {
            Screen::Search(screen) => screen,
            _ => return Err(wrong_screen("search", &self.route)),
        };

        let result = screen.show_artist_albums(&self.client, artist_id).await;
        self.settle(result).await
    }

    /// Fill in the review form of the album on display and post it.
    pub async fn submit_review(&mut self, rating: Rating, comment: &str) -> Result<()> {
        let screen = match &mut self.screen {
            Screen::AlbumDetail(screen) => screen,
            _ => return Err(wrong_screen("album detail", &self.route)),
        };
        if screen.state().ready().is_none() {
            return Err(ScreenError::NotLoaded);
        }

        screen.form.rating = rating;
        screen.form.comment = comment.to_string();
        let result = screen.submit_review(&self.client).await;
        self.settle(result).await
    }

    /// Log out from the chrome and show the login screen.
    pub async fn logout(&mut self) {
        let next = self.chrome.logout().await;
        self.show(next);
    }

    async fn mount(&mut self, route: Route) -> Result<()> {
        // A parameter change on the album screen reloads in place; the form
        // survives.
        let reloaded = match (&route, &mut self.screen) {
            (Route::Album(id), Screen::AlbumDetail(screen)) => {
                debug!(album_id = %id, "Reusing album screen");
                let ticket = screen.enter(id);
                let result = self.client.catalog().album_details(id).await;
                Some(screen.finish_load(ticket, result))
            }
            _ => None,
        };
        if let Some(result) = reloaded {
            self.route = route;
            return self.settle(result).await;
        }

        self.show(route);

        let result = match &mut self.screen {
            Screen::AlbumDetail(screen) => screen.load(&self.client).await,
            Screen::MyReviews(screen) => screen.load(&self.client).await,
            Screen::Login(_) | Screen::Search(_) => Ok(()),
        };
        self.settle(result).await
    }

    /// Swap in a fresh screen for `route` without loading anything.
    fn show(&mut self, route: Route) {
        if let Screen::MyReviews(screen) = &mut self.screen {
            screen.unmount();
        }
        debug!(from = %self.route, to = %route, "Mounting screen");
        self.screen = Screen::blank(&route);
        self.route = route;
    }

    async fn settle(&mut self, result: std::result::Result<(), ClientError>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                if e.is_auth() {
                    info!(error = %e, "Credential rejected, logging out");
                    self.logout().await;
                }
                Err(e.into())
            }
        }
    }

}

fn wrong_screen(expected: &'static str, actual: &Route) -> ScreenError {
    ScreenError::WrongScreen {
        expected,
        actual: actual.clone(),
    }
}
