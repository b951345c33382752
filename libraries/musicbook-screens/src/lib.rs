//! Music Book screens
//!
//! Headless state for every screen of the Music Book client: login, album
//! search, album detail with the review form, and the user's own reviews.
//! Screens hold what would be on display (fields, lists, loading and error
//! states) and talk to the backend through [`musicbook_client`]. Rendering
//! is left to the front end.
//!
//! [`App`] is the entry point: it resolves paths, applies the session
//! guard, mounts screens and runs their initial loads.
//!
//! # Example
//!
//! ```ignore
//! use musicbook_client::{ClientConfig, MusicBookClient, Session};
//! use musicbook_screens::App;
//! use std::sync::Arc;
//!
//! let client = MusicBookClient::new(
//!     ClientConfig::new("http://127.0.0.1:8000/api"),
//!     Arc::new(Session::in_memory()),
//! )?;
//! let mut app = App::new(client);
//!
//! app.login("alice", "secret").await?;
//! app.search("Abbey Road").await?;
//! for row in app.screen().as_search().map(|s| s.rows()).unwrap_or_default() {
//!     println!("{} -> {}", row.label, row.route);
//! }
//! ```

mod album_detail;
mod app;
mod chrome;
mod error;
mod guard;
mod load;
mod login;
mod my_reviews;
mod route;
mod search;

pub use album_detail::{
    AlbumDetailScreen, AlbumView, ReviewForm, ALBUM_LOAD_FAILED, REVIEW_SUBMIT_FAILED,
};
pub use app::{App, Screen};
pub use chrome::{Chrome, NavLink};
pub use error::{Result, ScreenError};
pub use guard::{GuardDecision, SessionGuard};
pub use load::{prepend, Loadable, RequestTracker, Ticket};
pub use login::{LoginScreen, LOGIN_FAILED};
pub use my_reviews::{MyReviewRow, MyReviewsScreen, MY_REVIEWS_FAILED};
pub use route::Route;
pub use search::{ResultRow, SearchScreen, SEARCH_FAILED};
