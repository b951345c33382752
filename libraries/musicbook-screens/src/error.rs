//! Error types for screen operations.

use crate::route::Route;
use musicbook_client::ClientError;
use thiserror::Error;

/// Why a screen operation did not complete.
///
/// By the time one of these is returned the screen has already updated its
/// own visible state (error message, alert), so callers only need it to
/// decide what happens next.
#[derive(Error, Debug)]
pub enum ScreenError {
    /// The backend call behind the operation failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The operation belongs to a screen that is not showing
    #[error("Operation needs the {expected} screen, but {actual} is showing")]
    WrongScreen { expected: &'static str, actual: Route },

    /// The album has not finished loading, so there is nothing to review
    #[error("Album is not loaded")]
    NotLoaded,
}

/// Result type for screen operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
