//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A declared route's embedded regular expression failed to compile.
    #[error("invalid route pattern `{route}`: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: regex::Error,
    },

    /// A redirect target contains parameter segments and can never be
    /// satisfied by a redirect.
    #[error("redirect target `{route}` declares parameters and cannot be matched")]
    RedirectUnmatched { route: String },
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
