/*!
 * Error types for the signbridge engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Only two kinds of failure ever reach the user-facing surface: a failed
 * translation request and a clip whose retries were exhausted at the end of
 * the playlist. Everything else (resolution misses, probe failures, skipped
 * clips) is absorbed and turned into state transitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider answered with nothing usable
    #[error("Provider returned an empty translation for '{0}'")]
    EmptyResponse(String),

    /// The provider cannot translate between these languages
    #[error("Unsupported language pair: {source_language} -> {target_language}")]
    UnsupportedPair {
        source_language: String,
        target_language: String,
    },
}

/// Errors that can occur while loading the sign catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures reported by the media playback primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// Network or decoder hiccup, worth retrying
    #[error("Transient media failure: {0}")]
    Transient(String),

    /// The asset does not exist, retrying is pointless
    #[error("Media resource missing: {0}")]
    ResourceMissing(String),
}

/// Errors surfaced by the playback controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// Transient failures kept happening on the final clip of the playlist
    #[error("Unable to load sign video after {attempts} attempts: {url}")]
    RetriesExhausted {
        /// URL of the clip that could not be played
        url: String,
        /// Total number of load attempts made
        attempts: u32,
    },

    /// A playback command was issued with nothing to play
    #[error("No playable sign videos in the current playlist")]
    EmptyPlaylist,
}

/// Errors returned from the engine's public operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// The translation step failed, the request was aborted
    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// Terminal playback failure
    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    /// Translation history could not be read or written
    #[error("History error: {0}")]
    History(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the sign catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error from the engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(error: anyhow::Error) -> Self {
        Self::History(error.to_string())
    }
}
