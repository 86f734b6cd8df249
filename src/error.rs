//! Custom error types for the roster application
//!
//! Resolution functions never fail; these errors cover configuration, the
//! backend, user input and the legend editor.

use thiserror::Error;

/// Main error type for the roster application
#[derive(Error, Debug)]
pub enum RosterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Legend editor errors
    #[error("{0}")]
    Legend(#[from] LegendError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Date/time parsing errors
    #[error("Date/time error: {0}")]
    DateTime(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory")]
    NoConfigDirectory,

    #[error("Backend URL is empty or invalid: {0}")]
    InvalidApiUrl(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration file: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(String),
}

/// Backend API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to connect to the roster backend: {0}")]
    ConnectionFailed(String),

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed. Please check your access token")]
    AuthenticationFailed,

    #[error("Not allowed to modify roster data")]
    Forbidden,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid date format: {0}. Expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Invalid legend category: {0}. Expected primary, task or leave")]
    InvalidCategory(String),

    #[error("Invalid color: {0}. Expected #RRGGBB")]
    InvalidColor(String),

    #[error("Code must be 1 to 4 characters: {0:?}")]
    InvalidCode(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field value for {field}: {value}")]
    InvalidFieldValue { field: String, value: String },
}

/// Legend editor errors, worded for the person at the keyboard
#[derive(Error, Debug)]
pub enum LegendError {
    #[error("Item ini bersifat sistem dan tidak bisa dihapus.")]
    SystemEntry,

    #[error("Anda tidak memiliki akses untuk mengubah keterangan.")]
    NotAllowed,

    #[error("Gagal menyimpan: {0}")]
    SaveFailed(String),

    #[error("Gagal menghapus: {0}")]
    DeleteFailed(String),
}

/// Result type alias for the roster application
pub type Result<T> = std::result::Result<T, RosterError>;

// Command handlers work with anyhow at the edge
impl From<anyhow::Error> for RosterError {
    fn from(err: anyhow::Error) -> Self {
        RosterError::Other(err.to_string())
    }
}

impl From<chrono::ParseError> for RosterError {
    fn from(err: chrono::ParseError) -> Self {
        RosterError::DateTime(err.to_string())
    }
}
