//! Errors for configuration, storage and cache I/O
//!
//! Every [`Error`] carries an [`ErrorCode`] so callers can branch on the
//! failure kind, plus optional context and a hint the CLI prints as-is.

use std::fmt;
use thiserror::Error;

/// Failure kinds, grouped by thousands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // 1xxx
    Internal = 1001,

    // 2xxx
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // 3xxx
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,

    // 4xxx
    StorageUnavailable = 4001,
    StorageWriteFailed = 4002,
    SerializationFailed = 4003,
}

impl ErrorCode {
    /// Numeric value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Group name derived from the thousands digit
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Storage",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Core error
#[derive(Error, Debug)]
pub struct Error {
    /// Failure kind
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// What was being done when it failed
    pub context: Option<String>,
    /// How to fix it
    pub suggestion: Option<String>,
    /// Underlying error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({ctx})")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create an error with no context
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Attach context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a hint
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the underlying error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Configuration could not be read
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// An explicitly named configuration file does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .xeluxe.toml file or use --config to specify a path")
    }

    /// The storage location cannot be used at all
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageUnavailable, message)
            .with_suggestion("Check that the cache directory exists and is writable")
    }
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::SerializationFailed, format!("JSON error: {err}")).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

/// Attach context to a failed [`Result`]
pub trait ResultExt<T> {
    /// Set the context of the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
