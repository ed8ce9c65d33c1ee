//! Core error types for Herald

use thiserror::Error;

/// Result type alias for Herald operations
pub type HeraldResult<T> = Result<T, HeraldError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> HeraldResult<T>;

    /// Add context lazily (only evaluated on error)
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> HeraldResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> HeraldResult<T> {
        self.map_err(|e| HeraldError::other(format!("{}: {}", context, e)))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> HeraldResult<T> {
        self.map_err(|e| HeraldError::other(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with context message
    fn context<C: std::fmt::Display>(self, context: C) -> HeraldResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> HeraldResult<T> {
        self.ok_or_else(|| HeraldError::other(context.to_string()))
    }
}

/// Main error type for Herald
#[derive(Error, Debug, Clone)]
pub enum HeraldError {
    /// A required setting is missing or a setting could not be parsed
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// A handler file could not be resolved or constructed
    #[error("Discovery error: {message}")]
    Discovery {
        message: String,
        path: Option<String>,
    },

    /// Two handler files declared the same command name
    #[error("Duplicate command '{name}' declared by '{first}' and '{second}'")]
    DuplicateCommand {
        name: String,
        first: String,
        second: String,
    },

    /// A catalog definition violates the platform's constraints
    #[error("Invalid command definition '{name}': {message}")]
    InvalidDefinition { name: String, message: String },

    /// A command or event handler failed while running
    #[error("Handler error: {handler}: {message}")]
    Handler { handler: String, message: String },

    /// HTTP request errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// Generic error with context
    #[error("Error: {message}")]
    Other { message: String },
}

impl HeraldError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "HERALD_CONFIG",
            Self::Discovery { .. } => "HERALD_DISCOVERY",
            Self::DuplicateCommand { .. } => "HERALD_DUPLICATE_COMMAND",
            Self::InvalidDefinition { .. } => "HERALD_INVALID_DEFINITION",
            Self::Handler { .. } => "HERALD_HANDLER",
            Self::Http { .. } => "HERALD_HTTP",
            Self::Io { .. } => "HERALD_IO",
            Self::Json { .. } => "HERALD_JSON",
            Self::Other { .. } => "HERALD_OTHER",
        }
    }

    /// Whether this error aborts process initialization
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::Discovery { .. }
                | Self::DuplicateCommand { .. }
                | Self::InvalidDefinition { .. }
        )
    }
}
