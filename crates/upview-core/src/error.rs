//! Error types for upview-core
//!
//! Both fetch failures are recovered locally by the loaders: the user sees a
//! failure toast, the previous state is kept, and the error is logged here.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use upview_client::ClientError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Account list could not be fetched or decoded
    AccountFetchFailure,
    /// Transaction list could not be fetched or decoded
    TransactionFetchFailure,
    /// The one-shot account load was requested twice
    AlreadyLoaded,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::AccountFetchFailure => write!(f, "ACCOUNT_FETCH_FAILURE"),
            ErrorCode::TransactionFetchFailure => write!(f, "TRANSACTION_FETCH_FAILURE"),
            ErrorCode::AlreadyLoaded => write!(f, "ALREADY_LOADED"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Debug information
    Debug,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for logs and JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for upview-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to get accounts from Up: {source}")]
    AccountFetchFailure { source: ClientError },

    #[error("Failed to get transactions from Up: {source}")]
    TransactionFetchFailure { source: ClientError },

    #[error("Accounts have already been loaded for this session")]
    AlreadyLoaded,
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::AccountFetchFailure { .. } => ErrorCode::AccountFetchFailure,
            CoreError::TransactionFetchFailure { .. } => ErrorCode::TransactionFetchFailure,
            CoreError::AlreadyLoaded => ErrorCode::AlreadyLoaded,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::AccountFetchFailure { .. } => ErrorSeverity::Error,
            CoreError::TransactionFetchFailure { .. } => ErrorSeverity::Error,
            CoreError::AlreadyLoaded => ErrorSeverity::Debug,
        }
    }

    fn client_error(&self) -> Option<&ClientError> {
        match self {
            CoreError::AccountFetchFailure { source } | CoreError::TransactionFetchFailure { source } => {
                Some(source)
            }
            CoreError::AlreadyLoaded => None,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self.client_error() {
            Some(source) if source.is_unauthorized() => {
                details = details.with_suggestion(
                    "Check that the Up personal access token is valid and has not been revoked.".to_string(),
                );
            }
            Some(ClientError::Decode(_)) => {
                details = details.with_suggestion(
                    "The Up API returned a body that does not match the expected schema.".to_string(),
                );
            }
            Some(_) => {
                details = details.with_suggestion("Check network connectivity to api.up.com.au.".to_string());
            }
            None => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Selection generation, for transaction loads
    pub generation: Option<u64>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            generation: None,
        }
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = Some(generation);
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Debug => log::debug!(
                target: "upview::error",
                "{} - Operation: {}",
                error,
                context.operation
            ),
            ErrorSeverity::Error => log::error!(
                target: "upview::error",
                "{} - Operation: {} - Generation: {:?}",
                error.to_details(),
                context.operation,
                context.generation
            ),
        }
    }
}
