//! # App Error Type
//!
//! Unified error type for checkout commands and startup.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Checkout                           │
//! │                                                                         │
//! │  "add 4"                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  ──►  Result<T, AppError>                      │  │
//! │  │     │                                                            │  │
//! │  │     ├── Parse error?   ─── InvalidCommand ─────────┐             │  │
//! │  │     ├── Catalog error? ─── CatalogError ───────────┤             │  │
//! │  │     ├── Core error?    ─── CoreError::OutOfStock ──┼─► AppError  │  │
//! │  │     └── Success ───────────────────────────────────┼────────────►│  │
//! │  └────────────────────────────────────────────────────┼─────────────┘  │
//! │                                                       ▼                 │
//! │  Session prints "! Product 4 is out of stock: only 2 available"         │
//! │  and keeps reading commands.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only configuration and terminal I/O failures end the session.

use serde::Serialize;
use ts_rs::TS;

use crate::catalog::CatalogError;
use crate::state::ConfigError;
use checkout_core::CoreError;

/// Error returned from checkout commands.
///
/// ## Serialization
/// A web front end receives:
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "Product 1 is out of stock: only 15 available"
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Product id not in the catalog
    NotFound,

    /// Provider data failed validation
    ValidationError,

    /// "+" pressed at the available count
    OutOfStock,

    /// "-" pressed with nothing ordered
    NotInOrder,

    /// Catalog fetch failed after all retries
    CatalogUnavailable,

    /// Order commands issued while loading or after a failed load
    CatalogNotReady,

    /// Unrecognized input line
    InvalidCommand,

    /// Configuration could not be loaded
    ConfigError,

    /// Terminal or filesystem failure
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidCommand, message)
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::CatalogNotReady, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// True for rejections the form would have prevented with a disabled control.
    pub fn is_rejection(&self) -> bool {
        matches!(self.code, ErrorCode::OutOfStock | ErrorCode::NotInOrder)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_) => ErrorCode::NotFound,
            CoreError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CoreError::NotInOrder(_) => ErrorCode::NotInOrder,
            CoreError::CatalogTooLarge { .. } | CoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
        };
        AppError::new(code, err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::new(ErrorCode::CatalogUnavailable, err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!(error = %err, "I/O failure");
        AppError::internal(format!("I/O error: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}
