//! Error types for costtag
//!
//! This module defines the error types used throughout the costtag crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use costtag_core::error::{CosttagError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to CosttagError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for costtag operations
#[derive(Error, Debug)]
pub enum CosttagError {
    /// The billing-data source rejected or failed the request
    ///
    /// `code` is the machine-readable error code reported by the source
    /// (for example `AccessDeniedException`), `message` its human-readable text.
    #[error("Billing source error {code}: {message}")]
    Source {
        /// Machine-readable error code
        code: String,
        /// Error message
        message: String,
    },

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CosttagError {
    /// Build a `Source` error from a code and a message
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results in costtag
///
/// # Example
///
/// ```
/// use costtag_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CosttagError>;
