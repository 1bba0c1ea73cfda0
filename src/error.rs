//! # Error Types
//!
//! This module defines all error types for the tablature generator.
//!
//! Data-shape problems in the note stream (too-short notes, unplayable
//! pitches, colliding cells) are never errors: they surface as
//! [`Diagnostic`](crate::Diagnostic) entries next to the result. Only the
//! cases below stop a run.
//!
//! ## Error Types
//! - `InvalidConfig` - Options that break a rendering contract (e.g. a zero width limit)
//! - `Document` - A note document that is not valid YAML/JSON for the expected shape
//! - `Export` - JSON export of the event store failed
//! - `Io` - Reading or writing a file from the command-line tool
//!
//! ## Usage
//! ```rust
//! use tabgen::{TabError, TabOptions};
//!
//! let options = TabOptions { width_limit: 0, ..TabOptions::default() };
//! match options.validate() {
//!     Err(TabError::InvalidConfig(message)) => eprintln!("bad options: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//!     Ok(()) => println!("ok"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    /// Invalid configuration error.
    ///
    /// Raised for programmer-contract violations only.
    ///
    /// # Example
    /// ```
    /// # use tabgen::TabError;
    /// let err = TabError::InvalidConfig("width-limit must be greater than 0".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: width-limit must be greater than 0");
    /// ```
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed note document.
    ///
    /// # Example
    /// ```
    /// # use tabgen::TabError;
    /// let err = TabError::Document("notes: invalid type: string, expected a sequence".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid note document: notes: invalid type: string, expected a sequence"
    /// );
    /// ```
    #[error("Invalid note document: {0}")]
    Document(String),

    /// The event store could not be exported as JSON.
    #[error("Cannot export events: {0}")]
    Export(String),

    #[error("Cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
