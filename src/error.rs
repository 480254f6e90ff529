//! Error types for candidate extraction.
//!
//! Only the failure to serialize the root document is fatal to an extraction
//! call. Per-frame I/O faults and malformed path expressions are handled
//! locally (logged and skipped) and never surface through this type.

use crate::browser::BrowserError;

/// Error type for extraction and pool operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serializing the root document over the browser channel failed.
    ///
    /// This aborts the whole extraction call; nothing was extracted.
    #[error("failed to serialize the root document")]
    RootDocument(#[source] BrowserError),

    /// A path expression could not be parsed.
    #[error("malformed path expression `{expression}`: {reason}")]
    MalformedPathExpression {
        /// The offending expression as configured.
        expression: String,
        /// What the parser objected to.
        reason: String,
    },

    /// The browser pool was closed while a caller was acquiring a session.
    #[error("browser pool is closed")]
    PoolClosed,
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
