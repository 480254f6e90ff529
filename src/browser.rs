//! Browser channel interface.
//!
//! The extractor never talks to a browser directly; it consumes this narrow
//! serialization contract. Real implementations wrap a remote-debugging or
//! WebDriver session; tests use in-memory stubs.

use crate::candidate::ElementSnapshot;

/// Failure on the browser control channel.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// Transport-level I/O fault while talking to the browser process.
    #[error("browser channel I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The requested frame has no document (stale path or detached frame).
    #[error("no document for frame `{0}`")]
    MissingFrame(String),

    /// The underlying session was closed.
    #[error("browser session is closed")]
    SessionClosed,
}

/// Serialization contract the extractor consumes from a browser session.
///
/// Both serialization calls may block on network or process I/O; timeout
/// policy belongs to the implementation, not to the extractor.
pub trait BrowserChannel {
    /// Serialize the current root document, with nested frame content elided.
    fn root_document_bytes(&self) -> Result<Vec<u8>, BrowserError>;

    /// Serialize the document of the frame at the given dotted path.
    fn frame_document_bytes(&self, frame_path: &str) -> Result<Vec<u8>, BrowserError>;

    /// Resolve the stable identifier of a frame element.
    ///
    /// The default follows the conventional precedence: the `id` attribute,
    /// else the `name` attribute, else no identifier (the frame is skipped
    /// by traversal).
    fn resolve_frame_identifier(&self, frame: &ElementSnapshot) -> Option<String> {
        frame
            .attribute("id")
            .filter(|v| !v.is_empty())
            .or_else(|| frame.attribute("name").filter(|v| !v.is_empty()))
            .map(ToString::to_string)
    }
}
