//! Shared test fixtures: an in-memory browser channel.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crawlscout::{BrowserChannel, BrowserError};

/// Route extraction logs through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

struct Inner {
    root: Option<String>,
    frames: HashMap<String, String>,
    root_requests: AtomicUsize,
    frame_requests: AtomicUsize,
}

/// In-memory browser channel serving canned documents.
///
/// Cloning shares the underlying state, so tests can keep a handle for
/// assertions after moving a clone into the extractor.
#[derive(Clone)]
pub struct StubBrowser {
    inner: Arc<Inner>,
}

impl StubBrowser {
    /// A browser whose root document is the given HTML.
    pub fn with_root(html: &str) -> Self {
        Self {
            inner: Arc::new(Inner {
                root: Some(html.to_string()),
                frames: HashMap::new(),
                root_requests: AtomicUsize::new(0),
                frame_requests: AtomicUsize::new(0),
            }),
        }
    }

    /// A browser whose root document serialization always fails.
    pub fn failing_root() -> Self {
        Self {
            inner: Arc::new(Inner {
                root: None,
                frames: HashMap::new(),
                root_requests: AtomicUsize::new(0),
                frame_requests: AtomicUsize::new(0),
            }),
        }
    }

    /// Register the document served for a dotted frame path.
    pub fn frame(self, path: &str, html: &str) -> Self {
        let mut inner = Arc::try_unwrap(self.inner)
            .unwrap_or_else(|_| panic!("frame() must be called before cloning"));
        inner.frames.insert(path.to_string(), html.to_string());
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn root_requests(&self) -> usize {
        self.inner.root_requests.load(Ordering::SeqCst)
    }

    pub fn frame_requests(&self) -> usize {
        self.inner.frame_requests.load(Ordering::SeqCst)
    }
}

impl BrowserChannel for StubBrowser {
    fn root_document_bytes(&self) -> Result<Vec<u8>, BrowserError> {
        self.inner.root_requests.fetch_add(1, Ordering::SeqCst);
        self.inner
            .root
            .as_ref()
            .map(|html| html.clone().into_bytes())
            .ok_or_else(|| {
                BrowserError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "channel down"))
            })
    }

    fn frame_document_bytes(&self, frame_path: &str) -> Result<Vec<u8>, BrowserError> {
        self.inner.frame_requests.fetch_add(1, Ordering::SeqCst);
        self.inner
            .frames
            .get(frame_path)
            .map(|html| html.clone().into_bytes())
            .ok_or_else(|| BrowserError::MissingFrame(frame_path.to_string()))
    }
}
