//! Page state handed to the extractor.

use url::Url;

/// The rendered page state an extraction call operates on.
///
/// The extractor only needs a stable name (for logging) and the page URL
/// (consulted by crawl preconditions); the DOM itself is serialized on
/// demand over the browser channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Stable state name assigned by the state graph, e.g. `"state12"`.
    pub name: String,
    /// URL the state was observed at.
    pub url: Url,
}

impl PageState {
    /// Create a page state.
    #[must_use]
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }
}
