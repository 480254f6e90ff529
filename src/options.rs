//! Configuration options for candidate extraction.
//!
//! `CrawlOptions` controls frame traversal and the at-most-once visitation
//! policy. Rule lists live separately in [`crate::rules::RuleSet`]; both are
//! built once from configuration at crawl start and never mutated.

use serde::{Deserialize, Serialize};

/// Behavioral switches for the candidate extractor.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use crawlscout::CrawlOptions;
///
/// let options = CrawlOptions {
///     ignored_frame_identifiers: vec!["top.%".to_string()],
///     ..CrawlOptions::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOptions {
    /// Descend into `frame`/`iframe` documents.
    ///
    /// When disabled, every frame is treated as ignored and traversal never
    /// descends below the root document.
    ///
    /// Default: `true`
    pub crawl_frames: bool,

    /// Emit each candidate fingerprint at most once per crawl run.
    ///
    /// When enabled, a candidate is only returned if its fingerprint was
    /// newly marked in the shared checked-elements registry.
    ///
    /// Default: `true`
    pub click_once: bool,

    /// Frame paths to skip during traversal.
    ///
    /// A pattern containing `%` matches any sequence of characters at that
    /// position; a pattern without `%` must equal the full dotted frame path.
    ///
    /// Default: empty
    pub ignored_frame_identifiers: Vec<String>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            crawl_frames: true,
            click_once: true,
            ignored_frame_identifiers: Vec::new(),
        }
    }
}
