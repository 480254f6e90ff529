//! Frame traversal.
//!
//! Discovers `frame`/`iframe` elements in a document, computes dotted frame
//! paths, filters ignored frames, and fetches each surviving frame's own
//! document over the browser channel. A fetch fault skips that frame and
//! its subtree; siblings are unaffected.

use tracing::{debug, info};

use crate::browser::BrowserChannel;
use crate::candidate::ElementSnapshot;
use crate::dom::{self, Document};
use crate::options::CrawlOptions;
use crate::patterns;

/// The two conventional frame-container tags.
const FRAME_TAGS: &[&str] = &["frame", "iframe"];

/// A discovered frame document.
pub struct FrameDocument {
    /// Full dotted frame path from the root document.
    pub path: String,
    /// The frame's own parsed document.
    pub document: Document,
}

/// Discover the non-ignored child frames of `doc`, in document order.
///
/// Frames without a resolvable identifier are skipped silently; ignored
/// frames are skipped before their document is fetched; fetch faults are
/// logged and skipped.
pub fn discover_frames<B: BrowserChannel>(
    browser: &B,
    doc: &Document,
    parent_frame_path: &str,
    options: &CrawlOptions,
) -> Vec<FrameDocument> {
    let mut discovered = Vec::new();

    for node in dom::elements_by_tags(doc, FRAME_TAGS) {
        let snapshot = ElementSnapshot::of(&node);
        let Some(identifier) = browser.resolve_frame_identifier(&snapshot) else {
            continue;
        };
        let frame_path = compose_frame_path(parent_frame_path, &identifier);

        if is_frame_ignored(&frame_path, options) {
            debug!(frame = %frame_path, "skipping ignored frame");
            continue;
        }

        match browser.frame_document_bytes(&frame_path) {
            Ok(bytes) => discovered.push(FrameDocument {
                path: frame_path,
                document: dom::parse_bytes(&bytes),
            }),
            Err(err) => {
                info!(frame = %frame_path, error = %err, "failed to fetch frame document, continuing");
            }
        }
    }

    discovered
}

/// Compose a child frame path from its parent path and own identifier.
#[must_use]
pub fn compose_frame_path(parent: &str, identifier: &str) -> String {
    if parent.is_empty() {
        identifier.to_string()
    } else {
        format!("{parent}.{identifier}")
    }
}

/// Decide whether a full frame path is ignored.
///
/// With frame crawling disabled every frame is ignored. Otherwise the path
/// is matched against each configured pattern in order; the first match
/// wins and no match means not ignored.
#[must_use]
pub fn is_frame_ignored(frame_path: &str, options: &CrawlOptions) -> bool {
    if !options.crawl_frames {
        return true;
    }
    options.ignored_frame_identifiers.iter().any(|pattern| {
        if pattern.contains('%') {
            patterns::ignore_pattern_regex(pattern)
                .is_some_and(|re| re.is_match(frame_path))
        } else {
            pattern == frame_path
        }
    })
}
