//! Compiled regex patterns for candidate filtering and frame matching.
//!
//! Patterns are compiled once at startup using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Matches `href` values pointing at downloadable files.
///
/// Anchors carrying such a link are never candidates, regardless of the
/// inclusion rules: clicking them would leave the application under test.
pub static DOWNLOADABLE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+\.(pdf|ps|zip|mp3)$").expect("DOWNLOADABLE_HREF regex"));

/// Scheme prefix that marks an anchor as a mail link rather than an action.
pub const MAILTO_PREFIX: &str = "mailto:";

/// Translate a frame ignore pattern into an anchored regular expression.
///
/// The `%` marker stands for "any sequence of characters"; every other
/// character is taken literally, so `"top.%"` matches `"top.nav"` but not
/// `"topside"`. Returns `None` for the pathological case where the escaped
/// pattern fails to compile.
#[must_use]
pub fn ignore_pattern_regex(pattern: &str) -> Option<Regex> {
    let escaped = regex::escape(pattern).replace('%', ".*");
    Regex::new(&format!("^{escaped}$")).ok()
}
