//! Candidate element extraction.
//!
//! The orchestrator: serializes the root document over the browser channel,
//! recursively walks discovered frame documents, matches inclusion rules in
//! declared order against each document in document order, applies scope,
//! exclusion, and dedup filtering, and expands surviving elements into
//! candidate actions.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::browser::BrowserChannel;
use crate::candidate::{element_fingerprint, CandidateElement, ElementSnapshot};
use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::exclusion;
use crate::forms::FormInputHandler;
use crate::frames;
use crate::options::CrawlOptions;
use crate::pathexpr;
use crate::patterns::{DOWNLOADABLE_HREF, MAILTO_PREFIX};
use crate::registry::CheckedElements;
use crate::rules::{CrawlElement, RuleSet};
use crate::state::PageState;

/// Extracts candidate elements from the current page state, based on the
/// configured inclusion rules. Elements can also be excluded.
pub struct CandidateElementExtractor<B, F> {
    browser: B,
    checked: Arc<dyn CheckedElements>,
    forms: F,
    rules: RuleSet,
    options: CrawlOptions,
}

impl<B, F> CandidateElementExtractor<B, F>
where
    B: BrowserChannel,
    F: FormInputHandler,
{
    /// Create an extractor bound to one browser session.
    ///
    /// The registry is shared across all extractors of a crawl run; rules
    /// and options are frozen configuration.
    pub fn new(
        browser: B,
        checked: Arc<dyn CheckedElements>,
        forms: F,
        rules: RuleSet,
        options: CrawlOptions,
    ) -> Self {
        Self {
            browser,
            checked,
            forms,
            rules,
            options,
        }
    }

    /// Whether the crawl preconditions hold for a state.
    #[must_use]
    pub fn check_crawl_precondition(&self, state: &PageState) -> bool {
        self.checked.check_crawl_precondition(state)
    }

    /// Extract the candidate elements of the given page state.
    ///
    /// Returns an empty sequence without error when the crawl preconditions
    /// are not satisfied. Fails only when the root document cannot be
    /// serialized; frame-level faults skip the affected frame.
    pub fn extract(&self, state: &PageState) -> Result<Vec<CandidateElement>> {
        if !self.checked.check_crawl_precondition(state) {
            info!(state = %state.name, "state did not satisfy the crawl preconditions");
            return Ok(Vec::new());
        }
        debug!(state = %state.name, "looking for candidate elements");

        let bytes = self.browser.root_document_bytes().map_err(|err| {
            error!(state = %state.name, error = %err, "root document serialization failed");
            Error::RootDocument(err)
        })?;
        let doc = dom::parse_bytes(&bytes);

        let mut found = Vec::new();
        self.extract_document(&doc, "", &mut found);
        debug!(state = %state.name, count = found.len(), "found new candidate elements");
        Ok(found)
    }

    /// Process one document: discovered frames depth-first, then the
    /// document's own elements per inclusion rule in declared order.
    fn extract_document(&self, doc: &Document, frame_path: &str, found: &mut Vec<CandidateElement>) {
        debug!(frame = %frame_path, "extracting elements");

        for frame in frames::discover_frames(&self.browser, doc, frame_path, &self.options) {
            self.extract_document(&frame.document, &frame.path, found);
        }
        for rule in self.rules.included() {
            self.evaluate_rule(doc, rule, frame_path, found);
        }
    }

    fn evaluate_rule(
        &self,
        doc: &Document,
        rule: &CrawlElement,
        frame_path: &str,
        found: &mut Vec<CandidateElement>,
    ) {
        let scopes = self.resolve_rule_scope(doc, rule);

        for node in dom::elements_by_tag(doc, rule.tag_name()) {
            let snapshot = ElementSnapshot::of(&node);

            if !rule.matches_attributes(&snapshot.attributes) {
                continue;
            }
            if !scopes.is_empty() && !pathexpr::path_contained_under(&snapshot.path, &scopes) {
                debug!(path = %snapshot.path, "element outside rule scope");
                continue;
            }

            let fingerprint =
                element_fingerprint(&snapshot.tag, &snapshot.attributes, frame_path, &[]);
            if self.checked.is_checked(&fingerprint) {
                debug!(path = %snapshot.path, "element already checked");
                continue;
            }
            if exclusion::is_excluded(doc, &node, &self.rules) {
                continue;
            }
            if rule.tag_name() == "A" && href_should_be_ignored(&snapshot) {
                debug!(path = %snapshot.path, "anchor leads out of the application");
                continue;
            }

            self.checked.increment_inspected_count();
            self.expand_element(snapshot, rule, frame_path, found);
        }
    }

    /// Resolved scope paths of the rule's scoping expression.
    ///
    /// An empty set means no scope restriction: either none was configured,
    /// or the expression failed to evaluate (fail open, logged).
    fn resolve_rule_scope(&self, doc: &Document, rule: &CrawlElement) -> BTreeSet<String> {
        let Some(scope_expr) = self.rules.scope_expr_for(rule) else {
            return BTreeSet::new();
        };
        match pathexpr::resolve_scope_expressions(doc, scope_expr) {
            Ok(scopes) => {
                debug!(expression = scope_expr, resolved = scopes.len(), "resolved rule scope");
                scopes
            }
            Err(err) => {
                debug!(expression = scope_expr, error = %err, "could not resolve rule scope");
                BTreeSet::new()
            }
        }
    }

    /// Expand a matched element into candidates and emit the ones that pass
    /// the at-most-once mark.
    fn expand_element(
        &self,
        snapshot: ElementSnapshot,
        rule: &CrawlElement,
        frame_path: &str,
        found: &mut Vec<CandidateElement>,
    ) {
        let condition = self.rules.condition_for(rule);

        let produced = match condition {
            Some(cond) if !cond.linked_input_fields.is_empty() => {
                self.forms.candidates_for_inputs(&snapshot, frame_path, cond)
            }
            _ => vec![CandidateElement::new(snapshot, frame_path)],
        };

        for mut candidate in produced {
            candidate.condition = condition.cloned();
            if !self.options.click_once || self.checked.mark_checked(&candidate) {
                debug!(candidate = %candidate.unique_string(), "found new candidate element");
                found.push(candidate);
            }
        }
    }
}

/// Whether an anchor's `href` disqualifies it: downloadable files and mail
/// links are never candidates.
fn href_should_be_ignored(snapshot: &ElementSnapshot) -> bool {
    let href = snapshot.attribute("href").unwrap_or_default();
    DOWNLOADABLE_HREF.is_match(href) || href.starts_with(MAILTO_PREFIX)
}
