//! Checked-elements registry.
//!
//! One registry instance is shared by every concurrently extracting worker
//! for the duration of a crawl run. It holds the set of candidate
//! fingerprints already returned (append-only until teardown), the running
//! count of inspected elements, and the crawl preconditions gating
//! extraction per state.
//!
//! The mark operation is a single atomic check-and-set per fingerprint:
//! concurrent callers racing on the same fingerprint see exactly one
//! success. A separate `is_checked` followed by a mark would reopen that
//! race; callers must gate emission on [`CheckedElements::mark_checked`]
//! alone.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashSet;

use crate::candidate::CandidateElement;
use crate::state::PageState;

/// Predicate deciding whether a state satisfies the crawl preconditions.
pub type CrawlPrecondition = Box<dyn Fn(&PageState) -> bool + Send + Sync>;

/// Shared registry contract consumed by the extractor.
pub trait CheckedElements: Send + Sync {
    /// Check whether extraction should run for this state at all.
    fn check_crawl_precondition(&self, state: &PageState) -> bool;

    /// Whether a fingerprint has already been marked.
    fn is_checked(&self, fingerprint: &str) -> bool;

    /// Atomically mark a candidate's fingerprint as checked.
    ///
    /// Returns `true` iff this call newly marked it. Must behave as one
    /// compare-and-set under concurrent callers.
    fn mark_checked(&self, candidate: &CandidateElement) -> bool;

    /// Count one inspected element (crawl statistics).
    fn increment_inspected_count(&self);

    /// Elements inspected so far across all workers.
    fn inspected_count(&self) -> usize;
}

/// Default in-memory registry.
///
/// Backed by a concurrent set whose `insert` is the required atomic
/// check-and-set, and a plain atomic counter.
#[derive(Default)]
pub struct InMemoryCheckedElements {
    checked: DashSet<String>,
    inspected: AtomicUsize,
    preconditions: Vec<CrawlPrecondition>,
}

impl InMemoryCheckedElements {
    /// An empty registry with no crawl preconditions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a crawl precondition; all preconditions must hold for a state.
    #[must_use]
    pub fn with_precondition(
        mut self,
        precondition: impl Fn(&PageState) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.preconditions.push(Box::new(precondition));
        self
    }

    /// Number of distinct fingerprints marked so far.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }
}

impl CheckedElements for InMemoryCheckedElements {
    fn check_crawl_precondition(&self, state: &PageState) -> bool {
        self.preconditions.iter().all(|p| p(state))
    }

    fn is_checked(&self, fingerprint: &str) -> bool {
        self.checked.contains(fingerprint)
    }

    fn mark_checked(&self, candidate: &CandidateElement) -> bool {
        self.checked.insert(candidate.unique_string())
    }

    fn increment_inspected_count(&self) {
        self.inspected.fetch_add(1, Ordering::Relaxed);
    }

    fn inspected_count(&self) -> usize {
        self.inspected.load(Ordering::Relaxed)
    }
}
