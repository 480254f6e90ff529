//! # crawlscout
//!
//! Candidate element discovery engine for automated web-application
//! crawlers.
//!
//! Given the current rendered page state inside a controlled browser
//! session, the extractor determines which interactive elements are legal
//! next actions to explore: it serializes the root document (nested frame
//! content elided), recursively traverses child frames, matches the
//! configured inclusion rules against each document, filters excluded and
//! already-visited elements, and expands form-driven elements into one
//! candidate per input-value combination.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use crawlscout::{
//!     BrowserChannel, BrowserError, CandidateElementExtractor, CrawlElement,
//!     CrawlOptions, InMemoryCheckedElements, PageState, RuleSet,
//!     StaticFormInputProvider,
//! };
//! use url::Url;
//!
//! struct MyBrowser;
//!
//! impl BrowserChannel for MyBrowser {
//!     fn root_document_bytes(&self) -> Result<Vec<u8>, BrowserError> {
//!         // serialize the live DOM over your browser control channel
//!         Ok(b"<html><body><a href=\"/next\">next</a></body></html>".to_vec())
//!     }
//!     fn frame_document_bytes(&self, frame_path: &str) -> Result<Vec<u8>, BrowserError> {
//!         Err(BrowserError::MissingFrame(frame_path.to_string()))
//!     }
//! }
//!
//! let rules = RuleSet::new(vec![CrawlElement::for_tag("a")], vec![]);
//! let extractor = CandidateElementExtractor::new(
//!     MyBrowser,
//!     Arc::new(InMemoryCheckedElements::new()),
//!     StaticFormInputProvider::new(),
//!     rules,
//!     CrawlOptions::default(),
//! );
//!
//! let state = PageState::new("index", Url::parse("https://example.com/")?);
//! let candidates = extractor.extract(&state)?;
//! println!("{} candidate actions", candidates.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Concurrency
//!
//! Extraction runs synchronously in the calling worker's thread. Workers
//! share one [`CheckedElements`] registry whose mark operation is an atomic
//! check-and-set, so a candidate fingerprint is emitted at most once across
//! the whole run. Browser sessions are handed out by the bounded, blocking
//! [`BrowserPool`].

mod error;
mod extractor;
mod options;
mod patterns;

/// Browser channel contract and errors.
pub mod browser;

/// Candidate element types.
pub mod candidate;

/// Thin adapter over the arena DOM used for all traversal.
pub mod dom;

/// Character decoding for serialized document bytes.
pub mod encoding;

/// Ancestor-recursive exclusion evaluation.
pub mod exclusion;

/// Form-input candidate expansion.
pub mod forms;

/// Frame discovery and ignore-pattern matching.
pub mod frames;

/// Structural path expressions and scope resolution.
pub mod pathexpr;

/// Browser instance pool.
pub mod pool;

/// Shared checked-elements registry.
pub mod registry;

/// Inclusion/exclusion rules and conditions.
pub mod rules;

/// Page state handed to the extractor.
pub mod state;

// Public API - re-exports
pub use browser::{BrowserChannel, BrowserError};
pub use candidate::{CandidateElement, ElementSnapshot, FormInput, How, Identification};
pub use error::{Error, Result};
pub use extractor::CandidateElementExtractor;
pub use forms::{FormInputHandler, StaticFormInputProvider};
pub use options::CrawlOptions;
pub use pool::BrowserPool;
pub use registry::{CheckedElements, CrawlPrecondition, InMemoryCheckedElements};
pub use rules::{CrawlElement, EventableCondition, RuleSet};
pub use state::PageState;
