//! Candidate element types.
//!
//! A [`CandidateElement`] is one concrete, actionable unit of exploration:
//! an owned snapshot of the rendered element it came from, how to re-locate
//! it, the frame it lives in, and (when form-driven) the input-value
//! assignment to apply before firing. Candidates are produced by the
//! extractor and consumed by the crawl-execution side; they own all their
//! data and do not borrow from the parsed document.

use std::fmt;

use crate::dom::{self, NodeRef};
use crate::pathexpr;
use crate::rules::EventableCondition;

/// How an element is addressed for later re-location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum How {
    /// A canonical absolute structural path (see [`crate::pathexpr`]).
    StructuralPath,
}

/// A (kind, value) pair identifying how to re-locate an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    /// The addressing scheme.
    pub how: How,
    /// The locator value, e.g. `/HTML[1]/BODY[1]/A[2]`.
    pub value: String,
}

impl Identification {
    /// Identification by canonical structural path.
    #[must_use]
    pub fn structural_path(value: impl Into<String>) -> Self {
        Self {
            how: How::StructuralPath,
            value: value.into(),
        }
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Owned snapshot of a rendered element.
///
/// Captured at extraction time so candidates stay valid after the parsed
/// document is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Uppercase tag name.
    pub tag: String,
    /// All attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Canonical structural path within its own document.
    pub path: String,
}

impl ElementSnapshot {
    /// Snapshot a live DOM node.
    #[must_use]
    pub fn of(node: &NodeRef) -> Self {
        Self {
            tag: dom::tag_name(node).unwrap_or_default(),
            attributes: dom::attributes(node),
            path: pathexpr::structural_path(node),
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One input-field assignment attached to a form-driven candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    /// The linked input field's identifier.
    pub field: String,
    /// The value to fill in before firing the candidate.
    pub value: String,
}

/// A discovered, actionable unit of exploration.
#[derive(Debug, Clone)]
pub struct CandidateElement {
    /// Snapshot of the source element.
    pub element: ElementSnapshot,
    /// How to re-locate the element when the action is fired.
    pub identification: Identification,
    /// Dot-joined frame path; empty string for the root document.
    pub frame_path: String,
    /// Behavioral annotation of the matching rule, if any.
    pub condition: Option<EventableCondition>,
    /// Input-value assignment for form-driven candidates; empty otherwise.
    pub form_inputs: Vec<FormInput>,
}

impl CandidateElement {
    /// A plain candidate: one element, no form expansion.
    #[must_use]
    pub fn new(element: ElementSnapshot, frame_path: impl Into<String>) -> Self {
        let identification = Identification::structural_path(element.path.clone());
        Self {
            element,
            identification,
            frame_path: frame_path.into(),
            condition: None,
            form_inputs: Vec::new(),
        }
    }

    /// A form-driven candidate carrying one input-value combination.
    #[must_use]
    pub fn with_inputs(
        element: ElementSnapshot,
        frame_path: impl Into<String>,
        form_inputs: Vec<FormInput>,
    ) -> Self {
        let mut candidate = Self::new(element, frame_path);
        candidate.form_inputs = form_inputs;
        candidate
    }

    /// The dedup fingerprint: tag name, full attribute set, frame path, and
    /// (for form-driven candidates) the input assignment.
    ///
    /// Attributes are sorted by name so the fingerprint is stable regardless
    /// of attribute order in the markup. Distinct input combinations of the
    /// same source element yield distinct fingerprints, so each combination
    /// survives at-most-once visitation on its own.
    #[must_use]
    pub fn unique_string(&self) -> String {
        element_fingerprint(
            &self.element.tag,
            &self.element.attributes,
            &self.frame_path,
            &self.form_inputs,
        )
    }
}

/// Build the fingerprint string shared by candidates and the extractor's
/// pre-check on raw elements.
#[must_use]
pub fn element_fingerprint(
    tag: &str,
    attributes: &[(String, String)],
    frame_path: &str,
    form_inputs: &[FormInput],
) -> String {
    let mut attrs: Vec<&(String, String)> = attributes.iter().collect();
    attrs.sort();
    let attr_list = attrs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut fingerprint = format!("{}: {} [frame:{}]", tag.to_uppercase(), attr_list, frame_path);
    if !form_inputs.is_empty() {
        let assignment = form_inputs
            .iter()
            .map(|input| format!("{}={}", input.field, input.value))
            .collect::<Vec<_>>()
            .join(",");
        fingerprint.push_str(&format!(" [inputs:{assignment}]"));
    }
    fingerprint
}
