//! Structural path expressions.
//!
//! Every element is addressable by a canonical absolute path of the form
//! `/HTML[1]/BODY[1]/DIV[2]/A[1]`: uppercase tag segments with 1-based
//! positions among same-tag siblings. Inclusion and exclusion rules may be
//! scoped by a path expression; this module resolves such expressions to the
//! concrete set of canonical paths they denote in a document and provides
//! the prefix-containment check used for scope filtering.
//!
//! Supported expression grammar (a deliberately small locator subset):
//!
//! ```text
//! expr  := "/" step ("/" step)*        absolute from the document root
//!        | "//" step ("/" step)*       first step matches at any depth
//! step  := name | name "[" n "]" | "*" | "*" "[" n "]"
//! ```
//!
//! Tag names match case-insensitively; `*` matches any element. An indexed
//! step constrains the element's 1-based position among its matching
//! siblings.

use std::collections::BTreeSet;

use crate::dom::{self, Document, NodeRef};
use crate::error::Error;

/// Compute the canonical structural path of an element.
///
/// Walks the ancestor chain, counting each element's position among its
/// preceding same-tag siblings.
#[must_use]
pub fn structural_path(node: &NodeRef) -> String {
    let mut segments = Vec::new();
    let mut current = Some(*node);

    while let Some(n) = current {
        if !n.is_element() {
            break;
        }
        let Some(name) = n.node_name() else {
            break;
        };
        segments.push(format!(
            "{}[{}]",
            name.to_uppercase(),
            same_tag_position(&n, &name)
        ));
        current = n.parent();
    }

    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// 1-based position of `node` among element siblings with the same tag.
fn same_tag_position(node: &NodeRef, name: &str) -> usize {
    let mut position = 1;
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if s.is_element() && s.node_name().is_some_and(|sn| sn.eq_ignore_ascii_case(name)) {
            position += 1;
        }
        sibling = s.prev_sibling();
    }
    position
}

/// Resolve a scoping path expression to the canonical paths it denotes.
///
/// Returns the (possibly empty) set of structural paths of all elements the
/// expression matches in `doc`. Fails only on a malformed expression; an
/// expression that matches nothing resolves to the empty set.
pub fn resolve_scope_expressions(doc: &Document, expr: &str) -> Result<BTreeSet<String>, Error> {
    let parsed = Expression::parse(expr)?;
    let mut resolved = BTreeSet::new();

    let starts = if parsed.any_depth {
        dom::all_elements(doc)
    } else {
        root_elements(doc)
    };
    for start in starts {
        collect_matches(&start, &parsed.steps, &mut resolved);
    }
    Ok(resolved)
}

/// Check whether a candidate path lies under any of the resolved scope paths.
///
/// Containment is a prefix check on canonical paths: every resolved path
/// ends in a `]` segment terminator, so a prefix match cannot cross a
/// sibling-index boundary.
#[must_use]
pub fn path_contained_under(candidate: &str, scopes: &BTreeSet<String>) -> bool {
    scopes.iter().any(|scope| candidate.starts_with(scope.as_str()))
}

/// A parsed scoping expression.
struct Expression {
    /// True for `//`-prefixed expressions: the first step may match at any depth.
    any_depth: bool,
    steps: Vec<Step>,
}

struct Step {
    name: StepName,
    index: Option<usize>,
}

enum StepName {
    Any,
    Tag(String),
}

impl Expression {
    fn parse(expr: &str) -> Result<Self, Error> {
        let malformed = |reason: &str| Error::MalformedPathExpression {
            expression: expr.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(malformed("empty expression"));
        }
        let (any_depth, rest) = if let Some(rest) = trimmed.strip_prefix("//") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            (false, rest)
        } else {
            return Err(malformed("expression must start with `/` or `//`"));
        };
        if rest.is_empty() {
            return Err(malformed("expression has no steps"));
        }

        let mut steps = Vec::new();
        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(malformed("empty step"));
            }
            steps.push(Step::parse(raw).ok_or_else(|| malformed("invalid step"))?);
        }
        Ok(Self { any_depth, steps })
    }
}

impl Step {
    fn parse(raw: &str) -> Option<Self> {
        let (name_part, index) = match raw.find('[') {
            Some(open) => {
                let inner = raw[open..].strip_prefix('[')?.strip_suffix(']')?;
                let index: usize = inner.parse().ok()?;
                if index == 0 {
                    return None;
                }
                (&raw[..open], Some(index))
            }
            None => (raw, None),
        };

        let name = if name_part == "*" {
            StepName::Any
        } else if !name_part.is_empty()
            && name_part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            StepName::Tag(name_part.to_uppercase())
        } else {
            return None;
        };
        Some(Self { name, index })
    }

    fn matches(&self, node: &NodeRef) -> bool {
        if !node.is_element() {
            return false;
        }
        let Some(node_name) = node.node_name() else {
            return false;
        };
        let name_matches = match &self.name {
            StepName::Any => true,
            StepName::Tag(tag) => node_name.eq_ignore_ascii_case(tag),
        };
        if !name_matches {
            return false;
        }
        match self.index {
            None => true,
            Some(index) => match &self.name {
                StepName::Tag(_) => same_tag_position(node, &node_name) == index,
                StepName::Any => element_position(node) == index,
            },
        }
    }
}

/// 1-based position of `node` among all element siblings.
fn element_position(node: &NodeRef) -> usize {
    let mut position = 1;
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            position += 1;
        }
        sibling = s.prev_sibling();
    }
    position
}

/// Elements whose parent is not itself an element (the document roots).
fn root_elements(doc: &Document) -> Vec<NodeRef> {
    dom::all_elements(doc)
        .into_iter()
        .filter(|node| !node.parent().is_some_and(|p| p.is_element()))
        .collect()
}

/// Match `steps` against `node` and its descendants, collecting the
/// canonical paths of elements that satisfy the full step chain.
fn collect_matches(node: &NodeRef, steps: &[Step], resolved: &mut BTreeSet<String>) {
    let Some((first, rest)) = steps.split_first() else {
        return;
    };
    if !first.matches(node) {
        return;
    }
    if rest.is_empty() {
        resolved.insert(structural_path(node));
        return;
    }
    for child in node.children() {
        if child.is_element() {
            collect_matches(&child, rest, resolved);
        }
    }
}
