//! Exclusion evaluation.
//!
//! An element is excluded if it, or any of its ancestors, matches a
//! configured exclusion rule: exclusion is monotonic under ancestry. Rules
//! without a scoping condition exclude on tag match alone; scoped rules
//! exclude only elements whose structural path lies under the resolved
//! scope. Path-expression evaluation failures never propagate: the rule
//! simply does not exclude, and the failure is logged.

use tracing::{debug, info};

use crate::dom::{self, Document, NodeRef};
use crate::pathexpr;
use crate::rules::{CrawlElement, RuleSet};

/// Outcome of one scoped rule check.
///
/// The distinction between "did not match" and "could not be evaluated" is
/// kept internally for diagnostics; both collapse to "does not exclude" at
/// the call site.
enum ScopeMatch {
    Match,
    NoMatch,
    EvalFailed,
}

/// Whether the element or any of its ancestors matches an exclusion rule.
#[must_use]
pub fn is_excluded(doc: &Document, element: &NodeRef, rules: &RuleSet) -> bool {
    let mut current = Some(*element);
    while let Some(node) = current {
        if node.is_element() && matches_exclusion_rule(doc, &node, rules) {
            return true;
        }
        current = node.parent();
    }
    false
}

fn matches_exclusion_rule(doc: &Document, node: &NodeRef, rules: &RuleSet) -> bool {
    let Some(tag) = dom::tag_name(node) else {
        return false;
    };

    for rule in rules.excluded_for_tag(&tag) {
        if !rule.matches_attributes(&dom::attributes(node)) {
            continue;
        }
        match check_scope(doc, node, rule, rules) {
            ScopeMatch::Match => {
                info!(tag = %tag, path = %pathexpr::structural_path(node), "element excluded by rule");
                return true;
            }
            ScopeMatch::NoMatch | ScopeMatch::EvalFailed => {}
        }
    }
    false
}

/// Check a single rule's scoping condition against an element.
///
/// A rule without a scoping expression matches unconditionally (the tag and
/// attribute checks already passed).
fn check_scope(doc: &Document, node: &NodeRef, rule: &CrawlElement, rules: &RuleSet) -> ScopeMatch {
    let Some(scope_expr) = rules.scope_expr_for(rule) else {
        return ScopeMatch::Match;
    };
    match pathexpr::resolve_scope_expressions(doc, scope_expr) {
        Ok(scopes) => {
            let path = pathexpr::structural_path(node);
            if pathexpr::path_contained_under(&path, &scopes) {
                ScopeMatch::Match
            } else {
                ScopeMatch::NoMatch
            }
        }
        Err(err) => {
            debug!(expression = scope_expr, error = %err, "could not evaluate exclusion scope");
            ScopeMatch::EvalFailed
        }
    }
}
