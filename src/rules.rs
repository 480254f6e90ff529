//! Inclusion and exclusion rules.
//!
//! Rules are declared in configuration and frozen into a [`RuleSet`] at
//! crawl start: the inclusion list keeps its declared order (extraction
//! processes rules in that order), exclusions are indexed by normalized
//! uppercase tag name, and behavioral annotations ([`EventableCondition`])
//! are looked up by rule identifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An inclusion or exclusion rule for one tag.
///
/// # Example
///
/// ```rust
/// use crawlscout::CrawlElement;
///
/// let rule = CrawlElement::for_tag("a")
///     .with_id("nav-links")
///     .with_attribute("class", "internal");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlElement {
    /// Tag this rule applies to, stored uppercase.
    tag_name: String,
    /// Optional identifier linking the rule to an [`EventableCondition`].
    id: Option<String>,
    /// Attribute constraints: every pair must be present with the exact value.
    attributes: Vec<(String, String)>,
    /// Optional path-scoping expression restricting where the rule applies.
    under: Option<String>,
}

impl CrawlElement {
    /// A rule matching every element with the given tag.
    #[must_use]
    pub fn for_tag(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_uppercase(),
            id: None,
            attributes: Vec::new(),
            under: None,
        }
    }

    /// Attach an identifier, enabling [`EventableCondition`] lookup.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Require an attribute to be present with the exact value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Restrict the rule to elements under the given path expression.
    #[must_use]
    pub fn under(mut self, scope_expr: impl Into<String>) -> Self {
        self.under = Some(scope_expr.into());
        self
    }

    /// The rule's uppercase tag name.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The rule's identifier, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The rule's own scoping expression, if any.
    #[must_use]
    pub fn scope_expr(&self) -> Option<&str> {
        self.under.as_deref()
    }

    /// Check the rule's attribute constraints against an element's attributes.
    ///
    /// A rule without constraints matches every element of its tag.
    #[must_use]
    pub fn matches_attributes(&self, attributes: &[(String, String)]) -> bool {
        self.attributes.iter().all(|(name, value)| {
            attributes
                .iter()
                .any(|(k, v)| k == name && v == value)
        })
    }
}

/// Behavioral annotation attached to a rule by identifier.
///
/// Carries an optional scoping expression restricting where matches are
/// valid and an optional list of linked input fields driving combinatorial
/// candidate expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventableCondition {
    /// Scoping path expression; `None` means no restriction.
    pub in_path: Option<String>,
    /// Identifiers of input fields linked to this rule.
    pub linked_input_fields: Vec<String>,
}

impl EventableCondition {
    /// A condition scoping matches under a path expression.
    #[must_use]
    pub fn under(scope_expr: impl Into<String>) -> Self {
        Self {
            in_path: Some(scope_expr.into()),
            ..Self::default()
        }
    }

    /// A condition linking the rule to input fields.
    #[must_use]
    pub fn with_linked_inputs<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            in_path: None,
            linked_input_fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// The frozen rule configuration for one crawl run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    included: Vec<CrawlElement>,
    /// Exclusion multi-map keyed by uppercase tag name.
    excluded: HashMap<String, Vec<CrawlElement>>,
    /// Rule identifier -> condition.
    conditions: HashMap<String, EventableCondition>,
}

impl RuleSet {
    /// Build the rule set, indexing exclusions by tag once.
    #[must_use]
    pub fn new(included: Vec<CrawlElement>, excluded: Vec<CrawlElement>) -> Self {
        let mut excluded_by_tag: HashMap<String, Vec<CrawlElement>> = HashMap::new();
        for rule in excluded {
            excluded_by_tag
                .entry(rule.tag_name.clone())
                .or_default()
                .push(rule);
        }
        Self {
            included,
            excluded: excluded_by_tag,
            conditions: HashMap::new(),
        }
    }

    /// Attach a condition under a rule identifier.
    #[must_use]
    pub fn with_condition(
        mut self,
        rule_id: impl Into<String>,
        condition: EventableCondition,
    ) -> Self {
        self.conditions.insert(rule_id.into(), condition);
        self
    }

    /// Inclusion rules in declared order.
    #[must_use]
    pub fn included(&self) -> &[CrawlElement] {
        &self.included
    }

    /// Exclusion rules for a tag (already uppercase-normalized lookup).
    #[must_use]
    pub fn excluded_for_tag(&self, tag: &str) -> &[CrawlElement] {
        self.excluded
            .get(&tag.to_uppercase())
            .map_or(&[], Vec::as_slice)
    }

    /// The condition registered for a rule, if the rule has an identifier.
    #[must_use]
    pub fn condition_for(&self, rule: &CrawlElement) -> Option<&EventableCondition> {
        rule.id().and_then(|id| self.conditions.get(id))
    }

    /// The effective scoping expression for a rule.
    ///
    /// A condition's `in_path` takes precedence over the rule's own `under`
    /// expression when both are present.
    #[must_use]
    pub fn scope_expr_for<'a>(&'a self, rule: &'a CrawlElement) -> Option<&'a str> {
        self.condition_for(rule)
            .and_then(|c| c.in_path.as_deref())
            .or_else(|| rule.scope_expr())
    }
}
