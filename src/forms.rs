//! Form-input candidate expansion.
//!
//! When a rule's condition links input fields to an element, the element
//! expands into one candidate per input-value combination instead of a
//! single candidate. The combination policy is owned by the
//! [`FormInputHandler`] collaborator; [`StaticFormInputProvider`] is the
//! default implementation, producing the cartesian product of the values
//! declared per field.

use std::collections::HashMap;

use crate::candidate::{CandidateElement, ElementSnapshot, FormInput};
use crate::rules::EventableCondition;

/// Collaborator producing the candidates for a form-driven element.
pub trait FormInputHandler: Send + Sync {
    /// Expand a source element into one candidate per input-value
    /// combination for the condition's linked input fields.
    fn candidates_for_inputs(
        &self,
        source: &ElementSnapshot,
        frame_path: &str,
        condition: &EventableCondition,
    ) -> Vec<CandidateElement>;
}

/// Default form-input collaborator backed by a static value table.
///
/// Fields without declared values contribute nothing to the combination;
/// if no linked field has values, the element falls back to a single plain
/// candidate.
///
/// # Example
///
/// ```rust
/// use crawlscout::StaticFormInputProvider;
///
/// let provider = StaticFormInputProvider::new()
///     .with_values("search", ["rust", "crawler"]);
/// ```
#[derive(Default)]
pub struct StaticFormInputProvider {
    values: HashMap<String, Vec<String>>,
}

impl StaticFormInputProvider {
    /// An empty value table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the values to try for an input field.
    #[must_use]
    pub fn with_values<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values
            .insert(field.into(), values.into_iter().map(Into::into).collect());
        self
    }
}

impl FormInputHandler for StaticFormInputProvider {
    fn candidates_for_inputs(
        &self,
        source: &ElementSnapshot,
        frame_path: &str,
        condition: &EventableCondition,
    ) -> Vec<CandidateElement> {
        let fields: Vec<(&str, &[String])> = condition
            .linked_input_fields
            .iter()
            .filter_map(|field| {
                self.values
                    .get(field)
                    .filter(|values| !values.is_empty())
                    .map(|values| (field.as_str(), values.as_slice()))
            })
            .collect();

        if fields.is_empty() {
            return vec![CandidateElement::new(source.clone(), frame_path)];
        }

        let mut combinations: Vec<Vec<FormInput>> = vec![Vec::new()];
        for (field, values) in fields {
            combinations = combinations
                .into_iter()
                .flat_map(|combo| {
                    values.iter().map(move |value| {
                        let mut next = combo.clone();
                        next.push(FormInput {
                            field: field.to_string(),
                            value: value.clone(),
                        });
                        next
                    })
                })
                .collect();
        }

        combinations
            .into_iter()
            .map(|inputs| CandidateElement::with_inputs(source.clone(), frame_path, inputs))
            .collect()
    }
}
