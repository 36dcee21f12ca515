//! Types shared by the rule-based scorers.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::explanation::Explanation;

/// Outcome of a single scorer invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreResult<L> {
    pub label: L,
    /// Raw accumulated score; never clamped.
    pub score: f64,
    pub confidence: f64,
    pub explanation: Explanation,
}

/// Static description of a scorer, served by the `/stats` endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelCard {
    pub model: &'static str,
    pub description: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub accuracy: &'static str,
    /// SVM kernel; only the purchase card has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<&'static str>,
}

/// Numeric request field that may arrive as a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn to_f64(&self, field: &'static str) -> Result<f64, DomainError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::invalid(field, format!("`{raw}` is not a number")))?,
        };

        if !value.is_finite() {
            return Err(DomainError::invalid(field, "must be a finite number"));
        }
        if value < 0.0 {
            return Err(DomainError::invalid(field, "must not be negative"));
        }
        Ok(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Empty strings count as absent; anything else is kept verbatim.
pub(crate) fn present_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// Names the absent required fields, preserving declaration order.
pub(crate) fn missing_fields(checks: &[(&'static str, bool)]) -> DomainError {
    let fields = checks.iter().filter(|(_, present)| !present).map(|(name, _)| *name).collect();
    DomainError::MissingFields { fields }
}

#[cfg(test)]
mod tests {
    use super::{missing_fields, present_text, Numeric};
    use crate::errors::DomainError;

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings() {
        let number: Numeric = serde_json::from_str("12.5").expect("number");
        let text: Numeric = serde_json::from_str("\" 40 \"").expect("text");

        assert_eq!(number.to_f64("price"), Ok(12.5));
        assert_eq!(text.to_f64("price"), Ok(40.0));
    }

    #[test]
    fn numeric_rejects_garbage_and_negative_values() {
        assert!(matches!(
            Numeric::Text("cheap".into()).to_f64("price"),
            Err(DomainError::InvalidField { field: "price", .. })
        ));
        assert!(matches!(
            Numeric::Number(-1.0).to_f64("discount"),
            Err(DomainError::InvalidField { field: "discount", .. })
        ));
        assert!(Numeric::Text("NaN".into()).to_f64("price").is_err());
    }

    #[test]
    fn missing_fields_lists_only_absent_names() {
        let error = missing_fields(&[("a", true), ("b", false), ("c", false)]);

        assert_eq!(error, DomainError::MissingFields { fields: vec!["b", "c"] });
    }

    #[test]
    fn only_empty_text_counts_as_absent() {
        assert_eq!(present_text(&Some(String::new())), None);
        assert_eq!(present_text(&None), None);
        assert_eq!(present_text(&Some(" Toy ".to_string())), Some(" Toy "));
    }
}
