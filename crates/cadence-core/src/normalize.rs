//! Prefix normalization of vendor descriptions
//!
//! Statement descriptions for the same vendor often share a fixed prefix
//! followed by an order or store number ("AMAZON RETAIL 1A2B3C"). A prefix
//! rule rewrites any description starting with its prefix to one canonical
//! label, so all of them land under the same group key.

use serde::{Deserialize, Serialize};

/// A single `prefix -> label` rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRule {
    pub prefix: String,
    pub label: String,
}

impl PrefixRule {
    pub fn new(prefix: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            label: label.into(),
        }
    }
}

/// Ordered list of prefix rules; the first matching rule wins
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixMapping {
    rules: Vec<PrefixRule>,
}

impl PrefixMapping {
    pub fn new(rules: Vec<PrefixRule>) -> Self {
        Self { rules }
    }

    /// Build a mapping from `(prefix, label)` pairs, keeping their order
    pub fn from_pairs<P, L>(pairs: impl IntoIterator<Item = (P, L)>) -> Self
    where
        P: Into<String>,
        L: Into<String>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(prefix, label)| PrefixRule::new(prefix, label))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[PrefixRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite a description to its canonical label.
    ///
    /// Matching is a case-sensitive starts-with test. Descriptions with no
    /// matching prefix are returned unchanged.
    pub fn normalize<'a>(&'a self, description: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| description.starts_with(rule.prefix.as_str()))
            .map(|rule| rule.label.as_str())
            .unwrap_or(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amazon_mapping() -> PrefixMapping {
        PrefixMapping::from_pairs([
            ("AMAZON RETAIL", "Amazon Retail"),
            ("AMAZON MARKETPLACE", "Amazon Marketplace"),
        ])
    }

    #[test]
    fn test_normalize_matching_prefix() {
        let mapping = amazon_mapping();
        assert_eq!(mapping.normalize("AMAZON RETAIL 123"), "Amazon Retail");
        assert_eq!(
            mapping.normalize("AMAZON MARKETPLACE AMZN.COM/BILL"),
            "Amazon Marketplace"
        );
    }

    #[test]
    fn test_normalize_passthrough() {
        let mapping = amazon_mapping();
        assert_eq!(mapping.normalize("NETFLIX.COM"), "NETFLIX.COM");
        assert_eq!(mapping.normalize(""), "");
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        let mapping = amazon_mapping();
        assert_eq!(mapping.normalize("Amazon Retail 123"), "Amazon Retail 123");
    }

    #[test]
    fn test_prefix_must_be_at_start() {
        let mapping = amazon_mapping();
        assert_eq!(
            mapping.normalize("REFUND AMAZON RETAIL 123"),
            "REFUND AMAZON RETAIL 123"
        );
    }

    #[test]
    fn test_first_match_wins() {
        let mapping = PrefixMapping::from_pairs([("AMAZON", "Amazon"), ("AMAZON RETAIL", "Retail")]);
        assert_eq!(mapping.normalize("AMAZON RETAIL 1"), "Amazon");

        let reversed =
            PrefixMapping::from_pairs([("AMAZON RETAIL", "Retail"), ("AMAZON", "Amazon")]);
        assert_eq!(reversed.normalize("AMAZON RETAIL 1"), "Retail");
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = PrefixMapping::default();
        assert!(mapping.is_empty());
        assert_eq!(mapping.normalize("SPOTIFY USA"), "SPOTIFY USA");
    }
}
