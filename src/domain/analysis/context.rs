//! Product Context - Cosmetic segment/competitor labelling for reports.
//!
//! Rules are matched by keyword against the entity and market names.
//! Nothing in the engine's metrics depends on the result.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::DecisionMatrix;

/// Segment description attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductContext {
    pub primary_product: String,
    pub segment: String,
    pub competitors: Vec<String>,
}

/// One keyword rule.
///
/// Matches when the entity name contains any `entity_keywords` entry and
/// the market name contains any `segment_keywords` entry (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductContextRule {
    pub entity_keywords: Vec<String>,
    pub segment_keywords: Vec<String>,
    pub segment: String,
    pub competitors: Vec<String>,
}

impl ProductContextRule {
    fn new(entity: &[&str], segment_keywords: &[&str], segment: &str, competitors: &[&str]) -> Self {
        let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
        Self {
            entity_keywords: owned(entity),
            segment_keywords: owned(segment_keywords),
            segment: segment.to_string(),
            competitors: owned(competitors),
        }
    }

    fn matches(&self, entity: &str, market: &str) -> bool {
        let contains_any = |haystack: &str, needles: &[String]| {
            needles
                .iter()
                .any(|needle| haystack.contains(&needle.to_lowercase()))
        };
        contains_any(entity, &self.entity_keywords) && contains_any(market, &self.segment_keywords)
    }
}

static BUILT_IN_RULES: Lazy<Vec<ProductContextRule>> = Lazy::new(|| {
    vec![
        ProductContextRule::new(
            &["maruti", "suzuki"],
            &["compact", "car"],
            "Compact Car Segment",
            &["Polo", "i20"],
        ),
        ProductContextRule::new(
            &["apple"],
            &["smartphone", "mobile"],
            "Premium Smartphone Market",
            &["Galaxy S", "Pixel"],
        ),
        ProductContextRule::new(
            &["tesla"],
            &["electric", "ev"],
            "Electric Vehicle Market",
            &["Polestar 2", "BMW i4"],
        ),
        ProductContextRule::new(
            &["samsung"],
            &["smartphone"],
            "Android Smartphone Market",
            &["iPhone", "Pixel"],
        ),
        ProductContextRule::new(
            &["google"],
            &["smartphone"],
            "Android Premium Market",
            &["Galaxy S", "OnePlus"],
        ),
    ]
});

/// Ordered rule list; the first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductContextCatalog {
    rules: Vec<ProductContextRule>,
}

impl ProductContextCatalog {
    pub fn new(rules: Vec<ProductContextRule>) -> Self {
        Self { rules }
    }

    /// The automotive and smartphone rules shipped with the service.
    pub fn built_in() -> Self {
        Self::new(BUILT_IN_RULES.clone())
    }

    pub fn rules(&self) -> &[ProductContextRule] {
        &self.rules
    }

    /// Describes the segment of `focal` within `matrix`.
    ///
    /// Without a matching rule the segment is the market name and the
    /// competitors are the other alternatives.
    pub fn detect(&self, matrix: &DecisionMatrix, focal: &str) -> ProductContext {
        let entity = matrix.entity_name.to_lowercase();
        let market = matrix.market_name.to_lowercase();

        match self.rules.iter().find(|rule| rule.matches(&entity, &market)) {
            Some(rule) => ProductContext {
                primary_product: focal.to_string(),
                segment: rule.segment.clone(),
                competitors: rule.competitors.clone(),
            },
            None => ProductContext {
                primary_product: focal.to_string(),
                segment: matrix.market_name.clone(),
                competitors: matrix
                    .alternatives
                    .iter()
                    .filter(|label| label.as_str() != focal)
                    .cloned()
                    .collect(),
            },
        }
    }
}

impl Default for ProductContextCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(entity: &str, market: &str) -> DecisionMatrix {
        DecisionMatrix::builder()
            .alternatives(vec!["Baleno", "Polo", "i20"])
            .criteria(vec!["Fuel"])
            .row(vec![8])
            .row(vec![7])
            .row(vec![9])
            .entity(entity)
            .market(market)
            .build()
    }

    #[test]
    fn built_in_rule_matches_case_insensitively() {
        let context = ProductContextCatalog::built_in().detect(&matrix("Maruti Suzuki", "Compact Cars"), "Baleno");
        assert_eq!(context.segment, "Compact Car Segment");
        assert_eq!(context.competitors, vec!["Polo", "i20"]);
        assert_eq!(context.primary_product, "Baleno");
    }

    #[test]
    fn entity_match_needs_segment_match() {
        let context = ProductContextCatalog::built_in().detect(&matrix("Apple", "Laptops"), "Baleno");
        assert_eq!(context.segment, "Laptops");
    }

    #[test]
    fn fallback_lists_other_alternatives() {
        let context = ProductContextCatalog::built_in().detect(&matrix("Acme", "Widgets"), "Polo");
        assert_eq!(context.segment, "Widgets");
        assert_eq!(context.competitors, vec!["Baleno", "i20"]);
    }

    #[test]
    fn custom_catalog_replaces_built_in_rules() {
        let catalog = ProductContextCatalog::new(vec![ProductContextRule::new(
            &["ACME"],
            &["widget"],
            "Industrial Widgets",
            &["Globex"],
        )]);
        let context = catalog.detect(&matrix("Acme Corp", "Widgets"), "Polo");
        assert_eq!(context.segment, "Industrial Widgets");
        assert_eq!(context.competitors, vec!["Globex"]);
    }

    #[test]
    fn catalog_deserializes_from_rule_list() {
        let json = r#"[{"entity_keywords":["acme"],"segment_keywords":["widget"],"segment":"W","competitors":[]}]"#;
        let catalog: ProductContextCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.rules().len(), 1);
    }
}
