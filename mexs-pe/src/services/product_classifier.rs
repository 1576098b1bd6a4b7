//! Product classification service
//!
//! Maps a free-text product name to a biosynthetic class by keyword
//! containment against the configured taxonomy.

use crate::models::{ProductClass, ProductTaxonomy};

/// Classifies product names against an ordered taxonomy
pub struct ProductClassifier {
    taxonomy: ProductTaxonomy,
}

impl ProductClassifier {
    pub fn new(taxonomy: ProductTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Classify a product name; `None` means no taxonomy entry matched
    pub fn classify(&self, product_name: &str) -> Option<&ProductClass> {
        let product = product_name.to_lowercase();
        if product.trim().is_empty() {
            return None;
        }

        for class in &self.taxonomy.classes {
            for keyword in &class.keywords {
                if product.contains(&keyword.to_lowercase()) {
                    return Some(class);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product_class::ProductClass;

    fn class(name: &str, keywords: &[&str]) -> ProductClass {
        ProductClass {
            name: name.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            notes: String::new(),
        }
    }

    fn classifier(classes: Vec<ProductClass>) -> ProductClassifier {
        ProductClassifier::new(ProductTaxonomy { classes })
    }

    #[test]
    fn classifies_builtin_beta_carotene() {
        let classifier = ProductClassifier::new(ProductTaxonomy::builtin());
        let class = classifier.classify("beta-carotene").unwrap();
        assert_eq!(class.name, "carotenoid");
    }

    #[test]
    fn match_is_case_insensitive() {
        let classifier = classifier(vec![class("carotenoid", &["carotene"])]);
        assert!(classifier.classify("Beta-Carotene").is_some());
        assert!(classifier.classify("LYCOPENE beta-CAROTENE mix").is_some());
    }

    #[test]
    fn taxonomy_order_determines_precedence() {
        // "carotene" appears in both classes; the earlier one wins
        let first_wins = classifier(vec![
            class("first", &["carotene"]),
            class("second", &["carotene"]),
        ]);
        assert_eq!(first_wins.classify("beta-carotene").unwrap().name, "first");

        let reordered = classifier(vec![
            class("second", &["carotene"]),
            class("first", &["carotene"]),
        ]);
        assert_eq!(reordered.classify("beta-carotene").unwrap().name, "second");
    }

    #[test]
    fn unmatched_product_yields_none() {
        let classifier = classifier(vec![class("carotenoid", &["carotene"])]);
        assert!(classifier.classify("penicillin").is_none());
    }

    #[test]
    fn empty_name_yields_none() {
        let classifier = classifier(vec![class("carotenoid", &["carotene"])]);
        assert!(classifier.classify("").is_none());
        assert!(classifier.classify("   ").is_none());
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = ProductClassifier::new(ProductTaxonomy::builtin());
        let first = classifier.classify("astaxanthin").map(|c| c.name.clone());
        for _ in 0..10 {
            let again = classifier.classify("astaxanthin").map(|c| c.name.clone());
            assert_eq!(first, again);
        }
    }
}
