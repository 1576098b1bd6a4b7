//! Product class taxonomy
//!
//! Ordered keyword taxonomy; earlier classes take precedence, so it is
//! kept as a `Vec` rather than a map. Loadable from JSON.

use mexs_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single biosynthetic product class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductClass {
    /// Class identifier, e.g. "carotenoid"
    pub name: String,
    /// Keywords matched as case-insensitive substrings of the product name
    pub keywords: Vec<String>,
    /// Free-text notes surfaced to the user on classification
    pub notes: String,
}

/// Ordered product class taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTaxonomy {
    pub classes: Vec<ProductClass>,
}

impl ProductTaxonomy {
    /// Built-in taxonomy shipped with the system
    ///
    /// Order matters: the first class whose keyword matches wins.
    pub fn builtin() -> Self {
        let classes = vec![
            ProductClass {
                name: "carotenoid".to_string(),
                keywords: [
                    "carotene",
                    "lycopene",
                    "astaxanthin",
                    "zeaxanthin",
                    "lutein",
                    "carotenoid",
                ]
                .map(String::from)
                .to_vec(),
                notes: "C40 isoprenoid pigments; requires IPP/DMAPP supply and a GGPP branch point"
                    .to_string(),
            },
            ProductClass {
                name: "terpenoid".to_string(),
                keywords: [
                    "limonene",
                    "farnesene",
                    "santalene",
                    "taxadiene",
                    "terpene",
                    "terpenoid",
                ]
                .map(String::from)
                .to_vec(),
                notes: "Mono/sesqui/diterpenes from the shared isoprenoid precursor pool"
                    .to_string(),
            },
            ProductClass {
                name: "flavonoid".to_string(),
                keywords: ["naringenin", "quercetin", "anthocyanin", "catechin", "flavonoid"]
                    .map(String::from)
                    .to_vec(),
                notes: "Phenylpropanoid-derived; depends on aromatic amino acid supply".to_string(),
            },
            ProductClass {
                name: "alkaloid".to_string(),
                keywords: ["morphine", "noscapine", "berberine", "strictosidine", "alkaloid"]
                    .map(String::from)
                    .to_vec(),
                notes: "Nitrogen-containing specialized metabolites; long heterologous routes"
                    .to_string(),
            },
            ProductClass {
                name: "organic_acid".to_string(),
                keywords: ["succinic acid", "malic acid", "itaconic acid", "lactic acid"]
                    .map(String::from)
                    .to_vec(),
                notes: "TCA-adjacent products; engineering targets central carbon flux".to_string(),
            },
        ];

        Self { classes }
    }

    /// Load a replacement taxonomy from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read taxonomy failed ({}): {}", path.display(), e)))?;
        let taxonomy: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse taxonomy failed ({}): {}", path.display(), e)))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Every class must carry at least one keyword
    pub fn validate(&self) -> Result<()> {
        for class in &self.classes {
            if class.keywords.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "Product class '{}' has no keywords",
                    class.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_taxonomy_is_valid() {
        let taxonomy = ProductTaxonomy::builtin();
        assert!(taxonomy.validate().is_ok());
        assert_eq!(taxonomy.classes[0].name, "carotenoid");
    }

    #[test]
    fn empty_keyword_list_fails_validation() {
        let taxonomy = ProductTaxonomy {
            classes: vec![ProductClass {
                name: "broken".to_string(),
                keywords: vec![],
                notes: String::new(),
            }],
        };
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let taxonomy = ProductTaxonomy::builtin();
        let json = serde_json::to_string(&taxonomy).unwrap();
        let parsed: ProductTaxonomy = serde_json::from_str(&json).unwrap();
        let names: Vec<&str> = parsed.classes.iter().map(|c| c.name.as_str()).collect();
        let expected: Vec<&str> = taxonomy.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, expected);
    }
}
