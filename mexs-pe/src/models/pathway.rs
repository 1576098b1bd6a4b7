//! Compound and pathway records parsed from KEGG flat files

use crate::extractors::flat_record::parse_section;
use crate::models::ec_code::{extract_ec_codes, EcCode};
use serde::Serialize;

/// A resolved compound and its alias names
#[derive(Debug, Clone, Serialize)]
pub struct CompoundRecord {
    /// Namespaced compound id, e.g. "cpd:C02094"
    pub id: String,
    /// Alias names from the NAME section, order preserved
    pub names: Vec<String>,
}

impl CompoundRecord {
    /// Build from a raw KEGG compound record.
    ///
    /// NAME lines hold one or more names separated by `;`; empties are
    /// dropped and order is preserved.
    pub fn from_flat_record(id: impl Into<String>, record_text: &str) -> Self {
        let names = parse_section(record_text, "NAME")
            .iter()
            .flat_map(|line| line.split(';'))
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Self {
            id: id.into(),
            names,
        }
    }
}

/// A parsed pathway record
#[derive(Debug, Clone, Serialize)]
pub struct PathwayRecord {
    /// Namespaced pathway id, e.g. "path:map00906"
    pub id: String,
    /// Display name (first NAME line, or empty when absent)
    pub name: String,
    /// Raw ENZYME section lines
    pub enzyme_lines: Vec<String>,
    /// Raw REACTION section lines
    pub reaction_lines: Vec<String>,
    /// Raw COMPOUND section lines
    pub compound_lines: Vec<String>,
    /// Raw GENE section lines
    pub gene_lines: Vec<String>,
}

impl PathwayRecord {
    /// Build from a raw KEGG pathway record
    pub fn from_flat_record(id: impl Into<String>, record_text: &str) -> Self {
        let name_lines = parse_section(record_text, "NAME");
        let name = name_lines.first().cloned().unwrap_or_default();

        Self {
            id: id.into(),
            name,
            enzyme_lines: parse_section(record_text, "ENZYME"),
            reaction_lines: parse_section(record_text, "REACTION"),
            compound_lines: parse_section(record_text, "COMPOUND"),
            gene_lines: parse_section(record_text, "GENE"),
        }
    }

    /// Normalized EC code set for this pathway's enzymes
    pub fn ec_codes(&self) -> Vec<EcCode> {
        extract_ec_codes(&self.enzyme_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATHWAY_TEXT: &str = "\
ENTRY       map00906                    Pathway
NAME        Carotenoid biosynthesis
CLASS       Metabolism; Metabolism of terpenoids and polyketides
ENZYME      1.3.99.31       1.3.99.32
            2.5.1.32
REACTION    R02060
COMPOUND    C02094  beta-Carotene
            C05435  Lycopene
";

    #[test]
    fn compound_aliases_split_on_semicolon() {
        let record = CompoundRecord::from_flat_record("cpd:C02094", "NAME  alpha; beta\n");
        assert_eq!(record.names, vec!["alpha", "beta"]);
    }

    #[test]
    fn compound_aliases_span_continuation_lines() {
        let text = "NAME        beta-Carotene;\n            all-trans-beta-Carotene\nFORMULA     C40H56\n";
        let record = CompoundRecord::from_flat_record("cpd:C02094", text);
        assert_eq!(record.names, vec!["beta-Carotene", "all-trans-beta-Carotene"]);
    }

    #[test]
    fn pathway_record_collects_sections() {
        let record = PathwayRecord::from_flat_record("path:map00906", PATHWAY_TEXT);
        assert_eq!(record.name, "Carotenoid biosynthesis");
        assert_eq!(record.enzyme_lines.len(), 2);
        assert_eq!(record.reaction_lines, vec!["R02060"]);
        assert_eq!(record.compound_lines.len(), 2);
        assert!(record.gene_lines.is_empty());
    }

    #[test]
    fn pathway_ec_codes_are_normalized() {
        let record = PathwayRecord::from_flat_record("path:map00906", PATHWAY_TEXT);
        let ec_codes = record.ec_codes();
        let ecs: Vec<&str> = ec_codes.iter().map(|e| e.as_str()).collect();
        assert_eq!(ecs, vec!["1.3.99.31", "1.3.99.32", "2.5.1.32"]);
    }

    #[test]
    fn missing_name_section_yields_empty_name() {
        let record = PathwayRecord::from_flat_record("path:map99999", "ENTRY  map99999\n");
        assert!(record.name.is_empty());
    }
}
