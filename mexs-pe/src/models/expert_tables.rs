//! Curated gene-role tables for the feasibility engine
//!
//! Versioned configuration data, not knowledge-base output. The built-in
//! tables target beta-carotene production in S. cerevisiae; replacements
//! load from JSON.

use mexs_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engineering tag on a curated precursor gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineeringTag {
    NonEssential,
    RateLimiting,
    Essential,
    Important,
    BranchPoint,
    TargetDirecting,
}

impl EngineeringTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineeringTag::NonEssential => "non-essential",
            EngineeringTag::RateLimiting => "rate-limiting",
            EngineeringTag::Essential => "essential",
            EngineeringTag::Important => "important",
            EngineeringTag::BranchPoint => "branch-point",
            EngineeringTag::TargetDirecting => "target-directing",
        }
    }

    /// Tags that call for overexpression rather than fine-tuning
    pub fn favors_overexpression(&self) -> bool {
        matches!(self, EngineeringTag::RateLimiting | EngineeringTag::TargetDirecting)
    }
}

/// A gene in the heterologous biosynthesis module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleGene {
    pub gene: String,
    pub role: String,
}

/// A native precursor-supply gene with its curated annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecursorGene {
    pub gene: String,
    pub role: String,
    pub tag: EngineeringTag,
}

/// The curated tables consumed by the feasibility engine and report sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertTables {
    /// Genes to import when the pathway is fully heterologous, in
    /// recommendation order
    pub heterologous_module: Vec<ModuleGene>,
    /// Role string attached to native-enhancement recommendations
    pub precursor_supply_role: String,
    /// Native precursor-supply genes, in recommendation order
    pub precursor_module: Vec<PrecursorGene>,
    /// Free-text risk notes appended to the mapping report
    pub risk_notes: Vec<String>,
}

impl ExpertTables {
    /// Built-in tables: carotenoid module genes plus the S. cerevisiae
    /// MVA pathway
    pub fn builtin() -> Self {
        let module_role = "carotenoid biosynthesis core step";
        let heterologous_module = ["crtE", "crtB", "crtI", "crtY"]
            .iter()
            .map(|gene| ModuleGene {
                gene: gene.to_string(),
                role: module_role.to_string(),
            })
            .collect();

        let precursor_module = vec![
            precursor("ERG10", "Acetyl-CoA acetyltransferase", EngineeringTag::NonEssential),
            precursor("ERG13", "HMG-CoA synthase", EngineeringTag::NonEssential),
            precursor("HMG1", "HMG-CoA reductase", EngineeringTag::RateLimiting),
            precursor("HMG2", "HMG-CoA reductase isozyme", EngineeringTag::RateLimiting),
            precursor("ERG12", "Mevalonate kinase", EngineeringTag::Essential),
            precursor("ERG8", "Phosphomevalonate kinase", EngineeringTag::Essential),
            precursor("ERG19", "Mevalonate diphosphate decarboxylase", EngineeringTag::Essential),
            precursor("IDI1", "IPP isomerase", EngineeringTag::Important),
            precursor("ERG20", "FPP synthase", EngineeringTag::BranchPoint),
            precursor("BTS1", "GGPP synthase", EngineeringTag::TargetDirecting),
        ];

        Self {
            heterologous_module,
            precursor_supply_role: "IPP/DMAPP/FPP/GGPP precursor supply (MVA pathway)".to_string(),
            precursor_module,
            risk_notes: ["NADPH demand", "membrane burden", "sterol competition"]
                .map(String::from)
                .to_vec(),
        }
    }

    /// Load replacement tables from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read expert tables failed ({}): {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("Parse expert tables failed ({}): {}", path.display(), e))
        })
    }
}

fn precursor(gene: &str, role: &str, tag: EngineeringTag) -> PrecursorGene {
    PrecursorGene {
        gene: gene.to_string(),
        role: role.to_string(),
        tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_module_order_is_fixed() {
        let tables = ExpertTables::builtin();
        let genes: Vec<&str> = tables
            .heterologous_module
            .iter()
            .map(|g| g.gene.as_str())
            .collect();
        assert_eq!(genes, vec!["crtE", "crtB", "crtI", "crtY"]);
    }

    #[test]
    fn builtin_precursor_table_starts_and_ends_as_curated() {
        let tables = ExpertTables::builtin();
        assert_eq!(tables.precursor_module.first().unwrap().gene, "ERG10");
        assert_eq!(tables.precursor_module.last().unwrap().gene, "BTS1");
        assert_eq!(tables.precursor_module.len(), 10);
    }

    #[test]
    fn overexpression_tags() {
        assert!(EngineeringTag::RateLimiting.favors_overexpression());
        assert!(EngineeringTag::TargetDirecting.favors_overexpression());
        assert!(!EngineeringTag::Essential.favors_overexpression());
        assert!(!EngineeringTag::BranchPoint.favors_overexpression());
    }

    #[test]
    fn tags_serialize_kebab_case() {
        let json = serde_json::to_string(&EngineeringTag::RateLimiting).unwrap();
        assert_eq!(json, "\"rate-limiting\"");
        let parsed: EngineeringTag = serde_json::from_str("\"target-directing\"").unwrap();
        assert_eq!(parsed, EngineeringTag::TargetDirecting);
    }

    #[test]
    fn json_round_trip() {
        let tables = ExpertTables::builtin();
        let json = serde_json::to_string(&tables).unwrap();
        let parsed: ExpertTables = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.heterologous_module.len(), 4);
        assert_eq!(parsed.precursor_supply_role, tables.precursor_supply_role);
    }
}
