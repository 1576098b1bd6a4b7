//! Pipeline run report
//!
//! The aggregate handed to the report sink after a run.

use crate::models::coverage::{FeasibilityVerdict, GeneCoverage};
use crate::models::expert_tables::ExpertTables;
use crate::models::pathway::{CompoundRecord, PathwayRecord};
use crate::models::product_class::ProductClass;
use crate::models::recommendation::Recommendation;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How the compound id was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchConfidence {
    /// Supplied explicitly by the caller, no search performed
    Explicit,
    /// Whole-word match of the query inside a hit description
    WholeWord,
    /// Fallback to the first search hit; possibly a poor match
    FirstHit,
}

impl MatchConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchConfidence::Explicit => "explicit",
            MatchConfidence::WholeWord => "whole-word",
            MatchConfidence::FirstHit => "first-hit",
        }
    }
}

/// Everything a single pipeline run produces for rendering
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub product_query: String,
    pub product_class: ProductClass,
    pub host_organism: String,
    pub compound: CompoundRecord,
    pub compound_confidence: MatchConfidence,
    pub pathway: PathwayRecord,
    /// Raw compound record text, dumped verbatim for inspection
    pub compound_raw: String,
    /// Raw pathway record text, dumped verbatim for inspection
    pub pathway_raw: String,
    /// Host genes linked to the whole pathway (informational)
    pub pathway_host_genes: Vec<String>,
    /// Per-EC host coverage, least-covered first
    pub coverage: Vec<GeneCoverage>,
    pub verdict: FeasibilityVerdict,
    pub recommendations: Vec<Recommendation>,
    /// The curated tables the run was evaluated against
    pub tables: ExpertTables,
    pub generated_at: DateTime<Utc>,
}
