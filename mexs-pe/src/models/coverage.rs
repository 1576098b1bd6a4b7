//! Host gene coverage of pathway enzymes

use crate::models::ec_code::EcCode;
use serde::Serialize;

/// Host gene coverage for a single EC code
#[derive(Debug, Clone, Serialize)]
pub struct GeneCoverage {
    /// The pathway enzyme's EC code
    pub ec: EcCode,
    /// True number of distinct host genes annotated to this EC
    pub gene_count: usize,
    /// Sorted, deduplicated gene identifiers, capped for reporting
    pub genes: Vec<String>,
}

/// Pathway-level feasibility verdict
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeasibilityVerdict {
    /// True iff no EC code has any host gene coverage (including the
    /// degenerate case of a pathway with zero EC codes)
    pub fully_heterologous: bool,
}

impl FeasibilityVerdict {
    pub fn from_coverage(coverage: &[GeneCoverage]) -> Self {
        let fully_heterologous =
            coverage.is_empty() || coverage.iter().map(|c| c.gene_count).sum::<usize>() == 0;
        Self { fully_heterologous }
    }
}
