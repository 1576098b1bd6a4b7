//! Feasibility assessment and engineering recommendations
//!
//! Rule-based reasoning over the coverage table: a pathway with no native
//! coverage is fully heterologous and needs the curated module imported.

use crate::models::{
    ConfidenceTier, ExpertTables, FeasibilityVerdict, GeneCoverage, ModuleType, Recommendation,
    RecommendedAction,
};
use tracing::info;

/// Applies the curated rule tables to a coverage table
pub struct FeasibilityAssessor {
    tables: ExpertTables,
}

impl FeasibilityAssessor {
    pub fn new(tables: ExpertTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ExpertTables {
        &self.tables
    }

    /// Evaluate coverage into a verdict plus the ordered recommendation
    /// list: heterologous block first (only when fully heterologous), then
    /// the native-enhancement block, each in curated table order.
    pub fn evaluate(
        &self,
        coverage: &[GeneCoverage],
    ) -> (FeasibilityVerdict, Vec<Recommendation>) {
        let verdict = FeasibilityVerdict::from_coverage(coverage);
        let mut recommendations = Vec::new();

        if verdict.fully_heterologous {
            for module_gene in &self.tables.heterologous_module {
                recommendations.push(Recommendation {
                    module_type: ModuleType::Heterologous,
                    gene: module_gene.gene.clone(),
                    role: module_gene.role.clone(),
                    confidence: ConfidenceTier::High,
                    action: None,
                });
            }
        }

        for precursor in &self.tables.precursor_module {
            let action = if precursor.tag.favors_overexpression() {
                RecommendedAction::Overexpression
            } else {
                RecommendedAction::FineTuning
            };
            recommendations.push(Recommendation {
                module_type: ModuleType::NativeEnhancement,
                gene: precursor.gene.clone(),
                role: self.tables.precursor_supply_role.clone(),
                confidence: ConfidenceTier::Medium,
                action: Some(action),
            });
        }

        info!(
            fully_heterologous = verdict.fully_heterologous,
            recommendations = recommendations.len(),
            "Feasibility evaluated"
        );

        (verdict, recommendations)
    }
}
