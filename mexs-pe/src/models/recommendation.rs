//! Engineering recommendation records

use serde::Serialize;

/// Which engineering module a recommendation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModuleType {
    /// Gene must be imported from another organism
    Heterologous,
    /// Native gene whose expression should be adjusted for precursor supply
    NativeEnhancement,
}

impl ModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Heterologous => "heterologous",
            ModuleType::NativeEnhancement => "native_enhancement",
        }
    }
}

/// Confidence tier attached to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceTier {
    High,
    Medium,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
        }
    }
}

/// Concrete engineering action for a native gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendedAction {
    Overexpression,
    FineTuning,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::Overexpression => "overexpression",
            RecommendedAction::FineTuning => "fine-tuning",
        }
    }
}

/// A single gene-level engineering recommendation
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub module_type: ModuleType,
    pub gene: String,
    pub role: String,
    pub confidence: ConfidenceTier,
    /// Present for native-enhancement rows; heterologous imports carry no
    /// expression-level action
    pub action: Option<RecommendedAction>,
}
