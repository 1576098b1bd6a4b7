//! Data models for mexs-pe (Pathway Engine)

pub mod coverage;
pub mod ec_code;
pub mod expert_tables;
pub mod pathway;
pub mod product_class;
pub mod recommendation;
pub mod report;

pub use coverage::{FeasibilityVerdict, GeneCoverage};
pub use ec_code::{extract_ec_codes, EcCode};
pub use expert_tables::{EngineeringTag, ExpertTables, ModuleGene, PrecursorGene};
pub use pathway::{CompoundRecord, PathwayRecord};
pub use product_class::{ProductClass, ProductTaxonomy};
pub use recommendation::{ConfidenceTier, ModuleType, Recommendation, RecommendedAction};
pub use report::{MatchConfidence, PipelineReport};
