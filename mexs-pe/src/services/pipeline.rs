//! Pipeline orchestration
//!
//! Runs the stages in order: classify, resolve, map, evaluate, export.
//! A failed knowledge-base call aborts the run.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::models::PipelineReport;
use crate::services::feasibility::FeasibilityAssessor;
use crate::services::gene_mapper::GeneMapper;
use crate::services::kegg_client::KnowledgeBase;
use crate::services::pathway_resolver;
use crate::services::product_classifier::ProductClassifier;
use crate::services::report_writer::ReportWriter;
use chrono::Utc;
use mexs_common::config::OutputFolderInitializer;
use std::path::PathBuf;
use tracing::info;

/// Condensed result of a pipeline run, for callers and logs
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub product_class: String,
    pub compound_id: String,
    pub pathway_id: String,
    pub pathway_name: String,
    pub ec_total: usize,
    pub ec_missing: usize,
    pub fully_heterologous: bool,
    pub recommendation_count: usize,
    pub output_folder: PathBuf,
}

/// Execute a full pipeline run against the given knowledge base
pub async fn run<K: KnowledgeBase>(
    config: &PipelineConfig,
    kb: &K,
) -> PipelineResult<PipelineOutcome> {
    info!(product = %config.product, host = %config.host_organism, "Starting pipeline run");

    // Stage 1: classification
    let classifier = ProductClassifier::new(config.taxonomy.clone());
    let product_class = classifier
        .classify(&config.product)
        .ok_or_else(|| PipelineError::UnclassifiedProduct(config.product.clone()))?
        .clone();
    info!(class = %product_class.name, "Product classified");

    // Stage 2: resolution
    let resolved = pathway_resolver::resolve(
        kb,
        &config.product,
        config.explicit_compound.as_deref(),
        &config.pathway_id,
    )
    .await?;

    // Stage 3: host gene mapping
    let mapper = GeneMapper::new(config.host_organism.clone());
    let coverage = mapper.map_genes(kb, &resolved.pathway).await?;
    let pathway_host_genes = mapper.pathway_linked_genes(kb, &resolved.pathway.id).await?;

    // Stage 4: feasibility and recommendations
    let assessor = FeasibilityAssessor::new(config.tables.clone());
    let (verdict, recommendations) = assessor.evaluate(&coverage);

    let ec_total = coverage.len();
    let ec_missing = coverage.iter().filter(|c| c.gene_count == 0).count();

    // Stage 5: export
    let report = PipelineReport {
        product_query: config.product.clone(),
        product_class,
        host_organism: config.host_organism.clone(),
        compound: resolved.compound,
        compound_confidence: resolved.compound_confidence,
        pathway: resolved.pathway,
        compound_raw: resolved.compound_raw,
        pathway_raw: resolved.pathway_raw,
        pathway_host_genes,
        coverage,
        verdict,
        recommendations,
        tables: config.tables.clone(),
        generated_at: Utc::now(),
    };

    OutputFolderInitializer::new(config.output_folder.clone()).ensure_directory_exists()?;
    ReportWriter::new(&config.output_folder).write_all(&report)?;

    let outcome = PipelineOutcome {
        product_class: report.product_class.name.clone(),
        compound_id: report.compound.id.clone(),
        pathway_id: report.pathway.id.clone(),
        pathway_name: report.pathway.name.clone(),
        ec_total,
        ec_missing,
        fully_heterologous: report.verdict.fully_heterologous,
        recommendation_count: report.recommendations.len(),
        output_folder: config.output_folder.clone(),
    };

    info!(
        ec_total = outcome.ec_total,
        ec_missing = outcome.ec_missing,
        fully_heterologous = outcome.fully_heterologous,
        "Pipeline run complete"
    );

    Ok(outcome)
}
