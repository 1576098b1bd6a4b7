//! mexs-pe - Pathway Engine
//!
//! Command-line entry point: resolves configuration, wires up the KEGG
//! client, and runs the pipeline for one target product.

use anyhow::Result;
use clap::Parser;
use mexs_pe::config::{CliOverrides, PipelineConfig};
use mexs_pe::services::kegg_client::KeggClient;
use mexs_pe::services::pipeline;
use mexs_pe::PipelineError;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "mexs-pe",
    version,
    about = "Metabolic engineering expert system: pathway feasibility and recommendations"
)]
struct Cli {
    /// Target product name, e.g. "beta-carotene"
    #[arg(long)]
    product: String,

    /// Explicit KEGG compound id (skips compound search), e.g. cpd:C02094
    #[arg(long)]
    compound: Option<String>,

    /// KEGG pathway id, e.g. path:map00906
    #[arg(long, default_value = "path:map00906")]
    pathway: String,

    /// Host organism code, e.g. sce
    #[arg(long)]
    host: Option<String>,

    /// Output folder for reports and tables
    #[arg(long)]
    outdir: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let toml_config = mexs_common::config::load_toml_config(cli.config.as_deref())?;

    // Initialize tracing
    let level: Level = toml_config.logging.level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting mexs-pe (Pathway Engine)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = PipelineConfig::resolve(
        cli.product,
        cli.compound,
        cli.pathway,
        CliOverrides {
            host: cli.host,
            outdir: cli.outdir,
        },
        &toml_config,
    )?;

    let client = KeggClient::with_settings(config.kegg.clone())?;

    match pipeline::run(&config, &client).await {
        Ok(outcome) => {
            info!(
                class = %outcome.product_class,
                compound = %outcome.compound_id,
                pathway = %outcome.pathway_id,
                pathway_name = %outcome.pathway_name,
                "Run finished"
            );
            info!("Outputs: {}", outcome.output_folder.display());
            Ok(())
        }
        Err(PipelineError::UnclassifiedProduct(product)) => {
            error!(
                product = %product,
                "Product class not recognized; extend the taxonomy via the taxonomy_file config key"
            );
            anyhow::bail!("product class not recognized: {product}")
        }
        Err(e) => {
            error!(error = %e, "Pipeline run failed");
            Err(e.into())
        }
    }
}
