//! Configuration resolution for mexs-pe
//!
//! Run parameters come from CLI, environment, then TOML, with compiled
//! defaults as the final fallback. The taxonomy and curated gene tables
//! can be replaced via JSON files named in the config.

use crate::models::{ExpertTables, ProductTaxonomy};
use crate::services::kegg_client::KeggSettings;
use mexs_common::config::{resolve_output_folder, TomlConfig};
use mexs_common::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable consulted when no CLI host organism is given
pub const HOST_ORGANISM_ENV: &str = "MEXS_HOST_ORGANISM";

/// Default host organism: S. cerevisiae
pub const DEFAULT_HOST_ORGANISM: &str = "sce";

/// Overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub outdir: Option<String>,
}

/// Fully resolved run configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target product name, e.g. "beta-carotene"
    pub product: String,
    /// Explicit compound id; skips compound search when present
    pub explicit_compound: Option<String>,
    /// Pathway to evaluate
    pub pathway_id: String,
    /// Host organism code used for native coverage
    pub host_organism: String,
    /// Output folder for all artifacts
    pub output_folder: PathBuf,
    /// KEGG client settings
    pub kegg: KeggSettings,
    /// Product class taxonomy (ordered)
    pub taxonomy: ProductTaxonomy,
    /// Curated gene-role tables
    pub tables: ExpertTables,
}

impl PipelineConfig {
    /// Resolve the run configuration from CLI inputs and the TOML config
    pub fn resolve(
        product: String,
        explicit_compound: Option<String>,
        pathway_id: String,
        cli: CliOverrides,
        toml: &TomlConfig,
    ) -> Result<Self> {
        let host_organism = resolve_host_organism(cli.host.as_deref(), toml);
        let output_folder = resolve_output_folder(cli.outdir.as_deref(), toml);

        let mut kegg = KeggSettings::default();
        if let Some(base_url) = &toml.kegg_base_url {
            kegg.base_url = base_url.clone();
        }
        if let Some(timeout) = toml.kegg_timeout_secs {
            kegg.timeout_secs = timeout;
        }
        if let Some(rate) = toml.kegg_rate_limit_ms {
            kegg.rate_limit_ms = rate;
        }

        let taxonomy = match &toml.taxonomy_file {
            Some(path) => ProductTaxonomy::from_json_file(Path::new(path))?,
            None => ProductTaxonomy::builtin(),
        };
        taxonomy.validate()?;

        let tables = match &toml.expert_tables_file {
            Some(path) => ExpertTables::from_json_file(Path::new(path))?,
            None => ExpertTables::builtin(),
        };

        debug!(
            host = %host_organism,
            outdir = %output_folder.display(),
            classes = taxonomy.classes.len(),
            "Resolved pipeline configuration"
        );

        Ok(Self {
            product,
            explicit_compound,
            pathway_id,
            host_organism,
            output_folder,
            kegg,
            taxonomy,
            tables,
        })
    }
}

/// Host organism priority: CLI argument, `MEXS_HOST_ORGANISM`, TOML key,
/// compiled default
fn resolve_host_organism(cli_arg: Option<&str>, toml: &TomlConfig) -> String {
    if let Some(host) = cli_arg {
        return host.to_string();
    }

    if let Ok(host) = std::env::var(HOST_ORGANISM_ENV) {
        if !host.trim().is_empty() {
            return host;
        }
    }

    if let Some(host) = &toml.host_organism {
        return host.clone();
    }

    DEFAULT_HOST_ORGANISM.to_string()
}
