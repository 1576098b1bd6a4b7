//! Report and export sink
//!
//! Renders a pipeline run into raw record dumps, CSV tables, and two
//! markdown reports.

use crate::models::{ModuleType, PipelineReport};
use mexs_common::{Error, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Alias lists in the summary are truncated for readability
const SUMMARY_ALIAS_CAP: usize = 20;
const REPORT_ALIAS_CAP: usize = 10;

/// Writes all run artifacts into the output folder
pub struct ReportWriter {
    outdir: PathBuf,
}

impl ReportWriter {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    /// Write every artifact for a run
    pub fn write_all(&self, report: &PipelineReport) -> Result<()> {
        self.write_raw_dumps(report)?;
        self.write_summary_csv(report)?;
        self.write_section_csvs(report)?;
        self.write_coverage_csvs(report)?;
        self.write_recommendation_csvs(report)?;
        self.write_overview_markdown(report)?;
        self.write_mapping_markdown(report)?;

        info!(outdir = %self.outdir.display(), "All report artifacts written");
        Ok(())
    }

    fn path(&self, name: &str) -> PathBuf {
        self.outdir.join(name)
    }

    fn write_raw_dumps(&self, report: &PipelineReport) -> Result<()> {
        std::fs::write(self.path("compound_raw.txt"), &report.compound_raw)?;
        std::fs::write(self.path("pathway_raw.txt"), &report.pathway_raw)?;
        Ok(())
    }

    fn write_summary_csv(&self, report: &PipelineReport) -> Result<()> {
        let mut writer = csv_writer(&self.path("summary.csv"))?;
        write_row(
            &mut writer,
            &[
                "product_query",
                "product_class",
                "compound_id",
                "compound_match",
                "compound_names",
                "pathway_id",
                "pathway_name",
                "host_organism",
            ],
        )?;

        let names: Vec<&str> = report
            .compound
            .names
            .iter()
            .take(SUMMARY_ALIAS_CAP)
            .map(|s| s.as_str())
            .collect();
        write_row(
            &mut writer,
            &[
                &report.product_query,
                &report.product_class.name,
                &report.compound.id,
                report.compound_confidence.as_str(),
                &names.join("; "),
                &report.pathway.id,
                &report.pathway.name,
                &report.host_organism,
            ],
        )?;
        finish(writer)
    }

    fn write_section_csvs(&self, report: &PipelineReport) -> Result<()> {
        self.write_single_column("pathway_enzymes.csv", "enzyme", &report.pathway.enzyme_lines)?;
        self.write_single_column(
            "pathway_reactions.csv",
            "reaction",
            &report.pathway.reaction_lines,
        )?;
        self.write_single_column(
            "pathway_compounds.csv",
            "pathway_compound",
            &report.pathway.compound_lines,
        )?;
        self.write_single_column("pathway_genes.csv", "gene_line", &report.pathway.gene_lines)?;
        Ok(())
    }

    fn write_coverage_csvs(&self, report: &PipelineReport) -> Result<()> {
        self.write_single_column(
            "host_genes_in_pathway.csv",
            "host_gene",
            &report.pathway_host_genes,
        )?;

        let mut writer = csv_writer(&self.path("ec_to_host_genes.csv"))?;
        write_row(&mut writer, &["ec", "host_gene_count", "host_genes"])?;
        for row in &report.coverage {
            write_row(
                &mut writer,
                &[
                    row.ec.as_str(),
                    &row.gene_count.to_string(),
                    &row.genes.join(";"),
                ],
            )?;
        }
        finish(writer)
    }

    fn write_recommendation_csvs(&self, report: &PipelineReport) -> Result<()> {
        let mut writer = csv_writer(&self.path("engineering_recommendations.csv"))?;
        write_row(
            &mut writer,
            &["module_type", "gene", "role", "confidence", "recommended_action"],
        )?;
        for rec in &report.recommendations {
            write_row(
                &mut writer,
                &[
                    rec.module_type.as_str(),
                    &rec.gene,
                    &rec.role,
                    rec.confidence.as_str(),
                    rec.action.map(|a| a.as_str()).unwrap_or(""),
                ],
            )?;
        }
        finish(writer)?;

        let mut writer = csv_writer(&self.path("precursor_engineering_priorities.csv"))?;
        write_row(
            &mut writer,
            &["gene", "role", "engineering_tag", "recommended_action"],
        )?;
        for gene in &report.tables.precursor_module {
            let action = if gene.tag.favors_overexpression() {
                "overexpression"
            } else {
                "fine-tuning"
            };
            write_row(
                &mut writer,
                &[&gene.gene, &gene.role, gene.tag.as_str(), action],
            )?;
        }
        finish(writer)
    }

    fn write_overview_markdown(&self, report: &PipelineReport) -> Result<()> {
        let mut md = String::new();
        let _ = writeln!(md, "# Metabolic engineering report: {}\n", report.product_query);
        let _ = writeln!(
            md,
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(
            md,
            "- Product class: **{}** - {}",
            report.product_class.name, report.product_class.notes
        );
        let _ = writeln!(
            md,
            "- Compound: **{}** (match: {})",
            report.compound.id,
            report.compound_confidence.as_str()
        );
        if !report.compound.names.is_empty() {
            let names: Vec<&str> = report
                .compound
                .names
                .iter()
                .take(REPORT_ALIAS_CAP)
                .map(|s| s.as_str())
                .collect();
            let _ = writeln!(md, "- Names: {}", names.join(", "));
        }
        let _ = writeln!(
            md,
            "- Pathway: **{}** {}\n",
            report.pathway.id, report.pathway.name
        );

        let _ = writeln!(md, "## Parsed items\n");
        let _ = writeln!(
            md,
            "- Enzymes (n={}): saved to `pathway_enzymes.csv`",
            report.pathway.enzyme_lines.len()
        );
        let _ = writeln!(
            md,
            "- Reactions (n={}): saved to `pathway_reactions.csv`",
            report.pathway.reaction_lines.len()
        );
        let _ = writeln!(
            md,
            "- Compounds (n={}): saved to `pathway_compounds.csv`",
            report.pathway.compound_lines.len()
        );
        let _ = writeln!(
            md,
            "- Gene lines (n={}): saved to `pathway_genes.csv`",
            report.pathway.gene_lines.len()
        );

        std::fs::write(self.path("report.md"), md)?;
        Ok(())
    }

    fn write_mapping_markdown(&self, report: &PipelineReport) -> Result<()> {
        let missing: Vec<&str> = report
            .coverage
            .iter()
            .filter(|c| c.gene_count == 0)
            .map(|c| c.ec.as_str())
            .collect();
        let present = report.coverage.len() - missing.len();

        let mut md = String::new();
        let _ = writeln!(
            md,
            "# Host mapping for {} {}\n",
            report.pathway.id, report.pathway.name
        );
        let _ = writeln!(
            md,
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(md, "- Host organism: {}", report.host_organism);
        let _ = writeln!(md, "- ECs in pathway: {}", report.coverage.len());
        let _ = writeln!(
            md,
            "- ECs with >=1 {} gene: {}",
            report.host_organism, present
        );
        let _ = writeln!(
            md,
            "- ECs with 0 {} gene (likely heterologous needed): {}\n",
            report.host_organism,
            missing.len()
        );

        let _ = writeln!(md, "## Likely heterologous-needed ECs\n");
        if missing.is_empty() {
            let _ = writeln!(md, "None.");
        } else {
            for ec in &missing {
                let _ = writeln!(md, "- EC:{}", ec);
            }
        }

        let _ = writeln!(md, "\n## Engineering recommendations\n");
        if report.verdict.fully_heterologous {
            let _ = writeln!(
                md,
                "- **Pathway feasibility**: Fully heterologous in host `{}`",
                report.host_organism
            );
            let module: Vec<&str> = report
                .tables
                .heterologous_module
                .iter()
                .map(|g| g.gene.as_str())
                .collect();
            let _ = writeln!(
                md,
                "- **Required heterologous module**: {}",
                module.join(" / ")
            );
        } else {
            let _ = writeln!(md, "- **Pathway feasibility**: Partially native");
        }

        let native: Vec<&str> = report
            .recommendations
            .iter()
            .filter(|r| r.module_type == ModuleType::NativeEnhancement)
            .map(|r| r.gene.as_str())
            .collect();
        let _ = writeln!(
            md,
            "- **Native precursor enhancement**: {}",
            native.join(", ")
        );
        if !report.tables.risk_notes.is_empty() {
            let _ = writeln!(
                md,
                "- **Risk notes**: {}",
                report.tables.risk_notes.join(", ")
            );
        }

        let _ = writeln!(md, "\n## Files generated\n");
        for name in [
            "summary.csv",
            "pathway_enzymes.csv",
            "pathway_reactions.csv",
            "pathway_compounds.csv",
            "pathway_genes.csv",
            "host_genes_in_pathway.csv",
            "ec_to_host_genes.csv",
            "engineering_recommendations.csv",
            "precursor_engineering_priorities.csv",
            "report.md",
        ] {
            let _ = writeln!(md, "- `{}`", name);
        }

        std::fs::write(self.path("host_mapping_report.md"), md)?;
        Ok(())
    }

    fn write_single_column(&self, name: &str, header: &str, rows: &[String]) -> Result<()> {
        let mut writer = csv_writer(&self.path(name))?;
        write_row(&mut writer, &[header])?;
        for row in rows {
            write_row(&mut writer, &[row.as_str()])?;
        }
        finish(writer)
    }
}

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path)
        .map_err(|e| Error::Internal(format!("CSV open failed ({}): {}", path.display(), e)))
}

fn write_row(writer: &mut csv::Writer<std::fs::File>, fields: &[&str]) -> Result<()> {
    writer
        .write_record(fields)
        .map_err(|e| Error::Internal(format!("CSV write failed: {}", e)))
}

fn finish(mut writer: csv::Writer<std::fs::File>) -> Result<()> {
    writer
        .flush()
        .map_err(|e| Error::Internal(format!("CSV flush failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CompoundRecord, EcCode, ExpertTables, FeasibilityVerdict, GeneCoverage, MatchConfidence,
        PathwayRecord, ProductTaxonomy,
    };
    use chrono::Utc;

    fn sample_report(fully_heterologous: bool) -> PipelineReport {
        let tables = ExpertTables::builtin();
        let coverage = vec![GeneCoverage {
            ec: EcCode::parse("2.5.1.32").unwrap(),
            gene_count: if fully_heterologous { 0 } else { 2 },
            genes: if fully_heterologous {
                Vec::new()
            } else {
                vec!["sce:YBR002C".to_string(), "sce:YPL117C".to_string()]
            },
        }];
        let verdict = FeasibilityVerdict::from_coverage(&coverage);
        let (_, recommendations) =
            crate::services::feasibility::FeasibilityAssessor::new(tables.clone())
                .evaluate(&coverage);

        PipelineReport {
            product_query: "beta-carotene".to_string(),
            product_class: ProductTaxonomy::builtin().classes[0].clone(),
            host_organism: "sce".to_string(),
            compound: CompoundRecord {
                id: "cpd:C02094".to_string(),
                names: vec!["beta-Carotene".to_string()],
            },
            compound_confidence: MatchConfidence::WholeWord,
            pathway: PathwayRecord {
                id: "path:map00906".to_string(),
                name: "Carotenoid biosynthesis".to_string(),
                enzyme_lines: vec!["2.5.1.32".to_string()],
                reaction_lines: vec!["R02060".to_string()],
                compound_lines: vec!["C02094  beta-Carotene".to_string()],
                gene_lines: Vec::new(),
            },
            compound_raw: "NAME  beta-Carotene\n".to_string(),
            pathway_raw: "NAME  Carotenoid biosynthesis\n".to_string(),
            pathway_host_genes: Vec::new(),
            coverage,
            verdict,
            recommendations,
            tables,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn writes_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        writer.write_all(&sample_report(true)).unwrap();

        for name in [
            "compound_raw.txt",
            "pathway_raw.txt",
            "summary.csv",
            "pathway_enzymes.csv",
            "pathway_reactions.csv",
            "pathway_compounds.csv",
            "pathway_genes.csv",
            "host_genes_in_pathway.csv",
            "ec_to_host_genes.csv",
            "engineering_recommendations.csv",
            "precursor_engineering_priorities.csv",
            "report.md",
            "host_mapping_report.md",
        ] {
            assert!(dir.path().join(name).is_file(), "missing artifact: {name}");
        }
    }

    #[test]
    fn fully_heterologous_report_names_the_module() {
        let dir = tempfile::tempdir().unwrap();
        ReportWriter::new(dir.path())
            .write_all(&sample_report(true))
            .unwrap();

        let md = std::fs::read_to_string(dir.path().join("host_mapping_report.md")).unwrap();
        assert!(md.contains("Fully heterologous"));
        assert!(md.contains("crtE / crtB / crtI / crtY"));
        assert!(md.contains("Risk notes"));
    }

    #[test]
    fn partially_native_report_omits_the_module() {
        let dir = tempfile::tempdir().unwrap();
        ReportWriter::new(dir.path())
            .write_all(&sample_report(false))
            .unwrap();

        let md = std::fs::read_to_string(dir.path().join("host_mapping_report.md")).unwrap();
        assert!(md.contains("Partially native"));
        assert!(!md.contains("Required heterologous module"));
    }

    #[test]
    fn coverage_csv_joins_genes_with_semicolons() {
        let dir = tempfile::tempdir().unwrap();
        ReportWriter::new(dir.path())
            .write_all(&sample_report(false))
            .unwrap();

        let csv_text = std::fs::read_to_string(dir.path().join("ec_to_host_genes.csv")).unwrap();
        assert!(csv_text.contains("2.5.1.32,2,sce:YBR002C;sce:YPL117C"));
    }

    #[test]
    fn recommendations_csv_has_empty_action_for_heterologous_rows() {
        let dir = tempfile::tempdir().unwrap();
        ReportWriter::new(dir.path())
            .write_all(&sample_report(true))
            .unwrap();

        let csv_text =
            std::fs::read_to_string(dir.path().join("engineering_recommendations.csv")).unwrap();
        let first_data_line = csv_text.lines().nth(1).unwrap();
        assert!(first_data_line.starts_with("heterologous,crtE,"));
        assert!(first_data_line.ends_with(",high,"));
    }
}
