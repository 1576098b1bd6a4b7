//! Host gene mapping service
//!
//! For each EC code in a pathway, asks the knowledge base which host
//! genes are annotated to that enzyme function. The coverage table is
//! ordered least-covered first.

use crate::error::PipelineResult;
use crate::extractors::parse_pair_lines;
use crate::models::{EcCode, GeneCoverage, PathwayRecord};
use crate::services::kegg_client::{KeggError, KnowledgeBase};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Stored gene lists are capped for reporting; the count field always
/// carries the true cardinality
const GENE_LIST_CAP: usize = 50;

/// Bounded fan-out for per-EC link lookups. Lookups are independent; the
/// final ordering is imposed after collection, never by completion order.
const LOOKUP_CONCURRENCY: usize = 4;

/// Maps pathway enzymes to native host genes
pub struct GeneMapper {
    host_organism: String,
}

impl GeneMapper {
    pub fn new(host_organism: impl Into<String>) -> Self {
        Self {
            host_organism: host_organism.into(),
        }
    }

    pub fn host_organism(&self) -> &str {
        &self.host_organism
    }

    /// Build the per-EC coverage table for a pathway.
    ///
    /// Returns one entry per normalized EC code, ordered by ascending gene
    /// count with ties broken by ascending EC code. A pathway with zero EC
    /// codes yields an empty table, which downstream reads as "fully
    /// heterologous by construction".
    pub async fn map_genes<K: KnowledgeBase>(
        &self,
        kb: &K,
        pathway: &PathwayRecord,
    ) -> PipelineResult<Vec<GeneCoverage>> {
        let ec_codes = pathway.ec_codes();
        if ec_codes.is_empty() {
            info!(pathway = %pathway.id, "No EC codes in pathway; coverage table is empty");
            return Ok(Vec::new());
        }

        info!(
            pathway = %pathway.id,
            host = %self.host_organism,
            ec_count = ec_codes.len(),
            "Mapping pathway enzymes to host genes"
        );

        let by_ec: BTreeMap<EcCode, (usize, Vec<String>)> = stream::iter(ec_codes)
            .map(|ec| async move {
                let resolved = self.host_genes_for_ec(kb, &ec).await?;
                Ok::<_, crate::error::PipelineError>((ec, resolved))
            })
            .buffer_unordered(LOOKUP_CONCURRENCY)
            .try_collect()
            .await?;

        let mut coverage: Vec<GeneCoverage> = by_ec
            .into_iter()
            .map(|(ec, (gene_count, genes))| GeneCoverage {
                ec,
                gene_count,
                genes,
            })
            .collect();

        coverage.sort_by(|a, b| {
            a.gene_count
                .cmp(&b.gene_count)
                .then_with(|| a.ec.cmp(&b.ec))
        });

        Ok(coverage)
    }

    /// Host genes linked to the pathway as a whole.
    ///
    /// Informational: an empty result for a pathway whose enzymes also have
    /// no coverage confirms full heterologousness. Does not feed the per-EC
    /// table.
    pub async fn pathway_linked_genes<K: KnowledgeBase>(
        &self,
        kb: &K,
        pathway_id: &str,
    ) -> PipelineResult<Vec<String>> {
        let text = match kb.link(&self.host_organism, pathway_id).await {
            Ok(text) => text,
            Err(KeggError::NotFound(_)) => {
                debug!(pathway = %pathway_id, "No host genes linked to pathway");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let genes: BTreeSet<String> = parse_pair_lines(&text)
            .into_iter()
            .map(|(_, target)| target)
            .collect();
        Ok(genes.into_iter().collect())
    }

    /// Distinct host genes annotated to one EC code: true count plus the
    /// capped, sorted list
    async fn host_genes_for_ec<K: KnowledgeBase>(
        &self,
        kb: &K,
        ec: &EcCode,
    ) -> PipelineResult<(usize, Vec<String>)> {
        let entry = format!("ec:{}", ec);
        let text = match kb.link(&self.host_organism, &entry).await {
            Ok(text) => text,
            // KEGG reports "no cross-references" as a missing entry; that is
            // zero coverage, not a failure
            Err(KeggError::NotFound(_)) => {
                debug!(ec = %ec, host = %self.host_organism, "No link entry for EC");
                return Ok((0, Vec::new()));
            }
            Err(e) => return Err(e.into()),
        };

        let genes: BTreeSet<String> = parse_pair_lines(&text)
            .into_iter()
            .map(|(_, target)| target)
            .collect();

        let gene_count = genes.len();
        let capped: Vec<String> = genes.into_iter().take(GENE_LIST_CAP).collect();

        debug!(ec = %ec, count = gene_count, "EC coverage resolved");
        Ok((gene_count, capped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Stub knowledge base with canned link tables
    struct LinkStub;

    #[async_trait]
    impl KnowledgeBase for LinkStub {
        async fn get(&self, entry: &str) -> Result<String, KeggError> {
            Err(KeggError::NotFound(entry.to_string()))
        }

        async fn find(&self, _database: &str, _query: &str) -> Result<String, KeggError> {
            Ok(String::new())
        }

        async fn link(&self, target_db: &str, source: &str) -> Result<String, KeggError> {
            assert_eq!(target_db, "sce");
            match source {
                // duplicated and unsorted on purpose
                "ec:2.5.1.32" => Ok("ec:2.5.1.32\tsce:YPL117C\nec:2.5.1.32\tsce:YBR002C\nec:2.5.1.32\tsce:YPL117C\n".to_string()),
                "ec:1.3.99.31" => Err(KeggError::NotFound(source.to_string())),
                "ec:1.3.99.32" => Ok(String::new()),
                "ec:1.14.99.63" => Ok("ec:1.14.99.63\tsce:YHR190W\n".to_string()),
                "path:map00906" => Ok("path:map00906\tsce:YBR002C\n".to_string()),
                other => panic!("unexpected link source: {other}"),
            }
        }
    }

    fn pathway(enzyme_lines: &[&str]) -> PathwayRecord {
        PathwayRecord {
            id: "path:map00906".to_string(),
            name: "Carotenoid biosynthesis".to_string(),
            enzyme_lines: enzyme_lines.iter().map(|s| s.to_string()).collect(),
            reaction_lines: Vec::new(),
            compound_lines: Vec::new(),
            gene_lines: Vec::new(),
        }
    }

    #[tokio::test]
    async fn coverage_is_sorted_least_covered_first() {
        let mapper = GeneMapper::new("sce");
        let record = pathway(&["2.5.1.32 1.3.99.31", "1.3.99.32 EC:1.14.99.63"]);

        let coverage = mapper.map_genes(&LinkStub, &record).await.unwrap();

        let rows: Vec<(&str, usize)> = coverage
            .iter()
            .map(|c| (c.ec.as_str(), c.gene_count))
            .collect();
        // zero-coverage ECs first in EC order, then ascending counts
        assert_eq!(
            rows,
            vec![
                ("1.3.99.31", 0),
                ("1.3.99.32", 0),
                ("1.14.99.63", 1),
                ("2.5.1.32", 2),
            ]
        );
    }

    #[tokio::test]
    async fn link_targets_are_deduplicated_and_sorted() {
        let mapper = GeneMapper::new("sce");
        let record = pathway(&["2.5.1.32"]);

        let coverage = mapper.map_genes(&LinkStub, &record).await.unwrap();

        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].gene_count, 2);
        assert_eq!(coverage[0].genes, vec!["sce:YBR002C", "sce:YPL117C"]);
    }

    #[tokio::test]
    async fn missing_link_entry_means_zero_coverage() {
        let mapper = GeneMapper::new("sce");
        let record = pathway(&["1.3.99.31"]);

        let coverage = mapper.map_genes(&LinkStub, &record).await.unwrap();

        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].gene_count, 0);
        assert!(coverage[0].genes.is_empty());
    }

    #[tokio::test]
    async fn empty_pathway_yields_empty_coverage() {
        let mapper = GeneMapper::new("sce");
        let record = pathway(&[]);
        let coverage = mapper.map_genes(&LinkStub, &record).await.unwrap();
        assert!(coverage.is_empty());
    }

    #[tokio::test]
    async fn pathway_linked_genes_are_collected() {
        let mapper = GeneMapper::new("sce");
        let genes = mapper
            .pathway_linked_genes(&LinkStub, "path:map00906")
            .await
            .unwrap();
        assert_eq!(genes, vec!["sce:YBR002C"]);
    }

    /// Stub producing more genes than the reporting cap
    struct ManyGenesStub;

    #[async_trait]
    impl KnowledgeBase for ManyGenesStub {
        async fn get(&self, entry: &str) -> Result<String, KeggError> {
            Err(KeggError::NotFound(entry.to_string()))
        }

        async fn find(&self, _database: &str, _query: &str) -> Result<String, KeggError> {
            Ok(String::new())
        }

        async fn link(&self, _target_db: &str, source: &str) -> Result<String, KeggError> {
            let lines: String = (0..60)
                .map(|i| format!("{}\tsce:Y{:03}W\n", source, i))
                .collect();
            Ok(lines)
        }
    }

    #[tokio::test]
    async fn gene_list_is_capped_but_count_is_true() {
        let mapper = GeneMapper::new("sce");
        let record = pathway(&["2.5.1.32"]);

        let coverage = mapper.map_genes(&ManyGenesStub, &record).await.unwrap();

        assert_eq!(coverage[0].gene_count, 60);
        assert_eq!(coverage[0].genes.len(), GENE_LIST_CAP);
    }
}
