//! Pathway resolution service
//!
//! Turns a product query (or an explicit compound id) into a parsed
//! compound record plus the pathway record to evaluate against.

use crate::error::{PipelineError, PipelineResult};
use crate::extractors::parse_pair_lines;
use crate::models::{CompoundRecord, MatchConfidence, PathwayRecord};
use crate::services::kegg_client::KnowledgeBase;
use tracing::{debug, info};

/// Result of pathway resolution
#[derive(Debug, Clone)]
pub struct ResolvedPathway {
    pub compound: CompoundRecord,
    pub compound_confidence: MatchConfidence,
    pub pathway: PathwayRecord,
    /// Raw compound record text (dumped by the sink)
    pub compound_raw: String,
    /// Raw pathway record text (dumped by the sink)
    pub pathway_raw: String,
}

/// Resolve the compound and pathway for a product query.
///
/// An explicit compound id skips the search entirely; otherwise the
/// compound database is searched for `product_query` and the best hit is
/// chosen. Both identifiers are namespace-normalized before fetching.
pub async fn resolve<K: KnowledgeBase>(
    kb: &K,
    product_query: &str,
    explicit_compound: Option<&str>,
    pathway_id: &str,
) -> PipelineResult<ResolvedPathway> {
    let (compound_id, compound_confidence) = match explicit_compound {
        Some(id) => (normalize_compound_id(id), MatchConfidence::Explicit),
        None => {
            let find_text = kb.find("compound", product_query).await?;
            let hits = parse_pair_lines(&find_text);
            debug!(query = %product_query, hits = hits.len(), "Compound search complete");

            let (id, confidence) =
                choose_best_compound(product_query, &hits).ok_or_else(|| {
                    PipelineError::NoCompoundMatch {
                        query: product_query.to_string(),
                    }
                })?;
            (normalize_compound_id(id), confidence)
        }
    };

    let pathway_id = normalize_pathway_id(pathway_id);

    info!(
        compound = %compound_id,
        confidence = compound_confidence.as_str(),
        pathway = %pathway_id,
        "Resolved identifiers"
    );

    let compound_raw = kb.get(&compound_id).await?;
    let pathway_raw = kb.get(&pathway_id).await?;

    let compound = CompoundRecord::from_flat_record(compound_id, &compound_raw);
    let pathway = PathwayRecord::from_flat_record(pathway_id, &pathway_raw);

    info!(
        pathway_name = %pathway.name,
        aliases = compound.names.len(),
        enzyme_lines = pathway.enzyme_lines.len(),
        "Fetched and parsed records"
    );

    Ok(ResolvedPathway {
        compound,
        compound_confidence,
        pathway,
        compound_raw,
        pathway_raw,
    })
}

/// Pick the best compound hit for a query.
///
/// Preference order: first hit whose description contains the query as a
/// case-insensitive whole word, else the first hit with degraded
/// confidence. `None` only when there are no hits at all.
pub fn choose_best_compound<'a>(
    query: &str,
    hits: &'a [(String, String)],
) -> Option<(&'a str, MatchConfidence)> {
    for (id, description) in hits {
        if contains_whole_word(description, query) {
            return Some((id.as_str(), MatchConfidence::WholeWord));
        }
    }
    hits.first()
        .map(|(id, _)| (id.as_str(), MatchConfidence::FirstHit))
}

/// Add the compound namespace prefix when missing; idempotent
pub fn normalize_compound_id(id: &str) -> String {
    let id = id.trim();
    if id.starts_with('C') && !id.starts_with("cpd:") {
        format!("cpd:{}", id)
    } else {
        id.to_string()
    }
}

/// Add the pathway namespace prefix when missing; idempotent.
///
/// Accepts `path:map00906`, `map00906`, and the bare numeric form
/// `00906`-style ids starting with `009`.
pub fn normalize_pathway_id(id: &str) -> String {
    let id = id.trim();
    if id.starts_with("path:") {
        id.to_string()
    } else if id.starts_with("map") {
        format!("path:{}", id)
    } else if id.starts_with("009") {
        format!("path:map{}", id)
    } else {
        id.to_string()
    }
}

/// Case-insensitive whole-word containment; word characters are
/// alphanumerics and underscore
fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(&needle) {
        let begin = search_from + offset;
        let end = begin + needle.len();

        let before_ok = haystack[..begin].chars().next_back().map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..].chars().next().map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }

        // Advance one character, staying on a UTF-8 boundary
        search_from = begin
            + haystack[begin..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
