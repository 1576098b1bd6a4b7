//! Enzyme Commission code normalization
//!
//! Normalizes ENZYME section tokens into a deduplicated, sorted set.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A normalized Enzyme Commission number: four dot-separated numeric
/// segments, e.g. `1.3.99.31`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EcCode(String);

impl EcCode {
    /// Parse a single token into a normalized EC code.
    ///
    /// Strips a leading `EC:` marker, then requires exactly four
    /// dot-separated segments of ASCII digits. Anything else (partial
    /// codes like `1.3.99.-`, reaction ids, free text) yields `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let token = token.strip_prefix("EC:").unwrap_or(token);

        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 4 {
            return None;
        }
        for segment in &segments {
            if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
        }

        Some(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the deduplicated, sorted EC code set from raw ENZYME section
/// lines.
///
/// Lines are whitespace-tokenized; tokens that do not normalize to a
/// four-segment numeric code are skipped rather than reported. The result
/// is order-independent with respect to the input lines.
pub fn extract_ec_codes(enzyme_lines: &[String]) -> Vec<EcCode> {
    let set: BTreeSet<EcCode> = enzyme_lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .filter_map(EcCode::parse)
        .collect();
    set.into_iter().collect()
}
