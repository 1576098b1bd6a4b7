//! KEGG flat-record parsing
//!
//! Parses the two text shapes the knowledge base returns: labeled record
//! sections (`get`) and tab-separated pair lines (`find`, `link`).

use tracing::debug;

/// Scanner state for section extraction
enum ScanState {
    /// Looking for the requested section label
    Idle,
    /// Inside the section, consuming continuation lines
    Collecting,
}

/// Extract a named section from a flat record.
///
/// A section begins on the line whose prefix equals `section_label`; the
/// remainder of that line is the first item. Lines starting with a space
/// continue the section, one item each. The section ends at the first line
/// without the leading-space marker (even if it starts another section) or
/// at end of input. Only the first occurrence of the label is scanned.
///
/// Items are trimmed and empties dropped; an absent section yields an
/// empty vector.
pub fn parse_section(record_text: &str, section_label: &str) -> Vec<String> {
    let mut state = ScanState::Idle;
    let mut items = Vec::new();

    for line in record_text.lines() {
        match state {
            ScanState::Idle => {
                if let Some(rest) = line.strip_prefix(section_label) {
                    items.push(rest.trim().to_string());
                    state = ScanState::Collecting;
                }
            }
            ScanState::Collecting => {
                if line.starts_with(' ') {
                    items.push(line.trim().to_string());
                } else {
                    break;
                }
            }
        }
    }

    items.retain(|item| !item.is_empty());
    items
}

/// Parse tab-separated pair lines (`<a>\t<b>`) from `find`/`link` output.
///
/// Blank lines and lines without a tab are skipped. Extra tabs end up in
/// the second field, which matches the two-column shapes the knowledge
/// base documents.
pub fn parse_pair_lines(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((a, b)) => pairs.push((a.trim().to_string(), b.trim().to_string())),
            None => debug!(line = %line, "Skipping malformed pair line"),
        }
    }
    pairs
}
