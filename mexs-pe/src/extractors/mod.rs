//! Text extractors for knowledge-base response shapes

pub mod flat_record;

pub use flat_record::{parse_pair_lines, parse_section};
