//! Supported market indices
//!
//! The dashboard offers a fixed, closed set of Indian benchmark indices.
//! Labels are what users pick; symbols are what the market-data provider expects.

use serde::Serialize;

/// A selectable index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub label: &'static str,
    pub symbol: &'static str,
}

const INDICES: [IndexEntry; 3] = [
    IndexEntry {
        label: "NIFTY 50",
        symbol: "^NSEI",
    },
    IndexEntry {
        label: "SENSEX",
        symbol: "^BSESN",
    },
    IndexEntry {
        label: "BANK NIFTY",
        symbol: "^NSEBANK",
    },
];

/// All indices in display order
pub fn all() -> &'static [IndexEntry] {
    &INDICES
}

/// Look up an index by its exact label
pub fn find_by_label(label: &str) -> Option<IndexEntry> {
    INDICES.iter().copied().find(|entry| entry.label == label)
}

/// Index shown when nothing has been selected yet
pub fn default_entry() -> IndexEntry {
    INDICES[0]
}
