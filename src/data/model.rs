use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Column names of a freshly parsed line list file, in file order.
pub const RAW_COLUMNS: [&str; 4] = ["Intensity", "Wavelength", "Element", "Reference"];

/// Column names of the combined table, in output order.
pub const FINAL_COLUMNS: [&str; 6] = [
    "Element",
    "Wavelength",
    "Intensity",
    "Strength",
    "On",
    "Reference",
];

// ---------------------------------------------------------------------------
// RawLine / RawTable – one parsed input file
// ---------------------------------------------------------------------------

/// A single line as it appears in a NIST export, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    /// Composite intensity, e.g. `"10p"` or `"250bl"`.
    pub intensity: String,
    pub wavelength: f64,
    pub element: String,
    pub reference: String,
}

/// Rows of one input file together with the schema they were read with.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// File the rows came from (None for tables built in memory).
    pub source: Option<PathBuf>,
    pub columns: Vec<String>,
    pub rows: Vec<RawLine>,
}

impl RawTable {
    /// Build a table with the standard four-column raw schema.
    pub fn new(source: Option<&Path>, rows: Vec<RawLine>) -> Self {
        RawTable {
            source: source.map(Path::to_path_buf),
            columns: RAW_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Human readable origin used in log and error messages.
    pub fn source_name(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "<combined>".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LineEntry – one row of the combined table
// ---------------------------------------------------------------------------

/// A normalized spectral line. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEntry {
    #[serde(rename = "Element")]
    pub element: String,
    #[serde(rename = "Wavelength")]
    pub wavelength: f64,
    /// Numeric part of the raw intensity.
    #[serde(rename = "Intensity")]
    pub intensity: i64,
    /// Letters and symbols of the raw intensity, e.g. `"bl"`. May be empty.
    #[serde(rename = "Strength")]
    pub strength: String,
    /// Inclusion switch for downstream consumers; always `true` on output.
    /// Written as `True`/`False`.
    #[serde(rename = "On", with = "capitalized_bool")]
    pub on: bool,
    #[serde(rename = "Reference")]
    pub reference: String,
}

/// `True`/`False` on output; accepts either casing and `1`/`0` on input.
mod capitalized_bool {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.trim() {
            "True" | "true" | "1" => Ok(true),
            "False" | "false" | "0" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected True or False, found '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// LineTable – the combined dataset
// ---------------------------------------------------------------------------

/// The combined, normalized line list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTable {
    pub entries: Vec<LineEntry>,
}

impl LineTable {
    pub fn from_entries(entries: Vec<LineEntry>) -> Self {
        LineTable { entries }
    }

    /// Output column names, in order.
    pub fn column_names(&self) -> Vec<&'static str> {
        FINAL_COLUMNS.to_vec()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest and largest wavelength, or None for an empty table.
    pub fn wavelength_range(&self) -> Option<(f64, f64)> {
        self.entries.iter().map(|e| e.wavelength).fold(None, |acc, w| match acc {
            None => Some((w, w)),
            Some((lo, hi)) => Some((lo.min(w), hi.max(w))),
        })
    }

    /// Number of distinct element labels.
    pub fn element_count(&self) -> usize {
        let mut elements: Vec<&str> = self.entries.iter().map(|e| e.element.as_str()).collect();
        elements.sort_unstable();
        elements.dedup();
        elements.len()
    }
}
