use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{LineEntry, LineTable, RawTable};
use crate::config::BadIntensity;
use crate::error::{LineListError, Result};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());
static STRENGTH_CODES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z!@#$%^&*]").unwrap());

/// Strength code of a raw intensity: everything but the digits, trimmed.
pub fn strength_code(raw: &str) -> String {
    DIGITS.replace_all(raw, "").trim().to_string()
}

/// Raw intensity with letters and `!@#$%^&*` removed, trimmed.
pub fn intensity_digits(raw: &str) -> String {
    STRENGTH_CODES.replace_all(raw, "").trim().to_string()
}

/// Integer part of a raw intensity, if what is left after removing strength
/// codes is an integer.
pub fn numeric_intensity(raw: &str) -> Option<i64> {
    intensity_digits(raw).parse().ok()
}

/// Turn the stacked raw table into the final six-column line table.
///
/// Both extractions read the original intensity string, so `"12p34"` gives
/// strength `"p"` and intensity `1234`.
pub fn normalize(raw: RawTable, policy: BadIntensity) -> Result<LineTable> {
    let source_name = raw.source_name();
    let mut entries = Vec::with_capacity(raw.len());

    for (row, line) in raw.rows.into_iter().enumerate() {
        let Some(intensity) = numeric_intensity(&line.intensity) else {
            match policy {
                BadIntensity::Fail => {
                    return Err(LineListError::Transform {
                        source_name,
                        row,
                        raw: line.intensity,
                    })
                }
                BadIntensity::Skip => {
                    warn!("Skipping row {row}: intensity '{}' has no integer part", line.intensity);
                    continue;
                }
            }
        };

        entries.push(LineEntry {
            element: line.element,
            wavelength: line.wavelength,
            intensity,
            strength: strength_code(&line.intensity),
            on: true,
            reference: line.reference,
        });
    }

    Ok(LineTable::from_entries(entries))
}
