use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{RawLine, RawTable};
use crate::error::{LineListError, Result};

/// Column widths of the fixed-width NIST layout:
/// Intensity, Wavelength, Element, Reference.
pub const FIXED_WIDTHS: [usize; 4] = [13, 14, 13, 16];

/// A double-quoted field or a run of non-whitespace.
static WHITESPACE_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r#""[^"]*"|\S+"#).unwrap());

// ---------------------------------------------------------------------------
// File discovery
// ---------------------------------------------------------------------------

/// List every file in `dir` whose extension is exactly `extension`,
/// sorted by path.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let discovery_error = |reason: String| LineListError::Discovery {
        dir: dir.to_path_buf(),
        reason,
    };

    let entries = std::fs::read_dir(dir).map_err(|e| discovery_error(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| discovery_error(e.to_string()))?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == extension);
        if matches && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(discovery_error(format!("no *.{extension} files")));
    }

    files.sort();
    debug!("Discovered {} line list files in {}", files.len(), dir.display());
    Ok(files)
}

// ---------------------------------------------------------------------------
// Per-file parsing
// ---------------------------------------------------------------------------

/// Result of trying both parse strategies on one file.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The delimited strategy succeeded.
    Delimited(RawTable),
    /// The delimited strategy failed and fixed-width slicing succeeded.
    FallbackUsed {
        table: RawTable,
        delimited_error: String,
    },
    /// Both strategies failed.
    Failed {
        delimited_error: String,
        fixed_width_error: String,
    },
}

impl ParseOutcome {
    /// Collapse the outcome into a table, turning `Failed` into a fatal error.
    pub fn into_table(self, path: &Path) -> Result<RawTable> {
        match self {
            ParseOutcome::Delimited(table) => Ok(table),
            ParseOutcome::FallbackUsed { table, .. } => Ok(table),
            ParseOutcome::Failed {
                delimited_error,
                fixed_width_error,
            } => Err(LineListError::Parse {
                path: path.to_path_buf(),
                delimited: delimited_error,
                fixed_width: fixed_width_error,
            }),
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, ParseOutcome::FallbackUsed { .. })
    }
}

/// Read and parse one line list file.
///
/// `strict_wavelength` rejects non-finite or non-positive wavelengths in
/// the fixed-width fallback.
pub fn parse_file(path: &Path, strict_wavelength: bool) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|e| LineListError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let text = decode_text(bytes);

    let outcome = parse_text(&text, Some(path), strict_wavelength);
    match &outcome {
        ParseOutcome::Delimited(table) => {
            info!("Parsed {} lines from {} (delimited)", table.len(), path.display());
        }
        ParseOutcome::FallbackUsed {
            table,
            delimited_error,
        } => {
            debug!("Delimited parse of {} failed: {delimited_error}", path.display());
            info!("Parsed {} lines from {} (fixed-width)", table.len(), path.display());
        }
        ParseOutcome::Failed { .. } => {
            warn!("Neither strategy could parse {}", path.display());
        }
    }
    outcome.into_table(path)
}

/// UTF-8 when valid, otherwise Latin-1 (every byte maps to one char).
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("Input is not UTF-8, decoding as Latin-1");
            e.into_bytes().iter().map(|&b| char::from(b)).collect()
        }
    }
}

/// Try the delimited layout first, then fixed-width columns.
pub fn parse_text(text: &str, source: Option<&Path>, strict_wavelength: bool) -> ParseOutcome {
    let delimited_error = match parse_delimited(text) {
        Ok(rows) => return ParseOutcome::Delimited(RawTable::new(source, rows)),
        Err(e) => e,
    };

    match parse_fixed_width(text, strict_wavelength) {
        Ok(rows) => ParseOutcome::FallbackUsed {
            table: RawTable::new(source, rows),
            delimited_error,
        },
        Err(fixed_width_error) => ParseOutcome::Failed {
            delimited_error,
            fixed_width_error,
        },
    }
}

/// Non-blank, non-comment lines with their 1-based line numbers.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            None
        } else {
            Some((i + 1, line))
        }
    })
}

fn parse_wavelength(s: &str, line_no: usize) -> std::result::Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("line {line_no}: wavelength '{}' is not a number", s.trim()))
}

/// Header-less four-column table, comma separated when the first data line
/// holds a comma and whitespace separated otherwise.
fn parse_delimited(text: &str) -> std::result::Result<Vec<RawLine>, String> {
    let lines: Vec<(usize, &str)> = data_lines(text).collect();
    let Some((_, first)) = lines.first() else {
        return Ok(Vec::new());
    };

    let fields: Vec<(usize, Vec<String>)> = if first.contains(',') {
        split_commas(&lines)?
    } else {
        lines
            .iter()
            .map(|(no, line)| (*no, split_whitespace_fields(line)))
            .collect()
    };

    fields
        .into_iter()
        .map(|(line_no, f)| {
            if f.len() != 4 {
                return Err(format!("line {line_no}: expected 4 columns, found {}", f.len()));
            }
            let mut f = f.into_iter();
            let intensity = f.next().unwrap_or_default();
            let wavelength = parse_wavelength(&f.next().unwrap_or_default(), line_no)?;
            Ok(RawLine {
                intensity,
                wavelength,
                element: f.next().unwrap_or_default(),
                reference: f.next().unwrap_or_default(),
            })
        })
        .collect()
}

/// Whitespace separated fields; a double-quoted field may hold spaces and
/// loses its quotes.
fn split_whitespace_fields(line: &str) -> Vec<String> {
    WHITESPACE_FIELD
        .find_iter(line)
        .map(|m| {
            let field = m.as_str();
            match field.strip_prefix('"').and_then(|f| f.strip_suffix('"')) {
                Some(inner) if field.len() >= 2 => inner.to_string(),
                _ => field.to_string(),
            }
        })
        .collect()
}

fn split_commas(lines: &[(usize, &str)]) -> std::result::Result<Vec<(usize, Vec<String>)>, String> {
    let joined = lines.iter().map(|(_, l)| *l).collect::<Vec<_>>().join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    reader
        .records()
        .zip(lines)
        .map(|(record, (line_no, _))| {
            let record = record.map_err(|e| format!("line {line_no}: {e}"))?;
            Ok((*line_no, record.iter().map(str::to_string).collect()))
        })
        .collect()
}

/// Slice each line on [`FIXED_WIDTHS`] character boundaries.
fn parse_fixed_width(text: &str, strict_wavelength: bool) -> std::result::Result<Vec<RawLine>, String> {
    data_lines(text)
        .map(|(line_no, line)| {
            let [intensity, wavelength, element, reference] = slice_fixed_width(line);
            let wavelength = parse_wavelength(&wavelength, line_no)?;
            if strict_wavelength && !(wavelength.is_finite() && wavelength > 0.0) {
                return Err(format!(
                    "line {line_no}: wavelength {wavelength} is not a finite positive number"
                ));
            }
            Ok(RawLine {
                intensity,
                wavelength,
                element,
                reference,
            })
        })
        .collect()
}

fn slice_fixed_width(line: &str) -> [String; 4] {
    let chars: Vec<char> = line.chars().collect();
    let mut start = 0;
    FIXED_WIDTHS.map(|width| {
        let from = start.min(chars.len());
        let to = (start + width).min(chars.len());
        start += width;
        chars[from..to].iter().collect::<String>().trim().to_string()
    })
}

/// Render a line in the fixed-width layout, left-aligned in each column.
pub fn format_fixed_width(line: &RawLine) -> String {
    let [w_int, w_wav, w_el, w_ref] = FIXED_WIDTHS;
    format!(
        "{:<w_int$}{:<w_wav$}{:<w_el$}{:<w_ref$}",
        line.intensity, line.wavelength, line.element, line.reference
    )
    .trim_end()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a_line() -> String {
        format!("{:<13}{:<14}{:<13}{:<16}", "3", "500.123", "Fe II", "Smith 1990")
    }

    #[test]
    fn whitespace_delimited() {
        let text = "10p 500.1 He Kramida\n# comment\n\n3 612.25 Ne Saloman\n";
        let outcome = parse_text(text, None, false);
        assert!(matches!(outcome, ParseOutcome::Delimited(_)));
        let table = outcome.into_table(Path::new("x.txt")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].intensity, "10p");
        assert_eq!(table.rows[1].wavelength, 612.25);
        assert_eq!(table.rows[1].reference, "Saloman");
    }

    #[test]
    fn quoted_whitespace_fields_stay_whole() {
        let outcome = parse_text("3 500.123 \"Fe II\" \"Smith 1990\"\n", None, false);
        assert!(matches!(outcome, ParseOutcome::Delimited(_)));
        let table = outcome.into_table(Path::new("fe.txt")).unwrap();
        assert_eq!(table.rows[0].intensity, "3");
        assert_eq!(table.rows[0].element, "Fe II");
        assert_eq!(table.rows[0].reference, "Smith 1990");
    }

    #[test]
    fn latin1_file_reaches_fixed_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fe.txt");
        let mut bytes = format!("{:<13}{:<14}{:<13}", "3", "500.123", "Fe II").into_bytes();
        bytes.extend_from_slice(b"Ang\xe5str\xf6m 90\n");
        std::fs::write(&path, bytes).unwrap();

        let table = parse_file(&path, false).unwrap();
        assert_eq!(table.rows[0].element, "Fe II");
        assert_eq!(table.rows[0].reference, "Ang\u{e5}str\u{f6}m 90");
    }

    #[test]
    fn utf8_text_decodes_unchanged() {
        assert_eq!(decode_text("Ångström".as_bytes().to_vec()), "Ångström");
    }

    #[test]
    fn comma_delimited_keeps_inner_spaces() {
        let text = "25bl, 486.135, H I, Wiese 2009\n\"5\",434.047,H I,\"Wiese, Fuhr\"\n";
        let outcome = parse_text(text, None, false);
        assert!(matches!(outcome, ParseOutcome::Delimited(_)));
        let table = outcome.into_table(Path::new("h.txt")).unwrap();
        assert_eq!(table.rows[0].element, "H I");
        assert_eq!(table.rows[0].reference, "Wiese 2009");
        assert_eq!(table.rows[1].reference, "Wiese, Fuhr");
    }

    #[test]
    fn fixed_width_fallback_for_scenario_a() {
        let outcome = parse_text(&scenario_a_line(), None, false);
        assert!(outcome.used_fallback());
        let table = outcome.into_table(Path::new("fe.txt")).unwrap();
        assert_eq!(
            table.rows,
            vec![RawLine {
                intensity: "3".to_string(),
                wavelength: 500.123,
                element: "Fe II".to_string(),
                reference: "Smith 1990".to_string(),
            }]
        );
    }

    #[test]
    fn short_fixed_width_line_yields_empty_fields() {
        let line = format!("{:<13}{:<14}{}", "7", "250.5", "Ar");
        let table = parse_text(&line, None, false)
            .into_table(Path::new("ar.txt"))
            .unwrap();
        assert_eq!(table.rows[0].element, "Ar");
        assert_eq!(table.rows[0].reference, "");
    }

    #[test]
    fn both_strategies_failing_is_fatal() {
        let outcome = parse_text("garbage that is not a table at all", None, false);
        assert!(matches!(outcome, ParseOutcome::Failed { .. }));
        let err = outcome.into_table(Path::new("bad.txt")).unwrap_err();
        assert!(matches!(err, LineListError::Parse { .. }));
    }

    #[test]
    fn strict_wavelength_rejects_negative_fallback_rows() {
        let line = format!("{:<13}{:<14}{:<13}{:<16}", "3", "-12.5", "Fe II", "Smith 1990");
        assert!(parse_text(&line, None, false).used_fallback());
        assert!(matches!(
            parse_text(&line, None, true),
            ParseOutcome::Failed { .. }
        ));
    }

    #[test]
    fn empty_text_parses_to_empty_table() {
        let table = parse_text("\n# only a comment\n", None, false)
            .into_table(Path::new("empty.txt"))
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn format_fixed_width_reparses() {
        let line = RawLine {
            intensity: "40c".to_string(),
            wavelength: 656.279,
            element: "H I".to_string(),
            reference: "Wiese 2009".to_string(),
        };
        let text = format_fixed_width(&line);
        assert_eq!(&text[..13], "40c          ");
        assert_eq!(&text[13..27], "656.279       ");
        assert!(text.ends_with("Wiese 2009"));
        let table = parse_text(&text, None, false)
            .into_table(Path::new("h.txt"))
            .unwrap();
        assert_eq!(table.rows, vec![line]);
    }

    #[test]
    fn discovery_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::write(dir.path().join("C.TXT"), "").unwrap();
        std::fs::write(dir.path().join("notes.csv"), "").unwrap();

        let files = discover_files(dir.path(), "txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn discovery_fails_on_missing_or_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover_files(dir.path(), "txt"),
            Err(LineListError::Discovery { .. })
        ));
        assert!(matches!(
            discover_files(&dir.path().join("missing"), "txt"),
            Err(LineListError::Discovery { .. })
        ));
    }
}
