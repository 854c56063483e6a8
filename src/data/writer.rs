use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use super::model::{LineEntry, LineTable, FINAL_COLUMNS};
use crate::error::{LineListError, Result};

/// Write `table` to `<location>/<table_name>`, creating `location` if needed
/// and replacing any existing file.
pub fn save_table(location: &Path, table_name: &str, table: &LineTable) -> Result<PathBuf> {
    let path = location.join(table_name);
    std::fs::create_dir_all(location).map_err(|e| write_error(&path, e))?;

    let file = std::fs::File::create(&path).map_err(|e| write_error(&path, e))?;
    write_records(file, table).map_err(|e| write_error(&path, e))?;

    info!("Wrote {} lines to {}", table.len(), path.display());
    Ok(path)
}

/// Serialize `table` as CSV with a header row.
pub fn write_table<W: Write>(out: W, table: &LineTable) -> Result<()> {
    write_records(out, table).map_err(|e| write_error(Path::new("<stream>"), e))
}

fn write_records<W: Write>(out: W, table: &LineTable) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);

    // Header goes out even for an empty table.
    writer.write_record(FINAL_COLUMNS)?;
    for entry in &table.entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a combined CSV back into a [`LineTable`].
pub fn read_table(path: &Path) -> Result<LineTable> {
    let read_error = |reason: String| LineListError::Read {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(e.to_string()))?;
    let headers = reader.headers().map_err(|e| read_error(e.to_string()))?;
    if headers.iter().ne(FINAL_COLUMNS) {
        return Err(read_error(format!(
            "expected header {}, found {}",
            FINAL_COLUMNS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let entries = reader
        .deserialize::<LineEntry>()
        .enumerate()
        .map(|(row, result)| result.map_err(|e| read_error(format!("row {row}: {e}"))))
        .collect::<Result<Vec<_>>>()?;

    Ok(LineTable::from_entries(entries))
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> LineListError {
    LineListError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
