use log::debug;

use super::model::RawTable;
use crate::error::{LineListError, Result};

/// Stack per-file tables into one, keeping file order and row order.
///
/// Every table must carry the same columns as the first one.
pub fn stack_tables(tables: Vec<RawTable>) -> Result<RawTable> {
    let mut tables = tables.into_iter();
    let mut stacked = tables.next().ok_or(LineListError::EmptyInput)?;
    stacked.source = None;

    for table in tables {
        if table.columns != stacked.columns {
            return Err(LineListError::SchemaMismatch {
                source_name: table.source_name(),
                expected: stacked.columns.clone(),
                found: table.columns,
            });
        }
        stacked.rows.extend(table.rows);
    }

    debug!("Stacked {} lines", stacked.len());
    Ok(stacked)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::data::model::RawLine;

    fn table(name: &str, n: usize) -> RawTable {
        let rows = (0..n)
            .map(|i| RawLine {
                intensity: i.to_string(),
                wavelength: 100.0 + i as f64,
                element: name.to_string(),
                reference: "ref".to_string(),
            })
            .collect();
        RawTable::new(Some(Path::new(name)), rows)
    }

    #[test]
    fn row_counts_add_up_in_order() {
        let stacked = stack_tables(vec![table("first", 5), table("second", 7)]).unwrap();
        assert_eq!(stacked.len(), 12);
        assert!(stacked.rows[..5].iter().all(|r| r.element == "first"));
        assert!(stacked.rows[5..].iter().all(|r| r.element == "second"));
        assert_eq!(stacked.rows[5].intensity, "0");
    }

    #[test]
    fn duplicates_are_kept() {
        let stacked = stack_tables(vec![table("same", 2), table("same", 2)]).unwrap();
        assert_eq!(stacked.len(), 4);
        assert_eq!(stacked.rows[0], stacked.rows[2]);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(stack_tables(Vec::new()), Err(LineListError::EmptyInput)));
    }

    #[test]
    fn column_mismatch_fails() {
        let mut odd = table("odd", 1);
        odd.columns.pop();
        let err = stack_tables(vec![table("ok", 1), odd]).unwrap_err();
        assert!(matches!(err, LineListError::SchemaMismatch { .. }));
    }
}
