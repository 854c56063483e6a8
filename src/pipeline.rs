//! End-to-end build of the combined NIST line table.

use std::path::PathBuf;

use log::info;

use crate::config::PipelineConfig;
use crate::data::loader::{discover_files, parse_file};
use crate::data::merge::stack_tables;
use crate::data::model::LineTable;
use crate::data::transform::normalize;
use crate::data::writer::save_table;
use crate::error::Result;

/// What a build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub files: usize,
    pub lines: usize,
    /// Where the table was written; None on a dry run.
    pub output: Option<PathBuf>,
}

/// Discover, parse, stack and normalize every line list in the input
/// directory. Nothing is written.
pub fn build_table(config: &PipelineConfig) -> Result<(LineTable, usize)> {
    let files = discover_files(&config.input_dir, &config.extension)?;

    let tables = files
        .iter()
        .map(|path| parse_file(path, config.strict_wavelength))
        .collect::<Result<Vec<_>>>()?;

    let stacked = stack_tables(tables)?;
    let table = normalize(stacked, config.on_bad_intensity)?;
    info!(
        "Built line table: {} lines from {} files",
        table.len(),
        files.len()
    );
    Ok((table, files.len()))
}

/// Build the table and, unless `dry_run`, write it to the configured path.
pub fn run(config: &PipelineConfig, dry_run: bool) -> Result<BuildSummary> {
    let (table, files) = build_table(config)?;

    let output = if dry_run {
        info!("Dry run: not writing {}", config.output_path().display());
        None
    } else {
        Some(save_table(config.output_dir(), &config.output_name, &table)?)
    };

    Ok(BuildSummary {
        files,
        lines: table.len(),
        output,
    })
}
