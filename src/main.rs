//! # nist-linelist
//!
//! Combine the NIST line list exports in a directory into one CSV table.
//!
//! ```bash
//! # Defaults: data/line_lists/NIST/*.txt → data/line_lists/NIST/NIST_combined.csv
//! nist-linelist
//!
//! # Explicit paths
//! nist-linelist build --input-dir lines --output-dir out
//!
//! # Summarize a combined table
//! nist-linelist inspect out/NIST_combined.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use nist_linelist::config::{BadIntensity, PipelineConfig};
use nist_linelist::data::writer::read_table;
use nist_linelist::pipeline;

#[derive(Parser)]
#[command(name = "nist-linelist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML config file with a [pipeline] table
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the combined table (the default)
    Build(BuildArgs),

    /// Read a combined table back and summarize it
    Inspect {
        #[arg(value_name = "CSV")]
        path: PathBuf,
    },
}

#[derive(Args, Default)]
struct BuildArgs {
    /// Directory holding the line list files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory to write the combined table to (defaults to the input directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// File name of the combined table
    #[arg(short = 'n', long)]
    output_name: Option<String>,

    /// Extension of the files to pick up
    #[arg(short, long)]
    extension: Option<String>,

    /// Reject non-finite or non-positive wavelengths in fixed-width files
    /// (`--strict-wavelength false` turns a config file's setting off)
    #[arg(
        long,
        value_name = "BOOL",
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    strict_wavelength: Option<bool>,

    /// What to do with rows whose intensity has no integer part
    #[arg(long, value_enum)]
    on_bad_intensity: Option<BadIntensity>,

    /// Build and report without writing
    #[arg(long)]
    dry_run: bool,
}

impl BuildArgs {
    /// Apply flags given on the command line over `config`.
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if let Some(name) = &self.output_name {
            config.output_name = name.clone();
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(strict) = self.strict_wavelength {
            config.strict_wavelength = strict;
        }
        if let Some(policy) = self.on_bad_intensity {
            config.on_bad_intensity = policy;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    match cli.command.unwrap_or(Commands::Build(BuildArgs::default())) {
        Commands::Build(args) => {
            args.apply(&mut config);
            let summary = pipeline::run(&config, args.dry_run).with_context(|| {
                format!("building line table from {}", config.input_dir.display())
            })?;
            match &summary.output {
                Some(path) => println!(
                    "Wrote {} lines from {} files to {}",
                    summary.lines,
                    summary.files,
                    path.display()
                ),
                None => println!(
                    "Parsed {} lines from {} files (dry run)",
                    summary.lines, summary.files
                ),
            }
        }
        Commands::Inspect { path } => {
            let table = read_table(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            info!("Read {} lines from {}", table.len(), path.display());
            println!("lines:    {}", table.len());
            println!("elements: {}", table.element_count());
            match table.wavelength_range() {
                Some((lo, hi)) => println!("range:    {lo} – {hi}"),
                None => println!("range:    (empty)"),
            }
        }
    }

    Ok(())
}
