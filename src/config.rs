//! Pipeline configuration.
//!
//! Every setting has a default matching the conventional NIST data layout,
//! so a run without a config file or flags reads `data/line_lists/NIST/*.txt`
//! and writes `data/line_lists/NIST/NIST_combined.csv`. Settings can come from
//! a TOML file:
//!
//! ```toml
//! # nist-linelist.toml
//! [pipeline]
//! input_dir = "data/line_lists/NIST"
//! output_dir = "build"
//! output_name = "NIST_combined.csv"
//! extension = "txt"
//! strict_wavelength = false
//! on_bad_intensity = "fail"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LineListError, Result};

pub const DEFAULT_INPUT_DIR: &str = "data/line_lists/NIST";
pub const DEFAULT_OUTPUT_NAME: &str = "NIST_combined.csv";
pub const DEFAULT_EXTENSION: &str = "txt";

/// What to do with a row whose intensity has no integer part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BadIntensity {
    /// Abort the run.
    #[default]
    Fail,
    /// Drop the row with a warning.
    Skip,
}

/// Root of a config file.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Settings for one build of the combined table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory scanned for line list files.
    pub input_dir: PathBuf,
    /// Directory the combined table goes to; the input directory when unset.
    pub output_dir: Option<PathBuf>,
    pub output_name: String,
    /// File extension picked up by discovery, without the dot.
    pub extension: String,
    /// Reject non-finite or non-positive wavelengths in fixed-width files.
    pub strict_wavelength: bool,
    pub on_bad_intensity: BadIntensity,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: None,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            strict_wavelength: false,
            on_bad_intensity: BadIntensity::Fail,
        }
    }
}

impl PipelineConfig {
    /// Load the `[pipeline]` table of a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LineListError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse the `[pipeline]` table from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| LineListError::Config(e.to_string()))?;
        Ok(file.pipeline)
    }

    /// Directory the combined table is written to.
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    /// Full path of the combined table.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir().join(&self.output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_nist_layout() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.output_path(),
            PathBuf::from("data/line_lists/NIST/NIST_combined.csv")
        );
        assert_eq!(config.extension, "txt");
        assert_eq!(config.on_bad_intensity, BadIntensity::Fail);
        assert!(!config.strict_wavelength);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = PipelineConfig::from_toml(
            r#"
            [pipeline]
            input_dir = "lines"
            output_dir = "out"
            on_bad_intensity = "skip"
            "#,
        )
        .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("lines"));
        assert_eq!(config.output_path(), PathBuf::from("out/NIST_combined.csv"));
        assert_eq!(config.on_bad_intensity, BadIntensity::Skip);
        assert_eq!(config.output_name, DEFAULT_OUTPUT_NAME);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = PipelineConfig::from_toml("[pipeline]\non_bad_intensity = \"maybe\"").unwrap_err();
        assert!(matches!(err, LineListError::Config(_)));
    }
}
