//! Combine NIST atomic line list exports into one normalized CSV table.
//!
//! Each `*.txt` export is parsed as a delimited four-column table
//! (Intensity, Wavelength, Element, Reference), falling back to fixed-width
//! columns when that fails. The tables are stacked, the composite intensity
//! is split into an integer `Intensity` and a `Strength` code, an `On` flag
//! is added, and the result is written as
//! `Element,Wavelength,Intensity,Strength,On,Reference`.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::{BadIntensity, PipelineConfig};
pub use error::LineListError;
pub use pipeline::{build_table, run, BuildSummary};
