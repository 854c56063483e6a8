/// Data layer: line list types, parsing, stacking, normalization, output.
///
/// Architecture:
/// ```text
///  data/line_lists/NIST/*.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  discover files, parse each → RawTable
///   └──────────┘   (delimited, else fixed-width 13/14/13/16)
///        │
///        ▼
///   ┌──────────┐
///   │  merge    │  stack RawTables in file order
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  Intensity → (Intensity, Strength), add On
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  LineTable → NIST_combined.csv
///   └──────────┘
/// ```

pub mod loader;
pub mod merge;
pub mod model;
pub mod transform;
pub mod writer;
