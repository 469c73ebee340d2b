//! # sheetport-core
//!
//! The spreadsheet helper pipeline: import a `.csv`/`.xlsx` file, normalize
//! its keys, search, sort and group it, export it back out and keep one saved
//! snapshot of it.
//!
//! This crate provides:
//! - The data model ([`Field`], [`Row`], [`Dataset`])
//! - Import and export adapters on top of `sheetport-sheet`
//! - Key normalization, filtering, sorting and grouping
//! - Snapshot persistence behind a [`Storage`] trait
//! - The owned [`Workspace`] tying the steps together
//!
//! ```
//! use sheetport_core::{
//!     import_bytes, normalize, FileFormat, ImportOptions, KeyMode, MatchMode, Predicate,
//!     Workspace,
//! };
//!
//! let raw = import_bytes(FileFormat::Csv, b"name,age\nA,10\nB,20\n", &ImportOptions::default())
//!     .unwrap();
//! let mut workspace = Workspace::with_mode(MatchMode::Fuzzy);
//! workspace.load(normalize(raw, &KeyMode::Default).unwrap());
//!
//! let predicate: Predicate = [("name".to_string(), "a".to_string())].into_iter().collect();
//! assert_eq!(workspace.search(&predicate).unwrap().ids(), vec![1]);
//! ```

/// Ordering of canonical cell text.
pub mod collation;
/// YAML settings.
pub mod config;
/// Error types and result aliases.
pub mod error;
/// Export plans and encoders.
pub mod export;
/// Search predicates.
pub mod filter;
/// Accepted file containers.
pub mod format;
/// Grouping by field value.
pub mod group;
/// File decoding.
pub mod import;
/// Fields, rows and datasets.
pub mod model;
/// Key normalization.
pub mod normalize;
/// Snapshot persistence.
pub mod persist;
/// Stable sorting.
pub mod sort;
/// The owned pipeline context.
pub mod workspace;

pub use collation::compare_text;
pub use config::HelperConfig;
pub use error::{HelperError, Result};
pub use export::{
    encode_dataset, export_dataset, run_plan, sanitize_file_stem, ExportOptions, ExportPlan,
    ExportReport, GroupSelection,
};
pub use filter::{apply_filter, MatchMode, Predicate};
pub use format::FileFormat;
pub use group::{group_by, Groups};
pub use import::{import_bytes, import_file, ImportOptions};
pub use model::{field_text, find_field, Dataset, Field, Row, ID_FIELD};
pub use normalize::{normalize, KeyMode, Normalized};
pub use persist::{FileStorage, MemoryStorage, Persistence, Snapshot, Storage, DEFAULT_STORAGE_KEY};
pub use sort::{apply_sort, SortDirection};
pub use workspace::Workspace;

/// Re-export the cell value type rows are built from.
pub use sheetport_sheet::CellValue;
