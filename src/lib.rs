//! mineralmap - Pure-Rust Excel-to-interactive-map converter for mineral specimen collections
//!
//! This crate reads a spreadsheet of mineral specimens, validates user-selected
//! coordinate/name/description columns, and emits a standalone interactive HTML
//! map (Leaflet-based) with one marker per row.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mineralmap::{MapGeneratorBuilder, MapSession};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Session state: loaded table, column choices, zoom, output folder
//!     let mut session = MapSession::new();
//!     session.load_file("specimens.xlsx")?;
//!
//!     // Column choices are drawn from the loaded file's columns
//!     println!("available columns: {:?}", session.column_names());
//!     session.set_coordinate_column(Some("Coords".to_string()));
//!     session.set_name_column(Some("Name".to_string()));
//!     session.set_description_column(Some("Desc".to_string()));
//!     session.set_output_folder(Some("/tmp/maps".into()));
//!
//!     // Validate everything and write mineral_collection_map.html
//!     let generator = MapGeneratorBuilder::new().build()?;
//!     let path = generator.generate(&session)?;
//!     println!("Interactive map created successfully at {}", path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory input, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use mineralmap::MapSession;
//!
//! # fn main() -> Result<(), mineralmap::MineralMapError> {
//! let mut session = MapSession::new();
//! let excel_data: Vec<u8> = vec![]; // Your Excel file bytes
//! session.load_reader(Cursor::new(excel_data))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Render Without Touching the Filesystem
//!
//! ```rust,no_run
//! use mineralmap::{MapGeneratorBuilder, MapSession};
//!
//! # fn main() -> Result<(), mineralmap::MineralMapError> {
//! # let session = MapSession::new();
//! let generator = MapGeneratorBuilder::new().build()?;
//! let html = generator.generate_to_string(&session)?;
//! println!("{}", html);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Taxonomy
//!
//! Every failure surfaces as a [`MineralMapError`] variant, so a form layer can
//! distinguish user-correctable input problems (missing column selection, bad
//! coordinate format) from environmental failures (I/O errors) with
//! [`MineralMapError::is_user_correctable`]. Row validation is fail-fast: the
//! first malformed coordinate cell aborts the whole generation, and no partial
//! map file is ever written.

mod api;
mod builder;
mod error;
mod map;
mod session;
mod table;
mod types;
mod validator;

// 公開API
pub use api::TileProvider;
pub use builder::{MapGenerator, MapGeneratorBuilder};
pub use error::MineralMapError;
pub use map::{MapDocument, MAP_FILE_NAME};
pub use session::{MapSession, DEFAULT_ZOOM_TEXT};
pub use table::{LoadLimits, SpecimenTable};
pub use types::{parse_coordinate, CellValue, ColumnSelection, MarkerRecord};
pub use validator::{build_markers, MapRequest};
