//! # widgetmap
//!
//! Maps the widget annotations on a PDF page to the interactive form fields
//! that own them, and orders the results by position on the page.
//!
//! ## Features
//!
//! - **Field Enumeration**: Walks the `/AcroForm` field tree with inheritance of `/FT`, `/Ff` and `/V`
//! - **Widget Matching**: Resolves each widget by its own reference or through `/Parent`
//! - **Checkbox Ordering**: Bottom-up, left-to-right order with a row tolerance
//! - **Row Clustering**: Groups text fields into visual rows, top of the page first
//! - **Field Location**: Finds the page holding a named field
//! - **Synthetic Graphs**: Every operation also runs on an in-memory object graph
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use widgetmap::{report, FormDocument, PageSelection, ROW_CLUSTER_THRESHOLD};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = FormDocument::open("application.pdf")?;
//! let mut out = std::io::stdout();
//!
//! for scan in doc.scan(PageSelection::First)? {
//!     let rows = doc.text_rows(&scan, ROW_CLUSTER_THRESHOLD);
//!     report::write_text_rows(&mut out, &scan.page, &rows)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Coordinates
//!
//! Positions are the lower-left corner of a widget's `/Rect` in default user
//! space: origin at the bottom-left of the page, y growing upwards. Rectangles
//! are taken as written and not normalised.

pub mod document;
pub mod error;
pub mod forms;
pub mod graph;
pub mod layout;
pub mod matcher;
pub mod objects;
pub mod report;

pub use document::{FormDocument, ParsedFormDocument};
pub use error::{FieldValueError, Result, WidgetMapError};
pub use forms::{FieldFlags, FieldKind, FormField, Widget, TEXT_READ_PLACEHOLDER};
pub use graph::{MemoryGraph, ObjectGraph, PageInfo, ParsedGraph};
pub use layout::{
    cluster_rows, compare_bottom_up, sort_bottom_up, Positioned, ROW_CLUSTER_THRESHOLD,
    ROW_TOLERANCE,
};
pub use matcher::{
    Candidate, FieldFilter, FieldLocation, MatchRoute, PageScan, PageSelection, ReferenceIndex,
    SkipStats, WidgetMatch,
};
pub use objects::{ObjectRef, Rect};

/// Current version of widgetmap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
