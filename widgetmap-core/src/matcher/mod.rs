//! Widget-to-field matching.
//!
//! The flow mirrors how a form is laid out in the file: fields are indexed by
//! reference ([`ReferenceIndex`]), the selected pages are scanned annotation by
//! annotation ([`scan_page`]), and the surviving matches are filtered into
//! [`Candidate`]s.

mod candidates;
mod index;
mod locate;
mod page;
mod resolve;

pub use candidates::{build_candidates, Candidate, FieldFilter};
pub use index::ReferenceIndex;
pub use locate::{locate_fields, FieldLocation};
pub use page::PageSelection;
pub use resolve::{scan_page, MatchRoute, PageScan, SkipStats, WidgetMatch};
