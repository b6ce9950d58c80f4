//! Read-only view of interactive form fields (ISO 32000-1 section 12.7)
//!
//! Fields are enumerated once per document and classified into a
//! [`FieldKind`]; every later step works from that snapshot.

mod acroform;
mod field;

pub use acroform::collect_fields;
pub use field::{FieldFlags, FieldKind, FormField, Widget, TEXT_READ_PLACEHOLDER};
