use super::resolve::WidgetMatch;
use crate::forms::{FieldKind, FormField};
use crate::layout::Positioned;

/// Which resolved widgets become candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFilter {
    Checkboxes,
    TextFields,
    All,
}

impl FieldFilter {
    pub fn accepts(&self, kind: FieldKind) -> bool {
        match self {
            FieldFilter::Checkboxes => kind == FieldKind::Checkbox,
            FieldFilter::TextFields => kind == FieldKind::Text,
            FieldFilter::All => true,
        }
    }
}

/// A matched widget ready for ordering and reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub kind: FieldKind,
    pub x: f64,
    pub y: f64,
    /// Text value for text fields (placeholder when unreadable), `None` otherwise
    pub text: Option<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, kind: FieldKind, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            x,
            y,
            text: None,
        }
    }
}

impl Positioned for Candidate {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Turns matches into candidates, keeping only fields the filter accepts.
///
/// Text fields get their value read here, once per widget.
pub fn build_candidates(
    fields: &[FormField],
    matches: &[WidgetMatch],
    filter: FieldFilter,
) -> Vec<Candidate> {
    matches
        .iter()
        .filter_map(|m| fields.get(m.field).map(|field| (m, field)))
        .filter(|(_, field)| filter.accepts(field.kind))
        .map(|(m, field)| Candidate {
            name: field.name.clone(),
            kind: field.kind,
            x: m.rect.x,
            y: m.rect.y,
            text: if field.is_text() {
                field.text_or_placeholder()
            } else {
                None
            },
        })
        .collect()
}
