//! Resolves a page's annotations to the form fields that own them.

use super::index::ReferenceIndex;
use crate::error::Result;
use crate::graph::{ObjectGraph, PageInfo};
use crate::objects::{name_entry, reference_entry, ObjectRef, Rect};
use std::fmt;
use tracing::debug;

/// How an annotation was tied to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRoute {
    /// The annotation's own reference is indexed
    Direct,
    /// Found through the annotation's `/Parent`
    Parent,
}

/// A widget annotation resolved to a field.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetMatch {
    /// Position of the owning field in the document's field list
    pub field: usize,
    pub page_index: u32,
    pub annotation: Option<ObjectRef>,
    pub rect: Rect,
    pub route: MatchRoute,
}

/// Annotations dropped while scanning a page, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipStats {
    pub not_dictionary: usize,
    pub not_widget: usize,
    pub missing_rect: usize,
    pub unmatched: usize,
}

impl SkipStats {
    pub fn total(&self) -> usize {
        self.not_dictionary + self.not_widget + self.missing_rect + self.unmatched
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn merge(&mut self, other: &SkipStats) {
        self.not_dictionary += other.not_dictionary;
        self.not_widget += other.not_widget;
        self.missing_rect += other.missing_rect;
        self.unmatched += other.unmatched;
    }
}

impl fmt::Display for SkipStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} non-widget, {} unmatched, {} without rectangle, {} malformed",
            self.not_widget, self.unmatched, self.missing_rect, self.not_dictionary
        )
    }
}

/// Result of scanning one page.
#[derive(Debug, Clone)]
pub struct PageScan {
    pub page: PageInfo,
    pub matches: Vec<WidgetMatch>,
    pub skipped: SkipStats,
}

/// Walks the page's annotations in order and resolves each widget to a field.
///
/// Non-widgets, widgets without a numeric `/Rect`, and widgets whose own
/// reference and `/Parent` are both unknown are skipped and counted. Errors
/// from the object graph itself are returned.
///
/// `/Rect` must be a direct array; an indirect `/Rect` counts as missing.
pub fn scan_page<G: ObjectGraph + ?Sized>(
    graph: &G,
    page: &PageInfo,
    index: &ReferenceIndex,
) -> Result<PageScan> {
    let mut matches = Vec::new();
    let mut skipped = SkipStats::default();

    for entry in &page.annotations {
        let annotation = ObjectRef::from_object(entry);
        let Some(dict) = graph.resolve_dict(entry)? else {
            skipped.not_dictionary += 1;
            continue;
        };
        if name_entry(&dict, "Subtype") != Some("Widget") {
            skipped.not_widget += 1;
            continue;
        }
        let Some(rect) = dict.get("Rect").and_then(Rect::from_object) else {
            skipped.missing_rect += 1;
            continue;
        };

        let direct = annotation
            .and_then(|r| index.get(r))
            .map(|field| (field, MatchRoute::Direct));
        let resolved = direct.or_else(|| {
            reference_entry(&dict, "Parent")
                .and_then(|parent| index.get(parent))
                .map(|field| (field, MatchRoute::Parent))
        });

        match resolved {
            Some((field, route)) => matches.push(WidgetMatch {
                field,
                page_index: page.index,
                annotation,
                rect,
                route,
            }),
            None => skipped.unmatched += 1,
        }
    }

    debug!(
        "page {}: {} widgets matched, skipped {}",
        page.number(),
        matches.len(),
        skipped
    );
    Ok(PageScan {
        page: page.clone(),
        matches,
        skipped,
    })
}
