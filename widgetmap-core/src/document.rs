//! A loaded form: object graph, enumerated fields and the reference index.

use crate::error::Result;
use crate::forms::{collect_fields, FormField};
use crate::graph::{ObjectGraph, PageInfo, ParsedGraph};
use crate::layout::{cluster_rows, sort_bottom_up};
use crate::matcher::{
    build_candidates, locate_fields, scan_page, Candidate, FieldFilter, FieldLocation,
    PageScan, PageSelection, ReferenceIndex,
};
use oxidize_pdf::parser::PdfReader;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// A form document parsed from bytes held in memory.
pub type ParsedFormDocument = FormDocument<ParsedGraph<Cursor<Vec<u8>>>>;

/// Fields and their reference index over any [`ObjectGraph`].
///
/// Fields are enumerated and indexed once, when the document is built; every
/// later scan reuses them.
///
/// # Example
///
/// ```rust,no_run
/// use widgetmap::{FormDocument, PageSelection, ROW_TOLERANCE};
///
/// # fn main() -> widgetmap::Result<()> {
/// let doc = FormDocument::open("form.pdf")?;
/// for scan in doc.scan(PageSelection::Last)? {
///     for candidate in doc.checkbox_candidates(&scan, ROW_TOLERANCE) {
///         println!("{} at ({}, {})", candidate.name, candidate.x, candidate.y);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct FormDocument<G: ObjectGraph> {
    graph: G,
    fields: Vec<FormField>,
    index: ReferenceIndex,
}

impl ParsedFormDocument {
    /// Reads and parses the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading {}", path.display());
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut reader = PdfReader::new(Cursor::new(bytes))?;
        let catalog = reader.catalog()?.clone();
        Self::from_graph(ParsedGraph::new(reader.into_document(), catalog))
    }
}

impl<G: ObjectGraph> FormDocument<G> {
    /// Enumerates the graph's form fields and indexes their references.
    pub fn from_graph(graph: G) -> Result<Self> {
        let fields = collect_fields(&graph)?;
        let index = ReferenceIndex::build(&fields);
        info!(
            "loaded {} form fields ({} indexed references)",
            fields.len(),
            index.len()
        );
        Ok(Self {
            graph,
            fields,
            index,
        })
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn page_count(&self) -> Result<u32> {
        self.graph.page_count()
    }

    /// Page at a 0-based index.
    pub fn page(&self, index: u32) -> Result<PageInfo> {
        self.graph.page(index)
    }

    /// Resolves every widget on the selected pages, page by page.
    pub fn scan(&self, selection: PageSelection) -> Result<Vec<PageScan>> {
        selection
            .resolve(self.page_count()?)?
            .into_iter()
            .map(|index| scan_page(&self.graph, &self.graph.page(index)?, &self.index))
            .collect()
    }

    /// Checkbox widgets of one scanned page, bottom-up then left-to-right.
    pub fn checkbox_candidates(&self, scan: &PageScan, tolerance: f64) -> Vec<Candidate> {
        let mut candidates = build_candidates(&self.fields, &scan.matches, FieldFilter::Checkboxes);
        sort_bottom_up(&mut candidates, tolerance);
        candidates
    }

    /// Every matched widget of one scanned page grouped into rows, top first.
    ///
    /// Rows are formed over all field kinds; callers print what they need.
    pub fn text_rows(&self, scan: &PageScan, threshold: f64) -> Vec<Vec<Candidate>> {
        cluster_rows(
            build_candidates(&self.fields, &scan.matches, FieldFilter::All),
            threshold,
        )
    }

    /// Page index of each named field's first widget.
    pub fn locate<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<(String, FieldLocation)>> {
        locate_fields(&self.graph, &self.fields, names)
    }
}
