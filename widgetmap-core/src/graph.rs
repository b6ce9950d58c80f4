//! Read-only access to a document's object graph.
//!
//! [`ObjectGraph`] is the seam between the matcher and the PDF parser. The
//! matcher only ever looks objects up, reads the catalog and walks pages, so
//! the same code runs against a parsed file ([`ParsedGraph`]) or a synthetic
//! graph assembled in memory ([`MemoryGraph`]).

use crate::error::{Result, WidgetMapError};
use crate::objects::{number_value, ObjectRef};
use oxidize_pdf::parser::{PdfDictionary, PdfDocument, PdfObject};
use std::collections::HashMap;
use std::io::{Read, Seek};

/// Default page size (US Letter) used when a page carries no usable MediaBox.
const DEFAULT_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

/// What the matcher needs to know about one page.
#[derive(Debug, Clone)]
pub struct PageInfo {
    /// 0-based page index
    pub index: u32,
    /// The page object's own reference
    pub reference: ObjectRef,
    /// `[llx, lly, urx, ury]`
    pub media_box: [f64; 4],
    /// Raw `/Annots` entries in document order; references or direct dictionaries
    pub annotations: Vec<PdfObject>,
}

impl PageInfo {
    pub fn width(&self) -> f64 {
        self.media_box[2] - self.media_box[0]
    }

    pub fn height(&self) -> f64 {
        self.media_box[3] - self.media_box[1]
    }

    /// 1-based page number for display.
    pub fn number(&self) -> u32 {
        self.index + 1
    }
}

/// Read-only view of a PDF object graph.
pub trait ObjectGraph {
    /// Fetches the object behind `reference`.
    fn lookup(&self, reference: ObjectRef) -> Result<PdfObject>;

    /// The document catalog dictionary.
    fn catalog(&self) -> Result<PdfDictionary>;

    fn page_count(&self) -> Result<u32>;

    /// Page at a 0-based index.
    fn page(&self, index: u32) -> Result<PageInfo>;

    /// Follows one level of indirection; direct objects are cloned.
    fn resolve(&self, obj: &PdfObject) -> Result<PdfObject> {
        match ObjectRef::from_object(obj) {
            Some(reference) => self.lookup(reference),
            None => Ok(obj.clone()),
        }
    }

    /// Resolves `obj` and returns it only if it is a dictionary.
    fn resolve_dict(&self, obj: &PdfObject) -> Result<Option<PdfDictionary>> {
        Ok(match self.resolve(obj)? {
            PdfObject::Dictionary(dict) => Some(dict),
            PdfObject::Stream(stream) => Some(stream.dict),
            _ => None,
        })
    }
}

/// Object graph backed by the `oxidize-pdf` parser.
pub struct ParsedGraph<R: Read + Seek> {
    document: PdfDocument<R>,
    catalog: PdfDictionary,
}

impl<R: Read + Seek> ParsedGraph<R> {
    pub fn new(document: PdfDocument<R>, catalog: PdfDictionary) -> Self {
        Self { document, catalog }
    }
}

impl<R: Read + Seek> ObjectGraph for ParsedGraph<R> {
    fn lookup(&self, reference: ObjectRef) -> Result<PdfObject> {
        Ok(self
            .document
            .get_object(reference.number, reference.generation)?)
    }

    fn catalog(&self) -> Result<PdfDictionary> {
        Ok(self.catalog.clone())
    }

    fn page_count(&self) -> Result<u32> {
        Ok(self.document.page_count()?)
    }

    fn page(&self, index: u32) -> Result<PageInfo> {
        let page = self.document.get_page(index)?;
        let annotations = match page.dict.get("Annots") {
            Some(annots) => annotation_entries(&self.resolve(annots)?),
            None => Vec::new(),
        };
        Ok(PageInfo {
            index,
            reference: ObjectRef::from(page.obj_ref),
            media_box: page.media_box,
            annotations,
        })
    }
}

fn annotation_entries(obj: &PdfObject) -> Vec<PdfObject> {
    obj.as_array()
        .map(|array| array.0.clone())
        .unwrap_or_default()
}

/// Synthetic object graph held entirely in memory.
///
/// ```
/// use oxidize_pdf::parser::PdfDictionary;
/// use widgetmap::graph::{MemoryGraph, ObjectGraph};
/// use widgetmap::objects::ObjectRef;
///
/// let mut graph = MemoryGraph::new();
/// graph.add_page(ObjectRef::new(3, 0), PdfDictionary::new());
/// assert_eq!(graph.page_count().unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryGraph {
    objects: HashMap<ObjectRef, PdfObject>,
    catalog: PdfDictionary,
    pages: Vec<ObjectRef>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            catalog: PdfDictionary::new(),
            pages: Vec::new(),
        }
    }

    /// Stores `obj` under `reference`, replacing any previous object.
    pub fn insert(&mut self, reference: ObjectRef, obj: PdfObject) -> &mut Self {
        self.objects.insert(reference, obj);
        self
    }

    pub fn set_catalog(&mut self, catalog: PdfDictionary) -> &mut Self {
        self.catalog = catalog;
        self
    }

    /// Registers a page object; pages keep insertion order.
    pub fn add_page(&mut self, reference: ObjectRef, page: PdfDictionary) -> &mut Self {
        self.objects.insert(reference, PdfObject::Dictionary(page));
        self.pages.push(reference);
        self
    }
}

impl ObjectGraph for MemoryGraph {
    fn lookup(&self, reference: ObjectRef) -> Result<PdfObject> {
        self.objects
            .get(&reference)
            .cloned()
            .ok_or(WidgetMapError::MissingObject(reference))
    }

    fn catalog(&self) -> Result<PdfDictionary> {
        Ok(self.catalog.clone())
    }

    fn page_count(&self) -> Result<u32> {
        Ok(self.pages.len() as u32)
    }

    fn page(&self, index: u32) -> Result<PageInfo> {
        let reference = *self
            .pages
            .get(index as usize)
            .ok_or(WidgetMapError::InvalidPageNumber(index))?;
        let dict = self.resolve_dict(&reference.to_object())?.ok_or_else(|| {
            WidgetMapError::InvalidStructure(format!("page {reference} is not a dictionary"))
        })?;

        let media_box = dict
            .get("MediaBox")
            .map(|obj| self.resolve(obj))
            .transpose()?
            .and_then(|obj| media_box_from(&obj))
            .unwrap_or(DEFAULT_MEDIA_BOX);
        let annotations = match dict.get("Annots") {
            Some(annots) => annotation_entries(&self.resolve(annots)?),
            None => Vec::new(),
        };

        Ok(PageInfo {
            index,
            reference,
            media_box,
            annotations,
        })
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn media_box_from(obj: &PdfObject) -> Option<[f64; 4]> {
    let array = obj.as_array()?;
    if array.len() != 4 {
        return None;
    }
    let mut values = [0.0; 4];
    for (slot, item) in values.iter_mut().zip(array.0.iter()) {
        *slot = number_value(item)?;
    }
    Some(values)
}
