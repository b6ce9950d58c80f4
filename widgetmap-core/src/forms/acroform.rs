//! Walks the interactive form (`/AcroForm`) field tree.
//!
//! Non-terminal nodes only contribute a partial name and inheritable entries
//! (`/FT`, `/Ff`, `/V`). A node is non-terminal when at least one of its kids
//! carries a `/T` entry; otherwise its kids are widgets, and a node without
//! kids is its own widget.

use super::field::{FieldFlags, FieldKind, FormField, Widget};
use crate::error::{Result, WidgetMapError};
use crate::graph::ObjectGraph;
use crate::objects::{decode_text_string, name_entry, reference_entry, ObjectRef, Rect};
use oxidize_pdf::parser::{PdfDictionary, PdfObject};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Enumerates every terminal field of the document's interactive form.
///
/// A document without `/AcroForm` or `/Fields` simply has no fields.
pub fn collect_fields<G: ObjectGraph + ?Sized>(graph: &G) -> Result<Vec<FormField>> {
    let catalog = graph.catalog()?;
    let Some(acroform) = catalog.get("AcroForm") else {
        return Ok(Vec::new());
    };
    let acroform = graph.resolve_dict(acroform)?.ok_or_else(|| {
        WidgetMapError::InvalidStructure("AcroForm is not a dictionary".to_string())
    })?;
    let Some(fields) = acroform.get("Fields") else {
        return Ok(Vec::new());
    };
    let fields = graph.resolve(fields)?;
    let roots = fields.as_array().ok_or_else(|| {
        WidgetMapError::InvalidStructure("AcroForm /Fields is not an array".to_string())
    })?;

    let mut walker = FieldWalker {
        graph,
        visited: HashSet::new(),
        fields: Vec::new(),
    };
    let root = Inherited::default();
    for entry in &roots.0 {
        walker.visit(entry, &root)?;
    }
    debug!("collected {} form fields", walker.fields.len());
    Ok(walker.fields)
}

/// Entries a field inherits from its ancestors.
#[derive(Debug, Clone, Default)]
struct Inherited {
    name: String,
    field_type: Option<String>,
    flags: Option<FieldFlags>,
    value: Option<PdfObject>,
}

struct FieldWalker<'a, G: ?Sized> {
    graph: &'a G,
    visited: HashSet<ObjectRef>,
    fields: Vec<FormField>,
}

impl<G: ObjectGraph + ?Sized> FieldWalker<'_, G> {
    fn visit(&mut self, entry: &PdfObject, parent: &Inherited) -> Result<()> {
        let reference = ObjectRef::from_object(entry);
        if let Some(reference) = reference {
            if !self.visited.insert(reference) {
                warn!("field tree revisits {reference}, skipping");
                return Ok(());
            }
        }
        let Some(dict) = self.graph.resolve_dict(entry)? else {
            debug!("field entry {entry:?} is not a dictionary");
            return Ok(());
        };

        let node = self.inherit(&dict, parent)?;

        let kids = match dict.get("Kids") {
            Some(kids) => self
                .graph
                .resolve(kids)?
                .as_array()
                .map(|array| array.0.clone())
                .unwrap_or_default(),
            None => Vec::new(),
        };
        let mut resolved_kids = Vec::with_capacity(kids.len());
        for kid in kids {
            let kid_dict = self.graph.resolve_dict(&kid)?;
            resolved_kids.push((kid, kid_dict));
        }

        let has_child_fields = resolved_kids
            .iter()
            .any(|(_, kid)| kid.as_ref().is_some_and(|d| d.contains_key("T")));
        if has_child_fields {
            for (kid, _) in &resolved_kids {
                self.visit(kid, &node)?;
            }
            return Ok(());
        }

        let widgets = if resolved_kids.is_empty() {
            vec![widget_from(reference, &dict)]
        } else {
            resolved_kids
                .iter()
                .filter_map(|(kid, kid_dict)| {
                    kid_dict
                        .as_ref()
                        .map(|d| widget_from(ObjectRef::from_object(kid), d))
                })
                .collect()
        };

        let flags = node.flags.unwrap_or_default();
        self.fields.push(FormField {
            kind: FieldKind::classify(node.field_type.as_deref(), flags),
            name: node.name,
            reference,
            flags,
            value: node.value,
            widgets,
        });
        Ok(())
    }

    fn inherit(&self, dict: &PdfDictionary, parent: &Inherited) -> Result<Inherited> {
        let partial_name = match dict.get("T") {
            Some(t) => self
                .graph
                .resolve(t)?
                .as_string()
                .and_then(|s| decode_text_string(s.as_bytes())),
            None => None,
        };
        let name = match partial_name {
            Some(partial) if parent.name.is_empty() => partial,
            Some(partial) => format!("{}.{}", parent.name, partial),
            None => parent.name.clone(),
        };

        let field_type = name_entry(dict, "FT")
            .map(str::to_owned)
            .or_else(|| parent.field_type.clone());
        let flags = match dict.get("Ff") {
            Some(ff) => Some(FieldFlags::from_object(&self.graph.resolve(ff)?)),
            None => parent.flags,
        };
        let value = match dict.get("V") {
            Some(v) => Some(self.graph.resolve(v)?),
            None => parent.value.clone(),
        };

        Ok(Inherited {
            name,
            field_type,
            flags,
            value,
        })
    }
}

fn widget_from(reference: Option<ObjectRef>, dict: &PdfDictionary) -> Widget {
    Widget {
        reference,
        rect: dict.get("Rect").and_then(Rect::from_object),
        page: reference_entry(dict, "P"),
    }
}
