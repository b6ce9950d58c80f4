use crate::error::Result;
use crate::forms::FormField;
use crate::graph::ObjectGraph;
use crate::objects::ObjectRef;
use std::collections::HashMap;

/// Where a named field's first widget sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLocation {
    /// 0-based index of the page named by the widget's `/P` entry
    Page(u32),
    /// The field exists but its first widget has no usable `/P` entry
    Unplaced,
    NotFound,
}

/// Looks up each name and reports the page of the field's first widget.
pub fn locate_fields<G, S>(
    graph: &G,
    fields: &[FormField],
    names: &[S],
) -> Result<Vec<(String, FieldLocation)>>
where
    G: ObjectGraph + ?Sized,
    S: AsRef<str>,
{
    let mut pages: HashMap<ObjectRef, u32> = HashMap::new();
    for index in 0..graph.page_count()? {
        pages.entry(graph.page(index)?.reference).or_insert(index);
    }

    Ok(names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let location = match fields.iter().find(|f| f.name == name) {
                None => FieldLocation::NotFound,
                Some(field) => field
                    .widgets
                    .first()
                    .and_then(|w| w.page)
                    .and_then(|page| pages.get(&page).copied())
                    .map_or(FieldLocation::Unplaced, FieldLocation::Page),
            };
            (name.to_string(), location)
        })
        .collect())
}
