use crate::forms::FormField;
use crate::objects::ObjectRef;
use std::collections::HashMap;
use tracing::debug;

/// Maps field and widget references to the owning field's position in the
/// field list.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    map: HashMap<ObjectRef, usize>,
}

impl ReferenceIndex {
    /// Indexes each field's own reference and every widget reference under it.
    ///
    /// A reference seen twice keeps the later field.
    pub fn build(fields: &[FormField]) -> Self {
        let mut map = HashMap::new();
        for (position, field) in fields.iter().enumerate() {
            let widget_refs = field.widgets.iter().filter_map(|w| w.reference);
            for reference in field.reference.into_iter().chain(widget_refs) {
                if let Some(previous) = map.insert(reference, position) {
                    if previous != position {
                        debug!(
                            "{reference} indexed for both '{}' and '{}'",
                            fields[previous].name, field.name
                        );
                    }
                }
            }
        }
        Self { map }
    }

    pub fn get(&self, reference: ObjectRef) -> Option<usize> {
        self.map.get(&reference).copied()
    }

    pub fn contains(&self, reference: ObjectRef) -> bool {
        self.map.contains_key(&reference)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
