//! Form fields and their widgets as read from an AcroForm field tree.

use crate::error::FieldValueError;
use crate::objects::{decode_text_string, ObjectRef, Rect};
use bitflags::bitflags;
use oxidize_pdf::parser::PdfObject;
use std::fmt;

/// Shown instead of a text value that cannot be read.
pub const TEXT_READ_PLACEHOLDER: &str = "[RichText / Error reading]";

bitflags! {
    /// Field flags from the `/Ff` entry (ISO 32000-1 Tables 221, 226, 228, 230).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldFlags: u32 {
        const READ_ONLY = 1 << 0;
        const REQUIRED = 1 << 1;
        const NO_EXPORT = 1 << 2;
        /// Text: may span several lines
        const MULTILINE = 1 << 12;
        /// Text: displayed as asterisks
        const PASSWORD = 1 << 13;
        /// Button: at least one radio in the group must stay on
        const NO_TOGGLE_TO_OFF = 1 << 14;
        const RADIO = 1 << 15;
        const PUSH_BUTTON = 1 << 16;
        /// Choice: combo box instead of list box
        const COMBO = 1 << 17;
        const EDIT = 1 << 18;
        const SORT = 1 << 19;
        const FILE_SELECT = 1 << 20;
        const MULTI_SELECT = 1 << 21;
        const DO_NOT_SPELL_CHECK = 1 << 22;
        const DO_NOT_SCROLL = 1 << 23;
        const COMB = 1 << 24;
        /// Text: value is rich text
        const RICH_TEXT = 1 << 25;
        const COMMIT_ON_SEL_CHANGE = 1 << 26;
    }
}

impl FieldFlags {
    /// Reads an `/Ff` integer; unknown bits are dropped.
    pub fn from_object(obj: &PdfObject) -> Self {
        obj.as_integer()
            .map(|bits| Self::from_bits_truncate(bits as u32))
            .unwrap_or_default()
    }
}

/// Kind of a terminal form field, resolved once from `/FT` and `/Ff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Checkbox,
    Radio,
    PushButton,
    Text,
    Choice,
    Signature,
    Unknown,
}

impl FieldKind {
    /// Classifies a field from its (possibly inherited) `/FT` name and flags.
    pub fn classify(field_type: Option<&str>, flags: FieldFlags) -> Self {
        match field_type {
            Some("Btn") if flags.contains(FieldFlags::PUSH_BUTTON) => FieldKind::PushButton,
            Some("Btn") if flags.contains(FieldFlags::RADIO) => FieldKind::Radio,
            Some("Btn") => FieldKind::Checkbox,
            Some("Tx") => FieldKind::Text,
            Some("Ch") => FieldKind::Choice,
            Some("Sig") => FieldKind::Signature,
            _ => FieldKind::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::PushButton => "button",
            FieldKind::Text => "text",
            FieldKind::Choice => "choice",
            FieldKind::Signature => "signature",
            FieldKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Widget annotation owned by a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// `None` when the widget is a direct object inside `/Kids`
    pub reference: Option<ObjectRef>,
    pub rect: Option<Rect>,
    /// Page back-reference from `/P`
    pub page: Option<ObjectRef>,
}

/// A terminal form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Fully qualified name, partial names joined with `.`
    pub name: String,
    pub reference: Option<ObjectRef>,
    pub kind: FieldKind,
    pub flags: FieldFlags,
    /// Resolved `/V`, inherited from an ancestor when absent
    pub value: Option<PdfObject>,
    pub widgets: Vec<Widget>,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            reference: None,
            kind,
            flags: FieldFlags::empty(),
            value: None,
            widgets: Vec::new(),
        }
    }

    pub fn with_reference(mut self, reference: ObjectRef) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_value(mut self, value: PdfObject) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    pub fn is_text(&self) -> bool {
        self.kind == FieldKind::Text
    }

    /// Reads the current text of a text field.
    ///
    /// Only a string `/V` counts as a value; anything else reads as `None`.
    /// A rich-text field with no (or an empty) value cannot be read.
    pub fn text_value(&self) -> Result<Option<String>, FieldValueError> {
        if !self.is_text() {
            return Err(FieldValueError::NotTextField(self.name.clone()));
        }
        let text = match &self.value {
            Some(PdfObject::String(s)) => Some(
                decode_text_string(s.as_bytes())
                    .ok_or_else(|| FieldValueError::Undecodable(self.name.clone()))?,
            ),
            _ => None,
        };
        let is_blank = text.as_deref().map_or(true, str::is_empty);
        if is_blank && self.flags.contains(FieldFlags::RICH_TEXT) {
            return Err(FieldValueError::RichText(self.name.clone()));
        }
        Ok(text)
    }

    /// The text value, or [`TEXT_READ_PLACEHOLDER`] when it cannot be read.
    pub fn text_or_placeholder(&self) -> Option<String> {
        match self.text_value() {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("{err}");
                Some(TEXT_READ_PLACEHOLDER.to_string())
            }
        }
    }
}
