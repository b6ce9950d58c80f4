//! Small value types and helpers over the parser's object model.
//!
//! The parser hands out [`PdfObject`] trees; the matcher only needs a handful
//! of typed views on them: reference identities, widget rectangles, numbers,
//! names and text strings.

use oxidize_pdf::parser::{PdfDictionary, PdfObject};
use std::fmt;

/// Reference identity of an indirect object: object number and generation.
///
/// Within one parse these are stable, so they key the reference index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    pub number: u32,
    pub generation: u16,
}

impl ObjectRef {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    /// Returns the reference held by `obj`, if it is one.
    pub fn from_object(obj: &PdfObject) -> Option<Self> {
        obj.as_reference().map(Self::from)
    }

    /// The object that points at this reference.
    pub fn to_object(self) -> PdfObject {
        PdfObject::Reference(self.number, self.generation)
    }
}

impl From<(u32, u16)> for ObjectRef {
    fn from((number, generation): (u32, u16)) -> Self {
        Self::new(number, generation)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// Widget rectangle in page coordinates.
///
/// Built straight from `/Rect [x1 y1 x2 y2]` without normalising corner
/// order, so `width` and `height` may be negative for unusual producers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Reads a four-number rectangle array. Anything else yields `None`.
    pub fn from_object(obj: &PdfObject) -> Option<Self> {
        let array = obj.as_array()?;
        if array.len() != 4 {
            return None;
        }
        let mut coords = [0.0f64; 4];
        for (slot, item) in coords.iter_mut().zip(array.0.iter()) {
            *slot = number_value(item)?;
        }
        let [x1, y1, x2, y2] = coords;
        Some(Self::new(x1, y1, x2 - x1, y2 - y1))
    }
}

/// Reads an integer or real object as `f64`.
pub fn number_value(obj: &PdfObject) -> Option<f64> {
    match obj {
        PdfObject::Integer(i) => Some(*i as f64),
        PdfObject::Real(r) => Some(*r),
        _ => None,
    }
}

/// Returns the name stored under `key`, without the leading slash.
pub fn name_entry<'a>(dict: &'a PdfDictionary, key: &str) -> Option<&'a str> {
    dict.get(key).and_then(|obj| obj.as_name()).map(|n| n.as_str())
}

/// Returns the reference stored under `key`, if the entry is indirect.
pub fn reference_entry(dict: &PdfDictionary, key: &str) -> Option<ObjectRef> {
    dict.get(key).and_then(ObjectRef::from_object)
}

/// Decodes a PDF text string.
///
/// ISO 32000-1 section 7.9.2.2: a leading `FE FF` marks UTF-16BE, otherwise the
/// bytes are PDFDocEncoding. PDF 2.0 also allows UTF-8 behind `EF BB BF`.
pub fn decode_text_string(bytes: &[u8]) -> Option<String> {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        if utf16.len() % 2 != 0 {
            return None;
        }
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16(&units).ok();
    }
    if let Some(utf8) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return std::str::from_utf8(utf8).ok().map(str::to_owned);
    }
    Some(bytes.iter().map(|&b| pdf_doc_char(b)).collect())
}

fn pdf_doc_char(byte: u8) -> char {
    match byte {
        0x18 => '\u{02D8}',
        0x19 => '\u{02C7}',
        0x1A => '\u{02C6}',
        0x1B => '\u{02D9}',
        0x1C => '\u{02DD}',
        0x1D => '\u{02DB}',
        0x1E => '\u{02DA}',
        0x1F => '\u{02DC}',
        0x80 => '\u{2022}',
        0x81 => '\u{2020}',
        0x82 => '\u{2021}',
        0x83 => '\u{2026}',
        0x84 => '\u{2014}',
        0x85 => '\u{2013}',
        0x86 => '\u{0192}',
        0x87 => '\u{2044}',
        0x88 => '\u{2039}',
        0x89 => '\u{203A}',
        0x8A => '\u{2212}',
        0x8B => '\u{2030}',
        0x8C => '\u{201E}',
        0x8D => '\u{201C}',
        0x8E => '\u{201D}',
        0x8F => '\u{2018}',
        0x90 => '\u{2019}',
        0x91 => '\u{201A}',
        0x92 => '\u{2122}',
        0x93 => '\u{FB01}',
        0x94 => '\u{FB02}',
        0x95 => '\u{0141}',
        0x96 => '\u{0152}',
        0x97 => '\u{0160}',
        0x98 => '\u{0178}',
        0x99 => '\u{017D}',
        0x9A => '\u{0131}',
        0x9B => '\u{0142}',
        0x9C => '\u{0153}',
        0x9D => '\u{0161}',
        0x9E => '\u{017E}',
        0xA0 => '\u{20AC}',
        other => other as char,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxidize_pdf::parser::{PdfArray, PdfName};

    fn rect_array(values: Vec<PdfObject>) -> PdfObject {
        PdfObject::Array(PdfArray(values))
    }

    #[test]
    fn test_reference_display_matches_pdf_syntax() {
        assert_eq!(ObjectRef::new(7, 0).to_string(), "7 0 R");
        assert_eq!(ObjectRef::new(42, 3).to_string(), "42 3 R");
    }

    #[test]
    fn test_reference_from_object() {
        assert_eq!(
            ObjectRef::from_object(&PdfObject::Reference(5, 1)),
            Some(ObjectRef::new(5, 1))
        );
        assert_eq!(ObjectRef::from_object(&PdfObject::Integer(5)), None);
        assert_eq!(
            ObjectRef::new(9, 0).to_object().as_reference(),
            Some((9, 0))
        );
    }

    #[test]
    fn test_rect_from_mixed_numbers() {
        let obj = rect_array(vec![
            PdfObject::Integer(100),
            PdfObject::Real(700.5),
            PdfObject::Integer(112),
            PdfObject::Real(712.5),
        ]);
        let rect = Rect::from_object(&obj).unwrap();
        assert_eq!(rect, Rect::new(100.0, 700.5, 12.0, 12.0));
    }

    #[test]
    fn test_rect_keeps_corner_order() {
        let obj = rect_array(vec![
            PdfObject::Integer(50),
            PdfObject::Integer(80),
            PdfObject::Integer(40),
            PdfObject::Integer(60),
        ]);
        let rect = Rect::from_object(&obj).unwrap();
        assert_eq!(rect.x, 50.0);
        assert_eq!(rect.y, 80.0);
        assert_eq!(rect.width, -10.0);
        assert_eq!(rect.height, -20.0);
    }

    #[test]
    fn test_rect_rejects_malformed_arrays() {
        let short = rect_array(vec![PdfObject::Integer(1), PdfObject::Integer(2)]);
        assert!(Rect::from_object(&short).is_none());

        let named = rect_array(vec![
            PdfObject::Integer(1),
            PdfObject::Name(PdfName("Oops".to_string())),
            PdfObject::Integer(3),
            PdfObject::Integer(4),
        ]);
        assert!(Rect::from_object(&named).is_none());
        assert!(Rect::from_object(&PdfObject::Null).is_none());
    }

    #[test]
    fn test_decode_pdf_doc_encoding() {
        assert_eq!(decode_text_string(b"Jane Doe").as_deref(), Some("Jane Doe"));
        assert_eq!(
            decode_text_string(&[b'a', 0x80, b'b']).as_deref(),
            Some("a\u{2022}b")
        );
        assert_eq!(decode_text_string(&[0xE9]).as_deref(), Some("é"));
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69, 0x20, 0xAC];
        assert_eq!(decode_text_string(&bytes).as_deref(), Some("Hi€"));
    }

    #[test]
    fn test_decode_rejects_broken_utf16() {
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00]), None);
        // Lone high surrogate
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0xD8, 0x00]), None);
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("Zoë".as_bytes());
        assert_eq!(decode_text_string(&bytes).as_deref(), Some("Zoë"));
    }
}
