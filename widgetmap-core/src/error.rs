use crate::objects::ObjectRef;
use oxidize_pdf::parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid object reference: {0}")]
    MissingObject(ObjectRef),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid page number: {0}")]
    InvalidPageNumber(u32),

    #[error("Document has no pages")]
    NoPages,

    #[error("Invalid page selection: {0}")]
    InvalidPageSelection(String),
}

pub type Result<T> = std::result::Result<T, WidgetMapError>;

impl From<ParseError> for WidgetMapError {
    fn from(err: ParseError) -> Self {
        WidgetMapError::ParseError(err.to_string())
    }
}

/// Reasons a text field value could not be read.
///
/// These never abort a run: callers substitute a placeholder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldValueError {
    #[error("field '{0}' is not a text field")]
    NotTextField(String),

    #[error("field '{0}' is rich text without a value")]
    RichText(String),

    #[error("field '{0}' has an undecodable value")]
    Undecodable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let error = WidgetMapError::InvalidStructure("AcroForm is not a dictionary".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid PDF structure: AcroForm is not a dictionary"
        );
        assert_eq!(WidgetMapError::NoPages.to_string(), "Document has no pages");
    }

    #[test]
    fn test_missing_object_uses_reference_display() {
        let error = WidgetMapError::MissingObject(ObjectRef::new(12, 0));
        assert_eq!(error.to_string(), "Invalid object reference: 12 0 R");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        match WidgetMapError::from(io_error) {
            WidgetMapError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::NotFound),
            other => panic!("Expected IO error variant, got {other:?}"),
        }
    }

    #[test]
    fn test_from_parse_error() {
        let error = WidgetMapError::from(ParseError::InvalidHeader);
        assert!(matches!(error, WidgetMapError::ParseError(_)));
        assert!(error.to_string().starts_with("Parse error:"));
    }

    #[test]
    fn test_field_value_error_display() {
        let error = FieldValueError::RichText("Notes".to_string());
        assert_eq!(
            error.to_string(),
            "field 'Notes' is rich text without a value"
        );
    }
}
