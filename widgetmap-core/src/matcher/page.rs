use crate::error::{Result, WidgetMapError};
use std::fmt;
use std::str::FromStr;

/// Which page(s) an inspection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    First,
    Last,
    /// 1-based page number
    Number(u32),
    All,
}

impl PageSelection {
    /// Resolves the selection to 0-based page indices.
    pub fn resolve(&self, page_count: u32) -> Result<Vec<u32>> {
        if page_count == 0 {
            return Err(WidgetMapError::NoPages);
        }
        match *self {
            PageSelection::First => Ok(vec![0]),
            PageSelection::Last => Ok(vec![page_count - 1]),
            PageSelection::Number(n) if (1..=page_count).contains(&n) => Ok(vec![n - 1]),
            PageSelection::Number(n) => Err(WidgetMapError::InvalidPageNumber(n)),
            PageSelection::All => Ok((0..page_count).collect()),
        }
    }
}

impl FromStr for PageSelection {
    type Err = WidgetMapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(PageSelection::First),
            "last" => Ok(PageSelection::Last),
            "all" => Ok(PageSelection::All),
            other => match other.parse::<u32>() {
                Ok(n) if n > 0 => Ok(PageSelection::Number(n)),
                _ => Err(WidgetMapError::InvalidPageSelection(format!(
                    "'{s}' (expected first, last, all or a page number from 1)"
                ))),
            },
        }
    }
}

impl fmt::Display for PageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelection::First => f.write_str("first"),
            PageSelection::Last => f.write_str("last"),
            PageSelection::Number(n) => write!(f, "{n}"),
            PageSelection::All => f.write_str("all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_and_numbers() {
        assert_eq!("first".parse::<PageSelection>().unwrap(), PageSelection::First);
        assert_eq!("LAST".parse::<PageSelection>().unwrap(), PageSelection::Last);
        assert_eq!(" all ".parse::<PageSelection>().unwrap(), PageSelection::All);
        assert_eq!("3".parse::<PageSelection>().unwrap(), PageSelection::Number(3));
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert!(matches!(
            "0".parse::<PageSelection>(),
            Err(WidgetMapError::InvalidPageSelection(_))
        ));
        assert!(matches!(
            "middle".parse::<PageSelection>(),
            Err(WidgetMapError::InvalidPageSelection(_))
        ));
        assert!("-1".parse::<PageSelection>().is_err());
    }

    #[test]
    fn test_resolve_against_page_count() {
        assert_eq!(PageSelection::First.resolve(4).unwrap(), vec![0]);
        assert_eq!(PageSelection::Last.resolve(4).unwrap(), vec![3]);
        assert_eq!(PageSelection::Number(2).resolve(4).unwrap(), vec![1]);
        assert_eq!(PageSelection::All.resolve(3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_single_page_document_first_equals_last() {
        assert_eq!(
            PageSelection::First.resolve(1).unwrap(),
            PageSelection::Last.resolve(1).unwrap()
        );
    }

    #[test]
    fn test_resolve_errors() {
        assert!(matches!(
            PageSelection::Last.resolve(0),
            Err(WidgetMapError::NoPages)
        ));
        assert!(matches!(
            PageSelection::Number(5).resolve(4),
            Err(WidgetMapError::InvalidPageNumber(5))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for selection in [
            PageSelection::First,
            PageSelection::Last,
            PageSelection::All,
            PageSelection::Number(7),
        ] {
            assert_eq!(selection.to_string().parse::<PageSelection>().unwrap(), selection);
        }
    }
}
