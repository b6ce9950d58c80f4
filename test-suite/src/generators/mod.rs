//! PDF Test Generators
//!
//! This module provides utilities for generating form PDFs programmatically.

pub mod form_pdf_builder;

pub use form_pdf_builder::FormPdfBuilder;
