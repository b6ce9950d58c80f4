//! Test Suite for widgetmap
//!
//! Generates real form PDFs and runs them through the parser-backed matcher,
//! so the whole path from bytes to report is covered.

pub mod generators;

pub use generators::FormPdfBuilder;

/// Common test utilities
pub mod utils {
    use crate::FormPdfBuilder;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Writes the built PDF into a fresh temporary directory.
    ///
    /// The directory is removed when the returned `TempDir` is dropped.
    pub fn write_temp_pdf(builder: &FormPdfBuilder, file_name: &str) -> anyhow::Result<(TempDir, PathBuf)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(file_name);
        fs::write(&path, builder.build())?;
        Ok((dir, path))
    }
}
