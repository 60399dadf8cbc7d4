//! File I/O operations and validation
//!
//! This module handles source file validation and raw reads.

use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use crate::error::DocumentReadError;

fn invalid(file_path: &Path, reason: impl Into<String>) -> DocumentReadError {
    DocumentReadError::InvalidFormat {
        path: file_path.to_path_buf(),
        reason: reason.into(),
    }
}

pub(crate) fn io_error(file_path: &Path, source: std::io::Error) -> DocumentReadError {
    DocumentReadError::Io {
        path: file_path.to_path_buf(),
        source,
    }
}

/// Validates that the file is a legitimate .docx file
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<(), DocumentReadError> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !extension.eq_ignore_ascii_case("docx") {
        return Err(invalid(
            file_path,
            format!("expected a .docx file, got .{extension}"),
        ));
    }

    // Check ZIP structure contains word/document.xml
    let file = File::open(file_path).map_err(|source| io_error(file_path, source))?;
    let mut archive = ZipArchive::new(file)?;

    if archive.by_name("word/document.xml").is_err() {
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(invalid(
                file_path,
                "this appears to be an Excel file (.xlsx), not a Word document",
            ));
        }

        return Err(invalid(file_path, "missing word/document.xml"));
    }

    Ok(())
}

/// Whether a path should go through the .docx reader.
pub(crate) fn is_docx_path(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

pub(crate) fn read_docx_bytes(file_path: &Path) -> Result<Vec<u8>, DocumentReadError> {
    validate_docx_file(file_path)?;
    std::fs::read(file_path).map_err(|source| io_error(file_path, source))
}

pub(crate) fn read_text_file(file_path: &Path) -> Result<String, DocumentReadError> {
    let bytes = std::fs::read(file_path).map_err(|source| io_error(file_path, source))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
