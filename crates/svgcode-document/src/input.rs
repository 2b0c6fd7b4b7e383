//! Input validation and reading

use std::fs;
use std::path::Path;
use svgcode_core::DocumentError;
use tracing::debug;

/// Extension every input document must carry
pub const SVG_EXTENSION: &str = "svg";

/// Check that `path` names an existing `.svg` file
///
/// The extension is compared case-insensitively.
pub fn validate_input(path: &Path) -> Result<(), DocumentError> {
    if !path.is_file() {
        return Err(DocumentError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SVG_EXTENSION));
    if !is_svg {
        return Err(DocumentError::InputWrongCategory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Validate `path` and read it as UTF-8 text
pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    validate_input(path)?;
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(text)
}
