//! Path extraction
//!
//! Collects path data and the view box from a cleaned document.

use roxmltree::{Document, Node, ParsingOptions};
use svgcode_core::{DocumentError, PathSet, Viewport};
use tracing::{debug, warn};

/// What a document contributes to a conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub paths: PathSet,
    /// Parsed `viewBox` of the root element
    pub viewport: Option<Viewport>,
}

/// Turns cleaned document text into path data and a viewport
pub trait Extract {
    fn extract(&self, text: &str) -> Result<Extracted, DocumentError>;
}

/// Extractor backed by `roxmltree`
///
/// Visits, in document order, the root's `path` children and the `path`
/// children of its `g` children. Deeper nesting is not searched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgExtractor;

impl SvgExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn push_path(paths: &mut PathSet, node: Node) {
    match node.attribute("d") {
        Some(d) => paths.push(d),
        None => warn!(
            position = node.range().start,
            "path element without path data skipped"
        ),
    }
}

impl Extract for SvgExtractor {
    fn extract(&self, text: &str) -> Result<Extracted, DocumentError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(text, options)
            .map_err(|e| DocumentError::extraction(e.to_string()))?;

        let root = document.root_element();
        if root.tag_name().name() != "svg" {
            return Err(DocumentError::extraction(format!(
                "root element is <{}>, expected <svg>",
                root.tag_name().name()
            )));
        }

        let viewport = root
            .attribute("viewBox")
            .map(str::parse::<Viewport>)
            .transpose()?;

        let mut paths = PathSet::new();
        for child in root.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "path" => push_path(&mut paths, child),
                "g" => {
                    for grandchild in child.children().filter(Node::is_element) {
                        if grandchild.tag_name().name() == "path" {
                            push_path(&mut paths, grandchild);
                        }
                    }
                }
                other => debug!(element = other, "no parse"),
            }
        }

        debug!(
            paths = paths.len(),
            viewport = viewport.is_some(),
            "extracted document"
        );
        Ok(Extracted { paths, viewport })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Extracted {
        SvgExtractor::new().extract(text).unwrap()
    }

    fn collected(extracted: &Extracted) -> Vec<&str> {
        extracted.paths.iter().collect()
    }

    #[test]
    fn test_top_level_and_grouped_paths_in_document_order() {
        let extracted = extract(
            r#"<svg viewBox="0 0 100 50"><path d="M1 1"/><g><path d="M2 2"/><path d="M3 3"/></g><path d="M4 4"/></svg>"#,
        );
        assert_eq!(collected(&extracted), vec!["M1 1", "M2 2", "M3 3", "M4 4"]);
        assert_eq!(
            extracted.viewport,
            Some(Viewport::new(0.0, 0.0, 100.0, 50.0))
        );
    }

    #[test]
    fn test_only_one_level_of_groups() {
        let extracted = extract(r#"<svg><g><g><path d="M9 9"/></g></g></svg>"#);
        assert!(extracted.paths.is_empty());
    }

    #[test]
    fn test_other_elements_are_ignored() {
        let extracted = extract(r#"<svg><circle r="5"/><rect width="2" height="2"/></svg>"#);
        assert!(extracted.paths.is_empty());
        assert_eq!(extracted.viewport, None);
    }

    #[test]
    fn test_path_without_data_is_skipped() {
        let extracted = extract(r#"<svg><path/><path d="M1 1"/></svg>"#);
        assert_eq!(collected(&extracted), vec!["M1 1"]);
    }

    #[test]
    fn test_root_must_be_svg() {
        let err = SvgExtractor::new().extract("<html/>").unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailed { .. }));
    }

    #[test]
    fn test_malformed_view_box() {
        let err = SvgExtractor::new()
            .extract(r#"<svg viewBox="0 0 100"/>"#)
            .unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailed { .. }));
    }

    #[test]
    fn test_unparseable_markup() {
        let err = SvgExtractor::new().extract("<svg>").unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailed { .. }));
    }
}
