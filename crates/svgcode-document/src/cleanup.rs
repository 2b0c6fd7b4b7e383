//! Document cleanup
//!
//! Reduces an SVG document to the elements that carry drawing geometry.
//! Basic shapes can be rewritten as `path` elements and plain groups can be
//! dissolved, so the extractor only ever has to look at `path` and `g`.

use roxmltree::{Document, Node, ParsingOptions};
use std::fmt::Write;
use svgcode_core::DocumentError;
use tracing::{debug, trace};

/// SVG namespace URI
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Elements that never contribute geometry
const NON_DRAWING_ELEMENTS: &[&str] = &[
    "metadata", "title", "desc", "defs", "style", "script", "symbol", "clipPath", "mask",
    "pattern", "marker", "linearGradient", "radialGradient", "filter",
];

/// Geometry attributes consumed when a shape becomes a path
const SHAPE_ATTRIBUTES: &[&str] = &[
    "x", "y", "width", "height", "rx", "ry", "x1", "y1", "x2", "y2", "points",
];

/// Turns raw document text into cleaned document text
pub trait Cleanup {
    fn clean(&self, text: &str) -> Result<String, DocumentError>;
}

/// Which cleanup passes run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Rewrite `rect`, `line`, `polyline` and `polygon` as `path`
    pub convert_shapes: bool,
    /// Drop `stroke*`, `fill*`, `style`, `class` and `id` attributes
    pub strip_presentation: bool,
    /// Lift the children of groups that have no `transform`
    pub collapse_groups: bool,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            convert_shapes: true,
            strip_presentation: true,
            collapse_groups: true,
        }
    }
}

/// Cleaner backed by `roxmltree`
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgCleaner {
    options: CleanupOptions,
}

/// Owned element rebuilt from the parsed tree
#[derive(Debug, Clone, PartialEq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape_attribute(value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

impl SvgCleaner {
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    fn clean_root(&self, root: Node) -> Element {
        let mut attributes = vec![("xmlns".to_string(), SVG_NAMESPACE.to_string())];
        attributes.extend(self.kept_attributes(root));
        Element {
            name: root.tag_name().name().to_string(),
            attributes,
            children: self.clean_children(root),
        }
    }

    fn clean_children(&self, node: Node) -> Vec<Element> {
        node.children()
            .filter(Node::is_element)
            .flat_map(|child| self.clean_element(child))
            .collect()
    }

    /// Clean one element; a dissolved group yields its children
    fn clean_element(&self, node: Node) -> Vec<Element> {
        let name = node.tag_name().name();

        if is_foreign(node) || NON_DRAWING_ELEMENTS.contains(&name) {
            trace!(element = name, "dropped non-drawing element");
            return Vec::new();
        }
        if is_hidden(node) {
            trace!(element = name, "dropped hidden element");
            return Vec::new();
        }

        let attributes = self.kept_attributes(node);

        if name == "g" {
            let children = self.clean_children(node);
            if children.is_empty() {
                return Vec::new();
            }
            let has_transform = attributes.iter().any(|(key, _)| key == "transform");
            if self.options.collapse_groups && !has_transform {
                return children;
            }
            return vec![Element {
                name: name.to_string(),
                attributes,
                children,
            }];
        }

        let element = Element {
            name: name.to_string(),
            attributes,
            children: self.clean_children(node),
        };

        if self.options.convert_shapes {
            if let Some(path) = shape_to_path(&element) {
                return path.into_iter().collect();
            }
        }
        vec![element]
    }

    fn kept_attributes(&self, node: Node) -> Vec<(String, String)> {
        node.attributes()
            .filter(|attr| attr.namespace().is_none())
            .filter(|attr| !(self.options.strip_presentation && is_presentation(attr.name())))
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect()
    }
}

impl Cleanup for SvgCleaner {
    fn clean(&self, text: &str) -> Result<String, DocumentError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(text, options)
            .map_err(|e| DocumentError::cleanup(e.to_string()))?;

        let root = self.clean_root(document.root_element());
        let mut out = String::with_capacity(text.len());
        root.write_to(&mut out);

        debug!(
            input_bytes = text.len(),
            output_bytes = out.len(),
            "cleaned document"
        );
        Ok(out)
    }
}

fn is_foreign(node: Node) -> bool {
    node.tag_name()
        .namespace()
        .is_some_and(|ns| ns != SVG_NAMESPACE)
}

fn is_presentation(name: &str) -> bool {
    name.starts_with("stroke")
        || name.starts_with("fill")
        || matches!(name, "style" | "class" | "id")
}

fn is_hidden(node: Node) -> bool {
    let declared = |key: &str| {
        node.attribute(key).map(str::trim).or_else(|| {
            node.attribute("style").and_then(|style| {
                style.split(';').find_map(|declaration| {
                    let (name, value) = declaration.split_once(':')?;
                    (name.trim() == key).then(|| value.trim())
                })
            })
        })
    };
    declared("display") == Some("none") || declared("visibility") == Some("hidden")
}

/// Path equivalent of a basic shape
///
/// Returns `None` when the element is not a convertible shape (including
/// rounded rectangles and shapes with non-numeric geometry), and
/// `Some(None)` when the shape is degenerate and draws nothing.
fn shape_to_path(element: &Element) -> Option<Option<Element>> {
    let number = |key: &str| -> Option<f64> {
        match element.attribute(key) {
            Some(value) => value.trim().parse().ok(),
            None => Some(0.0),
        }
    };

    let data = match element.name.as_str() {
        "rect" => {
            let rounded = ["rx", "ry"]
                .iter()
                .any(|key| number(key) != Some(0.0));
            if rounded {
                return None;
            }
            let (x, y) = (number("x")?, number("y")?);
            let (width, height) = (number("width")?, number("height")?);
            if width <= 0.0 || height <= 0.0 {
                return Some(None);
            }
            format!(
                "M{} {}H{}V{}H{}Z",
                x,
                y,
                x + width,
                y + height,
                x
            )
        }
        "line" => format!(
            "M{} {}L{} {}",
            number("x1")?,
            number("y1")?,
            number("x2")?,
            number("y2")?
        ),
        "polyline" | "polygon" => {
            let coords = parse_points(element.attribute("points").unwrap_or_default())?;
            let pairs: Vec<(f64, f64)> = coords.chunks_exact(2).map(|c| (c[0], c[1])).collect();
            if pairs.len() < 2 {
                return Some(None);
            }
            let mut data = String::new();
            for (i, (x, y)) in pairs.iter().enumerate() {
                let _ = write!(data, "{}{} {}", if i == 0 { "M" } else { "L" }, x, y);
            }
            if element.name == "polygon" {
                data.push('Z');
            }
            data
        }
        _ => return None,
    };

    let mut attributes: Vec<(String, String)> = element
        .attributes
        .iter()
        .filter(|(key, _)| !SHAPE_ATTRIBUTES.contains(&key.as_str()))
        .cloned()
        .collect();
    attributes.push(("d".to_string(), data));

    Some(Some(Element {
        name: "path".to_string(),
        attributes,
        children: Vec::new(),
    }))
}

fn parse_points(points: &str) -> Option<Vec<f64>> {
    points
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().ok())
        .collect()
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
