//! Data models shared by every conversion stage
//!
//! This module provides:
//! - Points in the drawing plane
//! - The document-level inputs of a conversion (path set, viewport)
//! - Drawing commands as parsed from path data
//! - Motion instructions as emitted to the machine

pub mod command;
pub mod motion;

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A point (or offset) in the drawing plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// The coordinate origin
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirror this point through `center`
    ///
    /// Used to derive the implicit control point of smooth curve commands.
    pub fn reflect_about(self, center: Point) -> Point {
        center + (center - self)
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The view box declared by a document
///
/// Only used to emit calibration bounds; geometry is never clipped or
/// rescaled against it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Minimum x of the view box
    pub min_x: f64,
    /// Minimum y of the view box
    pub min_y: f64,
    /// View box width
    pub width: f64,
    /// View box height
    pub height: f64,
}

impl Viewport {
    /// Create a viewport from its four scalars
    pub const fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

impl FromStr for Viewport {
    type Err = DocumentError;

    /// Parse a `viewBox` attribute value: four numbers separated by
    /// whitespace and/or commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let value = part.parse::<f64>().map_err(|e| {
                    DocumentError::extraction(format!("invalid viewBox value '{}': {}", part, e))
                })?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(DocumentError::extraction(format!(
                        "viewBox value '{}' is not a finite number",
                        part
                    )))
                }
            })
            .collect::<Result<Vec<f64>, _>>()?;

        match values.as_slice() {
            [min_x, min_y, width, height] => Ok(Self::new(*min_x, *min_y, *width, *height)),
            _ => Err(DocumentError::extraction(format!(
                "viewBox must have 4 values, got {}",
                values.len()
            ))),
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// Ordered raw path-data strings extracted from one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSet {
    paths: Vec<String>,
}

impl PathSet {
    /// Create an empty path set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one path-data string
    pub fn push(&mut self, data: impl Into<String>) {
        self.paths.push(data.into());
    }

    /// Number of paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set holds no paths
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate path-data strings in document order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for PathSet {
    fn from(paths: Vec<String>) -> Self {
        Self { paths }
    }
}

impl<S: Into<String>> FromIterator<S> for PathSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}
