//! Curve flattener
//!
//! Approximates curve commands by a fixed number of straight-line samples.
//! Samples are taken at `t = i / n` for `i` in `0..n`; the curve's own end
//! point (`t = 1`) is not part of the samples.

use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use serde::{Deserialize, Serialize};
use svgcode_core::{CommandKind, Point};

/// Flattening configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenerConfig {
    /// Number of samples per curve
    pub num_segments: usize,
}

impl Default for FlattenerConfig {
    fn default() -> Self {
        Self { num_segments: 10 }
    }
}

/// What to do with smooth curve shorthands (`S`, `T`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothCurveMode {
    /// Report them as unsupported and emit nothing
    #[default]
    Skip,
    /// Flatten them with their reflected control point
    Flatten,
}

/// Result of flattening one normalized command
#[derive(Debug, Clone, PartialEq)]
pub enum Flattened {
    /// Line-like command reaching `Point` directly
    Line(Point),
    /// Curve samples in increasing parameter order
    Samples(Vec<Point>),
    /// Command that cannot be reduced to line segments
    Unsupported,
}

/// Samples curve commands into straight-line waypoints
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveFlattener {
    config: FlattenerConfig,
    smooth: SmoothCurveMode,
}

impl CurveFlattener {
    /// Create a flattener
    pub fn new(config: FlattenerConfig) -> Self {
        Self {
            config,
            smooth: SmoothCurveMode::default(),
        }
    }

    /// Choose how smooth curve shorthands are handled
    pub fn with_smooth_curves(mut self, mode: SmoothCurveMode) -> Self {
        self.smooth = mode;
        self
    }

    /// Number of samples produced per curve
    pub fn num_segments(&self) -> usize {
        self.config.num_segments
    }

    /// Flatten a command that runs from `start` to `end`
    pub fn flatten(&self, start: Point, kind: &CommandKind, end: Point) -> Flattened {
        match *kind {
            CommandKind::MoveTo
            | CommandKind::LineTo
            | CommandKind::HorizontalLineTo
            | CommandKind::VerticalLineTo
            | CommandKind::ClosePath => Flattened::Line(end),
            CommandKind::CurveTo { ctrl1, ctrl2 } => {
                Flattened::Samples(self.sample_cubic(start, ctrl1, ctrl2, end))
            }
            CommandKind::QuadraticCurveTo { ctrl } => {
                Flattened::Samples(self.sample_quadratic(start, ctrl, end))
            }
            CommandKind::SmoothCurveTo {
                ctrl1: Some(ctrl1),
                ctrl2,
            } if self.smooth == SmoothCurveMode::Flatten => {
                Flattened::Samples(self.sample_cubic(start, ctrl1, ctrl2, end))
            }
            CommandKind::SmoothQuadraticCurveTo { ctrl: Some(ctrl) }
                if self.smooth == SmoothCurveMode::Flatten =>
            {
                Flattened::Samples(self.sample_quadratic(start, ctrl, end))
            }
            CommandKind::SmoothCurveTo { .. }
            | CommandKind::SmoothQuadraticCurveTo { .. }
            | CommandKind::EllipticalArc { .. } => Flattened::Unsupported,
        }
    }

    /// Sample a cubic Bézier curve
    pub fn sample_cubic(&self, from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Vec<Point> {
        let curve = CubicBezierSegment {
            from: to_geom(from),
            ctrl1: to_geom(ctrl1),
            ctrl2: to_geom(ctrl2),
            to: to_geom(to),
        };
        self.parameters()
            .map(|t| from_geom(curve.sample(t)))
            .collect()
    }

    /// Sample a quadratic Bézier curve
    pub fn sample_quadratic(&self, from: Point, ctrl: Point, to: Point) -> Vec<Point> {
        let curve = QuadraticBezierSegment {
            from: to_geom(from),
            ctrl: to_geom(ctrl),
            to: to_geom(to),
        };
        self.parameters()
            .map(|t| from_geom(curve.sample(t)))
            .collect()
    }

    fn parameters(&self) -> impl Iterator<Item = f64> {
        let n = self.config.num_segments;
        (0..n).map(move |i| i as f64 / n as f64)
    }
}

fn to_geom(p: Point) -> lyon::geom::Point<f64> {
    lyon::geom::Point::new(p.x, p.y)
}

fn from_geom(p: lyon::geom::Point<f64>) -> Point {
    Point::new(p.x, p.y)
}
