//! Drawing command types
//!
//! A [`DrawCommand`] is one command of a path-data string. The command
//! kind is a sum type carrying the kind-specific payload (control points,
//! arc parameters); the end point and start point are kept on the command
//! itself because every kind ends somewhere once normalized.

use super::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a drawing command, with its kind-specific operands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandKind {
    /// Start a new subpath
    MoveTo,
    /// Straight line
    LineTo,
    /// Horizontal line; only the end x is given
    HorizontalLineTo,
    /// Vertical line; only the end y is given
    VerticalLineTo,
    /// Cubic Bézier curve
    CurveTo {
        /// First control point
        ctrl1: Point,
        /// Second control point
        ctrl2: Point,
    },
    /// Quadratic Bézier curve
    QuadraticCurveTo {
        /// Control point
        ctrl: Point,
    },
    /// Cubic Bézier whose first control point is implied
    SmoothCurveTo {
        /// Reflected first control point, resolved during normalization
        ctrl1: Option<Point>,
        /// Second control point
        ctrl2: Point,
    },
    /// Quadratic Bézier whose control point is implied
    SmoothQuadraticCurveTo {
        /// Reflected control point, resolved during normalization
        ctrl: Option<Point>,
    },
    /// Elliptical arc
    EllipticalArc {
        /// X radius
        rx: f64,
        /// Y radius
        ry: f64,
        /// Rotation of the ellipse x axis, in degrees
        x_axis_rotation: f64,
        /// Large-arc flag
        large_arc: bool,
        /// Sweep flag
        sweep: bool,
    },
    /// Close the current subpath
    ClosePath,
}

impl CommandKind {
    /// Absolute (upper-case) letter code of this kind
    pub fn code(&self) -> char {
        match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::HorizontalLineTo => 'H',
            Self::VerticalLineTo => 'V',
            Self::CurveTo { .. } => 'C',
            Self::QuadraticCurveTo { .. } => 'Q',
            Self::SmoothCurveTo { .. } => 'S',
            Self::SmoothQuadraticCurveTo { .. } => 'T',
            Self::EllipticalArc { .. } => 'A',
            Self::ClosePath => 'Z',
        }
    }

    /// Human readable name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveTo => "moveto",
            Self::LineTo => "lineto",
            Self::HorizontalLineTo => "horizontal lineto",
            Self::VerticalLineTo => "vertical lineto",
            Self::CurveTo { .. } => "curveto",
            Self::QuadraticCurveTo { .. } => "quadratic curveto",
            Self::SmoothCurveTo { .. } => "smooth curveto",
            Self::SmoothQuadraticCurveTo { .. } => "smooth quadratic curveto",
            Self::EllipticalArc { .. } => "elliptical arc",
            Self::ClosePath => "closepath",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One command of a path-data string
///
/// Before normalization `x`/`y` hold the literal operands (either may be
/// missing for horizontal, vertical and close commands) and `start` is
/// `None`. After normalization both end coordinates and the start point
/// are absolute and `relative` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Kind and kind-specific operands
    pub kind: CommandKind,
    /// Whether coordinates are offsets from the current point
    pub relative: bool,
    /// End x
    pub x: Option<f64>,
    /// End y
    pub y: Option<f64>,
    /// Current point when the command begins, set by normalization
    pub start: Option<Point>,
}

impl DrawCommand {
    /// Create a command from its kind and literal end coordinates
    pub fn new(kind: CommandKind, relative: bool, x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            kind,
            relative,
            x,
            y,
            start: None,
        }
    }

    /// Create a command whose kind carries a full end point
    pub fn to_point(kind: CommandKind, relative: bool, x: f64, y: f64) -> Self {
        Self::new(kind, relative, Some(x), Some(y))
    }

    /// Letter code of this command, lower-case when relative
    pub fn code(&self) -> char {
        let code = self.kind.code();
        if self.relative {
            code.to_ascii_lowercase()
        } else {
            code
        }
    }

    /// Absolute end point, once both coordinates are known
    pub fn end(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }

    /// Whether the command is absolute with known start and end points
    pub fn is_normalized(&self) -> bool {
        !self.relative && self.start.is_some() && self.end().is_some()
    }
}

fn write_coord(f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => write!(f, " {}", v),
        None => Ok(()),
    }
}

impl fmt::Display for DrawCommand {
    /// Render the command back to path-data text
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())?;
        match self.kind {
            CommandKind::MoveTo | CommandKind::LineTo => {}
            CommandKind::HorizontalLineTo => return write_coord(f, self.x),
            CommandKind::VerticalLineTo => return write_coord(f, self.y),
            CommandKind::CurveTo { ctrl1, ctrl2 } => write!(
                f,
                " {} {} {} {}",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y
            )?,
            CommandKind::QuadraticCurveTo { ctrl } => write!(f, " {} {}", ctrl.x, ctrl.y)?,
            CommandKind::SmoothCurveTo { ctrl2, .. } => write!(f, " {} {}", ctrl2.x, ctrl2.y)?,
            CommandKind::SmoothQuadraticCurveTo { .. } => {}
            CommandKind::EllipticalArc {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
            } => write!(
                f,
                " {} {} {} {} {}",
                rx,
                ry,
                x_axis_rotation,
                u8::from(large_arc),
                u8::from(sweep)
            )?,
            CommandKind::ClosePath => return Ok(()),
        }
        write_coord(f, self.x)?;
        write_coord(f, self.y)
    }
}

/// Render a command sequence back to a single path-data string
pub fn to_path_data(commands: &[DrawCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_follows_relativity() {
        let cmd = DrawCommand::to_point(CommandKind::LineTo, true, 1.0, 2.0);
        assert_eq!(cmd.code(), 'l');
        let cmd = DrawCommand::to_point(CommandKind::LineTo, false, 1.0, 2.0);
        assert_eq!(cmd.code(), 'L');
    }

    #[test]
    fn test_end_requires_both_coordinates() {
        let cmd = DrawCommand::new(CommandKind::HorizontalLineTo, false, Some(4.0), None);
        assert_eq!(cmd.end(), None);
        assert!(!cmd.is_normalized());

        let mut cmd = DrawCommand::new(CommandKind::HorizontalLineTo, false, Some(4.0), Some(1.0));
        cmd.start = Some(Point::ORIGIN);
        assert_eq!(cmd.end(), Some(Point::new(4.0, 1.0)));
        assert!(cmd.is_normalized());
    }

    #[test]
    fn test_display_renders_path_data() {
        let commands = [
            DrawCommand::to_point(CommandKind::MoveTo, false, 0.0, 0.0),
            DrawCommand::new(CommandKind::HorizontalLineTo, true, Some(10.0), None),
            DrawCommand::to_point(
                CommandKind::CurveTo {
                    ctrl1: Point::new(1.0, 2.0),
                    ctrl2: Point::new(3.0, 4.0),
                },
                false,
                5.0,
                -6.5,
            ),
            DrawCommand::to_point(
                CommandKind::EllipticalArc {
                    rx: 5.0,
                    ry: 5.0,
                    x_axis_rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                },
                true,
                10.0,
                0.0,
            ),
            DrawCommand::new(CommandKind::ClosePath, false, None, None),
        ];
        assert_eq!(
            to_path_data(&commands),
            "M 0 0 h 10 C 1 2 3 4 5 -6.5 a 5 5 0 0 1 10 0 Z"
        );
    }

    #[test]
    fn test_serializes_with_command_tag() {
        let cmd = DrawCommand::to_point(
            CommandKind::QuadraticCurveTo {
                ctrl: Point::new(1.0, 1.0),
            },
            false,
            2.0,
            0.0,
        );
        let json = serde_json::to_value(cmd).unwrap();
        assert_eq!(json["kind"]["command"], "quadratic_curve_to");
        assert_eq!(json["kind"]["ctrl"]["x"], 1.0);
        assert_eq!(json["x"], 2.0);
    }
}
