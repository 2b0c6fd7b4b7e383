//! Absolute normalizer
//!
//! Rewrites a path's commands to absolute coordinates in one
//! left-to-right pass. The walk state (current point, subpath start and
//! the last curve control point) is an explicit value folded over the
//! commands, so a single step can be exercised on its own.

use svgcode_core::{CommandKind, DrawCommand, Point};

/// Last control point left behind by a curve command
///
/// Smooth commands reflect it when the previous command belongs to the
/// same curve family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LastControl {
    /// Second control point of a cubic (`C` or `S`)
    Cubic(Point),
    /// Control point of a quadratic (`Q` or `T`)
    Quadratic(Point),
}

/// Per-path walk state threaded through normalization
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WalkState {
    /// Point the next command starts from
    pub current: Point,
    /// Resulting point of the most recent moveto
    pub subpath_start: Point,
    /// Control point of the previous command, if it was a curve
    pub last_control: Option<LastControl>,
}

impl WalkState {
    /// Normalize one command in place and return the state after it
    pub fn advance(self, command: &mut DrawCommand) -> WalkState {
        let start = self.current;
        let relative = command.relative;
        let shift = |p: Point| if relative { p + start } else { p };

        command.start = Some(start);
        command.x = Some(match command.x {
            Some(x) if relative => x + start.x,
            Some(x) => x,
            None => start.x,
        });
        command.y = Some(match command.y {
            Some(y) if relative => y + start.y,
            Some(y) => y,
            None => start.y,
        });

        let last_control = match &mut command.kind {
            CommandKind::CurveTo { ctrl1, ctrl2 } => {
                *ctrl1 = shift(*ctrl1);
                *ctrl2 = shift(*ctrl2);
                Some(LastControl::Cubic(*ctrl2))
            }
            CommandKind::QuadraticCurveTo { ctrl } => {
                *ctrl = shift(*ctrl);
                Some(LastControl::Quadratic(*ctrl))
            }
            CommandKind::SmoothCurveTo { ctrl1, ctrl2 } => {
                *ctrl2 = shift(*ctrl2);
                *ctrl1 = Some(match self.last_control {
                    Some(LastControl::Cubic(previous)) => previous.reflect_about(start),
                    _ => start,
                });
                Some(LastControl::Cubic(*ctrl2))
            }
            CommandKind::SmoothQuadraticCurveTo { ctrl } => {
                let resolved = match self.last_control {
                    Some(LastControl::Quadratic(previous)) => previous.reflect_about(start),
                    _ => start,
                };
                *ctrl = Some(resolved);
                Some(LastControl::Quadratic(resolved))
            }
            CommandKind::MoveTo
            | CommandKind::LineTo
            | CommandKind::HorizontalLineTo
            | CommandKind::VerticalLineTo
            | CommandKind::EllipticalArc { .. }
            | CommandKind::ClosePath => None,
        };

        command.relative = false;

        if command.kind == CommandKind::ClosePath {
            command.x = Some(self.subpath_start.x);
            command.y = Some(self.subpath_start.y);
        }

        let end = Point::new(
            command.x.unwrap_or(start.x),
            command.y.unwrap_or(start.y),
        );
        WalkState {
            current: end,
            subpath_start: if command.kind == CommandKind::MoveTo {
                end
            } else {
                self.subpath_start
            },
            last_control,
        }
    }
}

/// Normalize one path's commands to absolute form, in place
///
/// Every path starts its walk at the origin. A closepath with no moveto
/// before it closes to the origin.
pub fn normalize(commands: &mut [DrawCommand]) -> WalkState {
    commands
        .iter_mut()
        .fold(WalkState::default(), |state, command| state.advance(command))
}
