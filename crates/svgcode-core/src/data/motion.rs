//! Motion instructions in the target G-code dialect

use super::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the emitted motion program
///
/// Coordinates render with `f64`'s shortest round-trip representation, so
/// nothing is rounded beyond floating-point precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionInstruction {
    /// `G92`: declare the current position as the view box origin
    SetOrigin {
        /// Origin x
        x: f64,
        /// Origin y
        y: f64,
    },
    /// `G92.2`: declare the working bounds
    SetBounds {
        /// Bound width
        width: f64,
        /// Bound height
        height: f64,
    },
    /// `G90`: absolute positioning mode
    AbsolutePositioning,
    /// `G0`: non-drawing reposition
    Rapid {
        /// Target x
        x: f64,
        /// Target y
        y: f64,
    },
    /// `G1`: drawing move
    Linear {
        /// Target x
        x: f64,
        /// Target y
        y: f64,
    },
}

impl MotionInstruction {
    /// Rapid move to `to`
    pub fn rapid(to: Point) -> Self {
        Self::Rapid { x: to.x, y: to.y }
    }

    /// Linear move to `to`
    pub fn linear(to: Point) -> Self {
        Self::Linear { x: to.x, y: to.y }
    }

    /// Target of a move, `None` for calibration directives
    pub fn target(&self) -> Option<Point> {
        match *self {
            Self::Rapid { x, y } | Self::Linear { x, y } => Some(Point::new(x, y)),
            Self::SetOrigin { .. } | Self::SetBounds { .. } | Self::AbsolutePositioning => None,
        }
    }

    /// Whether this instruction moves the machine
    pub fn is_motion(&self) -> bool {
        self.target().is_some()
    }
}

impl fmt::Display for MotionInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetOrigin { x, y } => write!(f, "G92 X{} Y{}", x, y),
            Self::SetBounds { width, height } => write!(f, "G92.2 X{} Y{}", width, height),
            Self::AbsolutePositioning => write!(f, "G90"),
            Self::Rapid { x, y } => write!(f, "G0 X{} Y{}", x, y),
            Self::Linear { x, y } => write!(f, "G1 X{} Y{}", x, y),
        }
    }
}
