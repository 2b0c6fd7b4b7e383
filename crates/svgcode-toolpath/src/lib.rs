//! # svgcode Toolpath
//!
//! Turns path-data strings into a motion program.
//!
//! Stages run in order for every path:
//! 1. [`parser`] splits path data into [`DrawCommand`](svgcode_core::DrawCommand)s
//! 2. [`normalizer`] rewrites them in absolute coordinates
//! 3. [`flattener`] samples curves into straight-line waypoints
//! 4. [`emitter`] produces motion instructions
//!
//! [`pipeline`] runs the stages over a whole path set.

pub mod diagnostic;
pub mod emitter;
pub mod flattener;
pub mod normalizer;
pub mod parser;
pub mod pipeline;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use emitter::MotionEmitter;
pub use flattener::{CurveFlattener, Flattened, FlattenerConfig, SmoothCurveMode};
pub use normalizer::{normalize, LastControl, WalkState};
pub use parser::{parse_path_data, PathCommandParser};
pub use pipeline::{calibration, normalize_path, Conversion, ConversionPipeline, PipelineOptions};
