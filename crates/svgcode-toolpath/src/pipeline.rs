//! Conversion pipeline
//!
//! Runs parse, normalize, flatten and emit over every path of a path set
//! and assembles the final motion program behind the calibration preamble.

use crate::diagnostic::Diagnostic;
use crate::emitter::MotionEmitter;
use crate::flattener::{CurveFlattener, FlattenerConfig, SmoothCurveMode};
use crate::normalizer::normalize;
use crate::parser::parse_path_data;
use serde::{Deserialize, Serialize};
use svgcode_core::{DrawCommand, MotionInstruction, PathError, PathSet, Viewport};
use tracing::{debug, info};

/// Options for a pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Curve sampling resolution
    pub flatten: FlattenerConfig,
    /// Handling of smooth curve shorthands
    pub smooth: SmoothCurveMode,
}

/// Result of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Calibration preamble followed by every path's motion
    pub instructions: Vec<MotionInstruction>,
    /// Non-fatal reports collected along the way
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Render the program, one instruction per line
    pub fn to_gcode(&self) -> String {
        self.instructions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of instructions that move the machine
    pub fn motion_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_motion()).count()
    }
}

/// Calibration preamble for a viewport; zeros when there is none
pub fn calibration(viewport: Option<&Viewport>) -> [MotionInstruction; 3] {
    let viewport = viewport.copied().unwrap_or_default();
    [
        MotionInstruction::SetOrigin {
            x: viewport.min_x,
            y: viewport.min_y,
        },
        MotionInstruction::SetBounds {
            width: viewport.width,
            height: viewport.height,
        },
        MotionInstruction::AbsolutePositioning,
    ]
}

/// Parse and normalize one path's data
pub fn normalize_path(path_index: usize, data: &str) -> Result<Vec<DrawCommand>, PathError> {
    let mut commands = parse_path_data(data).map_err(|e| e.at_path(path_index))?;
    normalize(&mut commands);
    Ok(commands)
}

/// Stateless orchestrator for the conversion stages
#[derive(Debug, Clone, Default)]
pub struct ConversionPipeline {
    options: PipelineOptions,
}

impl ConversionPipeline {
    /// Create a pipeline
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Options this pipeline runs with
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Normalized commands of every path, in path order
    pub fn normalize_all(&self, paths: &PathSet) -> Result<Vec<Vec<DrawCommand>>, PathError> {
        paths
            .iter()
            .enumerate()
            .map(|(index, data)| normalize_path(index, data))
            .collect()
    }

    /// Convert a path set to a motion program
    ///
    /// Fails on the first path that cannot be parsed; unsupported commands
    /// only add diagnostics.
    pub fn run(
        &self,
        paths: &PathSet,
        viewport: Option<&Viewport>,
    ) -> Result<Conversion, PathError> {
        let flattener =
            CurveFlattener::new(self.options.flatten).with_smooth_curves(self.options.smooth);
        let mut emitter = MotionEmitter::new(flattener);

        for (index, data) in paths.iter().enumerate() {
            let commands = normalize_path(index, data)?;
            debug!(path_index = index, commands = commands.len(), "normalized path");
            emitter.emit_path(index, &commands)?;
        }

        let (motion, diagnostics) = emitter.finish();
        let mut instructions = Vec::with_capacity(motion.len() + 3);
        instructions.extend(calibration(viewport));
        instructions.extend(motion);

        info!(
            paths = paths.len(),
            instructions = instructions.len(),
            diagnostics = diagnostics.len(),
            "conversion complete"
        );

        Ok(Conversion {
            instructions,
            diagnostics,
        })
    }
}
