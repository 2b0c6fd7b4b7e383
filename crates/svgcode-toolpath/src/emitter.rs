//! Motion emitter
//!
//! Maps normalized commands to motion instructions while tracking the
//! machine position.

use crate::diagnostic::Diagnostic;
use crate::flattener::{CurveFlattener, Flattened};
use svgcode_core::{CommandKind, DrawCommand, MotionInstruction, PathError, Point};
use tracing::{trace, warn};

/// Accumulates the motion program for a sequence of paths
#[derive(Debug, Default)]
pub struct MotionEmitter {
    flattener: CurveFlattener,
    position: Point,
    instructions: Vec<MotionInstruction>,
    diagnostics: Vec<Diagnostic>,
}

impl MotionEmitter {
    /// Create an emitter that flattens curves with `flattener`
    pub fn new(flattener: CurveFlattener) -> Self {
        Self {
            flattener,
            ..Self::default()
        }
    }

    /// Current machine position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Instructions emitted so far
    pub fn instructions(&self) -> &[MotionInstruction] {
        &self.instructions
    }

    /// Diagnostics recorded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Emit the instructions for one normalized path
    ///
    /// Unsupported commands produce no instruction and leave the position
    /// unchanged; each one is recorded as a diagnostic.
    pub fn emit_path(
        &mut self,
        path_index: usize,
        commands: &[DrawCommand],
    ) -> Result<(), PathError> {
        for (command_index, command) in commands.iter().enumerate() {
            let (start, end) = match (command.start, command.end()) {
                (Some(start), Some(end)) if !command.relative => (start, end),
                _ => {
                    return Err(PathError::NotNormalized {
                        path_index,
                        command_index,
                    })
                }
            };

            match self.flattener.flatten(start, &command.kind, end) {
                Flattened::Line(target) => {
                    let instruction = if command.kind == CommandKind::MoveTo {
                        MotionInstruction::rapid(target)
                    } else {
                        MotionInstruction::linear(target)
                    };
                    self.instructions.push(instruction);
                    self.position = target;
                }
                Flattened::Samples(samples) => {
                    trace!(
                        path_index,
                        command_index,
                        samples = samples.len(),
                        "flattened {}",
                        command.kind.name()
                    );
                    self.instructions
                        .extend(samples.into_iter().map(MotionInstruction::linear));
                    self.position = end;
                }
                Flattened::Unsupported => {
                    let diagnostic =
                        Diagnostic::unsupported(path_index, command_index, command.kind.code());
                    warn!(
                        path_index,
                        command_index,
                        command = command.kind.name(),
                        "{}",
                        diagnostic
                    );
                    self.diagnostics.push(diagnostic);
                }
            }
        }
        Ok(())
    }

    /// Consume the emitter, returning instructions and diagnostics
    pub fn finish(self) -> (Vec<MotionInstruction>, Vec<Diagnostic>) {
        (self.instructions, self.diagnostics)
    }
}
