//! Non-fatal conversion reports

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Command that produced no motion output
    UnsupportedCommand,
}

/// A non-fatal report attached to a conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What was reported
    pub kind: DiagnosticKind,
    /// Index of the path in its path set
    pub path_index: usize,
    /// Index of the command within the path
    pub command_index: usize,
    /// Upper-case command letter
    pub code: char,
}

impl Diagnostic {
    /// Report a command that produced no motion
    pub fn unsupported(path_index: usize, command_index: usize, code: char) -> Self {
        Self {
            kind: DiagnosticKind::UnsupportedCommand,
            path_index,
            command_index,
            code,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::UnsupportedCommand => write!(
                f,
                "Unsupported command '{}' (path {}, command {})",
                self.code, self.path_index, self.command_index
            ),
        }
    }
}
