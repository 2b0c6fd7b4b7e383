//! # svgcode Core
//!
//! Core types and error handling for svgcode.
//! Provides the data model shared by the conversion stages (points,
//! drawing commands, motion instructions, path sets and viewports) and the
//! error taxonomy every crate reports through.

pub mod data;
pub mod error;

pub use data::command::{to_path_data, CommandKind, DrawCommand};
pub use data::motion::MotionInstruction;
pub use data::{PathSet, Point, Viewport};

pub use error::{DocumentError, Error, ParseError, PathError, Result};
