//! # svgcode Document
//!
//! Everything that happens to an SVG document before its path data reaches
//! the toolpath stages:
//!
//! - [`input`] checks and reads the input file
//! - [`cleanup`] strips the document down to drawing geometry
//! - [`extract`] collects path data and the view box
//!
//! Cleanup and extraction sit behind the [`Cleanup`] and [`Extract`]
//! traits so a converter can be assembled with other implementations.

pub mod cleanup;
pub mod extract;
pub mod input;

pub use cleanup::{Cleanup, CleanupOptions, SvgCleaner};
pub use extract::{Extract, Extracted, SvgExtractor};
pub use input::{read_document, validate_input};
