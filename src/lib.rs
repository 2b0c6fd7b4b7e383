//! # svgcode
//!
//! Converts the path geometry of SVG documents into a G-code motion
//! program for pen plotters and similar drawing machines.
//!
//! ## Architecture
//!
//! svgcode is organized as a workspace with multiple crates:
//!
//! 1. **svgcode-core** - Data model and error taxonomy
//! 2. **svgcode-toolpath** - Path-data parsing, normalization, flattening, emission
//! 3. **svgcode-document** - Input validation, document cleanup, path extraction
//! 4. **svgcode-settings** - Converter settings and persistence
//! 5. **svgcode** - [`Converter`] and the command-line binary

pub mod convert;

pub use convert::Converter;

pub use svgcode_core::{
    CommandKind, DocumentError, DrawCommand, Error, MotionInstruction, PathError, PathSet,
    Point, Result, Viewport,
};
pub use svgcode_document::{Cleanup, CleanupOptions, Extract, Extracted, SvgCleaner, SvgExtractor};
pub use svgcode_settings::{Settings, SettingsError, SmoothCurves};
pub use svgcode_toolpath::{Conversion, ConversionPipeline, Diagnostic, PipelineOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so stdout can carry the program. The level comes from
/// `RUST_LOG` and defaults to `info`. `json` switches to one JSON object
/// per event.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
