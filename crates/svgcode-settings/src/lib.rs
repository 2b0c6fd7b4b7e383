//! # svgcode Settings
//!
//! Converter settings with JSON and TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    CleanupSettings, CurveSettings, FlattenSettings, OutputSettings, Settings, SmoothCurves,
};
pub use error::{Result, SettingsError};
