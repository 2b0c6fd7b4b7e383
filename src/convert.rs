//! Document to motion program conversion
//!
//! [`Converter`] chains the document collaborators with the toolpath
//! pipeline: read, clean, extract, then convert every extracted path.

use std::path::Path;
use svgcode_core::{DrawCommand, Result};
use svgcode_document::{
    read_document, Cleanup, CleanupOptions, Extract, Extracted, SvgCleaner, SvgExtractor,
};
use svgcode_settings::{Settings, SmoothCurves};
use svgcode_toolpath::{
    Conversion, ConversionPipeline, FlattenerConfig, PipelineOptions, SmoothCurveMode,
};
use tracing::{debug, info_span};

/// Converts documents to motion programs
///
/// Holds no per-conversion state, so one converter can serve any number
/// of documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct Converter<C = SvgCleaner, E = SvgExtractor> {
    cleaner: Option<C>,
    extractor: E,
    pipeline: ConversionPipeline,
    trailing_newline: bool,
}

impl Converter {
    /// Assemble the default collaborators from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let cleaner = settings.cleanup.enabled.then(|| {
            SvgCleaner::new(CleanupOptions {
                convert_shapes: settings.cleanup.convert_shapes,
                strip_presentation: settings.cleanup.strip_presentation,
                collapse_groups: settings.cleanup.collapse_groups,
            })
        });
        let smooth = match settings.curves.smooth {
            SmoothCurves::Skip => SmoothCurveMode::Skip,
            SmoothCurves::Flatten => SmoothCurveMode::Flatten,
        };
        let pipeline = ConversionPipeline::new(PipelineOptions {
            flatten: FlattenerConfig {
                num_segments: settings.flatten.segments,
            },
            smooth,
        });

        Self::new(cleaner, SvgExtractor::new(), pipeline)
            .with_trailing_newline(settings.output.trailing_newline)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl<C: Cleanup, E: Extract> Converter<C, E> {
    /// Assemble a converter; `None` skips cleanup
    pub fn new(cleaner: Option<C>, extractor: E, pipeline: ConversionPipeline) -> Self {
        Self {
            cleaner,
            extractor,
            pipeline,
            trailing_newline: true,
        }
    }

    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }

    /// Read, clean and extract a document's paths
    pub fn extract_str(&self, text: &str) -> Result<Extracted> {
        let cleaned;
        let text = match &self.cleaner {
            Some(cleaner) => {
                cleaned = cleaner.clean(text)?;
                cleaned.as_str()
            }
            None => text,
        };
        let extracted = self.extractor.extract(text)?;
        debug!(
            paths = extracted.paths.len(),
            viewport = ?extracted.viewport,
            "extracted paths"
        );
        Ok(extracted)
    }

    /// Convert document text
    pub fn convert_str(&self, text: &str) -> Result<Conversion> {
        let extracted = self.extract_str(text)?;
        let conversion = self
            .pipeline
            .run(&extracted.paths, extracted.viewport.as_ref())?;
        Ok(conversion)
    }

    /// Convert the `.svg` file at `path`
    pub fn convert_file(&self, path: &Path) -> Result<Conversion> {
        let _span = info_span!("convert", path = %path.display()).entered();
        let text = read_document(path)?;
        self.convert_str(&text)
    }

    /// Normalized commands of every path in the file at `path`
    pub fn normalize_file(&self, path: &Path) -> Result<Vec<Vec<DrawCommand>>> {
        let _span = info_span!("normalize", path = %path.display()).entered();
        let text = read_document(path)?;
        let extracted = self.extract_str(&text)?;
        Ok(self.pipeline.normalize_all(&extracted.paths)?)
    }

    /// Render a conversion as program text
    pub fn render(&self, conversion: &Conversion) -> String {
        let mut text = conversion.to_gcode();
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgcode_core::{DocumentError, Error};

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><path d="M0 0 L10 0 L10 10 Z"/></svg>"#;

    #[test]
    fn test_convert_str() {
        let conversion = Converter::default().convert_str(SQUARE).unwrap();
        assert_eq!(
            conversion.to_gcode(),
            "G92 X0 Y0\nG92.2 X100 Y50\nG90\nG0 X0 Y0\nG1 X10 Y0\nG1 X10 Y10\nG1 X0 Y0"
        );
    }

    #[test]
    fn test_render_trailing_newline() {
        let converter = Converter::default();
        let conversion = converter.convert_str(SQUARE).unwrap();
        assert!(converter.render(&conversion).ends_with("G1 X0 Y0\n"));

        let mut settings = Settings::default();
        settings.output.trailing_newline = false;
        let converter = Converter::from_settings(&settings);
        assert!(converter.render(&conversion).ends_with("G1 X0 Y0"));
    }

    #[test]
    fn test_cleanup_setting_controls_shape_conversion() {
        let text = r#"<svg><rect width="2" height="2"/></svg>"#;

        let cleaned = Converter::default().convert_str(text).unwrap();
        assert_eq!(cleaned.motion_count(), 5);

        let mut settings = Settings::default();
        settings.cleanup.enabled = false;
        let raw = Converter::from_settings(&settings).convert_str(text).unwrap();
        assert_eq!(raw.motion_count(), 0);
    }

    #[test]
    fn test_settings_reach_pipeline() {
        let text = r#"<svg><path d="M0 0 C0 1 1 1 1 0 S2 -1 2 0"/></svg>"#;
        let mut settings = Settings::default();
        settings.flatten.segments = 4;
        settings.curves.smooth = SmoothCurves::Flatten;
        let conversion = Converter::from_settings(&settings).convert_str(text).unwrap();
        assert_eq!(conversion.motion_count(), 1 + 4 + 4);
        assert!(conversion.diagnostics.is_empty());
    }

    #[test]
    fn test_errors_are_lifted() {
        let err = Converter::default().convert_str("<svg").unwrap_err();
        assert!(err.is_document_error());
        assert!(matches!(
            err,
            Error::Document(DocumentError::CleanupFailed { .. })
        ));

        let err = Converter::default()
            .convert_str(r#"<svg><path d="Q1 1 2 2"/></svg>"#)
            .unwrap_err();
        assert!(err.is_path_error());
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
