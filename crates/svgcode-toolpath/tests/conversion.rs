use svgcode_core::{MotionInstruction, PathError, PathSet, Point, Viewport};
use svgcode_toolpath::{
    ConversionPipeline, DiagnosticKind, FlattenerConfig, PipelineOptions, SmoothCurveMode,
};

fn paths(data: &[&str]) -> PathSet {
    data.iter().copied().collect()
}

#[test]
fn test_square_program() {
    let viewport: Viewport = "0 0 100 50".parse().unwrap();
    let conversion = ConversionPipeline::default()
        .run(&paths(&["M0 0 L10 0 L10 10 Z"]), Some(&viewport))
        .unwrap();

    assert_eq!(
        conversion.to_gcode(),
        "G92 X0 Y0\nG92.2 X100 Y50\nG90\nG0 X0 Y0\nG1 X10 Y0\nG1 X10 Y10\nG1 X0 Y0"
    );
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn test_viewport_offsets_are_calibrated_not_applied() {
    let viewport: Viewport = "-5,-5 20,20".parse().unwrap();
    let conversion = ConversionPipeline::default()
        .run(&paths(&["M1 1"]), Some(&viewport))
        .unwrap();
    assert_eq!(
        conversion.instructions,
        vec![
            MotionInstruction::SetOrigin { x: -5.0, y: -5.0 },
            MotionInstruction::SetBounds {
                width: 20.0,
                height: 20.0
            },
            MotionInstruction::AbsolutePositioning,
            MotionInstruction::rapid(Point::new(1.0, 1.0)),
        ]
    );
}

#[test]
fn test_arc_diagnostic_does_not_abort() {
    let conversion = ConversionPipeline::default()
        .run(
            &paths(&["M0 0 L10 0", "M0 0 a5 5 0 0 1 10 0 l0 10", "M1 1"]),
            None,
        )
        .unwrap();

    assert_eq!(conversion.diagnostics.len(), 1);
    let diagnostic = &conversion.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnsupportedCommand);
    assert_eq!(diagnostic.path_index, 1);
    assert_eq!(diagnostic.command_index, 1);
    assert_eq!(diagnostic.code, 'A');

    let gcode = conversion.to_gcode();
    // relative lineto after the skipped arc starts at the arc's end point
    assert!(gcode.contains("G1 X10 Y10"));
    assert!(gcode.ends_with("G0 X1 Y1"));
}

#[test]
fn test_curves_produce_ten_linear_moves() {
    let conversion = ConversionPipeline::default()
        .run(&paths(&["M0 0 C0 10 10 10 10 0 Q15 5 20 0"]), None)
        .unwrap();
    assert_eq!(conversion.motion_count(), 1 + 10 + 10);
    // quadratic starts where the cubic ended
    assert_eq!(
        conversion.instructions[3 + 1 + 10],
        MotionInstruction::linear(Point::new(10.0, 0.0))
    );
}

#[test]
fn test_smooth_curves_can_be_flattened() {
    let data = paths(&["M0 0 Q5 5 10 0 T20 0"]);

    let skipped = ConversionPipeline::default().run(&data, None).unwrap();
    assert_eq!(skipped.motion_count(), 11);
    assert_eq!(skipped.diagnostics.len(), 1);

    let flattened = ConversionPipeline::new(PipelineOptions {
        flatten: FlattenerConfig::default(),
        smooth: SmoothCurveMode::Flatten,
    })
    .run(&data, None)
    .unwrap();
    assert_eq!(flattened.motion_count(), 21);
    assert!(flattened.diagnostics.is_empty());
    // reflected control point (15,-5) pulls the second arch below the axis
    assert!(flattened
        .instructions
        .iter()
        .skip(3 + 11)
        .filter_map(MotionInstruction::target)
        .skip(1)
        .all(|p| p.y < 0.0));
}

#[test]
fn test_malformed_path_fails_whole_conversion() {
    let err = ConversionPipeline::default()
        .run(&paths(&["M0 0 L1 1", "L5 5"]), None)
        .unwrap_err();
    assert_eq!(err.path_index(), 1);
    assert!(matches!(err, PathError::MalformedPathData { .. }));
}

#[test]
fn test_conversion_serializes() {
    let conversion = ConversionPipeline::default()
        .run(&paths(&["M0 0 A1 1 0 0 0 2 0"]), None)
        .unwrap();
    let json = serde_json::to_value(&conversion).unwrap();
    assert_eq!(json["diagnostics"][0]["code"], "A");
    assert_eq!(json["instructions"].as_array().unwrap().len(), 4);
}
