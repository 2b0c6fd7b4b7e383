use proptest::prelude::*;
use svgcode_core::{to_path_data, DrawCommand, Point};
use svgcode_toolpath::{normalize, parse_path_data, CurveFlattener};

fn coord() -> impl Strategy<Value = i32> {
    -500i32..500
}

fn relative_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        (coord(), coord()).prop_map(|(x, y)| format!("l{} {}", x, y)),
        coord().prop_map(|x| format!("h{}", x)),
        coord().prop_map(|y| format!("v{}", y)),
        (coord(), coord(), coord(), coord()).prop_map(|(a, b, x, y)| format!("q{} {} {} {}", a, b, x, y)),
        (coord(), coord(), coord(), coord(), coord(), coord())
            .prop_map(|(a, b, c, d, x, y)| format!("c{} {} {} {} {} {}", a, b, c, d, x, y)),
        (coord(), coord(), coord(), coord()).prop_map(|(a, b, x, y)| format!("s{} {} {} {}", a, b, x, y)),
        (coord(), coord()).prop_map(|(x, y)| format!("t{} {}", x, y)),
        (1i32..100, 1i32..100, 0i32..360, 0u8..=1, 0u8..=1, coord(), coord()).prop_map(
            |(rx, ry, rotation, large, sweep, x, y)| {
                format!("a{} {} {} {} {} {} {}", rx, ry, rotation, large, sweep, x, y)
            }
        ),
        Just("z".to_string()),
        (coord(), coord()).prop_map(|(x, y)| format!("m{} {}", x, y)),
    ]
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x as f64, y as f64))
}

fn assert_near(a: Point, b: Point) -> Result<(), TestCaseError> {
    prop_assert!(a.distance_to(b) < 1e-9, "{} != {}", a, b);
    Ok(())
}

fn relative_path() -> impl Strategy<Value = String> {
    (coord(), coord(), prop::collection::vec(relative_segment(), 0..20))
        .prop_map(|(x, y, rest)| format!("m{} {} {}", x, y, rest.join(" ")))
}

fn normalized(data: &str) -> Vec<DrawCommand> {
    let mut commands = parse_path_data(data).unwrap();
    normalize(&mut commands);
    commands
}

fn collinear(a: Point, b: Point, c: Point) -> bool {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    cross.abs() < 1e-6
}

proptest! {
    #[test]
    fn normalizing_absolute_output_is_idempotent(data in relative_path()) {
        let once = normalized(&data);
        let absolute = to_path_data(&once);
        let twice = normalized(&absolute);
        prop_assert_eq!(to_path_data(&twice), absolute);
    }

    #[test]
    fn relative_and_absolute_forms_agree(data in relative_path()) {
        let relative = normalized(&data);
        let absolute = normalized(&to_path_data(&relative));
        prop_assert_eq!(relative.len(), absolute.len());
        for (a, b) in relative.iter().zip(&absolute) {
            let (a, b) = (a.end().unwrap(), b.end().unwrap());
            prop_assert!(a.distance_to(b) < 1e-9);
        }
    }

    #[test]
    fn closepath_returns_to_latest_moveto(data in relative_path()) {
        let commands = normalized(&data);
        let mut subpath_start = Point::ORIGIN;
        for command in &commands {
            match command.code() {
                'M' => subpath_start = command.end().unwrap(),
                'Z' => prop_assert_eq!(command.end().unwrap(), subpath_start),
                _ => {}
            }
        }
    }

    #[test]
    fn cubic_samples_follow_increasing_parameter(
        p0 in point(), p1 in point(), p2 in point(), p3 in point(),
    ) {
        let samples = CurveFlattener::default().sample_cubic(p0, p1, p2, p3);
        prop_assert_eq!(samples.len(), 10);
        // sample i sits at t = i/10, so order in the list is parameter order
        for (i, sample) in samples.iter().enumerate() {
            let t = i as f64 / 10.0;
            let mt = 1.0 - t;
            let (b0, b1, b2, b3) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
            let expected = Point::new(
                b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
                b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
            );
            assert_near(*sample, expected)?;
        }
    }

    #[test]
    fn quadratic_samples_follow_increasing_parameter(
        p0 in point(), p1 in point(), p2 in point(),
    ) {
        let samples = CurveFlattener::default().sample_quadratic(p0, p1, p2);
        prop_assert_eq!(samples.len(), 10);
        for (i, sample) in samples.iter().enumerate() {
            let t = i as f64 / 10.0;
            let mt = 1.0 - t;
            let (b0, b1, b2) = (mt * mt, 2.0 * mt * t, t * t);
            let expected = Point::new(
                b0 * p0.x + b1 * p1.x + b2 * p2.x,
                b0 * p0.y + b1 * p1.y + b2 * p2.y,
            );
            assert_near(*sample, expected)?;
        }
    }

    #[test]
    fn collinear_controls_give_collinear_samples(
        x0 in coord(), y0 in coord(), dx in 1i32..50, dy in -50i32..50,
        s1 in 0i32..10, s2 in 0i32..10, s3 in 1i32..10,
    ) {
        let at = |s: i32| Point::new((x0 + dx * s) as f64, (y0 + dy * s) as f64);
        let start = at(0);
        let end = at(s3 + 10);
        let samples = CurveFlattener::default().sample_cubic(start, at(s1), at(s2), end);
        prop_assert_eq!(samples.len(), 10);
        for sample in &samples {
            prop_assert!(collinear(start, end, *sample));
        }
    }
}
