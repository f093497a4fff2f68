//! Property tests for the planning pipeline on rectangular fields.

use furrow::clip::point_in_region;
use furrow::waypoints::{TraversalPattern, sequence_with_pattern};
use furrow::{FieldPolygon, Parameters, Point, Region, generate_guidance_lines, plan_coverage};
use proptest::prelude::*;

fn rectangle(width: f64, height: f64) -> FieldPolygon {
    FieldPolygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ])
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn two_waypoints_per_line(
        width in 10.0f64..200.0,
        height in 10.0f64..200.0,
        tool in 0.5f64..20.0,
        passes in 0u32..3,
        angle in 0.0f64..179.9,
    ) {
        let plan = plan_coverage(&rectangle(width, height), &Parameters::new(tool, passes, angle)).unwrap();
        prop_assert_eq!(plan.waypoints.len(), 2 * plan.lines.len());
        for (line, pair) in plan.lines.iter().zip(plan.waypoints.chunks_exact(2)) {
            prop_assert!(line.length() > 1e-9);
            prop_assert!(
                (pair[0] == line.start() && pair[1] == line.end())
                    || (pair[0] == line.end() && pair[1] == line.start())
            );
        }
    }

    #[test]
    fn lines_without_headland_stay_in_field(
        width in 10.0f64..200.0,
        height in 10.0f64..200.0,
        tool in 0.5f64..20.0,
        angle in 0.0f64..179.9,
    ) {
        let field = rectangle(width, height);
        let region = Region::from(&field);
        let lines = generate_guidance_lines(&field, &Parameters::new(tool, 0, angle)).unwrap();
        for line in &lines {
            for p in [line.start(), line.midpoint(), line.end()] {
                prop_assert!(point_in_region(p, &region, 1e-6), "{:?} outside field", p);
            }
        }
    }

    #[test]
    fn axis_aligned_rows_cover_the_height(
        width in 10.0f64..200.0,
        height in 10.0f64..200.0,
        tool in 0.5f64..20.0,
    ) {
        let lines = generate_guidance_lines(&rectangle(width, height), &Parameters::new(tool, 0, 0.0)).unwrap();
        let expected = (height / tool).floor() as i64 + 1;
        prop_assert!((lines.len() as i64 - expected).abs() <= 1, "{} rows, expected about {}", lines.len(), expected);
        for line in &lines {
            prop_assert!((line.length() - width).abs() < 1e-6);
        }
        for pair in lines.windows(2) {
            prop_assert!(pair[0].y1 <= pair[1].y1);
        }
    }

    #[test]
    fn alternating_never_travels_further_than_same_side(
        width in 10.0f64..200.0,
        height in 10.0f64..200.0,
        tool in 0.5f64..20.0,
        quarter in any::<bool>(),
    ) {
        let angle = if quarter { 90.0 } else { 0.0 };
        let lines = generate_guidance_lines(&rectangle(width, height), &Parameters::new(tool, 0, angle)).unwrap();
        let zigzag = sequence_with_pattern(&lines, TraversalPattern::Boustrophedon);
        let same_side = sequence_with_pattern(&lines, TraversalPattern::SameSide);

        for i in 1..lines.len() {
            let hop = zigzag[2 * i - 1].distance(zigzag[2 * i]);
            let straight_hop = same_side[2 * i - 1].distance(same_side[2 * i]);
            prop_assert!(hop <= straight_hop + 1e-9, "hop {} longer than {}", hop, straight_hop);
        }
    }

    #[test]
    fn headland_passes_never_reduce_lines(
        width in 10.0f64..200.0,
        height in 10.0f64..200.0,
        tool in 1.0f64..20.0,
        angle in 0.0f64..179.9,
    ) {
        let field = rectangle(width, height);
        let mut previous = 0;
        for passes in 0..3 {
            let lines = generate_guidance_lines(&field, &Parameters::new(tool, passes, angle)).unwrap();
            prop_assert!(lines.len() >= previous, "{} passes: {} < {}", passes, lines.len(), previous);
            previous = lines.len();
        }
    }

    #[test]
    fn planning_is_deterministic(
        width in 10.0f64..200.0,
        height in 10.0f64..200.0,
        tool in 0.5f64..20.0,
        passes in 0u32..3,
        angle in 0.0f64..179.9,
    ) {
        let field = rectangle(width, height);
        let params = Parameters::new(tool, passes, angle);
        prop_assert_eq!(plan_coverage(&field, &params).unwrap(), plan_coverage(&field, &params).unwrap());
    }
}
