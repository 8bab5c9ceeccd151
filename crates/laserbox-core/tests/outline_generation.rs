//! Outline generator behaviour: exact coordinates, symmetry, interlocking

use laserbox_core::{
    edge_profile, generate_box, generate_outline, rotate_half_turn, BoxDimensions, Corner, Edge,
    GeometryError, PanelKind, PanelSpec, Point,
};
use proptest::prelude::*;

fn back_panel() -> PanelSpec {
    PanelSpec {
        width: 100.0,
        height: 200.0,
        width_tab_count: 3,
        height_tab_count: 3,
        width_edge_insert: true,
        height_edge_insert: true,
        thickness: 3.175,
    }
}

#[test]
fn test_reference_panel_coordinates() {
    let outline = generate_outline(&back_panel()).expect("valid spec");
    let t = 3.175;

    assert_eq!(outline.points()[0], Point::new(t, t));
    // 4 corners + 4 traces of 2 * (2n - 2) points each
    assert_eq!(outline.len(), 4 + 8 + 8 + 8 + 8);

    let top = outline.edge_trace(Edge::Top).unwrap();
    assert_eq!(
        top,
        &[
            Point::new(20.0, t),
            Point::new(20.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, t),
            Point::new(60.0, t),
            Point::new(60.0, 0.0),
            Point::new(80.0, 0.0),
            Point::new(80.0, t),
        ]
    );

    let right = outline.edge_trace(Edge::Right).unwrap();
    assert_eq!(
        right,
        &[
            Point::new(100.0 - t, 40.0),
            Point::new(100.0, 40.0),
            Point::new(100.0, 80.0),
            Point::new(100.0 - t, 80.0),
            Point::new(100.0 - t, 120.0),
            Point::new(100.0, 120.0),
            Point::new(100.0, 160.0),
            Point::new(100.0 - t, 160.0),
        ]
    );

    assert_eq!(outline.corner(Corner::TopRight), Some(Point::new(100.0 - t, t)));
    assert_eq!(
        outline.corner(Corner::BottomRight),
        Some(Point::new(100.0 - t, 200.0 - t))
    );
    assert_eq!(
        outline.corner(Corner::BottomLeft),
        Some(Point::new(t, 200.0 - t))
    );

    let bounds = outline.bounds().unwrap();
    assert_eq!(bounds.width(), 100.0);
    assert_eq!(bounds.height(), 200.0);
}

#[test]
fn test_two_tabs_single_transition_pair() {
    let spec = PanelSpec {
        width: 50.0,
        height: 60.0,
        width_tab_count: 2,
        height_tab_count: 2,
        width_edge_insert: false,
        height_edge_insert: true,
        thickness: 2.0,
    };
    let outline = generate_outline(&spec).unwrap();
    let unit = 50.0 / 3.0;

    let top = outline.edge_trace(Edge::Top).unwrap();
    assert_eq!(
        top,
        &[
            Point::new(unit, 0.0),
            Point::new(unit, 2.0),
            Point::new(2.0 * unit, 2.0),
            Point::new(2.0 * unit, 0.0),
        ]
    );
}

#[test]
fn test_single_tab_is_rejected() {
    let mut spec = back_panel();
    spec.width_tab_count = 1;
    assert!(matches!(
        generate_outline(&spec),
        Err(GeometryError::InvalidSpec(_))
    ));

    let mut spec = back_panel();
    spec.height_tab_count = 0;
    assert!(matches!(
        generate_outline(&spec),
        Err(GeometryError::InvalidSpec(_))
    ));
}

#[test]
fn test_out_of_range_tab_counts_are_rejected() {
    for tabs in [0, 1, 1 << 31, u32::MAX] {
        assert!(
            matches!(
                edge_profile(10.0, tabs, true, 1.0),
                Err(GeometryError::InvalidSpec(_))
            ),
            "edge_profile with {} tabs",
            tabs
        );

        let mut spec = back_panel();
        spec.width_tab_count = tabs;
        assert!(matches!(
            generate_outline(&spec),
            Err(GeometryError::InvalidSpec(_))
        ));

        let mut spec = back_panel();
        spec.height_tab_count = tabs;
        assert!(matches!(
            generate_outline(&spec),
            Err(GeometryError::InvalidSpec(_))
        ));
    }
}

#[test]
fn test_non_positive_dimensions_are_rejected() {
    for (w, h, t) in [(0.0, 10.0, 1.0), (10.0, -1.0, 1.0), (10.0, 10.0, 0.0)] {
        let mut spec = back_panel();
        spec.width = w;
        spec.height = h;
        spec.thickness = t;
        assert!(matches!(
            generate_outline(&spec),
            Err(GeometryError::InvalidSpec(_))
        ));
    }
}

#[test]
fn test_opposite_edges_are_half_turn_rotations() {
    for (wi, hi) in [(true, true), (true, false), (false, true), (false, false)] {
        let mut spec = back_panel();
        spec.width_edge_insert = wi;
        spec.height_edge_insert = hi;
        let outline = generate_outline(&spec).unwrap();

        let top = outline.edge_trace(Edge::Top).unwrap();
        let bottom = outline.edge_trace(Edge::Bottom).unwrap();
        assert_eq!(rotate_half_turn(top, spec.width, spec.height), bottom);

        let right = outline.edge_trace(Edge::Right).unwrap();
        let left = outline.edge_trace(Edge::Left).unwrap();
        assert_eq!(rotate_half_turn(right, spec.width, spec.height), left);
    }
}

#[test]
fn test_mating_edges_interlock() {
    let dims = BoxDimensions {
        side_a: 100.0,
        side_a_tabs: 3,
        side_b: 200.0,
        side_b_tabs: 4,
        side_c: 50.0,
        side_c_tabs: 2,
        thickness: 3.0,
    };
    let outlines = generate_box(&dims).unwrap();

    // Side B is the height of both the back and the side panel.
    let back_right = outlines.back.edge_trace(Edge::Right).unwrap();
    let side_right = outlines.side.edge_trace(Edge::Right).unwrap();
    assert_eq!(back_right.len(), side_right.len());
    for (b, s) in back_right.iter().zip(side_right) {
        assert_eq!(b.y, s.y);
        let back_depth = dims.side_a - b.x;
        let side_depth = dims.side_c - s.x;
        assert!((back_depth + side_depth - dims.thickness).abs() < 1e-9);
    }

    // Side C is the width of both the side and the top panel.
    let side_top = outlines.side.edge_trace(Edge::Top).unwrap();
    let top_top = outlines.top.edge_trace(Edge::Top).unwrap();
    for (s, t) in side_top.iter().zip(top_top) {
        assert_eq!(s.x, t.x);
        assert!((s.y + t.y - dims.thickness).abs() < 1e-9);
    }
}

#[test]
fn test_outlines_can_be_generated_concurrently() {
    let dims = BoxDimensions {
        side_a: 120.0,
        side_a_tabs: 4,
        side_b: 80.0,
        side_b_tabs: 3,
        side_c: 60.0,
        side_c_tabs: 2,
        thickness: 4.0,
    };
    let sequential = generate_box(&dims).unwrap();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = PanelKind::ALL
            .iter()
            .map(|&kind| scope.spawn(move || generate_outline(&dims.panel_spec(kind))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (kind, outline) in PanelKind::ALL.iter().zip(parallel) {
        assert_eq!(&outline.unwrap(), sequential.get(*kind));
    }
}

fn valid_spec() -> impl Strategy<Value = PanelSpec> {
    (
        40.0f64..400.0,
        40.0f64..400.0,
        2u32..7,
        2u32..7,
        any::<bool>(),
        any::<bool>(),
        0.05f64..0.9,
    )
        .prop_map(|(width, height, wn, hn, wi, hi, ratio)| {
            let unit = (width / (2 * wn - 1) as f64).min(height / (2 * hn - 1) as f64);
            PanelSpec {
                width,
                height,
                width_tab_count: wn,
                height_tab_count: hn,
                width_edge_insert: wi,
                height_edge_insert: hi,
                thickness: unit * ratio,
            }
        })
}

proptest! {
    #[test]
    fn prop_outline_is_simple_and_clockwise(spec in valid_spec()) {
        let outline = generate_outline(&spec).unwrap();
        prop_assert!(outline.is_simple());
        prop_assert!(outline.signed_area() > 0.0);
    }

    #[test]
    fn prop_transition_counts_follow_segments(spec in valid_spec()) {
        let outline = generate_outline(&spec).unwrap();
        let width_points = 2 * (2 * spec.width_tab_count as usize - 2);
        let height_points = 2 * (2 * spec.height_tab_count as usize - 2);

        for edge in [Edge::Top, Edge::Bottom] {
            let trace = outline.edge_trace(edge).unwrap();
            prop_assert_eq!(trace.len(), width_points);
            prop_assert_eq!(trace.len() % 2, 0);
        }
        for edge in [Edge::Right, Edge::Left] {
            prop_assert_eq!(outline.edge_trace(edge).unwrap().len(), height_points);
        }
        prop_assert_eq!(outline.len(), 4 + 2 * width_points + 2 * height_points);
    }

    #[test]
    fn prop_phases_are_complementary(
        length in 20.0f64..500.0,
        tabs in 2u32..10,
        thickness in 0.5f64..5.0,
    ) {
        let insert = edge_profile(length, tabs, true, thickness).unwrap();
        let plain = edge_profile(length, tabs, false, thickness).unwrap();
        prop_assert_eq!(insert.len(), plain.len());
        for ((a_along, a_depth), (b_along, b_depth)) in insert.iter().zip(&plain) {
            prop_assert_eq!(a_along, b_along);
            prop_assert_eq!(a_depth + b_depth, thickness);
        }
    }
}
