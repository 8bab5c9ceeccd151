//! Tab-joint outline generator
//!
//! Builds the closed cut outline of one panel. Each edge is split into
//! `2n - 1` equal segments that alternate between flush (on the nominal edge
//! line) and recessed (pushed inward by the material thickness). The top and
//! right edges are generated; bottom and left are the top and right traces
//! rotated half a turn about the panel center, which makes opposite edges
//! point-symmetric complements.
//!
//! Coordinates use the drawing frame: origin at the top-left corner, x to
//! the right, y down. The outline runs clockwise in that frame (top, right,
//! bottom, left), which is a positive signed area when read in a y-up frame.

use crate::error::GeometryResult;
use crate::panel::{check_tabs, PanelSpec};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// A 2D point in the panel's local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate 180° about the center of a `width` × `height` panel.
    pub fn rotate_half_turn(self, width: f64, height: f64) -> Self {
        Self::new(width - self.x, height - self.y)
    }
}

/// Rotate a point sequence 180° about the center of a `width` × `height`
/// panel, keeping the order.
pub fn rotate_half_turn(points: &[Point], width: f64, height: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| p.rotate_half_turn(width, height))
        .collect()
}

/// Panel edges in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }
}

/// Panel corners in traversal order; each precedes the edge of the same index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Where each corner and edge trace sits inside a generated outline
#[derive(Debug, Clone, PartialEq)]
struct Layout {
    corners: [usize; 4],
    edges: [Range<usize>; 4],
}

/// A closed polygon; the last point implicitly connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<Point>,
    layout: Option<Layout>,
}

impl Outline {
    /// Wrap an arbitrary point sequence. No validation happens here; the
    /// consumers check what they need.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            layout: None,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// The trace points of one edge, excluding the corner points.
    ///
    /// Only available on outlines produced by [`generate_outline`].
    pub fn edge_trace(&self, edge: Edge) -> Option<&[Point]> {
        let layout = self.layout.as_ref()?;
        Some(&self.points[layout.edges[edge.index()].clone()])
    }

    /// The (possibly inset) corner point.
    ///
    /// Only available on outlines produced by [`generate_outline`].
    pub fn corner(&self, corner: Corner) -> Option<Point> {
        let layout = self.layout.as_ref()?;
        Some(self.points[layout.corners[corner.index()]])
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.points.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Shoelace area, positive for the generator's traversal direction.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }

    /// True when no two non-adjacent boundary segments touch.
    pub fn is_simple(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            let a1 = self.points[i];
            let a2 = self.points[(i + 1) % n];
            for j in (i + 1)..n {
                // adjacent segments share an endpoint by construction
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let b1 = self.points[j];
                let b2 = self.points[(j + 1) % n];
                if segments_touch(a1, a2, b1, b2) {
                    return false;
                }
            }
        }
        true
    }
}

fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_touch(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orient(b1, b2, a1);
    let d2 = orient(b1, b2, a2);
    let d3 = orient(a1, a2, b1);
    let d4 = orient(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Square-wave trace of one edge as `(along, depth)` pairs.
///
/// Segment `s` is recessed when `(s % 2 == 0) == insert`, so insert edges
/// start and end recessed and plain edges start and end flush. A corner pair
/// is emitted at every segment boundary; the two edge ends are left to the
/// panel corners.
///
/// Fails with `InvalidSpec` when `tabs` is below 2 or too large to count
/// segments for.
pub fn edge_profile(
    length: f64,
    tabs: u32,
    insert: bool,
    thickness: f64,
) -> GeometryResult<Vec<(f64, f64)>> {
    let segments = check_tabs("tabs", tabs)?;
    let unit = length / segments as f64;
    let depth = |segment: u32| {
        if (segment % 2 == 0) == insert {
            thickness
        } else {
            0.0
        }
    };

    let mut trace = Vec::with_capacity(2 * (segments as usize - 1));
    for boundary in 1..segments {
        let along = boundary as f64 * unit;
        trace.push((along, depth(boundary - 1)));
        trace.push((along, depth(boundary)));
    }
    Ok(trace)
}

/// Generate the closed outline of one panel.
pub fn generate_outline(spec: &PanelSpec) -> GeometryResult<Outline> {
    spec.validate()?;

    let w = spec.width;
    let h = spec.height;
    let t = spec.thickness;

    debug!(
        "Panel {}x{}: width unit {}, height unit {}",
        w,
        h,
        spec.width_unit()?,
        spec.height_unit()?
    );

    let top: Vec<Point> = edge_profile(w, spec.width_tab_count, spec.width_edge_insert, t)?
        .into_iter()
        .map(|(along, depth)| Point::new(along, depth))
        .collect();
    let right: Vec<Point> = edge_profile(h, spec.height_tab_count, spec.height_edge_insert, t)?
        .into_iter()
        .map(|(along, depth)| Point::new(w - depth, along))
        .collect();
    let bottom = rotate_half_turn(&top, w, h);
    let left = rotate_half_turn(&right, w, h);

    // The x inset follows the height edges and the y inset the width edges:
    // an insert edge pair leaves room for the mating panel at each corner.
    let x1 = if spec.height_edge_insert { t } else { 0.0 };
    let y1 = if spec.width_edge_insert { t } else { 0.0 };
    let x2 = w - x1;
    let y2 = h - y1;

    let corner_points = [
        Point::new(x1, y1),
        Point::new(x2, y1),
        Point::new(x2, y2),
        Point::new(x1, y2),
    ];
    let traces = [top, right, bottom, left];

    let total = 4 + traces.iter().map(Vec::len).sum::<usize>();
    let mut points = Vec::with_capacity(total);
    let mut corners = [0usize; 4];
    let mut edges: [Range<usize>; 4] = Default::default();

    for (i, (corner, trace)) in corner_points.into_iter().zip(traces).enumerate() {
        corners[i] = points.len();
        points.push(corner);
        let start = points.len();
        points.extend(trace);
        edges[i] = start..points.len();
    }

    debug!("Generated outline with {} points", points.len());

    Ok(Outline {
        points,
        layout: Some(Layout { corners, edges }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(w_insert: bool, h_insert: bool) -> PanelSpec {
        PanelSpec {
            width: 100.0,
            height: 200.0,
            width_tab_count: 3,
            height_tab_count: 3,
            width_edge_insert: w_insert,
            height_edge_insert: h_insert,
            thickness: 3.175,
        }
    }

    #[test]
    fn test_edge_profile_insert() {
        let profile = edge_profile(100.0, 3, true, 3.0).unwrap();
        assert_eq!(
            profile,
            vec![
                (20.0, 3.0),
                (20.0, 0.0),
                (40.0, 0.0),
                (40.0, 3.0),
                (60.0, 3.0),
                (60.0, 0.0),
                (80.0, 0.0),
                (80.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_edge_profile_plain() {
        let profile = edge_profile(100.0, 3, false, 3.0).unwrap();
        assert_eq!(
            profile,
            vec![
                (20.0, 0.0),
                (20.0, 3.0),
                (40.0, 3.0),
                (40.0, 0.0),
                (60.0, 0.0),
                (60.0, 3.0),
                (80.0, 3.0),
                (80.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_corner_insets() {
        let outline = generate_outline(&spec(true, false)).unwrap();
        assert_eq!(outline.corner(Corner::TopLeft), Some(Point::new(0.0, 3.175)));
        assert_eq!(
            outline.corner(Corner::BottomRight),
            Some(Point::new(100.0, 200.0 - 3.175))
        );

        let outline = generate_outline(&spec(false, true)).unwrap();
        assert_eq!(outline.corner(Corner::TopLeft), Some(Point::new(3.175, 0.0)));
        assert_eq!(
            outline.corner(Corner::TopRight),
            Some(Point::new(100.0 - 3.175, 0.0))
        );

        let outline = generate_outline(&spec(false, false)).unwrap();
        assert_eq!(outline.corner(Corner::BottomLeft), Some(Point::new(0.0, 200.0)));
    }

    #[test]
    fn test_signed_area_positive() {
        for (wi, hi) in [(true, true), (true, false), (false, true), (false, false)] {
            let outline = generate_outline(&spec(wi, hi)).unwrap();
            assert!(outline.signed_area() > 0.0);
        }
    }

    #[test]
    fn test_arbitrary_outline_has_no_layout() {
        let outline = Outline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        assert!(outline.edge_trace(Edge::Top).is_none());
        assert!(outline.corner(Corner::TopLeft).is_none());
        assert_eq!(outline.signed_area(), 0.5);
    }

    #[test]
    fn test_is_simple_detects_bow_tie() {
        let bow_tie = Outline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]);
        assert!(!bow_tie.is_simple());

        let square = Outline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        assert!(square.is_simple());
    }
}
