//! # Solid extruder
//!
//! Turns a closed outline into a closed triangle mesh of constant depth:
//!
//! - top cap at `z = 0`, ear-clipped from the outline
//! - bottom cap at `z = -depth` with the same triangles, reversed
//! - two triangles per boundary segment for the side walls
//!
//! The outline is first oriented counter-clockwise (seen from `+z`), which
//! makes every facet normal point out of the solid. Coordinates are scaled
//! uniformly after triangulation, so `scale` is a pure unit conversion.

use crate::error::{ExportError, ExportResult};
use laserbox_core::{GeometryError, Outline, Point};
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

const COINCIDENT_EPSILON: f64 = 1e-9;

/// One triangle of the mesh with its outward unit normal
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub vertices: [Point3<f64>; 3],
    pub normal: Vector3<f64>,
}

impl Facet {
    pub fn new(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        let normal = (v2 - v1)
            .cross(&(v3 - v1))
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros);
        Self {
            vertices: [v1, v2, v3],
            normal,
        }
    }
}

/// An extruded panel: an unindexed triangle soup
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    facets: Vec<Facet>,
}

impl Solid {
    /// Wrap an existing facet list. Nothing is checked; see
    /// [`Solid::ensure_closed`].
    pub fn from_facets(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    pub fn triangles(&self) -> &[Facet] {
        &self.facets
    }

    pub fn triangle_count(&self) -> usize {
        self.facets.len()
    }

    /// Axis-aligned bounding box as `(min, max)`
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.facets.first()?.vertices[0];
        Some(
            self.facets
                .iter()
                .flat_map(|f| f.vertices.iter())
                .fold((first, first), |(min, max), v| {
                    (
                        Point3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z)),
                        Point3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z)),
                    )
                }),
        )
    }

    /// True when every edge is used by exactly two facets, once in each
    /// direction (a closed, consistently oriented surface).
    pub fn is_watertight(&self) -> bool {
        if self.facets.is_empty() {
            return false;
        }

        let mut directed: HashMap<(VertexKey, VertexKey), usize> = HashMap::new();
        for facet in &self.facets {
            let keys = facet.vertices.map(VertexKey::from);
            for k in 0..3 {
                let edge = (keys[k], keys[(k + 1) % 3]);
                if edge.0 == edge.1 {
                    return false;
                }
                *directed.entry(edge).or_insert(0) += 1;
            }
        }

        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Fail with `DegenerateOutline` unless [`Solid::is_watertight`] holds.
    pub fn ensure_closed(&self) -> ExportResult<()> {
        if self.is_watertight() {
            return Ok(());
        }
        Err(degenerate(format!(
            "mesh of {} facets is not closed",
            self.facets.len()
        )))
    }

    /// Binary STL: 80-byte header, facet count, 50 bytes per facet.
    pub fn to_stl_bytes(&self) -> ExportResult<Vec<u8>> {
        let triangles: Vec<stl_io::Triangle> = self
            .facets
            .iter()
            .map(|f| stl_io::Triangle {
                normal: stl_io::Normal::new([
                    f.normal.x as f32,
                    f.normal.y as f32,
                    f.normal.z as f32,
                ]),
                vertices: f.vertices.map(|v| {
                    stl_io::Vertex::new([v.x as f32, v.y as f32, v.z as f32])
                }),
            })
            .collect();

        let mut cursor = Cursor::new(Vec::with_capacity(84 + 50 * triangles.len()));
        stl_io::write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u64; 3]);

impl From<Point3<f64>> for VertexKey {
    fn from(p: Point3<f64>) -> Self {
        // -0.0 and 0.0 are the same vertex
        let bits = |v: f64| (v + 0.0).to_bits();
        Self([bits(p.x), bits(p.y), bits(p.z)])
    }
}

/// Extrude an outline to `depth`, then scale every coordinate by `scale`.
pub fn extrude(outline: &Outline, depth: f64, scale: f64) -> ExportResult<Solid> {
    positive("depth", depth)?;
    positive("scale", scale)?;

    let ring = oriented_ring(outline)?;
    let n = ring.len();
    let caps = ear_clip(&ring)?;

    let top = |i: usize| Point3::new(ring[i].x * scale, ring[i].y * scale, 0.0);
    let bottom = |i: usize| Point3::new(ring[i].x * scale, ring[i].y * scale, -depth * scale);

    let mut facets = Vec::with_capacity(2 * caps.len() + 2 * n);
    for &[a, b, c] in &caps {
        facets.push(Facet::new(top(a), top(b), top(c)));
        facets.push(Facet::new(bottom(a), bottom(c), bottom(b)));
    }
    for i in 0..n {
        let j = (i + 1) % n;
        facets.push(Facet::new(top(i), bottom(i), bottom(j)));
        facets.push(Facet::new(top(i), bottom(j), top(j)));
    }

    debug!(
        "Extruded {} points into {} facets (depth {}, scale {})",
        n,
        facets.len(),
        depth,
        scale
    );

    let solid = Solid { facets };
    solid.ensure_closed()?;
    Ok(solid)
}

fn positive(name: &str, value: f64) -> ExportResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ExportError::InvalidParameter(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate the outline and return its points counter-clockwise.
fn oriented_ring(outline: &Outline) -> ExportResult<Vec<Point>> {
    let points = outline.points();
    if points.is_empty() {
        return Err(GeometryError::EmptyOutline.into());
    }
    if points.len() < 3 {
        return Err(degenerate(format!(
            "need at least 3 points, got {}",
            points.len()
        )));
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(degenerate("non-finite coordinate".to_string()));
    }

    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if (a.x - b.x).abs() <= COINCIDENT_EPSILON && (a.y - b.y).abs() <= COINCIDENT_EPSILON {
            return Err(degenerate(format!(
                "zero-length edge at point {} ({}, {})",
                i, a.x, a.y
            )));
        }
    }

    let area = outline.signed_area();
    if area.abs() <= COINCIDENT_EPSILON {
        return Err(degenerate("outline encloses no area".to_string()));
    }
    if !outline.is_simple() {
        return Err(degenerate("outline intersects itself".to_string()));
    }

    let mut ring = points.to_vec();
    if area < 0.0 {
        ring.reverse();
    }
    Ok(ring)
}

fn degenerate(reason: String) -> ExportError {
    GeometryError::DegenerateOutline(reason).into()
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Ear clipping on a counter-clockwise simple polygon.
///
/// Returns `n - 2` index triangles, each counter-clockwise. An ear is
/// rejected when any other vertex lies inside it or on its boundary, so no
/// cap diagonal ever runs through a collinear boundary point.
fn ear_clip(ring: &[Point]) -> ExportResult<Vec<[usize; 3]>> {
    let n = ring.len();
    let (min_x, max_x, min_y, max_y) = ring.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
    );
    let diag_sq = (max_x - min_x).powi(2) + (max_y - min_y).powi(2);
    let eps = 1e-12 * diag_sq;

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&k| {
            let a = remaining[(k + m - 1) % m];
            let b = remaining[k];
            let c = remaining[(k + 1) % m];
            is_ear(ring, &remaining, a, b, c, eps)
        });

        let Some(k) = ear else {
            return Err(degenerate(format!(
                "triangulation stalled with {} vertices left",
                m
            )));
        };

        triangles.push([
            remaining[(k + m - 1) % m],
            remaining[k],
            remaining[(k + 1) % m],
        ]);
        remaining.remove(k);
    }

    if cross(ring[remaining[0]], ring[remaining[1]], ring[remaining[2]]) <= eps {
        return Err(degenerate("last triangle has no area".to_string()));
    }
    triangles.push([remaining[0], remaining[1], remaining[2]]);
    Ok(triangles)
}

fn is_ear(ring: &[Point], remaining: &[usize], a: usize, b: usize, c: usize, eps: f64) -> bool {
    let (pa, pb, pc) = (ring[a], ring[b], ring[c]);
    if cross(pa, pb, pc) <= eps {
        return false;
    }

    remaining.iter().all(|&i| {
        if i == a || i == b || i == c {
            return true;
        }
        let p = ring[i];
        let same = |q: Point| {
            (p.x - q.x).abs() <= COINCIDENT_EPSILON && (p.y - q.y).abs() <= COINCIDENT_EPSILON
        };
        if same(pa) || same(pb) || same(pc) {
            return true;
        }
        let inside = cross(pa, pb, p) >= -eps && cross(pb, pc, p) >= -eps && cross(pc, pa, p) >= -eps;
        !inside
    })
}
