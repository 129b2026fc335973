use std::f64::consts::PI;

use crate::math::{normalize, Point, Point3, Vector3};

use super::Plane;

/// A triangle given by its three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<const D: usize> {
    vertices: [Point<D>; 3],
}

/// 2D triangle.
pub type Triangle2 = Triangle<2>;

/// 3D triangle.
pub type Triangle3 = Triangle<3>;

/// Minimal angle, in radians, between the two edges at a pivot vertex.
const PIVOT_ANGLE: f64 = PI / 180.0;

impl<const D: usize> Triangle<D> {
    #[must_use]
    pub fn new(v0: Point<D>, v1: Point<D>, v2: Point<D>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point<D>; 3] {
        &self.vertices
    }

    /// Returns the centroid of the three vertices.
    #[must_use]
    pub fn barycenter(&self) -> Point<D> {
        let [v0, v1, v2] = &self.vertices;
        Point::from((v0.coords + v1.coords + v2.coords) / 3.0)
    }
}

impl Triangle<3> {
    /// Returns a vertex whose two adjacent edges are far enough from
    /// collinear to span the triangle plane, with the corresponding unit
    /// normal.
    ///
    /// The normal follows the vertex order: `(v1 - v0) x (v2 - v0)`.
    /// Returns `None` for degenerate triangles.
    #[must_use]
    pub fn pivot_and_normal(&self) -> Option<(usize, Vector3)> {
        for pivot in 0..3 {
            let next = (pivot + 1) % 3;
            let prev = (pivot + 2) % 3;
            let edge0 = normalize(&(self.vertices[next] - self.vertices[pivot])).ok()?;
            let edge1 = normalize(&(self.vertices[prev] - self.vertices[pivot])).ok()?;
            let normal = edge0.cross(&edge1);
            let length = normal.norm();
            if length > PIVOT_ANGLE {
                return Some((pivot, normal / length));
            }
        }
        None
    }

    /// Returns the pivot vertex index, see [`Triangle::pivot_and_normal`].
    #[must_use]
    pub fn pivot(&self) -> Option<usize> {
        self.pivot_and_normal().map(|(pivot, _)| pivot)
    }

    /// Returns the unit normal, or `None` if the triangle is degenerate.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3> {
        self.pivot_and_normal().map(|(_, normal)| normal)
    }

    /// Returns the supporting plane, with origin at the barycenter.
    #[must_use]
    pub fn plane(&self) -> Option<Plane> {
        let normal = self.normal()?;
        Plane::new(self.barycenter(), &normal).ok()
    }

    /// Returns the three vertices reordered to start at `pivot`.
    #[must_use]
    pub(crate) fn rotated(&self, pivot: usize) -> [Point3; 3] {
        [0, 1, 2].map(|i| self.vertices[(pivot + i) % 3])
    }
}
