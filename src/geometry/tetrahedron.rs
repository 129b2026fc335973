use crate::math::Point3;

use super::Triangle;

/// A tetrahedron given by its four vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron {
    vertices: [Point3; 4],
}

impl Tetrahedron {
    /// Vertex indices of each facet; facet `i` is opposite vertex `i` and
    /// is oriented towards the inside for a positively oriented tetrahedron.
    pub const FACET_VERTICES: [[usize; 3]; 4] = [[1, 3, 2], [0, 2, 3], [3, 1, 0], [0, 1, 2]];

    #[must_use]
    pub fn new(v0: Point3, v1: Point3, v2: Point3, v3: Point3) -> Self {
        Self {
            vertices: [v0, v1, v2, v3],
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point3; 4] {
        &self.vertices
    }

    #[must_use]
    pub fn barycenter(&self) -> Point3 {
        let sum = self
            .vertices
            .iter()
            .fold(Point3::origin().coords, |acc, v| acc + v.coords);
        Point3::from(sum / 4.0)
    }

    /// Returns facet `facet` (opposite vertex `facet`) as a triangle.
    #[must_use]
    pub fn facet(&self, facet: usize) -> Triangle<3> {
        let [a, b, c] = Self::FACET_VERTICES[facet];
        Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets_exclude_opposite_vertex() {
        for (facet, vertices) in Tetrahedron::FACET_VERTICES.iter().enumerate() {
            assert!(!vertices.contains(&facet));
        }
    }

    #[test]
    fn barycenter_of_unit_tetrahedron() {
        let t = Tetrahedron::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        assert!((t.barycenter() - Point3::new(0.25, 0.25, 0.25)).norm() < 1e-15);
        assert_eq!(t.facet(3).vertices()[2], Point3::new(0.0, 1.0, 0.0));
    }
}
