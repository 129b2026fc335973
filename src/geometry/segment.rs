use crate::error::Result;
use crate::math::{normalize, Point, Vector};

/// A straight segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<const D: usize> {
    vertices: [Point<D>; 2],
}

/// 2D segment.
pub type Segment2 = Segment<2>;

/// 3D segment.
pub type Segment3 = Segment<3>;

impl<const D: usize> Segment<D> {
    /// Creates a segment from its two endpoints.
    #[must_use]
    pub fn new(start: Point<D>, end: Point<D>) -> Self {
        Self {
            vertices: [start, end],
        }
    }

    /// Returns the two endpoints.
    #[must_use]
    pub fn vertices(&self) -> &[Point<D>; 2] {
        &self.vertices
    }

    /// Returns `end - start`, not normalized.
    #[must_use]
    pub fn direction(&self) -> Vector<D> {
        self.vertices[1] - self.vertices[0]
    }

    /// Returns the unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has (near) zero length.
    pub fn normalized_direction(&self) -> Result<Vector<D>> {
        normalize(&self.direction())
    }

    /// Returns the distance between the endpoints.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Returns the midpoint.
    #[must_use]
    pub fn barycenter(&self) -> Point<D> {
        self.vertices[0] + self.direction() * 0.5
    }

    /// Returns the point `start + t * (end - start)`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point<D> {
        self.vertices[0] + self.direction() * t
    }
}
