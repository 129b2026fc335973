use crate::error::Result;
use crate::math::{normalize, Point, Vector};

use super::Segment;

/// An infinite line defined by an origin point and a unit direction.
///
/// The direction is normalized at construction, so every algorithm can
/// rely on `|direction| == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteLine<const D: usize> {
    origin: Point<D>,
    direction: Vector<D>,
}

/// 2D line.
pub type InfiniteLine2 = InfiniteLine<2>;

/// 3D line.
pub type InfiniteLine3 = InfiniteLine<3>;

impl<const D: usize> InfiniteLine<D> {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point<D>, direction: &Vector<D>) -> Result<Self> {
        Ok(Self {
            origin,
            direction: normalize(direction)?,
        })
    }

    /// Creates the line supporting a segment, oriented from its start to its end.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has (near) zero length.
    pub fn from_segment(segment: &Segment<D>) -> Result<Self> {
        Ok(Self {
            origin: segment.vertices()[0],
            direction: segment.normalized_direction()?,
        })
    }

    /// Returns the parallel line passing through `origin`.
    #[must_use]
    pub fn with_origin(&self, origin: Point<D>) -> Self {
        Self {
            origin,
            direction: self.direction,
        }
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector<D> {
        &self.direction
    }

    /// Returns the point `origin + t * direction`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point<D> {
        self.origin + self.direction * t
    }

    /// Returns the parameter of the orthogonal projection of `point`.
    #[must_use]
    pub fn parameter_of(&self, point: &Point<D>) -> f64 {
        (point - self.origin).dot(&self.direction)
    }
}
