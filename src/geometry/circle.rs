use crate::error::{GeometryError, Result};
use crate::math::Point3;

use super::Plane;

/// A circle embedded in a 3D plane, centered at the plane origin.
///
/// As with [`Sphere`](super::Sphere), the same data describes the
/// boundary curve and the solid [`Disk`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    plane: Plane,
    radius: f64,
}

/// Solid counterpart of [`Circle`].
pub type Disk = Circle;

impl Circle {
    /// Creates a circle of the given radius around the plane origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not finite.
    pub fn new(plane: Plane, radius: f64) -> Result<Self> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "radius",
                value: radius,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self { plane, radius })
    }

    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    #[must_use]
    pub fn center(&self) -> &Point3 {
        self.plane.origin()
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
