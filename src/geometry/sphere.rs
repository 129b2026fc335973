use crate::error::{GeometryError, Result};
use crate::math::Point;

/// A sphere (or ball) defined by its center and radius.
///
/// The same data describes both the boundary surface and the solid
/// region; the distance functions choose the semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere<const D: usize> {
    origin: Point<D>,
    radius: f64,
}

/// Solid counterpart of [`Sphere`].
pub type Ball<const D: usize> = Sphere<D>;

impl<const D: usize> Sphere<D> {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not finite.
    pub fn new(origin: Point<D>, radius: f64) -> Result<Self> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "radius",
                value: radius,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self { origin, radius })
    }

    #[must_use]
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
