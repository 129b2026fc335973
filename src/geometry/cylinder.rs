use crate::error::{GeometryError, Result};

use super::Segment;

/// A finite, closed cylinder: an axis segment and a radius.
///
/// The height is the length of the axis; the end caps are the disks
/// centered on the axis endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    axis: Segment<3>,
    radius: f64,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not finite.
    pub fn new(axis: Segment<3>, radius: f64) -> Result<Self> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "radius",
                value: radius,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self { axis, radius })
    }

    #[must_use]
    pub fn axis(&self) -> &Segment<3> {
        &self.axis
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.axis.length()
    }
}
