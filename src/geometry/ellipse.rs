use crate::error::{GeometryError, Result};
use crate::math::{normalize, Point, Vector};

/// `D` axis vectors, each carrying a direction and a length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<const D: usize> {
    axes: [Vector<D>; D],
}

impl<const D: usize> Frame<D> {
    #[must_use]
    pub fn new(axes: [Vector<D>; D]) -> Self {
        Self { axes }
    }

    /// The canonical frame: unit basis vectors.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            axes: std::array::from_fn(|i| Vector::<D>::from_fn(|row, _| if row == i { 1.0 } else { 0.0 })),
        }
    }

    #[must_use]
    pub fn axes(&self) -> &[Vector<D>; D] {
        &self.axes
    }

    /// Returns axis `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index >= D`.
    #[allow(clippy::cast_precision_loss)]
    pub fn direction(&self, index: usize) -> Result<&Vector<D>> {
        self.axes.get(index).ok_or_else(|| {
            GeometryError::ParameterOutOfRange {
                parameter: "axis index",
                value: index as f64,
                min: 0.0,
                max: (D - 1) as f64,
            }
            .into()
        })
    }

    /// Returns the length of axis `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index >= D`.
    pub fn length(&self, index: usize) -> Result<f64> {
        Ok(self.direction(index)?.norm())
    }

    /// Orthonormalizes the axes with Gram-Schmidt, keeping the input
    /// lengths alongside the corrected unit directions.
    ///
    /// # Errors
    ///
    /// Returns an error if an axis is zero-length or linearly dependent
    /// on the previous ones.
    pub fn orthonormalized(&self) -> Result<([Vector<D>; D], [f64; D])> {
        let mut directions = [Vector::<D>::zeros(); D];
        let mut lengths = [0.0; D];
        for i in 0..D {
            lengths[i] = self.axes[i].norm();
            let mut corrected = self.axes[i];
            for previous in &directions[..i] {
                corrected -= previous * previous.dot(&self.axes[i]);
            }
            directions[i] = normalize(&corrected)?;
        }
        Ok((directions, lengths))
    }
}

/// An ellipse (or ellipsoid, in 3D) given by its center and semi-axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse<const D: usize> {
    center: Point<D>,
    axes: Frame<D>,
}

impl<const D: usize> Ellipse<D> {
    #[must_use]
    pub fn new(center: Point<D>, axes: Frame<D>) -> Self {
        Self { center, axes }
    }

    #[must_use]
    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    #[must_use]
    pub fn axes(&self) -> &Frame<D> {
        &self.axes
    }
}
