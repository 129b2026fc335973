pub mod barycentric;
pub mod mensuration;
pub mod predicates;

use crate::error::{GeometryError, Result};

/// Point in `D`-dimensional space.
pub type Point<const D: usize> = nalgebra::Point<f64, D>;

/// Displacement in `D`-dimensional space.
pub type Vector<const D: usize> = nalgebra::SVector<f64, D>;

/// 2D point type.
pub type Point2 = Point<2>;

/// 3D point type.
pub type Point3 = Point<3>;

/// 2D vector type.
pub type Vector2 = Vector<2>;

/// 3D vector type.
pub type Vector3 = Vector<3>;

/// Global geometric tolerance.
///
/// Gates every "effectively zero", coincidence and parallelism decision
/// in the kernel.
pub const GLOBAL_EPSILON: f64 = 1e-6;

/// Tolerance for squared lengths and areas.
pub const GLOBAL_EPSILON2: f64 = GLOBAL_EPSILON * GLOBAL_EPSILON;

/// Tolerance for volumes.
pub const GLOBAL_EPSILON3: f64 = GLOBAL_EPSILON2 * GLOBAL_EPSILON;

/// Returns `vector` scaled to unit length.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the vector is shorter than
/// [`GLOBAL_EPSILON`].
pub fn normalize<const D: usize>(vector: &Vector<D>) -> Result<Vector<D>> {
    let length = vector.norm();
    if length < GLOBAL_EPSILON {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(vector / length)
}

/// 2D perp-dot product, the z component of the 3D cross product.
#[must_use]
pub fn dot_perpendicular(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Euclidean distance between two points.
#[must_use]
pub fn point_point_distance<const D: usize>(a: &Point<D>, b: &Point<D>) -> f64 {
    (b - a).norm()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::GeokernError;

    #[test]
    fn normalize_unit_length() {
        let n = normalize(&Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn normalize_rejects_tiny_vector() {
        let result = normalize(&Vector2::new(1e-9, 0.0));
        assert!(matches!(
            result,
            Err(GeokernError::Geometry(GeometryError::ZeroVector))
        ));
    }

    #[test]
    fn perp_dot_orientation() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert!((dot_perpendicular(&x, &y) - 1.0).abs() < 1e-12);
        assert!((dot_perpendicular(&y, &x) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn point_distance_is_symmetric() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(-2.0, 6.0, 3.0);
        assert!((point_point_distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((point_point_distance(&a, &b) - point_point_distance(&b, &a)).abs() < 1e-15);
    }
}
