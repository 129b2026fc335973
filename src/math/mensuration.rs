//! Areas and volumes of simplices.

use crate::geometry::{Tetrahedron, Triangle};

use super::{dot_perpendicular, Vector3};

/// Unsigned area of a triangle in any dimension.
#[must_use]
pub fn triangle_area<const D: usize>(triangle: &Triangle<D>) -> f64 {
    let [v0, v1, v2] = triangle.vertices();
    let e0 = v1 - v0;
    let e1 = v2 - v0;
    // |e0|^2 |e1|^2 - (e0 . e1)^2 is the squared norm of e0 x e1 in any dimension
    let gram = e0.norm_squared() * e1.norm_squared() - e0.dot(&e1).powi(2);
    0.5 * gram.max(0.0).sqrt()
}

/// Signed area of a 2D triangle, positive when counter-clockwise.
#[must_use]
pub fn triangle_signed_area_2d(triangle: &Triangle<2>) -> f64 {
    let [v0, v1, v2] = triangle.vertices();
    0.5 * dot_perpendicular(&(v1 - v0), &(v2 - v0))
}

/// Signed area of a 3D triangle, measured along a reference direction.
///
/// Returns half the projection of `(v1 - v0) x (v2 - v0)` onto
/// `direction`, which is expected to be of unit length.
#[must_use]
pub fn triangle_signed_area(triangle: &Triangle<3>, direction: &Vector3) -> f64 {
    let [v0, v1, v2] = triangle.vertices();
    0.5 * (v1 - v0).cross(&(v2 - v0)).dot(direction)
}

/// Signed volume, positive when `v3` lies on the side of `(v0, v1, v2)`
/// given by the right-hand rule.
#[must_use]
pub fn tetrahedron_signed_volume(tetra: &Tetrahedron) -> f64 {
    let [v0, v1, v2, v3] = tetra.vertices();
    (v1 - v0).dot(&(v2 - v0).cross(&(v3 - v0))) / 6.0
}

#[must_use]
pub fn tetrahedron_volume(tetra: &Tetrahedron) -> f64 {
    tetrahedron_signed_volume(tetra).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point2, Point3};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    // ── triangle areas ──

    #[test]
    fn signed_area_2d_follows_orientation() {
        let ccw = Triangle::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0));
        let cw = Triangle::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(1.0, 0.0));
        assert!((triangle_signed_area_2d(&ccw) - 0.5).abs() < 1e-15);
        assert!((triangle_signed_area_2d(&cw) + 0.5).abs() < 1e-15);
        assert!((triangle_area(&cw) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn signed_area_3d_uses_reference_direction() {
        let t = Triangle::new(p(0.0, 0.0, 5.0), p(2.0, 0.0, 5.0), p(0.0, 2.0, 5.0));
        assert!((triangle_signed_area(&t, &Vector3::z()) - 2.0).abs() < 1e-12);
        assert!((triangle_signed_area(&t, &-Vector3::z()) + 2.0).abs() < 1e-12);
        assert!((triangle_area(&t) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_triangle_has_zero_area() {
        let t = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(3.0, 3.0, 3.0));
        assert!(triangle_area(&t) < 1e-7);
    }

    // ── tetrahedron volumes ──

    #[test]
    fn unit_tetrahedron_volume() {
        let t = Tetrahedron::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0));
        assert!((tetrahedron_signed_volume(&t) - 1.0 / 6.0).abs() < 1e-15);
        assert!((tetrahedron_volume(&t) - 1.0 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn odd_permutation_flips_volume_sign() {
        let t = Tetrahedron::new(p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 0.0, 1.0));
        assert!((tetrahedron_signed_volume(&t) + 1.0 / 6.0).abs() < 1e-15);
        assert!((tetrahedron_volume(&t) - 1.0 / 6.0).abs() < 1e-15);
    }
}
