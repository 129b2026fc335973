//! Distances from a point to segments, lines and planes.

use crate::geometry::{InfiniteLine, Plane, Segment};
use crate::math::{dot_perpendicular, Point, Point2, Point3, GLOBAL_EPSILON, GLOBAL_EPSILON2};

/// Relative height under which Heron's formula is dominated by cancellation.
const HERON_CANCELLATION: f64 = 1e-7;

/// Height over `base` of the triangle with side lengths `side0`, `side1`
/// and `base`, from Heron's formula.
///
/// Sides are sorted and combined in Kahan's order so the product stays
/// accurate for needle-like triangles. Returns `None` when the closed form
/// cannot be trusted.
fn heron_height(side0: f64, side1: f64, base: f64) -> Option<f64> {
    if base < GLOBAL_EPSILON {
        return None;
    }
    let mut sides = [side0, side1, base];
    sides.sort_by(|x, y| y.total_cmp(x));
    let [a, b, c] = sides;
    let product = (a + (b + c)) * (c - (a - b)) * (c + (a - b)) * (a + (b - c));
    if product < 0.0 {
        return None;
    }
    let height = 0.5 * product.sqrt() / base;
    if !height.is_finite() || height > side0.min(side1) + GLOBAL_EPSILON {
        return None;
    }
    Some(height)
}

/// Distance from a point to a segment, with the closest segment point.
///
/// A zero-length segment behaves as its first endpoint.
#[must_use]
pub fn point_segment_distance<const D: usize>(
    point: &Point<D>,
    segment: &Segment<D>,
) -> (f64, Point<D>) {
    let [v0, v1] = segment.vertices();
    let to_start = (point - v0).norm_squared();
    let to_end = (point - v1).norm_squared();
    let length = segment.direction().norm_squared();
    if length <= GLOBAL_EPSILON2 {
        return (to_start.sqrt(), *v0);
    }

    // Right or obtuse angle at an endpoint: that endpoint is the closest point.
    if to_end >= to_start + length {
        return (to_start.sqrt(), *v0);
    }
    if to_start >= to_end + length {
        return (to_end.sqrt(), *v1);
    }

    let t = (point - v0).dot(&segment.direction()) / length;
    let closest = segment.point_at(t.clamp(0.0, 1.0));
    let projected = (point - closest).norm();
    let base = length.sqrt();
    // Heron's square root amplifies the rounding of the side lengths to
    // about `sqrt(eps) * base`; below that the projection is the better value.
    let distance = match heron_height(to_start.sqrt(), to_end.sqrt(), base) {
        Some(height) if height > HERON_CANCELLATION * base => height.min(projected),
        _ => projected,
    };
    (distance, closest)
}

/// Distance from a point to an infinite line, with the orthogonal projection.
#[must_use]
pub fn point_line_distance<const D: usize>(
    point: &Point<D>,
    line: &InfiniteLine<D>,
) -> (f64, Point<D>) {
    let projection = line.point_at(line.parameter_of(point));
    ((point - projection).norm(), projection)
}

/// Signed distance from a 2D point to a line.
///
/// Positive when the point lies to the left of the line direction.
#[must_use]
pub fn point_line_signed_distance(point: &Point2, line: &InfiniteLine<2>) -> (f64, Point2) {
    let projection = line.point_at(line.parameter_of(point));
    let signed = dot_perpendicular(line.direction(), &(point - line.origin()));
    (signed, projection)
}

/// Signed distance from a point to a plane, with the orthogonal projection.
///
/// Positive on the side the normal points to.
#[must_use]
pub fn point_plane_signed_distance(point: &Point3, plane: &Plane) -> (f64, Point3) {
    let signed = plane.normal().dot(&(point - plane.origin()));
    (signed, point - plane.normal() * signed)
}

/// Distance from a point to a plane, with the orthogonal projection.
#[must_use]
pub fn point_plane_distance(point: &Point3, plane: &Plane) -> (f64, Point3) {
    let (signed, projection) = point_plane_signed_distance(point, plane);
    (signed.abs(), projection)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Vector2, Vector3};
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    fn p2(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn p3(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    // ── heron_height ──

    #[test]
    fn heron_right_triangle() {
        // 3-4-5 triangle: height over the hypotenuse is 12/5
        assert_relative_eq!(heron_height(3.0, 4.0, 5.0).unwrap(), 2.4, epsilon = 1e-12);
    }

    #[test]
    fn heron_rejects_tiny_base() {
        assert!(heron_height(1.0, 1.0, 1e-9).is_none());
    }

    // ── point_segment_distance ──

    #[test]
    fn point_on_segment_endpoint() {
        let seg = Segment::new(p2(1.0, 5.0), p2(-1.0, -5.0));
        let (d, closest) = point_segment_distance(&p2(1.0, 5.0), &seg);
        assert!(d.abs() < TOL, "d={d}");
        assert_eq!(closest, p2(1.0, 5.0));
    }

    #[test]
    fn point_beyond_segment_start() {
        let seg = Segment::new(p2(1.0, 5.0), p2(-1.0, -5.0));
        let (d, closest) = point_segment_distance(&p2(10.0, 10.0), &seg);
        assert_relative_eq!(d, 106.0_f64.sqrt(), epsilon = TOL);
        assert_eq!(closest, p2(1.0, 5.0));
    }

    #[test]
    fn point_beyond_segment_end() {
        let seg = Segment::new(p2(1.0, 5.0), p2(-1.0, -5.0));
        let (d, closest) = point_segment_distance(&p2(-2.0, -9.0), &seg);
        assert_relative_eq!(d, 17.0_f64.sqrt(), epsilon = TOL);
        assert_eq!(closest, p2(-1.0, -5.0));
    }

    #[test]
    fn point_facing_segment_interior() {
        let seg = Segment::new(p2(1.0, 5.0), p2(-1.0, -5.0));
        let (d, closest) = point_segment_distance(&p2(5.5, 1.5), &seg);
        assert_relative_eq!(d, 26.0_f64.sqrt(), epsilon = 1e-9);
        assert!((closest - p2(0.5, 2.5)).norm() < 1e-9, "closest={closest:?}");
    }

    #[test]
    fn point_on_segment_interior() {
        let seg = Segment::new(p3(0.0, 0.0, 0.0), p3(2.0, 2.0, 2.0));
        let (d, closest) = point_segment_distance(&p3(0.5, 0.5, 0.5), &seg);
        assert!(d < GLOBAL_EPSILON, "d={d}");
        assert!((closest - p3(0.5, 0.5, 0.5)).norm() < TOL);
    }

    #[test]
    fn points_on_long_segment_are_fixed() {
        let seg = Segment::new(p3(0.0, 91.6, 0.0), p3(0.0, -71.9, 0.0));
        for i in 1..1000 {
            let q = seg.point_at(f64::from(i) / 1000.0);
            let (d, closest) = point_segment_distance(&q, &seg);
            assert!(d < GLOBAL_EPSILON, "i={i} d={d}");
            assert!((closest - q).norm() < GLOBAL_EPSILON, "i={i}");
            assert!((d - (q - closest).norm()).abs() < GLOBAL_EPSILON, "i={i}");
        }
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let seg = Segment::new(p3(1.0, 1.0, 1.0), p3(1.0, 1.0, 1.0));
        let (d, closest) = point_segment_distance(&p3(1.0, 1.0, 4.0), &seg);
        assert_relative_eq!(d, 3.0, epsilon = TOL);
        assert_eq!(closest, p3(1.0, 1.0, 1.0));
    }

    // ── point_line_distance ──

    #[test]
    fn point_line_projection() {
        let line = InfiniteLine::new(p3(0.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, 2.0)).unwrap();
        let (d, proj) = point_line_distance(&p3(3.0, 4.0, -7.0), &line);
        assert_relative_eq!(d, 5.0, epsilon = TOL);
        assert!((proj - p3(0.0, 0.0, -7.0)).norm() < TOL);
    }

    #[test]
    fn point_line_signed_distance_sides() {
        let line = InfiniteLine::new(p2(0.0, 1.0), &Vector2::new(1.0, 0.0)).unwrap();
        let (left, proj) = point_line_signed_distance(&p2(4.0, 3.0), &line);
        assert_relative_eq!(left, 2.0, epsilon = TOL);
        assert!((proj - p2(4.0, 1.0)).norm() < TOL);
        let (right, _) = point_line_signed_distance(&p2(4.0, -1.0), &line);
        assert_relative_eq!(right, -2.0, epsilon = TOL);
    }

    // ── point_plane_distance ──

    #[test]
    fn point_plane_signed_and_unsigned_agree() {
        let plane = Plane::new(p3(0.5, 0.5, 0.0), &Vector3::z()).unwrap();
        let (above, proj) = point_plane_signed_distance(&p3(0.5, 0.5, 1.0), &plane);
        let (below, _) = point_plane_signed_distance(&p3(0.5, 0.5, -1.0), &plane);
        let (unsigned, _) = point_plane_distance(&p3(0.5, 0.5, -1.0), &plane);
        assert_relative_eq!(above, 1.0, epsilon = TOL);
        assert_relative_eq!(below, -1.0, epsilon = TOL);
        assert_relative_eq!(unsigned, 1.0, epsilon = TOL);
        assert!((proj - p3(0.5, 0.5, 0.0)).norm() < TOL);
    }
}
