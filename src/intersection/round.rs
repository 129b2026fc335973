//! Intersections with spheres, circles, ellipses and between planes.

use nalgebra::SMatrix;

use crate::distance::{
    point_circle_distance, point_ellipse_distance, point_line_distance, point_plane_distance,
    point_sphere_distance, point_triangle_distance,
};
use crate::error::Result;
use crate::geometry::{Circle, Ellipse, InfiniteLine, Plane, Segment, Sphere, Triangle};
use crate::math::{Point3, GLOBAL_EPSILON};

use super::{
    points_witness, quadratic_roots, retain_on_segment, segment_projection, try_points_witness,
    Correctness, CorrectnessInfo, IntersectionPoints, IntersectionResult,
};

/// Intersection points of a line and a sphere, ordered along the line.
///
/// Substituting `X = P + t D` in `|X - C|^2 = r^2` gives
/// `t^2 + 2 a1 t + a0 = 0` with `a1 = D . (P - C)` and
/// `a0 = |P - C|^2 - r^2`.
#[must_use]
pub fn line_sphere_intersection<const D: usize>(
    line: &InfiniteLine<D>,
    sphere: &Sphere<D>,
) -> IntersectionResult<IntersectionPoints<D>> {
    let diff = line.origin() - sphere.origin();
    let a0 = diff.dot(&diff) - sphere.radius() * sphere.radius();
    let a1 = line.direction().dot(&diff);
    let points: IntersectionPoints<D> = quadratic_roots(a1, a0)
        .into_iter()
        .map(|t| line.point_at(t))
        .collect();
    if points.is_empty() {
        return IntersectionResult::None;
    }
    let correctness = CorrectnessInfo {
        first: points_witness(&points, |point| point_line_distance(point, line).1),
        second: points_witness(&points, |point| point_sphere_distance(point, sphere).1),
    };
    IntersectionResult::intersect(points, correctness)
}

/// Intersection points of a segment and a sphere.
///
/// # Errors
///
/// Returns an error if the segment is degenerate.
pub fn segment_sphere_intersection<const D: usize>(
    segment: &Segment<D>,
    sphere: &Sphere<D>,
) -> Result<IntersectionResult<IntersectionPoints<D>>> {
    let line = InfiniteLine::from_segment(segment)?;
    let Some(points) = line_sphere_intersection(&line, sphere).into_result() else {
        return Ok(IntersectionResult::None);
    };
    let points = retain_on_segment(points, segment);
    if points.is_empty() {
        return Ok(IntersectionResult::None);
    }
    let correctness = CorrectnessInfo {
        first: try_points_witness(&points, |point| segment_projection(point, segment))?,
        second: points_witness(&points, |point| point_sphere_distance(point, sphere).1),
    };
    Ok(IntersectionResult::intersect(points, correctness))
}

/// Intersection line of two planes.
///
/// Parallel planes yield [`IntersectionResult::Parallel`] when they
/// coincide and [`IntersectionResult::None`] otherwise. The line origin is
/// `c0 N0 + c1 N1`, the combination of normals lying on both planes.
#[must_use]
pub fn plane_plane_intersection(plane0: &Plane, plane1: &Plane) -> IntersectionResult<InfiniteLine<3>> {
    let normal0 = plane0.normal();
    let normal1 = plane1.normal();
    let dot = normal0.dot(normal1);
    // Constants of the `N . X = k` form.
    let k0 = -plane0.plane_constant();
    let k1 = -plane1.plane_constant();

    if dot.abs() >= 1.0 - GLOBAL_EPSILON {
        let offset = if dot >= 0.0 { k0 - k1 } else { k0 + k1 };
        return if offset.abs() < GLOBAL_EPSILON {
            IntersectionResult::Parallel
        } else {
            IntersectionResult::None
        };
    }

    let inv_det = 1.0 / (1.0 - dot * dot);
    let c0 = (k0 - dot * k1) * inv_det;
    let c1 = (k1 - dot * k0) * inv_det;
    let origin = Point3::from(normal0 * c0 + normal1 * c1);
    let Ok(line) = InfiniteLine::new(origin, &normal0.cross(normal1)) else {
        return IntersectionResult::Parallel;
    };
    let correctness = CorrectnessInfo {
        first: line_on_plane_witness(&line, plane0),
        second: line_on_plane_witness(&line, plane1),
    };
    IntersectionResult::intersect(line, correctness)
}

fn line_on_plane_witness(line: &InfiniteLine<3>, plane: &Plane) -> Correctness<InfiniteLine<3>> {
    let (distance, projected) = point_plane_distance(line.origin(), plane);
    Correctness {
        ok: distance < GLOBAL_EPSILON && line.direction().dot(plane.normal()).abs() < GLOBAL_EPSILON,
        projection: line.with_origin(projected),
    }
}

/// Intersection points of a plane and a circle.
///
/// A circle lying in the plane yields [`IntersectionResult::Parallel`].
#[must_use]
pub fn plane_circle_intersection(plane: &Plane, circle: &Circle) -> IntersectionResult<IntersectionPoints<3>> {
    let line = match plane_plane_intersection(plane, circle.plane()) {
        IntersectionResult::Intersect { result, .. } => result,
        IntersectionResult::Parallel => return IntersectionResult::Parallel,
        IntersectionResult::None => return IntersectionResult::None,
    };
    let points = line_circle_points(&line, circle);
    if points.is_empty() {
        return IntersectionResult::None;
    }
    let correctness = CorrectnessInfo {
        first: points_witness(&points, |point| point_plane_distance(point, plane).1),
        second: points_witness(&points, |point| point_circle_distance(point, circle).1),
    };
    IntersectionResult::intersect(points, correctness)
}

/// Intersection points of a triangle and a circle.
///
/// A degenerate triangle has no supporting plane and never intersects.
#[must_use]
pub fn triangle_circle_intersection(
    triangle: &Triangle<3>,
    circle: &Circle,
) -> IntersectionResult<IntersectionPoints<3>> {
    let Some(plane) = triangle.plane() else {
        return IntersectionResult::None;
    };
    let points = match plane_circle_intersection(&plane, circle) {
        IntersectionResult::Intersect { result, .. } => result,
        other => return other,
    };
    let points: IntersectionPoints<3> = points
        .into_iter()
        .filter(|point| point_triangle_distance(point, triangle).0 < GLOBAL_EPSILON)
        .collect();
    if points.is_empty() {
        return IntersectionResult::None;
    }
    let correctness = CorrectnessInfo {
        first: points_witness(&points, |point| point_triangle_distance(point, triangle).1),
        second: points_witness(&points, |point| point_circle_distance(point, circle).1),
    };
    IntersectionResult::intersect(points, correctness)
}

/// Points of `line` on the circle, for a line lying in the circle plane.
fn line_circle_points(line: &InfiniteLine<3>, circle: &Circle) -> IntersectionPoints<3> {
    let diff = line.origin() - circle.center();
    let a0 = diff.dot(&diff) - circle.radius() * circle.radius();
    let a1 = line.direction().dot(&diff);
    quadratic_roots(a1, a0)
        .into_iter()
        .map(|t| line.point_at(t))
        .collect()
}

/// Intersection points of a line and an ellipse (or ellipsoid).
///
/// The ellipse is `(X - C)^T M (X - C) = 1` with
/// `M = sum_i U_i U_i^T / l_i^2` over its unit axes `U_i` of length `l_i`.
///
/// # Errors
///
/// Returns an error if an ellipse axis is zero-length or dependent on the
/// others, or if a witness projection fails to converge.
pub fn line_ellipse_intersection<const D: usize>(
    line: &InfiniteLine<D>,
    ellipse: &Ellipse<D>,
) -> Result<IntersectionResult<IntersectionPoints<D>>> {
    let points = line_ellipse_points(line, ellipse)?;
    if points.is_empty() {
        return Ok(IntersectionResult::None);
    }
    let correctness = CorrectnessInfo {
        first: points_witness(&points, |point| point_line_distance(point, line).1),
        second: try_points_witness(&points, |point| Ok(point_ellipse_distance(point, ellipse)?.1))?,
    };
    Ok(IntersectionResult::intersect(points, correctness))
}

/// Intersection points of a segment and an ellipse (or ellipsoid).
///
/// # Errors
///
/// Returns an error if the segment is degenerate, or for the same
/// reasons as [`line_ellipse_intersection`].
pub fn segment_ellipse_intersection<const D: usize>(
    segment: &Segment<D>,
    ellipse: &Ellipse<D>,
) -> Result<IntersectionResult<IntersectionPoints<D>>> {
    let line = InfiniteLine::from_segment(segment)?;
    let points = retain_on_segment(line_ellipse_points(&line, ellipse)?, segment);
    if points.is_empty() {
        return Ok(IntersectionResult::None);
    }
    let correctness = CorrectnessInfo {
        first: try_points_witness(&points, |point| segment_projection(point, segment))?,
        second: try_points_witness(&points, |point| Ok(point_ellipse_distance(point, ellipse)?.1))?,
    };
    Ok(IntersectionResult::intersect(points, correctness))
}

fn line_ellipse_points<const D: usize>(
    line: &InfiniteLine<D>,
    ellipse: &Ellipse<D>,
) -> Result<IntersectionPoints<D>> {
    let (directions, lengths) = ellipse.axes().orthonormalized()?;
    let mut form = SMatrix::<f64, D, D>::zeros();
    for (direction, length) in directions.iter().zip(lengths) {
        form += direction * direction.transpose() / (length * length);
    }

    let diff = line.origin() - ellipse.center();
    let form_diff = form * diff;
    let a2 = line.direction().dot(&(form * line.direction()));
    let a1 = line.direction().dot(&form_diff) / a2;
    let a0 = (diff.dot(&form_diff) - 1.0) / a2;
    Ok(quadratic_roots(a1, a0)
        .into_iter()
        .map(|t| line.point_at(t))
        .collect::<IntersectionPoints<D>>())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Frame;
    use crate::intersection::IntersectionType;
    use crate::math::{Point, Point2, Vector2, Vector3};

    fn near<const D: usize>(point: &Point<D>, other: &Point<D>) -> bool {
        (point - other).norm() < 1e-9
    }

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_circle_at_origin() -> Circle {
        Circle::new(Plane::new(Point3::origin(), &Vector3::z()).unwrap(), 1.0).unwrap()
    }

    // ── line_sphere_intersection ──

    #[test]
    fn line_through_sphere() {
        let sphere = Sphere::new(p(0.0, 0.0, 1.0), 2.0).unwrap();
        let line = InfiniteLine::new(p(-5.0, 0.0, 1.0), &Vector3::x()).unwrap();
        let result = line_sphere_intersection(&line, &sphere);
        let points = result.result().unwrap();
        assert_eq!(points.len(), 2);
        assert!(near(&points[0], &p(-2.0, 0.0, 1.0)));
        assert!(near(&points[1], &p(2.0, 0.0, 1.0)));
        assert!(result.correctness().unwrap().is_correct());
    }

    #[test]
    fn line_tangent_to_circle() {
        let circle = Sphere::new(Point2::new(0.0, 0.0), 1.0).unwrap();
        let line = InfiniteLine::new(Point2::new(-3.0, 1.0), &Vector2::x()).unwrap();
        let points = line_sphere_intersection(&line, &circle).into_result().unwrap();
        assert_eq!(points.len(), 1);
        assert!(near(&points[0], &Point2::new(0.0, 1.0)));
    }

    #[test]
    fn line_missing_sphere() {
        let sphere = Sphere::new(Point3::origin(), 1.0).unwrap();
        let line = InfiniteLine::new(p(0.0, 2.0, 0.0), &Vector3::x()).unwrap();
        assert_eq!(line_sphere_intersection(&line, &sphere), IntersectionResult::None);
    }

    // ── segment_sphere_intersection ──

    #[test]
    fn segment_leaving_sphere() {
        let sphere = Sphere::new(Point3::origin(), 1.0).unwrap();
        let segment = Segment::new(Point3::origin(), p(3.0, 0.0, 0.0));
        let result = segment_sphere_intersection(&segment, &sphere).unwrap();
        let points = result.result().unwrap();
        assert_eq!(points.len(), 1);
        assert!(near(&points[0], &p(1.0, 0.0, 0.0)));
        assert!(result.correctness().unwrap().is_correct());
    }

    #[test]
    fn segment_inside_sphere() {
        let sphere = Sphere::new(Point3::origin(), 5.0).unwrap();
        let segment = Segment::new(p(-1.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let result = segment_sphere_intersection(&segment, &sphere).unwrap();
        assert_eq!(result, IntersectionResult::None);
    }

    // ── plane_plane_intersection ──

    #[test]
    fn orthogonal_planes() {
        let p0 = Plane::new(p(0.0, 0.0, 1.0), &Vector3::z()).unwrap();
        let p1 = Plane::new(p(2.0, 0.0, 0.0), &Vector3::x()).unwrap();
        let result = plane_plane_intersection(&p0, &p1);
        let line = result.result().unwrap();
        assert!((line.origin() - p(2.0, 0.0, 1.0)).norm() < 1e-12);
        assert!((line.direction().cross(&Vector3::y())).norm() < 1e-12);
        assert!(result.correctness().unwrap().is_correct());
    }

    #[test]
    fn parallel_and_coincident_planes() {
        let p0 = Plane::new(p(0.0, 0.0, 1.0), &Vector3::z()).unwrap();
        let shifted = Plane::new(p(0.0, 0.0, 2.0), &Vector3::z()).unwrap();
        let flipped = Plane::new(p(5.0, 3.0, 1.0), &-Vector3::z()).unwrap();
        assert_eq!(plane_plane_intersection(&p0, &shifted).kind(), IntersectionType::None);
        assert_eq!(plane_plane_intersection(&p0, &flipped).kind(), IntersectionType::Parallel);
    }

    // ── plane_circle / triangle_circle ──

    #[test]
    fn plane_cuts_circle() {
        let plane = Plane::new(p(0.5, 0.0, 0.0), &Vector3::x()).unwrap();
        let result = plane_circle_intersection(&plane, &unit_circle_at_origin());
        let points = result.result().unwrap();
        assert_eq!(points.len(), 2);
        let h = 0.75_f64.sqrt();
        assert!(points.iter().any(|q| near(q, &p(0.5, h, 0.0))));
        assert!(points.iter().any(|q| near(q, &p(0.5, -h, 0.0))));
        assert!(result.correctness().unwrap().is_correct());
    }

    #[test]
    fn plane_tangent_and_beyond_circle() {
        let tangent = Plane::new(p(1.0, 0.0, 0.0), &Vector3::x()).unwrap();
        let points = plane_circle_intersection(&tangent, &unit_circle_at_origin())
            .into_result()
            .unwrap();
        assert_eq!(points.len(), 1);
        assert!(near(&points[0], &p(1.0, 0.0, 0.0)));

        let beyond = Plane::new(p(2.0, 0.0, 0.0), &Vector3::x()).unwrap();
        assert_eq!(
            plane_circle_intersection(&beyond, &unit_circle_at_origin()),
            IntersectionResult::None
        );
    }

    #[test]
    fn triangle_keeps_one_circle_point() {
        // Vertical triangle in the x = 0.5 plane, covering only y > 0.
        let triangle = Triangle::new(p(0.5, 0.0, -1.0), p(0.5, 2.0, 0.0), p(0.5, 0.0, 1.0));
        let result = triangle_circle_intersection(&triangle, &unit_circle_at_origin());
        let points = result.result().unwrap();
        assert_eq!(points.len(), 1);
        assert!(near(&points[0], &p(0.5, 0.75_f64.sqrt(), 0.0)));
        assert!(result.correctness().unwrap().is_correct());
    }

    #[test]
    fn coplanar_triangle_is_parallel() {
        let triangle = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        assert_eq!(
            triangle_circle_intersection(&triangle, &unit_circle_at_origin()).kind(),
            IntersectionType::Parallel
        );
    }

    // ── line/segment_ellipse_intersection ──

    fn ellipse_3_2() -> Ellipse<2> {
        Ellipse::new(
            Point2::origin(),
            Frame::new([Vector2::new(3.0, 0.0), Vector2::new(0.0, 2.0)]),
        )
    }

    #[test]
    fn line_along_major_axis() {
        let line = InfiniteLine::new(Point2::new(-10.0, 0.0), &Vector2::x()).unwrap();
        let result = line_ellipse_intersection(&line, &ellipse_3_2()).unwrap();
        let points = result.result().unwrap();
        assert_eq!(points.len(), 2);
        assert!(near(&points[0], &Point2::new(-3.0, 0.0)));
        assert!(near(&points[1], &Point2::new(3.0, 0.0)));
        assert!(result.correctness().unwrap().is_correct());
    }

    #[test]
    fn line_tangent_to_ellipse() {
        let line = InfiniteLine::new(Point2::new(-10.0, 2.0), &Vector2::x()).unwrap();
        let points = line_ellipse_intersection(&line, &ellipse_3_2())
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(points.len(), 1);
        assert!(near(&points[0], &Point2::new(0.0, 2.0)));
    }

    #[test]
    fn segment_ending_inside_ellipse() {
        let segment = Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0));
        let result = segment_ellipse_intersection(&segment, &ellipse_3_2()).unwrap();
        let points = result.result().unwrap();
        assert_eq!(points.len(), 1);
        assert!(near(&points[0], &Point2::new(0.0, 2.0)));
    }

    #[test]
    fn ellipsoid_crossed_by_diagonal() {
        let ellipsoid = Ellipse::new(
            p(1.0, 1.0, 1.0),
            Frame::new([
                Vector3::new(2.0, 0.0, 0.0),
                Vector3::new(0.0, 2.0, 0.0),
                Vector3::new(0.0, 0.0, 2.0),
            ]),
        );
        let line = InfiniteLine::new(p(1.0, 1.0, -5.0), &Vector3::z()).unwrap();
        let points = line_ellipse_intersection(&line, &ellipsoid)
            .unwrap()
            .into_result()
            .unwrap();
        assert!(near(&points[0], &p(1.0, 1.0, -1.0)));
        assert!(near(&points[1], &p(1.0, 1.0, 3.0)));
    }
}
