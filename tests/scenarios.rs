//! End-to-end checks of the kernel on reference configurations.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use tracing_subscriber::EnvFilter;

use geokern::distance::{
    point_ball_distance, point_ellipse_distance, point_segment_distance, point_sphere_distance,
    point_sphere_signed_distance, point_tetrahedron_distance, point_triangle_distance_2d,
    segment_segment_distance,
};
use geokern::geometry::{Ellipse, Frame, InfiniteLine, Plane, Segment, Sphere, Tetrahedron, Triangle};
use geokern::intersection::{
    line_plane_intersection, line_sphere_intersection, segment_triangle_intersection, IntersectionType,
};
use geokern::math::predicates::{self, orient_3d, Sign};
use geokern::math::{Point2, Point3, Vector2, Vector3};
use geokern::position::{point_tetrahedron_position, Position};

const TOL: f64 = 1e-9;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn point_to_2d_segment() {
    init_tracing();
    let segment = Segment::new(Point2::new(1.0, 5.0), Point2::new(-1.0, -5.0));

    let (d, closest) = point_segment_distance(&Point2::new(1.0, 5.0), &segment);
    assert!(d.abs() < TOL);
    assert_eq!(closest, Point2::new(1.0, 5.0));

    let (d, closest) = point_segment_distance(&Point2::new(10.0, 10.0), &segment);
    assert_relative_eq!(d, 106.0_f64.sqrt(), epsilon = TOL);
    assert_eq!(closest, Point2::new(1.0, 5.0));
}

#[test]
fn point_to_2d_triangle() {
    init_tracing();
    let triangle = Triangle::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0));
    let (d, closest) = point_triangle_distance_2d(&Point2::new(0.0, 1.0), &triangle);
    assert_relative_eq!(d, 2.0_f64.sqrt() / 2.0, epsilon = TOL);
    assert!((closest - Point2::new(0.5, 0.5)).norm() < TOL);
}

#[test]
fn skew_3d_segments() {
    init_tracing();
    let s0 = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 0.0));
    let s1 = Segment::new(Point3::new(0.0, 2.0, 1.0), Point3::new(2.0, 0.0, 1.0));
    let (d, c0, c1) = segment_segment_distance(&s0, &s1);
    assert_relative_eq!(d, 1.0, epsilon = TOL);
    assert!((c0 - Point3::new(1.0, 1.0, 0.0)).norm() < TOL);
    assert!((c1 - Point3::new(1.0, 1.0, 1.0)).norm() < TOL);
}

#[test]
fn point_inside_sphere_and_ball() {
    init_tracing();
    let sphere = Sphere::new(Point3::new(0.0, 0.0, 1.0), 2.0).unwrap();
    let query = Point3::new(0.0, 1.0, 1.0);

    let (d, closest) = point_sphere_distance(&query, &sphere);
    assert_relative_eq!(d, 1.0, epsilon = TOL);
    assert!((closest - Point3::new(0.0, 2.0, 1.0)).norm() < TOL);

    let (signed, _) = point_sphere_signed_distance(&query, &sphere);
    assert_relative_eq!(signed, -1.0, epsilon = TOL);

    let (ball, _) = point_ball_distance(&query, &sphere);
    assert!(ball.abs() < TOL);
}

#[test]
fn point_beside_tetrahedron_in_both_orientations() {
    init_tracing();
    let v = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let query = Point3::new(2.5, 2.5, 0.0);
    for tetra in [
        Tetrahedron::new(v[0], v[1], v[2], v[3]),
        Tetrahedron::new(v[1], v[0], v[2], v[3]),
    ] {
        let (d, closest) = point_tetrahedron_distance(&query, &tetra);
        assert_relative_eq!(d, 8.0_f64.sqrt(), epsilon = TOL);
        assert!((closest - Point3::new(0.5, 0.5, 0.0)).norm() < TOL);
        assert_eq!(point_tetrahedron_position(&query, &tetra), Position::Outside);
    }
}

#[test]
fn points_around_axis_aligned_ellipse() {
    init_tracing();
    let ellipse = Ellipse::new(
        Point2::origin(),
        Frame::new([Vector2::new(3.0, 0.0), Vector2::new(0.0, 2.0)]),
    );

    let (d, closest) = point_ellipse_distance(&Point2::new(4.0, 0.0), &ellipse).unwrap();
    assert_relative_eq!(d, 1.0, epsilon = TOL);
    assert!((closest - Point2::new(3.0, 0.0)).norm() < TOL);

    let (d, closest) = point_ellipse_distance(&Point2::new(0.0, 5.0), &ellipse).unwrap();
    assert_relative_eq!(d, 3.0, epsilon = TOL);
    assert!((closest - Point2::new(0.0, 2.0)).norm() < TOL);
}

#[test]
fn intersections_report_their_witnesses() {
    init_tracing();
    let plane = Plane::new(Point3::new(0.0, 0.0, 2.0), &Vector3::z()).unwrap();
    let line = InfiniteLine::new(Point3::new(1.0, 1.0, 0.0), &Vector3::new(0.0, 1.0, 1.0)).unwrap();
    let hit = line_plane_intersection(&line, &plane);
    assert!((hit.result().unwrap() - Point3::new(1.0, 3.0, 2.0)).norm() < TOL);
    assert!(hit.correctness().unwrap().is_correct());

    let sphere = Sphere::new(Point3::origin(), 1.0).unwrap();
    let through = InfiniteLine::new(Point3::new(0.0, 0.0, -3.0), &Vector3::z()).unwrap();
    let points = line_sphere_intersection(&through, &sphere);
    assert_eq!(points.result().unwrap().len(), 2);

    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    );
    let flat = Segment::new(Point3::new(-1.0, 0.5, 0.0), Point3::new(2.0, 0.5, 0.0));
    let outcome = segment_triangle_intersection(&flat, &triangle).unwrap();
    assert_eq!(outcome.kind(), IntersectionType::Parallel);
}

#[test]
fn predicates_after_explicit_initialization() {
    init_tracing();
    predicates::initialize();
    predicates::initialize();
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);
    assert_eq!(orient_3d(&a, &b, &c, &Point3::new(0.3, 0.3, 1.0)), Sign::Positive);
    assert_eq!(orient_3d(&a, &b, &c, &Point3::new(0.3, 0.3, -1.0)), Sign::Negative);
    assert_eq!(orient_3d(&a, &b, &c, &Point3::new(7.0, -3.0, 0.0)), Sign::Zero);
}
