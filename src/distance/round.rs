//! Distances from a point to spheres, balls, circles, disks and cylinders.

use crate::geometry::{orthonormal_complement, Ball, Circle, Cylinder, Disk, Sphere};
use crate::math::{Point, Point3, Vector, Vector3, GLOBAL_EPSILON};

use super::linear::point_plane_signed_distance;

/// Signed distance from a point to a sphere, with the closest sphere point.
///
/// Negative inside. A point at the center is projected along the first
/// basis axis.
#[must_use]
pub fn point_sphere_signed_distance<const D: usize>(
    point: &Point<D>,
    sphere: &Sphere<D>,
) -> (f64, Point<D>) {
    let offset = point - sphere.origin();
    let length = offset.norm();
    let direction = if length < GLOBAL_EPSILON {
        Vector::<D>::from_fn(|row, _| if row == 0 { 1.0 } else { 0.0 })
    } else {
        offset / length
    };
    let closest = sphere.origin() + direction * sphere.radius();
    (length - sphere.radius(), closest)
}

/// Distance from a point to a sphere surface, with the closest sphere point.
#[must_use]
pub fn point_sphere_distance<const D: usize>(
    point: &Point<D>,
    sphere: &Sphere<D>,
) -> (f64, Point<D>) {
    let (signed, closest) = point_sphere_signed_distance(point, sphere);
    (signed.abs(), closest)
}

/// Distance from a point to a solid ball; zero inside.
#[must_use]
pub fn point_ball_distance<const D: usize>(point: &Point<D>, ball: &Ball<D>) -> (f64, Point<D>) {
    let (signed, closest) = point_sphere_signed_distance(point, ball);
    if signed <= 0.0 {
        (0.0, *point)
    } else {
        (signed, closest)
    }
}

/// Projects `point` on the circle plane and returns the out-of-plane offset,
/// the projection and the in-plane offset from the center.
fn planar_offset(point: &Point3, circle: &Circle) -> (f64, Point3, Vector3) {
    let (height, projection) = point_plane_signed_distance(point, circle.plane());
    (height, projection, projection - circle.center())
}

fn closest_on_circle(circle: &Circle, in_plane: &Vector3) -> Point3 {
    let radial = in_plane.norm();
    let direction = if radial < GLOBAL_EPSILON {
        *circle.plane().u_dir()
    } else {
        in_plane / radial
    };
    circle.center() + direction * circle.radius()
}

/// Signed distance from a point to a circle, with the closest circle point.
///
/// Negative when the projection of the point on the circle plane falls
/// strictly inside the radius.
#[must_use]
pub fn point_circle_signed_distance(point: &Point3, circle: &Circle) -> (f64, Point3) {
    let (_, _, in_plane) = planar_offset(point, circle);
    let closest = closest_on_circle(circle, &in_plane);
    let distance = (point - closest).norm();
    if in_plane.norm() < circle.radius() {
        (-distance, closest)
    } else {
        (distance, closest)
    }
}

/// Distance from a point to a circle, with the closest circle point.
#[must_use]
pub fn point_circle_distance(point: &Point3, circle: &Circle) -> (f64, Point3) {
    let (_, _, in_plane) = planar_offset(point, circle);
    let closest = closest_on_circle(circle, &in_plane);
    ((point - closest).norm(), closest)
}

/// Distance from a point to a solid disk, with the closest disk point.
#[must_use]
pub fn point_disk_distance(point: &Point3, disk: &Disk) -> (f64, Point3) {
    let (height, projection, in_plane) = planar_offset(point, disk);
    if in_plane.norm() <= disk.radius() {
        return (height.abs(), projection);
    }
    point_circle_distance(point, disk)
}

/// Distance from a point to the surface of a closed cylinder (wall and
/// both end caps), with the closest surface point.
#[must_use]
pub fn point_cylinder_distance(point: &Point3, cylinder: &Cylinder) -> (f64, Point3) {
    let [start, end] = cylinder.axis().vertices();
    let height = cylinder.height();
    let axis = if height < GLOBAL_EPSILON {
        Vector3::z()
    } else {
        (end - start) / height
    };
    let offset = point - start;
    let along = offset.dot(&axis);
    let radial = offset - axis * along;
    let radial_length = radial.norm();
    let radial_dir = if radial_length < GLOBAL_EPSILON {
        orthonormal_complement(&axis).0
    } else {
        radial / radial_length
    };
    let radius = cylinder.radius();

    let wall = start + axis * along.clamp(0.0, height) + radial_dir * radius;
    let cap_radial = radial_dir * radial_length.min(radius);
    let bottom = start + cap_radial;
    let top = end + cap_radial;

    [wall, bottom, top]
        .into_iter()
        .map(|candidate| ((point - candidate).norm(), candidate))
        .fold((f64::INFINITY, wall), |best, current| {
            if current.0 < best.0 {
                current
            } else {
                best
            }
        })
}
