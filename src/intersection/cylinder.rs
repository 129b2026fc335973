//! Lines and segments against a finite closed cylinder.

use smallvec::SmallVec;

use crate::distance::{point_cylinder_distance, point_line_distance};
use crate::error::Result;
use crate::geometry::{orthonormal_complement, Cylinder, InfiniteLine, Segment};
use crate::math::{Vector3, GLOBAL_EPSILON, GLOBAL_EPSILON2};

use super::{
    points_witness, quadratic_roots, retain_on_segment, segment_projection, try_points_witness,
    CorrectnessInfo, IntersectionPoints, IntersectionResult,
};

/// Intersection points of a line and the surface of a closed cylinder,
/// ordered along the line.
///
/// # Errors
///
/// Returns an error if the cylinder axis is degenerate.
pub fn line_cylinder_intersection(
    line: &InfiniteLine<3>,
    cylinder: &Cylinder,
) -> Result<IntersectionResult<IntersectionPoints<3>>> {
    let points: IntersectionPoints<3> = line_cylinder_parameters(line, cylinder)?
        .into_iter()
        .map(|t| line.point_at(t))
        .collect();
    if points.is_empty() {
        return Ok(IntersectionResult::None);
    }
    let correctness = CorrectnessInfo {
        first: points_witness(&points, |point| point_line_distance(point, line).1),
        second: points_witness(&points, |point| point_cylinder_distance(point, cylinder).1),
    };
    Ok(IntersectionResult::intersect(points, correctness))
}

/// Intersection points of a segment and the surface of a closed cylinder.
///
/// # Errors
///
/// Returns an error if the segment or the cylinder axis is degenerate.
pub fn segment_cylinder_intersection(
    segment: &Segment<3>,
    cylinder: &Cylinder,
) -> Result<IntersectionResult<IntersectionPoints<3>>> {
    let line = InfiniteLine::from_segment(segment)?;
    let points: IntersectionPoints<3> = line_cylinder_parameters(&line, cylinder)?
        .into_iter()
        .map(|t| line.point_at(t))
        .collect();
    let points = retain_on_segment(points, segment);
    if points.is_empty() {
        return Ok(IntersectionResult::None);
    }
    let correctness = CorrectnessInfo {
        first: try_points_witness(&points, |point| segment_projection(point, segment))?,
        second: points_witness(&points, |point| point_cylinder_distance(point, cylinder).1),
    };
    Ok(IntersectionResult::intersect(points, correctness))
}

/// Line parameters of the intersections, in increasing order.
///
/// Works in the cylinder frame `(U, V, W)` centered on the axis midpoint,
/// `W` along the axis. Three cases: the line is parallel to the axis (both
/// caps or nothing), perpendicular to it (wall only, between the cap
/// planes), or general (caps first, then the wall until two hits).
fn line_cylinder_parameters(line: &InfiniteLine<3>, cylinder: &Cylinder) -> Result<SmallVec<[f64; 2]>> {
    let axis = cylinder.axis();
    let w = axis.normalized_direction()?;
    let (u, v) = orthonormal_complement(&w);
    let to_local = |vector: &Vector3| Vector3::new(u.dot(vector), v.dot(vector), w.dot(vector));

    let origin = to_local(&(line.origin() - axis.barycenter()));
    let direction = to_local(line.direction());
    let half_height = cylinder.height() / 2.0;
    let radius_sqr = cylinder.radius() * cylinder.radius();

    let mut parameters = SmallVec::<[f64; 2]>::new();

    if 1.0 - direction.z.abs() <= GLOBAL_EPSILON2 {
        if origin.x * origin.x + origin.y * origin.y <= radius_sqr {
            if direction.z > 0.0 {
                parameters.push(-origin.z - half_height);
                parameters.push(-origin.z + half_height);
            } else {
                parameters.push(origin.z - half_height);
                parameters.push(origin.z + half_height);
            }
        }
        return Ok(parameters);
    }

    let a0 = origin.x * origin.x + origin.y * origin.y - radius_sqr;
    let a1 = origin.x * direction.x + origin.y * direction.y;
    let a2 = direction.x * direction.x + direction.y * direction.y;

    if direction.z == 0.0 {
        if origin.z.abs() <= half_height {
            parameters.extend(quadratic_roots(a1 / a2, a0 / a2));
        }
        return Ok(parameters);
    }

    let inv_dz = 1.0 / direction.z;
    let bottom = (-half_height - origin.z) * inv_dz;
    let top = (half_height - origin.z) * inv_dz;
    for t in [bottom, top] {
        let x = origin.x + t * direction.x;
        let y = origin.y + t * direction.y;
        if x * x + y * y <= radius_sqr {
            parameters.push(t);
        }
    }

    if parameters.len() < 2 {
        let (low, high) = if bottom <= top { (bottom, top) } else { (top, bottom) };
        for t in quadratic_roots(a1 / a2, a0 / a2) {
            if parameters.len() == 2 {
                break;
            }
            let duplicate = parameters.iter().any(|p| (p - t).abs() < GLOBAL_EPSILON);
            if (low..=high).contains(&t) && !duplicate {
                parameters.push(t);
            }
        }
    }

    parameters.sort_by(f64::total_cmp);
    Ok(parameters)
}
