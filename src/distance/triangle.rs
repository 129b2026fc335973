//! Distances involving triangles.

use smallvec::SmallVec;
use tracing::trace;

use crate::geometry::{InfiniteLine, Segment, Triangle};
use crate::math::mensuration::triangle_signed_area_2d;
use crate::math::{Point, Point2, Point3, GLOBAL_EPSILON, GLOBAL_EPSILON2};

use super::linear::point_segment_distance;
use super::segment::segment_line_distance;

/// A distance with the closest point on each of two primitives.
type PairDistance = (f64, Point3, Point3);

fn keep_closest(best: Option<PairDistance>, candidate: PairDistance) -> Option<PairDistance> {
    match best {
        Some(current) if current.0 <= candidate.0 => Some(current),
        _ => Some(candidate),
    }
}

fn triangle_edges<const D: usize>(vertices: &[Point<D>; 3]) -> [Segment<D>; 3] {
    [
        Segment::new(vertices[0], vertices[1]),
        Segment::new(vertices[1], vertices[2]),
        Segment::new(vertices[2], vertices[0]),
    ]
}

/// Minimum of the point distances to the three edges, first edge wins ties.
fn point_edges_distance<const D: usize>(point: &Point<D>, vertices: &[Point<D>; 3]) -> (f64, Point<D>) {
    let mut best = (f64::INFINITY, vertices[0]);
    for edge in triangle_edges(vertices) {
        let candidate = point_segment_distance(point, &edge);
        if candidate.0 < best.0 {
            best = candidate;
        }
    }
    best
}

/// Distance from a point to a 3D triangle, with the closest triangle point.
///
/// Degenerate triangles (no pivot) fall back to the closest of their edges.
#[must_use]
pub fn point_triangle_distance(point: &Point3, triangle: &Triangle<3>) -> (f64, Point3) {
    match triangle.pivot() {
        Some(pivot) => closest_on_pivoted_triangle(point, &triangle.rotated(pivot)),
        None => {
            trace!("triangle has no pivot, using edge distances");
            point_edges_distance(point, triangle.vertices())
        }
    }
}

/// Minimizes `|v0 + s e0 + t e1 - point|^2` over `s, t >= 0, s + t <= 1`.
///
/// Regions of the `(s, t)` plane:
///
/// ```text
///   \ 2
///    \
///  3  \  1
///  ----\----
///   0 |  \  6
///  ---+---\---
///   4 |  5 \
/// ```
#[allow(clippy::many_single_char_names, clippy::similar_names)]
fn closest_on_pivoted_triangle(point: &Point3, vertices: &[Point3; 3]) -> (f64, Point3) {
    let [v0, v1, v2] = vertices;
    let diff = v0 - point;
    let edge0 = v1 - v0;
    let edge1 = v2 - v0;
    let a00 = edge0.dot(&edge0);
    let a01 = edge0.dot(&edge1);
    let a11 = edge1.dot(&edge1);
    let b0 = diff.dot(&edge0);
    let b1 = diff.dot(&edge1);
    let det = (a00 * a11 - a01 * a01).abs();
    let mut s = a01 * b1 - a11 * b0;
    let mut t = a01 * b0 - a00 * b1;

    if s + t <= det {
        if s < 0.0 {
            if t < 0.0 {
                // region 4
                if b0 < 0.0 {
                    t = 0.0;
                    s = if -b0 >= a00 { 1.0 } else { -b0 / a00 };
                } else {
                    s = 0.0;
                    t = if b1 >= 0.0 {
                        0.0
                    } else if -b1 >= a11 {
                        1.0
                    } else {
                        -b1 / a11
                    };
                }
            } else {
                // region 3
                s = 0.0;
                t = if b1 >= 0.0 {
                    0.0
                } else if -b1 >= a11 {
                    1.0
                } else {
                    -b1 / a11
                };
            }
        } else if t < 0.0 {
            // region 5
            t = 0.0;
            s = if b0 >= 0.0 {
                0.0
            } else if -b0 >= a00 {
                1.0
            } else {
                -b0 / a00
            };
        } else {
            // region 0
            s /= det;
            t /= det;
        }
    } else if s < 0.0 {
        // region 2
        let tmp0 = a01 + b0;
        let tmp1 = a11 + b1;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a00 - 2.0 * a01 + a11;
            if numer >= denom {
                s = 1.0;
                t = 0.0;
            } else {
                s = numer / denom;
                t = 1.0 - s;
            }
        } else {
            s = 0.0;
            t = if tmp1 <= 0.0 {
                1.0
            } else if b1 >= 0.0 {
                0.0
            } else {
                -b1 / a11
            };
        }
    } else if t < 0.0 {
        // region 6
        let tmp0 = a01 + b1;
        let tmp1 = a00 + b0;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a00 - 2.0 * a01 + a11;
            if numer >= denom {
                t = 1.0;
                s = 0.0;
            } else {
                t = numer / denom;
                s = 1.0 - t;
            }
        } else {
            t = 0.0;
            s = if tmp1 <= 0.0 {
                1.0
            } else if b0 >= 0.0 {
                0.0
            } else {
                -b0 / a00
            };
        }
    } else {
        // region 1
        let numer = a11 + b1 - a01 - b0;
        if numer <= 0.0 {
            s = 0.0;
            t = 1.0;
        } else {
            let denom = a00 - 2.0 * a01 + a11;
            if numer >= denom {
                s = 1.0;
                t = 0.0;
            } else {
                s = numer / denom;
                t = 1.0 - s;
            }
        }
    }

    let closest = v0 + edge0 * s + edge1 * t;
    ((point - closest).norm(), closest)
}

/// Signed distance from a point to a 3D triangle.
///
/// Positive on the side the triangle normal points to. Degenerate
/// triangles have no side and return the unsigned distance.
#[must_use]
pub fn point_triangle_signed_distance(point: &Point3, triangle: &Triangle<3>) -> (f64, Point3) {
    let Some((pivot, normal)) = triangle.pivot_and_normal() else {
        trace!("triangle has no pivot, using edge distances");
        return point_edges_distance(point, triangle.vertices());
    };
    let (distance, closest) = closest_on_pivoted_triangle(point, &triangle.rotated(pivot));
    let side = (point - triangle.vertices()[pivot]).dot(&normal);
    if side < 0.0 {
        (-distance, closest)
    } else {
        (distance, closest)
    }
}

/// Distance from a point to a 2D triangle, with the closest triangle point.
///
/// Points inside the triangle or on its boundary are at distance zero.
#[must_use]
pub fn point_triangle_distance_2d(point: &Point2, triangle: &Triangle<2>) -> (f64, Point2) {
    let [v0, v1, v2] = *triangle.vertices();
    if triangle_signed_area_2d(triangle).abs() > GLOBAL_EPSILON2 {
        let areas = [
            triangle_signed_area_2d(&Triangle::new(v1, v2, *point)),
            triangle_signed_area_2d(&Triangle::new(v2, v0, *point)),
            triangle_signed_area_2d(&Triangle::new(v0, v1, *point)),
        ];
        let has_positive = areas.iter().any(|a| *a > 0.0);
        let has_negative = areas.iter().any(|a| *a < 0.0);
        if !(has_positive && has_negative) {
            return (0.0, *point);
        }
    }
    point_edges_distance(point, triangle.vertices())
}

/// Distance between a line and a triangle, with the closest point on the
/// line then on the triangle.
#[must_use]
pub fn line_triangle_distance(line: &InfiniteLine<3>, triangle: &Triangle<3>) -> PairDistance {
    let [v0, v1, v2] = triangle.vertices();
    let edge0 = v1 - v0;
    let edge1 = v2 - v0;
    let normal = edge0.cross(&edge1);
    let normal_dot_direction = normal.dot(line.direction());

    if normal_dot_direction.abs() > GLOBAL_EPSILON * normal.norm() {
        let t = normal.dot(&(v0 - line.origin())) / normal_dot_direction;
        let crossing = line.point_at(t);
        let offset = crossing - v0;
        let a00 = edge0.dot(&edge0);
        let a01 = edge0.dot(&edge1);
        let a11 = edge1.dot(&edge1);
        let det = a00 * a11 - a01 * a01;
        if det > 0.0 {
            let w0 = offset.dot(&edge0);
            let w1 = offset.dot(&edge1);
            let b1 = (a11 * w0 - a01 * w1) / det;
            let b2 = (a00 * w1 - a01 * w0) / det;
            if b1 >= 0.0 && b2 >= 0.0 && b1 + b2 <= 1.0 {
                return (0.0, crossing, crossing);
            }
        }
    }

    let mut best = None;
    for edge in triangle_edges(triangle.vertices()) {
        let (distance, on_edge, on_line) = segment_line_distance(&edge, line);
        best = keep_closest(best, (distance, on_line, on_edge));
    }
    best.unwrap_or((f64::INFINITY, *line.origin(), *v0))
}

/// Distance between a segment and a triangle, with the closest point on
/// the segment then on the triangle.
#[must_use]
pub fn segment_triangle_distance(segment: &Segment<3>, triangle: &Triangle<3>) -> PairDistance {
    let [v0, v1] = segment.vertices();
    let Ok(line) = InfiniteLine::from_segment(segment) else {
        let (distance, on_triangle) = point_triangle_distance(v0, triangle);
        return (distance, *v0, on_triangle);
    };

    let (distance, on_line, on_triangle) = line_triangle_distance(&line, triangle);
    let t = line.parameter_of(&on_line);
    if (0.0..=segment.length()).contains(&t) {
        return (distance, on_line, on_triangle);
    }

    // The distance to the line's points grows monotonically away from the
    // line optimum, so the nearer endpoint is optimal on the segment.
    let endpoint = if t < 0.0 { v0 } else { v1 };
    let (distance, on_triangle) = point_triangle_distance(endpoint, triangle);
    (distance, *endpoint, on_triangle)
}

/// Distance between two 3D triangles, with the closest point on each.
#[must_use]
pub fn triangle_triangle_distance(triangle0: &Triangle<3>, triangle1: &Triangle<3>) -> PairDistance {
    let all0: SmallVec<[Point3; 3]> = triangle0.vertices().iter().copied().collect();
    let all1: SmallVec<[Point3; 3]> = triangle1.vertices().iter().copied().collect();
    parts_distance(&all0, triangle0, &all1, triangle1)
        .unwrap_or((f64::INFINITY, triangle0.vertices()[0], triangle1.vertices()[0]))
}

/// Distance between the parts of two triangles that are not shared.
///
/// Vertices of one triangle colocated with a vertex of the other are
/// discarded: with a common vertex only the opposite edges are measured,
/// with a common edge only the opposite vertices. Returns `None` when
/// every vertex is shared, as for identical triangles.
#[must_use]
pub fn triangle_triangle_distance_between_non_conformal_parts(
    triangle0: &Triangle<3>,
    triangle1: &Triangle<3>,
) -> Option<PairDistance> {
    let free0 = non_colocated_vertices(triangle0, triangle1);
    let free1 = non_colocated_vertices(triangle1, triangle0);
    if free0.is_empty() && free1.is_empty() {
        return None;
    }
    parts_distance(&free0, triangle0, &free1, triangle1)
}

fn non_colocated_vertices(triangle: &Triangle<3>, other: &Triangle<3>) -> SmallVec<[Point3; 3]> {
    triangle
        .vertices()
        .iter()
        .filter(|v| other.vertices().iter().all(|o| (*v - o).norm() > GLOBAL_EPSILON))
        .copied()
        .collect()
}

fn parts_distance(
    part0: &[Point3],
    triangle0: &Triangle<3>,
    part1: &[Point3],
    triangle1: &Triangle<3>,
) -> Option<PairDistance> {
    let mut best = part_to_triangle(part0, triangle1);
    if let Some((distance, on_part1, on_triangle0)) = part_to_triangle(part1, triangle0) {
        best = keep_closest(best, (distance, on_triangle0, on_part1));
    }
    best
}

fn part_to_triangle(part: &[Point3], triangle: &Triangle<3>) -> Option<PairDistance> {
    match part {
        [] => None,
        [vertex] => {
            let (distance, on_triangle) = point_triangle_distance(vertex, triangle);
            Some((distance, *vertex, on_triangle))
        }
        [a, b] => Some(segment_triangle_distance(&Segment::new(*a, *b), triangle)),
        [a, b, c, ..] => triangle_edges(&[*a, *b, *c])
            .iter()
            .map(|edge| segment_triangle_distance(edge, triangle))
            .fold(None, keep_closest),
    }
}
