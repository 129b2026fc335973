//! Sidedness and point location, decided by the exact predicates.
//!
//! Every answer here is derived from predicate signs, never from a
//! tolerance, so a point exactly on a boundary is always reported as such.

use smallvec::SmallVec;
use tracing::trace;

use crate::geometry::{InfiniteLine, Plane, Segment, Tetrahedron, Triangle};
use crate::math::predicates::{aligned_3d, det_3d, dot_2d, dot_3d, orient_2d, orient_3d, Sign};
use crate::math::{Point, Point2, Point3, Vector3};

/// Side of a point relative to an oriented primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Positive,
    Negative,
    Zero,
}

impl From<Sign> for Side {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Positive => Self::Positive,
            Sign::Negative => Self::Negative,
            Sign::Zero => Self::Zero,
        }
    }
}

/// Location of a point relative to a simplex.
///
/// Vertex, edge and facet indices refer to the simplex vertex order.
/// Triangle edge `i` joins vertices `i` and `(i + 1) % 3`; tetrahedron
/// facet `i` is the one opposite vertex `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Strictly outside.
    Outside,
    /// Strictly inside.
    Inside,
    Vertex(usize),
    Edge([usize; 2]),
    Facet(usize),
}

/// Side of a 2D point relative to the directed segment: positive on the left.
#[must_use]
pub fn point_side_to_segment(point: &Point2, segment: &Segment<2>) -> Side {
    let [v0, v1] = segment.vertices();
    orient_2d(v0, v1, point).into()
}

/// Side of a 2D point relative to the line: positive on the left of its
/// direction.
#[must_use]
pub fn point_side_to_line(point: &Point2, line: &InfiniteLine<2>) -> Side {
    let origin = line.origin();
    orient_2d(origin, &(origin + line.direction()), point).into()
}

/// Side of a point relative to the plane: positive on the normal side.
#[must_use]
pub fn point_side_to_plane(point: &Point3, plane: &Plane) -> Side {
    let origin = plane.origin();
    orient_3d(origin, &(origin + plane.u_dir()), &(origin + plane.v_dir()), point).into()
}

/// Side of a point relative to the triangle plane: positive on the side of
/// the counter-clockwise normal.
#[must_use]
pub fn point_side_to_triangle(point: &Point3, triangle: &Triangle<3>) -> Side {
    let [v0, v1, v2] = triangle.vertices();
    orient_3d(v0, v1, v2, point).into()
}

/// Location of a 2D point relative to a segment.
///
/// A zero-length segment is a single vertex.
#[must_use]
pub fn point_segment_position_2d(point: &Point2, segment: &Segment<2>) -> Position {
    let [v0, v1] = segment.vertices();
    if v0 == v1 {
        return point_vertex_position(point, v0);
    }
    if orient_2d(v0, v1, point) != Sign::Zero {
        return Position::Outside;
    }
    position_from_segment_signs(dot_2d(v0, point, v1), dot_2d(v1, point, v0))
}

/// Location of a 3D point relative to a segment.
///
/// A zero-length segment is a single vertex.
#[must_use]
pub fn point_segment_position_3d(point: &Point3, segment: &Segment<3>) -> Position {
    let [v0, v1] = segment.vertices();
    if v0 == v1 {
        return point_vertex_position(point, v0);
    }
    if !aligned_3d(point, v0, v1) {
        return Position::Outside;
    }
    position_from_segment_signs(dot_3d(v0, point, v1), dot_3d(v1, point, v0))
}

/// Location of a 2D point relative to a triangle of either orientation.
#[must_use]
pub fn point_triangle_position_2d(point: &Point2, triangle: &Triangle<2>) -> Position {
    let [v0, v1, v2] = triangle.vertices();
    position_from_edge_sides([
        point_side_to_segment(point, &Segment::new(*v0, *v1)),
        point_side_to_segment(point, &Segment::new(*v1, *v2)),
        point_side_to_segment(point, &Segment::new(*v2, *v0)),
    ])
}

/// Location of a 3D point relative to a triangle.
///
/// Points off the triangle plane are outside. In-plane points are located
/// with the signs of `det(P - Vi, P - Vj, W)` for a reference direction `W`
/// that is not parallel to the triangle plane.
#[must_use]
pub fn point_triangle_position_3d(point: &Point3, triangle: &Triangle<3>) -> Position {
    const REFERENCES: [[f64; 3]; 3] = [[1.0, 1.0, 1.0], [2.0, -3.0, 1.0], [4.0, -3.0, -3.0]];

    let [v0, v1, v2] = triangle.vertices();
    if orient_3d(v0, v1, v2, point) != Sign::Zero {
        return Position::Outside;
    }
    let to_vertex = [point - v0, point - v1, point - v2];
    let mut sides = [Side::Zero; 3];
    for reference in REFERENCES {
        let reference = Vector3::from(reference);
        sides = std::array::from_fn(|i| det_3d(&to_vertex[i], &to_vertex[(i + 1) % 3], &reference).into());
        if sides != [Side::Zero; 3] {
            break;
        }
        trace!(?reference, "reference direction lies in the triangle plane");
    }
    position_from_edge_sides(sides)
}

/// Location of a point relative to a tetrahedron of either orientation.
///
/// A flat tetrahedron has no interior; every point is reported outside.
#[must_use]
pub fn point_tetrahedron_position(point: &Point3, tetra: &Tetrahedron) -> Position {
    let vertices = tetra.vertices();
    let orientation = orient_3d(&vertices[0], &vertices[1], &vertices[2], &vertices[3]);
    if orientation == Sign::Zero {
        trace!("flat tetrahedron has no interior");
        return Position::Outside;
    }

    let mut signs = [Sign::Zero; 4];
    for (facet, [a, b, c]) in Tetrahedron::FACET_VERTICES.into_iter().enumerate() {
        let mut sign = orient_3d(&vertices[a], &vertices[b], &vertices[c], point);
        if orientation == Sign::Negative {
            sign = sign.flip();
        }
        if sign == Sign::Negative {
            return Position::Outside;
        }
        signs[facet] = sign;
    }

    let zeros: SmallVec<[usize; 4]> = (0..4).filter(|f| signs[*f] == Sign::Zero).collect();
    match zeros.as_slice() {
        [] => Position::Inside,
        [facet] => Position::Facet(*facet),
        // On two facets: the edge they share, i.e. the two other vertices.
        [f0, f1] => {
            let mut edge = (0..4).filter(|v| v != f0 && v != f1);
            match (edge.next(), edge.next()) {
                (Some(a), Some(b)) => Position::Edge([a, b]),
                _ => Position::Outside,
            }
        }
        // On three facets: the vertex they share.
        [f0, f1, f2] => (0..4)
            .find(|v| v != f0 && v != f1 && v != f2)
            .map_or(Position::Outside, Position::Vertex),
        _ => Position::Outside,
    }
}

fn point_vertex_position<const D: usize>(point: &Point<D>, vertex: &Point<D>) -> Position {
    if point == vertex {
        Position::Vertex(0)
    } else {
        Position::Outside
    }
}

/// `dot0` is the sign of `(P - V0) . (V1 - V0)` and `dot1` the sign of
/// `(P - V1) . (V0 - V1)`, for a point aligned with the segment.
fn position_from_segment_signs(dot0: Sign, dot1: Sign) -> Position {
    match (dot0, dot1) {
        (Sign::Zero, _) => Position::Vertex(0),
        (_, Sign::Zero) => Position::Vertex(1),
        (Sign::Positive, Sign::Positive) => Position::Inside,
        _ => Position::Outside,
    }
}

/// Location from the sides of a point to the three directed edges.
pub(crate) fn position_from_edge_sides([s0, s1, s2]: [Side; 3]) -> Position {
    match (s0, s1, s2) {
        (Side::Zero, Side::Zero, _) => Position::Vertex(1),
        (Side::Zero, _, Side::Zero) => Position::Vertex(0),
        (_, Side::Zero, Side::Zero) => Position::Vertex(2),
        (Side::Zero, a, b) if a == b => Position::Edge([0, 1]),
        (a, Side::Zero, b) if a == b => Position::Edge([1, 2]),
        (a, b, Side::Zero) if a == b => Position::Edge([2, 0]),
        (a, b, c) if a != Side::Zero && a == b && b == c => Position::Inside,
        _ => Position::Outside,
    }
}
