//! Intersections between pairs of primitives.
//!
//! Every query reports an [`IntersectionResult`]. When an intersection is
//! found it carries, next to the result, a correctness witness for each
//! input primitive: the result re-projected on that primitive through the
//! distance engine, and whether the projection stayed within
//! [`GLOBAL_EPSILON`] of the result.
//!
//! The `*_detection` queries only decide whether and where primitives
//! meet, from exact predicate signs, and report a [`Detection`].

mod cylinder;
mod detection;
mod linear;
mod planar;
mod round;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::distance::point_segment_distance;
use crate::error::Result;
use crate::geometry::{Segment, Triangle};
use crate::math::barycentric::{segment_barycentric_coordinates, triangle_barycentric_coordinates};
use crate::math::{Point, Point3, GLOBAL_EPSILON};

pub use cylinder::{line_cylinder_intersection, segment_cylinder_intersection};
pub use detection::{
    colinear_segment_segment_intersection_detection, line_triangle_intersection_detection,
    segment_line_intersection_detection, segment_plane_intersection_detection,
    segment_segment_intersection_detection, segment_triangle_intersection_detection, Detection,
    SegmentSegmentDetection, SegmentTriangleDetection,
};
pub use linear::{
    line_plane_intersection, line_triangle_intersection, segment_plane_intersection,
    segment_triangle_intersection,
};
pub use planar::{line_line_intersection, segment_line_intersection, segment_segment_intersection};
pub use round::{
    line_ellipse_intersection, line_sphere_intersection, plane_circle_intersection,
    plane_plane_intersection, segment_ellipse_intersection, segment_sphere_intersection,
    triangle_circle_intersection,
};

/// Up to two intersection points, stored inline.
pub type IntersectionPoints<const D: usize> = SmallVec<[Point<D>; 2]>;

/// Kind of outcome of an intersection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionType {
    /// The primitives are disjoint.
    None,
    /// Directions coincide: the intersection is empty or infinite.
    Parallel,
    /// One or more intersections were found.
    Intersect,
}

/// Re-projection of an intersection result on one input primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Correctness<T> {
    /// `true` if the result lies within tolerance of the primitive.
    pub ok: bool,
    /// The result projected on the primitive.
    pub projection: T,
}

/// Correctness witnesses for both input primitives, in argument order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectnessInfo<T> {
    pub first: Correctness<T>,
    pub second: Correctness<T>,
}

impl<T> CorrectnessInfo<T> {
    /// Returns `true` if both witnesses are within tolerance.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.first.ok && self.second.ok
    }
}

/// Outcome of an intersection query.
#[derive(Debug, Clone, PartialEq)]
pub enum IntersectionResult<T> {
    /// The primitives are disjoint.
    None,
    /// Directions coincide: the intersection is empty or infinite.
    Parallel,
    /// The primitives intersect at `result`.
    Intersect {
        result: T,
        correctness: CorrectnessInfo<T>,
    },
}

impl<T> IntersectionResult<T> {
    /// Builds an [`IntersectionResult::Intersect`], logging witnesses that
    /// fall outside the tolerance.
    pub(crate) fn intersect(result: T, correctness: CorrectnessInfo<T>) -> Self {
        if !correctness.is_correct() {
            debug!(
                first = correctness.first.ok,
                second = correctness.second.ok,
                "intersection result is not within tolerance of its inputs"
            );
        }
        Self::Intersect {
            result,
            correctness,
        }
    }

    /// Returns the kind of outcome.
    #[must_use]
    pub fn kind(&self) -> IntersectionType {
        match self {
            Self::None => IntersectionType::None,
            Self::Parallel => IntersectionType::Parallel,
            Self::Intersect { .. } => IntersectionType::Intersect,
        }
    }

    /// Returns `true` if an intersection was found.
    #[must_use]
    pub fn has_intersection(&self) -> bool {
        matches!(self, Self::Intersect { .. })
    }

    #[must_use]
    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Intersect { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_result(self) -> Option<T> {
        match self {
            Self::Intersect { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn correctness(&self) -> Option<&CorrectnessInfo<T>> {
        match self {
            Self::Intersect { correctness, .. } => Some(correctness),
            _ => None,
        }
    }
}

/// Witness for a single point and its projection on a primitive.
pub(crate) fn point_witness<const D: usize>(
    point: &Point<D>,
    projection: Point<D>,
) -> Correctness<Point<D>> {
    Correctness {
        ok: (projection - point).norm() < GLOBAL_EPSILON,
        projection,
    }
}

/// Witness for a set of points, each projected by `project`.
pub(crate) fn points_witness<const D: usize>(
    points: &IntersectionPoints<D>,
    project: impl Fn(&Point<D>) -> Point<D>,
) -> Correctness<IntersectionPoints<D>> {
    let projection: IntersectionPoints<D> = points.iter().map(project).collect();
    let ok = points
        .iter()
        .zip(&projection)
        .all(|(point, projected)| (projected - point).norm() < GLOBAL_EPSILON);
    Correctness { ok, projection }
}

/// Fallible variant of [`points_witness`].
pub(crate) fn try_points_witness<const D: usize>(
    points: &IntersectionPoints<D>,
    project: impl Fn(&Point<D>) -> Result<Point<D>>,
) -> Result<Correctness<IntersectionPoints<D>>> {
    let projection = points
        .iter()
        .map(project)
        .collect::<Result<IntersectionPoints<D>>>()?;
    let ok = points
        .iter()
        .zip(&projection)
        .all(|(point, projected)| (projected - point).norm() < GLOBAL_EPSILON);
    Ok(Correctness { ok, projection })
}

/// Recombines `point` from its barycentric coordinates on the segment.
pub(crate) fn segment_projection<const D: usize>(point: &Point<D>, segment: &Segment<D>) -> Result<Point<D>> {
    let [l0, l1] = segment_barycentric_coordinates(point, segment)?;
    let [v0, v1] = segment.vertices();
    Ok(Point::from(v0.coords * l0 + v1.coords * l1))
}

/// Recombines `point` from its barycentric coordinates on the triangle.
///
/// Degenerate triangles fall back to the barycenter.
pub(crate) fn triangle_projection(point: &Point3, triangle: &Triangle<3>) -> Point3 {
    let [l0, l1, l2] = triangle_barycentric_coordinates(point, triangle).unwrap_or_else(|error| {
        trace!(%error, "triangle witness falls back to the barycenter");
        [1.0 / 3.0; 3]
    });
    let [v0, v1, v2] = triangle.vertices();
    Point::from(v0.coords * l0 + v1.coords * l1 + v2.coords * l2)
}

/// Keeps the points lying on `segment` within tolerance.
pub(crate) fn retain_on_segment<const D: usize>(
    points: IntersectionPoints<D>,
    segment: &Segment<D>,
) -> IntersectionPoints<D> {
    points
        .into_iter()
        .filter(|point| point_segment_distance(point, segment).0 <= GLOBAL_EPSILON)
        .collect()
}

/// Real roots of `t^2 + 2 a1 t + a0 = 0`, in increasing order.
///
/// A discriminant within [`GLOBAL_EPSILON`] of zero yields a single
/// tangency root.
pub(crate) fn quadratic_roots(a1: f64, a0: f64) -> SmallVec<[f64; 2]> {
    let discr = a1 * a1 - a0;
    let mut roots = SmallVec::new();
    if discr > GLOBAL_EPSILON {
        let root = discr.sqrt();
        roots.push(-a1 - root);
        roots.push(-a1 + root);
    } else if discr > -GLOBAL_EPSILON {
        roots.push(-a1);
    }
    roots
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    // ── IntersectionResult ──

    #[test]
    fn result_accessors() {
        let point = Point2::new(1.0, 2.0);
        let witness = point_witness(&point, point);
        let result = IntersectionResult::intersect(
            point,
            CorrectnessInfo {
                first: witness.clone(),
                second: witness,
            },
        );
        assert!(result.has_intersection());
        assert_eq!(result.kind(), IntersectionType::Intersect);
        assert_eq!(result.result(), Some(&point));
        assert!(result.correctness().unwrap().is_correct());
        assert_eq!(result.into_result(), Some(point));
    }

    #[test]
    fn empty_outcomes_carry_nothing() {
        let none: IntersectionResult<Point2> = IntersectionResult::None;
        let parallel: IntersectionResult<Point2> = IntersectionResult::Parallel;
        assert!(!none.has_intersection());
        assert!(!parallel.has_intersection());
        assert_eq!(parallel.kind(), IntersectionType::Parallel);
        assert!(none.result().is_none());
        assert!(parallel.correctness().is_none());
    }

    #[test]
    fn witness_tolerance() {
        let point = Point2::new(0.0, 0.0);
        assert!(point_witness(&point, Point2::new(0.0, 1e-9)).ok);
        assert!(!point_witness(&point, Point2::new(0.0, 1e-3)).ok);
    }

    // ── helpers ──

    #[test]
    fn quadratic_root_counts() {
        // (t - 1)(t - 3) = t^2 - 4t + 3
        let roots = quadratic_roots(-2.0, 3.0);
        assert_eq!(roots.as_slice(), &[1.0, 3.0]);
        // (t - 2)^2
        assert_eq!(quadratic_roots(-2.0, 4.0).as_slice(), &[2.0]);
        assert!(quadratic_roots(0.0, 1.0).is_empty());
    }

    #[test]
    fn degenerate_segment_projection_is_an_error() {
        let segment = Segment::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        assert!(segment_projection(&Point2::new(5.0, 5.0), &segment).is_err());
    }

    #[test]
    fn segment_projection_recombines_point() {
        let segment = Segment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        let projection = segment_projection(&Point2::new(1.0, 0.0), &segment).unwrap();
        assert!((projection - Point2::new(1.0, 0.0)).norm() < 1e-12);
    }
}
