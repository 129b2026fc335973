//! Distance from a point to an ellipse or ellipsoid.
//!
//! The query is expressed in the ellipse frame, reflected into the first
//! orthant and its axes sorted by decreasing extent. The closest point then
//! solves `x_i = p_i y_i / (s + p_i)` for the Lagrange multiplier `s`, found
//! by bisecting the monotonic function `G(s) = sum (p_i z_i / (s + p_i))^2 - 1`.

use smallvec::SmallVec;
use tracing::warn;

use crate::error::{ConsistencyError, Result};
use crate::geometry::Ellipse;
use crate::math::{Point, Vector};

/// Hard cap on bisection steps; doubles always converge well before it.
pub const MAX_BISECTION_ITERATIONS: usize = 2048;

type Components = SmallVec<[f64; 4]>;

/// Distance from a point to an ellipse (2D) or ellipsoid (3D), with the
/// closest point on its boundary.
///
/// # Errors
///
/// Returns an error if an ellipse axis is zero-length or dependent on the
/// others, or if the bisection does not converge.
pub fn point_ellipse_distance<const D: usize>(
    point: &Point<D>,
    ellipse: &Ellipse<D>,
) -> Result<(f64, Point<D>)> {
    let (directions, extents) = ellipse.axes().orthonormalized()?;
    let offset = point - ellipse.center();
    let local: [f64; D] = std::array::from_fn(|i| directions[i].dot(&offset));

    let mut order: [usize; D] = std::array::from_fn(|i| i);
    order.sort_by(|a, b| extents[*b].total_cmp(&extents[*a]));
    let sorted_extents: [f64; D] = order.map(|i| extents[i]);
    let sorted_query: [f64; D] = order.map(|i| local[i].abs());

    let (squared, sorted_closest) = closest_on_canonical(&sorted_extents, &sorted_query)?;

    let mut closest_local = [0.0; D];
    for (position, &axis) in order.iter().enumerate() {
        closest_local[axis] = sorted_closest[position].copysign(local[axis]);
    }
    let displacement = directions
        .iter()
        .zip(closest_local)
        .fold(Vector::<D>::zeros(), |acc, (direction, x)| acc + direction * x);
    Ok((squared.max(0.0).sqrt(), ellipse.center() + displacement))
}

/// Closest point on the axis-aligned ellipsoid with extents sorted in
/// decreasing order, for a query in the first orthant.
fn closest_on_canonical<const D: usize>(extents: &[f64; D], query: &[f64; D]) -> Result<(f64, [f64; D])> {
    let mut closest = [0.0; D];
    let (positive_extents, positive_query): (Components, Components) = extents
        .iter()
        .zip(query)
        .filter(|(_, y)| **y > 0.0)
        .map(|(e, y)| (*e, *y))
        .unzip();

    let last = D - 1;
    let mut squared = None;
    if query[last] <= 0.0 {
        // The query lies on the hyperplane of the smallest axis: the
        // closest point may leave it when the query is deep enough inside.
        let smallest_sqr = extents[last] * extents[last];
        let ratios: Option<Components> = positive_extents
            .iter()
            .zip(&positive_query)
            .map(|(e, y)| {
                let numer = e * y;
                let denom = e * e - smallest_sqr;
                (numer < denom).then(|| numer / denom)
            })
            .collect();
        if let Some(ratios) = ratios {
            let discr = 1.0 - ratios.iter().map(|r| r * r).sum::<f64>();
            if discr > 0.0 {
                let mut total = 0.0;
                let mut positive_closest = Components::new();
                for ((e, y), r) in positive_extents.iter().zip(&positive_query).zip(&ratios) {
                    let x = e * r;
                    total += (x - y) * (x - y);
                    positive_closest.push(x);
                }
                closest[last] = extents[last] * discr.sqrt();
                total += closest[last] * closest[last];
                scatter_positive(query, &positive_closest, &mut closest);
                squared = Some(total);
            }
        }
    }

    let squared = match squared {
        Some(value) => value,
        None => {
            closest[last] = 0.0;
            let (value, positive_closest) = bisect(&positive_extents, &positive_query)?;
            scatter_positive(query, &positive_closest, &mut closest);
            value
        }
    };
    Ok((squared, closest))
}

fn scatter_positive<const D: usize>(query: &[f64; D], values: &[f64], out: &mut [f64; D]) {
    let mut next = values.iter();
    for (y, x) in query.iter().zip(out.iter_mut()) {
        if *y > 0.0 {
            if let Some(value) = next.next() {
                *x = *value;
            }
        }
    }
}

/// Solves for the closest point when every query component is positive.
#[allow(clippy::float_cmp)]
fn bisect(extents: &[f64], query: &[f64]) -> Result<(f64, Components)> {
    let Some(&smallest) = extents.last() else {
        return Ok((0.0, Components::new()));
    };
    let z: Components = query.iter().zip(extents).map(|(y, e)| y / e).collect();
    let sum_z_sqr: f64 = z.iter().map(|v| v * v).sum();
    if sum_z_sqr == 1.0 {
        return Ok((0.0, query.iter().copied().collect()));
    }

    let ratio_sqr: Components = extents.iter().map(|e| (e / smallest) * (e / smallest)).collect();
    let numerator: Components = ratio_sqr.iter().zip(&z).map(|(p, z)| p * z).collect();
    let mut s_min = z[z.len() - 1] - 1.0;
    let mut s_max = if sum_z_sqr < 1.0 {
        0.0
    } else {
        numerator.iter().map(|n| n * n).sum::<f64>().sqrt() - 1.0
    };

    let mut s = 0.0;
    let mut converged = false;
    for _ in 0..MAX_BISECTION_ITERATIONS {
        s = 0.5 * (s_min + s_max);
        if s == s_min || s == s_max {
            converged = true;
            break;
        }
        let g = numerator
            .iter()
            .zip(&ratio_sqr)
            .map(|(n, p)| {
                let r = n / (s + p);
                r * r
            })
            .sum::<f64>()
            - 1.0;
        if g > 0.0 {
            s_min = s;
        } else if g < 0.0 {
            s_max = s;
        } else {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(
            iterations = MAX_BISECTION_ITERATIONS,
            s_min, s_max, "ellipse distance bisection did not converge"
        );
        return Err(ConsistencyError::IterationCapReached {
            algorithm: "point_ellipse_distance",
            iterations: MAX_BISECTION_ITERATIONS,
        }
        .into());
    }

    let mut squared = 0.0;
    let closest: Components = ratio_sqr
        .iter()
        .zip(query)
        .map(|(p, y)| {
            let x = p * y / (s + p);
            squared += (x - y) * (x - y);
            x
        })
        .collect();
    Ok((squared, closest))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Frame;
    use crate::math::{Point2, Point3, Vector2, Vector3};
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    fn axis_aligned(a: f64, b: f64) -> Ellipse<2> {
        Ellipse::new(
            Point2::origin(),
            Frame::new([Vector2::new(a, 0.0), Vector2::new(0.0, b)]),
        )
    }

    fn on_ellipse(point: &Point2, a: f64, b: f64) -> bool {
        ((point.x / a).powi(2) + (point.y / b).powi(2) - 1.0).abs() < 1e-9
    }

    // ── 2D ──

    #[test]
    fn points_on_the_axes() {
        let ellipse = axis_aligned(3.0, 2.0);
        let (d, closest) = point_ellipse_distance(&Point2::new(4.0, 0.0), &ellipse).unwrap();
        assert_relative_eq!(d, 1.0, epsilon = TOL);
        assert!((closest - Point2::new(3.0, 0.0)).norm() < TOL);

        let (d, closest) = point_ellipse_distance(&Point2::new(0.0, 5.0), &ellipse).unwrap();
        assert_relative_eq!(d, 3.0, epsilon = TOL);
        assert!((closest - Point2::new(0.0, 2.0)).norm() < TOL);
    }

    #[test]
    fn negative_side_is_mirrored() {
        let ellipse = axis_aligned(3.0, 2.0);
        let (d, closest) = point_ellipse_distance(&Point2::new(-4.0, 0.0), &ellipse).unwrap();
        assert_relative_eq!(d, 1.0, epsilon = TOL);
        assert!((closest - Point2::new(-3.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn inside_point_on_major_axis_leaves_the_axis() {
        let ellipse = axis_aligned(3.0, 2.0);
        let (d, closest) = point_ellipse_distance(&Point2::new(1.0, 0.0), &ellipse).unwrap();
        assert_relative_eq!(d, 3.2_f64.sqrt(), epsilon = TOL);
        assert!((closest - Point2::new(1.8, 1.6)).norm() < TOL);
    }

    #[test]
    fn generic_point_lands_on_ellipse() {
        let ellipse = axis_aligned(3.0, 2.0);
        let query = Point2::new(2.5, 2.5);
        let (d, closest) = point_ellipse_distance(&query, &ellipse).unwrap();
        assert!(on_ellipse(&closest, 3.0, 2.0));
        assert_relative_eq!(d, (query - closest).norm(), epsilon = TOL);
        // Sampled boundary points are never closer.
        for k in 0..360 {
            let angle = f64::from(k).to_radians();
            let sample = Point2::new(3.0 * angle.cos(), 2.0 * angle.sin());
            assert!((query - sample).norm() >= d - 1e-9);
        }
    }

    #[test]
    fn point_on_boundary_has_zero_distance() {
        let ellipse = axis_aligned(3.0, 2.0);
        let (d, _) = point_ellipse_distance(&Point2::new(3.0, 0.0), &ellipse).unwrap();
        assert!(d < TOL);
    }

    #[test]
    fn rotated_and_translated_frame() {
        let ellipse = Ellipse::new(
            Point2::new(1.0, 1.0),
            Frame::new([Vector2::new(0.0, 3.0), Vector2::new(-2.0, 0.0)]),
        );
        let (d, closest) = point_ellipse_distance(&Point2::new(1.0, 5.0), &ellipse).unwrap();
        assert_relative_eq!(d, 1.0, epsilon = TOL);
        assert!((closest - Point2::new(1.0, 4.0)).norm() < TOL);
    }

    #[test]
    fn zero_axis_is_rejected() {
        let ellipse = Ellipse::new(
            Point2::origin(),
            Frame::new([Vector2::new(1.0, 0.0), Vector2::zeros()]),
        );
        assert!(point_ellipse_distance(&Point2::new(2.0, 0.0), &ellipse).is_err());
    }

    // ── 3D ──

    #[test]
    fn ellipsoid_distances() {
        let ellipsoid = Ellipse::new(
            Point3::origin(),
            Frame::new([
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 2.0, 0.0),
                Vector3::new(0.0, 0.0, 3.0),
            ]),
        );
        let (d, closest) = point_ellipse_distance(&Point3::new(0.0, 0.0, 5.0), &ellipsoid).unwrap();
        assert_relative_eq!(d, 2.0, epsilon = TOL);
        assert!((closest - Point3::new(0.0, 0.0, 3.0)).norm() < TOL);

        let (d, closest) = point_ellipse_distance(&Point3::new(3.0, 0.0, 0.0), &ellipsoid).unwrap();
        assert_relative_eq!(d, 2.0, epsilon = TOL);
        assert!((closest - Point3::new(1.0, 0.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn unit_sphere_frame_matches_sphere_distance() {
        let sphere = Ellipse::new(Point3::new(1.0, 2.0, 3.0), Frame::identity());
        let query = Point3::new(2.0, 3.0, 4.0);
        let (d, closest) = point_ellipse_distance(&query, &sphere).unwrap();
        assert_relative_eq!(d, 3.0_f64.sqrt() - 1.0, epsilon = TOL);
        assert_relative_eq!((closest - sphere.center()).norm(), 1.0, epsilon = TOL);
    }
}
