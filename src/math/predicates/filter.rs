//! Floating-point filters with certified error bounds.
//!
//! Each filter evaluates its determinant in plain double precision and
//! returns `None` when the result is too close to zero (or the operands
//! are outside the range where the bound is valid) to trust its sign.

use crate::math::{Point2, Point3, Vector3};

use super::Sign;

fn certified(delta: f64, eps: f64) -> Option<Sign> {
    if delta > eps {
        Some(Sign::Positive)
    } else if delta < -eps {
        Some(Sign::Negative)
    } else {
        None
    }
}

fn max_abs<const N: usize>(values: [f64; N]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Filtered sign of `det(p1 - p0, p2 - p0)`.
pub(crate) fn orient_2d(p0: &Point2, p1: &Point2, p2: &Point2) -> Option<Sign> {
    let a11 = p1.x - p0.x;
    let a12 = p1.y - p0.y;
    let a21 = p2.x - p0.x;
    let a22 = p2.y - p0.y;
    let delta = a11 * a22 - a12 * a21;

    let max1 = max_abs([a11, a12]);
    let max2 = max_abs([a21, a22]);
    let (lower, upper) = (max1.min(max2), max1.max(max2));
    if lower < 5.003_680_819_609_646_354_13e-147 || upper > 1.675_975_991_242_824_079_23e153 {
        return None;
    }
    let eps = 8.887_205_737_259_279_768_11e-16 * (max1 * max2);
    certified(delta, eps)
}

/// Filtered sign of `det(p1 - p0, p2 - p0, p3 - p0)`.
#[allow(clippy::similar_names)]
pub(crate) fn orient_3d(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3) -> Option<Sign> {
    let a11 = p1.x - p0.x;
    let a12 = p1.y - p0.y;
    let a13 = p1.z - p0.z;
    let a21 = p2.x - p0.x;
    let a22 = p2.y - p0.y;
    let a23 = p2.z - p0.z;
    let a31 = p3.x - p0.x;
    let a32 = p3.y - p0.y;
    let a33 = p3.z - p0.z;
    let delta = a11 * (a22 * a33 - a23 * a32) - a21 * (a12 * a33 - a13 * a32)
        + a31 * (a12 * a23 - a13 * a22);

    let max1 = max_abs([a11, a21, a31]);
    let max2 = max_abs([a12, a13, a22, a23]);
    let max3 = max_abs([a22, a23, a32, a33]);
    let lower = max1.min(max2).min(max3);
    let upper = max1.max(max2).max(max3);
    if lower < 1.632_880_184_967_483_149_39e-98 || upper > 5.599_361_855_444_509_283_09e101 {
        return None;
    }
    let eps = 5.110_712_782_997_329_926_96e-15 * ((max2 * max3) * max1);
    certified(delta, eps)
}

/// Filtered sign of the 3x3 determinant whose rows are `v0`, `v1`, `v2`.
pub(crate) fn det_3d(v0: &Vector3, v1: &Vector3, v2: &Vector3) -> Option<Sign> {
    let delta = v0.x * (v1.y * v2.z - v1.z * v2.y) - v1.x * (v0.y * v2.z - v0.z * v2.y)
        + v2.x * (v0.y * v1.z - v0.z * v1.y);

    let max1 = max_abs([v0.x, v1.x, v2.x]);
    let max2 = max_abs([v0.y, v0.z, v1.y, v1.z]);
    let max3 = max_abs([v1.y, v1.z, v2.y, v2.z]);
    let lower = max1.min(max2).min(max3);
    let upper = max1.max(max2).max(max3);
    if lower < 1.926_633_879_818_715_791_79e-98 || upper > 1.119_872_371_088_901_856_62e102 {
        return None;
    }
    let eps = 3.111_335_556_716_807_650_34e-15 * ((max2 * max3) * max1);
    certified(delta, eps)
}

/// Filtered collinearity of three points.
///
/// Each component of `(p1 - p0) x (p2 - p0)` is the 2D orientation of the
/// points projected on a coordinate plane. A single certified non-zero
/// component proves the points are not aligned; zero is never certified.
pub(crate) fn aligned_3d(p0: &Point3, p1: &Point3, p2: &Point3) -> Option<bool> {
    let projections: [fn(&Point3) -> Point2; 3] = [
        |p| Point2::new(p.y, p.z),
        |p| Point2::new(p.z, p.x),
        |p| Point2::new(p.x, p.y),
    ];
    projections
        .iter()
        .any(|project| orient_2d(&project(p0), &project(p1), &project(p2)).is_some())
        .then_some(false)
}

/// Filtered sign of `(p1 - p0) . (p2 - p0)`.
pub(crate) fn dot_3d(p0: &Point3, p1: &Point3, p2: &Point3) -> Option<Sign> {
    let u = p1 - p0;
    let v = p2 - p0;
    dot_filter(u.dot(&v), max_abs([u.x, u.y, u.z]), max_abs([v.x, v.y, v.z]))
}

/// Filtered sign of `(p1 - p0) . (p2 - p0)` in the plane.
///
/// Shares the 3D bound, which dominates the 2D rounding error.
pub(crate) fn dot_2d(p0: &Point2, p1: &Point2, p2: &Point2) -> Option<Sign> {
    let u = p1 - p0;
    let v = p2 - p0;
    dot_filter(u.dot(&v), max_abs([u.x, u.y]), max_abs([v.x, v.y]))
}

fn dot_filter(delta: f64, max1: f64, max2: f64) -> Option<Sign> {
    let (lower, upper) = (max1.min(max2), max1.max(max2));
    if lower < 3.782_328_243_694_685_246_38e-147 || upper > 1.675_975_991_242_824_079_23e153 {
        return None;
    }
    let eps = 1.555_342_358_887_979_774_80e-15 * (max1 * max2);
    certified(delta, eps)
}
