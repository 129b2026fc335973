//! Exact geometric predicates.
//!
//! Every predicate first runs a floating-point filter with a certified
//! error bound. When the filter cannot decide, the determinant is
//! recomputed with expansion arithmetic, so the returned sign is always
//! the sign of the exact determinant of the input coordinates.

mod expansion;
mod filter;

use tracing::trace;

use expansion::Expansion;

use super::{Point, Point2, Point3, Vector3};

/// Sign of an exactly evaluated expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    fn from_i8(value: i8) -> Self {
        match value {
            v if v > 0 => Self::Positive,
            v if v < 0 => Self::Negative,
            _ => Self::Zero,
        }
    }

    /// Returns `-1`, `0` or `1`.
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }

    /// Returns the opposite sign.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Negative => Self::Positive,
            Self::Zero => Self::Zero,
            Self::Positive => Self::Negative,
        }
    }
}

/// Computes the arithmetic constants used by the exact path.
///
/// Calling this is optional: every predicate initializes lazily, and
/// repeated calls are no-ops.
pub fn initialize() {
    let _ = expansion::constants();
}

/// Orientation of `p2` relative to the directed line `p0 -> p1`.
///
/// [`Sign::Positive`] when the triangle `(p0, p1, p2)` is counter-clockwise.
#[must_use]
pub fn orient_2d(p0: &Point2, p1: &Point2, p2: &Point2) -> Sign {
    filter::orient_2d(p0, p1, p2).unwrap_or_else(|| {
        trace!("orient_2d filter uncertain, using exact arithmetic");
        orient_2d_exact(p0, p1, p2)
    })
}

/// Orientation of `p3` relative to the plane through `p0`, `p1`, `p2`.
///
/// Sign of `det(p1 - p0, p2 - p0, p3 - p0)`: [`Sign::Positive`] when the
/// tetrahedron `(p0, p1, p2, p3)` has positive volume.
#[must_use]
pub fn orient_3d(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3) -> Sign {
    filter::orient_3d(p0, p1, p2, p3).unwrap_or_else(|| {
        trace!("orient_3d filter uncertain, using exact arithmetic");
        orient_3d_exact(p0, p1, p2, p3)
    })
}

/// Sign of the determinant whose rows are `v0`, `v1` and `v2`.
#[must_use]
pub fn det_3d(v0: &Vector3, v1: &Vector3, v2: &Vector3) -> Sign {
    filter::det_3d(v0, v1, v2).unwrap_or_else(|| {
        trace!("det_3d filter uncertain, using exact arithmetic");
        det_3d_exact(v0, v1, v2)
    })
}

/// Sign of `(p1 - p0) . (p2 - p0)`.
#[must_use]
pub fn dot_3d(p0: &Point3, p1: &Point3, p2: &Point3) -> Sign {
    filter::dot_3d(p0, p1, p2).unwrap_or_else(|| {
        trace!("dot_3d filter uncertain, using exact arithmetic");
        dot_exact(p0, p1, p2)
    })
}

/// Sign of `(p1 - p0) . (p2 - p0)` in the plane.
#[must_use]
pub fn dot_2d(p0: &Point2, p1: &Point2, p2: &Point2) -> Sign {
    filter::dot_2d(p0, p1, p2).unwrap_or_else(|| {
        trace!("dot_2d filter uncertain, using exact arithmetic");
        dot_exact(p0, p1, p2)
    })
}

/// Returns `true` if the three points are exactly collinear.
#[must_use]
pub fn aligned_3d(p0: &Point3, p1: &Point3, p2: &Point3) -> bool {
    filter::aligned_3d(p0, p1, p2).unwrap_or_else(|| {
        trace!("aligned_3d filter uncertain, using exact arithmetic");
        aligned_3d_exact(p0, p1, p2)
    })
}

fn aligned_3d_exact(p0: &Point3, p1: &Point3, p2: &Point3) -> bool {
    let u = [0, 1, 2].map(|i| Expansion::from_diff(p1[i], p0[i]));
    let v = [0, 1, 2].map(|i| Expansion::from_diff(p2[i], p0[i]));
    let normal_x = Expansion::det2x2(&u[1], &u[2], &v[1], &v[2]);
    let normal_y = Expansion::det2x2(&u[2], &u[0], &v[2], &v[0]);
    let normal_z = Expansion::det2x2(&u[0], &u[1], &v[0], &v[1]);
    normal_x.sign() == 0 && normal_y.sign() == 0 && normal_z.sign() == 0
}

fn orient_2d_exact(p0: &Point2, p1: &Point2, p2: &Point2) -> Sign {
    let a11 = Expansion::from_diff(p1.x, p0.x);
    let a12 = Expansion::from_diff(p1.y, p0.y);
    let a21 = Expansion::from_diff(p2.x, p0.x);
    let a22 = Expansion::from_diff(p2.y, p0.y);
    Sign::from_i8(Expansion::det2x2(&a11, &a12, &a21, &a22).sign())
}

fn orient_3d_exact(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3) -> Sign {
    let row = |p: &Point3| [0, 1, 2].map(|i| Expansion::from_diff(p[i], p0[i]));
    let [a11, a12, a13] = row(p1);
    let [a21, a22, a23] = row(p2);
    let [a31, a32, a33] = row(p3);
    let det = Expansion::det3x3([[&a11, &a12, &a13], [&a21, &a22, &a23], [&a31, &a32, &a33]]);
    Sign::from_i8(det.sign())
}

fn det_3d_exact(v0: &Vector3, v1: &Vector3, v2: &Vector3) -> Sign {
    let row = |v: &Vector3| [0, 1, 2].map(|i| Expansion::from_value(v[i]));
    let [a11, a12, a13] = row(v0);
    let [a21, a22, a23] = row(v1);
    let [a31, a32, a33] = row(v2);
    let det = Expansion::det3x3([[&a11, &a12, &a13], [&a21, &a22, &a23], [&a31, &a32, &a33]]);
    Sign::from_i8(det.sign())
}

fn dot_exact<const D: usize>(p0: &Point<D>, p1: &Point<D>, p2: &Point<D>) -> Sign {
    let mut total = Expansion::from_value(0.0);
    for i in 0..D {
        let u = Expansion::from_diff(p1[i], p0[i]);
        let v = Expansion::from_diff(p2[i], p0[i]);
        total = total.sum(&u.product(&v));
    }
    Sign::from_i8(total.sign())
}
