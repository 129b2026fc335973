//! Closest points between segments and lines.

use crate::geometry::{InfiniteLine, Segment};
use crate::math::Point;

/// Distance between two segments, with the closest point on each.
///
/// Minimizes `R(s, t) = |P(s) - Q(t)|^2` over the unit square, with
/// `P(s) = p0 + s (p1 - p0)` and `Q(t) = q0 + t (q1 - q0)`. Regions of the
/// `(s, t)` plane are labeled as follows, region 0 being the square:
///
/// ```text
///        t
///   4 |  3  | 2
///  ---+-----+---
///   5 |  0  | 1    s
///  ---+-----+---
///   6 |  7  | 8
/// ```
#[must_use]
#[allow(clippy::many_single_char_names, clippy::too_many_lines, clippy::similar_names)]
pub fn segment_segment_distance<const D: usize>(
    segment0: &Segment<D>,
    segment1: &Segment<D>,
) -> (f64, Point<D>, Point<D>) {
    let p1_minus_p0 = segment0.direction();
    let q1_minus_q0 = segment1.direction();
    let p0_minus_q0 = segment0.vertices()[0] - segment1.vertices()[0];
    let a = p1_minus_p0.dot(&p1_minus_p0);
    let b = p1_minus_p0.dot(&q1_minus_q0);
    let c = q1_minus_q0.dot(&q1_minus_q0);
    let d = p1_minus_p0.dot(&p0_minus_q0);
    let e = q1_minus_q0.dot(&p0_minus_q0);
    let det = a * c - b * b;

    let mut s;
    let t;
    if det > 0.0 {
        let bte = b * e;
        let ctd = c * d;
        if bte <= ctd {
            // s <= 0
            s = 0.0;
            if e <= 0.0 {
                // region 6
                t = 0.0;
                let nd = -d;
                if nd >= a {
                    s = 1.0;
                } else if nd > 0.0 {
                    s = nd / a;
                }
            } else if e < c {
                // region 5
                t = e / c;
            } else {
                // region 4
                t = 1.0;
                let bmd = b - d;
                if bmd >= a {
                    s = 1.0;
                } else if bmd > 0.0 {
                    s = bmd / a;
                }
            }
        } else {
            s = bte - ctd;
            if s >= det {
                // s = 1
                s = 1.0;
                let bpe = b + e;
                if bpe <= 0.0 {
                    // region 8
                    t = 0.0;
                    let nd = -d;
                    if nd <= 0.0 {
                        s = 0.0;
                    } else if nd < a {
                        s = nd / a;
                    }
                } else if bpe < c {
                    // region 1
                    t = bpe / c;
                } else {
                    // region 2
                    t = 1.0;
                    let bmd = b - d;
                    if bmd <= 0.0 {
                        s = 0.0;
                    } else if bmd < a {
                        s = bmd / a;
                    }
                }
            } else {
                // 0 < s < 1
                let ate = a * e;
                let btd = b * d;
                if ate <= btd {
                    // region 7
                    t = 0.0;
                    let nd = -d;
                    if nd <= 0.0 {
                        s = 0.0;
                    } else if nd >= a {
                        s = 1.0;
                    } else {
                        s = nd / a;
                    }
                } else {
                    let t_numerator = ate - btd;
                    if t_numerator >= det {
                        // region 3
                        t = 1.0;
                        let bmd = b - d;
                        if bmd <= 0.0 {
                            s = 0.0;
                        } else if bmd >= a {
                            s = 1.0;
                        } else {
                            s = bmd / a;
                        }
                    } else {
                        // region 0
                        s /= det;
                        t = t_numerator / det;
                    }
                }
            }
        }
    } else {
        // Parallel segments. R is constant along lines of slope a/b in the
        // (s, t) plane; pick the domain edge crossed by the minimum line,
        // testing s = 0 first and then t = 0 or t = 1.
        if e <= 0.0 {
            // t = 0, solve a s + d = 0
            t = 0.0;
            let nd = -d;
            if nd <= 0.0 {
                // region 6
                s = 0.0;
            } else if nd >= a {
                // region 8
                s = 1.0;
            } else {
                // region 7
                s = nd / a;
            }
        } else if e >= c {
            // t = 1, solve a s - b + d = 0
            t = 1.0;
            let bmd = b - d;
            if bmd <= 0.0 {
                // region 4
                s = 0.0;
            } else if bmd >= a {
                // region 2
                s = 1.0;
            } else {
                // region 3
                s = bmd / a;
            }
        } else {
            // region 5, the point (0, e/c) is on the minimum line
            s = 0.0;
            t = e / c;
        }
    }

    let closest0 = segment0.point_at(s);
    let closest1 = segment1.point_at(t);
    ((closest0 - closest1).norm(), closest0, closest1)
}

/// Distance between a segment and a line, with the closest point on the
/// segment then on the line.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn segment_line_distance<const D: usize>(
    segment: &Segment<D>,
    line: &InfiniteLine<D>,
) -> (f64, Point<D>, Point<D>) {
    // Line L(s) = origin + s u, with |u| = 1; segment Q(t) = q0 + t v.
    let u = line.direction();
    let v = segment.direction();
    let diff = line.origin() - segment.vertices()[0];
    let b = u.dot(&v);
    let c = v.dot(&v);
    let d = u.dot(&diff);
    let e = v.dot(&diff);
    let det = c - b * b;

    let (s, t) = if det > 0.0 {
        let t = (e - b * d) / det;
        if t <= 0.0 {
            (-d, 0.0)
        } else if t >= 1.0 {
            (b - d, 1.0)
        } else {
            ((b * e - c * d) / det, t)
        }
    } else {
        // Parallel or degenerate segment: any segment point works, take q0.
        (-d, 0.0)
    };

    let on_segment = segment.point_at(t);
    let on_line = line.point_at(s);
    ((on_segment - on_line).norm(), on_segment, on_line)
}
