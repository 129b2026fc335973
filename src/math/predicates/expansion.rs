//! Exact arithmetic on floating-point expansions.
//!
//! An expansion is a sequence of non-overlapping doubles, ordered by
//! increasing magnitude, whose exact sum is the represented value. All
//! operations here are error-free: the result expansion represents the
//! exact sum, difference or product of its operands.

use std::sync::OnceLock;

use smallvec::SmallVec;
use tracing::debug;

/// Machine constants used by the error-free transformations.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArithmeticConstants {
    /// `2^ceil(p / 2) + 1`, used to split a double into two halves.
    pub splitter: f64,
    /// Largest power of two such that `1 + epsilon` rounds to `1`.
    pub epsilon: f64,
}

static CONSTANTS: OnceLock<ArithmeticConstants> = OnceLock::new();

/// Returns the process-wide arithmetic constants, computing them on first use.
pub(crate) fn constants() -> &'static ArithmeticConstants {
    CONSTANTS.get_or_init(compute_constants)
}

fn compute_constants() -> ArithmeticConstants {
    let mut every_other = true;
    let mut epsilon = 1.0_f64;
    let mut splitter = 1.0_f64;
    let mut check = 1.0_f64;
    // Halve epsilon until 1 + epsilon is no longer distinguishable from 1,
    // doubling the splitter every other step.
    loop {
        let last_check = check;
        epsilon *= 0.5;
        if every_other {
            splitter *= 2.0;
        }
        every_other = !every_other;
        check = 1.0 + epsilon;
        if check == 1.0 || check == last_check {
            break;
        }
    }
    splitter += 1.0;
    debug!(splitter, epsilon, "initialized expansion arithmetic constants");
    ArithmeticConstants { splitter, epsilon }
}

// ---------------------------------------------------------------------------
// Error-free transformations
// ---------------------------------------------------------------------------

/// `a + b = x + y` exactly, with `x = fl(a + b)`, assuming `|a| >= |b|`.
#[inline]
fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let b_virtual = x - a;
    (x, b - b_virtual)
}

/// `a + b = x + y` exactly, with `x = fl(a + b)`.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let b_virtual = x - a;
    let a_virtual = x - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    (x, a_roundoff + b_roundoff)
}

/// `a - b = x + y` exactly, with `x = fl(a - b)`.
#[inline]
fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    let b_virtual = a - x;
    let a_virtual = x + b_virtual;
    let b_roundoff = b_virtual - b;
    let a_roundoff = a - a_virtual;
    (x, a_roundoff + b_roundoff)
}

/// Splits `a` into two non-overlapping halves of at most 26 bits each.
#[inline]
fn split(a: f64, splitter: f64) -> (f64, f64) {
    let c = splitter * a;
    let a_big = c - a;
    let high = c - a_big;
    (high, a - high)
}

/// `a * b = x + y` exactly, with `x = fl(a * b)`.
#[inline]
fn two_product(a: f64, b: f64) -> (f64, f64) {
    let splitter = constants().splitter;
    let x = a * b;
    let (a_high, a_low) = split(a, splitter);
    let (b_high, b_low) = split(b, splitter);
    let err1 = x - a_high * b_high;
    let err2 = err1 - a_low * b_high;
    let err3 = err2 - a_high * b_low;
    (x, a_low * b_low - err3)
}

fn push_nonzero(limbs: &mut SmallVec<[f64; 16]>, value: f64) {
    if value != 0.0 {
        limbs.push(value);
    }
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// An exact real number represented as a sum of non-overlapping doubles.
///
/// Limbs are stored from least to most significant. An expansion always
/// holds at least one limb; zero is the single limb `0.0`.
#[derive(Debug, Clone)]
pub(crate) struct Expansion {
    limbs: SmallVec<[f64; 16]>,
}

impl Expansion {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            limbs: SmallVec::with_capacity(capacity),
        }
    }

    /// Upper bound on the length of the sum of two expansions.
    pub fn sum_capacity(a: &Self, b: &Self) -> usize {
        a.len() + b.len()
    }

    /// Upper bound on the length of the product of two expansions.
    pub fn product_capacity(a: &Self, b: &Self) -> usize {
        a.len() * b.len() * 2
    }

    /// Upper bound on the length of a 2x2 determinant of expansions.
    pub fn det2x2_capacity(a11: &Self, a12: &Self, a21: &Self, a22: &Self) -> usize {
        Self::product_capacity(a11, a22) + Self::product_capacity(a21, a12)
    }

    /// Upper bound on the length of a 3x3 determinant of expansions,
    /// developed along the first row.
    #[allow(clippy::similar_names)]
    pub fn det3x3_capacity(rows: [[&Self; 3]; 3]) -> usize {
        let [[a11, a12, a13], [a21, a22, a23], [a31, a32, a33]] = rows;
        let c11 = Self::det2x2_capacity(a22, a23, a32, a33);
        let c12 = Self::det2x2_capacity(a23, a21, a33, a31);
        let c13 = Self::det2x2_capacity(a21, a22, a31, a32);
        2 * (a11.len() * c11 + a12.len() * c12 + a13.len() * c13)
    }

    /// Exact representation of a single double.
    pub fn from_value(value: f64) -> Self {
        let mut expansion = Self::with_capacity(1);
        expansion.limbs.push(value);
        expansion
    }

    /// Exact sum of two doubles.
    pub fn from_sum(a: f64, b: f64) -> Self {
        let (x, y) = two_sum(a, b);
        Self::from_pair(x, y)
    }

    /// Exact difference of two doubles.
    pub fn from_diff(a: f64, b: f64) -> Self {
        let (x, y) = two_diff(a, b);
        Self::from_pair(x, y)
    }

    /// Exact product of two doubles.
    pub fn from_product(a: f64, b: f64) -> Self {
        let (x, y) = two_product(a, b);
        Self::from_pair(x, y)
    }

    fn from_pair(high: f64, low: f64) -> Self {
        let mut expansion = Self::with_capacity(2);
        expansion.limbs.push(low);
        expansion.limbs.push(high);
        expansion
    }

    pub fn len(&self) -> usize {
        self.limbs.len()
    }

    /// Sign of the represented value: `-1`, `0` or `1`.
    ///
    /// The most significant limb carries the sign of the whole expansion.
    pub fn sign(&self) -> i8 {
        match self.limbs.last() {
            Some(&top) if top > 0.0 => 1,
            Some(&top) if top < 0.0 => -1,
            _ => 0,
        }
    }

    /// Approximation of the represented value.
    pub fn estimate(&self) -> f64 {
        self.limbs.iter().sum()
    }

    fn negated(&self) -> Self {
        Self {
            limbs: self.limbs.iter().map(|limb| -limb).collect(),
        }
    }

    /// Exact sum, with zero limbs eliminated.
    pub fn sum(&self, other: &Self) -> Self {
        let mut result = Self::with_capacity(Self::sum_capacity(self, other));
        fast_expansion_sum_zeroelim(&self.limbs, &other.limbs, &mut result.limbs);
        result
    }

    /// Exact sum of three expansions.
    pub fn sum3(a: &Self, b: &Self, c: &Self) -> Self {
        a.sum(b).sum(c)
    }

    /// Exact difference, with zero limbs eliminated.
    pub fn diff(&self, other: &Self) -> Self {
        self.sum(&other.negated())
    }

    /// Exact product of the expansion with a single double.
    pub fn scale(&self, b: f64) -> Self {
        let mut result = Self::with_capacity(self.len() * 2);
        scale_expansion_zeroelim(&self.limbs, b, &mut result.limbs);
        result
    }

    /// Exact product of two expansions.
    ///
    /// The shorter operand is distilled recursively: each half is
    /// multiplied separately and the partial products are summed exactly.
    pub fn product(&self, other: &Self) -> Self {
        if self.len() == 1 && other.len() == 1 {
            return Self::from_product(self.limbs[0], other.limbs[0]);
        }
        let (short, long) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        distill_product(&short.limbs, long)
    }

    /// Exact value of `a11 * a22 - a12 * a21`.
    pub fn det2x2(a11: &Self, a12: &Self, a21: &Self, a22: &Self) -> Self {
        let a11a22 = a11.product(a22);
        let a12a21 = a12.product(a21);
        a11a22.diff(&a12a21)
    }

    /// Exact 3x3 determinant, developed along the first row.
    #[allow(clippy::similar_names)]
    pub fn det3x3(rows: [[&Self; 3]; 3]) -> Self {
        let [[a11, a12, a13], [a21, a22, a23], [a31, a32, a33]] = rows;
        let c11 = Self::det2x2(a22, a23, a32, a33);
        let c12 = Self::det2x2(a23, a21, a33, a31);
        let c13 = Self::det2x2(a21, a22, a31, a32);
        let a11c11 = a11.product(&c11);
        let a12c12 = a12.product(&c12);
        let a13c13 = a13.product(&c13);
        let mut result = Self::with_capacity(Self::det3x3_capacity(rows));
        result
            .limbs
            .extend_from_slice(&Self::sum3(&a11c11, &a12c12, &a13c13).limbs);
        result
    }
}

fn distill_product(short: &[f64], long: &Expansion) -> Expansion {
    match short {
        [] => Expansion::from_value(0.0),
        [single] => long.scale(*single),
        _ => {
            let (low, high) = short.split_at(short.len() / 2);
            distill_product(low, long).sum(&distill_product(high, long))
        }
    }
}

#[inline]
fn limb_at(limbs: &[f64], index: usize) -> f64 {
    limbs.get(index).copied().unwrap_or(0.0)
}

/// Shewchuk's FAST-EXPANSION-SUM with zero elimination.
fn fast_expansion_sum_zeroelim(e: &[f64], f: &[f64], h: &mut SmallVec<[f64; 16]>) {
    if e.is_empty() || f.is_empty() {
        h.extend_from_slice(if e.is_empty() { f } else { e });
        if h.is_empty() {
            h.push(0.0);
        }
        return;
    }

    let mut e_index = 0;
    let mut f_index = 0;
    let mut e_now = e[0];
    let mut f_now = f[0];
    let mut q;

    if (f_now > e_now) == (f_now > -e_now) {
        q = e_now;
        e_index += 1;
        e_now = limb_at(e, e_index);
    } else {
        q = f_now;
        f_index += 1;
        f_now = limb_at(f, f_index);
    }

    if e_index < e.len() && f_index < f.len() {
        let (q_new, h_h) = if (f_now > e_now) == (f_now > -e_now) {
            let pair = fast_two_sum(e_now, q);
            e_index += 1;
            e_now = limb_at(e, e_index);
            pair
        } else {
            let pair = fast_two_sum(f_now, q);
            f_index += 1;
            f_now = limb_at(f, f_index);
            pair
        };
        q = q_new;
        push_nonzero(h, h_h);

        while e_index < e.len() && f_index < f.len() {
            let (q_new, h_h) = if (f_now > e_now) == (f_now > -e_now) {
                let pair = two_sum(q, e_now);
                e_index += 1;
                e_now = limb_at(e, e_index);
                pair
            } else {
                let pair = two_sum(q, f_now);
                f_index += 1;
                f_now = limb_at(f, f_index);
                pair
            };
            q = q_new;
            push_nonzero(h, h_h);
        }
    }

    while e_index < e.len() {
        let (q_new, h_h) = two_sum(q, e_now);
        e_index += 1;
        e_now = limb_at(e, e_index);
        q = q_new;
        push_nonzero(h, h_h);
    }
    while f_index < f.len() {
        let (q_new, h_h) = two_sum(q, f_now);
        f_index += 1;
        f_now = limb_at(f, f_index);
        q = q_new;
        push_nonzero(h, h_h);
    }

    if q != 0.0 || h.is_empty() {
        h.push(q);
    }
}

/// Shewchuk's SCALE-EXPANSION with zero elimination.
fn scale_expansion_zeroelim(e: &[f64], b: f64, h: &mut SmallVec<[f64; 16]>) {
    let Some((&first, rest)) = e.split_first() else {
        h.push(0.0);
        return;
    };
    let (mut q, h_h) = two_product(first, b);
    push_nonzero(h, h_h);
    for &e_now in rest {
        let (product1, product0) = two_product(e_now, b);
        let (sum, h_h) = two_sum(q, product0);
        push_nonzero(h, h_h);
        let (q_new, h_h) = fast_two_sum(product1, sum);
        q = q_new;
        push_nonzero(h, h_h);
    }
    if q != 0.0 || h.is_empty() {
        h.push(q);
    }
}
