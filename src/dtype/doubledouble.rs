//! Double-double arithmetic.
//!
//! A [`DoubleDouble`] is the unevaluated sum `hi + lo` of two `f64` words with
//! `|lo| <= ulp(hi) / 2`, carrying about 106 significant bits. Arithmetic is
//! built from error-free transformations (Dekker split, two-sum, two-product)
//! and never relies on a fused multiply-add, so results are identical on every
//! target.
//!
//! Non-finite intermediate results collapse to `(hi, 0)`.

use super::LayoutKind;
use super::double::{Double, scale_f64};
use super::layout::{FloatLayout, RoundingMode};
use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Extended precision value stored as two doubles, `hi` first.
///
/// Ordering is lexicographic on `(hi, lo)`, which matches numeric order for
/// normalized pairs.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
#[repr(C)]
pub struct DoubleDouble {
    /// Leading word, the value rounded to double precision
    pub hi: f64,
    /// Trailing correction
    pub lo: f64,
}

// Safety: DoubleDouble is repr(C) over two f64 with no padding
unsafe impl Pod for DoubleDouble {}
unsafe impl Zeroable for DoubleDouble {}

// ============================================================================
// Error-free transformations
// ============================================================================

const SPLITTER: f64 = 134_217_729.0; // 2^27 + 1
const SPLIT_THRESHOLD: f64 = 6.696_928_794_914_171e299; // 2^996
const TWO_POW_NEG_28: f64 = 3.725_290_298_461_914e-9;
const TWO_POW_28: f64 = 268_435_456.0;

/// True for finite values, using arithmetic only.
#[inline]
pub(crate) fn finite(x: f64) -> bool {
    x - x == 0.0
}

/// Dekker split of `a` into two 26-bit halves with `a = hi + lo`.
#[inline]
fn split(a: f64) -> (f64, f64) {
    if a > SPLIT_THRESHOLD || a < -SPLIT_THRESHOLD {
        let a = a * TWO_POW_NEG_28;
        let t = SPLITTER * a;
        let hi = t - (t - a);
        let lo = a - hi;
        (hi * TWO_POW_28, lo * TWO_POW_28)
    } else {
        let t = SPLITTER * a;
        let hi = t - (t - a);
        (hi, a - hi)
    }
}

/// `a + b = s + e` exactly.
#[inline]
pub(crate) fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    (s, (a - (s - bb)) + (b - bb))
}

/// `a + b = s + e` exactly, given `|a| >= |b|`.
#[inline]
pub(crate) fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    (s, b - (s - a))
}

/// `a * b = p + e` exactly, barring overflow and underflow.
#[inline]
pub(crate) fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let (ah, al) = split(a);
    let (bh, bl) = split(b);
    (p, ((ah * bh - p) + ah * bl + al * bh) + al * bl)
}

impl DoubleDouble {
    /// Build a pair without renormalizing. Callers guarantee `|lo| <= ulp(hi)/2`.
    #[inline]
    pub const fn new(hi: f64, lo: f64) -> Self {
        Self { hi, lo }
    }

    /// Exact widening of a double. Zeros keep their sign in both words.
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Self {
            hi: x,
            lo: if x == 0.0 { x } else { 0.0 },
        }
    }

    /// Round to the nearest double.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    /// Exact sum of two doubles.
    #[inline]
    pub fn from_sum(a: f64, b: f64) -> Self {
        let (hi, lo) = two_sum(a, b);
        if finite(hi) { Self::new(hi, lo) } else { Self::from_f64(hi) }
    }

    /// Exact product of two doubles.
    #[inline]
    pub fn from_product(a: f64, b: f64) -> Self {
        let (hi, lo) = two_prod(a, b);
        if finite(hi) && finite(lo) && hi != 0.0 {
            Self::new(hi, lo)
        } else {
            Self::from_f64(hi)
        }
    }

    /// Multiply by a single double.
    #[inline]
    pub fn mul_f64(self, b: f64) -> Self {
        let (p1, p2) = two_prod(self.hi, b);
        if !finite(p1) || p1 == 0.0 {
            return Self::from_f64(p1);
        }
        let p2 = p2 + self.lo * b;
        if !finite(p2) {
            return Self::from_f64(p1);
        }
        let (hi, lo) = fast_two_sum(p1, p2);
        Self::new(hi, lo)
    }

    /// Add a single double.
    #[inline]
    pub fn add_f64(self, b: f64) -> Self {
        self + Self::from_f64(b)
    }

    /// Multiply both words by `2^n`, exact unless a word leaves the normal range.
    #[inline]
    pub fn mul_pow2_words(self, n: i32) -> Self {
        let hi = scale_f64(self.hi, n);
        if !finite(hi) || hi == 0.0 {
            return Self::from_f64(hi);
        }
        Self::new(hi, scale_f64(self.lo, n))
    }

    /// Word that truncates `hi + lo` to double precision toward zero.
    #[inline]
    fn leading(self) -> Double {
        let hi = Double::from_f64(self.hi);
        if self.lo != 0.0 && (self.lo < 0.0) != (self.hi < 0.0) {
            hi.next_toward_zero()
        } else {
            hi
        }
    }

    /// Exact integer significand of `hi + lo`.
    ///
    /// Returns `(sig, exp2, sticky)` with `|hi + lo| = (sig + f) * 2^exp2`
    /// for some `f` in `[0, 1)`, where `f > 0` exactly when `sticky` is set.
    pub(crate) fn exact_significand(self) -> (u128, i32, bool) {
        let (h, eh) = Double::from_f64(self.hi).significand();
        if h == 0 || self.lo == 0.0 {
            return (h, eh, false);
        }
        let (l, el) = Double::from_f64(self.lo).significand();

        // Keep one bit of headroom for the carry of a same-sign sum.
        let lift = h.leading_zeros() - 1;
        let sig_h = h << lift;
        let exp2 = eh - lift as i32;

        let offset = el - exp2;
        let (aligned, sticky) = if offset >= 0 {
            (l << offset as u32, false)
        } else if offset <= -128 {
            (0, true)
        } else {
            let s = (-offset) as u32;
            (l >> s, l & ((1u128 << s) - 1) != 0)
        };

        if (self.lo < 0.0) == (self.hi < 0.0) {
            (sig_h + aligned, exp2, sticky)
        } else if sticky {
            (sig_h - aligned - 1, exp2, true)
        } else {
            (sig_h - aligned, exp2, false)
        }
    }
}

// ============================================================================
// Arithmetic operators
// ============================================================================

impl Add for DoubleDouble {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (s1, s2) = two_sum(self.hi, rhs.hi);
        if !finite(s1) {
            return Self::from_f64(s1);
        }
        let (t1, t2) = two_sum(self.lo, rhs.lo);
        let (s1, s2) = fast_two_sum(s1, s2 + t1);
        let (hi, lo) = fast_two_sum(s1, s2 + t2);
        if hi == 0.0 {
            return Self::from_f64((self.hi + rhs.hi) + (self.lo + rhs.lo));
        }
        Self::new(hi, lo)
    }
}

impl Sub for DoubleDouble {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for DoubleDouble {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (p1, p2) = two_prod(self.hi, rhs.hi);
        if !finite(p1) || p1 == 0.0 {
            return Self::from_f64(p1);
        }
        let p2 = p2 + (self.hi * rhs.lo + self.lo * rhs.hi);
        if !finite(p2) {
            return Self::from_f64(p1);
        }
        let (hi, lo) = fast_two_sum(p1, p2);
        Self::new(hi, lo)
    }
}

impl Div for DoubleDouble {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let q1 = self.hi / rhs.hi;
        if !finite(q1) || q1 == 0.0 {
            return Self::from_f64(q1);
        }
        let r = self - rhs.mul_f64(q1);
        let q2 = r.hi / rhs.hi;
        let r = r - rhs.mul_f64(q2);
        let q3 = r.hi / rhs.hi;
        let (q1, q2) = fast_two_sum(q1, q2);
        if !finite(q3) {
            return Self::new(q1, q2);
        }
        Self::new(q1, q2).add_f64(q3)
    }
}

impl Neg for DoubleDouble {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.hi, -self.lo)
    }
}

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for DoubleDouble {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, +);
impl_assign_op!(SubAssign, sub_assign, -);
impl_assign_op!(MulAssign, mul_assign, *);
impl_assign_op!(DivAssign, div_assign, /);

impl num_traits::Zero for DoubleDouble {
    #[inline]
    fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.hi == 0.0
    }
}

impl num_traits::One for DoubleDouble {
    #[inline]
    fn one() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl From<f64> for DoubleDouble {
    #[inline]
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Debug for DoubleDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DoubleDouble({:e} + {:e})", self.hi, self.lo)
    }
}

impl fmt::Display for DoubleDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e}", self.hi)
    }
}

// ============================================================================
// Layout view
// ============================================================================

impl FloatLayout for DoubleDouble {
    type Bits = u128;

    const KIND: LayoutKind = LayoutKind::DoubleDouble;
    const EXPONENT_BITS: u32 = 11;
    const MANTISSA_BITS: u32 = 52;
    const BIAS: i32 = 1023;
    const PRECISION: u32 = 106;
    const BYTES: usize = 16;

    #[inline]
    fn from_bits(bits: u128) -> Self {
        Self::new(
            f64::from_bits((bits >> 64) as u64),
            f64::from_bits(bits as u64),
        )
    }

    #[inline]
    fn to_bits(self) -> u128 {
        ((self.hi.to_bits() as u128) << 64) | self.lo.to_bits() as u128
    }

    #[inline]
    fn sign(self) -> bool {
        Double::from_f64(self.hi).sign()
    }

    #[inline]
    fn exponent(self) -> u32 {
        self.leading().exponent()
    }

    #[inline]
    fn mantissa(self) -> u128 {
        self.leading().mantissa()
    }

    #[inline]
    fn from_parts(sign: bool, exponent: u32, mantissa: u128) -> Self {
        Self::from_f64(Double::from_parts(sign, exponent, mantissa).to_f64())
    }

    fn encode_le(self, out: &mut [u8]) {
        out[..8].copy_from_slice(&self.hi.to_le_bytes());
        out[8..].copy_from_slice(&self.lo.to_le_bytes());
    }

    fn decode_le(bytes: &[u8]) -> Self {
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        hi.copy_from_slice(&bytes[..8]);
        lo.copy_from_slice(&bytes[8..16]);
        Self::new(f64::from_le_bytes(hi), f64::from_le_bytes(lo))
    }

    fn with_exponent(self, exponent: u32) -> Self {
        let current = self.exponent();
        if current == 0
            || exponent == 0
            || self.is_nan_or_inf()
            || exponent >= Self::MAX_EXPONENT
        {
            return Self::from_parts(self.sign(), exponent, self.mantissa());
        }
        self.mul_pow2_words(exponent as i32 - current as i32)
    }

    #[inline]
    fn with_sign(self, sign: bool) -> Self {
        if self.sign() == sign { self } else { -self }
    }

    #[inline]
    fn significand(self) -> (u128, i32) {
        let (sig, exp2, _) = self.exact_significand();
        (sig, exp2)
    }

    #[inline]
    fn significand_with_sticky(self) -> (u128, i32, bool) {
        self.exact_significand()
    }

    fn from_significand(sign: bool, sig: u128, exp2: i32, sticky: bool) -> Self {
        let hi = Double::from_significand(sign, sig, exp2, sticky);
        if hi.is_nan_or_inf() || hi.is_zero() {
            return Self::from_f64(hi.to_f64());
        }

        let (hs, he) = hi.significand();
        if he < exp2 {
            // hi sits on a finer grid than sig and holds it exactly
            return Self::from_f64(hi.to_f64());
        }
        let residual = sig.wrapping_sub(hs << (he - exp2) as u32) as i128;
        if residual == 0 {
            return Self::from_f64(hi.to_f64());
        }

        let (magnitude, sticky) = if residual > 0 {
            (residual as u128, sticky)
        } else if sticky {
            (residual.unsigned_abs() - 1, true)
        } else {
            (residual.unsigned_abs(), false)
        };
        let lo = Double::from_significand(sign ^ (residual < 0), magnitude, exp2, sticky);
        Self::new(hi.to_f64(), lo.to_f64())
    }

    fn scale_exponent(self, n: i32) -> Self {
        if self.is_nan_or_inf() || self.is_zero() {
            return self;
        }
        let (sig, exp2, sticky) = self.exact_significand();
        Self::from_significand(self.sign(), sig, exp2.saturating_add(n), sticky)
    }

    fn round_integral(self, mode: RoundingMode) -> Self {
        if self.is_nan_or_inf() || self.is_zero() {
            return self;
        }
        let hi = Double::from_f64(self.hi).round_integral(mode).to_f64();
        if hi != self.hi {
            return Self::from_f64(hi);
        }

        let lo_mode = match mode {
            RoundingMode::Trunc if self.hi > 0.0 => RoundingMode::Floor,
            RoundingMode::Trunc => RoundingMode::Ceil,
            other => other,
        };
        let lo = Double::from_f64(self.lo).round_integral(lo_mode).to_f64();
        let (hi, lo) = fast_two_sum(self.hi, lo);
        if hi == 0.0 {
            return Self::from_f64(if self.hi < 0.0 { -0.0 } else { 0.0 });
        }
        Self::new(hi, lo)
    }
}
