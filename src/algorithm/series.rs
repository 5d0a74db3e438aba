//! Double-double evaluators for the Bessel, Fresnel and Lambert W functions.
//!
//! The pieces here are convergent series, asymptotic expansions, recurrences
//! and continued fractions whose term counts depend on the argument. They
//! always run in [`DoubleDouble`] and take the `precision` the caller needs:
//! loops stop once a term falls below `2^-(precision + 6)` of the running
//! sum, so an `f64` caller pays for about half the terms a double-double
//! caller does.
//!
//! Oscillating results need `x mod pi` for arguments far beyond the range of
//! any `pi` constant. [`half_turns`] reduces an exactly split argument
//! against 1378 bits of `1/pi`, which covers every finite double-double.

use crate::algorithm::kernels::{ExpKernel, RoundingKernel};
use crate::dtype::{DoubleDouble, Real, two_prod};

/// `1/pi` as `sum INV_PI_WORDS[j] 2^(-53 j)`
const INV_PI_WORDS: [f64; 26] = [
    0.3183098861837907,
    -0.17724976188299263,
    -0.08698262489163541,
    0.05885148432533195,
    -0.010269768962595112,
    0.0016819393038747248,
    -0.0008369765116846525,
    -0.00018355444222078118,
    5.528057327445478e-05,
    -4.513117709672867e-06,
    -1.3860439961996354e-06,
    8.570103151188786e-07,
    1.7796804665039547e-07,
    -1.7244024261030064e-09,
    -4.894140451382867e-10,
    1.1432935128332884e-10,
    4.41834953627346e-12,
    -1.8238349566387613e-12,
    -1.4283176622779613e-13,
    -7.513703013051794e-15,
    -3.586921015943747e-15,
    4.425048056229334e-17,
    -2.634790936510282e-17,
    6.43227412749514e-18,
    7.327255200224272e-19,
    -3.2388088580736297e-19,
];

/// Parts below `2^-TURN_CUTOFF` half turns are dropped.
const TURN_CUTOFF: i32 = 132;

/// Upper bound on the terms of any series here
const MAX_TERMS: u32 = 400;

/// Upper bound on continued-fraction levels
const MAX_LEVELS: u32 = 2000;

/// Iteration cap for the root finders
const MAX_ITERATIONS: u32 = 24;

/// `1/e`
pub const RCPR_E: DoubleDouble = DoubleDouble::new(0.367_879_441_171_442_33, -1.242_875_367_278_836_3e-17);

/// `e`
pub const E: DoubleDouble = DoubleDouble::new(2.718_281_828_459_045, 1.445_646_891_729_250_2e-16);

/// `1/sqrt(2 pi)`
pub const FRAC_1_SQRT_2PI: DoubleDouble =
    DoubleDouble::new(0.398_942_280_401_432_7, -2.492_327_202_277_73e-17);

/// `sqrt(2/pi)`
pub const SQRT_2_BY_PI: DoubleDouble =
    DoubleDouble::new(0.797_884_560_802_865_4, -4.984_654_404_555_46e-17);

/// `sqrt(pi/8)`, the limit of the unnormalized Fresnel integrals
pub const SQRT_PI_BY_8: DoubleDouble =
    DoubleDouble::new(0.626_657_068_657_750_2, -4.582_144_995_114_792e-17);

/// `pi/6`, the cubic coefficient of the normalized Fresnel sine
pub const PI_BY_6: DoubleDouble =
    DoubleDouble::new(0.523_598_775_598_298_9, -5.360_408_832_255_455e-17);

/// `2^-(precision + 6)`, the relative size at which a loop stops.
#[inline]
fn tolerance(precision: u32) -> f64 {
    f64::pow2(-(precision as i32) - 6)
}

// ============================================================================
// Reduction modulo pi
// ============================================================================

/// `(v 2^s) mod 2`, exact, in `(-2, 2)`.
fn mod_two_scaled(v: f64, s: i32) -> f64 {
    if v == 0.0 {
        return 0.0;
    }
    if s < 0 {
        return v.mul_pow2(s);
    }
    let unit = f64::pow2(1 - s);
    let whole = (v / unit).round_toward_zero() * unit;
    (v - whole).mul_pow2(s)
}

/// Add a part in `(-2, 2)` to a sum kept in `[0, 2)`.
#[inline]
fn accumulate(sum: DoubleDouble, part: f64) -> DoubleDouble {
    let s = sum + DoubleDouble::from_f64(part);
    if s >= DoubleDouble::TWO {
        s - DoubleDouble::TWO
    } else if s < DoubleDouble::ZERO {
        s + DoubleDouble::TWO
    } else {
        s
    }
}

/// `(sum(words) 2^exponent / pi) mod 2` when `inverse_pi` is set, otherwise
/// `(sum(words) 2^exponent) mod 2`, in `[0, 2)`.
///
/// The words must be exact, with magnitudes below 4. Each product with a
/// word of `1/pi` is split exactly and reduced before it is summed, so the
/// result keeps double-double accuracy however large the exponent.
pub fn half_turns(words: &[f64], exponent: i32, inverse_pi: bool) -> DoubleDouble {
    let mut sum = DoubleDouble::ZERO;
    for &w in words {
        if w == 0.0 {
            continue;
        }
        if !inverse_pi {
            sum = accumulate(sum, mod_two_scaled(w, exponent));
            continue;
        }
        for (j, &p) in INV_PI_WORDS.iter().enumerate() {
            let s = exponent - 53 * j as i32;
            if s < -TURN_CUTOFF {
                break;
            }
            let (hi, lo) = two_prod(w, p);
            sum = accumulate(sum, mod_two_scaled(hi, s));
            sum = accumulate(sum, mod_two_scaled(lo, s));
        }
    }
    sum
}

/// Exact words of `c^2`.
pub fn square_words(c: DoubleDouble) -> [f64; 6] {
    let (a0, a1) = two_prod(c.hi, c.hi);
    let (b0, b1) = two_prod(2.0 * c.hi, c.lo);
    let (d0, d1) = two_prod(c.lo, c.lo);
    [a0, a1, b0, b1, d0, d1]
}

// ============================================================================
// Bessel functions of order zero
// ============================================================================

/// Terms of `sum q^k / (k!)^2` needed at `precision`, with `q >= 0`.
fn maclaurin_terms(q: f64, precision: u32) -> u32 {
    let tol = tolerance(precision);
    let (mut term, mut sum, mut k) = (1.0, 1.0, 0u32);
    while term > tol * sum && k < MAX_TERMS {
        k += 1;
        term *= q / (k * k) as f64;
        sum += term;
    }
    k
}

/// `sum (sign q)^k / (k!)^2`, nested from the last term.
fn squared_factorial_series(q: DoubleDouble, alternating: bool, precision: u32) -> DoubleDouble {
    let mut acc = DoubleDouble::ONE;
    for k in (1..=maclaurin_terms(q.hi, precision)).rev() {
        let step = q * acc / DoubleDouble::from_f64((k * k) as f64);
        acc = if alternating {
            DoubleDouble::ONE - step
        } else {
            DoubleDouble::ONE + step
        };
    }
    acc
}

/// `I0(x) = sum (x^2/4)^k / (k!)^2`.
pub fn bessel_i0_series(x: DoubleDouble, precision: u32) -> DoubleDouble {
    squared_factorial_series((x * x).mul_f64(0.25), false, precision)
}

/// `J0(x) = sum (-x^2/4)^k / (k!)^2`, for `x <= 2`.
pub fn bessel_j0_series(x: DoubleDouble, precision: u32) -> DoubleDouble {
    squared_factorial_series((x * x).mul_f64(0.25), true, precision)
}

/// Terms `u_k = prod (2j - 1)^2 / (8 j x)` of the large-argument
/// expansions, passed to `sink` until they stop shrinking or drop below the
/// tolerance.
fn asymptotic_terms(x: DoubleDouble, precision: u32, mut sink: impl FnMut(u32, DoubleDouble)) {
    let tol = tolerance(precision);
    let eight_x = x.mul_f64(8.0);
    let mut term = DoubleDouble::ONE;
    sink(0, term);
    for k in 1..MAX_TERMS {
        let odd = (2 * k - 1) as f64;
        let next = term.mul_f64(odd * odd) / eight_x.mul_f64(k as f64);
        if next >= term {
            break;
        }
        term = next;
        sink(k, term);
        if term.hi < tol {
            break;
        }
    }
}

/// `sqrt(2 pi x) e^(-x) I0(x) = sum u_k`, valid once `e^(-2x)` is below
/// the target precision.
pub fn bessel_i0_asymptotic(x: DoubleDouble, precision: u32) -> DoubleDouble {
    let mut sum = DoubleDouble::ZERO;
    asymptotic_terms(x, precision, |_, u| sum = sum + u);
    sum
}

/// Hankel's `(P0(x), Q0(x))` with
/// `J0(x) = sqrt(2/(pi x)) (P0 cos(x - pi/4) - Q0 sin(x - pi/4))`.
pub fn bessel_j0_hankel(x: DoubleDouble, precision: u32) -> (DoubleDouble, DoubleDouble) {
    let mut p = DoubleDouble::ZERO;
    let mut q = DoubleDouble::ZERO;
    asymptotic_terms(x, precision, |k, u| match k % 4 {
        0 => p = p + u,
        1 => q = q - u,
        2 => p = p - u,
        _ => q = q + u,
    });
    (p, q)
}

/// `J0(x)` for moderate `x` by Miller's backward recurrence, normalized with
/// `J0 + 2 (J2 + J4 + ...) = 1`.
pub fn bessel_j0_recurrence(x: DoubleDouble, precision: u32) -> DoubleDouble {
    let rescale = f64::pow2(500);
    let start = (1.25 * x.hi + 0.45 * precision as f64 + 16.0) as u32;
    let start = start + start % 2;
    let two_by_x = DoubleDouble::TWO / x;

    let mut above = DoubleDouble::ZERO;
    let mut current = DoubleDouble::from_f64(f64::pow2(-500));
    let mut even_sum = DoubleDouble::ZERO;
    for k in (1..=start).rev() {
        let below = two_by_x.mul_f64(k as f64) * current - above;
        above = current;
        current = below;
        if (k - 1) % 2 == 0 && k > 1 {
            even_sum = even_sum + current;
        }
        if current.hi.abs() > rescale {
            current = current.mul_pow2(-500);
            above = above.mul_pow2(-500);
            even_sum = even_sum.mul_pow2(-500);
        }
    }
    current / (current + even_sum.mul_f64(2.0))
}

// ============================================================================
// Fresnel integrals
// ============================================================================

/// Double-double complex number, only as much as the continued fraction needs.
#[derive(Copy, Clone, Debug)]
struct Complex {
    re: DoubleDouble,
    im: DoubleDouble,
}

impl Complex {
    fn new(re: DoubleDouble, im: DoubleDouble) -> Self {
        Self { re, im }
    }

    fn add(self, other: Self) -> Self {
        Self::new(self.re + other.re, self.im + other.im)
    }

    fn scale(self, k: DoubleDouble) -> Self {
        Self::new(self.re * k, self.im * k)
    }

    fn mul(self, other: Self) -> Self {
        Self::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    fn recip(self) -> Self {
        let norm = self.re * self.re + self.im * self.im;
        Self::new(self.re / norm, -self.im / norm)
    }

    fn distance_from_one(self) -> f64 {
        (self.re - DoubleDouble::ONE).hi.abs() + self.im.hi.abs()
    }
}

/// `(C, S)` from the Maclaurin series in `z = a x^2`, where `a` is 1 for
/// the unnormalized integrals and `pi/2` for the normalized ones:
/// `C = x sum_(k even) (-1)^(k/2) z^k / (k! (2k+1))` and
/// `S = x sum_(k odd) (-1)^((k-1)/2) z^k / (k! (2k+1))`.
pub fn fresnel_series(
    x: DoubleDouble,
    z: DoubleDouble,
    precision: u32,
) -> (DoubleDouble, DoubleDouble) {
    let tol = tolerance(precision);
    let mut term = DoubleDouble::ONE;
    let mut c = DoubleDouble::ONE;
    let mut s = DoubleDouble::ZERO;
    for k in 1..MAX_TERMS {
        term = term * z / DoubleDouble::from_f64(k as f64);
        let part = term / DoubleDouble::from_f64((2 * k + 1) as f64);
        match k % 4 {
            0 => c = c + part,
            1 => s = s + part,
            2 => c = c - part,
            _ => s = s - part,
        }
        if term.hi < tol * z.hi.min(1.0) {
            break;
        }
    }
    (x * c, x * s)
}

/// `(C, S)` for `z = a x^2 >= 3/2` from the continued fraction of the
/// complementary error function at `(1 - i) sqrt(z)`, evaluated with the
/// modified Lentz method.
///
/// `phase` is `(sin z, cos z)` from an exact reduction, and `limit` is the
/// common value both integrals approach.
pub fn fresnel_fraction(
    x: DoubleDouble,
    z: DoubleDouble,
    phase: (DoubleDouble, DoubleDouble),
    limit: DoubleDouble,
    precision: u32,
) -> (DoubleDouble, DoubleDouble) {
    let tol = tolerance(precision);
    let mut b = Complex::new(DoubleDouble::ONE, -z.mul_f64(2.0));
    let mut c = Complex::new(DoubleDouble::from_f64(1e150), DoubleDouble::ZERO);
    let mut d = b.recip();
    let mut h = d;
    let mut n = -1.0f64;
    for _ in 2..MAX_LEVELS {
        n += 2.0;
        let a = DoubleDouble::from_f64(-n * (n + 1.0));
        b = Complex::new(b.re + DoubleDouble::from_f64(4.0), b.im);
        d = d.scale(a).add(b).recip();
        c = b.add(c.recip().scale(a));
        let delta = c.mul(d);
        h = h.mul(delta);
        if delta.distance_from_one() < tol {
            break;
        }
    }

    // (C + iS) = limit (1 + i) - (1 + i)/2 e^(iz) h (x - ix)
    let (sin, cos) = phase;
    let tail = Complex::new(cos, sin)
        .mul(h)
        .mul(Complex::new(x, -x))
        .mul(Complex::new(DoubleDouble::HALF, DoubleDouble::HALF));
    (limit - tail.re, limit - tail.im)
}

// ============================================================================
// Lambert W
// ============================================================================

/// `v = W(x) + 1` near the branch point from its series in
/// `p = sqrt(2 (e x + 1))`.
fn branch_series(p: DoubleDouble) -> DoubleDouble {
    const COEFFS: [f64; 5] = [
        -1.0 / 3.0,
        11.0 / 72.0,
        -43.0 / 540.0,
        769.0 / 17280.0,
        -221.0 / 8505.0,
    ];
    let mut acc = DoubleDouble::ZERO;
    for &c in COEFFS.iter().rev() {
        acc = (acc + DoubleDouble::from_f64(c)) * p;
    }
    p + acc * p
}

/// `W(x) + 1` for `x` between `-1/e` and `-1/4`, given `ed = e (x + 1/e)`
/// and `p = sqrt(2 ed)`.
///
/// Solves `h(v) = ed` with `h(v) = v e^v - (e^v - 1) = sum (k-1) v^k / k!`,
/// whose terms are all positive, so the residual keeps full accuracy as
/// `v` approaches zero.
pub fn lambert_w_near_branch(ed: DoubleDouble, p: DoubleDouble, precision: u32) -> DoubleDouble {
    let tol = tolerance(precision);
    let stop = f64::pow2(-(precision as i32 / 2) - 2);
    let mut v = branch_series(p);
    for _ in 0..MAX_ITERATIONS {
        let mut term = v;
        let mut exp_v = DoubleDouble::ONE + v;
        let mut h = DoubleDouble::ZERO;
        let vv = v * v;
        for k in 2..MAX_TERMS {
            term = term * v / DoubleDouble::from_f64(k as f64);
            exp_v = exp_v + term;
            h = h + term.mul_f64((k - 1) as f64);
            if term.hi < tol * vv.hi {
                break;
            }
        }
        let step = (h - ed) / (v * exp_v);
        v = v - step;
        if step.hi.abs() <= stop * v.hi {
            break;
        }
    }
    v
}

/// `W(x)` for `x` in `[-1/4, 3)` by Halley's method on `w e^w - x`, from
/// the `[2/2]` Padé approximant of `W` at zero.
pub fn lambert_w_halley(x: DoubleDouble, precision: u32) -> DoubleDouble {
    let stop = f64::pow2(-(precision as i32 / 2) - 2);
    let four_thirds = DoubleDouble::from_f64(4.0) / DoubleDouble::THREE;
    let seven_thirds = DoubleDouble::from_f64(7.0) / DoubleDouble::THREE;
    let five_sixths = DoubleDouble::from_f64(5.0) / DoubleDouble::from_f64(6.0);
    let mut w = x * (DoubleDouble::ONE + four_thirds * x)
        / (DoubleDouble::ONE + seven_thirds * x + five_sixths * x * x);
    for _ in 0..MAX_ITERATIONS {
        let ew = DoubleDouble::exp_in_range(w);
        let f = w * ew - x;
        let fp = ew * (w + DoubleDouble::ONE);
        let correction = (w + DoubleDouble::TWO) * f / (w.mul_f64(2.0) + DoubleDouble::TWO);
        let step = f / (fp - correction);
        w = w - step;
        if step.hi.abs() <= stop * w.hi.abs() {
            break;
        }
    }
    w
}

/// `W(x)` for `x >= 3` by Newton's method on `w + ln w = L`, with
/// `L = ln x` supplied by the caller along with the logarithm to iterate.
pub fn lambert_w_newton(
    log_x: DoubleDouble,
    precision: u32,
    log: impl Fn(DoubleDouble) -> DoubleDouble,
) -> DoubleDouble {
    let stop = f64::pow2(-(precision as i32 / 2) - 2);
    let mut w = log_x - log(log_x);
    for _ in 0..MAX_ITERATIONS {
        let step = (w + log(w) - log_x) * w / (w + DoubleDouble::ONE);
        w = w - step;
        if step.hi.abs() <= stop * w.hi {
            break;
        }
    }
    w
}
