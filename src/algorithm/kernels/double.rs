//! `f64` kernels.
//!
//! The arctangent and error-function fits were made for this interval set;
//! the arcsine rational is a 4/4 minimax in `t = x^2` with relative error
//! below `1e-15` on `[0, 1/4]`.

use super::{
    ArcsinKernel, ArctanKernel, CbrtKernel, ErfKernel, ExpKernel, LogKernel, RoundingKernel,
    SeriesKernel, SqrtKernel, TrigKernel, Widen, exp_table_index, odd_tiny_exponent,
};
use crate::algorithm::classify::Thresholds;
use crate::algorithm::polynomial::{horner, pade, rational};
use crate::dtype::{DoubleDouble, Real};

// ============================================================================
// Roots
// ============================================================================

/// Binomial series of `sqrt(1 + u) - 1`, divided by `u`
const SQRT_TAYLOR: [f64; 4] = [
    0.5,
    -0.125,
    0.0625,
    -0.0390625,
];

/// Binomial series of `cbrt(1 + u) - 1`, divided by `u`
const CBRT_TAYLOR: [f64; 4] = [
    0.3333333333333333,
    -0.1111111111111111,
    0.06172839506172839,
    -0.0411522633744856,
];

/// Numerator of the [4/4] Padé approximant of `sqrt(1.5 + d)`
const SQRT_PADE_NUM: [f64; 5] = [
    1.224744871391589,
    1.8371173070873836,
    0.9185586535436918,
    0.17010345435994292,
    0.008505172717997146,
];

/// Denominator, constant term first
const SQRT_PADE_DEN: [f64; 5] = [
    1.0,
    1.1666666666666667,
    0.4166666666666667,
    0.046296296296296294,
    0.0007716049382716049,
];

/// Numerator of the [4/4] Padé approximant of `cbrt(1.5 + d)`
const CBRT_PADE_NUM: [f64; 5] = [
    1.1447142425533319,
    1.6534761281325905,
    0.787369584825043,
    0.13608857021667412,
    0.0060483808985188495,
];

/// Denominator, constant term first
const CBRT_PADE_DEN: [f64; 5] = [
    1.0,
    1.2222222222222223,
    0.4656084656084656,
    0.05748252661832909,
    0.001277389480407313,
];

// ============================================================================
// Exponential and logarithm
// ============================================================================

/// `ln2/64` truncated to 32 bits, so `k * LN2_BY_64_HI` is exact for `|k| < 2^21`
const LN2_BY_64_HI: f64 = 0.010_830_424_693_267_56;
/// `ln2/64 - LN2_BY_64_HI`
const LN2_BY_64_LO: f64 = 2.981_585_826_985_293_3e-12;

/// `(e^r - 1) / r` truncated after `r^4`
const EXPM1_TAYLOR: [f64; 5] = [
    1.0,
    0.5,
    0.16666666666666666,
    0.041666666666666664,
    0.008333333333333333,
];

/// `ln 2` truncated to 32 bits
const LN2_HI: f64 = 6.931_471_803_691_238_164_90e-1;
/// `ln 2 - LN2_HI`
const LN2_LO: f64 = 1.908_214_929_270_587_700_02e-10;

/// `1/3, 1/5, ...` for `atanh(a) = a + a^3/3 + ...`
const ATANH_SERIES: [f64; 11] = [
    0.3333333333333333,
    0.2,
    0.14285714285714285,
    0.1111111111111111,
    0.09090909090909091,
    0.07692307692307693,
    0.06666666666666667,
    0.058823529411764705,
    0.05263157894736842,
    0.047619047619047616,
    0.043478260869565216,
];

// ============================================================================
// Inverse trigonometric
// ============================================================================

/// Minimax fit of `(atan(t) - t) / t^3` in `s = t^2` on `|t| <= 0.1765`
const ARCTAN_MINIMAX: [f64; 8] = [
    -0.3333333333333333,
    0.19999999999999477,
    -0.14285714285360843,
    0.11111111020147803,
    -0.09090897577707475,
    0.07691514481835231,
    -0.06636252538883253,
    0.0526821782345444,
];

/// Maclaurin coefficients of `(asin(x) - x) / x^3` in `x^2`
const ARCSIN_SERIES: [f64; 8] = [
    0.16666666666666666,
    0.075,
    0.044642857142857144,
    0.030381944444444444,
    0.022372159090909092,
    0.017352764423076924,
    0.01396484375,
    0.011551800896139705,
];

/// Numerator of the rational fit of `(asin(x) - x) / x^3` in `t = x^2` on `[0, 1/4]`
const ARCSIN_NUM: [f64; 5] = [
    0.16666666666666674,
    -0.29647442738212243,
    0.16001969221867812,
    -0.02551048157087225,
    0.00026066097969323855,
];

/// Denominator, constant term first
const ARCSIN_DEN: [f64; 5] = [
    1.0,
    -2.228846564292449,
    1.6952419643599423,
    -0.5012009665232863,
    0.04508891531507731,
];

// ============================================================================
// Error function
// ============================================================================

/// Maclaurin coefficients of `erf(x)/x - 1` in `x^2`
const ERF_SERIES: [f64; 8] = [
    0.1283791670955126,
    -0.37612638903183754,
    0.11283791670955126,
    -0.026866170645131252,
    0.005223977625442188,
    -0.0008548327023450853,
    0.00012055332981789664,
    -1.492565035840625e-05,
];

/// Minimax fit of `erf(x)/x - 1` in `t = x^2` on `[1/64, 1]`
const ERF_MID: [f64; 12] = [
    0.1283791670955125,
    -0.3761263890318316,
    0.11283791670936172,
    -0.026866170642243958,
    0.0052239776007646874,
    -0.0008548325724279666,
    0.00012055288480969806,
    -1.4924628651655175e-05,
    1.6446231178183598e-06,
    -1.6200200988394193e-07,
    1.3687239293640287e-08,
    -7.739257941146132e-10,
];

/// Minimax fit of `erf(1.5 + z)` on `|z| <= 1/2`
const ERF_LARGE: [f64; 18] = [
    0.9661051464753108,
    0.11893028922362937,
    -0.17839543383544215,
    0.1387520040942334,
    -0.04459885845906473,
    -0.014866286152863747,
    0.019326172007209028,
    -0.004743053204878897,
    -0.002362677793021706,
    0.0017098196278538453,
    -9.291229551299306e-05,
    -0.00025444927807681647,
    7.767647032419676e-05,
    1.7961323135211212e-05,
    -1.4038638152371658e-05,
    5.712902189436902e-07,
    1.4171216409416466e-06,
    -2.8346118565278276e-07,
];

/// Minimax fit of `x e^(x^2) erfc(x)` in `u = 1/x^2` on `[1/36, 1/4]`
const ERFC_ASYMPTOTIC: [f64; 17] = [
    0.5641895833353835,
    -0.28209474652599353,
    0.42313779058975726,
    -1.0575955912890793,
    3.691970345396263,
    -16.348741768643066,
    84.50601983040997,
    -465.624118612933,
    2498.8819047944953,
    -12116.082467897495,
    50137.438732793664,
    -169345.73550317556,
    448147.2103021034,
    -886620.7876467715,
    1226689.9982960194,
    -1054974.3755910697,
    423476.6218643736,
];

/// `erf(x)` rounds to one in double precision from here on
const ERF_SATURATION: f64 = 6.0;

// ============================================================================
// Sine and cosine of pi r
// ============================================================================

/// `pi - PI_HI`
const PI_LO: f64 = 1.224_646_799_147_353_2e-16;

/// `(sin(pi r) / r - pi) / r^2` in `s = r^2`
const SIN_PI_SERIES: [f64; 8] = [
    -5.16771278004997,
    2.5501640398773455,
    -0.5992645293207921,
    0.08214588661112823,
    -0.0073704309457143504,
    0.00046630280576761255,
    -2.1915353447830217e-05,
    7.952054001475513e-07,
];

/// `(cos(pi r) - 1) / r^2` in `s = r^2`
const COS_PI_SERIES: [f64; 9] = [
    -4.934802200544679,
    4.0587121264167685,
    -1.3352627688545895,
    0.2353306303588932,
    -0.02580689139001406,
    0.0019295743094039231,
    -0.0001046381049248457,
    4.303069587032947e-06,
    -1.3878952462213771e-07,
];

impl RoundingKernel for f64 {
    fn round_toward_zero(self) -> f64 {
        const TWO_POW_52: f64 = 4_503_599_627_370_496.0;
        let a = Real::abs(self);
        // NaN, infinities and values past 2^p are already integral
        if a >= TWO_POW_52 || a.is_nan() {
            return self;
        }
        let mut r = (a + TWO_POW_52) - TWO_POW_52;
        if r > a {
            r -= 1.0;
        }
        r.with_sign_of(self)
    }
}

impl SqrtKernel for f64 {
    #[inline]
    fn sqrt_near_one(u: f64) -> f64 {
        1.0 + u * horner(&SQRT_TAYLOR, u)
    }

    #[inline]
    fn sqrt_pade(m: f64) -> f64 {
        pade(&SQRT_PADE_NUM, &SQRT_PADE_DEN, m, 1.5)
    }
}

impl CbrtKernel for f64 {
    #[inline]
    fn cbrt_near_one(u: f64) -> f64 {
        1.0 + u * horner(&CBRT_TAYLOR, u)
    }

    #[inline]
    fn cbrt_pade(m: f64) -> f64 {
        pade(&CBRT_PADE_NUM, &CBRT_PADE_DEN, m, 1.5)
    }
}

impl ExpKernel for f64 {
    #[inline]
    fn exp_reduce(x: f64) -> (i32, f64) {
        let k = exp_table_index(x);
        let kf = k as f64;
        (k, (x - kf * LN2_BY_64_HI) - kf * LN2_BY_64_LO)
    }

    #[inline]
    fn expm1_kernel(r: f64) -> f64 {
        r * horner(&EXPM1_TAYLOR, r)
    }
}

impl LogKernel for f64 {
    #[inline]
    fn atanh_kernel(a: f64) -> f64 {
        let s = a * a;
        a + a * (s * horner(&ATANH_SERIES, s))
    }

    #[inline]
    fn ln2_multiple(e: i32) -> (f64, f64) {
        let e = e as f64;
        (e * LN2_HI, e * LN2_LO)
    }
}

impl ArctanKernel for f64 {
    #[inline]
    fn arctan_kernel(t: f64) -> f64 {
        let s = t * t;
        t + t * (s * horner(&ARCTAN_MINIMAX, s))
    }
}

impl ArcsinKernel for f64 {
    #[inline]
    fn arcsin_series(t: f64) -> f64 {
        horner(&ARCSIN_SERIES, t)
    }

    #[inline]
    fn arcsin_rational(t: f64) -> f64 {
        rational(&ARCSIN_NUM, &ARCSIN_DEN, t)
    }
}

impl TrigKernel for f64 {
    const PI_BY_180: f64 = 0.017_453_292_519_943_295;

    #[inline]
    fn sin_pi_kernel(r: f64) -> f64 {
        let s = r * r;
        r * std::f64::consts::PI + r * (PI_LO + s * horner(&SIN_PI_SERIES, s))
    }

    #[inline]
    fn cos_pi_kernel(r: f64) -> f64 {
        let s = r * r;
        1.0 + s * horner(&COS_PI_SERIES, s)
    }
}

impl SeriesKernel for f64 {
    #[inline]
    fn to_series(self) -> DoubleDouble {
        DoubleDouble::from_f64(self)
    }

    #[inline]
    fn from_series(value: DoubleDouble) -> f64 {
        value.to_f64()
    }
}

impl Widen for f64 {
    type Wide = f64;

    #[inline]
    fn widen(self) -> f64 {
        self
    }

    #[inline]
    fn narrow(wide: f64) -> f64 {
        wide
    }
}

impl ErfKernel for f64 {
    const ERF_THRESHOLDS: Thresholds = Thresholds::new(odd_tiny_exponent(53), -3, 0, 1);

    #[inline]
    fn erf_small(x: f64) -> f64 {
        x + x * horner(&ERF_SERIES, x * x)
    }

    #[inline]
    fn erf_mid(x: f64) -> f64 {
        x + x * horner(&ERF_MID, x * x)
    }

    #[inline]
    fn erf_large(x: f64) -> f64 {
        horner(&ERF_LARGE, x - 1.5)
    }

    fn erf_huge(x: f64) -> f64 {
        if x >= ERF_SATURATION {
            return 1.0;
        }
        let x2 = x * x;
        let erfc = f64::exp_in_range(-x2) / x * horner(&ERFC_ASYMPTOTIC, 1.0 / x2);
        1.0 - erfc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn test_rounding_kernel() {
        assert_eq!(4_503_599_627_370_495.5f64.round_toward_zero(), 4_503_599_627_370_495.0);
        assert_eq!((-7.999_999_999_999_999f64).round_toward_zero(), -7.0);
        assert_eq!((-0.5f64).round_down(), -1.0);
        assert_eq!((-0.5f64).round_up().to_bits(), (-0.0f64).to_bits());
        assert!(f64::NAN.round_toward_zero().is_nan());
        assert_eq!(f64::NEG_INFINITY.round_up(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_root_seeds() {
        let u = 0.007;
        // four binomial terms leave about 40 bits for Newton to double
        assert!(rel(f64::sqrt_near_one(u), (1.0f64 + u).sqrt()) < 1e-12);
        assert!(rel(f64::cbrt_near_one(u), (1.0f64 + u).cbrt()) < 1e-12);
        assert!(rel(f64::sqrt_pade(1.999), 1.999f64.sqrt()) < 1e-8);
        let y = f64::sqrt_newton(f64::sqrt_pade(1.999), 1.999);
        assert!(rel(y, 1.999f64.sqrt()) < 3e-16);
    }

    #[test]
    fn test_exp_and_log_kernels() {
        assert!(rel(f64::exp_in_range(-2.0), 0.135_335_283_236_612_7) < 3e-16);
        assert!(rel(f64::log_reduced(1.25, 0), 0.223_143_551_314_209_76) < 3e-16);
        assert!(rel(f64::log_reduced(0.75, -2), (0.1875f64).ln()) < 3e-16);
    }

    #[test]
    fn test_inverse_trig_kernels() {
        assert!(rel(f64::arctan_kernel(0.17), 0.168_390_157_147_529_92) < 3e-16);
        assert!(rel(f64::arctan_kernel(-0.1765), (-0.1765f64).atan()) < 3e-16);
        let x = 0.4;
        let t = x * x;
        let y = x + x * (t * f64::arcsin_rational(t));
        assert!(rel(y, 0.411_516_846_067_488_06) < 4e-16);
        let x = 0.1;
        let t = x * x;
        assert!(rel(x + x * (t * f64::arcsin_series(t)), 0.1f64.asin()) < 3e-16);
    }

    #[test]
    fn test_trig_kernels() {
        assert!(rel(f64::sin_pi_kernel(0.25), std::f64::consts::FRAC_1_SQRT_2) < 3e-16);
        assert!(rel(f64::cos_pi_kernel(0.25), std::f64::consts::FRAC_1_SQRT_2) < 3e-16);
        assert!(rel(f64::sin_pi_kernel(-0.1), -0.309_016_994_374_947_45) < 3e-16);
        assert!(rel(f64::cos_pi_kernel(0.1), 0.951_056_516_295_153_5) < 3e-16);
        assert_eq!(f64::cos_pi_kernel(0.0), 1.0);
        assert_eq!(f64::sin_pi_kernel(0.0), 0.0);
    }

    #[test]
    fn test_erf_pieces() {
        assert!(rel(f64::erf_small(0.1), 0.112_462_916_018_284_9) < 3e-16);
        assert!(rel(f64::erf_mid(0.75), 0.711_155_633_653_515_1) < 3e-16);
        assert!(rel(f64::erf_mid(0.5), 0.520_499_877_813_046_5) < 3e-16);
        assert!(rel(f64::erf_large(1.0), 0.842_700_792_949_714_9) < 3e-16);
        assert!(rel(f64::erf_large(1.5), 0.966_105_146_475_310_8) < 3e-16);
        assert!(rel(f64::erf_huge(3.0), 0.999_977_909_503_001_4) < 2e-16);
        assert_eq!(f64::erf_huge(6.0), 1.0);
    }
}
