//! Double-double kernels.
//!
//! Root kernels seed from the `f64` kernels and take one double-double
//! Newton step of their own before the dispatcher's. The error function switches from
//! polynomial fits to a convergent series and the Laplace continued fraction,
//! both with fixed term counts so every call runs in bounded time.

use super::{
    ArcsinKernel, ArctanKernel, CbrtKernel, ErfKernel, ExpKernel, LogKernel, RoundingKernel,
    SeriesKernel, SqrtKernel, TrigKernel, Widen, exp_table_index, odd_tiny_exponent,
};
use crate::algorithm::classify::Thresholds;
use crate::algorithm::polynomial::{horner, pade, rational};
use crate::dtype::{DoubleDouble, Real, fast_two_sum};

// ============================================================================
// Roots
// ============================================================================

/// Numerator of the [8/8] Padé approximant of `sqrt(1.5 + d)`
const SQRT_PADE_NUM: [DoubleDouble; 9] = [
    DoubleDouble::new(1.224744871391589, 1.084308259051623e-16),
    DoubleDouble::new(3.4701104689428357, -6.285366814375897e-17),
    DoubleDouble::new(4.0484622137666415, 7.47004571156354e-17),
    DoubleDouble::new(2.5061908942364926, -1.440808069593954e-16),
    DoubleDouble::new(0.8835929434808146, 4.433422726562843e-19),
    DoubleDouble::new(0.17671858869616291, 1.1190898700782823e-17),
    DoubleDouble::new(0.018742880619290008, -8.106468677084483e-19),
    DoubleDouble::new(0.0008925181247280956, -1.7950761843535546e-20),
    DoubleDouble::new(1.2396085065667995e-05, -6.257752243843494e-22),
];

/// Denominator, constant term first
const SQRT_PADE_DEN: [DoubleDouble; 9] = [
    DoubleDouble::new(1.0, 0.0),
    DoubleDouble::new(2.5, 2.7607054067445563e-113),
    DoubleDouble::new(2.5277777777777777, 9.868649107779169e-17),
    DoubleDouble::new(1.3240740740740742, -1.0691036533427433e-16),
    DoubleDouble::new(0.3819444444444444, 2.4671622769447922e-17),
    DoubleDouble::new(0.05941358024691358, -1.7133071367672168e-19),
    DoubleDouble::new(0.0045010288065843625, -3.2838386788038323e-19),
    DoubleDouble::new(0.0001286008230452675, -1.093125647156167e-20),
    DoubleDouble::new(5.953741807651273e-07, -1.5314629380893366e-23),
];

/// Numerator of the [8/8] Padé approximant of `cbrt(1.5 + d)`
const CBRT_PADE_NUM: [DoubleDouble; 9] = [
    DoubleDouble::new(1.1447142425533319, -5.445299443132614e-18),
    DoubleDouble::new(3.179761784870366, 2.0691877313855183e-16),
    DoubleDouble::new(3.6272838138521215, 4.853634149543268e-17),
    DoubleDouble::new(2.1878854750219148, -1.82195163788499e-16),
    DoubleDouble::new(0.7479950341955264, -2.0536967890506588e-17),
    DoubleDouble::new(0.14405830288210136, 8.791737207524603e-18),
    DoubleDouble::new(0.014551343725464785, 2.9453755074570466e-20),
    DoubleDouble::new(0.0006467263877984349, 6.127732103249818e-21),
    DoubleDouble::new(7.984276392573271e-06, -6.354383741980568e-22),
];

/// Denominator, constant term first
const CBRT_PADE_DEN: [DoubleDouble; 9] = [
    DoubleDouble::new(1.0, 0.0),
    DoubleDouble::new(2.5555555555555554, 1.9737298215558337e-16),
    DoubleDouble::new(2.6502057613168724, 7.310110450206792e-17),
    DoubleDouble::new(1.4302697759487883, -5.218606626953182e-17),
    DoubleDouble::new(0.42785847998468024, 1.902394632861716e-17),
    DoubleDouble::new(0.06972508562713307, 5.464562509698593e-18),
    DoubleDouble::new(0.0056343503537077235, 9.989285147516165e-20),
    DoubleDouble::new(0.0001788682651970706, -8.44525021392686e-21),
    DoubleDouble::new(1.1041250938090776e-06, 8.64266844957537e-23),
];

// ============================================================================
// Exponential and logarithm
// ============================================================================

/// First 32 bits of `ln2/64`
const LN2_BY_64_C1: f64 = 0.010_830_424_693_267_56;
/// Next 32 bits of `ln2/64`
const LN2_BY_64_C2: f64 = 2.981_585_826_317_297_3e-12;
/// Remainder of `ln2/64`
const LN2_BY_64_C3: DoubleDouble =
    DoubleDouble::new(6.679_961_858_980_702e-22, -1.546_263_122_405_426_6e-38);

/// `(e^r - 1) / r` truncated after `r^10`
const EXPM1_TAYLOR: [DoubleDouble; 11] = [
    DoubleDouble::new(1.0, 0.0),
    DoubleDouble::new(0.5, 0.0),
    DoubleDouble::new(0.16666666666666666, 9.25185853854297e-18),
    DoubleDouble::new(0.041666666666666664, 2.3129646346357427e-18),
    DoubleDouble::new(0.008333333333333333, 1.1564823173178714e-19),
    DoubleDouble::new(0.001388888888888889, -5.300543954373577e-20),
    DoubleDouble::new(0.0001984126984126984, 1.7209558293420705e-22),
    DoubleDouble::new(2.48015873015873e-05, 2.1511947866775882e-23),
    DoubleDouble::new(2.7557319223985893e-06, -1.858393274046472e-22),
    DoubleDouble::new(2.755731922398589e-07, 2.3767714622250297e-23),
    DoubleDouble::new(2.505210838544172e-08, -1.448814070935912e-24),
];

/// `1/(2n+1)` for `n = 1..=23`
const ODD_RECIPROCALS: [DoubleDouble; 23] = [
    DoubleDouble::new(0.3333333333333333, 1.850371707708594e-17),
    DoubleDouble::new(0.2, -1.1102230246251566e-17),
    DoubleDouble::new(0.14285714285714285, 7.93016446160826e-18),
    DoubleDouble::new(0.1111111111111111, 6.1679056923619804e-18),
    DoubleDouble::new(0.09090909090909091, -2.523234146875356e-18),
    DoubleDouble::new(0.07692307692307693, -4.270088556250602e-18),
    DoubleDouble::new(0.06666666666666667, 9.251858538542971e-19),
    DoubleDouble::new(0.058823529411764705, 8.163404592832033e-19),
    DoubleDouble::new(0.05263157894736842, 2.921639538487254e-18),
    DoubleDouble::new(0.047619047619047616, 2.64338815386942e-18),
    DoubleDouble::new(0.043478260869565216, 1.206764157201257e-18),
    DoubleDouble::new(0.04, -8.326672684688674e-19),
    DoubleDouble::new(0.037037037037037035, 2.05596856412066e-18),
    DoubleDouble::new(0.034482758620689655, 4.785444071660157e-19),
    DoubleDouble::new(0.03225806451612903, 8.953411488912552e-19),
    DoubleDouble::new(0.030303030303030304, -8.410780489584519e-19),
    DoubleDouble::new(0.02857142857142857, 8.921435019309293e-19),
    DoubleDouble::new(0.02702702702702703, -1.50030138462859e-18),
    DoubleDouble::new(0.02564102564102564, 8.896017825522087e-19),
    DoubleDouble::new(0.024390243902439025, -8.46206573647223e-19),
    DoubleDouble::new(0.023255813953488372, 3.2273925134452225e-19),
    DoubleDouble::new(0.022222222222222223, -8.480870326997723e-19),
    DoubleDouble::new(0.02127659574468085, 5.167261417803255e-19),
];

// ============================================================================
// Inverse trigonometric
// ============================================================================

/// Maclaurin terms used by the arctangent kernel (`|t|^47 / 47 < 2^-106 |t|`)
const ARCTAN_TERMS: usize = 22;

/// Maclaurin coefficients of `(asin(x) - x) / x^3` in `x^2`
const ARCSIN_SERIES: [DoubleDouble; 18] = [
    DoubleDouble::new(0.16666666666666666, 9.25185853854297e-18),
    DoubleDouble::new(0.075, 2.7755575615628915e-18),
    DoubleDouble::new(0.044642857142857144, -9.912705577010326e-19),
    DoubleDouble::new(0.030381944444444444, 3.854941057726238e-19),
    DoubleDouble::new(0.022372159090909092, -9.462128050782583e-19),
    DoubleDouble::new(0.017352764423076924, -8.006416042969879e-19),
    DoubleDouble::new(0.01396484375, -6.938893903907229e-19),
    DoubleDouble::new(0.011551800896139705, 8.163404592832033e-19),
    DoubleDouble::new(0.009761609529194078, 5.478074134663601e-19),
    DoubleDouble::new(0.008390335809616815, 4.130293990420969e-19),
    DoubleDouble::new(0.0073125258735988454, -3.394024192128536e-19),
    DoubleDouble::new(0.006447210311889649, -3.1225022567582527e-19),
    DoubleDouble::new(0.005740037670841924, -1.2849803525754126e-19),
    DoubleDouble::new(0.005153309682319905, -3.888173308223878e-19),
    DoubleDouble::new(0.004660143486915096, -2.7979410902851727e-20),
    DoubleDouble::new(0.004240907093679363, -1.5770213417970974e-19),
    DoubleDouble::new(0.003880964558837669, 1.858632295689436e-19),
    DoubleDouble::new(0.0035692053938259347, -1.992587776459846e-19),
];

/// Numerator of the rational fit of `(asin(x) - x) / x^3` in `t = x^2` on `[0, 1/4]`
const ARCSIN_NUM: [DoubleDouble; 10] = [
    DoubleDouble::new(0.16666666666666666, 9.251858538542952e-18),
    DoubleDouble::new(-0.6795348771234392, 2.91742340230168e-17),
    DoubleDouble::new(1.1355619701185384, -9.324688473955127e-17),
    DoubleDouble::new(-0.9997913686103147, 3.1962058091815104e-17),
    DoubleDouble::new(0.49542222658058915, -3.521828772182963e-18),
    DoubleDouble::new(-0.13619497632729466, -2.0138037867468295e-19),
    DoubleDouble::new(0.018893779497378076, 5.211485284367284e-19),
    DoubleDouble::new(-0.001012775191758577, -3.3681580306056296e-20),
    DoubleDouble::new(4.160914369995358e-06, -3.8541067809826126e-22),
    DoubleDouble::new(6.469673736276123e-08, 2.404636208120056e-24),
];

/// Denominator, constant term first
const ARCSIN_DEN: [DoubleDouble; 9] = [
    DoubleDouble::new(1.0, 0.0),
    DoubleDouble::new(-4.527209262740635, -3.134527266972213e-16),
    DoubleDouble::new(8.582758846087373, 1.8426491775383896e-16),
    DoubleDouble::new(-8.830636020833774, 1.240855811236007e-16),
    DoubleDouble::new(5.338405873822208, -8.049170662932001e-17),
    DoubleDouble::new(-1.915084893038439, -4.541405399121409e-17),
    DoubleDouble::new(0.39045152646266607, -2.3671914069593276e-17),
    DoubleDouble::new(-0.040182950418624214, 2.2817034321582493e-18),
    DoubleDouble::new(0.0015253118366932057, 1.1416531428640387e-20),
];

// ============================================================================
// Sine and cosine of pi r
// ============================================================================

/// Levels of the nested Maclaurin series (`(pi/4)^33 / 33! < 2^-110`)
const TRIG_LEVELS: u32 = 16;

// ============================================================================
// Error function
// ============================================================================

/// Maclaurin coefficients of `erf(x) / x` in `x^2`
const ERF_SERIES: [DoubleDouble; 23] = [
    DoubleDouble::new(1.1283791670955126, 1.533545961316588e-17),
    DoubleDouble::new(-0.37612638903183754, 1.3391897206030649e-17),
    DoubleDouble::new(0.11283791670955126, -4.017569161809194e-18),
    DoubleDouble::new(-0.026866170645131252, 4.6092880729453e-19),
    DoubleDouble::new(0.005223977625442188, -8.962504586282528e-20),
    DoubleDouble::new(-0.0008548327023450853, 5.0148896786169737e-20),
    DoubleDouble::new(0.00012055332981789664, 6.480246840070509e-21),
    DoubleDouble::new(-1.492565035840625e-05, -6.248427055364001e-22),
    DoubleDouble::new(1.6462114365889248e-06, -1.0547266132407653e-22),
    DoubleDouble::new(-1.6365844691234924e-07, 1.5075323135139275e-24),
    DoubleDouble::new(1.4807192815879218e-08, -3.254656350443331e-25),
    DoubleDouble::new(-1.2290555301717928e-09, 9.976105519856072e-26),
    DoubleDouble::new(9.422759064650411e-11, -2.8231273253303265e-27),
    DoubleDouble::new(-6.7113668551641105e-12, 1.0441838553137576e-28),
    DoubleDouble::new(4.4632242632864775e-13, -1.415652238799887e-29),
    DoubleDouble::new(-2.7835162072109215e-14, 1.4189660114017355e-30),
    DoubleDouble::new(1.6342614095367152e-15, -1.159587670993415e-32),
    DoubleDouble::new(-9.063970842808673e-17, 3.004743561097066e-33),
    DoubleDouble::new(4.763348040515068e-18, -1.856680962530252e-34),
    DoubleDouble::new(-2.3784598852774293e-19, -1.5875374697145176e-35),
    DoubleDouble::new(1.131218725924631e-20, 7.245880865990418e-38),
    DoubleDouble::new(-5.136209054585811e-22, -1.4537189752115876e-38),
    DoubleDouble::new(2.2308786802746453e-23, -4.7283897669065125e-40),
];

/// `1/sqrt(pi)`
const FRAC_1_SQRT_PI: DoubleDouble =
    DoubleDouble::new(0.564_189_583_547_756_3, 7.667_729_806_582_94e-18);

/// Terms of `sum (2x^2)^n / (2n+1)!!` on `[1/2, 4)`
const ERF_SERIES_TERMS: u32 = 90;

/// Levels of the erfc continued fraction on `[4, 16)`
const ERFC_FRACTION_LEVELS: u32 = 60;

impl RoundingKernel for DoubleDouble {
    fn round_toward_zero(self) -> Self {
        let hi = self.hi.round_toward_zero();
        if hi != self.hi || !Real::is_finite(self) {
            return Self::from_f64(hi);
        }
        // hi is integral, so the low word decides
        let lo = if self.hi > 0.0 {
            self.lo.round_down()
        } else {
            self.lo.round_up()
        };
        let (hi, lo) = fast_two_sum(self.hi, lo);
        if hi == 0.0 {
            return Self::from_f64(if self.hi < 0.0 { -0.0 } else { 0.0 });
        }
        Self::new(hi, lo)
    }
}

impl SqrtKernel for DoubleDouble {
    fn sqrt_near_one(u: Self) -> Self {
        let y = f64::sqrt_near_one(u.hi);
        Self::from_f64(f64::sqrt_newton(y, 1.0 + u.hi))
    }

    #[inline]
    fn sqrt_pade(m: Self) -> Self {
        pade(&SQRT_PADE_NUM, &SQRT_PADE_DEN, m, Self::from_f64(1.5))
    }

    /// The `f64` table nodes carry only 53 bits, so the full `f64` root of
    /// `m.hi` seeds one double-double step instead.
    fn sqrt_reduced(m: Self, index: usize) -> Self {
        let y = f64::sqrt_reduced(m.hi, index);
        let y = Self::from_f64(f64::sqrt_newton(y, m.hi));
        Self::sqrt_newton(y, m)
    }
}

impl CbrtKernel for DoubleDouble {
    fn cbrt_near_one(u: Self) -> Self {
        let y = f64::cbrt_near_one(u.hi);
        Self::from_f64(f64::cbrt_newton(y, 1.0 + u.hi))
    }

    #[inline]
    fn cbrt_pade(m: Self) -> Self {
        pade(&CBRT_PADE_NUM, &CBRT_PADE_DEN, m, Self::from_f64(1.5))
    }

    fn cbrt_reduced(m: Self, index: usize) -> Self {
        let y = f64::cbrt_reduced(m.hi, index);
        let y = Self::from_f64(f64::cbrt_newton(y, m.hi));
        Self::cbrt_newton(y, m)
    }
}

impl ExpKernel for DoubleDouble {
    fn exp_reduce(x: Self) -> (i32, Self) {
        let k = exp_table_index(x.hi);
        let kf = k as f64;
        let r = (x - Self::from_f64(kf * LN2_BY_64_C1)) - Self::from_f64(kf * LN2_BY_64_C2);
        (k, r - LN2_BY_64_C3.mul_f64(kf))
    }

    #[inline]
    fn expm1_kernel(r: Self) -> Self {
        r * horner(&EXPM1_TAYLOR, r)
    }
}

impl LogKernel for DoubleDouble {
    #[inline]
    fn atanh_kernel(a: Self) -> Self {
        let s = a * a;
        a + a * (s * horner(&ODD_RECIPROCALS, s))
    }

    #[inline]
    fn ln2_multiple(e: i32) -> (Self, Self) {
        (Self::LN_2.mul_f64(e as f64), Self::ZERO)
    }
}

impl ArctanKernel for DoubleDouble {
    fn arctan_kernel(t: Self) -> Self {
        let s = t * t;
        let mut acc = Self::ZERO;
        for (n, &c) in ODD_RECIPROCALS[..ARCTAN_TERMS].iter().enumerate().rev() {
            // n = 0 is the -t^3/3 term
            acc = acc * s + if n % 2 == 0 { -c } else { c };
        }
        t + t * (s * acc)
    }
}

impl ArcsinKernel for DoubleDouble {
    #[inline]
    fn arcsin_series(t: Self) -> Self {
        horner(&ARCSIN_SERIES, t)
    }

    #[inline]
    fn arcsin_rational(t: Self) -> Self {
        rational(&ARCSIN_NUM, &ARCSIN_DEN, t)
    }
}

/// `sin z = z (1 - z^2/(2 3) (1 - z^2/(4 5) (1 - ...)))` and the matching
/// nesting for `cos z`, with `z = pi r`. Every level stays near one, so the
/// rounding of `pi r` is the only error the argument contributes.
impl TrigKernel for DoubleDouble {
    const PI_BY_180: Self =
        DoubleDouble::new(0.017_453_292_519_943_295, 2.948_652_270_870_168_7e-19);

    fn sin_pi_kernel(r: Self) -> Self {
        let z = Self::PI * r;
        let z2 = z * z;
        let mut acc = Self::ONE;
        for k in (1..=TRIG_LEVELS).rev() {
            let d = (2 * k * (2 * k + 1)) as f64;
            acc = Self::ONE - z2 * acc / Self::from_f64(d);
        }
        z * acc
    }

    fn cos_pi_kernel(r: Self) -> Self {
        let z = Self::PI * r;
        let z2 = z * z;
        let mut acc = Self::ONE;
        for k in (1..=TRIG_LEVELS).rev() {
            let d = ((2 * k - 1) * (2 * k)) as f64;
            acc = Self::ONE - z2 * acc / Self::from_f64(d);
        }
        acc
    }
}

impl SeriesKernel for DoubleDouble {
    #[inline]
    fn to_series(self) -> DoubleDouble {
        self
    }

    #[inline]
    fn from_series(value: DoubleDouble) -> Self {
        value
    }
}

impl Widen for DoubleDouble {
    type Wide = DoubleDouble;

    #[inline]
    fn widen(self) -> Self {
        self
    }

    #[inline]
    fn narrow(wide: Self) -> Self {
        wide
    }
}

impl ErfKernel for DoubleDouble {
    const ERF_THRESHOLDS: Thresholds = Thresholds::new(odd_tiny_exponent(106), -1, 2, 4);

    #[inline]
    fn erf_small(x: Self) -> Self {
        x * horner(&ERF_SERIES, x * x)
    }

    /// `erf(x) = 2x/sqrt(pi) e^(-x^2) sum (2x^2)^n / (2n+1)!!`, nested from
    /// the last term so every partial sum is positive.
    fn erf_mid(x: Self) -> Self {
        let z = Self::TWO * x * x;
        let mut acc = Self::ONE;
        for n in (1..=ERF_SERIES_TERMS).rev() {
            acc = Self::ONE + acc * z / Self::from_f64((2 * n + 1) as f64);
        }
        Self::TWO_BY_SQRT_PI * x * exp_neg_square(x) * acc
    }

    /// `erf(x) = 1 - erfc(x)` with the Laplace continued fraction
    /// `erfc(x) = e^(-x^2)/sqrt(pi) / (x + 1/2 / (x + 1 / (x + 3/2 / ...)))`.
    fn erf_large(x: Self) -> Self {
        let mut f = Self::ZERO;
        for n in (1..=ERFC_FRACTION_LEVELS).rev() {
            f = Self::from_f64(n as f64 * 0.5) / (x + f);
        }
        Self::ONE - exp_neg_square(x) * FRAC_1_SQRT_PI / (x + f)
    }

    #[inline]
    fn erf_huge(_x: Self) -> Self {
        Self::ONE
    }
}

/// `e^(-x^2)` with the square split so the exponent keeps every bit:
/// `x^2 = hi^2 + (2 hi lo + lo^2)`, where `hi^2` is an exact product.
fn exp_neg_square(x: DoubleDouble) -> DoubleDouble {
    let lead = -DoubleDouble::from_product(x.hi, x.hi);
    let rest = DoubleDouble::from_product(2.0 * x.hi, x.lo).add_f64(x.lo * x.lo);
    DoubleDouble::exp_in_range(lead) * DoubleDouble::exp_in_range(-rest)
}
