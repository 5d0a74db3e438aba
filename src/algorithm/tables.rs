//! Reduction tables.
//!
//! Three families of precomputed nodes keep kernel arguments inside their
//! fitted intervals:
//!
//! - **Mantissa-indexed** (square and cube root): the top seven fraction bits
//!   of `m` in `[1, 2)` select `t_k = 1 + k/128`, and only `m / t_k - 1` in
//!   `[0, 1/128)` reaches the kernel.
//! - **Magnitude-bucketed** (arctangent): the exponent of `x` in `[2^-3, 2^4)`
//!   selects `v_k`, and `atan(x) = atan(v_k) + atan((x - v_k) / (1 + x v_k))`.
//! - **Exponential**: `2^(j/64)` indexed by the low six bits of
//!   `k = round(64 x / ln 2)`.
//!
//! All tables are `f64` (the exponential and arctangent values as
//! double-double pairs) and are rounded into the carrier at the point of use.

use crate::dtype::Real;

/// Fraction bits that select a node of the mantissa table
pub const MANTISSA_INDEX_BITS: u32 = 7;

/// Largest reduced argument of the arctangent buckets
pub const ARCTAN_REDUCED_BOUND: f64 = 0.1765;

/// Exponent of the first arctangent bucket
pub const ARCTAN_FIRST_EXPONENT: i32 = -3;

/// Exponent one past the last arctangent bucket
pub const ARCTAN_END_EXPONENT: i32 = 4;

/// Entries of the exponential table
pub const EXP2_ENTRIES: i32 = 64;

// ============================================================================
// Mantissa-indexed nodes
// ============================================================================

/// `1 / t_k` for the nodes `t_k = 1 + k/128`
pub const NODE_RECIPROCALS: [f64; 128] = [
    1.0,
    0.9922480620155039,
    0.9846153846153847,
    0.9770992366412213,
    0.9696969696969697,
    0.9624060150375939,
    0.9552238805970149,
    0.9481481481481482,
    0.9411764705882353,
    0.9343065693430657,
    0.927536231884058,
    0.920863309352518,
    0.9142857142857143,
    0.9078014184397163,
    0.9014084507042254,
    0.8951048951048951,
    0.8888888888888888,
    0.8827586206896552,
    0.8767123287671232,
    0.8707482993197279,
    0.8648648648648649,
    0.8590604026845637,
    0.8533333333333334,
    0.847682119205298,
    0.8421052631578947,
    0.8366013071895425,
    0.8311688311688312,
    0.8258064516129032,
    0.8205128205128205,
    0.8152866242038217,
    0.810126582278481,
    0.8050314465408805,
    0.8,
    0.7950310559006211,
    0.7901234567901234,
    0.7852760736196319,
    0.7804878048780488,
    0.7757575757575758,
    0.7710843373493976,
    0.7664670658682635,
    0.7619047619047619,
    0.757396449704142,
    0.7529411764705882,
    0.7485380116959064,
    0.7441860465116279,
    0.7398843930635838,
    0.735632183908046,
    0.7314285714285714,
    0.7272727272727273,
    0.7231638418079096,
    0.7191011235955056,
    0.7150837988826816,
    0.7111111111111111,
    0.7071823204419889,
    0.7032967032967034,
    0.6994535519125683,
    0.6956521739130435,
    0.6918918918918919,
    0.6881720430107527,
    0.6844919786096256,
    0.6808510638297872,
    0.6772486772486772,
    0.6736842105263158,
    0.6701570680628273,
    0.6666666666666666,
    0.6632124352331606,
    0.6597938144329897,
    0.6564102564102564,
    0.6530612244897959,
    0.649746192893401,
    0.6464646464646465,
    0.6432160804020101,
    0.64,
    0.6368159203980099,
    0.6336633663366337,
    0.6305418719211823,
    0.6274509803921569,
    0.624390243902439,
    0.6213592233009708,
    0.6183574879227053,
    0.6153846153846154,
    0.6124401913875598,
    0.6095238095238096,
    0.6066350710900474,
    0.6037735849056604,
    0.6009389671361502,
    0.5981308411214953,
    0.5953488372093023,
    0.5925925925925926,
    0.5898617511520737,
    0.5871559633027523,
    0.5844748858447488,
    0.5818181818181818,
    0.579185520361991,
    0.5765765765765766,
    0.5739910313901345,
    0.5714285714285714,
    0.5688888888888889,
    0.5663716814159292,
    0.5638766519823789,
    0.5614035087719298,
    0.5589519650655022,
    0.5565217391304348,
    0.5541125541125541,
    0.5517241379310345,
    0.5493562231759657,
    0.5470085470085471,
    0.5446808510638298,
    0.5423728813559322,
    0.540084388185654,
    0.5378151260504201,
    0.5355648535564853,
    0.5333333333333333,
    0.5311203319502075,
    0.5289256198347108,
    0.5267489711934157,
    0.5245901639344263,
    0.5224489795918368,
    0.5203252032520326,
    0.5182186234817814,
    0.5161290322580645,
    0.5140562248995983,
    0.512,
    0.5099601593625498,
    0.5079365079365079,
    0.5059288537549407,
    0.5039370078740157,
    0.5019607843137255,
];

/// `sqrt(t_k)`
pub const SQRT_NODES: [f64; 128] = [
    1.0,
    1.0038986502630631,
    1.0077822185373186,
    1.0116508785149154,
    1.015504800579495,
    1.0193441518937556,
    1.0231690964840563,
    1.0269797953221864,
    1.0307764064044151,
    1.034559084827928,
    1.0383279828647594,
    1.0420832500333166,
    1.0458250331675945,
    1.0495534764841665,
    1.0532687216470449,
    1.0569709078304852,
    1.0606601717798212,
    1.0643366478704002,
    1.0680004681646913,
    1.0716517624676405,
    1.0752906583803283,
    1.0789172813520043,
    1.0825317547305484,
    1.086134199811423,
    1.0897247358851685,
    1.0933034802834938,
    1.0968705484240153,
    1.100426053853688,
    1.103970108290981,
    1.1075028216668343,
    1.1110243021644486,
    1.114534656257938,
    1.118033988749895,
    1.1215224028078976,
    1.125,
    1.1284668803292368,
    1.1319231422671772,
    1.1353688827865593,
    1.1388041973930374,
    1.1422291801560667,
    1.14564392373896,
    1.1490485194281397,
    1.1524430571616109,
    1.155827625556683,
    1.159202311936963,
    1.1625672023586422,
    1.165922381636102,
    1.1692679333668567,
    1.1726039399558574,
    1.1759304826391737,
    1.1792476415070754,
    1.1825554955265314,
    1.1858541225631423,
    1.189143599402528,
    1.192424001771182,
    1.195695404356812,
    1.1989578808281798,
    1.202211503854459,
    1.2054563451241194,
    1.2086924753633572,
    1.2119199643540823,
    1.2151388809514738,
    1.2183492931011204,
    1.221551267855754,
    1.224744871391589,
    1.2279301690242812,
    1.231107225224513,
    1.2342761036332186,
    1.2374368670764582,
    1.2405895775799505,
    1.243734296383275,
    1.2468710839537502,
    1.25,
    1.2531211034852139,
    1.2562344526401112,
    1.2593401049756179,
    1.2624381172952597,
    1.2655285457072867,
    1.2686114456365274,
    1.2716868718359877,
    1.2747548783981961,
    1.2778155187663045,
    1.2808688457449497,
    1.2839149115108837,
    1.286953767623375,
    1.2899854650343934,
    1.2930100540985752,
    1.2960275845829825,
    1.299038105676658,
    1.3020416659999787,
    1.3050383136138188,
    1.3080280960285218,
    1.3110110602126894,
    1.31398725260179,
    1.3169567191065923,
    1.3199195051214296,
    1.3228756555322954,
    1.3258252147247767,
    1.3287682265918312,
    1.3317047345414073,
    1.334634781503914,
    1.3375584099395434,
    1.340475661845451,
    1.3433865787627923,
    1.346291201783626,
    1.3491895715576814,
    1.352081728298996,
    1.354967711792425,
    1.357847561400027,
    1.3607213160673275,
    1.3635890143294642,
    1.3664506943172154,
    1.3693063937629153,
    1.3721561500062593,
    1.375,
    1.3778379803155376,
    1.3806701271484076,
    1.383496476323666,
    1.3863170633011772,
    1.3891319231808044,
    1.3919410907075054,
    1.3947446002763373,
    1.3975424859373686,
    1.400334781400505,
    1.403121520040228,
    1.405902734900249,
    1.4086784586980805,
    1.4114487238295268,
];

/// `cbrt(t_k)`
pub const CBRT_NODES: [f64; 128] = [
    1.0,
    1.0025974142646001,
    1.0051814396472645,
    1.0077522473643226,
    1.0103100051555476,
    1.0128548773804866,
    1.0153870251114199,
    1.01790660622309,
    1.020413775479337,
    1.0229086846167688,
    1.025391482425587,
    1.0278623148276862,
    1.0303213249521392,
    1.0327686532081688,
    1.0352044373557132,
    1.0376288125736755,
    1.040041911525952,
    1.0424438644253258,
    1.044834799095308,
    1.047214841030007,
    1.049584113452102,
    1.0519427373689911,
    1.0542908316271866,
    1.0566285129650201,
    1.0589558960637233,
    1.0612730935969434,
    1.0635802162787515,
    1.0658773729101998,
    1.0681646704244792,
    1.07044221393073,
    1.0727101067565519,
    1.0749684504892614,
    1.077217345015942,
    1.0794568885623264,
    1.0816871777305563,
    1.083908307535855,
    1.086120371442153,
    1.0883234613967014,
    1.0905176678637094,
    1.092703079857036,
    1.0948797849719722,
    1.097047869416141,
    1.0992074180395448,
    1.1013585143637923,
    1.103501240610526,
    1.105635677729083,
    1.1077619054234085,
    1.109880002178251,
    1.1119900452846578,
    1.1140921108647988,
    1.1161862738961343,
    1.1182726082349523,
    1.1203511866392912,
    1.1224220807912721,
    1.1244853613188537,
    1.1265410978170323,
    1.1285893588685003,
    1.1306302120637843,
    1.1326637240208732,
    1.1346899604043565,
    1.136708985944086,
    1.1387208644533735,
    1.1407256588467416,
    1.142723431157239,
    1.1447142425533319,
    1.1466981533553877,
    1.1486752230517598,
    1.1506455103144861,
    1.1526090730146117,
    1.1545659682371496,
    1.1565162522956856,
    1.1584599807466396,
    1.1603972084031948,
    1.1623279893489,
    1.164252376950959,
    1.1661704238732107,
    1.168082182088815,
    1.1699877028926446,
    1.1718870369133996,
    1.1737802341254437,
    1.1756673438603789,
    1.177548414818355,
    1.1794234950791334,
    1.1812926321128998,
    1.1831558727908422,
    1.1850132633954935,
    1.18686484963085,
    1.1887106766322688,
    1.1905507889761495,
    1.1923852306894098,
    1.1942140452587542,
    1.1960372756397482,
    1.197854964265696,
    1.199667153056333,
    1.2014738834263332,
    1.2032751962936385,
    1.205071132087615,
    1.2068617307570373,
    1.2086470317779099,
    1.210427074161126,
    1.21220189645997,
    1.2139715367774642,
    1.21573603277357,
    1.2174954216722398,
    1.2192497402683284,
    1.2209990249343643,
    1.222743311627187,
    1.2244826358944518,
    1.2262170328810043,
    1.22794653733513,
    1.229671183614682,
    1.231391005693087,
    1.2331060371652351,
    1.2348163112532542,
    1.2365218608121753,
    1.238222718335485,
    1.2399189159605752,
    1.241610485474086,
    1.2432974583171477,
    1.2449798655905249,
    1.2466577380596615,
    1.248331106159632,
    1.25,
    1.2516644493695859,
    1.2533244837411461,
    1.2549801322759666,
    1.2566314238283698,
    1.2582783869501413,
];

// ============================================================================
// Exponential table
// ============================================================================

/// Leading words of `2^(j/64)`
pub const EXP2_HI: [f64; 64] = [
    1.0,
    1.0108892860517005,
    1.0218971486541166,
    1.0330248790212284,
    1.0442737824274138,
    1.0556451783605572,
    1.0671404006768237,
    1.0787607977571199,
    1.0905077326652577,
    1.102382583307841,
    1.1143867425958924,
    1.1265216186082418,
    1.1387886347566916,
    1.1511892299529827,
    1.1637248587775775,
    1.1763969916502812,
    1.189207115002721,
    1.202156731452703,
    1.215247359980469,
    1.22848053610687,
    1.241857812073484,
    1.255380757024691,
    1.2690509571917332,
    1.2828700160787783,
    1.2968395546510096,
    1.3109612115247644,
    1.3252366431597413,
    1.339667524053303,
    1.3542555469368927,
    1.3690024229745905,
    1.383909881963832,
    1.3989796725383112,
    1.4142135623730951,
    1.42961333839197,
    1.4451808069770467,
    1.460917794180647,
    1.4768261459394993,
    1.4929077282912648,
    1.5091644275934228,
    1.5255981507445384,
    1.5422108254079407,
    1.559004400237837,
    1.5759808451078865,
    1.593142151342267,
    1.6104903319492543,
    1.6280274218573478,
    1.645755478153965,
    1.6636765803267364,
    1.681792830507429,
    1.7001063537185235,
    1.718619298122478,
    1.7373338352737062,
    1.7562521603732995,
    1.7753764925265212,
    1.7947090750031072,
    1.8142521755003989,
    1.8340080864093424,
    1.8539791250833855,
    1.8741676341103,
    1.8945759815869656,
    1.9152065613971474,
    1.9360617934922943,
    1.9571441241754002,
    1.978456026387951,
];

/// Trailing words of `2^(j/64)`
pub const EXP2_LO: [f64; 64] = [
    0.0,
    -1.5234778603368577e-17,
    5.109225028973444e-17,
    7.600838874027088e-18,
    8.551889705537965e-17,
    1.759325738772092e-18,
    -7.899853966841582e-17,
    -6.656660436056593e-17,
    -3.046782079812471e-17,
    5.2660368715706944e-17,
    1.0410278456845571e-16,
    5.165856758795457e-17,
    8.912812676025408e-17,
    3.250710218863827e-17,
    3.8292048369240935e-17,
    5.554203254218079e-17,
    3.982015231465646e-17,
    6.644981499252301e-17,
    -7.712630692681488e-17,
    -1.89878163130253e-17,
    4.658027591836937e-17,
    -6.7113898212968784e-18,
    2.667932131342186e-18,
    1.713594918243561e-17,
    2.5382502794888315e-17,
    -7.181536135519454e-17,
    -2.8587312100388614e-17,
    8.927282594831732e-17,
    7.70094837980299e-17,
    9.593797919118849e-17,
    -6.770511658794786e-17,
    -9.614213209051323e-17,
    -9.667293313452913e-17,
    -1.2031642489053655e-17,
    -3.0237581349939873e-17,
    -5.600377186075216e-17,
    -3.483994556892796e-17,
    1.4192920154284036e-17,
    -1.016455327754295e-16,
    -1.1024941712342561e-16,
    7.949834809697621e-17,
    3.7812070533575275e-17,
    -1.0136916471278304e-17,
    -1.0094406542311964e-16,
    2.4707192569797888e-17,
    -6.712955084707084e-17,
    -1.0125679913674773e-16,
    5.8909926967131e-17,
    8.199010020581497e-17,
    -8.0237193703977e-18,
    -1.851380418263111e-17,
    3.164389299292957e-17,
    2.960140695448873e-17,
    6.429731796556572e-17,
    1.8227458427912087e-17,
    -9.969531538920349e-17,
    3.283107224245627e-17,
    9.761887490727594e-17,
    -6.122763413004143e-17,
    3.4034035352165297e-17,
    -1.0619946056195963e-16,
    1.0332385960676326e-16,
    8.960767791036668e-17,
    4.0388753109278167e-17,
];

// ============================================================================
// Arctangent buckets
// ============================================================================

/// Expansion points `v_k`, one per exponent in `-3..=3`
pub const ARCTAN_NODES: [f64; 7] = [
    0.18,
    0.35,
    0.72,
    1.35,
    2.5,
    4.0,
    8.0,
];

/// Leading words of `atan(v_k)`
pub const ARCTAN_VALUES_HI: [f64; 7] = [
    0.17809293823119754,
    0.33667481938672716,
    0.6240230529767569,
    0.9332475286562039,
    1.1902899496825317,
    1.3258176636680326,
    1.446441332248135,
];

/// Trailing words of `atan(v_k)`
pub const ARCTAN_VALUES_LO: [f64; 7] = [
    3.6930816508971456e-18,
    -2.7343508611232917e-18,
    -3.453233375266464e-17,
    3.947606661816028e-17,
    7.683333629842069e-17,
    -8.824429373951136e-17,
    9.211323971545052e-17,
];

// ============================================================================
// Reductions
// ============================================================================

/// Reduce `m` in `[1, 2)` against the node selected by `index`.
///
/// Returns `u = m / t_k - 1`. When `index` holds the top
/// [`MANTISSA_INDEX_BITS`] fraction bits of `m`, `u` lies in `[0, 1/128)` up
/// to one rounding of the reciprocal.
#[inline]
pub fn mantissa_reduction<C: Real>(m: C, index: usize) -> C {
    m * C::from_f64(NODE_RECIPROCALS[index]) - C::ONE
}

/// Bucket of an arctangent argument whose binary exponent is `exponent`.
#[inline]
pub fn arctan_bucket(exponent: i32) -> usize {
    debug_assert!((ARCTAN_FIRST_EXPONENT..ARCTAN_END_EXPONENT).contains(&exponent));
    (exponent - ARCTAN_FIRST_EXPONENT) as usize
}

/// Bucket of `x` in `[2^-3, 2^4)` found with comparisons only.
pub fn arctan_bucket_of<C: Real>(x: C) -> usize {
    let mut bucket = 0;
    let mut bound = C::pow2(ARCTAN_FIRST_EXPONENT + 1);
    while bucket + 1 < ARCTAN_NODES.len() && x >= bound {
        bucket += 1;
        bound = bound * C::TWO;
    }
    bucket
}

/// Residual `(x - v_k) / (1 + x v_k)` of the arctangent addition formula.
#[inline]
pub fn arctan_reduction<C: Real>(x: C, bucket: usize) -> C {
    let v = C::from_f64(ARCTAN_NODES[bucket]);
    (x - v) / (C::ONE + x * v)
}

/// `atan(v_k)` as a leading value and the correction it dropped.
#[inline]
pub fn arctan_node_value<C: Real>(bucket: usize) -> (C, C) {
    split_entry(ARCTAN_VALUES_HI[bucket], ARCTAN_VALUES_LO[bucket])
}

/// `2^(j/64)` as a leading value and the correction it dropped.
#[inline]
pub fn exp2_entry<C: Real>(j: usize) -> (C, C) {
    split_entry(EXP2_HI[j], EXP2_LO[j])
}

/// Round a double-double table entry into the carrier without losing the
/// part that does not fit.
#[inline]
fn split_entry<C: Real>(hi: f64, lo: f64) -> (C, C) {
    let lead = C::from_f64(hi);
    let tail = C::from_f64((hi - lead.to_f64()) + lo);
    (lead, tail)
}
