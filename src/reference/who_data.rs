//! Bundled WHO Child Growth Standards (2006) subset.
//!
//! LMS rows are `(x, L, M, S)`: age in completed months for the age-based
//! indicators (monthly to 12 months, then every 3 months to 60), height in cm
//! for weight-for-height (every 5 cm from 45 to 120). Length is used below
//! 24 months and standing height from 24 months onward, as in the WHO tables.
//!
//! Velocity rows are `(start_month, end_month, mean, sd)` of the monthly
//! increment, condensed from the WHO growth-velocity standards into five age
//! bands.
use crate::reference::{
    indicator::{Indicator, Sex},
    standards::{ReferenceTableEntry, VelocityTableEntry},
};

type LmsRow = (f64, f64, f64, f64);
type VelocityRow = (u32, u32, f64, f64);

const WEIGHT_FOR_AGE_MALE: &[LmsRow] = &[
    (0.0, 0.3487, 3.3464, 0.14602),
    (1.0, 0.2297, 4.4709, 0.13395),
    (2.0, 0.1970, 5.5675, 0.12385),
    (3.0, 0.1738, 6.3762, 0.11727),
    (4.0, 0.1553, 7.0023, 0.11316),
    (5.0, 0.1395, 7.5105, 0.11080),
    (6.0, 0.1257, 7.9340, 0.10958),
    (7.0, 0.1134, 8.2970, 0.10902),
    (8.0, 0.1021, 8.6151, 0.10882),
    (9.0, 0.0917, 8.9014, 0.10881),
    (10.0, 0.0820, 9.1649, 0.10891),
    (11.0, 0.0730, 9.4122, 0.10906),
    (12.0, 0.0644, 9.6479, 0.10925),
    (15.0, 0.0430, 10.3108, 0.10985),
    (18.0, 0.0226, 10.9385, 0.11069),
    (21.0, 0.0033, 11.5486, 0.11162),
    (24.0, -0.0137, 12.1515, 0.11255),
    (27.0, -0.0294, 12.7375, 0.11350),
    (30.0, -0.0435, 13.3000, 0.11447),
    (33.0, -0.0563, 13.8000, 0.11544),
    (36.0, -0.0681, 14.3429, 0.11641),
    (39.0, -0.0791, 14.8000, 0.11738),
    (42.0, -0.0894, 15.3000, 0.11835),
    (45.0, -0.0990, 15.8000, 0.11932),
    (48.0, -0.1081, 16.3489, 0.12027),
    (51.0, -0.1168, 16.8000, 0.12122),
    (54.0, -0.1250, 17.3000, 0.12216),
    (57.0, -0.1329, 17.8000, 0.12309),
    (60.0, -0.1404, 18.3366, 0.12400),
];

const WEIGHT_FOR_AGE_FEMALE: &[LmsRow] = &[
    (0.0, 0.3809, 3.2322, 0.14171),
    (1.0, 0.1714, 4.1873, 0.13724),
    (2.0, 0.0962, 5.1282, 0.13000),
    (3.0, 0.0402, 5.8458, 0.12619),
    (4.0, -0.0050, 6.4237, 0.12402),
    (5.0, -0.0430, 6.8985, 0.12274),
    (6.0, -0.0756, 7.2970, 0.12204),
    (7.0, -0.1039, 7.6422, 0.12178),
    (8.0, -0.1288, 7.9487, 0.12181),
    (9.0, -0.1507, 8.2254, 0.12199),
    (10.0, -0.1700, 8.4800, 0.12223),
    (11.0, -0.1872, 8.7192, 0.12247),
    (12.0, -0.2024, 8.9481, 0.12268),
    (15.0, -0.2332, 9.6000, 0.12327),
    (18.0, -0.2574, 10.2315, 0.12390),
    (21.0, -0.2778, 10.8000, 0.12470),
    (24.0, -0.2957, 11.4775, 0.12568),
    (27.0, -0.3113, 12.0000, 0.12672),
    (30.0, -0.3251, 12.6000, 0.12782),
    (33.0, -0.3373, 13.1000, 0.12894),
    (36.0, -0.3482, 13.8503, 0.13005),
    (39.0, -0.3580, 14.4000, 0.13116),
    (42.0, -0.3668, 14.9000, 0.13226),
    (45.0, -0.3748, 15.5000, 0.13334),
    (48.0, -0.3821, 16.0697, 0.13440),
    (51.0, -0.3888, 16.6000, 0.13545),
    (54.0, -0.3950, 17.1000, 0.13648),
    (57.0, -0.4007, 17.7000, 0.13750),
    (60.0, -0.4060, 18.2193, 0.13850),
];

const HEIGHT_FOR_AGE_MALE: &[LmsRow] = &[
    (0.0, 1.0, 49.8842, 0.03795),
    (1.0, 1.0, 54.7244, 0.03557),
    (2.0, 1.0, 58.4249, 0.03424),
    (3.0, 1.0, 61.4292, 0.03328),
    (4.0, 1.0, 63.8860, 0.03257),
    (5.0, 1.0, 65.9026, 0.03204),
    (6.0, 1.0, 67.6236, 0.03165),
    (7.0, 1.0, 69.1645, 0.03139),
    (8.0, 1.0, 70.5994, 0.03124),
    (9.0, 1.0, 71.9687, 0.03117),
    (10.0, 1.0, 73.2812, 0.03118),
    (11.0, 1.0, 74.5388, 0.03125),
    (12.0, 1.0, 75.7488, 0.03137),
    (15.0, 1.0, 79.1458, 0.03193),
    (18.0, 1.0, 82.2587, 0.03253),
    (21.0, 1.0, 85.1348, 0.03316),
    (24.0, 1.0, 87.1161, 0.03507),
    (27.0, 1.0, 89.6000, 0.03560),
    (30.0, 1.0, 91.9000, 0.03610),
    (33.0, 1.0, 94.1000, 0.03655),
    (36.0, 1.0, 96.0861, 0.03704),
    (39.0, 1.0, 98.0000, 0.03748),
    (42.0, 1.0, 99.9000, 0.03790),
    (45.0, 1.0, 101.6000, 0.03830),
    (48.0, 1.0, 103.3273, 0.03868),
    (51.0, 1.0, 105.0000, 0.03904),
    (54.0, 1.0, 106.7000, 0.03939),
    (57.0, 1.0, 108.4000, 0.03972),
    (60.0, 1.0, 110.0000, 0.04003),
];

const HEIGHT_FOR_AGE_FEMALE: &[LmsRow] = &[
    (0.0, 1.0, 49.1477, 0.03790),
    (1.0, 1.0, 53.6872, 0.03640),
    (2.0, 1.0, 57.0673, 0.03568),
    (3.0, 1.0, 59.8029, 0.03520),
    (4.0, 1.0, 62.0899, 0.03486),
    (5.0, 1.0, 64.0301, 0.03463),
    (6.0, 1.0, 65.7311, 0.03448),
    (7.0, 1.0, 67.2873, 0.03441),
    (8.0, 1.0, 68.7498, 0.03440),
    (9.0, 1.0, 70.1435, 0.03444),
    (10.0, 1.0, 71.4818, 0.03452),
    (11.0, 1.0, 72.7710, 0.03464),
    (12.0, 1.0, 74.0150, 0.03479),
    (15.0, 1.0, 77.5417, 0.03534),
    (18.0, 1.0, 80.7079, 0.03597),
    (21.0, 1.0, 83.6654, 0.03662),
    (24.0, 1.0, 85.7153, 0.03764),
    (27.0, 1.0, 88.3000, 0.03815),
    (30.0, 1.0, 90.7000, 0.03865),
    (33.0, 1.0, 93.0000, 0.03912),
    (36.0, 1.0, 95.0515, 0.03959),
    (39.0, 1.0, 97.1000, 0.03997),
    (42.0, 1.0, 99.0000, 0.04030),
    (45.0, 1.0, 100.9000, 0.04058),
    (48.0, 1.0, 102.7312, 0.04082),
    (51.0, 1.0, 104.5000, 0.04098),
    (54.0, 1.0, 106.2000, 0.04110),
    (57.0, 1.0, 107.9000, 0.04117),
    (60.0, 1.0, 109.4233, 0.04122),
];

const HEAD_CIRCUMFERENCE_FOR_AGE_MALE: &[LmsRow] = &[
    (0.0, 1.0, 34.4618, 0.03686),
    (1.0, 1.0, 37.2759, 0.03133),
    (2.0, 1.0, 39.1285, 0.02997),
    (3.0, 1.0, 40.5135, 0.02918),
    (4.0, 1.0, 41.6317, 0.02868),
    (5.0, 1.0, 42.5576, 0.02837),
    (6.0, 1.0, 43.3306, 0.02817),
    (7.0, 1.0, 43.9803, 0.02804),
    (8.0, 1.0, 44.5300, 0.02796),
    (9.0, 1.0, 44.9998, 0.02792),
    (10.0, 1.0, 45.4051, 0.02790),
    (11.0, 1.0, 45.7573, 0.02789),
    (12.0, 1.0, 46.0661, 0.02789),
    (15.0, 1.0, 46.8000, 0.02790),
    (18.0, 1.0, 47.4000, 0.02795),
    (21.0, 1.0, 47.9000, 0.02801),
    (24.0, 1.0, 48.3000, 0.02808),
    (27.0, 1.0, 48.6000, 0.02815),
    (30.0, 1.0, 48.9000, 0.02822),
    (33.0, 1.0, 49.2000, 0.02829),
    (36.0, 1.0, 49.5000, 0.02836),
    (39.0, 1.0, 49.7000, 0.02842),
    (42.0, 1.0, 49.9000, 0.02848),
    (45.0, 1.0, 50.1000, 0.02854),
    (48.0, 1.0, 50.3000, 0.02860),
    (51.0, 1.0, 50.5000, 0.02865),
    (54.0, 1.0, 50.6000, 0.02870),
    (57.0, 1.0, 50.8000, 0.02875),
    (60.0, 1.0, 50.9000, 0.02880),
];

const HEAD_CIRCUMFERENCE_FOR_AGE_FEMALE: &[LmsRow] = &[
    (0.0, 1.0, 33.8787, 0.03496),
    (1.0, 1.0, 36.5463, 0.03210),
    (2.0, 1.0, 38.2521, 0.03168),
    (3.0, 1.0, 39.5328, 0.03140),
    (4.0, 1.0, 40.5817, 0.03119),
    (5.0, 1.0, 41.4590, 0.03102),
    (6.0, 1.0, 42.1995, 0.03087),
    (7.0, 1.0, 42.8290, 0.03075),
    (8.0, 1.0, 43.3671, 0.03063),
    (9.0, 1.0, 43.8300, 0.03053),
    (10.0, 1.0, 44.2319, 0.03044),
    (11.0, 1.0, 44.5844, 0.03035),
    (12.0, 1.0, 44.8965, 0.03027),
    (15.0, 1.0, 45.6000, 0.03010),
    (18.0, 1.0, 46.2000, 0.03000),
    (21.0, 1.0, 46.7000, 0.02994),
    (24.0, 1.0, 47.2000, 0.02989),
    (27.0, 1.0, 47.5000, 0.02986),
    (30.0, 1.0, 47.9000, 0.02984),
    (33.0, 1.0, 48.2000, 0.02983),
    (36.0, 1.0, 48.5000, 0.02983),
    (39.0, 1.0, 48.7000, 0.02984),
    (42.0, 1.0, 48.9000, 0.02986),
    (45.0, 1.0, 49.1000, 0.02988),
    (48.0, 1.0, 49.3000, 0.02990),
    (51.0, 1.0, 49.5000, 0.02993),
    (54.0, 1.0, 49.6000, 0.02996),
    (57.0, 1.0, 49.8000, 0.02999),
    (60.0, 1.0, 49.9000, 0.03002),
];

const BMI_FOR_AGE_MALE: &[LmsRow] = &[
    (0.0, -0.3053, 13.4069, 0.09560),
    (1.0, 0.2708, 14.9441, 0.09027),
    (2.0, 0.1118, 16.3195, 0.08677),
    (3.0, 0.0068, 16.8987, 0.08495),
    (4.0, -0.0727, 17.1579, 0.08378),
    (5.0, -0.1370, 17.2919, 0.08296),
    (6.0, -0.1913, 17.3422, 0.08234),
    (7.0, -0.2385, 17.3288, 0.08183),
    (8.0, -0.2802, 17.2647, 0.08140),
    (9.0, -0.3176, 17.1662, 0.08102),
    (10.0, -0.3516, 17.0488, 0.08068),
    (11.0, -0.3828, 16.9239, 0.08037),
    (12.0, -0.4115, 16.7981, 0.08009),
    (15.0, -0.4868, 16.4000, 0.07933),
    (18.0, -0.5480, 16.1000, 0.07874),
    (21.0, -0.5991, 15.9000, 0.07828),
    (24.0, -0.6187, 15.8000, 0.07785),
    (27.0, -0.6590, 15.7000, 0.07763),
    (30.0, -0.6850, 15.6000, 0.07752),
    (33.0, -0.7080, 15.5000, 0.07751),
    (36.0, -0.7290, 15.4500, 0.07760),
    (39.0, -0.7480, 15.4000, 0.07780),
    (42.0, -0.7650, 15.3500, 0.07810),
    (45.0, -0.7810, 15.3000, 0.07850),
    (48.0, -0.7960, 15.2700, 0.07900),
    (51.0, -0.8090, 15.2500, 0.07950),
    (54.0, -0.8210, 15.2400, 0.08010),
    (57.0, -0.8320, 15.2300, 0.08070),
    (60.0, -0.8420, 15.2300, 0.08130),
];

const BMI_FOR_AGE_FEMALE: &[LmsRow] = &[
    (0.0, -0.0631, 13.3363, 0.09272),
    (1.0, 0.3448, 14.5679, 0.09556),
    (2.0, 0.1749, 15.7679, 0.09371),
    (3.0, 0.0643, 16.3574, 0.09254),
    (4.0, -0.0191, 16.6703, 0.09166),
    (5.0, -0.0864, 16.8386, 0.09096),
    (6.0, -0.1429, 16.9083, 0.09036),
    (7.0, -0.1916, 16.9020, 0.08984),
    (8.0, -0.2344, 16.8404, 0.08939),
    (9.0, -0.2725, 16.7406, 0.08898),
    (10.0, -0.3068, 16.6184, 0.08861),
    (11.0, -0.3381, 16.4875, 0.08828),
    (12.0, -0.3667, 16.3568, 0.08797),
    (15.0, -0.4353, 16.0000, 0.08735),
    (18.0, -0.4956, 15.7500, 0.08680),
    (21.0, -0.5450, 15.6000, 0.08640),
    (24.0, -0.5684, 15.5000, 0.08610),
    (27.0, -0.6000, 15.4500, 0.08620),
    (30.0, -0.6280, 15.4000, 0.08650),
    (33.0, -0.6530, 15.3500, 0.08690),
    (36.0, -0.6760, 15.3000, 0.08740),
    (39.0, -0.6970, 15.2500, 0.08800),
    (42.0, -0.7160, 15.2200, 0.08860),
    (45.0, -0.7340, 15.2000, 0.08930),
    (48.0, -0.7500, 15.2000, 0.09000),
    (51.0, -0.7650, 15.2000, 0.09070),
    (54.0, -0.7790, 15.2000, 0.09140),
    (57.0, -0.7920, 15.2100, 0.09210),
    (60.0, -0.8040, 15.2200, 0.09280),
];

// One table for all ages; WHO splits this into weight-for-length under 24
// months and weight-for-height from 24 months.
const WEIGHT_FOR_HEIGHT_MALE: &[LmsRow] = &[
    (45.0, -0.3521, 2.4410, 0.09182),
    (50.0, -0.3521, 3.3278, 0.08550),
    (55.0, -0.3521, 4.5000, 0.08250),
    (60.0, -0.3521, 5.9000, 0.08150),
    (65.0, -0.3521, 7.4000, 0.08130),
    (70.0, -0.3521, 8.6000, 0.08140),
    (75.0, -0.3521, 9.6000, 0.08150),
    (80.0, -0.3521, 10.6000, 0.08150),
    (85.0, -0.3521, 11.7000, 0.08180),
    (90.0, -0.3521, 12.9000, 0.08230),
    (95.0, -0.3521, 14.1000, 0.08320),
    (100.0, -0.3521, 15.4000, 0.08450),
    (105.0, -0.3521, 16.8000, 0.08620),
    (110.0, -0.3521, 18.3000, 0.08830),
    (115.0, -0.3521, 20.0000, 0.09050),
    (120.0, -0.3521, 21.9000, 0.09270),
];

const WEIGHT_FOR_HEIGHT_FEMALE: &[LmsRow] = &[
    (45.0, -0.3833, 2.4607, 0.09029),
    (50.0, -0.3833, 3.3000, 0.08830),
    (55.0, -0.3833, 4.4000, 0.08750),
    (60.0, -0.3833, 5.7000, 0.08740),
    (65.0, -0.3833, 7.2000, 0.08740),
    (70.0, -0.3833, 8.4000, 0.08740),
    (75.0, -0.3833, 9.4000, 0.08740),
    (80.0, -0.3833, 10.4000, 0.08750),
    (85.0, -0.3833, 11.5000, 0.08780),
    (90.0, -0.3833, 12.7000, 0.08830),
    (95.0, -0.3833, 13.9000, 0.08910),
    (100.0, -0.3833, 15.2000, 0.09020),
    (105.0, -0.3833, 16.7000, 0.09170),
    (110.0, -0.3833, 18.3000, 0.09350),
    (115.0, -0.3833, 20.1000, 0.09550),
    (120.0, -0.3833, 22.0000, 0.09760),
];

const WEIGHT_VELOCITY_MALE: &[VelocityRow] =
    &[(0, 3, 1.00, 0.20), (3, 6, 0.58, 0.15), (6, 12, 0.30, 0.10), (12, 24, 0.21, 0.08), (24, 60, 0.17, 0.07)];

const WEIGHT_VELOCITY_FEMALE: &[VelocityRow] =
    &[(0, 3, 0.88, 0.18), (3, 6, 0.52, 0.14), (6, 12, 0.28, 0.10), (12, 24, 0.21, 0.08), (24, 60, 0.18, 0.07)];

const HEIGHT_VELOCITY_MALE: &[VelocityRow] =
    &[(0, 3, 3.60, 0.60), (3, 6, 2.10, 0.45), (6, 12, 1.30, 0.30), (12, 24, 0.95, 0.20), (24, 60, 0.60, 0.15)];

const HEIGHT_VELOCITY_FEMALE: &[VelocityRow] =
    &[(0, 3, 3.40, 0.60), (3, 6, 2.00, 0.45), (6, 12, 1.35, 0.30), (12, 24, 0.97, 0.20), (24, 60, 0.62, 0.15)];

const HEAD_VELOCITY_MALE: &[VelocityRow] =
    &[(0, 3, 1.95, 0.40), (3, 6, 0.95, 0.25), (6, 12, 0.45, 0.15), (12, 24, 0.19, 0.08), (24, 60, 0.07, 0.04)];

const HEAD_VELOCITY_FEMALE: &[VelocityRow] =
    &[(0, 3, 1.85, 0.40), (3, 6, 0.92, 0.25), (6, 12, 0.45, 0.15), (12, 24, 0.19, 0.08), (24, 60, 0.07, 0.04)];

const BMI_VELOCITY_MALE: &[VelocityRow] =
    &[(0, 3, 1.15, 0.50), (3, 6, 0.15, 0.30), (6, 12, -0.09, 0.15), (12, 24, -0.06, 0.08), (24, 60, -0.02, 0.05)];

const BMI_VELOCITY_FEMALE: &[VelocityRow] =
    &[(0, 3, 1.05, 0.50), (3, 6, 0.12, 0.30), (6, 12, -0.08, 0.15), (12, 24, -0.05, 0.08), (24, 60, -0.02, 0.05)];

fn lms_rows(indicator: Indicator, sex: Sex) -> &'static [LmsRow] {
    match (indicator, sex) {
        (Indicator::WeightForAge, Sex::Male) => WEIGHT_FOR_AGE_MALE,
        (Indicator::WeightForAge, Sex::Female) => WEIGHT_FOR_AGE_FEMALE,
        (Indicator::HeightForAge, Sex::Male) => HEIGHT_FOR_AGE_MALE,
        (Indicator::HeightForAge, Sex::Female) => HEIGHT_FOR_AGE_FEMALE,
        (Indicator::WeightForHeight, Sex::Male) => WEIGHT_FOR_HEIGHT_MALE,
        (Indicator::WeightForHeight, Sex::Female) => WEIGHT_FOR_HEIGHT_FEMALE,
        (Indicator::HeadCircumferenceForAge, Sex::Male) => HEAD_CIRCUMFERENCE_FOR_AGE_MALE,
        (Indicator::HeadCircumferenceForAge, Sex::Female) => HEAD_CIRCUMFERENCE_FOR_AGE_FEMALE,
        (Indicator::BmiForAge, Sex::Male) => BMI_FOR_AGE_MALE,
        (Indicator::BmiForAge, Sex::Female) => BMI_FOR_AGE_FEMALE,
    }
}

fn velocity_rows(indicator: Indicator, sex: Sex) -> &'static [VelocityRow] {
    match (indicator.velocity_source(), sex) {
        (Indicator::HeightForAge, Sex::Male) => HEIGHT_VELOCITY_MALE,
        (Indicator::HeightForAge, Sex::Female) => HEIGHT_VELOCITY_FEMALE,
        (Indicator::HeadCircumferenceForAge, Sex::Male) => HEAD_VELOCITY_MALE,
        (Indicator::HeadCircumferenceForAge, Sex::Female) => HEAD_VELOCITY_FEMALE,
        (Indicator::BmiForAge, Sex::Male) => BMI_VELOCITY_MALE,
        (Indicator::BmiForAge, Sex::Female) => BMI_VELOCITY_FEMALE,
        (_, Sex::Male) => WEIGHT_VELOCITY_MALE,
        (_, Sex::Female) => WEIGHT_VELOCITY_FEMALE,
    }
}

/// Flattened LMS rows for every bundled table.
pub(crate) fn lms_entries() -> Vec<ReferenceTableEntry> {
    let mut entries = Vec::new();
    for sex in Sex::ALL {
        for indicator in Indicator::ALL {
            entries.extend(lms_rows(indicator, sex).iter().map(|&(x, l, m, s)| {
                ReferenceTableEntry { indicator, sex, x, l, m, s }
            }));
        }
    }
    entries
}

/// Flattened velocity bands for every bundled table.
pub(crate) fn velocity_entries() -> Vec<VelocityTableEntry> {
    let mut entries = Vec::new();
    for sex in Sex::ALL {
        for indicator in Indicator::WITH_VELOCITY {
            entries.extend(velocity_rows(indicator, sex).iter().map(
                |&(start_month, end_month, mean, sd)| VelocityTableEntry {
                    indicator,
                    sex,
                    start_month,
                    end_month,
                    mean,
                    sd,
                },
            ));
        }
    }
    entries
}
