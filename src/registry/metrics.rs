//! The compiled-in metric table.
//!
//! One entry per measurable facial quantity, front and side profiles.
//! Ideal ranges, decay rates, and weights follow the anthropometric
//! references the product uses; demographic overrides are listed per metric
//! where the reference ranges differ by gender or ethnicity.
//!
//! Landmark id conventions: front-profile ids are plain (`left_zygion`,
//! `menton`, ...); side-profile ids carry a `side_` prefix because the two
//! photographs share anatomical names but not coordinates.

use crate::domain::{
    BezierCurveConfig, CurveMode, CurvePoint, DemographicOverride, Ethnicity, Gender, IdealRange,
    IndicationLabels, MeasurementUnit, MetricConfig, MetricPolarity, ProfileType,
};
use crate::measure::Measure;

/// Baseline constructor: balanced polarity, no overrides, default soft zone.
fn metric(
    id: &'static str,
    name: &'static str,
    category: &'static str,
    unit: MeasurementUnit,
    profile: ProfileType,
    ideal: (f64, f64),
    display: (f64, f64),
    decay_rate: f64,
    weight: f64,
    measure: Measure,
) -> MetricConfig {
    MetricConfig {
        id,
        name,
        category,
        unit,
        profile,
        ideal: IdealRange::new(ideal.0, ideal.1),
        range_min: display.0,
        range_max: display.1,
        decay_rate,
        max_score: 10.0,
        weight,
        polarity: MetricPolarity::Balanced,
        safe_floor: None,
        safe_ceiling: None,
        soft_zone_score: 8.0,
        spread_scale: None,
        custom_curve: None,
        overrides: Vec::new(),
        measure,
        labels: None,
    }
}

impl MetricConfig {
    fn higher_is_better(mut self, safe_floor: f64) -> Self {
        self.polarity = MetricPolarity::HigherIsBetter;
        self.safe_floor = Some(safe_floor);
        self
    }

    fn lower_is_better(mut self, safe_ceiling: f64) -> Self {
        self.polarity = MetricPolarity::LowerIsBetter;
        self.safe_ceiling = Some(safe_ceiling);
        self
    }

    fn gender_override(mut self, gender: Gender, min: f64, max: f64) -> Self {
        self.overrides.push(DemographicOverride {
            gender: Some(gender),
            ethnicity: None,
            range: IdealRange::new(min, max),
        });
        self
    }

    fn ethnicity_override(mut self, ethnicity: Ethnicity, min: f64, max: f64) -> Self {
        self.overrides.push(DemographicOverride {
            gender: None,
            ethnicity: Some(ethnicity),
            range: IdealRange::new(min, max),
        });
        self
    }

    fn indications(mut self, low: &'static str, high: &'static str, ideal: &'static str) -> Self {
        self.labels = Some(IndicationLabels { low, high, ideal });
        self
    }

    fn scoring_curve(mut self, curve: BezierCurveConfig) -> Self {
        self.custom_curve = Some(curve);
        self
    }
}

/// Scoring curve for the lower/upper lip ratio.
///
/// The plateau between 1.5x and 2.0x scores maximally; the fall-off is
/// steeper toward thin lower lips than toward heavy ones, which the
/// exponential model cannot express. The display curve is a smoothed
/// variant for visualization only.
fn lip_ratio_curve() -> BezierCurveConfig {
    BezierCurveConfig {
        mode: CurveMode::Custom,
        points: vec![
            CurvePoint::at(0.8, 2.0),
            CurvePoint::at(1.25, 6.5),
            CurvePoint::at(1.5, 10.0),
            CurvePoint::at(2.0, 10.0),
            CurvePoint::at(2.6, 5.5),
            CurvePoint::at(3.0, 2.5),
        ],
        display_points: Some(vec![
            CurvePoint::at(0.8, 2.5),
            CurvePoint::at(1.5, 10.0),
            CurvePoint::at(2.0, 10.0),
            CurvePoint::at(3.0, 3.0),
        ]),
    }
}

/// Build the full builtin table, front profile first, declaration order is
/// the canonical output order.
pub fn builtin_metrics() -> Vec<MetricConfig> {
    vec![
        // ---- Face shape / proportions (front) ----
        metric(
            "faceWidthToHeight",
            "Face Width-to-Height Ratio",
            "proportions",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (1.5, 1.8),
            (1.0, 2.5),
            2.0,
            1.5,
            Measure::Ratio {
                num: ("left_zygion", "right_zygion"),
                den: ("trichion", "menton"),
            },
        )
        .gender_override(Gender::Male, 1.55, 1.85)
        .gender_override(Gender::Female, 1.45, 1.75)
        .indications(
            "Narrow, vertically elongated face",
            "Wide, horizontally expanded face",
            "Balanced facial proportions",
        ),
        metric(
            "lowerThirdProportion",
            "Lower Third Proportion",
            "proportions",
            MeasurementUnit::Percent,
            ProfileType::Front,
            (30.0, 33.0),
            (24.0, 42.0),
            0.5,
            1.2,
            Measure::Percent {
                num: ("subnasale", "menton"),
                den: ("trichion", "menton"),
            },
        )
        .indications(
            "Short lower third, deficient mandible",
            "Long lower third, mandibular excess",
            "Harmonious vertical thirds",
        ),
        metric(
            "midfaceRatio",
            "Midface Ratio",
            "proportions",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (1.05, 1.2),
            (0.8, 1.5),
            3.0,
            1.0,
            Measure::Ratio {
                num: ("left_pupil", "right_pupil"),
                den: ("left_pupil", "mouth_middle"),
            },
        ),
        metric(
            "bitemporalWidth",
            "Bitemporal Width",
            "proportions",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (0.85, 0.95),
            (0.7, 1.1),
            6.0,
            0.8,
            Measure::Ratio {
                num: ("left_temporal", "right_temporal"),
                den: ("left_zygion", "right_zygion"),
            },
        ),
        // ---- Jaw (front) ----
        metric(
            "jawFrontalAngle",
            "Jaw Frontal Angle",
            "jaw",
            MeasurementUnit::Degrees,
            ProfileType::Front,
            (128.0, 142.0),
            (95.0, 175.0),
            0.1,
            1.2,
            Measure::Angle {
                a: "left_gonion_inferior",
                vertex: "menton",
                b: "right_gonion_inferior",
            },
        )
        .indications(
            "Overly narrow chin taper",
            "Flat, wide jaw base",
            "Strong jaw structure",
        ),
        metric(
            "bigonialWidth",
            "Bigonial Width",
            "jaw",
            MeasurementUnit::Percent,
            ProfileType::Front,
            (85.0, 92.0),
            (70.0, 105.0),
            0.25,
            1.1,
            Measure::Percent {
                num: ("left_gonion_inferior", "right_gonion_inferior"),
                den: ("left_zygion", "right_zygion"),
            },
        )
        .gender_override(Gender::Male, 88.0, 95.0)
        .gender_override(Gender::Female, 83.0, 90.0)
        .indications(
            "Narrow jaw relative to cheekbones",
            "Jaw wider than cheekbones",
            "Well-defined jawline",
        ),
        // ---- Eyes ----
        metric(
            "lateralCanthalTilt",
            "Lateral Canthal Tilt",
            "eyes",
            MeasurementUnit::Degrees,
            ProfileType::Front,
            (4.0, 8.0),
            (-10.0, 15.0),
            0.35,
            1.3,
            Measure::Tilt {
                from: "left_canthus_medialis",
                to: "left_canthus_lateralis",
            },
        )
        .higher_is_better(0.0)
        .gender_override(Gender::Female, 5.0, 9.0)
        .indications(
            "Negative canthal tilt, drooping eye appearance",
            "Excessive positive canthal tilt",
            "Attractive positive canthal tilt",
        ),
        metric(
            "eyeAspectRatio",
            "Eye Aspect Ratio",
            "eyes",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (2.8, 3.4),
            (2.0, 4.5),
            2.2,
            1.0,
            Measure::Ratio {
                num: ("left_canthus_medialis", "left_canthus_lateralis"),
                den: ("left_palpebra_superior", "left_palpebra_inferior"),
            },
        ),
        metric(
            "eyeSeparationRatio",
            "Eye Separation Ratio",
            "eyes",
            MeasurementUnit::Percent,
            ProfileType::Front,
            (44.0, 48.0),
            (35.0, 60.0),
            0.35,
            1.1,
            Measure::Percent {
                num: ("left_pupil", "right_pupil"),
                den: ("left_zygion", "right_zygion"),
            },
        )
        .ethnicity_override(Ethnicity::EastAsian, 45.0, 49.0),
        metric(
            "oneEyeApartTest",
            "One-Eye-Apart Test",
            "eyes",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (0.95, 1.15),
            (0.7, 1.5),
            3.5,
            0.9,
            Measure::Ratio {
                num: ("left_canthus_medialis", "right_canthus_medialis"),
                den: ("left_canthus_medialis", "left_canthus_lateralis"),
            },
        )
        .indications("Close-set eyes", "Wide-set eyes", "Harmonious eye spacing"),
        // ---- Eyebrows ----
        metric(
            "eyebrowTilt",
            "Eyebrow Tilt",
            "eyebrows",
            MeasurementUnit::Degrees,
            ProfileType::Front,
            (5.0, 15.0),
            (-10.0, 30.0),
            0.25,
            0.7,
            Measure::Tilt {
                from: "left_supercilium_medialis",
                to: "left_supercilium_lateralis",
            },
        ),
        // ---- Nose (front) ----
        metric(
            "nasalIndex",
            "Nasal Index",
            "nose",
            MeasurementUnit::Percent,
            ProfileType::Front,
            (62.0, 70.0),
            (45.0, 95.0),
            0.12,
            1.2,
            Measure::Percent {
                num: ("left_ala_nasi", "right_ala_nasi"),
                den: ("nasion", "subnasale"),
            },
        )
        .ethnicity_override(Ethnicity::Black, 70.0, 85.0)
        .ethnicity_override(Ethnicity::EastAsian, 66.0, 77.0)
        .indications(
            "Narrow, leptorrhine nose",
            "Wide, platyrrhine nose",
            "Well-proportioned nose",
        ),
        metric(
            "intercanthalNasalRatio",
            "Intercanthal-Nasal Ratio",
            "nose",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (0.95, 1.05),
            (0.7, 1.4),
            4.0,
            0.9,
            Measure::Ratio {
                num: ("left_ala_nasi", "right_ala_nasi"),
                den: ("left_canthus_medialis", "right_canthus_medialis"),
            },
        ),
        // ---- Mouth / lips ----
        metric(
            "mouthNoseWidthRatio",
            "Mouth-to-Nose Width Ratio",
            "mouth",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (1.45, 1.6),
            (1.0, 2.2),
            3.0,
            1.0,
            Measure::Ratio {
                num: ("left_cheilion", "right_cheilion"),
                den: ("left_ala_nasi", "right_ala_nasi"),
            },
        ),
        metric(
            "lowerUpperLipRatio",
            "Lower-to-Upper Lip Ratio",
            "mouth",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (1.5, 2.0),
            (0.8, 3.0),
            2.0,
            1.0,
            Measure::Ratio {
                num: ("mouth_middle", "labrale_inferius"),
                den: ("labrale_superius", "mouth_middle"),
            },
        )
        .scoring_curve(lip_ratio_curve())
        .indications(
            "Thin lower lip",
            "Heavy lower lip",
            "Balanced lip proportions",
        ),
        // ---- Chin (front) ----
        metric(
            "chinPhiltrumRatio",
            "Chin-to-Philtrum Ratio",
            "chin",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (2.0, 2.5),
            (1.0, 3.5),
            1.2,
            1.0,
            Measure::Ratio {
                num: ("labrale_inferius", "menton"),
                den: ("subnasale", "labrale_superius"),
            },
        )
        .higher_is_better(1.6)
        .indications(
            "Short chin relative to philtrum",
            "Overlong chin",
            "Strong chin height",
        ),
        // ---- Neck ----
        metric(
            "neckWidthRatio",
            "Neck Width Ratio",
            "neck",
            MeasurementUnit::Ratio,
            ProfileType::Front,
            (0.9, 1.05),
            (0.6, 1.4),
            3.0,
            0.6,
            Measure::Ratio {
                num: ("left_cervical_lateralis", "right_cervical_lateralis"),
                den: ("left_gonion_inferior", "right_gonion_inferior"),
            },
        ),
        // ---- Jaw (side) ----
        metric(
            "gonialAngle",
            "Gonial Angle",
            "jaw",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (115.0, 125.0),
            (90.0, 150.0),
            0.12,
            1.4,
            Measure::Angle {
                a: "side_tragus",
                vertex: "side_gonion_bottom",
                b: "side_menton",
            },
        )
        .gender_override(Gender::Male, 112.0, 121.0)
        .gender_override(Gender::Female, 118.0, 127.0)
        .indications(
            "Overly acute gonial angle",
            "Obtuse gonial angle, weak jaw definition",
            "Well-defined jawline",
        ),
        metric(
            "ramusToMandibleRatio",
            "Ramus-to-Mandible Ratio",
            "jaw",
            MeasurementUnit::Ratio,
            ProfileType::Side,
            (0.6, 0.75),
            (0.4, 1.0),
            5.0,
            0.9,
            Measure::Ratio {
                num: ("side_gonion_top", "side_gonion_bottom"),
                den: ("side_gonion_bottom", "side_menton"),
            },
        ),
        metric(
            "mandibularPlaneAngle",
            "Mandibular Plane Angle",
            "jaw",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (15.0, 23.0),
            (0.0, 45.0),
            0.2,
            1.0,
            Measure::SegmentsAngle {
                a: ("side_gonion_bottom", "side_menton"),
                b: ("side_orbitale", "side_porion"),
            },
        )
        .lower_is_better(28.0)
        .indications(
            "Overly flat mandibular plane",
            "Steep mandibular plane",
            "Balanced mandibular plane",
        ),
        // ---- Nose (side) ----
        metric(
            "nasofrontalAngle",
            "Nasofrontal Angle",
            "nose",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (115.0, 130.0),
            (90.0, 160.0),
            0.1,
            0.9,
            Measure::Angle {
                a: "side_glabella",
                vertex: "side_nasion",
                b: "side_pronasale",
            },
        ),
        metric(
            "nasolabialAngle",
            "Nasolabial Angle",
            "nose",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (90.0, 110.0),
            (60.0, 140.0),
            0.09,
            1.1,
            Measure::Angle {
                a: "side_columella",
                vertex: "side_subnasale",
                b: "side_labrale_superius",
            },
        )
        .gender_override(Gender::Male, 90.0, 100.0)
        .gender_override(Gender::Female, 95.0, 110.0)
        .indications(
            "Downturned nasal tip",
            "Overrotated nasal tip",
            "Harmonious nasal rotation",
        ),
        metric(
            "nasofacialAngle",
            "Nasofacial Angle",
            "nose",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (30.0, 40.0),
            (15.0, 55.0),
            0.2,
            0.9,
            Measure::SegmentsAngle {
                a: ("side_nasion", "side_pronasale"),
                b: ("side_nasion", "side_pogonion"),
            },
        ),
        // ---- Chin / lower face (side) ----
        metric(
            "mentolabialAngle",
            "Mentolabial Angle",
            "chin",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (110.0, 130.0),
            (80.0, 170.0),
            0.08,
            0.8,
            Measure::Angle {
                a: "side_labrale_inferius",
                vertex: "side_mentolabial_sulcus",
                b: "side_pogonion",
            },
        ),
        // ---- Profile harmony ----
        metric(
            "facialConvexityNasion",
            "Facial Convexity (Nasion)",
            "profile",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (165.0, 175.0),
            (140.0, 185.0),
            0.15,
            1.2,
            Measure::Angle {
                a: "side_nasion",
                vertex: "side_subnasale",
                b: "side_pogonion",
            },
        )
        .indications(
            "Concave profile",
            "Convex profile, recessed lower face",
            "Harmonious straight profile",
        ),
        metric(
            "facialDepthToHeight",
            "Facial Depth-to-Height",
            "profile",
            MeasurementUnit::Ratio,
            ProfileType::Side,
            (0.95, 1.05),
            (0.7, 1.3),
            3.0,
            0.7,
            Measure::Ratio {
                num: ("side_pronasale", "side_tragus"),
                den: ("side_nasion", "side_menton"),
            },
        ),
        metric(
            "submentalCervicalAngle",
            "Submental-Cervical Angle",
            "neck",
            MeasurementUnit::Degrees,
            ProfileType::Side,
            (90.0, 105.0),
            (60.0, 160.0),
            0.1,
            0.8,
            Measure::Angle {
                a: "side_menton",
                vertex: "side_cervical_point",
                b: "side_neck_point",
            },
        )
        .lower_is_better(115.0)
        .indications(
            "Overly acute neck angle",
            "Obtuse neck angle, submental fullness",
            "Defined neckline",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_nontrivial() {
        let metrics = builtin_metrics();
        assert!(metrics.len() >= 20);
    }

    #[test]
    fn every_entry_validates() {
        for m in builtin_metrics() {
            m.validate().unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn custom_curves_are_well_formed() {
        for m in builtin_metrics() {
            crate::scoring::curve::validate_config(&m).unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn side_metrics_use_side_landmarks() {
        use crate::domain::ProfileType;
        for m in builtin_metrics() {
            if m.profile == ProfileType::Side {
                for id in m.measure.required_landmarks() {
                    assert!(id.starts_with("side_"), "{}: {}", m.id, id);
                }
            }
        }
    }

    #[test]
    fn overrides_respect_display_bounds() {
        // An override must still sit inside the metric's display range so
        // spreads and plots stay meaningful.
        for m in builtin_metrics() {
            for o in &m.overrides {
                assert!(
                    o.range.min >= m.range_min && o.range.max <= m.range_max,
                    "{} override escapes display range",
                    m.id
                );
                assert!(o.range.min <= o.range.max, "{}", m.id);
            }
        }
    }
}
