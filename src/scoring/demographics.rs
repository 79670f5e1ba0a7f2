//! Demographic override resolution.
//!
//! A metric may carry alternate ideal ranges keyed by gender, ethnicity, or
//! both. Resolution is deterministic and side-effect free, with specificity
//! precedence: gender+ethnicity > ethnicity-only > gender-only > metric
//! default. Keys are disjoint by construction, so ties cannot occur among
//! overrides that match the same options.

use crate::domain::{DemographicOptions, DemographicOverride, IdealRange, MetricConfig};

/// Resolve the effective ideal range for one run's demographics.
///
/// With no gender/ethnicity supplied, this returns exactly the metric's own
/// range.
pub fn resolve(config: &MetricConfig, opts: &DemographicOptions) -> IdealRange {
    let mut best: Option<&DemographicOverride> = None;

    for ovr in &config.overrides {
        if !applies(ovr, opts) {
            continue;
        }
        match best {
            Some(current) if current.specificity() >= ovr.specificity() => {}
            _ => best = Some(ovr),
        }
    }

    best.map(|o| o.range).unwrap_or(config.ideal)
}

/// An override applies when every key it specifies matches the run options.
/// An override with no keys at all never applies (that is what the metric
/// default is for).
fn applies(ovr: &DemographicOverride, opts: &DemographicOptions) -> bool {
    if ovr.gender.is_none() && ovr.ethnicity.is_none() {
        return false;
    }
    if let Some(g) = ovr.gender {
        if opts.gender != Some(g) {
            return false;
        }
    }
    if let Some(e) = ovr.ethnicity {
        if opts.ethnicity != Some(e) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ethnicity, Gender, MeasurementUnit, MetricPolarity, ProfileType};
    use crate::measure::Measure;

    fn config_with_overrides() -> MetricConfig {
        MetricConfig {
            id: "m",
            name: "m",
            category: "test",
            unit: MeasurementUnit::Ratio,
            profile: ProfileType::Front,
            ideal: IdealRange::new(1.0, 2.0),
            range_min: 0.0,
            range_max: 3.0,
            decay_rate: 1.0,
            max_score: 10.0,
            weight: 1.0,
            polarity: MetricPolarity::Balanced,
            safe_floor: None,
            safe_ceiling: None,
            soft_zone_score: 8.0,
            spread_scale: None,
            custom_curve: None,
            overrides: vec![
                DemographicOverride {
                    gender: Some(Gender::Male),
                    ethnicity: None,
                    range: IdealRange::new(1.1, 2.1),
                },
                DemographicOverride {
                    gender: None,
                    ethnicity: Some(Ethnicity::EastAsian),
                    range: IdealRange::new(1.2, 2.2),
                },
                DemographicOverride {
                    gender: Some(Gender::Male),
                    ethnicity: Some(Ethnicity::EastAsian),
                    range: IdealRange::new(1.3, 2.3),
                },
            ],
            measure: Measure::Ratio {
                num: ("a", "b"),
                den: ("c", "d"),
            },
            labels: None,
        }
    }

    #[test]
    fn no_demographics_returns_metric_default() {
        let cfg = config_with_overrides();
        let range = resolve(&cfg, &DemographicOptions::default());
        assert_eq!(range, cfg.ideal);
    }

    #[test]
    fn combined_key_beats_single_keys() {
        let cfg = config_with_overrides();
        let opts = DemographicOptions {
            gender: Some(Gender::Male),
            ethnicity: Some(Ethnicity::EastAsian),
        };
        assert_eq!(resolve(&cfg, &opts), IdealRange::new(1.3, 2.3));
    }

    #[test]
    fn ethnicity_beats_gender() {
        let cfg = config_with_overrides();
        let opts = DemographicOptions {
            gender: Some(Gender::Male),
            ethnicity: Some(Ethnicity::EastAsian),
        };
        // Remove the combined override; the ethnicity one must win.
        let mut cfg2 = cfg.clone();
        cfg2.overrides.retain(|o| o.specificity() < 3);
        assert_eq!(resolve(&cfg2, &opts), IdealRange::new(1.2, 2.2));
    }

    #[test]
    fn gender_only_falls_through() {
        let cfg = config_with_overrides();
        let opts = DemographicOptions {
            gender: Some(Gender::Male),
            ethnicity: None,
        };
        assert_eq!(resolve(&cfg, &opts), IdealRange::new(1.1, 2.1));
    }

    #[test]
    fn non_matching_override_is_ignored() {
        let cfg = config_with_overrides();
        let opts = DemographicOptions {
            gender: Some(Gender::Female),
            ethnicity: Some(Ethnicity::Black),
        };
        assert_eq!(resolve(&cfg, &opts), cfg.ideal);
    }
}
