//! Body measurement fields, defaults, and derived ratios.
//!
//! Measurements arrive from callers with any subset of fields present.
//! [`Measurements::resolve`] fills the gaps with the documented defaults so
//! downstream geometry never has to handle missing values, and the ratio
//! helpers on [`ResolvedMeasurements`] degrade to 0.0 instead of dividing
//! by zero.

use serde::{Deserialize, Serialize};

use crate::error::TryOnError;

/// Default values (centimeters) applied to missing fields.
pub const DEFAULT_HEIGHT: f64 = 170.0;
pub const DEFAULT_BUST: f64 = 90.0;
pub const DEFAULT_WAIST: f64 = 75.0;
pub const DEFAULT_HIPS: f64 = 95.0;
pub const DEFAULT_SHOULDER_WIDTH: f64 = 40.0;
pub const DEFAULT_ARM_LENGTH: f64 = 60.0;
pub const DEFAULT_LEG_LENGTH: f64 = 80.0;
pub const DEFAULT_INSEAM: f64 = 70.0;

/// A caller-supplied measurement set. All fields in centimeters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bust: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
}

impl Measurements {
    /// Validate that every provided field is finite and positive.
    ///
    /// Missing fields are fine (they resolve to defaults); a present but
    /// non-positive or non-finite value is an input error.
    pub fn validate(&self) -> Result<(), TryOnError> {
        let fields = [
            ("height", self.height),
            ("bust", self.bust),
            ("waist", self.waist),
            ("hips", self.hips),
            ("shoulder_width", self.shoulder_width),
            ("arm_length", self.arm_length),
            ("leg_length", self.leg_length),
            ("inseam", self.inseam),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(TryOnError::InvalidInput(format!(
                        "measurement '{}' must be a positive number, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }

    /// True when any torso girth (bust, waist, hips) was explicitly
    /// supplied. Girth-free inputs warp against a shape template rather
    /// than the numeric defaults.
    pub fn has_girths(&self) -> bool {
        self.bust.is_some() || self.waist.is_some() || self.hips.is_some()
    }

    /// Fill missing fields with defaults. Non-positive values also fall
    /// back to the default rather than poisoning later geometry.
    pub fn resolve(&self) -> ResolvedMeasurements {
        fn or_default(value: Option<f64>, default: f64) -> f64 {
            match value {
                Some(v) if v.is_finite() && v > 0.0 => v,
                _ => default,
            }
        }

        ResolvedMeasurements {
            height: or_default(self.height, DEFAULT_HEIGHT),
            bust: or_default(self.bust, DEFAULT_BUST),
            waist: or_default(self.waist, DEFAULT_WAIST),
            hips: or_default(self.hips, DEFAULT_HIPS),
            shoulder_width: or_default(self.shoulder_width, DEFAULT_SHOULDER_WIDTH),
            arm_length: or_default(self.arm_length, DEFAULT_ARM_LENGTH),
            leg_length: or_default(self.leg_length, DEFAULT_LEG_LENGTH),
            inseam: or_default(self.inseam, DEFAULT_INSEAM),
        }
    }
}

/// A fully populated measurement set. Every field is positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMeasurements {
    pub height: f64,
    pub bust: f64,
    pub waist: f64,
    pub hips: f64,
    pub shoulder_width: f64,
    pub arm_length: f64,
    pub leg_length: f64,
    pub inseam: f64,
}

impl ResolvedMeasurements {
    /// bust / waist, or 0.0 when waist is not positive.
    pub fn bust_to_waist(&self) -> f64 {
        safe_ratio(self.bust, self.waist)
    }

    /// waist / hips, or 0.0 when hips is not positive.
    pub fn waist_to_hips(&self) -> f64 {
        safe_ratio(self.waist, self.hips)
    }

    /// bust / hips, or 0.0 when hips is not positive.
    pub fn bust_to_hips(&self) -> f64 {
        safe_ratio(self.bust, self.hips)
    }
}

impl Default for ResolvedMeasurements {
    fn default() -> Self {
        Measurements::default().resolve()
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let resolved = Measurements::default().resolve();
        assert_eq!(resolved.height, DEFAULT_HEIGHT);
        assert_eq!(resolved.bust, DEFAULT_BUST);
        assert_eq!(resolved.waist, DEFAULT_WAIST);
        assert_eq!(resolved.hips, DEFAULT_HIPS);
        assert_eq!(resolved.shoulder_width, DEFAULT_SHOULDER_WIDTH);
        assert_eq!(resolved.inseam, DEFAULT_INSEAM);
    }

    #[test]
    fn test_has_girths() {
        assert!(!Measurements::default().has_girths());
        assert!(!Measurements {
            height: Some(180.0),
            ..Default::default()
        }
        .has_girths());
        assert!(Measurements {
            waist: Some(70.0),
            ..Default::default()
        }
        .has_girths());
    }

    #[test]
    fn test_provided_fields_survive_resolution() {
        let m = Measurements {
            bust: Some(102.5),
            hips: Some(110.0),
            ..Default::default()
        };
        let resolved = m.resolve();
        assert_eq!(resolved.bust, 102.5);
        assert_eq!(resolved.hips, 110.0);
        assert_eq!(resolved.waist, DEFAULT_WAIST);
    }

    #[test]
    fn test_non_positive_values_fall_back_to_defaults() {
        let m = Measurements {
            height: Some(0.0),
            waist: Some(-3.0),
            ..Default::default()
        };
        let resolved = m.resolve();
        assert_eq!(resolved.height, DEFAULT_HEIGHT);
        assert_eq!(resolved.waist, DEFAULT_WAIST);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let m = Measurements {
            waist: Some(0.0),
            ..Default::default()
        };
        let err = m.validate().unwrap_err();
        assert!(matches!(err, TryOnError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let m = Measurements {
            bust: Some(f64::NAN),
            ..Default::default()
        };
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_ratios_guard_division_by_zero() {
        let resolved = ResolvedMeasurements {
            waist: -1.0,
            hips: 0.0,
            ..Default::default()
        };
        assert_eq!(resolved.bust_to_waist(), 0.0);
        assert_eq!(resolved.waist_to_hips(), 0.0);
        assert_eq!(resolved.bust_to_hips(), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let m = Measurements {
            height: Some(165.0),
            bust: Some(88.0),
            waist: Some(70.0),
            hips: Some(95.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&m).unwrap();
        let back: Measurements = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn test_missing_fields_not_serialized() {
        let json = serde_json::to_string(&Measurements::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
