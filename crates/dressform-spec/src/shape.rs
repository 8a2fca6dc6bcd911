//! Body-shape taxonomy, the canonical classification rule, and the
//! per-shape scale factor table used by silhouette and warp geometry.
//!
//! Exactly one classification rule exists in this codebase. The classifier
//! fallback, the silhouette generator, and every test fixture all route
//! through [`classify_proportions`].

use serde::{Deserialize, Serialize};

/// Coarse categorical descriptor of torso proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyShape {
    Hourglass,
    Apple,
    Pear,
    Rectangle,
}

impl BodyShape {
    /// All shapes, in a stable order.
    pub const ALL: [BodyShape; 4] = [
        BodyShape::Hourglass,
        BodyShape::Apple,
        BodyShape::Pear,
        BodyShape::Rectangle,
    ];

    /// Lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyShape::Hourglass => "hourglass",
            BodyShape::Apple => "apple",
            BodyShape::Pear => "pear",
            BodyShape::Rectangle => "rectangle",
        }
    }

    /// Parse a lowercase label.
    pub fn parse(label: &str) -> Option<BodyShape> {
        match label {
            "hourglass" => Some(BodyShape::Hourglass),
            "apple" => Some(BodyShape::Apple),
            "pear" => Some(BodyShape::Pear),
            "rectangle" => Some(BodyShape::Rectangle),
            _ => None,
        }
    }

    /// Per-shape geometry factors.
    pub fn factors(&self) -> ShapeFactors {
        ShapeFactors::for_shape(*self)
    }
}

impl std::fmt::Display for BodyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical body-shape rule.
///
/// - hourglass when bust and hips are within 5 cm of each other and both
///   stand at least 15 cm proud of the waist
/// - apple when bust/hips > 1.05
/// - pear when bust/hips < 0.95
/// - rectangle otherwise (including degenerate inputs: a non-positive
///   hips makes the ratio 0.0, which lands in the pear branch only when
///   bust is also meaningless, so callers should resolve defaults first)
pub fn classify_proportions(bust: f64, waist: f64, hips: f64) -> BodyShape {
    if (bust - hips).abs() <= 5.0 && (bust - waist) >= 15.0 && (hips - waist) >= 15.0 {
        return BodyShape::Hourglass;
    }

    let bust_to_hips = if hips > 0.0 { bust / hips } else { 0.0 };
    if bust_to_hips > 1.05 {
        BodyShape::Apple
    } else if bust_to_hips < 0.95 && bust_to_hips > 0.0 {
        BodyShape::Pear
    } else {
        BodyShape::Rectangle
    }
}

/// Size band from the bust measurement.
pub fn size_for_bust(bust: f64) -> &'static str {
    if bust < 82.0 {
        "XS"
    } else if bust < 87.0 {
        "S"
    } else if bust < 92.0 {
        "M"
    } else if bust < 97.0 {
        "L"
    } else if bust < 102.0 {
        "XL"
    } else {
        "XXL"
    }
}

/// Multiplicative factors applied to base widths and the vertical waist
/// position when deriving body segments for a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFactors {
    pub shoulder: f64,
    pub bust: f64,
    pub waist: f64,
    pub hips: f64,
    /// Scales the bust-to-waist vertical distance (apple carries a higher
    /// waist, pear a lower one).
    pub waist_y: f64,
    pub arm_width: f64,
    pub leg_width: f64,
    pub thigh: f64,
}

impl ShapeFactors {
    pub const fn for_shape(shape: BodyShape) -> ShapeFactors {
        match shape {
            BodyShape::Hourglass => ShapeFactors {
                shoulder: 1.05,
                bust: 1.0,
                waist: 0.95,
                hips: 1.0,
                waist_y: 1.0,
                arm_width: 1.0,
                leg_width: 1.0,
                thigh: 1.0,
            },
            BodyShape::Apple => ShapeFactors {
                shoulder: 1.1,
                bust: 1.15,
                waist: 1.1,
                hips: 0.95,
                waist_y: 0.9,
                arm_width: 1.1,
                leg_width: 0.95,
                thigh: 0.9,
            },
            BodyShape::Pear => ShapeFactors {
                shoulder: 0.95,
                bust: 0.9,
                waist: 0.95,
                hips: 1.1,
                waist_y: 1.05,
                arm_width: 0.9,
                leg_width: 1.1,
                thigh: 1.2,
            },
            BodyShape::Rectangle => ShapeFactors {
                shoulder: 1.0,
                bust: 1.0,
                waist: 1.05,
                hips: 1.0,
                waist_y: 1.0,
                arm_width: 1.0,
                leg_width: 1.0,
                thigh: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourglass_fixture() {
        // |92-94| = 2 <= 5, 92-65 = 27 >= 15, 94-65 = 29 >= 15
        assert_eq!(classify_proportions(92.0, 65.0, 94.0), BodyShape::Hourglass);
    }

    #[test]
    fn test_apple_fixture() {
        // 100/95 = 1.0526 > 1.05, hourglass rule fails on bust-waist = 10
        assert_eq!(classify_proportions(100.0, 90.0, 95.0), BodyShape::Apple);
    }

    #[test]
    fn test_pear() {
        assert_eq!(classify_proportions(85.0, 70.0, 100.0), BodyShape::Pear);
    }

    #[test]
    fn test_rectangle() {
        assert_eq!(classify_proportions(85.0, 75.0, 85.0), BodyShape::Rectangle);
    }

    #[test]
    fn test_always_one_of_four_labels() {
        for bust in [60.0, 80.0, 90.0, 110.0, 140.0] {
            for waist in [50.0, 70.0, 90.0, 120.0] {
                for hips in [60.0, 85.0, 100.0, 130.0] {
                    let shape = classify_proportions(bust, waist, hips);
                    assert!(BodyShape::ALL.contains(&shape));
                }
            }
        }
    }

    #[test]
    fn test_growing_hips_never_moves_toward_apple() {
        // With bust and waist fixed, increasing hips only lowers bust/hips,
        // so the classification can only move through the ordering
        // apple -> rectangle/hourglass -> pear, never backwards.
        let bust = 95.0;
        let waist = 70.0;
        let mut seen_non_apple = false;
        for hips_step in 0..60 {
            let hips = 70.0 + hips_step as f64;
            let shape = classify_proportions(bust, waist, hips);
            if shape != BodyShape::Apple {
                seen_non_apple = true;
            }
            if seen_non_apple {
                assert_ne!(
                    shape,
                    BodyShape::Apple,
                    "classification flipped back to apple at hips={}",
                    hips
                );
            }
        }
    }

    #[test]
    fn test_degenerate_hips_is_not_a_crash() {
        // Ratio degrades to 0.0; the rule still returns a label.
        let shape = classify_proportions(90.0, 70.0, 0.0);
        assert!(BodyShape::ALL.contains(&shape));
    }

    #[test]
    fn test_size_bands() {
        assert_eq!(size_for_bust(80.0), "XS");
        assert_eq!(size_for_bust(85.0), "S");
        assert_eq!(size_for_bust(90.0), "M");
        assert_eq!(size_for_bust(95.0), "L");
        assert_eq!(size_for_bust(100.0), "XL");
        assert_eq!(size_for_bust(110.0), "XXL");
    }

    #[test]
    fn test_serde_labels_are_lowercase() {
        let json = serde_json::to_string(&BodyShape::Hourglass).unwrap();
        assert_eq!(json, "\"hourglass\"");
        let back: BodyShape = serde_json::from_str("\"pear\"").unwrap();
        assert_eq!(back, BodyShape::Pear);
    }

    #[test]
    fn test_parse_round_trip() {
        for shape in BodyShape::ALL {
            assert_eq!(BodyShape::parse(shape.as_str()), Some(shape));
        }
        assert_eq!(BodyShape::parse("triangle"), None);
    }
}
