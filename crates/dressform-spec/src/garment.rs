//! Garment type taxonomy.

use serde::{Deserialize, Serialize};

/// Vertical coverage class of a garment image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentType {
    /// Shoulders to below the hips (dresses, gowns).
    Full,
    /// Shoulders to the waist (shirts, blouses).
    Top,
    /// Waist to below the hips (skirts, trousers).
    Bottom,
}

impl GarmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentType::Full => "full",
            GarmentType::Top => "top",
            GarmentType::Bottom => "bottom",
        }
    }

    pub fn parse(label: &str) -> Option<GarmentType> {
        match label {
            "full" => Some(GarmentType::Full),
            "top" => Some(GarmentType::Top),
            "bottom" => Some(GarmentType::Bottom),
            _ => None,
        }
    }
}

impl std::fmt::Display for GarmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for ty in [GarmentType::Full, GarmentType::Top, GarmentType::Bottom] {
            assert_eq!(GarmentType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(GarmentType::parse("cape"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&GarmentType::Top).unwrap(), "\"top\"");
    }
}
