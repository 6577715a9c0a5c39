use serde::Serialize;
use std::fmt;

/// AQI severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Category {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Severe,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Satisfactory => "Satisfactory",
            Category::Moderate => "Moderate",
            Category::Poor => "Poor",
            Category::VeryPoor => "Very Poor",
            Category::Severe => "Severe",
        }
    }

    /// Inclusive upper AQI bound of the band; `Severe` is open-ended.
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            Category::Good => Some(50.0),
            Category::Satisfactory => Some(100.0),
            Category::Moderate => Some(200.0),
            Category::Poor => Some(300.0),
            Category::VeryPoor => Some(400.0),
            Category::Severe => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps an AQI value onto its severity band.
///
/// | AQI         | Category     |
/// |-------------|--------------|
/// | <= 50       | Good         |
/// | <= 100      | Satisfactory |
/// | <= 200      | Moderate     |
/// | <= 300      | Poor         |
/// | <= 400      | Very Poor    |
/// | > 400       | Severe       |
///
/// Bounds are inclusive, so 50.0 is Good. Negative values land in Good.
/// NaN fails every comparison and lands in Severe, as does +inf.
pub fn categorize(aqi: f64) -> Category {
    match aqi {
        a if a <= 50.0 => Category::Good,
        a if a <= 100.0 => Category::Satisfactory,
        a if a <= 200.0 => Category::Moderate,
        a if a <= 300.0 => Category::Poor,
        a if a <= 400.0 => Category::VeryPoor,
        _ => Category::Severe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(categorize(0.0), Category::Good);
        assert_eq!(categorize(49.99), Category::Good);
        assert_eq!(categorize(50.0), Category::Good);
        assert_eq!(categorize(50.01), Category::Satisfactory);
        assert_eq!(categorize(100.0), Category::Satisfactory);
        assert_eq!(categorize(100.01), Category::Moderate);
        assert_eq!(categorize(200.0), Category::Moderate);
        assert_eq!(categorize(200.01), Category::Poor);
        assert_eq!(categorize(300.0), Category::Poor);
        assert_eq!(categorize(300.01), Category::VeryPoor);
        assert_eq!(categorize(400.0), Category::VeryPoor);
        assert_eq!(categorize(400.01), Category::Severe);
        assert_eq!(categorize(999.0), Category::Severe);
    }

    #[test]
    fn test_monotonic() {
        let mut prev = categorize(-10.0);
        let mut aqi = -10.0;
        while aqi < 600.0 {
            let current = categorize(aqi);
            assert!(current >= prev, "category dropped at {aqi}");
            prev = current;
            aqi += 0.25;
        }
    }

    #[test]
    fn test_non_finite_and_negative() {
        assert_eq!(categorize(-5.0), Category::Good);
        assert_eq!(categorize(f64::NEG_INFINITY), Category::Good);
        assert_eq!(categorize(f64::INFINITY), Category::Severe);
        assert_eq!(categorize(f64::NAN), Category::Severe);
    }

    #[test]
    fn test_labels_serialize_as_display_text() {
        assert_eq!(Category::VeryPoor.to_string(), "Very Poor");
        assert_eq!(
            serde_json::to_string(&Category::VeryPoor).unwrap(),
            "\"Very Poor\""
        );
        assert_eq!(Category::Severe.upper_bound(), None);
        assert_eq!(Category::Good.upper_bound(), Some(50.0));
    }
}
