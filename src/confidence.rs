//! Forecast confidence by prediction horizon.

use chrono::{Datelike, NaiveDate};

/// Confidence percentage for a forecast of `target_year`/`target_month`
/// made on `today`. Past or current months score highest.
///
/// | months ahead | confidence |
/// |--------------|------------|
/// | <= 0         | 95         |
/// | <= 3         | 90         |
/// | <= 6         | 82         |
/// | <= 12        | 72         |
/// | <= 24        | 60         |
/// | <= 36        | 48         |
/// | > 36         | 35         |
pub fn confidence_level(target_year: i32, target_month: u32, today: NaiveDate) -> u8 {
    let months_ahead = (i64::from(target_year) - i64::from(today.year())) * 12
        + i64::from(target_month)
        - i64::from(today.month());

    match months_ahead {
        m if m <= 0 => 95,
        m if m <= 3 => 90,
        m if m <= 6 => 82,
        m if m <= 12 => 72,
        m if m <= 24 => 60,
        m if m <= 36 => 48,
        _ => 35,
    }
}

pub fn confidence_label(level: u8) -> &'static str {
    match level {
        l if l >= 85 => "High",
        l if l >= 65 => "Moderate",
        l if l >= 45 => "Low",
        _ => "Very Low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_confidence_by_horizon() {
        assert_eq!(confidence_level(2024, 1, today()), 95);
        assert_eq!(confidence_level(2025, 6, today()), 95);
        assert_eq!(confidence_level(2025, 9, today()), 90);
        assert_eq!(confidence_level(2025, 12, today()), 82);
        assert_eq!(confidence_level(2026, 6, today()), 72);
        assert_eq!(confidence_level(2027, 6, today()), 60);
        assert_eq!(confidence_level(2028, 6, today()), 48);
        assert_eq!(confidence_level(2028, 7, today()), 35);
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(confidence_label(95), "High");
        assert_eq!(confidence_label(85), "High");
        assert_eq!(confidence_label(82), "Moderate");
        assert_eq!(confidence_label(48), "Low");
        assert_eq!(confidence_label(35), "Very Low");
    }
}
