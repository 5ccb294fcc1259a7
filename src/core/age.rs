//! Age bands and age-range text parsing.
//!
//! The twelve bands are rolling windows and overlap. Lookups by age in years
//! walk [`BAND_ORDER`] and take the first window that contains the age, so an
//! age of 2.5 lands in "18 months to 3 years" and never in "2 to 5 years".

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical developmental age band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "newborn-18m")]
    Newborn,
    #[serde(rename = "18m-3y")]
    EighteenMonthsToThree,
    #[serde(rename = "2-5y")]
    TwoToFive,
    #[serde(rename = "3-6y")]
    ThreeToSix,
    #[serde(rename = "4-7y")]
    FourToSeven,
    #[serde(rename = "5-8y")]
    FiveToEight,
    #[serde(rename = "6-9y")]
    SixToNine,
    #[serde(rename = "7-10y")]
    SevenToTen,
    #[serde(rename = "8-11y")]
    EightToEleven,
    #[serde(rename = "9-12y")]
    NineToTwelve,
    #[serde(rename = "10-early-teens")]
    TenToEarlyTeens,
    #[serde(rename = "preteens-older-teens")]
    PreteensToOlderTeens,
}

/// Half-open `[low, high)` windows in check order. First match wins.
const BAND_ORDER: [(f64, f64, AgeBand); 12] = [
    (0.0, 1.5, AgeBand::Newborn),
    (1.5, 3.0, AgeBand::EighteenMonthsToThree),
    (2.0, 5.0, AgeBand::TwoToFive),
    (3.0, 6.0, AgeBand::ThreeToSix),
    (4.0, 7.0, AgeBand::FourToSeven),
    (5.0, 8.0, AgeBand::FiveToEight),
    (6.0, 9.0, AgeBand::SixToNine),
    (7.0, 10.0, AgeBand::SevenToTen),
    (8.0, 11.0, AgeBand::EightToEleven),
    (9.0, 12.0, AgeBand::NineToTwelve),
    (10.0, 13.0, AgeBand::TenToEarlyTeens),
    (12.0, f64::INFINITY, AgeBand::PreteensToOlderTeens),
];

/// Upper month thresholds for birthday-derived bands (exclusive)
const MONTH_THRESHOLDS: [(u32, AgeBand); 11] = [
    (18, AgeBand::Newborn),
    (36, AgeBand::EighteenMonthsToThree),
    (60, AgeBand::TwoToFive),
    (72, AgeBand::ThreeToSix),
    (84, AgeBand::FourToSeven),
    (96, AgeBand::FiveToEight),
    (108, AgeBand::SixToNine),
    (120, AgeBand::SevenToTen),
    (132, AgeBand::EightToEleven),
    (144, AgeBand::NineToTwelve),
    (156, AgeBand::TenToEarlyTeens),
];

impl AgeBand {
    pub const ALL: [AgeBand; 12] = [
        AgeBand::Newborn,
        AgeBand::EighteenMonthsToThree,
        AgeBand::TwoToFive,
        AgeBand::ThreeToSix,
        AgeBand::FourToSeven,
        AgeBand::FiveToEight,
        AgeBand::SixToNine,
        AgeBand::SevenToTen,
        AgeBand::EightToEleven,
        AgeBand::NineToTwelve,
        AgeBand::TenToEarlyTeens,
        AgeBand::PreteensToOlderTeens,
    ];

    /// Display label shared with the shop filters
    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Newborn => "Newborn to 18 months",
            AgeBand::EighteenMonthsToThree => "18 months to 3 years",
            AgeBand::TwoToFive => "2 to 5 years",
            AgeBand::ThreeToSix => "3 to 6 years",
            AgeBand::FourToSeven => "4 to 7 years",
            AgeBand::FiveToEight => "5 to 8 years",
            AgeBand::SixToNine => "6 to 9 years",
            AgeBand::SevenToTen => "7 to 10 years",
            AgeBand::EightToEleven => "8 to 11 years",
            AgeBand::NineToTwelve => "9 to 12 years",
            AgeBand::TenToEarlyTeens => "10 to Early Teens",
            AgeBand::PreteensToOlderTeens => "Preteens to Older Teens",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AgeBand::Newborn => "newborn-18m",
            AgeBand::EighteenMonthsToThree => "18m-3y",
            AgeBand::TwoToFive => "2-5y",
            AgeBand::ThreeToSix => "3-6y",
            AgeBand::FourToSeven => "4-7y",
            AgeBand::FiveToEight => "5-8y",
            AgeBand::SixToNine => "6-9y",
            AgeBand::SevenToTen => "7-10y",
            AgeBand::EightToEleven => "8-11y",
            AgeBand::NineToTwelve => "9-12y",
            AgeBand::TenToEarlyTeens => "10-early-teens",
            AgeBand::PreteensToOlderTeens => "preteens-older-teens",
        }
    }

    /// Map an age in years to a band. Negative or NaN ages have no band.
    pub fn from_years(age: f64) -> Option<AgeBand> {
        BAND_ORDER
            .iter()
            .find(|(low, high, _)| age >= *low && age < *high)
            .map(|(_, _, band)| *band)
    }

    /// Band for an exact age in months (non-overlapping thresholds)
    pub fn from_months(total_months: u32) -> AgeBand {
        MONTH_THRESHOLDS
            .iter()
            .find(|(limit, _)| total_months < *limit)
            .map(|(_, band)| *band)
            .unwrap_or(AgeBand::PreteensToOlderTeens)
    }
}

/// Age split into whole years and remaining months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildAge {
    pub years: i32,
    pub months: i32,
    pub total_months: u32,
}

/// Calendar-month age. Day of month is ignored; future birthdays clamp to 0.
pub fn age_from_birthday(birthday: NaiveDate, today: NaiveDate) -> ChildAge {
    let mut years = today.year() - birthday.year();
    let mut months = today.month() as i32 - birthday.month() as i32;

    if months < 0 {
        years -= 1;
        months += 12;
    }

    let total = years * 12 + months;

    ChildAge {
        years,
        months,
        total_months: total.max(0) as u32,
    }
}

/// Inclusive age span of a product, in years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBounds {
    #[serde(rename = "ageMin")]
    pub age_min: f64,
    #[serde(rename = "ageMax")]
    pub age_max: f64,
}

static AGE_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+\.?[0-9]*)\s*(m|months?|y|years?)?").expect("age value regex")
});

impl AgeBounds {
    /// Fallback for the scorers when a product has no age range
    pub const ALL_AGES: AgeBounds = AgeBounds { age_min: 0.0, age_max: 99.0 };

    /// Fallback for the shop age-fit facet when a product has no age range
    pub const SHOP_DEFAULT: AgeBounds = AgeBounds { age_min: 0.0, age_max: 24.0 };

    pub fn new(age_min: f64, age_max: f64) -> Self {
        Self { age_min, age_max }
    }

    /// Parse free text such as `"4-7 years"`, `"6 months"` or `"18m – 3y"`.
    ///
    /// Missing or blank text yields `default`. A side with no number reads as 0.
    pub fn parse_or(text: Option<&str>, default: AgeBounds) -> AgeBounds {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return default,
        };

        let parts: Vec<&str> = text.split(['-', '\u{2013}', '\u{2014}']).collect();

        if parts.len() == 2 {
            return AgeBounds {
                age_min: parse_age_value(parts[0].trim()),
                age_max: parse_age_value(parts[1].trim()),
            };
        }

        let single = parse_age_value(text);
        AgeBounds {
            age_min: single,
            age_max: single,
        }
    }

    #[inline]
    pub fn contains(&self, age_years: f64) -> bool {
        age_years >= self.age_min && age_years <= self.age_max
    }
}

fn parse_age_value(value: &str) -> f64 {
    let Some(caps) = AGE_VALUE.captures(value) else {
        return 0.0;
    };

    let n: f64 = caps[1].parse().unwrap_or(0.0);
    match caps.get(2) {
        // unit letter is case-insensitive: "6 Months" is half a year
        Some(unit) if unit.as_str().starts_with(['m', 'M']) => n / 12.0,
        _ => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(AgeBand::from_years(0.0), Some(AgeBand::Newborn));
        assert_eq!(AgeBand::from_years(1.49), Some(AgeBand::Newborn));
        assert_eq!(AgeBand::from_years(1.5), Some(AgeBand::EighteenMonthsToThree));
        assert_eq!(AgeBand::from_years(12.0), Some(AgeBand::TenToEarlyTeens));
        assert_eq!(AgeBand::from_years(13.0), Some(AgeBand::PreteensToOlderTeens));
        assert_eq!(AgeBand::from_years(40.0), Some(AgeBand::PreteensToOlderTeens));
    }

    #[test]
    fn test_overlapping_windows_take_first() {
        // 2.x is inside both 18m-3y and 2-5y
        assert_eq!(AgeBand::from_years(2.0), Some(AgeBand::EighteenMonthsToThree));
        assert_eq!(AgeBand::from_years(2.99), Some(AgeBand::EighteenMonthsToThree));
        assert_eq!(AgeBand::from_years(3.0), Some(AgeBand::TwoToFive));
        assert_eq!(AgeBand::from_years(7.0), Some(AgeBand::FiveToEight));
        assert_eq!(AgeBand::from_years(10.0), Some(AgeBand::EightToEleven));
    }

    #[test]
    fn test_no_band_for_invalid_age() {
        assert_eq!(AgeBand::from_years(-1.0), None);
        assert_eq!(AgeBand::from_years(f64::NAN), None);
    }

    #[test]
    fn test_from_months_thresholds() {
        assert_eq!(AgeBand::from_months(0), AgeBand::Newborn);
        assert_eq!(AgeBand::from_months(17), AgeBand::Newborn);
        assert_eq!(AgeBand::from_months(18), AgeBand::EighteenMonthsToThree);
        assert_eq!(AgeBand::from_months(155), AgeBand::TenToEarlyTeens);
        assert_eq!(AgeBand::from_months(156), AgeBand::PreteensToOlderTeens);
    }

    #[test]
    fn test_labels_and_slugs_are_unique() {
        let labels: std::collections::HashSet<_> = AgeBand::ALL.iter().map(|b| b.label()).collect();
        let slugs: std::collections::HashSet<_> = AgeBand::ALL.iter().map(|b| b.slug()).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(slugs.len(), 12);

        let json = serde_json::to_string(&AgeBand::TenToEarlyTeens).unwrap();
        assert_eq!(json, "\"10-early-teens\"");
        assert_eq!(AgeBand::TenToEarlyTeens.slug(), "10-early-teens");
    }

    #[test]
    fn test_age_from_birthday() {
        let birthday = NaiveDate::from_ymd_opt(2019, 11, 20).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let age = age_from_birthday(birthday, today);

        assert_eq!(age.years, 4);
        assert_eq!(age.months, 3);
        assert_eq!(age.total_months, 51);
    }

    #[test]
    fn test_future_birthday_clamps() {
        let birthday = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(age_from_birthday(birthday, today).total_months, 0);
    }

    #[test]
    fn test_parse_year_range() {
        let bounds = AgeBounds::parse_or(Some("4-7 years"), AgeBounds::ALL_AGES);
        assert_eq!(bounds, AgeBounds::new(4.0, 7.0));
    }

    #[test]
    fn test_parse_months() {
        let bounds = AgeBounds::parse_or(Some("6 months"), AgeBounds::ALL_AGES);
        assert_eq!(bounds, AgeBounds::new(0.5, 0.5));

        let mixed = AgeBounds::parse_or(Some("18m \u{2013} 3y"), AgeBounds::ALL_AGES);
        assert_eq!(mixed, AgeBounds::new(1.5, 3.0));
    }

    #[test]
    fn test_parse_month_unit_any_case() {
        assert_eq!(AgeBounds::parse_or(Some("6 Months"), AgeBounds::ALL_AGES), AgeBounds::new(0.5, 0.5));
        assert_eq!(AgeBounds::parse_or(Some("12M-2Y"), AgeBounds::ALL_AGES), AgeBounds::new(1.0, 2.0));
    }

    #[test]
    fn test_parse_missing_uses_call_site_default() {
        assert_eq!(AgeBounds::parse_or(None, AgeBounds::ALL_AGES), AgeBounds::new(0.0, 99.0));
        assert_eq!(AgeBounds::parse_or(Some(""), AgeBounds::SHOP_DEFAULT), AgeBounds::new(0.0, 24.0));
    }

    #[test]
    fn test_parse_garbage_reads_zero() {
        let bounds = AgeBounds::parse_or(Some("all ages"), AgeBounds::ALL_AGES);
        assert_eq!(bounds, AgeBounds::new(0.0, 0.0));

        let open = AgeBounds::parse_or(Some("3+ years"), AgeBounds::ALL_AGES);
        assert_eq!(open, AgeBounds::new(3.0, 3.0));
    }

    #[test]
    fn test_bounds_inclusive() {
        let bounds = AgeBounds::new(4.0, 7.0);
        assert!(bounds.contains(4.0));
        assert!(bounds.contains(7.0));
        assert!(!bounds.contains(7.5));
    }
}
