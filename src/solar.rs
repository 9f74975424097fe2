use std::ops::Sub;
use std::str::FromStr;

use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY,
};
use crate::{ParseError, prelude::*};

/// A validated Gregorian (solar) calendar date.
///
/// Years run from 1 to [`MAX_YEAR`]. Day arithmetic goes through the Julian
/// day number, so differences and offsets are plain integer subtraction with
/// no time-of-day or timezone component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct SolarDate {
    year:  u16,
    month: u8,
    day:   u8,
}

impl SolarDate {
    /// Earliest representable date, 0001-01-01.
    pub const MIN: Self = Self {
        year:  1,
        month: 1,
        day:   1,
    };

    /// Latest representable date, 9999-12-31.
    pub const MAX: Self = Self {
        year:  MAX_YEAR,
        month: MAX_MONTH,
        day:   31,
    };

    /// Builds one of the crate's fixed anchor dates without validation.
    pub(crate) const fn from_anchor((year, month, day): (u16, u8, u8)) -> Self {
        Self { year, month, day }
    }

    /// Creates a date, rejecting anything the Gregorian calendar does not have
    /// (month 13, February 30th, year 0, ...).
    ///
    /// # Errors
    /// Returns the matching `ParseError` variant for the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        if year == 0 || year > MAX_YEAR {
            return Err(ParseError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ParseError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns `(year, month, day)`.
    pub const fn ymd(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Julian day number of the date.
    pub fn jdn(&self) -> i32 {
        let (y, m, d) = (
            i32::from(self.year),
            i32::from(self.month),
            i32::from(self.day),
        );
        (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
            - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
            + d
            - 32075
    }

    /// Creates a date from a Julian day number.
    ///
    /// Returns `None` if the result falls outside years `1..=MAX_YEAR`.
    pub fn from_jdn(jdn: i32) -> Option<Self> {
        let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

        let year = u16::try_from(year).ok()?;
        let month = u8::try_from(month).ok()?;
        let day = u8::try_from(day).ok()?;
        Self::new(year, month, day).ok()
    }

    /// Day of week in ISO-8601 numbering: `1..=7` for Monday through Sunday.
    pub fn day_of_week(&self) -> u8 {
        // rem_euclid(7) is always in 0..7
        u8::try_from(self.jdn().rem_euclid(7)).unwrap_or_default() + 1
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.day_of_week() >= 6
    }

    /// Moves the date by `days` (negative moves backwards).
    ///
    /// Returns `None` if the result leaves the representable range.
    pub fn checked_add_days(&self, days: i32) -> Option<Self> {
        Self::from_jdn(self.jdn().checked_add(days)?)
    }

    /// The following day, if representable.
    pub fn succ(&self) -> Option<Self> {
        self.checked_add_days(1)
    }

    /// The preceding day, if representable.
    pub fn pred(&self) -> Option<Self> {
        self.checked_add_days(-1)
    }

    /// Whole days from `self` to `other`; negative if `other` is earlier.
    pub fn days_until(&self, other: Self) -> i32 {
        other.jdn() - self.jdn()
    }
}

impl Sub for SolarDate {
    type Output = i32;

    fn sub(self, rhs: Self) -> Self::Output {
        self.jdn() - rhs.jdn()
    }
}

/// Number of days from `from` to `to`.
///
/// Both dates are taken at day granularity, so the result is exact and
/// independent of any clock or timezone.
pub fn days_between(from: SolarDate, to: SolarDate) -> i32 {
    from.days_until(to)
}

impl FromStr for SolarDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD`; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {trimmed}"
            )));
        };

        let year = year
            .parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat((*year).to_owned()))?;
        let month = month
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat((*month).to_owned()))?;
        let day = day
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat((*day).to_owned()))?;

        Self::new(year, month, day)
    }
}

impl TryFrom<(u16, u8, u8)> for SolarDate {
    type Error = ParseError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl serde::Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> SolarDate {
        SolarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_new_valid() {
        assert!(SolarDate::new(1, 1, 1).is_ok());
        assert!(SolarDate::new(2024, 2, 29).is_ok());
        assert!(SolarDate::new(9999, 12, 31).is_ok());
    }

    #[test]
    fn test_new_invalid() {
        assert!(matches!(
            SolarDate::new(0, 1, 1),
            Err(ParseError::InvalidYear(0))
        ));
        assert!(matches!(
            SolarDate::new(10000, 1, 1),
            Err(ParseError::InvalidYear(10000))
        ));
        assert!(matches!(
            SolarDate::new(2024, 13, 1),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            SolarDate::new(2023, 2, 29),
            Err(ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        ));
        assert!(matches!(
            SolarDate::new(2024, 2, 31),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            SolarDate::new(2024, 1, 0),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_anchors_are_valid() {
        use crate::consts::{DAY_CYCLE_EPOCH, LUNAR_EPOCH};

        for anchor in [LUNAR_EPOCH, DAY_CYCLE_EPOCH] {
            assert_eq!(
                SolarDate::from_anchor(anchor),
                SolarDate::try_from(anchor).unwrap()
            );
        }
        assert_eq!(SolarDate::MIN, date(1, 1, 1));
        assert_eq!(SolarDate::MAX, date(9999, 12, 31));
    }

    #[test]
    fn test_jdn() {
        assert_eq!(date(1970, 1, 1).jdn(), 2_440_588);
        assert_eq!(date(2000, 1, 1).jdn(), 2_451_545);
        assert_eq!(date(2021, 9, 8).jdn(), 2_459_466);
    }

    #[test]
    fn test_from_jdn() {
        assert_eq!(SolarDate::from_jdn(2_440_588), Some(date(1970, 1, 1)));
        assert_eq!(SolarDate::from_jdn(2_451_545), Some(date(2000, 1, 1)));
        assert_eq!(SolarDate::from_jdn(2_459_466), Some(date(2021, 9, 8)));
        assert_eq!(
            SolarDate::from_jdn(date(9999, 12, 31).jdn() + 1),
            None,
            "year 10000 is not representable"
        );
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(date(1970, 1, 1).day_of_week(), 4); // Thursday
        assert_eq!(date(2000, 1, 1).day_of_week(), 6); // Saturday
        assert_eq!(date(2021, 9, 8).day_of_week(), 3); // Wednesday
        assert!(date(2025, 10, 5).is_weekend());
        assert!(!date(2025, 10, 6).is_weekend());
    }

    #[test]
    fn test_checked_add_days() {
        assert_eq!(date(2020, 2, 28).checked_add_days(1), Some(date(2020, 2, 29)));
        assert_eq!(date(2021, 2, 28).checked_add_days(1), Some(date(2021, 3, 1)));
        assert_eq!(date(2021, 12, 31).succ(), Some(date(2022, 1, 1)));
        assert_eq!(date(2022, 1, 1).pred(), Some(date(2021, 12, 31)));
        assert_eq!(date(1900, 1, 31).checked_add_days(384), Some(date(1901, 2, 19)));
        assert_eq!(date(9999, 12, 31).succ(), None);
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2025, 1, 1)), 366);
        assert_eq!(days_between(date(2025, 1, 1), date(2024, 1, 1)), -366);
        assert_eq!(days_between(date(1900, 1, 1), date(2000, 1, 1)), 36_524);
        assert_eq!(date(2000, 3, 1) - date(2000, 2, 1), 29);
        assert_eq!(date(1900, 3, 1) - date(1900, 2, 1), 28);
    }

    #[test]
    fn test_parse() {
        assert_eq!("2025-10-06".parse::<SolarDate>().unwrap(), date(2025, 10, 6));
        assert_eq!(" 2025-1-6 ".parse::<SolarDate>().unwrap(), date(2025, 1, 6));
        assert!(matches!(
            "".parse::<SolarDate>(),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(
            "2025-10".parse::<SolarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2025-XX-01".parse::<SolarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2025-02-30".parse::<SolarDate>(),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(date(1901, 2, 19).to_string(), "1901-02-19");
        assert_eq!(date(33, 1, 5).to_string(), "0033-01-05");
    }

    #[test]
    fn test_ordering() {
        assert!(date(2024, 12, 31) < date(2025, 1, 1));
        assert!(date(2025, 1, 31) < date(2025, 2, 1));
        assert!(date(2025, 2, 1) < date(2025, 2, 2));
    }

    #[test]
    fn test_serde() {
        let d = date(2017, 7, 23);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""2017-07-23""#);
        let parsed: SolarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);

        let result: Result<SolarDate, _> = serde_json::from_str(r#""2023-02-29""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        for (year, expected) in [
            (2020, true),
            (2021, false),
            (1900, false),
            (2100, false),
            (2000, true),
            (2400, true),
        ] {
            assert_eq!(is_leap_year(year), expected, "year {year}");
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28, "Century year not divisible by 400");
    }
}
