//! Korean public holidays.
//!
//! A date is looked up in three places, first match wins: the listed dates
//! (including one-off substitute holidays), the fixed solar national days, and
//! the lunar festivals resolved through a [`LunarCalendar`].

use log::trace;
use serde::Serialize;

use crate::lunar::LunarCalendar;
use crate::prelude::*;
use crate::solar::{SolarDate, days_in_month};

/// Where a holiday came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// Listed for a specific date
    Listed,
    /// Same solar date every year
    Solar,
    /// Same lunar date every year
    Lunar,
}

/// A named public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[display(fmt = "{name}")]
pub struct Holiday {
    pub name: &'static str,
    pub kind: HolidayKind,
}

#[rustfmt::skip]
const LISTED: &[((u16, u8, u8), &str)] = &[
    ((2025, 1, 1),   "신정"),
    ((2025, 1, 28),  "설날"),
    ((2025, 1, 29),  "설날"),
    ((2025, 1, 30),  "설날"),
    ((2025, 3, 1),   "삼일절"),
    ((2025, 3, 3),   "대체공휴일"),
    ((2025, 5, 5),   "어린이날"),
    ((2025, 5, 6),   "석가탄신일"),
    ((2025, 6, 6),   "현충일"),
    ((2025, 8, 15),  "광복절"),
    ((2025, 10, 3),  "개천절"),
    ((2025, 10, 5),  "추석"),
    ((2025, 10, 6),  "추석"),
    ((2025, 10, 7),  "추석"),
    ((2025, 10, 8),  "대체공휴일"),
    ((2025, 10, 9),  "한글날"),
    ((2025, 12, 25), "크리스마스"),
];

/// (month, day, name) on the solar calendar
#[rustfmt::skip]
const SOLAR_FIXED: &[(u8, u8, &str)] = &[
    (1, 1,   "신정"),
    (3, 1,   "삼일절"),
    (5, 5,   "어린이날"),
    (6, 6,   "현충일"),
    (8, 15,  "광복절"),
    (10, 3,  "개천절"),
    (10, 9,  "한글날"),
    (12, 25, "크리스마스"),
];

/// (month, day, name) on the lunar calendar, regular months only
#[rustfmt::skip]
const LUNAR_FIXED: &[(u8, u8, &str)] = &[
    (1, 1,  "설날"),
    (1, 2,  "설날"),
    (4, 8,  "석가탄신일"),
    (8, 14, "추석"),
    (8, 15, "추석"),
    (8, 16, "추석"),
];

/// Name of the lunar new year, also given to the last day of the lunar year
const LUNAR_NEW_YEAR: &str = "설날";

/// Holiday lookup backed by a lunar calendar.
#[derive(Debug, Clone, Copy)]
pub struct HolidayCalendar<'t> {
    lunar: LunarCalendar<'t>,
}

impl<'t> HolidayCalendar<'t> {
    pub const fn new(lunar: LunarCalendar<'t>) -> Self {
        Self { lunar }
    }

    /// The holiday falling on `date`, if any.
    ///
    /// Lunar festivals are only found inside the lunar calendar's range.
    pub fn holiday(&self, date: SolarDate) -> Option<Holiday> {
        Self::listed(date)
            .or_else(|| Self::solar_fixed(date))
            .or_else(|| self.lunar_fixed(date))
    }

    /// Whether `date` is a named public holiday.
    pub fn is_holiday(&self, date: SolarDate) -> bool {
        self.holiday(date).is_some()
    }

    /// Whether `date` is a holiday or falls on a weekend.
    pub fn is_day_off(&self, date: SolarDate) -> bool {
        date.is_weekend() || self.is_holiday(date)
    }

    /// All holidays of a solar month in date order; empty for an invalid month.
    pub fn holidays_in_month(&self, year: u16, month: u8) -> Vec<(SolarDate, Holiday)> {
        if SolarDate::new(year, month, 1).is_err() {
            return Vec::new();
        }
        (1..=days_in_month(year, month))
            .filter_map(|day| SolarDate::new(year, month, day).ok())
            .filter_map(|date| self.holiday(date).map(|holiday| (date, holiday)))
            .inspect(|(date, holiday)| trace!("{date} is {holiday}"))
            .collect()
    }

    fn listed(date: SolarDate) -> Option<Holiday> {
        LISTED
            .iter()
            .find(|(ymd, _)| *ymd == date.ymd())
            .map(|&(_, name)| Holiday {
                name,
                kind: HolidayKind::Listed,
            })
    }

    fn solar_fixed(date: SolarDate) -> Option<Holiday> {
        SOLAR_FIXED
            .iter()
            .find(|&&(month, day, _)| (month, day) == (date.month(), date.day()))
            .map(|&(_, _, name)| Holiday {
                name,
                kind: HolidayKind::Solar,
            })
    }

    fn lunar_fixed(&self, date: SolarDate) -> Option<Holiday> {
        let lunar = self.lunar.to_lunar(date).ok()?;
        if lunar.is_leap_month() {
            return None;
        }

        let festival = LUNAR_FIXED
            .iter()
            .find(|&&(month, day, _)| (month, day) == (lunar.month(), lunar.day()))
            .map(|&(_, _, name)| name);
        let new_years_eve = || {
            let next = self.lunar.to_lunar(date.succ()?).ok()?;
            (next.month() == 1 && next.day() == 1 && !next.is_leap_month())
                .then_some(LUNAR_NEW_YEAR)
        };

        festival.or_else(new_years_eve).map(|name| Holiday {
            name,
            kind: HolidayKind::Lunar,
        })
    }
}

impl Default for HolidayCalendar<'static> {
    fn default() -> Self {
        Self::new(LunarCalendar::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(y: u16, m: u8, d: u8) -> SolarDate {
        SolarDate::new(y, m, d).unwrap()
    }

    fn lookup(y: u16, m: u8, d: u8) -> Option<(&'static str, HolidayKind)> {
        HolidayCalendar::default()
            .holiday(solar(y, m, d))
            .map(|h| (h.name, h.kind))
    }

    #[test]
    fn test_listed_dates() {
        assert_eq!(lookup(2025, 1, 1), Some(("신정", HolidayKind::Listed)));
        assert_eq!(lookup(2025, 3, 3), Some(("대체공휴일", HolidayKind::Listed)));
        assert_eq!(lookup(2025, 10, 8), Some(("대체공휴일", HolidayKind::Listed)));
    }

    #[test]
    fn test_solar_fixed() {
        assert_eq!(lookup(2024, 1, 1), Some(("신정", HolidayKind::Solar)));
        assert_eq!(lookup(2024, 3, 1), Some(("삼일절", HolidayKind::Solar)));
        assert_eq!(lookup(2030, 10, 9), Some(("한글날", HolidayKind::Solar)));
        assert_eq!(lookup(1850, 12, 25), Some(("크리스마스", HolidayKind::Solar)));
    }

    #[test]
    fn test_lunar_new_year() {
        assert_eq!(lookup(2024, 2, 9), Some(("설날", HolidayKind::Lunar)));
        assert_eq!(lookup(2024, 2, 10), Some(("설날", HolidayKind::Lunar)));
        assert_eq!(lookup(2024, 2, 11), Some(("설날", HolidayKind::Lunar)));
        assert_eq!(lookup(2024, 2, 8), None);
        assert_eq!(lookup(2024, 2, 12), None);
    }

    #[test]
    fn test_chuseok_and_buddha() {
        assert_eq!(lookup(2024, 9, 16), Some(("추석", HolidayKind::Lunar)));
        assert_eq!(lookup(2024, 9, 17), Some(("추석", HolidayKind::Lunar)));
        assert_eq!(lookup(2024, 9, 18), Some(("추석", HolidayKind::Lunar)));
        assert_eq!(lookup(2024, 5, 15), Some(("석가탄신일", HolidayKind::Lunar)));
        assert_eq!(lookup(2020, 4, 30), Some(("석가탄신일", HolidayKind::Lunar)));
    }

    #[test]
    fn test_leap_month_is_not_a_festival() {
        // 2020-05-30 is leap 4/8
        let cal = HolidayCalendar::default();
        assert_eq!(cal.holiday(solar(2020, 5, 30)), None);
        assert!(cal.is_day_off(solar(2020, 5, 30)), "a Saturday");
    }

    #[test]
    fn test_outside_lunar_range() {
        assert_eq!(lookup(1850, 2, 1), None);
        assert_eq!(lookup(2200, 9, 20), None);
    }

    #[test]
    fn test_day_off() {
        let cal = HolidayCalendar::default();
        assert!(cal.is_day_off(solar(2024, 6, 8)));
        assert!(!cal.is_holiday(solar(2024, 6, 8)));
        assert!(cal.is_day_off(solar(2024, 6, 6)));
        assert!(!cal.is_day_off(solar(2024, 6, 5)));
    }

    #[test]
    fn test_holidays_in_month() {
        let cal = HolidayCalendar::default();
        let october: Vec<(String, &str)> = cal
            .holidays_in_month(2025, 10)
            .into_iter()
            .map(|(date, h)| (date.to_string(), h.name))
            .collect();
        assert_eq!(
            october,
            vec![
                ("2025-10-03".to_owned(), "개천절"),
                ("2025-10-05".to_owned(), "추석"),
                ("2025-10-06".to_owned(), "추석"),
                ("2025-10-07".to_owned(), "추석"),
                ("2025-10-08".to_owned(), "대체공휴일"),
                ("2025-10-09".to_owned(), "한글날"),
            ]
        );
        assert!(cal.holidays_in_month(2025, 13).is_empty());
    }

    #[test]
    fn test_serialize() {
        let holiday = HolidayCalendar::default()
            .holiday(solar(2024, 9, 17))
            .unwrap();
        assert_eq!(holiday.to_string(), "추석");
        assert_eq!(
            serde_json::to_value(holiday).unwrap(),
            serde_json::json!({"name": "추석", "kind": "lunar"})
        );
    }
}
