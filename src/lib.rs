//! Korean/Chinese lunisolar calendar conversion.
//!
//! Converts Gregorian dates into lunar year/month/day (with the leap month
//! flag) using the bit-packed almanac table for lunar years 1900 through
//! 2100, and computes the sexagenary (干支, 일진) designation of days and
//! years. Small helpers for day differences, Korean public holidays and
//! biorhythm values build on top of those.
//!
//! ```
//! use lunisolar::{LunarCalendar, SolarDate};
//!
//! let calendar = LunarCalendar::default();
//! let lunar = calendar.to_lunar("1901-02-19".parse::<SolarDate>().unwrap()).unwrap();
//! assert_eq!((lunar.year(), lunar.month(), lunar.day(), lunar.is_leap_month()), (1901, 1, 1, false));
//!
//! let ganzhi = lunisolar::year_ganzhi(1900).unwrap();
//! assert_eq!(ganzhi.to_string(), "庚子");
//! ```

mod consts;
mod prelude;

pub mod biorhythm;
pub mod ganzhi;
pub mod holiday;
pub mod lunar;
pub mod solar;
pub mod table;

pub use biorhythm::Biorhythm;
pub use consts::*;
pub use ganzhi::{Branch, GanZhi, SexagenaryCycle, Stem};
pub use holiday::{Holiday, HolidayCalendar, HolidayKind};
pub use lunar::{LunarCalendar, LunarDate};
pub use solar::{SolarDate, days_between};
pub use table::{ALMANAC, YearInfo, YearTable};

use crate::prelude::*;

/// Malformed solar calendar input.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Failure of a calendar computation.
///
/// Every operation either fully succeeds or fails with one of these; there are
/// no partial or approximate results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The date lies outside the span covered by the lunar year table.
    #[error("Date {0} is outside the supported range")]
    DateOutOfRange(SolarDate),

    /// The year lies outside the supported band.
    #[error("Year {year} is outside the supported range {first}-{last}")]
    YearOutOfRange { year: u16, first: u16, last: u16 },

    /// Malformed solar date, rejected before any table lookup.
    #[error(transparent)]
    InvalidDate(#[from] ParseError),

    /// The lunar year has no such month, leap month or day.
    #[error("Invalid lunar date {year}-{}{month:02}-{day:02}", leap_marker(.is_leap_month))]
    InvalidLunarDate {
        year: u16,
        month: u8,
        day: u8,
        is_leap_month: bool,
    },

    /// The month walk ran past the last month of a lunar year. Points at a
    /// defect in the table data or the walk itself.
    #[error("Month walk overflowed lunar year {year}")]
    InternalInconsistency { year: u16 },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn leap_marker(is_leap_month: &bool) -> &'static str {
    if *is_leap_month { "L" } else { "" }
}

impl CalendarError {
    /// `true` for both the date and the year flavour of "out of range".
    pub const fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::DateOutOfRange(_) | Self::YearOutOfRange { .. }
        )
    }
}

/// Converts a solar date, given as plain numbers, with the embedded almanac.
///
/// # Errors
/// `InvalidDate` for a malformed date, `DateOutOfRange` outside the table.
pub fn to_lunar(year: u16, month: u8, day: u8) -> Result<LunarDate, CalendarError> {
    let date = SolarDate::new(year, month, day)?;
    LunarCalendar::default().to_lunar(date)
}

/// Day stem-branch of a solar date, given as plain numbers.
///
/// # Errors
/// `InvalidDate` for a malformed date, `YearOutOfRange` outside the supported band.
pub fn day_ganzhi(year: u16, month: u8, day: u8) -> Result<GanZhi, CalendarError> {
    let date = SolarDate::new(year, month, day)?;
    SexagenaryCycle::default().day(date)
}

/// Year stem-branch of a solar year.
///
/// # Errors
/// `YearOutOfRange` outside the supported band.
pub fn year_ganzhi(year: u16) -> Result<GanZhi, CalendarError> {
    SexagenaryCycle::default().year(year)
}
