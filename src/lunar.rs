//! Solar to lunar date conversion.

use std::fmt;

use log::{error, trace, warn};
use serde::Serialize;

use crate::CalendarError;
use crate::consts::LUNAR_EPOCH;
use crate::solar::SolarDate;
use crate::table::{ALMANAC, YearInfo, YearTable};

/// A date of the lunisolar calendar.
///
/// Only produced by [`LunarCalendar`], so the day always exists in the year
/// table it came from. Ordering is chronological: a leap month sorts after
/// the regular month of the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LunarDate {
    year:          u16,
    month:         u8,
    is_leap_month: bool,
    day:           u8,
}

impl LunarDate {
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month number `1..=12`; a leap month carries the number of the month it repeats.
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of month `1..=30`.
    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn is_leap_month(&self) -> bool {
        self.is_leap_month
    }
}

/// Formats as `YYYY-MM-DD`, with an `L` before the month of a leap month
/// (`2017-L06-01`).
impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { "L" } else { "" };
        write!(f, "{:04}-{leap}{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Converter between solar dates and lunar dates over one [`YearTable`].
///
/// `epoch` must be the solar date of the first day of the table's first lunar
/// year; every conversion is a day offset from it.
#[derive(Debug, Clone, Copy)]
pub struct LunarCalendar<'t> {
    table: &'t YearTable,
    epoch: SolarDate,
}

impl<'t> LunarCalendar<'t> {
    pub const fn new(table: &'t YearTable, epoch: SolarDate) -> Self {
        Self { table, epoch }
    }

    pub const fn table(&self) -> &'t YearTable {
        self.table
    }

    /// First supported solar date, lunar new year of the first table year.
    pub const fn first_date(&self) -> SolarDate {
        self.epoch
    }

    /// Last supported solar date, the final day of the last table year.
    ///
    /// Saturates at [`SolarDate::MAX`] for a table reaching past year 9999.
    pub fn last_date(&self) -> SolarDate {
        SolarDate::from_jdn(self.epoch.jdn() + self.table.total_days() - 1)
            .unwrap_or(SolarDate::MAX)
    }

    /// Whether `date` can be converted.
    pub fn contains(&self, date: SolarDate) -> bool {
        (self.first_date()..=self.last_date()).contains(&date)
    }

    /// Converts a solar date into its lunar date.
    ///
    /// # Errors
    /// `DateOutOfRange` if the date is outside the table,
    /// `InternalInconsistency` if the month walk runs off the end of a year.
    pub fn to_lunar(&self, date: SolarDate) -> Result<LunarDate, CalendarError> {
        let out_of_range = || {
            warn!(
                "{date} is outside the lunar table range {}..={}",
                self.first_date(),
                self.last_date()
            );
            CalendarError::DateOutOfRange(date)
        };

        let years = self.table.first_year()..=self.table.last_year().saturating_add(1);
        if !years.contains(&date.year()) {
            return Err(out_of_range());
        }
        let mut offset = date - self.epoch;
        if offset < 0 {
            return Err(out_of_range());
        }

        let mut found = None;
        for (year, info) in self.table.iter() {
            let length = i32::from(info.year_length());
            if offset < length {
                found = Some((year, info));
                break;
            }
            offset -= length;
        }
        let (year, info) = found.ok_or_else(out_of_range)?;
        trace!("{date}: lunar year {year}, day {offset} of the year");

        for segment in info.months() {
            let length = i32::from(segment.length);
            if offset < length {
                let day = u8::try_from(offset + 1)
                    .map_err(|_| CalendarError::InternalInconsistency { year })?;
                return Ok(LunarDate {
                    year,
                    month: segment.month,
                    is_leap_month: segment.is_leap,
                    day,
                });
            }
            offset -= length;
        }

        error!("{date}: month walk overflowed lunar year {year} with {offset} days left");
        Err(CalendarError::InternalInconsistency { year })
    }

    /// Validates a lunar date against the table.
    ///
    /// # Errors
    /// `YearOutOfRange` for a year outside the table, `InvalidLunarDate` for a
    /// month, leap month or day the year does not have.
    pub fn lunar_date(
        &self,
        year: u16,
        month: u8,
        day: u8,
        is_leap_month: bool,
    ) -> Result<LunarDate, CalendarError> {
        let date = LunarDate {
            year,
            month,
            is_leap_month,
            day,
        };
        self.day_offset(date)?;
        Ok(date)
    }

    /// Converts a lunar date back into its solar date.
    ///
    /// # Errors
    /// Same as [`lunar_date`](Self::lunar_date) when `date` does not exist in
    /// this calendar's table.
    pub fn to_solar(&self, date: LunarDate) -> Result<SolarDate, CalendarError> {
        let offset = self.day_offset(date)?;
        self.epoch
            .checked_add_days(offset)
            .ok_or(CalendarError::InternalInconsistency { year: date.year })
    }

    /// Days from the epoch to `date`, checking that the date exists.
    fn day_offset(&self, date: LunarDate) -> Result<i32, CalendarError> {
        let invalid = || CalendarError::InvalidLunarDate {
            year: date.year,
            month: date.month,
            day: date.day,
            is_leap_month: date.is_leap_month,
        };

        let info: &YearInfo = self.table.get(date.year).ok_or_else(|| {
            warn!("lunar year {} is outside the table", date.year);
            CalendarError::YearOutOfRange {
                year: date.year,
                first: self.table.first_year(),
                last: self.table.last_year(),
            }
        })?;

        let mut offset: i32 = self
            .table
            .iter()
            .take_while(|(year, _)| *year < date.year)
            .map(|(_, info)| i32::from(info.year_length()))
            .sum();
        for segment in info.months() {
            if segment.month == date.month && segment.is_leap == date.is_leap_month {
                if date.day == 0 || u16::from(date.day) > segment.length {
                    return Err(invalid());
                }
                return Ok(offset + i32::from(date.day) - 1);
            }
            offset += i32::from(segment.length);
        }
        Err(invalid())
    }
}

impl Default for LunarCalendar<'static> {
    /// The embedded almanac, anchored at 1900-01-31.
    fn default() -> Self {
        Self::new(&ALMANAC, SolarDate::from_anchor(LUNAR_EPOCH))
    }
}
