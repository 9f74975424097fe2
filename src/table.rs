//! Lunar year table.
//!
//! One packed word per lunar year, as published in the common Chinese/Korean
//! almanac tables:
//!
//! | bits   | meaning                                              |
//! |--------|------------------------------------------------------|
//! | 0..=3  | leap month index, `0` when the year has no leap month |
//! | 4..=15 | month lengths, bit 15 is month 1, bit 4 is month 12   |
//! | 16     | leap month length                                    |
//!
//! A set length bit means a 30-day month, a clear bit a 29-day month.
//! Words are decoded once, at compile time, into [`YearInfo`] records.

use crate::consts::{
    BASE_YEAR_DAYS, FIRST_LUNAR_YEAR, LAST_LUNAR_YEAR, LONG_MONTH_DAYS, MONTHS_PER_YEAR,
    SHORT_MONTH_DAYS,
};

const TABLE_LEN: usize = (LAST_LUNAR_YEAR - FIRST_LUNAR_YEAR + 1) as usize;

#[rustfmt::skip]
const PACKED: [u32; TABLE_LEN] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

const LEAP_MONTH_MASK: u32 = 0xf;
const MONTH_BITS_SHIFT: u32 = 4;
const MONTH_BITS_MASK: u32 = 0xfff;
const LEAP_LONG_BIT: u32 = 0x1_0000;

const fn unpack(packed: &[u32; TABLE_LEN]) -> [YearInfo; TABLE_LEN] {
    let mut out = [YearInfo::EMPTY; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        out[i] = YearInfo::from_packed(packed[i]);
        i += 1;
    }
    out
}

static DECODED: [YearInfo; TABLE_LEN] = unpack(&PACKED);

/// The embedded almanac table, lunar years 1900 through 2100.
pub static ALMANAC: YearTable = YearTable::new(FIRST_LUNAR_YEAR, &DECODED);

/// Decoded shape of one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearInfo {
    /// Regular month the leap month follows, `0` for none
    leap_month: u8,
    /// One bit per regular month; bit 11 is month 1, bit 0 is month 12
    month_bits: u16,
    /// Leap month has 30 days
    leap_long: bool,
}

impl YearInfo {
    const EMPTY: Self = Self {
        leap_month: 0,
        month_bits: 0,
        leap_long: false,
    };

    /// Unpacks an almanac word.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_packed(word: u32) -> Self {
        Self {
            leap_month: (word & LEAP_MONTH_MASK) as u8,
            month_bits: ((word >> MONTH_BITS_SHIFT) & MONTH_BITS_MASK) as u16,
            leap_long: word & LEAP_LONG_BIT != 0,
        }
    }

    /// Packs the record back into its almanac word.
    pub const fn to_packed(self) -> u32 {
        let leap = if self.leap_long { LEAP_LONG_BIT } else { 0 };
        leap | ((self.month_bits as u32) << MONTH_BITS_SHIFT) | self.leap_month as u32
    }

    /// The regular month followed by a leap month, if any.
    pub const fn leap_month(&self) -> Option<u8> {
        if self.leap_month == 0 {
            None
        } else {
            Some(self.leap_month)
        }
    }

    /// Length of regular month `month` (`1..=12`).
    pub const fn month_length(&self, month: u8) -> u16 {
        debug_assert!(month >= 1 && month <= MONTHS_PER_YEAR);
        if self.month_bits & (1_u16 << (MONTHS_PER_YEAR - month)) != 0 {
            LONG_MONTH_DAYS
        } else {
            SHORT_MONTH_DAYS
        }
    }

    /// Length of the leap month, `0` if the year has none.
    pub const fn leap_month_length(&self) -> u16 {
        match (self.leap_month, self.leap_long) {
            (0, _) => 0,
            (_, true) => LONG_MONTH_DAYS,
            (_, false) => SHORT_MONTH_DAYS,
        }
    }

    /// Total days in the year, leap month included.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn year_length(&self) -> u16 {
        BASE_YEAR_DAYS + self.month_bits.count_ones() as u16 + self.leap_month_length()
    }

    /// Month segments in calendar order, the leap month right after the
    /// regular month it repeats.
    pub fn months(&self) -> Months {
        Months {
            info: *self,
            month: 1,
            leap_next: false,
        }
    }
}

/// One month of a lunar year as yielded by [`YearInfo::months`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSegment {
    pub month: u8,
    pub is_leap: bool,
    pub length: u16,
}

/// Iterator over the month segments of a lunar year.
#[derive(Debug, Clone)]
pub struct Months {
    info: YearInfo,
    month: u8,
    leap_next: bool,
}

impl Iterator for Months {
    type Item = MonthSegment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.leap_next {
            self.leap_next = false;
            let segment = MonthSegment {
                month: self.month,
                is_leap: true,
                length: self.info.leap_month_length(),
            };
            self.month += 1;
            return Some(segment);
        }
        if self.month > MONTHS_PER_YEAR {
            return None;
        }

        let segment = MonthSegment {
            month: self.month,
            is_leap: false,
            length: self.info.month_length(self.month),
        };
        if self.info.leap_month == self.month {
            self.leap_next = true;
        } else {
            self.month += 1;
        }
        Some(segment)
    }
}

/// Immutable table of lunar years, indexed by `year - first_year`.
#[derive(Debug, Clone, Copy)]
pub struct YearTable {
    first_year: u16,
    years: &'static [YearInfo],
}

impl YearTable {
    /// Builds a table over the decoded records of `first_year..`.
    ///
    /// # Panics
    /// Panics if `years` is empty.
    pub const fn new(first_year: u16, years: &'static [YearInfo]) -> Self {
        assert!(!years.is_empty(), "lunar year table must cover at least one year");
        Self { first_year, years }
    }

    /// First supported lunar year.
    pub const fn first_year(&self) -> u16 {
        self.first_year
    }

    /// Last supported lunar year (inclusive).
    #[allow(clippy::cast_possible_truncation)]
    pub const fn last_year(&self) -> u16 {
        self.first_year + self.years.len() as u16 - 1
    }

    pub const fn contains(&self, year: u16) -> bool {
        year >= self.first_year && year <= self.last_year()
    }

    /// Decoded record for `year`, `None` outside the table.
    pub fn get(&self, year: u16) -> Option<&YearInfo> {
        let index = year.checked_sub(self.first_year)?;
        self.years.get(usize::from(index))
    }

    /// Leap month of `year`: `Some(0)` when the year has none, `None` outside the table.
    pub fn leap_month(&self, year: u16) -> Option<u8> {
        self.get(year).map(|info| info.leap_month)
    }

    /// Length of regular `month` of `year`, `None` outside the table or for a month not in `1..=12`.
    pub fn month_length(&self, year: u16, month: u8) -> Option<u16> {
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return None;
        }
        self.get(year).map(|info| info.month_length(month))
    }

    /// Length of the leap month of `year` (`0` if none), `None` outside the table.
    pub fn leap_month_length(&self, year: u16) -> Option<u16> {
        self.get(year).map(YearInfo::leap_month_length)
    }

    /// Total days of `year`, `None` outside the table.
    pub fn year_length(&self, year: u16) -> Option<u16> {
        self.get(year).map(YearInfo::year_length)
    }

    /// Iterates `(year, record)` pairs from the first year.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &YearInfo)> + '_ {
        (self.first_year..).zip(self.years.iter())
    }

    /// Total days covered by the whole table.
    pub fn total_days(&self) -> i32 {
        self.years
            .iter()
            .map(|info| i32::from(info.year_length()))
            .sum()
    }
}

impl Default for YearTable {
    fn default() -> Self {
        ALMANAC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(ALMANAC.first_year(), 1900);
        assert_eq!(ALMANAC.last_year(), 2100);
        assert!(ALMANAC.contains(1900));
        assert!(ALMANAC.contains(2100));
        assert!(!ALMANAC.contains(1899));
        assert!(!ALMANAC.contains(2101));
    }

    #[test]
    fn test_out_of_range_accessors() {
        assert_eq!(ALMANAC.get(1899), None);
        assert_eq!(ALMANAC.year_length(2101), None);
        assert_eq!(ALMANAC.month_length(1899, 1), None);
        assert_eq!(ALMANAC.leap_month(0), None);
        assert_eq!(ALMANAC.leap_month_length(u16::MAX), None);
        assert_eq!(ALMANAC.month_length(2000, 0), None);
        assert_eq!(ALMANAC.month_length(2000, 13), None);
    }

    #[test]
    fn test_decode_1900() {
        // 0x04bd8: leap 8th month of 29 days
        let info = ALMANAC.get(1900).unwrap();
        assert_eq!(info.leap_month(), Some(8));
        assert_eq!(info.leap_month_length(), 29);
        assert_eq!(info.month_length(1), 29);
        assert_eq!(info.month_length(2), 30);
        assert_eq!(info.year_length(), 384);
    }

    #[test]
    fn test_known_leap_months() {
        for (year, leap, leap_len) in [
            (1900, 8, 29),
            (2001, 4, 29),
            (2004, 2, 29),
            (2006, 7, 29),
            (2009, 5, 29),
            (2012, 4, 29),
            (2014, 9, 29),
            (2017, 6, 30),
            (2020, 4, 29),
            (2023, 2, 29),
            (2025, 6, 29),
        ] {
            assert_eq!(ALMANAC.leap_month(year), Some(leap), "year {year}");
            assert_eq!(ALMANAC.leap_month_length(year), Some(leap_len), "year {year}");
        }
        for year in [2000, 2002, 2003, 2024] {
            assert_eq!(ALMANAC.leap_month(year), Some(0), "year {year}");
            assert_eq!(ALMANAC.leap_month_length(year), Some(0), "year {year}");
        }
    }

    #[test]
    fn test_year_length_is_sum_of_months() {
        for (year, info) in ALMANAC.iter() {
            let months: u16 = (1..=12).map(|m| info.month_length(m)).sum();
            assert_eq!(
                months + info.leap_month_length(),
                info.year_length(),
                "year {year}"
            );
            assert!(
                matches!(info.year_length(), 353..=355 | 383..=385),
                "year {year} has {} days",
                info.year_length()
            );
        }
    }

    #[test]
    fn test_months_segments() {
        let info = ALMANAC.get(2017).unwrap();
        let segments: Vec<_> = info.months().collect();
        assert_eq!(segments.len(), 13);
        assert_eq!(
            segments[6],
            MonthSegment {
                month: 6,
                is_leap: true,
                length: 30
            }
        );
        assert_eq!(segments[7].month, 7);
        assert!(!segments[7].is_leap);
        let total: u16 = segments.iter().map(|s| s.length).sum();
        assert_eq!(total, info.year_length());

        let plain = ALMANAC.get(2024).unwrap();
        let months: Vec<u8> = plain.months().map(|s| s.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_leap_in_twelfth_month() {
        let info = YearInfo::from_packed(0x0000c);
        let segments: Vec<_> = info.months().collect();
        assert_eq!(segments.len(), 13);
        assert_eq!(segments[12].month, 12);
        assert!(segments[12].is_leap);
    }

    #[test]
    fn test_packed_round_trip() {
        for (year, word) in (FIRST_LUNAR_YEAR..).zip(PACKED) {
            assert_eq!(YearInfo::from_packed(word).to_packed(), word, "year {year}");
        }
    }

    #[test]
    fn test_total_days() {
        let expected: i32 = ALMANAC
            .iter()
            .map(|(_, info)| i32::from(info.year_length()))
            .sum();
        assert_eq!(ALMANAC.total_days(), expected);
    }
}
