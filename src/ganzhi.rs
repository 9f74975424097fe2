//! Sexagenary cycle (干支): heavenly stems, earthly branches, and the
//! stem-branch designation of days and years.
//!
//! Both calculations run on solar day counts and solar year numbers and do
//! not depend on the lunar conversion.

use std::str::FromStr;

use log::warn;

use crate::consts::{
    BRANCH_COUNT, CYCLE_LENGTH, DAY_BRANCH_SHIFT, DAY_CYCLE_EPOCH, DAY_STEM_SHIFT, STEM_COUNT,
    YEAR_BRANCH_SHIFT, YEAR_CYCLE_EPOCH, YEAR_STEM_SHIFT,
};
use crate::solar::SolarDate;
use crate::table::ALMANAC;
use crate::{CalendarError, ParseError, prelude::*};

/// Normalizes any cycle position into `0..modulus`.
fn wrap(position: i64, modulus: u8) -> usize {
    // rem_euclid with a positive modulus is never negative
    usize::try_from(position.rem_euclid(i64::from(modulus))).unwrap_or_default()
}

/// Heavenly stem (天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Stem {
    #[display(fmt = "甲")]
    Jia,
    #[display(fmt = "乙")]
    Yi,
    #[display(fmt = "丙")]
    Bing,
    #[display(fmt = "丁")]
    Ding,
    #[display(fmt = "戊")]
    Wu,
    #[display(fmt = "己")]
    Ji,
    #[display(fmt = "庚")]
    Geng,
    #[display(fmt = "辛")]
    Xin,
    #[display(fmt = "壬")]
    Ren,
    #[display(fmt = "癸")]
    Gui,
}

impl Stem {
    pub const ALL: [Self; STEM_COUNT as usize] = [
        Self::Jia,
        Self::Yi,
        Self::Bing,
        Self::Ding,
        Self::Wu,
        Self::Ji,
        Self::Geng,
        Self::Xin,
        Self::Ren,
        Self::Gui,
    ];

    const HANJA: [&'static str; STEM_COUNT as usize] =
        ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
    const HANGUL: [&'static str; STEM_COUNT as usize] =
        ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

    /// Stem at any cycle position, wrapped into `0..10`.
    pub fn from_index(position: i64) -> Self {
        Self::ALL[wrap(position, STEM_COUNT)]
    }

    /// Position in `0..10`, 甲 first.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn hanja(self) -> &'static str {
        Self::HANJA[self as usize]
    }

    pub const fn hangul(self) -> &'static str {
        Self::HANGUL[self as usize]
    }
}

/// Earthly branch (地支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Branch {
    #[display(fmt = "子")]
    Zi,
    #[display(fmt = "丑")]
    Chou,
    #[display(fmt = "寅")]
    Yin,
    #[display(fmt = "卯")]
    Mao,
    #[display(fmt = "辰")]
    Chen,
    #[display(fmt = "巳")]
    Si,
    #[display(fmt = "午")]
    Wu,
    #[display(fmt = "未")]
    Wei,
    #[display(fmt = "申")]
    Shen,
    #[display(fmt = "酉")]
    You,
    #[display(fmt = "戌")]
    Xu,
    #[display(fmt = "亥")]
    Hai,
}

impl Branch {
    pub const ALL: [Self; BRANCH_COUNT as usize] = [
        Self::Zi,
        Self::Chou,
        Self::Yin,
        Self::Mao,
        Self::Chen,
        Self::Si,
        Self::Wu,
        Self::Wei,
        Self::Shen,
        Self::You,
        Self::Xu,
        Self::Hai,
    ];

    const HANJA: [&'static str; BRANCH_COUNT as usize] = [
        "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
    ];
    const HANGUL: [&'static str; BRANCH_COUNT as usize] = [
        "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
    ];
    const ZODIAC: [&'static str; BRANCH_COUNT as usize] = [
        "鼠", "牛", "虎", "兎", "龍", "蛇", "馬", "羊", "猴", "鷄", "犬", "猪",
    ];
    const ZODIAC_HANGUL: [&'static str; BRANCH_COUNT as usize] = [
        "쥐", "소", "호랑이", "토끼", "용", "뱀", "말", "양", "원숭이", "닭", "개", "돼지",
    ];

    /// Branch at any cycle position, wrapped into `0..12`.
    pub fn from_index(position: i64) -> Self {
        Self::ALL[wrap(position, BRANCH_COUNT)]
    }

    /// Position in `0..12`, 子 first.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn hanja(self) -> &'static str {
        Self::HANJA[self as usize]
    }

    pub const fn hangul(self) -> &'static str {
        Self::HANGUL[self as usize]
    }

    /// Zodiac animal of the branch (子 → 鼠).
    pub const fn zodiac(self) -> &'static str {
        Self::ZODIAC[self as usize]
    }

    /// Korean name of the zodiac animal (子 → 쥐).
    pub const fn zodiac_hangul(self) -> &'static str {
        Self::ZODIAC_HANGUL[self as usize]
    }
}

/// A stem-branch pair, one of the 60 terms of the cycle.
///
/// Stem and branch always share parity, so every value maps to exactly one
/// position `0..60` (甲子 = 0, 癸亥 = 59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}{}", stem, branch)]
pub struct GanZhi {
    stem:   Stem,
    branch: Branch,
}

impl GanZhi {
    /// Pairs a stem and a branch; `None` for the 60 combinations that never
    /// occur (e.g. 甲丑).
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Term at any cycle position, wrapped into `0..60`.
    pub fn from_index(position: i64) -> Self {
        let position = position.rem_euclid(i64::from(CYCLE_LENGTH));
        Self {
            stem:   Stem::from_index(position),
            branch: Branch::from_index(position),
        }
    }

    /// Position in `0..60`, 甲子 first.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless
    )]
    pub const fn index(self) -> u8 {
        // Chinese remainder: n ≡ stem (mod 10), n ≡ branch (mod 12)
        let n = 6 * self.stem.index() as i16 - 5 * self.branch.index() as i16;
        n.rem_euclid(CYCLE_LENGTH as i16) as u8
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Stem-branch of a solar day.
    pub fn of_day(date: SolarDate) -> Self {
        let offset = i64::from(date - SolarDate::from_anchor(DAY_CYCLE_EPOCH));
        Self {
            stem:   Stem::from_index(offset + i64::from(DAY_STEM_SHIFT)),
            branch: Branch::from_index(offset + i64::from(DAY_BRANCH_SHIFT)),
        }
    }

    /// Stem-branch of a solar year number.
    pub fn of_year(year: u16) -> Self {
        let offset =
            (i64::from(year) - i64::from(YEAR_CYCLE_EPOCH)).rem_euclid(i64::from(CYCLE_LENGTH));
        Self {
            stem:   Stem::from_index(offset + i64::from(YEAR_STEM_SHIFT)),
            branch: Branch::from_index(offset + i64::from(YEAR_BRANCH_SHIFT)),
        }
    }

    /// Korean reading, e.g. `경자`.
    pub fn hangul(self) -> String {
        format!("{}{}", self.stem.hangul(), self.branch.hangul())
    }

    /// Korean reading followed by the characters, e.g. `경자(庚子)`.
    pub fn label(self) -> String {
        format!("{}({self})", self.hangul())
    }
}

impl FromStr for GanZhi {
    type Err = ParseError;

    /// Parses a two-character pair written either in hanja (`庚子`) or in
    /// hangul (`경자`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let invalid = || ParseError::InvalidFormat(trimmed.to_owned());

        let mut chars = trimmed.char_indices().skip(1);
        let (split, _) = chars.next().ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        let (stem, branch) = trimmed.split_at(split);

        let stem = Stem::ALL
            .into_iter()
            .find(|s| s.hanja() == stem || s.hangul() == stem)
            .ok_or_else(invalid)?;
        // 申 and 辛 share the hangul 신, so the branch is matched on its own table
        let branch = Branch::ALL
            .into_iter()
            .find(|b| b.hanja() == branch || b.hangul() == branch)
            .ok_or_else(invalid)?;

        Self::new(stem, branch).ok_or_else(invalid)
    }
}

impl serde::Serialize for GanZhi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for GanZhi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sexagenary calculator limited to a band of solar years.
///
/// The arithmetic itself is unbounded ([`GanZhi::of_day`], [`GanZhi::of_year`]);
/// the band marks which years the caller treats as supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SexagenaryCycle {
    first_year: u16,
    last_year:  u16,
}

impl SexagenaryCycle {
    /// Supports solar years `first_year..=last_year`.
    pub const fn new(first_year: u16, last_year: u16) -> Self {
        Self {
            first_year,
            last_year,
        }
    }

    pub const fn first_year(&self) -> u16 {
        self.first_year
    }

    pub const fn last_year(&self) -> u16 {
        self.last_year
    }

    pub const fn contains(&self, year: u16) -> bool {
        year >= self.first_year && year <= self.last_year
    }

    fn check(&self, year: u16) -> Result<(), CalendarError> {
        if self.contains(year) {
            Ok(())
        } else {
            warn!(
                "year {year} is outside the sexagenary band {}..={}",
                self.first_year, self.last_year
            );
            Err(CalendarError::YearOutOfRange {
                year,
                first: self.first_year,
                last: self.last_year,
            })
        }
    }

    /// Day stem-branch (일진) of `date`.
    ///
    /// # Errors
    /// `YearOutOfRange` if the date's year is outside the band.
    pub fn day(&self, date: SolarDate) -> Result<GanZhi, CalendarError> {
        self.check(date.year())?;
        Ok(GanZhi::of_day(date))
    }

    /// Year stem-branch of solar year `year`.
    ///
    /// # Errors
    /// `YearOutOfRange` if the year is outside the band.
    pub fn year(&self, year: u16) -> Result<GanZhi, CalendarError> {
        self.check(year)?;
        Ok(GanZhi::of_year(year))
    }
}

impl Default for SexagenaryCycle {
    /// The year band of the embedded almanac table.
    fn default() -> Self {
        Self::new(ALMANAC.first_year(), ALMANAC.last_year())
    }
}
