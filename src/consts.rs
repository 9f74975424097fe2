/// Maximum valid Gregorian year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

// --- lunar year table ---

/// First lunar year covered by the almanac table
pub const FIRST_LUNAR_YEAR: u16 = 1900;
/// Last lunar year covered by the almanac table (inclusive)
pub const LAST_LUNAR_YEAR: u16 = 2100;

/// Solar date of lunar 1900-01-01, the zero point of every day offset
pub const LUNAR_EPOCH: (u16, u8, u8) = (1900, 1, 31);

/// Number of regular lunar months in a year
pub const MONTHS_PER_YEAR: u8 = 12;
/// Length of a short ("small") lunar month
pub const SHORT_MONTH_DAYS: u16 = 29;
/// Length of a long ("big") lunar month
pub const LONG_MONTH_DAYS: u16 = 30;
/// Length of a year made of twelve short months
pub const BASE_YEAR_DAYS: u16 = SHORT_MONTH_DAYS * MONTHS_PER_YEAR as u16;

// --- sexagenary cycle ---

/// Number of heavenly stems
pub const STEM_COUNT: u8 = 10;
/// Number of earthly branches
pub const BRANCH_COUNT: u8 = 12;
/// Length of the combined stem-branch cycle, lcm(10, 12)
pub const CYCLE_LENGTH: u8 = 60;

/// Day cycle anchor: 1900-01-01 is 甲戌
pub const DAY_CYCLE_EPOCH: (u16, u8, u8) = (1900, 1, 1);
/// Stem index of [`DAY_CYCLE_EPOCH`] (甲)
pub const DAY_STEM_SHIFT: u8 = 0;
/// Branch index of [`DAY_CYCLE_EPOCH`] (戌)
pub const DAY_BRANCH_SHIFT: u8 = 10;

/// Year cycle anchor: 1900 is 庚子
pub const YEAR_CYCLE_EPOCH: u16 = 1900;
/// Stem index of [`YEAR_CYCLE_EPOCH`] (庚)
pub const YEAR_STEM_SHIFT: u8 = 6;
/// Branch index of [`YEAR_CYCLE_EPOCH`] (子)
pub const YEAR_BRANCH_SHIFT: u8 = 0;

// --- biorhythm ---

/// Physical cycle length in days
pub const PHYSICAL_PERIOD: u32 = 23;
/// Emotional cycle length in days
pub const EMOTIONAL_PERIOD: u32 = 28;
/// Intellectual cycle length in days
pub const INTELLECTUAL_PERIOD: u32 = 33;
