use crate::chronology::{CalendarError, ValueRange};
use crate::consts::{
    CENTURY_CYCLE, DAY_NAMES, DAYS_PER_SEASON, DAYS_PER_WEEK, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    SEASON_NAMES, SEASONS_PER_YEAR,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// Valid seasons, `1..=SEASONS_PER_YEAR`
pub const SEASON_RANGE: ValueRange = ValueRange::of(1, SEASONS_PER_YEAR as i64);
/// Valid days of a season, `1..=DAYS_PER_SEASON`
pub const DAY_OF_SEASON_RANGE: ValueRange = ValueRange::of(1, DAYS_PER_SEASON as i64);
/// Valid weekdays, `1..=DAYS_PER_WEEK`
pub const WEEKDAY_RANGE: ValueRange = ValueRange::of(1, DAYS_PER_WEEK as i64);

fn checked_value(value: i64, field: &'static str, range: ValueRange) -> Result<NonZeroU8, CalendarError> {
    let out_of_range = CalendarError::OutOfRange { field, value, range };
    if !range.is_valid(value) {
        return Err(out_of_range);
    }
    u8::try_from(value).ok().and_then(NonZeroU8::new).ok_or(out_of_range)
}

/// A season guaranteed to be in the range `1..=SEASONS_PER_YEAR` (1..=5)
/// Uses `NonZeroU8` internally, so 0 is not a valid season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Season(NonZeroU8);

impl Season {
    /// Creates a new Season, validating that it's within `SEASON_RANGE`
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the value is 0 or > `SEASONS_PER_YEAR`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        Self::from_value(i64::from(value))
    }

    pub(crate) fn from_value(value: i64) -> Result<Self, CalendarError> {
        checked_value(value, "season", SEASON_RANGE).map(Self)
    }

    /// Season containing a leap-adjusted day of the year (1..=365)
    pub(crate) fn containing(day_of_year: u16) -> Option<Self> {
        let value = day_of_year.checked_sub(1)? / u16::from(DAYS_PER_SEASON) + 1;
        Self::from_value(i64::from(value)).ok()
    }

    /// Looks a season up by its name
    pub fn from_name(name: &str) -> Option<Self> {
        let index = SEASON_NAMES.iter().position(|candidate| *candidate == name)?;
        Self::from_value(index as i64 + 1).ok()
    }

    /// Returns the season value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Name of the season, e.g. "Discord"
    pub const fn name(self) -> &'static str {
        SEASON_NAMES[(self.0.get() - 1) as usize]
    }
}

impl TryFrom<u8> for Season {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Season> for u8 {
    fn from(season: Season) -> Self {
        season.0.get()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of a season guaranteed to be in the range `1..=DAYS_PER_SEASON` (1..=73)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfSeason(NonZeroU8);

impl DayOfSeason {
    /// Creates a new `DayOfSeason`, validating that it's within `DAY_OF_SEASON_RANGE`
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the value is 0 or > `DAYS_PER_SEASON`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        Self::from_value(i64::from(value))
    }

    pub(crate) fn from_value(value: i64) -> Result<Self, CalendarError> {
        checked_value(value, "day-of-season", DAY_OF_SEASON_RANGE).map(Self)
    }

    pub(crate) fn containing(day_of_year: u16) -> Option<Self> {
        let value = day_of_year.checked_sub(1)? % u16::from(DAYS_PER_SEASON) + 1;
        Self::from_value(i64::from(value)).ok()
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for DayOfSeason {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfSeason> for u8 {
    fn from(day: DayOfSeason) -> Self {
        day.0.get()
    }
}

impl fmt::Display for DayOfSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of the five-day week guaranteed to be in the range `1..=DAYS_PER_WEEK` (1..=5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(NonZeroU8);

impl Weekday {
    /// Creates a new Weekday, validating that it's within `WEEKDAY_RANGE`
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the value is 0 or > `DAYS_PER_WEEK`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        Self::from_value(i64::from(value))
    }

    pub(crate) fn from_value(value: i64) -> Result<Self, CalendarError> {
        checked_value(value, "weekday", WEEKDAY_RANGE).map(Self)
    }

    pub(crate) fn containing(day_of_year: u16) -> Option<Self> {
        let value = day_of_year.checked_sub(1)? % u16::from(DAYS_PER_WEEK) + 1;
        Self::from_value(i64::from(value)).ok()
    }

    /// Looks a weekday up by its name
    pub fn from_name(name: &str) -> Option<Self> {
        let index = DAY_NAMES.iter().position(|candidate| *candidate == name)?;
        Self::from_value(index as i64 + 1).ok()
    }

    /// Returns the weekday value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Name of the weekday, e.g. "Sweetmorn"
    pub const fn name(self) -> &'static str {
        DAY_NAMES[(self.0.get() - 1) as usize]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.0.get()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

/// Proleptic Gregorian leap-year rule over an ISO year
pub const fn is_leap_year(iso_year: i64) -> bool {
    (iso_year % LEAP_YEAR_CYCLE == 0 && iso_year % CENTURY_CYCLE != 0) || (iso_year % GREGORIAN_CYCLE == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_new_valid() {
        for s in 1..=5 {
            assert!(Season::new(s).is_ok(), "Season {s} should be valid");
        }
    }

    #[test]
    fn test_season_new_invalid() {
        for s in [0, 6, 255] {
            let result = Season::new(s);
            assert!(
                matches!(result, Err(CalendarError::OutOfRange { field: "season", value, .. }) if value == i64::from(s)),
                "Season {s} should be rejected"
            );
        }
    }

    #[test]
    fn test_season_names() {
        let expected = ["Chaos", "Discord", "Confusion", "Bureaucracy", "The Aftermath"];
        for (index, name) in expected.iter().enumerate() {
            let season = Season::new(index as u8 + 1).expect("valid season");
            assert_eq!(season.name(), *name);
            assert_eq!(Season::from_name(name), Some(season));
        }
        assert_eq!(Season::from_name("Winter"), None);
    }

    #[test]
    fn test_day_of_season_bounds() {
        assert!(DayOfSeason::new(1).is_ok());
        assert!(DayOfSeason::new(73).is_ok());

        let result = DayOfSeason::new(0);
        assert!(matches!(result, Err(CalendarError::OutOfRange { field: "day-of-season", value: 0, .. })));

        let result = DayOfSeason::new(74);
        assert!(matches!(
            result,
            Err(CalendarError::OutOfRange {
                field: "day-of-season",
                value: 74,
                range: DAY_OF_SEASON_RANGE
            })
        ));
    }

    #[test]
    fn test_weekday_names() {
        let expected = ["Sweetmorn", "Boomtime", "Pungenday", "Prickle-Prickle", "Setting Orange"];
        for (index, name) in expected.iter().enumerate() {
            let weekday = Weekday::new(index as u8 + 1).expect("valid weekday");
            assert_eq!(weekday.name(), *name);
            assert_eq!(Weekday::from_name(name), Some(weekday));
        }
        assert!(Weekday::new(6).is_err());
        assert_eq!(Weekday::from_name("Monday"), None);
    }

    #[test]
    fn test_containing() {
        struct TestCase {
            day_of_year:  u16,
            season:       u8,
            day:          u8,
            weekday:      u8,
        }

        let cases = [
            TestCase { day_of_year: 1, season: 1, day: 1, weekday: 1 },
            TestCase { day_of_year: 5, season: 1, day: 5, weekday: 5 },
            TestCase { day_of_year: 6, season: 1, day: 6, weekday: 1 },
            TestCase { day_of_year: 73, season: 1, day: 73, weekday: 3 },
            TestCase { day_of_year: 74, season: 2, day: 1, weekday: 4 },
            TestCase { day_of_year: 365, season: 5, day: 73, weekday: 5 },
        ];

        for case in &cases {
            assert_eq!(Season::containing(case.day_of_year).map(Season::get), Some(case.season));
            assert_eq!(DayOfSeason::containing(case.day_of_year).map(DayOfSeason::get), Some(case.day));
            assert_eq!(Weekday::containing(case.day_of_year).map(Weekday::get), Some(case.weekday));
        }

        assert_eq!(Season::containing(0), None);
        assert_eq!(Season::containing(366), None);
    }

    #[test]
    fn test_display_and_into() {
        let season = Season::new(2).expect("valid season");
        assert_eq!(season.to_string(), "2");
        let value: u8 = season.into();
        assert_eq!(value, 2);

        let day = DayOfSeason::new(19).expect("valid day of season");
        assert_eq!(day.to_string(), "19");
    }

    #[test]
    fn test_serde() {
        let season = Season::new(3).expect("valid season");
        let json = serde_json::to_string(&season).expect("serialize season");
        assert_eq!(json, "3");
        let parsed: Season = serde_json::from_str(&json).expect("deserialize season");
        assert_eq!(season, parsed);

        let result: Result<Weekday, _> = serde_json::from_str("6");
        assert!(result.is_err());

        let result: Result<DayOfSeason, _> = serde_json::from_str("74");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i64,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2012, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2013, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 1900, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2000, is_leap: true, description: "divisible by 400" },
            TestCase { year: 0, is_leap: true, description: "year zero" },
            TestCase { year: -4, is_leap: true, description: "negative, divisible by 4" },
            TestCase { year: -1166, is_leap: false, description: "start of YOLD" },
            TestCase { year: -100, is_leap: false, description: "negative century" },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }
}
