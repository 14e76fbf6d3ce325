//! Rules of the Discordian calendar: constants, year translation, names,
//! field ranges and validation.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::{
    DiscordianDate, ParseError,
    consts::{CALENDAR_ID, CALENDAR_TYPE, DAYS_PER_YEAR, ERA_NAME, ERA_VALUE, ISO_CALENDAR_ID, ISO_YEAR_OFFSET},
    prelude::*,
    types::{DayOfSeason, Season, Weekday, is_leap_year},
};

/// The process-wide instance of the calendar rules.
pub static DISCORDIAN: Discordian = Discordian;

/// Inclusive range of valid values for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{min}..{max}")]
pub struct ValueRange {
    min: i64,
    max: i64,
}

impl ValueRange {
    pub const fn of(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn min(&self) -> i64 {
        self.min
    }

    pub const fn max(&self) -> i64 {
        self.max
    }

    pub const fn is_valid(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Generic date fields a calendar answers range and value queries for.
///
/// The names are the generic calendar-system ones: `MonthOfYear` is the
/// season slot, `DayOfMonth` the day-of-season slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "Era")]
    Era,
    #[display(fmt = "Year")]
    Year,
    #[display(fmt = "MonthOfYear")]
    MonthOfYear,
    #[display(fmt = "DayOfMonth")]
    DayOfMonth,
    #[display(fmt = "DayOfWeek")]
    DayOfWeek,
    #[display(fmt = "DayOfYear")]
    DayOfYear,
    #[display(fmt = "AlignedWeekOfMonth")]
    AlignedWeekOfMonth,
}

/// The single era of the calendar, Year of Our Lady of Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Era {
    #[display(fmt = "{}", ERA_NAME)]
    Yold,
}

impl Era {
    pub const fn value(self) -> i64 {
        ERA_VALUE
    }
}

/// Error type for calendar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A field value outside its valid range.
    #[error("{value} is not a valid Discordian {field}. Valid values are {range}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        range: ValueRange,
    },

    /// Integer or date-range overflow.
    #[error("Arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A date from another calendar system was supplied.
    #[error("Unable to combine a {expected} date with a {found} date")]
    IncompatibleCalendar {
        expected: &'static str,
        found:    &'static str,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Text parse failure. `FromStr` reports `ParseError` itself; this
    /// variant lets callers mix parsing and calendar operations under `?`.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CalendarError {
    pub(crate) fn overflow(operation: &'static str) -> Self {
        debug!(operation, "discordian date arithmetic overflowed");
        Self::Overflow(operation)
    }
}

/// A date in some calendar system, backed by a proleptic-Gregorian date.
pub trait CalendarDate {
    /// Identifier of the calendar system the date belongs to
    fn calendar_id(&self) -> &'static str;

    /// The equivalent proleptic-Gregorian date
    fn to_iso_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn calendar_id(&self) -> &'static str {
        ISO_CALENDAR_ID
    }

    fn to_iso_date(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDate for NaiveDateTime {
    fn calendar_id(&self) -> &'static str {
        ISO_CALENDAR_ID
    }

    fn to_iso_date(&self) -> NaiveDate {
        self.date()
    }
}

impl CalendarDate for DiscordianDate {
    fn calendar_id(&self) -> &'static str {
        CALENDAR_ID
    }

    fn to_iso_date(&self) -> NaiveDate {
        self.iso_date()
    }
}

/// Stateless rules of the Discordian calendar. Use [`DISCORDIAN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Discordian;

impl Discordian {
    pub const fn id(&self) -> &'static str {
        CALENDAR_ID
    }

    pub const fn calendar_type(&self) -> &'static str {
        CALENDAR_TYPE
    }

    /// Converts a calendar year to the ISO year
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the result does not fit an `i32`.
    pub fn iso_year_of(&self, year: i32) -> Result<i32, CalendarError> {
        year.checked_sub(ISO_YEAR_OFFSET)
            .ok_or_else(|| CalendarError::overflow("calendar year to ISO year"))
    }

    /// Converts an ISO year to the calendar year
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the result does not fit an `i32`.
    pub fn calendar_year_of(&self, iso_year: i32) -> Result<i32, CalendarError> {
        iso_year
            .checked_add(ISO_YEAR_OFFSET)
            .ok_or_else(|| CalendarError::overflow("ISO year to calendar year"))
    }

    /// True when the calendar year contains St. Tib's Day
    pub const fn is_leap_year(&self, year: i32) -> bool {
        is_leap_year(year as i64 - ISO_YEAR_OFFSET as i64)
    }

    pub const fn length_of_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) { DAYS_PER_YEAR + 1 } else { DAYS_PER_YEAR }
    }

    /// Calendar years representable by the underlying ISO date
    pub fn year_range(&self) -> ValueRange {
        let offset = i64::from(ISO_YEAR_OFFSET);
        ValueRange::of(
            i64::from(NaiveDate::MIN.year()) + offset,
            i64::from(NaiveDate::MAX.year()) + offset,
        )
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the season is not in 1..=5.
    pub fn season_name(&self, season: i64) -> Result<&'static str, CalendarError> {
        Ok(self.validate_season(season)?.name())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the weekday is not in 1..=5.
    pub fn day_name(&self, weekday: i64) -> Result<&'static str, CalendarError> {
        Ok(self.validate_day_of_week(weekday)?.name())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the season is not in 1..=5.
    pub fn validate_season(&self, season: i64) -> Result<Season, CalendarError> {
        Season::from_value(season)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the day is not in 1..=73.
    pub fn validate_day_of_season(&self, day_of_season: i64) -> Result<DayOfSeason, CalendarError> {
        DayOfSeason::from_value(day_of_season)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the weekday is not in 1..=5.
    pub fn validate_day_of_week(&self, weekday: i64) -> Result<Weekday, CalendarError> {
        Weekday::from_value(weekday)
    }

    /// Range of a field. Only the day-of-month and week-of-month ranges are
    /// specific to this calendar; the rest are the proleptic-Gregorian ones.
    pub fn range(&self, field: Field) -> ValueRange {
        match field {
            Field::DayOfMonth => crate::types::DAY_OF_SEASON_RANGE,
            Field::AlignedWeekOfMonth => crate::types::WEEKDAY_RANGE,
            Field::Era => ValueRange::of(0, 1),
            Field::Year => ValueRange::of(i64::from(NaiveDate::MIN.year()), i64::from(NaiveDate::MAX.year())),
            Field::MonthOfYear => ValueRange::of(1, 12),
            Field::DayOfWeek => ValueRange::of(1, 7),
            Field::DayOfYear => ValueRange::of(1, i64::from(DAYS_PER_YEAR) + 1),
        }
    }

    pub const fn eras(&self) -> &'static [Era] {
        &[Era::Yold]
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for any value but 1.
    pub fn era_of(&self, value: i64) -> Result<Era, CalendarError> {
        if value == ERA_VALUE {
            Ok(Era::Yold)
        } else {
            Err(CalendarError::OutOfRange {
                field: "era",
                value,
                range: ValueRange::of(ERA_VALUE, ERA_VALUE),
            })
        }
    }

    /// # Errors
    /// See [`DiscordianDate::of`].
    pub fn date(&self, year: i32, season: u8, day_of_season: u8) -> Result<DiscordianDate, CalendarError> {
        DiscordianDate::of(year, season, day_of_season)
    }

    /// # Errors
    /// See [`DiscordianDate::of_year_day`].
    pub fn date_year_day(&self, year: i32, day_of_year: u16) -> Result<DiscordianDate, CalendarError> {
        DiscordianDate::of_year_day(year, day_of_year)
    }

    /// Converts any calendar date through its ISO equivalent. A
    /// `DiscordianDate` maps to an equal value.
    pub fn date_from<T: CalendarDate + ?Sized>(&self, temporal: &T) -> DiscordianDate {
        DiscordianDate::from_iso(temporal.to_iso_date())
    }

    /// Today's date from the local clock
    pub fn date_now(&self) -> DiscordianDate {
        DiscordianDate::from_iso(Local::now().date_naive())
    }

    pub(crate) fn check_same_calendar<T: CalendarDate + ?Sized>(&self, other: &T) -> Result<(), CalendarError> {
        let found = other.calendar_id();
        if found == CALENDAR_ID {
            return Ok(());
        }
        debug!(found, "rejected date from another calendar");
        Err(CalendarError::IncompatibleCalendar {
            expected: CALENDAR_ID,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{discordian, iso};

    #[test]
    fn test_identity() {
        assert_eq!(DISCORDIAN.id(), "Discordian");
        assert_eq!(DISCORDIAN.calendar_type(), "discordian");
        assert_eq!(DISCORDIAN, Discordian);
    }

    #[test]
    fn test_year_translation() {
        assert_eq!(DISCORDIAN.iso_year_of(3179), Ok(2013));
        assert_eq!(DISCORDIAN.iso_year_of(0), Ok(-1166));
        assert_eq!(DISCORDIAN.calendar_year_of(2013), Ok(3179));
        assert_eq!(DISCORDIAN.calendar_year_of(-1166), Ok(0));
    }

    #[test]
    fn test_year_translation_overflow() {
        assert!(matches!(DISCORDIAN.iso_year_of(i32::MIN), Err(CalendarError::Overflow(_))));
        assert!(matches!(DISCORDIAN.calendar_year_of(i32::MAX), Err(CalendarError::Overflow(_))));
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:    i32,
            is_leap: bool,
        }

        let cases = [
            TestCase { year: 3179, is_leap: false },
            TestCase { year: 3178, is_leap: true },
            TestCase { year: 3066, is_leap: false },
            TestCase { year: 3166, is_leap: true },
            TestCase { year: i32::MIN, is_leap: false },
        ];

        for case in &cases {
            assert_eq!(DISCORDIAN.is_leap_year(case.year), case.is_leap, "year {}", case.year);
        }

        assert_eq!(DISCORDIAN.length_of_year(3178), 366);
        assert_eq!(DISCORDIAN.length_of_year(3179), 365);
    }

    #[test]
    fn test_names() {
        assert_eq!(DISCORDIAN.season_name(1), Ok("Chaos"));
        assert_eq!(DISCORDIAN.season_name(5), Ok("The Aftermath"));
        assert_eq!(DISCORDIAN.day_name(4), Ok("Prickle-Prickle"));

        assert!(matches!(
            DISCORDIAN.season_name(6),
            Err(CalendarError::OutOfRange { field: "season", value: 6, .. })
        ));
        assert!(matches!(
            DISCORDIAN.day_name(0),
            Err(CalendarError::OutOfRange { field: "weekday", value: 0, .. })
        ));
    }

    #[test]
    fn test_validation() {
        assert!(DISCORDIAN.validate_season(-1).is_err());
        assert!(DISCORDIAN.validate_season(3).is_ok());
        assert!(DISCORDIAN.validate_day_of_season(73).is_ok());
        assert!(DISCORDIAN.validate_day_of_week(6).is_err());

        let err = DISCORDIAN
            .validate_day_of_season(74)
            .expect_err("74 is past the end of a season");
        assert_eq!(err.to_string(), "74 is not a valid Discordian day-of-season. Valid values are 1..73");
    }

    #[test]
    fn test_ranges() {
        assert_eq!(DISCORDIAN.range(Field::DayOfMonth), ValueRange::of(1, 73));
        assert_eq!(DISCORDIAN.range(Field::AlignedWeekOfMonth), ValueRange::of(1, 5));
        assert_eq!(DISCORDIAN.range(Field::MonthOfYear), ValueRange::of(1, 12));
        assert_eq!(DISCORDIAN.range(Field::DayOfWeek), ValueRange::of(1, 7));
        assert_eq!(DISCORDIAN.range(Field::DayOfYear), ValueRange::of(1, 366));
        assert!(DISCORDIAN.year_range().is_valid(3179));
        assert!(DISCORDIAN.year_range().is_valid(0));
    }

    #[test]
    fn test_eras() {
        assert_eq!(DISCORDIAN.eras(), &[Era::Yold]);
        assert_eq!(Era::Yold.to_string(), "YOLD");
        assert_eq!(Era::Yold.value(), 1);
        assert_eq!(DISCORDIAN.era_of(1), Ok(Era::Yold));
        assert!(matches!(DISCORDIAN.era_of(0), Err(CalendarError::OutOfRange { field: "era", .. })));
    }

    #[test]
    fn test_date_factories() {
        let date = DISCORDIAN.date(3179, 2, 19).expect("valid discordian date");
        assert_eq!(date.iso_date(), iso(2013, 4, 2));

        let leap_day = DISCORDIAN.date_year_day(3178, 60).expect("valid day of year");
        assert_eq!(leap_day.iso_date(), iso(2012, 2, 29));
    }

    #[test]
    fn test_date_from() {
        let from_iso = DISCORDIAN.date_from(&iso(2013, 4, 2));
        assert_eq!(from_iso, discordian(3179, 2, 19));

        let from_datetime = DISCORDIAN.date_from(&iso(2013, 4, 2).and_hms_opt(23, 59, 0).expect("valid time"));
        assert_eq!(from_datetime, discordian(3179, 2, 19));

        let original = discordian(3178, 5, 73);
        assert_eq!(DISCORDIAN.date_from(&original), original);
    }

    #[test]
    fn test_check_same_calendar() {
        assert!(DISCORDIAN.check_same_calendar(&discordian(3179, 1, 1)).is_ok());
        assert_eq!(
            DISCORDIAN.check_same_calendar(&iso(2013, 1, 1)),
            Err(CalendarError::IncompatibleCalendar {
                expected: "Discordian",
                found:    "ISO",
            })
        );
    }
}
