mod arithmetic;
mod chronology;
mod consts;
mod fields;
mod prelude;
#[cfg(test)]
mod test_utils;
mod types;

pub use arithmetic::Unit;
pub use chronology::{CalendarDate, CalendarError, DISCORDIAN, Discordian, Era, Field, ValueRange};
pub use consts::*;
pub use types::{DAY_OF_SEASON_RANGE, DayOfSeason, SEASON_RANGE, Season, WEEKDAY_RANGE, Weekday};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A date in the Discordian calendar.
///
/// Only the equivalent proleptic-Gregorian date is stored. Season, day of
/// season and weekday are derived on every call from the leap-adjusted day
/// of the year, so St. Tib's Day (ISO day 60 of a leap year) never has any
/// of them.
///
/// Ordering and equality follow the ISO date. The text form does not sort
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct DiscordianDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {_0}")]
    InvalidYear(String),
    #[display(fmt = "Invalid day of season: {} (must be 1-{})", "_0", DAYS_PER_SEASON)]
    InvalidDayOfSeason(String),
    #[display(fmt = "Unknown season name: {_0}")]
    UnknownSeason(String),
    #[display(fmt = "Unknown day name: {_0}")]
    UnknownDay(String),
    #[display(fmt = "Unknown era: {} (expected {})", "_0", ERA_NAME)]
    UnknownEra(String),
    #[display(fmt = "Day name {stated} does not match the date, which is a {actual}")]
    WeekdayMismatch { stated: String, actual: &'static str },
    #[display(fmt = "{} is not a leap year", "_0")]
    NotALeapYear(i32),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl DiscordianDate {
    /// Creates a date from a year, season and day of season.
    ///
    /// Never yields St. Tib's Day: in a leap year every day from Chaos 60
    /// onwards lands one ISO day later.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the season is not in 1..=5, the
    /// day is not in 1..=73 or the year is outside the supported range.
    pub fn of(year: i32, season: u8, day_of_season: u8) -> Result<Self, CalendarError> {
        let season = DISCORDIAN.validate_season(i64::from(season))?;
        let day_of_season = DISCORDIAN.validate_day_of_season(i64::from(day_of_season))?;
        Self::from_fields(year, season, day_of_season)
    }

    /// Creates a date from already validated fields
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is outside the supported range.
    pub fn from_fields(year: i32, season: Season, day_of_season: DayOfSeason) -> Result<Self, CalendarError> {
        let day_of_year = day_of_calendar_year(year, season, day_of_season);
        trace!(
            year,
            season = season.get(),
            day_of_season = day_of_season.get(),
            day_of_year,
            "resolved discordian fields"
        );
        Self::of_year_day(year, day_of_year)
    }

    /// Creates a date from a year and ISO day of the year. Day 60 of a leap
    /// year is St. Tib's Day.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the day is not valid for the
    /// year or the year is outside the supported range, and
    /// `CalendarError::Overflow` if the year cannot be translated.
    pub fn of_year_day(year: i32, day_of_year: u16) -> Result<Self, CalendarError> {
        let iso_year = DISCORDIAN.iso_year_of(year)?;
        let day_range = ValueRange::of(1, i64::from(DISCORDIAN.length_of_year(year)));
        if !day_range.is_valid(i64::from(day_of_year)) {
            return Err(CalendarError::OutOfRange {
                field: "day-of-year",
                value: i64::from(day_of_year),
                range: day_range,
            });
        }
        trace!(year, iso_year, day_of_year, "constructing discordian date");
        NaiveDate::from_yo_opt(iso_year, u32::from(day_of_year))
            .map(Self)
            .ok_or(CalendarError::OutOfRange {
                field: "year",
                value: i64::from(year),
                range: DISCORDIAN.year_range(),
            })
    }

    /// St. Tib's Day of the year.
    ///
    /// Does not check the year: for a non-leap year this is simply day 60,
    /// Chaos 60.
    ///
    /// # Errors
    /// See [`Self::of_year_day`].
    pub fn leap_day_of(year: i32) -> Result<Self, CalendarError> {
        Self::of_year_day(year, ST_TIBS_DAY)
    }

    /// Wraps a proleptic-Gregorian date
    pub const fn from_iso(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date from the local clock
    pub fn today() -> Self {
        DISCORDIAN.date_now()
    }

    /// The equivalent proleptic-Gregorian date
    pub const fn iso_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the calendar year
    pub fn year(&self) -> i32 {
        // chrono's year range keeps this well inside i32
        self.0.year() + ISO_YEAR_OFFSET
    }

    pub fn era(&self) -> Era {
        Era::Yold
    }

    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// True for St. Tib's Day
    pub fn is_leap_day(&self) -> bool {
        self.is_leap_year() && self.0.ordinal() == u32::from(ST_TIBS_DAY)
    }

    /// ISO day of the year with St. Tib's Day's slot removed, so that it
    /// runs 1..=365 in every year. `None` on St. Tib's Day.
    pub fn leap_adjusted_day_of_year(&self) -> Option<u16> {
        let day_of_year = u16::try_from(self.0.ordinal()).ok()?;
        if !self.is_leap_year() {
            return Some(day_of_year);
        }
        match day_of_year.cmp(&ST_TIBS_DAY) {
            std::cmp::Ordering::Less => Some(day_of_year),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(day_of_year - 1),
        }
    }

    /// Returns the season if present (as u8 for convenience)
    pub fn season(&self) -> Option<u8> {
        self.season_typed().map(Season::get)
    }

    /// Returns the day of the season if present (as u8 for convenience)
    pub fn day_of_season(&self) -> Option<u8> {
        self.day_of_season_typed().map(DayOfSeason::get)
    }

    /// Returns the weekday if present (as u8 for convenience)
    pub fn day_of_week(&self) -> Option<u8> {
        self.day_of_week_typed().map(Weekday::get)
    }

    pub fn season_typed(&self) -> Option<Season> {
        self.leap_adjusted_day_of_year().and_then(Season::containing)
    }

    pub fn day_of_season_typed(&self) -> Option<DayOfSeason> {
        self.leap_adjusted_day_of_year().and_then(DayOfSeason::containing)
    }

    pub fn day_of_week_typed(&self) -> Option<Weekday> {
        self.leap_adjusted_day_of_year().and_then(Weekday::containing)
    }

    pub fn season_name(&self) -> Option<&'static str> {
        self.season_typed().map(Season::name)
    }

    pub fn day_name(&self) -> Option<&'static str> {
        self.day_of_week_typed().map(Weekday::name)
    }
}

/// ISO day of the year for a season and day, shifted past St. Tib's Day in leap years
fn day_of_calendar_year(year: i32, season: Season, day_of_season: DayOfSeason) -> u16 {
    let nominal = u16::from(season.get() - 1) * u16::from(DAYS_PER_SEASON) + u16::from(day_of_season.get());
    if DISCORDIAN.is_leap_year(year) && nominal >= ST_TIBS_DAY {
        nominal + 1
    } else {
        nominal
    }
}

impl fmt::Display for DiscordianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.day_of_week_typed(), self.season_typed(), self.day_of_season_typed()) {
            (Some(weekday), Some(season), Some(day)) => {
                write!(f, "{}{FIELD_SEPARATOR}{} {day}{FIELD_SEPARATOR}", weekday.name(), season.name())?;
            },
            _ => write!(f, "{LEAP_DAY_MARKER} ")?,
        }
        write!(f, "{} {}", self.year(), self.era())
    }
}

impl FromStr for DiscordianDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if s.trim() != s {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        // Anything but the exact Display form is rejected
        let date = Self::parse_text(s)?;
        if date.to_string() != s {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        Ok(date)
    }
}

impl DiscordianDate {
    fn parse_text(s: &str) -> Result<Self, ParseError> {
        let (head, era) = s
            .rsplit_once(' ')
            .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))?;
        if era != ERA_NAME {
            return Err(ParseError::UnknownEra(era.to_owned()));
        }

        if let Some(rest) = head.strip_prefix(LEAP_DAY_MARKER) {
            return Self::parse_leap_day(rest.trim());
        }

        // Weekday, Season Day, Year
        let (day_name, rest) = head
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))?;
        let (season_and_day, year) = rest
            .rsplit_once(FIELD_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))?;
        let (season_name, day) = season_and_day
            .rsplit_once(' ')
            .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))?;

        let weekday = Weekday::from_name(day_name).ok_or_else(|| ParseError::UnknownDay(day_name.to_owned()))?;
        let season = Season::from_name(season_name).ok_or_else(|| ParseError::UnknownSeason(season_name.to_owned()))?;
        let day_of_season = day
            .parse::<u8>()
            .ok()
            .and_then(|value| DayOfSeason::new(value).ok())
            .ok_or_else(|| ParseError::InvalidDayOfSeason(day.to_owned()))?;
        let year_value = Self::parse_year(year)?;

        let date = Self::from_fields(year_value, season, day_of_season)
            .map_err(|_| ParseError::InvalidYear(year.to_owned()))?;
        match date.day_of_week_typed() {
            Some(actual) if actual == weekday => Ok(date),
            actual => Err(ParseError::WeekdayMismatch {
                stated: day_name.to_owned(),
                actual: actual.map_or(LEAP_DAY_MARKER, Weekday::name),
            }),
        }
    }

    fn parse_year(s: &str) -> Result<i32, ParseError> {
        s.parse::<i32>().map_err(|_| ParseError::InvalidYear(s.to_owned()))
    }

    fn parse_leap_day(year: &str) -> Result<Self, ParseError> {
        let year_value = Self::parse_year(year)?;
        if !DISCORDIAN.is_leap_year(year_value) {
            return Err(ParseError::NotALeapYear(year_value));
        }
        Self::leap_day_of(year_value).map_err(|_| ParseError::InvalidYear(year.to_owned()))
    }
}

impl serde::Serialize for DiscordianDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DiscordianDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
