use chrono::Datelike;

use crate::{
    CalendarError, DISCORDIAN, DiscordianDate, Field, Unit, ValueRange, Weekday,
    consts::{DAYS_PER_SEASON, DAYS_PER_WEEK, ERA_VALUE},
};

const DAYS_PER_ISO_WEEK: u32 = 7;

impl DiscordianDate {
    /// Value of a field, `None` where the field has no value on this date.
    ///
    /// Season, day of season and weekday are absent on St. Tib's Day. Day of
    /// year and week of month are the ISO values.
    pub fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::Era => Some(ERA_VALUE),
            Field::Year => Some(i64::from(self.year())),
            Field::MonthOfYear => self.season().map(i64::from),
            Field::DayOfMonth => self.day_of_season().map(i64::from),
            Field::DayOfWeek => self.day_of_week().map(i64::from),
            Field::DayOfYear => Some(i64::from(self.iso_date().ordinal())),
            Field::AlignedWeekOfMonth => Some(i64::from((self.iso_date().day() - 1) / DAYS_PER_ISO_WEEK + 1)),
        }
    }

    pub fn range(&self, field: Field) -> ValueRange {
        DISCORDIAN.range(field)
    }

    pub const fn length_of_season(&self) -> u8 {
        DAYS_PER_SEASON
    }

    pub fn length_of_year(&self) -> u16 {
        DISCORDIAN.length_of_year(self.year())
    }

    /// Same season, different day. St. Tib's Day counts as part of Chaos.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the day is not in 1..=73.
    pub fn with_day_of_season(&self, day_of_season: u8) -> Result<Self, CalendarError> {
        let season = self.season().unwrap_or(1);
        Self::of(self.year(), season, day_of_season)
    }

    /// Same year, different ISO day of the year
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the day is not valid for the year.
    pub fn with_day_of_year(&self, day_of_year: u16) -> Result<Self, CalendarError> {
        Self::of_year_day(self.year(), day_of_year)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is outside the supported range.
    pub fn first_day_of_season(&self) -> Result<Self, CalendarError> {
        self.with_day_of_season(1)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is outside the supported range.
    pub fn last_day_of_season(&self) -> Result<Self, CalendarError> {
        self.with_day_of_season(DAYS_PER_SEASON)
    }

    /// First date in the current season falling on `weekday`
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is outside the supported range.
    pub fn first_in_season(&self, weekday: Weekday) -> Result<Self, CalendarError> {
        let first = self.first_day_of_season()?;
        let Some(current) = first.day_of_week() else {
            return Ok(first);
        };
        let forward = (i64::from(weekday.get()) - i64::from(current)).rem_euclid(i64::from(DAYS_PER_WEEK));
        first.plus(forward, Unit::Days)
    }

    /// Last date in the current season falling on `weekday`
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is outside the supported range.
    pub fn last_in_season(&self, weekday: Weekday) -> Result<Self, CalendarError> {
        let last = self.last_day_of_season()?;
        let Some(current) = last.day_of_week() else {
            return Ok(last);
        };
        let back = (i64::from(current) - i64::from(weekday.get())).rem_euclid(i64::from(DAYS_PER_WEEK));
        last.minus(back, Unit::Days)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is outside the supported range.
    pub fn first_day_of_year(&self) -> Result<Self, CalendarError> {
        self.with_day_of_year(1)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year is outside the supported range.
    pub fn last_day_of_year(&self) -> Result<Self, CalendarError> {
        self.with_day_of_year(self.length_of_year())
    }
}
