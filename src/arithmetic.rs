use std::cmp::Ordering;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::{
    CalendarDate, CalendarError, DISCORDIAN, DiscordianDate,
    consts::{DAYS_PER_SEASON, DAYS_PER_WEEK},
    prelude::*,
};

const MONTHS_PER_YEAR: i64 = 12;

/// Units of date arithmetic.
///
/// `Seasons` take the place of months and always count 73 days; `Weeks`
/// count five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Unit {
    Days,
    Weeks,
    Seasons,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
}

impl Unit {
    /// Days in one unit, for the units measured in days
    const fn days(self) -> Option<i64> {
        match self {
            Self::Days => Some(1),
            Self::Weeks => Some(DAYS_PER_WEEK as i64),
            Self::Seasons => Some(DAYS_PER_SEASON as i64),
            _ => None,
        }
    }

    /// Years in one unit, for the units measured in years
    const fn years(self) -> Option<i64> {
        match self {
            Self::Years => Some(1),
            Self::Decades => Some(10),
            Self::Centuries => Some(100),
            Self::Millennia => Some(1000),
            _ => None,
        }
    }
}

impl DiscordianDate {
    /// Adds an amount of a unit.
    ///
    /// Weeks and seasons are added as 5 and 73 days. Years go through the ISO
    /// date, so St. Tib's Day plus one year is Chaos 59.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the amount cannot be scaled or the
    /// result is out of range, and `CalendarError::UnsupportedOperation` for eras.
    pub fn plus(&self, amount: i64, unit: Unit) -> Result<Self, CalendarError> {
        if let Some(days) = unit.days() {
            let days = amount
                .checked_mul(days)
                .ok_or_else(|| CalendarError::overflow("scaling amount to days"))?;
            return self.plus_days(days);
        }
        if let Some(years) = unit.years() {
            let years = amount
                .checked_mul(years)
                .ok_or_else(|| CalendarError::overflow("scaling amount to years"))?;
            return self.plus_years(years);
        }
        Err(CalendarError::UnsupportedOperation(
            "unable to add eras, the Discordian calendar has only one era",
        ))
    }

    /// Subtracts an amount of a unit. See [`Self::plus`].
    ///
    /// # Errors
    /// As [`Self::plus`]; negating `i64::MIN` is an overflow.
    pub fn minus(&self, amount: i64, unit: Unit) -> Result<Self, CalendarError> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| CalendarError::overflow("negating amount"))?;
        self.plus(negated, unit)
    }

    fn plus_days(&self, days: i64) -> Result<Self, CalendarError> {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.iso_date().checked_add_days(magnitude)
        } else {
            self.iso_date().checked_sub_days(magnitude)
        };
        shifted.map(Self::from_iso).ok_or_else(|| CalendarError::overflow("adding days"))
    }

    fn plus_years(&self, years: i64) -> Result<Self, CalendarError> {
        let months = years
            .checked_mul(MONTHS_PER_YEAR)
            .and_then(|months| u32::try_from(months.unsigned_abs()).ok())
            .ok_or_else(|| CalendarError::overflow("scaling years to months"))?;
        let shifted = if years >= 0 {
            self.iso_date().checked_add_months(Months::new(months))
        } else {
            self.iso_date().checked_sub_months(Months::new(months))
        };
        shifted.map(Self::from_iso).ok_or_else(|| CalendarError::overflow("adding years"))
    }

    /// Whole units from this date until `end`, negative if `end` is earlier.
    ///
    /// Weeks and seasons are the day span divided by 5 and 73. Eras are
    /// always zero.
    ///
    /// # Errors
    /// Returns `CalendarError::IncompatibleCalendar` if `end` is not a
    /// Discordian date.
    pub fn until<T: CalendarDate + ?Sized>(&self, end: &T, unit: Unit) -> Result<i64, CalendarError> {
        DISCORDIAN.check_same_calendar(end)?;
        let end = end.to_iso_date();

        if let Some(days) = unit.days() {
            return Ok(end.signed_duration_since(self.iso_date()).num_days() / days);
        }
        if let Some(years) = unit.years() {
            return Ok(months_between(self.iso_date(), end) / (MONTHS_PER_YEAR * years));
        }
        Ok(0)
    }

    /// Orders this date against another calendar date.
    ///
    /// # Errors
    /// Returns `CalendarError::IncompatibleCalendar` if `other` is not a
    /// Discordian date.
    pub fn compare<T: CalendarDate + ?Sized>(&self, other: &T) -> Result<Ordering, CalendarError> {
        DISCORDIAN.check_same_calendar(other)?;
        Ok(self.iso_date().cmp(&other.to_iso_date()))
    }
}

/// Whole ISO months between two dates, truncated toward zero
fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    // month index * 32 + day keeps the day-of-month as a tie breaker
    let packed = |date: NaiveDate| {
        (i64::from(date.year()) * MONTHS_PER_YEAR + i64::from(date.month0())) * 32 + i64::from(date.day())
    };
    (packed(end) - packed(start)) / 32
}
