use chrono::NaiveDate;

use crate::DiscordianDate;

pub fn discordian(year: i32, season: u8, day_of_season: u8) -> DiscordianDate {
    DiscordianDate::of(year, season, day_of_season)
        .unwrap_or_else(|e| panic!("invalid discordian date {year}/{season}/{day_of_season}: {e}"))
}

pub fn year_day(year: i32, day_of_year: u16) -> DiscordianDate {
    DiscordianDate::of_year_day(year, day_of_year)
        .unwrap_or_else(|e| panic!("invalid day {day_of_year} of year {year}: {e}"))
}

pub fn iso(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| panic!("invalid ISO date {year}-{month}-{day}"))
}
