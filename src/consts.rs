/// Days in each of the five seasons
pub const DAYS_PER_SEASON: u8 = 73;

/// Days in a Discordian week
pub const DAYS_PER_WEEK: u8 = 5;

/// Seasons in a year (5 * 73 = 365)
pub const SEASONS_PER_YEAR: u8 = 5;

/// Days in a year without St. Tib's Day
pub const DAYS_PER_YEAR: u16 = 365;

/// Calendar year = ISO year + `ISO_YEAR_OFFSET` (year 0 YOLD is 1166 BC)
pub const ISO_YEAR_OFFSET: i32 = 1166;

/// ISO day-of-year occupied by St. Tib's Day in a leap year
pub const ST_TIBS_DAY: u16 = 60;

/// Season names (index 0 is season 1)
pub const SEASON_NAMES: [&str; SEASONS_PER_YEAR as usize] =
    ["Chaos", "Discord", "Confusion", "Bureaucracy", "The Aftermath"];

/// Day names (index 0 is weekday 1)
pub const DAY_NAMES: [&str; DAYS_PER_WEEK as usize] =
    ["Sweetmorn", "Boomtime", "Pungenday", "Prickle-Prickle", "Setting Orange"];

/// Label of the single era
pub const ERA_NAME: &str = "YOLD";

/// Numeric value of the single era
pub const ERA_VALUE: i64 = 1;

/// Text rendered in place of weekday, season and day for the leap day
pub const LEAP_DAY_MARKER: &str = "St. Tib's Day!";

/// Calendar identifier
pub const CALENDAR_ID: &str = "Discordian";

/// Calendar type, as used by calendar registries
pub const CALENDAR_TYPE: &str = "discordian";

/// Calendar identifier reported by plain proleptic-Gregorian dates
pub const ISO_CALENDAR_ID: &str = "ISO";

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Separator between the weekday name and the rest of the text form
pub const FIELD_SEPARATOR: &str = ", ";
