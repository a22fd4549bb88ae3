//! Calendar date arithmetic for grid building and navigation.
//!
//! Everything here is pure and total over valid dates: month stepping,
//! weekday math, ISO week numbers and day-sequence expansion. Dates are
//! value types at day granularity; operations return new values.

use std::{
    fmt,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use thiserror::Error;

/// Number of day cells in one calendar row.
pub const DAYS_IN_WEEK: usize = 7;

/// Days of the week in Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    /// Returns the zero-based index counted from Monday.
    pub fn index_from_monday(self) -> i32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Returns the weekday at the given Monday-based index, wrapping modulo 7.
    pub fn from_monday_index(index: i32) -> Self {
        match index.rem_euclid(7) {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    /// Returns the zero-based index counted from Sunday.
    ///
    /// This is the numbering hosts coming from locale tables tend to use
    /// for `first_day_of_week`.
    pub fn index_from_sunday(self) -> i32 {
        (self.index_from_monday() + 1).rem_euclid(7)
    }

    /// Returns the weekday at the given Sunday-based index, wrapping modulo 7.
    pub fn from_sunday_index(index: i32) -> Self {
        Weekday::from_monday_index(index - 1)
    }
}

/// A calendar date expressed as year, month, and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a calendar date if the values are valid.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month (1-31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns the current date in UTC.
    pub fn today() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let days = (duration.as_secs() / 86_400) as i64;
        let (year, month, day) = civil_from_days(days);
        CalendarDate::new(year, month, day)
            .unwrap_or_else(|| CalendarDate::new_unchecked(1970, 1, 1))
    }

    /// Returns the month this date belongs to.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::new_unchecked(self.year, self.month)
    }

    /// Returns the first day of this date's month.
    pub fn start_of_month(&self) -> Self {
        CalendarDate::new_unchecked(self.year, self.month, 1)
    }

    /// Returns the weekday this date falls on.
    pub fn weekday(&self) -> Weekday {
        let days = days_from_civil(self.year, self.month, self.day);
        Weekday::from_monday_index(((days + 3).rem_euclid(7)) as i32)
    }

    /// Returns the date `delta` days away.
    pub fn add_days(&self, delta: i64) -> Self {
        let (year, month, day) =
            civil_from_days(days_from_civil(self.year, self.month, self.day) + delta);
        CalendarDate::new_unchecked(year, month, day)
    }

    /// Returns the date `delta` months away, preserving the day of month.
    ///
    /// When the target month is shorter than this date's day, the excess
    /// days spill into the following month instead of clamping: January 31
    /// plus one month is March 3 (March 2 in a leap year).
    pub fn add_months(&self, delta: i32) -> Self {
        let target = self.year_month().add_months(delta);
        let max_day = target.days_in_month();
        if self.day <= max_day {
            CalendarDate::new_unchecked(target.year(), target.month(), self.day)
        } else {
            let spill = target.add_months(1);
            CalendarDate::new_unchecked(spill.year(), spill.month(), self.day - max_day)
        }
    }

    /// Returns true when both dates fall in the same month of the same year.
    pub fn is_same_month(&self, other: CalendarDate) -> bool {
        self.year == other.year && self.month == other.month
    }

    /// Returns the ISO-8601 week number of this date (1-53).
    ///
    /// ISO weeks start on Monday; week 1 is the week containing the year's
    /// first Thursday. Dates in the first days of January may therefore
    /// belong to week 52 or 53 of the previous year, and late December
    /// dates to week 1 of the next.
    pub fn iso_week_number(&self) -> u8 {
        let jan1 = CalendarDate::new_unchecked(self.year, 1, 1);
        let ordinal = days_from_civil(self.year, self.month, self.day)
            - days_from_civil(jan1.year, jan1.month, jan1.day)
            + 1;
        let weekday = self.weekday().index_from_monday() as i64 + 1;
        let week = (ordinal - weekday + 10) / 7;
        if week < 1 {
            CalendarDate::new_unchecked(self.year - 1, 12, 31).iso_week_number()
        } else if week == 53 && !iso_year_has_53_weeks(self.year) {
            1
        } else {
            week as u8
        }
    }

    /// Signed number of days from this date to `other`.
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        days_from_civil(other.year, other.month, other.day)
            - days_from_civil(self.year, self.month, self.day)
    }

    fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d)) => (
                y.parse::<i32>()
                    .map_err(|_| DateParseError::Malformed(s.to_string()))?,
                m.parse::<u8>()
                    .map_err(|_| DateParseError::Malformed(s.to_string()))?,
                d.parse::<u8>()
                    .map_err(|_| DateParseError::Malformed(s.to_string()))?,
            ),
            _ => return Err(DateParseError::Malformed(s.to_string())),
        };
        CalendarDate::new(year, month, day).ok_or(DateParseError::InvalidDate { year, month, day })
    }
}

/// A year and month pair used for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a year/month pair if the values are valid.
    pub fn new(year: i32, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the date for this month at the provided day.
    pub fn to_date(&self, day: u8) -> Option<CalendarDate> {
        CalendarDate::new(self.year, self.month, day)
    }

    /// Adds or subtracts months, adjusting the year as needed.
    pub fn add_months(&self, delta: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + delta;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        Self { year, month }
    }

    /// Signed number of month boundaries from this month to `other`.
    pub fn months_between(&self, other: YearMonth) -> i32 {
        (other.year * 12 + other.month as i32) - (self.year * 12 + self.month as i32)
    }

    /// Returns the first day of this month.
    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, 1)
    }

    /// Returns the last day of this month.
    pub fn last_day(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.year, self.month, self.days_in_month())
    }

    /// Returns the number of days in this month.
    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    /// Returns true when `date` falls inside this month.
    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    fn new_unchecked(year: i32, month: u8) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '-');
        let (year, month) = match (parts.next(), parts.next()) {
            (Some(y), Some(m)) => (
                y.parse::<i32>()
                    .map_err(|_| DateParseError::Malformed(s.to_string()))?,
                m.parse::<u8>()
                    .map_err(|_| DateParseError::Malformed(s.to_string()))?,
            ),
            _ => return Err(DateParseError::Malformed(s.to_string())),
        };
        YearMonth::new(year, month).ok_or(DateParseError::InvalidMonth { year, month })
    }
}

/// Errors produced when constructing dates from host-supplied strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// The input is not shaped like an ISO `YYYY-MM-DD` or `YYYY-MM` value.
    #[error("expected an ISO date like 2024-03-01, got {0:?}")]
    Malformed(String),
    /// The components parsed but do not name a real calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate {
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: u8,
        /// Parsed day.
        day: u8,
    },
    /// The components parsed but do not name a real month.
    #[error("{year:04}-{month:02} is not a valid month")]
    InvalidMonth {
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: u8,
    },
}

/// Returns the seven consecutive dates of the week containing `date`,
/// anchored so the first entry falls on `first_day_of_week`.
pub fn week_starting_at(date: CalendarDate, first_day_of_week: Weekday) -> [CalendarDate; DAYS_IN_WEEK] {
    let offset = (date.weekday().index_from_monday() - first_day_of_week.index_from_monday())
        .rem_euclid(7) as i64;
    let start = date.add_days(-offset);
    let mut days = [start; DAYS_IN_WEEK];
    for (idx, slot) in days.iter_mut().enumerate() {
        *slot = start.add_days(idx as i64);
    }
    days
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn iso_year_has_53_weeks(year: i32) -> bool {
    let jan1 = CalendarDate::new_unchecked(year, 1, 1).weekday();
    jan1 == Weekday::Thursday || (is_leap_year(year) && jan1 == Weekday::Wednesday)
}

fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let mut y = year;
    let m = month as i32;
    let d = day as i32;
    y -= if m <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = m + if m > 2 { -3 } else { 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * 146_097 + doe - 719_468) as i64
}

fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = mp + if mp < 10 { 3 } else { -9 };
    let year = y + if month <= 2 { 1 } else { 0 };
    (year as i32, month as u8, day as u8)
}
