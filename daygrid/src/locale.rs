//! Injected label formatting.
//!
//! The core never formats text on its own: captions, weekday headers and
//! day accessibility labels all go through a [`CalendarLocale`], keyed by
//! the host's locale identifier. [`EnglishLocale`] is the built-in
//! default.

use crate::date::{CalendarDate, Weekday, YearMonth};

/// Formatting capability supplied by the host.
///
/// Implementations receive the locale identifier the picker was configured
/// with and may ignore it (the default implementation does).
pub trait CalendarLocale: Send + Sync {
    /// Returns the caption title for a month, e.g. "March 2024".
    fn month_title(&self, month: YearMonth, locale: &str) -> String;

    /// Returns the short weekday header label, e.g. "Mon".
    fn weekday_short(&self, weekday: Weekday, locale: &str) -> String;

    /// Returns the full weekday name, e.g. "Monday".
    fn weekday_long(&self, weekday: Weekday, locale: &str) -> String;

    /// Returns the accessibility label for a day cell.
    fn day_label(&self, date: CalendarDate, locale: &str) -> String;

    /// Returns the weekday grids start on when the host configures none.
    fn first_day_of_week(&self, _locale: &str) -> Weekday {
        Weekday::Sunday
    }
}

/// English formatting with Sunday-first weeks.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocale;

impl CalendarLocale for EnglishLocale {
    fn month_title(&self, month: YearMonth, _locale: &str) -> String {
        format!("{} {}", month_name(month.month()), month.year())
    }

    fn weekday_short(&self, weekday: Weekday, _locale: &str) -> String {
        weekday_short_label(weekday).to_string()
    }

    fn weekday_long(&self, weekday: Weekday, _locale: &str) -> String {
        weekday_long_name(weekday).to_string()
    }

    fn day_label(&self, date: CalendarDate, _locale: &str) -> String {
        format!(
            "{}, {} {}, {}",
            weekday_long_name(date.weekday()),
            month_name(date.month()),
            date.day(),
            date.year()
        )
    }
}

fn month_name(month: u8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

fn weekday_long_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

fn weekday_short_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_labels() {
        let locale = EnglishLocale;
        let month = YearMonth::new(2024, 3).unwrap();
        assert_eq!(locale.month_title(month, "en"), "March 2024");
        assert_eq!(locale.weekday_short(Weekday::Saturday, "en"), "Sat");
        assert_eq!(locale.weekday_long(Weekday::Saturday, "en"), "Saturday");

        let date = CalendarDate::new(2024, 3, 1).unwrap();
        assert_eq!(locale.day_label(date, "en"), "Friday, March 1, 2024");
        assert_eq!(locale.first_day_of_week("en"), Weekday::Sunday);
    }
}
