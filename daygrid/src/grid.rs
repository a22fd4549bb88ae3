//! Month grid construction.
//!
//! A grid tiles whole weeks: it opens on or before the 1st of its month at
//! the configured first day of the week, and closes on or after the last
//! day of the month. The month's own days are a contiguous run inside it;
//! the cells around them belong to the adjacent months.

use smallvec::SmallVec;

use crate::date::{CalendarDate, DAYS_IN_WEEK, Weekday, YearMonth, week_starting_at};

/// Number of week rows a fixed-weeks grid always has.
pub const FIXED_WEEK_COUNT: usize = 6;

/// One grid row of exactly seven consecutive dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    days: [CalendarDate; DAYS_IN_WEEK],
}

impl Week {
    /// Returns the dates of this week in grid order.
    pub fn days(&self) -> &[CalendarDate; DAYS_IN_WEEK] {
        &self.days
    }

    /// Returns the first date of this week.
    pub fn first(&self) -> CalendarDate {
        self.days[0]
    }

    /// Returns the last date of this week.
    pub fn last(&self) -> CalendarDate {
        self.days[DAYS_IN_WEEK - 1]
    }

    /// Returns the ISO week number of this row, taken from its first day.
    pub fn number(&self) -> u8 {
        self.days[0].iso_week_number()
    }

    /// Iterates over the dates of this week.
    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.days.iter().copied()
    }
}

/// A position within a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Zero-based week row.
    pub week: usize,
    /// Zero-based day column within the week.
    pub day: usize,
}

impl GridPosition {
    /// Returns the flat cell index of this position.
    pub fn to_flat(self) -> usize {
        self.week * DAYS_IN_WEEK + self.day
    }

    /// Returns the position of a flat cell index.
    pub fn from_flat(index: usize) -> Self {
        Self {
            week: index / DAYS_IN_WEEK,
            day: index % DAYS_IN_WEEK,
        }
    }
}

/// The ordered week rows rendered for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    weeks: SmallVec<[Week; FIXED_WEEK_COUNT]>,
}

impl MonthGrid {
    /// Returns the month this grid was built for.
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Returns the week rows in display order.
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Returns the number of week rows (4-6).
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Returns the total number of day cells.
    pub fn cell_count(&self) -> usize {
        self.weeks.len() * DAYS_IN_WEEK
    }

    /// Returns the date in the grid's top-left cell.
    pub fn first_cell(&self) -> CalendarDate {
        self.weeks[0].first()
    }

    /// Returns the date in the grid's bottom-right cell.
    pub fn last_cell(&self) -> CalendarDate {
        self.weeks[self.weeks.len() - 1].last()
    }

    /// Returns the date at a flat cell index, if it is in range.
    pub fn day_at(&self, index: usize) -> Option<CalendarDate> {
        if index >= self.cell_count() {
            return None;
        }
        let position = GridPosition::from_flat(index);
        Some(self.weeks[position.week].days[position.day])
    }

    /// Returns the grid position of `date`, if the grid contains it.
    pub fn position_of(&self, date: CalendarDate) -> Option<GridPosition> {
        let offset = self.first_cell().days_until(date);
        if offset < 0 || offset as usize >= self.cell_count() {
            return None;
        }
        Some(GridPosition::from_flat(offset as usize))
    }

    /// Returns true when `date` belongs to an adjacent month rather than
    /// the grid's own.
    pub fn is_outside(&self, date: CalendarDate) -> bool {
        !self.month.contains(date)
    }

    /// Iterates over every day cell in row-major order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.weeks.iter().flat_map(|week| week.iter())
    }
}

/// Builds the grid of week rows for `month`.
///
/// The first cell is the date on or before the 1st of `month` that falls
/// on `first_day_of_week`; the last cell closes the week containing the
/// month's final day. With `fixed_weeks`, trailing weeks keep the day
/// sequence running until exactly [`FIXED_WEEK_COUNT`] rows are present.
///
/// Building is deterministic: the same inputs always produce the same
/// grid.
pub fn build_month_grid(month: YearMonth, first_day_of_week: Weekday, fixed_weeks: bool) -> MonthGrid {
    let mut weeks: SmallVec<[Week; FIXED_WEEK_COUNT]> = SmallVec::new();
    let mut cursor = week_starting_at(month.first_day(), first_day_of_week)[0];
    let last_day = month.last_day();

    while cursor <= last_day || (fixed_weeks && weeks.len() < FIXED_WEEK_COUNT) {
        let mut days = [cursor; DAYS_IN_WEEK];
        for (idx, slot) in days.iter_mut().enumerate() {
            *slot = cursor.add_days(idx as i64);
        }
        weeks.push(Week { days });
        cursor = cursor.add_days(DAYS_IN_WEEK as i64);
    }
    MonthGrid { month, weeks }
}

/// Returns the seven weekdays in display order for a grid anchored at
/// `first_day_of_week`. Feeds the host's weekday header row.
pub fn weekday_sequence(first_day_of_week: Weekday) -> [Weekday; DAYS_IN_WEEK] {
    let mut days = [Weekday::Monday; DAYS_IN_WEEK];
    let start = first_day_of_week.index_from_monday();
    for (idx, slot) in days.iter_mut().enumerate() {
        *slot = Weekday::from_monday_index(start + idx as i32);
    }
    days
}
