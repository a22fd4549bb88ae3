//! Month navigation state.
//!
//! The [`Navigator`] owns the current visible month and applies the
//! navigation policy: optional `from`/`to` month bounds, a coarse
//! can-change-month switch, and paged stepping over multi-month views.
//! Requests that fall outside the policy are silent no-ops, not errors;
//! the caller can probe `can_show_*` to grey out its controls.

use tracing::debug;

use crate::date::{CalendarDate, YearMonth};

/// Inputs the navigator derives its initial state from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorOptions {
    /// Month shown first.
    pub initial_month: YearMonth,
    /// How many consecutive months are visible at once.
    pub number_of_months: usize,
    /// Earliest month that may be shown.
    pub from_month: Option<YearMonth>,
    /// Latest month that may be shown.
    pub to_month: Option<YearMonth>,
    /// Step by a full page of `number_of_months` instead of one month.
    pub paged_navigation: bool,
    /// Master switch for all navigation.
    pub can_change_month: bool,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            initial_month: CalendarDate::today().year_month(),
            number_of_months: 1,
            from_month: None,
            to_month: None,
            paged_navigation: false,
            can_change_month: true,
        }
    }
}

/// State machine over the currently visible month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current_month: YearMonth,
    number_of_months: usize,
    from_month: Option<YearMonth>,
    to_month: Option<YearMonth>,
    paged_navigation: bool,
    can_change_month: bool,
}

impl Navigator {
    /// Creates a navigator, deriving the initial month from the options.
    ///
    /// With paged navigation over a multi-month view anchored at
    /// `from_month`, the initial month snaps to the page boundary aligned
    /// to `from_month` at multiples of `number_of_months`. Otherwise, with
    /// a `to_month` bound and a multi-month view, the initial month snaps
    /// backward so the visible window does not overrun `to_month`.
    pub fn new(options: NavigatorOptions) -> Self {
        let number_of_months = options.number_of_months.max(1);
        let span = number_of_months as i32;
        let mut current_month = options.initial_month;

        if options.paged_navigation
            && number_of_months > 1
            && let Some(from) = options.from_month
        {
            let diff = from.months_between(current_month);
            current_month = from.add_months(diff.div_euclid(span) * span);
        } else if number_of_months > 1
            && let Some(to) = options.to_month
        {
            let last_visible = current_month.add_months(span - 1);
            if to.months_between(last_visible) > 0 {
                current_month = to.add_months(1 - span);
            }
        }

        Self {
            current_month,
            number_of_months,
            from_month: options.from_month,
            to_month: options.to_month,
            paged_navigation: options.paged_navigation,
            can_change_month: options.can_change_month,
        }
    }

    /// Returns the first visible month.
    pub fn current_month(&self) -> YearMonth {
        self.current_month
    }

    /// Returns how many consecutive months are visible.
    pub fn number_of_months(&self) -> usize {
        self.number_of_months
    }

    /// Returns the earliest month that may be shown, if bounded.
    pub fn from_month(&self) -> Option<YearMonth> {
        self.from_month
    }

    /// Returns the latest month that may be shown, if bounded.
    pub fn to_month(&self) -> Option<YearMonth> {
        self.to_month
    }

    /// Returns true when stepping moves by a full page of months.
    pub fn paged_navigation(&self) -> bool {
        self.paged_navigation
    }

    /// Returns true when navigation is enabled at all.
    pub fn can_change_month(&self) -> bool {
        self.can_change_month
    }

    /// Returns the visible months, starting at the current one.
    pub fn visible_months(&self) -> Vec<YearMonth> {
        (0..self.number_of_months as i32)
            .map(|offset| self.current_month.add_months(offset))
            .collect()
    }

    /// Returns true when `month` may become the current month.
    pub fn is_month_allowed(&self, month: YearMonth) -> bool {
        if !self.can_change_month {
            return false;
        }
        if let Some(from) = self.from_month
            && from.months_between(month) < 0
        {
            return false;
        }
        if let Some(to) = self.to_month
            && to.months_between(month) > 0
        {
            return false;
        }
        true
    }

    /// Makes `month` the current month.
    ///
    /// Disallowed targets leave the state untouched and return `false`;
    /// the caller decides whether an accepted transition is worth
    /// notifying about. Showing the month that is already current is
    /// accepted and changes nothing.
    pub fn show_month(&mut self, month: YearMonth) -> bool {
        if !self.is_month_allowed(month) {
            debug!(month = %month, "month change rejected by navigation bounds");
            return false;
        }
        self.current_month = month;
        true
    }

    /// Returns true when stepping forward is possible.
    ///
    /// The probe is the month one full view past the current one, so a
    /// multi-month view never steps into a window it could not fill
    /// within bounds.
    pub fn can_show_next_month(&self) -> bool {
        self.is_month_allowed(self.current_month.add_months(self.number_of_months as i32))
    }

    /// Returns true when stepping backward is possible.
    pub fn can_show_previous_month(&self) -> bool {
        self.is_month_allowed(self.current_month.add_months(-1))
    }

    /// Steps forward by one month, or a full page under paged navigation.
    pub fn show_next_month(&mut self) -> bool {
        if !self.can_show_next_month() {
            return false;
        }
        let delta = if self.paged_navigation {
            self.number_of_months as i32
        } else {
            1
        };
        self.show_month(self.current_month.add_months(delta))
    }

    /// Steps backward by one month, or a full page under paged navigation.
    pub fn show_previous_month(&mut self) -> bool {
        if !self.can_show_previous_month() {
            return false;
        }
        let delta = if self.paged_navigation {
            self.number_of_months as i32
        } else {
            1
        };
        self.show_month(self.current_month.add_months(-delta))
    }

    /// Steps forward a year. Gated by the can-change-month switch alone;
    /// the target still runs through the month bounds.
    pub fn show_next_year(&mut self) -> bool {
        if !self.can_change_month {
            return false;
        }
        self.show_month(self.current_month.add_months(12))
    }

    /// Steps backward a year. Gated like [`Navigator::show_next_year`].
    pub fn show_previous_year(&mut self) -> bool {
        if !self.can_change_month {
            return false;
        }
        self.show_month(self.current_month.add_months(-12))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u8) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn bounded(from: (i32, u8), to: (i32, u8), current: (i32, u8)) -> Navigator {
        Navigator::new(NavigatorOptions {
            initial_month: month(current.0, current.1),
            from_month: Some(month(from.0, from.1)),
            to_month: Some(month(to.0, to.1)),
            ..NavigatorOptions::default()
        })
    }

    #[test]
    fn test_next_month_is_rejected_at_the_upper_bound() {
        let mut navigator = bounded((2018, 9), (2018, 11), (2018, 11));
        assert!(!navigator.can_show_next_month());
        assert!(!navigator.show_next_month());
        assert_eq!(navigator.current_month(), month(2018, 11));
    }

    #[test]
    fn test_previous_month_is_rejected_at_the_lower_bound() {
        let mut navigator = bounded((2018, 9), (2018, 11), (2018, 9));
        assert!(!navigator.show_previous_month());
        assert_eq!(navigator.current_month(), month(2018, 9));

        assert!(navigator.show_next_month());
        assert!(navigator.show_previous_month());
        assert_eq!(navigator.current_month(), month(2018, 9));
    }

    #[test]
    fn test_show_month_is_a_silent_noop_out_of_bounds() {
        let mut navigator = bounded((2018, 9), (2018, 11), (2018, 10));
        assert!(!navigator.show_month(month(2018, 12)));
        assert!(!navigator.show_month(month(2018, 8)));
        assert_eq!(navigator.current_month(), month(2018, 10));
    }

    #[test]
    fn test_show_month_is_idempotent_at_the_current_month() {
        let mut navigator = bounded((2018, 9), (2018, 11), (2018, 10));
        let before = navigator.clone();
        assert!(navigator.show_month(month(2018, 10)));
        assert_eq!(navigator, before);
    }

    #[test]
    fn test_can_change_month_disables_everything() {
        let mut navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2024, 3),
            can_change_month: false,
            ..NavigatorOptions::default()
        });
        assert!(!navigator.show_next_month());
        assert!(!navigator.show_previous_month());
        assert!(!navigator.show_next_year());
        assert!(!navigator.show_previous_year());
        assert!(!navigator.show_month(month(2024, 4)));
        assert_eq!(navigator.current_month(), month(2024, 3));
    }

    #[test]
    fn test_year_steps_ignore_paging_but_respect_bounds() {
        let mut navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2024, 3),
            to_month: Some(month(2024, 12)),
            ..NavigatorOptions::default()
        });
        // 2025-03 overruns to_month, so the year step is a no-op.
        assert!(!navigator.show_next_year());
        assert_eq!(navigator.current_month(), month(2024, 3));

        assert!(navigator.show_previous_year());
        assert_eq!(navigator.current_month(), month(2023, 3));
    }

    #[test]
    fn test_paged_navigation_steps_by_page() {
        let mut navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2024, 1),
            number_of_months: 3,
            paged_navigation: true,
            ..NavigatorOptions::default()
        });
        assert!(navigator.show_next_month());
        assert_eq!(navigator.current_month(), month(2024, 4));
        assert!(navigator.show_previous_month());
        assert_eq!(navigator.current_month(), month(2024, 1));
    }

    #[test]
    fn test_initial_month_aligns_to_page_boundaries() {
        let navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2024, 5),
            number_of_months: 2,
            from_month: Some(month(2024, 1)),
            paged_navigation: true,
            ..NavigatorOptions::default()
        });
        // Pages anchored at 2024-01 are Jan, Mar, May... 2024-05 is a
        // boundary already; 2024-06 would snap back to it.
        assert_eq!(navigator.current_month(), month(2024, 5));

        let navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2024, 6),
            number_of_months: 2,
            from_month: Some(month(2024, 1)),
            paged_navigation: true,
            ..NavigatorOptions::default()
        });
        assert_eq!(navigator.current_month(), month(2024, 5));
    }

    #[test]
    fn test_initial_month_snaps_back_from_the_upper_bound() {
        let navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2018, 11),
            number_of_months: 3,
            to_month: Some(month(2018, 12)),
            ..NavigatorOptions::default()
        });
        // Nov-Jan would overrun 2018-12; Oct-Dec just fits.
        assert_eq!(navigator.current_month(), month(2018, 10));

        let navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2018, 6),
            number_of_months: 3,
            to_month: Some(month(2018, 12)),
            ..NavigatorOptions::default()
        });
        // No overrun, no snapping.
        assert_eq!(navigator.current_month(), month(2018, 6));
    }

    #[test]
    fn test_number_of_months_is_clamped_to_one() {
        let navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2024, 3),
            number_of_months: 0,
            ..NavigatorOptions::default()
        });
        assert_eq!(navigator.number_of_months(), 1);
        assert_eq!(navigator.visible_months(), vec![month(2024, 3)]);
    }

    #[test]
    fn test_visible_months_are_consecutive() {
        let navigator = Navigator::new(NavigatorOptions {
            initial_month: month(2024, 11),
            number_of_months: 3,
            ..NavigatorOptions::default()
        });
        assert_eq!(
            navigator.visible_months(),
            vec![month(2024, 11), month(2024, 12), month(2025, 1)]
        );
    }
}
