//! Headless calendar and date picker core.
//!
//! `daygrid` computes everything a calendar widget needs to render and
//! navigate, without rendering anything itself: month grids with leading
//! and trailing days, per-day modifier classification (selected, disabled,
//! outside, today, custom names), bounded month navigation with paged
//! stepping, and keyboard focus movement that wraps across month
//! boundaries. The host owns the view layer and feeds input events back
//! in.
//!
//! # Example
//!
//! ```
//! use daygrid::{
//!     date::{Weekday, YearMonth},
//!     modifiers::DayMatcher,
//!     picker::{DayPicker, DayPickerArgs},
//! };
//!
//! let month = YearMonth::new(2024, 3).unwrap();
//! let picker = DayPicker::new(
//!     DayPickerArgs::default()
//!         .initial_month(month)
//!         .first_day_of_week(Weekday::Sunday)
//!         .selected_days(DayMatcher::Day("2024-03-15".parse().unwrap())),
//! );
//!
//! let grid = picker.grid_for(month);
//! assert_eq!(grid.week_count(), 6);
//!
//! let cells = picker.day_cells(&grid);
//! assert!(cells.iter().any(|cell| cell.aria_selected));
//! ```

pub mod date;
pub mod focus;
pub mod grid;
pub mod locale;
pub mod modifiers;
pub mod navigation;
pub mod picker;

pub use date::{CalendarDate, DateParseError, Weekday, YearMonth};
pub use focus::{CrossMonthTarget, FocusMove, FocusOutcome, MonthShift};
pub use grid::{GridPosition, MonthGrid, Week, build_month_grid, weekday_sequence};
pub use locale::{CalendarLocale, EnglishLocale};
pub use modifiers::{ClassifyContext, DayMatcher, ModifierSet, Modifiers, classify};
pub use navigation::{Navigator, NavigatorOptions};
pub use picker::{DayCell, DayKey, DayPicker, DayPickerArgs, FocusRequest};
