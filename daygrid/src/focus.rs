//! Keyboard focus movement across rendered day cells.
//!
//! The navigator works over the flat sequence of day cells the host has
//! rendered (seven cells per week row, concatenated across the visible
//! months). Moves inside the sequence resolve immediately; moves past its
//! edges become cross-month requests: the month must be shown and its grid
//! rendered before the target cell index exists, so the request carries a
//! [`CrossMonthTarget`] to resolve against the new grid's cell count.

use crate::date::DAYS_IN_WEEK;

/// A directional focus move requested by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    /// One cell back (left arrow).
    PreviousDay,
    /// One cell forward (right arrow).
    NextDay,
    /// One row up (up arrow).
    PreviousWeek,
    /// One row down (down arrow).
    NextWeek,
}

/// Which adjacent month a cross-month focus move lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthShift {
    /// The month before the current one.
    Previous,
    /// The month after the current one.
    Next,
}

/// A focus target inside a grid that is not rendered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossMonthTarget {
    /// The cell at this offset from the start of the new sequence.
    FromStart(usize),
    /// The cell at this offset back from the end of the new sequence;
    /// `FromEnd(1)` is the last cell.
    FromEnd(usize),
}

impl CrossMonthTarget {
    /// Resolves the target to a concrete cell index once the new grid's
    /// cell count is known.
    pub fn resolve(self, cell_count: usize) -> usize {
        match self {
            CrossMonthTarget::FromStart(offset) => offset.min(cell_count.saturating_sub(1)),
            CrossMonthTarget::FromEnd(offset) => cell_count.saturating_sub(offset),
        }
    }
}

/// The result of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Focus the cell at this index in the current sequence.
    Within(usize),
    /// Show the adjacent month, then focus the resolved target in it.
    CrossMonth {
        /// Direction of the month change.
        shift: MonthShift,
        /// Where focus lands once the new grid exists.
        target: CrossMonthTarget,
    },
}

/// Computes where focus moves from the cell at `index` in a sequence of
/// `cell_count` rendered cells.
///
/// Row moves crossing the top or bottom preserve the weekday column: the
/// first row of the next month, or the last row of the previous one, at
/// the same column, whatever that month's week count turns out to be.
pub fn step(index: usize, cell_count: usize, focus_move: FocusMove) -> FocusOutcome {
    debug_assert!(cell_count % DAYS_IN_WEEK == 0);
    debug_assert!(index < cell_count);
    match focus_move {
        FocusMove::PreviousDay => {
            if index == 0 {
                FocusOutcome::CrossMonth {
                    shift: MonthShift::Previous,
                    target: CrossMonthTarget::FromEnd(1),
                }
            } else {
                FocusOutcome::Within(index - 1)
            }
        }
        FocusMove::NextDay => {
            if index + 1 == cell_count {
                FocusOutcome::CrossMonth {
                    shift: MonthShift::Next,
                    target: CrossMonthTarget::FromStart(0),
                }
            } else {
                FocusOutcome::Within(index + 1)
            }
        }
        FocusMove::PreviousWeek => {
            if index < DAYS_IN_WEEK {
                FocusOutcome::CrossMonth {
                    shift: MonthShift::Previous,
                    target: CrossMonthTarget::FromEnd(DAYS_IN_WEEK - index),
                }
            } else {
                FocusOutcome::Within(index - DAYS_IN_WEEK)
            }
        }
        FocusMove::NextWeek => {
            if index + DAYS_IN_WEEK >= cell_count {
                FocusOutcome::CrossMonth {
                    shift: MonthShift::Next,
                    target: CrossMonthTarget::FromStart(index + DAYS_IN_WEEK - cell_count),
                }
            } else {
                FocusOutcome::Within(index + DAYS_IN_WEEK)
            }
        }
    }
}
