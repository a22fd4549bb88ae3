//! Day classification.
//!
//! A "modifier" is a named boolean classification attached to a day, such
//! as `selected`, `disabled` or `outside`. Hosts describe which days carry
//! which names with [`DayMatcher`]s; [`classify`] evaluates one day against
//! the whole configuration and returns the set of active names.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

use crate::date::{CalendarDate, Weekday, YearMonth};

/// Modifier names the engine itself may inject.
pub mod names {
    /// The day is selected.
    pub const SELECTED: &str = "selected";
    /// The day cannot be interacted with.
    pub const DISABLED: &str = "disabled";
    /// The day belongs to an adjacent month of the grid showing it.
    pub const OUTSIDE: &str = "outside";
    /// The day is the current date.
    pub const TODAY: &str = "today";
}

/// A host predicate deciding whether a day matches.
pub type DayPredicate = Arc<dyn Fn(CalendarDate) -> bool + Send + Sync>;

/// Describes which days a modifier applies to.
///
/// Degenerate ranges never match: a [`DayMatcher::Range`] whose `from` lies
/// after its `to`, or with neither bound, is treated as empty rather than
/// an error.
#[derive(Clone)]
pub enum DayMatcher {
    /// Exactly one day.
    Day(CalendarDate),
    /// Any day in the list.
    Days(Vec<CalendarDate>),
    /// Days between the bounds, inclusive; open-ended when a bound is
    /// missing.
    Range {
        /// Earliest matching day.
        from: Option<CalendarDate>,
        /// Latest matching day.
        to: Option<CalendarDate>,
    },
    /// Days strictly after the given day. The day itself does not match.
    After(CalendarDate),
    /// Days strictly before the given day. The day itself does not match.
    Before(CalendarDate),
    /// Days falling on any of the listed weekdays.
    DaysOfWeek(Vec<Weekday>),
    /// Days accepted by a host-supplied predicate.
    Predicate(DayPredicate),
    /// Days matched by any matcher in the list.
    Any(Vec<DayMatcher>),
}

impl DayMatcher {
    /// Wraps a host closure as a predicate matcher.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(CalendarDate) -> bool + Send + Sync + 'static,
    {
        DayMatcher::Predicate(Arc::new(f))
    }

    /// Returns true when `date` matches this matcher.
    pub fn matches(&self, date: CalendarDate) -> bool {
        match self {
            DayMatcher::Day(day) => *day == date,
            DayMatcher::Days(days) => days.contains(&date),
            DayMatcher::Range { from, to } => match (from, to) {
                (Some(from), Some(to)) => *from <= date && date <= *to,
                (Some(from), None) => *from <= date,
                (None, Some(to)) => date <= *to,
                (None, None) => false,
            },
            DayMatcher::After(day) => date > *day,
            DayMatcher::Before(day) => date < *day,
            DayMatcher::DaysOfWeek(weekdays) => weekdays.contains(&date.weekday()),
            DayMatcher::Predicate(predicate) => predicate(date),
            DayMatcher::Any(matchers) => matchers.iter().any(|matcher| matcher.matches(date)),
        }
    }
}

impl fmt::Debug for DayMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayMatcher::Day(day) => f.debug_tuple("Day").field(day).finish(),
            DayMatcher::Days(days) => f.debug_tuple("Days").field(days).finish(),
            DayMatcher::Range { from, to } => f
                .debug_struct("Range")
                .field("from", from)
                .field("to", to)
                .finish(),
            DayMatcher::After(day) => f.debug_tuple("After").field(day).finish(),
            DayMatcher::Before(day) => f.debug_tuple("Before").field(day).finish(),
            DayMatcher::DaysOfWeek(weekdays) => {
                f.debug_tuple("DaysOfWeek").field(weekdays).finish()
            }
            DayMatcher::Predicate(_) => f.write_str("Predicate(..)"),
            DayMatcher::Any(matchers) => f.debug_tuple("Any").field(matchers).finish(),
        }
    }
}

impl PartialEq for DayMatcher {
    /// Structural equality for the host's dirty checks. Predicates compare
    /// by pointer identity, since closures have no structural form.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DayMatcher::Day(a), DayMatcher::Day(b)) => a == b,
            (DayMatcher::Days(a), DayMatcher::Days(b)) => a == b,
            (
                DayMatcher::Range { from: a_from, to: a_to },
                DayMatcher::Range { from: b_from, to: b_to },
            ) => a_from == b_from && a_to == b_to,
            (DayMatcher::After(a), DayMatcher::After(b)) => a == b,
            (DayMatcher::Before(a), DayMatcher::Before(b)) => a == b,
            (DayMatcher::DaysOfWeek(a), DayMatcher::DaysOfWeek(b)) => a == b,
            (DayMatcher::Predicate(a), DayMatcher::Predicate(b)) => Arc::ptr_eq(a, b),
            (DayMatcher::Any(a), DayMatcher::Any(b)) => a == b,
            _ => false,
        }
    }
}

/// The host's modifier configuration: the dedicated `selected`/`disabled`
/// slots plus arbitrarily named custom matchers.
///
/// The dedicated slots take precedence over custom entries using the same
/// name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifiers {
    selected: Option<DayMatcher>,
    disabled: Option<DayMatcher>,
    custom: BTreeMap<String, DayMatcher>,
}

impl Modifiers {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the matcher for the `selected` modifier.
    pub fn with_selected(mut self, matcher: DayMatcher) -> Self {
        self.selected = Some(matcher);
        self
    }

    /// Sets the matcher for the `disabled` modifier.
    pub fn with_disabled(mut self, matcher: DayMatcher) -> Self {
        self.disabled = Some(matcher);
        self
    }

    /// Adds a custom named modifier.
    pub fn with_custom(mut self, name: impl Into<String>, matcher: DayMatcher) -> Self {
        self.custom.insert(name.into(), matcher);
        self
    }

    /// Returns the `selected` matcher, if any.
    pub fn selected(&self) -> Option<&DayMatcher> {
        self.selected.as_ref()
    }

    /// Returns the `disabled` matcher, if any.
    pub fn disabled(&self) -> Option<&DayMatcher> {
        self.disabled.as_ref()
    }

    /// Returns the custom matchers keyed by modifier name.
    pub fn custom(&self) -> &BTreeMap<String, DayMatcher> {
        &self.custom
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &DayMatcher)> {
        let shadowed = |name: &str| {
            (name == names::SELECTED && self.selected.is_some())
                || (name == names::DISABLED && self.disabled.is_some())
        };
        self.custom
            .iter()
            .filter(move |(name, _)| !shadowed(name.as_str()))
            .map(|(name, matcher)| (name.as_str(), matcher))
            .chain(
                self.selected
                    .iter()
                    .map(|matcher| (names::SELECTED, matcher)),
            )
            .chain(
                self.disabled
                    .iter()
                    .map(|matcher| (names::DISABLED, matcher)),
            )
    }

    fn has_custom_today(&self) -> bool {
        self.custom.contains_key(names::TODAY)
    }
}

/// Inputs the engine needs beyond the date itself.
///
/// `today` is supplied by the caller, never read from a clock here, so
/// classification stays deterministic and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyContext {
    /// The month of the grid the day is rendered in.
    pub reference_month: YearMonth,
    /// The current date.
    pub today: CalendarDate,
}

/// The set of modifier names active on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet {
    active: BTreeSet<String>,
}

impl ModifierSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a modifier name.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.active.insert(name.into());
    }

    /// Returns true when the named modifier is active.
    pub fn contains(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    /// Returns true when no modifier is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns the number of active modifiers.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Iterates over the active names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    /// Returns true when the day is selected.
    pub fn is_selected(&self) -> bool {
        self.contains(names::SELECTED)
    }

    /// Returns true when the day is disabled.
    pub fn is_disabled(&self) -> bool {
        self.contains(names::DISABLED)
    }

    /// Returns true when the day belongs to an adjacent month.
    pub fn is_outside(&self) -> bool {
        self.contains(names::OUTSIDE)
    }

    /// Returns true when the day is the current date.
    pub fn is_today(&self) -> bool {
        self.contains(names::TODAY)
    }
}

impl<S: Into<String>> FromIterator<S> for ModifierSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            active: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Evaluates `date` against the whole modifier configuration.
///
/// Every configured name whose matcher accepts the date is included. Two
/// names are layered in underneath the host configuration: `today` when
/// the date equals [`ClassifyContext::today`] and the host supplied no
/// explicit `today` matcher, and `outside` when the date falls outside
/// [`ClassifyContext::reference_month`]. The result is a set; the
/// configuration's iteration order never affects it.
pub fn classify(date: CalendarDate, modifiers: &Modifiers, context: &ClassifyContext) -> ModifierSet {
    let mut set = ModifierSet::new();
    for (name, matcher) in modifiers.entries() {
        if matcher.matches(date) {
            set.insert(name);
        }
    }
    if !modifiers.has_custom_today() && date == context.today {
        set.insert(names::TODAY);
    }
    if !context.reference_month.contains(date) {
        set.insert(names::OUTSIDE);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn context(year: i32, month: u8) -> ClassifyContext {
        ClassifyContext {
            reference_month: YearMonth::new(year, month).unwrap(),
            // A fixed date keeps the implicit `today` injection out of the
            // way unless a test opts in.
            today: date(1970, 1, 1),
        }
    }

    #[test]
    fn test_selected_day_list() {
        let modifiers = Modifiers::new()
            .with_selected(DayMatcher::Days(vec![date(2018, 1, 1), date(2018, 1, 3)]));
        let ctx = context(2018, 1);

        assert!(classify(date(2018, 1, 3), &modifiers, &ctx).is_selected());
        assert!(!classify(date(2018, 1, 2), &modifiers, &ctx).is_selected());
    }

    #[test]
    fn test_range_is_inclusive_and_open_ended() {
        let range = DayMatcher::Range {
            from: Some(date(2024, 3, 10)),
            to: Some(date(2024, 3, 20)),
        };
        assert!(range.matches(date(2024, 3, 10)));
        assert!(range.matches(date(2024, 3, 20)));
        assert!(!range.matches(date(2024, 3, 9)));
        assert!(!range.matches(date(2024, 3, 21)));

        let open_end = DayMatcher::Range {
            from: Some(date(2024, 3, 10)),
            to: None,
        };
        assert!(open_end.matches(date(2030, 1, 1)));
        assert!(!open_end.matches(date(2024, 3, 9)));

        let open_start = DayMatcher::Range {
            from: None,
            to: Some(date(2024, 3, 10)),
        };
        assert!(open_start.matches(date(2000, 1, 1)));
        assert!(!open_start.matches(date(2024, 3, 11)));
    }

    #[test]
    fn test_degenerate_ranges_never_match() {
        let inverted = DayMatcher::Range {
            from: Some(date(2024, 3, 20)),
            to: Some(date(2024, 3, 10)),
        };
        for day in 1..=31 {
            assert!(!inverted.matches(date(2024, 3, day)));
        }
        let unbounded = DayMatcher::Range { from: None, to: None };
        assert!(!unbounded.matches(date(2024, 3, 15)));
    }

    #[test]
    fn test_after_and_before_are_strictly_exclusive() {
        let after = DayMatcher::After(date(2024, 3, 15));
        assert!(!after.matches(date(2024, 3, 15)));
        assert!(after.matches(date(2024, 3, 16)));
        assert!(!after.matches(date(2024, 3, 14)));

        let before = DayMatcher::Before(date(2024, 3, 15));
        assert!(!before.matches(date(2024, 3, 15)));
        assert!(before.matches(date(2024, 3, 14)));
        assert!(!before.matches(date(2024, 3, 16)));
    }

    #[test]
    fn test_weekday_and_predicate_matchers() {
        let weekends = DayMatcher::DaysOfWeek(vec![Weekday::Saturday, Weekday::Sunday]);
        assert!(weekends.matches(date(2024, 3, 2)));
        assert!(!weekends.matches(date(2024, 3, 1)));

        let firsts = DayMatcher::predicate(|day| day.day() == 1);
        assert!(firsts.matches(date(2024, 3, 1)));
        assert!(!firsts.matches(date(2024, 3, 2)));
    }

    #[test]
    fn test_any_combines_with_or() {
        let matcher = DayMatcher::Any(vec![
            DayMatcher::Day(date(2024, 3, 1)),
            DayMatcher::Range {
                from: Some(date(2024, 3, 10)),
                to: Some(date(2024, 3, 12)),
            },
        ]);
        assert!(matcher.matches(date(2024, 3, 1)));
        assert!(matcher.matches(date(2024, 3, 11)));
        assert!(!matcher.matches(date(2024, 3, 5)));
    }

    #[test]
    fn test_classification_is_insertion_order_independent() {
        let a = Modifiers::new()
            .with_custom("payday", DayMatcher::Day(date(2024, 3, 15)))
            .with_custom("audit", DayMatcher::DaysOfWeek(vec![Weekday::Friday]));
        let b = Modifiers::new()
            .with_custom("audit", DayMatcher::DaysOfWeek(vec![Weekday::Friday]))
            .with_custom("payday", DayMatcher::Day(date(2024, 3, 15)));
        let ctx = context(2024, 3);

        // 2024-03-15 is a Friday, so both names are active.
        let from_a = classify(date(2024, 3, 15), &a, &ctx);
        let from_b = classify(date(2024, 3, 15), &b, &ctx);
        assert_eq!(from_a, from_b);
        assert!(from_a.contains("payday"));
        assert!(from_a.contains("audit"));
    }

    #[test]
    fn test_implicit_today_and_explicit_override() {
        let ctx = ClassifyContext {
            reference_month: YearMonth::new(2024, 3).unwrap(),
            today: date(2024, 3, 15),
        };

        let implicit = classify(date(2024, 3, 15), &Modifiers::new(), &ctx);
        assert!(implicit.is_today());
        assert!(!classify(date(2024, 3, 14), &Modifiers::new(), &ctx).is_today());

        // An explicit `today` matcher replaces the implicit rule entirely.
        let explicit = Modifiers::new().with_custom(names::TODAY, DayMatcher::Day(date(2024, 3, 1)));
        assert!(!classify(date(2024, 3, 15), &explicit, &ctx).is_today());
        assert!(classify(date(2024, 3, 1), &explicit, &ctx).is_today());
    }

    #[test]
    fn test_outside_reflects_reference_month() {
        let ctx = context(2024, 3);
        assert!(classify(date(2024, 2, 25), &Modifiers::new(), &ctx).is_outside());
        assert!(classify(date(2024, 4, 6), &Modifiers::new(), &ctx).is_outside());
        assert!(!classify(date(2024, 3, 15), &Modifiers::new(), &ctx).is_outside());
    }

    #[test]
    fn test_dedicated_slots_shadow_custom_names() {
        let modifiers = Modifiers::new()
            .with_selected(DayMatcher::Day(date(2024, 3, 1)))
            .with_custom(names::SELECTED, DayMatcher::Day(date(2024, 3, 2)));
        let ctx = context(2024, 3);

        assert!(classify(date(2024, 3, 1), &modifiers, &ctx).is_selected());
        assert!(!classify(date(2024, 3, 2), &modifiers, &ctx).is_selected());
    }

    #[test]
    fn test_matcher_equality_for_dirty_checks() {
        assert_eq!(
            DayMatcher::Day(date(2024, 3, 1)),
            DayMatcher::Day(date(2024, 3, 1))
        );
        assert_ne!(
            DayMatcher::Day(date(2024, 3, 1)),
            DayMatcher::Day(date(2024, 3, 2))
        );

        let predicate = DayMatcher::predicate(|day| day.day() == 1);
        assert_eq!(predicate, predicate.clone());
        assert_ne!(predicate, DayMatcher::predicate(|day| day.day() == 1));
    }
}
