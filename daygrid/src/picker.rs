//! The host-facing picker facade.
//!
//! [`DayPicker`] ties the core together: it owns the navigation state and
//! the pending cross-month focus target, expands visible months into
//! grids, classifies days into per-cell render feeds, and routes input
//! events to the host's callbacks. Rendering stays entirely on the host
//! side; the picker only hands out data.

use std::{collections::BTreeMap, sync::Arc};

use derive_setters::Setters;
use tracing::{debug, trace};

use crate::{
    date::{CalendarDate, DAYS_IN_WEEK, Weekday, YearMonth},
    focus::{CrossMonthTarget, FocusMove, FocusOutcome, MonthShift, step},
    grid::{MonthGrid, Week, build_month_grid, weekday_sequence},
    locale::{CalendarLocale, EnglishLocale},
    modifiers::{ClassifyContext, DayMatcher, ModifierSet, Modifiers, classify},
    navigation::{Navigator, NavigatorOptions},
};

/// Callback receiving a day and its modifiers.
pub type DayHandler = Arc<dyn Fn(CalendarDate, &ModifierSet) + Send + Sync>;
/// Callback receiving a day, its modifiers, and the pressed key.
pub type DayKeyHandler = Arc<dyn Fn(CalendarDate, &ModifierSet, DayKey) + Send + Sync>;
/// Callback receiving the newly shown month.
pub type MonthHandler = Arc<dyn Fn(YearMonth) + Send + Sync>;
/// Callback receiving a week number and its days.
pub type WeekHandler = Arc<dyn Fn(u8, &Week) + Send + Sync>;

/// Keys the picker reacts to. The host maps its input events onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKey {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Enter.
    Enter,
    /// Space bar.
    Space,
}

/// What the host should focus after a day-level key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Nothing to focus.
    None,
    /// Focus the cell at this index in the currently rendered sequence.
    Cell(usize),
    /// The visible month changed; render it, then ask
    /// [`DayPicker::resolve_pending_focus`] for the cell to focus.
    AfterMonthChange,
}

/// Per-day render feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// The day this cell shows.
    pub date: CalendarDate,
    /// Active modifier names for the day.
    pub modifiers: ModifierSet,
    /// The day belongs to an adjacent month.
    pub outside: bool,
    /// The cell should render as a blank placeholder.
    pub empty: bool,
    /// Tab index for the cell element: 0 on the month's first day when the
    /// picker is interactive, -1 everywhere else.
    pub tab_index: i32,
    /// Accessibility label from the locale capability.
    pub aria_label: String,
    /// Value for the `aria-disabled` attribute.
    pub aria_disabled: bool,
    /// Value for the `aria-selected` attribute.
    pub aria_selected: bool,
}

/// Configuration for [`DayPicker`].
///
/// Matcher and callback slots are set through the dedicated builder
/// methods; everything else uses the generated setters.
#[derive(Clone, Setters)]
pub struct DayPickerArgs {
    /// Month shown initially. Defaults to today's month.
    #[setters(strip_option)]
    pub initial_month: Option<YearMonth>,
    /// Controlled month override; reapplying args with a different value
    /// re-derives the navigation state.
    #[setters(strip_option)]
    pub month: Option<YearMonth>,
    /// How many consecutive months are visible (at least 1).
    pub number_of_months: usize,
    /// Earliest month that may be shown.
    #[setters(strip_option)]
    pub from_month: Option<YearMonth>,
    /// Latest month that may be shown.
    #[setters(strip_option)]
    pub to_month: Option<YearMonth>,
    /// Master switch for month navigation.
    pub can_change_month: bool,
    /// Step by a full page of `number_of_months` months.
    pub paged_navigation: bool,
    /// Render the visible months in reverse order.
    pub reverse_months: bool,
    /// Always lay out six week rows per month.
    pub fixed_weeks: bool,
    /// Expose ISO week numbers alongside each week row.
    pub show_week_numbers: bool,
    /// Render the days of adjacent months instead of blank cells.
    pub enable_outside_days: bool,
    /// First day of the week; defaults to the locale capability's choice.
    #[setters(strip_option)]
    pub first_day_of_week: Option<Weekday>,
    /// Locale identifier forwarded to the locale capability.
    #[setters(into)]
    pub locale: String,
    /// Label formatting capability.
    #[setters(skip)]
    pub locale_utils: Arc<dyn CalendarLocale>,
    /// Label for the today button; the button is absent when unset.
    #[setters(strip_option, into)]
    pub today_button: Option<String>,
    /// Matcher for the `selected` modifier.
    #[setters(skip)]
    pub selected_days: Option<DayMatcher>,
    /// Matcher for the `disabled` modifier.
    #[setters(skip)]
    pub disabled_days: Option<DayMatcher>,
    /// Custom named modifiers.
    #[setters(skip)]
    pub modifiers: BTreeMap<String, DayMatcher>,
    /// Fired after every accepted month transition.
    #[setters(skip)]
    pub on_month_change: Option<MonthHandler>,
    /// Fired when a day is clicked.
    #[setters(skip)]
    pub on_day_click: Option<DayHandler>,
    /// Fired on every day-level key event.
    #[setters(skip)]
    pub on_day_key_down: Option<DayKeyHandler>,
    /// Fired when a day cell receives focus.
    #[setters(skip)]
    pub on_day_focus: Option<DayHandler>,
    /// Fired when the pointer enters a day cell.
    #[setters(skip)]
    pub on_day_mouse_enter: Option<DayHandler>,
    /// Fired when the pointer leaves a day cell.
    #[setters(skip)]
    pub on_day_mouse_leave: Option<DayHandler>,
    /// Fired when a week-number cell is clicked.
    #[setters(skip)]
    pub on_week_click: Option<WeekHandler>,
    /// Fired when a month caption is clicked.
    #[setters(skip)]
    pub on_caption_click: Option<MonthHandler>,
    /// Fired when the today button is clicked.
    #[setters(skip)]
    pub on_today_button_click: Option<DayHandler>,
}

impl Default for DayPickerArgs {
    fn default() -> Self {
        Self {
            initial_month: None,
            month: None,
            number_of_months: 1,
            from_month: None,
            to_month: None,
            can_change_month: true,
            paged_navigation: false,
            reverse_months: false,
            fixed_weeks: false,
            show_week_numbers: false,
            enable_outside_days: false,
            first_day_of_week: None,
            locale: "en".to_string(),
            locale_utils: Arc::new(EnglishLocale),
            today_button: None,
            selected_days: None,
            disabled_days: None,
            modifiers: BTreeMap::new(),
            on_month_change: None,
            on_day_click: None,
            on_day_key_down: None,
            on_day_focus: None,
            on_day_mouse_enter: None,
            on_day_mouse_leave: None,
            on_week_click: None,
            on_caption_click: None,
            on_today_button_click: None,
        }
    }
}

impl DayPickerArgs {
    /// Sets the label formatting capability.
    pub fn locale_utils(mut self, locale_utils: Arc<dyn CalendarLocale>) -> Self {
        self.locale_utils = locale_utils;
        self
    }

    /// Sets the matcher for the `selected` modifier.
    pub fn selected_days(mut self, matcher: DayMatcher) -> Self {
        self.selected_days = Some(matcher);
        self
    }

    /// Sets the matcher for the `disabled` modifier.
    pub fn disabled_days(mut self, matcher: DayMatcher) -> Self {
        self.disabled_days = Some(matcher);
        self
    }

    /// Adds a custom named modifier.
    pub fn modifier(mut self, name: impl Into<String>, matcher: DayMatcher) -> Self {
        self.modifiers.insert(name.into(), matcher);
        self
    }

    /// Sets the month-changed callback.
    pub fn on_month_change<F>(mut self, f: F) -> Self
    where
        F: Fn(YearMonth) + Send + Sync + 'static,
    {
        self.on_month_change = Some(Arc::new(f));
        self
    }

    /// Sets the day-clicked callback.
    pub fn on_day_click<F>(mut self, f: F) -> Self
    where
        F: Fn(CalendarDate, &ModifierSet) + Send + Sync + 'static,
    {
        self.on_day_click = Some(Arc::new(f));
        self
    }

    /// Sets the day-key-down callback.
    pub fn on_day_key_down<F>(mut self, f: F) -> Self
    where
        F: Fn(CalendarDate, &ModifierSet, DayKey) + Send + Sync + 'static,
    {
        self.on_day_key_down = Some(Arc::new(f));
        self
    }

    /// Sets the day-focused callback.
    pub fn on_day_focus<F>(mut self, f: F) -> Self
    where
        F: Fn(CalendarDate, &ModifierSet) + Send + Sync + 'static,
    {
        self.on_day_focus = Some(Arc::new(f));
        self
    }

    /// Sets the pointer-entered-day callback.
    pub fn on_day_mouse_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(CalendarDate, &ModifierSet) + Send + Sync + 'static,
    {
        self.on_day_mouse_enter = Some(Arc::new(f));
        self
    }

    /// Sets the pointer-left-day callback.
    pub fn on_day_mouse_leave<F>(mut self, f: F) -> Self
    where
        F: Fn(CalendarDate, &ModifierSet) + Send + Sync + 'static,
    {
        self.on_day_mouse_leave = Some(Arc::new(f));
        self
    }

    /// Sets the week-clicked callback.
    pub fn on_week_click<F>(mut self, f: F) -> Self
    where
        F: Fn(u8, &Week) + Send + Sync + 'static,
    {
        self.on_week_click = Some(Arc::new(f));
        self
    }

    /// Sets the caption-clicked callback.
    pub fn on_caption_click<F>(mut self, f: F) -> Self
    where
        F: Fn(YearMonth) + Send + Sync + 'static,
    {
        self.on_caption_click = Some(Arc::new(f));
        self
    }

    /// Sets the today-button callback.
    pub fn on_today_button_click<F>(mut self, f: F) -> Self
    where
        F: Fn(CalendarDate, &ModifierSet) + Send + Sync + 'static,
    {
        self.on_today_button_click = Some(Arc::new(f));
        self
    }
}

/// Holds the navigation state and pending focus for one picker instance.
pub struct DayPicker {
    args: DayPickerArgs,
    navigator: Navigator,
    pending_focus: Option<CrossMonthTarget>,
}

impl DayPicker {
    /// Creates a picker from the given configuration.
    pub fn new(args: DayPickerArgs) -> Self {
        let navigator = Navigator::new(navigator_options(&args));
        Self {
            args,
            navigator,
            pending_focus: None,
        }
    }

    /// Returns the active configuration.
    pub fn args(&self) -> &DayPickerArgs {
        &self.args
    }

    /// Returns the navigation state.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Reapplies the configuration.
    ///
    /// The navigation state is re-derived only when the controlled `month`
    /// override actually changed; a changed navigation policy (bounds,
    /// page size, master switch) is refreshed in place around the current
    /// month. Everything else takes effect on the next render pass.
    pub fn apply_args(&mut self, args: DayPickerArgs) {
        let month_changed = args.month != self.args.month;
        let policy_changed = args.from_month != self.args.from_month
            || args.to_month != self.args.to_month
            || args.number_of_months != self.args.number_of_months
            || args.paged_navigation != self.args.paged_navigation
            || args.can_change_month != self.args.can_change_month;
        self.args = args;
        if month_changed {
            debug!("controlled month changed, re-deriving navigation state");
            self.navigator = Navigator::new(navigator_options(&self.args));
        } else if policy_changed {
            let mut options = navigator_options(&self.args);
            options.initial_month = self.navigator.current_month();
            self.navigator = Navigator::new(options);
        }
    }

    /// Returns the first visible month.
    pub fn current_month(&self) -> YearMonth {
        self.navigator.current_month()
    }

    /// Returns the visible months in display order.
    pub fn months(&self) -> Vec<YearMonth> {
        let mut months = self.navigator.visible_months();
        if self.args.reverse_months {
            months.reverse();
        }
        months
    }

    /// Returns the effective first day of the week.
    pub fn first_day_of_week(&self) -> Weekday {
        self.args
            .first_day_of_week
            .unwrap_or_else(|| self.args.locale_utils.first_day_of_week(&self.args.locale))
    }

    /// Returns the weekday header row in display order.
    pub fn weekday_header(&self) -> [Weekday; DAYS_IN_WEEK] {
        weekday_sequence(self.first_day_of_week())
    }

    /// Builds the grid for one visible month.
    pub fn grid_for(&self, month: YearMonth) -> MonthGrid {
        build_month_grid(month, self.first_day_of_week(), self.args.fixed_weeks)
    }

    /// Returns the caption title for a month.
    pub fn month_title(&self, month: YearMonth) -> String {
        self.args.locale_utils.month_title(month, &self.args.locale)
    }

    /// Classifies one day against the configured modifiers, as rendered
    /// in `reference_month`'s grid.
    pub fn classify_day(&self, date: CalendarDate, reference_month: YearMonth) -> ModifierSet {
        let context = ClassifyContext {
            reference_month,
            today: CalendarDate::today(),
        };
        classify(date, &self.modifier_config(), &context)
    }

    /// Builds the render feed for every cell of a grid.
    pub fn day_cells(&self, grid: &MonthGrid) -> Vec<DayCell> {
        let modifiers = self.modifier_config();
        let context = ClassifyContext {
            reference_month: grid.month(),
            today: CalendarDate::today(),
        };
        grid.days()
            .map(|date| self.build_cell(date, &modifiers, &context))
            .collect()
    }

    /// Builds the render feed for a single day.
    pub fn day_cell(&self, date: CalendarDate, reference_month: YearMonth) -> DayCell {
        let context = ClassifyContext {
            reference_month,
            today: CalendarDate::today(),
        };
        self.build_cell(date, &self.modifier_config(), &context)
    }

    /// Shows `month`, firing the month-changed callback when accepted.
    pub fn show_month(&mut self, month: YearMonth) -> bool {
        self.transition(|navigator| navigator.show_month(month))
    }

    /// Steps forward, firing the month-changed callback when accepted.
    pub fn show_next_month(&mut self) -> bool {
        self.transition(Navigator::show_next_month)
    }

    /// Steps backward, firing the month-changed callback when accepted.
    pub fn show_previous_month(&mut self) -> bool {
        self.transition(Navigator::show_previous_month)
    }

    /// Steps forward a year, firing the month-changed callback when
    /// accepted.
    pub fn show_next_year(&mut self) -> bool {
        self.transition(Navigator::show_next_year)
    }

    /// Steps backward a year, firing the month-changed callback when
    /// accepted.
    pub fn show_previous_year(&mut self) -> bool {
        self.transition(Navigator::show_previous_year)
    }

    /// Returns true when the next-month control should be enabled.
    pub fn can_show_next_month(&self) -> bool {
        self.navigator.can_show_next_month()
    }

    /// Returns true when the previous-month control should be enabled.
    pub fn can_show_previous_month(&self) -> bool {
        self.navigator.can_show_previous_month()
    }

    /// Handles a click on a day cell.
    ///
    /// Clicking an outside day first jumps the view to that day's month;
    /// then the day-clicked callback fires with the day's modifiers.
    pub fn handle_day_click(&mut self, date: CalendarDate, reference_month: YearMonth) {
        let modifiers = self.classify_day(date, reference_month);
        if modifiers.is_outside() {
            self.handle_outside_day_click(date);
        }
        if let Some(on_day_click) = self.args.on_day_click.clone() {
            on_day_click(date, &modifiers);
        }
    }

    /// Handles a key press on the day cell at `index` of `cell_count`
    /// rendered cells.
    ///
    /// Arrow keys move focus; a move past the rendered sequence triggers a
    /// month transition and defers the focus target until the host has
    /// rendered the new grid. Enter and Space activate the day like a
    /// click. The day-key-down callback fires last, for every key.
    pub fn handle_day_key_down(
        &mut self,
        date: CalendarDate,
        reference_month: YearMonth,
        index: usize,
        cell_count: usize,
        key: DayKey,
    ) -> FocusRequest {
        let request = match key {
            DayKey::ArrowLeft => self.move_focus(index, cell_count, FocusMove::PreviousDay),
            DayKey::ArrowRight => self.move_focus(index, cell_count, FocusMove::NextDay),
            DayKey::ArrowUp => self.move_focus(index, cell_count, FocusMove::PreviousWeek),
            DayKey::ArrowDown => self.move_focus(index, cell_count, FocusMove::NextWeek),
            DayKey::Enter | DayKey::Space => {
                if self.args.on_day_click.is_some() {
                    self.handle_day_click(date, reference_month);
                }
                FocusRequest::None
            }
        };
        if let Some(on_day_key_down) = self.args.on_day_key_down.clone() {
            let modifiers = self.classify_day(date, reference_month);
            on_day_key_down(date, &modifiers, key);
        }
        request
    }

    /// Handles a key press on the picker wrapper, outside any day cell:
    /// left/right page the months, up/down page the years.
    pub fn handle_key_down(&mut self, key: DayKey) -> bool {
        match key {
            DayKey::ArrowLeft => self.show_previous_month(),
            DayKey::ArrowRight => self.show_next_month(),
            DayKey::ArrowUp => self.show_previous_year(),
            DayKey::ArrowDown => self.show_next_year(),
            DayKey::Enter | DayKey::Space => false,
        }
    }

    /// Resolves the focus target stashed by a cross-month move, once the
    /// host has rendered the new grid and knows its cell count.
    pub fn resolve_pending_focus(&mut self, cell_count: usize) -> Option<usize> {
        self.pending_focus.take().map(|target| {
            let index = target.resolve(cell_count);
            trace!(index, "pending focus resolved");
            index
        })
    }

    /// Returns true when a cross-month focus target is waiting for the
    /// next render pass.
    pub fn has_pending_focus(&self) -> bool {
        self.pending_focus.is_some()
    }

    /// Handles a click on the today button: shows today's month, then
    /// fires the today-button callback with today's modifiers.
    pub fn handle_today_button_click(&mut self) {
        let today = CalendarDate::today();
        self.show_month(today.year_month());
        if let Some(on_today_button_click) = self.args.on_today_button_click.clone() {
            let modifiers = self.classify_day(today, today.year_month());
            on_today_button_click(today, &modifiers);
        }
    }

    /// Handles a click on a week-number cell.
    pub fn handle_week_click(&self, week: &Week) {
        if let Some(on_week_click) = &self.args.on_week_click {
            on_week_click(week.number(), week);
        }
    }

    /// Handles a click on a month caption.
    pub fn handle_caption_click(&self, month: YearMonth) {
        if let Some(on_caption_click) = &self.args.on_caption_click {
            on_caption_click(month);
        }
    }

    /// Reports a day cell gaining focus.
    pub fn handle_day_focus(&self, date: CalendarDate, reference_month: YearMonth) {
        if let Some(on_day_focus) = &self.args.on_day_focus {
            on_day_focus(date, &self.classify_day(date, reference_month));
        }
    }

    /// Reports the pointer entering a day cell.
    pub fn handle_day_mouse_enter(&self, date: CalendarDate, reference_month: YearMonth) {
        if let Some(on_day_mouse_enter) = &self.args.on_day_mouse_enter {
            on_day_mouse_enter(date, &self.classify_day(date, reference_month));
        }
    }

    /// Reports the pointer leaving a day cell.
    pub fn handle_day_mouse_leave(&self, date: CalendarDate, reference_month: YearMonth) {
        if let Some(on_day_mouse_leave) = &self.args.on_day_mouse_leave {
            on_day_mouse_leave(date, &self.classify_day(date, reference_month));
        }
    }

    fn move_focus(&mut self, index: usize, cell_count: usize, focus_move: FocusMove) -> FocusRequest {
        match step(index, cell_count, focus_move) {
            FocusOutcome::Within(next) => FocusRequest::Cell(next),
            FocusOutcome::CrossMonth { shift, target } => {
                let moved = match shift {
                    MonthShift::Previous => self.show_previous_month(),
                    MonthShift::Next => self.show_next_month(),
                };
                if moved {
                    self.pending_focus = Some(target);
                    FocusRequest::AfterMonthChange
                } else {
                    FocusRequest::None
                }
            }
        }
    }

    fn handle_outside_day_click(&mut self, date: CalendarDate) {
        let diff = self
            .navigator
            .current_month()
            .months_between(date.year_month());
        if diff > 0 && diff >= self.navigator.number_of_months() as i32 {
            self.show_next_month();
        } else if diff < 0 {
            self.show_previous_month();
        }
    }

    fn transition<F>(&mut self, apply: F) -> bool
    where
        F: FnOnce(&mut Navigator) -> bool,
    {
        let moved = apply(&mut self.navigator);
        if moved && let Some(on_month_change) = &self.args.on_month_change {
            on_month_change(self.navigator.current_month());
        }
        moved
    }

    fn modifier_config(&self) -> Modifiers {
        let mut modifiers = Modifiers::new();
        if let Some(selected) = &self.args.selected_days {
            modifiers = modifiers.with_selected(selected.clone());
        }
        if let Some(disabled) = &self.args.disabled_days {
            modifiers = modifiers.with_disabled(disabled.clone());
        }
        for (name, matcher) in &self.args.modifiers {
            modifiers = modifiers.with_custom(name.clone(), matcher.clone());
        }
        modifiers
    }

    fn build_cell(
        &self,
        date: CalendarDate,
        modifiers: &Modifiers,
        context: &ClassifyContext,
    ) -> DayCell {
        let active = classify(date, modifiers, context);
        let outside = active.is_outside();
        let empty = outside && !self.args.enable_outside_days && !self.args.fixed_weeks;
        let interactive = self.args.on_day_click.is_some();
        let tab_index = if interactive && !outside && date.day() == 1 {
            0
        } else {
            -1
        };
        DayCell {
            date,
            aria_label: self.args.locale_utils.day_label(date, &self.args.locale),
            aria_disabled: outside || active.is_disabled(),
            aria_selected: active.is_selected(),
            modifiers: active,
            outside,
            empty,
            tab_index,
        }
    }
}

fn navigator_options(args: &DayPickerArgs) -> NavigatorOptions {
    NavigatorOptions {
        initial_month: args
            .month
            .or(args.initial_month)
            .unwrap_or_else(|| CalendarDate::today().year_month()),
        number_of_months: args.number_of_months,
        from_month: args.from_month,
        to_month: args.to_month,
        paged_navigation: args.paged_navigation,
        can_change_month: args.can_change_month,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn month(year: i32, m: u8) -> YearMonth {
        YearMonth::new(year, m).unwrap()
    }

    fn date(year: i32, m: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, m, day).unwrap()
    }

    fn march_2024_args() -> DayPickerArgs {
        DayPickerArgs::default()
            .initial_month(month(2024, 3))
            .first_day_of_week(Weekday::Sunday)
    }

    #[test]
    fn test_visible_months_and_reverse_order() {
        let picker = DayPicker::new(
            DayPickerArgs::default()
                .initial_month(month(2024, 3))
                .number_of_months(2),
        );
        assert_eq!(picker.months(), vec![month(2024, 3), month(2024, 4)]);

        let picker = DayPicker::new(
            DayPickerArgs::default()
                .initial_month(month(2024, 3))
                .number_of_months(2)
                .reverse_months(true),
        );
        assert_eq!(picker.months(), vec![month(2024, 4), month(2024, 3)]);
    }

    #[test]
    fn test_first_day_of_week_falls_back_to_locale() {
        let picker = DayPicker::new(DayPickerArgs::default());
        assert_eq!(picker.first_day_of_week(), Weekday::Sunday);

        let picker = DayPicker::new(DayPickerArgs::default().first_day_of_week(Weekday::Monday));
        assert_eq!(picker.first_day_of_week(), Weekday::Monday);
        assert_eq!(picker.weekday_header()[0], Weekday::Monday);
    }

    #[test]
    fn test_day_cells_flags_and_tab_index() {
        let picker = DayPicker::new(
            march_2024_args()
                .selected_days(DayMatcher::Day(date(2024, 3, 15)))
                .on_day_click(|_, _| {}),
        );
        let grid = picker.grid_for(month(2024, 3));
        let cells = picker.day_cells(&grid);
        assert_eq!(cells.len(), 42);

        // 2024-02-25 opens the grid as an outside day; outside days render
        // empty here because neither outside days nor fixed weeks are on.
        assert!(cells[0].outside);
        assert!(cells[0].empty);
        assert!(cells[0].aria_disabled);
        assert_eq!(cells[0].tab_index, -1);

        // The 1st of March carries the only tab stop.
        let first = cells.iter().find(|cell| cell.date == date(2024, 3, 1)).unwrap();
        assert_eq!(first.tab_index, 0);
        assert_eq!(first.aria_label, "Friday, March 1, 2024");

        let selected = cells.iter().find(|cell| cell.date == date(2024, 3, 15)).unwrap();
        assert!(selected.aria_selected);
        assert!(selected.modifiers.is_selected());
        assert_eq!(selected.tab_index, -1);
    }

    #[test]
    fn test_outside_days_render_when_enabled() {
        let picker = DayPicker::new(march_2024_args().enable_outside_days(true));
        let grid = picker.grid_for(month(2024, 3));
        let cells = picker.day_cells(&grid);
        assert!(cells[0].outside);
        assert!(!cells[0].empty);
    }

    #[test]
    fn test_outside_day_click_jumps_to_that_month() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_months = seen.clone();
        let mut picker = DayPicker::new(
            march_2024_args().on_month_change(move |m| seen_months.lock().unwrap().push(m)),
        );

        // 2024-02-25 sits in March's grid but belongs to February.
        picker.handle_day_click(date(2024, 2, 25), month(2024, 3));
        assert_eq!(picker.current_month(), month(2024, 2));

        picker.show_month(month(2024, 3));
        picker.handle_day_click(date(2024, 4, 6), month(2024, 3));
        assert_eq!(picker.current_month(), month(2024, 4));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![month(2024, 2), month(2024, 3), month(2024, 4)]
        );
    }

    #[test]
    fn test_outside_click_into_a_visible_month_does_not_jump() {
        // With two visible months, April days in March's grid are already
        // on screen; clicking one must not page forward.
        let mut picker = DayPicker::new(march_2024_args().number_of_months(2));
        picker.handle_day_click(date(2024, 4, 6), month(2024, 3));
        assert_eq!(picker.current_month(), month(2024, 3));
    }

    #[test]
    fn test_day_click_fires_with_modifiers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_days = seen.clone();
        let mut picker = DayPicker::new(
            march_2024_args()
                .selected_days(DayMatcher::Day(date(2024, 3, 15)))
                .on_day_click(move |day, modifiers| {
                    seen_days.lock().unwrap().push((day, modifiers.is_selected()));
                }),
        );
        picker.handle_day_click(date(2024, 3, 15), month(2024, 3));
        assert_eq!(*seen.lock().unwrap(), vec![(date(2024, 3, 15), true)]);
    }

    #[test]
    fn test_arrow_left_from_first_cell_defers_focus() {
        let mut picker = DayPicker::new(march_2024_args());
        let request = picker.handle_day_key_down(
            date(2024, 2, 25),
            month(2024, 3),
            0,
            42,
            DayKey::ArrowLeft,
        );
        assert_eq!(request, FocusRequest::AfterMonthChange);
        assert_eq!(picker.current_month(), month(2024, 2));
        assert!(picker.has_pending_focus());

        // February 2024 under a Sunday-first week spans 5 rows (35 cells);
        // the deferred target is its last cell.
        let grid = picker.grid_for(month(2024, 2));
        assert_eq!(grid.cell_count(), 35);
        assert_eq!(picker.resolve_pending_focus(grid.cell_count()), Some(34));
        assert!(!picker.has_pending_focus());
    }

    #[test]
    fn test_arrow_moves_within_the_grid_resolve_immediately() {
        let mut picker = DayPicker::new(march_2024_args());
        let request =
            picker.handle_day_key_down(date(2024, 3, 6), month(2024, 3), 10, 42, DayKey::ArrowUp);
        assert_eq!(request, FocusRequest::Cell(3));
        assert_eq!(picker.current_month(), month(2024, 3));
        assert!(!picker.has_pending_focus());
    }

    #[test]
    fn test_blocked_focus_wrap_drops_the_move() {
        let mut picker = DayPicker::new(march_2024_args().from_month(month(2024, 3)));
        let request = picker.handle_day_key_down(
            date(2024, 2, 25),
            month(2024, 3),
            0,
            42,
            DayKey::ArrowLeft,
        );
        assert_eq!(request, FocusRequest::None);
        assert_eq!(picker.current_month(), month(2024, 3));
        assert!(!picker.has_pending_focus());
    }

    #[test]
    fn test_enter_acts_as_click() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_days = seen.clone();
        let mut picker = DayPicker::new(
            march_2024_args().on_day_click(move |day, _| seen_days.lock().unwrap().push(day)),
        );
        let request = picker.handle_day_key_down(
            date(2024, 3, 15),
            month(2024, 3),
            19,
            42,
            DayKey::Enter,
        );
        assert_eq!(request, FocusRequest::None);
        assert_eq!(*seen.lock().unwrap(), vec![date(2024, 3, 15)]);
    }

    #[test]
    fn test_wrapper_keys_page_months_and_years() {
        let mut picker = DayPicker::new(march_2024_args());
        assert!(picker.handle_key_down(DayKey::ArrowRight));
        assert_eq!(picker.current_month(), month(2024, 4));
        assert!(picker.handle_key_down(DayKey::ArrowLeft));
        assert_eq!(picker.current_month(), month(2024, 3));
        assert!(picker.handle_key_down(DayKey::ArrowUp));
        assert_eq!(picker.current_month(), month(2023, 3));
        assert!(picker.handle_key_down(DayKey::ArrowDown));
        assert_eq!(picker.current_month(), month(2024, 3));
    }

    #[test]
    fn test_rejected_navigation_fires_no_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_months = seen.clone();
        let mut picker = DayPicker::new(
            DayPickerArgs::default()
                .initial_month(month(2018, 11))
                .from_month(month(2018, 9))
                .to_month(month(2018, 11))
                .on_month_change(move |m| seen_months.lock().unwrap().push(m)),
        );
        assert!(!picker.show_next_month());
        assert_eq!(picker.current_month(), month(2018, 11));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_today_button_returns_to_today() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_days = seen.clone();
        let mut picker = DayPicker::new(
            DayPickerArgs::default()
                .initial_month(month(1990, 1))
                .today_button("Go to today")
                .on_today_button_click(move |day, modifiers| {
                    seen_days.lock().unwrap().push((day, modifiers.is_today()));
                }),
        );
        picker.handle_today_button_click();

        let today = CalendarDate::today();
        assert_eq!(picker.current_month(), today.year_month());
        assert_eq!(*seen.lock().unwrap(), vec![(today, true)]);
    }

    #[test]
    fn test_week_and_caption_clicks_pass_through() {
        let seen_weeks = Arc::new(Mutex::new(Vec::new()));
        let seen_captions = Arc::new(Mutex::new(Vec::new()));
        let weeks = seen_weeks.clone();
        let captions = seen_captions.clone();
        let picker = DayPicker::new(
            march_2024_args()
                .show_week_numbers(true)
                .on_week_click(move |number, week| {
                    weeks.lock().unwrap().push((number, week.first()));
                })
                .on_caption_click(move |m| captions.lock().unwrap().push(m)),
        );

        let grid = picker.grid_for(month(2024, 3));
        picker.handle_week_click(&grid.weeks()[0]);
        picker.handle_caption_click(month(2024, 3));

        assert_eq!(*seen_weeks.lock().unwrap(), vec![(8, date(2024, 2, 25))]);
        assert_eq!(*seen_captions.lock().unwrap(), vec![month(2024, 3)]);
    }

    #[test]
    fn test_apply_args_rederives_only_on_controlled_month_change() {
        let mut picker = DayPicker::new(march_2024_args());
        picker.show_next_month();
        assert_eq!(picker.current_month(), month(2024, 4));

        // No controlled month: internal navigation survives a config update.
        picker.apply_args(march_2024_args().show_week_numbers(true));
        assert_eq!(picker.current_month(), month(2024, 4));

        // A controlled month pins the view.
        picker.apply_args(march_2024_args().month(month(2024, 7)));
        assert_eq!(picker.current_month(), month(2024, 7));

        // Re-applying the same override is not a change.
        picker.show_next_month();
        picker.apply_args(march_2024_args().month(month(2024, 7)));
        assert_eq!(picker.current_month(), month(2024, 8));

        // A policy change keeps the current month but enforces new bounds.
        picker.apply_args(
            march_2024_args()
                .month(month(2024, 7))
                .to_month(month(2024, 9)),
        );
        assert_eq!(picker.current_month(), month(2024, 8));
        assert!(picker.show_next_month());
        assert!(!picker.show_next_month());
        assert_eq!(picker.current_month(), month(2024, 9));
    }

    #[test]
    fn test_month_title_uses_the_locale() {
        let picker = DayPicker::new(march_2024_args());
        assert_eq!(picker.month_title(month(2024, 3)), "March 2024");
    }
}
