//! Headless host demo: renders two months of a `daygrid` picker to the
//! terminal and walks the keyboard focus protocol across a month
//! boundary.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use daygrid::{
    date::{Weekday, YearMonth},
    modifiers::DayMatcher,
    picker::{DayKey, DayPicker, DayPickerArgs, FocusRequest},
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let clicked = Arc::new(Mutex::new(Vec::new()));
    let clicked_days = clicked.clone();
    let month_changes = Arc::new(AtomicUsize::new(0));
    let month_change_count = month_changes.clone();

    let mut picker = DayPicker::new(
        DayPickerArgs::default()
            .initial_month(YearMonth::new(2024, 3).expect("valid month"))
            .number_of_months(2)
            .first_day_of_week(Weekday::Sunday)
            .show_week_numbers(true)
            .selected_days(DayMatcher::Days(vec![
                "2024-03-08".parse().expect("valid date"),
                "2024-03-15".parse().expect("valid date"),
            ]))
            .disabled_days(DayMatcher::DaysOfWeek(vec![
                Weekday::Saturday,
                Weekday::Sunday,
            ]))
            .modifier(
                "payday",
                DayMatcher::predicate(|day| day.day() == 1 || day.day() == 15),
            )
            .on_day_click(move |day, modifiers| {
                clicked_days
                    .lock()
                    .unwrap()
                    .push((day, modifiers.is_selected()));
            })
            .on_month_change(move |month| {
                tracing::info!(%month, "visible month changed");
                month_change_count.fetch_add(1, Ordering::Relaxed);
            }),
    );

    for month in picker.months() {
        print_month(&picker, month);
    }

    // Click a selected weekday, then a disabled weekend day.
    picker.handle_day_click("2024-03-15".parse().expect("valid date"), picker.current_month());
    picker.handle_day_click("2024-03-02".parse().expect("valid date"), picker.current_month());
    println!("\nclicked: {:?}", clicked.lock().unwrap());

    // Walk focus left from the first rendered cell: the picker must show
    // February first, and only then can the focused cell be resolved.
    let grid = picker.grid_for(picker.current_month());
    let request = picker.handle_day_key_down(
        grid.first_cell(),
        grid.month(),
        0,
        grid.cell_count(),
        DayKey::ArrowLeft,
    );
    match request {
        FocusRequest::AfterMonthChange => {
            let new_grid = picker.grid_for(picker.current_month());
            let index = picker
                .resolve_pending_focus(new_grid.cell_count())
                .expect("a pending focus target");
            println!(
                "focus wrapped into {} at cell {index} ({})",
                picker.month_title(new_grid.month()),
                new_grid.day_at(index).expect("cell in range"),
            );
        }
        FocusRequest::Cell(index) => println!("focus moved to cell {index}"),
        FocusRequest::None => println!("focus move was rejected"),
    }

    println!(
        "month changed {} times",
        month_changes.load(Ordering::Relaxed)
    );
}

fn print_month(picker: &DayPicker, month: YearMonth) {
    let grid = picker.grid_for(month);
    let cells = picker.day_cells(&grid);

    println!("\n{:^32}", picker.month_title(month));
    print!("    ");
    for weekday in picker.weekday_header() {
        let label = picker.args().locale_utils.weekday_short(weekday, "en");
        print!("{label:>4}");
    }
    println!();

    for (row, week) in grid.weeks().iter().enumerate() {
        print!("{:>3} ", week.number());
        for column in 0..week.days().len() {
            let cell = &cells[row * 7 + column];
            if cell.empty {
                print!("    ");
            } else if cell.modifiers.is_selected() {
                print!(" {:>2}*", cell.date.day());
            } else {
                print!("  {:>2}", cell.date.day());
            }
        }
        println!();
    }
}
