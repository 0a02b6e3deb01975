//! Recent-window selection
//!
//! Picks the expenses that fall inside the trailing N-day window ending at a
//! reference instant. The window is `(now - N days, now]`: an expense exactly
//! on the start boundary is left out, one at `now` is kept.

use chrono::{DateTime, Duration, Utc};

use crate::models::Expense;

/// Default length of the recent window
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Start of the window: `now` minus `window_days` whole days, same time of day
///
/// `None` when the start lies before the earliest representable instant; the
/// window then has no lower bound.
pub fn window_start(now: DateTime<Utc>, window_days: u32) -> Option<DateTime<Utc>> {
    Duration::try_days(i64::from(window_days)).and_then(|span| now.checked_sub_signed(span))
}

fn in_window(expense: &Expense, start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    let at = expense.instant();
    start.map_or(true, |start| at > start) && at <= now
}

/// Select the expenses inside the window, keeping input order
///
/// `window_days` must be positive; callers validate it before getting here.
pub fn select_recent(expenses: &[Expense], now: DateTime<Utc>, window_days: u32) -> Vec<Expense> {
    debug_assert!(window_days > 0, "recent window must span at least one day");

    let start = window_start(now, window_days);
    expenses
        .iter()
        .filter(|e| in_window(e, start, now))
        .cloned()
        .collect()
}
