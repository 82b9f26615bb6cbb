use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{model::Todo, response::CalendarDay};

/// Per-day todo counts, keyed by due date, in date order.
///
/// Todos without a due date are not part of any day.
pub fn group_by_due_date(todos: &[Todo]) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for todo in todos {
        let Some(date) = todo.due_date else { continue };
        let (total, completed) = days.entry(date).or_default();
        *total += 1;
        if todo.is_completed {
            *completed += 1;
        }
    }

    days.into_iter()
        .map(|(date, (total, completed))| CalendarDay {
            date,
            total,
            completed,
        })
        .collect()
}
