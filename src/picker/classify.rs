use chrono::{Datelike, NaiveDate};

use super::{CalendarView, DayCell};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub today: bool,
    pub selected: bool,
    pub weekend: bool,
}

/// Days of the adjacent months are never today or selected, only the
/// weekend flag applies to them.
pub fn classify(
    view: &CalendarView,
    cell: &DayCell,
    today: &NaiveDate,
    selected: Option<&NaiveDate>,
) -> Highlight {
    let is = |date: &NaiveDate| cell.is_current() && view.contains(date) && date.day() == cell.day();

    Highlight {
        today: is(today),
        selected: selected.map_or(false, is),
        weekend: cell.is_weekend(),
    }
}
