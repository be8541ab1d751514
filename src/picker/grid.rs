use chrono::Weekday;
use num_traits::FromPrimitive;

use super::CalendarView;

/// Which month a day number shown in the grid belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Previous,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    day: u32,
    origin: Origin,
    weekday_index: u32,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_current(&self) -> bool {
        self.origin == Origin::Current
    }

    /// Column of the cell, 0 is Sunday.
    pub fn weekday_index(&self) -> u32 {
        self.weekday_index
    }

    pub fn weekday(&self) -> Weekday {
        // Weekday counts from Monday
        Weekday::from_u32((self.weekday_index + 6) % 7).unwrap_or(Weekday::Sun)
    }

    pub fn is_weekend(&self) -> bool {
        self.weekday_index == 0 || self.weekday_index == 6
    }
}

/// Six Sunday-first weeks covering a month, padded with the tail of the
/// previous month and the head of the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    view: CalendarView,
    cells: Vec<DayCell>,
}

impl Grid {
    pub const COLUMNS: usize = 7;
    pub const ROWS: usize = 6;
    pub const CELLS: usize = Self::COLUMNS * Self::ROWS;

    pub const HEADER: &'static [&'static str] = &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    pub fn new(view: CalendarView) -> Self {
        let offset = view.first_weekday().num_days_from_sunday();
        let days_in_previous = view.days_in_previous_month();

        let previous = (0..offset)
            .rev()
            .map(|back| (days_in_previous - back, Origin::Previous));
        let current = (1..=view.days_in_month()).map(|day| (day, Origin::Current));
        let next = (1..).map(|day| (day, Origin::Next));

        let cells = previous
            .chain(current)
            .chain(next)
            .take(Self::CELLS)
            .enumerate()
            .map(|(pos, (day, origin))| DayCell {
                day,
                origin,
                weekday_index: (pos % Self::COLUMNS) as u32,
            })
            .collect();

        Grid { view, cells }
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&DayCell> {
        self.cells.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(Self::COLUMNS)
    }

    pub fn count(&self, origin: Origin) -> usize {
        self.cells.iter().filter(|c| c.origin == origin).count()
    }
}
