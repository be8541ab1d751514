//! Month view date picking without any rendering attached.
//!
//! A [`DatePicker`] owns the displayed month and an optional selection
//! callback. The selected date itself belongs to the caller; it is passed
//! in when classifying cells and handed back through the callback.

mod classify;
mod grid;
mod view;

pub use classify::{classify, Highlight};
pub use grid::{DayCell, Grid, Origin};
pub use view::{days_of_month, is_leap_year, CalendarView};

use chrono::NaiveDate;

pub type DateSelectCallback = Box<dyn FnMut(NaiveDate)>;

pub struct DatePicker {
    view: CalendarView,
    on_date_select: Option<DateSelectCallback>,
}

impl Default for DatePicker {
    fn default() -> Self {
        DatePicker::new(CalendarView::current())
    }
}

impl DatePicker {
    pub fn new(view: CalendarView) -> Self {
        DatePicker {
            view,
            on_date_select: None,
        }
    }

    pub fn on_date_select<F: FnMut(NaiveDate) + 'static>(mut self, callback: F) -> Self {
        self.set_on_date_select(callback);
        self
    }

    pub fn set_on_date_select<F: FnMut(NaiveDate) + 'static>(&mut self, callback: F) {
        self.on_date_select = Some(Box::new(callback));
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn show(&mut self, view: CalendarView) {
        log::debug!("Showing {}", view);
        self.view = view;
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.view)
    }

    /// Returns false if the view is already at the last representable month.
    pub fn advance(&mut self) -> bool {
        self.advance_by(1)
    }

    /// Returns false if the view is already at the first representable month.
    pub fn retreat(&mut self) -> bool {
        self.retreat_by(1)
    }

    /// Moves `months` forward, stopping at the last representable month.
    /// Returns false if the view did not move.
    pub fn advance_by(&mut self, months: u32) -> bool {
        let target = match self.view.forward(months) {
            Some(target) => target,
            None => {
                log::warn!("Cannot move {} months past {}", months, self.view);
                CalendarView::latest()
            }
        };

        self.move_to(target)
    }

    /// Moves `months` back, stopping at the first representable month.
    /// Returns false if the view did not move.
    pub fn retreat_by(&mut self, months: u32) -> bool {
        let target = match self.view.backward(months) {
            Some(target) => target,
            None => {
                log::warn!("Cannot move {} months before {}", months, self.view);
                CalendarView::earliest()
            }
        };

        self.move_to(target)
    }

    fn move_to(&mut self, target: CalendarView) -> bool {
        if target == self.view {
            return false;
        }

        self.show(target);
        true
    }

    pub fn resolve(&self, day: u32, origin: Origin) -> Option<NaiveDate> {
        let month = match origin {
            Origin::Previous => self.view.prev(),
            Origin::Current => Some(self.view),
            Origin::Next => self.view.next(),
        };

        month.and_then(|m| m.date(day))
    }

    /// Resolves the clicked day and reports it to the callback. The view
    /// stays where it is, even for days of the adjacent months.
    pub fn click_day(&mut self, day: u32, origin: Origin) -> Option<NaiveDate> {
        let date = self.resolve(day, origin)?;
        self.select(date);
        Some(date)
    }

    pub fn click(&mut self, cell: &DayCell) -> Option<NaiveDate> {
        self.click_day(cell.day(), cell.origin())
    }

    pub fn select(&mut self, date: NaiveDate) {
        log::info!("Selected {}", date);
        if let Some(callback) = self.on_date_select.as_mut() {
            callback(date);
        }
    }
}
