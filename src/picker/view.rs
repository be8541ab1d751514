use chrono::{Datelike, Days, Local, Month, Months, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// The month currently displayed by a picker.
///
/// Backed by the first day of the month, so every view that exists is
/// inside chrono's supported date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarView {
    first: NaiveDate,
}

impl CalendarView {
    pub fn new(year: i32, month: Month) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
            .map(|first| CalendarView { first })
    }

    pub fn current() -> Self {
        CalendarView::from(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        Month::from_u32(self.first.month()).unwrap_or(Month::January)
    }

    /// Zero based month index, January is 0.
    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first.weekday()
    }

    pub fn days_in_month(&self) -> u32 {
        days_of_month(&self.month(), self.year())
    }

    /// Length of the month before this one, even if that month lies outside
    /// the representable range.
    pub fn days_in_previous_month(&self) -> u32 {
        let month = self.month();
        let year = if month == Month::January {
            self.year() - 1
        } else {
            self.year()
        };

        days_of_month(&month.pred(), year)
    }

    /// First representable month.
    pub fn earliest() -> Self {
        CalendarView::from(NaiveDate::MIN)
    }

    /// Last representable month.
    pub fn latest() -> Self {
        CalendarView::from(NaiveDate::MAX)
    }

    pub fn next(&self) -> Option<Self> {
        self.forward(1)
    }

    pub fn prev(&self) -> Option<Self> {
        self.backward(1)
    }

    pub fn forward(&self, months: u32) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(months))
            .map(|first| CalendarView { first })
    }

    pub fn backward(&self, months: u32) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(months))
            .map(|first| CalendarView { first })
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year() && date.month() == self.first.month()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }
}

impl Default for CalendarView {
    fn default() -> Self {
        CalendarView::current()
    }
}

impl From<NaiveDate> for CalendarView {
    fn from(date: NaiveDate) -> Self {
        CalendarView {
            first: date - Days::new(u64::from(date.day0())),
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{} {}", self.month().name(), self.year()))
    }
}

/// Parses `YYYY-MM`.
impl FromStr for CalendarView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")?;
        Ok(CalendarView::from(first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(year: i32, month: u32) -> CalendarView {
        CalendarView::new(year, Month::from_u32(month).unwrap()).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 2023), 28);
        assert_eq!(days_of_month(&Month::February, 1900), 28);
        assert_eq!(days_of_month(&Month::February, 2000), 29);
        assert_eq!(days_of_month(&Month::April, 2024), 30);
        assert_eq!(days_of_month(&Month::December, 2024), 31);
    }

    #[test]
    fn next_rolls_over_the_year() {
        let december = view(2023, 12);
        let january = december.next().unwrap();

        assert_eq!(january.year(), 2024);
        assert_eq!(january.month(), Month::January);
        assert_eq!(january.month0(), 0);
    }

    #[test]
    fn prev_rolls_back_the_year() {
        let january = view(2024, 1);
        let december = january.prev().unwrap();

        assert_eq!(december.year(), 2023);
        assert_eq!(december.month(), Month::December);
        assert_eq!(december.month0(), 11);
    }

    #[test]
    fn forward_then_backward_is_identity() {
        for year in [1999, 2000, 2023, 2024] {
            for month in 1..=12 {
                let start = view(year, month);
                assert_eq!(start.next().and_then(|v| v.prev()), Some(start));
                assert_eq!(start.prev().and_then(|v| v.next()), Some(start));
            }
        }
    }

    #[test]
    fn from_date_picks_its_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let v = CalendarView::from(date);

        assert_eq!(v, view(2024, 3));
        assert_eq!(v.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(v.contains(&date));
        assert!(!v.contains(&NaiveDate::from_ymd_opt(2023, 3, 17).unwrap()));
    }

    #[test]
    fn previous_month_length() {
        assert_eq!(view(2024, 3).days_in_previous_month(), 29);
        assert_eq!(view(2024, 1).days_in_previous_month(), 31);
        assert_eq!(view(2024, 5).days_in_previous_month(), 30);
    }

    #[test]
    fn parse_and_display() {
        let v: CalendarView = "2024-03".parse().unwrap();
        assert_eq!(v, view(2024, 3));
        assert_eq!(v.to_string(), "March 2024");

        assert!("2024-13".parse::<CalendarView>().is_err());
        assert!("march".parse::<CalendarView>().is_err());
    }

    #[test]
    fn navigation_stops_at_the_range_limit() {
        let last = CalendarView::latest();
        assert_eq!(last.next(), None);

        let first = CalendarView::earliest();
        assert_eq!(first.prev(), None);
    }

    #[test]
    fn multi_month_steps() {
        assert_eq!(view(2024, 3).forward(10), Some(view(2025, 1)));
        assert_eq!(view(2024, 3).backward(27), Some(view(2021, 12)));
        assert_eq!(view(2024, 3).forward(0), Some(view(2024, 3)));

        assert_eq!(view(2024, 3).forward(u32::MAX), None);
        assert_eq!(view(2024, 3).backward(u32::MAX), None);
    }
}
