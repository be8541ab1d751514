use chrono::prelude::*;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

use super::command::Command;
use crate::config::ThemeConfig;
use crate::picker::{CalendarView, DatePicker, DayCell, Highlight};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub header_style: StyleModifier,
    pub label_style: StyleModifier,
    pub day_style: StyleModifier,
    pub weekend_style: StyleModifier,
    pub adjacent_style: StyleModifier,
    pub today_style: StyleModifier,
    pub today_char: Option<char>,
    pub selected_style: StyleModifier,
    pub selected_char: Option<char>,
    pub footer_style: StyleModifier,
    pub show_footer: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_style: StyleModifier::default()
                .fg_color(Color::Yellow)
                .format(TextFormatModifier::default().bold(true)),
            label_style: StyleModifier::default(),
            day_style: StyleModifier::default(),
            weekend_style: StyleModifier::default().fg_color(Color::Red),
            adjacent_style: StyleModifier::default().fg_color(Color::LightBlack),
            today_style: StyleModifier::default()
                .invert(true)
                .format(TextFormatModifier::default().italic(true)),
            today_char: Some('*'),
            selected_style: StyleModifier::default().bg_color(Color::Blue),
            selected_char: Some('>'),
            footer_style: StyleModifier::default().format(TextFormatModifier::default().italic(true)),
            show_footer: true,
        }
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Theme {
            today_char: config.today_char,
            selected_char: config.selected_char,
            show_footer: config.show_footer,
            ..Theme::default()
        }
    }
}

impl Theme {
    /// Today wins over the selection, which wins over the weekend colour.
    pub fn style_for(&self, cell: &DayCell, highlight: &Highlight) -> StyleModifier {
        if !cell.is_current() {
            self.adjacent_style
        } else if highlight.today {
            self.today_style
        } else if highlight.selected {
            self.selected_style
        } else if highlight.weekend {
            self.weekend_style
        } else {
            self.day_style
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub command_line: PromptLine,
    pub last_error_message: Option<String>,
    pub quit: bool,
    picker: DatePicker,
    selected: Option<NaiveDate>,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(picker: DatePicker, selected: Option<NaiveDate>, theme: Theme) -> Self {
        Context {
            mode: Mode::Normal,
            theme,
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            quit: false,
            picker,
            selected,
            now: Local::now(),
        }
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut DatePicker {
        &mut self.picker
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn set_selected(&mut self, selected: Option<NaiveDate>) {
        self.selected = selected;
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    pub fn show_today(&mut self) {
        let today = CalendarView::from(self.today());
        self.picker.show(today);
    }

    pub fn run_command(&mut self, command: Command) {
        log::debug!("Running {:?}", command);
        match command {
            Command::Next(n) => {
                self.picker.advance_by(n);
            }
            Command::Prev(n) => {
                self.picker.retreat_by(n);
            }
            Command::Today => self.show_today(),
            Command::Goto(view) => self.picker.show(view),
            Command::Select(date) => {
                self.picker.show(CalendarView::from(date));
                self.picker.select(date);
            }
            Command::Clear => self.selected = None,
            Command::Quit => self.quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn context_at(view: &str) -> Context {
        Context::new(DatePicker::new(view.parse().unwrap()), None, Theme::default())
    }

    #[test]
    fn repeated_steps() {
        let mut context = context_at("2024-03");

        context.run_command(Command::Next(10));
        assert_eq!(*context.picker().view(), "2025-01".parse().unwrap());

        context.run_command(Command::Prev(2));
        assert_eq!(*context.picker().view(), "2024-11".parse().unwrap());
    }

    #[test]
    fn huge_repeat_counts_stop_at_the_range_limit() {
        let mut context = context_at("2024-03");

        context.run_command(Command::Next(4_000_000_000));
        assert_eq!(*context.picker().view(), CalendarView::latest());

        context.run_command(Command::Prev(4_000_000_000));
        assert_eq!(*context.picker().view(), CalendarView::earliest());
    }

    #[test]
    fn select_shows_and_reports_the_date() {
        let record = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&record);
        let picker = DatePicker::new("2024-03".parse().unwrap())
            .on_date_select(move |d| sink.borrow_mut().push(d));
        let mut context = Context::new(picker, None, Theme::default());

        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        context.run_command(Command::Select(date));

        assert_eq!(*context.picker().view(), CalendarView::from(date));
        assert_eq!(*record.borrow(), vec![date]);
    }

    #[test]
    fn clear_and_quit() {
        let mut context = context_at("2024-03");
        context.set_selected(NaiveDate::from_ymd_opt(2024, 3, 4));

        context.run_command(Command::Clear);
        assert_eq!(context.selected(), None);

        context.run_command(Command::Quit);
        assert!(context.quit);
    }

    #[test]
    fn today_jumps_back() {
        let mut context = context_at("1999-01");
        context.run_command(Command::Today);

        assert!(context.picker().view().contains(&context.today()));
    }

    #[test]
    fn theme_from_config() {
        let config = ThemeConfig {
            today_char: None,
            selected_char: Some('+'),
            show_footer: false,
        };
        let theme = Theme::from(&config);

        assert_eq!(theme.today_char, None);
        assert_eq!(theme.selected_char, Some('+'));
        assert!(!theme.show_footer);
    }
}
