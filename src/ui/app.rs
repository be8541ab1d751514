use chrono::NaiveDate;
use termion::event::{Event as TermEvent, MouseButton, MouseEvent};

use crate::events::{Dispatcher, Event};
use crate::picker::DatePicker;

use super::command::CommandParser;
use super::{Context, Mode, MonthPane, Target, Theme};

use unsegen::base::Terminal;
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
};
use unsegen::widget::*;

const HELP: &str = "h/l: month  t: today  :: command  q: quit";

pub struct App {
    context: Context,
}

impl App {
    pub fn new(picker: DatePicker, selected: Option<NaiveDate>, theme: Theme) -> App {
        App {
            context: Context::new(picker, selected, theme),
        }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let spacer = " ".with_demand(|_| Demand2D {
            width: ColDemand::exact(1),
            height: RowDemand::exact(1),
        });

        let mut layout = HLayout::new().widget(spacer);
        match (&self.context.mode, &self.context.last_error_message) {
            (Mode::Command, _) => layout = layout.widget(self.context.command_line.as_widget()),
            (Mode::Normal, Some(msg)) => layout = layout.widget(msg.as_str()),
            (Mode::Normal, None) => layout = layout.widget(HELP),
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(MonthPane::new(&self.context))
            .widget(self.bottom_bar())
    }

    /// Positions are the 1-based terminal coordinates reported by the mouse.
    fn handle_click(&mut self, x: u16, y: u16) {
        let col = usize::from(x.saturating_sub(1));
        let row = usize::from(y.saturating_sub(1));

        match MonthPane::target_at(col, row) {
            Some(Target::PrevMonth) => {
                self.context.picker_mut().retreat();
            }
            Some(Target::NextMonth) => {
                self.context.picker_mut().advance();
            }
            Some(Target::Cell(index)) => {
                let grid = self.context.picker().grid();
                if let Some(cell) = grid.cell(index) {
                    self.context.picker_mut().click(cell);
                }
            }
            None => {}
        }
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Esc) {
            self.context.mode = Mode::Normal;
            return;
        }

        if let TermEvent::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) = input.event {
            self.handle_click(x, y);
            return;
        }

        let leftover = match self.context.mode {
            Mode::Normal => input
                .chain((Key::Char('q'), || self.context.quit = true))
                .chain((Key::Char(':'), || self.context.mode = Mode::Command))
                .chain((Key::Char('t'), || self.context.show_today()))
                .chain(
                    NavigateBehavior::new(&mut MonthBehaviour(&mut self.context))
                        .left_on(Key::Char('h'))
                        .left_on(Key::Char('<'))
                        .left_on(Key::Left)
                        .right_on(Key::Char('l'))
                        .right_on(Key::Char('>'))
                        .right_on(Key::Right),
                )
                .finish(),
            Mode::Command => input
                .chain(
                    EditBehavior::new(&mut self.context.command_line)
                        .delete_forwards_on(Key::Delete)
                        .delete_backwards_on(Key::Backspace)
                        .left_on(Key::Left)
                        .right_on(Key::Right),
                )
                .chain(
                    ScrollBehavior::new(&mut self.context.command_line)
                        .backwards_on(Key::Up)
                        .forwards_on(Key::Down),
                )
                .chain(CommandParser::new(&mut self.context))
                .finish(),
        };

        if let Some(input) = leftover {
            log::debug!("Unhandled input: {:?}", input.event);
        }
    }

    /// Runs until the user quits and returns the last selected date.
    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<Option<NaiveDate>, Box<dyn std::error::Error>> {
        while !self.context.quit {
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::DateSelected(date) => self.context.set_selected(Some(date)),
                Event::Input(input) => self.handle_input(input),
            }

            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();
        }

        Ok(self.context.selected())
    }
}

/// The header arrows, bound to the horizontal navigation keys.
struct MonthBehaviour<'a>(&'a mut Context);

impl Navigatable for MonthBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        Err(())
    }

    fn move_left(&mut self) -> OperationResult {
        if self.0.picker_mut().retreat() {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_right(&mut self) -> OperationResult {
        if self.0.picker_mut().advance() {
            Ok(())
        } else {
            Err(())
        }
    }

    fn move_up(&mut self) -> OperationResult {
        Err(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::CalendarView;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn app_at(view: &str) -> (App, Rc<RefCell<Vec<NaiveDate>>>) {
        let record = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&record);
        let picker = DatePicker::new(view.parse().unwrap())
            .on_date_select(move |d| sink.borrow_mut().push(d));

        (App::new(picker, None, Theme::default()), record)
    }

    fn view(s: &str) -> CalendarView {
        s.parse().unwrap()
    }

    #[test]
    fn clicking_the_header_arrows_navigates() {
        let (mut app, record) = app_at("2024-03");

        app.handle_click(1, 1);
        assert_eq!(*app.context.picker().view(), view("2024-02"));

        app.handle_click(28, 1);
        app.handle_click(28, 1);
        assert_eq!(*app.context.picker().view(), view("2024-04"));

        assert!(record.borrow().is_empty());
    }

    #[test]
    fn clicking_a_leading_day_reports_it_without_navigating() {
        let (mut app, record) = app_at("2024-03");

        app.handle_click(1, 3);

        assert_eq!(*record.borrow(), vec![NaiveDate::from_ymd_opt(2024, 2, 25).unwrap()]);
        assert_eq!(*app.context.picker().view(), view("2024-03"));
    }

    #[test]
    fn clicking_a_current_day() {
        let (mut app, record) = app_at("2024-03");

        // Fifth column of the third week
        app.handle_click(4 * 4 + 2, 5);

        assert_eq!(*record.borrow(), vec![NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()]);
    }

    #[test]
    fn clicking_outside_the_grid_reports_nothing() {
        let (mut app, record) = app_at("2024-03");

        // Weekday labels, blank row above the footer and right of the grid
        app.handle_click(1, 2);
        app.handle_click(1, 9);
        app.handle_click(40, 3);

        assert!(record.borrow().is_empty());
        assert_eq!(*app.context.picker().view(), view("2024-03"));
    }
}
