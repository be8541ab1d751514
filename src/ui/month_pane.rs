use chrono::NaiveDate;
use itertools::Itertools;
use std::fmt::{self, Display};
use unsegen::base::*;
use unsegen::widget::*;

use super::{Context, Theme};
use crate::picker::{classify, CalendarView, DayCell, Grid, Highlight};

const CELL_WIDTH: usize = 4;
const WIDTH: usize = Grid::COLUMNS * CELL_WIDTH;
const ARROW_WIDTH: usize = 3;
const HEADER_ROWS: usize = 2;
const FOOTER_ROWS: usize = 2;

/// What a click at a position inside the pane hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    PrevMonth,
    NextMonth,
    Cell(usize),
}

/// Day number followed by the today and selected markers.
struct CellText<'a> {
    day: u32,
    highlight: Highlight,
    theme: &'a Theme,
}

impl<'a> CellText<'a> {
    fn new(cell: &DayCell, highlight: Highlight, theme: &'a Theme) -> Self {
        CellText {
            day: cell.day(),
            highlight,
            theme,
        }
    }
}

impl Display for CellText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg_today = if self.highlight.today {
            self.theme.today_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_selected = if self.highlight.selected {
            self.theme.selected_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, "{:>2}{}{}", self.day, arg_today, arg_selected)
    }
}

fn title_line(view: &CalendarView) -> String {
    format!(
        "{:<arrow$}{:^title$}{:>arrow$}",
        "<",
        view,
        ">",
        arrow = ARROW_WIDTH,
        title = WIDTH - 2 * ARROW_WIDTH
    )
}

fn label(name: &str) -> String {
    format!("{:<width$}", name, width = CELL_WIDTH)
}

fn footer_line(today: &NaiveDate) -> String {
    format!("Today: {}", today.format("%A, %B %-d, %Y"))
}

pub struct MonthPane<'a> {
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    pub fn new(context: &'a Context) -> Self {
        MonthPane { context }
    }

    /// Maps a position relative to the top left corner of the pane to the
    /// header arrow or day cell drawn there.
    pub fn target_at(col: usize, row: usize) -> Option<Target> {
        if col >= WIDTH {
            return None;
        }

        match row {
            0 if col < ARROW_WIDTH => Some(Target::PrevMonth),
            0 if col >= WIDTH - ARROW_WIDTH => Some(Target::NextMonth),
            r if (HEADER_ROWS..HEADER_ROWS + Grid::ROWS).contains(&r) => Some(Target::Cell(
                (r - HEADER_ROWS) * Grid::COLUMNS + col / CELL_WIDTH,
            )),
            _ => None,
        }
    }

    fn height(&self) -> usize {
        let footer = if self.context.theme.show_footer {
            FOOTER_ROWS
        } else {
            0
        };

        HEADER_ROWS + Grid::ROWS + footer
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(WIDTH),
            height: RowDemand::exact(self.height()),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let view = *self.context.picker().view();
        let today = self.context.today();
        let selected = self.context.selected();

        let mut cursor = Cursor::new(&mut window);

        cursor.set_style_modifier(theme.header_style);
        cursor.write(&title_line(&view));
        cursor.wrap_line();

        for (idx, name) in Grid::HEADER.iter().enumerate() {
            cursor.set_style_modifier(if idx == 0 || idx == Grid::COLUMNS - 1 {
                theme.weekend_style
            } else {
                theme.label_style
            });
            cursor.write(&label(name));
        }
        cursor.wrap_line();

        for row in Grid::new(view).rows() {
            for cell in row {
                let highlight = classify(&view, cell, &today, selected.as_ref());
                cursor.set_style_modifier(theme.style_for(cell, &highlight));
                cursor.write(&CellText::new(cell, highlight, theme).to_string());
            }
            cursor.wrap_line();
        }

        if theme.show_footer {
            cursor.wrap_line();
            cursor.set_style_modifier(theme.footer_style);
            cursor.write(&footer_line(&today));
        }
    }
}

/// The pane's layout as plain text, one line per row.
pub struct PlainMonth<'a> {
    view: CalendarView,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    theme: &'a Theme,
}

impl<'a> PlainMonth<'a> {
    pub fn new(
        view: CalendarView,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        theme: &'a Theme,
    ) -> Self {
        PlainMonth {
            view,
            today,
            selected,
            theme,
        }
    }
}

impl Display for PlainMonth<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", title_line(&self.view))?;
        writeln!(f, "{}", Grid::HEADER.iter().map(|name| label(name)).join(""))?;

        for row in Grid::new(self.view).rows() {
            let line = row
                .iter()
                .map(|cell| {
                    let highlight =
                        classify(&self.view, cell, &self.today, self.selected.as_ref());
                    CellText::new(cell, highlight, self.theme)
                })
                .join("");
            writeln!(f, "{}", line)?;
        }

        if self.theme.show_footer {
            writeln!(f)?;
            writeln!(f, "{}", footer_line(&self.today))?;
        }

        Ok(())
    }
}
