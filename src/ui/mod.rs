pub mod app;
mod command;
mod context;
mod month_pane;

pub use app::App;
pub use command::{parse_command, Command, CommandParser};
pub use context::{Context, Mode, Theme};
pub use month_pane::{MonthPane, PlainMonth, Target};
