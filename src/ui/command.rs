use chrono::NaiveDate;
use std::str::FromStr;
use unsegen::input::*;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit1, space1},
    combinator::{all_consuming, map, map_res, opt, rest, value},
    sequence::{pair, preceded},
    IResult,
};

use super::context::{Context, Mode};
use crate::error::{Error, Result};
use crate::picker::CalendarView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next(u32),
    Prev(u32),
    Today,
    Goto(CalendarView),
    Select(NaiveDate),
    Clear,
    Quit,
}

fn repeat(input: &str) -> IResult<&str, u32> {
    map_res(digit1, u32::from_str)(input)
}

fn step(input: &str) -> IResult<&str, Command> {
    map(
        pair(opt(repeat), alt((tag("next"), tag("prev")))),
        |(repeat, name)| {
            let repeat = repeat.unwrap_or(1);
            if name == "next" {
                Command::Next(repeat)
            } else {
                Command::Prev(repeat)
            }
        },
    )(input)
}

fn goto(input: &str) -> IResult<&str, Command> {
    map(
        preceded(pair(tag("goto"), space1), map_res(rest, CalendarView::from_str)),
        Command::Goto,
    )(input)
}

fn select(input: &str) -> IResult<&str, Command> {
    map(
        preceded(
            pair(tag("select"), space1),
            map_res(rest, |date: &str| NaiveDate::parse_from_str(date, "%Y-%m-%d")),
        ),
        Command::Select,
    )(input)
}

fn keyword(input: &str) -> IResult<&str, Command> {
    alt((
        value(Command::Today, tag("today")),
        value(Command::Clear, tag("clear")),
        value(Command::Quit, alt((tag("quit"), tag("q")))),
    ))(input)
}

/// Parses one line of the command prompt, e.g. `3next`, `goto 2024-03` or
/// `select 2024-03-15`.
pub fn parse_command(cmd: &str) -> Result<Command> {
    let cmd = cmd.trim();
    let (_, command) = all_consuming(alt((step, goto, select, keyword)))(cmd)
        .map_err(|e| Error::from(e).with_msg(cmd))?;

    Ok(command)
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    fn report_error(&mut self, error: Error) {
        log::warn!("{}", error);
        self.context.last_error_message = Some(format!("{}", error));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            let cmd = self.context.command_line.finish_line().to_owned();
            self.context.mode = Mode::Normal;

            match parse_command(&cmd) {
                Ok(command) => {
                    self.context.last_error_message = None;
                    self.context.run_command(command);
                }
                Err(e) => self.report_error(e),
            }
            None
        } else {
            Some(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn steps() {
        assert_eq!(parse_command("next").unwrap(), Command::Next(1));
        assert_eq!(parse_command("prev").unwrap(), Command::Prev(1));
        assert_eq!(parse_command("12next").unwrap(), Command::Next(12));
        assert_eq!(parse_command(" 3prev ").unwrap(), Command::Prev(3));
    }

    #[test]
    fn goto_and_select() {
        assert_eq!(
            parse_command("goto 2024-03").unwrap(),
            Command::Goto("2024-03".parse().unwrap())
        );
        assert_eq!(
            parse_command("select 2024-02-29").unwrap(),
            Command::Select(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(parse_command("today").unwrap(), Command::Today);
        assert_eq!(parse_command("clear").unwrap(), Command::Clear);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_garbage() {
        for cmd in ["", "nxt", "next now", "goto", "goto 2024-13", "select 2023-02-29", "q!"] {
            let err = parse_command(cmd).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::CommandParse), "{}", cmd);
        }
    }

    #[test]
    fn errors_name_the_command() {
        let err = parse_command(" goto march ").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("goto march"));
        assert_eq!(err.to_string(), "unknown command: goto march");
    }
}
