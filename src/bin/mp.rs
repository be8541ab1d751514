extern crate monthpick as lib;

use chrono::{Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::events::{Dispatcher, Event};
use lib::picker::{CalendarView, DatePicker};
use lib::ui::{App, PlainMonth, Theme};
use nix::sys::termios;
use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::input::MouseTerminal;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mp",
    about = "monthpick - a month view date picker for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(short = "m", long = "month", help = "month to show first, as YYYY-MM")]
    pub month: Option<CalendarView>,

    #[structopt(long = "select", help = "preselected date, as YYYY-MM-DD")]
    pub select: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file.clone() {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    } else if !args.show {
        // stderr shares the terminal with the picker
        logger = logger.do_not_log();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let theme = Theme::from(&config.theme);
    let today = Local::now().date_naive();
    let view = args.month.unwrap_or_else(|| CalendarView::from(today));

    if args.show {
        print!("{}", PlainMonth::new(view, today, args.select, &theme));
        return Ok(());
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("monthpick ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    let sink = dispatcher.event_sink().clone();
    let picker = DatePicker::new(view).on_date_select(move |date| {
        if let Err(err) = sink.send(Event::DateSelected(date)) {
            log::warn!("Could not deliver selection of {}: {}", date, err);
        }
    });

    let mut app = App::new(picker, args.select, theme);

    let selected = {
        // Reports mouse events until dropped
        let _mouse = if config.mouse {
            let mut mouse_term = MouseTerminal::from(stdout());
            mouse_term.flush()?;
            Some(mouse_term)
        } else {
            None
        };

        let stdout = stdout();
        let term = Terminal::new(stdout.lock())?;
        app.run(dispatcher, term)
    };

    if let Some(date) = selected? {
        println!("{}", date.format("%Y-%m-%d"));
    }

    Ok(())
}
