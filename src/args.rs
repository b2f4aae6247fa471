//! Command-line argument parsing using clap.
//!
//! Each subcommand prints one dashboard screen. Without a subcommand the
//! home summary is shown.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::bids::BidStatus;
use crate::calendar::{MonthSpec, parse_date};
use crate::error::{Error, Result};
use crate::inbox::NotificationTab;
use crate::session::{Screen, Session};
use crate::types::{
    AppContext, COLOR_ENABLED_BY_DEFAULT, DEFAULT_WIDTH, MAX_WIDTH, MIN_WIDTH, Theme,
};

/// Environment variable that pins "today" (`YYYY-MM-DD`).
pub const TEST_TIME_ENV_VAR: &str = "BIDBOARD_TEST_TIME";

#[derive(Parser, Debug)]
#[command(name = "bidboard")]
#[command(about = "Contractor dashboard: bids, projects, messages and the job calendar", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Read fixture documents from this directory instead of the bundled ones.
    #[arg(
        long,
        global = true,
        env = "BIDBOARD_DATA_DIR",
        help_heading = "Data options",
        value_name = "dir",
        value_hint = ValueHint::DirPath
    )]
    pub data_dir: Option<PathBuf>,

    /// Disable colorized output.
    #[arg(long, global = true, help_heading = "Output options")]
    pub no_color: bool,

    /// Color theme (light, dark or system).
    #[arg(
        long,
        global = true,
        default_value = "system",
        help_heading = "Output options",
        value_name = "theme"
    )]
    pub theme: Theme,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Greeting, metrics, pending actions and sidebar.
    Summary {
        /// Reporting timeframe (as listed in the dashboard).
        #[arg(short = 't', long, value_name = "name")]
        timeframe: Option<String>,
    },

    /// Month grid with events.
    Calendar {
        /// Month (1-12 or name), or a 4-digit year.
        #[arg(index = 1, value_name = "month", value_hint = ValueHint::Other)]
        month_arg: Option<String>,

        /// Year.
        #[arg(index = 2, value_name = "year", value_hint = ValueHint::Other)]
        year_arg: Option<String>,

        /// Day to call out (YYYY-MM-DD).
        #[arg(long, value_name = "date")]
        highlight: Option<String>,

        /// Move this many months forward (negative for back).
        #[arg(long, allow_hyphen_values = true, value_name = "months")]
        shift: Option<i32>,
    },

    /// Project requests, filtered by status and search text.
    Projects {
        /// Tab id (e.g. best-matches).
        #[arg(long, value_name = "id")]
        tab: Option<String>,

        /// Status option, e.g. "Open for Bids".
        #[arg(short = 's', long, value_name = "label")]
        status: Option<String>,

        /// Text to look for in title, category and location.
        #[arg(short = 'q', long, value_name = "text")]
        search: Option<String>,
    },

    /// Bids table, with optional details or an in-memory edit.
    Bids {
        /// Show details of a bid.
        #[arg(long, value_name = "id", conflicts_with = "edit")]
        view: Option<String>,

        /// Edit a bid (changes are not saved to disk).
        #[arg(long, value_name = "id")]
        edit: Option<String>,

        /// New bid amount.
        #[arg(long, requires = "edit", value_name = "amount", allow_hyphen_values = true)]
        amount: Option<String>,

        /// New status.
        #[arg(long, requires = "edit", value_name = "status")]
        status: Option<BidStatus>,

        /// New submission date.
        #[arg(long, requires = "edit", value_name = "date")]
        submitted: Option<String>,

        /// New last-update date (empty to clear).
        #[arg(long, requires = "edit", value_name = "date")]
        last_update: Option<String>,

        /// New notes (empty to clear).
        #[arg(long, requires = "edit", value_name = "text")]
        notes: Option<String>,
    },

    /// Conversation inbox.
    Messages,

    /// Notifications, optionally for one category.
    Notifications {
        #[arg(short = 'c', long, default_value = "all", value_name = "category")]
        category: NotificationTab,
    },

    /// Upcoming appointments in start order.
    Schedule {
        /// Lay the appointments out on a month grid.
        #[arg(long)]
        grid: bool,

        /// Move the grid this many months from the first appointment.
        #[arg(long, requires = "grid", allow_hyphen_values = true, value_name = "months")]
        shift: Option<i32>,
    },
}

impl Command {
    pub fn screen(&self) -> Screen {
        match self {
            Command::Summary { .. } | Command::Notifications { .. } | Command::Schedule { .. } => {
                Screen::Home
            }
            Command::Calendar { .. } => Screen::Calendar,
            Command::Projects { .. } => Screen::Projects,
            Command::Bids { .. } => Screen::Bids,
            Command::Messages => Screen::Messages,
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::Summary { timeframe: None }
    }
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Without a command, display the dashboard summary.

Every command requires a signed-in user (BIDBOARD_USER).

Examples:
  bidboard                              Dashboard summary
  bidboard calendar                     Calendar fixture month
  bidboard calendar 2 2024              February 2024
  bidboard calendar --shift -1          Month before the fixture month
  bidboard projects -q brook            Projects matching \"brook\"
  bidboard projects -s \"Due Soon\"       Projects due soon
  bidboard bids --view bid-1001         Bid details
  bidboard bids --edit bid-1002 --amount 7500 --status awarded
  bidboard notifications -c bids        Bid notifications only
  bidboard schedule --grid --shift 1    Appointments, month after the first one";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}

impl AppContext {
    pub fn new(args: &Args, session: Session) -> Result<Self> {
        let color = !args.no_color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        Ok(AppContext {
            today: get_today_date(),
            color,
            theme: args.theme,
            session,
            width: get_terminal_width()
                .unwrap_or(DEFAULT_WIDTH)
                .clamp(MIN_WIDTH, MAX_WIDTH),
        })
    }
}

/// Get today's date, respecting BIDBOARD_TEST_TIME for testing.
pub fn get_today_date() -> chrono::NaiveDate {
    if let Ok(test_time) = std::env::var(TEST_TIME_ENV_VAR)
        && let Ok(date) = chrono::NaiveDate::parse_from_str(test_time.trim(), "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

fn get_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_lowercase();
    let month_names: [(&str, u32); 23] = [
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ];
    month_names
        .iter()
        .find(|(name, _)| *name == s_lower)
        .map(|(_, num)| *num)
}

fn parse_year(s: &str) -> Result<i32> {
    s.parse::<i32>()
        .map_err(|_| Error::InvalidArgument(format!("Invalid year: {}", s)))
}

/// Resolve the calendar month from positional arguments.
///
/// Argument patterns:
/// - none: `fallback`
/// - 1 arg: year (4 digits, keeps the fallback month) or month (keeps the fallback year)
/// - 2 args: month year
///
/// `shift` then moves that many months. `highlight` replaces the fallback
/// highlight when given, whichever month ends up shown.
pub fn resolve_month_spec(
    month_arg: Option<&str>,
    year_arg: Option<&str>,
    highlight: Option<&str>,
    shift: Option<i32>,
    fallback: MonthSpec,
) -> Result<MonthSpec> {
    let spec = match (month_arg, year_arg) {
        (None, None) => fallback,
        (Some(value), None) => {
            if value.len() == 4
                && let Ok(year) = value.parse::<i32>()
            {
                MonthSpec::new(fallback.month(), year, None)?
            } else {
                let month = parse_month(value)
                    .ok_or_else(|| Error::InvalidArgument(format!("Invalid month: {}", value)))?;
                MonthSpec::new(month, fallback.year(), None)?
            }
        }
        (Some(month), Some(year)) => {
            let month = parse_month(month)
                .ok_or_else(|| Error::InvalidArgument(format!("Invalid month: {}", month)))?;
            MonthSpec::new(month, parse_year(year)?, None)?
        }
        (None, Some(_)) => {
            return Err(Error::InvalidArgument(
                "Invalid argument combination".to_string(),
            ));
        }
    };
    let spec = match shift {
        Some(months) => spec.shift(months)?,
        None => spec,
    };

    // Keep the fixture highlight only when the fixture month itself is shown
    let highlight = match highlight {
        Some(value) => Some(parse_date(value)?),
        None if spec.first_day() == fallback.first_day() => fallback.highlight(),
        None => None,
    };
    Ok(spec.with_highlight(highlight))
}
