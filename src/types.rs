//! Shared context, theme selection and rendering constants.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Colour theme for terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the terminal; resolves to dark.
    #[default]
    System,
}

impl Theme {
    pub fn resolve(self) -> Theme {
        match self {
            Theme::System => Theme::Dark,
            other => other,
        }
    }

    /// Accent used for headers and highlighted days.
    pub fn accent(self) -> &'static str {
        match self.resolve() {
            Theme::Light => COLOR_BLUE,
            _ => COLOR_TEAL,
        }
    }

    /// Secondary colour used for weekday names and labels.
    pub fn muted(self) -> &'static str {
        match self.resolve() {
            Theme::Light => COLOR_DIM,
            _ => COLOR_SAND_YELLOW,
        }
    }
}

/// Everything the presentation layer needs that does not come from fixtures.
#[derive(Clone, Debug)]
pub struct AppContext {
    /// Date used for "today" marks.
    pub today: NaiveDate,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    pub theme: Theme,
    pub session: Session,
    /// Column at which long text is wrapped.
    pub width: usize,
}

// Constants for the month grid
pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;
pub const CELLS_PER_MONTH: usize = DAYS_PER_WEEK * WEEKS_PER_GRID; // 6 weeks × 7 days

// Wrap width bounds when the terminal size is unknown or extreme
pub const DEFAULT_WIDTH: usize = 80;
pub const MIN_WIDTH: usize = 40;
pub const MAX_WIDTH: usize = 120;

pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// Placeholder for absent values
pub const EMPTY_PLACEHOLDER: &str = "—";

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_BOLD: &str = "\x1b[1m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_GREEN: &str = "\x1b[92m";
pub const COLOR_BLUE: &str = "\x1b[94m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
