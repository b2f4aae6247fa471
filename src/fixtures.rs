//! Fixture documents and where they are read from.
//!
//! The dashboard has no data store. Each screen reads one JSON document,
//! bundled into the binary at build time or read from a directory given on
//! the command line.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::bids::BidsTable;
use crate::calendar::{CalendarData, ScheduleItem};
use crate::error::{Error, Result};
use crate::inbox::{MessagePreview, MessagingData, Notification};
use crate::projects::ProjectsSection;
use crate::summary::{ActionItem, SummaryData};

pub const DASHBOARD_FILE: &str = "dashboard.json";
pub const CALENDAR_FILE: &str = "calendar.json";
pub const BIDS_FILE: &str = "bids.json";
pub const MESSAGES_FILE: &str = "messages.json";

const BUNDLED: [(&str, &str); 4] = [
    (DASHBOARD_FILE, include_str!("../data/dashboard.json")),
    (CALENDAR_FILE, include_str!("../data/calendar.json")),
    (BIDS_FILE, include_str!("../data/bids.json")),
    (MESSAGES_FILE, include_str!("../data/messages.json")),
];

/// Home screen fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: SummaryData,
    #[serde(default)]
    pub timeframes: Vec<String>,
    #[serde(default)]
    pub actions: Vec<ActionItem>,
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
    #[serde(default)]
    pub messages: Vec<MessagePreview>,
    pub projects_section: ProjectsSection,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FixtureSource {
    /// Documents compiled into the binary.
    #[default]
    Bundled,
    /// Documents read from this directory.
    Directory(PathBuf),
}

impl FixtureSource {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map_or(FixtureSource::Bundled, FixtureSource::Directory)
    }

    fn read(&self, name: &str) -> Result<Cow<'static, str>> {
        match self {
            FixtureSource::Bundled => BUNDLED
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, text)| Cow::Borrowed(*text))
                .ok_or_else(|| Error::UnknownRecord {
                    kind: "fixture",
                    id: name.to_string(),
                }),
            FixtureSource::Directory(dir) => {
                let path = dir.join(name);
                std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| Error::Io { path, source })
            }
        }
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        debug!("loading {} from {}", name, self);
        let text = self.read(name)?;
        serde_json::from_str(&text).map_err(|source| Error::Parse {
            name: name.to_string(),
            source,
        })
    }

    pub fn dashboard(&self) -> Result<Dashboard> {
        self.load(DASHBOARD_FILE)
    }

    pub fn calendar(&self) -> Result<CalendarData> {
        self.load(CALENDAR_FILE)
    }

    pub fn bids(&self) -> Result<BidsTable> {
        self.load(BIDS_FILE)
    }

    pub fn messages(&self) -> Result<MessagingData> {
        self.load(MESSAGES_FILE)
    }
}

impl fmt::Display for FixtureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureSource::Bundled => f.write_str("bundled fixtures"),
            FixtureSource::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}
