//! Month grid construction and schedule helpers.
//!
//! A month is always shown as six Sunday-first weeks (42 days), starting on
//! the Sunday on or before the 1st. Days outside the month are kept so the
//! grid keeps its shape; they are only flagged as such.

use std::collections::BTreeMap;

use chrono::{
    DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::CELLS_PER_MONTH;

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    TimeOff,
    Project,
    Appointment,
    Reminder,
}

impl EventCategory {
    pub fn label(self) -> &'static str {
        match self {
            EventCategory::TimeOff => "Time off",
            EventCategory::Project => "Project",
            EventCategory::Appointment => "Appointment",
            EventCategory::Reminder => "Reminder",
        }
    }
}

/// A dated calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(rename = "type")]
    pub category: EventCategory,
    /// Free-form time label such as "9:00 AM".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "address", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "projectOwner", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Month and year to lay out, with an optional day to call out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpec {
    first: NaiveDate,
    highlight: Option<NaiveDate>,
}

impl MonthSpec {
    /// Validate `month`/`year` and build the spec.
    ///
    /// Fails for months outside 1-12 and for years whose grid would leave
    /// the range of representable dates.
    pub fn new(month: u32, year: i32, highlight: Option<NaiveDate>) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidArgument(format!(
                "Invalid month: {} (must be 1-12)",
                month
            )));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidArgument(format!("Invalid year: {}", year)))?;

        // The grid reaches up to 6 days back and 41 days forward
        let fits = first.checked_sub_days(Days::new(6)).is_some()
            && first
                .checked_add_days(Days::new(CELLS_PER_MONTH as u64))
                .is_some();
        if !fits {
            return Err(Error::InvalidArgument(format!(
                "Invalid year: {} (out of range)",
                year
            )));
        }

        Ok(MonthSpec { first, highlight })
    }

    /// The month containing `date`, without a highlight.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        MonthSpec::new(date.month(), date.year(), None)
    }

    pub fn with_highlight(self, highlight: Option<NaiveDate>) -> Self {
        MonthSpec { highlight, ..self }
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn highlight(&self) -> Option<NaiveDate> {
        self.highlight
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Sunday on or before the 1st.
    pub fn grid_start(&self) -> NaiveDate {
        let offset = self.first.weekday().num_days_from_sunday();
        self.first - Days::new(offset as u64)
    }

    /// The month before this one. The highlight is dropped.
    pub fn previous(&self) -> Result<Self> {
        let first = self
            .first
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| Error::InvalidArgument("No month before this one".to_string()))?;
        MonthSpec::new(first.month(), first.year(), None)
    }

    /// The month after this one. The highlight is dropped.
    pub fn next(&self) -> Result<Self> {
        let first = self
            .first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| Error::InvalidArgument("No month after this one".to_string()))?;
        MonthSpec::new(first.month(), first.year(), None)
    }

    /// Step `months` forward (positive) or back (negative).
    pub fn shift(&self, months: i32) -> Result<Self> {
        let mut spec = *self;
        for _ in 0..months.unsigned_abs() {
            spec = if months < 0 {
                spec.previous()?
            } else {
                spec.next()?
            };
        }
        Ok(spec)
    }
}

/// One day of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_highlighted: bool,
    /// Events on this date, in input order.
    pub events: Vec<&'a CalendarEvent>,
}

/// Group events by date, keeping input order within each day.
pub fn group_by_date(events: &[CalendarEvent]) -> BTreeMap<NaiveDate, Vec<&CalendarEvent>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        by_date.entry(event.date).or_default().push(event);
    }
    by_date
}

/// Build the 42-day grid for `spec`, marking `today`.
pub fn build_grid_on<'a>(
    spec: &MonthSpec,
    events: &'a [CalendarEvent],
    today: NaiveDate,
) -> Vec<DayCell<'a>> {
    let mut by_date = group_by_date(events);
    let start = spec.grid_start();

    let cells: Vec<DayCell<'a>> = start
        .iter_days()
        .take(CELLS_PER_MONTH)
        .map(|date| DayCell {
            date,
            is_current_month: date.month() == spec.month() && date.year() == spec.year(),
            is_today: date == today,
            is_highlighted: spec.highlight() == Some(date),
            events: by_date.remove(&date).unwrap_or_default(),
        })
        .collect();

    debug!(
        "built grid for {}-{:02}: {} .. {}, {} events placed, {} outside",
        spec.year(),
        spec.month(),
        start,
        cells.last().map(|c| c.date).unwrap_or(start),
        cells.iter().map(|c| c.events.len()).sum::<usize>(),
        by_date.values().map(Vec::len).sum::<usize>(),
    );

    cells
}

/// Build the 42-day grid for `spec`, marking the current date.
pub fn build_grid<'a>(spec: &MonthSpec, events: &'a [CalendarEvent]) -> Vec<DayCell<'a>> {
    build_grid_on(spec, events, crate::args::get_today_date())
}

/// Check if a year is a leap year (proleptic Gregorian).
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(Error::InvalidArgument(format!(
            "Invalid month: {} (must be 1-12)",
            month
        ))),
    }
}

/// Parse a date or timestamp down to its calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date is taken in the
/// timestamp's own offset) and naive `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    parse_datetime(value).map(|dt| dt.date())
}

/// Parse a timestamp, keeping wall-clock time in its own offset.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(Error::InvalidArgument(format!("Invalid date: {}", value)))
}

/// Parse a timestamp to the instant it names.
///
/// Timestamps without an offset are read in the local time zone.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(dt.to_utc());
    }
    let naive = parse_datetime(value)?;
    Ok(Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.to_utc())
        .unwrap_or_else(|| naive.and_utc()))
}

/// Upcoming appointment shown in the dashboard sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub title: String,
    pub datetime: String,
    pub location: String,
}

impl ScheduleItem {
    /// Wall-clock start in the item's own offset.
    pub fn starts_at(&self) -> Result<NaiveDateTime> {
        parse_datetime(&self.datetime)
    }

    pub fn instant(&self) -> Result<DateTime<Utc>> {
        parse_instant(&self.datetime)
    }

    /// Calendar form of this appointment, keyed by its start date.
    pub fn to_event(&self) -> Result<CalendarEvent> {
        let starts_at = self.starts_at()?;
        Ok(CalendarEvent {
            id: self.id.clone(),
            date: starts_at.date(),
            title: self.title.clone(),
            category: EventCategory::Appointment,
            time: Some(starts_at.format("%-I:%M %p").to_string()),
            location: Some(self.location.clone()),
            owner: None,
        })
    }
}

/// Order schedule items by the instant they start. Unparseable times go last, in input order.
pub fn sort_schedule(items: &[ScheduleItem]) -> Vec<&ScheduleItem> {
    let mut sorted: Vec<&ScheduleItem> = items.iter().collect();
    sorted.sort_by_key(|item| {
        let instant = item.instant().ok();
        (instant.is_none(), instant)
    });
    sorted
}

/// Schedule items as calendar events, in start order.
///
/// Items whose start time cannot be read have no day to sit on and are left out.
pub fn schedule_events(items: &[ScheduleItem]) -> Vec<CalendarEvent> {
    sort_schedule(items)
        .into_iter()
        .filter_map(|item| match item.to_event() {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("skipping schedule item {}: {}", item.id, e);
                None
            }
        })
        .collect()
}

/// Month the schedule calendar opens on: that of the earliest event, else that of `today`.
pub fn schedule_month(events: &[CalendarEvent], today: NaiveDate) -> Result<MonthSpec> {
    MonthSpec::containing(events.first().map_or(today, |event| event.date))
}

/// Calendar screen fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarData {
    pub title: String,
    pub month: u32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_date: Option<String>,
    #[serde(default)]
    pub synced_providers: Vec<String>,
    pub events: Vec<CalendarEvent>,
}

impl CalendarData {
    /// The month this fixture opens on.
    pub fn month_spec(&self) -> Result<MonthSpec> {
        let highlight = self
            .highlight_date
            .as_deref()
            .map(parse_date)
            .transpose()?;
        MonthSpec::new(self.month, self.year, highlight)
    }
}
