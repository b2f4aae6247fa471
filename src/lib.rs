//! Contractor dashboard with bids, projects, messages and a job calendar.
//!
//! Features:
//! - Sunday-first 42-day month grid with events bucketed by date
//! - Project search and status filtering
//! - Bids table with in-memory edits merged by id
//! - Inbox and notifications
//! - Screens gated on an explicit signed-in session
//!
//! All data comes from JSON fixtures; nothing is persisted.

pub mod args;
pub mod bids;
pub mod calendar;
pub mod error;
pub mod fixtures;
pub mod formatter;
pub mod inbox;
pub mod projects;
pub mod session;
pub mod summary;
pub mod types;
