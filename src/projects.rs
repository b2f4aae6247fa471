//! Project listings: cards, best matches and the search/status filter.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Status option that disables status filtering.
pub const ALL_STATUS: &str = "All Status";

/// Tab id that swaps the card list for best matches.
pub const BEST_MATCHES_TAB: &str = "best-matches";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    DueSoon,
    OpenBids,
    Closed,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::DueSoon => "Due Soon",
            ProjectStatus::OpenBids => "Open for Bids",
            ProjectStatus::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BestMatchStatus {
    Open,
    Closing,
    Closed,
}

impl BestMatchStatus {
    pub fn label(self) -> &'static str {
        match self {
            BestMatchStatus::Open | BestMatchStatus::Closing => "Open for Bids",
            BestMatchStatus::Closed => "Bidding Closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: ProjectStatus,
    pub estimate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_label: Option<String>,
    pub location: String,
    pub timeline: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_action_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_action_label: Option<String>,
}

impl Project {
    /// Text matched by the search box.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.category, self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMatch {
    pub id: String,
    pub title: String,
    pub location: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub posted_ago: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub bids_summary: String,
    pub status: BestMatchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub label: String,
}

/// Headline counter shown above the project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsSummary {
    pub id: String,
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilters {
    pub search_placeholder: String,
    #[serde(default)]
    pub status_options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsSection {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<String>,
    #[serde(default)]
    pub summaries: Vec<ProjectsSummary>,
    pub filters: ProjectFilters,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub best_matches: Vec<BestMatch>,
}

pub fn matches_status(project: &Project, status_filter: &str) -> bool {
    let wanted = status_filter.to_lowercase();
    wanted == ALL_STATUS.to_lowercase() || project.status.label().to_lowercase() == wanted
}

/// Case-insensitive substring match on title, category and location.
pub fn matches_search(project: &Project, search: &str) -> bool {
    search.trim().is_empty()
        || project
            .search_text()
            .to_lowercase()
            .contains(&search.to_lowercase())
}

/// Projects passing both the status and the search filter, in input order.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    status_filter: &str,
    search: &str,
) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| matches_status(p, status_filter) && matches_search(p, search))
        .collect()
}

/// Local state of the projects screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsView {
    pub active_tab: String,
    pub status_filter: String,
    pub search: String,
}

impl ProjectsView {
    pub fn new(section: &ProjectsSection) -> Self {
        let active_tab = section
            .active_tab
            .clone()
            .or_else(|| section.tabs.first().map(|t| t.id.clone()))
            .unwrap_or_default();
        let status_filter = section
            .filters
            .default_status
            .clone()
            .or_else(|| section.filters.status_options.first().cloned())
            .unwrap_or_else(|| ALL_STATUS.to_string());

        ProjectsView {
            active_tab,
            status_filter,
            search: String::new(),
        }
    }

    pub fn select_tab(&mut self, section: &ProjectsSection, id: &str) -> Result<()> {
        let tab = section
            .tabs
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::UnknownRecord {
                kind: "tab",
                id: id.to_string(),
            })?;
        self.active_tab = tab.id.clone();
        Ok(())
    }

    /// Pick one of the section's status options (case-insensitive).
    pub fn select_status(&mut self, section: &ProjectsSection, status: &str) -> Result<()> {
        let wanted = status.to_lowercase();
        let option = section
            .filters
            .status_options
            .iter()
            .find(|o| o.to_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownRecord {
                kind: "status option",
                id: status.to_string(),
            })?;
        self.status_filter = option.clone();
        Ok(())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn shows_best_matches(&self, section: &ProjectsSection) -> bool {
        self.active_tab == BEST_MATCHES_TAB && !section.best_matches.is_empty()
    }

    pub fn visible_projects<'a>(&self, section: &'a ProjectsSection) -> Vec<&'a Project> {
        let visible = filter_projects(&section.projects, &self.status_filter, &self.search);
        debug!(
            "projects: {} of {} match status {:?} and search {:?}",
            visible.len(),
            section.projects.len(),
            self.status_filter,
            self.search
        );
        visible
    }
}
