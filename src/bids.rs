//! Submitted bids, the edit form and in-memory edits.
//!
//! Edits never leave the process: a saved form is merged back into the rows
//! held by [`BidsView`] and is gone once the view is dropped.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BidStatus {
    Shortlisted,
    Declined,
    UnderReview,
    Awarded,
    Submitted,
}

impl BidStatus {
    pub fn label(self) -> &'static str {
        match self {
            BidStatus::Shortlisted => "Shortlisted",
            BidStatus::Declined => "Declined",
            BidStatus::UnderReview => "Under Review",
            BidStatus::Awarded => "Awarded",
            BidStatus::Submitted => "Submitted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidAction {
    Edit,
    View,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidDetails {
    pub homeowner: String,
    pub location: String,
    #[serde(default)]
    pub scope: Vec<String>,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRow {
    pub id: String,
    pub project: String,
    pub bid_amount: f64,
    pub status: BidStatus,
    /// ISO date the bid went out.
    pub submitted_on: String,
    pub last_update: Option<String>,
    #[serde(default)]
    pub actions: Vec<BidAction>,
    pub details: BidDetails,
}

impl BidRow {
    pub fn allows(&self, action: BidAction) -> bool {
        self.actions.contains(&action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidsTable {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    pub bids: Vec<BidRow>,
}

/// Replace the row sharing `updated`'s id. Returns false when no row matched.
pub fn merge_by_id(rows: &mut [BidRow], updated: &BidRow) -> bool {
    match rows.iter_mut().find(|row| row.id == updated.id) {
        Some(row) => {
            *row = updated.clone();
            true
        }
        None => false,
    }
}

/// Editable fields of a bid, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidEditForm {
    pub bid_amount: String,
    pub status: BidStatus,
    pub submitted_on: String,
    pub last_update: String,
    pub notes: String,
}

impl BidEditForm {
    pub fn from_row(row: &BidRow) -> Self {
        BidEditForm {
            bid_amount: row.bid_amount.to_string(),
            status: row.status,
            submitted_on: row.submitted_on.clone(),
            last_update: row.last_update.clone().unwrap_or_default(),
            notes: row.details.notes.clone().unwrap_or_default(),
        }
    }

    /// Copy of `row` with the form's values applied.
    ///
    /// An amount that is not a number becomes 0. The last update and notes
    /// are trimmed, and either one left blank is cleared.
    pub fn apply(&self, row: &BidRow) -> BidRow {
        let bid_amount = self
            .bid_amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        let last_update = Some(self.last_update.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let notes = Some(self.notes.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        BidRow {
            bid_amount,
            status: self.status,
            submitted_on: self.submitted_on.clone(),
            last_update,
            details: BidDetails {
                notes,
                ..row.details.clone()
            },
            ..row.clone()
        }
    }
}

/// Local state of the bids screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidsView {
    rows: Vec<BidRow>,
    selected: Option<String>,
    editing: Option<String>,
}

impl BidsView {
    pub fn new(table: &BidsTable) -> Self {
        BidsView {
            rows: table.bids.clone(),
            selected: None,
            editing: None,
        }
    }

    pub fn rows(&self) -> &[BidRow] {
        &self.rows
    }

    pub fn find(&self, id: &str) -> Result<&BidRow> {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .ok_or_else(|| Error::UnknownRecord {
                kind: "bid",
                id: id.to_string(),
            })
    }

    /// Open the details dialog for a bid.
    pub fn view(&mut self, id: &str) -> Result<&BidRow> {
        let id = self.find(id)?.id.clone();
        self.selected = Some(id);
        self.find_selected()
    }

    /// Open the edit dialog for a bid that offers editing.
    pub fn edit(&mut self, id: &str) -> Result<BidEditForm> {
        let row = self.find(id)?;
        if !row.allows(BidAction::Edit) {
            return Err(Error::InvalidArgument(format!(
                "Bid {} cannot be edited",
                row.id
            )));
        }
        let form = BidEditForm::from_row(row);
        self.editing = Some(row.id.clone());
        Ok(form)
    }

    /// Merge an edited bid and close the edit dialog.
    pub fn save(&mut self, updated: BidRow) -> Result<()> {
        if !merge_by_id(&mut self.rows, &updated) {
            return Err(Error::UnknownRecord {
                kind: "bid",
                id: updated.id,
            });
        }
        debug!("saved edits to bid {}", updated.id);
        self.editing = None;
        Ok(())
    }

    /// Apply `form` to the bid being edited and save it.
    pub fn submit(&mut self, form: &BidEditForm) -> Result<&BidRow> {
        let id = self
            .editing
            .clone()
            .ok_or_else(|| Error::InvalidArgument("No bid is being edited".to_string()))?;
        let updated = form.apply(self.find(&id)?);
        self.save(updated)?;
        self.find(&id)
    }

    pub fn selected(&self) -> Option<&BidRow> {
        self.selected.as_deref().and_then(|id| self.find(id).ok())
    }

    pub fn editing(&self) -> Option<&BidRow> {
        self.editing.as_deref().and_then(|id| self.find(id).ok())
    }

    pub fn close_view(&mut self) {
        self.selected = None;
    }

    pub fn close_edit(&mut self) {
        self.editing = None;
    }

    fn find_selected(&self) -> Result<&BidRow> {
        self.selected().ok_or_else(|| Error::UnknownRecord {
            kind: "bid",
            id: self.selected.clone().unwrap_or_default(),
        })
    }
}
