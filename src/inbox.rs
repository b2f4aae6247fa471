//! Conversations, message previews and notifications.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub preview: String,
    pub timestamp: String,
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// "you", "contact" or a display name.
    pub sender: String,
    pub content: String,
    pub timestamp: String,
    #[serde(default)]
    pub is_author: bool,
}

/// Person whose conversation is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveContact {
    pub name: String,
    pub avatar: String,
    pub status: String,
}

/// Messages screen fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingData {
    pub contact: ActiveContact,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl MessagingData {
    pub fn unread_count(&self) -> usize {
        unread_count(&self.contacts)
    }
}

pub fn unread_count(contacts: &[Contact]) -> usize {
    contacts.iter().filter(|c| c.unread).count()
}

/// Sidebar preview of a recent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePreview {
    pub id: String,
    pub name: String,
    pub preview: String,
    pub relative_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Leads,
    Bids,
    Projects,
}

/// Tab of the notifications dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTab {
    #[default]
    All,
    Leads,
    Bids,
    Projects,
}

impl NotificationTab {
    pub fn label(self) -> &'static str {
        match self {
            NotificationTab::All => "All",
            NotificationTab::Leads => "Leads",
            NotificationTab::Bids => "Bids",
            NotificationTab::Projects => "Projects",
        }
    }

    pub fn includes(self, category: NotificationCategory) -> bool {
        match self {
            NotificationTab::All => true,
            NotificationTab::Leads => category == NotificationCategory::Leads,
            NotificationTab::Bids => category == NotificationCategory::Bids,
            NotificationTab::Projects => category == NotificationCategory::Projects,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub category: NotificationCategory,
    pub title: String,
    pub time_ago: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

pub fn filter_notifications(items: &[Notification], tab: NotificationTab) -> Vec<&Notification> {
    items.iter().filter(|n| tab.includes(n.category)).collect()
}

/// Local state of the notifications dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationsView {
    pub tab: NotificationTab,
}

impl NotificationsView {
    pub fn visible<'a>(&self, items: &'a [Notification]) -> Vec<&'a Notification> {
        filter_notifications(items, self.tab)
    }
}
