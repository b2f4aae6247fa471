//! Headline metrics, pending actions and number formatting.

use serde::{Deserialize, Serialize};

use crate::types::EMPTY_PLACEHOLDER;

/// Timeframe used when none is picked.
pub const DEFAULT_TIMEFRAME: &str = "Monthly";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    /// Also used for any direction the fixture spells differently.
    #[default]
    #[serde(other)]
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub value: f64,
    #[serde(default)]
    pub direction: TrendDirection,
}

impl Trend {
    /// Percentage change, or a placeholder for flat trends.
    pub fn display(&self) -> String {
        match self.direction {
            TrendDirection::Flat => EMPTY_PLACEHOLDER.to_string(),
            _ => format!("{}%", format_number(self.value.abs())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub trend: Trend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl Metric {
    pub fn is_currency(&self) -> bool {
        self.unit.to_lowercase().contains("usd")
    }

    pub fn formatted_value(&self) -> String {
        self.format_amount(self.value)
    }

    pub fn formatted_goal(&self) -> Option<String> {
        self.goal.map(|goal| self.format_amount(goal))
    }

    pub fn formatted_total(&self) -> Option<String> {
        self.total.map(format_number)
    }

    fn format_amount(&self, value: f64) -> String {
        if self.is_currency() {
            format_currency(value)
        } else {
            format_number(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Greeting {
    pub user_name: String,
    pub period_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecommendation {
    pub pending_actions: u32,
    pub label: String,
    pub description: String,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub greeting: Greeting,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    pub action_recommendation: ActionRecommendation,
}

impl SummaryData {
    /// Name to greet: the signed-in user when known, the fixture's otherwise.
    pub fn greeting_name<'a>(&'a self, signed_in: Option<&'a str>) -> &'a str {
        signed_in.unwrap_or(&self.greeting.user_name)
    }
}

/// Pending item in the actions panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    /// urgent, review, lead, message, payment or anything else.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub subtitle: String,
    pub action_label: String,
}

/// Third timeframe when present, else the first, else [`DEFAULT_TIMEFRAME`].
pub fn default_timeframe(timeframes: &[String]) -> &str {
    timeframes
        .get(2)
        .or_else(|| timeframes.first())
        .map(String::as_str)
        .unwrap_or(DEFAULT_TIMEFRAME)
}

/// en-US style: thousands separators and at most one fraction digit.
pub fn format_number(value: f64) -> String {
    format_grouped(value, 1)
}

/// en-US style rounded to a whole number, for budgets and estimates.
pub fn format_whole_number(value: f64) -> String {
    format_grouped(value, 0)
}

fn format_grouped(value: f64, fraction_digits: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let scale = 10u64.pow(fraction_digits);
    let units = (value.abs() * scale as f64).round() as u64;
    let whole = (units / scale).to_string();
    let fraction = units % scale;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 3);
    if value < 0.0 && units != 0 {
        grouped.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if fraction != 0 {
        grouped.push('.');
        grouped.push_str(&format!("{:0>1$}", fraction, fraction_digits as usize));
    }
    grouped
}

pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

pub fn format_whole_currency(value: f64) -> String {
    format!("${}", format_whole_number(value))
}
