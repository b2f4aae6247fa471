//! Terminal rendering of dashboard screens with localization and color support.
//!
//! Every `format_*` function returns the lines to print so output can be
//! checked without a terminal. `print_lines` writes them to stdout.

use chrono::{Datelike, Locale, NaiveDate, Weekday};
use unicode_width::UnicodeWidthStr;

use crate::bids::{BidAction, BidRow, BidsTable, Column};
use crate::calendar::{CalendarEvent, DayCell, EventCategory, MonthSpec, ScheduleItem, parse_date};
use crate::fixtures::Dashboard;
use crate::inbox::{MessagingData, Notification, NotificationTab};
use crate::projects::{BestMatch, Project, ProjectsSection, ProjectsView};
use crate::summary::{TrendDirection, format_currency, format_whole_currency, format_whole_number};
use crate::types::{
    AppContext, COLOR_BOLD, COLOR_DIM, COLOR_GREEN, COLOR_RED, COLOR_RESET, COLOR_REVERSE,
    DAYS_PER_WEEK, EMPTY_PLACEHOLDER,
};

/// Width of one day cell: two digits and an event marker.
const DAY_CELL_WIDTH: usize = 3;

/// Width of a rendered week row.
pub const GRID_WIDTH: usize = DAY_CELL_WIDTH * DAYS_PER_WEEK + (DAYS_PER_WEEK - 1);

/// Marker drawn after days that have events.
pub const EVENT_MARKER: char = '*';

const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Month name and year for the current locale, e.g. "February 2024".
pub fn format_month_label(spec: &MonthSpec) -> String {
    spec.first_day()
        .format_localized("%B %Y", get_system_locale())
        .to_string()
}

/// "Feb 11, 2025" for ISO dates, the raw text for anything else.
pub fn format_date_label(value: Option<&str>) -> String {
    match value {
        None => EMPTY_PLACEHOLDER.to_string(),
        Some(raw) => parse_date(raw)
            .map(|date| date.format("%b %d, %Y").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

fn paint(ctx: &AppContext, code: &str, text: &str) -> String {
    if ctx.color {
        format!("{}{}{}", code, text, COLOR_RESET)
    } else {
        text.to_string()
    }
}

/// Center text within a specified width, accounting for Unicode character widths.
pub fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Greedy word wrap by display width. Words longer than `width` get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Get 2-character weekday abbreviation for current locale.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    let base_date = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap_or_default();
    let offset = weekday.num_days_from_monday() as i64;
    let date = base_date + chrono::Duration::days(offset);
    let day_name = date.format_localized("%a", locale).to_string();
    day_name.chars().take(2).collect()
}

/// Format month header centered over the grid.
pub fn format_month_header(ctx: &AppContext, spec: &MonthSpec) -> String {
    let centered = center_text(&format_month_label(spec), GRID_WIDTH);
    paint(ctx, ctx.theme.accent(), &centered)
}

/// Format Sunday-first weekday header row.
pub fn format_weekday_headers(ctx: &AppContext) -> String {
    let locale = get_system_locale();
    let names: Vec<String> = WEEKDAY_ORDER
        .iter()
        .map(|&weekday| pad_right(&get_weekday_short_name(weekday, locale), DAY_CELL_WIDTH))
        .collect();
    paint(ctx, ctx.theme.muted(), &names.join(" "))
}

/// Format day cell with color highlighting.
///
/// Color priority: today > highlighted > outside month > weekend > regular
fn format_day(ctx: &AppContext, cell: &DayCell<'_>) -> String {
    let day_str = format!("{:>2}", cell.date.day());
    let is_weekend = matches!(cell.date.weekday(), Weekday::Sat | Weekday::Sun);

    let formatted = if cell.is_today {
        paint(ctx, COLOR_REVERSE, &day_str)
    } else if cell.is_highlighted {
        paint(ctx, ctx.theme.accent(), &day_str)
    } else if !cell.is_current_month {
        paint(ctx, COLOR_DIM, &day_str)
    } else if is_weekend {
        paint(ctx, COLOR_RED, &day_str)
    } else {
        day_str
    };

    let marker = if cell.events.is_empty() {
        ' '
    } else {
        EVENT_MARKER
    };
    format!("{}{}", formatted, marker)
}

/// Format month as grid of lines: header, weekday names, then six weeks.
pub fn format_month_grid(ctx: &AppContext, spec: &MonthSpec, cells: &[DayCell<'_>]) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);
    lines.push(format_month_header(ctx, spec));
    lines.push(format_weekday_headers(ctx));

    for week in cells.chunks(DAYS_PER_WEEK) {
        let days: Vec<String> = week.iter().map(|cell| format_day(ctx, cell)).collect();
        lines.push(days.join(" "));
    }

    lines
}

fn format_event(ctx: &AppContext, event: &CalendarEvent) -> String {
    let mut line = format!(
        "  {:<9} {}  [{}]",
        event.time.as_deref().unwrap_or(""),
        event.title,
        event.category.label()
    );
    if let Some(location) = &event.location {
        line.push_str(&format!("  @ {}", location));
    }
    if let Some(owner) = &event.owner {
        line.push_str(&format!("  ({})", owner));
    }
    if event.category == EventCategory::TimeOff {
        return paint(ctx, COLOR_DIM, &line);
    }
    line
}

/// Events of the grid, grouped under their day.
pub fn format_agenda(ctx: &AppContext, cells: &[DayCell<'_>]) -> Vec<String> {
    let mut lines = Vec::new();
    for cell in cells.iter().filter(|c| !c.events.is_empty()) {
        let mut heading = cell.date.format("%a %b %d").to_string();
        if cell.is_today {
            heading.push_str(" (today)");
        }
        if cell.is_highlighted {
            heading.push_str(" (highlighted)");
        }
        let code = if cell.is_current_month {
            COLOR_BOLD
        } else {
            COLOR_DIM
        };
        lines.push(paint(ctx, code, &heading));
        lines.extend(cell.events.iter().map(|event| format_event(ctx, event)));
    }
    if lines.is_empty() {
        lines.push("No events this month.".to_string());
    }
    lines
}

/// Full calendar screen: title, synced providers, grid and agenda.
pub fn format_calendar(
    ctx: &AppContext,
    title: &str,
    providers: &[String],
    spec: &MonthSpec,
    cells: &[DayCell<'_>],
) -> Vec<String> {
    let mut lines = vec![paint(ctx, COLOR_BOLD, title)];
    if !providers.is_empty() {
        lines.push(format!("Synced with {}", providers.join(", ")));
    }
    lines.push(String::new());
    lines.extend(format_month_grid(ctx, spec, cells));
    if let Some(date) = spec.highlight() {
        lines.push(format!("Highlighted: {}", date.format("%A, %B %-d")));
    }
    lines.push(String::new());
    lines.extend(format_agenda(ctx, cells));
    lines
}

fn format_trend(ctx: &AppContext, direction: TrendDirection, text: String) -> String {
    match direction {
        TrendDirection::Up => paint(ctx, COLOR_GREEN, &format!("+{}", text)),
        TrendDirection::Down => paint(ctx, COLOR_RED, &format!("-{}", text)),
        TrendDirection::Flat => text,
    }
}

/// Home screen: greeting, timeframes, metrics, recommendation and actions.
pub fn format_summary(ctx: &AppContext, dashboard: &Dashboard, timeframe: &str) -> Vec<String> {
    let summary = &dashboard.summary;
    let name = summary.greeting_name(ctx.session.user_name());
    let mut lines = vec![
        paint(ctx, COLOR_BOLD, &format!("Welcome back, {}!", name)),
        summary.greeting.period_label.clone(),
    ];

    if !dashboard.timeframes.is_empty() {
        let tabs: Vec<String> = dashboard
            .timeframes
            .iter()
            .map(|t| {
                if t == timeframe {
                    format!("[{}]", t)
                } else {
                    t.clone()
                }
            })
            .collect();
        lines.push(format!("Timeframe: {}", tabs.join("  ")));
    }
    lines.push(String::new());

    let label_width = summary
        .metrics
        .iter()
        .map(|m| m.label.width())
        .max()
        .unwrap_or(0);
    for metric in &summary.metrics {
        let mut line = format!(
            "{}  {:>10}",
            pad_right(&metric.label, label_width),
            metric.formatted_value()
        );
        if let Some(goal) = metric.formatted_goal() {
            line.push_str(&format!(" of {}", goal));
        }
        if let Some(total) = metric.formatted_total() {
            line.push_str(&format!(" accepted bids of {}", total));
        }
        line.push_str("  ");
        line.push_str(&format_trend(
            ctx,
            metric.trend.direction,
            metric.trend.display(),
        ));
        lines.push(line);
    }

    let rec = &summary.action_recommendation;
    lines.push(String::new());
    lines.push(format!(
        "[{}] {} ({}): {}",
        rec.badge, rec.label, rec.pending_actions, rec.description
    ));
    for action in &dashboard.actions {
        lines.push(format!(
            "  - {:<8} {} | {} -> {}",
            action.kind, action.title, action.subtitle, action.action_label
        ));
    }

    if !dashboard.messages.is_empty() {
        lines.push(String::new());
        lines.push(paint(ctx, COLOR_BOLD, "Messages"));
        for message in &dashboard.messages {
            lines.push(format!(
                "  {} ({}): {}",
                message.name, message.relative_time, message.preview
            ));
        }
    }
    lines
}

/// Upcoming appointments, one per line.
pub fn format_schedule(ctx: &AppContext, items: &[&ScheduleItem]) -> Vec<String> {
    let mut lines = vec![paint(ctx, COLOR_BOLD, "Schedule")];
    for item in items {
        let when = item
            .starts_at()
            .map(|dt| dt.format("%b %d, %Y  %-I:%M %p").to_string())
            .unwrap_or_else(|_| item.datetime.clone());
        lines.push(format!("  {}  {}  @ {}", when, item.title, item.location));
    }
    if items.is_empty() {
        lines.push("  Nothing scheduled.".to_string());
    }
    lines
}

fn format_project_card(ctx: &AppContext, project: &Project) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  [{}]",
        paint(ctx, COLOR_BOLD, &project.title),
        project.status.label()
    )];
    let estimate_label = project.estimate_label.as_deref().unwrap_or("Estimate");
    lines.push(format!(
        "  {} | {} | {} | {}: {}",
        project.category,
        project.location,
        project.timeline,
        estimate_label,
        format_whole_currency(project.estimate)
    ));
    let width = ctx.width.saturating_sub(2);
    lines.extend(
        wrap_text(&project.description, width)
            .into_iter()
            .map(|l| format!("  {}", l)),
    );
    lines.extend(project.highlights.iter().map(|h| format!("  + {}", h)));
    lines
}

fn format_best_match(ctx: &AppContext, project: &BestMatch) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  [{}]",
        paint(ctx, COLOR_BOLD, &project.title),
        project.status.label()
    )];
    lines.push(format!(
        "  {} | {} - {} | posted {}",
        project.location,
        format_whole_currency(project.budget_min),
        format_whole_currency(project.budget_max),
        project.posted_ago
    ));
    let width = ctx.width.saturating_sub(2);
    lines.extend(
        wrap_text(&project.description, width)
            .into_iter()
            .map(|l| format!("  {}", l)),
    );
    if !project.categories.is_empty() {
        lines.push(format!("  {}", project.categories.join(", ")));
    }
    lines.push(format!("  {}", project.bids_summary));
    lines
}

/// Projects screen for the given view state.
pub fn format_projects(
    ctx: &AppContext,
    section: &ProjectsSection,
    view: &ProjectsView,
) -> Vec<String> {
    let mut lines = vec![paint(ctx, COLOR_BOLD, &section.title)];
    if let Some(subtitle) = &section.subtitle {
        lines.push(subtitle.clone());
    }
    if !section.tabs.is_empty() {
        let tabs: Vec<String> = section
            .tabs
            .iter()
            .map(|t| {
                if t.id == view.active_tab {
                    format!("[{}]", t.label)
                } else {
                    t.label.clone()
                }
            })
            .collect();
        lines.push(tabs.join("  "));
    }
    lines.push(String::new());

    if view.shows_best_matches(section) {
        for project in &section.best_matches {
            lines.extend(format_best_match(ctx, project));
            lines.push(String::new());
        }
        return lines;
    }

    if !section.summaries.is_empty() {
        let tiles: Vec<String> = section
            .summaries
            .iter()
            .map(|s| match &s.suffix {
                Some(suffix) => {
                    format!("{}: {} {}", s.label, format_whole_number(s.value), suffix)
                }
                None => format!("{}: {}", s.label, format_whole_number(s.value)),
            })
            .collect();
        lines.push(tiles.join(" | "));
    }
    let search = if view.search.trim().is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        view.search.as_str()
    };
    lines.push(format!("Status: {}  Search: {}", view.status_filter, search));
    lines.push(String::new());

    let visible = view.visible_projects(section);
    if visible.is_empty() {
        lines.push("No projects match the current filters.".to_string());
    }
    for project in visible {
        lines.extend(format_project_card(ctx, project));
        lines.push(String::new());
    }
    lines
}

fn default_bid_columns() -> Vec<Column> {
    [
        ("project", "Project"),
        ("bidAmount", "Bid Amount"),
        ("status", "Status"),
        ("submittedOn", "Submitted"),
        ("lastUpdate", "Last Update"),
        ("actions", "Actions"),
    ]
    .into_iter()
    .map(|(id, label)| Column {
        id: id.to_string(),
        label: label.to_string(),
    })
    .collect()
}

fn bid_cell(row: &BidRow, column: &str) -> String {
    match column {
        "project" => row.project.clone(),
        "bidAmount" => format_currency(row.bid_amount),
        "status" => row.status.label().to_string(),
        "submittedOn" => format_date_label(Some(&row.submitted_on)),
        "lastUpdate" => format_date_label(row.last_update.as_deref()),
        "actions" => row
            .actions
            .iter()
            .map(|a| match a {
                BidAction::Edit => "Edit",
                BidAction::View => "View",
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Bids table with columns padded to their widest cell.
pub fn format_bids_table(ctx: &AppContext, table: &BidsTable, rows: &[BidRow]) -> Vec<String> {
    let columns = if table.columns.is_empty() {
        default_bid_columns()
    } else {
        table.columns.clone()
    };

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| bid_cell(row, &c.id)).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].width())
                .chain(std::iter::once(c.label.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |values: Vec<String>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| pad_right(v, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![paint(ctx, COLOR_BOLD, &table.title)];
    if let Some(subtitle) = &table.subtitle {
        lines.push(subtitle.clone());
    }
    lines.push(String::new());
    lines.push(paint(
        ctx,
        ctx.theme.muted(),
        &render(columns.iter().map(|c| c.label.clone()).collect()),
    ));
    lines.extend(cells.into_iter().map(render));
    if rows.is_empty() {
        lines.push("No bids yet.".to_string());
    }
    lines
}

/// Details dialog of one bid.
pub fn format_bid_details(ctx: &AppContext, row: &BidRow) -> Vec<String> {
    let details = &row.details;
    let mut lines = vec![
        paint(ctx, COLOR_BOLD, &row.project),
        format!(
            "  {} | {} | submitted {} | updated {}",
            format_currency(row.bid_amount),
            row.status.label(),
            format_date_label(Some(&row.submitted_on)),
            format_date_label(row.last_update.as_deref())
        ),
        format!("  Homeowner: {}", details.homeowner),
        format!("  Location:  {}", details.location),
        format!("  Email:     {}", details.contact_email),
    ];
    if let Some(phone) = &details.contact_phone {
        lines.push(format!("  Phone:     {}", phone));
    }
    if !details.scope.is_empty() {
        lines.push("  Scope:".to_string());
        lines.extend(details.scope.iter().map(|s| format!("    - {}", s)));
    }
    if let Some(notes) = &details.notes {
        lines.push(format!("  Notes:     {}", notes));
    }
    lines
}

/// Contacts list followed by the open conversation.
pub fn format_inbox(ctx: &AppContext, data: &MessagingData) -> Vec<String> {
    let mut lines = vec![paint(
        ctx,
        COLOR_BOLD,
        &format!("Messages ({} unread)", data.unread_count()),
    )];
    let name_width = data
        .contacts
        .iter()
        .map(|c| c.name.width())
        .max()
        .unwrap_or(0);
    for contact in &data.contacts {
        let marker = if contact.unread { '•' } else { ' ' };
        lines.push(format!(
            "{} {}  {:>9}  {}",
            marker,
            pad_right(&contact.name, name_width),
            contact.timestamp,
            contact.preview
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Conversation with {} ({})",
        data.contact.name, data.contact.status
    ));
    for message in &data.messages {
        let sender = if message.is_author {
            "You"
        } else {
            data.contact.name.as_str()
        };
        lines.push(format!(
            "  {} {}: {}",
            message.timestamp,
            paint(ctx, ctx.theme.accent(), sender),
            message.content
        ));
    }
    lines
}

/// Notifications for one tab.
pub fn format_notifications(
    ctx: &AppContext,
    tab: NotificationTab,
    items: &[&Notification],
) -> Vec<String> {
    let mut lines = vec![paint(
        ctx,
        COLOR_BOLD,
        &format!("Notifications: {}", tab.label()),
    )];
    for item in items {
        lines.push(format!("  {:<10} {}", item.time_ago, item.title));
        if let Some(subtitle) = &item.subtitle {
            lines.push(format!("  {:<10} {}", "", subtitle));
        }
    }
    if items.is_empty() {
        lines.push("  You're all caught up.".to_string());
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
