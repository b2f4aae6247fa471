//! Integration tests for fixture loading and screen rendering.

use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

use bidboard::bids::BidsView;
use bidboard::calendar::{
    MonthSpec, build_grid_on, schedule_events, schedule_month, sort_schedule,
};
use bidboard::error::Error;
use bidboard::fixtures::{CALENDAR_FILE, FixtureSource};
use bidboard::formatter::{
    EVENT_MARKER, GRID_WIDTH, format_bid_details, format_bids_table, format_calendar,
    format_inbox, format_month_grid, format_notifications, format_projects, format_schedule,
    format_summary, wrap_text,
};
use bidboard::inbox::{NotificationTab, NotificationsView};
use bidboard::projects::ProjectsView;
use bidboard::session::Session;
use bidboard::summary::{TrendDirection, default_timeframe};
use bidboard::types::{AppContext, Theme};

fn test_context() -> AppContext {
    AppContext {
        today: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        color: false,
        theme: Theme::Dark,
        session: Session::signed_in("Alex"),
        width: 80,
    }
}

fn color_context() -> AppContext {
    AppContext {
        color: true,
        ..test_context()
    }
}

mod fixture_tests {
    use super::*;

    #[test]
    fn test_bundled_calendar() {
        let calendar = FixtureSource::Bundled.calendar().unwrap();
        assert_eq!(calendar.title, "Job Calendar");
        assert_eq!(calendar.events.len(), 10);

        let spec = calendar.month_spec().unwrap();
        assert_eq!((spec.month(), spec.year()), (3, 2025));
        assert_eq!(spec.highlight(), NaiveDate::from_ymd_opt(2025, 3, 14));
    }

    #[test]
    fn test_bundled_dashboard() {
        let dashboard = FixtureSource::Bundled.dashboard().unwrap();
        assert_eq!(dashboard.summary.metrics.len(), 4);
        assert_eq!(default_timeframe(&dashboard.timeframes), "Monthly");
        assert_eq!(dashboard.projects_section.projects.len(), 4);
        assert_eq!(dashboard.notifications.len(), 4);

        let rfp = &dashboard.summary.metrics[2];
        assert_eq!(rfp.trend.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_bundled_bids_and_messages() {
        let bids = FixtureSource::Bundled.bids().unwrap();
        assert_eq!(bids.bids.len(), 5);
        assert_eq!(bids.bids[1].last_update, None);

        let messages = FixtureSource::Bundled.messages().unwrap();
        assert_eq!(messages.unread_count(), 2);
        assert!(messages.messages.iter().any(|m| m.is_author));
    }

    #[test]
    fn test_directory_source_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::from_dir(Some(dir.path().join("missing")));
        assert!(matches!(source.calendar(), Err(Error::Io { .. })));
    }

    #[test]
    fn test_directory_source_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CALENDAR_FILE), "{ \"title\": ").unwrap();

        let source = FixtureSource::from_dir(Some(dir.path().to_path_buf()));
        let err = source.calendar().unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains(CALENDAR_FILE));
    }

    #[test]
    fn test_directory_source_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CALENDAR_FILE),
            r#"{"title": "Crew", "month": 2, "year": 2024, "events": [
                {"id": "a", "date": "2024-02-14", "title": "Tile", "type": "project"}
            ]}"#,
        )
        .unwrap();

        let calendar = FixtureSource::from_dir(Some(dir.path().to_path_buf()))
            .calendar()
            .unwrap();
        assert_eq!(calendar.title, "Crew");
        assert!(calendar.synced_providers.is_empty());
        assert_eq!(calendar.month_spec().unwrap().highlight(), None);
    }

    #[test]
    fn test_from_dir_none_is_bundled() {
        assert_eq!(FixtureSource::from_dir(None), FixtureSource::Bundled);
    }
}

mod calendar_screen_tests {
    use super::*;

    #[test]
    fn test_fixture_grid_places_nine_events() {
        let calendar = FixtureSource::Bundled.calendar().unwrap();
        let spec = calendar.month_spec().unwrap();
        let cells = build_grid_on(&spec, &calendar.events, test_context().today);

        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 2, 23).unwrap());
        assert_eq!(cells[41].date, NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
        assert_eq!(cells.iter().map(|c| c.events.len()).sum::<usize>(), 9);

        let highlighted = cells.iter().find(|c| c.is_highlighted).unwrap();
        let ids: Vec<&str> = highlighted.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["evt-04", "evt-05"]);
    }

    #[test]
    fn test_month_grid_layout() {
        let ctx = test_context();
        let calendar = FixtureSource::Bundled.calendar().unwrap();
        let spec = calendar.month_spec().unwrap();
        let cells = build_grid_on(&spec, &calendar.events, ctx.today);
        let grid = format_month_grid(&ctx, &spec, &cells);

        assert_eq!(grid.len(), 8);
        assert!(grid[0].contains("2025"));
        for week in &grid[2..] {
            assert_eq!(week.width(), GRID_WIDTH);
        }
        // March 3 carries the kickoff
        assert!(grid[3].contains(&format!(" 3{}", EVENT_MARKER)));
    }

    #[test]
    fn test_month_grid_with_color() {
        let ctx = color_context();
        let spec = MonthSpec::new(3, 2025, None).unwrap();
        let cells = build_grid_on(&spec, &[], ctx.today);
        let grid = format_month_grid(&ctx, &spec, &cells);

        assert!(grid.iter().any(|line| line.contains("\x1b[7m")));
        assert!(grid[0].contains("\x1b[0m"));
    }

    #[test]
    fn test_calendar_screen_sections() {
        let ctx = test_context();
        let calendar = FixtureSource::Bundled.calendar().unwrap();
        let spec = calendar.month_spec().unwrap();
        let cells = build_grid_on(&spec, &calendar.events, ctx.today);
        let lines = format_calendar(
            &ctx,
            &calendar.title,
            &calendar.synced_providers,
            &spec,
            &cells,
        );

        assert_eq!(lines[0], "Job Calendar");
        assert_eq!(lines[1], "Synced with Google Calendar, Outlook");
        assert!(lines.iter().any(|l| l == "Highlighted: Friday, March 14"));
        assert!(lines.iter().any(|l| l.contains("Roof inspection")));
        assert!(lines.iter().any(|l| l.contains("(highlighted)")));
        assert!(!lines.iter().any(|l| l.contains("Quarterly tax filing")));
    }

    #[test]
    fn test_empty_month_agenda() {
        let ctx = test_context();
        let spec = MonthSpec::new(8, 2025, None).unwrap();
        let cells = build_grid_on(&spec, &[], ctx.today);
        let lines = format_calendar(&ctx, "Job Calendar", &[], &spec, &cells);

        assert_eq!(lines.last().unwrap(), "No events this month.");
        assert!(!lines.iter().any(|l| l.starts_with("Highlighted:")));
    }
}

mod home_screen_tests {
    use super::*;

    #[test]
    fn test_summary_uses_session_name() {
        let ctx = test_context();
        let dashboard = FixtureSource::Bundled.dashboard().unwrap();
        let lines = format_summary(&ctx, &dashboard, "Monthly");

        assert_eq!(lines[0], "Welcome back, Alex!");
        assert!(lines.iter().any(|l| l.contains("[Monthly]")));
        assert!(lines.iter().any(|l| l.contains("$48,250")));
        assert!(lines.iter().any(|l| l.contains("+12.5%")));
        assert!(lines.iter().any(|l| l.contains("-4.2%")));
    }

    #[test]
    fn test_schedule_in_start_order() {
        let ctx = test_context();
        let dashboard = FixtureSource::Bundled.dashboard().unwrap();
        let lines = format_schedule(&ctx, &sort_schedule(&dashboard.schedule));

        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("Kitchen remodel kickoff"));
        assert!(lines[2].contains("Site walkthrough"));
        assert!(lines[3].contains("Roof inspection"));
    }

    #[test]
    fn test_notifications_for_bids() {
        let ctx = test_context();
        let dashboard = FixtureSource::Bundled.dashboard().unwrap();
        let view = NotificationsView {
            tab: NotificationTab::Bids,
        };
        let lines = format_notifications(&ctx, view.tab, &view.visible(&dashboard.notifications));

        assert_eq!(lines[0], "Notifications: Bids");
        assert!(lines.iter().any(|l| l.contains("Kitchen Remodel bid shortlisted")));
        assert!(lines.iter().any(|l| l.contains("Basement Waterproofing bid declined")));
        assert!(!lines.iter().any(|l| l.contains("New lead in Forest Hills")));
    }

    #[test]
    fn test_schedule_grid() {
        let ctx = test_context();
        let dashboard = FixtureSource::Bundled.dashboard().unwrap();
        let events = schedule_events(&dashboard.schedule);
        let spec = schedule_month(&events, ctx.today).unwrap();
        assert_eq!((spec.month(), spec.year()), (3, 2025));

        let cells = build_grid_on(&spec, &events, ctx.today);
        let lines = format_calendar(&ctx, "Schedule", &[], &spec, &cells);
        assert_eq!(lines[0], "Schedule");
        assert!(lines.iter().any(|l| l.contains(&format!(" 3{}", EVENT_MARKER))));
        let kickoff = lines
            .iter()
            .find(|l| l.contains("Kitchen remodel kickoff"))
            .unwrap();
        assert!(kickoff.contains("[Appointment]"));
    }

    #[test]
    fn test_no_notifications() {
        let lines = format_notifications(&test_context(), NotificationTab::Leads, &[]);
        assert_eq!(lines[1], "  You're all caught up.");
    }
}

mod projects_screen_tests {
    use super::*;

    #[test]
    fn test_search_narrows_list() {
        let ctx = test_context();
        let section = FixtureSource::Bundled.dashboard().unwrap().projects_section;
        let mut view = ProjectsView::new(&section);
        view.set_search("brook");
        let lines = format_projects(&ctx, &section, &view);

        assert!(lines.iter().any(|l| l.contains("Kitchen Remodel")));
        assert!(!lines.iter().any(|l| l.contains("Roof Repair")));
        assert!(lines.iter().any(|l| l == "Status: All Status  Search: brook"));
    }

    #[test]
    fn test_amounts_are_whole_numbers() {
        let ctx = test_context();
        let mut section = FixtureSource::Bundled.dashboard().unwrap().projects_section;
        section.projects[0].estimate = 25_000.4;
        section.summaries[1].value = 23_400.6;
        let view = ProjectsView::new(&section);
        let lines = format_projects(&ctx, &section, &view);

        let kitchen = lines.iter().find(|l| l.contains("$25,000")).unwrap();
        assert!(!kitchen.contains("$25,000.4"));
        assert!(lines.iter().any(|l| l.contains("Average Budget: 23,401 USD")));
    }

    #[test]
    fn test_no_match_message() {
        let ctx = test_context();
        let section = FixtureSource::Bundled.dashboard().unwrap().projects_section;
        let mut view = ProjectsView::new(&section);
        view.select_status(&section, "Closed").unwrap();
        view.set_search("kitchen");
        let lines = format_projects(&ctx, &section, &view);

        assert!(lines.iter().any(|l| l == "No projects match the current filters."));
    }

    #[test]
    fn test_best_matches_tab() {
        let ctx = test_context();
        let section = FixtureSource::Bundled.dashboard().unwrap().projects_section;
        let mut view = ProjectsView::new(&section);
        view.select_tab(&section, "best-matches").unwrap();
        let lines = format_projects(&ctx, &section, &view);

        assert!(lines.iter().any(|l| l.contains("[Best Matches]")));
        assert!(lines.iter().any(|l| l.contains("Attic Conversion")));
        assert!(lines.iter().any(|l| l.contains("Bidding Closed") || l.contains("Open for Bids")));
        assert!(!lines.iter().any(|l| l.contains("Brownstone Stoop Restoration")));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "Full gut renovation of a 1920s brownstone kitchen, including new plumbing";
        for line in wrap_text(text, 20) {
            assert!(line.width() <= 20, "{line:?}");
        }
        assert!(wrap_text("", 20).is_empty());
    }
}

mod bids_screen_tests {
    use super::*;

    #[test]
    fn test_table_lists_rows() {
        let ctx = test_context();
        let table = FixtureSource::Bundled.bids().unwrap();
        let lines = format_bids_table(&ctx, &table, &table.bids);

        assert_eq!(lines[0], "My Bids");
        assert!(lines.iter().any(|l| l.starts_with("Project")));
        let roof = lines.iter().find(|l| l.contains("Roof Repair")).unwrap();
        assert!(roof.contains("$7,200"));
        assert!(roof.contains("Under Review"));
        assert!(roof.contains("—"));
    }

    #[test]
    fn test_edit_shows_in_table() {
        let ctx = test_context();
        let table = FixtureSource::Bundled.bids().unwrap();
        let mut bids = BidsView::new(&table);

        let mut form = bids.edit("bid-1002").unwrap();
        form.bid_amount = "7500".to_string();
        form.last_update = "2025-03-01".to_string();
        let details = format_bid_details(&ctx, bids.submit(&form).unwrap());
        assert!(details[1].contains("$7,500"));
        assert!(details[1].contains("Mar 01, 2025"));

        let lines = format_bids_table(&ctx, &table, bids.rows());
        let roof = lines.iter().find(|l| l.contains("Roof Repair")).unwrap();
        assert!(roof.contains("$7,500"));
        // Fixture table itself is untouched
        assert_eq!(table.bids[1].bid_amount, 7200.0);
    }

    #[test]
    fn test_view_only_bid_rejects_edit() {
        let table = FixtureSource::Bundled.bids().unwrap();
        let mut bids = BidsView::new(&table);
        let err = bids.edit("bid-1003").unwrap_err();
        assert_eq!(err.to_string(), "Bid bid-1003 cannot be edited");
    }
}

mod inbox_screen_tests {
    use super::*;

    #[test]
    fn test_inbox_lists_contacts_and_conversation() {
        let ctx = test_context();
        let data = FixtureSource::Bundled.messages().unwrap();
        let lines = format_inbox(&ctx, &data);

        assert_eq!(lines[0], "Messages (2 unread)");
        assert!(lines[1].starts_with('•'));
        assert!(lines.iter().any(|l| l.starts_with("Conversation with Sarah Williams")));
        assert!(lines.iter().any(|l| l.contains(" You: ")));
    }
}
