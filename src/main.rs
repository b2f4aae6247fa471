//! Dashboard CLI application.
//!
//! # Usage
//! ```ignore
//! bidboard                         // Dashboard summary
//! bidboard calendar 2 2024         // February 2024
//! bidboard projects -q brook       // Search projects
//! bidboard bids --view bid-1001    // Bid details
//! bidboard schedule --grid          // Appointments on a month grid
//! ```

use bidboard::args::{Args, Command, resolve_month_spec};
use bidboard::bids::BidsView;
use bidboard::calendar::{build_grid_on, schedule_events, schedule_month, sort_schedule};
use bidboard::error::Result;
use bidboard::fixtures::FixtureSource;
use bidboard::formatter::{
    format_bid_details, format_bids_table, format_calendar, format_inbox, format_notifications,
    format_projects, format_schedule, format_summary, print_lines,
};
use bidboard::inbox::NotificationsView;
use bidboard::projects::ProjectsView;
use bidboard::session::{EnvSession, SessionProvider, guard};
use bidboard::summary::default_timeframe;
use bidboard::types::AppContext;
use log::debug;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("bidboard: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let ctx = AppContext::new(args, EnvSession::default().current_session())?;
    let command = args.command();
    guard(command.screen(), &ctx.session)?;

    let fixtures = FixtureSource::from_dir(args.data_dir.clone());
    debug!("running {:?} with {}", command, fixtures);

    let lines = match command {
        Command::Summary { timeframe } => {
            let dashboard = fixtures.dashboard()?;
            let timeframe =
                timeframe.unwrap_or_else(|| default_timeframe(&dashboard.timeframes).to_string());
            format_summary(&ctx, &dashboard, &timeframe)
        }
        Command::Calendar {
            month_arg,
            year_arg,
            highlight,
            shift,
        } => {
            let calendar = fixtures.calendar()?;
            let spec = resolve_month_spec(
                month_arg.as_deref(),
                year_arg.as_deref(),
                highlight.as_deref(),
                shift,
                calendar.month_spec()?,
            )?;
            let cells = build_grid_on(&spec, &calendar.events, ctx.today);
            format_calendar(
                &ctx,
                &calendar.title,
                &calendar.synced_providers,
                &spec,
                &cells,
            )
        }
        Command::Projects {
            tab,
            status,
            search,
        } => {
            let section = fixtures.dashboard()?.projects_section;
            let mut view = ProjectsView::new(&section);
            if let Some(tab) = tab {
                view.select_tab(&section, &tab)?;
            }
            if let Some(status) = status {
                view.select_status(&section, &status)?;
            }
            if let Some(search) = search {
                view.set_search(search);
            }
            format_projects(&ctx, &section, &view)
        }
        Command::Bids {
            view,
            edit,
            amount,
            status,
            submitted,
            last_update,
            notes,
        } => {
            let table = fixtures.bids()?;
            let mut bids = BidsView::new(&table);
            let mut details = Vec::new();

            if let Some(id) = view {
                details = format_bid_details(&ctx, bids.view(&id)?);
            }
            if let Some(id) = edit {
                let mut form = bids.edit(&id)?;
                if let Some(amount) = amount {
                    form.bid_amount = amount;
                }
                if let Some(status) = status {
                    form.status = status;
                }
                if let Some(submitted) = submitted {
                    form.submitted_on = submitted;
                }
                if let Some(last_update) = last_update {
                    form.last_update = last_update;
                }
                if let Some(notes) = notes {
                    form.notes = notes;
                }
                details = format_bid_details(&ctx, bids.submit(&form)?);
            }

            let mut lines = format_bids_table(&ctx, &table, bids.rows());
            if !details.is_empty() {
                lines.push(String::new());
                lines.extend(details);
            }
            lines
        }
        Command::Messages => format_inbox(&ctx, &fixtures.messages()?),
        Command::Notifications { category } => {
            let dashboard = fixtures.dashboard()?;
            let view = NotificationsView { tab: category };
            format_notifications(&ctx, view.tab, &view.visible(&dashboard.notifications))
        }
        Command::Schedule { grid: false, .. } => {
            let dashboard = fixtures.dashboard()?;
            format_schedule(&ctx, &sort_schedule(&dashboard.schedule))
        }
        Command::Schedule { grid: true, shift } => {
            let dashboard = fixtures.dashboard()?;
            let events = schedule_events(&dashboard.schedule);
            let spec = schedule_month(&events, ctx.today)?.shift(shift.unwrap_or(0))?;
            let cells = build_grid_on(&spec, &events, ctx.today);
            format_calendar(&ctx, "Schedule", &[], &spec, &cells)
        }
    };

    print_lines(&lines);
    Ok(())
}
