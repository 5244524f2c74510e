use crate::components::appointments::{Appointments, AppointmentsHandle, Sidebar, TokenStore};
use crate::components::calendar::{CalendarView, ViewKind};
use crate::components::invited::{Event, EventDraft, EventStore, InvitedSession};
use crate::components::ComponentManager;
use crate::config::Config;
use crate::error::{appointments_error, AppResult, Error};
use crate::utils::time::today_in;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rust_i18n::t;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// What the terminal front end was asked to show
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Invite code of an appointment to open the day list for
    pub invite: Option<String>,
    pub view: ViewKind,
    /// Calendar cursor, today when unset
    pub date: Option<NaiveDate>,
    /// Token to persist before any request is made
    pub save_token: Option<String>,
    /// JSON file with the events handed to the calendar and the day list
    pub events: Option<PathBuf>,
}

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Read an event payload: a JSON array of events, ids optional
pub fn load_payload(path: &Path) -> AppResult<Vec<EventDraft>> {
    let content = fs::read_to_string(path)?;
    let drafts: Vec<EventDraft> = serde_json::from_str(&content)?;
    info!("Loaded {} events from {}", drafts.len(), path.display());
    Ok(drafts)
}

/// Start the components, render the requested pages and shut down again
pub async fn run(config: Arc<RwLock<Config>>, options: RunOptions) -> miette::Result<()> {
    let (tz, max_per_day, token_path) = {
        let config_read = config.read().await;
        crate::utils::i18n::set_locale(&config_read.locale);
        info!("Setting locale to {}", config_read.locale);
        (
            config_read.tz()?,
            config_read.max_events_per_day,
            config_read.token_path.clone(),
        )
    };

    if let Some(token) = &options.save_token {
        TokenStore::new(token_path).save(token)?;
    }

    let payload = match &options.events {
        Some(path) => load_payload(path)?,
        None => Vec::new(),
    };

    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(Appointments::new());
    component_manager.init_all().await?;

    let handle = match component_manager.get::<Appointments>() {
        Some(appointments) => appointments.get_handle().await,
        None => None,
    }
    .ok_or_else(|| appointments_error("Appointments component is not initialized"))?;

    let result = render(&handle, &options, payload, tz, max_per_day).await;

    component_manager.shutdown_all().await?;
    result.map_err(Into::into)
}

async fn render(
    handle: &AppointmentsHandle,
    options: &RunOptions,
    payload: Vec<EventDraft>,
    tz: Tz,
    max_per_day: usize,
) -> AppResult<()> {
    let mut sidebar = Sidebar::new();
    sidebar.apply(handle.load_sidebar().await);
    print_sidebar(&sidebar);

    let today = today_in(tz);
    let calendar_store = EventStore::from_payload(payload.clone(), Utc::now());
    let view = CalendarView::new(options.view, options.date.unwrap_or(today));
    print_calendar(&view, calendar_store.events(), today, max_per_day, tz);

    if let Some(code) = &options.invite {
        let appointment = handle.by_invite_code(code.as_str()).await?;
        let session = InvitedSession::for_appointment(&appointment, payload, tz, Utc::now())?;
        print_invited(&session);
    }

    Ok(())
}

fn print_sidebar(sidebar: &Sidebar) {
    println!("== {} ==", t!("sidebar_title"));
    if let Some(message) = sidebar.error() {
        println!("  {}", message);
    } else if sidebar.entries().is_empty() {
        println!("  {}", t!("sidebar_empty"));
    }
    for entry in sidebar.entries() {
        println!("  [{}] {} ({})", entry.class_name, entry.name, entry.invite_link);
    }
    println!();
}

fn print_calendar(
    view: &CalendarView,
    events: &[Event],
    today: NaiveDate,
    max_per_day: usize,
    tz: Tz,
) {
    let (month, year) = view.title();
    let kind = match view.kind() {
        ViewKind::Month => t!("calendar_view_month"),
        ViewKind::Week => t!("calendar_view_week"),
    };
    println!("== {} {} ({}) ==", year, month, kind);
    println!("  {}", view.weekday_headers().join(" | "));

    let cells = view.cells(events, today, max_per_day, tz);
    for week in cells.chunks(7) {
        let line: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = if cell.date == today { "*" } else { "" };
                let mut text = format!("{:>2}{}", cell.day_number, marker);
                if !cell.titles.is_empty() {
                    text.push(' ');
                    text.push_str(&cell.titles.join(", "));
                }
                text
            })
            .collect();
        println!("  {}", line.join(" | "));
    }
    println!();
}

fn print_invited(session: &InvitedSession) {
    println!("== {} ==", t!("invited_title", party = session.party_name()));
    println!("  {}", t!("invited_subtitle"));

    let rows = session.rows();
    if rows.is_empty() {
        println!("  {}", t!("no_dates"));
    }
    for row in rows {
        println!("  {}  {}", row.date.format("%m/%d"), row.label);
    }
}
