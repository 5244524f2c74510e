use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use yakssok::components::calendar::ViewKind;
use yakssok::startup::{self, RunOptions};

/// Terminal front end for the appointment calendar
#[derive(Parser, Debug)]
#[command(name = "yakssok", version, about)]
struct Cli {
    /// Open the day list of the appointment with this invite code
    #[arg(long)]
    invite: Option<String>,

    /// Calendar layout: month or week
    #[arg(long, default_value = "month")]
    view: ViewKind,

    /// Calendar cursor (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<chrono::NaiveDate>,

    /// Persist an access token before making requests
    #[arg(long)]
    save_token: Option<String>,

    /// JSON file with events to show
    #[arg(long)]
    events: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging()?;

    info!("Starting yakssok");

    // Load configuration
    let config = startup::load_config().await?;

    startup::run(
        config,
        RunOptions {
            invite: cli.invite,
            view: cli.view,
            date: cli.date,
            save_token: cli.save_token,
            events: cli.events,
        },
    )
    .await
}
