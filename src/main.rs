use soq::api::StackExchangeClient;
use soq::app::App;
use soq::ui::run_app;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::{error::Error, io, path::PathBuf, sync::Mutex, time::Duration};
use tui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

/// Browse a Stack Overflow user's questions from the terminal.
#[derive(Parser)]
#[command(name = "soq", version)]
struct Cli {
    /// User ID to fetch immediately; otherwise the app starts at the input
    /// prompt
    user_id: Option<String>,

    /// Stack Exchange site to query
    #[arg(long, default_value = "stackoverflow")]
    site: String,

    /// Append diagnostic logs to this file (the terminal itself is taken
    /// over by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let client = StackExchangeClient::new(&cli.site);
    let mut app = App::new(client);
    if let Some(user_id) = cli.user_id {
        app.input = user_id;
        app.submit_fetch();
    }

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(200);
    let res = run_app(&mut terminal, app, tick_rate);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}
