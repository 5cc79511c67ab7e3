use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::IntoDiagnostic;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use mx_error_guide::cli::{print_guide, print_record, render_search, Cli, Mode};
use mx_error_guide::config::AppConfig;
use mx_error_guide::core::catalog::Catalog;
use mx_error_guide::core::logging;
use mx_error_guide::core::progress::ProgressStore;
use mx_error_guide::core::search::{NucleoMatcher, SearchPipeline};
use mx_error_guide::tui::app::AppState;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if let Some(path) = &cli.data {
        config.data.catalog_path = Some(path.clone());
    }
    let data_dir = config.data_dir();

    match cli.mode() {
        Mode::Tui { deep_link } => {
            let _log_guard = logging::init_tui(&data_dir);
            log::info!("{} v{} starting", mx_error_guide::NAME, mx_error_guide::VERSION);
            run_tui(&config, &data_dir, deep_link)
                .await
                .into_diagnostic()?;
        }
        Mode::Print(code) => {
            let _log_guard = logging::init_cli(&data_dir);
            let catalog = Catalog::load(&config.catalog_source()).await?;
            let text = print_record(&catalog, &code)?;
            print!("{text}");
        }
        Mode::Search { query, filters } => {
            let _log_guard = logging::init_cli(&data_dir);
            let catalog = Catalog::load(&config.catalog_source()).await?;
            let pipeline =
                SearchPipeline::new(NucleoMatcher::with_threshold(config.search.fuzzy_threshold));
            print!("{}", render_search(&catalog, &pipeline, &query, &filters));
        }
        Mode::Guide(topic) => {
            let _log_guard = logging::init_cli(&data_dir);
            let catalog = Catalog::load(&config.catalog_source()).await?;
            let text = print_guide(&catalog, topic.as_deref())?;
            print!("{text}");
        }
    }

    Ok(())
}

async fn run_tui(config: &AppConfig, data_dir: &Path, deep_link: Option<String>) -> io::Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let progress = ProgressStore::in_data_dir(data_dir);
    let mut app = AppState::new(
        event_rx,
        event_tx,
        config.search.clone(),
        progress,
        deep_link,
    );
    app.load_catalog(config.catalog_source());

    // Setup terminal
    let mouse = config.tui.mouse_enabled;
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, config.tick_rate()).await;

    // Restore terminal
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("TUI exited with error: {e}");
    }
    result
}
