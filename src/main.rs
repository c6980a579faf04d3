use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use synergetics::core::config::{self, BrowserConfig, Overrides};
use synergetics::core::runtime::Browser;
use synergetics::store::SqliteCardStore;
use synergetics::tui;

#[derive(Parser)]
#[command(name = "synergetics", version, about = "Terminal browser for the Synergetics Dictionary")]
struct Args {
    /// Path to the card database (overrides SYNERGETICS_DB and the config file)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config is read before the logger exists; anything worth reporting is
    // logged once the logger is up
    let (file_config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => {
            eprintln!("Ignoring config file: {e}");
            (BrowserConfig::default(), Some(e))
        }
    };
    let resolved = config::resolve(&file_config, &Overrides::from_env(args.db));

    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Synergetics starting up with database {}",
        resolved.database_path.display()
    );
    if let Some(path) = config::config_path() {
        log::info!("Config file: {}", path.display());
    }
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Resolved config: {:?}", resolved);

    let store = SqliteCardStore::new(resolved.database_path.clone());
    let mut browser = Browser::new(store, resolved.page_size);
    if let Err(e) = browser.start() {
        log::error!("Startup failed: {}", e);
        eprintln!("Failed to load the card database: {e}");
        return ExitCode::FAILURE;
    }

    match tui::run(browser) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("Terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
