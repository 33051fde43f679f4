use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use opcli::api::HttpControlPlane;
use opcli::cli::Args;
use opcli::commands;
use opcli::config::Config;
use opcli::error::{OpcliError, Result};
use opcli::event::EventHandler;
use opcli::ops::{Operations, PollSettings};
use opcli::ui::TerminalFrontend;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<u8> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Set up logging only if a log file is configured
    if let Some(log_path) = args.log_file.as_ref().or(config.general.log_file.as_ref()) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting opcli");
        }
    }

    let api_url = args.api_url.clone().unwrap_or_else(|| config.api.url.clone());
    let api = HttpControlPlane::new(api_url)?;
    let ops = Operations::new(Arc::new(api), PollSettings::from(&config.poll));

    // Ids given as flags are looked up before the terminal is taken over
    let plan = commands::resolve(args.resource, &ops).await?;

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let terminal = setup_terminal()?;
    let mut frontend = TerminalFrontend::new(terminal);
    let mut events = EventHandler::new(config.ui.tick_rate());

    let result = commands::run(plan, &ops, &mut events, &mut frontend).await;

    restore_terminal()?;

    let report = result?;
    if !report.transcript.is_empty() {
        println!("{}", report.transcript);
    }
    info!("Exiting with code {}", report.exit_code());

    // Blocking work such as archive packing would hold up runtime shutdown
    if report.interrupted {
        std::process::exit(i32::from(report.exit_code()));
    }
    Ok(report.exit_code())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| OpcliError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| OpcliError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| OpcliError::Terminal(e.to_string()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| OpcliError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen, crossterm::cursor::Show)
        .map_err(|e| OpcliError::Terminal(e.to_string()))?;
    Ok(())
}
