use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use study_companion::app::App;
use study_companion::config::{AppConfig, Cli};
use study_companion::{headless, logging, ui};
use study_companion_sdk::StudyClient;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;

    match cli.command.clone() {
        Some(command) => {
            logging::init_stderr_logging()?;
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            let client = StudyClient::http(&config.backend_url, config.request_timeout)?;
            runtime.block_on(headless::run(command, client))?;
            Ok(())
        }
        None => run_tui(config),
    }
}

fn run_tui(config: AppConfig) -> Result<()> {
    logging::init_file_logging(&config.log_file)?;
    tracing::info!(backend = %config.backend_url, "starting terminal UI");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let client = StudyClient::http(&config.backend_url, config.request_timeout)?;
    let mut app = App::new(config.backend_url.clone(), client, runtime.handle().clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Drop workflows (and their previews) before the runtime goes away
    drop(app);
    runtime.shutdown_timeout(Duration::from_secs(1));

    if let Err(err) = res {
        tracing::error!(error = ?err, "terminal UI exited with error");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
