mod api;
mod app;
mod cli;
mod config;
mod event;
mod input;
mod logging;
mod model;
mod ui;

use std::io;
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use api::HttpClient;
use app::{Action, App};
use cli::Command;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = Command::parse(&args);
    if !command.needs_setup() {
        cli::print_help();
        if let Command::Unknown(other) = &command {
            anyhow::bail!("unknown command: {other}");
        }
        return Ok(());
    }

    // Load config
    let config = config::load_config()?;
    logging::init(&config.log_path())?;

    match command {
        Command::Patients => return cli::handle_patients(&config).await,
        Command::Add(rest) => return cli::handle_add(&config, &rest).await,
        _ => {}
    }

    let base_url = config.base_url();
    tracing::info!(%base_url, "starting medchat");
    let api = Arc::new(HttpClient::new(base_url, &config.proxy_origin));

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(api, config.upsert_mode, action_tx.clone());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Without enhancement flags Shift+Enter arrives as a bare Enter
    let enhanced_keys = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced_keys {
        let _ = execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        );
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before printing a panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if enhanced_keys {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    tokio::spawn(event::run_event_loop(action_tx.clone()));

    // Initial fetch
    app.update(Action::LoadPatients);

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        match action_rx.recv().await {
            Some(action) => {
                app.update(action);
                if app.should_quit {
                    break;
                }
            }
            None => break,
        }
    }

    if enhanced_keys {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    tracing::info!("medchat exited");
    Ok(())
}
