use anyhow::Result;
use crossterm::{
    event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::{io, time::Duration};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

mod app;
mod config;
mod constants;
mod error;
mod form;
mod logging;
mod notification;
mod transactions;
mod ui;
mod utils;
mod wallet;

#[cfg(test)]
mod testing;

use app::{Activity, App};
use config::MinterConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = MinterConfig::load()?;
    logging::init(&config.log_path)?;
    info!(network = config.network_state.get_current_network(), "starting loyalty minter");

    // connect before taking over the terminal so errors stay readable
    let app = App::new(config).await?;
    let notifications = app.notifications.clone();
    let app = Arc::new(Mutex::new(app));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app).await;

    notifications.close();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("terminal loop failed: {:?}", err);
        println!("{:?}", err);
    }

    Ok(())
}

enum KeyAction {
    Quit,
    Start(Activity),
    Handled,
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
) -> Result<()> {
    let mut running: Option<JoinHandle<()>> = None;
    let result = event_loop(terminal, &app, &mut running).await;

    // an activity still in flight on quit is dropped along with its result
    if let Some(task) = running.take() {
        task.abort();
        let _ = task.await;
    }
    result
}

async fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &Arc<Mutex<App>>,
    running: &mut Option<JoinHandle<()>>,
) -> Result<()> {
    loop {
        // a running activity holds the lock; keep the last frame until it finishes
        if let Ok(mut app_guard) = app.try_lock() {
            terminal.draw(|f| ui::draw(f, &mut app_guard))?;
        }

        if !crossterm_event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = crossterm_event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let Ok(mut app_guard) = app.try_lock() else {
            if is_quit(&key) {
                return Ok(());
            }
            continue;
        };

        match handle_key(&mut app_guard, key) {
            KeyAction::Quit => return Ok(()),
            KeyAction::Start(activity) => {
                app_guard.activity = Some(activity);
                terminal.draw(|f| ui::draw(f, &mut app_guard))?;
                drop(app_guard);
                *running = Some(App::spawn_activity(Arc::clone(app), activity));
            }
            KeyAction::Handled => {}
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if is_quit(&key) {
        return KeyAction::Quit;
    }
    if app.is_busy() {
        return KeyAction::Handled;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('e') => KeyAction::Start(Activity::Estimating),
            KeyCode::Char('r') => KeyAction::Start(Activity::Refreshing),
            KeyCode::Char('n') => KeyAction::Start(Activity::SwitchingNetwork),
            _ => KeyAction::Handled,
        };
    }

    match key.code {
        KeyCode::Esc => app.notifications.dismiss(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_previous(),
        KeyCode::Down => app.next_item(),
        KeyCode::Up => app.previous_item(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => return KeyAction::Start(Activity::Minting),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
    KeyAction::Handled
}
