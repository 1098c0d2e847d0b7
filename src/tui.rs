use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::state::*;
use crate::timer::Ticker;

const TICK_INTERVAL: Duration = Duration::from_millis(1000);

pub fn run_tui(mut state: AppState) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let result = main_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> Result<(), String> {
    let mut ticker: Option<Ticker> = None;

    loop {
        terminal
            .draw(|f| {
                let sidebar = crate::ui::layout::compute_layout(f.area()).sidebar;
                // title row
                state.follow_sidebar(sidebar.height.saturating_sub(1) as usize);
                crate::ui::draw(f, state)
            })
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state)?;
                }
            }
        }

        // The ticker lives exactly as long as the working screen.
        let working = state.screen == Screen::Working;
        if working && ticker.is_none() {
            ticker = Some(Ticker::spawn(TICK_INTERVAL));
        } else if !working {
            if let Some(t) = ticker.take() {
                t.stop();
            }
        }

        if let Some(t) = &ticker {
            for _ in 0..t.drain() {
                if state.screen != Screen::Working {
                    break;
                }
                state.on_beat();
            }
        }
    }

    Ok(())
}

fn handle_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return Ok(());
    }

    match state.screen {
        Screen::Preamble => handle_preamble_key(key, state),
        Screen::Working => {
            handle_working_key(key, state);
            Ok(())
        }
        Screen::Result | Screen::Cancelled => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                state.should_quit = true;
            }
            Ok(())
        }
    }
}

fn handle_preamble_key(key: KeyEvent, state: &mut AppState) -> Result<(), String> {
    match key.code {
        KeyCode::Enter => {
            state.begin()?;
            info!(quiz_id = %state.quiz.id, "quiz opened");
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
        }
        KeyCode::Esc => {
            state.should_quit = true;
        }
        _ => {}
    }
    Ok(())
}

fn handle_working_key(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        match key.code {
            KeyCode::Char('s') => state.push_dialog(Dialog::ConfirmSubmit),
            KeyCode::Char('q') => state.push_dialog(Dialog::ConfirmCancel),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Right | KeyCode::PageDown => state.navigate_next(),
        KeyCode::Left | KeyCode::PageUp => state.navigate_prev(),
        KeyCode::Home => state.navigate_to(0),
        KeyCode::End => state.navigate_to(usize::MAX),
        KeyCode::Up => state.move_cursor(-1),
        KeyCode::Down => state.move_cursor(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let idx = state.choice_cursor;
            state.select_choice(idx);
        }
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char(c) if c.is_ascii_lowercase() => {
            let idx = (c as u8 - b'a') as usize;
            state.select_choice(idx);
        }
        _ => {}
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    let dialog = state.top_dialog().cloned();
    match dialog {
        Some(Dialog::ConfirmSubmit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.submit();
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::ConfirmCancel) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.cancel();
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::LowTime) => match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
}
