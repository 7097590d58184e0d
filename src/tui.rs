use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::state::*;
use crate::timer::TimerEvent;

/// Runs the terminal front end until the learner quits and hands the
/// final state back for reporting.
pub fn run_tui(mut state: AppState) -> io::Result<AppState> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| state)
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| crate::ui::draw(f, state))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state);
                }
            }
        }

        // Collected first: a reset replaces the receiver.
        let events: Vec<TimerEvent> = state
            .timer_rx
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default();
        for ev in events {
            handle_timer(ev, state);
        }
    }

    Ok(())
}

pub fn handle_timer(ev: TimerEvent, state: &mut AppState) {
    if state.is_finished() {
        return;
    }
    match ev {
        TimerEvent::Tick(secs) => state.remaining_seconds = Some(secs),
        TimerEvent::Warning => state.push_dialog(Dialog::TimeWarning),
        TimerEvent::Expired => state.expire(),
    }
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) {
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('q') => state.push_dialog(Dialog::ConfirmQuit),
            KeyCode::Char('s') if state.screen == Screen::Quiz => {
                state.push_dialog(Dialog::ConfirmSubmit)
            }
            KeyCode::Char('r') if state.screen != Screen::Lesson => {
                state.push_dialog(Dialog::ConfirmReset)
            }
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Char('?') {
        state.push_dialog(Dialog::Help);
        return;
    }

    match state.screen {
        Screen::Lesson => handle_lesson_key(key, state),
        Screen::Quiz => handle_quiz_key(key, state),
        Screen::Result => handle_result_key(key, state),
    }
}

fn handle_lesson_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Tab => state.focus_check(state.check_cursor + 1),
        KeyCode::Up | KeyCode::BackTab => {
            if state.check_cursor > 0 {
                state.focus_check(state.check_cursor - 1);
            }
        }
        KeyCode::PageDown => state.scroll_lesson(10),
        KeyCode::PageUp => state.scroll_lesson(-10),
        KeyCode::Home => state.scroll_lesson(-(state.lesson_scroll as isize)),
        KeyCode::Enter => {
            if !state.quiz.is_empty() {
                state.start_quiz();
            }
        }
        KeyCode::Char(c) => {
            if let Some(idx) = letter_index(c) {
                if idx < state.current_option_count() {
                    state.choice_cursor = idx;
                    state.choose(idx);
                }
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Left => state.navigate_prev(),
        KeyCode::Right => state.navigate_next(),
        KeyCode::Up => state.move_cursor(-1),
        KeyCode::Down => state.move_cursor(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let cursor = state.choice_cursor;
            state.choose(cursor);
        }
        KeyCode::Tab => {
            state.active_panel = match state.active_panel {
                ActivePanel::Sidebar => ActivePanel::Main,
                ActivePanel::Main => ActivePanel::Sidebar,
            };
        }
        KeyCode::Esc => {
            if state.has_lesson() {
                state.screen = Screen::Lesson;
            }
        }
        KeyCode::Char(c) => {
            if let Some(idx) = letter_index(c) {
                if idx < state.current_option_count() {
                    state.choose(idx);
                }
            }
        }
        _ => handle_page_keys(key, state),
    }
}

fn handle_result_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Left | KeyCode::Up => state.navigate_prev(),
        KeyCode::Right | KeyCode::Down => state.navigate_next(),
        KeyCode::Esc => {
            if state.has_lesson() {
                state.screen = Screen::Lesson;
            }
        }
        KeyCode::Enter | KeyCode::Char('q') => state.should_quit = true,
        _ => handle_page_keys(key, state),
    }
}

fn handle_page_keys(key: KeyEvent, state: &mut AppState) {
    let total = state.quiz.len();
    match key.code {
        KeyCode::PageUp => {
            let new_idx = state.current_question.saturating_sub(5);
            state.navigate_to(new_idx);
        }
        KeyCode::PageDown => {
            let new_idx = (state.current_question + 5).min(total.saturating_sub(1));
            state.navigate_to(new_idx);
        }
        KeyCode::Home => state.navigate_to(0),
        KeyCode::End => {
            if total > 0 {
                state.navigate_to(total - 1);
            }
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
        Some(Dialog::Incomplete(missing)) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                state.pop_dialog();
                if let Some(&first) = missing.first() {
                    state.navigate_to(first);
                }
            }
        }
        Some(Dialog::ConfirmReset) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.reset_quiz();
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.should_quit = true;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::TimeWarning) | Some(Dialog::Help) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('?')) {
                state.pop_dialog();
            }
        }
        None => {}
    }
}

fn letter_index(c: char) -> Option<usize> {
    c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize)
}
