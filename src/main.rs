use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use terminal_quiz::{
    bank_files, draw_menu, draw_quit_confirmation, draw_quiz, draw_summary, handle_quiz_input,
    load_bank, logger, AppState, Question, QuizSession, DEFAULT_ROUND_SIZE,
};

fn main() -> io::Result<()> {
    logger::init();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::Menu;
    let files = bank_files();
    let mut selected_file_index: usize = 0;
    let mut bank: Vec<Question> = Vec::new();
    let mut bank_name = String::new();
    let mut quiz_session: Option<QuizSession> = None;
    let mut status: Option<String> = None;

    loop {
        terminal.draw(|f| match app_state {
            AppState::Menu => draw_menu(f, &files, selected_file_index, status.as_deref()),
            AppState::Quiz => {
                if let Some(session) = &quiz_session {
                    draw_quiz(f, session);
                }
            }
            AppState::QuizQuitConfirm => draw_quit_confirmation(f),
            AppState::Summary => {
                if let Some(session) = &quiz_session {
                    draw_summary(f, session);
                }
            }
        })?;

        if let Event::Key(key) = event::read()? {
            match app_state {
                AppState::Menu => match key.code {
                    KeyCode::Up => {
                        if selected_file_index > 0 {
                            selected_file_index -= 1;
                        }
                    }
                    KeyCode::Down => {
                        if selected_file_index < files.len().saturating_sub(1) {
                            selected_file_index += 1;
                        }
                    }
                    KeyCode::Enter => {
                        if !files.is_empty() {
                            let path = &files[selected_file_index];
                            match load_bank(path) {
                                Ok(questions) => {
                                    bank = questions;
                                    bank_name = path
                                        .file_stem()
                                        .map(|s| s.to_string_lossy().to_string())
                                        .unwrap_or_default();
                                    // The engine refuses rounds larger than
                                    // the bank, so small banks are clamped
                                    // here, at the configuration boundary.
                                    let round_size = DEFAULT_ROUND_SIZE.min(bank.len());
                                    match QuizSession::new(&bank, round_size, &bank_name) {
                                        Ok(session) => {
                                            quiz_session = Some(session);
                                            status = None;
                                            app_state = AppState::Quiz;
                                        }
                                        Err(e) => {
                                            logger::log(&format!(
                                                "Failed to start round from '{}': {}",
                                                bank_name, e
                                            ));
                                            status = Some(e.to_string());
                                        }
                                    }
                                }
                                Err(e) => {
                                    logger::log(&format!(
                                        "Failed to load bank {}: {}",
                                        path.display(),
                                        e
                                    ));
                                    status = Some(e.to_string());
                                }
                            }
                        }
                    }
                    KeyCode::Char('q') => break,
                    _ => {}
                },
                AppState::Quiz => {
                    if let Some(session) = &mut quiz_session {
                        handle_quiz_input(session, key, &mut app_state);
                    }
                }
                AppState::QuizQuitConfirm => match key.code {
                    KeyCode::Char('y') => {
                        app_state = AppState::Menu;
                        quiz_session = None;
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        app_state = AppState::Quiz;
                    }
                    _ => {}
                },
                AppState::Summary => match key.code {
                    KeyCode::Char('r') => {
                        // New round: wholesale replacement with a fresh
                        // independent draw from the retained bank.
                        let round_size = DEFAULT_ROUND_SIZE.min(bank.len());
                        match QuizSession::new(&bank, round_size, &bank_name) {
                            Ok(session) => {
                                quiz_session = Some(session);
                                app_state = AppState::Quiz;
                            }
                            Err(e) => {
                                status = Some(e.to_string());
                                quiz_session = None;
                                app_state = AppState::Menu;
                            }
                        }
                    }
                    KeyCode::Char('m') => {
                        app_state = AppState::Menu;
                        quiz_session = None;
                    }
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {}
                },
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
