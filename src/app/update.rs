use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::{Duration, Instant};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, FormField, InputMode, ModalState, UserForm};
use crate::search::apply_search;
use crate::ui;

const NOTHING_SELECTED: &str = "No user selected. Press n to add one.";

/// Whether the event loop should keep running after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: AppState,
) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(&mut app, key)? == Flow::Quit
        {
            break;
        }
    }

    tracing::info!(uptime = ?app.started_at.elapsed(), "leaving event loop");
    Ok(())
}

/// Route one key press. Store write failures are returned to the caller.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<Flow> {
    match app.input_mode {
        InputMode::Normal => return handle_normal_key(app, key),
        InputMode::Modal => handle_modal_key(app, key)?,
        InputMode::Search => match key.code {
            KeyCode::Enter => {
                apply_search(app);
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                app.search_query.clear();
                apply_search(app);
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                app.search_query.pop();
            }
            KeyCode::Char(_)
                if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => app.search_query.push(c),
            _ => {}
        },
    }
    Ok(Flow::Continue)
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Result<Flow> {
    let Some(action) = app.keymap.resolve(&key) else {
        return Ok(Flow::Continue);
    };
    let rpp = app.rows_per_page.max(1);
    match action {
        KeyAction::Quit => return Ok(Flow::Quit),
        KeyAction::Ignore => {}
        KeyAction::OpenHelp => open_modal(app, ModalState::Help { scroll: 0 }),
        KeyAction::StartSearch => {
            app.search_query.clear();
            app.input_mode = InputMode::Search;
        }
        KeyAction::ToggleKeybindsPane => app.show_keybinds = !app.show_keybinds,
        KeyAction::NewUser => {
            let id = app.store.add_user().map_err(|e| anyhow!(e).context("adding user"))?;
            app.mark_saved();
            // A fresh record has no login, so drop any filter that would hide it
            app.search_query.clear();
            app.refresh_view();
            app.select_id(id);
            if let Some(rec) = app.store.get(id) {
                let form = UserForm::from_record(rec);
                open_modal(app, ModalState::UserForm(form));
            }
        }
        KeyAction::EditSelection | KeyAction::DeleteSelection => {
            let modal = match app.selected_user() {
                Some(rec) if action == KeyAction::EditSelection => {
                    ModalState::UserForm(UserForm::from_record(rec))
                }
                Some(rec) => ModalState::DeleteConfirm { selected: 1, id: rec.id },
                None => ModalState::Info { message: NOTHING_SELECTED.to_string() },
            };
            open_modal(app, modal);
        }
        KeyAction::MoveUp => {
            app.selected_user_index = app.selected_user_index.saturating_sub(1);
        }
        KeyAction::MoveDown => {
            if app.selected_user_index + 1 < app.users.len() {
                app.selected_user_index += 1;
            }
        }
        KeyAction::PageUp => {
            app.selected_user_index = app.selected_user_index.saturating_sub(rpp);
        }
        KeyAction::PageDown => {
            let new_idx = app.selected_user_index.saturating_add(rpp);
            app.selected_user_index = new_idx.min(app.users.len().saturating_sub(1));
        }
    }
    Ok(Flow::Continue)
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) -> Result<()> {
    let code = key.code;
    match &mut app.modal {
        Some(ModalState::UserForm(form)) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Enter => {
                if form.field == FormField::UserType {
                    form.field = form.field.next();
                } else {
                    let record = form.to_record();
                    app.store
                        .update_user(&record)
                        .map_err(|e| anyhow!(e).context(format!("saving user {}", record.id)))?;
                    app.mark_saved();
                    app.refresh_view();
                    app.select_id(record.id);
                    close_modal(app);
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if form.field == FormField::UserType =>
            {
                form.user_type = form.user_type.toggled();
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.reveal_password = !form.reveal_password;
            }
            KeyCode::Backspace => {
                if let Some(buf) = form.active_text_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = form.active_text_mut() {
                    buf.push(c);
                }
            }
            _ => {}
        },
        Some(ModalState::DeleteConfirm { selected, id }) => match code {
            KeyCode::Esc => close_modal(app),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                *selected = if *selected == 0 { 1 } else { 0 };
            }
            KeyCode::Enter => {
                if *selected == 0 {
                    let id = *id;
                    app.store
                        .delete_user(id)
                        .map_err(|e| anyhow!(e).context(format!("deleting user {id}")))?;
                    app.mark_saved();
                    app.refresh_view();
                }
                close_modal(app);
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                close_modal(app)
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        Some(ModalState::Info { .. }) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                close_modal(app);
            }
        }
        None => app.input_mode = InputMode::Normal,
    }
    Ok(())
}

fn open_modal(app: &mut AppState, modal: ModalState) {
    app.modal = Some(modal);
    app.input_mode = InputMode::Modal;
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
