pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(root[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)].as_ref())
        .split(body[1]);

    let prompt = match app.input_mode {
        InputMode::Search => format!("  Search: {}_", app.search_query),
        InputMode::Normal | InputMode::Modal if !app.search_query.is_empty() => {
            format!("  filter: \"{}\"", app.search_query)
        }
        InputMode::Normal | InputMode::Modal => String::new(),
    };
    let p = Paragraph::new(format!(
        "users:{}{prompt}  n: new; Enter: edit; Delete: remove; /: search; ?: help; q: quit",
        app.store.users().len(),
    ))
    .block(
        Block::default()
            .title("usrform-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    users::render_users_table(f, body[0], app);
    users::render_user_details(f, right[0], app);
    if app.show_keybinds {
        components::render_keybinds_panel(f, right[1], app);
    } else {
        users::render_user_tags(f, right[1], app);
    }

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::UserForm(form)) => users::render_user_form(f, area, app, form),
        Some(ModalState::DeleteConfirm { selected, id }) => {
            users::render_delete_confirm(f, area, app, *selected, *id)
        }
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, area, app, *scroll),
        Some(state @ ModalState::Info { .. }) => components::render_info_modal(f, area, app, state),
        None => {}
    }
}
