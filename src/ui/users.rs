use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table};

use crate::app::{AppState, FormField, UserForm};

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let start = (app.selected_user_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.users.len());
    let slice = &app.users[start.min(end)..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.selected_user_index {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let login = if u.login.is_empty() { "(empty)".to_string() } else { u.login.clone() };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(login),
            Cell::from(u.user_type.label()),
            Cell::from(u.tags_text()),
        ])
        .style(style)
    });

    let widths = [Constraint::Length(14), Constraint::Percentage(35), Constraint::Length(6), Constraint::Percentage(45)];
    let header = Row::new(vec!["ID", "LOGIN", "TYPE", "TAGS"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = if app.users.len() == app.store.users().len() {
        "Users".to_string()
    } else {
        format!("Users ({} of {})", app.users.len(), app.store.users().len())
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.selected_user() {
        Some(u) => format!(
            "ID: {}\nLogin: {}\nPassword: {}\nType: {}\nTags: {}",
            u.id,
            u.login,
            "*".repeat(u.password.chars().count()),
            u.user_type.label(),
            u.tags.len(),
        ),
        None => "No user selected. Press n to add one.".to_string(),
    };
    let p = Paragraph::new(text).style(Style::default().fg(app.theme.text)).block(
        Block::default().title("Details").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

pub fn render_user_tags(f: &mut Frame, area: Rect, app: &AppState) {
    let items: Vec<ListItem> = app
        .selected_user()
        .map(|u| u.tags.iter().map(|t| ListItem::new(format!("• {}", t.text))).collect())
        .unwrap_or_default();
    let list = List::new(items)
        .style(Style::default().fg(app.theme.text))
        .block(Block::default().title("Tags").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(list, area);
}

pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, form: &UserForm) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let rect = crate::ui::components::centered_rect(width, 11, area);

    let mut lines = Vec::with_capacity(FormField::ALL.len() + 2);
    for field in FormField::ALL {
        let marker = if field == form.field { "▶" } else { " " };
        let cursor = if field == form.field { "_" } else { "" };
        let line = match field {
            FormField::Login => format!("{marker} {:<9} {}{cursor}", field.label(), form.login),
            FormField::Password => {
                let shown = if form.reveal_password { form.password.clone() } else { "*".repeat(form.password.chars().count()) };
                format!("{marker} {:<9} {shown}{cursor}", field.label())
            }
            FormField::UserType => format!("{marker} {:<9} < {} >", field.label(), form.user_type.label()),
            FormField::Tags => format!("{marker} {:<9} {}{cursor}", field.label(), form.tags),
            FormField::Save => format!("{marker} [Save]"),
        };
        lines.push(line);
    }
    lines.push(String::new());
    lines.push("Tab/↑↓: field  ←→: type  ;: tag separator  Ctrl+R: show password  Esc: cancel".to_string());

    let p = Paragraph::new(lines.join("\n"))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .title(format!("Edit user {}", form.id))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, selected: usize, id: i64) {
    let rect = crate::ui::components::centered_rect(50, 7, area);
    let login = app.store.get(id).map(|u| u.login.clone()).unwrap_or_default();
    let yes = if selected == 0 { "[Yes]" } else { " Yes " };
    let no = if selected == 1 { "[No]" } else { " No " };
    let body = format!("Delete user '{login}' (id {id})?\n\n  {yes}    {no}");
    let p = Paragraph::new(body).block(
        Block::default().title("Confirm delete").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
