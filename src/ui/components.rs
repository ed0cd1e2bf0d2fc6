//! Shared UI components (status bar, keybindings panel, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode, ModalState};

/// Render the bottom status bar with mode, counts and the "Saved" acknowledgment.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "EDIT",
    };
    let status = Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg);
    let mut spans = vec![Span::styled(
        format!(
            "mode: {mode}  users:{}  shown:{}  rows/page:{}  ",
            app.store.users().len(),
            app.users.len(),
            app.rows_per_page
        ),
        status,
    )];
    if app.store.show_snackbar() {
        spans.push(Span::styled(
            " Saved ",
            Style::default()
                .fg(app.theme.saved_fg)
                .bg(app.theme.saved_bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let p = Paragraph::new(Line::from(spans)).style(status);
    f.render_widget(p, area);
}

fn action_label(action: KeyAction) -> Option<&'static str> {
    Some(match action {
        KeyAction::Quit => "Quit",
        KeyAction::OpenHelp => "Help",
        KeyAction::StartSearch => "Search",
        KeyAction::NewUser => "New user",
        KeyAction::EditSelection => "Edit user",
        KeyAction::DeleteSelection => "Delete user",
        KeyAction::ToggleKeybindsPane => "Toggle keybindings",
        KeyAction::MoveUp => "Move up",
        KeyAction::MoveDown => "Move down",
        KeyAction::PageUp => "Page up",
        KeyAction::PageDown => "Page down",
        KeyAction::Ignore => return None,
    })
}

/// Group the keymap into `(label, keys)` rows, sorted by label.
pub fn keybind_rows(keymap: &Keymap) -> Vec<(&'static str, String)> {
    let mut grouped: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in keymap.all_bindings() {
        if let Some(label) = action_label(action) {
            grouped.entry(label).or_default().insert(Keymap::format_key(mods, code));
        }
    }
    grouped
        .into_iter()
        .map(|(label, keys)| (label, keys.into_iter().collect::<Vec<_>>().join(", ")))
        .collect()
}

/// Render the right-side keybindings panel.
pub fn render_keybinds_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let rows = keybind_rows(&app.keymap);
    let label_w = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, keys)| {
            Line::from(vec![
                Span::raw(format!("  {label:>label_w$} │ ")),
                Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("In the form:", Style::default().add_modifier(Modifier::BOLD))));
    for (label, keys) in [
        ("Next / previous field", "Tab, Shift+Tab, Up, Down"),
        ("Toggle type", "Left, Right, Space"),
        ("Save", "Enter"),
        ("Cancel", "Esc"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("  {label} │ ")),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(block, area);
    f.render_widget(p, inner);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let min_w = 40u16.min(max_w);
        let approx_lines = (message.len() as u16 / (min_w.saturating_sub(4).max(10))).max(1);
        let max_h = area.height.saturating_sub(6).max(5);
        let height = (approx_lines + 4).min(max_h).max(5);
        let rect = centered_rect(min_w, height, area);
        let p = Paragraph::new(message.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Info")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Render the help modal.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(50);
    let height = 20u16.min(area.height.saturating_sub(4)).max(12);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Users", bold))];
    for (what, keys) in [
        ("Move: ", "Up/Down, j/k, PageUp/PageDown"),
        ("New user: ", "n (opens the form for the new entry)"),
        ("Edit selected: ", "Enter or e"),
        ("Delete selected: ", "Delete or d, then confirm"),
        ("Search: ", "/ then type; Enter applies, Esc clears"),
        ("Keybindings panel: ", "Shift+K"),
        ("Quit: ", "q"),
    ] {
        lines.push(Line::from(vec![Span::raw(what), Span::styled(keys, italic)]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Edit form", bold)));
    for (what, keys) in [
        ("Next / previous field: ", "Tab / Shift+Tab or Down / Up"),
        ("Switch LDAP / Local: ", "Left, Right or Space on Type"),
        ("Tags: ", "separate with ';'"),
        ("Show password: ", "Ctrl+R"),
        ("Save: ", "Enter"),
        ("Cancel: ", "Esc"),
    ] {
        lines.push(Line::from(vec![Span::raw(what), Span::styled(keys, italic)]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("Every change is written to the storage file immediately."));
    lines.push(Line::from(vec![Span::raw("Close help: "), Span::styled("Esc / Enter", italic)]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect { x: 0, y: 0, width: 20, height: 10 };
        let r = centered_rect(40, 4, area);
        assert_eq!((r.x, r.y, r.width, r.height), (0, 3, 20, 4));
    }

    #[test]
    fn keybind_rows_group_keys_per_action() {
        let rows = keybind_rows(&Keymap::default());
        let (_, delete_keys) = rows.iter().find(|(l, _)| *l == "Delete user").unwrap();
        assert_eq!(delete_keys, "Delete, d");
        assert!(rows.iter().all(|(l, _)| !l.is_empty()));
    }
}
