//! Color theme for the form, loadable from `theme.conf`.
use ratatui::style::Color;
use std::fmt::Write as _;
use std::path::Path;

use super::config;

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub saved_fg: Color,
    pub saved_bg: Color,
}

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            saved_fg: Color::Black,
            saved_bg: Color::Green,
        }
    }

    /// Catppuccin Mocha, the default.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            saved_fg: Color::Rgb(0x1e, 0x1e, 0x2e), // base
            saved_bg: Color::Rgb(0xa6, 0xe3, 0xa1), // green
        }
    }

    fn slots(&mut self) -> [(&'static str, &mut Color); 12] {
        [
            ("text", &mut self.text),
            ("muted", &mut self.muted),
            ("title", &mut self.title),
            ("border", &mut self.border),
            ("header_bg", &mut self.header_bg),
            ("header_fg", &mut self.header_fg),
            ("status_bg", &mut self.status_bg),
            ("status_fg", &mut self.status_fg),
            ("highlight_fg", &mut self.highlight_fg),
            ("highlight_bg", &mut self.highlight_bg),
            ("saved_fg", &mut self.saved_fg),
            ("saved_bg", &mut self.saved_bg),
        ]
    }

    /// Parse theme text. Unknown keys and bad colors keep the `mocha` value.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for (key, val) in config::parse_kv(contents) {
            let Some(color) = parse_color(val) else { continue };
            if let Some((_, slot)) = theme.slots().into_iter().find(|(k, _)| *k == key) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn render_config(&self) -> String {
        let mut copy = *self;
        let mut buf = String::new();
        buf.push_str("# usrform-manager theme\n");
        buf.push_str("# Colors: #RRGGBB, RRGGBB or 'reset'\n\n");
        for (key, color) in copy.slots() {
            let _ = writeln!(&mut buf, "{key} = {}", color_to_str(*color));
        }
        buf
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        config::write_config(path, &self.render_config())
    }

    /// Load `path`, writing the default theme there first if it is missing.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let theme = Self::mocha();
        if let Err(e) = theme.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    let (r, g, b) = match c {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Reset => return "reset".to_string(),
        // Approximations for named colors
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0xFF, 0x00, 0x00),
        Color::Green => (0x00, 0xFF, 0x00),
        Color::Yellow => (0xFF, 0xFF, 0x00),
        Color::Blue => (0x00, 0x00, 0xFF),
        Color::Magenta => (0xFF, 0x00, 0xFF),
        Color::Cyan => (0x00, 0xFF, 0xFF),
        Color::Gray => (0xB3, 0xB3, 0xB3),
        Color::DarkGray => (0x4D, 0x4D, 0x4D),
        Color::LightRed => (0xFF, 0x66, 0x66),
        Color::LightGreen => (0x66, 0xFF, 0x66),
        Color::LightYellow => (0xFF, 0xFF, 0x66),
        Color::LightBlue => (0x66, 0x66, 0xFF),
        Color::LightMagenta => (0xFF, 0x66, 0xFF),
        Color::LightCyan => (0x66, 0xFF, 0xFF),
        Color::White => (0xFF, 0xFF, 0xFF),
        Color::Indexed(_) => return "reset".to_string(),
    };
    format!("#{r:02X}{g:02X}{b:02X}")
}
