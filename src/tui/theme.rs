//! # Themes
//!
//! Presentation presets. A `Theme` is picked once from configuration and
//! passed by reference into every draw call; nothing reads it globally.

use log::warn;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ASCII_FRAMES: &[&str] = &["|", "/", "-", "\\"];
const MOON_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
    pub border: BorderType,
    pub prompt: &'static str,
    pub spinner_frames: &'static [&'static str],
}

impl Theme {
    pub const PRESETS: [&'static str; 3] = ["default", "mono", "neon"];

    /// Look up a preset by name. Unknown names fall back to the default.
    pub fn named(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "" => Self::default_theme(),
            "mono" => Self::mono(),
            "neon" => Self::neon(),
            other => {
                warn!(
                    "Unknown theme '{}', using default (known: {})",
                    other,
                    Self::PRESETS.join(", ")
                );
                Self::default_theme()
            }
        }
    }

    pub fn default_theme() -> Self {
        Self {
            name: "default",
            accent: Color::Cyan,
            text: Color::Green,
            muted: Color::DarkGray,
            error: Color::Red,
            border: BorderType::Rounded,
            prompt: "❯ ",
            spinner_frames: BRAILLE_FRAMES,
        }
    }

    /// No colors beyond the terminal's own; safe on any palette.
    pub fn mono() -> Self {
        Self {
            name: "mono",
            accent: Color::Reset,
            text: Color::Reset,
            muted: Color::Reset,
            error: Color::Reset,
            border: BorderType::Plain,
            prompt: "> ",
            spinner_frames: ASCII_FRAMES,
        }
    }

    pub fn neon() -> Self {
        Self {
            name: "neon",
            accent: Color::Magenta,
            text: Color::LightCyan,
            muted: Color::LightMagenta,
            error: Color::LightRed,
            border: BorderType::Double,
            prompt: "🐙 ",
            spinner_frames: MOON_FRAMES,
        }
    }

    /// Spinner frame for a tick count.
    pub fn spinner_frame(&self, tick: usize) -> &'static str {
        self.spinner_frames[tick % self.spinner_frames.len()]
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        if self.muted == Color::Reset {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_presets() {
        for name in Theme::PRESETS {
            assert_eq!(Theme::named(name).name, name);
        }
        assert_eq!(Theme::named("  NEON ").name, "neon");
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::named("solarized"), Theme::default());
    }

    #[test]
    fn test_spinner_frame_wraps() {
        let theme = Theme::mono();
        assert_eq!(theme.spinner_frame(0), "|");
        assert_eq!(theme.spinner_frame(4), "|");
        assert_eq!(theme.spinner_frame(5), "/");
    }

    #[test]
    fn test_presets_have_frames() {
        for name in Theme::PRESETS {
            assert!(!Theme::named(name).spinner_frames.is_empty());
        }
    }
}
