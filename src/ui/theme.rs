//! Light and dark palettes for Streamify
//!
//! The dark palette is the neon one; light mode is the default. Style helpers
//! read from whichever palette is active.

use ratatui::style::{Color, Modifier, Style};

/// Color palette plus style helpers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    /// Slightly offset background for panels, inputs and the status bar
    pub background_light: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub highlight: Color,
    pub text: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
}

impl Theme {
    /// Neon palette on a deep black-blue background
    pub const DARK: Theme = Theme {
        background: Color::Rgb(0x0a, 0x0a, 0x0f),
        background_light: Color::Rgb(0x14, 0x14, 0x1e),
        primary: Color::Rgb(0x00, 0xff, 0xf2),
        secondary: Color::Rgb(0xff, 0x00, 0xff),
        accent: Color::Rgb(0xff, 0xff, 0x00),
        highlight: Color::Rgb(0xff, 0x00, 0x80),
        text: Color::Rgb(0xe0, 0xe0, 0xe0),
        dim: Color::Rgb(0x80, 0x80, 0x90),
        success: Color::Rgb(0x00, 0xff, 0x00),
        warning: Color::Rgb(0xff, 0xaa, 0x00),
        error: Color::Rgb(0xff, 0x00, 0x40),
        border: Color::Rgb(0x00, 0x80, 0x78),
    };

    /// Light gray page with dark text
    pub const LIGHT: Theme = Theme {
        background: Color::Rgb(0xf3, 0xf4, 0xf6),
        background_light: Color::Rgb(0xff, 0xff, 0xff),
        primary: Color::Rgb(0x43, 0x38, 0xca),
        secondary: Color::Rgb(0x1e, 0x40, 0xaf),
        accent: Color::Rgb(0xb9, 0x1c, 0x1c),
        highlight: Color::Rgb(0xe5, 0x09, 0x14),
        text: Color::Rgb(0x11, 0x18, 0x27),
        dim: Color::Rgb(0x4b, 0x55, 0x63),
        success: Color::Rgb(0x15, 0x80, 0x3d),
        warning: Color::Rgb(0xa1, 0x62, 0x07),
        error: Color::Rgb(0xb9, 0x1c, 0x1c),
        border: Color::Rgb(0x9c, 0xa3, 0xaf),
    };

    /// Palette for the current dark-mode preference
    pub fn for_mode(dark_mode: bool) -> Theme {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Page background
    pub fn base(&self) -> Style {
        Style::default().bg(self.background)
    }

    /// Selected row: inverted on the primary color
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn input(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_light)
    }

    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.background_light)
    }

    pub fn loading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    /// Watch list marker
    pub fn saved(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    /// Rating color by value; unrated is dimmed
    pub fn rating(&self, rating: Option<f32>) -> Style {
        match rating {
            Some(r) if r >= 7.5 => self.success(),
            Some(r) if r >= 6.0 => self.warning(),
            _ => self.dimmed(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::LIGHT
    }
}
