//! Colour constants and styling for shell output.

use crossterm::style::{Color, Stylize};

/// Confirmations.
pub const SUCCESS: Color = Color::Green;
/// Error and cancellation messages.
pub const ERROR: Color = Color::Red;
/// Section titles and the menu banner.
pub const HEADING: Color = Color::Cyan;
/// Filled cells of a progress bar.
pub const BAR: Color = Color::Yellow;

/// Applies colours when enabled, otherwise passes text through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.enabled {
            text.with(HEADING).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, SUCCESS)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, ERROR)
    }
}
