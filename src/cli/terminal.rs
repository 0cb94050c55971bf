//! Terminal capability detection and output helpers

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as a match (bold amber)
    fn matched(&self) -> String;
    /// Color as a heading (blue)
    fn heading(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn matched(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().bold().to_string()
        } else {
            format!("[{self}]")
        }
    }

    fn heading(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn matched(&self) -> String {
        self.as_str().matched()
    }

    fn heading(&self) -> String {
        self.as_str().heading()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}

/// A horizontal bar for `value` scaled against `max`.
///
/// The bar fills at most `width` cells; any non-zero value gets at least one.
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || value == 0 || width == 0 {
        return String::new();
    }
    let cells = (value * width).div_ceil(max).clamp(1, width);
    let bar = "█".repeat(cells);
    if supports_color() {
        bar.fg::<css::Green>().to_string()
    } else {
        bar
    }
}

/// The width available for bars after a label column.
pub fn bar_width(label_width: usize) -> usize {
    let total = usize::from(terminal_width().unwrap_or(80));
    total.saturating_sub(label_width + 12).clamp(10, 50)
}
