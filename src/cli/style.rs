//! Terminal styling helpers
//!
//! Colors are applied only when stdout supports them; `anstream` strips
//! anything left over when output is piped.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Arrow between source and destination branch
pub const ARROW: &str = "→";

/// Semantic text styles
pub trait Stylize {
    /// De-emphasized detail text
    fn muted(&self) -> String;
    /// Bold, for names the user should notice
    fn emphasis(&self) -> String;
    /// Highlight for identifiers such as PR numbers
    fn accent(&self) -> String;
    /// Success color
    fn success(&self) -> String;
    /// Error color
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed()).to_string()
    }

    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan()).to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    }

    fn error(&self) -> String {
        self.if_supports_color(Stream::Stderr, |t| t.red()).to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled arrow
pub fn arrow() -> String {
    ARROW.muted()
}

/// Spinner used while waiting on the API
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
}

/// Render `url` as a clickable link labelled `text` where the terminal
/// supports it, otherwise as the label followed by the URL.
pub fn hyperlink(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        format!("{text} <{url}>")
    }
}
