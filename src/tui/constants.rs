//! TUI constants: colors and timing.

use ratatui::style::Color;

/// Accent green color (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent — soft cyan (#7EC8E3) that pairs well with the green.
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Warning notices (fetch failures).
pub(super) const WARNING: Color = Color::Rgb(255, 196, 94);

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Rows moved by PageUp/PageDown.
pub(crate) const PAGE_STEP: usize = 10;

/// Spinner frames for the loading indicator (braille pattern, 4 frames).
pub(super) const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸"];
