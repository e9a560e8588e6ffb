//! UI area positioning for mouse event handling
//!
//! Centralizes the vertical offsets of the screen regions so drawing and
//! hit testing agree.

/// Height of the header (title, progress bar, progress text)
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar at the bottom
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// UI area for calculating mouse Y offset
///
/// # Layout
///
/// ```text
/// Row 0-2:  Header (title + progress)
/// Row 3:    Form border
/// Row 4+:   Form content (scrolled)
/// Bottom:   Status bar (1 row)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiArea {
    /// Scrolled form body (starts after header + border)
    FormContent,
}

impl UiArea {
    /// Get the starting Y row for this UI area (absolute screen position)
    #[inline]
    pub const fn start_y(self) -> u16 {
        match self {
            UiArea::FormContent => HEADER_HEIGHT + 1, // +1 for border
        }
    }

    /// Convert absolute mouse row to row relative to this UI area
    #[inline]
    pub fn relative_row(self, mouse_row: u16) -> u16 {
        mouse_row.saturating_sub(self.start_y())
    }

    /// Check if a mouse row is within this UI area (at or after start)
    #[inline]
    pub fn contains_row(self, mouse_row: u16) -> bool {
        mouse_row >= self.start_y()
    }

    /// Rows available to the form body for a terminal height
    #[inline]
    pub fn form_viewport_height(terminal_height: u16) -> u16 {
        // header + top/bottom border + status bar
        terminal_height.saturating_sub(HEADER_HEIGHT + 2 + STATUS_BAR_HEIGHT)
    }
}
