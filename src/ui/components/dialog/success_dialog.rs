//! Success dialog shown after an accepted submission

use super::base::{render_dialog, DialogConfig};
use crate::state::SuccessNotice;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the submission confirmation centered on the screen
pub fn render_success_dialog(frame: &mut Frame) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled("Enter", key_style),
        Span::raw(": close  "),
        Span::styled(crate::platform::COPY_SHORTCUT, key_style),
        Span::raw(": copy answers"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            icon: Some("✓"),
            title: SuccessNotice::TITLE,
            title_color: Color::Green,
            border_color: Color::Green,
            message: SuccessNotice::MESSAGE,
            hint: Some(hint),
            ..Default::default()
        },
    );
}
