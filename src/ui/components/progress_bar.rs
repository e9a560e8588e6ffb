//! Completion progress bar

use crate::state::ProgressState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Draw the fill (row 0 of `area`) and the "N% Complete" text (row 1).
/// `displayed` is the animated fill in percent; the text always shows the
/// settled value.
pub fn render_progress(frame: &mut Frame, area: Rect, progress: ProgressState, displayed: f32) {
    if area.height == 0 {
        return;
    }
    let bar_area = Rect { height: 1, ..area };
    let ratio = f64::from((displayed / 100.0).clamp(0.0, 1.0));
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::DarkGray))
            .ratio(ratio)
            .label(""),
        bar_area,
    );

    if area.height > 1 {
        let text_area = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(progress.label())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            text_area,
        );
    }
}
