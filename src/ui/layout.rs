//! Layout components (header, status bar)

use super::components::render_progress;
use crate::app::App;
use crate::state::{Control, HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, form body and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),     // Title + progress
            Constraint::Min(0),                    // Form
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the title and, if enabled, the progress bar
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = Paragraph::new(Line::from(Span::styled(
        app.validator.form().title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(
        title,
        Rect {
            height: area.height.min(1),
            ..area
        },
    );

    if app.config.show_progress() && area.height > 1 {
        let progress_area = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: area.height - 1,
        };
        render_progress(
            frame,
            progress_area,
            app.validator.progress(),
            app.progress_animation.displayed,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    let hints = get_focus_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    let error_count = app.validator.form().error_ids().len();
    if error_count > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!(
                "{error_count} field{} need attention",
                if error_count == 1 { "" } else { "s" }
            ),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused element
fn get_focus_hints(app: &App) -> String {
    let form = app.validator.form();
    let submit = crate::platform::SUBMIT_SHORTCUT;

    if form.notice().is_some() {
        return format!("Enter:close  {}:copy answers", crate::platform::COPY_SHORTCUT);
    }
    if form.is_submit_active() {
        return "Enter:submit  Tab:next  Shift+Tab:prev".to_string();
    }

    let control = form
        .fields()
        .get(form.active_field_index)
        .map(|f| &f.control);
    match control {
        Some(Control::Select { .. }) => format!("←/→:choose  Tab:next  {submit}:submit"),
        Some(Control::CheckboxGroup { .. }) => {
            format!("↑/↓:move  Space:toggle  Tab:next  {submit}:submit")
        }
        Some(Control::RadioGroup { .. }) => {
            format!("↑/↓:move  Space:select  Tab:next  {submit}:submit")
        }
        Some(Control::TextArea { .. }) => format!("Enter:newline  Tab:next  {submit}:submit"),
        _ => format!("Tab:next  Enter/{submit}:submit"),
    }
}
