//! Field rendering utilities for forms

use crate::state::{Control, FormField};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows of text shown inside a textarea
pub const TEXTAREA_ROWS: u16 = 4;

/// Per-field rendering options
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub is_active: bool,
    pub required: bool,
    /// Counter line under the field, if enabled for it
    pub counter: Option<&'a str>,
}

/// Rows a field occupies, including its error line and counter
pub fn field_height(field: &FormField, show_counter: bool) -> u16 {
    let body = match &field.control {
        Control::Text { .. } | Control::Select { .. } => 3,
        Control::TextArea { .. } => TEXTAREA_ROWS + 2 + u16::from(show_counter),
        Control::CheckboxGroup { options, .. } | Control::RadioGroup { options, .. } => {
            options.len() as u16 + 2
        }
    };
    body + u16::from(field.error.is_some())
}

/// Draw a form field with its inline error annotation
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, view: FieldView) {
    let has_error = field.error.is_some();
    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let error_rows = u16::from(has_error);
    let counter_rows = u16::from(view.counter.is_some());
    let box_area = Rect {
        height: area.height.saturating_sub(error_rows + counter_rows),
        ..area
    };

    let title = if view.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = match &field.control {
        Control::Text { .. } | Control::TextArea { .. } => text_lines(field, view.is_active),
        Control::Select { .. } => vec![select_line(field, view.is_active)],
        Control::CheckboxGroup {
            options,
            checked,
            cursor,
        } => options
            .iter()
            .zip(checked)
            .enumerate()
            .map(|(i, (option, on))| {
                let mark = if *on { "[x]" } else { "[ ]" };
                option_line(mark, &option.label, view.is_active && i == *cursor)
            })
            .collect(),
        Control::RadioGroup {
            options,
            selected,
            cursor,
        } => options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let mark = if *selected == Some(i) { "(•)" } else { "( )" };
                option_line(mark, &option.label, view.is_active && i == *cursor)
            })
            .collect(),
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        box_area,
    );

    let mut y = box_area.y + box_area.height;
    if let Some(counter) = view.counter {
        let counter_area = Rect {
            y,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(counter)
                .alignment(Alignment::Right)
                .style(Style::default().fg(Color::DarkGray)),
            counter_area,
        );
        y += 1;
    }

    if let Some(message) = &field.error {
        let error_area = Rect {
            y,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(format!(" {message}")).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }
}

fn text_lines(field: &FormField, is_active: bool) -> Vec<Line<'static>> {
    let cursor = Span::styled(if is_active { "▌" } else { "" }, Style::default().fg(Color::Cyan));
    let value = field.value();

    if value.is_empty() {
        let placeholder = Span::styled(
            field.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        );
        return if is_active {
            vec![Line::from(vec![cursor, placeholder])]
        } else {
            vec![Line::from(placeholder)]
        };
    }

    let mut lines: Vec<Line> = value.split('\n').map(|l| Line::from(l.to_string())).collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor);
    }
    lines
}

fn select_line(field: &FormField, is_active: bool) -> Line<'static> {
    let value_style = if field.value().is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(field.display_value(), value_style),
        Span::styled(" ▶", arrow_style),
    ])
}

fn option_line(mark: &str, label: &str, under_cursor: bool) -> Line<'static> {
    let style = if under_cursor {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let pointer = if under_cursor { "› " } else { "  " };
    Line::from(Span::styled(format!("{pointer}{mark} {label}"), style))
}
