//! Survey form rendering: sections, fields and the submit button

use super::field_renderer::{draw_field, field_height, FieldView};
use crate::app::App;
use crate::state::{SurveyForm, UiArea};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Field id that carries the character counter
pub const COUNTER_FIELD: &str = "comments";

/// What occupies a run of rows in the form body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Section legend (index into sections)
    Legend(usize),
    /// Field (index into fields)
    Field(usize),
    Submit,
}

/// Vertical placement of one element, in unscrolled form rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub kind: SlotKind,
    pub y: u16,
    pub height: u16,
}

impl Slot {
    pub fn contains(&self, row: u16) -> bool {
        row >= self.y && row < self.y + self.height
    }
}

/// Lay out legends, fields and the submit button top to bottom.
/// Sections are separated by one blank row.
pub fn layout_slots(form: &SurveyForm, show_counter: bool) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut y = 0u16;
    for (section_index, section) in form.sections().iter().enumerate() {
        slots.push(Slot {
            kind: SlotKind::Legend(section_index),
            y,
            height: 1,
        });
        y += 1;
        for id in &section.field_ids {
            let Some(index) = form.index_of(id) else {
                continue;
            };
            let field = &form.fields()[index];
            let height = field_height(field, show_counter && field.id == COUNTER_FIELD);
            slots.push(Slot {
                kind: SlotKind::Field(index),
                y,
                height,
            });
            y += height;
        }
        y += 1;
    }
    slots.push(Slot {
        kind: SlotKind::Submit,
        y,
        height: BUTTON_HEIGHT,
    });
    slots
}

/// Slot holding the focused element
pub fn active_slot(slots: &[Slot], form: &SurveyForm) -> Option<Slot> {
    let wanted = if form.is_submit_active() {
        SlotKind::Submit
    } else {
        SlotKind::Field(form.active_field_index)
    };
    slots.iter().copied().find(|s| s.kind == wanted)
}

/// Draw the scrolled form body
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.validator.form();
    let rules = app.validator.rules();
    let show_counter = app.config.show_character_counter();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let viewport = inner.height;
    let scroll = app.scroll_offset;
    let counter = form.character_count(COUNTER_FIELD);

    for slot in layout_slots(form, show_counter) {
        // Only fully visible elements are drawn
        if slot.y < scroll || slot.y + slot.height > scroll + viewport {
            continue;
        }
        let slot_area = Rect {
            x: inner.x + 1,
            y: inner.y + (slot.y - scroll),
            width: inner.width.saturating_sub(2),
            height: slot.height,
        };

        match slot.kind {
            SlotKind::Legend(index) => {
                let legend = &form.sections()[index].legend;
                let line = Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Magenta)),
                    Span::styled(
                        legend.clone(),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]);
                frame.render_widget(Paragraph::new(line), slot_area);
            }
            SlotKind::Field(index) => {
                let field = &form.fields()[index];
                let view = FieldView {
                    is_active: form.active_field_index == index,
                    required: rules.get(&field.id).is_some_and(|r| r.required),
                    counter: (show_counter && field.id == COUNTER_FIELD)
                        .then_some(counter.as_str()),
                };
                draw_field(frame, slot_area, field, view);
            }
            SlotKind::Submit => {
                let button_area = Rect {
                    width: slot_area.width.min(24),
                    ..slot_area
                };
                render_button(
                    frame,
                    button_area,
                    "Submit Survey",
                    form.is_submit_active(),
                    Some(Color::Green),
                );
            }
        }
    }
}

/// Row of the form body under an absolute mouse row
pub fn form_row_at(mouse_row: u16, scroll: u16) -> Option<u16> {
    if !UiArea::FormContent.contains_row(mouse_row) {
        return None;
    }
    Some(UiArea::FormContent.relative_row(mouse_row) + scroll)
}
