//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

pub use forms::{active_slot, form_row_at, layout_slots, SlotKind};

use crate::app::App;
use ratatui::Frame;

/// Main draw function. Everything is derived from current state, so
/// drawing twice produces the same screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, form_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);
    forms::draw(frame, form_area, app);
    layout::draw_status_bar(frame, status_area, app);

    if app.validator.form().notice().is_some() {
        components::render_success_dialog(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurveyConfig;
    use crate::state::FormEvent;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

    fn test_app(config: SurveyConfig) -> App {
        App::new(config, Box::new(|_| {}))
    }

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    /// (column, row) of the first occurrence of `needle`
    fn position_of(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        rows(buffer).iter().enumerate().find_map(|(y, row)| {
            row.find(needle)
                .map(|byte| (row[..byte].chars().count() as u16, y as u16))
        })
    }

    fn fill_required(app: &mut App) {
        let form = app.validator.form_mut();
        form.set_value("name", "Ada");
        form.set_value("email", "ada@example.com");
        form.field_mut("dropdown").unwrap().choose("Engineer");
        app.validator
            .handle_event(FormEvent::Change("dropdown".to_string()));
    }

    #[test]
    fn test_annotated_field_shows_error_line_and_red_border() {
        let mut app = test_app(SurveyConfig::default());
        assert!(!app.validator.validate_all());
        let buffer = render(&app, 80, 50);

        let (x, y) = position_of(&buffer, "Full Name is required").unwrap();
        assert_eq!(buffer[(x, y)].fg, Color::Red);
        // Bottom-left corner of the name box sits right above the message
        let corner = &buffer[(x - 1, y - 1)];
        assert_eq!(corner.symbol(), "└");
        assert_eq!(corner.fg, Color::Red);
        assert!(position_of(&buffer, "Current Role is required").is_some());
    }

    #[test]
    fn test_valid_field_has_no_error_line() {
        let app = test_app(SurveyConfig::default());
        let buffer = render(&app, 80, 50);
        assert!(position_of(&buffer, "is required").is_none());
    }

    #[test]
    fn test_progress_label_follows_required_fields() {
        let mut app = test_app(SurveyConfig::default());
        assert!(position_of(&render(&app, 80, 24), "0% Complete").is_some());

        fill_required(&mut app);
        assert!(position_of(&render(&app, 80, 24), "60% Complete").is_some());
    }

    #[test]
    fn test_progress_hidden_by_config() {
        let app = test_app(SurveyConfig {
            show_progress: Some(false),
            ..Default::default()
        });
        assert!(position_of(&render(&app, 80, 24), "% Complete").is_none());
    }

    #[test]
    fn test_character_counter_line() {
        let mut app = test_app(SurveyConfig::default());
        assert!(position_of(&render(&app, 80, 50), "0 characters").is_some());

        app.validator.form_mut().set_value("comments", "a");
        assert!(position_of(&render(&app, 80, 50), "1 character").is_some());

        let hidden = test_app(SurveyConfig {
            show_character_counter: Some(false),
            ..Default::default()
        });
        assert!(position_of(&render(&hidden, 80, 50), "characters").is_none());
    }

    #[test]
    fn test_success_notice_after_submit() {
        let mut app = test_app(SurveyConfig::default());
        fill_required(&mut app);
        app.validator.handle_event(FormEvent::Submit);

        let buffer = render(&app, 80, 24);
        assert!(position_of(&buffer, "Survey Submitted Successfully!").is_some());
        assert!(position_of(&buffer, "Thank you").is_some());

        app.validator.handle_event(FormEvent::DismissNotice);
        let buffer = render(&app, 80, 24);
        assert!(position_of(&buffer, "Survey Submitted Successfully!").is_none());
    }

    #[test]
    fn test_success_notice_on_small_terminals() {
        let mut app = test_app(SurveyConfig::default());
        fill_required(&mut app);
        app.validator.handle_event(FormEvent::Submit);

        for (width, height) in [(40, 30), (80, 8), (5, 3)] {
            render(&app, width, height);
        }
        let buffer = render(&app, 40, 30);
        assert!(position_of(&buffer, "Survey Submitted Successfully!").is_some());
    }

    #[test]
    fn test_drawing_twice_is_identical() {
        let mut app = test_app(SurveyConfig::default());
        app.validator.validate_all();
        assert_eq!(render(&app, 80, 40), render(&app, 80, 40));
    }
}
