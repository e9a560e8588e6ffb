//! Application state and event handling

use crate::config::SurveyConfig;
use crate::state::{
    Control, Form, FormEvent, FormField, FormValidator, ProgressAnimation, RuleTable, SubmitCallback,
    SurveyForm, UiArea,
};
use crate::ui::{active_slot, form_row_at, layout_slots, SlotKind};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Main application struct
pub struct App {
    /// Form, rules and submission callback
    pub validator: FormValidator,
    pub config: SurveyConfig,
    /// First form row shown in the viewport
    pub scroll_offset: u16,
    /// Animated progress fill
    pub progress_animation: ProgressAnimation,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    /// Terminal size (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app over the developer survey. `on_submit` receives the
    /// answers of every accepted submission.
    pub fn new(config: SurveyConfig, on_submit: SubmitCallback) -> Self {
        let mut form = SurveyForm::developer_survey();
        if !form.focus(config.initial_focus()) {
            tracing::warn!(field = config.initial_focus(), "unknown initial focus field");
        }
        let validator = FormValidator::new(form, RuleTable::developer_survey(), on_submit);
        let progress_animation = ProgressAnimation::new(validator.compute_progress());

        Self {
            validator,
            config,
            scroll_offset: 0,
            progress_animation,
            status_message: None,
            terminal_size: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Advance time-based state (progress fill)
    pub fn tick(&mut self) {
        self.progress_animation.update();
    }

    /// Whether a frame-rate redraw is needed
    pub fn is_animating(&self) -> bool {
        self.progress_animation.is_animating()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The success notice is modal
        if self.validator.form().notice().is_some() {
            return self.handle_notice_key(key);
        }

        self.status_message = None;

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit();
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::Enter => self.handle_enter(),
            KeyCode::Up => self.handle_vertical(-1),
            KeyCode::Down => self.handle_vertical(1),
            KeyCode::Left => self.handle_horizontal(-1),
            KeyCode::Right => self.handle_horizontal(1),
            KeyCode::Backspace => {
                let changed = self
                    .validator
                    .form_mut()
                    .get_active_field_mut()
                    .is_some_and(|f| f.pop_char());
                if changed {
                    self.emit_for_active(FormEvent::Input);
                }
            }
            KeyCode::Char(' ') if self.active_is_choice_group() => self.activate_option(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let changed = self
                    .validator
                    .form_mut()
                    .get_active_field_mut()
                    .is_some_and(|f| f.push_char(c));
                if changed {
                    self.emit_for_active(FormEvent::Input);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_notice_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.dispatch(FormEvent::DismissNotice),
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                match self.copy_answers() {
                    Ok(()) => self.status_message = Some("Answers copied!".to_string()),
                    Err(err) => {
                        tracing::warn!("clipboard unavailable: {err:#}");
                        self.status_message = Some("Clipboard unavailable".to_string());
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.validator.form().notice().is_some() {
                    self.dispatch(FormEvent::DismissNotice);
                    return Ok(());
                }
                let Some(row) = form_row_at(mouse.row, self.scroll_offset) else {
                    return Ok(());
                };
                let slots = layout_slots(self.validator.form(), self.show_counter());
                let Some(slot) = slots.iter().find(|s| s.contains(row)).copied() else {
                    return Ok(());
                };
                match slot.kind {
                    SlotKind::Legend(section) => {
                        self.blur_active();
                        self.validator.form_mut().focus_section(section);
                        // Blur may have added an error row above the legend
                        let slots = layout_slots(self.validator.form(), self.show_counter());
                        if let Some(legend) =
                            slots.iter().find(|s| s.kind == SlotKind::Legend(section))
                        {
                            self.scroll_offset = legend.y.min(self.max_scroll());
                        }
                    }
                    SlotKind::Field(index) => {
                        if index != self.validator.form().active_field_index {
                            self.blur_active();
                            self.validator.form_mut().set_active_field(index);
                            self.ensure_focus_visible();
                        }
                    }
                    SlotKind::Submit => self.submit(),
                }
            }
            MouseEventKind::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(2);
            }
            MouseEventKind::ScrollDown => {
                self.scroll_offset = (self.scroll_offset + 2).min(self.max_scroll());
            }
            _ => {}
        }
        Ok(())
    }

    /// Tab/Shift+Tab: leave the current field (blur) and focus the next
    fn move_focus(&mut self, forward: bool) {
        self.blur_active();
        let form = self.validator.form_mut();
        if forward {
            form.next_field();
        } else {
            form.prev_field();
        }
        self.ensure_focus_visible();
    }

    fn handle_enter(&mut self) {
        if self.validator.form().is_submit_active() {
            self.submit();
        } else if self.active_is_choice_group() {
            self.activate_option();
        } else if self.active_field().is_some_and(FormField::is_multiline) {
            if let Some(field) = self.validator.form_mut().get_active_field_mut() {
                field.push_char('\n');
            }
            self.emit_for_active(FormEvent::Input);
        } else if self.active_field().is_some_and(FormField::accepts_text) {
            // Enter in a single-line input submits the form
            self.submit();
        }
    }

    fn active_field(&self) -> Option<&FormField> {
        let form = self.validator.form();
        form.get_field(form.active_field_index)
    }

    /// Up/Down move between options inside a group, otherwise between fields
    fn handle_vertical(&mut self, delta: isize) {
        if self.active_is_choice_group() {
            if let Some(field) = self.validator.form_mut().get_active_field_mut() {
                field.move_cursor(delta);
            }
        } else {
            self.move_focus(delta > 0);
        }
    }

    /// Left/Right cycle a select's options
    fn handle_horizontal(&mut self, delta: isize) {
        let changed = self
            .validator
            .form_mut()
            .get_active_field_mut()
            .is_some_and(|f| matches!(f.control, Control::Select { .. }) && f.move_cursor(delta));
        if changed {
            self.emit_for_active(FormEvent::Change);
        }
    }

    fn activate_option(&mut self) {
        let changed = self
            .validator
            .form_mut()
            .get_active_field_mut()
            .is_some_and(|f| f.activate_cursor());
        if changed {
            self.emit_for_active(FormEvent::Change);
        }
    }

    fn active_is_choice_group(&self) -> bool {
        matches!(
            self.active_field().map(|f| &f.control),
            Some(Control::CheckboxGroup { .. } | Control::RadioGroup { .. })
        )
    }

    fn submit(&mut self) {
        self.dispatch(FormEvent::Submit);
        if self.validator.form().notice().is_none() {
            // Bring the first annotated field into view
            let first_error = self
                .validator
                .form()
                .error_ids()
                .first()
                .map(|id| id.to_string());
            if let Some(id) = first_error {
                self.validator.form_mut().focus(&id);
                self.ensure_focus_visible();
            }
        }
    }

    fn blur_active(&mut self) {
        self.emit_for_active(FormEvent::Blur);
    }

    /// Dispatch an event naming the focused field, if a field has focus
    fn emit_for_active(&mut self, event: fn(String) -> FormEvent) {
        if let Some(id) = self.validator.form().active_id().map(str::to_string) {
            self.dispatch(event(id));
        }
    }

    fn dispatch(&mut self, event: FormEvent) {
        self.validator.handle_event(event);
        self.progress_animation
            .retarget(self.validator.progress().percentage());
    }

    fn show_counter(&self) -> bool {
        self.config.show_character_counter()
    }

    fn viewport_height(&self) -> u16 {
        let height = self.terminal_size.map(|(h, _)| h).unwrap_or(24);
        UiArea::form_viewport_height(height)
    }

    fn max_scroll(&self) -> u16 {
        let slots = layout_slots(self.validator.form(), self.show_counter());
        let content = slots.last().map(|s| s.y + s.height).unwrap_or(0);
        content.saturating_sub(self.viewport_height())
    }

    /// Scroll so the focused element is fully visible
    pub fn ensure_focus_visible(&mut self) {
        let slots = layout_slots(self.validator.form(), self.show_counter());
        let Some(slot) = active_slot(&slots, self.validator.form()) else {
            return;
        };
        let viewport = self.viewport_height();
        if slot.y < self.scroll_offset {
            // Keep the section legend in view when it sits right above
            self.scroll_offset = slot.y.saturating_sub(1);
        } else if slot.y + slot.height > self.scroll_offset + viewport {
            self.scroll_offset = (slot.y + slot.height).saturating_sub(viewport);
        }
    }

    fn copy_answers(&self) -> Result<()> {
        let Some(notice) = self.validator.form().notice() else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&notice.answers)?;
        self.copy_to_clipboard(&json)
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormSnapshot, SnapshotValue};
    use std::sync::{Arc, Mutex};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn click(row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn test_app() -> (App, Arc<Mutex<Vec<FormSnapshot>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&sent);
        let mut app = App::new(
            SurveyConfig::default(),
            Box::new(move |snapshot| sink.lock().unwrap().push(snapshot)),
        );
        app.terminal_size = Some((24, 80));
        (app, sent)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn fill_required(app: &mut App) {
        type_text(app, "Ada");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(app, "ada@example.com");
        app.handle_key(key(KeyCode::Tab)).unwrap(); // number
        app.handle_key(key(KeyCode::Tab)).unwrap(); // dropdown
        app.handle_key(key(KeyCode::Right)).unwrap(); // Student
        app.handle_key(key(KeyCode::Right)).unwrap(); // Engineer
    }

    mod startup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_focuses_name_by_default() {
            let (app, _) = test_app();
            assert_eq!(app.validator.form().active_id(), Some("name"));
            assert!(!app.should_quit());
        }

        #[test]
        fn test_configured_initial_focus() {
            let config = SurveyConfig {
                initial_focus: Some("email".to_string()),
                ..Default::default()
            };
            let app = App::new(config, Box::new(|_| {}));
            assert_eq!(app.validator.form().active_id(), Some("email"));
        }

        #[test]
        fn test_unknown_initial_focus_keeps_first_field() {
            let config = SurveyConfig {
                initial_focus: Some("missing".to_string()),
                ..Default::default()
            };
            let app = App::new(config, Box::new(|_| {}));
            assert_eq!(app.validator.form().active_id(), Some("name"));
        }
    }

    mod typing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_characters_go_to_focused_field() {
            let (mut app, _) = test_app();
            type_text(&mut app, "Ada");
            assert_eq!(app.validator.form().value("name"), "Ada");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.validator.form().value("name"), "Ad");
        }

        #[test]
        fn test_typing_updates_progress() {
            let (mut app, _) = test_app();
            type_text(&mut app, "A");
            assert_eq!(app.validator.progress().completed, 1);
        }

        #[test]
        fn test_control_chars_are_not_typed() {
            let (mut app, _) = test_app();
            app.handle_key(ctrl('a')).unwrap();
            assert_eq!(app.validator.form().value("name"), "");
        }

        #[test]
        fn test_enter_in_comments_adds_newline() {
            let (mut app, _) = test_app();
            app.validator.form_mut().focus("comments");
            type_text(&mut app, "hi");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_text(&mut app, "there");
            assert_eq!(app.validator.form().value("comments"), "hi\nthere");
            assert_eq!(
                app.validator.form().character_count("comments"),
                "8 characters"
            );
        }
    }

    mod blur {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_tab_out_of_empty_name_annotates() {
            let (mut app, _) = test_app();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(
                app.validator.form().error("name"),
                Some("Full Name is required")
            );
            assert_eq!(app.validator.form().active_id(), Some("email"));
        }

        #[test]
        fn test_tab_out_of_bad_email_annotates() {
            let (mut app, _) = test_app();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "nope");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(
                app.validator.form().error("email"),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_leading_minus_shows_no_error_until_digits() {
            let (mut app, _) = test_app();
            app.validator.form_mut().focus("number");
            type_text(&mut app, "-");
            assert_eq!(app.validator.form().error("number"), None);
            type_text(&mut app, "1");
            assert_eq!(
                app.validator.form().error("number"),
                Some("Years of experience must be between 0 and 50")
            );
        }

        #[test]
        fn test_number_validates_while_typing() {
            let (mut app, _) = test_app();
            app.validator.form_mut().focus("number");
            type_text(&mut app, "51");
            assert!(app.validator.form().error("number").is_some());
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.validator.form().error("number"), None);
        }
    }

    mod choices {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_space_toggles_checkbox() {
            let (mut app, _) = test_app();
            app.validator.form_mut().focus("languages");
            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert_eq!(
                app.validator
                    .form()
                    .field("languages")
                    .map(|f| f.submitted_values()),
                Some(vec!["go"])
            );
            assert_eq!(app.validator.progress().completed, 1);
        }

        #[test]
        fn test_enter_selects_radio() {
            let (mut app, _) = test_app();
            app.validator.form_mut().focus("recommend");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.validator.form().value("recommend"), "definitely");
        }

        #[test]
        fn test_up_down_outside_groups_move_focus() {
            let (mut app, _) = test_app();
            app.handle_key(key(KeyCode::Down)).unwrap();
            assert_eq!(app.validator.form().active_id(), Some("email"));
            app.handle_key(key(KeyCode::Up)).unwrap();
            assert_eq!(app.validator.form().active_id(), Some("name"));
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_ctrl_s_submits_valid_form() {
            let (mut app, sent) = test_app();
            fill_required(&mut app);
            app.handle_key(ctrl('s')).unwrap();

            assert!(app.validator.form().notice().is_some());
            let sent = sent.lock().unwrap();
            assert_eq!(sent.len(), 1);
            assert_eq!(
                sent[0].get("dropdown"),
                Some(&SnapshotValue::from("Engineer"))
            );
            assert_eq!(sent[0].get("name"), Some(&SnapshotValue::from("Ada")));
        }

        #[test]
        fn test_invalid_submit_focuses_first_error() {
            let (mut app, sent) = test_app();
            app.validator.form_mut().focus("comments");
            app.handle_key(ctrl('s')).unwrap();

            assert!(app.validator.form().notice().is_none());
            assert!(sent.lock().unwrap().is_empty());
            assert_eq!(app.validator.form().active_id(), Some("name"));
            assert_eq!(
                app.validator.form().error_ids(),
                vec!["name", "email", "dropdown"]
            );
        }

        #[test]
        fn test_enter_in_text_field_submits() {
            let (mut app, sent) = test_app();
            fill_required(&mut app);
            app.validator.form_mut().focus("name");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(sent.lock().unwrap().len(), 1);
        }

        #[test]
        fn test_notice_is_modal_and_dismissable() {
            let (mut app, _) = test_app();
            fill_required(&mut app);
            app.handle_key(ctrl('s')).unwrap();

            type_text(&mut app, "zzz");
            assert_eq!(app.validator.form().value("dropdown"), "Engineer");

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(app.validator.form().notice().is_none());
        }

        #[test]
        fn test_resubmitting_keeps_single_notice() {
            let (mut app, sent) = test_app();
            fill_required(&mut app);
            app.handle_key(ctrl('s')).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(ctrl('s')).unwrap();
            assert!(app.validator.form().notice().is_some());
            assert_eq!(sent.lock().unwrap().len(), 2);
        }
    }

    mod mouse {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_click_legend_focuses_section() {
            let (mut app, _) = test_app();
            let slots = layout_slots(app.validator.form(), true);
            let legend = slots
                .iter()
                .find(|s| s.kind == SlotKind::Legend(1))
                .copied()
                .unwrap();
            app.scroll_offset = legend.y;
            app.handle_mouse(click(UiArea::FormContent.start_y())).unwrap();

            assert_eq!(app.validator.form().active_id(), Some("dropdown"));
            // Leaving the empty name field blurs it
            assert!(app.validator.form().error("name").is_some());
            assert_eq!(app.scroll_offset, (legend.y + 1).min(app.max_scroll()));
        }

        #[test]
        fn test_click_field_focuses_it() {
            let (mut app, _) = test_app();
            let slots = layout_slots(app.validator.form(), true);
            let email = slots
                .iter()
                .find(|s| s.kind == SlotKind::Field(1))
                .copied()
                .unwrap();
            app.handle_mouse(click(UiArea::FormContent.start_y() + email.y))
                .unwrap();
            assert_eq!(app.validator.form().active_id(), Some("email"));
        }

        #[test]
        fn test_click_in_header_is_ignored() {
            let (mut app, _) = test_app();
            app.handle_mouse(click(0)).unwrap();
            assert_eq!(app.validator.form().active_id(), Some("name"));
        }

        #[test]
        fn test_scroll_is_bounded() {
            let (mut app, _) = test_app();
            let scroll_up = MouseEvent {
                kind: MouseEventKind::ScrollUp,
                column: 0,
                row: 5,
                modifiers: KeyModifiers::NONE,
            };
            app.handle_mouse(scroll_up).unwrap();
            assert_eq!(app.scroll_offset, 0);

            let scroll_down = MouseEvent {
                kind: MouseEventKind::ScrollDown,
                ..scroll_up
            };
            for _ in 0..100 {
                app.handle_mouse(scroll_down).unwrap();
            }
            assert_eq!(app.scroll_offset, app.max_scroll());
        }
    }

    #[test]
    fn test_focus_on_submit_scrolls_into_view() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::BackTab)).unwrap();
        assert!(app.validator.form().is_submit_active());
        let slots = layout_slots(app.validator.form(), true);
        let submit = active_slot(&slots, app.validator.form()).unwrap();
        assert!(submit.y + submit.height <= app.scroll_offset + app.viewport_height());
    }
}
