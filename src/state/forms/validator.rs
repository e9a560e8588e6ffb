//! Form validator: rule checks, progress and submission
//!
//! The validator owns the injected form and rule table. Every event
//! handler runs to completion and leaves the form's annotations in a
//! state derived only from current values.

use super::form_state::SurveyForm;
use super::progress::ProgressState;
use super::rules::{RuleTable, Trigger, ValidationResult};
use super::snapshot::FormSnapshot;

/// Receives the snapshot of an accepted submission
pub type SubmitCallback = Box<dyn FnMut(FormSnapshot) + Send>;

/// Discrete user events the form reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Focus left a field
    Blur(String),
    /// A text field was edited
    Input(String),
    /// A choice control changed
    Change(String),
    Submit,
    DismissNotice,
}

pub struct FormValidator {
    form: SurveyForm,
    rules: RuleTable,
    on_submit: SubmitCallback,
    progress: ProgressState,
}

impl std::fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("form", &self.form)
            .field("rules", &self.rules)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl FormValidator {
    pub fn new(form: SurveyForm, rules: RuleTable, on_submit: SubmitCallback) -> Self {
        let mut validator = Self {
            form,
            rules,
            on_submit,
            progress: ProgressState::default(),
        };
        validator.progress = validator.progress_state();
        validator
    }

    pub fn form(&self) -> &SurveyForm {
        &self.form
    }

    /// Mutable access for input handling. Callers report edits through
    /// [`FormValidator::handle_event`].
    pub fn form_mut(&mut self) -> &mut SurveyForm {
        &mut self.form
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Progress as of the last change event
    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    /// Clear all annotations, check every ruled field and annotate failures
    pub fn validate_all(&mut self) -> bool {
        self.form.clear_errors();
        let results: Vec<ValidationResult> = self
            .rules
            .iter()
            .map(|rule| self.rules.check(&rule.field_id, self.form.value(&rule.field_id)))
            .collect();

        let mut valid = true;
        for result in &results {
            if !result.is_valid() {
                valid = false;
                self.form.annotate(result);
            }
        }
        valid
    }

    /// Re-check one field and re-render only its annotation
    pub fn validate_field(&mut self, field_id: &str) -> ValidationResult {
        self.form.clear_error(field_id);
        let result = self.rules.check(field_id, self.form.value(field_id));
        self.form.annotate(&result);
        result
    }

    /// Completed and total slots for the current values
    pub fn progress_state(&self) -> ProgressState {
        let mut total = 2;
        let mut completed = 0;
        for id in self.rules.required_ids() {
            total += 1;
            if !self.form.value(id).trim().is_empty() {
                completed += 1;
            }
        }
        if self.form.any_checkbox_checked() {
            completed += 1;
        }
        if self.form.any_radio_selected() {
            completed += 1;
        }
        ProgressState { completed, total }
    }

    /// Completion percentage, 0..=100
    pub fn compute_progress(&self) -> u8 {
        self.progress_state().percentage()
    }

    /// Answers keyed by field name, repeated names accumulated in order
    pub fn collect_snapshot(&self) -> FormSnapshot {
        FormSnapshot::from_entries(self.form.entries())
    }

    /// Validate and, if everything passes, show the notice and emit the
    /// snapshot. Returns whether the submission was accepted.
    pub fn on_submit(&mut self) -> bool {
        if !self.validate_all() {
            tracing::debug!(errors = ?self.form.error_ids(), "submission blocked");
            return false;
        }
        let snapshot = self.collect_snapshot();
        tracing::info!(fields = ?snapshot.keys().collect::<Vec<_>>(), "survey submitted");
        self.form.show_notice(snapshot.clone());
        (self.on_submit)(snapshot);
        true
    }

    pub fn handle_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::Blur(id) => {
                if self.rules.get(&id).is_some() {
                    self.validate_field(&id);
                }
            }
            FormEvent::Input(id) => {
                if self.rules.get(&id).map(|r| r.trigger) == Some(Trigger::Input) {
                    self.validate_field(&id);
                }
                self.progress = self.progress_state();
            }
            FormEvent::Change(_) => {
                self.progress = self.progress_state();
            }
            FormEvent::Submit => {
                self.on_submit();
            }
            FormEvent::DismissNotice => self.form.dismiss_notice(),
        }
    }
}
