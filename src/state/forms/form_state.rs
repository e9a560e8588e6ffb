//! Survey document: sections, controls, focus and inline annotations

use super::field::{ChoiceOption, FormField, TextKind};
use super::rules::ValidationResult;
use super::snapshot::FormSnapshot;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// A fieldset: a legend over a run of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub legend: String,
    pub field_ids: Vec<String>,
}

/// Confirmation shown after an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessNotice {
    pub answers: FormSnapshot,
}

impl SuccessNotice {
    pub const TITLE: &'static str = "Survey Submitted Successfully!";
    pub const MESSAGE: &'static str = "Thank you for taking the time to complete our developer survey. Your feedback is valuable to us.";
}

/// The survey form. Focus index `fields.len()` is the submit button.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyForm {
    pub title: String,
    sections: Vec<Section>,
    fields: Vec<FormField>,
    pub active_field_index: usize,
    notice: Option<SuccessNotice>,
}

impl SurveyForm {
    /// Build a form from sections; fields are laid out in section order
    pub fn new(title: &str, sections: Vec<(&str, Vec<FormField>)>) -> Self {
        let mut fields = Vec::new();
        let sections = sections
            .into_iter()
            .map(|(legend, section_fields)| {
                let field_ids = section_fields.iter().map(|f| f.id.clone()).collect();
                fields.extend(section_fields);
                Section {
                    legend: legend.to_string(),
                    field_ids,
                }
            })
            .collect();
        Self {
            title: title.to_string(),
            sections,
            fields,
            active_field_index: 0,
            notice: None,
        }
    }

    /// The developer survey document
    pub fn developer_survey() -> Self {
        Self::new(
            "Developer Survey",
            vec![
                (
                    "Personal Information",
                    vec![
                        FormField::text("name", "Full Name", TextKind::Plain)
                            .with_placeholder("Enter your full name"),
                        FormField::text("email", "Email Address", TextKind::Email)
                            .with_placeholder("Enter your email"),
                        FormField::text("number", "Years of Experience", TextKind::Number)
                            .with_placeholder("0-50"),
                    ],
                ),
                (
                    "Your Work",
                    vec![
                        FormField::select(
                            "dropdown",
                            "Current Role",
                            vec![
                                ChoiceOption::new("", "Select your current role"),
                                ChoiceOption::new("Student", "Student"),
                                ChoiceOption::new("Engineer", "Engineer"),
                                ChoiceOption::new("Manager", "Manager"),
                                ChoiceOption::new("Designer", "Designer"),
                                ChoiceOption::new("Other", "Other"),
                            ],
                        ),
                        FormField::checkboxes(
                            "languages",
                            "Languages You Use",
                            vec![
                                ChoiceOption::new("rust", "Rust"),
                                ChoiceOption::new("go", "Go"),
                                ChoiceOption::new("python", "Python"),
                                ChoiceOption::new("javascript", "JavaScript"),
                                ChoiceOption::new("java", "Java"),
                            ],
                        ),
                    ],
                ),
                (
                    "Feedback",
                    vec![
                        FormField::radios(
                            "recommend",
                            "Would You Recommend?",
                            vec![
                                ChoiceOption::new("definitely", "Definitely"),
                                ChoiceOption::new("maybe", "Maybe"),
                                ChoiceOption::new("not-sure", "Not sure"),
                            ],
                        ),
                        FormField::textarea("comments", "Additional Comments")
                            .with_placeholder("Share anything else on your mind"),
                    ],
                ),
            ],
        )
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Current value of a field ("" for unknown ids)
    pub fn value(&self, id: &str) -> &str {
        self.field(id).map(FormField::value).unwrap_or("")
    }

    /// Set a text field's value
    #[cfg(test)]
    pub fn set_value(&mut self, id: &str, value: &str) {
        if let Some(field) = self.field_mut(id) {
            field.set_text(value);
        }
    }

    /// Id of the focused field; `None` when the submit button has focus
    pub fn active_id(&self) -> Option<&str> {
        self.fields
            .get(self.active_field_index)
            .map(|f| f.id.as_str())
    }

    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    /// Move focus to a field by id
    pub fn focus(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active_field_index = index;
                true
            }
            None => false,
        }
    }

    /// Set or clear one field's annotation. Applying the same result twice
    /// leaves the same state.
    pub fn annotate(&mut self, result: &ValidationResult) {
        if let Some(field) = self.field_mut(&result.field_id) {
            field.error = result.message();
        }
    }

    pub fn clear_error(&mut self, id: &str) {
        if let Some(field) = self.field_mut(id) {
            field.error = None;
        }
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.field(id).and_then(|f| f.error.as_deref())
    }

    /// Ids of annotated fields, in document order
    pub fn error_ids(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.error.is_some())
            .map(|f| f.id.as_str())
            .collect()
    }

    /// `(name, value)` pairs in document order, as a browser would submit them
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .flat_map(|f| {
                f.submitted_values()
                    .into_iter()
                    .map(move |v| (f.id.as_str(), v))
            })
            .collect()
    }

    /// Any checkbox checked anywhere in the form
    pub fn any_checkbox_checked(&self) -> bool {
        self.fields.iter().any(|f| {
            matches!(f.control, super::field::Control::CheckboxGroup { .. }) && f.has_selection()
        })
    }

    /// Any radio selected anywhere in the form
    pub fn any_radio_selected(&self) -> bool {
        self.fields.iter().any(|f| {
            matches!(f.control, super::field::Control::RadioGroup { .. }) && f.has_selection()
        })
    }

    /// Character counter text for a field
    pub fn character_count(&self, id: &str) -> String {
        let count = self.value(id).chars().count();
        format!("{count} character{}", if count == 1 { "" } else { "s" })
    }

    /// Focus the first field of a section
    pub fn focus_section(&mut self, section_index: usize) -> bool {
        let first = self
            .sections
            .get(section_index)
            .and_then(|s| s.field_ids.first())
            .cloned();
        match first {
            Some(id) => self.focus(&id),
            None => false,
        }
    }

    pub fn show_notice(&mut self, answers: FormSnapshot) {
        self.notice = Some(SuccessNotice { answers });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&SuccessNotice> {
        self.notice.as_ref()
    }
}

impl Default for SurveyForm {
    fn default() -> Self {
        Self::developer_survey()
    }
}

impl Form for SurveyForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields + submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::rules::{RuleTable, ValidationError};
    use pretty_assertions::assert_eq;

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_first_field() {
            let form = SurveyForm::developer_survey();
            assert_eq!(form.active_id(), Some("name"));
            assert!(!form.is_submit_active());
        }

        #[test]
        fn test_next_field_reaches_submit_then_wraps() {
            let mut form = SurveyForm::developer_survey();
            for _ in 0..form.fields().len() {
                form.next_field();
            }
            assert!(form.is_submit_active());
            assert_eq!(form.active_id(), None);
            form.next_field();
            assert_eq!(form.active_id(), Some("name"));
        }

        #[test]
        fn test_prev_field_wraps_to_submit() {
            let mut form = SurveyForm::developer_survey();
            form.prev_field();
            assert!(form.is_submit_active());
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = SurveyForm::developer_survey();
            form.set_active_field(999);
            assert!(form.is_submit_active());
        }

        #[test]
        fn test_focus_section() {
            let mut form = SurveyForm::developer_survey();
            assert!(form.focus_section(2));
            assert_eq!(form.active_id(), Some("recommend"));
            assert!(!form.focus_section(9));
        }
    }

    mod annotations {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_annotate_is_idempotent() {
            let mut form = SurveyForm::developer_survey();
            let result = RuleTable::developer_survey().check("name", "");
            form.annotate(&result);
            let once = form.clone();
            form.annotate(&result);
            assert_eq!(form, once);
            assert_eq!(form.error("name"), Some("Full Name is required"));
        }

        #[test]
        fn test_passing_result_clears() {
            let mut form = SurveyForm::developer_survey();
            form.annotate(&ValidationResult {
                field_id: "email".to_string(),
                error: Some(ValidationError::InvalidEmail),
            });
            assert_eq!(form.error_ids(), vec!["email"]);
            form.annotate(&ValidationResult {
                field_id: "email".to_string(),
                error: None,
            });
            assert!(form.error_ids().is_empty());
        }

        #[test]
        fn test_clear_errors() {
            let mut form = SurveyForm::developer_survey();
            let rules = RuleTable::developer_survey();
            form.annotate(&rules.check("name", ""));
            form.annotate(&rules.check("dropdown", ""));
            form.clear_errors();
            assert!(form.error_ids().is_empty());
        }
    }

    mod entries {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_entries_follow_document_order() {
            let mut form = SurveyForm::developer_survey();
            form.set_value("name", "Ada");
            form.field_mut("languages").unwrap().set_checked("go", true);
            form.field_mut("languages").unwrap().set_checked("rust", true);
            let entries = form.entries();
            assert_eq!(
                entries,
                vec![
                    ("name", "Ada"),
                    ("email", ""),
                    ("number", ""),
                    ("dropdown", ""),
                    ("languages", "rust"),
                    ("languages", "go"),
                    ("comments", ""),
                ]
            );
        }

        #[test]
        fn test_group_flags() {
            let mut form = SurveyForm::developer_survey();
            assert!(!form.any_checkbox_checked());
            assert!(!form.any_radio_selected());
            form.field_mut("recommend").unwrap().choose("maybe");
            assert!(form.any_radio_selected());
        }
    }

    #[test]
    fn test_character_count_pluralizes() {
        let mut form = SurveyForm::developer_survey();
        assert_eq!(form.character_count("comments"), "0 characters");
        form.set_value("comments", "a");
        assert_eq!(form.character_count("comments"), "1 character");
        form.set_value("comments", "héllo");
        assert_eq!(form.character_count("comments"), "5 characters");
    }

    #[test]
    fn test_notice_is_single() {
        let mut form = SurveyForm::developer_survey();
        form.show_notice(FormSnapshot::default());
        form.show_notice(FormSnapshot::default());
        assert!(form.notice().is_some());
        form.dismiss_notice();
        assert!(form.notice().is_none());
    }
}
