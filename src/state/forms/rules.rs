//! Field rules shared by submit-time and event-time validation

use super::field::is_partial_number;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Check a value against the basic `local@domain.tld` shape
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// A user-input failure attached to a single field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { label: String },
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("{label} must be between {min} and {max}")]
    OutOfRange { label: String, min: f64, max: f64 },
}

/// Value check applied after the required check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validator {
    None,
    Email,
    NumericRange { min: f64, max: f64 },
}

impl Validator {
    /// Check a non-empty value. `label` is only used for messages.
    fn check(&self, label: &str, value: &str) -> Result<(), ValidationError> {
        match *self {
            Validator::None => Ok(()),
            Validator::Email => {
                if is_valid_email(value) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidEmail)
                }
            }
            Validator::NumericRange { min, max } => match value.trim().parse::<f64>() {
                Ok(n) if n >= min && n <= max => Ok(()),
                _ => Err(ValidationError::OutOfRange {
                    label: label.to_string(),
                    min,
                    max,
                }),
            },
        }
    }
}

/// Which event re-validates a field outside of submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Checked when focus leaves the field
    Blur,
    /// Checked on every edit (and on blur)
    Input,
}

/// Rule entry for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field_id: String,
    /// Label used in messages
    pub label: String,
    pub required: bool,
    pub validator: Validator,
    pub trigger: Trigger,
}

impl FieldRule {
    pub fn required(field_id: &str, label: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            label: label.to_string(),
            required: true,
            validator: Validator::None,
            trigger: Trigger::Blur,
        }
    }

    pub fn optional(field_id: &str, label: &str) -> Self {
        Self {
            required: false,
            ..Self::required(field_id, label)
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn on_input(mut self) -> Self {
        self.trigger = Trigger::Input;
        self
    }

    /// Run the rule. Required is checked first; the validator only sees
    /// non-empty values.
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        let partial =
            matches!(self.validator, Validator::NumericRange { .. }) && is_partial_number(value);
        if value.trim().is_empty() || partial {
            if self.required {
                return Err(ValidationError::Required {
                    label: self.label.clone(),
                });
            }
            return Ok(());
        }
        self.validator.check(&self.label, value)
    }
}

/// Outcome of checking one field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub field_id: String,
    pub error: Option<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Message to render next to the field, if any
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Ordered `field id -> rule` table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    rules: Vec<FieldRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Rules for the developer survey
    pub fn developer_survey() -> Self {
        Self::new(vec![
            FieldRule::required("name", "Full Name"),
            FieldRule::required("email", "Email Address").with_validator(Validator::Email),
            FieldRule::optional("number", "Years of experience")
                .with_validator(Validator::NumericRange {
                    min: 0.0,
                    max: 50.0,
                })
                .on_input(),
            FieldRule::required("dropdown", "Current Role"),
        ])
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field_id == field_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    /// Ids of required fields, in table order
    pub fn required_ids(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|r| r.required)
            .map(|r| r.field_id.as_str())
    }

    /// Check one field's value against its rule (fields without a rule pass)
    pub fn check(&self, field_id: &str, value: &str) -> ValidationResult {
        let error = self.get(field_id).and_then(|rule| rule.check(value).err());
        ValidationResult {
            field_id: field_id.to_string(),
            error,
        }
    }
}
