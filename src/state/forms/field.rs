//! Form field value objects

/// One selectable option of a select, checkbox group or radio group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Type-safe control state
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Single-line text (text, email and number inputs)
    Text { kind: TextKind, value: String },
    /// Multi-line text
    TextArea { value: String },
    /// Drop-down with exactly one selected option
    Select {
        options: Vec<ChoiceOption>,
        selected: usize,
    },
    /// Any number of options checked, submitted under one name
    CheckboxGroup {
        options: Vec<ChoiceOption>,
        checked: Vec<bool>,
        cursor: usize,
    },
    /// At most one option selected
    RadioGroup {
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
        cursor: usize,
    },
}

/// Flavour of a single-line input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Plain,
    Email,
    Number,
}

impl TextKind {
    /// Whether a typed character is accepted by this input
    fn accepts(&self, c: char) -> bool {
        match self {
            TextKind::Plain | TextKind::Email => !c.is_control(),
            TextKind::Number => c.is_ascii_digit() || c == '-' || c == '.',
        }
    }
}

/// Sign or decimal point typed without any digit yet, e.g. `-` or `.`
pub(super) fn is_partial_number(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.chars().all(|c| c == '-' || c == '.')
}

/// Represents a single form control with its configuration and value
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Identifier, also the submitted name
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub control: Control,
    /// Inline error annotation
    pub error: Option<String>,
}

impl FormField {
    fn new(id: &str, label: &str, control: Control) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            control,
            error: None,
        }
    }

    /// Create a new single-line field
    pub fn text(id: &str, label: &str, kind: TextKind) -> Self {
        Self::new(
            id,
            label,
            Control::Text {
                kind,
                value: String::new(),
            },
        )
    }

    /// Create a new multi-line field
    pub fn textarea(id: &str, label: &str) -> Self {
        Self::new(
            id,
            label,
            Control::TextArea {
                value: String::new(),
            },
        )
    }

    /// Create a select; the first option is selected initially
    pub fn select(id: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self::new(
            id,
            label,
            Control::Select {
                options,
                selected: 0,
            },
        )
    }

    /// Create a checkbox group with nothing checked
    pub fn checkboxes(id: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        let checked = vec![false; options.len()];
        Self::new(
            id,
            label,
            Control::CheckboxGroup {
                options,
                checked,
                cursor: 0,
            },
        )
    }

    /// Create a radio group with nothing selected
    pub fn radios(id: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self::new(
            id,
            label,
            Control::RadioGroup {
                options,
                selected: None,
                cursor: 0,
            },
        )
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// The field's scalar value: text content, or the selected option's value.
    /// Groups report their first checked/selected value.
    pub fn value(&self) -> &str {
        match &self.control {
            Control::Text { value, .. } | Control::TextArea { value } => value.as_str(),
            Control::Select { options, selected } => options
                .get(*selected)
                .map(|o| o.value.as_str())
                .unwrap_or(""),
            Control::CheckboxGroup {
                options, checked, ..
            } => options
                .iter()
                .zip(checked)
                .find(|(_, c)| **c)
                .map(|(o, _)| o.value.as_str())
                .unwrap_or(""),
            Control::RadioGroup {
                options, selected, ..
            } => selected
                .and_then(|i| options.get(i))
                .map(|o| o.value.as_str())
                .unwrap_or(""),
        }
    }

    /// Values this field contributes to a submission, in option order.
    /// Text controls always contribute one (possibly empty) value.
    pub fn submitted_values(&self) -> Vec<&str> {
        match &self.control {
            // An unfinished number submits as empty
            Control::Text {
                kind: TextKind::Number,
                value,
            } if is_partial_number(value) => vec![""],
            Control::Text { .. } | Control::TextArea { .. } | Control::Select { .. } => {
                vec![self.value()]
            }
            Control::CheckboxGroup {
                options, checked, ..
            } => options
                .iter()
                .zip(checked)
                .filter(|(_, c)| **c)
                .map(|(o, _)| o.value.as_str())
                .collect(),
            Control::RadioGroup { .. } => {
                let v = self.value();
                if v.is_empty() {
                    vec![]
                } else {
                    vec![v]
                }
            }
        }
    }

    /// Set the value of a text control; ignored for choice controls
    pub fn set_text(&mut self, text: &str) {
        if let Control::Text { value, .. } | Control::TextArea { value } = &mut self.control {
            *value = text.to_string();
        }
    }

    /// Select the option with the given value (select or radio)
    #[cfg(test)]
    pub fn choose(&mut self, option_value: &str) -> bool {
        match &mut self.control {
            Control::Select { options, selected } => {
                if let Some(i) = options.iter().position(|o| o.value == option_value) {
                    *selected = i;
                    return true;
                }
                false
            }
            Control::RadioGroup {
                options,
                selected,
                cursor,
            } => {
                if let Some(i) = options.iter().position(|o| o.value == option_value) {
                    *selected = Some(i);
                    *cursor = i;
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Check or uncheck a checkbox option by value
    #[cfg(test)]
    pub fn set_checked(&mut self, option_value: &str, on: bool) -> bool {
        if let Control::CheckboxGroup {
            options, checked, ..
        } = &mut self.control
        {
            if let Some(i) = options.iter().position(|o| o.value == option_value) {
                checked[i] = on;
                return true;
            }
        }
        false
    }

    /// Whether any option of a checkbox/radio group is on
    pub fn has_selection(&self) -> bool {
        match &self.control {
            Control::CheckboxGroup { checked, .. } => checked.iter().any(|c| *c),
            Control::RadioGroup { selected, .. } => selected.is_some(),
            _ => !self.value().trim().is_empty(),
        }
    }

    /// Push a character to a text control. Returns true if the value changed.
    pub fn push_char(&mut self, c: char) -> bool {
        match &mut self.control {
            Control::Text { kind, value } => {
                if kind.accepts(c) {
                    value.push(c);
                    return true;
                }
                false
            }
            Control::TextArea { value } => {
                value.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last character. Returns true if the value changed.
    pub fn pop_char(&mut self) -> bool {
        match &mut self.control {
            Control::Text { value, .. } | Control::TextArea { value } => value.pop().is_some(),
            _ => false,
        }
    }

    /// Move the option cursor (or the selection, for selects) by `delta`,
    /// wrapping around. Returns true if a select's value changed.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        fn wrap(current: usize, len: usize, delta: isize) -> usize {
            if len == 0 {
                return 0;
            }
            (current as isize + delta).rem_euclid(len as isize) as usize
        }
        match &mut self.control {
            Control::Select { options, selected } => {
                let next = wrap(*selected, options.len(), delta);
                let changed = next != *selected;
                *selected = next;
                changed
            }
            Control::CheckboxGroup {
                options, cursor, ..
            }
            | Control::RadioGroup {
                options, cursor, ..
            } => {
                *cursor = wrap(*cursor, options.len(), delta);
                false
            }
            _ => false,
        }
    }

    /// Toggle the checkbox, or select the radio, under the cursor.
    /// Returns true if anything changed.
    pub fn activate_cursor(&mut self) -> bool {
        match &mut self.control {
            Control::CheckboxGroup {
                checked, cursor, ..
            } => match checked.get_mut(*cursor) {
                Some(c) => {
                    *c = !*c;
                    true
                }
                None => false,
            },
            Control::RadioGroup {
                options,
                selected,
                cursor,
            } => {
                if *cursor < options.len() && *selected != Some(*cursor) {
                    *selected = Some(*cursor);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Whether typing goes into this control
    pub fn accepts_text(&self) -> bool {
        matches!(self.control, Control::Text { .. } | Control::TextArea { .. })
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.control, Control::TextArea { .. })
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.control {
            Control::Select { options, selected } => options
                .get(*selected)
                .map(|o| o.label.clone())
                .unwrap_or_default(),
            _ => self.value().to_string(),
        }
    }
}
