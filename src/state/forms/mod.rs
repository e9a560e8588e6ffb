//! Form domain layer
//!
//! Survey document, rule table, validator and the values it produces.

mod field;
mod form_state;
mod progress;
mod rules;
mod snapshot;
mod validator;

pub use field::{Control, FormField};
pub use form_state::{Form, SuccessNotice, SurveyForm};
pub use progress::{ProgressAnimation, ProgressState};
pub use rules::RuleTable;
pub use snapshot::FormSnapshot;
pub use validator::{FormEvent, FormValidator, SubmitCallback};

#[cfg(test)]
pub use field::{ChoiceOption, TextKind};
#[cfg(test)]
pub use snapshot::SnapshotValue;
