//! Form rendering module
//!
//! This module contains UI components for rendering the survey:
//! - `field_renderer`: Field rendering utilities
//! - `survey_form`: Section/field layout and the scrolled form body

mod field_renderer;
mod survey_form;

pub use survey_form::{active_slot, draw, form_row_at, layout_slots, SlotKind};
