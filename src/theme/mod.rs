//! Theme extraction from Figma design trees
//!
//! Flat color and typography summaries only; geometry and layout are ignored.

pub mod colors;
pub mod processor;
pub mod typography;

pub use colors::extract_colors;
pub use processor::{process, ProcessError, ProcessedDesign};
pub use typography::{extract_typography, TypographyProfile};

/// Append `value` unless an equal value is already present, keeping first-seen order
pub(crate) fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}
