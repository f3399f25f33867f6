//! Diff engine for Verity.
//!
//! Decides *what* differs between a checked value and an expected value,
//! producing structured results the message builder turns into prose.
//!
//! # Key Types
//!
//! - [`StringDiff`] / [`LineDifference`] -- Classification of a string mismatch
//! - [`FieldDifference`] / [`CompareOptions`] -- First differing member of two structures
//! - [`SequenceMismatch`] / [`OrderBreak`] / [`OrderViolation`] -- Collection content and ordering

pub mod field_diff;
pub mod seq_diff;
pub mod string_diff;

pub use field_diff::{all_differences, first_difference, CompareOptions, FieldDifference, Side};
pub use seq_diff::{
    compare_values, exact_mismatch, first_order_break, missing_items, occurrences,
    order_violation, unexpected_items, OrderBreak, OrderViolation, SequenceMismatch, SortOrder,
};
pub use string_diff::{diff_strings, LineChange, LineDifference, StringDiff};
