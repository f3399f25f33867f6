//! Value describer for Verity.
//!
//! Turns inspected [`Value`](verity_types::Value)s into the bracketed text
//! shown in check failure messages, and decides when two values are equal.
//!
//! # Key Types
//!
//! - [`DescribeKind`] -- Closed dispatch over value kinds, with entity names
//! - [`DescribeOptions`] / [`describe`] -- Bracketed rendering with truncation
//! - [`Decoration`] / [`disambiguate`] -- Type or hash suffixes for look-alike values
//! - [`values_equal`] -- Equality under an [`EqualMode`](verity_types::EqualMode)

pub mod equality;
pub mod hash;
pub mod kind;
pub mod render;
pub mod text;

pub use equality::values_equal;
pub use hash::{disambiguate, hash_code, Decoration};
pub use kind::DescribeKind;
pub use render::{describe, describe_type, render_float, DescribeOptions, StringStyle};
pub use text::{render_line_endings, render_tabs, truncate_window};
