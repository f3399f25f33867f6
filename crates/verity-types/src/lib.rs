//! Foundation types for Verity.
//!
//! This crate provides the value model every other Verity crate works on.
//! Rust has no runtime reflection, so checkable types describe themselves
//! through the [`Inspect`] trait, producing an owned [`Value`] tree that the
//! describer, the differs and the message builder can walk.
//!
//! # Key Types
//!
//! - [`Value`] -- Closed tree of inspectable values (scalars, sequences, maps, structs)
//! - [`Inspect`] -- Conversion of a Rust value into a [`Value`]
//! - [`Member`] / [`MemberFilter`] -- Struct members with kind and visibility
//! - [`StructBuilder`] -- Fluent construction of [`Value::Struct`]
//! - [`CheckConfig`] / [`EqualMode`] -- Tunables shared by every check

pub mod config;
pub mod error;
pub mod inspect;
pub mod member;
pub mod value;

pub use config::{
    CheckConfig, EqualMode, DEFAULT_MAX_ITEMS, DEFAULT_STRING_TRUNCATION_LENGTH,
    MIN_STRING_TRUNCATION_LENGTH,
};
pub use error::{ConfigError, ConfigResult};
pub use inspect::{inspect_serialized, short_type_name, Debugged, Inspect, Serialized};
pub use member::{Member, MemberFilter, MemberKind, MemberSelection, StructBuilder, Visibility, VisibilityFilter};
pub use value::Value;
