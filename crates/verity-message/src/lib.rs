//! Message builder for Verity.
//!
//! Assembles the text of a failed check: a summary line with entity
//! placeholders, followed by labelled blocks rendered by the value describer.
//!
//! # Key Types
//!
//! - [`FluentMessage`] -- Summary template plus ordered blocks, rendered via `Display`
//! - [`BlockStep`] -- Builder state while a block is being labelled or decorated
//! - [`ValueBlock`] / [`TypeBlock`] -- A described value, or "an instance of [T]"

pub mod block;
pub mod message;

pub use block::{Block, DecoratedBlock, Role, TypeBlock, ValueBlock};
pub use message::{BlockStep, FluentMessage};
