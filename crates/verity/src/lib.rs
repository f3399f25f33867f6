//! Fluent checks for Rust tests.
//!
//! A check starts from [`Check::that`], chains conditions with `and()`,
//! negates the next one with `not()`, and returns a [`CheckError::Failed`]
//! whose text explains the mismatch:
//!
//! ```rust
//! use verity::prelude::*;
//!
//! # fn main() -> CheckResult<()> {
//! Check::that("hello world").starts_with("hello")?.and().not().contains("bye")?;
//! Check::that(vec![3, 1, 2]).is_only_made_of([1, 2, 3])?.and().has_size(3)?;
//!
//! let err = Check::that("toto").is_equal_to("tutu").unwrap_err();
//! assert!(err.to_string().starts_with("\nThe checked string is different from the expected one"));
//! # Ok(())
//! # }
//! ```
//!
//! # Key Types
//!
//! - [`Check`] -- Entry points and the per-thread configuration
//! - [`FluentCheck`] / [`CheckLink`] / [`WhichLink`] -- A value under check and the links between checks
//! - [`CheckError`] -- Failure carrying the rendered message
//! - [`Inspect`] -- How a type exposes itself to checks

pub mod check;
pub mod checks;
mod config;
pub mod error;

pub use check::{Check, CheckLink, FluentCheck, WhichLink};
pub use checks::character::CharCheck;
pub use checks::code::{CodeCheck, CodeLink, PanicLink};
pub use checks::dictionary::{Dictionary, DictionaryCheck};
pub use checks::enumerable::{ContainsLink, Enumerable, EnumerableCheck};
pub use checks::number::{NumberCheck, Numeric};
pub use checks::option::{OptionCheck, ResultCheck};
pub use checks::string::StringCheck;
pub use checks::structural::Considering;
pub use error::{CheckError, CheckResult};

// Re-export the value model
pub use verity_types::{
    CheckConfig, ConfigError, Debugged, EqualMode, Inspect, MemberFilter, Serialized, StructBuilder, Value,
};

/// Everything needed to write checks: `use verity::prelude::*;`.
pub mod prelude {
    pub use crate::check::Check;
    pub use crate::checks::character::CharCheck;
    pub use crate::checks::dictionary::{Dictionary, DictionaryCheck};
    pub use crate::checks::enumerable::{Enumerable, EnumerableCheck};
    pub use crate::checks::number::{NumberCheck, Numeric};
    pub use crate::checks::option::{OptionCheck, ResultCheck};
    pub use crate::checks::string::StringCheck;
    pub use crate::error::{CheckError, CheckResult};
    pub use verity_types::Inspect;
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::error::CheckResult;

    /// The message of a check expected to fail.
    pub(crate) fn failure_message<T>(result: CheckResult<T>) -> String {
        match result {
            Ok(_) => panic!("expected the check to fail"),
            Err(err) => err.to_string(),
        }
    }

    pub(crate) fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }
}
