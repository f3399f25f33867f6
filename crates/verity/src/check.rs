use std::fmt;

use tracing::debug;
use verity_describe::DescribeOptions;
use verity_message::FluentMessage;
use verity_types::{CheckConfig, EqualMode, Inspect, Value};

use crate::checks::code::CodeCheck;
use crate::config;
use crate::error::{CheckError, CheckResult};

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// Entry point of every check.
///
/// ```rust
/// use verity::prelude::*;
///
/// # fn main() -> verity::CheckResult<()> {
/// Check::that(20.0).is_after(0.0)?.and().is_not_zero()?;
/// Check::that(vec![1, 2, 3]).contains([3, 1])?.once()?;
/// # Ok(())
/// # }
/// ```
///
/// Configuration is kept per thread and snapshotted by every check when it
/// is created.
pub struct Check;

impl Check {
    /// Start checking `value`.
    pub fn that<T>(value: T) -> FluentCheck<T> {
        FluentCheck::new(value, config::current())
    }

    /// Start checking an enum value; messages name it "enum".
    pub fn that_enum<T>(value: T) -> FluentCheck<T> {
        Self::that(value).for_entity("enum")
    }

    /// Run `code` now, recording a panic and the elapsed time.
    pub fn that_code<R>(code: impl FnOnce() -> R) -> CodeCheck<R> {
        CodeCheck::run(code, config::current())
    }

    // ---- Configuration ----

    /// Maximum number of characters of a string shown in messages.
    pub fn string_truncation_length() -> usize {
        config::current().string_truncation_length
    }

    /// # Errors
    ///
    /// Returns [`CheckError::InvalidArgument`] when `length` is below
    /// [`verity_types::MIN_STRING_TRUNCATION_LENGTH`].
    pub fn set_string_truncation_length(length: usize) -> CheckResult<()> {
        let next = config::current()
            .with_string_truncation_length(length)
            .map_err(|e| CheckError::InvalidArgument(e.to_string()))?;
        config::update(|config| *config = next);
        Ok(())
    }

    pub fn equal_mode() -> EqualMode {
        config::current().equal_mode
    }

    pub fn set_equal_mode(mode: EqualMode) {
        config::update(|config| config.equal_mode = mode);
    }

    pub fn set_decimal_separator(separator: char) {
        config::update(|config| config.decimal_separator = separator);
    }

    /// The calling thread's configuration.
    pub fn configuration() -> CheckConfig {
        config::current()
    }

    /// Replace the calling thread's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Config`] when `config` fails validation.
    pub fn set_configuration(config: CheckConfig) -> CheckResult<()> {
        config.validate()?;
        config::update(|current| *current = config);
        Ok(())
    }

    /// Restore the default configuration on the calling thread.
    pub fn reset_configuration() {
        config::update(|config| *config = CheckConfig::default());
    }
}

// ---------------------------------------------------------------------------
// FluentCheck
// ---------------------------------------------------------------------------

/// A value under check.
///
/// Generic checks are inherent methods; the others come from the extension
/// traits in [`crate::prelude`], selected by the checked type.
#[derive(Clone, Debug)]
pub struct FluentCheck<T> {
    pub(crate) value: T,
    pub(crate) negated: bool,
    pub(crate) entity: Option<String>,
    pub(crate) config: CheckConfig,
}

impl<T> FluentCheck<T> {
    pub(crate) fn new(value: T, config: CheckConfig) -> Self {
        Self {
            value,
            negated: false,
            entity: None,
            config,
        }
    }

    /// Negate the next check.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Name the checked value in messages ("The checked <entity> ...").
    pub fn for_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Configuration snapshot this check renders and compares with.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub(crate) fn describe_options(&self) -> DescribeOptions {
        DescribeOptions::from_config(&self.config)
    }

    /// A message pre-configured with this check's options and entity.
    pub(crate) fn message(&self, template: impl Into<String>) -> FluentMessage {
        let message = FluentMessage::new(template).with_options(self.describe_options());
        match &self.entity {
            Some(entity) => message.for_entity(entity.clone()),
            None => message,
        }
    }

    /// Turn the outcome of a check into a link or a failure.
    ///
    /// `passed` is the outcome of the positive check; `failure` and
    /// `negated_failure` build the message for the positive and negated
    /// forms respectively.
    pub(crate) fn decide<F, G, M, N>(
        self,
        check: &'static str,
        passed: bool,
        failure: F,
        negated_failure: G,
    ) -> CheckResult<CheckLink<T>>
    where
        F: FnOnce(&Self) -> M,
        G: FnOnce(&Self) -> N,
        M: Into<FluentMessage>,
        N: Into<FluentMessage>,
    {
        if passed != self.negated {
            return Ok(self.into_link());
        }
        let message = if self.negated {
            negated_failure(&self).into()
        } else {
            failure(&self).into()
        };
        Err(failed(check, self.negated, message))
    }

    /// Like [`Self::decide`] for refinements that cannot be negated.
    pub(crate) fn require<F, M>(self, check: &'static str, passed: bool, failure: F) -> CheckResult<CheckLink<T>>
    where
        F: FnOnce(&Self) -> M,
        M: Into<FluentMessage>,
    {
        if passed {
            Ok(self.into_link())
        } else {
            let message = failure(&self).into();
            Err(failed(check, false, message))
        }
    }

    pub(crate) fn into_link(self) -> CheckLink<T> {
        CheckLink {
            value: self.value,
            entity: self.entity,
            config: self.config,
        }
    }
}

impl<T: Inspect> FluentCheck<T> {
    /// The inspected checked value.
    pub(crate) fn checked(&self) -> Value {
        self.value.inspect()
    }

    pub(crate) fn checked_type(&self) -> String {
        Inspect::type_name(&self.value)
    }
}

/// Record and build a failed check.
pub(crate) fn failed(check: &'static str, negated: bool, message: FluentMessage) -> CheckError {
    debug!(check, negated, "check failed");
    CheckError::Failed(message.to_string())
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// The result of a passing check. `and()` chains another check on the same
/// value, with negation reset.
#[derive(Clone, Debug)]
pub struct CheckLink<T> {
    value: T,
    entity: Option<String>,
    config: CheckConfig,
}

impl<T> CheckLink<T> {
    pub fn and(self) -> FluentCheck<T> {
        FluentCheck {
            value: self.value,
            negated: false,
            entity: self.entity,
            config: self.config,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// A passing check that also exposes a part of the value through
/// [`Self::which`]: the content of an `Option`, an element of a collection.
pub struct WhichLink<T, U> {
    link: CheckLink<T>,
    select: fn(T, usize) -> Option<U>,
    position: usize,
}

impl<T, U> WhichLink<T, U> {
    pub(crate) fn new(link: CheckLink<T>, select: fn(T, usize) -> Option<U>, position: usize) -> Self {
        Self {
            link,
            select,
            position,
        }
    }

    pub fn and(self) -> FluentCheck<T> {
        self.link.and()
    }

    /// Check the selected part.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidOperation`] when there is nothing to
    /// select, which happens after a negated check passed.
    pub fn which(self) -> CheckResult<FluentCheck<U>> {
        let CheckLink { value, config, .. } = self.link;
        (self.select)(value, self.position)
            .map(|part| FluentCheck::new(part, config))
            .ok_or_else(|| {
                CheckError::InvalidOperation("which() has nothing to select after a negated check".into())
            })
    }

    pub fn value(&self) -> &T {
        self.link.value()
    }

    /// Drop the selection, keeping the plain link.
    pub fn into_link(self) -> CheckLink<T> {
        self.link
    }
}

impl<T: fmt::Debug, U> fmt::Debug for WhichLink<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhichLink")
            .field("value", &self.link.value)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::test_support::{failure_message, init_tracing};
    use verity_types::MIN_STRING_TRUNCATION_LENGTH;

    #[test]
    fn different_strings_of_same_length() {
        init_tracing();
        assert_eq!(
            failure_message(Check::that("toto").is_equal_to("tutu")),
            "\nThe checked string is different from the expected one but has same length.\nThe checked string:\n\t[\"toto\"]\nThe expected string:\n\t[\"tutu\"]"
        );
    }

    #[test]
    fn chained_number_checks() {
        assert!(Check::that(20.0)
            .is_after(0.0)
            .and_then(|link| link.and().is_not_zero())
            .is_ok());
    }

    #[test]
    fn contains_then_once_allows_other_items() -> CheckResult<()> {
        Check::that(vec![1, 2, 3]).contains([3, 1])?.once()?;
        assert!(Check::that(vec![1, 2, 3]).contains([3, 1])?.only().is_err());
        Ok(())
    }

    #[test]
    fn size_mismatch_message() {
        assert_eq!(
            failure_message(Check::that(vec![1, 2, 3]).has_size(1)),
            "\nThe checked enumerable has 3 elements instead of 1.\nThe checked enumerable:\n\t[1, 2, 3]"
        );
    }

    #[test]
    fn not_flips_a_check_once() -> CheckResult<()> {
        Check::that(1).not().is_equal_to(2)?;
        Check::that(1).not().not().is_equal_to(1)?;
        let link = Check::that(1).not().is_equal_to(2)?;
        assert!(!link.and().is_negated());
        Ok(())
    }

    #[test]
    fn negated_failure_uses_its_own_message() {
        let message = failure_message(Check::that(5).not().is_equal_to(5));
        assert!(message.starts_with("\nThe checked value is equal to the expected one whereas it must not."));
        assert!(message.contains("The expected value: different from\n\t[5]"));
    }

    #[test]
    fn entity_override_is_used() {
        let message = failure_message(Check::that_enum(1).is_equal_to(2));
        assert!(message.starts_with("\nThe checked enum is different"));
    }

    #[test]
    fn which_after_negated_check_is_rejected() {
        let link = Check::that(None::<i32>).not().has_a_value().unwrap();
        assert!(matches!(link.which(), Err(CheckError::InvalidOperation(_))));
    }

    #[test]
    fn truncation_length_is_validated() {
        let err = Check::set_string_truncation_length(MIN_STRING_TRUNCATION_LENGTH - 1).unwrap_err();
        assert!(matches!(err, CheckError::InvalidArgument(_)));
        assert_eq!(Check::string_truncation_length(), 256);

        Check::set_string_truncation_length(30).unwrap();
        assert_eq!(Check::string_truncation_length(), 30);
        Check::reset_configuration();
        assert_eq!(Check::string_truncation_length(), 256);
    }

    #[test]
    fn configuration_round_trip() {
        let config = CheckConfig::default().with_equal_mode(EqualMode::Equals);
        Check::set_configuration(config.clone()).unwrap();
        assert_eq!(Check::configuration(), config);
        assert_eq!(Check::equal_mode(), EqualMode::Equals);

        let invalid = CheckConfig {
            max_items: 0,
            ..CheckConfig::default()
        };
        assert!(matches!(Check::set_configuration(invalid), Err(CheckError::Config(_))));
        Check::reset_configuration();
    }

    #[test]
    fn checks_snapshot_the_configuration() {
        let check = Check::that(1.5);
        Check::set_decimal_separator(',');
        let message = failure_message(check.is_equal_to(2.5));
        assert!(message.contains("[1.5]"));

        let message = failure_message(Check::that(1.5).is_equal_to(2.5));
        assert!(message.contains("[1,5]"));
        Check::reset_configuration();
    }
}
