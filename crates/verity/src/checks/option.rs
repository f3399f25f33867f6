use verity_types::Inspect;

use crate::check::{CheckLink, FluentCheck, WhichLink};
use crate::error::CheckResult;

/// Checks on `Option` values.
pub trait OptionCheck<V>: Sized {
    /// `Some`; `which()` checks the content.
    fn has_a_value(self) -> CheckResult<WhichLink<Option<V>, V>>;
    fn has_no_value(self) -> CheckResult<CheckLink<Option<V>>>;
}

impl<V: Inspect> OptionCheck<V> for FluentCheck<Option<V>> {
    fn has_a_value(self) -> CheckResult<WhichLink<Option<V>, V>> {
        let passed = self.value.is_some();
        let link = self.decide(
            "has_a_value",
            passed,
            |c| c.message("The {0} has no value, which is unexpected.").on(c.checked()),
            |c| c.message("The {0} has a value, whereas it must not.").on(c.checked()),
        )?;
        Ok(WhichLink::new(link, |option: Option<V>, _| option, 0))
    }

    fn has_no_value(self) -> CheckResult<CheckLink<Option<V>>> {
        self.not().has_a_value().map(WhichLink::into_link)
    }
}

/// Checks on `Result` values.
pub trait ResultCheck<V, E>: Sized {
    /// `Ok`; `which()` checks the success value.
    fn is_ok(self) -> CheckResult<WhichLink<Result<V, E>, V>>;
    /// `Err`; `which()` checks the error.
    fn is_err(self) -> CheckResult<WhichLink<Result<V, E>, E>>;
}

impl<V: Inspect, E: Inspect> ResultCheck<V, E> for FluentCheck<Result<V, E>> {
    fn is_ok(self) -> CheckResult<WhichLink<Result<V, E>, V>> {
        let passed = self.value.is_ok();
        let link = self.decide(
            "is_ok",
            passed,
            |c| c.message("The {0} is not an Ok value.").on(c.checked()),
            |c| c.message("The {0} is an Ok value whereas it must not.").on(c.checked()),
        )?;
        Ok(WhichLink::new(link, |result: Result<V, E>, _| result.ok(), 0))
    }

    fn is_err(self) -> CheckResult<WhichLink<Result<V, E>, E>> {
        let passed = self.value.is_err();
        let link = self.decide(
            "is_err",
            passed,
            |c| c.message("The {0} is not an Err value.").on(c.checked()),
            |c| c.message("The {0} is an Err value whereas it must not.").on(c.checked()),
        )?;
        Ok(WhichLink::new(link, |result: Result<V, E>, _| result.err(), 0))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::test_support::failure_message;

    #[test]
    fn some_and_none() -> CheckResult<()> {
        Check::that(Some(3)).has_a_value()?.which()?.is_equal_to(3)?;
        Check::that(None::<String>).has_no_value()?;
        Check::that(Some("x")).not().has_no_value()?;
        Ok(())
    }

    #[test]
    fn option_messages() {
        assert_eq!(
            failure_message(Check::that(None::<i32>).has_a_value()),
            "\nThe checked value has no value, which is unexpected.\nThe checked value:\n\t[null]"
        );
        assert_eq!(
            failure_message(Check::that(Some(4)).has_no_value()),
            "\nThe checked value has a value, whereas it must not.\nThe checked value:\n\t[4]"
        );
    }

    #[test]
    fn ok_and_err() -> CheckResult<()> {
        let parsed: Result<i32, String> = "12".parse::<i32>().map_err(|e| e.to_string());
        Check::that(parsed).is_ok()?.which()?.is_equal_to(12)?;

        let failed: Result<i32, &str> = Err("boom");
        Check::that(failed).is_err()?.which()?.is_equal_to("boom")?;
        Ok(())
    }

    #[test]
    fn result_messages() {
        let failed: Result<i32, &str> = Err("boom");
        assert_eq!(
            failure_message(Check::that(failed).is_ok()),
            "\nThe checked enum is not an Ok value.\nThe checked enum:\n\t[Err(\"boom\")]"
        );
    }

    #[test]
    fn which_needs_a_selected_part() {
        let failed: Result<i32, &str> = Err("boom");
        let link = Check::that(failed).not().is_ok().unwrap();
        assert!(matches!(link.which(), Err(CheckError::InvalidOperation(_))));
    }
}
