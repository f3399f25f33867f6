use verity_types::Inspect;

use crate::check::{CheckLink, FluentCheck};
use crate::error::CheckResult;

/// Checks on string values (`&str`, `String`, `Cow<str>`, ...).
pub trait StringCheck<S>: Sized {
    fn contains(self, fragment: &str) -> CheckResult<CheckLink<S>>;
    fn does_not_contain(self, fragment: &str) -> CheckResult<CheckLink<S>>;
    fn starts_with(self, prefix: &str) -> CheckResult<CheckLink<S>>;
    fn ends_with(self, suffix: &str) -> CheckResult<CheckLink<S>>;
    fn is_empty(self) -> CheckResult<CheckLink<S>>;
    fn is_not_empty(self) -> CheckResult<CheckLink<S>>;
    /// Length in characters.
    fn has_length(self, length: usize) -> CheckResult<CheckLink<S>>;
    fn is_equal_ignoring_case(self, expected: &str) -> CheckResult<CheckLink<S>>;
}

impl<S: AsRef<str> + Inspect> StringCheck<S> for FluentCheck<S> {
    fn contains(self, fragment: &str) -> CheckResult<CheckLink<S>> {
        let passed = self.value.as_ref().contains(fragment);
        self.decide(
            "contains",
            passed,
            |c| {
                c.message("The {0} does not contain the {1}.")
                    .on(c.checked())
                    .expected(fragment.inspect())
                    .label("The expected substring:")
            },
            |c| {
                c.message("The {0} contains the {1} whereas it must not.")
                    .on(c.checked())
                    .expected(fragment.inspect())
                    .label("The forbidden substring:")
            },
        )
    }

    fn does_not_contain(self, fragment: &str) -> CheckResult<CheckLink<S>> {
        self.not().contains(fragment)
    }

    fn starts_with(self, prefix: &str) -> CheckResult<CheckLink<S>> {
        let passed = self.value.as_ref().starts_with(prefix);
        self.decide(
            "starts_with",
            passed,
            |c| {
                c.message("The {0}'s start is different from the {1}.")
                    .on(c.checked())
                    .expected(prefix.inspect())
                    .comparison("starts with")
            },
            |c| {
                c.message("The {0} starts with the {1} whereas it must not.")
                    .on(c.checked())
                    .expected(prefix.inspect())
                    .comparison("does not start with")
            },
        )
    }

    fn ends_with(self, suffix: &str) -> CheckResult<CheckLink<S>> {
        let passed = self.value.as_ref().ends_with(suffix);
        self.decide(
            "ends_with",
            passed,
            |c| {
                c.message("The {0}'s end is different from the {1}.")
                    .on(c.checked())
                    .expected(suffix.inspect())
                    .comparison("ends with")
            },
            |c| {
                c.message("The {0} ends with the {1} whereas it must not.")
                    .on(c.checked())
                    .expected(suffix.inspect())
                    .comparison("does not end with")
            },
        )
    }

    fn is_empty(self) -> CheckResult<CheckLink<S>> {
        let passed = self.value.as_ref().is_empty();
        self.decide(
            "is_empty",
            passed,
            |c| c.message("The {0} is not empty.").on(c.checked()),
            |c| c.message("The {0} is empty whereas it must not.").on(c.checked()),
        )
    }

    fn is_not_empty(self) -> CheckResult<CheckLink<S>> {
        StringCheck::is_empty(self.not())
    }

    fn has_length(self, length: usize) -> CheckResult<CheckLink<S>> {
        let actual = self.value.as_ref().chars().count();
        self.decide(
            "has_length",
            actual == length,
            |c| {
                c.message(format!("The {{0}} has a length of {actual} instead of {length}."))
                    .on(c.checked())
            },
            |c| {
                c.message(format!("The {{0}} has a length of {length} whereas it must not."))
                    .on(c.checked())
            },
        )
    }

    fn is_equal_ignoring_case(self, expected: &str) -> CheckResult<CheckLink<S>> {
        let passed = self.value.as_ref().to_lowercase() == expected.to_lowercase();
        self.decide(
            "is_equal_ignoring_case",
            passed,
            |c| {
                c.message("The {0} is different from the {1}, ignoring case.")
                    .on(c.checked())
                    .expected(expected.inspect())
            },
            |c| {
                c.message("The {0} is equal to the {1}, ignoring case, whereas it must not.")
                    .on(c.checked())
                    .expected(expected.inspect())
                    .comparison("different from")
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::test_support::failure_message;

    #[test]
    fn substring_checks() -> CheckResult<()> {
        Check::that("hello world").contains("lo w")?.and().does_not_contain("xyz")?;
        Check::that(String::from("hello")).starts_with("he")?.and().ends_with("lo")?;
        Ok(())
    }

    #[test]
    fn missing_substring_message() {
        assert_eq!(
            failure_message(Check::that("hello").contains("xyz")),
            "\nThe checked string does not contain the expected one.\nThe checked string:\n\t[\"hello\"]\nThe expected substring:\n\t[\"xyz\"]"
        );
    }

    #[test]
    fn forbidden_substring_message() {
        let message = failure_message(Check::that("hello").does_not_contain("ell"));
        assert!(message.starts_with("\nThe checked string contains the expected one whereas it must not."));
        assert!(message.ends_with("The forbidden substring:\n\t[\"ell\"]"));
    }

    #[test]
    fn start_and_end() {
        let message = failure_message(Check::that("hello").starts_with("lo"));
        assert_eq!(
            message,
            "\nThe checked string's start is different from the expected one.\nThe checked string:\n\t[\"hello\"]\nThe expected string: starts with\n\t[\"lo\"]"
        );
        assert!(Check::that("hello").not().ends_with("he").is_ok());
    }

    #[test]
    fn emptiness() -> CheckResult<()> {
        Check::that("").is_empty()?;
        Check::that("a").is_not_empty()?;
        assert_eq!(
            failure_message(Check::that("").is_not_empty()),
            "\nThe checked string is empty whereas it must not.\nThe checked string:\n\t[\"\"]"
        );
        Ok(())
    }

    #[test]
    fn length_counts_characters() -> CheckResult<()> {
        Check::that("héllo").has_length(5)?;
        assert_eq!(
            failure_message(Check::that("abc").has_length(2)),
            "\nThe checked string has a length of 3 instead of 2.\nThe checked string:\n\t[\"abc\"]"
        );
        Ok(())
    }

    #[test]
    fn case_insensitive_equality() -> CheckResult<()> {
        Check::that("HeLLo").is_equal_ignoring_case("hello")?;
        let message = failure_message(Check::that("abc").is_equal_ignoring_case("abd"));
        assert!(message.starts_with("\nThe checked string is different from the expected one, ignoring case."));
        Ok(())
    }
}
