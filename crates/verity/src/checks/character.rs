use verity_types::Inspect;

use crate::check::{CheckLink, FluentCheck};
use crate::error::CheckResult;

/// Checks on `char` values.
pub trait CharCheck: Sized {
    /// Alphabetic, in the Unicode sense.
    fn is_a_letter(self) -> CheckResult<CheckLink<char>>;
    /// ASCII decimal digit.
    fn is_a_digit(self) -> CheckResult<CheckLink<char>>;
    /// ASCII punctuation or symbol.
    fn is_a_punctuation_sign(self) -> CheckResult<CheckLink<char>>;
    fn is_a_white_space(self) -> CheckResult<CheckLink<char>>;
    /// Same letter, ignoring case.
    fn is_same_letter_as(self, other: char) -> CheckResult<CheckLink<char>>;
}

impl CharCheck for FluentCheck<char> {
    fn is_a_letter(self) -> CheckResult<CheckLink<char>> {
        let passed = self.value.is_alphabetic();
        classify(self, "is_a_letter", passed, "a letter")
    }

    fn is_a_digit(self) -> CheckResult<CheckLink<char>> {
        let passed = self.value.is_ascii_digit();
        classify(self, "is_a_digit", passed, "a digit")
    }

    fn is_a_punctuation_sign(self) -> CheckResult<CheckLink<char>> {
        let passed = self.value.is_ascii_punctuation();
        classify(self, "is_a_punctuation_sign", passed, "a punctuation sign")
    }

    fn is_a_white_space(self) -> CheckResult<CheckLink<char>> {
        let passed = self.value.is_whitespace();
        classify(self, "is_a_white_space", passed, "a white space")
    }

    fn is_same_letter_as(self, other: char) -> CheckResult<CheckLink<char>> {
        let passed = self.value.to_lowercase().eq(other.to_lowercase());
        self.decide(
            "is_same_letter_as",
            passed,
            |c| {
                c.message("The {0} is not the same letter as the {1}.")
                    .on(c.checked())
                    .expected(other.inspect())
            },
            |c| {
                c.message("The {0} is the same letter as the {1} whereas it must not.")
                    .on(c.checked())
                    .expected(other.inspect())
                    .comparison("a different letter than")
            },
        )
    }
}

fn classify(
    check: FluentCheck<char>,
    name: &'static str,
    passed: bool,
    class: &str,
) -> CheckResult<CheckLink<char>> {
    check.decide(
        name,
        passed,
        |c| c.message(format!("The {{0}} is not {class}.")).on(c.checked()),
        |c| c.message(format!("The {{0}} is {class} whereas it must not.")).on(c.checked()),
    )
}
