//! Equality, type and membership checks available on every inspectable value.

use verity_describe::{describe, disambiguate, values_equal, Decoration};
use verity_diff::diff_strings;
use verity_message::{BlockStep, FluentMessage, ValueBlock};
use verity_types::{short_type_name, EqualMode, Inspect, Value};

use crate::check::{CheckLink, FluentCheck};
use crate::checks::same_type;
use crate::error::CheckResult;

const DIFFERENT: &str = "The {0} is different from the {1}.";

impl<T: Inspect> FluentCheck<T> {
    /// Check that the value equals `expected` under the configured
    /// [`EqualMode`].
    ///
    /// String mismatches are classified (case, spaces, line endings, first
    /// differing line). Values that render identically get their type or a
    /// content hash appended.
    pub fn is_equal_to<E: Inspect>(self, expected: E) -> CheckResult<CheckLink<T>> {
        let checked = self.checked();
        let checked_type = self.checked_type();
        let expected_value = expected.inspect();
        let expected_type = Inspect::type_name(&expected);
        let mode = self.config.equal_mode;

        let passed = values_equal(&checked, &expected_value, mode)
            && (mode == EqualMode::FluentEquals || same_type(&checked_type, &expected_type));

        self.decide(
            "is_equal_to",
            passed,
            |c| {
                difference_message(
                    c,
                    (&checked, &checked_type),
                    (&expected_value, &expected_type),
                )
            },
            |c| {
                c.message("The {0} is equal to the {1} whereas it must not.")
                    .on(checked.clone())
                    .expected(expected_value.clone())
                    .comparison("different from")
            },
        )
    }

    pub fn is_not_equal_to<E: Inspect>(self, expected: E) -> CheckResult<CheckLink<T>> {
        self.not().is_equal_to(expected)
    }

    /// Check that the runtime type of the value is `U`.
    pub fn is_instance_of<U: ?Sized>(self) -> CheckResult<CheckLink<T>> {
        let checked_type = self.checked_type();
        let expected_type = short_type_name(std::any::type_name::<U>());
        let passed = same_type(&checked_type, &expected_type);

        self.decide(
            "is_instance_of",
            passed,
            |c| {
                c.message("The {0} is not an instance of the {1}.")
                    .on(c.checked())
                    .with_type(checked_type.as_str())
                    .expected_type(expected_type.as_str())
            },
            |c| {
                c.message("The {0} is an instance of the {1} whereas it must not.")
                    .on(c.checked())
                    .with_type(checked_type.as_str())
                    .expected_type(expected_type.as_str())
                    .comparison("different from")
            },
        )
    }

    pub fn is_not_instance_of<U: ?Sized>(self) -> CheckResult<CheckLink<T>> {
        self.not().is_instance_of::<U>()
    }

    /// Check that the value equals one of `candidates`.
    pub fn is_one_of<I>(self, candidates: I) -> CheckResult<CheckLink<T>>
    where
        I: IntoIterator,
        I::Item: Inspect,
    {
        let candidates: Vec<Value> = candidates.into_iter().map(|v| v.inspect()).collect();
        let checked = self.checked();
        let mode = self.config.equal_mode;
        let passed = candidates.iter().any(|v| values_equal(&checked, v, mode));

        self.decide(
            "is_one_of",
            passed,
            |c| {
                c.message("The {0} is not one of the possible elements.")
                    .on(checked.clone())
                    .expected_values(Value::seq("candidates", candidates.clone()))
            },
            |c| {
                c.message("The {0} is one of the possible elements whereas it must not.")
                    .on(checked.clone())
                    .expected_values(Value::seq("candidates", candidates.clone()))
            },
        )
    }
}

fn difference_message<T>(
    check: &FluentCheck<T>,
    (checked, checked_type): (&Value, &str),
    (expected, expected_type): (&Value, &str),
) -> FluentMessage {
    let mut options = check.describe_options();
    let mut template = DIFFERENT.to_string();

    if let (Value::Str(actual), Value::Str(reference)) = (checked, expected) {
        let diff = diff_strings(actual, reference);
        if !diff.is_identical() {
            template = diff.template();
            options = options
                .with_focus(diff.focus())
                .with_string_style(diff.string_style());
        }
    }

    let decoration = disambiguate(
        &describe(checked, &options),
        &describe(expected, &options),
        checked_type,
        expected_type,
    );
    let step = check
        .message(template)
        .with_options(options)
        .on(checked.clone());
    let step = decorate(step, &decoration, checked_type).expected(expected.clone());
    decorate(step, &decoration, expected_type).and()
}

fn decorate(
    step: BlockStep<ValueBlock>,
    decoration: &Decoration,
    type_name: &str,
) -> BlockStep<ValueBlock> {
    match decoration {
        Decoration::None => step,
        Decoration::TypeName => step.with_type(type_name),
        Decoration::HashCode => step.with_hash_code(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use crate::prelude::*;
    use crate::test_support::failure_message;
    use verity_types::{EqualMode, Serialized, StructBuilder, Value};

    #[test]
    fn equal_values_pass() -> CheckResult<()> {
        Check::that(42).is_equal_to(42)?;
        Check::that("toto").is_equal_to(String::from("toto"))?;
        Check::that(vec![1, 2]).is_equal_to([1, 2])?;
        Check::that(1u8).is_equal_to(1.0)?;
        Ok(())
    }

    #[test]
    fn numbers_are_described() {
        assert_eq!(
            failure_message(Check::that(1).is_equal_to(2)),
            "\nThe checked value is different from the expected one.\nThe checked value:\n\t[1]\nThe expected value:\n\t[2]"
        );
    }

    #[test]
    fn case_differences_are_named() {
        let message = failure_message(Check::that("Hello").is_equal_to("hello"));
        assert!(message.contains("different in case"));
    }

    #[test]
    fn whitespace_differences_show_tabs() {
        let message = failure_message(Check::that("a\tb").is_equal_to("a b"));
        assert!(message.starts_with("\nThe checked string has different spaces than the expected one."));
        assert!(message.contains("[\"a<<tab>>b\"]"));
    }

    #[test]
    fn line_ending_differences_show_markers() {
        let message = failure_message(Check::that("a\r\nb").is_equal_to("a\nb"));
        assert!(message.contains("different end of line markers"));
        assert!(message.contains("<<CRLF>>"));
        assert!(message.contains("<<LF>>"));
    }

    #[test]
    fn multi_line_difference_names_line_and_column() {
        let message = failure_message(Check::that("one\ntwo").is_equal_to("one\ntwa"));
        assert!(message.starts_with(
            "\nThe checked string is different from the expected one, at line 2 col=2, expected 'twa' was 'two'."
        ));
    }

    #[test]
    fn strict_mode_distinguishes_types() {
        Check::set_equal_mode(EqualMode::Equals);
        let message = failure_message(Check::that(1u8).is_equal_to(1i64));
        Check::reset_configuration();

        assert_eq!(
            message,
            "\nThe checked value is different from the expected one.\nThe checked value:\n\t[1] of type: [u8]\nThe expected value:\n\t[1] of type: [i64]"
        );
    }

    #[test]
    fn look_alike_values_get_hash_codes() {
        let a = StructBuilder::new("Token").field("name", "x").private_field("seed", &1).build();
        let b = StructBuilder::new("Token").field("name", "x").private_field("seed", &2).build();
        let message = failure_message(Check::that(a).is_equal_to(b));
        assert_eq!(message.matches("with HashCode: [").count(), 2);
    }

    #[test]
    fn not_equal() -> CheckResult<()> {
        Check::that(1).is_not_equal_to(2)?;
        let message = failure_message(Check::that("a").is_not_equal_to("a"));
        assert_eq!(
            message,
            "\nThe checked string is equal to the expected one whereas it must not.\nThe checked string:\n\t[\"a\"]\nThe expected string: different from\n\t[\"a\"]"
        );
        Ok(())
    }

    #[test]
    fn instance_of() -> CheckResult<()> {
        Check::that(3).is_instance_of::<i32>()?;
        Check::that("x").is_instance_of::<str>()?;
        Check::that(3).is_not_instance_of::<u8>()?;
        assert_eq!(
            failure_message(Check::that(3).is_instance_of::<String>()),
            "\nThe checked value is not an instance of the expected one.\nThe checked value:\n\t[3] of type: [i32]\nThe expected value:\n\tan instance of [String]"
        );
        Ok(())
    }

    #[test]
    fn one_of() -> CheckResult<()> {
        Check::that(2).is_one_of([1, 2, 3])?;
        assert_eq!(
            failure_message(Check::that(5).is_one_of([1, 2, 3])),
            "\nThe checked value is not one of the possible elements.\nThe checked value:\n\t[5]\nThe expected value(s):\n\t[1, 2, 3]"
        );
        Check::that(Value::Null).not().is_one_of([1])?;
        Ok(())
    }

    #[test]
    fn equal_hash_sets_pass_whatever_their_insertion_order() -> CheckResult<()> {
        let forward: HashSet<i32> = (0..64).collect();
        let backward: HashSet<i32> = (0..64).rev().collect();
        Check::that(forward.clone()).is_equal_to(backward.clone())?;

        Check::set_equal_mode(EqualMode::Equals);
        let strict = Check::that(forward).is_equal_to(backward);
        Check::reset_configuration();
        strict?;
        Ok(())
    }

    #[test]
    fn equal_hash_maps_pass_in_both_modes() -> CheckResult<()> {
        let forward: HashMap<i32, String> = (0..64).map(|i| (i, i.to_string())).collect();
        let backward: HashMap<i32, String> = (0..64).rev().map(|i| (i, i.to_string())).collect();
        Check::that(forward.clone()).is_equal_to(backward.clone())?;

        Check::set_equal_mode(EqualMode::Equals);
        let strict = Check::that(forward).is_equal_to(backward);
        Check::reset_configuration();
        strict?;
        Ok(())
    }

    #[test]
    fn hash_set_messages_are_sorted() {
        let checked: HashSet<i32> = [3, 1, 2].into_iter().collect();
        let expected: HashSet<i32> = [4, 1].into_iter().collect();
        let message = failure_message(Check::that(checked).is_equal_to(expected));
        assert!(message.contains("\t[1, 2, 3]"));
        assert!(message.contains("\t[1, 4]"));
    }

    #[test]
    fn big_integers_are_not_rounded_against_floats() -> CheckResult<()> {
        assert!(Check::that(9_007_199_254_740_993i64)
            .is_equal_to(9_007_199_254_740_992.0f64)
            .is_err());
        Check::that(9_007_199_254_740_992i64).is_equal_to(9_007_199_254_740_992.0f64)?;
        Check::that(9_007_199_254_740_993u64).is_not_equal_to(9_007_199_254_740_992.0f64)?;
        Ok(())
    }

    #[derive(serde::Serialize)]
    struct Endpoint {
        host: &'static str,
        port: u16,
    }

    #[test]
    fn serialized_values_compare_by_content() -> CheckResult<()> {
        let endpoint = Serialized(Endpoint {
            host: "localhost",
            port: 8080,
        });
        let message = failure_message(Check::that(&endpoint).is_equal_to(Serialized(Endpoint {
            host: "localhost",
            port: 8081,
        })));
        assert!(message.contains("8081"));
        Check::that(endpoint).is_equal_to(Serialized(Endpoint {
            host: "localhost",
            port: 8080,
        }))?;
        Ok(())
    }

    proptest::proptest! {
        #[test]
        fn a_string_equals_itself(text in ".*") {
            proptest::prop_assert!(Check::that(text.clone()).is_equal_to(text).is_ok());
        }

        #[test]
        fn a_number_never_differs_from_itself(n in proptest::num::i64::ANY) {
            proptest::prop_assert!(Check::that(n).is_not_equal_to(n).is_err());
        }
    }
}
