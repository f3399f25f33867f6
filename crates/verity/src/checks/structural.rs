//! Member-by-member comparison: `considering()`.

use tracing::debug;
use verity_describe::DescribeKind;
use verity_diff::{all_differences, first_difference, CompareOptions, FieldDifference};
use verity_message::FluentMessage;
use verity_types::{Inspect, MemberFilter, MemberSelection, Value, VisibilityFilter};

use crate::check::{CheckLink, FluentCheck};
use crate::error::CheckResult;

impl<T: Inspect> FluentCheck<T> {
    /// Compare the value with another one member by member.
    ///
    /// ```rust
    /// use verity::prelude::*;
    /// use verity::StructBuilder;
    ///
    /// let checked = StructBuilder::new("User").field("name", "ada").private_field("salt", &1).build();
    /// let expected = StructBuilder::new("User").field("name", "ada").private_field("salt", &2).build();
    ///
    /// assert!(Check::that(checked.clone()).considering().public().fields().is_equal_to(expected.clone()).is_ok());
    /// assert!(Check::that(checked).considering().all().fields().is_equal_to(expected).is_err());
    /// ```
    pub fn considering(self) -> Considering<T> {
        Considering {
            check: self,
            filter: MemberFilter::default(),
            exclusions: Vec::new(),
        }
    }
}

/// Member selection for a structural comparison. Defaults to public fields.
#[derive(Clone, Debug)]
pub struct Considering<T> {
    check: FluentCheck<T>,
    filter: MemberFilter,
    exclusions: Vec<String>,
}

impl<T: Inspect> Considering<T> {
    pub fn public(mut self) -> Self {
        self.filter.visibility = VisibilityFilter::Public;
        self
    }

    pub fn non_public(mut self) -> Self {
        self.filter.visibility = VisibilityFilter::NonPublic;
        self
    }

    /// Members of any visibility.
    pub fn all(mut self) -> Self {
        self.filter.visibility = VisibilityFilter::All;
        self
    }

    pub fn fields(mut self) -> Self {
        self.filter.selection = MemberSelection::Fields;
        self
    }

    pub fn properties(mut self) -> Self {
        self.filter.selection = MemberSelection::Properties;
        self
    }

    pub fn fields_and_properties(mut self) -> Self {
        self.filter.selection = MemberSelection::All;
        self
    }

    /// Skip members by exact dotted path, e.g. `"address.zip"`.
    pub fn excluding<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn is_equal_to<E: Inspect>(self, expected: E) -> CheckResult<CheckLink<T>> {
        let Self {
            check,
            filter,
            exclusions,
        } = self;
        let options = CompareOptions::new(filter)
            .excluding(exclusions)
            .with_mode(check.config.equal_mode);
        let checked = check.checked();
        let expected = expected.inspect();

        let difference = first_difference(&checked, &expected, &options);
        if difference.is_some() {
            debug!(
                differences = all_differences(&checked, &expected, &options).len(),
                "members differ"
            );
        }

        check.decide(
            "considering().is_equal_to",
            difference.is_none(),
            |c| difference_message(c, difference.as_ref(), &checked, &expected),
            |c| {
                let template = format!(
                    "The {{0}} has the same {} as the {{1}} whereas it must not.",
                    describe_filter(&filter)
                );
                base_message(c, template, &checked, &expected)
                    .on(checked.clone())
                    .expected(expected.clone())
                    .comparison("different from")
            },
        )
    }

    pub fn is_not_equal_to<E: Inspect>(mut self, expected: E) -> CheckResult<CheckLink<T>> {
        self.check = self.check.not();
        self.is_equal_to(expected)
    }
}

/// "public fields", "fields and properties", ...
fn describe_filter(filter: &MemberFilter) -> String {
    let visibility = match filter.visibility {
        VisibilityFilter::Public => "public ",
        VisibilityFilter::NonPublic => "non public ",
        VisibilityFilter::All => "",
    };
    let selection = match filter.selection {
        MemberSelection::Fields => "fields",
        MemberSelection::Properties => "properties",
        MemberSelection::All => "fields and properties",
    };
    format!("{visibility}{selection}")
}

fn base_message<T>(
    check: &FluentCheck<T>,
    template: String,
    checked: &Value,
    expected: &Value,
) -> FluentMessage {
    let message = check.message(template);
    let message = if check.entity.is_none() {
        message.for_entity(DescribeKind::of(checked).entity_name())
    } else {
        message
    };
    message.for_expected_entity(DescribeKind::of(expected).entity_name())
}

fn difference_message<T>(
    check: &FluentCheck<T>,
    difference: Option<&FieldDifference>,
    checked: &Value,
    expected: &Value,
) -> FluentMessage {
    let Some(difference) = difference.filter(|d| !d.path.is_empty()) else {
        return base_message(check, "The {0} is different from the {1}.".into(), checked, expected)
            .on(checked.clone())
            .expected(expected.clone())
            .and();
    };
    let noun = difference.kind.noun();
    let path = &difference.path;
    let checked_label = format!("The {{0}}'s {noun} '{path}':");
    let expected_label = format!("The {{1}}'s {noun} '{path}':");

    match (&difference.checked, &difference.expected) {
        (Some(actual), Some(reference)) => base_message(
            check,
            format!("The {{0}}'s {noun} '{path}' does not have the expected value."),
            checked,
            expected,
        )
        .on(actual.clone())
        .label(checked_label)
        .expected(reference.clone())
        .label(expected_label)
        .and(),
        (None, Some(reference)) => base_message(
            check,
            format!("The {{0}} has no {noun} '{path}', whereas the {{1}} has one."),
            checked,
            expected,
        )
        .on(checked.clone())
        .expected(reference.clone())
        .label(expected_label)
        .and(),
        (Some(actual), None) => base_message(
            check,
            format!("The {{0}} has an extra {noun} '{path}', absent from the {{1}}."),
            checked,
            expected,
        )
        .on(actual.clone())
        .label(checked_label)
        .expected(expected.clone())
        .and(),
        (None, None) => base_message(check, "The {0} is different from the {1}.".into(), checked, expected)
            .on(checked.clone())
            .expected(expected.clone())
            .and(),
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::test_support::{failure_message, init_tracing};
    use verity_types::{Inspect, StructBuilder, Value};

    struct Account {
        owner: String,
        pin: u16,
        limits: Limits,
    }

    struct Limits {
        daily: u32,
    }

    impl Inspect for Limits {
        fn inspect(&self) -> Value {
            StructBuilder::new("Limits").field("daily", &self.daily).build()
        }
    }

    impl Inspect for Account {
        fn inspect(&self) -> Value {
            StructBuilder::new("Account")
                .field("owner", &self.owner)
                .private_field("pin", &self.pin)
                .property("Limits", &self.limits)
                .build()
        }
    }

    fn account(pin: u16, daily: u32) -> Account {
        Account {
            owner: "ada".into(),
            pin,
            limits: Limits { daily },
        }
    }

    #[test]
    fn private_fields_only_matter_when_selected() -> CheckResult<()> {
        Check::that(account(1, 10))
            .considering()
            .public()
            .fields()
            .is_equal_to(account(2, 10))?;

        assert_eq!(
            failure_message(
                Check::that(account(1, 10))
                    .considering()
                    .all()
                    .fields()
                    .is_equal_to(account(2, 10))
            ),
            "\nThe checked struct's field 'pin' does not have the expected value.\nThe checked struct's field 'pin':\n\t[1]\nThe expected struct's field 'pin':\n\t[2]"
        );
        Ok(())
    }

    #[test]
    fn nested_members_report_their_path() {
        init_tracing();
        let message = failure_message(
            Check::that(account(1, 10))
                .considering()
                .public()
                .fields_and_properties()
                .is_equal_to(account(1, 20)),
        );
        assert!(message.starts_with(
            "\nThe checked struct's field 'Limits.daily' does not have the expected value."
        ));
    }

    #[test]
    fn excluded_paths_are_skipped() -> CheckResult<()> {
        Check::that(account(1, 10))
            .considering()
            .all()
            .fields_and_properties()
            .excluding(["pin", "Limits.daily"])
            .is_equal_to(account(2, 20))?;
        Ok(())
    }

    #[test]
    fn missing_members_are_reported() {
        let checked = StructBuilder::new("S").field("a", &1).build();
        let expected = StructBuilder::new("S").field("a", &1).field("b", &2).build();
        let message = failure_message(Check::that(checked).considering().is_equal_to(expected));
        assert_eq!(
            message,
            "\nThe checked struct has no field 'b', whereas the expected one has one.\nThe checked struct:\n\t[S { a: 1 }]\nThe expected struct's field 'b':\n\t[2]"
        );
    }

    #[test]
    fn negated_comparison() -> CheckResult<()> {
        Check::that(account(1, 10))
            .considering()
            .all()
            .fields()
            .is_not_equal_to(account(2, 10))?;

        let message = failure_message(
            Check::that(account(1, 10))
                .considering()
                .public()
                .fields()
                .is_not_equal_to(account(2, 10)),
        );
        assert!(message.starts_with(
            "\nThe checked struct has the same public fields as the expected one whereas it must not."
        ));
        Ok(())
    }
}
