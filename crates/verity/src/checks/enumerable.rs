//! Checks on collections.

use std::collections::{BTreeSet, HashSet, VecDeque};

use verity_describe::describe;
use verity_diff::{
    exact_mismatch, first_order_break, missing_items, occurrences, order_violation,
    unexpected_items, SequenceMismatch, SortOrder,
};
use verity_types::{Inspect, Value};

use crate::check::{CheckLink, FluentCheck, WhichLink};
use crate::checks::elements;
use crate::error::{CheckError, CheckResult};

/// Collections the enumerable checks accept.
///
/// Checks read the inspected items; [`WhichLink::which`] moves the selected
/// item out through `IntoIterator`.
pub trait Enumerable: Inspect + IntoIterator<Item: Inspect> {}

impl<T: Inspect> Enumerable for Vec<T> {}
impl<T: Inspect> Enumerable for VecDeque<T> {}
impl<T: Inspect, const N: usize> Enumerable for [T; N] {}
impl<T: Inspect> Enumerable for BTreeSet<T> {}
impl<T: Inspect, S> Enumerable for HashSet<T, S> {}
impl<T: Inspect> Enumerable for &[T] {}
impl<T: Inspect> Enumerable for &Vec<T> {}

fn items_of<C: Inspect>(collection: &C) -> Vec<Value> {
    collection
        .inspect()
        .items()
        .map(<[Value]>::to_vec)
        .unwrap_or_default()
}

fn listed(items: &[Value]) -> Value {
    Value::seq("values", items.to_vec())
}

/// Checks on collections.
pub trait EnumerableCheck<C: Enumerable>: Sized {
    fn has_size(self, size: usize) -> CheckResult<CheckLink<C>>;
    fn is_empty(self) -> CheckResult<CheckLink<C>>;
    fn is_not_empty(self) -> CheckResult<CheckLink<C>>;

    /// Every expected value is present, in any order. Refine with
    /// [`ContainsLink::once`], [`ContainsLink::only`] or
    /// [`ContainsLink::in_that_order`].
    fn contains<I>(self, expected: I) -> CheckResult<ContainsLink<C>>
    where
        I: IntoIterator,
        I::Item: Inspect;

    /// Same values in the same order, nothing else.
    fn contains_exactly<I>(self, expected: I) -> CheckResult<CheckLink<C>>
    where
        I: IntoIterator,
        I::Item: Inspect;

    /// Every item is one of `allowed`.
    fn is_only_made_of<I>(self, allowed: I) -> CheckResult<CheckLink<C>>
    where
        I: IntoIterator,
        I::Item: Inspect;

    fn is_in_ascending_order(self) -> CheckResult<CheckLink<C>>;
    fn is_in_descending_order(self) -> CheckResult<CheckLink<C>>;

    /// There is an item at `index`; `which()` checks it.
    fn has_element_at(self, index: usize) -> CheckResult<WhichLink<C, C::Item>>;
    fn has_first_element(self) -> CheckResult<WhichLink<C, C::Item>>;
    fn has_last_element(self) -> CheckResult<WhichLink<C, C::Item>>;
}

impl<C: Enumerable> EnumerableCheck<C> for FluentCheck<C> {
    fn has_size(self, size: usize) -> CheckResult<CheckLink<C>> {
        let actual = items_of(&self.value).len();
        self.decide(
            "has_size",
            actual == size,
            |c| {
                c.message(format!("The {{0}} has {} instead of {size}.", elements(actual)))
                    .on(c.checked())
            },
            |c| {
                c.message(format!("The {{0}} has {} whereas it must not.", elements(size)))
                    .on(c.checked())
            },
        )
    }

    fn is_empty(self) -> CheckResult<CheckLink<C>> {
        let passed = items_of(&self.value).is_empty();
        self.decide(
            "is_empty",
            passed,
            |c| c.message("The {0} is not empty.").on(c.checked()),
            |c| c.message("The {0} is empty whereas it must not.").on(c.checked()),
        )
    }

    fn is_not_empty(self) -> CheckResult<CheckLink<C>> {
        EnumerableCheck::is_empty(self.not())
    }

    fn contains<I>(self, expected: I) -> CheckResult<ContainsLink<C>>
    where
        I: IntoIterator,
        I::Item: Inspect,
    {
        let expected: Vec<Value> = expected.into_iter().map(|v| v.inspect()).collect();
        let missing = missing_items(&items_of(&self.value), &expected, self.config.equal_mode);
        let negated = self.negated;

        let link = self.decide(
            "contains",
            missing.is_empty(),
            |c| {
                c.message("The {0} does not contain the expected value(s).")
                    .on(c.checked())
                    .expected_values(listed(&expected))
                    .with_given_value(listed(&missing))
                    .label("The missing value(s):")
            },
            |c| {
                c.message("The {0} contains all the given value(s) whereas it must not.")
                    .on(c.checked())
                    .expected_values(listed(&expected))
            },
        )?;
        Ok(ContainsLink {
            link,
            expected,
            negated,
        })
    }

    fn contains_exactly<I>(self, expected: I) -> CheckResult<CheckLink<C>>
    where
        I: IntoIterator,
        I::Item: Inspect,
    {
        let expected: Vec<Value> = expected.into_iter().map(|v| v.inspect()).collect();
        let mismatch = exact_mismatch(&items_of(&self.value), &expected, self.config.equal_mode);
        let detail = match &mismatch {
            Some(SequenceMismatch::ItemDifference { index, .. }) => {
                format!("There are differences starting from index #{index}.")
            }
            Some(SequenceMismatch::MissingItems { index, .. }) => {
                format!("Elements are missing starting from index #{index}.")
            }
            Some(SequenceMismatch::ExtraItems { index, .. }) => {
                format!("There are extra elements starting from index #{index}.")
            }
            None => String::new(),
        };

        self.decide(
            "contains_exactly",
            mismatch.is_none(),
            |c| {
                c.message(format!(
                    "The {{0}} does not contain exactly the expected value(s). {detail}"
                ))
                .on(c.checked())
                .with_enumerable_count()
                .expected(listed(&expected))
                .with_enumerable_count()
            },
            |c| {
                c.message("The {0} contains exactly the given value(s) whereas it must not.")
                    .on(c.checked())
                    .expected(listed(&expected))
                    .comparison("different from")
            },
        )
    }

    fn is_only_made_of<I>(self, allowed: I) -> CheckResult<CheckLink<C>>
    where
        I: IntoIterator,
        I::Item: Inspect,
    {
        let allowed: Vec<Value> = allowed.into_iter().map(|v| v.inspect()).collect();
        let unexpected = unexpected_items(&items_of(&self.value), &allowed, self.config.equal_mode);

        self.decide(
            "is_only_made_of",
            unexpected.is_empty(),
            |c| only_message(c, &allowed, &unexpected),
            |c| {
                c.message("The {0} contains only the given value(s) whereas it must not.")
                    .on(c.checked())
                    .expected_values(listed(&allowed))
            },
        )
    }

    fn is_in_ascending_order(self) -> CheckResult<CheckLink<C>> {
        ordered(self, SortOrder::Ascending)
    }

    fn is_in_descending_order(self) -> CheckResult<CheckLink<C>> {
        ordered(self, SortOrder::Descending)
    }

    fn has_element_at(self, index: usize) -> CheckResult<WhichLink<C, C::Item>> {
        let passed = index < items_of(&self.value).len();
        let link = self.decide(
            "has_element_at",
            passed,
            |c| {
                c.message(format!("The {{0}} does not have an element at index #{index}."))
                    .on(c.checked())
                    .with_enumerable_count()
            },
            |c| {
                c.message(format!(
                    "The {{0}} has an element at index #{index} whereas it must not."
                ))
                .on(c.checked())
                .with_enumerable_count()
            },
        )?;
        Ok(WhichLink::new(link, |c: C, i| c.into_iter().nth(i), index))
    }

    fn has_first_element(self) -> CheckResult<WhichLink<C, C::Item>> {
        let passed = !items_of(&self.value).is_empty();
        let link = self.decide(
            "has_first_element",
            passed,
            |c| {
                c.message("The {0} is empty, whereas it must have a first element.")
                    .on(c.checked())
            },
            |c| {
                c.message("The {0} has a first element whereas it must not.")
                    .on(c.checked())
            },
        )?;
        Ok(WhichLink::new(link, |c: C, _| c.into_iter().next(), 0))
    }

    fn has_last_element(self) -> CheckResult<WhichLink<C, C::Item>> {
        let passed = !items_of(&self.value).is_empty();
        let link = self.decide(
            "has_last_element",
            passed,
            |c| {
                c.message("The {0} is empty, whereas it must have a last element.")
                    .on(c.checked())
            },
            |c| {
                c.message("The {0} has a last element whereas it must not.")
                    .on(c.checked())
            },
        )?;
        Ok(WhichLink::new(link, |c: C, _| c.into_iter().last(), 0))
    }
}

fn only_message<C: Inspect>(
    check: &FluentCheck<C>,
    allowed: &[Value],
    unexpected: &[Value],
) -> verity_message::FluentMessage {
    check
        .message("The {0} does not contain only the given value(s).")
        .on(check.checked())
        .expected_values(listed(allowed))
        .with_given_value(listed(unexpected))
        .label("The unexpected value(s):")
        .and()
}

fn ordered<C: Enumerable>(check: FluentCheck<C>, order: SortOrder) -> CheckResult<CheckLink<C>> {
    let found = first_order_break(&items_of(&check.value), order);
    let name = order.name();
    check.decide(
        match order {
            SortOrder::Ascending => "is_in_ascending_order",
            SortOrder::Descending => "is_in_descending_order",
        },
        found.is_none(),
        |c| {
            let options = c.describe_options();
            let template = match &found {
                Some(found) => format!(
                    "The {{0}} is not in {name} order, as {} at index #{} is {} than {} at index #{}.",
                    describe(&found.item, &options),
                    found.index,
                    match order {
                        SortOrder::Ascending => "greater",
                        SortOrder::Descending => "less",
                    },
                    describe(&found.next, &options),
                    found.index + 1,
                ),
                None => format!("The {{0}} is not in {name} order."),
            };
            c.message(template).on(c.checked())
        },
        |c| {
            c.message(format!("The {{0}} is in {name} order whereas it must not."))
                .on(c.checked())
        },
    )
}

// ---------------------------------------------------------------------------
// ContainsLink
// ---------------------------------------------------------------------------

/// A passing `contains`, which can be refined further.
#[derive(Clone, Debug)]
pub struct ContainsLink<C> {
    link: CheckLink<C>,
    expected: Vec<Value>,
    negated: bool,
}

impl<C: Enumerable> ContainsLink<C> {
    pub fn and(self) -> FluentCheck<C> {
        self.link.and()
    }

    /// Each expected value appears exactly once.
    pub fn once(self) -> CheckResult<CheckLink<C>> {
        let (check, expected) = self.refine("once")?;
        let items = items_of(&check.value);
        let mode = check.config.equal_mode;
        let repeated: Vec<Value> = expected
            .iter()
            .filter(|e| occurrences(&items, e, mode) > 1)
            .cloned()
            .collect();

        check.require("once", repeated.is_empty(), |c| {
            c.message("The {0} contains some of the expected value(s) more than once.")
                .on(c.checked())
                .expected_values(listed(&expected))
                .with_given_value(listed(&repeated))
                .label("The repeated value(s):")
        })
    }

    /// No value other than the expected ones is present.
    pub fn only(self) -> CheckResult<CheckLink<C>> {
        let (check, expected) = self.refine("only")?;
        let unexpected = unexpected_items(&items_of(&check.value), &expected, check.config.equal_mode);
        check.require("only", unexpected.is_empty(), |c| {
            only_message(c, &expected, &unexpected)
        })
    }

    /// The expected values appear in the given relative order.
    pub fn in_that_order(self) -> CheckResult<CheckLink<C>> {
        let (check, expected) = self.refine("in_that_order")?;
        let violation = order_violation(&items_of(&check.value), &expected, check.config.equal_mode);
        check.require("in_that_order", violation.is_none(), |c| {
            let options = c.describe_options();
            let detail = violation
                .as_ref()
                .map(|v| {
                    format!(
                        " Item {} at index #{} should be before item {}.",
                        describe(&v.item, &options),
                        v.index,
                        describe(&v.should_follow, &options),
                    )
                })
                .unwrap_or_default();
            c.message(format!("The {{0}} does not follow the expected order.{detail}"))
                .on(c.checked())
                .expected_values(listed(&expected))
        })
    }

    fn refine(self, name: &str) -> CheckResult<(FluentCheck<C>, Vec<Value>)> {
        if self.negated {
            return Err(CheckError::InvalidOperation(format!(
                "{name}() cannot refine a negated contains()"
            )));
        }
        Ok((self.link.and(), self.expected))
    }
}
