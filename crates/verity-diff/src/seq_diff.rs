//! Sequence-level diff: content and ordering of collections.
//!
//! Works on inspected items so that any collection type (vectors, arrays,
//! sets, deques) is handled the same way. Indices are 0-based.

use std::cmp::Ordering;

use verity_describe::values_equal;
use verity_types::{EqualMode, Value};

/// Expected ordering of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Adjective used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// Two neighbours out of the requested order: `items[index]` and
/// `items[index + 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderBreak {
    pub index: usize,
    pub item: Value,
    pub next: Value,
}

/// An item found before another item it should follow.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderViolation {
    /// Index of the misplaced item in the checked sequence.
    pub index: usize,
    pub item: Value,
    /// Expected item that was already seen although it should come later.
    pub should_follow: Value,
}

/// How a checked sequence departs from an exact expected sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum SequenceMismatch {
    /// Items differ at `index`.
    ItemDifference {
        index: usize,
        checked: Value,
        expected: Value,
    },
    /// The checked sequence stops at `index`; `missing` are the expected
    /// items left over.
    MissingItems { index: usize, missing: Vec<Value> },
    /// The checked sequence continues past the expected one from `index`.
    ExtraItems { index: usize, extra: Vec<Value> },
}

/// Natural ordering between two scalar values, if they are comparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::UInt(x), Value::UInt(y)) => Some(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Char(x), Value::Char(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => None,
        },
    }
}

/// First pair of neighbours breaking `order`. Incomparable neighbours are
/// skipped.
pub fn first_order_break(items: &[Value], order: SortOrder) -> Option<OrderBreak> {
    let wrong = match order {
        SortOrder::Ascending => Ordering::Greater,
        SortOrder::Descending => Ordering::Less,
    };
    items
        .windows(2)
        .position(|pair| compare_values(&pair[0], &pair[1]) == Some(wrong))
        .map(|index| OrderBreak {
            index,
            item: items[index].clone(),
            next: items[index + 1].clone(),
        })
}

/// Number of items equal to `value`.
pub fn occurrences(items: &[Value], value: &Value, mode: EqualMode) -> usize {
    items
        .iter()
        .filter(|item| values_equal(item, value, mode))
        .count()
}

/// Expected items that do not appear in `checked`.
pub fn missing_items(checked: &[Value], expected: &[Value], mode: EqualMode) -> Vec<Value> {
    expected
        .iter()
        .filter(|e| !checked.iter().any(|c| values_equal(c, e, mode)))
        .cloned()
        .collect()
}

/// Checked items that are not in `allowed`.
pub fn unexpected_items(checked: &[Value], allowed: &[Value], mode: EqualMode) -> Vec<Value> {
    checked
        .iter()
        .filter(|c| !allowed.iter().any(|a| values_equal(c, a, mode)))
        .cloned()
        .collect()
}

/// First departure of `checked` from exactly `expected`, item by item.
pub fn exact_mismatch(
    checked: &[Value],
    expected: &[Value],
    mode: EqualMode,
) -> Option<SequenceMismatch> {
    if let Some(index) = checked
        .iter()
        .zip(expected)
        .position(|(c, e)| !values_equal(c, e, mode))
    {
        return Some(SequenceMismatch::ItemDifference {
            index,
            checked: checked[index].clone(),
            expected: expected[index].clone(),
        });
    }
    match checked.len().cmp(&expected.len()) {
        Ordering::Less => Some(SequenceMismatch::MissingItems {
            index: checked.len(),
            missing: expected[checked.len()..].to_vec(),
        }),
        Ordering::Greater => Some(SequenceMismatch::ExtraItems {
            index: expected.len(),
            extra: checked[expected.len()..].to_vec(),
        }),
        Ordering::Equal => None,
    }
}

/// First checked item appearing after an expected item it should precede.
///
/// Items absent from `expected` are ignored; repeated items are allowed.
pub fn order_violation(
    checked: &[Value],
    expected: &[Value],
    mode: EqualMode,
) -> Option<OrderViolation> {
    let mut cursor = 0;
    for (index, item) in checked.iter().enumerate() {
        let ahead = expected[cursor..]
            .iter()
            .position(|e| values_equal(item, e, mode))
            .map(|k| k + cursor);
        match ahead {
            Some(k) => cursor = k,
            None => {
                if expected[..cursor].iter().any(|e| values_equal(item, e, mode)) {
                    return Some(OrderViolation {
                        index,
                        item: item.clone(),
                        should_follow: expected[cursor].clone(),
                    });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_types::Inspect;

    fn items<T: Inspect>(values: &[T]) -> Vec<Value> {
        values.iter().map(Inspect::inspect).collect()
    }

    const MODE: EqualMode = EqualMode::FluentEquals;

    #[test]
    fn ordering_breaks_are_located() {
        assert_eq!(first_order_break(&items(&[1, 2, 3]), SortOrder::Ascending), None);
        let found = first_order_break(&items(&[1, 3, 2, 4]), SortOrder::Ascending).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.item, Value::Int(3));
        assert_eq!(found.next, Value::Int(2));

        assert_eq!(first_order_break(&items(&[3, 3, 1]), SortOrder::Descending), None);
        let found = first_order_break(&items(&["c", "a", "b"]), SortOrder::Descending).unwrap();
        assert_eq!(found.index, 1);
    }

    #[test]
    fn mixed_numbers_compare() {
        assert_eq!(
            compare_values(&Value::Int(1), &Value::Float(1.5)),
            Some(Ordering::Less)
        );
        assert_eq!(compare_values(&Value::Int(1), &Value::Str("a".into())), None);
    }

    #[test]
    fn content_membership() {
        let checked = items(&[1, 2, 3]);
        assert!(missing_items(&checked, &items(&[3, 1]), MODE).is_empty());
        assert_eq!(missing_items(&checked, &items(&[1, 4]), MODE), items(&[4]));
        assert_eq!(unexpected_items(&checked, &items(&[1, 2]), MODE), items(&[3]));
        assert_eq!(occurrences(&items(&[1, 2, 1]), &Value::Int(1), MODE), 2);
    }

    #[test]
    fn exact_sequences() {
        let checked = items(&[1, 2, 3]);
        assert_eq!(exact_mismatch(&checked, &items(&[1, 2, 3]), MODE), None);
        assert_eq!(
            exact_mismatch(&checked, &items(&[1, 3, 2]), MODE),
            Some(SequenceMismatch::ItemDifference {
                index: 1,
                checked: Value::Int(2),
                expected: Value::Int(3),
            })
        );
        assert_eq!(
            exact_mismatch(&checked, &items(&[1, 2, 3, 4]), MODE),
            Some(SequenceMismatch::MissingItems {
                index: 3,
                missing: items(&[4]),
            })
        );
        assert_eq!(
            exact_mismatch(&checked, &items(&[1]), MODE),
            Some(SequenceMismatch::ExtraItems {
                index: 1,
                extra: items(&[2, 3]),
            })
        );
    }

    #[test]
    fn relative_order() {
        let expected = items(&[1, 2, 3]);
        assert_eq!(order_violation(&items(&[1, 1, 5, 2, 3]), &expected, MODE), None);

        let violation = order_violation(&items(&[1, 3, 2]), &expected, MODE).unwrap();
        assert_eq!(violation.index, 2);
        assert_eq!(violation.item, Value::Int(2));
        assert_eq!(violation.should_follow, Value::Int(3));
    }

    #[test]
    fn relative_order_with_repeated_expected_items() {
        let expected = items(&[1, 2, 1]);
        assert_eq!(order_violation(&items(&[1, 2, 1]), &expected, MODE), None);
    }
}
