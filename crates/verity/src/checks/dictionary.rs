use std::collections::{BTreeMap, HashMap};

use verity_describe::values_equal;
use verity_types::{EqualMode, Inspect, Value};

use crate::check::{CheckLink, FluentCheck};
use crate::checks::elements;
use crate::error::CheckResult;

/// Key/value collections the dictionary checks accept.
pub trait Dictionary: Inspect {}

impl<K: Inspect, V: Inspect, S> Dictionary for HashMap<K, V, S> {}
impl<K: Inspect, V: Inspect> Dictionary for BTreeMap<K, V> {}
impl<D: Dictionary + ?Sized> Dictionary for &D {}

fn entries_of<D: Inspect>(dictionary: &D) -> Vec<(Value, Value)> {
    match dictionary.inspect() {
        Value::Map { entries, .. } => entries,
        _ => Vec::new(),
    }
}

fn lookup<'a>(entries: &'a [(Value, Value)], key: &Value, mode: EqualMode) -> Option<&'a Value> {
    entries
        .iter()
        .find(|(k, _)| values_equal(k, key, mode))
        .map(|(_, v)| v)
}

/// Checks on dictionaries.
pub trait DictionaryCheck<D: Dictionary>: Sized {
    fn contains_key<K: Inspect>(self, key: K) -> CheckResult<CheckLink<D>>;
    fn contains_value<V: Inspect>(self, value: V) -> CheckResult<CheckLink<D>>;
    /// `key` is present and maps to `value`.
    fn contains_pair<K: Inspect, V: Inspect>(self, key: K, value: V) -> CheckResult<CheckLink<D>>;
    fn has_size(self, size: usize) -> CheckResult<CheckLink<D>>;
    fn is_empty(self) -> CheckResult<CheckLink<D>>;
    fn is_not_empty(self) -> CheckResult<CheckLink<D>>;
}

impl<D: Dictionary> DictionaryCheck<D> for FluentCheck<D> {
    fn contains_key<K: Inspect>(self, key: K) -> CheckResult<CheckLink<D>> {
        let key = key.inspect();
        let passed = lookup(&entries_of(&self.value), &key, self.config.equal_mode).is_some();
        self.decide(
            "contains_key",
            passed,
            |c| {
                c.message("The {0} does not contain the expected key.")
                    .on(c.checked())
                    .expected(key.clone())
                    .label("The expected key:")
            },
            |c| {
                c.message("The {0} contains the given key whereas it must not.")
                    .on(c.checked())
                    .expected(key.clone())
                    .label("The forbidden key:")
            },
        )
    }

    fn contains_value<V: Inspect>(self, value: V) -> CheckResult<CheckLink<D>> {
        let value = value.inspect();
        let mode = self.config.equal_mode;
        let passed = entries_of(&self.value)
            .iter()
            .any(|(_, v)| values_equal(v, &value, mode));
        self.decide(
            "contains_value",
            passed,
            |c| {
                c.message("The {0} does not contain the expected value.")
                    .on(c.checked())
                    .expected(value.clone())
                    .label("The expected value:")
            },
            |c| {
                c.message("The {0} contains the given value whereas it must not.")
                    .on(c.checked())
                    .expected(value.clone())
                    .label("The forbidden value:")
            },
        )
    }

    fn contains_pair<K: Inspect, V: Inspect>(self, key: K, value: V) -> CheckResult<CheckLink<D>> {
        let (key, value) = (key.inspect(), value.inspect());
        let mode = self.config.equal_mode;
        let entries = entries_of(&self.value);
        let found = lookup(&entries, &key, mode);
        let passed = found.is_some_and(|v| values_equal(v, &value, mode));
        let template = if found.is_some() {
            "The {0} does not have the expected value for the given key."
        } else {
            "The {0} does not contain the expected key."
        };
        let pair = Value::Map {
            type_name: "pair".into(),
            entries: vec![(key, value)],
        };

        self.decide(
            "contains_pair",
            passed,
            |c| {
                c.message(template)
                    .on(c.checked())
                    .expected(pair.clone())
                    .label("The expected key-value pair:")
            },
            |c| {
                c.message("The {0} contains the given key-value pair whereas it must not.")
                    .on(c.checked())
                    .expected(pair.clone())
                    .label("The forbidden key-value pair:")
            },
        )
    }

    fn has_size(self, size: usize) -> CheckResult<CheckLink<D>> {
        let actual = entries_of(&self.value).len();
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

    fn is_empty(self) -> CheckResult<CheckLink<D>> {
        let passed = entries_of(&self.value).is_empty();
        self.decide(
            "is_empty",
            passed,
            |c| c.message("The {0} is not empty.").on(c.checked()),
            |c| c.message("The {0} is empty whereas it must not.").on(c.checked()),
        )
    }

    fn is_not_empty(self) -> CheckResult<CheckLink<D>> {
        DictionaryCheck::is_empty(self.not())
    }
}
