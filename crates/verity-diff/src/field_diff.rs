//! Member-level diff: walk two inspected structures in lock-step.
//!
//! Members are selected by a [`MemberFilter`]; nested structures and
//! sequences are descended into with dotted / indexed paths. Excluded paths
//! skip the whole subtree.
//!
//! `Value` is an owned tree, so the walk itself cannot loop. Cycles in the
//! inspected Rust graph (`Rc` back-references) must be broken by the
//! `Inspect` impl; nothing here detects them.

use std::ops::ControlFlow;

use tracing::trace;
use verity_describe::values_equal;
use verity_types::{EqualMode, MemberFilter, MemberKind, Value};

/// Options of a structural comparison.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompareOptions {
    /// Members taken into account.
    pub filter: MemberFilter,
    /// Exact member paths (e.g. `"inner.secret"`) to skip.
    pub exclusions: Vec<String>,
    /// Equality applied to leaf values.
    pub mode: EqualMode,
}

impl CompareOptions {
    pub fn new(filter: MemberFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Add excluded paths.
    pub fn excluding<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_mode(mut self, mode: EqualMode) -> Self {
        self.mode = mode;
        self
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclusions.iter().any(|p| p == path)
    }
}

/// Which side of the comparison a member is missing from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Checked,
    Expected,
}

/// A single differing member.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDifference {
    /// Dotted member path; sequence items appear as `path[i]`.
    pub path: String,
    pub kind: MemberKind,
    /// Value on the checked side, `None` if the member is missing there.
    pub checked: Option<Value>,
    /// Value on the expected side, `None` if the member is missing there.
    pub expected: Option<Value>,
}

impl FieldDifference {
    /// The side lacking the member, if any.
    pub fn missing_side(&self) -> Option<Side> {
        match (&self.checked, &self.expected) {
            (None, _) => Some(Side::Checked),
            (_, None) => Some(Side::Expected),
            _ => None,
        }
    }
}

/// First member of `checked` differing from `expected`, or `None` when
/// every selected member matches.
pub fn first_difference(
    checked: &Value,
    expected: &Value,
    options: &CompareOptions,
) -> Option<FieldDifference> {
    let mut walker = Walker {
        options,
        stop_at_first: true,
        found: Vec::new(),
    };
    let _ = walker.walk(checked, expected, "", MemberKind::Field);
    walker.found.into_iter().next()
}

/// Every differing member, in walk order.
pub fn all_differences(
    checked: &Value,
    expected: &Value,
    options: &CompareOptions,
) -> Vec<FieldDifference> {
    let mut walker = Walker {
        options,
        stop_at_first: false,
        found: Vec::new(),
    };
    let _ = walker.walk(checked, expected, "", MemberKind::Field);
    walker.found
}

struct Walker<'a> {
    options: &'a CompareOptions,
    stop_at_first: bool,
    found: Vec<FieldDifference>,
}

impl Walker<'_> {
    fn report(&mut self, difference: FieldDifference) -> ControlFlow<()> {
        trace!(path = %difference.path, "member differs");
        self.found.push(difference);
        if self.stop_at_first {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn walk(
        &mut self,
        checked: &Value,
        expected: &Value,
        path: &str,
        kind: MemberKind,
    ) -> ControlFlow<()> {
        match (checked, expected) {
            (Value::Struct { .. }, Value::Struct { .. }) => {
                self.walk_members(checked, expected, path)
            }
            (Value::Seq { items: xs, .. }, Value::Seq { items: ys, .. }) if xs.len() == ys.len() => {
                for (index, (x, y)) in xs.iter().zip(ys).enumerate() {
                    self.walk(x, y, &format!("{path}[{index}]"), kind)?;
                }
                ControlFlow::Continue(())
            }
            _ if values_equal(checked, expected, self.options.mode) => ControlFlow::Continue(()),
            _ => self.report(FieldDifference {
                path: path.to_string(),
                kind,
                checked: Some(checked.clone()),
                expected: Some(expected.clone()),
            }),
        }
    }

    fn walk_members(&mut self, checked: &Value, expected: &Value, path: &str) -> ControlFlow<()> {
        let options = self.options;
        let filter = &options.filter;

        for member in expected.filtered_members(filter) {
            let member_path = join(path, &member.name);
            if options.is_excluded(&member_path) {
                trace!(path = %member_path, "member excluded");
                continue;
            }
            match checked
                .filtered_members(filter)
                .find(|m| m.name == member.name)
            {
                Some(counterpart) => {
                    self.walk(&counterpart.value, &member.value, &member_path, member.kind)?
                }
                None => self.report(FieldDifference {
                    path: member_path,
                    kind: member.kind,
                    checked: None,
                    expected: Some(member.value.clone()),
                })?,
            }
        }

        for member in checked.filtered_members(filter) {
            let member_path = join(path, &member.name);
            if options.is_excluded(&member_path) {
                continue;
            }
            if !expected.filtered_members(filter).any(|m| m.name == member.name) {
                self.report(FieldDifference {
                    path: member_path,
                    kind: member.kind,
                    checked: Some(member.value.clone()),
                    expected: None,
                })?;
            }
        }
        ControlFlow::Continue(())
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}
