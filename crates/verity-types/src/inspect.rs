use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::member::{MemberKind, StructBuilder, Visibility};
use crate::value::Value;

/// Conversion of a Rust value into an inspectable [`Value`] tree.
///
/// This is the seam every check goes through: describers, differs and the
/// structural comparer only ever see `Value`s. Implement it by hand with
/// [`StructBuilder`] to expose private fields or computed properties, or
/// wrap any `Serialize` type in [`Serialized`].
///
/// `Option` and `Result` have inherent `inspect` methods taking a closure,
/// which shadow this one on concrete values: call `Inspect::inspect(&x)`
/// there.
pub trait Inspect {
    /// Produce the inspectable representation of `self`.
    fn inspect(&self) -> Value;

    /// Short, module-less name of the runtime type (e.g. `Vec<String>`).
    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Strip module paths from a fully-qualified type name.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(last_path_segment(&segment));
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

// ---------------------------------------------------------------------------
// Pointers and wrappers
// ---------------------------------------------------------------------------

macro_rules! inspect_through_deref {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $wrapper<T> {
                fn inspect(&self) -> Value {
                    (**self).inspect()
                }

                fn type_name(&self) -> String {
                    (**self).type_name()
                }
            }
        )*
    };
}

inspect_through_deref!(Box, Rc, Arc);

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }

    fn type_name(&self) -> String {
        (**self).type_name()
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }

    fn type_name(&self) -> String {
        (**self).type_name()
    }
}

impl Inspect for Value {
    fn inspect(&self) -> Value {
        self.clone()
    }

    fn type_name(&self) -> String {
        match self.type_name() {
            Some(name) => name.to_string(),
            None => scalar_kind_name(self).to_string(),
        }
    }
}

fn scalar_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "i128",
        Value::UInt(_) => "u128",
        Value::Float(_) => "f64",
        Value::Char(_) => "char",
        Value::Str(_) => "String",
        _ => "Value",
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

macro_rules! inspect_signed {
    ($($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn inspect(&self) -> Value {
                    Value::Int(*self as i128)
                }
            }
        )*
    };
}

macro_rules! inspect_unsigned {
    ($($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn inspect(&self) -> Value {
                    Value::UInt(*self as u128)
                }
            }
        )*
    };
}

inspect_signed!(i8, i16, i32, i64, i128, isize);
inspect_unsigned!(u8, u16, u32, u64, u128, usize);

impl Inspect for f64 {
    fn inspect(&self) -> Value {
        Value::Float(*self)
    }
}

impl Inspect for f32 {
    fn inspect(&self) -> Value {
        // Widening through the shortest decimal keeps 0.1f32 rendering as 0.1.
        Value::Float(self.to_string().parse().unwrap_or(f64::from(*self)))
    }
}

impl Inspect for bool {
    fn inspect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Inspect for char {
    fn inspect(&self) -> Value {
        Value::Char(*self)
    }
}

impl Inspect for str {
    fn inspect(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Inspect for Cow<'_, str> {
    fn inspect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Inspect for () {
    fn inspect(&self) -> Value {
        Value::opaque("()", "()")
    }
}

impl Inspect for Duration {
    fn inspect(&self) -> Value {
        Value::opaque("Duration", format!("{self:?}"))
    }
}

// ---------------------------------------------------------------------------
// Option / Result
// ---------------------------------------------------------------------------

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        match self {
            Some(v) => v.inspect(),
            None => Value::Null,
        }
    }
}

impl<T: Inspect, E: Inspect> Inspect for Result<T, E> {
    fn inspect(&self) -> Value {
        let (variant, payload) = match self {
            Ok(v) => ("Ok", v.inspect()),
            Err(e) => ("Err", e.inspect()),
        };
        Value::Enum {
            type_name: Inspect::type_name(self),
            variant: variant.into(),
            payload: Some(Box::new(payload)),
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

fn inspect_items<'a, T, I>(type_name: String, items: I) -> Value
where
    T: Inspect + 'a,
    I: IntoIterator<Item = &'a T>,
{
    Value::seq(type_name, items.into_iter().map(Inspect::inspect).collect())
}

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self) -> Value {
        inspect_items(Inspect::type_name(self), self)
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value {
        inspect_items(Inspect::type_name(self), self)
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        inspect_items(Inspect::type_name(self), self)
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self) -> Value {
        inspect_items(Inspect::type_name(self), self)
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self) -> Value {
        inspect_items(Inspect::type_name(self), self)
    }
}

// Hash collections iterate in a per-instance order; their items and entries
// are sorted so equal collections inspect to equal trees.
impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn inspect(&self) -> Value {
        let mut items: Vec<Value> = self.iter().map(Inspect::inspect).collect();
        items.sort_by(canonical_order);
        Value::seq(Inspect::type_name(self), items)
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Value {
        Value::Map {
            type_name: Inspect::type_name(self),
            entries: self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect(),
        }
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Value {
        let mut entries: Vec<(Value, Value)> =
            self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect();
        entries.sort_by(|(a, _), (b, _)| canonical_order(a, b));
        Value::Map {
            type_name: Inspect::type_name(self),
            entries,
        }
    }
}

/// Total order used to lay out unordered collections: natural order for
/// scalars of the same kind, canonical JSON text otherwise.
fn canonical_order(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::UInt(x), Value::UInt(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Char(x), Value::Char(y)) => x.cmp(y),
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        _ => canonical_text(a).cmp(&canonical_text(b)),
    }
}

fn canonical_text(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

impl<A: Inspect, B: Inspect> Inspect for (A, B) {
    fn inspect(&self) -> Value {
        Value::seq(
            Inspect::type_name(self),
            vec![self.0.inspect(), self.1.inspect()],
        )
    }
}

impl<A: Inspect, B: Inspect, C: Inspect> Inspect for (A, B, C) {
    fn inspect(&self) -> Value {
        Value::seq(
            Inspect::type_name(self),
            vec![self.0.inspect(), self.1.inspect(), self.2.inspect()],
        )
    }
}

// ---------------------------------------------------------------------------
// serde bridge
// ---------------------------------------------------------------------------

impl Inspect for serde_json::Value {
    fn inspect(&self) -> Value {
        from_json(self, "Object")
    }

    fn type_name(&self) -> String {
        "Value".to_string()
    }
}

fn from_json(json: &serde_json::Value, object_name: &str) -> Value {
    use serde_json::Value as Json;

    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u128::from(u))
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) => Value::seq(
            "Array",
            items.iter().map(|item| from_json(item, "Object")).collect(),
        ),
        Json::Object(map) => map
            .iter()
            .fold(StructBuilder::new(object_name), |builder, (key, value)| {
                builder.member(
                    key,
                    MemberKind::Field,
                    Visibility::Public,
                    from_json(value, "Object"),
                )
            })
            .build(),
    }
}

/// Inspect any `Serialize` value through its JSON form.
///
/// Serialized fields become public fields; the root object is named after
/// the Rust type. Serialization failures yield an opaque value carrying
/// the error text.
pub fn inspect_serialized<T: Serialize + ?Sized>(value: &T) -> Value {
    let type_name = short_type_name(std::any::type_name::<T>());
    match serde_json::to_value(value) {
        Ok(json) => from_json(&json, &type_name),
        Err(e) => Value::opaque(type_name, format!("<unserializable: {e}>")),
    }
}

/// Wrapper inspecting its content through `serde`.
#[derive(Clone, Debug, PartialEq)]
pub struct Serialized<T>(pub T);

impl<T: Serialize> Inspect for Serialized<T> {
    fn inspect(&self) -> Value {
        inspect_serialized(&self.0)
    }

    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<T>())
    }
}

/// Wrapper inspecting its content through its `Debug` rendering.
#[derive(Clone, PartialEq)]
pub struct Debugged<T>(pub T);

impl<T: fmt::Debug> Inspect for Debugged<T> {
    fn inspect(&self) -> Value {
        Value::opaque(
            short_type_name(std::any::type_name::<T>()),
            format!("{:?}", self.0),
        )
    }

    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<T>())
    }
}

impl<T: fmt::Debug> fmt::Debug for Debugged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
