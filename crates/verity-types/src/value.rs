use serde::{Deserialize, Serialize};

use crate::member::{Member, MemberFilter};

/// An owned, inspectable representation of a checked or expected value.
///
/// Every value a check reasons about is first converted into a `Value`
/// through [`Inspect`](crate::Inspect). The tree is closed: scalars,
/// sequences, maps, enums, structs with named members, and an opaque
/// fallback carrying pre-rendered text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Value {
    /// Absence of a value (`None`, JSON `null`).
    Null,
    Bool(bool),
    /// Any signed integer, widened.
    Int(i128),
    /// Any unsigned integer, widened.
    UInt(u128),
    Float(f64),
    Char(char),
    Str(String),
    /// An enum variant, with an optional payload.
    Enum {
        type_name: String,
        variant: String,
        payload: Option<Box<Value>>,
    },
    /// An ordered sequence of items.
    Seq { type_name: String, items: Vec<Value> },
    /// Key/value entries, in iteration order.
    Map {
        type_name: String,
        entries: Vec<(Value, Value)>,
    },
    /// A structure with named members.
    ///
    /// `display` overrides the default rendering, the same way a type's
    /// `Display` impl would.
    Struct {
        type_name: String,
        members: Vec<Member>,
        display: Option<String>,
    },
    /// A value only known through its textual rendering.
    Opaque { type_name: String, text: String },
}

impl Value {
    /// Build a sequence value.
    pub fn seq(type_name: impl Into<String>, items: Vec<Value>) -> Self {
        Self::Seq {
            type_name: type_name.into(),
            items,
        }
    }

    /// Build an opaque value from its text.
    pub fn opaque(type_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Opaque {
            type_name: type_name.into(),
            text: text.into(),
        }
    }

    /// Build a unit enum variant.
    pub fn variant(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
            payload: None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for integer and floating point values.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::UInt(_) | Self::Float(_))
    }

    /// The string content, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The items, if this is a [`Value::Seq`].
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Self::Seq { items, .. } => Some(items),
            _ => None,
        }
    }

    /// The members, if this is a [`Value::Struct`].
    pub fn members(&self) -> Option<&[Member]> {
        match self {
            Self::Struct { members, .. } => Some(members),
            _ => None,
        }
    }

    /// Members accepted by `filter`, in declaration order.
    pub fn filtered_members<'a>(
        &'a self,
        filter: &'a MemberFilter,
    ) -> impl Iterator<Item = &'a Member> + 'a {
        self.members()
            .unwrap_or(&[])
            .iter()
            .filter(move |m| filter.accepts(m))
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The type name carried by composite values.
    ///
    /// Scalars do not carry their original Rust type; callers that need it
    /// keep the [`Inspect::type_name`](crate::Inspect::type_name) of the
    /// top-level value instead.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Enum { type_name, .. }
            | Self::Seq { type_name, .. }
            | Self::Map { type_name, .. }
            | Self::Struct { type_name, .. }
            | Self::Opaque { type_name, .. } => Some(type_name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{MemberKind, Visibility};

    #[test]
    fn accessors_match_variant() {
        let s = Value::Str("hello".into());
        assert_eq!(s.as_str(), Some("hello"));
        assert!(s.items().is_none());

        let seq = Value::seq("Vec<i32>", vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(seq.items().map(<[Value]>::len), Some(2));
        assert_eq!(seq.type_name(), Some("Vec<i32>"));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn numeric_view_widens() {
        assert_eq!(Value::Int(-3).as_f64(), Some(-3.0));
        assert_eq!(Value::UInt(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Char('a').as_f64(), None);
        assert!(Value::UInt(0).is_number());
    }

    #[test]
    fn filtered_members_respects_filter() {
        let value = Value::Struct {
            type_name: "Person".into(),
            members: vec![
                Member::new("name", MemberKind::Field, Visibility::Public, Value::Str("Ada".into())),
                Member::new("secret", MemberKind::Field, Visibility::NonPublic, Value::Int(1)),
                Member::new("Age", MemberKind::Property, Visibility::Public, Value::UInt(36)),
            ],
            display: None,
        };
        let names: Vec<_> = value
            .filtered_members(&MemberFilter::PUBLIC_FIELDS)
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["name"]);

        let all = value.filtered_members(&MemberFilter::ALL).count();
        assert_eq!(all, 3);
    }

    #[test]
    fn serde_roundtrip_keeps_structure() {
        let value = Value::Map {
            type_name: "BTreeMap<String, i32>".into(),
            entries: vec![(Value::Str("a".into()), Value::Int(1))],
        };
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
