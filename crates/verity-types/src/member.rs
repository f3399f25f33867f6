use serde::{Deserialize, Serialize};

use crate::inspect::Inspect;
use crate::value::Value;

/// Whether a member is stored data or computed on access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Stored data.
    Field,
    /// A computed accessor exposed by the type's `Inspect` impl.
    Property,
}

impl MemberKind {
    /// Lowercase noun used in diagnostics.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Property => "property",
        }
    }
}

/// Visibility of a member as declared by the inspected type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    NonPublic,
}

/// A named member of a [`Value::Struct`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub value: Value,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        kind: MemberKind,
        visibility: Visibility,
        value: Value,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility,
            value,
        }
    }

    /// Returns `true` if the member is public.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Which visibilities a [`MemberFilter`] accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityFilter {
    #[default]
    Public,
    NonPublic,
    All,
}

/// Which member kinds a [`MemberFilter`] accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberSelection {
    #[default]
    Fields,
    Properties,
    All,
}

/// Selects the members a structural comparison walks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberFilter {
    pub visibility: VisibilityFilter,
    pub selection: MemberSelection,
}

impl MemberFilter {
    pub const PUBLIC_FIELDS: Self = Self::new(VisibilityFilter::Public, MemberSelection::Fields);
    pub const ALL_FIELDS: Self = Self::new(VisibilityFilter::All, MemberSelection::Fields);
    pub const PUBLIC_PROPERTIES: Self =
        Self::new(VisibilityFilter::Public, MemberSelection::Properties);
    pub const ALL: Self = Self::new(VisibilityFilter::All, MemberSelection::All);

    pub const fn new(visibility: VisibilityFilter, selection: MemberSelection) -> Self {
        Self {
            visibility,
            selection,
        }
    }

    /// Returns `true` if `member` passes both the visibility and kind filters.
    pub fn accepts(&self, member: &Member) -> bool {
        let visible = match self.visibility {
            VisibilityFilter::Public => member.visibility == Visibility::Public,
            VisibilityFilter::NonPublic => member.visibility == Visibility::NonPublic,
            VisibilityFilter::All => true,
        };
        let selected = match self.selection {
            MemberSelection::Fields => member.kind == MemberKind::Field,
            MemberSelection::Properties => member.kind == MemberKind::Property,
            MemberSelection::All => true,
        };
        visible && selected
    }
}

/// Fluent constructor for [`Value::Struct`], used by hand-written
/// [`Inspect`] impls.
///
/// ```rust
/// use verity_types::{Inspect, StructBuilder, Value};
///
/// struct Account {
///     owner: String,
///     pin: u16,
/// }
///
/// impl Inspect for Account {
///     fn inspect(&self) -> Value {
///         StructBuilder::new("Account")
///             .field("owner", &self.owner)
///             .private_field("pin", &self.pin)
///             .property("Masked", &format!("{}-****", self.owner))
///             .build()
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct StructBuilder {
    type_name: String,
    members: Vec<Member>,
    display: Option<String>,
}

impl StructBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            members: Vec::new(),
            display: None,
        }
    }

    /// Add a public field.
    pub fn field<T: Inspect + ?Sized>(self, name: &str, value: &T) -> Self {
        self.member(name, MemberKind::Field, Visibility::Public, value.inspect())
    }

    /// Add a non-public field.
    pub fn private_field<T: Inspect + ?Sized>(self, name: &str, value: &T) -> Self {
        self.member(name, MemberKind::Field, Visibility::NonPublic, value.inspect())
    }

    /// Add a public computed property.
    pub fn property<T: Inspect + ?Sized>(self, name: &str, value: &T) -> Self {
        self.member(name, MemberKind::Property, Visibility::Public, value.inspect())
    }

    /// Add a non-public computed property.
    pub fn private_property<T: Inspect + ?Sized>(self, name: &str, value: &T) -> Self {
        self.member(name, MemberKind::Property, Visibility::NonPublic, value.inspect())
    }

    /// Add an already inspected member.
    pub fn member(
        mut self,
        name: &str,
        kind: MemberKind,
        visibility: Visibility,
        value: Value,
    ) -> Self {
        self.members.push(Member::new(name, kind, visibility, value));
        self
    }

    /// Text used instead of the default member listing when the value is
    /// rendered.
    pub fn display(mut self, text: impl Into<String>) -> Self {
        self.display = Some(text.into());
        self
    }

    pub fn build(self) -> Value {
        Value::Struct {
            type_name: self.type_name,
            members: self.members,
            display: self.display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        StructBuilder::new("Sample")
            .field("a", &1i32)
            .private_field("b", "two")
            .property("C", &3u8)
            .private_property("D", &'d')
            .build()
    }

    #[test]
    fn builder_records_kind_and_visibility() {
        let value = sample();
        let members = value.members().unwrap();
        assert_eq!(members.len(), 4);
        assert_eq!(members[0].kind, MemberKind::Field);
        assert!(members[0].is_public());
        assert_eq!(members[1].visibility, Visibility::NonPublic);
        assert_eq!(members[1].value, Value::Str("two".into()));
        assert_eq!(members[2].kind, MemberKind::Property);
        assert_eq!(members[3].value, Value::Char('d'));
    }

    #[test]
    fn filter_matrix() {
        let value = sample();
        let count = |filter: MemberFilter| value.filtered_members(&filter).count();

        assert_eq!(count(MemberFilter::PUBLIC_FIELDS), 1);
        assert_eq!(count(MemberFilter::ALL_FIELDS), 2);
        assert_eq!(count(MemberFilter::PUBLIC_PROPERTIES), 1);
        assert_eq!(
            count(MemberFilter::new(VisibilityFilter::NonPublic, MemberSelection::All)),
            2
        );
        assert_eq!(count(MemberFilter::ALL), 4);
    }

    #[test]
    fn default_filter_is_public_fields() {
        assert_eq!(MemberFilter::default(), MemberFilter::PUBLIC_FIELDS);
    }

    #[test]
    fn display_override_is_kept() {
        let value = StructBuilder::new("Point").field("x", &1).display("(1)").build();
        match value {
            Value::Struct { display, .. } => assert_eq!(display.as_deref(), Some("(1)")),
            other => panic!("expected struct, got {other:?}"),
        }
    }
}
