use verity_types::Value;

/// Closed classification of a value, driving entity names and phrasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescribeKind {
    Null,
    Boolean,
    Number,
    Char,
    String,
    Enum,
    Enumerable,
    Dictionary,
    Struct,
    Opaque,
}

impl DescribeKind {
    /// Classify an inspected value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => Self::Number,
            Value::Char(_) => Self::Char,
            Value::Str(_) => Self::String,
            Value::Enum { .. } => Self::Enum,
            Value::Seq { .. } => Self::Enumerable,
            Value::Map { .. } => Self::Dictionary,
            Value::Struct { .. } => Self::Struct,
            Value::Opaque { .. } => Self::Opaque,
        }
    }

    /// Noun used in messages: "The checked <entity>".
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Null | Self::Boolean | Self::Number | Self::Opaque => "value",
            Self::Char => "char",
            Self::String => "string",
            Self::Enum => "enum",
            Self::Enumerable => "enumerable",
            Self::Dictionary => "dictionary",
            Self::Struct => "struct",
        }
    }
}
