use verity_types::Value;

/// Extra text appended to value blocks when the checked and expected
/// values render identically but are not equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoration {
    /// Renderings already differ.
    None,
    /// The runtime types differ: show them.
    TypeName,
    /// Same type, same rendering: show a content hash.
    HashCode,
}

/// Short content hash of a value: the first 4 bytes of the BLAKE3 digest of
/// its JSON form, hex encoded.
pub fn hash_code(value: &Value) -> String {
    let bytes = serde_json::to_vec(value).unwrap_or_else(|_| format!("{value:?}").into_bytes());
    let digest = blake3::hash(&bytes);
    hex::encode(&digest.as_bytes()[..4])
}

/// Choose how to tell apart two values whose descriptions are identical.
pub fn disambiguate(
    checked_description: &str,
    expected_description: &str,
    checked_type: &str,
    expected_type: &str,
) -> Decoration {
    if checked_description != expected_description {
        Decoration::None
    } else if checked_type != expected_type {
        Decoration::TypeName
    } else {
        Decoration::HashCode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_types::StructBuilder;

    #[test]
    fn hash_code_is_stable_and_short() {
        let v = Value::Str("abc".into());
        assert_eq!(hash_code(&v), hash_code(&v.clone()));
        assert_eq!(hash_code(&v).len(), 8);
    }

    #[test]
    fn hidden_members_change_the_hash() {
        let a = StructBuilder::new("S").private_field("x", &1).build();
        let b = StructBuilder::new("S").private_field("x", &2).build();
        assert_ne!(hash_code(&a), hash_code(&b));
    }

    #[test]
    fn decoration_choice() {
        assert_eq!(disambiguate("[1]", "[2]", "i32", "i32"), Decoration::None);
        assert_eq!(disambiguate("[1]", "[1]", "i32", "u8"), Decoration::TypeName);
        assert_eq!(disambiguate("[S]", "[S]", "S", "S"), Decoration::HashCode);
    }
}
