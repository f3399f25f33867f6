//! Check families.
//!
//! Generic checks ([`equality`], [`structural`]) are inherent methods of
//! [`FluentCheck`](crate::FluentCheck). The others are extension traits
//! implemented for the checked types they make sense for.

pub mod character;
pub mod code;
pub mod dictionary;
pub mod enumerable;
pub mod equality;
pub mod number;
pub mod option;
pub mod string;
pub mod structural;

/// Compare two runtime type names, ignoring reference sigils.
pub(crate) fn same_type(a: &str, b: &str) -> bool {
    bare_type_name(a) == bare_type_name(b)
}

fn bare_type_name(mut name: &str) -> &str {
    loop {
        let stripped = name.trim_start_matches('&').trim_start_matches("mut ");
        if stripped == name {
            return stripped;
        }
        name = stripped;
    }
}

/// "1 element", "3 elements".
pub(crate) fn elements(count: usize) -> String {
    if count == 1 {
        "1 element".to_string()
    } else {
        format!("{count} elements")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sigils_are_ignored() {
        assert!(same_type("&str", "str"));
        assert!(same_type("&mut Vec<i32>", "Vec<i32>"));
        assert!(!same_type("u8", "i64"));
    }

    #[test]
    fn element_counts() {
        assert_eq!(elements(0), "0 elements");
        assert_eq!(elements(1), "1 element");
        assert_eq!(elements(3), "3 elements");
    }
}
