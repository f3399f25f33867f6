use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Smallest accepted string truncation length.
pub const MIN_STRING_TRUNCATION_LENGTH: usize = 20;
/// Default number of characters shown for a string value.
pub const DEFAULT_STRING_TRUNCATION_LENGTH: usize = 256;
/// Default number of items shown for a collection value.
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// How equality checks decide whether two values match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualMode {
    /// Deep comparison of inspected values: numbers compare by value across
    /// integer and float types, sequences compare item by item regardless of
    /// the container type.
    #[default]
    FluentEquals,
    /// Strict comparison: the runtime type names must match and values
    /// compare exactly.
    Equals,
}

/// Configuration shared by every check.
///
/// Engines receive it explicitly; the `Check` entry point keeps the
/// ambient copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Maximum number of characters of a string rendered in a message.
    pub string_truncation_length: usize,
    /// Maximum number of collection items rendered in a message.
    pub max_items: usize,
    /// Equality semantics used by `is_equal_to` and the structural comparer.
    pub equal_mode: EqualMode,
    /// Decimal separator used when rendering floating point numbers.
    pub decimal_separator: char,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            string_truncation_length: DEFAULT_STRING_TRUNCATION_LENGTH,
            max_items: DEFAULT_MAX_ITEMS,
            equal_mode: EqualMode::default(),
            decimal_separator: '.',
        }
    }
}

impl CheckConfig {
    /// Copy of this configuration with a different truncation length.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTruncationLength`] when `length` is
    /// below [`MIN_STRING_TRUNCATION_LENGTH`].
    pub fn with_string_truncation_length(mut self, length: usize) -> ConfigResult<Self> {
        validate_truncation_length(length)?;
        self.string_truncation_length = length;
        Ok(self)
    }

    /// Copy of this configuration with a different equality mode.
    pub fn with_equal_mode(mut self, mode: EqualMode) -> Self {
        self.equal_mode = mode;
        self
    }

    /// Copy of this configuration with a different decimal separator.
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Check every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_truncation_length(self.string_truncation_length)?;
        if self.max_items == 0 {
            return Err(ConfigError::InvalidMaxItems);
        }
        Ok(())
    }

    /// Load a configuration from TOML. Missing keys take their defaults.
    ///
    /// ```rust
    /// use verity_types::{CheckConfig, EqualMode};
    ///
    /// let config = CheckConfig::from_toml_str(
    ///     "string_truncation_length = 40\nequal_mode = \"equals\"",
    /// )
    /// .unwrap();
    /// assert_eq!(config.string_truncation_length, 40);
    /// assert_eq!(config.equal_mode, EqualMode::Equals);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and a validation
    /// error for out-of-range values.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn validate_truncation_length(length: usize) -> ConfigResult<()> {
    if length < MIN_STRING_TRUNCATION_LENGTH {
        return Err(ConfigError::InvalidTruncationLength {
            requested: length,
            minimum: MIN_STRING_TRUNCATION_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.string_truncation_length, DEFAULT_STRING_TRUNCATION_LENGTH);
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
        assert_eq!(config.equal_mode, EqualMode::FluentEquals);
        assert_eq!(config.decimal_separator, '.');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn truncation_length_below_minimum_is_rejected() {
        let err = CheckConfig::default()
            .with_string_truncation_length(MIN_STRING_TRUNCATION_LENGTH - 1)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTruncationLength {
                requested: MIN_STRING_TRUNCATION_LENGTH - 1,
                minimum: MIN_STRING_TRUNCATION_LENGTH,
            }
        );
    }

    #[test]
    fn truncation_length_at_minimum_is_accepted() {
        let config = CheckConfig::default()
            .with_string_truncation_length(MIN_STRING_TRUNCATION_LENGTH)
            .unwrap();
        assert_eq!(config.string_truncation_length, MIN_STRING_TRUNCATION_LENGTH);
    }

    #[test]
    fn toml_partial_document_keeps_defaults() {
        let config = CheckConfig::from_toml_str("decimal_separator = \",\"").unwrap();
        assert_eq!(config.decimal_separator, ',');
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn toml_invalid_values_are_rejected() {
        assert!(matches!(
            CheckConfig::from_toml_str("string_truncation_length = 3"),
            Err(ConfigError::InvalidTruncationLength { requested: 3, .. })
        ));
        assert_eq!(
            CheckConfig::from_toml_str("max_items = 0"),
            Err(ConfigError::InvalidMaxItems)
        );
        assert!(matches!(
            CheckConfig::from_toml_str("max_items = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn builders_chain() {
        let config = CheckConfig::default()
            .with_equal_mode(EqualMode::Equals)
            .with_decimal_separator(',');
        assert_eq!(config.equal_mode, EqualMode::Equals);
        assert_eq!(config.decimal_separator, ',');
    }

    proptest::proptest! {
        #[test]
        fn truncation_length_accepted_iff_at_least_minimum(length in 0usize..1_000) {
            let result = CheckConfig::default().with_string_truncation_length(length);
            proptest::prop_assert_eq!(result.is_ok(), length >= MIN_STRING_TRUNCATION_LENGTH);
        }
    }
}
