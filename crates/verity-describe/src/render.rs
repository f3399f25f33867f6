use verity_types::{CheckConfig, Value};

use crate::text::{render_line_endings, render_tabs, truncate_window, ELLIPSIS};

/// How string content is rendered inside quotes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StringStyle {
    /// Raw content.
    #[default]
    Plain,
    /// Tabs shown as `<<tab>>`.
    ShowTabs,
    /// Line terminators shown as `<<CRLF>>` / `<<LF>>`.
    ShowLineEndings,
}

/// Rendering options, derived from a [`CheckConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct DescribeOptions {
    pub string_truncation_length: usize,
    pub max_items: usize,
    pub decimal_separator: char,
    /// Character offset the string window should keep visible.
    pub focus: Option<usize>,
    pub string_style: StringStyle,
}

impl DescribeOptions {
    pub fn from_config(config: &CheckConfig) -> Self {
        Self {
            string_truncation_length: config.string_truncation_length,
            max_items: config.max_items,
            decimal_separator: config.decimal_separator,
            focus: None,
            string_style: StringStyle::Plain,
        }
    }

    pub fn with_focus(mut self, focus: Option<usize>) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_string_style(mut self, style: StringStyle) -> Self {
        self.string_style = style;
        self
    }
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self::from_config(&CheckConfig::default())
    }
}

/// Render a value as it appears in a message block, e.g. `["toto"]`,
/// `[1, 2, 3]` or `[1, 2, ...] (25 items)`.
pub fn describe(value: &Value, options: &DescribeOptions) -> String {
    match value {
        Value::Seq { items, .. } => {
            let (body, truncated) = render_items(items, options);
            with_count_suffix(format!("[{body}]"), items.len(), truncated)
        }
        Value::Map { entries, .. } => {
            let (body, truncated) = render_entries(entries, options);
            with_count_suffix(format!("[{body}]"), entries.len(), truncated)
        }
        other => format!("[{}]", render(other, options)),
    }
}

/// Render a type name block: `[Vec<i32>]`.
pub fn describe_type(type_name: &str) -> String {
    format!("[{type_name}]")
}

/// Render a float with the given decimal separator.
pub fn render_float(value: f64, decimal_separator: char) -> String {
    let text = value.to_string();
    if decimal_separator == '.' {
        text
    } else {
        text.replace('.', &decimal_separator.to_string())
    }
}

fn with_count_suffix(text: String, count: usize, truncated: bool) -> String {
    if truncated {
        format!("{text} ({count} items)")
    } else {
        text
    }
}

/// Render a nested value (no surrounding brackets).
fn render(value: &Value, options: &DescribeOptions) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => render_float(*f, options.decimal_separator),
        Value::Char(c) => format!("'{c}'"),
        Value::Str(s) => format!("\"{}\"", render_string(s, options)),
        Value::Enum {
            variant, payload, ..
        } => match payload {
            Some(inner) => format!("{variant}({})", render(inner, options)),
            None => variant.clone(),
        },
        Value::Seq { items, .. } => format!("{{{}}}", render_items(items, options).0),
        Value::Map { entries, .. } => format!("{{{}}}", render_entries(entries, options).0),
        Value::Struct {
            type_name,
            members,
            display,
        } => match display {
            Some(text) => text.clone(),
            None => {
                let visible: Vec<String> = members
                    .iter()
                    .filter(|m| m.is_public())
                    .map(|m| format!("{}: {}", m.name, render(&m.value, options)))
                    .collect();
                if visible.is_empty() {
                    type_name.clone()
                } else {
                    format!("{type_name} {{ {} }}", visible.join(", "))
                }
            }
        },
        Value::Opaque { text, .. } => text.clone(),
    }
}

fn render_string(text: &str, options: &DescribeOptions) -> String {
    let window = truncate_window(text, options.string_truncation_length, options.focus);
    match options.string_style {
        StringStyle::Plain => window,
        StringStyle::ShowTabs => render_tabs(&window),
        StringStyle::ShowLineEndings => render_line_endings(&window),
    }
}

fn render_items(items: &[Value], options: &DescribeOptions) -> (String, bool) {
    // Nested strings are not focused: the focus offset belongs to the top-level value.
    let nested = DescribeOptions {
        focus: None,
        ..options.clone()
    };
    let mut parts: Vec<String> = items
        .iter()
        .take(options.max_items)
        .map(|item| render(item, &nested))
        .collect();
    let truncated = items.len() > options.max_items;
    if truncated {
        parts.push(ELLIPSIS.to_string());
    }
    (parts.join(", "), truncated)
}

fn render_entries(entries: &[(Value, Value)], options: &DescribeOptions) -> (String, bool) {
    let nested = DescribeOptions {
        focus: None,
        ..options.clone()
    };
    let mut parts: Vec<String> = entries
        .iter()
        .take(options.max_items)
        .map(|(k, v)| format!("{}: {}", render(k, &nested), render(v, &nested)))
        .collect();
    let truncated = entries.len() > options.max_items;
    if truncated {
        parts.push(ELLIPSIS.to_string());
    }
    (parts.join(", "), truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use verity_types::{Inspect, StructBuilder};

    fn d<T: Inspect + ?Sized>(value: &T) -> String {
        describe(&value.inspect(), &DescribeOptions::default())
    }

    #[test]
    fn scalars() {
        assert_eq!(d("toto"), "[\"toto\"]");
        assert_eq!(d(&'x'), "['x']");
        assert_eq!(d(&42), "[42]");
        assert_eq!(d(&-7i64), "[-7]");
        assert_eq!(d(&true), "[true]");
        assert_eq!(d(&None::<i32>), "[null]");
    }

    #[test]
    fn floats_use_decimal_separator() {
        assert_eq!(d(&1.5), "[1.5]");
        assert_eq!(d(&20.0), "[20]");
        let options = DescribeOptions::from_config(
            &CheckConfig::default().with_decimal_separator(','),
        );
        assert_eq!(describe(&1.5.inspect(), &options), "[1,5]");
    }

    #[test]
    fn sequences() {
        assert_eq!(d(&vec![1, 2, 3]), "[1, 2, 3]");
        assert_eq!(d(&vec!["a", "b"]), "[\"a\", \"b\"]");
        assert_eq!(d(&vec![vec![1, 2], vec![3]]), "[{1, 2}, {3}]");
        assert_eq!(d(&Vec::<i32>::new()), "[]");
    }

    #[test]
    fn long_sequences_are_truncated_with_count() {
        let options = DescribeOptions {
            max_items: 3,
            ..DescribeOptions::default()
        };
        let value = (1..=10).collect::<Vec<i32>>().inspect();
        assert_eq!(describe(&value, &options), "[1, 2, 3, ...] (10 items)");
    }

    #[test]
    fn maps() {
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(d(&map), "[\"a\": 1, \"b\": 2]");
    }

    #[test]
    fn enums_render_variant_and_payload() {
        assert_eq!(describe(&Value::variant("Color", "Red"), &DescribeOptions::default()), "[Red]");
        let ok: Result<i32, String> = Ok(3);
        assert_eq!(d(&ok), "[Ok(3)]");
    }

    #[test]
    fn structs_list_public_members_only() {
        let value = StructBuilder::new("Person")
            .field("name", "Ada")
            .private_field("secret", &1)
            .property("Age", &36)
            .build();
        assert_eq!(
            describe(&value, &DescribeOptions::default()),
            "[Person { name: \"Ada\", Age: 36 }]"
        );

        let hidden = StructBuilder::new("Hidden").private_field("x", &1).build();
        assert_eq!(describe(&hidden, &DescribeOptions::default()), "[Hidden]");

        let shown = StructBuilder::new("Point").field("x", &1).display("(1)").build();
        assert_eq!(describe(&shown, &DescribeOptions::default()), "[(1)]");
    }

    #[test]
    fn long_strings_are_windowed_around_focus() {
        let text = "a".repeat(30) + "XYZ" + &"b".repeat(30);
        let options = DescribeOptions {
            string_truncation_length: 20,
            ..DescribeOptions::default()
        }
        .with_focus(Some(30));
        assert_eq!(
            describe(&text.inspect(), &options),
            "[\"...aaaaaXYZbbbbbbbbbbbb...\"]"
        );
    }

    #[test]
    fn string_styles() {
        let options = DescribeOptions::default().with_string_style(StringStyle::ShowTabs);
        assert_eq!(describe(&"a\tb".inspect(), &options), "[\"a<<tab>>b\"]");

        let options = DescribeOptions::default().with_string_style(StringStyle::ShowLineEndings);
        assert_eq!(describe(&"a\r\nb".inspect(), &options), "[\"a<<CRLF>>\nb\"]");
    }

    #[test]
    fn type_blocks() {
        assert_eq!(describe_type("i32"), "[i32]");
    }
}
