use verity_describe::{describe, describe_type, hash_code, DescribeOptions};
use verity_types::Value;

/// Which part of the check a block shows. Drives the default label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The value under check.
    Checked,
    /// The reference value.
    Expected,
    /// A set of acceptable values.
    ExpectedValues,
    /// A parameter of the check that is neither checked nor expected.
    Given,
}

/// Entity nouns used when rendering labels.
pub(crate) struct Entities<'a> {
    pub checked: &'a str,
    pub expected: &'a str,
}

impl Entities<'_> {
    /// Substitute `{0}`/`{checked}` and `{1}`/`{expected}` in `text`.
    pub(crate) fn fill(&self, text: &str, expected_phrase: &str) -> String {
        let checked = format!("checked {}", self.checked);
        text.replace("{0}", &checked)
            .replace("{checked}", &checked)
            .replace("{1}", expected_phrase)
            .replace("{expected}", expected_phrase)
    }

    fn fill_label(&self, text: &str) -> String {
        self.fill(text, &format!("expected {}", self.expected))
    }
}

/// A block showing a value, e.g. `The checked string:\n\t["toto"]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueBlock {
    pub(crate) role: Role,
    pub(crate) value: Value,
    pub(crate) label: Option<String>,
    pub(crate) comparison: Option<String>,
    pub(crate) type_name: Option<String>,
    pub(crate) hash_code: bool,
    pub(crate) count: bool,
}

impl ValueBlock {
    pub(crate) fn new(role: Role, value: Value) -> Self {
        Self {
            role,
            value,
            label: None,
            comparison: None,
            type_name: None,
            hash_code: false,
            count: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    fn default_label(&self, entities: &Entities<'_>) -> String {
        match self.role {
            Role::Checked => format!("The checked {}:", entities.checked),
            Role::Expected => format!("The expected {}:", entities.expected),
            Role::ExpectedValues => "The expected value(s):".to_string(),
            Role::Given => "The given value:".to_string(),
        }
    }

    fn body(&self, options: &DescribeOptions) -> String {
        let mut text = describe(&self.value, options);
        if self.count {
            let (len, truncated) = match &self.value {
                Value::Seq { items, .. } => (items.len(), items.len() > options.max_items),
                Value::Map { entries, .. } => (entries.len(), entries.len() > options.max_items),
                _ => (0, true),
            };
            // Truncated collections already carry their count.
            if !truncated {
                let noun = if len == 1 { "item" } else { "items" };
                text.push_str(&format!(" ({len} {noun})"));
            }
        }
        if let Some(type_name) = &self.type_name {
            text.push_str(&format!(" of type: {}", describe_type(type_name)));
        }
        if self.hash_code {
            text.push_str(&format!(" with HashCode: [{}]", hash_code(&self.value)));
        }
        text
    }
}

/// A block showing a type rather than a value:
/// `The expected value:\n\tan instance of [i32]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeBlock {
    pub(crate) type_name: String,
    pub(crate) label: Option<String>,
    pub(crate) comparison: Option<String>,
}

impl TypeBlock {
    pub(crate) fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            label: None,
            comparison: None,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// One labelled section of a message.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Value(ValueBlock),
    Type(TypeBlock),
}

impl Block {
    pub(crate) fn render(&self, entities: &Entities<'_>, options: &DescribeOptions) -> String {
        let (label, comparison, body) = match self {
            Self::Value(block) => (
                block
                    .label
                    .as_deref()
                    .map(|l| entities.fill_label(l))
                    .unwrap_or_else(|| block.default_label(entities)),
                block.comparison.as_deref(),
                block.body(options),
            ),
            Self::Type(block) => (
                block
                    .label
                    .as_deref()
                    .map(|l| entities.fill_label(l))
                    .unwrap_or_else(|| format!("The expected {}:", entities.expected)),
                block.comparison.as_deref(),
                format!("an instance of {}", describe_type(&block.type_name)),
            ),
        };
        match comparison {
            Some(comparison) => format!("{label} {comparison}\n\t{body}"),
            None => format!("{label}\n\t{body}"),
        }
    }
}

/// Blocks that carry a label and a comparison text.
pub trait DecoratedBlock: Into<Block> + private::Sealed {
    #[doc(hidden)]
    fn label_mut(&mut self) -> &mut Option<String>;
    #[doc(hidden)]
    fn comparison_mut(&mut self) -> &mut Option<String>;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::ValueBlock {}
    impl Sealed for super::TypeBlock {}
}

impl DecoratedBlock for ValueBlock {
    fn label_mut(&mut self) -> &mut Option<String> {
        &mut self.label
    }

    fn comparison_mut(&mut self) -> &mut Option<String> {
        &mut self.comparison
    }
}

impl DecoratedBlock for TypeBlock {
    fn label_mut(&mut self) -> &mut Option<String> {
        &mut self.label
    }

    fn comparison_mut(&mut self) -> &mut Option<String> {
        &mut self.comparison
    }
}

impl From<ValueBlock> for Block {
    fn from(block: ValueBlock) -> Self {
        Self::Value(block)
    }
}

impl From<TypeBlock> for Block {
    fn from(block: TypeBlock) -> Self {
        Self::Type(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_types::Inspect;

    const ENTITIES: Entities<'static> = Entities {
        checked: "string",
        expected: "string",
    };

    #[test]
    fn default_labels_follow_role() {
        let options = DescribeOptions::default();
        let block = Block::from(ValueBlock::new(Role::Checked, "toto".inspect()));
        assert_eq!(block.render(&ENTITIES, &options), "The checked string:\n\t[\"toto\"]");

        let block = Block::from(ValueBlock::new(Role::Given, 3.inspect()));
        assert_eq!(block.render(&ENTITIES, &options), "The given value:\n\t[3]");
    }

    #[test]
    fn decorations_are_appended() {
        let options = DescribeOptions::default();
        let mut block = ValueBlock::new(Role::Expected, vec![1, 2].inspect());
        block.count = true;
        block.type_name = Some("Vec<i32>".into());
        assert_eq!(
            Block::from(block).render(&ENTITIES, &options),
            "The expected string:\n\t[1, 2] (2 items) of type: [Vec<i32>]"
        );
    }

    #[test]
    fn truncated_collections_do_not_repeat_the_count() {
        let options = DescribeOptions {
            max_items: 2,
            ..DescribeOptions::default()
        };
        let mut block = ValueBlock::new(Role::Checked, vec![1, 2, 3].inspect());
        block.count = true;
        assert_eq!(
            Block::from(block).render(&ENTITIES, &options),
            "The checked string:\n\t[1, 2, ...] (3 items)"
        );
    }

    #[test]
    fn type_blocks_render_an_instance() {
        let mut block = TypeBlock::new("i32");
        *block.comparison_mut() = Some("different from".into());
        let block = Block::from(block);
        assert_eq!(
            block.render(&ENTITIES, &DescribeOptions::default()),
            "The expected string: different from\n\tan instance of [i32]"
        );
    }

    #[test]
    fn custom_labels_fill_placeholders() {
        let mut block = ValueBlock::new(Role::Checked, 'a'.inspect());
        *block.label_mut() = Some("The {0} at index #2:".into());
        let block = Block::from(block);
        assert_eq!(
            block.render(&ENTITIES, &DescribeOptions::default()),
            "The checked string at index #2:\n\t['a']"
        );
    }
}
