use std::fmt;

use verity_describe::{DescribeKind, DescribeOptions};
use verity_types::Value;

use crate::block::{Block, DecoratedBlock, Entities, Role, TypeBlock, ValueBlock};

const DEFAULT_ENTITY: &str = "value";

// ---------------------------------------------------------------------------
// FluentMessage
// ---------------------------------------------------------------------------

/// A failure message: one summary line followed by labelled blocks.
///
/// ```text
///
/// The checked string is different from the expected one but has same length.
/// The checked string:
///     ["toto"]
/// The expected string:
///     ["tutu"]
/// ```
///
/// The summary template uses `{0}` (or `{checked}`) for "checked <entity>"
/// and `{1}` (or `{expected}`) for "expected <entity>". When both entities
/// are the same noun the latter reads "expected one".
///
/// Entities default to the kind of the first checked / expected block value
/// and can be overridden with [`Self::for_entity`] and
/// [`Self::for_expected_entity`].
#[derive(Clone, Debug, PartialEq)]
pub struct FluentMessage {
    template: String,
    checked_entity: Option<String>,
    expected_entity: Option<String>,
    options: DescribeOptions,
    blocks: Vec<Block>,
}

impl FluentMessage {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            checked_entity: None,
            expected_entity: None,
            options: DescribeOptions::default(),
            blocks: Vec::new(),
        }
    }

    /// Rendering options for every block.
    pub fn with_options(mut self, options: DescribeOptions) -> Self {
        self.options = options;
        self
    }

    /// Noun for the checked side ("string", "enumerable", ...).
    pub fn for_entity(mut self, entity: impl Into<String>) -> Self {
        self.checked_entity = Some(entity.into());
        self
    }

    /// Noun for the expected side, when it differs from the checked one.
    pub fn for_expected_entity(mut self, entity: impl Into<String>) -> Self {
        self.expected_entity = Some(entity.into());
        self
    }

    /// Add the checked value block.
    pub fn on(self, value: Value) -> BlockStep<ValueBlock> {
        self.value_block(Role::Checked, value)
    }

    /// Add the expected value block.
    pub fn expected(self, value: Value) -> BlockStep<ValueBlock> {
        self.value_block(Role::Expected, value)
    }

    /// Add a block listing acceptable values.
    pub fn expected_values(self, values: Value) -> BlockStep<ValueBlock> {
        self.value_block(Role::ExpectedValues, values)
    }

    /// Add a block for a check parameter.
    pub fn with_given_value(self, value: Value) -> BlockStep<ValueBlock> {
        self.value_block(Role::Given, value)
    }

    /// Add an "an instance of [T]" block.
    pub fn expected_type(self, type_name: impl Into<String>) -> BlockStep<TypeBlock> {
        BlockStep {
            message: self,
            block: TypeBlock::new(type_name),
        }
    }

    fn value_block(self, role: Role, value: Value) -> BlockStep<ValueBlock> {
        BlockStep {
            message: self,
            block: ValueBlock::new(role, value),
        }
    }

    /// The blocks added so far.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn entity_of(&self, role: Role) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Value(b) if b.role == role => {
                Some(DescribeKind::of(&b.value).entity_name().to_string())
            }
            _ => None,
        })
    }

    fn checked_entity(&self) -> String {
        self.checked_entity
            .clone()
            .or_else(|| self.entity_of(Role::Checked))
            .unwrap_or_else(|| DEFAULT_ENTITY.to_string())
    }

    fn expected_entity(&self, checked: &str) -> String {
        self.expected_entity
            .clone()
            .or_else(|| self.entity_of(Role::Expected))
            .unwrap_or_else(|| checked.to_string())
    }
}

impl fmt::Display for FluentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checked = self.checked_entity();
        let expected = self.expected_entity(&checked);
        let entities = Entities {
            checked: &checked,
            expected: &expected,
        };
        let expected_phrase = if checked == expected {
            "expected one".to_string()
        } else {
            format!("expected {expected}")
        };

        write!(f, "\n{}", entities.fill(&self.template, &expected_phrase))?;
        for block in &self.blocks {
            write!(f, "\n{}", block.render(&entities, &self.options))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BlockStep
// ---------------------------------------------------------------------------

/// A message with a block still being decorated.
///
/// Value decorations ([`Self::with_type`], [`Self::with_hash_code`],
/// [`Self::with_enumerable_count`]) exist only for value blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockStep<B> {
    message: FluentMessage,
    block: B,
}

impl<B: DecoratedBlock> BlockStep<B> {
    /// Replace the block label. `{0}`/`{1}` are filled as in the summary,
    /// without the "expected one" contraction.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        *self.block.label_mut() = Some(label.into());
        self
    }

    /// Text shown after the label, e.g. "different from".
    pub fn comparison(mut self, comparison: impl Into<String>) -> Self {
        *self.block.comparison_mut() = Some(comparison.into());
        self
    }

    /// Close this block and return the message.
    pub fn and(self) -> FluentMessage {
        let mut message = self.message;
        message.blocks.push(self.block.into());
        message
    }

    /// Close this block and add the expected value block.
    pub fn expected(self, value: Value) -> BlockStep<ValueBlock> {
        self.and().expected(value)
    }

    /// Close this block and add a block of acceptable values.
    pub fn expected_values(self, values: Value) -> BlockStep<ValueBlock> {
        self.and().expected_values(values)
    }

    /// Close this block and add a parameter block.
    pub fn with_given_value(self, value: Value) -> BlockStep<ValueBlock> {
        self.and().with_given_value(value)
    }

    /// Close this block and add a type block.
    pub fn expected_type(self, type_name: impl Into<String>) -> BlockStep<TypeBlock> {
        self.and().expected_type(type_name)
    }
}

impl BlockStep<ValueBlock> {
    /// Append ` of type: [T]`.
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.block.type_name = Some(type_name.into());
        self
    }

    /// Append ` with HashCode: [xxxxxxxx]`.
    pub fn with_hash_code(mut self) -> Self {
        self.block.hash_code = true;
        self
    }

    /// Append the item count of a collection, e.g. ` (3 items)`.
    pub fn with_enumerable_count(mut self) -> Self {
        self.block.count = true;
        self
    }
}

impl<B: DecoratedBlock + Clone> fmt::Display for BlockStep<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.clone().and(), f)
    }
}

impl<B: DecoratedBlock> From<BlockStep<B>> for FluentMessage {
    fn from(step: BlockStep<B>) -> Self {
        step.and()
    }
}
