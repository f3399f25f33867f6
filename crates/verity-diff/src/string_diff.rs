//! String-level diff: classify how a checked string differs from the
//! expected one.
//!
//! The first applicable rule wins: line endings, then case, then
//! whitespace runs, then a line-by-line walk. The common line prefix is
//! found with the `similar` crate (Myers diff over the split lines).

use similar::{capture_diff_slices, Algorithm, DiffTag};
use verity_describe::StringStyle;

/// Characters of context kept before the differing column in a fragment.
const FRAGMENT_CONTEXT: usize = 5;
/// Maximum characters shown in a fragment.
const FRAGMENT_WIDTH: usize = 20;

/// How a checked line relates to the expected line at the first difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineChange {
    /// The checked line is a strict prefix of the expected line.
    Shorter,
    /// The expected line is a strict prefix of the checked line.
    Longer,
    /// Both lines have content at the differing column.
    Different,
}

/// Location and excerpts of the first differing line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDifference {
    /// 1-based line number.
    pub line: usize,
    /// 0-based character offset within the line.
    pub col: usize,
    /// 0-based character offset within the whole checked string.
    pub offset: usize,
    /// Excerpt of the expected line around `col`.
    pub expected: String,
    /// Excerpt of the checked line around `col`.
    pub actual: String,
    pub change: LineChange,
    /// Both strings fit on one line.
    pub single_line: bool,
    /// Both strings have the same number of characters.
    pub same_length: bool,
}

/// Classification of a string mismatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringDiff {
    Identical,
    /// Equal when ignoring letter case.
    CaseDifference,
    /// Equal when space and tab runs are collapsed.
    WhitespaceDifference,
    /// Equal once `\r\n` is normalised to `\n`.
    LineEndingDifference,
    LineContentDifference(LineDifference),
    /// The checked string stops before the expected one; `line` is the first
    /// missing 1-based line.
    MissingLines { line: usize },
    /// The checked string has lines past the end of the expected one.
    ExtraLines { line: usize },
    GeneralDifference { same_length: bool },
}

impl StringDiff {
    /// Returns `true` if the strings are identical.
    pub fn is_identical(&self) -> bool {
        matches!(self, Self::Identical)
    }

    /// Message template for this difference. `{0}` names the checked
    /// entity, `{1}` the expected one.
    pub fn template(&self) -> String {
        match self {
            Self::Identical => "The {0} is equal to the {1}.".to_string(),
            Self::CaseDifference => "The {0} is different in case from the {1}.".to_string(),
            Self::WhitespaceDifference => "The {0} has different spaces than the {1}.".to_string(),
            Self::LineEndingDifference => {
                "The {0} has different end of line markers than the {1}.".to_string()
            }
            Self::MissingLines { .. } => {
                "The {0} is different from the {1}, it is missing some line(s).".to_string()
            }
            Self::ExtraLines { .. } => {
                "The {0} is different from the {1}, it contains extra lines at the end.".to_string()
            }
            Self::LineContentDifference(diff) => line_template(diff),
            Self::GeneralDifference { same_length } => general_template(*same_length),
        }
    }

    /// Rendering style the value blocks should use to make the difference
    /// visible.
    pub fn string_style(&self) -> StringStyle {
        match self {
            Self::WhitespaceDifference => StringStyle::ShowTabs,
            Self::LineEndingDifference => StringStyle::ShowLineEndings,
            _ => StringStyle::Plain,
        }
    }

    /// Character offset in the checked string worth keeping visible when
    /// the string is truncated.
    pub fn focus(&self) -> Option<usize> {
        match self {
            Self::LineContentDifference(diff) => Some(diff.offset),
            _ => None,
        }
    }
}

fn general_template(same_length: bool) -> String {
    if same_length {
        "The {0} is different from the {1} but has same length.".to_string()
    } else {
        "The {0} is different from the {1}.".to_string()
    }
}

fn line_template(diff: &LineDifference) -> String {
    match (diff.change, diff.single_line) {
        (LineChange::Shorter, true) => {
            "The {0} is different from the {1}, it is missing the end.".to_string()
        }
        (LineChange::Shorter, false) => format!(
            "The {{0}} is different from the {{1}}, at line {} it is missing the end.",
            diff.line
        ),
        (LineChange::Longer, true) => {
            "The {0} is different from the {1}, it contains extra text at the end.".to_string()
        }
        (LineChange::Longer, false) => format!(
            "The {{0}} is different from the {{1}}, at line {} it contains extra text at the end.",
            diff.line
        ),
        (LineChange::Different, true) => general_template(diff.same_length),
        (LineChange::Different, false) => format!(
            "The {{0}} is different from the {{1}}, at line {} col={}, expected '{}' was '{}'.",
            diff.line, diff.col, diff.expected, diff.actual
        ),
    }
}

/// Classify the difference between `actual` (the checked string) and
/// `expected`.
pub fn diff_strings(actual: &str, expected: &str) -> StringDiff {
    if actual == expected {
        return StringDiff::Identical;
    }
    if normalize_line_endings(actual) == normalize_line_endings(expected) {
        return StringDiff::LineEndingDifference;
    }
    if actual.to_lowercase() == expected.to_lowercase() {
        return StringDiff::CaseDifference;
    }
    if collapse_whitespace(actual) == collapse_whitespace(expected) {
        return StringDiff::WhitespaceDifference;
    }
    diff_lines(actual, expected)
}

fn diff_lines(actual: &str, expected: &str) -> StringDiff {
    let actual_lines: Vec<&str> = actual.split('\n').map(strip_cr).collect();
    let expected_lines: Vec<&str> = expected.split('\n').map(strip_cr).collect();
    let same_length = actual.chars().count() == expected.chars().count();

    let ops = capture_diff_slices(Algorithm::Myers, &expected_lines, &actual_lines);
    let common = match ops.first() {
        Some(op) if op.tag() == DiffTag::Equal => op.old_range().len(),
        _ => 0,
    };

    if common >= actual_lines.len() && common >= expected_lines.len() {
        return StringDiff::GeneralDifference { same_length };
    }
    if common >= actual_lines.len() {
        return StringDiff::MissingLines { line: common + 1 };
    }
    if common >= expected_lines.len() {
        return StringDiff::ExtraLines { line: common + 1 };
    }

    let actual_line: Vec<char> = actual_lines[common].chars().collect();
    let expected_line: Vec<char> = expected_lines[common].chars().collect();
    let col = actual_line
        .iter()
        .zip(&expected_line)
        .take_while(|(a, e)| a == e)
        .count();
    let change = if col == actual_line.len() {
        LineChange::Shorter
    } else if col == expected_line.len() {
        LineChange::Longer
    } else {
        LineChange::Different
    };
    let offset = actual
        .split('\n')
        .take(common)
        .map(|line| line.chars().count() + 1)
        .sum::<usize>()
        + col;

    StringDiff::LineContentDifference(LineDifference {
        line: common + 1,
        col,
        offset,
        expected: fragment(&expected_line, col),
        actual: fragment(&actual_line, col),
        change,
        single_line: actual_lines.len() == 1 && expected_lines.len() == 1,
        same_length,
    })
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch == ' ' || ch == '\t' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Excerpt of `line` around `col`, with `...` where text was cut.
fn fragment(line: &[char], col: usize) -> String {
    let start = col.saturating_sub(FRAGMENT_CONTEXT).min(line.len());
    let end = (start + FRAGMENT_WIDTH).min(line.len());
    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.extend(&line[start..end]);
    if end < line.len() {
        out.push_str("...");
    }
    out
}
