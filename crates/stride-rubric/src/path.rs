//! Path expressions into assessment records.
//!
//! Two forms are supported:
//!
//! - dotted: `vitalsMap.vitals.heart_rate`
//! - filtered: `exercises[?(@.id==259)].correctReps`, selecting the first
//!   element of a sequence whose field equals the given value, then
//!   continuing with an optional dotted suffix.
//!
//! Each dotted segment is first looked up as an own key, verbatim. If that
//! key is absent and the segment ends in a positional index, `setList[0]`,
//! the index steps into the sequence under `setList`. Only one filter is
//! allowed per path.
//!
//! Expressions are parsed once when the configuration is loaded. Parsing
//! never fails: anything that does not fit the grammar becomes
//! [`PathExpr::Malformed`], which resolves to nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::stringify;

const FILTER_OPEN: &str = "[?(@.";
const FILTER_CLOSE: &str = ")]";

/// One step of a dotted path.
///
/// `raw` is the segment text exactly as written. When it ends in `[N]`,
/// `key` and `index` hold the split form, used only if the record has no
/// own key spelled like `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub raw: String,
    pub key: String,
    pub index: Option<usize>,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if let Some(open) = raw.rfind('[')
            && let Some(digits) = raw[open + 1..].strip_suffix(']')
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && let Ok(index) = digits.parse::<usize>()
        {
            return Self {
                raw: raw.to_string(),
                key: raw[..open].to_string(),
                index: Some(index),
            };
        }

        Self {
            raw: raw.to_string(),
            key: raw.to_string(),
            index: None,
        }
    }

    /// Step from `node` into its own key, never through anything but a
    /// mapping that explicitly holds the key. A literal key wins over the
    /// indexed reading.
    fn step<'a>(&self, node: &'a Value) -> Option<&'a Value> {
        let obj = node.as_object()?;
        if let Some(child) = obj.get(&self.raw) {
            return Some(child);
        }
        let index = self.index?;
        obj.get(&self.key)?.as_array()?.get(index)
    }
}

/// Single-field equality condition of a filtered path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    fn matches(&self, item: &Value) -> bool {
        let Some(field) = item.as_object().and_then(|obj| obj.get(&self.field)) else {
            return false;
        };
        let text = match field {
            Value::Null => "null".to_string(),
            other => match stringify(other) {
                Some(text) => text,
                None => return false,
            },
        };
        text == self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathExpr {
    Empty,
    Plain(Vec<Segment>),
    Filtered {
        base: Vec<Segment>,
        filter: Filter,
        rest: Vec<Segment>,
    },
    Malformed,
}

impl PathExpr {
    fn parse(source: &str) -> Self {
        if source.is_empty() {
            return PathExpr::Empty;
        }

        let Some((base, after)) = source.split_once(FILTER_OPEN) else {
            return PathExpr::Plain(parse_segments(source));
        };

        if after.contains(FILTER_OPEN) {
            return PathExpr::Malformed;
        }

        let Some(close) = after.find(')') else {
            return PathExpr::Malformed;
        };
        let (condition, tail) = after.split_at(close);

        let Some(remaining) = tail.strip_prefix(FILTER_CLOSE) else {
            return PathExpr::Malformed;
        };
        let rest = if remaining.is_empty() {
            Vec::new()
        } else if let Some(suffix) = remaining.strip_prefix('.') {
            parse_segments(suffix)
        } else {
            return PathExpr::Malformed;
        };

        let mut parts = condition.split("==");
        let (Some(field), Some(value)) = (parts.next(), parts.next()) else {
            return PathExpr::Malformed;
        };
        if field.is_empty() {
            return PathExpr::Malformed;
        }

        PathExpr::Filtered {
            base: parse_segments(base),
            filter: Filter {
                field: field.to_string(),
                value: unquote(value),
            },
            rest,
        }
    }

    fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        match self {
            PathExpr::Empty | PathExpr::Malformed => None,
            PathExpr::Plain(segments) => walk(root, segments),
            PathExpr::Filtered { base, filter, rest } => {
                let items = walk(root, base)?.as_array()?;
                let selected = items.iter().find(|item| filter.matches(item))?;
                walk(selected, rest)
            }
        }
    }
}

fn parse_segments(dotted: &str) -> Vec<Segment> {
    dotted.split('.').map(Segment::parse).collect()
}

fn walk<'a>(node: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(node, |current, segment| segment.step(current))
}

/// Drop every double quote, then one surrounding pair of single quotes.
fn unquote(raw: &str) -> String {
    let value: String = raw.chars().filter(|&c| c != '"').collect();
    match value
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
    {
        Some(inner) => inner.to_string(),
        None => value,
    }
}

/// A parsed path expression together with the text it was written as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    source: String,
    expr: PathExpr,
}

impl FieldPath {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let expr = PathExpr::parse(&source);
        Self { source, expr }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &PathExpr {
        &self.expr
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.expr, PathExpr::Malformed)
    }

    /// Resolve against a record tree. `None` is the absent sentinel.
    pub fn resolve(&self, root: &Value) -> Option<String> {
        self.expr.resolve(root).and_then(stringify)
    }
}

impl From<String> for FieldPath {
    fn from(source: String) -> Self {
        Self::parse(source)
    }
}

impl From<&str> for FieldPath {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.source
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Resolve `path` against `record`, returning its string form or `None`
/// when anything along the way is missing.
pub fn extract(record: &Value, path: &FieldPath) -> Option<String> {
    path.resolve(record)
}
