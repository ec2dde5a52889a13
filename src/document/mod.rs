//! Rule document parsing.
//!
//! Documents arrive as raw JSON text (or already-parsed values) from whatever
//! discovery the host performs; this crate never walks storage itself. Object
//! keys are matched case-insensitively throughout, and rule objects are kept
//! as raw [`Value`]s because unknown property keys must be tolerated rather
//! than rejected by a fixed schema.

use serde_json::{Map, Value};

use crate::{Result, RewriteError};

pub mod matching;

pub use matching::MatchCriteria;

/// One raw rule document as supplied by the host. The `name` is only used in
/// logs and reports (typically the file path the host read it from).
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub name: String,
    pub text: String,
}

impl DocumentSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A parsed rule document: one ordered rule list per entity kind. Either list
/// may be empty.
#[derive(Debug, Clone, Default)]
pub struct RuleDocument {
    pub recipes: Vec<Value>,
    pub pieces: Vec<Value>,
}

impl RuleDocument {
    /// Parse document text as JSON and extract the rule lists.
    pub fn from_text(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Extract the rule lists from an already-parsed document value.
    ///
    /// A document with neither section is valid and empty; a section that is
    /// present but not an array is [`RewriteError::MalformedDocument`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            RewriteError::MalformedDocument("top level is not an object".to_string())
        })?;

        Ok(Self {
            recipes: section(object, "recipes")?,
            pieces: section(object, "pieces")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty() && self.pieces.is_empty()
    }
}

fn section(object: &Map<String, Value>, key: &str) -> Result<Vec<Value>> {
    match get_ignore_case(object, key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(rules)) => Ok(rules.clone()),
        Some(_) => Err(RewriteError::MalformedDocument(format!(
            "'{key}' is not an array"
        ))),
    }
}

/// Case-insensitive key lookup; the first matching key wins.
pub(crate) fn get_ignore_case<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

// Value coercion helpers shared by the match parser and property updaters.
// All of them turn a JSON type mismatch into an explicit InvalidValue.

pub(crate) fn int_value(value: &Value, key: &str) -> Result<i32> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| RewriteError::InvalidValue {
            key: key.to_string(),
            expected: "integer",
        })
}

pub(crate) fn bool_value(value: &Value, key: &str) -> Result<bool> {
    value.as_bool().ok_or_else(|| RewriteError::InvalidValue {
        key: key.to_string(),
        expected: "boolean",
    })
}

pub(crate) fn str_value<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| RewriteError::InvalidValue {
        key: key.to_string(),
        expected: "string",
    })
}

/// Optional integer member of `object`; `null` counts as absent.
pub(crate) fn opt_int(object: &Map<String, Value>, key: &str) -> Result<Option<i32>> {
    match get_ignore_case(object, key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => int_value(value, key).map(Some),
    }
}

/// Optional boolean member of `object`; `null` counts as absent.
pub(crate) fn opt_bool(object: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match get_ignore_case(object, key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => bool_value(value, key).map(Some),
    }
}
