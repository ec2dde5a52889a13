//! Match criteria: the predicate that selects a rule's target entity.

use serde_json::Value;

use crate::document::{get_ignore_case, int_value, str_value};
use crate::{Result, RewriteError};

/// Parsed `match` block of a rewrite rule.
///
/// `name` is always required. `amount` is an optional disambiguator for
/// recipe lookup; `build_tool` is required by piece lookup. Absence of either
/// optional field means "no constraint", never a zero/empty default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    pub name: String,
    pub amount: Option<i32>,
    pub build_tool: Option<String>,
}

impl MatchCriteria {
    /// Extract the criteria from a raw rule object. Key lookup is
    /// case-insensitive.
    pub fn parse(rule: &Value) -> Result<Self> {
        let object = rule.as_object().ok_or(RewriteError::MissingMatchBlock)?;
        let block = get_ignore_case(object, "match")
            .and_then(Value::as_object)
            .ok_or(RewriteError::MissingMatchBlock)?;

        let name = get_ignore_case(block, "name")
            .and_then(Value::as_str)
            .ok_or(RewriteError::MissingRequiredField("name"))?
            .to_string();

        let amount = match get_ignore_case(block, "amount") {
            None | Some(Value::Null) => None,
            Some(value) => Some(int_value(value, "match.amount")?),
        };

        let build_tool = match get_ignore_case(block, "buildTool") {
            None | Some(Value::Null) => None,
            Some(value) => Some(str_value(value, "match.buildTool")?.to_string()),
        };

        Ok(Self {
            name,
            amount,
            build_tool,
        })
    }
}
