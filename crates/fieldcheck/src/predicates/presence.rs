//! Presence predicates: `required` and `accepted`

use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::rule::RuleParam;
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;
use serde_json::Value;

/// Fails for null, the empty string, and empty lists or objects
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Required {
    fn is_empty(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(arr) => arr.is_empty(),
            Value::Object(obj) => obj.is_empty(),
            _ => false,
        }
    }
}

#[async_trait]
impl Predicate for Required {
    fn expects(&self) -> ValueType {
        ValueType::Any
    }

    fn checks_null(&self) -> bool {
        true
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        Ok(match input {
            Coerced::Any(value) => !Self::is_empty(value),
            _ => true,
        })
    }
}

/// Passes for `"yes"`, `"on"`, the integer `1` and `true`
#[derive(Debug, Clone, Copy, Default)]
pub struct Accepted;

impl Accepted {
    fn is_accepted(value: &Value) -> bool {
        match value {
            Value::String(s) => s == "yes" || s == "on",
            Value::Number(n) => n.as_i64() == Some(1),
            Value::Bool(b) => *b,
            _ => false,
        }
    }
}

#[async_trait]
impl Predicate for Accepted {
    fn expects(&self) -> ValueType {
        ValueType::Any
    }

    fn checks_null(&self) -> bool {
        true
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        Ok(matches!(input, Coerced::Any(value) if Self::is_accepted(value)))
    }
}
