//! Core validation traits

use crate::coerce::{Coerced, ValueType};
use crate::confirmation::Confirmation;
use crate::error::{RuleError, ValidationError};
use crate::rule::{Rule, RuleParam};
use async_trait::async_trait;
use serde_json::Value;

/// Per-call facts shared by every rule evaluated in one validation run
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Field currently being validated
    pub field: &'a str,
    /// Companion-field snapshot taken before the first rule ran
    pub confirmation: &'a Confirmation,
}

/// Pass/fail check implementing one rule kind
#[async_trait]
pub trait Predicate: Send + Sync {
    /// Type the field value is coerced to before `check` runs
    fn expects(&self) -> ValueType;

    /// Whether null values are checked; when false the rule is skipped for nulls
    fn checks_null(&self) -> bool {
        false
    }

    /// Does `input` satisfy the rule, given its parameter?
    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError>;

    /// Error reported when `check` returned `false`
    fn failure(&self, rule: &Rule, value: &Value, ctx: &RuleContext<'_>) -> ValidationError {
        ValidationError::rule_failed(ctx.field, rule, value)
    }
}

/// Trait for types that can be converted to a validation value
pub trait ToValidationValue {
    fn to_validation_value(&self) -> Value;
}

impl ToValidationValue for String {
    fn to_validation_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValidationValue for &str {
    fn to_validation_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

macro_rules! impl_integer_value {
    ($($ty:ty),*) => {
        $(
            impl ToValidationValue for $ty {
                fn to_validation_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_integer_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl ToValidationValue for f64 {
    fn to_validation_value(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl ToValidationValue for bool {
    fn to_validation_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValidationValue for Value {
    fn to_validation_value(&self) -> Value {
        self.clone()
    }
}

impl<T> ToValidationValue for Option<T>
where
    T: ToValidationValue,
{
    fn to_validation_value(&self) -> Value {
        match self {
            Some(value) => value.to_validation_value(),
            None => Value::Null,
        }
    }
}

impl<T> ToValidationValue for Vec<T>
where
    T: ToValidationValue,
{
    fn to_validation_value(&self) -> Value {
        Value::Array(self.iter().map(|item| item.to_validation_value()).collect())
    }
}
