//! Length predicates: `max`, `min` and `size`
//!
//! Strings are measured in characters, lists in items.

use super::integer_param;
use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::rule::{RuleKind, RuleParam};
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;

fn length_of(input: Coerced<'_>) -> i64 {
    input
        .as_len()
        .map(|len| i64::try_from(len).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

/// Fails when the length exceeds the parameter
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

#[async_trait]
impl Predicate for Max {
    fn expects(&self) -> ValueType {
        ValueType::Sized
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let max = integer_param(&RuleKind::Max, param)?;
        Ok(length_of(input) <= max)
    }
}

/// Fails when the length is below the parameter
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

#[async_trait]
impl Predicate for Min {
    fn expects(&self) -> ValueType {
        ValueType::Sized
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let min = integer_param(&RuleKind::Min, param)?;
        Ok(length_of(input) >= min)
    }
}

/// Passes only when the length equals the parameter exactly
#[derive(Debug, Clone, Copy, Default)]
pub struct Size;

#[async_trait]
impl Predicate for Size {
    fn expects(&self) -> ValueType {
        ValueType::Sized
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let size = integer_param(&RuleKind::Size, param)?;
        Ok(length_of(input) == size)
    }
}
