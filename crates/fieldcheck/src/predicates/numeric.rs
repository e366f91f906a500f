//! Numeric predicates: `between` and the `gt`/`lt`/`gte`/`lte` comparators

use super::{integer_param, list_param};
use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::rule::{RuleKind, RuleParam};
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;

/// Inclusive range check against a `lo,hi` parameter.
///
/// Bounds that do not parse as integers make the rule fail rather than
/// raising a configuration error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Between;

impl Between {
    fn bounds(items: &[String]) -> Option<(i64, i64)> {
        match items {
            [lo, hi] => Some((lo.trim().parse().ok()?, hi.trim().parse().ok()?)),
            _ => None,
        }
    }
}

#[async_trait]
impl Predicate for Between {
    fn expects(&self) -> ValueType {
        ValueType::Integer
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let items = list_param(&RuleKind::Between, param)?;
        let value = input.as_integer().unwrap_or_default();
        Ok(match Self::bounds(&items) {
            Some((lo, hi)) => lo <= value && value <= hi,
            None => false,
        })
    }
}

/// Relation tested by [`Compare`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
}

impl Comparison {
    pub fn holds(self, value: i64, threshold: i64) -> bool {
        match self {
            Comparison::Greater => value > threshold,
            Comparison::Less => value < threshold,
            Comparison::GreaterOrEqual => value >= threshold,
            Comparison::LessOrEqual => value <= threshold,
        }
    }

    fn kind(self) -> RuleKind {
        match self {
            Comparison::Greater => RuleKind::Gt,
            Comparison::Less => RuleKind::Lt,
            Comparison::GreaterOrEqual => RuleKind::Gte,
            Comparison::LessOrEqual => RuleKind::Lte,
        }
    }
}

/// Compares an integer value against an integer threshold
#[derive(Debug, Clone, Copy)]
pub struct Compare {
    comparison: Comparison,
}

impl Compare {
    pub fn new(comparison: Comparison) -> Self {
        Self { comparison }
    }

    pub fn greater_than() -> Self {
        Self::new(Comparison::Greater)
    }

    pub fn less_than() -> Self {
        Self::new(Comparison::Less)
    }

    pub fn greater_or_equal() -> Self {
        Self::new(Comparison::GreaterOrEqual)
    }

    pub fn less_or_equal() -> Self {
        Self::new(Comparison::LessOrEqual)
    }
}

#[async_trait]
impl Predicate for Compare {
    fn expects(&self) -> ValueType {
        ValueType::Integer
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let threshold = integer_param(&self.comparison.kind(), param)?;
        let value = input.as_integer().unwrap_or_default();
        Ok(self.comparison.holds(value, threshold))
    }
}
