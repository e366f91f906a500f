//! Prefix and suffix exclusion: `doesnt_start_with` and `doesnt_end_with`

use super::text_param;
use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::rule::{RuleKind, RuleParam};
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct DoesntEndWith;

#[async_trait]
impl Predicate for DoesntEndWith {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let suffix = text_param(&RuleKind::DoesntEndWith, param)?;
        Ok(!input.as_text().unwrap_or_default().ends_with(suffix.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DoesntStartWith;

#[async_trait]
impl Predicate for DoesntStartWith {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let prefix = text_param(&RuleKind::DoesntStartWith, param)?;
        Ok(!input.as_text().unwrap_or_default().starts_with(prefix.as_str()))
    }
}
