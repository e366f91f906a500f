//! List membership predicates: `in` and `notIn`

use super::list_param;
use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::rule::{RuleKind, RuleParam};
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;

fn is_listed(input: Coerced<'_>, items: &[String]) -> bool {
    input
        .as_text()
        .map(|value| items.iter().any(|item| item == value))
        .unwrap_or(false)
}

/// Passes when the value equals one of the listed values
#[derive(Debug, Clone, Copy, Default)]
pub struct In;

#[async_trait]
impl Predicate for In {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let items = list_param(&RuleKind::In, param)?;
        Ok(is_listed(input, &items))
    }
}

/// Passes when the value equals none of the listed values
#[derive(Debug, Clone, Copy, Default)]
pub struct NotIn;

#[async_trait]
impl Predicate for NotIn {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let items = list_param(&RuleKind::NotIn, param)?;
        Ok(!is_listed(input, &items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::test_support::run;
    use serde_json::json;

    #[tokio::test]
    async fn test_in() {
        assert!(run(&In, "in:driver,client,admin", json!("client")).await.unwrap());
        assert!(!run(&In, "in:driver,client,admin", json!("guest")).await.unwrap());
        assert!(!run(&In, "in:driver,client,admin", json!("Client")).await.unwrap());
        assert!(run(&In, "in:solo", json!("solo")).await.unwrap());
    }

    #[tokio::test]
    async fn test_not_in() {
        assert!(run(&NotIn, "notIn:free,freebie", json!("asda")).await.unwrap());
        assert!(!run(&NotIn, "notIn:free,freebie", json!("freebie")).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_list() {
        assert!(matches!(
            run(&In, "in", json!("x")).await,
            Err(RuleError::MissingParameter { .. })
        ));
    }
}
