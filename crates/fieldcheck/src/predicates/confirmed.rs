//! `confirmed`: the value must equal the record's companion confirmation field

use crate::coerce::{Coerced, ValueType};
use crate::error::{RuleError, ValidationError};
use crate::rule::{Rule, RuleParam};
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct Confirmed;

#[async_trait]
impl Predicate for Confirmed {
    fn expects(&self) -> ValueType {
        ValueType::Any
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        Ok(match input {
            Coerced::Any(value) => ctx.confirmation.matches(value),
            _ => false,
        })
    }

    fn failure(&self, rule: &Rule, value: &Value, ctx: &RuleContext<'_>) -> ValidationError {
        if ctx.confirmation.exists() {
            ValidationError::rule_failed(ctx.field, rule, value)
        } else {
            ValidationError::confirmation_missing(ctx.field, ctx.confirmation.companion())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirmation::Confirmation;
    use crate::predicates::test_support::{run, run_with};
    use serde_json::json;

    #[tokio::test]
    async fn test_matching_confirmation_passes() {
        let confirmation = Confirmation::found("Confirmation_password", json!("s3cret"));
        assert!(run_with(&Confirmed, "confirmed", json!("s3cret"), &confirmation).await.unwrap());
        assert!(!run_with(&Confirmed, "confirmed", json!("other"), &confirmation).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_companion_fails() {
        assert!(!run(&Confirmed, "confirmed", json!("s3cret")).await.unwrap());
    }

    #[test]
    fn test_failure_messages_differ() {
        let rule = Rule::parse("confirmed");
        let value = json!("s3cret");

        let absent = Confirmation::absent("Confirmation_password");
        let ctx = RuleContext {
            field: "Password",
            confirmation: &absent,
        };
        let error = Confirmed.failure(&rule, &value, &ctx);
        assert_eq!(error.code, "confirmation_missing");

        let found = Confirmation::found("Confirmation_password", json!("different"));
        let ctx = RuleContext {
            field: "Password",
            confirmation: &found,
        };
        let error = Confirmed.failure(&rule, &value, &ctx);
        assert_eq!(error.code, "confirmed");
        assert_eq!(error.message, "The Password field does not match its confirmation");
    }
}
