//! Built-in predicates, one per rule kind

pub mod active_url;
pub mod affix;
pub mod confirmed;
pub mod format;
pub mod length;
pub mod membership;
pub mod numeric;
pub mod presence;
pub mod temporal;

pub use active_url::ActiveUrl;
pub use affix::{DoesntEndWith, DoesntStartWith};
pub use confirmed::Confirmed;
pub use format::{Email, IpFormat, MacAddress, Url};
pub use length::{Max, Min, Size};
pub use membership::{In, NotIn};
pub use numeric::{Between, Compare};
pub use presence::{Accepted, Required};
pub use temporal::{Date, DateFormat};

use crate::error::RuleError;
use crate::rule::{RuleKind, RuleParam};

/// Integer parameter required by `kind`
pub(crate) fn integer_param(kind: &RuleKind, param: Option<&RuleParam>) -> Result<i64, RuleError> {
    let param = param.ok_or_else(|| RuleError::missing_parameter(kind))?;
    param
        .as_integer()
        .ok_or_else(|| RuleError::invalid_parameter(kind, param, "an integer"))
}

/// Literal text parameter required by `kind`; integers are taken verbatim
pub(crate) fn text_param(kind: &RuleKind, param: Option<&RuleParam>) -> Result<String, RuleError> {
    match param {
        None => Err(RuleError::missing_parameter(kind)),
        Some(list @ RuleParam::List(_)) => {
            Err(RuleError::invalid_parameter(kind, list, "a single value"))
        }
        Some(param) => Ok(param.to_string()),
    }
}

/// List parameter required by `kind`; a scalar counts as a one-item list
pub(crate) fn list_param(kind: &RuleKind, param: Option<&RuleParam>) -> Result<Vec<String>, RuleError> {
    param
        .map(RuleParam::items)
        .ok_or_else(|| RuleError::missing_parameter(kind))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::coerce::{coerce, Coerced};
    use crate::confirmation::Confirmation;
    use crate::error::RuleError;
    use crate::rule::Rule;
    use crate::traits::{Predicate, RuleContext};
    use serde_json::Value;

    /// Evaluate `predicate` against `value` for the given rule token
    pub async fn run(predicate: &dyn Predicate, token: &str, value: Value) -> Result<bool, RuleError> {
        run_with(predicate, token, value, &Confirmation::absent("Confirmation_password")).await
    }

    pub async fn run_with(
        predicate: &dyn Predicate,
        token: &str,
        value: Value,
        confirmation: &Confirmation,
    ) -> Result<bool, RuleError> {
        let rule = Rule::parse(token);
        let ctx = RuleContext {
            field: "field",
            confirmation,
        };
        let input: Coerced<'_> = coerce(&value, predicate.expects())?;
        predicate.check(input, rule.param.as_ref(), &ctx).await
    }
}
