//! `active_url`: the URL must answer through the injected reachability check

use crate::coerce::{Coerced, ValueType};
use crate::error::RuleError;
use crate::reachability::SharedReachability;
use crate::rule::RuleParam;
use crate::traits::{Predicate, RuleContext};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Bounded reachability check; a timeout counts as "not active"
#[derive(Clone)]
pub struct ActiveUrl {
    checker: SharedReachability,
    timeout: Duration,
}

impl ActiveUrl {
    pub fn new(checker: SharedReachability, timeout: Duration) -> Self {
        Self { checker, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for ActiveUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveUrl")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Predicate for ActiveUrl {
    fn expects(&self) -> ValueType {
        ValueType::Text
    }

    async fn check(
        &self,
        input: Coerced<'_>,
        _param: Option<&RuleParam>,
        ctx: &RuleContext<'_>,
    ) -> Result<bool, RuleError> {
        let url = input.as_text().unwrap_or_default();
        match tokio::time::timeout(self.timeout, self.checker.is_reachable(url)).await {
            Ok(reachable) => Ok(reachable),
            Err(_) => {
                debug!(field = ctx.field, url, timeout = ?self.timeout, "reachability check timed out");
                Ok(false)
            }
        }
    }
}
