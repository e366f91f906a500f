//! Maps rule kinds to their predicates

use crate::predicates::*;
use crate::reachability::SharedReachability;
use crate::rule::RuleKind;
use crate::traits::Predicate;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Rule-kind → predicate table.
///
/// Starts with every built-in kind; [`PredicateRegistry::register`] adds new
/// kinds (`RuleKind::Other`) or replaces built-ins.
#[derive(Clone)]
pub struct PredicateRegistry {
    predicates: HashMap<RuleKind, Arc<dyn Predicate>>,
}

impl PredicateRegistry {
    /// Empty registry with no predicates at all
    pub fn empty() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    /// Registry with all built-in predicates
    pub fn with_builtins(reachability: SharedReachability, active_url_timeout: Duration) -> Self {
        let mut registry = Self::empty();
        registry
            .register(RuleKind::Required, Required)
            .register(RuleKind::Max, Max)
            .register(RuleKind::Min, Min)
            .register(RuleKind::Email, Email)
            .register(RuleKind::Url, Url)
            .register(
                RuleKind::ActiveUrl,
                ActiveUrl::new(reachability, active_url_timeout),
            )
            .register(RuleKind::IpFormat, IpFormat)
            .register(RuleKind::Date, Date)
            .register(RuleKind::DateFormat, DateFormat)
            .register(RuleKind::Between, Between)
            .register(RuleKind::In, In)
            .register(RuleKind::NotIn, NotIn)
            .register(RuleKind::Accepted, Accepted)
            .register(RuleKind::Size, Size)
            .register(RuleKind::Confirmed, Confirmed)
            .register(RuleKind::DoesntEndWith, DoesntEndWith)
            .register(RuleKind::DoesntStartWith, DoesntStartWith)
            .register(RuleKind::MacAddress, MacAddress)
            .register(RuleKind::Gt, Compare::greater_than())
            .register(RuleKind::Lt, Compare::less_than())
            .register(RuleKind::Gte, Compare::greater_or_equal())
            .register(RuleKind::Lte, Compare::less_or_equal());
        registry
    }

    /// Add or replace the predicate for `kind`
    pub fn register<P>(&mut self, kind: RuleKind, predicate: P) -> &mut Self
    where
        P: Predicate + 'static,
    {
        self.predicates.insert(kind, Arc::new(predicate));
        self
    }

    /// Add or replace the predicate for `kind` from a shared instance
    pub fn register_shared(&mut self, kind: RuleKind, predicate: Arc<dyn Predicate>) -> &mut Self {
        self.predicates.insert(kind, predicate);
        self
    }

    pub fn get(&self, kind: &RuleKind) -> Option<&Arc<dyn Predicate>> {
        self.predicates.get(kind)
    }

    pub fn contains(&self, kind: &RuleKind) -> bool {
        self.predicates.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl std::fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.predicates.keys().map(RuleKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("PredicateRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}
