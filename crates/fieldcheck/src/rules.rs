//! Programmatic rule registration for key/value records

use crate::rule::{parse_rule_spec, Rule, RuleKind, RuleParam};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Field name → ordered rules.
///
/// Append-only: rules are added per field in call order and never removed
/// or overwritten. Registration takes `&self` and is safe from several
/// threads; each validation call works on a snapshot.
#[derive(Default)]
pub struct RuleRegistry {
    field_rules: RwLock<HashMap<String, Vec<Rule>>>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("field_rules_count", &self.field_rule_count())
            .field("validated_fields", &self.get_validated_fields())
            .finish()
    }
}

impl Clone for RuleRegistry {
    fn clone(&self) -> Self {
        Self {
            field_rules: RwLock::new(self.snapshot()),
        }
    }
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<Rule>>> {
        self.field_rules
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<Rule>>> {
        self.field_rules
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a rule for a specific field
    pub fn add_rule(&self, field: impl Into<String>, rule: Rule) {
        self.write().entry(field.into()).or_default().push(rule);
    }

    /// Append every rule of a spec string such as `"required|max:2"`
    pub fn add_rules(&self, field: impl Into<String>, spec: &str) {
        let rules = parse_rule_spec(spec);
        self.write().entry(field.into()).or_default().extend(rules);
    }

    /// Builder-style [`RuleRegistry::add_rule`]
    pub fn field(self, field: impl Into<String>, kind: RuleKind, param: Option<RuleParam>) -> Self {
        self.add_rule(field, Rule { kind, param });
        self
    }

    /// Builder-style [`RuleRegistry::add_rules`]
    pub fn field_spec(self, field: impl Into<String>, spec: &str) -> Self {
        self.add_rules(field, spec);
        self
    }

    /// Get rules for a specific field
    pub fn get_field_rules(&self, field: &str) -> Option<Vec<Rule>> {
        self.read().get(field).cloned()
    }

    /// Copy of every field's rules
    pub fn snapshot(&self) -> HashMap<String, Vec<Rule>> {
        self.read().clone()
    }

    /// Check if there are any rules defined
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Get the number of fields with rules
    pub fn field_rule_count(&self) -> usize {
        self.read().len()
    }

    /// Get all field names that have validation rules, sorted
    pub fn get_validated_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = self.read().keys().cloned().collect();
        fields.sort();
        fields
    }
}
