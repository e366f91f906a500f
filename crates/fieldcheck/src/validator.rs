//! The validation engine
//!
//! For each field the engine parses the rule spec once, evaluates every rule
//! against the field's value and records every failure. Nothing short-circuits:
//! all rules of all fields run on every call, and problems with the rules
//! themselves (bad parameters, unknown kinds, type mismatches) become errors
//! on the field instead of aborting the call.

use crate::coerce::coerce;
use crate::config::ValidatorConfig;
use crate::confirmation::{resolve_confirmation, Confirmation};
use crate::error::{ConfigError, RuleError, ValidationError, ValidationErrors};
use crate::reachability::{HttpReachability, SharedReachability};
use crate::record::{FieldSource, MapRecord, Schema, Validatable};
use crate::registry::PredicateRegistry;
use crate::rule::{Rule, RuleKind};
use crate::rules::RuleRegistry;
use crate::traits::{Predicate, RuleContext};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A field ready for evaluation: value captured, rules parsed
#[derive(Debug)]
struct PreparedField {
    name: String,
    value: Value,
    rules: Vec<Rule>,
}

/// Validates typed records against their schema and key/value maps against
/// registered rules.
pub struct Validator {
    config: ValidatorConfig,
    predicates: PredicateRegistry,
    rules: RuleRegistry,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .field("predicates", &self.predicates)
            .field("rules", &self.rules)
            .finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Validator with default configuration and HTTP reachability checks
    pub fn new() -> Self {
        ValidatorBuilder::new().assemble()
    }

    /// Validator for `config`, rejected when the config does not validate
    pub fn from_config(config: ValidatorConfig) -> Result<Self, ConfigError> {
        ValidatorBuilder::new().config(config).build()
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Append a rule for `field`, used when validating maps
    pub fn add_rule(&self, field: impl Into<String>, rule: Rule) {
        self.rules.add_rule(field, rule);
    }

    /// Append every rule of `spec` for `field`, used when validating maps
    pub fn add_rules(&self, field: impl Into<String>, spec: &str) {
        self.rules.add_rules(field, spec);
    }

    /// Snapshot of the registered map-mode rules
    pub fn registered_rules(&self) -> HashMap<String, Vec<Rule>> {
        let rules = self.rules.snapshot();
        for (field, field_rules) in &rules {
            let spec: Vec<String> = field_rules.iter().map(Rule::to_string).collect();
            debug!(field = %field, rules = %spec.join("|"), "registered rules");
        }
        rules
    }

    /// Add or replace the predicate behind a rule kind
    pub fn register_predicate<P>(&mut self, kind: RuleKind, predicate: P)
    where
        P: Predicate + 'static,
    {
        self.predicates.register(kind, predicate);
    }

    /// Validate a typed record against its own schema
    pub async fn validate_record<T: Validatable>(&self, record: &T) -> ValidationErrors {
        self.validate_with_schema(T::schema(), record).await
    }

    /// Validate a typed record against an explicit schema
    pub async fn validate_with_schema<T>(&self, schema: &Schema<T>, record: &T) -> ValidationErrors
    where
        T: Sync + 'static,
    {
        self.validate(&schema.bind(record)).await
    }

    /// Validate a key/value record against the registered rules.
    ///
    /// Error order across fields is unspecified in this mode.
    pub async fn validate_map(&self, data: &HashMap<String, Value>) -> ValidationErrors {
        let record = MapRecord::new(data, self.rules.snapshot());
        self.validate(&record).await
    }

    /// Validate any record shape. Returns an empty collection when every rule passes.
    pub async fn validate(&self, source: &dyn FieldSource) -> ValidationErrors {
        let (confirmation, fields) = tokio::join!(
            resolve_confirmation(source, self.config.get_confirmation_field()),
            prepare_fields(source),
        );

        debug!(
            fields = fields.len(),
            confirmation = confirmation.exists(),
            "validating record"
        );

        let mut errors = ValidationErrors::new();
        for field in &fields {
            for rule in &field.rules {
                self.evaluate(field, rule, &confirmation, &mut errors).await;
            }
        }

        debug!(errors = errors.total_errors(), "validation finished");
        errors
    }

    async fn evaluate(
        &self,
        field: &PreparedField,
        rule: &Rule,
        confirmation: &Confirmation,
        errors: &mut ValidationErrors,
    ) {
        let ctx = RuleContext {
            field: &field.name,
            confirmation,
        };

        let Some(predicate) = self.predicates.get(&rule.kind) else {
            let error = RuleError::UnknownRule {
                rule: rule.kind.to_string(),
            };
            warn!(field = %field.name, rule = %rule, "no predicate registered for rule");
            errors.add(ValidationError::rule_error(&field.name, rule, &error));
            return;
        };

        if field.value.is_null() && !predicate.checks_null() {
            trace!(field = %field.name, rule = %rule, "skipping rule for null value");
            return;
        }

        let outcome = match coerce(&field.value, predicate.expects()) {
            Ok(input) => predicate.check(input, rule.param.as_ref(), &ctx).await,
            Err(error) => Err(error),
        };

        match outcome {
            Ok(true) => trace!(field = %field.name, rule = %rule, "rule passed"),
            Ok(false) => {
                trace!(field = %field.name, rule = %rule, "rule failed");
                errors.add(predicate.failure(rule, &field.value, &ctx));
            }
            Err(error) => {
                if error.is_configuration() {
                    warn!(field = %field.name, rule = %rule, %error, "rule could not be evaluated");
                } else {
                    debug!(field = %field.name, rule = %rule, %error, "value has the wrong type");
                }
                errors.add(ValidationError::rule_error(&field.name, rule, &error));
            }
        }
    }
}

/// Capture values and parse rule specs; fields without rules are dropped
async fn prepare_fields(source: &dyn FieldSource) -> Vec<PreparedField> {
    source
        .descriptors()
        .into_iter()
        .filter(|descriptor| !descriptor.rules.is_empty())
        .map(|descriptor| PreparedField {
            name: descriptor.name.to_string(),
            rules: descriptor.rules.rules(),
            value: descriptor.value,
        })
        .collect()
}

/// Builder for [`Validator`]
#[derive(Default)]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
    reachability: Option<SharedReachability>,
    predicates: Vec<(RuleKind, Arc<dyn Predicate>)>,
    rules: RuleRegistry,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Reachability check used by `active_url`; defaults to HTTP
    pub fn reachability(mut self, reachability: SharedReachability) -> Self {
        self.reachability = Some(reachability);
        self
    }

    /// Add or replace the predicate behind a rule kind
    pub fn predicate<P>(mut self, kind: RuleKind, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        self.predicates.push((kind, Arc::new(predicate)));
        self
    }

    /// Pre-register map-mode rules for `field`
    pub fn rules(self, field: impl Into<String>, spec: &str) -> Self {
        self.rules.add_rules(field, spec);
        self
    }

    pub fn build(self) -> Result<Validator, ConfigError> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    fn assemble(self) -> Validator {
        let reachability = self
            .reachability
            .unwrap_or_else(|| Arc::new(HttpReachability::new()));
        let mut predicates =
            PredicateRegistry::with_builtins(reachability, *self.config.get_active_url_timeout());
        for (kind, predicate) in self.predicates {
            predicates.register_shared(kind, predicate);
        }

        Validator {
            config: self.config,
            predicates,
            rules: self.rules,
        }
    }
}
