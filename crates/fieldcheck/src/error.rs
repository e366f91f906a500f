//! Validation error types and handling

use crate::coerce::ValueType;
use crate::rule::{Rule, RuleKind, RuleParam};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Individual validation error for a specific field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Additional context or hints
    pub context: Option<serde_json::Value>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: "validation_failed".to_string(),
            context: None,
        }
    }

    /// Create a validation error with a specific code
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
            context: None,
        }
    }

    /// Set the error code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set additional context
    pub fn context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Build the error reported when `rule` rejects the value of `field`.
    pub fn rule_failed(field: &str, rule: &Rule, value: &serde_json::Value) -> Self {
        let error = Self::with_code(
            field,
            failure_message(field, rule, value),
            rule.kind.as_str(),
        );
        attach_parameter(error, rule)
    }

    /// Build the error reported when a rule could not be evaluated at all.
    pub fn rule_error(field: &str, rule: &Rule, error: &RuleError) -> Self {
        let error = Self::with_code(field, error.describe(field), error.code());
        attach_parameter(error, rule)
    }

    /// Build the error reported by `confirmed` when the record has no companion field.
    pub fn confirmation_missing(field: &str, companion: &str) -> Self {
        Self::with_code(
            field,
            format!("The {} field requires a confirmation field", field),
            "confirmation_missing",
        )
        .context(serde_json::json!({ "companion": companion }))
    }
}

fn attach_parameter(error: ValidationError, rule: &Rule) -> ValidationError {
    match &rule.param {
        Some(param) => error.context(serde_json::json!({
            "rule": rule.kind.as_str(),
            "parameter": param.to_json(),
        })),
        None => error,
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered collection of validation errors.
///
/// Errors keep the order in which their rules were evaluated: field iteration
/// order first, then rule order within the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Error)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a single validation error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a simple validation error with field and message
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.add(ValidationError::new(field, message));
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of validation errors across all fields
    pub fn total_errors(&self) -> usize {
        self.errors.len()
    }

    /// Get the number of distinct fields with errors
    pub fn field_count(&self) -> usize {
        let mut fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_str()).collect();
        fields.sort_unstable();
        fields.dedup();
        fields.len()
    }

    /// Get errors for a specific field, in evaluation order
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Check if a specific field has errors
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Iterate over the errors in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Append another collection, keeping both orders
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// `Ok(())` when empty, otherwise the collection itself as the error
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.field_count())?;
            for error in &self.errors {
                write!(f, "\n  {}: {}", error.field, error.message)?;
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Reasons a rule could not be evaluated against a value.
///
/// These never abort validation; the engine turns each one into a
/// [`ValidationError`] for the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("expected a {expected} value, found {found}")]
    Coercion { expected: ValueType, found: String },

    #[error("rule '{rule}' requires a parameter")]
    MissingParameter { rule: String },

    #[error("rule '{rule}' has an invalid parameter '{value}', expected {expected}")]
    InvalidParameter {
        rule: String,
        value: String,
        expected: String,
    },

    #[error("no predicate is registered for rule '{rule}'")]
    UnknownRule { rule: String },
}

impl RuleError {
    pub fn missing_parameter(kind: &RuleKind) -> Self {
        Self::MissingParameter {
            rule: kind.as_str().to_string(),
        }
    }

    pub fn invalid_parameter(
        kind: &RuleKind,
        param: &RuleParam,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            rule: kind.as_str().to_string(),
            value: param.to_string(),
            expected: expected.into(),
        }
    }

    /// Machine-readable code used for the resulting [`ValidationError`]
    pub fn code(&self) -> &'static str {
        match self {
            RuleError::Coercion { .. } => "invalid_type",
            RuleError::MissingParameter { .. } | RuleError::InvalidParameter { .. } => {
                "invalid_rule"
            }
            RuleError::UnknownRule { .. } => "unknown_rule",
        }
    }

    fn describe(&self, field: &str) -> String {
        match self {
            RuleError::Coercion { expected, found } => {
                format!("The {} field must be a {} value, found {}", field, expected, found)
            }
            other => format!("The {} field cannot be validated: {}", field, other),
        }
    }

    /// Configuration problems are logged louder than type mismatches
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RuleError::Coercion { .. })
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },
}

impl ConfigError {
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn param_text(rule: &Rule) -> String {
    rule.param
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_default()
}

/// Message table for rule failures.
fn failure_message(field: &str, rule: &Rule, value: &serde_json::Value) -> String {
    let param = param_text(rule);
    match &rule.kind {
        RuleKind::Required => format!("The {} field is required", field),
        RuleKind::Max => format!("Field {} exceeds the maximum length of {}", field, param),
        RuleKind::Min => format!("Field {} is less than the minimum length of {}", field, param),
        RuleKind::Email => format!("Input field {} must be a valid email format", field),
        RuleKind::Url => format!("The {} field must be a valid URL", field),
        RuleKind::ActiveUrl => format!("The {} field must be an active URL", field),
        RuleKind::IpFormat => format!("The {} field must be a valid IP address", field),
        RuleKind::Date => format!("The {} field is not a valid date", field),
        RuleKind::DateFormat => format!(
            "The {} field does not match the date format {}",
            field, param
        ),
        RuleKind::Between => match rule.param.as_ref().map(RuleParam::items) {
            Some(items) if items.len() == 2 => format!(
                "The {} field must be between {} and {}",
                field, items[0], items[1]
            ),
            _ => format!("The {} field must be between {}", field, param),
        },
        RuleKind::In => format!(
            "Value '{}' is not allowed for {}. Allowed values are: {}",
            display_value(value),
            field,
            param
        ),
        RuleKind::NotIn => format!(
            "Value '{}' is not allowed for {}. Must not be one of: {}",
            display_value(value),
            field,
            param
        ),
        RuleKind::Accepted => format!("The {} field must be accepted", field),
        RuleKind::Size => format!("The {} field must have a size of exactly {}", field, param),
        RuleKind::Confirmed => format!("The {} field does not match its confirmation", field),
        RuleKind::DoesntEndWith => format!("The {} field must not end with '{}'", field, param),
        RuleKind::DoesntStartWith => {
            format!("The {} field must not start with '{}'", field, param)
        }
        RuleKind::MacAddress => format!("The {} field must be a valid MAC address", field),
        RuleKind::Gt => format!("The {} field must be greater than {}", field, param),
        RuleKind::Lt => format!("The {} field must be less than {}", field, param),
        RuleKind::Gte => format!(
            "The {} field must be greater than or equal to {}",
            field, param
        ),
        RuleKind::Lte => format!(
            "The {} field must be less than or equal to {}",
            field, param
        ),
        RuleKind::Other(name) => format!("The {} field failed the '{}' rule", field, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_validation_error_creation() {
        let error = ValidationError::new("email", "Invalid email format");
        assert_eq!(error.field, "email");
        assert_eq!(error.message, "Invalid email format");
        assert_eq!(error.code, "validation_failed");
        assert!(error.context.is_none());
    }

    #[test]
    fn test_validation_errors_keep_insertion_order() {
        let mut errors = ValidationErrors::new();

        errors.add_error("email", "Invalid format");
        errors.add_error("age", "Must be positive");
        errors.add_error("email", "Already exists");

        assert_eq!(errors.field_count(), 2);
        assert_eq!(errors.total_errors(), 3);
        assert!(errors.has_field_errors("email"));
        assert!(!errors.has_field_errors("name"));

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "age", "email"]);

        let email_errors = errors.get_field_errors("email");
        assert_eq!(email_errors[1].message, "Already exists");
    }

    #[test]
    fn test_validation_errors_merge() {
        let mut errors1 = ValidationErrors::new();
        errors1.add_error("field1", "Error 1");

        let mut errors2 = ValidationErrors::new();
        errors2.add_error("field2", "Error 2");

        errors1.merge(errors2);
        assert_eq!(errors1.total_errors(), 2);
        assert_eq!(errors1.errors[1].field, "field2");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let errors = ValidationErrors::from(ValidationError::new("a", "b"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_rule_failed_message_names_bound() {
        let rule = Rule::parse("max:10");
        let error = ValidationError::rule_failed("Title", &rule, &Value::from("Kostas rmanto"));

        assert_eq!(error.code, "max");
        assert_eq!(error.message, "Field Title exceeds the maximum length of 10");
        assert_eq!(error.context.unwrap()["parameter"], serde_json::json!(10));
    }

    #[test]
    fn test_between_message_uses_both_bounds() {
        let rule = Rule::parse("between:1,40");
        let error = ValidationError::rule_failed("AllowAge", &rule, &Value::from(41));
        assert_eq!(error.message, "The AllowAge field must be between 1 and 40");
    }

    #[test]
    fn test_rule_error_codes() {
        let coercion = RuleError::Coercion {
            expected: ValueType::Integer,
            found: "string".to_string(),
        };
        assert_eq!(coercion.code(), "invalid_type");
        assert!(!coercion.is_configuration());

        let missing = RuleError::missing_parameter(&RuleKind::Max);
        assert_eq!(missing.code(), "invalid_rule");
        assert!(missing.is_configuration());

        let rule = Rule::parse("max");
        let error = ValidationError::rule_error("title", &rule, &missing);
        assert_eq!(error.code, "invalid_rule");
        assert!(error.message.contains("requires a parameter"));
    }

    #[test]
    fn test_to_json_shape() {
        let errors = ValidationErrors::from(ValidationError::new("name", "required"));
        let json = errors.to_json();
        assert_eq!(json["error"]["code"], "validation_failed");
        assert_eq!(json["error"]["fields"][0]["field"], "name");
    }
}
