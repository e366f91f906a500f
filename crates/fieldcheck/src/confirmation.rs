//! Companion-field lookup for the `confirmed` rule

use crate::record::FieldSource;
use serde_json::Value;
use tracing::trace;

/// Field name the `confirmed` rule looks for unless configured otherwise
pub const DEFAULT_CONFIRMATION_FIELD: &str = "Confirmation_password";

/// Snapshot of the companion field, taken once per validation call
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    companion: String,
    value: Option<Value>,
}

impl Confirmation {
    pub fn found(companion: impl Into<String>, value: Value) -> Self {
        Self {
            companion: companion.into(),
            value: Some(value),
        }
    }

    pub fn absent(companion: impl Into<String>) -> Self {
        Self {
            companion: companion.into(),
            value: None,
        }
    }

    /// Name of the companion field that was looked up
    pub fn companion(&self) -> &str {
        &self.companion
    }

    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// True when the companion exists and holds exactly `value`
    pub fn matches(&self, value: &Value) -> bool {
        self.value.as_ref() == Some(value)
    }
}

/// Locate the companion field on `source`.
///
/// Runs before any rule is evaluated; every `confirmed` rule of the same call
/// reads the returned snapshot. A null companion counts as absent.
pub async fn resolve_confirmation(source: &dyn FieldSource, companion: &str) -> Confirmation {
    match source.lookup(companion) {
        Some(Value::Null) | None => Confirmation::absent(companion),
        Some(value) => {
            trace!(companion, "confirmation field found");
            Confirmation::found(companion, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MapRecord, Schema};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_resolves_companion_from_map() {
        let mut data = HashMap::new();
        data.insert("Confirmation_password".to_string(), Value::from("secret"));
        let record = MapRecord::new(&data, HashMap::new());

        let confirmation = resolve_confirmation(&record, DEFAULT_CONFIRMATION_FIELD).await;
        assert!(confirmation.exists());
        assert!(confirmation.matches(&Value::from("secret")));
        assert!(!confirmation.matches(&Value::from("other")));
    }

    #[tokio::test]
    async fn test_missing_companion() {
        let data = HashMap::new();
        let record = MapRecord::new(&data, HashMap::new());

        let confirmation = resolve_confirmation(&record, "password_confirmation").await;
        assert!(!confirmation.exists());
        assert_eq!(confirmation.companion(), "password_confirmation");
        assert!(!confirmation.matches(&Value::Null));
    }

    #[tokio::test]
    async fn test_null_companion_in_map_is_absent() {
        let mut data = HashMap::new();
        data.insert("Confirmation_password".to_string(), Value::Null);
        let record = MapRecord::new(&data, HashMap::new());

        let confirmation = resolve_confirmation(&record, DEFAULT_CONFIRMATION_FIELD).await;
        assert!(!confirmation.exists());
        assert!(!confirmation.matches(&Value::Null));
    }

    struct Signup {
        confirmation: Option<String>,
    }

    #[tokio::test]
    async fn test_none_companion_on_record_is_absent() {
        let schema: Schema<Signup> = Schema::new().field(
            "Confirmation_password",
            "",
            |s: &Signup| &s.confirmation,
        );

        let unset = Signup { confirmation: None };
        let confirmation =
            resolve_confirmation(&schema.bind(&unset), DEFAULT_CONFIRMATION_FIELD).await;
        assert!(!confirmation.exists());

        let set = Signup {
            confirmation: Some("pw".to_string()),
        };
        let confirmation =
            resolve_confirmation(&schema.bind(&set), DEFAULT_CONFIRMATION_FIELD).await;
        assert!(confirmation.matches(&Value::from("pw")));
    }
}
