//! Field extraction for typed records and key/value maps
//!
//! Both record shapes are exposed through [`FieldSource`], which yields one
//! [`FieldDescriptor`] per field: its name, its current value and the rules
//! attached to it.
//!
//! A typed record describes its fields with a [`Schema`], built once per
//! record type and reused for every call:
//!
//! ```
//! use fieldcheck::{Schema, Validatable};
//! use once_cell::sync::Lazy;
//!
//! struct Post {
//!     title: String,
//!     tags: Vec<String>,
//! }
//!
//! static POST_SCHEMA: Lazy<Schema<Post>> = Lazy::new(|| {
//!     Schema::new()
//!         .field("Title", "required|max:20|min:2", |p: &Post| &p.title)
//!         .field("Tags", "size:2", |p: &Post| &p.tags)
//! });
//!
//! impl Validatable for Post {
//!     fn schema() -> &'static Schema<Self> {
//!         &POST_SCHEMA
//!     }
//! }
//! ```

use crate::rule::{parse_rule_spec, Rule};
use crate::traits::ToValidationValue;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Where a field's rules come from
#[derive(Debug, Clone, Copy)]
pub enum RuleSource<'a> {
    /// Inline rule spec such as `"required|max:20"`
    Declared(&'a str),
    /// Rules registered programmatically
    Registered(&'a [Rule]),
}

impl RuleSource<'_> {
    /// Parsed rules in declaration order
    pub fn rules(&self) -> Vec<Rule> {
        match self {
            RuleSource::Declared(spec) => parse_rule_spec(spec),
            RuleSource::Registered(rules) => rules.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RuleSource::Declared(spec) => spec.trim().is_empty(),
            RuleSource::Registered(rules) => rules.is_empty(),
        }
    }
}

/// One field as seen by the validation engine
#[derive(Debug, Clone)]
pub struct FieldDescriptor<'a> {
    pub name: &'a str,
    pub value: Value,
    pub rules: RuleSource<'a>,
}

/// A record whose fields can be validated
pub trait FieldSource: Send + Sync {
    /// Fields to validate, in iteration order
    fn descriptors(&self) -> Vec<FieldDescriptor<'_>>;

    /// Current value of any field on the record, whether or not it carries rules
    fn lookup(&self, name: &str) -> Option<Value>;
}

type Accessor<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;

struct SchemaField<T> {
    name: String,
    rules: String,
    accessor: Accessor<T>,
}

/// Field list for a typed record: name, rule spec and accessor per field.
///
/// Field order is declaration order and is the order errors are reported in.
pub struct Schema<T> {
    fields: Vec<SchemaField<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a field with its rule spec (may be empty) and accessor
    pub fn field<F, V>(mut self, name: impl Into<String>, rules: impl Into<String>, accessor: F) -> Self
    where
        F: for<'r> Fn(&'r T) -> &'r V + Send + Sync + 'static,
        V: ToValidationValue + 'static,
    {
        self.fields.push(SchemaField {
            name: name.into(),
            rules: rules.into(),
            accessor: Box::new(move |record| accessor(record).to_validation_value()),
        });
        self
    }

    /// Pair the schema with a record instance
    pub fn bind<'a>(&'a self, record: &'a T) -> SchemaRecord<'a, T> {
        SchemaRecord {
            schema: self,
            record,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|field| (&field.name, &field.rules)))
            .finish()
    }
}

/// Typed records that carry their own schema
pub trait Validatable: Sized + Sync + 'static {
    fn schema() -> &'static Schema<Self>;
}

/// A typed record bound to its schema
pub struct SchemaRecord<'a, T> {
    schema: &'a Schema<T>,
    record: &'a T,
}

impl<T: Sync> FieldSource for SchemaRecord<'_, T> {
    fn descriptors(&self) -> Vec<FieldDescriptor<'_>> {
        self.schema
            .fields
            .iter()
            .map(|field| FieldDescriptor {
                name: &field.name,
                value: (field.accessor)(self.record),
                rules: RuleSource::Declared(&field.rules),
            })
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.schema
            .fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| (field.accessor)(self.record))
    }
}

/// A key/value record validated against registered rules.
///
/// Iteration follows the rule map's own (unspecified) order; callers must
/// not rely on the order of errors produced from a map record. Fields that
/// have rules but no entry in the map are visited with a null value.
pub struct MapRecord<'a> {
    data: &'a HashMap<String, Value>,
    rules: HashMap<String, Vec<Rule>>,
}

impl<'a> MapRecord<'a> {
    pub fn new(data: &'a HashMap<String, Value>, rules: HashMap<String, Vec<Rule>>) -> Self {
        Self { data, rules }
    }
}

impl FieldSource for MapRecord<'_> {
    fn descriptors(&self) -> Vec<FieldDescriptor<'_>> {
        self.rules
            .iter()
            .map(|(name, rules)| FieldDescriptor {
                name,
                value: self.data.get(name).cloned().unwrap_or(Value::Null),
                rules: RuleSource::Registered(rules),
            })
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.data.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleKind;

    struct Account {
        name: String,
        age: i32,
        nickname: Option<String>,
        confirmation: String,
    }

    fn account_schema() -> Schema<Account> {
        Schema::new()
            .field("Name", "required|max:10", |a: &Account| &a.name)
            .field("Age", "between:1,40", |a: &Account| &a.age)
            .field("Nickname", "min:2", |a: &Account| &a.nickname)
            .field("Confirmation_password", "", |a: &Account| &a.confirmation)
    }

    fn account() -> Account {
        Account {
            name: "Ada".to_string(),
            age: 36,
            nickname: None,
            confirmation: "pw".to_string(),
        }
    }

    #[test]
    fn test_schema_descriptors_follow_declaration_order() {
        let schema = account_schema();
        let record = account();
        let bound = schema.bind(&record);

        let descriptors = bound.descriptors();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Name", "Age", "Nickname", "Confirmation_password"]);

        assert_eq!(descriptors[0].value, Value::from("Ada"));
        assert_eq!(descriptors[1].value, Value::from(36));
        assert_eq!(descriptors[2].value, Value::Null);
        assert!(descriptors[3].rules.is_empty());

        let rules = descriptors[0].rules.rules();
        assert_eq!(rules[0].kind, RuleKind::Required);
        assert_eq!(rules[1].kind, RuleKind::Max);
    }

    #[test]
    fn test_schema_lookup() {
        let schema = account_schema();
        let record = account();
        let bound = schema.bind(&record);

        assert_eq!(bound.lookup("Confirmation_password"), Some(Value::from("pw")));
        assert_eq!(bound.lookup("missing"), None);
        assert_eq!(schema.field_names().count(), 4);
    }

    #[test]
    fn test_map_record_fills_missing_fields_with_null() {
        let mut data = HashMap::new();
        data.insert("title".to_string(), Value::from("asda"));

        let mut rules = HashMap::new();
        rules.insert("title".to_string(), vec![Rule::parse("max:2")]);
        rules.insert("body".to_string(), vec![Rule::parse("required")]);

        let record = MapRecord::new(&data, rules);
        let mut descriptors = record.descriptors();
        descriptors.sort_by(|a, b| a.name.cmp(b.name));

        assert_eq!(descriptors[0].name, "body");
        assert_eq!(descriptors[0].value, Value::Null);
        assert_eq!(descriptors[1].value, Value::from("asda"));
        assert_eq!(record.lookup("title"), Some(Value::from("asda")));
    }
}
