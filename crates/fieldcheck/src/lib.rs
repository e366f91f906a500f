//! # fieldcheck
//!
//! Declarative field validation. Each field carries a pipe-delimited rule spec
//! such as `"required|max:20|min:2"`; the validator evaluates every rule and
//! returns every failure it finds.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldcheck::{Schema, StaticReachability, Validator};
//! use std::sync::Arc;
//!
//! struct Post {
//!     title: String,
//! }
//!
//! let schema = Schema::new().field("Title", "required|max:10|min:2", |p: &Post| &p.title);
//! let post = Post { title: "Kostas rmanto".to_string() };
//!
//! # tokio_test::block_on(async {
//! let validator = Validator::builder()
//!     .reachability(Arc::new(StaticReachability(true)))
//!     .build()
//!     .unwrap();
//!
//! let errors = validator.validate_with_schema(&schema, &post).await;
//! assert_eq!(errors.total_errors(), 1);
//! assert_eq!(errors.errors[0].message, "Field Title exceeds the maximum length of 10");
//! # });
//! ```

pub mod coerce;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod predicates;
pub mod reachability;
pub mod record;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod traits;
pub mod validator;

// Re-exports for easy access
pub use coerce::{Coerced, ValueType};
pub use config::{ValidatorConfig, ValidatorConfigBuilder, ValidatorDefaults};
pub use confirmation::{Confirmation, DEFAULT_CONFIRMATION_FIELD};
pub use error::{ConfigError, RuleError, ValidationError, ValidationErrors, ValidationResult};
pub use reachability::{
    FnReachability, HttpReachability, ReachabilityCheck, SharedReachability, StaticReachability,
};
pub use record::{FieldDescriptor, FieldSource, MapRecord, RuleSource, Schema, Validatable};
pub use registry::PredicateRegistry;
pub use rule::{parse_rule_spec, Rule, RuleKind, RuleParam};
pub use rules::RuleRegistry;
pub use traits::{Predicate, RuleContext, ToValidationValue};
pub use validator::{Validator, ValidatorBuilder};
