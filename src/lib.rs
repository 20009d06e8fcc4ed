//! # jsonschema-core
//!
//! The instance-validation core of a JSON Schema validator for drafts 4
//! and 6. It walks a pre-compiled schema arena over a `serde_json::Value`
//! and produces diagnostics that point into both the instance and the schema
//! via JSON Pointers.
//!
//! Schema compilation is a separate concern: a compiler parses schema
//! documents, resolves `$ref` targets and hands the result over through
//! [`SchemaStore::builder`]. The store is read-only afterwards and can be
//! shared between validators.
//!
//! ```rust
//! use jsonschema_core::{Draft, PrimitiveType, SchemaNode, SchemaStore, Validator};
//! use serde_json::json;
//!
//! // { "type": "string", "maxLength": 5 }
//! let mut builder = SchemaStore::builder(Draft::Draft6);
//! let root = builder.add(
//!     SchemaNode::new("")
//!         .with_types([PrimitiveType::String])
//!         .with_max_length(5),
//! );
//! let store = builder.finish(root);
//!
//! let mut validator = Validator::new(&store);
//! assert!(validator.validate(&json!("foo")));
//! assert!(!validator.validate(&json!("too long for this")));
//! for error in validator.errors() {
//!     println!("Validation error: {}", error);
//! }
//! ```
//!
//! Fail-fast is the default; `Validator::options().report_multiple_errors(true)`
//! collects every diagnostic instead.
#![warn(
    clippy::doc_markdown,
    clippy::explicit_iter_loop,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::print_stdout,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    unreachable_pub
)]
#![allow(clippy::upper_case_acronyms)]
pub mod error;
mod formats;
mod keywords;
mod node;
pub mod paths;
mod schemas;
mod validator;

pub use error::{ValidationError, ValidationErrorKind};
pub use formats::{register_format, unregister_format, FormatPredicate};
pub use node::{
    end_path, Additional, Exclusive, Items, PrimitiveType, SchemaId, SchemaNode, SchemaStore,
    SchemaStoreBuilder,
};
pub use paths::JSONPointer;
pub use schemas::Draft;
pub use validator::{Validator, ValidatorOptions};

use serde_json::Value;

/// A shortcut for checking `instance` against an already compiled `store`,
/// discarding diagnostics.
///
/// ```rust
/// use jsonschema_core::{is_valid, Draft, SchemaNode, SchemaStore};
/// use serde_json::json;
///
/// let mut builder = SchemaStore::builder(Draft::Draft6);
/// let root = builder.add(SchemaNode::new("").with_max_items(1));
/// let store = builder.finish(root);
/// assert!(is_valid(&store, &json!([1])));
/// assert!(!is_valid(&store, &json!([1, 2])));
/// ```
#[must_use]
pub fn is_valid(store: &SchemaStore, instance: &Value) -> bool {
    Validator::new(store).validate(instance)
}
