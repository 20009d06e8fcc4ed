//! The recursive evaluator and its public face.
use crate::{
    error::ValidationError,
    keywords,
    node::{SchemaId, SchemaStore},
    paths::InstancePath,
    schemas::Draft,
};
use serde_json::Value;

/// Sentinel that unwinds the traversal at the first hard error in fail-fast
/// mode. Annotations never raise it.
#[derive(Debug)]
pub(crate) struct Stop;

pub(crate) type Eval = Result<(), Stop>;

#[derive(Debug)]
struct ErrorSink {
    errors: Vec<ValidationError>,
    report_multiple_errors: bool,
}

impl ErrorSink {
    fn report(&mut self, error: ValidationError) -> Eval {
        let annotation = error.is_annotation();
        self.errors.push(error);
        if annotation || self.report_multiple_errors {
            Ok(())
        } else {
            Err(Stop)
        }
    }
}

/// One traversal over one instance. Owns its error list for the duration of
/// the walk; child evaluators spawned for composition and dependencies are
/// fully independent.
#[derive(Debug)]
pub(crate) struct Evaluator<'s> {
    pub(crate) store: &'s SchemaStore,
    pub(crate) contains_annotations: bool,
    sink: ErrorSink,
}

impl<'s> Evaluator<'s> {
    fn new(
        store: &'s SchemaStore,
        report_multiple_errors: bool,
        contains_annotations: bool,
    ) -> Evaluator<'s> {
        Evaluator {
            store,
            contains_annotations,
            sink: ErrorSink {
                errors: Vec::new(),
                report_multiple_errors,
            },
        }
    }

    pub(crate) fn draft(&self) -> Draft {
        self.store.draft()
    }

    pub(crate) fn report(&mut self, error: ValidationError) -> Eval {
        self.sink.report(error)
    }

    /// Boolean-only probe used by `allOf`/`anyOf`/`oneOf`/`not`, `contains`
    /// and schema dependencies. Runs fail-fast; the child's error list is
    /// discarded, only the verdict surfaces.
    pub(crate) fn child_is_valid(&self, id: SchemaId, instance: &Value) -> bool {
        let mut child = Evaluator::new(self.store, false, false);
        child
            .validate_node(id, instance, &InstancePath::new())
            .is_ok()
    }

    pub(crate) fn validate_node(
        &mut self,
        id: SchemaId,
        instance: &Value,
        instance_path: &InstancePath<'_>,
    ) -> Eval {
        let store = self.store;
        let mut node = store.node(id);
        // `$ref` substitutes the resolved target before any other keyword
        if let Some(reference) = &node.reference {
            match store.resolve(reference) {
                Some(target) => node = store.node(target),
                None => {
                    return self.report(ValidationError::unresolved_reference(
                        node.path.clone(),
                        instance_path.into(),
                        reference.clone(),
                    ))
                }
            }
        }
        if let Some(valid) = node.boolean {
            if !valid {
                self.report(ValidationError::false_schema(
                    node.path.clone(),
                    instance_path.into(),
                ))?;
            }
            return Ok(());
        }
        keywords::type_::validate(self, node, instance, instance_path)?;
        keywords::const_::validate(self, node, instance, instance_path)?;
        keywords::enum_::validate(self, node, instance, instance_path)?;
        match instance {
            Value::Array(items) => {
                keywords::array::validate(self, node, items, instance, instance_path)?;
            }
            Value::String(item) => keywords::string::validate(self, node, item, instance_path)?,
            Value::Number(item) => keywords::numeric::validate(self, node, item, instance_path)?,
            _ => {}
        }
        keywords::composition::validate(self, node, instance, instance_path)?;
        keywords::format::validate(self, node, instance, instance_path)?;
        if let Value::Object(item) = instance {
            keywords::object::validate(self, node, item, instance, instance_path)?;
        }
        Ok(())
    }
}

/// Validates instances against a compiled [`SchemaStore`] and retains the
/// diagnostics of the most recent [`Validator::validate`] call.
///
/// The store may be shared between validators; a validator itself is
/// stateful and meant for one thread.
#[derive(Debug)]
pub struct Validator<'s> {
    store: &'s SchemaStore,
    report_multiple_errors: bool,
    contains_annotations: bool,
    errors: Vec<ValidationError>,
}

impl<'s> Validator<'s> {
    /// A fail-fast validator with default options.
    #[must_use]
    pub fn new(store: &'s SchemaStore) -> Validator<'s> {
        Validator::options().build(store)
    }

    /// Starts configuring a validator.
    #[must_use]
    pub fn options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    /// Validates `instance`, replacing previously collected diagnostics.
    /// Returns `true` iff no non-annotation error was recorded.
    pub fn validate(&mut self, instance: &Value) -> bool {
        let mut evaluator = Evaluator::new(
            self.store,
            self.report_multiple_errors,
            self.contains_annotations,
        );
        // In fail-fast mode the sentinel aborts the walk; the error that
        // raised it is already in the sink either way.
        let _ = evaluator.validate_node(self.store.root(), instance, &InstancePath::new());
        self.errors = evaluator.sink.errors;
        self.errors.iter().all(ValidationError::is_annotation)
    }

    /// Parses `data` as JSON first, then validates. A parse failure is a
    /// hard error kept apart from validation diagnostics.
    pub fn validate_json(&mut self, data: &str) -> Result<bool, serde_json::Error> {
        let instance = serde_json::from_str(data)?;
        Ok(self.validate(&instance))
    }

    /// Stringified diagnostics of the last call, annotations included.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Structured diagnostics of the last call, annotations included.
    #[must_use]
    pub fn error_objects(&self) -> &[ValidationError] {
        &self.errors
    }
}

/// Knobs for [`Validator`] construction.
#[derive(Debug)]
pub struct ValidatorOptions {
    report_multiple_errors: bool,
    contains_annotations: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        ValidatorOptions {
            report_multiple_errors: false,
            contains_annotations: true,
        }
    }
}

impl ValidatorOptions {
    /// Collect every error instead of stopping at the first one.
    #[must_use]
    pub fn report_multiple_errors(mut self, yes: bool) -> Self {
        self.report_multiple_errors = yes;
        self
    }

    /// Controls emission of the `matchedIndex:` annotation for `contains`.
    /// On by default.
    #[must_use]
    pub fn contains_annotations(mut self, yes: bool) -> Self {
        self.contains_annotations = yes;
        self
    }

    /// Builds a validator over `store`.
    #[must_use]
    pub fn build(self, store: &SchemaStore) -> Validator<'_> {
        Validator {
            store,
            report_multiple_errors: self.report_multiple_errors,
            contains_annotations: self.contains_annotations,
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        node::{PrimitiveType, SchemaNode},
        schemas::Draft,
        tests_util,
        validator::Validator,
    };
    use serde_json::json;

    #[test]
    fn true_schema_accepts_everything() {
        let store = tests_util::single(Draft::Draft6, SchemaNode::boolean("", true));
        for instance in [json!(null), json!(1), json!("x"), json!([1]), json!({"a": 1})] {
            tests_util::assert_valid(&store, &instance);
        }
    }

    #[test]
    fn false_schema_rejects_everything() {
        let store = tests_util::single(Draft::Draft6, SchemaNode::boolean("", false));
        for instance in [json!(null), json!(1), json!("x"), json!([1]), json!({"a": 1})] {
            tests_util::assert_not_valid(&store, &instance);
        }
    }

    #[test]
    fn reference_is_resolved_through_the_map() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let leaf = builder.add(
                SchemaNode::new("/definitions/leaf").with_types([PrimitiveType::Integer]),
            );
            builder.register_ref("#/definitions/leaf", leaf);
            builder.add(SchemaNode::reference("", "#/definitions/leaf"))
        });
        tests_util::assert_valid(&store, &json!(3));
        tests_util::assert_not_valid(&store, &json!("3"));
    }

    #[test]
    fn recursive_reference() {
        // { "properties": { "next": { "$ref": "#" } }, "type": "object" }
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let next = builder.add(SchemaNode::reference("/properties/next", "#"));
            let root = builder.add(
                SchemaNode::new("")
                    .with_types([PrimitiveType::Object])
                    .with_property("next", next),
            );
            builder.register_ref("#", root);
            root
        });
        tests_util::assert_valid(&store, &json!({"next": {"next": {}}}));
        tests_util::assert_not_valid(&store, &json!({"next": {"next": 1}}));
    }

    #[test]
    fn unresolved_reference_is_an_error() {
        let store = tests_util::single(Draft::Draft6, SchemaNode::reference("", "#/missing"));
        let mut validator = Validator::new(&store);
        assert!(!validator.validate(&json!(1)));
        assert_eq!(validator.errors(), ["# (root): unresolved $ref #/missing"]);
    }

    #[test]
    fn fail_fast_stops_at_the_first_error() {
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("")
                .with_types([PrimitiveType::String])
                .with_min_length(5),
        );
        let mut validator = Validator::new(&store);
        assert!(!validator.validate(&json!(1)));
        assert_eq!(validator.errors().len(), 1);
    }

    #[test]
    fn collect_all_keeps_going() {
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("")
                .with_min_length(5)
                .with_pattern(regex::Regex::new("^a").expect("Is a valid regex")),
        );
        let mut validator = Validator::options()
            .report_multiple_errors(true)
            .build(&store);
        assert!(!validator.validate(&json!("x")));
        assert_eq!(
            validator.errors(),
            ["# (root): minLength violated", "# (root): pattern violated"]
        );
    }

    #[test]
    fn validate_json_parses_first() {
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("").with_types([PrimitiveType::Integer]),
        );
        let mut validator = Validator::new(&store);
        assert_eq!(validator.validate_json("42").ok(), Some(true));
        assert_eq!(validator.validate_json("\"x\"").ok(), Some(false));
        assert!(validator.validate_json("{not json").is_err());
    }
}
