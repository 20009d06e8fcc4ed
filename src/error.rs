//! Error types
use crate::{node::PrimitiveType, paths::JSONPointer};
use serde_json::{Number, Value};
use std::{error, fmt};

/// A single diagnostic produced during validation.
///
/// Most records describe failures; `matchedIndex:` records are annotations
/// that share the channel without failing validation. Filter with
/// [`ValidationError::is_annotation`] when only validity matters.
#[derive(Debug)]
pub struct ValidationError {
    /// Path to the part of the instance that failed.
    pub instance_path: JSONPointer,
    /// Path to the schema keyword that reported the failure.
    pub schema_path: JSONPointer,
    /// Type of validation error
    pub kind: ValidationErrorKind,
}

/// Kinds of errors that may happen during validation
#[derive(Debug)]
#[allow(missing_docs)]
pub enum ValidationErrorKind {
    /// Everything is invalid for the `false` schema.
    FalseSchema,
    /// `$ref` target is missing from the reference map.
    UnresolvedReference { reference: String },
    /// The instance shape matches none of the allowed types.
    Type {
        wanted: Vec<PrimitiveType>,
        instance: Value,
    },
    Constant,
    Enum,
    Maximum,
    Minimum,
    ExclusiveMaximum,
    ExclusiveMinimum,
    MultipleOf { instance: Number, multiple_of: f64 },
    MaxLength,
    MinLength,
    Pattern,
    MaxItems,
    MinItems,
    /// Two elements of the array compare JSON-equal.
    UniqueItems {
        instance: Value,
        first: usize,
        second: usize,
    },
    AdditionalItems,
    /// No element matched the `contains` subschema.
    Contains,
    MinProperties,
    MaxProperties,
    /// A `required` property is absent.
    Required { property: String, instance: Value },
    /// A property fell through `properties`/`patternProperties` with
    /// `additionalProperties: false`.
    AdditionalProperty { property: String },
    /// A present property demands peers that are absent.
    PropertyDependency {
        property: String,
        dependencies: Vec<String>,
    },
    /// The instance failed the subschema triggered by a present property.
    SchemaDependency { property: String },
    AllOf,
    AnyOf,
    OneOf,
    Not,
    /// The string does not satisfy the named format. Format-bound failures
    /// carry the `date-time` tag; the keyword is in the schema path.
    Format { format: String },
    /// The format tag is known to neither the core nor the registry.
    UnknownFormat { format: String },
    /// The format tag exists but requires draft 6.
    FormatNeedsDraft6 { format: String },
    /// Annotation: index of the first element that matched `contains`.
    MatchedIndex { index: usize },
}

/// Shortcuts for creation of specific error kinds.
impl ValidationError {
    /// True for records that annotate a successful check instead of failing
    /// validation.
    #[must_use]
    pub fn is_annotation(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::MatchedIndex { .. })
    }

    fn new(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        kind: ValidationErrorKind,
    ) -> ValidationError {
        ValidationError {
            instance_path,
            schema_path,
            kind,
        }
    }

    pub(crate) fn false_schema(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::FalseSchema)
    }
    pub(crate) fn unresolved_reference(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        reference: String,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::UnresolvedReference { reference },
        )
    }
    pub(crate) fn type_mismatch(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        wanted: Vec<PrimitiveType>,
        instance: Value,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::Type { wanted, instance },
        )
    }
    pub(crate) fn constant(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::Constant)
    }
    pub(crate) fn enumeration(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::Enum)
    }
    pub(crate) fn maximum(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::Maximum)
    }
    pub(crate) fn minimum(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::Minimum)
    }
    pub(crate) fn exclusive_maximum(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::ExclusiveMaximum,
        )
    }
    pub(crate) fn exclusive_minimum(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::ExclusiveMinimum,
        )
    }
    pub(crate) fn multiple_of(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        instance: Number,
        multiple_of: f64,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::MultipleOf {
                instance,
                multiple_of,
            },
        )
    }
    pub(crate) fn max_length(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::MaxLength)
    }
    pub(crate) fn min_length(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::MinLength)
    }
    pub(crate) fn pattern(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::Pattern)
    }
    pub(crate) fn max_items(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::MaxItems)
    }
    pub(crate) fn min_items(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::MinItems)
    }
    pub(crate) fn unique_items(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        instance: Value,
        first: usize,
        second: usize,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::UniqueItems {
                instance,
                first,
                second,
            },
        )
    }
    pub(crate) fn additional_items(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::AdditionalItems,
        )
    }
    pub(crate) fn contains(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::Contains)
    }
    pub(crate) fn min_properties(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::MinProperties,
        )
    }
    pub(crate) fn max_properties(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::MaxProperties,
        )
    }
    pub(crate) fn required(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        property: String,
        instance: Value,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::Required { property, instance },
        )
    }
    pub(crate) fn additional_property(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        property: String,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::AdditionalProperty { property },
        )
    }
    pub(crate) fn property_dependency(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        property: String,
        dependencies: Vec<String>,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::PropertyDependency {
                property,
                dependencies,
            },
        )
    }
    pub(crate) fn schema_dependency(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        property: String,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::SchemaDependency { property },
        )
    }
    pub(crate) fn all_of(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::AllOf)
    }
    pub(crate) fn any_of(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::AnyOf)
    }
    pub(crate) fn one_of(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
    ) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::OneOf)
    }
    pub(crate) fn not(schema_path: JSONPointer, instance_path: JSONPointer) -> ValidationError {
        ValidationError::new(schema_path, instance_path, ValidationErrorKind::Not)
    }
    pub(crate) fn format(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        format: String,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::Format { format },
        )
    }
    pub(crate) fn unknown_format(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        format: String,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::UnknownFormat { format },
        )
    }
    pub(crate) fn format_needs_draft6(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        format: String,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::FormatNeedsDraft6 { format },
        )
    }
    pub(crate) fn matched_index(
        schema_path: JSONPointer,
        instance_path: JSONPointer,
        index: usize,
    ) -> ValidationError {
        ValidationError::new(
            schema_path,
            instance_path,
            ValidationErrorKind::MatchedIndex { index },
        )
    }
}

impl error::Error for ValidationError {}

/// Textual representation of various validation errors.
///
/// The instance-path prefix and the message prefixes are a contract; tooling
/// pattern-matches on them.
impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            f.write_str("# (root)")?;
        } else {
            write!(f, "{}", self.instance_path)?;
        }
        f.write_str(": ")?;
        match &self.kind {
            ValidationErrorKind::FalseSchema => f.write_str("false schema"),
            ValidationErrorKind::UnresolvedReference { reference } => {
                write!(f, "unresolved $ref {}", reference)
            }
            ValidationErrorKind::Type { wanted, instance } => {
                f.write_str("type: wanted [")?;
                for (idx, type_) in wanted.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", type_)?;
                }
                write!(f, "] got {}", instance)
            }
            ValidationErrorKind::Constant => f.write_str("const violated"),
            ValidationErrorKind::Enum => f.write_str("enum violated"),
            ValidationErrorKind::Maximum => f.write_str("maximum exceeded"),
            ValidationErrorKind::Minimum => f.write_str("minimum violated"),
            ValidationErrorKind::ExclusiveMaximum => f.write_str("exclusiveMaximum exceeded"),
            ValidationErrorKind::ExclusiveMinimum => f.write_str("exclusiveMinimum violated"),
            ValidationErrorKind::MultipleOf {
                instance,
                multiple_of,
            } => write!(f, "multipleOf violated ({} % {})", instance, multiple_of),
            ValidationErrorKind::MaxLength => f.write_str("maxLength exceeded"),
            ValidationErrorKind::MinLength => f.write_str("minLength violated"),
            ValidationErrorKind::Pattern => f.write_str("pattern violated"),
            ValidationErrorKind::MaxItems => f.write_str("maxItems exceeded"),
            ValidationErrorKind::MinItems => f.write_str("minItems violated"),
            ValidationErrorKind::UniqueItems {
                instance,
                first,
                second,
            } => write!(
                f,
                "uniqueItems violated: {} [{}]==[{}]",
                instance, first, second
            ),
            ValidationErrorKind::AdditionalItems => f.write_str("additionalItems false"),
            ValidationErrorKind::Contains => f.write_str("contains violated"),
            ValidationErrorKind::MinProperties => f.write_str("minProperties violated"),
            ValidationErrorKind::MaxProperties => f.write_str("maxProperties violated"),
            ValidationErrorKind::Required { property, instance } => {
                write!(f, "required prop missing: {} from {}", property, instance)
            }
            ValidationErrorKind::AdditionalProperty { property } => {
                write!(f, "unallowed additional property {}", property)
            }
            ValidationErrorKind::PropertyDependency {
                property,
                dependencies,
            } => write!(
                f,
                "prop {} => {} required",
                property,
                dependencies.join(", ")
            ),
            ValidationErrorKind::SchemaDependency { property } => {
                write!(f, "prop {} violated schema dependency", property)
            }
            ValidationErrorKind::AllOf => f.write_str("allOf violated"),
            ValidationErrorKind::AnyOf => f.write_str("anyOf violated"),
            ValidationErrorKind::OneOf => f.write_str("oneOf violated"),
            ValidationErrorKind::Not => f.write_str("not violated"),
            ValidationErrorKind::Format { format } => {
                write!(f, "\"{}\" format not accepted", format)
            }
            ValidationErrorKind::UnknownFormat { format } => {
                write!(f, "{} not supported as format", format)
            }
            ValidationErrorKind::FormatNeedsDraft6 { format } => {
                write!(f, "{} not supported as format before draft6", format)
            }
            ValidationErrorKind::MatchedIndex { index } => write!(f, "matchedIndex:{}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_instance_path_placeholder() {
        let err = ValidationError::maximum(JSONPointer::from("/maximum"), JSONPointer::default());
        assert_eq!(err.to_string(), "# (root): maximum exceeded");
    }

    #[test]
    fn type_error_message() {
        let err = ValidationError::type_mismatch(
            JSONPointer::from("/type"),
            JSONPointer::from("/a"),
            vec![PrimitiveType::Integer, PrimitiveType::Null],
            json!("x"),
        );
        assert_eq!(err.to_string(), "/a: type: wanted [integer, null] got \"x\"");
    }

    #[test]
    fn annotation_is_not_an_error() {
        let err = ValidationError::matched_index(
            JSONPointer::from("/contains"),
            JSONPointer::default(),
            2,
        );
        assert!(err.is_annotation());
        assert_eq!(err.to_string(), "# (root): matchedIndex:2");
    }

    #[test]
    fn dependency_message_names_all_peers() {
        let err = ValidationError::property_dependency(
            JSONPointer::from("/dependencies"),
            JSONPointer::default(),
            "a".to_string(),
            vec!["b".to_string(), "c".to_string()],
        );
        assert_eq!(err.to_string(), "# (root): prop a => b, c required");
    }
}
