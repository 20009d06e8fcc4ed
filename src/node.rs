//! The compiled schema tree consumed by the validator.
//!
//! A schema compiler produces a [`SchemaStore`]: an arena of immutable
//! [`SchemaNode`]s addressed by stable [`SchemaId`]s, plus the reference map
//! that backs lazy `$ref` resolution. Cycles stay cycles in the map; nothing
//! is inlined.
use crate::{paths::JSONPointer, schemas::Draft};
use ahash::AHashMap;
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Stable identifier of a node inside a [`SchemaStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(u32);

/// Runtime shape of an instance, as named by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl PrimitiveType {
    /// The keyword spelling of the shape.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Array => "array",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Null => "null",
            PrimitiveType::Number => "number",
            PrimitiveType::Object => "object",
            PrimitiveType::String => "string",
        }
    }

    /// Whether `instance`'s runtime shape satisfies this type under `draft`.
    /// `number` admits any numeric; `integer` admits integral values and,
    /// from draft 6 on, floats with a zero fractional part.
    pub(crate) fn matches(self, instance: &Value, draft: Draft) -> bool {
        match self {
            PrimitiveType::Array => instance.is_array(),
            PrimitiveType::Boolean => instance.is_boolean(),
            PrimitiveType::Null => instance.is_null(),
            PrimitiveType::Number => instance.is_number(),
            PrimitiveType::Object => instance.is_object(),
            PrimitiveType::String => instance.is_string(),
            PrimitiveType::Integer => match instance {
                Value::Number(item) => {
                    item.is_i64()
                        || item.is_u64()
                        || (draft.accepts_whole_floats_as_integers()
                            && item.as_f64().map_or(false, |value| value.fract() == 0.0))
                }
                _ => false,
            },
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two shapes of the `items` keyword.
#[derive(Debug)]
pub enum Items {
    /// Every element validates against the same subschema.
    Single(SchemaId),
    /// Element `i` validates against the `i`-th subschema.
    List(Vec<SchemaId>),
}

/// `additionalItems` / `additionalProperties`: a subschema or a boolean
/// switch.
#[derive(Debug, Clone, Copy)]
pub enum Additional {
    /// Validate the uncovered element/property against this subschema.
    Schema(SchemaId),
    /// `true` admits anything, `false` rejects any uncovered element/property.
    Bool(bool),
}

/// Exclusive numeric bounds. Draft 4 models them as booleans upgrading the
/// paired `maximum`/`minimum`; draft 6 as standalone numbers that take
/// precedence over the inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub enum Exclusive {
    /// Draft 4: whether the paired inclusive bound is exclusive.
    Flag(bool),
    /// Draft 6: the exclusive limit itself.
    Limit(f64),
}

/// One compiled schema node. Construct with [`SchemaNode::new`] (or the
/// [`SchemaNode::boolean`] / [`SchemaNode::reference`] shortcuts) and attach
/// keywords with the `with_*` builders.
#[derive(Debug, Default)]
pub struct SchemaNode {
    pub(crate) path: JSONPointer,
    pub(crate) boolean: Option<bool>,
    pub(crate) reference: Option<String>,
    pub(crate) types: Vec<PrimitiveType>,
    pub(crate) const_value: Option<Value>,
    pub(crate) enum_values: Option<Vec<Value>>,
    pub(crate) maximum: Option<f64>,
    pub(crate) minimum: Option<f64>,
    pub(crate) exclusive_maximum: Option<Exclusive>,
    pub(crate) exclusive_minimum: Option<Exclusive>,
    pub(crate) multiple_of: Option<f64>,
    pub(crate) max_length: Option<u64>,
    pub(crate) min_length: Option<u64>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) items: Option<Items>,
    pub(crate) additional_items: Option<Additional>,
    pub(crate) max_items: Option<u64>,
    pub(crate) min_items: Option<u64>,
    pub(crate) unique_items: bool,
    pub(crate) contains: Option<SchemaId>,
    pub(crate) properties: AHashMap<String, SchemaId>,
    pub(crate) pattern_properties: Vec<(Regex, SchemaId)>,
    pub(crate) additional_properties: Option<Additional>,
    pub(crate) property_names: Option<SchemaId>,
    pub(crate) max_properties: Option<u64>,
    pub(crate) min_properties: u64,
    pub(crate) required: Vec<String>,
    pub(crate) property_dependencies: Vec<(String, Vec<String>)>,
    pub(crate) schema_dependencies: Vec<(String, SchemaId)>,
    pub(crate) all_of: Option<Vec<SchemaId>>,
    pub(crate) any_of: Option<Vec<SchemaId>>,
    pub(crate) one_of: Option<Vec<SchemaId>>,
    pub(crate) not: Option<SchemaId>,
    pub(crate) format: Option<String>,
    pub(crate) format_minimum: Option<String>,
    pub(crate) format_maximum: Option<String>,
    pub(crate) format_exclusive_minimum: Option<String>,
    pub(crate) format_exclusive_maximum: Option<String>,
}

impl SchemaNode {
    /// An empty node located at `path` within its schema document.
    #[must_use]
    pub fn new(path: impl Into<JSONPointer>) -> SchemaNode {
        SchemaNode {
            path: path.into(),
            ..SchemaNode::default()
        }
    }

    /// The literal `true` / `false` schema.
    #[must_use]
    pub fn boolean(path: impl Into<JSONPointer>, value: bool) -> SchemaNode {
        SchemaNode {
            boolean: Some(value),
            ..SchemaNode::new(path)
        }
    }

    /// A `$ref` node. The target is looked up through the store's reference
    /// map at validation time, before any other keyword of the node.
    #[must_use]
    pub fn reference(path: impl Into<JSONPointer>, target: impl Into<String>) -> SchemaNode {
        SchemaNode {
            reference: Some(target.into()),
            ..SchemaNode::new(path)
        }
    }

    /// Allowed primitive types. An empty list is a no-op.
    #[must_use]
    pub fn with_types(mut self, types: impl IntoIterator<Item = PrimitiveType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// `const`
    #[must_use]
    pub fn with_const(mut self, value: Value) -> Self {
        self.const_value = Some(value);
        self
    }

    /// `enum`
    #[must_use]
    pub fn with_enum(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.enum_values = Some(values.into_iter().collect());
        self
    }

    /// `maximum`
    #[must_use]
    pub fn with_maximum(mut self, limit: f64) -> Self {
        self.maximum = Some(limit);
        self
    }

    /// `minimum`
    #[must_use]
    pub fn with_minimum(mut self, limit: f64) -> Self {
        self.minimum = Some(limit);
        self
    }

    /// `exclusiveMaximum` in its dialect-specific shape.
    #[must_use]
    pub fn with_exclusive_maximum(mut self, bound: Exclusive) -> Self {
        self.exclusive_maximum = Some(bound);
        self
    }

    /// `exclusiveMinimum` in its dialect-specific shape.
    #[must_use]
    pub fn with_exclusive_minimum(mut self, bound: Exclusive) -> Self {
        self.exclusive_minimum = Some(bound);
        self
    }

    /// `multipleOf`
    #[must_use]
    pub fn with_multiple_of(mut self, multiple_of: f64) -> Self {
        self.multiple_of = Some(multiple_of);
        self
    }

    /// `maxLength`, counted in Unicode code points.
    #[must_use]
    pub fn with_max_length(mut self, limit: u64) -> Self {
        self.max_length = Some(limit);
        self
    }

    /// `minLength`, counted in Unicode code points.
    #[must_use]
    pub fn with_min_length(mut self, limit: u64) -> Self {
        self.min_length = Some(limit);
        self
    }

    /// `pattern`, compiled by the schema compiler.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// `items` with a single subschema for every element.
    #[must_use]
    pub fn with_items(mut self, subschema: SchemaId) -> Self {
        self.items = Some(Items::Single(subschema));
        self
    }

    /// Positional `items`.
    #[must_use]
    pub fn with_items_list(mut self, subschemas: impl IntoIterator<Item = SchemaId>) -> Self {
        self.items = Some(Items::List(subschemas.into_iter().collect()));
        self
    }

    /// `additionalItems`; only meaningful next to positional `items`.
    #[must_use]
    pub fn with_additional_items(mut self, additional: Additional) -> Self {
        self.additional_items = Some(additional);
        self
    }

    /// `maxItems`
    #[must_use]
    pub fn with_max_items(mut self, limit: u64) -> Self {
        self.max_items = Some(limit);
        self
    }

    /// `minItems`
    #[must_use]
    pub fn with_min_items(mut self, limit: u64) -> Self {
        self.min_items = Some(limit);
        self
    }

    /// `uniqueItems: true`
    #[must_use]
    pub fn with_unique_items(mut self) -> Self {
        self.unique_items = true;
        self
    }

    /// `contains`
    #[must_use]
    pub fn with_contains(mut self, subschema: SchemaId) -> Self {
        self.contains = Some(subschema);
        self
    }

    /// Adds one `properties` entry.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, subschema: SchemaId) -> Self {
        self.properties.insert(name.into(), subschema);
        self
    }

    /// Adds one `patternProperties` entry.
    #[must_use]
    pub fn with_pattern_property(mut self, pattern: Regex, subschema: SchemaId) -> Self {
        self.pattern_properties.push((pattern, subschema));
        self
    }

    /// `additionalProperties`
    #[must_use]
    pub fn with_additional_properties(mut self, additional: Additional) -> Self {
        self.additional_properties = Some(additional);
        self
    }

    /// `propertyNames` (draft 6)
    #[must_use]
    pub fn with_property_names(mut self, subschema: SchemaId) -> Self {
        self.property_names = Some(subschema);
        self
    }

    /// `maxProperties`
    #[must_use]
    pub fn with_max_properties(mut self, limit: u64) -> Self {
        self.max_properties = Some(limit);
        self
    }

    /// `minProperties`; defaults to 0 and is always checked.
    #[must_use]
    pub fn with_min_properties(mut self, limit: u64) -> Self {
        self.min_properties = limit;
        self
    }

    /// `required`
    #[must_use]
    pub fn with_required(
        mut self,
        properties: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.required = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one property dependency: `property` present demands all
    /// `dependencies` present.
    #[must_use]
    pub fn with_property_dependency(
        mut self,
        property: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.property_dependencies.push((
            property.into(),
            dependencies.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Adds one schema dependency: `property` present demands the whole
    /// instance to validate against `subschema`.
    #[must_use]
    pub fn with_schema_dependency(
        mut self,
        property: impl Into<String>,
        subschema: SchemaId,
    ) -> Self {
        self.schema_dependencies.push((property.into(), subschema));
        self
    }

    /// `allOf`
    #[must_use]
    pub fn with_all_of(mut self, subschemas: impl IntoIterator<Item = SchemaId>) -> Self {
        self.all_of = Some(subschemas.into_iter().collect());
        self
    }

    /// `anyOf`
    #[must_use]
    pub fn with_any_of(mut self, subschemas: impl IntoIterator<Item = SchemaId>) -> Self {
        self.any_of = Some(subschemas.into_iter().collect());
        self
    }

    /// `oneOf`
    #[must_use]
    pub fn with_one_of(mut self, subschemas: impl IntoIterator<Item = SchemaId>) -> Self {
        self.one_of = Some(subschemas.into_iter().collect());
        self
    }

    /// `not`
    #[must_use]
    pub fn with_not(mut self, subschema: SchemaId) -> Self {
        self.not = Some(subschema);
        self
    }

    /// `format`
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// `formatMinimum` (draft 6), an ISO-8601 date-time literal.
    #[must_use]
    pub fn with_format_minimum(mut self, limit: impl Into<String>) -> Self {
        self.format_minimum = Some(limit.into());
        self
    }

    /// `formatMaximum` (draft 6), an ISO-8601 date-time literal.
    #[must_use]
    pub fn with_format_maximum(mut self, limit: impl Into<String>) -> Self {
        self.format_maximum = Some(limit.into());
        self
    }

    /// `formatExclusiveMinimum` (draft 6), an ISO-8601 date-time literal.
    #[must_use]
    pub fn with_format_exclusive_minimum(mut self, limit: impl Into<String>) -> Self {
        self.format_exclusive_minimum = Some(limit.into());
        self
    }

    /// `formatExclusiveMaximum` (draft 6), an ISO-8601 date-time literal.
    #[must_use]
    pub fn with_format_exclusive_maximum(mut self, limit: impl Into<String>) -> Self {
        self.format_exclusive_maximum = Some(limit.into());
        self
    }

    pub(crate) fn has_format_keywords(&self) -> bool {
        self.format.is_some()
            || self.format_minimum.is_some()
            || self.format_maximum.is_some()
            || self.format_exclusive_minimum.is_some()
            || self.format_exclusive_maximum.is_some()
    }
}

/// Arena of compiled schema nodes plus the `$ref` resolution table.
///
/// Built once by a schema compiler, then shared read-only between any number
/// of validators.
#[derive(Debug)]
pub struct SchemaStore {
    draft: Draft,
    nodes: Vec<SchemaNode>,
    ref_map: AHashMap<String, SchemaId>,
    root: SchemaId,
}

impl SchemaStore {
    /// Starts building a store for the given dialect.
    #[must_use]
    pub fn builder(draft: Draft) -> SchemaStoreBuilder {
        SchemaStoreBuilder {
            draft,
            nodes: Vec::new(),
            ref_map: AHashMap::new(),
        }
    }

    /// The dialect this document was compiled against.
    #[must_use]
    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// Identifier of the document root.
    #[must_use]
    pub fn root(&self) -> SchemaId {
        self.root
    }

    pub(crate) fn node(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.0 as usize]
    }

    pub(crate) fn resolve(&self, reference: &str) -> Option<SchemaId> {
        self.ref_map.get(end_path(reference)).copied()
    }
}

/// Normalizes a `$ref` string into the key used by the reference map: the
/// resolved pointer with any leading `#` stripped.
#[must_use]
pub fn end_path(reference: &str) -> &str {
    reference.strip_prefix('#').unwrap_or(reference)
}

/// Incrementally assembles a [`SchemaStore`].
///
/// Subschemas are added before the nodes that point at them; recursive
/// schemas go through [`SchemaStoreBuilder::register_ref`] instead of direct
/// ids, which is what keeps cycles out of the arena.
#[derive(Debug)]
pub struct SchemaStoreBuilder {
    draft: Draft,
    nodes: Vec<SchemaNode>,
    ref_map: AHashMap<String, SchemaId>,
}

impl SchemaStoreBuilder {
    /// Adds a node and returns its stable identifier.
    pub fn add(&mut self, node: SchemaNode) -> SchemaId {
        let id = SchemaId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Maps a resolved pointer path to a node for `$ref` lookups.
    pub fn register_ref(&mut self, pointer: impl Into<String>, target: SchemaId) {
        let pointer = pointer.into();
        self.ref_map.insert(end_path(&pointer).to_string(), target);
    }

    /// Finishes the store with `root` as the document root.
    #[must_use]
    pub fn finish(self, root: SchemaId) -> SchemaStore {
        SchemaStore {
            draft: self.draft,
            nodes: self.nodes,
            ref_map: self.ref_map,
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{end_path, PrimitiveType, SchemaNode, SchemaStore};
    use crate::schemas::Draft;
    use serde_json::json;

    #[test]
    fn type_names_follow_the_keyword_spelling() {
        assert_eq!(PrimitiveType::Integer.as_str(), "integer");
        assert_eq!(PrimitiveType::Array.to_string(), "array");
    }

    #[test]
    fn integer_shape_is_draft_sensitive() {
        assert!(PrimitiveType::Integer.matches(&json!(2.0), Draft::Draft6));
        assert!(!PrimitiveType::Integer.matches(&json!(2.0), Draft::Draft4));
        assert!(!PrimitiveType::Integer.matches(&json!(2.5), Draft::Draft6));
    }

    #[test]
    fn end_path_strips_leading_hash() {
        assert_eq!(end_path("#/definitions/a"), "/definitions/a");
        assert_eq!(end_path("/definitions/a"), "/definitions/a");
        assert_eq!(end_path("#"), "");
    }

    #[test]
    fn ref_registration_is_normalized() {
        let mut builder = SchemaStore::builder(Draft::Draft6);
        let target = builder.add(SchemaNode::boolean("/definitions/anything", true));
        builder.register_ref("#/definitions/anything", target);
        let root = builder.add(SchemaNode::reference("", "#/definitions/anything"));
        let store = builder.finish(root);
        assert_eq!(store.resolve("#/definitions/anything"), Some(target));
        assert_eq!(store.resolve("/definitions/anything"), Some(target));
        assert_eq!(store.resolve("#/definitions/other"), None);
    }
}
