//! The `type` keyword.
use crate::{
    error::ValidationError,
    node::SchemaNode,
    paths::InstancePath,
    validator::{Eval, Evaluator},
};
use serde_json::Value;

pub(crate) fn validate(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    instance: &Value,
    instance_path: &InstancePath<'_>,
) -> Eval {
    if node.types.is_empty() {
        return Ok(());
    }
    let draft = evaluator.draft();
    if node
        .types
        .iter()
        .any(|type_| type_.matches(instance, draft))
    {
        return Ok(());
    }
    evaluator.report(ValidationError::type_mismatch(
        node.path.extended("type"),
        instance_path.into(),
        node.types.clone(),
        instance.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use crate::{
        node::{PrimitiveType, SchemaNode},
        schemas::Draft,
        tests_util,
    };
    use serde_json::{json, Value};
    use test_case::test_case;

    fn integer_store(draft: Draft) -> crate::node::SchemaStore {
        tests_util::single(
            draft,
            SchemaNode::new("").with_types([PrimitiveType::Integer]),
        )
    }

    #[test_case(Draft::Draft6, json!(2), true)]
    #[test_case(Draft::Draft6, json!(2.0), true ; "draft 6 accepts whole floats")]
    #[test_case(Draft::Draft6, json!(2.5), false)]
    #[test_case(Draft::Draft4, json!(2), true)]
    #[test_case(Draft::Draft4, json!(2.0), false ; "draft 4 rejects whole floats")]
    #[test_case(Draft::Draft4, json!(2.5), false)]
    fn integer_matching(draft: Draft, instance: Value, expected: bool) {
        let store = integer_store(draft);
        assert_eq!(tests_util::is_valid(&store, &instance), expected);
    }

    #[test]
    fn number_accepts_integers() {
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("").with_types([PrimitiveType::Number]),
        );
        tests_util::assert_valid(&store, &json!(42));
        tests_util::assert_valid(&store, &json!(13.37));
    }

    #[test]
    fn multiple_types() {
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("").with_types([PrimitiveType::Integer, PrimitiveType::Null]),
        );
        tests_util::assert_valid(&store, &json!(null));
        tests_util::assert_valid(&store, &json!(7));
        tests_util::assert_first_error(
            &store,
            &json!("x"),
            "# (root): type: wanted [integer, null] got \"x\"",
        );
    }

    #[test]
    fn empty_type_list_is_a_no_op() {
        let store = tests_util::single(Draft::Draft6, SchemaNode::new(""));
        tests_util::assert_valid(&store, &json!({"anything": [1, 2, 3]}));
    }
}
