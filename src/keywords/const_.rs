use crate::{
    error::ValidationError,
    keywords::helpers,
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
    if let Some(expected) = &node.const_value {
        if !helpers::equal(expected, instance) {
            return evaluator.report(ValidationError::constant(
                node.path.extended("const"),
                instance_path.into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{node::SchemaNode, schemas::Draft, tests_util};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!(0.0), json!(0))]
    #[test_case(json!([1.0]), json!([1]))]
    #[test_case(json!({"a": 1.0}), json!({"a": 1}))]
    fn numeric_equivalence(expected: Value, instance: Value) {
        let store = tests_util::single(Draft::Draft6, SchemaNode::new("").with_const(expected));
        tests_util::assert_valid(&store, &instance);
    }

    #[test]
    fn mismatch() {
        let store =
            tests_util::single(Draft::Draft6, SchemaNode::new("").with_const(json!("Cake")));
        tests_util::assert_first_error(&store, &json!("Coke"), "# (root): const violated");
    }
}
