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
    if let Some(options) = &node.enum_values {
        if !options.iter().any(|option| helpers::equal(option, instance)) {
            return evaluator.report(ValidationError::enumeration(
                node.path.extended("enum"),
                instance_path.into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{node::SchemaNode, schemas::Draft, tests_util};
    use serde_json::json;

    #[test]
    fn membership_uses_json_equality() {
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("").with_enum([json!(1.0), json!("two")]),
        );
        tests_util::assert_valid(&store, &json!(1));
        tests_util::assert_valid(&store, &json!("two"));
        tests_util::assert_first_error(&store, &json!(2), "# (root): enum violated");
    }
}
