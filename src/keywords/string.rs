use crate::{
    error::ValidationError,
    node::SchemaNode,
    paths::InstancePath,
    validator::{Eval, Evaluator},
};

pub(crate) fn validate(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    item: &str,
    instance_path: &InstancePath<'_>,
) -> Eval {
    if node.max_length.is_some() || node.min_length.is_some() {
        // Length is in code points, not in UTF-8 or UTF-16 units
        let length = item.chars().count() as u64;
        if let Some(limit) = node.max_length {
            if length > limit {
                evaluator.report(ValidationError::max_length(
                    node.path.extended("maxLength"),
                    instance_path.into(),
                ))?;
            }
        }
        if let Some(limit) = node.min_length {
            if length < limit {
                evaluator.report(ValidationError::min_length(
                    node.path.extended("minLength"),
                    instance_path.into(),
                ))?;
            }
        }
    }
    if let Some(pattern) = &node.pattern {
        if !pattern.is_match(item) {
            evaluator.report(ValidationError::pattern(
                node.path.extended("pattern"),
                instance_path.into(),
            ))?;
        }
    }
    Ok(())
}
