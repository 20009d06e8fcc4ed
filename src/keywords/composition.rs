//! `allOf` / `anyOf` / `oneOf` / `not`.
//!
//! Subschemas run in discarded child validators; only one summary error per
//! combinator surfaces at the composition point.
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
    if let Some(subschemas) = &node.all_of {
        if !subschemas
            .iter()
            .all(|subschema| evaluator.child_is_valid(*subschema, instance))
        {
            evaluator.report(ValidationError::all_of(
                node.path.extended("allOf"),
                instance_path.into(),
            ))?;
        }
    }
    if let Some(subschemas) = &node.any_of {
        if !subschemas
            .iter()
            .any(|subschema| evaluator.child_is_valid(*subschema, instance))
        {
            evaluator.report(ValidationError::any_of(
                node.path.extended("anyOf"),
                instance_path.into(),
            ))?;
        }
    }
    if let Some(subschemas) = &node.one_of {
        let mut matched = 0_u32;
        for subschema in subschemas {
            if evaluator.child_is_valid(*subschema, instance) {
                matched += 1;
                if matched > 1 {
                    break;
                }
            }
        }
        if matched != 1 {
            evaluator.report(ValidationError::one_of(
                node.path.extended("oneOf"),
                instance_path.into(),
            ))?;
        }
    }
    if let Some(subschema) = node.not {
        if evaluator.child_is_valid(subschema, instance) {
            // The negated schema's own path, not `<path>/not`
            let schema_path = evaluator.store.node(subschema).path.clone();
            evaluator.report(ValidationError::not(schema_path, instance_path.into()))?;
        }
    }
    Ok(())
}
