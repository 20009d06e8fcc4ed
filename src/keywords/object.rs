//! Object keywords: bounds, `required`, property coverage and dependencies.
use crate::{
    error::ValidationError,
    node::{Additional, SchemaNode},
    paths::InstancePath,
    validator::{Eval, Evaluator},
};
use serde_json::{Map, Value};

pub(crate) fn validate(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    item: &Map<String, Value>,
    instance: &Value,
    instance_path: &InstancePath<'_>,
) -> Eval {
    let count = item.len() as u64;
    if count < node.min_properties {
        evaluator.report(ValidationError::min_properties(
            node.path.extended("minProperties"),
            instance_path.into(),
        ))?;
    }
    if let Some(limit) = node.max_properties {
        if count > limit {
            evaluator.report(ValidationError::max_properties(
                node.path.extended("maxProperties"),
                instance_path.into(),
            ))?;
        }
    }
    for property in &node.required {
        if !item.contains_key(property) {
            evaluator.report(ValidationError::required(
                node.path.extended("required"),
                instance_path.into(),
                property.clone(),
                instance.clone(),
            ))?;
        }
    }
    for (name, value) in item {
        let value_path = instance_path.push(name.clone());
        // Names are checked unconditionally; value validation proceeds
        // whatever the outcome of the name check
        if let Some(subschema) = node.property_names {
            let name_instance = Value::String(name.clone());
            evaluator.validate_node(subschema, &name_instance, &value_path)?;
        }
        let mut covered = false;
        if let Some(subschema) = node.properties.get(name) {
            evaluator.validate_node(*subschema, value, &value_path)?;
            covered = true;
        }
        for (pattern, subschema) in &node.pattern_properties {
            if pattern.is_match(name) {
                evaluator.validate_node(*subschema, value, &value_path)?;
                covered = true;
            }
        }
        if !covered {
            match node.additional_properties {
                Some(Additional::Schema(subschema)) => {
                    evaluator.validate_node(subschema, value, &value_path)?;
                }
                Some(Additional::Bool(false)) => {
                    evaluator.report(ValidationError::additional_property(
                        node.path.extended("additionalProperties"),
                        instance_path.into(),
                        name.clone(),
                    ))?;
                }
                Some(Additional::Bool(true)) | None => {}
            }
        }
    }
    for (property, dependencies) in &node.property_dependencies {
        if item.contains_key(property)
            && dependencies.iter().any(|peer| !item.contains_key(peer))
        {
            evaluator.report(ValidationError::property_dependency(
                node.path.extended("dependencies"),
                instance_path.into(),
                property.clone(),
                dependencies.clone(),
            ))?;
        }
    }
    for (property, subschema) in &node.schema_dependencies {
        if item.contains_key(property) && !evaluator.child_is_valid(*subschema, instance) {
            evaluator.report(ValidationError::schema_dependency(
                node.path.extended("dependencies"),
                instance_path.into(),
                property.clone(),
            ))?;
        }
    }
    Ok(())
}
