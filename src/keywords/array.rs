//! Array keywords: `items`/`additionalItems`, bounds, `uniqueItems`,
//! `contains`.
use crate::{
    error::ValidationError,
    keywords::helpers,
    node::{Additional, Items, SchemaNode},
    paths::InstancePath,
    validator::{Eval, Evaluator},
};
use serde_json::Value;

pub(crate) fn validate(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    items: &[Value],
    instance: &Value,
    instance_path: &InstancePath<'_>,
) -> Eval {
    match &node.items {
        Some(Items::Single(subschema)) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = instance_path.push(index);
                evaluator.validate_node(*subschema, item, &item_path)?;
            }
        }
        Some(Items::List(subschemas)) => {
            for (index, (subschema, item)) in subschemas.iter().zip(items).enumerate() {
                let item_path = instance_path.push(index);
                evaluator.validate_node(*subschema, item, &item_path)?;
            }
            if items.len() > subschemas.len() {
                match node.additional_items {
                    Some(Additional::Schema(subschema)) => {
                        for (index, item) in items.iter().enumerate().skip(subschemas.len()) {
                            let item_path = instance_path.push(index);
                            evaluator.validate_node(subschema, item, &item_path)?;
                        }
                    }
                    Some(Additional::Bool(false)) => {
                        evaluator.report(ValidationError::additional_items(
                            node.path.extended("additionalItems"),
                            instance_path.into(),
                        ))?;
                    }
                    Some(Additional::Bool(true)) | None => {}
                }
            }
        }
        None => {}
    }
    if let Some(limit) = node.min_items {
        if (items.len() as u64) < limit {
            evaluator.report(ValidationError::min_items(
                node.path.extended("minItems"),
                instance_path.into(),
            ))?;
        }
    }
    if let Some(limit) = node.max_items {
        if items.len() as u64 > limit {
            evaluator.report(ValidationError::max_items(
                node.path.extended("maxItems"),
                instance_path.into(),
            ))?;
        }
    }
    if node.unique_items {
        // Every duplicate pair (i, j), i < j, gets its own record
        for (first, left) in items.iter().enumerate() {
            for (offset, right) in items[first + 1..].iter().enumerate() {
                if helpers::equal(left, right) {
                    evaluator.report(ValidationError::unique_items(
                        node.path.extended("uniqueItems"),
                        instance_path.into(),
                        instance.clone(),
                        first,
                        first + 1 + offset,
                    ))?;
                }
            }
        }
    }
    if let Some(subschema) = node.contains {
        let matched = items
            .iter()
            .position(|item| evaluator.child_is_valid(subschema, item));
        match matched {
            Some(index) => {
                if evaluator.contains_annotations {
                    evaluator.report(ValidationError::matched_index(
                        node.path.extended("contains"),
                        instance_path.into(),
                        index,
                    ))?;
                }
            }
            None => {
                evaluator.report(ValidationError::contains(
                    node.path.extended("contains"),
                    instance_path.into(),
                ))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        node::{Additional, PrimitiveType, SchemaNode},
        schemas::Draft,
        tests_util,
        validator::Validator,
    };
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn single_items_schema_covers_every_element() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let item = builder.add(SchemaNode::new("/items").with_types([PrimitiveType::Integer]));
            builder.add(SchemaNode::new("").with_items(item))
        });
        tests_util::assert_valid(&store, &json!([1, 2, 3]));
        let mut validator = Validator::new(&store);
        assert!(!validator.validate(&json!([1, "x", 3])));
        assert_eq!(
            validator.errors(),
            ["/1: type: wanted [integer] got \"x\""]
        );
    }

    #[test]
    fn positional_items_validate_pairwise() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let first = builder.add(SchemaNode::new("/items/0").with_types([PrimitiveType::Integer]));
            let second = builder.add(SchemaNode::new("/items/1").with_types([PrimitiveType::String]));
            builder.add(SchemaNode::new("").with_items_list([first, second]))
        });
        tests_util::assert_valid(&store, &json!([1, "a"]));
        tests_util::assert_valid(&store, &json!([1]));
        tests_util::assert_valid(&store, &json!([1, "a", null]));
        tests_util::assert_not_valid(&store, &json!(["a", 1]));
    }

    #[test]
    fn additional_items_schema_covers_the_tail() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let first = builder.add(SchemaNode::new("/items/0").with_types([PrimitiveType::Integer]));
            let tail =
                builder.add(SchemaNode::new("/additionalItems").with_types([PrimitiveType::String]));
            builder.add(
                SchemaNode::new("")
                    .with_items_list([first])
                    .with_additional_items(Additional::Schema(tail)),
            )
        });
        tests_util::assert_valid(&store, &json!([1, "a", "b"]));
        tests_util::assert_not_valid(&store, &json!([1, "a", 2]));
    }

    #[test]
    fn additional_items_false_rejects_the_tail() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let first = builder.add(SchemaNode::new("/items/0"));
            builder.add(
                SchemaNode::new("")
                    .with_items_list([first])
                    .with_additional_items(Additional::Bool(false)),
            )
        });
        tests_util::assert_valid(&store, &json!([1]));
        tests_util::assert_first_error(&store, &json!([1, 2]), "# (root): additionalItems false");
        tests_util::assert_schema_path(&store, &json!([1, 2]), "/additionalItems");
    }

    #[test_case(json!([]), 1, true)]
    #[test_case(json!([1]), 2, true)]
    #[test_case(json!([1, 2, 3]), 2, false)]
    fn max_items(instance: Value, limit: u64, expected: bool) {
        let store = tests_util::single(Draft::Draft6, SchemaNode::new("").with_max_items(limit));
        assert_eq!(tests_util::is_valid(&store, &instance), expected);
    }

    #[test]
    fn min_items() {
        let store = tests_util::single(Draft::Draft6, SchemaNode::new("").with_min_items(1));
        tests_util::assert_valid(&store, &json!([1]));
        tests_util::assert_first_error(&store, &json!([]), "# (root): minItems violated");
    }

    #[test]
    fn unique_items_reports_every_duplicate_pair() {
        let store = tests_util::single(Draft::Draft6, SchemaNode::new("").with_unique_items());
        tests_util::assert_valid(&store, &json!([1, 2, 3]));
        let errors = tests_util::collect_errors(&store, &json!([1, 1.0, 1]));
        assert_eq!(
            errors,
            [
                "# (root): uniqueItems violated: [1,1.0,1] [0]==[1]",
                "# (root): uniqueItems violated: [1,1.0,1] [0]==[2]",
                "# (root): uniqueItems violated: [1,1.0,1] [1]==[2]",
            ]
        );
    }

    #[test]
    fn unique_items_compares_structurally() {
        let store = tests_util::single(Draft::Draft6, SchemaNode::new("").with_unique_items());
        tests_util::assert_not_valid(&store, &json!([{"a": [1]}, {"a": [1.0]}]));
        tests_util::assert_valid(&store, &json!([{"a": [1]}, {"a": [2]}]));
    }

    #[test]
    fn contains_reports_first_matching_index() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let needle = builder.add(SchemaNode::new("/contains").with_const(json!("b")));
            builder.add(SchemaNode::new("").with_contains(needle))
        });
        let mut validator = Validator::new(&store);
        assert!(validator.validate(&json!(["a", "b", "b"])));
        assert_eq!(validator.errors(), ["# (root): matchedIndex:1"]);
    }

    #[test]
    fn contains_annotation_can_be_disabled() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let needle = builder.add(SchemaNode::new("/contains").with_const(json!("b")));
            builder.add(SchemaNode::new("").with_contains(needle))
        });
        let mut validator = Validator::options()
            .contains_annotations(false)
            .build(&store);
        assert!(validator.validate(&json!(["a", "b"])));
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn contains_violation() {
        let store = tests_util::store_with(Draft::Draft6, |builder| {
            let needle = builder.add(SchemaNode::new("/contains").with_minimum(5.0));
            builder.add(SchemaNode::new("").with_contains(needle))
        });
        tests_util::assert_first_error(&store, &json!([2, 3, 4]), "# (root): contains violated");
    }
}
