//! Numeric bounds and `multipleOf`.
//!
//! Exclusive bounds take precedence over the inclusive ones: draft 6 numbers
//! replace `maximum`/`minimum` outright, draft 4 boolean flags upgrade the
//! paired bound.
use crate::{
    error::ValidationError,
    node::{Exclusive, SchemaNode},
    paths::InstancePath,
    validator::{Eval, Evaluator},
};
use serde_json::Number;

pub(crate) fn validate(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    item: &Number,
    instance_path: &InstancePath<'_>,
) -> Eval {
    let value = item.as_f64().expect("Always valid");
    match node.exclusive_maximum {
        Some(Exclusive::Limit(limit)) => {
            if value >= limit {
                evaluator.report(ValidationError::exclusive_maximum(
                    node.path.extended("exclusiveMaximum"),
                    instance_path.into(),
                ))?;
            }
        }
        Some(Exclusive::Flag(true)) => {
            if let Some(limit) = node.maximum {
                if value >= limit {
                    evaluator.report(ValidationError::exclusive_maximum(
                        node.path.extended("exclusiveMaximum"),
                        instance_path.into(),
                    ))?;
                }
            }
        }
        Some(Exclusive::Flag(false)) | None => {
            if let Some(limit) = node.maximum {
                if value > limit {
                    evaluator.report(ValidationError::maximum(
                        node.path.extended("maximum"),
                        instance_path.into(),
                    ))?;
                }
            }
        }
    }
    match node.exclusive_minimum {
        Some(Exclusive::Limit(limit)) => {
            if value <= limit {
                evaluator.report(ValidationError::exclusive_minimum(
                    node.path.extended("exclusiveMinimum"),
                    instance_path.into(),
                ))?;
            }
        }
        Some(Exclusive::Flag(true)) => {
            if let Some(limit) = node.minimum {
                if value <= limit {
                    evaluator.report(ValidationError::exclusive_minimum(
                        node.path.extended("exclusiveMinimum"),
                        instance_path.into(),
                    ))?;
                }
            }
        }
        Some(Exclusive::Flag(false)) | None => {
            if let Some(limit) = node.minimum {
                if value < limit {
                    evaluator.report(ValidationError::minimum(
                        node.path.extended("minimum"),
                        instance_path.into(),
                    ))?;
                }
            }
        }
    }
    if let Some(multiple_of) = node.multiple_of {
        let valid = match (item.as_i64(), multiple_of.fract() == 0.0) {
            // Both operands integral: exact remainder
            (Some(value), true) => value % (multiple_of as i64) == 0,
            _ => {
                let quotient = value / multiple_of;
                quotient.trunc() == quotient
            }
        };
        if !valid {
            evaluator.report(ValidationError::multiple_of(
                node.path.extended("multipleOf"),
                instance_path.into(),
                item.clone(),
                multiple_of,
            ))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        node::{Exclusive, SchemaNode},
        schemas::Draft,
        tests_util,
    };
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!(2), true)]
    #[test_case(json!(3), true)]
    #[test_case(json!(3.5), false)]
    fn inclusive_maximum(instance: Value, expected: bool) {
        let store = tests_util::single(Draft::Draft6, SchemaNode::new("").with_maximum(3.0));
        assert_eq!(tests_util::is_valid(&store, &instance), expected);
    }

    #[test]
    fn draft6_exclusive_replaces_inclusive() {
        // Both bounds set: the exclusive number wins, so 4 is out even
        // though `maximum` alone would admit it
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("")
                .with_maximum(5.0)
                .with_exclusive_maximum(Exclusive::Limit(4.0)),
        );
        tests_util::assert_valid(&store, &json!(3.9));
        tests_util::assert_first_error(
            &store,
            &json!(4),
            "# (root): exclusiveMaximum exceeded",
        );
    }

    #[test]
    fn draft4_flag_upgrades_paired_bound() {
        let store = tests_util::single(
            Draft::Draft4,
            SchemaNode::new("")
                .with_minimum(1.0)
                .with_exclusive_minimum(Exclusive::Flag(true)),
        );
        tests_util::assert_valid(&store, &json!(2));
        tests_util::assert_first_error(&store, &json!(1), "# (root): exclusiveMinimum violated");
    }

    #[test]
    fn draft4_flag_without_paired_bound_is_a_no_op() {
        let store = tests_util::single(
            Draft::Draft4,
            SchemaNode::new("").with_exclusive_minimum(Exclusive::Flag(true)),
        );
        tests_util::assert_valid(&store, &json!(-100));
    }

    #[test_case(json!(4), 2.0, true)]
    #[test_case(json!(7), 2.0, false)]
    #[test_case(json!(4.5), 1.5, true)]
    #[test_case(json!(5), 1.5, false)]
    fn multiples(instance: Value, multiple_of: f64, expected: bool) {
        let store = tests_util::single(
            Draft::Draft6,
            SchemaNode::new("").with_multiple_of(multiple_of),
        );
        assert_eq!(tests_util::is_valid(&store, &instance), expected);
    }

    #[test]
    fn multiple_of_message_shows_both_operands() {
        let store =
            tests_util::single(Draft::Draft6, SchemaNode::new("").with_multiple_of(2.0));
        tests_util::assert_first_error(&store, &json!(7), "# (root): multipleOf violated (7 % 2)");
    }
}
