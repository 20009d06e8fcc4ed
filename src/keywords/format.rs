//! Validator for `format` and the draft-6 format bounds.
//!
//! `date-time`, `date` and `time` parse as ISO-8601; `ipv4`, `ipv6`,
//! `hostname` and `json-pointer` are matched against the patterns below;
//! `uri`, `uri-reference`, `uri-template` and `email` delegate to the
//! process-wide predicate registry.
use crate::{
    error::ValidationError,
    formats,
    node::{PrimitiveType, SchemaNode},
    paths::InstancePath,
    schemas::Draft,
    validator::{Eval, Evaluator},
};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}\z").expect("Is a valid regex"));
static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\z",
    )
    .expect("Is a valid regex")
});
static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\z",
    )
    .expect("Is a valid regex")
});
static IPV6_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(([0-9a-f]{1,4}:){7}[0-9a-f]{1,4}|([0-9a-f]{1,4}:){1,7}:|([0-9a-f]{1,4}:){1,6}:[0-9a-f]{1,4}|([0-9a-f]{1,4}:){1,5}(:[0-9a-f]{1,4}){1,2}|([0-9a-f]{1,4}:){1,4}(:[0-9a-f]{1,4}){1,3}|([0-9a-f]{1,4}:){1,3}(:[0-9a-f]{1,4}){1,4}|([0-9a-f]{1,4}:){1,2}(:[0-9a-f]{1,4}){1,5}|[0-9a-f]{1,4}:(:[0-9a-f]{1,4}){1,6}|:((:[0-9a-f]{1,4}){1,7}|:))\z",
    )
    .expect("Is a valid regex")
});
static JSON_POINTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/(([^/~])|(~[01]))*)*\z").expect("Is a valid regex"));

pub(crate) fn validate(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    instance: &Value,
    instance_path: &InstancePath<'_>,
) -> Eval {
    if !node.has_format_keywords() {
        return Ok(());
    }
    // Every format keyword wants a string
    let item = match instance {
        Value::String(item) => item,
        _ => {
            return evaluator.report(ValidationError::type_mismatch(
                node.path.extended("format"),
                instance_path.into(),
                vec![PrimitiveType::String],
                instance.clone(),
            ))
        }
    };
    if let Some(format) = &node.format {
        validate_tag(evaluator, node, format, item, instance_path)?;
    }
    if let Some(limit) = &node.format_minimum {
        validate_bound(evaluator, node, "formatMinimum", limit, item, instance_path, |ordering| {
            ordering == Ordering::Greater
        })?;
    }
    if let Some(limit) = &node.format_maximum {
        validate_bound(evaluator, node, "formatMaximum", limit, item, instance_path, |ordering| {
            ordering == Ordering::Less
        })?;
    }
    if let Some(limit) = &node.format_exclusive_minimum {
        validate_bound(
            evaluator,
            node,
            "formatExclusiveMinimum",
            limit,
            item,
            instance_path,
            |ordering| ordering != Ordering::Less,
        )?;
    }
    if let Some(limit) = &node.format_exclusive_maximum {
        validate_bound(
            evaluator,
            node,
            "formatExclusiveMaximum",
            limit,
            item,
            instance_path,
            |ordering| ordering != Ordering::Greater,
        )?;
    }
    Ok(())
}

fn validate_tag(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    format: &str,
    item: &str,
    instance_path: &InstancePath<'_>,
) -> Eval {
    let schema_path = node.path.extended("format");
    if evaluator.draft() == Draft::Draft4 && Draft::format_is_draft6_only(format) {
        return evaluator.report(ValidationError::format_needs_draft6(
            schema_path,
            instance_path.into(),
            format.to_string(),
        ));
    }
    let valid = match format {
        "date-time" => parse_datetime(item).is_some(),
        // Parsing alone would tolerate unpadded components; the regex also
        // throws out anything with a `T`
        "date" => NaiveDate::parse_from_str(item, "%Y-%m-%d").is_ok() && DATE_RE.is_match(item),
        "time" => parse_datetime(&format!("1970-01-01T{}", item)).is_some(),
        "hostname" => HOSTNAME_RE.is_match(item),
        "ipv4" => IPV4_RE.is_match(item),
        "ipv6" => IPV6_RE.is_match(item),
        "json-pointer" => JSON_POINTER_RE.is_match(item),
        "uri" | "uri-reference" | "uri-template" | "email" => formats::lookup(format)
            .map_or(false, |predicate| predicate(item)),
        _ => {
            return evaluator.report(ValidationError::unknown_format(
                schema_path,
                instance_path.into(),
                format.to_string(),
            ))
        }
    };
    if valid {
        Ok(())
    } else {
        evaluator.report(ValidationError::format(
            schema_path,
            instance_path.into(),
            format.to_string(),
        ))
    }
}

fn validate_bound(
    evaluator: &mut Evaluator<'_>,
    node: &SchemaNode,
    keyword: &str,
    limit: &str,
    item: &str,
    instance_path: &InstancePath<'_>,
    violates: impl Fn(Ordering) -> bool,
) -> Eval {
    let schema_path = node.path.extended(keyword);
    // One ISO-8601 conformance check: an unparsable operand and a violated
    // bound share the `date-time` message; the keyword shows in the schema
    // path
    let valid = match (parse_datetime(limit), parse_datetime(item)) {
        (Some(limit), Some(value)) => !violates(limit.cmp(&value)),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        evaluator.report(ValidationError::format(
            schema_path,
            instance_path.into(),
            "date-time".to_string(),
        ))
    }
}

// ISO-8601 with a literal `T` separator; fractional seconds allowed
fn parse_datetime(item: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(item, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
