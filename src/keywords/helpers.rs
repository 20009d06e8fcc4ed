use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

/// JSON equality: numbers by numeric value, arrays elementwise, objects as
/// unordered key sets with recursively equal values.
#[inline]
pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => equal_numbers(left, right),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(a, b)| equal(a, b))
        }
        (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
        (_, _) => false,
    }
}

// Key order is irrelevant, so compare by lookup rather than by zipping.
#[inline]
fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).map_or(false, |other| equal(value, other)))
}

#[inline]
pub(crate) fn equal_numbers(left: &Number, right: &Number) -> bool {
    if let Some(left) = left.as_u64() {
        num_eq(left, right)
    } else if let Some(left) = left.as_i64() {
        num_eq(left, right)
    } else {
        num_eq(left.as_f64().expect("Always valid"), right)
    }
}

#[inline]
fn num_eq<T>(left: T, right: &Number) -> bool
where
    T: NumCmp<u64> + NumCmp<i64> + NumCmp<f64>,
{
    if let Some(right) = right.as_u64() {
        NumCmp::num_eq(left, right)
    } else if let Some(right) = right.as_i64() {
        NumCmp::num_eq(left, right)
    } else {
        NumCmp::num_eq(left, right.as_f64().expect("Always valid"))
    }
}
