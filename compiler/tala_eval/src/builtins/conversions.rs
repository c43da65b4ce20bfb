use tala_ir::{ConversionOperator, StringInterner, Ty};

use super::BuiltinConversion;
use crate::{ConversionFn, ErrorValue, JsonValue, Value};

pub(super) fn all(interner: &StringInterner) -> Vec<BuiltinConversion> {
    let safe = |source: Ty, target: Ty, name: &str, routine: ConversionFn| BuiltinConversion {
        operator: ConversionOperator::safe(source, target, interner.intern(name)),
        routine,
    };
    let unsafe_ = |source: Ty, target: Ty, name: &str, routine: ConversionFn| BuiltinConversion {
        operator: ConversionOperator::unsafe_(source, target, interner.intern(name)),
        routine,
    };

    vec![
        unsafe_(Ty::Json, Ty::Int, "json_to_int", json_to_int),
        unsafe_(Ty::Json, Ty::String, "json_to_string", json_to_string),
        unsafe_(Ty::String, Ty::Int, "string_to_int", string_to_int),
        safe(Ty::Int, Ty::Float, "int_to_float", int_to_float),
        safe(Ty::Int, Ty::String, "int_to_string", int_to_string),
        safe(Ty::Float, Ty::Int, "float_to_int", float_to_int),
        safe(Ty::Boolean, Ty::String, "boolean_to_string", boolean_to_string),
    ]
}

fn mismatch(operand: &Value) -> ErrorValue {
    ErrorValue::new(format!("unexpected operand {operand:?}"))
}

fn json_to_int(operand: &Value) -> Result<Value, ErrorValue> {
    match operand {
        Value::Json(json) => match **json {
            JsonValue::Int(n) => Ok(Value::Int(n)),
            ref other => Err(ErrorValue::new(format!(
                "cannot convert json {} to int",
                other.kind()
            ))),
        },
        _ => Err(mismatch(operand)),
    }
}

fn json_to_string(operand: &Value) -> Result<Value, ErrorValue> {
    match operand {
        Value::Json(json) => match &**json {
            JsonValue::String(s) => Ok(Value::from(s.as_str())),
            other => Err(ErrorValue::new(format!(
                "cannot convert json {} to string",
                other.kind()
            ))),
        },
        _ => Err(mismatch(operand)),
    }
}

fn string_to_int(operand: &Value) -> Result<Value, ErrorValue> {
    let s = operand.as_str().ok_or_else(|| mismatch(operand))?;
    s.parse::<i64>()
        .map(Value::Int)
        .map_err(|_| ErrorValue::new(format!("'{s}' cannot be converted to int")))
}

#[expect(clippy::cast_precision_loss, reason = "int to float conversion is lossy by definition")]
fn int_to_float(operand: &Value) -> Result<Value, ErrorValue> {
    match operand {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        _ => Err(mismatch(operand)),
    }
}

fn int_to_string(operand: &Value) -> Result<Value, ErrorValue> {
    match operand {
        Value::Int(n) => Ok(Value::from(n.to_string())),
        _ => Err(mismatch(operand)),
    }
}

/// Truncates toward zero. Out-of-range values saturate and NaN becomes 0.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int truncates by definition"
)]
fn float_to_int(operand: &Value) -> Result<Value, ErrorValue> {
    match operand {
        Value::Float(n) => Ok(Value::Int(*n as i64)),
        _ => Err(mismatch(operand)),
    }
}

fn boolean_to_string(operand: &Value) -> Result<Value, ErrorValue> {
    match operand {
        Value::Boolean(b) => Ok(Value::from(b.to_string())),
        _ => Err(mismatch(operand)),
    }
}
