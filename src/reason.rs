use serde_json::Value;

/// Turns an engine-defined failure reason into display text.
pub trait ReasonFormatter<R> {
    fn format_reason(&self, reason: &R) -> Result<String, String>;
}

impl<R, F> ReasonFormatter<R> for F
where
    F: Fn(&R) -> Result<String, String>,
{
    fn format_reason(&self, reason: &R) -> Result<String, String> {
        self(reason)
    }
}

/// Formats reasons loaded from JSON or YAML input.
///
/// Strings are shown as-is, other scalars and collections in compact JSON.
/// A `null` reason has no text and is reported as an error.
pub struct JsonReasonFormatter {}

impl ReasonFormatter<Value> for JsonReasonFormatter {
    fn format_reason(&self, reason: &Value) -> Result<String, String> {
        match reason {
            Value::Null => Err("reason is null".to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Bool(_) | Value::Number(_) => Ok(reason.to_string()),
            Value::Array(_) | Value::Object(_) => {
                serde_json::to_string(reason).map_err(|err| err.to_string())
            }
        }
    }
}
