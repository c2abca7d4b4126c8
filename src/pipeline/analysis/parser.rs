use serde_json::Value;

use super::types::ScheduleEvent;
use super::AnalysisError;

/// Recover an event list from a model response that may or may not honor
/// the bare-JSON-array output contract.
///
/// Ordered attempts, short-circuiting on first success:
/// 1. the whole response parses as JSON;
/// 2. the first `[` .. last `]` substring parses as a JSON array;
/// 3. the first `{` .. last `}` substring parses as a JSON object.
/// A recovered non-array object is unwrapped through its `events` field,
/// then `data`; failing both, the object itself is treated as a single
/// event. Malformed array items are skipped, not fatal.
pub fn parse_event_response(response: &str) -> Result<Vec<ScheduleEvent>, AnalysisError> {
    let value = recover_json_value(response).ok_or(AnalysisError::UnparseableResponse)?;
    let items = unwrap_event_array(value).ok_or(AnalysisError::UnparseableResponse)?;
    Ok(parse_items_lenient(&items))
}

fn recover_json_value(response: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(response) {
        return Some(value);
    }
    if let Some(slice) = bracketed_slice(response, '[', ']') {
        if let Ok(value @ Value::Array(_)) = serde_json::from_str::<Value>(slice) {
            return Some(value);
        }
    }
    if let Some(slice) = bracketed_slice(response, '{', '}') {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(slice) {
            return Some(value);
        }
    }
    None
}

/// Substring from the first `open` to the last `close`, inclusive.
fn bracketed_slice(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Coerce a recovered JSON value into an array of candidate event values.
fn unwrap_event_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut obj) => {
            for field in ["events", "data"] {
                if let Some(Value::Array(items)) = obj.remove(field) {
                    return Some(items);
                }
            }
            // No wrapper field: treat the object as a single event.
            Some(vec![Value::Object(obj)])
        }
        _ => None,
    }
}

/// Deserialize items leniently, skipping entries that fail to deserialize.
fn parse_items_lenient(items: &[Value]) -> Vec<ScheduleEvent> {
    items
        .iter()
        .filter(|v| v.is_object())
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}
