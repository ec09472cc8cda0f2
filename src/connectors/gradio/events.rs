//! Decoding of Gradio `/call/{api}/{event_id}` result streams.
//!
//! The body is a server-sent-event stream:
//!
//! ```text
//! event: generating
//! data: ["Hel"]
//!
//! event: complete
//! data: ["Hello!"]
//! ```

use crate::connectors::chat::Prediction;
use crate::connectors::errors::ConnectorError;
use crate::models::HistoryPair;
use serde_json::Value;

#[derive(Debug, Default, PartialEq)]
struct Event {
    name: String,
    data: String,
}

fn events(body: &str) -> Vec<Event> {
    let mut events = Vec::new();
    let mut current = Event::default();

    for line in body.lines().map(|line| line.trim_end_matches('\r')) {
        if line.is_empty() {
            if !current.name.is_empty() || !current.data.is_empty() {
                events.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(name) = line.strip_prefix("event:") {
            current.name = name.trim().to_string();
        } else if let Some(data) = line.strip_prefix("data:") {
            if !current.data.is_empty() {
                current.data.push('\n');
            }
            current.data.push_str(data.trim_start());
        }
    }

    if !current.name.is_empty() || !current.data.is_empty() {
        events.push(current);
    }
    events
}

/// Returns the output array of the `complete` event.
pub(super) fn completed_output(body: &str) -> Result<Value, ConnectorError> {
    for event in events(body) {
        match event.name.as_str() {
            "complete" => {
                return serde_json::from_str(&event.data).map_err(|err| {
                    ConnectorError::InvalidResponse(format!("complete event is not JSON: {}", err))
                });
            }
            "error" => {
                let message = match serde_json::from_str::<Value>(&event.data) {
                    Ok(Value::String(message)) => message,
                    Ok(Value::Null) => "prediction failed".to_string(),
                    Ok(other) => other.to_string(),
                    Err(_) if event.data.trim().is_empty() => "prediction failed".to_string(),
                    Err(_) => event.data,
                };
                return Err(ConnectorError::Remote(message));
            }
            _ => {}
        }
    }

    Err(ConnectorError::InvalidResponse(
        "event stream ended without a result".to_string(),
    ))
}

/// Maps Gradio outputs `[reply, history?]` onto a [`Prediction`].
pub(super) fn prediction(output: Value) -> Result<Prediction, ConnectorError> {
    let mut outputs = match output {
        Value::Array(outputs) => outputs.into_iter(),
        other => {
            return Err(ConnectorError::InvalidResponse(format!(
                "expected an array of outputs, got {}",
                other
            )))
        }
    };

    let reply = match outputs.next() {
        None | Some(Value::Null) => None,
        Some(Value::String(reply)) => Some(reply),
        Some(other) => Some(other.to_string()),
    };

    let history = match outputs.next() {
        Some(Value::Array(turns)) => history_pairs(turns),
        _ => Vec::new(),
    };

    Ok(Prediction { reply, history })
}

// Accepts both tuple-style `[[user, bot], ...]` and message-style
// `[{role, content}, ...]` histories.
fn history_pairs(turns: Vec<Value>) -> Vec<HistoryPair> {
    let mut pairs: Vec<HistoryPair> = Vec::new();
    let mut pending_user: Option<String> = None;

    for turn in turns {
        match turn {
            Value::Array(pair) => {
                let mut pair = pair.into_iter().map(text);
                let user = pair.next().unwrap_or_default();
                let bot = pair.next().unwrap_or_default();
                pairs.push((user, bot));
            }
            Value::Object(mut message) => {
                let role = message
                    .get("role")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let content = message.remove("content").map(text).unwrap_or_default();
                match role.as_str() {
                    "user" => {
                        if let Some(user) = pending_user.replace(content) {
                            pairs.push((user, String::new()));
                        }
                    }
                    "assistant" => {
                        pairs.push((pending_user.take().unwrap_or_default(), content));
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    if let Some(user) = pending_user {
        pairs.push((user, String::new()));
    }
    pairs
}

fn text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}
