use anyhow::{bail, Context};
use axum::http::{header, HeaderMap};
use serde_json::Value;

/**
 * content type announcing a structured-mode cloud event, the attributes travel
 * inside the json body instead of the ce-* headers
 **/
pub const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

const MISSING_ATTRIBUTE: &str = "unknown";

/**
 * a scheduler trigger, as delivered by a single webhook request
 **/
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchedulerEvent {
    pub id: Option<String>,
    pub time: Option<String>,
    pub event_type: Option<String>,
    pub source: Option<String>,
    pub spec_version: Option<String>,
    pub custom_data: Option<String>,
}

impl SchedulerEvent {
    /**
     * builds the event from the request headers and raw body, picking binary or
     * structured content mode from the content type. fails on an empty or non-json body
     **/
    pub fn from_request(headers: &HeaderMap, body: &[u8]) -> anyhow::Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            bail!("empty request body");
        }

        if is_structured(headers) {
            Self::from_structured(body)
        } else {
            Self::from_binary(headers, body)
        }
    }

    fn from_binary(headers: &HeaderMap, body: &[u8]) -> anyhow::Result<Self> {
        let data: Value = serde_json::from_slice(body).context("request body is not valid JSON")?;

        Ok(SchedulerEvent {
            id: header_value(headers, "ce-id"),
            time: header_value(headers, "ce-time"),
            event_type: header_value(headers, "ce-type"),
            source: header_value(headers, "ce-source"),
            spec_version: header_value(headers, "ce-specversion"),
            custom_data: custom_data(&data),
        })
    }

    // attributes that are missing or not strings are treated as absent
    fn from_structured(body: &[u8]) -> anyhow::Result<Self> {
        let event: Value =
            serde_json::from_slice(body).context("structured event body is not valid JSON")?;

        Ok(SchedulerEvent {
            id: attribute(&event, "id"),
            time: attribute(&event, "time"),
            event_type: attribute(&event, "type"),
            source: attribute(&event, "source"),
            spec_version: attribute(&event, "specversion"),
            custom_data: event.get("data").and_then(custom_data),
        })
    }

    pub fn execution_message(&self) -> String {
        format!(
            "Cloud Scheduler executed a job (id: {}) at {}",
            self.id.as_deref().unwrap_or(MISSING_ATTRIBUTE),
            self.time.as_deref().unwrap_or(MISSING_ATTRIBUTE)
        )
    }

    pub fn custom_data_message(&self) -> Option<String> {
        self.custom_data
            .as_ref()
            .map(|custom_data| format!("Custom data: {custom_data}"))
    }
}

fn is_structured(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(STRUCTURED_CONTENT_TYPE))
        .unwrap_or(false)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

fn attribute(event: &Value, name: &str) -> Option<String> {
    event.get(name).and_then(Value::as_str).map(str::to_owned)
}

// strings are kept verbatim, anything else is rendered as compact json
fn custom_data(data: &Value) -> Option<String> {
    match data.get("custom_data")? {
        Value::Null => None,
        Value::String(custom_data) => Some(custom_data.clone()),
        other => Some(other.to_string()),
    }
}
