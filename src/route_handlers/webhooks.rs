use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};

use crate::cloud_event::SchedulerEvent;

pub async fn handler(headers: HeaderMap, body: Bytes) -> impl axum::response::IntoResponse {
    let event = match SchedulerEvent::from_request(&headers, &body) {
        Ok(event) => event,
        Err(_) => return StatusCode::BAD_REQUEST,
    };

    tracing::debug!("Scheduler event: {:?}", event);
    tracing::info!("{}", event.execution_message());
    if let Some(custom_data) = event.custom_data_message() {
        tracing::info!("{}", custom_data);
    }

    StatusCode::OK
}
