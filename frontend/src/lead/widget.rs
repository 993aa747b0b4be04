use std::rc::Rc;

use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use serde_json::Value;
use thiserror::Error;
use yew::NodeRef;

pub const DEFAULT_EVENT_NAME: &str = "Strategy Call";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetLoadError {
    #[error("no browser window available")]
    NoWindow,
    #[error("could not inject widget assets: {0}")]
    Inject(String),
    #[error("widget script failed to load")]
    ScriptFailed,
    #[error("widget script loaded but the runtime never registered")]
    RuntimeMissing,
    #[error("booking widget mount point is not rendered")]
    MountMissing,
}

/// Payload of the "event scheduled" callback. The widget gives no guarantees
/// about its shape, so every level is optional and each leaf is read on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledEventPayload {
    pub data: Option<ScheduledEventData>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledEventData {
    pub event: Option<ScheduledEvent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledEvent {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl ScheduledEventPayload {
    /// A leaf of the wrong type reads as missing without taking its siblings with it.
    pub fn from_json(value: Value) -> Self {
        let text = |pointer: &str| {
            value
                .pointer(pointer)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let event = value
            .pointer("/data/event")
            .filter(|event| event.is_object())
            .map(|_| ScheduledEvent {
                name: text("/data/event/name"),
                start_time: text("/data/event/start_time"),
                end_time: text("/data/event/end_time"),
            });
        let data = value
            .pointer("/data")
            .filter(|data| data.is_object())
            .map(|_| ScheduledEventData { event });
        Self { data }
    }

    fn event(&self) -> Option<&ScheduledEvent> {
        self.data.as_ref().and_then(|data| data.event.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    EventScheduled(ScheduledEventPayload),
    EventTypeViewed,
    DateAndTimeSelected,
}

pub type WidgetEventSink = Rc<dyn Fn(WidgetEvent)>;

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub event_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

fn parse_time(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|time| time.with_timezone(&Utc))
}

impl AppointmentDetails {
    pub fn from_payload(payload: &ScheduledEventPayload) -> Self {
        let event = payload.event();
        let event_name = event
            .and_then(|event| event.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_EVENT_NAME)
            .to_string();

        Self {
            event_name,
            start_time: parse_time(event.and_then(|event| event.start_time.as_ref())),
            end_time: parse_time(event.and_then(|event| event.end_time.as_ref())),
        }
    }
}

/// A loaded scheduler runtime.
pub trait WidgetRuntime {
    /// Fails when `parent` is not in the document.
    fn init_inline_widget(&self, url: &str, parent: &NodeRef) -> Result<(), WidgetLoadError>;
    /// Delivers scheduled, event-type-viewed and date-selected callbacks.
    fn subscribe(&self, sink: WidgetEventSink);
}

pub trait WidgetRuntimeProvider {
    /// Resolves to the runtime, loading it first if nothing on the page has.
    fn ensure_loaded(&self) -> LocalBoxFuture<'static, Result<Rc<dyn WidgetRuntime>, WidgetLoadError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn full_payload_is_extracted() {
        let payload = ScheduledEventPayload::from_json(json!({
            "data": {
                "event": {
                    "name": "Discovery Call",
                    "start_time": "2025-01-01T10:00:00Z",
                    "end_time": "2025-01-01T10:30:00+00:00"
                }
            }
        }));
        let details = AppointmentDetails::from_payload(&payload);
        assert_eq!(details.event_name, "Discovery Call");
        assert_eq!(details.start_time, Some(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()));
        assert_eq!(details.end_time, Some(Utc.with_ymd_and_hms(2025, 1, 1, 10, 30, 0).unwrap()));
    }

    #[test]
    fn missing_pieces_fall_back() {
        for value in [json!({}), json!({"data": {}}), json!(null), json!("junk")] {
            let details = AppointmentDetails::from_payload(&ScheduledEventPayload::from_json(value));
            assert_eq!(details.event_name, DEFAULT_EVENT_NAME);
            assert_eq!(details.start_time, None);
            assert_eq!(details.end_time, None);
        }
    }

    #[test]
    fn blank_name_and_bad_times_are_ignored() {
        let payload = ScheduledEventPayload::from_json(json!({
            "data": {"event": {"name": "  ", "start_time": "tomorrow", "end_time": 42}}
        }));
        let details = AppointmentDetails::from_payload(&payload);
        assert_eq!(details.event_name, DEFAULT_EVENT_NAME);
        assert_eq!(details.start_time, None);
        assert_eq!(details.end_time, None);
    }

    #[test]
    fn wrongly_typed_field_keeps_its_siblings() {
        let payload = ScheduledEventPayload::from_json(json!({
            "data": {"event": {
                "name": "Discovery Call",
                "start_time": "2025-01-01T10:00:00Z",
                "end_time": 42
            }}
        }));
        let details = AppointmentDetails::from_payload(&payload);
        assert_eq!(details.event_name, "Discovery Call");
        assert_eq!(details.start_time, Some(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()));
        assert_eq!(details.end_time, None);
    }

    #[test]
    fn non_object_event_is_absent() {
        let payload = ScheduledEventPayload::from_json(json!({"data": {"event": "calendly.event_scheduled"}}));
        assert_eq!(
            payload,
            ScheduledEventPayload { data: Some(ScheduledEventData { event: None }) }
        );
    }
}
