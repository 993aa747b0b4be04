use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Object, Reflect};
use web_sys::{window, Document, Element, MessageEvent};
use yew::NodeRef;

use super::widget::{
    ScheduledEventPayload, WidgetEvent, WidgetEventSink, WidgetLoadError, WidgetRuntime,
    WidgetRuntimeProvider,
};
use crate::config;

const SCRIPT_ID: &str = "calendly-widget-script";
const STYLESHEET_ID: &str = "calendly-widget-styles";
const CALENDLY_ORIGIN: &str = "https://calendly.com";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Calendly, js_name = initInlineWidget)]
    fn calendly_init_inline_widget(options: &JsValue);
}

fn runtime_present() -> bool {
    window()
        .and_then(|w| Reflect::get(&w, &JsValue::from_str("Calendly")).ok())
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

/// Only the embed's own frames may drive the booking flow.
fn is_calendly_origin(origin: &str) -> bool {
    origin == CALENDLY_ORIGIN
        || origin
            .strip_prefix("https://")
            .and_then(|host| host.strip_suffix(".calendly.com"))
            .map_or(false, |sub| !sub.is_empty() && !sub.contains(['/', ':', '.']))
}

/// The embed posts `{ event: "calendly.<kind>", payload: {...} }` to the page.
#[derive(Deserialize)]
struct CalendlyMessage {
    event: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// The scheduled callback's payload is the message's `payload` member.
/// Calendly fills it with `{ event: { uri }, invitee: { uri } }`, which has no
/// `data.event` details, so the confirmation falls back to the default name
/// and leaves the times out unless a richer payload is posted.
fn to_widget_event(message: CalendlyMessage) -> Option<WidgetEvent> {
    match message.event.as_str() {
        "calendly.event_scheduled" => Some(WidgetEvent::EventScheduled(
            ScheduledEventPayload::from_json(message.payload),
        )),
        "calendly.event_type_viewed" => Some(WidgetEvent::EventTypeViewed),
        "calendly.date_and_time_selected" => Some(WidgetEvent::DateAndTimeSelected),
        _ => None,
    }
}

pub struct CalendlyRuntime {
    listeners: RefCell<Vec<Closure<dyn FnMut(MessageEvent)>>>,
}

impl CalendlyRuntime {
    fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl WidgetRuntime for CalendlyRuntime {
    fn init_inline_widget(&self, url: &str, parent: &NodeRef) -> Result<(), WidgetLoadError> {
        let Some(parent) = parent.cast::<Element>() else {
            warn!("Booking widget mount point is not rendered");
            return Err(WidgetLoadError::MountMissing);
        };
        let options = Object::new();
        let _ = Reflect::set(&options, &"url".into(), &JsValue::from_str(url));
        let _ = Reflect::set(&options, &"parentElement".into(), &parent);
        calendly_init_inline_widget(&options);
        Ok(())
    }

    fn subscribe(&self, sink: WidgetEventSink) {
        let Some(window) = window() else {
            return;
        };
        let listener = Closure::wrap(Box::new(move |e: MessageEvent| {
            if !is_calendly_origin(&e.origin()) {
                return;
            }
            let Ok(message) = serde_wasm_bindgen::from_value::<CalendlyMessage>(e.data()) else {
                return;
            };
            if let Some(event) = to_widget_event(message) {
                sink(event);
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        if window
            .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
            .is_ok()
        {
            self.listeners.borrow_mut().push(listener);
        }
    }
}

impl Drop for CalendlyRuntime {
    fn drop(&mut self) {
        if let Some(window) = window() {
            for listener in self.listeners.borrow().iter() {
                let _ = window
                    .remove_event_listener_with_callback("message", listener.as_ref().unchecked_ref());
            }
        }
    }
}

/// Loads the Calendly embed at most once per page.
#[derive(Default)]
pub struct CalendlyProvider;

fn inject_stylesheet(document: &Document) -> Result<(), WidgetLoadError> {
    if document.get_element_by_id(STYLESHEET_ID).is_some() {
        return Ok(());
    }
    let link = document
        .create_element("link")
        .map_err(|e| WidgetLoadError::Inject(format!("{:?}", e)))?;
    link.set_id(STYLESHEET_ID);
    let _ = link.set_attribute("rel", "stylesheet");
    let _ = link.set_attribute("href", config::BOOKING_WIDGET_CSS);
    let head = document
        .head()
        .ok_or_else(|| WidgetLoadError::Inject("document has no head".to_string()))?;
    head.append_child(&link)
        .map_err(|e| WidgetLoadError::Inject(format!("{:?}", e)))?;
    Ok(())
}

fn script_element(document: &Document) -> Result<(Element, bool), WidgetLoadError> {
    if let Some(existing) = document.get_element_by_id(SCRIPT_ID) {
        return Ok((existing, false));
    }
    let script = document
        .create_element("script")
        .map_err(|e| WidgetLoadError::Inject(format!("{:?}", e)))?;
    script.set_id(SCRIPT_ID);
    let _ = script.set_attribute("src", config::BOOKING_WIDGET_SCRIPT);
    let _ = script.set_attribute("async", "true");
    Ok((script, true))
}

async fn load_runtime() -> Result<Rc<dyn WidgetRuntime>, WidgetLoadError> {
    if runtime_present() {
        info!("Reusing booking widget runtime already on the page");
        return Ok(Rc::new(CalendlyRuntime::new()));
    }

    let document = window()
        .and_then(|w| w.document())
        .ok_or(WidgetLoadError::NoWindow)?;
    inject_stylesheet(&document)?;
    let (script, fresh) = script_element(&document)?;

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let on_load = {
        let tx = tx.clone();
        Closure::once_into_js(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
        })
    };
    let on_error = Closure::once_into_js(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });
    script
        .add_event_listener_with_callback("load", on_load.unchecked_ref())
        .map_err(|e| WidgetLoadError::Inject(format!("{:?}", e)))?;
    script
        .add_event_listener_with_callback("error", on_error.unchecked_ref())
        .map_err(|e| WidgetLoadError::Inject(format!("{:?}", e)))?;

    if fresh {
        let body = document
            .body()
            .ok_or_else(|| WidgetLoadError::Inject("document has no body".to_string()))?;
        body.append_child(&script)
            .map_err(|e| WidgetLoadError::Inject(format!("{:?}", e)))?;
    } else if runtime_present() {
        // The other loader finished between our first check and now.
        return Ok(Rc::new(CalendlyRuntime::new()));
    }

    match rx.await {
        Ok(true) if runtime_present() => Ok(Rc::new(CalendlyRuntime::new())),
        Ok(true) => Err(WidgetLoadError::RuntimeMissing),
        _ => Err(WidgetLoadError::ScriptFailed),
    }
}

impl WidgetRuntimeProvider for CalendlyProvider {
    fn ensure_loaded(&self) -> LocalBoxFuture<'static, Result<Rc<dyn WidgetRuntime>, WidgetLoadError>> {
        load_runtime().boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::widget::{AppointmentDetails, DEFAULT_EVENT_NAME};
    use serde_json::json;

    fn message(value: serde_json::Value) -> CalendlyMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn calendly_messages_map_to_widget_events() {
        assert_eq!(
            to_widget_event(message(json!({"event": "calendly.event_type_viewed"}))),
            Some(WidgetEvent::EventTypeViewed)
        );
        assert_eq!(
            to_widget_event(message(json!({"event": "calendly.date_and_time_selected"}))),
            Some(WidgetEvent::DateAndTimeSelected)
        );
        assert_eq!(
            to_widget_event(message(json!({"event": "calendly.profile_page_viewed"}))),
            None
        );
    }

    #[test]
    fn scheduled_message_carries_payload() {
        let event = to_widget_event(message(json!({
            "event": "calendly.event_scheduled",
            "payload": {"data": {"event": {"name": "Strategy Call"}}}
        })));
        match event {
            Some(WidgetEvent::EventScheduled(payload)) => {
                let name = payload.data.and_then(|d| d.event).and_then(|e| e.name);
                assert_eq!(name.as_deref(), Some("Strategy Call"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn only_calendly_origins_are_trusted() {
        assert!(is_calendly_origin("https://calendly.com"));
        assert!(is_calendly_origin("https://assets.calendly.com"));

        for origin in [
            "",
            "null",
            "http://calendly.com",
            "https://calendly.com.evil.example",
            "https://evilcalendly.com",
            "https://a.b.calendly.com",
            "https://calendly.com:8443",
            "https://autoflow.studio",
        ] {
            assert!(!is_calendly_origin(origin), "{} should be rejected", origin);
        }
    }

    #[test]
    fn real_calendly_payload_books_with_defaults() {
        let event = to_widget_event(message(json!({
            "event": "calendly.event_scheduled",
            "payload": {
                "event": {"uri": "https://api.calendly.com/scheduled_events/ABC"},
                "invitee": {"uri": "https://api.calendly.com/scheduled_events/ABC/invitees/DEF"}
            }
        })));
        match event {
            Some(WidgetEvent::EventScheduled(payload)) => {
                let details = AppointmentDetails::from_payload(&payload);
                assert_eq!(details.event_name, DEFAULT_EVENT_NAME);
                assert_eq!(details.start_time, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
