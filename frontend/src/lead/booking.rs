use log::{info, warn};
use yew::NodeRef;

use super::fields::FormFields;
use super::widget::{AppointmentDetails, WidgetEvent, WidgetEventSink, WidgetRuntime};

#[derive(Debug, Clone, PartialEq)]
pub enum BookingFlowState {
    Hidden,
    WidgetLoading,
    WidgetReady,
    Booked(AppointmentDetails),
}

/// Builds the scheduler URL with the visitor's details pre-filled. `a1` and
/// `a2` are the scheduler's first two custom questions.
pub fn launch_url(base: &str, fields: &FormFields) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    let service = fields
        .service_selection
        .map(|service| service.slug())
        .unwrap_or_default();

    format!(
        "{}{}name={}&email={}&a1={}&a2={}",
        base,
        separator,
        urlencoding::encode(fields.full_name.trim()),
        urlencoding::encode(fields.email.trim()),
        urlencoding::encode(fields.company_name.trim()),
        urlencoding::encode(service),
    )
}

#[derive(Debug)]
pub struct BookingFlow {
    state: BookingFlowState,
    // Set exactly once, when the widget goes into the mount point.
    mounted: bool,
    load_error: Option<String>,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            state: BookingFlowState::Hidden,
            mounted: false,
            load_error: None,
        }
    }

    pub fn state(&self) -> &BookingFlowState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != BookingFlowState::Hidden
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn appointment(&self) -> Option<&AppointmentDetails> {
        match &self.state {
            BookingFlowState::Booked(details) => Some(details),
            _ => None,
        }
    }

    /// Hidden -> WidgetLoading. Fires at most once.
    pub fn reveal(&mut self) -> bool {
        if self.state != BookingFlowState::Hidden {
            return false;
        }
        info!("Revealing booking widget area");
        self.state = BookingFlowState::WidgetLoading;
        true
    }

    /// Puts the widget into `mount` and wires its callbacks to `sink`. Any
    /// ready signal after the first is ignored. A mount point that is not in
    /// the document counts as a load failure. Returns true when the view changed.
    pub fn attach(
        &mut self,
        runtime: &dyn WidgetRuntime,
        url: &str,
        mount: &NodeRef,
        sink: WidgetEventSink,
    ) -> bool {
        if self.mounted || self.state != BookingFlowState::WidgetLoading {
            return false;
        }
        if let Err(e) = runtime.init_inline_widget(url, mount) {
            self.load_failed(e.to_string());
            return true;
        }
        self.mounted = true;
        self.load_error = None;

        runtime.subscribe(sink);
        info!("Booking widget initialized");
        self.state = BookingFlowState::WidgetReady;
        true
    }

    /// The runtime never arrived. The area keeps showing its loader.
    pub fn load_failed(&mut self, reason: String) {
        if self.state == BookingFlowState::WidgetLoading && !self.mounted {
            warn!("Booking widget failed to load: {}", reason);
            self.load_error = Some(reason);
        }
    }

    pub fn handle_event(&mut self, event: WidgetEvent) -> bool {
        match event {
            WidgetEvent::EventScheduled(payload) => {
                if self.state != BookingFlowState::WidgetReady {
                    return false;
                }
                let details = AppointmentDetails::from_payload(&payload);
                info!("Appointment booked: {}", details.event_name);
                self.state = BookingFlowState::Booked(details);
                true
            }
            WidgetEvent::EventTypeViewed => {
                info!("Booking widget: event type viewed");
                false
            }
            WidgetEvent::DateAndTimeSelected => {
                info!("Booking widget: date and time selected");
                false
            }
        }
    }
}
