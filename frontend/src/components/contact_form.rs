use std::rc::Rc;

use chrono::Local;
use gloo_timers::callback::Timeout;
use log::info;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;
use crate::lead::booking::BookingFlowState;
use crate::lead::calendly::CalendlyProvider;
use crate::lead::fields::{FieldName, ServiceSelection};
use crate::lead::record::StoredRecord;
use crate::lead::store::{ConsultationStore, HttpConsultationStore, StoreError};
use crate::lead::submission::{LeadCapture, SubmissionState};
use crate::lead::widget::{
    AppointmentDetails, WidgetEvent, WidgetEventSink, WidgetRuntime, WidgetRuntimeProvider,
};

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    #[prop_or_default]
    pub initial_service: Option<ServiceSelection>,
}

pub enum ContactFormMsg {
    FieldChanged(FieldName, String),
    Submit,
    Stored(Result<StoredRecord, StoreError>),
    RevealBooking,
    WidgetLoaded(Rc<dyn WidgetRuntime>),
    WidgetFailed(String),
    Widget(WidgetEvent),
}

pub struct ContactForm {
    lead: LeadCapture,
    store: Rc<dyn ConsultationStore>,
    widget_provider: Rc<dyn WidgetRuntimeProvider>,
    // Held so the listener it registered lives as long as the form.
    widget_runtime: Option<Rc<dyn WidgetRuntime>>,
    // Dropping the timeout cancels it, so teardown never leaks a pending reveal.
    reveal_timer: Option<Timeout>,
    widget_mount: NodeRef,
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ContactFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            lead: LeadCapture::new(config::BOOKING_BASE_URL)
                .with_service(ctx.props().initial_service),
            store: Rc::new(HttpConsultationStore::default()),
            widget_provider: Rc::new(CalendlyProvider),
            widget_runtime: None,
            reveal_timer: None,
            widget_mount: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::FieldChanged(field, value) => self.lead.set_field(field, value),
            ContactFormMsg::Submit => {
                let Some(record) = self.lead.begin_submit() else {
                    // Either invalid (errors to show) or already in flight.
                    return true;
                };
                let write = self.store.create_consultation(record);
                ctx.link().send_future(async move { ContactFormMsg::Stored(write.await) });
                true
            }
            ContactFormMsg::Stored(result) => {
                self.lead.finish_submit(result);
                if self.lead.submission() == &SubmissionState::Submitted {
                    let link = ctx.link().clone();
                    self.reveal_timer = Some(Timeout::new(config::BOOKING_REVEAL_DELAY_MS, move || {
                        link.send_message(ContactFormMsg::RevealBooking);
                    }));
                }
                true
            }
            ContactFormMsg::RevealBooking => {
                self.reveal_timer = None;
                if !self.lead.reveal_booking() {
                    return false;
                }
                let load = self.widget_provider.ensure_loaded();
                ctx.link().send_future(async move {
                    match load.await {
                        Ok(runtime) => ContactFormMsg::WidgetLoaded(runtime),
                        Err(e) => ContactFormMsg::WidgetFailed(e.to_string()),
                    }
                });
                true
            }
            ContactFormMsg::WidgetLoaded(runtime) => {
                let link = ctx.link().clone();
                let sink: WidgetEventSink =
                    Rc::new(move |event| link.send_message(ContactFormMsg::Widget(event)));
                let changed = self
                    .lead
                    .attach_widget(runtime.as_ref(), &self.widget_mount, sink);
                if self.lead.booking().state() == &BookingFlowState::WidgetReady {
                    self.widget_runtime = Some(runtime);
                }
                changed
            }
            ContactFormMsg::WidgetFailed(reason) => {
                self.lead.widget_load_failed(reason);
                true
            }
            ContactFormMsg::Widget(event) => self.lead.handle_widget_event(event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        let disabled = !self.lead.is_editable();
        let fields = self.lead.fields();
        let selected = fields.service_selection.map(|s| s.slug()).unwrap_or_default();

        html! {
            <div class="contact-form-wrapper">
                <style>{CONTACT_FORM_CSS}</style>
                <form class="contact-form" {onsubmit} novalidate=true>
                    { self.text_input(ctx, FieldName::FullName, "text", "Jane Doe", &fields.full_name) }
                    { self.text_input(ctx, FieldName::Email, "email", "jane@company.com", &fields.email) }
                    { self.text_input(ctx, FieldName::CompanyName, "text", "Acme Inc", &fields.company_name) }

                    <div class="form-field">
                        <label for="service_selection">{"Which service are you interested in?"}</label>
                        <select
                            id="service_selection"
                            disabled={disabled}
                            onchange={ctx.link().callback(|e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                ContactFormMsg::FieldChanged(FieldName::ServiceSelection, select.value())
                            })}
                        >
                            <option value="" selected={selected.is_empty()}>{"Select a service"}</option>
                            { for ServiceSelection::ALL.iter().map(|service| html! {
                                <option value={service.slug()} selected={selected == service.slug()}>
                                    {service.label()}
                                </option>
                            }) }
                        </select>
                        { self.field_error(FieldName::ServiceSelection) }
                    </div>

                    { self.text_area(ctx, FieldName::Problems, "What is slowing your team down? What have you tried so far?", &fields.problems) }
                    { self.text_area(ctx, FieldName::AdditionalInfo, "Anything else we should know (optional)", &fields.additional_info) }

                    { self.submission_banner() }

                    if !matches!(self.lead.submission(), SubmissionState::Submitted) {
                        <button type="submit" class="submit-button" disabled={disabled}>
                            if self.lead.is_submitting() {
                                <span class="loading-spinner"></span>{" Sending..."}
                            } else {
                                {"Send & pick a time"}
                            }
                        </button>
                    }
                </form>
                { self.booking_section() }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        info!("Contact form torn down");
        self.reveal_timer = None;
    }
}

impl ContactForm {
    fn field_error(&self, field: FieldName) -> Html {
        match self.lead.errors().message(field) {
            Some(message) => html! { <p class="field-error">{message}</p> },
            None => html! {},
        }
    }

    fn field_class(&self, field: FieldName) -> Classes {
        classes!("form-field", self.lead.errors().get(field).map(|_| "has-error"))
    }

    fn text_input(
        &self,
        ctx: &Context<Self>,
        field: FieldName,
        input_type: &'static str,
        placeholder: &'static str,
        value: &str,
    ) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::FieldChanged(field, input.value())
        });
        html! {
            <div class={self.field_class(field)}>
                <label>{field.label()}</label>
                <input
                    type={input_type}
                    placeholder={placeholder}
                    value={value.to_string()}
                    disabled={!self.lead.is_editable()}
                    {oninput}
                />
                { self.field_error(field) }
            </div>
        }
    }

    fn text_area(
        &self,
        ctx: &Context<Self>,
        field: FieldName,
        placeholder: &'static str,
        value: &str,
    ) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            ContactFormMsg::FieldChanged(field, input.value())
        });
        html! {
            <div class={self.field_class(field)}>
                <label>{field.label()}</label>
                <textarea
                    rows="5"
                    placeholder={placeholder}
                    value={value.to_string()}
                    disabled={!self.lead.is_editable()}
                    {oninput}
                />
                { self.field_error(field) }
            </div>
        }
    }

    fn submission_banner(&self) -> Html {
        match self.lead.submission() {
            SubmissionState::Submitted => html! {
                <div class="success-message">
                    {"Thanks! We've got your details. Pick a time below for your strategy call."}
                </div>
            },
            SubmissionState::Failed(failure) => html! {
                <div class="error-message">{&failure.message}</div>
            },
            _ => html! {},
        }
    }

    fn booking_section(&self) -> Html {
        let booking = self.lead.booking();
        if !booking.is_visible() {
            return html! {};
        }

        if let Some(details) = booking.appointment() {
            return render_confirmation(details);
        }

        let loading = matches!(booking.state(), BookingFlowState::WidgetLoading);
        html! {
            <section class="booking-section">
                <h2>{"Book your strategy call"}</h2>
                if loading {
                    <div class="booking-loading">
                        <span class="loading-spinner"></span>
                        {" Loading the calendar..."}
                        if booking.load_error().is_some() {
                            <p class="booking-fallback">
                                {"The calendar is taking longer than usual. You can also "}
                                <a href={self.lead.launch_url()} target="_blank">{"open it in a new tab"}</a>
                                {"."}
                            </p>
                        }
                    </div>
                }
                <div class="booking-widget" ref={self.widget_mount.clone()}></div>
            </section>
        }
    }
}

fn render_confirmation(details: &AppointmentDetails) -> Html {
    let fmt = "%A, %B %-d, %Y at %-I:%M %p";
    html! {
        <section class="booking-section booked">
            <h2>{"You're booked!"}</h2>
            <p class="booked-event">{&details.event_name}</p>
            if let Some(start) = details.start_time {
                <p>{format!("Starts: {}", start.with_timezone(&Local).format(fmt))}</p>
            }
            if let Some(end) = details.end_time {
                <p>{format!("Ends: {}", end.with_timezone(&Local).format(fmt))}</p>
            }
            <p>{"A calendar invite is on its way to your inbox. Talk soon!"}</p>
        </section>
    }
}

const CONTACT_FORM_CSS: &str = r#"
.contact-form-wrapper {
    background: rgba(30, 30, 30, 0.7);
    border: 1px solid rgba(30, 144, 255, 0.1);
    border-radius: 16px;
    padding: 2.5rem;
    width: 100%;
    max-width: 640px;
    margin: 0 auto;
}
.contact-form .form-field {
    display: flex;
    flex-direction: column;
    margin-bottom: 1.25rem;
}
.contact-form label {
    color: rgba(255, 255, 255, 0.85);
    margin-bottom: 0.4rem;
    font-size: 0.95rem;
}
.contact-form input,
.contact-form select,
.contact-form textarea {
    background: rgba(0, 0, 0, 0.3);
    border: 1px solid rgba(255, 255, 255, 0.15);
    border-radius: 8px;
    color: #fff;
    padding: 0.75rem 1rem;
    font-size: 1rem;
}
.contact-form .has-error input,
.contact-form .has-error select,
.contact-form .has-error textarea {
    border-color: #ff6b6b;
}
.field-error {
    color: #ff6b6b;
    font-size: 0.85rem;
    margin: 0.35rem 0 0;
}
.submit-button {
    width: 100%;
    padding: 1rem;
    border: none;
    border-radius: 8px;
    background: linear-gradient(45deg, #1E90FF, #7EB2FF);
    color: #fff;
    font-size: 1.05rem;
    cursor: pointer;
}
.submit-button:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}
.success-message {
    color: #69db7c;
    margin-bottom: 1rem;
}
.error-message {
    color: #ff6b6b;
    margin-bottom: 1rem;
}
.booking-section {
    margin-top: 2rem;
}
.booking-widget {
    min-width: 320px;
    height: 700px;
}
.booking-loading {
    text-align: center;
    color: rgba(255, 255, 255, 0.7);
}
.loading-spinner {
    display: inline-block;
    width: 20px;
    height: 20px;
    border: 3px solid rgba(255,255,255,.3);
    border-radius: 50%;
    border-top-color: #fff;
    animation: spin 1s ease-in-out infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
"#;
