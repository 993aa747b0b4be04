use log::{error, info, warn};
use yew::NodeRef;

use super::booking::{self, BookingFlow};
use super::fields::{FieldName, FormFields, ServiceSelection, ValidationErrors};
use super::record::{ConsultationRecord, StoredRecord};
use super::store::{FailureKind, StoreError};
use super::validation::validate;
use super::widget::{WidgetEvent, WidgetEventSink, WidgetRuntime};

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFailure {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Editing,
    Submitting,
    Submitted,
    /// Behaves like `Editing`: fields stay editable and submit is allowed.
    Failed(SubmissionFailure),
}

/// One visitor's pass through the contact form: details first, then the
/// booking widget.
#[derive(Debug)]
pub struct LeadCapture {
    fields: FormFields,
    errors: ValidationErrors,
    submission: SubmissionState,
    booking: BookingFlow,
    booking_base_url: String,
}

impl LeadCapture {
    pub fn new(booking_base_url: impl Into<String>) -> Self {
        Self {
            fields: FormFields::default(),
            errors: ValidationErrors::new(),
            submission: SubmissionState::Editing,
            booking: BookingFlow::new(),
            booking_base_url: booking_base_url.into(),
        }
    }

    pub fn with_service(mut self, service: Option<ServiceSelection>) -> Self {
        self.fields.service_selection = service;
        self
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn booking(&self) -> &BookingFlow {
        &self.booking
    }

    pub fn is_editable(&self) -> bool {
        matches!(
            self.submission,
            SubmissionState::Editing | SubmissionState::Failed(_)
        )
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    /// Stores the new value and drops that field's error straight away;
    /// the rules only run again on the next submit.
    pub fn set_field(&mut self, field: FieldName, value: String) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.fields.set(field, value);
        self.errors.clear(field);
        true
    }

    /// Validates and, if the form is clean, marks the submission in flight and
    /// returns the record to write. `None` means nothing may be sent.
    pub fn begin_submit(&mut self) -> Option<ConsultationRecord> {
        if !self.is_editable() {
            warn!("Submit ignored while form is {:?}", self.submission);
            return None;
        }

        let errors = validate(&self.fields);
        if !errors.is_empty() {
            info!("Form has {} invalid field(s)", errors.len());
            self.errors = errors;
            return None;
        }
        self.errors = ValidationErrors::new();

        let record = ConsultationRecord::from_fields(&self.fields)?;
        self.submission = SubmissionState::Submitting;
        Some(record)
    }

    /// Settles an in-flight write. Every outcome releases `Submitting`.
    pub fn finish_submit(&mut self, result: Result<StoredRecord, StoreError>) {
        if !self.is_submitting() {
            warn!("Ignoring store result with no submission in flight");
            return;
        }

        self.submission = match result {
            Ok(stored) => {
                info!("Consultation stored with id {}", stored.id);
                SubmissionState::Submitted
            }
            Err(e) => {
                let kind = FailureKind::classify(&e);
                error!("Failed to store consultation ({:?}): {}", kind, e);
                SubmissionState::Failed(SubmissionFailure {
                    kind,
                    message: kind.user_message(),
                })
            }
        };
    }

    /// Only a stored record can open the booking area.
    pub fn reveal_booking(&mut self) -> bool {
        self.submission == SubmissionState::Submitted && self.booking.reveal()
    }

    pub fn launch_url(&self) -> String {
        booking::launch_url(&self.booking_base_url, &self.fields)
    }

    pub fn attach_widget(
        &mut self,
        runtime: &dyn WidgetRuntime,
        mount: &NodeRef,
        sink: WidgetEventSink,
    ) -> bool {
        let url = self.launch_url();
        self.booking.attach(runtime, &url, mount, sink)
    }

    pub fn widget_load_failed(&mut self, reason: String) {
        self.booking.load_failed(reason);
    }

    pub fn handle_widget_event(&mut self, event: WidgetEvent) -> bool {
        self.booking.handle_event(event)
    }
}
