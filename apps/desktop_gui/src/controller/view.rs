//! Chooses between the entry form and the result dashboard from the current
//! request lifecycle, and turns UI actions into lifecycle transitions.

use client_core::{
    render::{self, DashboardView},
    Completion, FormData, FormError, FormField, RequestPhase, SubmissionController,
    SubmitDecision,
};
use shared::{error::RequestError, reference::CropNames};

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SetField(FormField, String),
    Submit,
    NewSearch,
}

pub struct EntryView<'a> {
    pub form: &'a FormData,
    pub busy: bool,
    pub error: Option<String>,
    pub validation: Option<&'a FormError>,
    pub backend_status: Option<&'a str>,
}

pub enum ActiveView<'a> {
    Entry(EntryView<'a>),
    Dashboard(DashboardView),
}

pub struct ViewController {
    submission: SubmissionController,
    crop_names: CropNames,
    validation: Option<FormError>,
    backend_status: Option<String>,
}

impl ViewController {
    pub fn new(crop_names: CropNames) -> Self {
        Self {
            submission: SubmissionController::new(),
            crop_names,
            validation: None,
            backend_status: None,
        }
    }

    pub fn phase(&self) -> RequestPhase {
        self.submission.phase()
    }

    /// Applies one user action. `send` queues a backend command; if it
    /// fails, the submission is rejected on the spot so the form never
    /// stays busy waiting for a call that was never made.
    pub fn apply(
        &mut self,
        action: UiAction,
        send: impl FnOnce(BackendCommand) -> Result<(), String>,
    ) {
        match action {
            UiAction::SetField(field, value) => {
                if self.submission.phase() == RequestPhase::Resolved {
                    return;
                }
                match self.submission.set_field(field, &value) {
                    Ok(()) => self.validation = None,
                    Err(err) => {
                        tracing::debug!(%field, "field update rejected: {err}");
                        self.validation = Some(err);
                    }
                }
            }
            UiAction::Submit => match self.submission.begin_submit() {
                SubmitDecision::Dispatched(dispatch) => {
                    self.validation = None;
                    let ticket = dispatch.ticket;
                    if let Err(reason) = send(BackendCommand::Recommend(dispatch)) {
                        self.submission
                            .complete(ticket, Err(RequestError::transport(reason)));
                    }
                }
                SubmitDecision::Invalid(err) => self.validation = Some(err),
                SubmitDecision::Ignored(reason) => {
                    tracing::debug!(?reason, "submit ignored");
                }
            },
            UiAction::NewSearch => {
                self.validation = None;
                self.submission.reset();
            }
        }
    }

    pub fn on_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::BackendReady => self.backend_status = None,
            UiEvent::BackendFailed(message) => self.backend_status = Some(message),
            UiEvent::RecommendationFinished { ticket, outcome } => {
                if self.submission.complete(ticket, outcome) == Completion::Stale {
                    tracing::debug!(%ticket, "ignored superseded recommendation");
                }
            }
        }
    }

    pub fn view(&self) -> ActiveView<'_> {
        let snapshot = self.submission.snapshot();
        if let Some(result) = snapshot.result() {
            return ActiveView::Dashboard(render::dashboard(result, &self.crop_names));
        }
        ActiveView::Entry(EntryView {
            form: self.submission.form(),
            busy: snapshot.is_busy(),
            error: snapshot.error().map(|err| err.message().to_string()),
            validation: self.validation.as_ref(),
            backend_status: self.backend_status.as_deref(),
        })
    }
}
