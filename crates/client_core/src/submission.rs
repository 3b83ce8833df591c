//! Request lifecycle for one entry form.
//!
//! `Idle → Pending → {Resolved, Rejected}`, with `reset` returning to `Idle`
//! from anywhere and `Rejected → Pending` on retry. Each dispatch carries a
//! [`Ticket`]; a completion is applied only while its ticket is the live
//! pending one, so a response that lands after a reset is dropped.

use std::{fmt, sync::Arc};

use shared::{
    error::RequestError,
    protocol::{Recommendation, RecommendationRequest},
};
use tracing::{debug, info, warn};

use crate::{
    form::{FormData, FormError, FormField, FormState},
    RecommendationService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The one outbound call a submission is allowed to make.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub request: RecommendationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    InFlight,
    ResultShown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDecision {
    Dispatched(Dispatch),
    Ignored(IgnoreReason),
    Invalid(FormError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Pending,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone)]
enum RequestState {
    Idle,
    Pending(Ticket),
    Resolved(Arc<Recommendation>),
    Rejected(RequestError),
}

/// Immutable view of the lifecycle handed to renderers.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    phase: RequestPhase,
    pending: Option<Ticket>,
    result: Option<Arc<Recommendation>>,
    error: Option<RequestError>,
}

impl RequestSnapshot {
    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == RequestPhase::Pending
    }

    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending
    }

    pub fn result(&self) -> Option<&Arc<Recommendation>> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }
}

#[derive(Debug)]
pub struct SubmissionController {
    form: FormState,
    state: RequestState,
    last_ticket: u64,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            form: FormState::new(),
            state: RequestState::Idle,
            last_ticket: 0,
        }
    }

    pub fn form(&self) -> &FormData {
        self.form.data()
    }

    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        self.form.set_field(field, value)
    }

    pub fn phase(&self) -> RequestPhase {
        match self.state {
            RequestState::Idle => RequestPhase::Idle,
            RequestState::Pending(_) => RequestPhase::Pending,
            RequestState::Resolved(_) => RequestPhase::Resolved,
            RequestState::Rejected(_) => RequestPhase::Rejected,
        }
    }

    pub fn snapshot(&self) -> RequestSnapshot {
        let (pending, result, error) = match &self.state {
            RequestState::Idle => (None, None, None),
            RequestState::Pending(ticket) => (Some(*ticket), None, None),
            RequestState::Resolved(result) => (None, Some(Arc::clone(result)), None),
            RequestState::Rejected(error) => (None, None, Some(error.clone())),
        };
        RequestSnapshot {
            phase: self.phase(),
            pending,
            result,
            error,
        }
    }

    /// Moves to `Pending` and hands back the call to make, or explains why
    /// nothing is sent. Never issues more than one call per pending period.
    pub fn begin_submit(&mut self) -> SubmitDecision {
        match self.state {
            RequestState::Pending(ticket) => {
                debug!(%ticket, "submit ignored: request already in flight");
                return SubmitDecision::Ignored(IgnoreReason::InFlight);
            }
            RequestState::Resolved(_) => {
                debug!("submit ignored: result is showing");
                return SubmitDecision::Ignored(IgnoreReason::ResultShown);
            }
            RequestState::Idle | RequestState::Rejected(_) => {}
        }

        let request = match self.form.data().to_request() {
            Ok(request) => request,
            Err(err) => return SubmitDecision::Invalid(err),
        };

        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.state = RequestState::Pending(ticket);
        info!(
            %ticket,
            district = %request.district,
            soil_type = %request.soil_type,
            "dispatching recommendation request"
        );
        SubmitDecision::Dispatched(Dispatch { ticket, request })
    }

    /// Applies the outcome of the call identified by `ticket`. Outcomes for
    /// any ticket other than the live pending one are discarded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Recommendation, RequestError>,
    ) -> Completion {
        match self.state {
            RequestState::Pending(live) if live == ticket => {}
            _ => {
                debug!(%ticket, phase = ?self.phase(), "discarding stale completion");
                return Completion::Stale;
            }
        }

        self.state = match outcome {
            Ok(result) => {
                info!(%ticket, best_crop = %result.best_crop, "recommendation resolved");
                RequestState::Resolved(Arc::new(result))
            }
            Err(err) => {
                warn!(%ticket, kind = ?err.kind(), "recommendation rejected: {err}");
                RequestState::Rejected(err)
            }
        };
        Completion::Applied
    }

    /// Back to `Idle` with default form values, from any state.
    pub fn reset(&mut self) {
        if let RequestState::Pending(ticket) = self.state {
            debug!(%ticket, "reset while pending; in-flight response will be ignored");
        }
        self.state = RequestState::Idle;
        self.form.reset();
    }

    /// Runs a whole submission against `service` and waits for it.
    pub async fn submit_with<S>(&mut self, service: &S) -> SubmitDecision
    where
        S: RecommendationService + ?Sized,
    {
        let decision = self.begin_submit();
        if let SubmitDecision::Dispatched(dispatch) = &decision {
            let outcome = service.recommend(&dispatch.request).await;
            self.complete(dispatch.ticket, outcome);
        }
        decision
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
