//! Events delivered from the backend worker to the UI loop.

use client_core::Ticket;
use shared::{error::RequestError, protocol::Recommendation};

#[derive(Debug)]
pub enum UiEvent {
    BackendReady,
    BackendFailed(String),
    RecommendationFinished {
        ticket: Ticket,
        outcome: Result<Recommendation, RequestError>,
    },
}
