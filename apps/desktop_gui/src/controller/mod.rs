//! Controller layer: UI events, view selection over the request lifecycle, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod view;
