//! Worker thread that performs outbound calls on behalf of the UI loop.

pub mod commands;
pub mod runtime;
