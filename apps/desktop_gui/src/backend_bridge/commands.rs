//! Backend commands queued from UI to backend worker.

use client_core::Dispatch;

#[derive(Debug)]
pub enum BackendCommand {
    Recommend(Dispatch),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Recommend(_) => "recommend",
        }
    }
}
