//! Runtime bridge between UI command queue and backend event intake.
//!
//! Commands are received on a plain thread; each outbound call runs as its
//! own task on a multi-threaded tokio runtime, so a call superseded by a reset
//! never holds up the next one.

use std::{sync::Arc, thread};

use client_core::RecommendationService;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Hands a completion to the UI without parking a runtime worker: when the
/// queue is full the blocking send moves to the blocking pool.
async fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let event = match ui_tx.try_send(event) {
        Ok(()) => return,
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui closed before completion");
            return;
        }
        Err(TrySendError::Full(event)) => event,
    };

    tracing::debug!("ui event queue full; waiting on blocking pool");
    let ui_tx = ui_tx.clone();
    let sent = tokio::task::spawn_blocking(move || ui_tx.send(event).is_ok()).await;
    if !matches!(sent, Ok(true)) {
        tracing::debug!("ui closed before completion");
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn RecommendationService>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };
        let _ = ui_tx.send(UiEvent::BackendReady);
        tracing::info!("backend worker ready");

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Recommend(dispatch) => {
                    let service = Arc::clone(&service);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let outcome = service.recommend(&dispatch.request).await;
                        let event = UiEvent::RecommendationFinished {
                            ticket: dispatch.ticket,
                            outcome,
                        };
                        deliver(&ui_tx, event).await;
                    });
                }
            }
        }

        tracing::info!("backend command queue closed; shutting down worker");
        runtime.shutdown_background();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client_core::{Dispatch, FormField, SubmissionController, SubmitDecision};
    use crossbeam_channel::bounded;
    use shared::{
        error::RequestError,
        protocol::{Recommendation, RecommendationRequest},
    };
    use std::time::Duration;

    /// Answers after a delay derived from N, always with a service error
    /// naming the N it was asked about.
    struct SlowByNitrogen;

    #[async_trait]
    impl RecommendationService for SlowByNitrogen {
        async fn recommend(
            &self,
            request: &RecommendationRequest,
        ) -> Result<Recommendation, RequestError> {
            tokio::time::sleep(Duration::from_millis(request.n as u64)).await;
            Err(RequestError::service(format!("n={}", request.n)))
        }
    }

    fn dispatch_for(controller: &mut SubmissionController, n: &str) -> Dispatch {
        controller.set_field(FormField::N, n).expect("n");
        controller.set_field(FormField::P, "1").expect("p");
        controller.set_field(FormField::K, "1").expect("k");
        match controller.begin_submit() {
            SubmitDecision::Dispatched(dispatch) => dispatch,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn slow_superseded_call_does_not_delay_newer_one() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(8);
        let worker = launch(cmd_rx, ui_tx, Arc::new(SlowByNitrogen));
        assert!(matches!(
            ui_rx.recv_timeout(Duration::from_secs(5)),
            Ok(UiEvent::BackendReady)
        ));

        let mut controller = SubmissionController::new();
        let slow = dispatch_for(&mut controller, "400");
        controller.reset();
        let fast = dispatch_for(&mut controller, "10");

        cmd_tx.send(BackendCommand::Recommend(slow.clone())).expect("send slow");
        cmd_tx.send(BackendCommand::Recommend(fast.clone())).expect("send fast");

        let mut order = Vec::new();
        for _ in 0..2 {
            match ui_rx.recv_timeout(Duration::from_secs(5)) {
                Ok(UiEvent::RecommendationFinished { ticket, outcome }) => {
                    order.push(ticket);
                    controller.complete(ticket, outcome);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(order, vec![fast.ticket, slow.ticket]);
        assert_eq!(
            controller.snapshot().error().map(|err| err.message().to_string()),
            Some("n=10".to_string())
        );

        drop(cmd_tx);
        worker.join().expect("worker exits when queue closes");
    }

    #[test]
    fn completions_survive_a_full_ui_queue() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(1);
        let worker = launch(cmd_rx, ui_tx.clone(), Arc::new(SlowByNitrogen));
        assert!(matches!(
            ui_rx.recv_timeout(Duration::from_secs(5)),
            Ok(UiEvent::BackendReady)
        ));

        ui_tx.send(UiEvent::BackendReady).expect("fill ui queue");
        let mut first = SubmissionController::new();
        let mut second = SubmissionController::new();
        let a = dispatch_for(&mut first, "1");
        let b = dispatch_for(&mut second, "2");
        cmd_tx.send(BackendCommand::Recommend(a)).expect("send a");
        cmd_tx.send(BackendCommand::Recommend(b)).expect("send b");
        std::thread::sleep(Duration::from_millis(100));

        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::BackendReady)));
        let mut finished = 0;
        while finished < 2 {
            match ui_rx.recv_timeout(Duration::from_secs(5)) {
                Ok(UiEvent::RecommendationFinished { .. }) => finished += 1,
                other => panic!("unexpected event {other:?}"),
            }
        }

        drop(cmd_tx);
        drop(ui_tx);
        worker.join().expect("worker exits when queue closes");
    }
}
