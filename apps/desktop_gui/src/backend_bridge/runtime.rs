//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{GatewaySettings, HttpPredictionGateway, PredictionGateway};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    settings: GatewaySettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    match HttpPredictionGateway::from_settings(&settings) {
        Ok(gateway) => {
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Using prediction backend {}",
                gateway.base_url()
            )));
            spawn_worker(Arc::new(gateway), cmd_rx, ui_tx)
        }
        Err(err) => {
            tracing::error!("failed to configure prediction gateway: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: {err:#}"),
            )));
            // Keep draining so queued commands fail fast instead of filling up.
            thread::spawn(move || while cmd_rx.recv().is_ok() {})
        }
    }
}

pub fn spawn_worker(
    gateway: Arc<dyn PredictionGateway>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let gateway = Arc::clone(&gateway);
                let ui_tx = ui_tx.clone();
                tracing::debug!(command = cmd.name(), "backend received command");
                match cmd {
                    BackendCommand::CheckHealth => {
                        tokio::spawn(async move {
                            let health = gateway.check_health().await;
                            emit(&ui_tx, UiEvent::HealthChecked(health));
                        });
                    }
                    BackendCommand::Predict {
                        generation,
                        request,
                    } => {
                        tokio::spawn(async move {
                            let outcome = gateway.predict(&request).await;
                            deliver(
                                ui_tx,
                                UiEvent::PredictionFinished {
                                    generation,
                                    outcome,
                                },
                            )
                            .await;
                        });
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    })
}

fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue is full; dropping event"),
        Err(TrySendError::Disconnected(_)) => tracing::debug!("ui event queue closed"),
    }
}

/// Waits for room in the UI queue. The session stays in `Loading` until its
/// outcome arrives, so this event must not be dropped.
async fn deliver(ui_tx: Sender<UiEvent>, event: UiEvent) {
    match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
        Ok(Ok(())) => {}
        Ok(Err(_)) => tracing::debug!("ui event queue closed; dropping prediction outcome"),
        Err(err) => tracing::error!("failed to deliver prediction outcome: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
