//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientSettings, SessionController, SessionEvent};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || run_worker(settings, cmd_rx, ui_tx));
}

fn run_worker(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::backend_startup(format!(
                "failed to build runtime: {err}"
            ))));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    let controller = match SessionController::from_settings(&settings) {
        Ok(controller) => controller,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::backend_startup(format!(
                "invalid configuration: {err}"
            ))));
            tracing::error!("invalid client configuration: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        forward_session_events(controller.clone(), ui_tx.clone());
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Ready - directory at {}",
            controller.endpoint()
        )));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Login { username, password } => {
                    tracing::info!("backend: login");
                    // Spawned so a logout can be handled while the fetch is in flight.
                    let controller = controller.clone();
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        if let Err(rejected) = controller.login(&username, &password).await {
                            let _ = ui_tx.try_send(UiEvent::Info(rejected.to_string()));
                        }
                    });
                }
                BackendCommand::Logout => {
                    tracing::info!("backend: logout");
                    controller.logout().await;
                }
            }
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

fn forward_session_events(controller: Arc<SessionController>, ui_tx: Sender<UiEvent>) {
    let mut events = controller.subscribe();
    tokio::spawn(async move {
        while let Some(event) = next_ui_event(&mut events, &controller).await {
            let _ = ui_tx.try_send(event);
        }
    });
}

/// A lagged receiver resyncs with the current snapshot instead of replaying.
async fn next_ui_event(
    events: &mut broadcast::Receiver<SessionEvent>,
    controller: &SessionController,
) -> Option<UiEvent> {
    match events.recv().await {
        Ok(SessionEvent::Changed(snapshot)) => Some(UiEvent::Session(snapshot)),
        Err(RecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "session events lagged; resyncing snapshot");
            Some(UiEvent::Session(controller.snapshot().await))
        }
        Err(RecvError::Closed) => None,
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
