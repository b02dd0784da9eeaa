//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClientEvent, SignupClient};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, server_url: String) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match SignupClient::connect(&server_url) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                        "backend worker startup failure: {err}"
                    )));
                    tracing::error!(%server_url, %err, "cannot create activities client");
                    return;
                }
            };

            let events = client.subscribe_events();
            let events_tx = ui_tx.clone();
            tokio::task::spawn_blocking(move || forward_client_events(events, events_tx));

            let _ = ui_tx.try_send(UiEvent::Info(format!("Using server {server_url}")));

            while let Ok(cmd) = cmd_rx.recv() {
                tokio::spawn(run_command(Arc::clone(&client), cmd));
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

/// Forwards every client event to the UI, waiting for room in the queue.
/// Returns once either side closes.
fn forward_client_events(mut events: broadcast::Receiver<ClientEvent>, ui_tx: Sender<UiEvent>) {
    loop {
        match events.blocking_recv() {
            Ok(event) => {
                if ui_tx.send(UiEvent::Client(event)).is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "ui fell behind client events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn run_command(client: Arc<SignupClient>, cmd: BackendCommand) {
    // Outcomes reach the UI as client events.
    match cmd {
        BackendCommand::LoadRoster => {
            let _ = client.load_roster().await;
        }
        BackendCommand::Enroll { activity, email } => {
            let _ = client.enroll(&activity, &email).await;
        }
        BackendCommand::Unregister { activity, email } => {
            let _ = client.unregister(&activity, &email).await;
        }
    }
}
