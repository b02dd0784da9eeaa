//! Events flowing from the backend worker to the UI thread.

use client_core::ClientEvent;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Client(ClientEvent),
    BackendFailed(String),
}
