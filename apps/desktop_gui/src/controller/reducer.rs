//! Applies backend events to the page state and the status line.

use std::time::Instant;

use client_core::{ClientEvent, PageState};

use crate::controller::events::UiEvent;

pub fn reduce(page: &mut PageState, status: &mut String, event: UiEvent, now: Instant) {
    match event {
        UiEvent::Info(message) => *status = message,
        UiEvent::BackendFailed(message) => {
            *status = message;
            page.apply(ClientEvent::RosterUnavailable, now);
        }
        UiEvent::Client(event) => {
            if matches!(event, ClientEvent::RosterRendered(_)) {
                status.clear();
            }
            page.apply(event, now);
        }
    }
}
