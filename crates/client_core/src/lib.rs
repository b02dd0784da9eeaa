use std::sync::Arc;

use shared::{domain::Roster, protocol::SignupResponse};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

pub mod config;
pub mod error;
pub mod notice;
pub mod page;
pub mod render;
pub mod transport;

pub use error::{ClientError, ErrorKind};
pub use notice::{MessageRegion, Notice, NoticeKind, NOTICE_TTL};
pub use page::{ActivitiesRegion, PageState, SignupForm, Submission};
pub use render::{render, ActivityCard, ActivityOption, ParticipantList, ParticipantRow, RosterView};
pub use transport::{ActivityService, HttpActivityService};

pub const SIGNUP_FAILED_MESSAGE: &str = "Failed to sign up. Please try again.";
pub const SIGNUP_FALLBACK_MESSAGE: &str = "An error occurred";
pub const UNREGISTER_FAILED_MESSAGE: &str = "Failed to unregister participant. Please try again.";
pub const UNREGISTER_FALLBACK_MESSAGE: &str = "Failed to unregister participant";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A fresh render of the whole roster; replaces cards and options.
    RosterRendered(RosterView),
    /// The roster could not be loaded; the card region shows the failure notice.
    RosterUnavailable,
    Notice(Notice),
    FormReset,
    /// Blocking message the user has to acknowledge.
    Alert(String),
}

pub struct SignupClient {
    service: Arc<dyn ActivityService>,
    events: broadcast::Sender<ClientEvent>,
}

impl SignupClient {
    pub fn new(service: Arc<dyn ActivityService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self { service, events })
    }

    pub fn connect(server_url: &str) -> Result<Arc<Self>, ClientError> {
        let service = HttpActivityService::new(server_url)?;
        Ok(Self::new(Arc::new(service)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }

    /// Fetches the whole roster and publishes a fresh render of it.
    pub async fn load_roster(&self) -> Result<Roster, ClientError> {
        match self.service.fetch_roster().await {
            Ok(roster) => {
                info!(activities = roster.len(), "roster loaded");
                self.emit(ClientEvent::RosterRendered(render(&roster)));
                Ok(roster)
            }
            Err(err) => {
                error!(%err, "failed to load roster");
                self.emit(ClientEvent::RosterUnavailable);
                Err(err)
            }
        }
    }

    pub async fn enroll(&self, activity: &str, email: &str) -> Result<SignupResponse, ClientError> {
        match self.service.signup(activity, email).await {
            Ok(response) => {
                info!(activity, email, "participant enrolled");
                self.emit(ClientEvent::Notice(Notice::success(response.message.clone())));
                self.emit(ClientEvent::FormReset);
                let _ = self.load_roster().await;
                Ok(response)
            }
            Err(err) => {
                log_mutation_failure("enroll", activity, email, &err);
                let text = err.user_message(SIGNUP_FAILED_MESSAGE, SIGNUP_FALLBACK_MESSAGE);
                self.emit(ClientEvent::Notice(Notice::error(text)));
                Err(err)
            }
        }
    }

    pub async fn unregister(&self, activity: &str, email: &str) -> Result<(), ClientError> {
        match self.service.unregister(activity, email).await {
            Ok(()) => {
                info!(activity, email, "participant unregistered");
                let _ = self.load_roster().await;
                Ok(())
            }
            Err(err) => {
                log_mutation_failure("unregister", activity, email, &err);
                let text = err.user_message(UNREGISTER_FAILED_MESSAGE, UNREGISTER_FALLBACK_MESSAGE);
                self.emit(ClientEvent::Alert(text));
                Err(err)
            }
        }
    }
}

fn log_mutation_failure(operation: &str, activity: &str, email: &str, err: &ClientError) {
    match err.kind() {
        ErrorKind::Service => warn!(operation, activity, email, %err, "service rejected request"),
        ErrorKind::Transport | ErrorKind::Decode => {
            error!(operation, activity, email, %err, "request failed")
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
