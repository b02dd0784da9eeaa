//! Interface state of the roster page: card region, selection control,
//! signup form, message region and the blocking alert.

use std::time::Instant;

use crate::{
    notice::MessageRegion,
    render::{ActivityCard, ActivityOption, RosterView, LOAD_FAILURE_NOTICE},
    ClientEvent,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitiesRegion {
    Loading,
    Cards(Vec<ActivityCard>),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub activity: String,
    pub email: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }

    /// Both fields are required; a blank field blocks submission.
    pub fn submission(&self) -> Option<Submission> {
        let email = self.email.trim();
        let activity = self.activity.trim();
        if email.is_empty() || activity.is_empty() {
            return None;
        }
        Some(Submission {
            activity: activity.to_string(),
            email: email.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PageState {
    pub activities: ActivitiesRegion,
    pub options: Vec<ActivityOption>,
    pub form: SignupForm,
    pub message: MessageRegion,
    pub alert: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            activities: ActivitiesRegion::Loading,
            options: Vec::new(),
            form: SignupForm::default(),
            message: MessageRegion::default(),
            alert: None,
        }
    }
}

impl PageState {
    pub fn apply(&mut self, event: ClientEvent, now: Instant) {
        match event {
            ClientEvent::RosterRendered(view) => self.replace_roster(view),
            ClientEvent::RosterUnavailable => {
                self.activities = ActivitiesRegion::Failed(LOAD_FAILURE_NOTICE.to_string());
            }
            ClientEvent::Notice(notice) => self.message.show(notice, now),
            ClientEvent::FormReset => self.form.reset(),
            ClientEvent::Alert(text) => self.alert = Some(text),
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.message.expire(now)
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn cards(&self) -> &[ActivityCard] {
        match &self.activities {
            ActivitiesRegion::Cards(cards) => cards,
            ActivitiesRegion::Loading | ActivitiesRegion::Failed(_) => &[],
        }
    }

    fn replace_roster(&mut self, view: RosterView) {
        let RosterView { cards, options } = view;
        if !options.iter().any(|option| option.value == self.form.activity) {
            self.form.activity.clear();
        }
        self.activities = ActivitiesRegion::Cards(cards);
        self.options = options;
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
