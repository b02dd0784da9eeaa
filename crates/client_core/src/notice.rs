//! Transient message region.
//!
//! Showing a notice replaces whatever is visible together with its hide
//! deadline, so an older notice can never hide a newer one.

use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct ShownNotice {
    notice: Notice,
    hide_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct MessageRegion {
    shown: Option<ShownNotice>,
}

impl MessageRegion {
    pub fn show(&mut self, notice: Notice, now: Instant) {
        self.shown = Some(ShownNotice {
            notice,
            hide_at: now + NOTICE_TTL,
        });
    }

    /// Hides the notice once its deadline has passed. Returns true if it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.shown {
            Some(shown) if now >= shown.hide_at => {
                self.shown = None;
                true
            }
            _ => false,
        }
    }

    pub fn visible(&self) -> Option<&Notice> {
        self.shown.as_ref().map(|shown| &shown.notice)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.shown.as_ref().map(|shown| shown.hide_at)
    }
}
