//! Transient user notices (the error toast)
//!
//! A notice is visible for a fixed time after it is raised. Nothing ever
//! cancels it: overlapping notices simply expire on their own.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default display time of a notice
pub const DEFAULT_NOTICE_DURATION_MS: u32 = 4000;

/// What a notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// An import file was rejected by the validator
    InvalidImportFile,
}

/// A transient message shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub duration_ms: u32,
}

impl Notice {
    /// When this notice stops being shown
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.raised_at
            .checked_add_signed(Duration::milliseconds(i64::from(self.duration_ms)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }
}

/// The set of notices raised during a session
#[derive(Debug)]
pub struct NoticeBoard {
    duration_ms: u32,
    notices: Vec<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION_MS)
    }
}

impl NoticeBoard {
    /// Create a board whose notices last `duration_ms` milliseconds
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            notices: Vec::new(),
        }
    }

    /// Raise a notice now
    pub fn raise(&mut self, kind: NoticeKind, message: impl Into<String>) -> &Notice {
        self.raise_at(kind, message, Utc::now())
    }

    /// Raise a notice at a given time
    pub fn raise_at(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Notice {
        self.prune(now);
        self.notices.push(Notice {
            kind,
            message: message.into(),
            raised_at: now,
            duration_ms: self.duration_ms,
        });
        &self.notices[self.notices.len() - 1]
    }

    /// Notices still visible at `now`
    pub fn visible(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.is_visible(now))
    }

    /// Whether the toast is showing at `now`
    pub fn is_showing(&self, now: DateTime<Utc>) -> bool {
        self.visible(now).next().is_some()
    }

    /// Drop notices that have expired by `now`
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|n| n.is_visible(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_duration() {
        let mut board = NoticeBoard::new(4000);
        let t0 = Utc::now();
        board.raise_at(NoticeKind::InvalidImportFile, "bad file", t0);

        assert!(board.is_showing(t0));
        assert!(board.is_showing(t0 + Duration::milliseconds(3999)));
        assert!(!board.is_showing(t0 + Duration::milliseconds(4000)));
    }

    #[test]
    fn test_overlapping_notices_expire_independently() {
        let mut board = NoticeBoard::new(4000);
        let t0 = Utc::now();
        board.raise_at(NoticeKind::InvalidImportFile, "first", t0);
        board.raise_at(
            NoticeKind::InvalidImportFile,
            "second",
            t0 + Duration::milliseconds(3000),
        );

        let at_5s = t0 + Duration::milliseconds(5000);
        let visible: Vec<&str> = board.visible(at_5s).map(|n| n.message.as_str()).collect();
        assert_eq!(visible, vec!["second"]);
        assert!(!board.is_showing(t0 + Duration::milliseconds(7000)));
    }

    #[test]
    fn test_prune_drops_expired() {
        let mut board = NoticeBoard::new(10);
        let t0 = Utc::now();
        board.raise_at(NoticeKind::InvalidImportFile, "old", t0);
        board.prune(t0 + Duration::milliseconds(20));
        assert_eq!(board.visible(t0).count(), 0);
    }
}
