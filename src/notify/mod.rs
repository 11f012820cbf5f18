use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Most entries kept at once; adding past it drops the oldest.
pub const MAX_NOTIFICATIONS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
    Status,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: DateTime<Utc>,
}

/// Bounded set of transient notifications with timed expiry.
///
/// State only changes through [`add`](Self::add), [`expire`](Self::expire)
/// and [`dismiss`](Self::dismiss).
#[derive(Debug)]
pub struct NotificationCenter {
    entries: Vec<Notification>,
    ttl: TimeDelta,
}

impl NotificationCenter {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            entries: Vec::new(),
            ttl,
        }
    }

    pub fn add(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> Uuid {
        if self.entries.len() >= MAX_NOTIFICATIONS {
            self.entries.remove(0);
        }
        let id = Uuid::new_v4();
        self.entries.push(Notification {
            id,
            message: message.into(),
            kind,
            expires_at: now + self.ttl,
        });
        id
    }

    /// Drop every entry whose expiry is at or before `now`. Returns how many went.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|n| n.expires_at > now);
        before - self.entries.len()
    }

    /// Remove one entry; `false` if it was not (or no longer) present.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        before != self.entries.len()
    }

    /// Entries in insertion order.
    pub fn active(&self) -> &[Notification] {
        &self.entries
    }
}
