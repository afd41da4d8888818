use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use crate::config::LatencyConfig;
use crate::error::{Result, RobolabError};
use crate::model::{Identity, RosterEntry, Student};
use crate::router::Session;
use crate::seed;

/// Holds the fixed roster and the single current identity.
#[derive(Debug)]
pub struct SessionStore {
    roster: Vec<RosterEntry>,
    current: RwLock<Option<Identity>>,
    auth_delay: Duration,
    restore_delay: Duration,
}

impl SessionStore {
    pub fn new(roster: Vec<RosterEntry>, latency: &LatencyConfig) -> Self {
        Self {
            roster,
            current: RwLock::new(None),
            auth_delay: latency.auth(),
            restore_delay: latency.restore(),
        }
    }

    /// Store over the demo roster.
    pub fn seeded(latency: &LatencyConfig) -> Self {
        Self::new(seed::roster(), latency)
    }

    /// Check `username`/`password` against the roster. On success the
    /// matching identity becomes current. On failure the current identity
    /// is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity> {
        if !self.auth_delay.is_zero() {
            tokio::time::sleep(self.auth_delay).await;
        }

        let Some(entry) = self.roster.iter().find(|e| e.matches(username, password)) else {
            tracing::warn!(username, "login rejected");
            return Err(RobolabError::InvalidCredentials);
        };

        let identity = entry.identity();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
        tracing::info!(username, role = %identity.role(), "login");
        Ok(identity)
    }

    pub fn logout(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(identity) = previous {
            tracing::info!(username = identity.username(), "logout");
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn session(&self) -> Session {
        Session::from(self.current())
    }

    /// Startup check for a saved session. Nothing is persisted, so this
    /// resolves to whatever is current (nothing, on a fresh process).
    pub async fn restore(&self) -> Option<Identity> {
        if !self.restore_delay.is_zero() {
            tokio::time::sleep(self.restore_delay).await;
        }
        let restored = self.current();
        tracing::debug!(restored = restored.is_some(), "session restore");
        restored
    }

    /// Rostered students with their profiles, in roster order.
    pub fn roster_students(&self) -> Vec<Student> {
        self.roster.iter().filter_map(RosterEntry::as_student).collect()
    }
}
