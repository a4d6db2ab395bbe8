//! Per-session state.
//!
//! Each user session owns a [`SessionContext`]: its credential, temperature,
//! history, and the state of the last feature invocation. Sessions never share
//! mutable state; the [`SessionStore`] only maps ids to contexts.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use coachbot_types::error::CoachError;
use coachbot_types::history::CompletionResult;

use crate::history::SessionHistory;

/// Lifecycle of a single feature invocation.
///
/// `Idle -> Validating -> Requesting -> {Succeeded, Failed}`; validation
/// failures jump straight from `Validating` to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationState {
    #[default]
    Idle,
    Validating,
    Requesting,
    Succeeded,
    Failed,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationState::Idle => write!(f, "idle"),
            InvocationState::Validating => write!(f, "validating"),
            InvocationState::Requesting => write!(f, "requesting"),
            InvocationState::Succeeded => write!(f, "succeeded"),
            InvocationState::Failed => write!(f, "failed"),
        }
    }
}

/// Settings panel values for one session.
pub struct SessionSettings {
    credential: Option<SecretString>,
    temperature: f32,
}

impl SessionSettings {
    pub fn new(temperature: f32) -> Self {
        Self {
            credential: None,
            temperature: temperature.clamp(0.0, 1.0),
        }
    }

    /// Replace the credential. Blank input clears it.
    pub fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .map(SecretString::from);
    }

    pub fn credential(&self) -> Option<&SecretString> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Credential reduced to its last four characters, for display.
    pub fn masked_credential(&self) -> Option<String> {
        self.credential
            .as_ref()
            .map(|c| mask_secret(c.expose_secret()))
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Set the creativity slider; must be a finite value in `[0.0, 1.0]`.
    pub fn set_temperature(&mut self, temperature: f32) -> Result<(), CoachError> {
        if !temperature.is_finite() || !(0.0..=1.0).contains(&temperature) {
            return Err(CoachError::InvalidSetting(format!(
                "temperature must be between 0.0 and 1.0, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(())
    }
}

// Hand-written so the credential can never reach a log line.
impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("credential", &self.masked_credential())
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Mask a secret for display, keeping only the last four characters.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

/// All state belonging to one interactive session.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    created_at: DateTime<Utc>,
    pub settings: SessionSettings,
    pub history: SessionHistory,
    state: InvocationState,
    last_result: Option<CompletionResult>,
}

impl SessionContext {
    pub fn new(temperature: f32, history_capacity: usize) -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            settings: SessionSettings::new(temperature),
            history: SessionHistory::with_capacity(history_capacity),
            state: InvocationState::Idle,
            last_result: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// State reached by the most recent invocation.
    pub fn state(&self) -> InvocationState {
        self.state
    }

    pub(crate) fn transition(&mut self, next: InvocationState) {
        tracing::debug!(session_id = %self.id, from = %self.state, to = %next, "invocation state");
        self.state = next;
    }

    /// The most recent successful result, kept for display and download.
    pub fn last_result(&self) -> Option<&CompletionResult> {
        self.last_result.as_ref()
    }

    pub(crate) fn set_last_result(&mut self, result: CompletionResult) {
        self.last_result = Some(result);
    }
}

/// Shared handle to one session. The mutex is held for a whole invocation so
/// a session processes one feature at a time.
pub type SharedSession = Arc<Mutex<SessionContext>>;

struct StoredSession {
    session: SharedSession,
    last_used: Instant,
}

/// Process-wide map of isolated sessions.
///
/// Bounded two ways: sessions idle past `idle_timeout` are dropped, and once
/// `max_sessions` are live, creating another drops the least recently used.
pub struct SessionStore {
    sessions: DashMap<Uuid, StoredSession>,
    default_temperature: f32,
    history_capacity: usize,
    max_sessions: usize,
    idle_timeout: Option<Duration>,
}

impl SessionStore {
    /// An unbounded store. See [`SessionStore::with_limits`].
    pub fn new(default_temperature: f32, history_capacity: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            default_temperature,
            history_capacity,
            max_sessions: 0,
            idle_timeout: None,
        }
    }

    /// Cap the number of live sessions (0 = no cap) and expire idle ones.
    pub fn with_limits(mut self, max_sessions: usize, idle_timeout: Option<Duration>) -> Self {
        self.max_sessions = max_sessions;
        self.idle_timeout = idle_timeout.filter(|t| !t.is_zero());
        self
    }

    /// Start a new session with default settings and an empty history.
    pub fn create(&self) -> (Uuid, SharedSession) {
        self.evict_idle();
        if self.max_sessions > 0 {
            while self.sessions.len() >= self.max_sessions {
                if !self.evict_least_recent() {
                    break;
                }
            }
        }

        let context = SessionContext::new(self.default_temperature, self.history_capacity);
        let id = context.id();
        let shared = Arc::new(Mutex::new(context));
        self.sessions.insert(
            id,
            StoredSession {
                session: Arc::clone(&shared),
                last_used: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, live = self.sessions.len(), "session created");
        (id, shared)
    }

    /// Look up a live session and mark it as used. An idle-expired session
    /// is dropped and reported as missing.
    pub fn get(&self, id: &Uuid) -> Option<SharedSession> {
        let mut stored = self.sessions.get_mut(id)?;
        if self.is_idle(&stored) {
            drop(stored);
            self.sessions.remove(id);
            tracing::info!(session_id = %id, "session expired");
            return None;
        }
        stored.last_used = Instant::now();
        Some(Arc::clone(&stored.session))
    }

    /// Drop a session and everything it holds. Returns false if it did not exist.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "session removed");
        }
        removed
    }

    /// Drop every session idle past the timeout. Returns how many went.
    pub fn evict_idle(&self) -> usize {
        if self.idle_timeout.is_none() {
            return 0;
        }
        let before = self.sessions.len();
        self.sessions.retain(|id, stored| {
            let keep = !self.is_idle(stored);
            if !keep {
                tracing::info!(session_id = %id, "session expired");
            }
            keep
        });
        before.saturating_sub(self.sessions.len())
    }

    fn evict_least_recent(&self) -> bool {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.value().last_used)
            .map(|entry| *entry.key());
        match oldest {
            Some(id) => {
                self.sessions.remove(&id);
                tracing::info!(session_id = %id, max_sessions = self.max_sessions, "session limit reached, dropped least recently used");
                true
            }
            None => false,
        }
    }

    fn is_idle(&self, stored: &StoredSession) -> bool {
        self.idle_timeout
            .is_some_and(|timeout| stored.last_used.elapsed() >= timeout)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_clears() {
        let mut settings = SessionSettings::new(0.7);
        settings.set_credential(Some("AIzaSyExampleKey1234".to_string()));
        assert!(settings.has_credential());

        settings.set_credential(Some("   ".to_string()));
        assert!(!settings.has_credential());

        settings.set_credential(Some("key".to_string()));
        settings.set_credential(None);
        assert!(settings.credential().is_none());
    }

    #[test]
    fn test_masked_credential() {
        let mut settings = SessionSettings::new(0.7);
        assert!(settings.masked_credential().is_none());

        settings.set_credential(Some("AIzaSyExampleKey1234".to_string()));
        assert_eq!(settings.masked_credential().as_deref(), Some("****1234"));

        assert_eq!(mask_secret("abc"), "****");
    }

    #[test]
    fn test_debug_never_prints_credential() {
        let mut settings = SessionSettings::new(0.7);
        settings.set_credential(Some("AIzaSyVerySecretValue".to_string()));
        let debug = format!("{settings:?}");
        assert!(!debug.contains("AIzaSyVerySecret"));
        assert!(debug.contains("****alue"));
    }

    #[test]
    fn test_temperature_bounds() {
        let mut settings = SessionSettings::new(0.7);
        assert!(settings.set_temperature(0.0).is_ok());
        assert!(settings.set_temperature(1.0).is_ok());
        assert!(matches!(
            settings.set_temperature(1.5),
            Err(CoachError::InvalidSetting(_))
        ));
        assert!(settings.set_temperature(f32::NAN).is_err());
        assert!((settings.temperature() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_new_settings_clamp_default_temperature() {
        assert!((SessionSettings::new(3.0).temperature() - 1.0).abs() < f32::EPSILON);
        assert!(SessionSettings::new(-1.0).temperature().abs() < f32::EPSILON);
    }

    #[test]
    fn test_new_context_is_idle() {
        let ctx = SessionContext::new(0.7, 10);
        assert_eq!(ctx.state(), InvocationState::Idle);
        assert!(ctx.history.is_empty());
        assert_eq!(ctx.history.capacity(), 10);
        assert!(ctx.last_result().is_none());
    }

    #[tokio::test]
    async fn test_store_sessions_are_isolated() {
        let store = SessionStore::new(0.7, 0);
        let (a_id, a) = store.create();
        let (b_id, b) = store.create();
        assert_ne!(a_id, b_id);
        assert_eq!(store.len(), 2);

        a.lock()
            .await
            .settings
            .set_credential(Some("key-for-a".to_string()));
        assert!(!b.lock().await.settings.has_credential());

        let fetched = store.get(&a_id).unwrap();
        assert!(fetched.lock().await.settings.has_credential());
    }

    #[test]
    fn test_store_drops_least_recently_used_at_capacity() {
        let pause = || std::thread::sleep(Duration::from_millis(2));
        let store = SessionStore::new(0.7, 0).with_limits(2, None);
        let (a, _) = store.create();
        pause();
        let (b, _) = store.create();
        pause();
        assert!(store.get(&a).is_some());
        pause();

        let (c, _) = store.create();
        assert_eq!(store.len(), 2);
        assert!(store.get(&b).is_none());
        assert!(store.get(&a).is_some());
        assert!(store.get(&c).is_some());
    }

    #[test]
    fn test_store_expires_idle_sessions() {
        let store = SessionStore::new(0.7, 0).with_limits(0, Some(Duration::from_millis(20)));
        let (idle, _) = store.create();
        let (other, _) = store.create();
        std::thread::sleep(Duration::from_millis(40));

        // Expired on lookup even before any sweep.
        assert!(store.get(&idle).is_none());
        assert_eq!(store.len(), 1);

        let (fresh, _) = store.create();
        assert!(store.get(&other).is_none());
        assert!(store.get(&fresh).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_zero_limits_are_unbounded() {
        let store = SessionStore::new(0.7, 0).with_limits(0, Some(Duration::ZERO));
        for _ in 0..5 {
            store.create();
        }
        assert_eq!(store.len(), 5);
        assert_eq!(store.evict_idle(), 0);
    }

    #[test]
    fn test_store_remove() {
        let store = SessionStore::new(0.7, 0);
        let (id, _) = store.create();
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }
}
