use std::sync::Arc;

use shared::error::ErrorCode;
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};
use url::Url;

use crate::{
    auth::Credentials,
    config::ClientSettings,
    error::{ConfigError, LoginRejected},
    fetcher::{HttpRecordFetcher, RecordFetcher},
    session::{reduce, AttemptId, SessionInput, SessionSnapshot, SessionState},
};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Changed(SessionSnapshot),
}

struct ControllerState {
    session: SessionState,
    next_attempt: u64,
}

/// Session state plus its change feed, shared with in-flight fetch tasks.
struct SessionCell {
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionCell {
    async fn apply(&self, input: SessionInput) -> SessionSnapshot {
        let mut guard = self.inner.lock().await;
        self.apply_locked(&mut guard, input);
        guard.session.snapshot()
    }

    fn apply_locked(&self, guard: &mut ControllerState, input: SessionInput) {
        let before = guard.session.snapshot();
        let current = std::mem::take(&mut guard.session);
        guard.session = reduce(current, input);
        let after = guard.session.snapshot();
        if after != before {
            let _ = self.events.send(SessionEvent::Changed(after));
        }
    }
}

/// Owns the session and performs the one network call a login needs.
///
/// The fetch runs in a task spawned by the controller and applies its own
/// result, so dropping a `login` future never leaves the session pending.
/// The lock is never held across the fetch, so `logout` and `snapshot`
/// stay available while a login is in flight.
pub struct SessionController {
    fetcher: Arc<dyn RecordFetcher>,
    endpoint: Url,
    cell: Arc<SessionCell>,
}

impl SessionController {
    pub fn new(endpoint: Url) -> Arc<Self> {
        Self::new_with_fetcher(endpoint, Arc::new(HttpRecordFetcher::new()))
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Arc<Self>, ConfigError> {
        let endpoint = settings.endpoint()?;
        let fetcher = HttpRecordFetcher::from_settings(settings)?;
        Ok(Self::new_with_fetcher(endpoint, Arc::new(fetcher)))
    }

    pub fn new_with_fetcher(endpoint: Url, fetcher: Arc<dyn RecordFetcher>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            fetcher,
            endpoint,
            cell: Arc::new(SessionCell {
                inner: Mutex::new(ControllerState {
                    session: SessionState::default(),
                    next_attempt: 0,
                }),
                events,
            }),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.cell.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.cell.inner.lock().await.session.snapshot()
    }

    /// Must be called from within a tokio runtime.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionSnapshot, LoginRejected> {
        let credentials = Credentials::new(username, password);

        let attempt = {
            let mut guard = self.cell.inner.lock().await;
            match &guard.session {
                SessionState::Pending { attempt } => {
                    warn!(attempt = attempt.0, "login ignored: attempt already in flight");
                    return Err(LoginRejected::AlreadyInFlight);
                }
                SessionState::Authenticated { .. } => {
                    warn!("login ignored: session already authenticated");
                    return Err(LoginRejected::AlreadyAuthenticated);
                }
                SessionState::Unauthenticated { .. } => {}
            }
            guard.next_attempt += 1;
            let attempt = AttemptId(guard.next_attempt);
            self.cell
                .apply_locked(&mut guard, SessionInput::LoginStarted(attempt));
            attempt
        };

        let proof = credentials.to_proof();
        drop(credentials);
        info!(attempt = attempt.0, endpoint = %self.endpoint, "login: fetching employees");

        let fetcher = self.fetcher.clone();
        let endpoint = self.endpoint.clone();
        let cell = self.cell.clone();
        let task = tokio::spawn(async move {
            let input = match fetcher.fetch(&proof, &endpoint).await {
                Ok(records) => {
                    info!(attempt = attempt.0, records = records.len(), "login succeeded");
                    SessionInput::FetchSucceeded {
                        attempt,
                        proof,
                        records,
                    }
                }
                Err(err) => {
                    warn!(attempt = attempt.0, "login failed: {err}");
                    SessionInput::FetchFailed {
                        attempt,
                        code: err.code(),
                    }
                }
            };
            cell.apply(input).await
        });

        match task.await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                error!(attempt = attempt.0, "login fetch task failed: {err}");
                Ok(self
                    .cell
                    .apply(SessionInput::FetchFailed {
                        attempt,
                        code: ErrorCode::NetworkFault,
                    })
                    .await)
            }
        }
    }

    pub async fn logout(&self) -> SessionSnapshot {
        let mut guard = self.cell.inner.lock().await;
        if guard.session.is_pending() {
            info!("logout while login in flight; its result will be discarded");
        }
        self.cell
            .apply_locked(&mut guard, SessionInput::LogoutRequested);
        info!("logged out");
        guard.session.snapshot()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
