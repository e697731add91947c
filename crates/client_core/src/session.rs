//! Session state and the pure transition function driving it.
//!
//! `reduce` never performs I/O. The controller feeds it one `SessionInput`
//! per observed event and publishes the resulting snapshot.

use serde::{Deserialize, Serialize};
use shared::{
    domain::Employee,
    error::{ApiError, ErrorCode},
};

use crate::auth::AuthProof;

/// Identifies one login attempt so late results can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated { last_error: Option<ApiError> },
    Pending { attempt: AttemptId },
    Authenticated { proof: AuthProof, records: Vec<Employee> },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Unauthenticated { last_error: None }
    }
}

#[derive(Debug)]
pub enum SessionInput {
    LoginStarted(AttemptId),
    FetchSucceeded {
        attempt: AttemptId,
        proof: AuthProof,
        records: Vec<Employee>,
    },
    FetchFailed {
        attempt: AttemptId,
        code: ErrorCode,
    },
    LogoutRequested,
}

pub fn reduce(state: SessionState, input: SessionInput) -> SessionState {
    match (state, input) {
        (_, SessionInput::LogoutRequested) => SessionState::default(),
        (
            held @ (SessionState::Pending { .. } | SessionState::Authenticated { .. }),
            SessionInput::LoginStarted(_),
        ) => held,
        (_, SessionInput::LoginStarted(attempt)) => SessionState::Pending { attempt },
        (
            SessionState::Pending { attempt: current },
            SessionInput::FetchSucceeded {
                attempt,
                proof,
                records,
            },
        ) if current == attempt => SessionState::Authenticated { proof, records },
        (SessionState::Pending { attempt: current }, SessionInput::FetchFailed { attempt, code })
            if current == attempt =>
        {
            SessionState::Unauthenticated {
                last_error: Some(ApiError::from(code)),
            }
        }
        // A result for an attempt that is no longer pending.
        (state, SessionInput::FetchSucceeded { .. } | SessionInput::FetchFailed { .. }) => state,
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Pending { .. })
    }

    pub fn proof(&self) -> Option<&AuthProof> {
        match self {
            SessionState::Authenticated { proof, .. } => Some(proof),
            _ => None,
        }
    }

    pub fn records(&self) -> &[Employee] {
        match self {
            SessionState::Authenticated { records, .. } => records,
            _ => &[],
        }
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        match self {
            SessionState::Unauthenticated { last_error } => last_error.as_ref(),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let phase = match self {
            SessionState::Unauthenticated { .. } => SessionPhase::SignedOut,
            SessionState::Pending { .. } => SessionPhase::SigningIn,
            SessionState::Authenticated { .. } => SessionPhase::SignedIn,
        };
        SessionSnapshot {
            phase,
            records: self.records().to_vec(),
            error: self.last_error().cloned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    SignedOut,
    SigningIn,
    SignedIn,
}

/// What presentation layers may see of the session. Never carries the proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub records: Vec<Employee>,
    pub error: Option<ApiError>,
}

impl SessionSnapshot {
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|err| err.message.as_str())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
