//! View model for the GUI and the reducer folding backend events into it.

use client_core::{SessionPhase, SessionSnapshot};
use shared::domain::Employee;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppViewState {
    Login,
    Directory,
}

#[derive(Debug)]
pub struct AppModel {
    pub view_state: AppViewState,
    pub phase: SessionPhase,
    pub username: String,
    pub password: String,
    pub records: Vec<Employee>,
    pub status: String,
    pub status_banner: Option<UiError>,
}

impl Default for AppModel {
    fn default() -> Self {
        Self {
            view_state: AppViewState::Login,
            phase: SessionPhase::SignedOut,
            username: String::new(),
            password: String::new(),
            records: Vec::new(),
            status: String::new(),
            status_banner: None,
        }
    }
}

impl AppModel {
    pub fn is_busy(&self) -> bool {
        self.phase == SessionPhase::SigningIn
    }

    pub fn can_submit(&self) -> bool {
        self.phase == SessionPhase::SignedOut
            && !self.username.trim().is_empty()
            && !self.password.is_empty()
    }

    /// Presence check only; everything else is up to the server.
    pub fn login_command(&mut self) -> Option<BackendCommand> {
        if self.phase != SessionPhase::SignedOut {
            return None;
        }
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.status = "Enter both a username and a password".to_string();
            return None;
        }
        self.status = "Signing in...".to_string();
        self.status_banner = None;
        Some(BackendCommand::Login {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Input buffers are cleared together with the session.
    pub fn logout_command(&mut self) -> BackendCommand {
        self.username.clear();
        self.password.clear();
        BackendCommand::Logout
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Session(snapshot) => self.apply_snapshot(snapshot),
            UiEvent::Info(message) => self.status = message,
            UiEvent::Error(err) => {
                self.status = err.message().to_string();
                self.status_banner = Some(err);
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: SessionSnapshot) {
        self.phase = snapshot.phase;
        self.records = snapshot.records;
        self.status_banner = snapshot.error.as_ref().map(UiError::from_api_error);
        self.view_state = match self.phase {
            SessionPhase::SignedIn => AppViewState::Directory,
            SessionPhase::SignedOut | SessionPhase::SigningIn => AppViewState::Login,
        };
        self.status = match self.phase {
            SessionPhase::SignedIn => format!("{} employees", self.records.len()),
            SessionPhase::SigningIn => "Signing in...".to_string(),
            SessionPhase::SignedOut => self
                .status_banner
                .as_ref()
                .map(|err| err.message().to_string())
                .unwrap_or_else(|| "Signed out".to_string()),
        };
    }
}
