//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SessionSnapshot;
use shared::error::{ApiError, ErrorCode};

pub enum UiEvent {
    Session(SessionSnapshot),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Startup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    /// Login failures already carry their category in the error code.
    pub fn from_api_error(err: &ApiError) -> Self {
        let category = match err.code {
            ErrorCode::InvalidCredentials => UiErrorCategory::Auth,
            ErrorCode::NetworkFault => UiErrorCategory::Transport,
            ErrorCode::MalformedResponse => UiErrorCategory::Validation,
        };
        Self {
            category,
            message: err.message.clone(),
        }
    }

    /// The backend worker could not come up; nothing can be retried from the UI.
    pub fn backend_startup(detail: impl std::fmt::Display) -> Self {
        Self {
            category: UiErrorCategory::Startup,
            message: format!("backend worker startup failure: {detail}"),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
