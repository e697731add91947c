//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Login { username: String, password: String },
    Logout,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Login { .. } => "login",
            BackendCommand::Logout => "logout",
        }
    }
}
