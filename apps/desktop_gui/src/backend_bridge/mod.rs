//! Worker side of the GUI: a thread owning the tokio runtime and the session controller.

pub mod commands;
pub mod runtime;
