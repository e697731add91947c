//! UI layer for desktop GUI: login card and employee table.

pub mod app;

pub use app::DirectoryApp;
