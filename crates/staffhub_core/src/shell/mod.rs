//! App shell composition.

pub mod app_shell;
