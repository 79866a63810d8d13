//! Backend worker: runs gateway calls on a tokio runtime off the UI thread.

pub mod commands;
pub mod runtime;
