//! Utilities - logging setup and the event log task

pub mod event_log;
pub mod logger;
