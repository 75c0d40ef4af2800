//! Core module - configuration and engine state
//!
//! - [`Config`] - environment-driven configuration
//! - [`FloorState`] - configuration plus the floor manager

pub mod config;
pub mod state;

pub use config::Config;
pub use state::{FloorState, load_menu};
