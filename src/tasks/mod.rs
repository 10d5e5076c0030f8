//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;
pub mod alerts;

// Re-export main functions
pub use countdown::countdown_task;
pub use alerts::alerts_task;
