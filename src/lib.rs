//! Patron Tally - roster and alcohol saturation tracker for a remote tally service
//!
//! This library exports the core modules for testing and potential reuse.

pub mod api;
pub mod app;
pub mod dispatch;
pub mod logging;
pub mod models;
pub mod storage;
pub mod tally;
pub mod ui;
