// Library target exists so integration tests can drive the queue manager
// directly via `cardr::queue::*`. The binary entry point is main.rs, which
// re-declares the same module tree; suppress dead_code for the pieces only
// the binary exercises.
#![allow(dead_code)]

// Public: used by integration tests
pub mod error;
pub mod queue;

// Private: required transitively by the app layer
mod app;
mod config;
mod ui;
