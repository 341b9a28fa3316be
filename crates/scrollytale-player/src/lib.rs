//! Scrollytale player — runs a story in the terminal.
//!
//! Reads one scroll offset per input line, evaluates at most one offset per
//! frame, and prints the story text box to stdout.

pub mod app;
pub mod config;
pub mod error;
pub mod renderer;
pub mod store;
