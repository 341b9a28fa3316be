//! Scrollytale — narrative bounded context.
//!
//! Responsible for the beat/scene story table, translating scroll progress
//! into beats, and deciding how the story text box reacts to each change.

pub mod application;
pub mod domain;
