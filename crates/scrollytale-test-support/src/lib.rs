//! Shared test fakes and utilities for the Scrollytale story engine.

mod clock;
mod renderer;
mod store;

pub use clock::{FixedClock, ManualClock, fixed_now};
pub use renderer::{FailingRenderer, RecordingRenderer, RenderCall};
pub use store::{FailingStore, MemoryStore};
