//! Platform abstraction layer
//!
//! Handles host-facing plumbing for the core:
//! - Time (monotonic clocks, injectable for tests)
//! - Input events (queued on arrival, drained once per tick)

pub mod input;
pub mod time;

pub use input::InputQueue;
pub use time::{Clock, ManualClock, SystemClock};
