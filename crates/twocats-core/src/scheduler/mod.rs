//! Cooperative scheduling for the page runtime
//!
//! Everything that the browser would run from `setTimeout`, `setInterval` or
//! `requestAnimationFrame` is queued here as plain data. The owner decides what
//! "now" is and drains whatever is due, which keeps every delayed behavior
//! deterministic under test.
//!
//! - `timer` - Deadline-ordered one-shot timers with cancellation
//! - `frame` - Requests for the next animation frame

pub mod frame;
pub mod timer;

pub use frame::FrameQueue;
pub use timer::{Due, TimerId, TimerQueue};
