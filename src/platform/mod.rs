//! Platform abstraction layer
//!
//! Handles the parts of browser/native differences the simulation cares about:
//! - Time: refresh timestamps to frame deltas
//! - Input: device events to a single coalesced activation
//!
//! Storage lives in [`crate::persistence`].

pub mod input;
pub mod time;

pub use input::{ActivationLatch, ActivationSource, FirstInteraction, is_jump_key};
pub use time::FrameClock;
