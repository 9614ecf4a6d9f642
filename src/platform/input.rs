//! Input normalization
//!
//! Pointer-down, touch-start and the jump keys all mean the same thing: activate.
//! Events can arrive at any time between frames; they are latched here and
//! consumed once at the next tick boundary.

/// Where an activation came from. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    Pointer,
    Touch,
    Key,
    Autopilot,
}

/// Keyboard codes (`KeyboardEvent.code`) that count as a jump
pub const JUMP_KEYS: [&str; 2] = ["Space", "ArrowUp"];

pub fn is_jump_key(code: &str) -> bool {
    JUMP_KEYS.contains(&code)
}

/// Pending-activation flag. Any number of activations between two ticks
/// collapse into one.
#[derive(Debug, Clone, Default)]
pub struct ActivationLatch {
    pending: bool,
}

impl ActivationLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, source: ActivationSource) {
        if self.pending {
            log::trace!("Coalesced activation from {:?}", source);
        }
        self.pending = true;
    }

    /// Consume the pending activation, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Fires exactly once, on the first user interaction of the page.
/// Browsers only allow audio to start after one.
#[derive(Debug, Clone, Default)]
pub struct FirstInteraction {
    seen: bool,
}

impl FirstInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time it is called, false afterwards
    pub fn consume(&mut self) -> bool {
        !std::mem::replace(&mut self.seen, true)
    }
}
