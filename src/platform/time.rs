//! Frame timing

use crate::consts::MAX_FRAME_DT_MS;

/// Turns monotonically increasing refresh timestamps into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Milliseconds since the previous call, clamped to `[0, MAX_FRAME_DT_MS]`.
    ///
    /// The first call has nothing to measure against and yields 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (timestamp_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt.clamp(0.0, MAX_FRAME_DT_MS)
    }

    /// Forget the previous timestamp (e.g. after the loop was suspended)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
