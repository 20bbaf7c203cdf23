//! Frame clock: turns host timestamps into per-frame deltas.

#[derive(Clone, Debug, Default)]
pub struct Clock {
    previous: Option<u64>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta in milliseconds since the previous tick.  The first tick after
    /// construction or [`resync`](Self::resync) yields 0, and a timestamp that
    /// goes backwards is treated as no time passing.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        let dt = match self.previous {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.previous = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp so a long gap is not reported as one delta.
    pub fn resync(&mut self) {
        self.previous = None;
    }
}
