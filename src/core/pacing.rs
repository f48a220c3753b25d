/// Throttles a display-refresh callback down to a target frame interval.
///
/// Timestamps are the host's high-resolution frame times in milliseconds.
/// Leftover time past a whole interval is carried so the cadence doesn't
/// drift when refresh and target rates differ.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePacer {
    interval_ms: f64,
    last_ms: f64,
}

impl FramePacer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_ms: 0.0,
        }
    }

    pub fn ready(&mut self, timestamp_ms: f64) -> bool {
        let elapsed = timestamp_ms - self.last_ms;
        if elapsed < self.interval_ms {
            return false;
        }
        self.last_ms = if self.interval_ms > 0.0 {
            timestamp_ms - elapsed % self.interval_ms
        } else {
            timestamp_ms
        };
        true
    }
}
