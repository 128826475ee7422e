use std::time::Duration;

/// Target rate of scene frame loops.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FramePacing {
    pub frames_per_second: u32,
}

impl FramePacing {
    pub const fn new(frames_per_second: u32) -> Self {
        Self { frames_per_second }
    }

    /// Time between frames. A zero rate is treated as one frame per second.
    pub fn period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frames_per_second.max(1)))
    }
}

impl Default for FramePacing {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Scene director configuration.
#[derive(Debug, Clone, Default)]
pub struct DirectorConfig {
    /// Pacing handed to every scene the director builds.
    pub pacing: FramePacing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_follows_rate() {
        assert_eq!(FramePacing::new(10).period(), Duration::from_millis(100));
        assert_eq!(FramePacing::new(0).period(), Duration::from_secs(1));
    }
}
