use std::time::Duration;

use rand::Rng;

/// How long the widget shows the typing indicator before each bot message.
#[derive(Debug, Clone, Copy)]
pub struct TypingDelay {
    min_ms: u64,
    max_ms: u64,
}

impl TypingDelay {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms,
            max_ms: max_ms.max(min_ms),
        }
    }

    pub fn none() -> Self {
        Self::new(0, 0)
    }

    pub fn next_delay(&self) -> Duration {
        let ms = if self.min_ms == self.max_ms {
            self.min_ms
        } else {
            rand::thread_rng().gen_range(self.min_ms..=self.max_ms)
        };
        Duration::from_millis(ms)
    }
}
