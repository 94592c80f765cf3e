use super::chunk::Chunker;
use coarsetime::{Duration as CDuration, Instant as CInstant};
use std::time::Duration;

/// Chunk summaries at fixed time intervals (for [`ChunkLogger`][super::ChunkLogger]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ByTime {
    // Coarse time is used because the current time is checked on every log group,
    // which happens once per environment step.
    pub chunk_duration: CDuration,
    coarse_chunk_start: CInstant,
}

impl ByTime {
    pub fn new(chunk_duration: Duration) -> Self {
        Self {
            chunk_duration: CDuration::new(chunk_duration.as_secs(), chunk_duration.subsec_nanos()),
            coarse_chunk_start: CInstant::now(),
        }
    }
}

impl Default for ByTime {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Chunker for ByTime {
    #[inline]
    fn flush_group_start(&mut self) -> bool {
        // Checked before logging so that a burst of logs in one group stays in one chunk.
        self.coarse_chunk_start.elapsed() > self.chunk_duration
    }

    fn note_flush(&mut self) {
        self.coarse_chunk_start = CInstant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flush_before_duration() {
        let mut chunker = ByTime::new(Duration::from_secs(3600));
        assert!(!chunker.flush_group_start());
        assert!(!chunker.flush_group_end());
    }
}
