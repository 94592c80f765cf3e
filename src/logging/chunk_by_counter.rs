use super::chunk::{ChunkSummary, Chunker};
use super::{Id, Loggable};

/// Chunk summaries at fixed multiples of a counter (for [`ChunkLogger`][super::ChunkLogger]).
///
/// Flushes the summary after the counter update has been included in the summary.
/// As such, users should log counter increments last, after other logs associated with that
/// counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByCounter {
    /// ID of the counter to use
    pub counter: Id,
    /// Chunk length in terms of the counter.
    pub interval: u64,
    state: State,
}

impl ByCounter {
    pub const fn new(counter: Id, interval: u64) -> Self {
        Self {
            counter,
            interval,
            state: State::NoFlush,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum State {
    NoFlush,
    IdMatch,
    Flush,
}

impl Chunker for ByCounter {
    #[inline]
    fn note_log(&mut self, id: &Id, _: &Loggable) {
        if matches!(self.state, State::NoFlush) && &self.counter == id {
            self.state = State::IdMatch;
        }
    }

    #[inline]
    fn note_log_summary(&mut self, summary: &ChunkSummary) {
        if matches!(self.state, State::IdMatch) {
            self.state = match summary {
                ChunkSummary::Counter {
                    increment,
                    initial_value,
                } if self.interval > 0 && (increment + initial_value) % self.interval == 0 => {
                    State::Flush
                }
                // Not a counter or not at a multiple of the interval
                _ => State::NoFlush,
            };
        }
    }

    #[inline]
    fn flush_group_end(&mut self) -> bool {
        matches!(self.state, State::Flush)
    }

    #[inline]
    fn note_flush(&mut self) {
        self.state = State::NoFlush;
    }
}

#[cfg(test)]
mod tests {
    use super::super::chunk::tests::RecordingWriter;
    use super::super::{ChunkLogger, StatsLogger};
    use super::*;

    #[test]
    fn flushes_every_interval() {
        let mut logger = ChunkLogger::new(
            ByCounter::new("episode/count".into(), 2),
            RecordingWriter::default(),
        );
        for i in 0..5 {
            logger.group_start();
            logger
                .group_log("episode/length".into(), Loggable::Scalar(f64::from(i)))
                .unwrap();
            logger
                .group_log("episode/count".into(), Loggable::CounterIncrement(1))
                .unwrap();
            logger.group_end();
        }
        // Episodes 2 and 4 trigger a flush; episode 5 is still pending
        assert_eq!(logger.writer().chunks.len(), 2);
        match &logger.writer().chunks[1][1].1 {
            ChunkSummary::Scalar { stats } => assert_eq!(stats.mean(), Some(2.5)),
            other => panic!("unexpected summary {:?}", other),
        }
    }

    #[test]
    fn other_ids_do_not_flush() {
        let mut logger = ChunkLogger::new(
            ByCounter::new("episode/count".into(), 1),
            RecordingWriter::default(),
        );
        logger.log_counter_increment("step/count", 1);
        logger.log_scalar("step/reward", 1.0);
        assert!(logger.writer().chunks.is_empty());
    }
}
