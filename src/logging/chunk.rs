use super::{Id, LogError, Loggable, StatsLogger};
use crate::utils::stats::OnlineMeanVariance;
use std::collections::{btree_map::Entry, BTreeMap};
use std::ops::Drop;
use std::time::{Duration, Instant};

/// Control the aggregation of logs into summaries and summaries into chunks.
pub trait Chunker {
    /// Start a new log group and decide whether to flush.
    #[inline]
    fn flush_group_start(&mut self) -> bool {
        false
    }
    /// Note an entry to be logged
    #[inline]
    fn note_log(&mut self, _id: &Id, _value: &Loggable) {}
    /// Note the value of the resulting post-log summary.
    ///
    /// Must immediately follow the corresponding call to `note_log`.
    #[inline]
    fn note_log_summary(&mut self, _summary: &ChunkSummary) {}
    /// End the current group and decide whether to flush.
    #[inline]
    fn flush_group_end(&mut self) -> bool {
        false
    }
    /// Indicate that the current chunk has been flushed
    fn note_flush(&mut self);
}

/// Write out summaries to a backend.
pub trait SummaryWriter {
    fn write_summaries<'a, I>(&mut self, summaries: I, elapsed: Duration)
    where
        I: Iterator<Item = (&'a Id, &'a ChunkSummary)>;
}

/// Logs time series statistics by breaking the time series into chunks and summarizing each chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkLogger<C: Chunker, W: SummaryWriter> {
    chunker: C,
    writer: W,

    // A binary tree is used so that keys are retrieved in sorted order
    summaries: BTreeMap<Id, Node>,

    // Start time of the current chunk.
    chunk_start: Instant,
}

impl<C: Chunker, W: SummaryWriter> ChunkLogger<C, W> {
    pub fn new(chunker: C, writer: W) -> Self {
        Self {
            chunker,
            writer,
            summaries: BTreeMap::new(),
            chunk_start: Instant::now(),
        }
    }

    /// The summary writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }
}

impl<C: Chunker + Default, W: SummaryWriter + Default> Default for ChunkLogger<C, W> {
    fn default() -> Self {
        Self::new(C::default(), W::default())
    }
}

impl<C: Chunker, W: SummaryWriter> StatsLogger for ChunkLogger<C, W> {
    fn group_start(&mut self) {
        if self.chunker.flush_group_start() {
            self.flush();
        }
    }

    fn group_log(&mut self, id: Id, value: Loggable) -> Result<(), LogError> {
        self.chunker.note_log(&id, &value);

        let node = match self.summaries.entry(id) {
            Entry::Vacant(e) => e.insert(Node::new(ChunkSummary::new(value))),
            Entry::Occupied(e) => {
                let node = e.into_mut();
                node.push(value)?;
                node
            }
        };

        self.chunker.note_log_summary(&node.summary);

        Ok(())
    }

    fn group_end(&mut self) {
        if self.chunker.flush_group_end() {
            self.flush()
        }
    }

    fn flush(&mut self) {
        self.writer.write_summaries(
            self.summaries.iter().filter_map(|(id, node)| {
                if node.dirty {
                    Some((id, &node.summary))
                } else {
                    None
                }
            }),
            self.chunk_start.elapsed(),
        );

        for node in self.summaries.values_mut() {
            node.reset();
        }
        self.chunk_start = Instant::now();
        self.chunker.note_flush();
    }
}

/// Flush when dropped
impl<C: Chunker, W: SummaryWriter> Drop for ChunkLogger<C, W> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    /// Variable chunk summary
    summary: ChunkSummary,
    /// Whether the summary has been updated in this chunk
    dirty: bool,
}

impl Node {
    const fn new(summary: ChunkSummary) -> Self {
        Self {
            summary,
            dirty: true,
        }
    }

    fn push(&mut self, value: Loggable) -> Result<(), LogError> {
        self.summary.push(value)?;
        self.dirty = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.dirty = false;
        self.summary.reset()
    }
}

/// Summary of the values logged under one ID within a chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkSummary {
    Counter {
        increment: u64,
        initial_value: u64,
    },
    Scalar {
        stats: OnlineMeanVariance<f64>,
    },
}

impl ChunkSummary {
    /// Create a summary from its first value.
    fn new(value: Loggable) -> Self {
        match value {
            Loggable::CounterIncrement(i) => Self::Counter {
                increment: i,
                initial_value: 0,
            },
            Loggable::Scalar(v) => {
                let mut stats = OnlineMeanVariance::new();
                stats.push(v);
                Self::Scalar { stats }
            }
        }
    }

    /// Add a value to the summary
    ///
    /// Returns an error and does not insert the value if it is incompatible with the current
    /// summary, that is, if the summary was created from a different loggable variant.
    fn push(&mut self, value: Loggable) -> Result<(), LogError> {
        match (self, value) {
            (Self::Counter { increment, .. }, Loggable::CounterIncrement(i)) => {
                *increment += i;
            }
            (Self::Scalar { stats }, Loggable::Scalar(v)) => stats.push(v),
            (summary, value) => {
                return Err(LogError::IncompatibleValue {
                    prev: summary.loggable_variant_name(),
                    now: value.variant_name(),
                })
            }
        };
        Ok(())
    }

    /// Reset for the start of the next chunk.
    fn reset(&mut self) {
        match self {
            Self::Counter {
                increment,
                initial_value,
            } => {
                *initial_value += *increment;
                *increment = 0
            }
            Self::Scalar { stats } => *stats = OnlineMeanVariance::new(),
        }
    }

    /// The name of the associated loggable variant
    const fn loggable_variant_name(&self) -> &'static str {
        match self {
            Self::Counter { .. } => "CounterIncrement",
            Self::Scalar { .. } => "Scalar",
        }
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;

    /// Records every flushed chunk.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct RecordingWriter {
        pub chunks: Vec<Vec<(Id, ChunkSummary)>>,
    }

    impl SummaryWriter for RecordingWriter {
        fn write_summaries<'a, I>(&mut self, summaries: I, _elapsed: Duration)
        where
            I: Iterator<Item = (&'a Id, &'a ChunkSummary)>,
        {
            self.chunks
                .push(summaries.map(|(id, s)| (id.clone(), s.clone())).collect());
        }
    }

    /// Never flushes on its own.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct Manual;

    impl Chunker for Manual {
        fn note_flush(&mut self) {}
    }

    #[test]
    fn scalar_summary() {
        let mut logger = ChunkLogger::new(Manual, RecordingWriter::default());
        logger.log_scalar("reward", 1.0);
        logger.log_scalar("reward", 3.0);
        logger.flush();

        let chunk = &logger.writer().chunks[0];
        assert_eq!(chunk.len(), 1);
        match &chunk[0] {
            (id, ChunkSummary::Scalar { stats }) => {
                assert_eq!(id.as_str(), "reward");
                assert_eq!(stats.mean(), Some(2.0));
                assert_eq!(stats.count(), 2);
            }
            other => panic!("unexpected summary {:?}", other),
        }
    }

    #[test]
    fn counter_carries_across_chunks() {
        let mut logger = ChunkLogger::new(Manual, RecordingWriter::default());
        logger.log_counter_increment("count", 2);
        logger.flush();
        logger.log_counter_increment("count", 3);
        logger.flush();

        assert_eq!(
            logger.writer().chunks[1],
            vec![(
                Id::from("count"),
                ChunkSummary::Counter {
                    increment: 3,
                    initial_value: 2
                }
            )]
        );
    }

    #[test]
    fn clean_summaries_not_written() {
        let mut logger = ChunkLogger::new(Manual, RecordingWriter::default());
        logger.log_scalar("a", 1.0);
        logger.flush();
        logger.log_scalar("b", 1.0);
        logger.flush();

        let ids: Vec<_> = logger.writer().chunks[1]
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        assert_eq!(ids, vec![Id::from("b")]);
    }

    #[test]
    fn incompatible_value_rejected() {
        let mut logger = ChunkLogger::new(Manual, RecordingWriter::default());
        logger.log_scalar("x", 1.0);
        assert_eq!(
            logger.log("x".into(), Loggable::CounterIncrement(1)),
            Err(LogError::IncompatibleValue {
                prev: "Scalar",
                now: "CounterIncrement"
            })
        );
    }
}
