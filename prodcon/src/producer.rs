//! The producing side of a run.

use giztoy_slotbuf::{Item, ItemBuffer};
use tracing::debug;

use crate::config::{Pacing, Ranges};
use crate::source::ValueSource;
use crate::stop::StopSignal;

/// Builds items and feeds them into the buffer.
///
/// Each round waits a drawn production delay, then draws the item's value
/// and delay and hands the item to [`ItemBuffer::produce`]. The wait happens
/// before the buffer lock is taken, so the consumer keeps draining while the
/// producer is idle.
pub struct Producer<S> {
    buffer: ItemBuffer,
    source: S,
    ranges: Ranges,
    pacing: Pacing,
    stop: StopSignal,
    limit: Option<u64>,
}

impl<S: ValueSource> Producer<S> {
    pub fn new(buffer: ItemBuffer, source: S, ranges: Ranges, pacing: Pacing, stop: StopSignal) -> Self {
        Producer {
            buffer,
            source,
            ranges,
            pacing,
            stop,
            limit: None,
        }
    }

    /// Stops after `limit` items and closes the buffer's write side, letting
    /// the consumer drain and exit.
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Draws the next item's fields from the source.
    pub fn next_item(&mut self) -> Item {
        let value = self.source.sample(self.ranges.value);
        let delay_secs = self.source.sample(self.ranges.item_delay);
        Item::new(value, delay_secs)
    }

    /// Runs until stopped, until the buffer closes, or until the limit is
    /// reached. Returns the number of items placed in the buffer.
    pub fn run(mut self) -> u64 {
        let mut produced = 0;

        while self.limit.is_none_or(|limit| produced < limit) {
            let wait = self.source.sample(self.ranges.production_delay);
            debug!(wait, "producer sleeping before producing");
            if !self.stop.sleep(self.pacing.duration(wait)) {
                debug!("producer stopped while sleeping");
                return produced;
            }

            let item = self.next_item();
            if let Err(err) = self.buffer.produce(item) {
                debug!(%err, %item, "producer exiting, item dropped");
                return produced;
            }
            produced += 1;
            debug!(%item, produced, "producer inserted item");
        }

        debug!(produced, "producer reached its limit, closing buffer");
        self.buffer.close_write();
        produced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Span;
    use crate::source::{RandomSource, ScriptedSource};
    use giztoy_slotbuf::BufferError;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_draw_order() {
        // production delay, value, item delay
        let source = ScriptedSource::new([4, 5, 3, 6, 7, 4]);
        let buf = ItemBuffer::new(4);
        let producer = Producer::new(
            buf.clone(),
            source,
            Ranges::default(),
            Pacing::immediate(),
            StopSignal::new(),
        )
        .with_limit(Some(2));

        assert_eq!(producer.run(), 2);
        assert_eq!(buf.consume().unwrap(), Item::new(5, 3));
        assert_eq!(buf.consume().unwrap(), Item::new(7, 4));
        assert_eq!(buf.consume(), Err(BufferError::Closed));
    }

    #[test]
    fn test_items_within_ranges() {
        let ranges = Ranges::default();
        let mut producer = Producer::new(
            ItemBuffer::new(1),
            RandomSource::seeded(9),
            ranges,
            Pacing::immediate(),
            StopSignal::new(),
        );
        for _ in 0..500 {
            let item = producer.next_item();
            assert!(ranges.value.contains(item.value()));
            assert!(ranges.item_delay.contains(item.delay_secs()));
        }
    }

    #[test]
    fn test_stop_while_sleeping() {
        let stop = StopSignal::new();
        let buf = ItemBuffer::new(1);
        let producer = Producer::new(
            buf.clone(),
            ScriptedSource::new([1]),
            Ranges::default(),
            Pacing::new(Duration::from_secs(10)),
            stop.clone(),
        );

        let handle = thread::spawn(move || producer.run());
        thread::sleep(Duration::from_millis(20));
        stop.stop();

        assert_eq!(handle.join().unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_shutdown_while_blocked() {
        let buf = ItemBuffer::new(1);
        let mut ranges = Ranges::default();
        ranges.production_delay = Span::new(3, 3);
        let producer = Producer::new(
            buf.clone(),
            RandomSource::seeded(1),
            ranges,
            Pacing::immediate(),
            StopSignal::new(),
        );

        let handle = thread::spawn(move || producer.run());
        // First item fills the only slot, the second blocks
        let deadline = Instant::now() + Duration::from_secs(5);
        while !buf.is_full() {
            assert!(Instant::now() < deadline, "producer never filled the buffer");
            thread::sleep(Duration::from_millis(1));
        }
        buf.shutdown();

        assert_eq!(handle.join().unwrap(), 1);
    }
}
