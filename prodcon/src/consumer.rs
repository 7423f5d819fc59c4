//! The consuming side of a run.

use giztoy_slotbuf::{BufferError, ItemBuffer};
use tracing::debug;

use crate::config::Pacing;
use crate::report::Reporter;
use crate::stop::StopSignal;

/// Takes items out of the buffer and works on them.
///
/// The item's own delay is spent after [`ItemBuffer::consume`] has returned
/// and released the lock, so the producer can refill the slot meanwhile.
pub struct Consumer<R> {
    buffer: ItemBuffer,
    reporter: R,
    pacing: Pacing,
    stop: StopSignal,
}

impl<R: Reporter> Consumer<R> {
    pub fn new(buffer: ItemBuffer, reporter: R, pacing: Pacing, stop: StopSignal) -> Self {
        Consumer {
            buffer,
            reporter,
            pacing,
            stop,
        }
    }

    /// Runs until the buffer is drained and closed, shut down, or the stop
    /// signal interrupts a wait. Returns the number of items taken.
    pub fn run(mut self) -> u64 {
        let mut consumed = 0;

        loop {
            let item = match self.buffer.consume() {
                Ok(item) => item,
                Err(BufferError::Closed) => {
                    debug!(consumed, "buffer drained, consumer exiting");
                    return consumed;
                }
                Err(BufferError::Shutdown) => {
                    debug!(consumed, "buffer shut down, consumer exiting");
                    return consumed;
                }
            };
            consumed += 1;

            self.reporter.observed(&item);
            if !self.stop.sleep(self.pacing.duration(item.delay_secs())) {
                debug!(%item, "consumer stopped while working");
                return consumed;
            }
            self.reporter.waited(&item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MemoryReporter, Report};
    use giztoy_slotbuf::Item;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_reports_each_item() {
        let buf = ItemBuffer::new(4);
        buf.produce(Item::new(5, 3)).unwrap();
        buf.produce(Item::new(7, 4)).unwrap();
        buf.close_write();

        let reporter = MemoryReporter::new();
        let consumer = Consumer::new(buf, reporter.clone(), Pacing::immediate(), StopSignal::new());

        assert_eq!(consumer.run(), 2);
        assert_eq!(
            reporter.events(),
            vec![
                Report::Observed(5),
                Report::Waited(3),
                Report::Observed(7),
                Report::Waited(4),
            ]
        );
    }

    #[test]
    fn test_wait_happens_outside_lock() {
        let buf = ItemBuffer::new(1);
        buf.produce(Item::new(1, 5)).unwrap();

        let consumer = Consumer::new(
            buf.clone(),
            MemoryReporter::new(),
            Pacing::new(Duration::from_millis(100)),
            StopSignal::new(),
        );
        let handle = thread::spawn(move || consumer.run());

        // While the consumer works on the first item the slot is free again
        thread::sleep(Duration::from_millis(50));
        buf.produce(Item::new(2, 0)).unwrap();
        assert!(buf.is_full());

        buf.close_write();
        assert_eq!(handle.join().unwrap(), 2);
    }

    #[test]
    fn test_stop_while_working() {
        let buf = ItemBuffer::new(1);
        buf.produce(Item::new(9, 9)).unwrap();

        let stop = StopSignal::new();
        let reporter = MemoryReporter::new();
        let consumer = Consumer::new(
            buf,
            reporter.clone(),
            Pacing::new(Duration::from_secs(10)),
            stop.clone(),
        );
        let handle = thread::spawn(move || consumer.run());

        thread::sleep(Duration::from_millis(20));
        stop.stop();

        assert_eq!(handle.join().unwrap(), 1);
        assert_eq!(reporter.events(), vec![Report::Observed(9)]);
    }

    #[test]
    fn test_shutdown_releases_consumer() {
        let buf = ItemBuffer::new(2);
        let consumer = Consumer::new(
            buf.clone(),
            MemoryReporter::new(),
            Pacing::immediate(),
            StopSignal::new(),
        );
        let handle = thread::spawn(move || consumer.run());

        thread::sleep(Duration::from_millis(20));
        buf.shutdown();
        assert_eq!(handle.join().unwrap(), 0);
    }
}
