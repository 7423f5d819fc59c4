//! Where the consumer reports what it did with each item.

use std::sync::{Arc, Mutex};

use giztoy_slotbuf::Item;
use tracing::info;

/// Receives two events per consumed item.
pub trait Reporter: Send {
    /// The consumer took `item` out of the buffer.
    fn observed(&mut self, item: &Item);

    /// The consumer finished waiting `item.delay_secs()` units.
    fn waited(&mut self, item: &Item);
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn observed(&mut self, item: &Item) {
        info!(value = item.value(), "consumer observed value");
    }

    fn waited(&mut self, item: &Item) {
        info!(delay_secs = item.delay_secs(), "consumer finished waiting");
    }
}

/// A recorded consumer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Observed(u32),
    Waited(u32),
}

/// Keeps every event in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<Report>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events recorded so far.
    pub fn events(&self) -> Vec<Report> {
        self.events.lock().unwrap().clone()
    }

    /// Values of every observed item, in report order.
    pub fn observed_values(&self) -> Vec<u32> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                Report::Observed(value) => Some(*value),
                Report::Waited(_) => None,
            })
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn observed(&mut self, item: &Item) {
        self.events
            .lock()
            .unwrap()
            .push(Report::Observed(item.value()));
    }

    fn waited(&mut self, item: &Item) {
        self.events
            .lock()
            .unwrap()
            .push(Report::Waited(item.delay_secs()));
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn observed(&mut self, item: &Item) {
        (**self).observed(item)
    }

    fn waited(&mut self, item: &Item) {
        (**self).waited(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_shares_log() {
        let reporter = MemoryReporter::new();
        let mut handle = reporter.clone();

        handle.observed(&Item::new(5, 3));
        handle.waited(&Item::new(5, 3));

        assert_eq!(
            reporter.events(),
            vec![Report::Observed(5), Report::Waited(3)]
        );
        assert_eq!(reporter.observed_values(), vec![5]);
    }

    #[test]
    fn test_tracing_reporter_is_reporter() {
        let mut reporter: Box<dyn Reporter> = Box::new(TracingReporter);
        reporter.observed(&Item::new(1, 2));
        reporter.waited(&Item::new(1, 2));
    }
}
