//! Starting and supervising the producer/consumer pair.

use std::thread::{self, JoinHandle};

use giztoy_slotbuf::ItemBuffer;
use tracing::{info, warn};

use crate::config::Config;
use crate::consumer::Consumer;
use crate::error::{Result, Role, WorkerError};
use crate::producer::Producer;
use crate::report::Reporter;
use crate::source::ValueSource;
use crate::stop::StopSignal;

/// Starts one producer thread and one consumer thread over a shared buffer.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: Config,
}

impl Orchestrator {
    /// Creates an orchestrator after validating `config`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Orchestrator { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the buffer and spawns both workers.
    ///
    /// If a thread cannot be spawned the run is torn down and
    /// `WorkerError::Spawn` is returned; a run never continues with one side
    /// missing.
    pub fn start<S, R>(&self, source: S, reporter: R) -> Result<Running>
    where
        S: ValueSource + 'static,
        R: Reporter + 'static,
    {
        let cfg = &self.config;
        let buffer = ItemBuffer::with_order(cfg.capacity, cfg.order);
        let stop = StopSignal::new();
        let handle = StopHandle {
            stop: stop.clone(),
            buffer: buffer.clone(),
        };

        let producer = Producer::new(
            buffer.clone(),
            source,
            cfg.ranges,
            cfg.pacing(),
            stop.clone(),
        )
        .with_limit(cfg.items);
        let producer = spawn_worker(Role::Producer, &handle, move || producer.run())?;

        let consumer = Consumer::new(buffer.clone(), reporter, cfg.pacing(), stop);
        let consumer = match spawn_worker(Role::Consumer, &handle, move || consumer.run()) {
            Ok(consumer) => consumer,
            Err(err) => {
                handle.stop();
                let _ = producer.join();
                return Err(err);
            }
        };

        info!(
            capacity = cfg.capacity,
            order = ?cfg.order,
            items = ?cfg.items,
            "producer and consumer started"
        );

        Ok(Running {
            handle,
            producer,
            consumer,
        })
    }
}

/// Spawns a named worker thread whose unwinding stops the run, so the
/// surviving side is neither left blocked on the buffer nor sleeping out a
/// delay for a peer that no longer exists.
fn spawn_worker<F>(role: Role, handle: &StopHandle, work: F) -> Result<JoinHandle<u64>>
where
    F: FnOnce() -> u64 + Send + 'static,
{
    let guard = StopOnPanic(handle.clone());
    thread::Builder::new()
        .name(role.as_str().to_string())
        .spawn(move || {
            let _guard = guard;
            work()
        })
        .map_err(|source| WorkerError::Spawn { role, source })
}

struct StopOnPanic(StopHandle);

impl Drop for StopOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.stop();
        }
    }
}

/// Stops a run from any thread. Clones stop the same run.
#[derive(Debug, Clone)]
pub struct StopHandle {
    stop: StopSignal,
    buffer: ItemBuffer,
}

impl StopHandle {
    /// Interrupts both workers whether they are sleeping or blocked.
    pub fn stop(&self) {
        self.stop.stop();
        self.buffer.shutdown();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Items placed in the buffer.
    pub produced: u64,
    /// Items taken out of the buffer.
    pub consumed: u64,
    /// Items still in the buffer when both workers exited.
    pub remaining: usize,
}

/// A started run.
#[derive(Debug)]
pub struct Running {
    handle: StopHandle,
    producer: JoinHandle<u64>,
    consumer: JoinHandle<u64>,
}

impl Running {
    pub fn stop_handle(&self) -> StopHandle {
        self.handle.clone()
    }

    pub fn buffer(&self) -> &ItemBuffer {
        &self.handle.buffer
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Waits for both workers to exit.
    ///
    /// A finite run (`items` set) ends once the consumer has drained the
    /// buffer. An unbounded run ends only after [`stop`](Self::stop).
    pub fn join(self) -> Result<Summary> {
        let Running {
            handle,
            producer,
            consumer,
        } = self;

        let produced = producer.join();
        if produced.is_err() {
            warn!("producer thread panicked, shutting down");
            handle.stop();
        }
        let consumed = consumer.join();
        if consumed.is_err() {
            warn!("consumer thread panicked");
        }

        let produced = produced.map_err(|_| WorkerError::Panicked(Role::Producer))?;
        let consumed = consumed.map_err(|_| WorkerError::Panicked(Role::Consumer))?;
        let summary = Summary {
            produced,
            consumed,
            remaining: handle.buffer.len(),
        };
        info!(
            produced = summary.produced,
            consumed = summary.consumed,
            remaining = summary.remaining,
            "producer and consumer finished"
        );
        Ok(summary)
    }
}
