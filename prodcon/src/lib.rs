//! Producer/consumer workers over a [`giztoy_slotbuf::ItemBuffer`].
//!
//! A run is one [`Producer`] thread and one [`Consumer`] thread sharing one
//! buffer:
//!
//! - the producer waits a drawn delay, builds an [`Item`](giztoy_slotbuf::Item)
//!   from a [`ValueSource`] and produces it, blocking while the buffer is full
//! - the consumer takes an item, blocking while the buffer is empty, reports
//!   its value to a [`Reporter`], then works for the item's own delay
//!
//! Both delays are spent outside the buffer lock.
//!
//! ```
//! use giztoy_prodcon::{Config, MemoryReporter, Orchestrator, RandomSource};
//!
//! let cfg = Config {
//!     capacity: 4,
//!     seed: Some(42),
//!     time_unit_ms: 0,
//!     items: Some(10),
//!     ..Config::default()
//! };
//! let orchestrator = Orchestrator::new(cfg).unwrap();
//! let source = RandomSource::new(orchestrator.config().seed);
//! let reporter = MemoryReporter::new();
//!
//! let summary = orchestrator
//!     .start(source, reporter.clone())
//!     .unwrap()
//!     .join()
//!     .unwrap();
//! assert_eq!(summary.produced, 10);
//! assert_eq!(summary.consumed, 10);
//! assert_eq!(reporter.observed_values().len(), 10);
//! ```

pub mod config;
pub mod consumer;
pub mod error;
pub mod orchestrator;
pub mod producer;
pub mod report;
pub mod source;
pub mod stop;

pub use config::{Config, Pacing, Ranges, Span};
pub use consumer::Consumer;
pub use error::{Result, Role, WorkerError};
pub use orchestrator::{Orchestrator, Running, StopHandle, Summary};
pub use producer::Producer;
pub use report::{MemoryReporter, Report, Reporter, TracingReporter};
pub use source::{RandomSource, ScriptedSource, ValueSource};
pub use stop::StopSignal;
