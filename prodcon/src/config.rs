//! Run configuration.
//!
//! Every field has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! capacity: 32
//! order: positional      # or fifo
//! seed: 42               # omit for an entropy seed
//! time_unit_ms: 1000     # wall time of one delay unit
//! items: 100             # omit to run until stopped
//! ranges:
//!   value: { min: 0, max: 10 }
//!   item_delay: { min: 2, max: 9 }
//!   production_delay: { min: 3, max: 7 }
//! ```

use std::time::Duration;

use giztoy_slotbuf::SlotOrder;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkerError};

/// Default number of buffer slots.
pub const DEFAULT_CAPACITY: usize = 32;
/// Default wall time of one delay unit.
pub const DEFAULT_TIME_UNIT_MS: u64 = 1000;

/// An inclusive range values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

impl Span {
    pub const fn new(min: u32, max: u32) -> Self {
        Span { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Returns true if every value of `self` lies inside `outer`.
    pub fn within(&self, outer: Span) -> bool {
        outer.min <= self.min && self.max <= outer.max
    }
}

/// Allowed item values.
pub const VALUE_DOMAIN: Span = Span::new(0, 10);
/// Allowed item delays.
pub const ITEM_DELAY_DOMAIN: Span = Span::new(2, 9);
/// Allowed waits before each production.
pub const PRODUCTION_DELAY_DOMAIN: Span = Span::new(3, 7);

/// Spans for every value the producer draws.
///
/// Each span may narrow its domain but never leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ranges {
    /// Item payload.
    pub value: Span,
    /// How long the consumer works on an item.
    pub item_delay: Span,
    /// How long the producer waits before building the next item.
    pub production_delay: Span,
}

impl Default for Ranges {
    fn default() -> Self {
        Ranges {
            value: VALUE_DOMAIN,
            item_delay: ITEM_DELAY_DOMAIN,
            production_delay: PRODUCTION_DELAY_DOMAIN,
        }
    }
}

/// Converts delay units to wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    unit: Duration,
}

impl Pacing {
    pub const fn new(unit: Duration) -> Self {
        Pacing { unit }
    }

    /// Delays elapse immediately.
    pub const fn immediate() -> Self {
        Pacing::new(Duration::ZERO)
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn duration(&self, units: u32) -> Duration {
        self.unit.saturating_mul(units)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::new(Duration::from_secs(1))
    }
}

/// Producer/consumer run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of buffer slots.
    pub capacity: usize,

    /// Slot selection policy.
    pub order: SlotOrder,

    /// Seed for the value source. `None` seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Milliseconds of wall time per delay unit.
    pub time_unit_ms: u64,

    /// Stop producing after this many items. `None` runs until stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<u64>,

    pub ranges: Ranges,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: DEFAULT_CAPACITY,
            order: SlotOrder::default(),
            seed: None,
            time_unit_ms: DEFAULT_TIME_UNIT_MS,
            items: None,
            ranges: Ranges::default(),
        }
    }
}

impl Config {
    /// Checks the config for values the workers cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(WorkerError::InvalidConfig(
                "capacity must be greater than 0".into(),
            ));
        }

        let spans = [
            ("value", self.ranges.value, VALUE_DOMAIN),
            ("item_delay", self.ranges.item_delay, ITEM_DELAY_DOMAIN),
            (
                "production_delay",
                self.ranges.production_delay,
                PRODUCTION_DELAY_DOMAIN,
            ),
        ];
        for (name, span, domain) in spans {
            if span.min > span.max {
                return Err(WorkerError::InvalidConfig(format!(
                    "ranges.{}: min {} is greater than max {}",
                    name, span.min, span.max
                )));
            }
            if !span.within(domain) {
                return Err(WorkerError::InvalidConfig(format!(
                    "ranges.{}: {}..={} is outside {}..={}",
                    name, span.min, span.max, domain.min, domain.max
                )));
            }
        }

        Ok(())
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::new(Duration::from_millis(self.time_unit_ms))
    }
}
