//! Sources of the random values a producer draws.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Span;

/// Supplies integers from inclusive spans.
pub trait ValueSource: Send {
    fn sample(&mut self, span: Span) -> u32;
}

/// Uniform random values from a [`StdRng`].
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Reproducible source: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        RandomSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RandomSource {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl ValueSource for RandomSource {
    fn sample(&mut self, span: Span) -> u32 {
        self.rng.gen_range(span.min..=span.max)
    }
}

/// Replays a fixed sequence, starting over when it runs out.
///
/// Each value is clamped into the requested span.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: VecDeque<u32>,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let values: VecDeque<u32> = values.into_iter().collect();
        assert!(!values.is_empty(), "scripted source needs at least one value");
        ScriptedSource { values }
    }
}

impl ValueSource for ScriptedSource {
    fn sample(&mut self, span: Span) -> u32 {
        self.values.rotate_left(1);
        let value = self.values.back().copied().unwrap_or(span.min);
        value.clamp(span.min, span.max)
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn sample(&mut self, span: Span) -> u32 {
        (**self).sample(span)
    }
}
