//! Random zero injection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{SndError, SndResult};
use crate::types::Record;

use super::RecordTransform;

/// Default probability of zeroing a field.
pub const DEFAULT_NOISE_RATE: f64 = 0.3;

/// Text written in place of a zeroed field.
pub const ZERO_FIELD: &str = "0";

/// Options for the [`NoiseInjector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseOptions {
    /// Probability in `[0, 1]` that a numeric field is replaced by zero.
    pub rate: f64,
    /// Fixed seed for a reproducible run; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NoiseOptions {
    fn default() -> Self {
        Self {
            rate: DEFAULT_NOISE_RATE,
            seed: None,
        }
    }
}

impl NoiseOptions {
    /// Reject rates outside `[0, 1]` (including NaN).
    pub fn validate(&self) -> SndResult<()> {
        if !(0.0..=1.0).contains(&self.rate) {
            return Err(SndError::InvalidOption {
                message: format!("noise rate must be within [0, 1], got {}", self.rate),
            });
        }
        Ok(())
    }

    /// Build the random source described by these options.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Replaces each data field with `0` with probability `rate`.
///
/// Untouched fields are copied verbatim; header rows pass through.
#[derive(Debug, Clone)]
pub struct NoiseInjector<R: Rng> {
    rate: f64,
    rng: R,
}

impl NoiseInjector<StdRng> {
    /// Validate `opts` and build an injector over the standard generator.
    pub fn from_options(opts: &NoiseOptions) -> SndResult<Self> {
        opts.validate()?;
        Ok(Self::new(opts.rate, opts.rng()))
    }
}

impl<R: Rng> NoiseInjector<R> {
    pub fn new(rate: f64, rng: R) -> Self {
        Self { rate, rng }
    }

    /// Apply noise to one record.
    pub fn transform(&mut self, record: &Record) -> SndResult<Record> {
        if record.is_header() {
            return Ok(record.clone());
        }
        let mut out = record.clone();
        for field in out.fields.iter_mut().skip(1) {
            if self.rng.gen_range(0.0..1.0) < self.rate {
                *field = ZERO_FIELD.to_owned();
            }
        }
        Ok(out)
    }
}

impl<R: Rng> RecordTransform for NoiseInjector<R> {
    fn apply(&mut self, record: &Record) -> SndResult<Option<Record>> {
        self.transform(record).map(Some)
    }
}
