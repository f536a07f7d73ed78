//! Row-wise transformations over `snd` records.
//!
//! Each command is a stateful transform fed one [`crate::types::Record`] at a time:
//!
//! - [`Ranker`]: zero-truncated percentile ranks (`rank`)
//! - [`ColumnSelector`]: projection by header label (`selcol`)
//! - [`NoiseInjector`]: random zero injection (`noise`)
//! - [`TopTwoReporter`]: two largest values per row (`top`)
//!
//! ## Example: rank one row
//!
//! ```rust
//! use sndutils::processing::{RankOptions, Ranker};
//! use sndutils::types::Record;
//!
//! let mut ranker = Ranker::new(RankOptions { zero_truncate: true });
//! let out = ranker.transform(&Record::from_line("r1\t0\t2\t2\t8")).unwrap();
//! assert_eq!(out.to_line(), "r1\t0\t0.250000\t0.250000\t1.000000");
//! ```

pub mod noise;
pub mod rank;
pub mod selcol;
pub mod top;

pub use noise::{DEFAULT_NOISE_RATE, NoiseInjector, NoiseOptions};
pub use rank::{RankCell, RankOptions, Ranker, rank_values};
pub use selcol::ColumnSelector;
pub use top::{TopTwo, TopTwoReporter};

use crate::error::SndResult;
use crate::types::Record;

/// A per-record stream transform.
///
/// Implementors may keep state across records (e.g. the last header row) but see each record
/// exactly once, in input order.
pub trait RecordTransform {
    /// Transform one record. `None` drops it from the output.
    fn apply(&mut self, record: &Record) -> SndResult<Option<Record>>;
}
