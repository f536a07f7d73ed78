//! `sndutils` is a small suite of row-wise transformations over `snd` tables: tab-separated
//! text where the first field of each line is a row identifier and the rest are numbers, and
//! lines starting with `#` are header/comment rows.
//!
//! ## Commands
//!
//! - **rank**: replace each row's values by their percentile rank within the row, optionally
//!   zero-truncated ([`processing::Ranker`])
//! - **selcol**: keep only the columns named in a list ([`processing::ColumnSelector`])
//! - **noise**: randomly turn values into zero ([`processing::NoiseInjector`])
//! - **top**: report the two largest values of each row and their column labels
//!   ([`processing::TopTwoReporter`])
//!
//! Everything streams: one record is read, transformed and written before the next one.
//!
//! ## Example: rank a stream
//!
//! ```rust
//! use sndutils::execution::run_transform;
//! use sndutils::ingestion::{SndReader, SndWriter};
//! use sndutils::processing::{RankOptions, Ranker};
//!
//! # fn main() -> Result<(), sndutils::SndError> {
//! let input = "#\tA\tB\tC\tD\nr1\t1\t2\t2\t4\n";
//! let mut out = SndWriter::new(Vec::new());
//! let mut ranker = Ranker::new(RankOptions::default());
//! run_transform(SndReader::from_reader(input.as_bytes()), &mut out, &mut ranker)?;
//!
//! let text = String::from_utf8(out.into_inner()?).unwrap();
//! assert_eq!(text, "#\tA\tB\tC\tD\nr1\t0.000000\t0.500000\t0.500000\t1.000000\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: streaming record reader/writer
//! - [`processing`]: the per-command transforms
//! - [`execution`]: the streaming loop and run observers
//! - [`types`]: the record model and number parsing
//! - [`error`]: the error type shared by all of the above

pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{SndError, SndResult};
