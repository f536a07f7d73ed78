//! Record input and output for `snd` streams.
//!
//! Most callers should use [`open_path`], which opens a file (or standard input for `-`) as a
//! streaming [`SndReader`], and [`SndWriter`] for the output side. Nothing here buffers more
//! than one record at a time.

pub mod snd;

pub use snd::{STDIN_PATH, SndReader, SndWriter, open_path};
