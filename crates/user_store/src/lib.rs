//! User storage for the user directory
//!
//! This crate provides a storage abstraction for user records. The
//! JSON-file store keeps the whole list in memory and mirrors it to a single
//! pretty-printed file on every mutation; the in-memory store has the same
//! semantics without the file and backs tests.

mod error;
mod json_file;
mod memory;
mod traits;

pub use error::*;
pub use json_file::*;
pub use memory::*;
pub use traits::*;
