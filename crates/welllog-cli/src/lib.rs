//! Library surface of the `welllog` command-line tool.
//!
//! The binary wires clap arguments to [`convert::convert_snapshot`] and the
//! audit writer; both live here so integration tests can drive them
//! without spawning a process.

pub mod audit;
pub mod convert;
pub mod logging;
pub mod types;
