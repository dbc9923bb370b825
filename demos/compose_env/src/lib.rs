//! Library facade for the `compose-env` demo so tests can drive commands
//! without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
