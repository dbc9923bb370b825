//! Test helpers shared across crates in the blend-config workspace.
//!
//! Provides guards that mutate the process environment and undo the change
//! when dropped.

pub mod env;
