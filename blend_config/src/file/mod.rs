//! Helpers for reading configuration documents from disk.

mod error;
mod loader;
mod parser;

pub use loader::load_document;

#[cfg(test)]
mod tests;
