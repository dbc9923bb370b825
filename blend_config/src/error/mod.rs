//! Error types produced while loading and composing configuration.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::BlendError;

#[cfg(test)]
mod tests;
