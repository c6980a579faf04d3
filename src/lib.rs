//! Synergetics Dictionary browser library exports

pub mod core;
pub mod store;
pub mod tui;

#[cfg(test)]
pub mod test_support;
