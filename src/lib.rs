//! Waypost library exports for testing

pub mod core;
pub mod ui;

#[cfg(test)]
pub mod test_support;
