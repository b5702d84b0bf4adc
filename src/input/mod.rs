//! Input adapters that turn platform events into explorer session calls.

#[cfg(feature = "gui")]
pub mod gui;
