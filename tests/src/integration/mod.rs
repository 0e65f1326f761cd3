//! Cross-crate scenario tests.

pub mod autosave_flow;
pub mod bus_events;
pub mod email_collection;
pub mod page_bootstrap;
