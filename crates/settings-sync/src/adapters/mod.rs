//! Adapters: concrete implementations of the outbound ports.

pub mod memory;
pub mod publisher;
pub mod testing;

pub use memory::InMemorySaveApi;
pub use publisher::ChangeBroadcaster;
