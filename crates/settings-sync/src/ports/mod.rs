//! Ports layer: the traits connecting the domain to the outside world.

pub mod inbound;
pub mod outbound;

pub use inbound::AutosaveField;
pub use outbound::{
    AuthGate, ChangeNotifier, ErrorSurface, MockTimeSource, SaveApi, SaveResponse, SaveStatus,
    SystemTimeSource, TimeSource, TransportError,
};
