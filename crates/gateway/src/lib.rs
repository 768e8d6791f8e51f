//! # ScriptWorld Gateway
//!
//! Delivery of outbound events to the network's `/api/send_event` endpoint.

pub mod http_transport;
pub mod recording;

pub use http_transport::HttpTransport;
pub use recording::RecordingTransport;

use shared::{AgentRegistration, OutboundEvent, Result};

/// Something events can be delivered through
pub trait EventTransport {
    /// Announce the sender identity. Callers may ignore failures.
    fn register(&mut self, registration: &AgentRegistration) -> Result<()>;

    /// Deliver one event, blocking until it is accepted or rejected
    fn send(&mut self, event: &OutboundEvent) -> Result<()>;
}

impl<T: EventTransport + ?Sized> EventTransport for &mut T {
    fn register(&mut self, registration: &AgentRegistration) -> Result<()> {
        (**self).register(registration)
    }

    fn send(&mut self, event: &OutboundEvent) -> Result<()> {
        (**self).send(event)
    }
}
