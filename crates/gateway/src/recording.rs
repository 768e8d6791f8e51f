//! RecordingTransport - Keeps events in memory instead of sending them
//!
//! Backs `--dry-run` in the CLIs and stands in for the network in tests.

use shared::{AgentRegistration, OutboundEvent, Result, ScriptWorldError};

use crate::EventTransport;

#[derive(Debug, Default)]
pub struct RecordingTransport {
    events: Vec<OutboundEvent>,
    registrations: Vec<AgentRegistration>,
    fail_on_send: Option<usize>,
    reject_registration: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `index`-th send (0-based) and every send after it
    pub fn failing_from(mut self, index: usize) -> Self {
        self.fail_on_send = Some(index);
        self
    }

    /// Reject registration attempts
    pub fn rejecting_registration(mut self) -> Self {
        self.reject_registration = true;
        self
    }

    /// Events accepted so far, in delivery order
    pub fn events(&self) -> &[OutboundEvent] {
        &self.events
    }

    pub fn registrations(&self) -> &[AgentRegistration] {
        &self.registrations
    }
}

impl EventTransport for RecordingTransport {
    fn register(&mut self, registration: &AgentRegistration) -> Result<()> {
        if self.reject_registration {
            return Err(ScriptWorldError::Transport {
                url: "memory:/api/register".to_string(),
                reason: "registration rejected".to_string(),
            });
        }
        self.registrations.push(registration.clone());
        Ok(())
    }

    fn send(&mut self, event: &OutboundEvent) -> Result<()> {
        if matches!(self.fail_on_send, Some(i) if self.events.len() >= i) {
            return Err(ScriptWorldError::Rejected {
                url: "memory:/api/send_event".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut t = RecordingTransport::new();
        t.send(&OutboundEvent::channel_message("a", "general", "1")).unwrap();
        t.send(&OutboundEvent::direct_message("a", "npc", "2")).unwrap();

        let texts: Vec<&str> = t.events().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "2"]);
    }

    #[test]
    fn test_failing_from() {
        let mut t = RecordingTransport::new().failing_from(1);
        assert!(t.send(&OutboundEvent::channel_message("a", "general", "1")).is_ok());
        assert!(t.send(&OutboundEvent::channel_message("a", "general", "2")).is_err());
        assert!(t.send(&OutboundEvent::channel_message("a", "general", "3")).is_err());
        assert_eq!(t.events().len(), 1);
    }

    #[test]
    fn test_rejecting_registration() {
        let mut t = RecordingTransport::new().rejecting_registration();
        assert!(t.register(&AgentRegistration::cli("x", "general")).is_err());
        assert!(t.registrations().is_empty());
    }
}
