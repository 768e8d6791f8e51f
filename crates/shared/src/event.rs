//! Outbound events and the wire shapes they are submitted in

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

use crate::{Result, ScriptWorldError};

const THREAD_CHANNEL_MESSAGE: &str = "thread.channel_message";
const THREAD_DIRECT_MESSAGE: &str = "thread.direct_message";
const WORKSPACE_SEND_CHANNEL_MESSAGE: &str = "openagents.mods.workspace.messaging.send_channel_message";

/// Address used by workspace messaging events; the channel travels in the payload
pub const SYSTEM_TARGET: &str = "system:system";

/// Kind of outbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Broadcast to a channel
    ChannelMessage,
    /// Private message to one agent
    DirectMessage,
    /// Workspace messaging mod's channel send
    SendChannelMessage,
}

impl EventKind {
    /// Event `type` string understood by the network
    pub fn wire_type(&self) -> &'static str {
        match self {
            EventKind::ChannelMessage => THREAD_CHANNEL_MESSAGE,
            EventKind::DirectMessage => THREAD_DIRECT_MESSAGE,
            EventKind::SendChannelMessage => WORKSPACE_SEND_CHANNEL_MESSAGE,
        }
    }
}

/// Recipient of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Channel(String),
    Agent(String),
}

impl Target {
    pub fn channel(name: impl Into<String>) -> Self {
        Target::Channel(name.into())
    }

    pub fn agent(id: impl Into<String>) -> Self {
        Target::Agent(id.into())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Channel(name) => write!(f, "channel:{}", name),
            Target::Agent(id) => write!(f, "agent:{}", id),
        }
    }
}

/// A single message to deliver. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEvent {
    pub kind: EventKind,
    pub source: String,
    pub target: Target,
    pub text: String,
}

impl OutboundEvent {
    pub fn channel_message(source: &str, channel: &str, text: impl Into<String>) -> Self {
        Self {
            kind: EventKind::ChannelMessage,
            source: source.to_string(),
            target: Target::channel(channel),
            text: text.into(),
        }
    }

    pub fn direct_message(source: &str, agent_id: &str, text: impl Into<String>) -> Self {
        Self {
            kind: EventKind::DirectMessage,
            source: source.to_string(),
            target: Target::agent(agent_id),
            text: text.into(),
        }
    }

    pub fn send_channel_message(source: &str, channel: &str, text: impl Into<String>) -> Self {
        Self {
            kind: EventKind::SendChannelMessage,
            source: source.to_string(),
            target: Target::channel(channel),
            text: text.into(),
        }
    }
}

/// One JSON body to try for an event
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadShape {
    pub name: &'static str,
    pub body: Value,
}

/// Payload conventions spoken by different network versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireProtocol {
    /// `{"event": {type, source, target, content}}` with `channel:`/`agent:` targets.
    /// Success is exactly HTTP 200.
    #[default]
    Thread,
    /// Workspace messaging mod: wrapped `{"event": {..., data}}`, then a flat fallback.
    /// Success is any 2xx.
    WorkspaceMessaging,
}

impl WireProtocol {
    /// Payload shapes to attempt for `event`, in order
    pub fn shapes(&self, event: &OutboundEvent) -> Result<Vec<PayloadShape>> {
        match self {
            WireProtocol::Thread => Ok(vec![PayloadShape {
                name: "envelope",
                body: json!({
                    "event": {
                        "type": event.kind.wire_type(),
                        "source": event.source,
                        "target": event.target.to_string(),
                        "content": {"text": event.text},
                    }
                }),
            }]),
            WireProtocol::WorkspaceMessaging => {
                let channel = match &event.target {
                    Target::Channel(name) => name,
                    Target::Agent(id) => {
                        return Err(ScriptWorldError::Config(format!(
                            "workspace messaging cannot address agent '{}'",
                            id
                        )))
                    }
                };
                Ok(vec![
                    PayloadShape {
                        name: "envelope",
                        body: json!({
                            "event": {
                                "type": event.kind.wire_type(),
                                "source": event.source,
                                "target": SYSTEM_TARGET,
                                "data": {
                                    "channel": channel,
                                    "content": {"text": event.text},
                                },
                            }
                        }),
                    },
                    PayloadShape {
                        name: "flat",
                        body: json!({
                            "type": event.kind.wire_type(),
                            "source": event.source,
                            "target": SYSTEM_TARGET,
                            "channel": channel,
                            "content": {"text": event.text},
                        }),
                    },
                ])
            }
        }
    }

    /// Whether an HTTP status counts as delivered
    pub fn accepts_status(&self, status: u16) -> bool {
        match self {
            WireProtocol::Thread => status == 200,
            WireProtocol::WorkspaceMessaging => (200..300).contains(&status),
        }
    }
}

/// Body of the optional `POST /api/register` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRegistration {
    pub agent_id: String,
    pub display_name: String,
    pub secret: String,
    pub channels: Vec<String>,
    pub metadata: Value,
}

impl AgentRegistration {
    /// Registration for a CLI sender that joins one channel
    pub fn cli(agent_id: &str, channel: &str) -> Self {
        Self {
            agent_id: agent_id.to_string(),
            display_name: agent_id.to_string(),
            secret: String::new(),
            channels: vec![channel.to_string()],
            metadata: json!({"platform": "cli"}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display() {
        assert_eq!(Target::channel("general").to_string(), "channel:general");
        assert_eq!(Target::agent("npc_1").to_string(), "agent:npc_1");
    }

    #[test]
    fn test_thread_channel_shape() {
        let event = OutboundEvent::channel_message("admin", "general", "hello");
        let shapes = WireProtocol::Thread.shapes(&event).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(
            shapes[0].body,
            json!({
                "event": {
                    "type": "thread.channel_message",
                    "source": "admin",
                    "target": "channel:general",
                    "content": {"text": "hello"},
                }
            })
        );
    }

    #[test]
    fn test_thread_direct_shape() {
        let event = OutboundEvent::direct_message("admin", "npc_1", "psst");
        let body = &WireProtocol::Thread.shapes(&event).unwrap()[0].body;
        assert_eq!(body["event"]["type"], "thread.direct_message");
        assert_eq!(body["event"]["target"], "agent:npc_1");
    }

    #[test]
    fn test_workspace_shapes_envelope_then_flat() {
        let event = OutboundEvent::send_channel_message("ScriptWorldLobby", "general", "加载剧本");
        let shapes = WireProtocol::WorkspaceMessaging.shapes(&event).unwrap();
        let names: Vec<&str> = shapes.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["envelope", "flat"]);

        assert_eq!(
            shapes[0].body,
            json!({
                "event": {
                    "type": "openagents.mods.workspace.messaging.send_channel_message",
                    "source": "ScriptWorldLobby",
                    "target": "system:system",
                    "data": {"channel": "general", "content": {"text": "加载剧本"}},
                }
            })
        );
        assert_eq!(
            shapes[1].body,
            json!({
                "type": "openagents.mods.workspace.messaging.send_channel_message",
                "source": "ScriptWorldLobby",
                "target": "system:system",
                "channel": "general",
                "content": {"text": "加载剧本"},
            })
        );
    }

    #[test]
    fn test_workspace_rejects_agent_target() {
        let event = OutboundEvent::direct_message("ScriptWorldLobby", "npc_1", "hi");
        assert!(WireProtocol::WorkspaceMessaging.shapes(&event).is_err());
    }

    #[test]
    fn test_accepted_statuses() {
        assert!(WireProtocol::Thread.accepts_status(200));
        assert!(!WireProtocol::Thread.accepts_status(201));
        assert!(!WireProtocol::Thread.accepts_status(500));
        assert!(WireProtocol::WorkspaceMessaging.accepts_status(204));
        assert!(!WireProtocol::WorkspaceMessaging.accepts_status(404));
    }

    #[test]
    fn test_cli_registration_body() {
        let reg = AgentRegistration::cli("ScriptWorldLobby", "general");
        assert_eq!(
            serde_json::to_value(&reg).unwrap(),
            json!({
                "agent_id": "ScriptWorldLobby",
                "display_name": "ScriptWorldLobby",
                "secret": "",
                "channels": ["general"],
                "metadata": {"platform": "cli"},
            })
        );
    }
}
