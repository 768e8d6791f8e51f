//! Lobby broadcast: post a chosen scenario's raw text to the lobby channel

use gateway::EventTransport;
use shared::{AgentRegistration, LobbyConfig, OutboundEvent, Result};
use std::time::Duration;
use tracing::{info, warn};

pub const LOADING_ANNOUNCEMENT: &str = "加载剧本";

/// Wrap scenario text in a yaml code fence, dropping trailing whitespace
pub fn fenced_scenario(text: &str) -> String {
    format!("```yaml\n{}\n```", text.trim_end())
}

/// The announcement followed by the fenced scenario, both to the lobby channel
pub fn lobby_events(raw_text: &str, config: &LobbyConfig) -> [OutboundEvent; 2] {
    [
        OutboundEvent::send_channel_message(&config.sender_id, &config.channel, LOADING_ANNOUNCEMENT),
        OutboundEvent::send_channel_message(
            &config.sender_id,
            &config.channel,
            fenced_scenario(raw_text),
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyReport {
    /// Whether `/api/register` accepted the sender
    pub registered: bool,
    pub delivered: Vec<OutboundEvent>,
}

/// Register the sender, then send the lobby events with `config.pause` between them.
///
/// Registration failures are tolerated. A failed send aborts the broadcast.
pub fn run_lobby<T, S>(
    raw_text: &str,
    config: &LobbyConfig,
    transport: &mut T,
    mut sleep: S,
) -> Result<LobbyReport>
where
    T: EventTransport,
    S: FnMut(Duration),
{
    let registration = AgentRegistration::cli(&config.sender_id, &config.channel);
    let registered = match transport.register(&registration) {
        Ok(()) => true,
        Err(e) => {
            warn!(agent = %config.sender_id, error = %e, "registration skipped");
            false
        }
    };

    let [announcement, scenario] = lobby_events(raw_text, config);

    transport.send(&announcement)?;
    sleep(config.pause);
    transport.send(&scenario)?;

    info!(channel = %config.channel, "scenario broadcast to lobby");
    Ok(LobbyReport {
        registered,
        delivered: vec![announcement, scenario],
    })
}
