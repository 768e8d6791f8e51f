//! Scenario boot sequence: announce, brief the DM, hand out role packs

use gateway::EventTransport;
use serde::Serialize;
use serde_json::Value;
use shared::{BootConfig, OutboundEvent, Result, Role, Scenario, ScriptWorldError};
use tracing::{debug, info};

pub const SCENARIO_LOADED_MARKER: &str = "【SCENARIO_LOADED】";
pub const ROLE_PACK_MARKER: &str = "【ROLE PACK】";

const CLOSING_ANNOUNCEMENT: &str =
    "✅ 角色设定包已下发给 NPC。玩家请在频道回复：我准备好了（或直接提问开始）。";

fn opening_announcement(title: &str) -> String {
    format!("🎭【DM】已加载剧本：《{}》。即将开始分配角色与第一幕。", title)
}

/// What the DM is told about the loaded scenario
#[derive(Debug, Serialize)]
struct ScenarioLoaded<'a> {
    scenario_id: &'a str,
    title: &'a str,
    channel: &'a str,
}

/// Private briefing sent to an AI-controlled role
#[derive(Debug, Serialize)]
pub struct RolePack<'a> {
    pub role_id: &'a str,
    pub display: Option<&'a str>,
    pub identity: &'a Value,
    pub public_info: &'a [Value],
    pub hidden_info: &'a [Value],
}

impl<'a> RolePack<'a> {
    pub fn new(role_id: &'a str, role: &'a Role) -> Self {
        Self {
            role_id,
            display: role.display.as_deref(),
            identity: &role.identity,
            public_info: &role.public_info,
            hidden_info: &role.hidden_info,
        }
    }
}

/// Marker line followed by pretty JSON. Non-ASCII text stays as is.
fn marked_json<T: Serialize>(marker: &str, payload: &T) -> Result<String> {
    Ok(format!("{}\n{}", marker, serde_json::to_string_pretty(payload)?))
}

/// Build the boot events for `scenario`: `N + 3` events for `N` AI roles.
/// Fails if an AI role has no id; roles of other kinds need none.
pub fn boot_events(scenario: &Scenario, config: &BootConfig) -> Result<Vec<OutboundEvent>> {
    let sender = config.sender_id.as_str();
    let mut events = Vec::with_capacity(scenario.roles.len() + 3);

    events.push(OutboundEvent::channel_message(
        sender,
        &config.channel,
        opening_announcement(scenario.title()),
    ));

    let loaded = ScenarioLoaded {
        scenario_id: &scenario.id,
        title: scenario.title(),
        channel: &config.channel,
    };
    events.push(OutboundEvent::direct_message(
        sender,
        &config.dm_id,
        marked_json(SCENARIO_LOADED_MARKER, &loaded)?,
    ));

    for (index, role) in scenario.roles.iter().enumerate() {
        if !role.is_ai() {
            continue;
        }
        let role_id = role.id().ok_or(ScriptWorldError::RoleWithoutId(index))?;
        // Role ids are not checked against the network's agents
        debug!(role = %role_id, "role pack for AI role");
        events.push(OutboundEvent::direct_message(
            sender,
            role_id,
            marked_json(ROLE_PACK_MARKER, &RolePack::new(role_id, role))?,
        ));
    }

    events.push(OutboundEvent::channel_message(
        sender,
        &config.channel,
        CLOSING_ANNOUNCEMENT,
    ));

    Ok(events)
}

/// Events delivered by a completed boot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootReport {
    pub delivered: Vec<OutboundEvent>,
}

impl BootReport {
    pub fn role_packs(&self) -> usize {
        // Opening, DM briefing and closing are the only non-pack events
        self.delivered.len().saturating_sub(3)
    }
}

/// Build and send the boot events in order. Stops at the first failed send.
pub fn run_boot<T: EventTransport>(
    scenario: &Scenario,
    config: &BootConfig,
    transport: &mut T,
) -> Result<BootReport> {
    let events = boot_events(scenario, config)?;
    info!(scenario = %scenario.id, events = events.len(), "booting scenario");

    for event in &events {
        transport.send(event)?;
    }

    Ok(BootReport { delivered: events })
}
