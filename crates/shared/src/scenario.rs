//! Scenario and role definitions read from scenario YAML files

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Who controls a role in the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleKind {
    /// Played by an agent on the network; receives a role pack
    Ai,
    /// Played by a person in the channel
    Human,
    /// Any other `type` string, kept verbatim
    Other(String),
    /// No `type` given
    #[default]
    Unspecified,
}

impl RoleKind {
    pub fn as_str(&self) -> &str {
        match self {
            RoleKind::Ai => "ai",
            RoleKind::Human => "human",
            RoleKind::Other(s) => s,
            RoleKind::Unspecified => "",
        }
    }
}

impl From<&str> for RoleKind {
    fn from(value: &str) -> Self {
        match value {
            "ai" => RoleKind::Ai,
            "human" => RoleKind::Human,
            other => RoleKind::Other(other.to_string()),
        }
    }
}

fn kind_or_unspecified<'de, D>(deserializer: D) -> Result<RoleKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| RoleKind::from(s.as_str()))
        .unwrap_or_default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A role in a scenario
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Role {
    /// Role identifier. For AI roles this must match the agent id on the network.
    /// Only AI roles need one.
    #[serde(default)]
    pub id: Option<String>,

    /// Controller of the role
    #[serde(rename = "type", default, deserialize_with = "kind_or_unspecified")]
    pub kind: RoleKind,

    /// Human-readable role name
    #[serde(default)]
    pub display: Option<String>,

    /// Opaque identity block, forwarded verbatim
    #[serde(default)]
    pub identity: Value,

    /// Facts every participant may know
    #[serde(default, deserialize_with = "null_as_empty")]
    pub public_info: Vec<Value>,

    /// Facts only this role knows
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hidden_info: Vec<Value>,
}

impl Role {
    /// Create a role with no display name, identity or info
    pub fn new(id: impl Into<String>, kind: RoleKind) -> Self {
        Self {
            id: Some(id.into()),
            kind,
            display: None,
            identity: Value::Null,
            public_info: Vec::new(),
            hidden_info: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_ai(&self) -> bool {
        self.kind == RoleKind::Ai
    }
}

/// A scenario definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// File stem the scenario was loaded from
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    title: Option<String>,

    /// Roles in authoring order
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Scenario {
    /// Create an untitled scenario with no roles
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            roles: Vec::new(),
        }
    }

    /// Parse a scenario document, assigning it the given id
    pub fn from_yaml_str(id: impl Into<String>, text: &str) -> Result<Self, serde_yaml::Error> {
        let mut scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.id = id.into();
        Ok(scenario)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Display title, falling back to the id
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Roles controlled by agents, in authoring order
    pub fn ai_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter().filter(|r| r.is_ai())
    }
}
