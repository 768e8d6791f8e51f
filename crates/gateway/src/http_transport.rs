//! HttpTransport - Blocking HTTP delivery to the network

use reqwest::blocking::Client;
use serde::Serialize;
use shared::{
    AgentRegistration, NetworkConfig, OutboundEvent, Result, ScriptWorldError, ShapeFailure,
    WireProtocol,
};
use tracing::{debug, info, warn};

use crate::EventTransport;

pub const SEND_EVENT_PATH: &str = "/api/send_event";
pub const REGISTER_PATH: &str = "/api/register";

/// Sends each event as a single POST, trying the protocol's shapes in order
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    network: NetworkConfig,
    protocol: WireProtocol,
}

impl HttpTransport {
    /// Create a transport for `network` speaking `protocol`
    pub fn new(network: NetworkConfig, protocol: WireProtocol) -> Result<Self> {
        let client = Client::builder()
            .timeout(network.timeout)
            .build()
            .map_err(|e| ScriptWorldError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            network,
            protocol,
        })
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn protocol(&self) -> WireProtocol {
        self.protocol
    }

    /// POST `body` as JSON and check the status against the protocol
    fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.network.url(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ScriptWorldError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if self.protocol.accepts_status(status) {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(ScriptWorldError::Rejected { url, status, body })
    }
}

impl EventTransport for HttpTransport {
    fn register(&mut self, registration: &AgentRegistration) -> Result<()> {
        self.post_json(REGISTER_PATH, registration)?;
        info!(agent = %registration.agent_id, "registered sender");
        Ok(())
    }

    fn send(&mut self, event: &OutboundEvent) -> Result<()> {
        let shapes = self.protocol.shapes(event)?;
        let mut errors = Vec::with_capacity(shapes.len());

        for shape in &shapes {
            match self.post_json(SEND_EVENT_PATH, &shape.body) {
                Ok(()) => {
                    info!(
                        kind = event.kind.wire_type(),
                        target = %event.target,
                        shape = shape.name,
                        "event delivered"
                    );
                    return Ok(());
                }
                Err(e) => {
                    warn!(shape = shape.name, error = %e, "event shape rejected");
                    errors.push((shape.name, e));
                }
            }
        }

        if errors.len() == 1 {
            if let Some((_, e)) = errors.pop() {
                return Err(e);
            }
        }

        Err(ScriptWorldError::AllShapesRejected {
            url: self.network.url(SEND_EVENT_PATH),
            failures: errors
                .into_iter()
                .map(|(shape, e)| ShapeFailure {
                    shape: shape.to_string(),
                    reason: e.to_string(),
                })
                .collect(),
        })
    }
}
