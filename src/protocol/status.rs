//! Server list ping: ask a server which version it runs before logging in.

use crate::error::{ProtocolError, Result};
use crate::protocol::packet_type::login;
use crate::protocol::packets::login::encode_handshake;
use crate::transport::Transport;
use crate::utils::metrics::ProtocolMetrics;
use crate::utils::timeout::with_timeout_error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, instrument};

/// Protocol number sent when the client does not know the server's version yet.
const PROBE_PROTOCOL: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub version_name: String,
    pub protocol: i32,
    pub online: i32,
    pub max: i32,
    /// Plain text of the MOTD.
    pub description: String,
    /// The response advertises a mod loader.
    pub forge: bool,
}

#[derive(Deserialize)]
struct RawStatus {
    version: RawVersion,
    #[serde(default)]
    players: RawPlayers,
    #[serde(default)]
    description: Value,
    #[serde(rename = "forgeData")]
    forge_data: Option<Value>,
    modinfo: Option<Value>,
}

#[derive(Deserialize)]
struct RawVersion {
    name: String,
    protocol: i32,
}

#[derive(Deserialize, Default)]
struct RawPlayers {
    #[serde(default)]
    online: i32,
    #[serde(default)]
    max: i32,
}

impl ServerStatus {
    /// Parse the JSON document of a Status Response.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawStatus = serde_json::from_str(json)
            .map_err(|e| ProtocolError::Decode(format!("status response: {e}")))?;
        Ok(Self {
            version_name: raw.version.name,
            protocol: raw.version.protocol,
            online: raw.players.online,
            max: raw.players.max,
            description: plain_text(&raw.description),
            forge: raw.forge_data.is_some() || raw.modinfo.is_some(),
        })
    }
}

/// Flatten a chat component to its visible text.
pub fn plain_text(component: &Value) -> String {
    let mut out = String::new();
    collect_text(component, &mut out);
    out
}

fn collect_text(component: &Value, out: &mut String) {
    match component {
        Value::String(s) => out.push_str(s),
        Value::Array(parts) => parts.iter().for_each(|p| collect_text(p, out)),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                out.push_str(text);
            }
            if let Some(extra) = map.get("extra") {
                collect_text(extra, out);
            }
        }
        _ => {}
    }
}

/// Connect, ping and disconnect.
#[instrument(level = "debug")]
pub async fn query_status(host: &str, port: u16, timeout: Duration) -> Result<ServerStatus> {
    let metrics = Arc::new(ProtocolMetrics::new());
    let mut transport = Transport::connect(host, port, timeout, metrics).await?;
    let status = with_timeout_error(request_status(&mut transport, host, port), timeout).await;
    transport.disconnect().await?;
    status
}

/// Status exchange over an already-open transport.
pub async fn request_status<S>(transport: &mut Transport<S>, host: &str, port: u16) -> Result<ServerStatus>
where
    S: AsyncRead + AsyncWrite,
{
    let handshake = encode_handshake(PROBE_PROTOCOL, host, port, login::NEXT_STATE_STATUS);
    transport.write_frame(login::HANDSHAKE, &handshake).await?;
    transport.write_frame(login::STATUS_REQUEST, &[]).await?;

    let frame = transport.read_frame().await?;
    if frame.id != login::STATUS_RESPONSE {
        return Err(ProtocolError::Decode(format!(
            "unexpected status packet 0x{:02X}",
            frame.id
        )));
    }
    let json = frame.reader().read_string()?;
    debug!(len = json.len(), "Status response received");
    let status = ServerStatus::from_json(&json)?;
    info!(
        version = %status.version_name,
        protocol = status.protocol,
        forge = status.forge,
        "Server status"
    );
    Ok(status)
}
