use std::fmt::{Display, Formatter};

use serde_derive::{Deserialize, Serialize};

/// Radio parameters understood by the daemon's `/config/set` endpoint.
///
/// Each field name is the key the daemon maps onto the matching modem AT command,
/// so this struct serializes directly into the request body. Unset fields are
/// omitted so only the parameters being changed are sent.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct RadioConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_session_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_session_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_eui: Option<String>,
    /// 0: disabled, 1: enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adaptive_data_rate: Option<u8>,
    /// 0 - 5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmit_power: Option<u8>,
    /// 0 - 7
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rate: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx2_frequency: Option<u32>,
    /// 0 - 7
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx2_data_rate: Option<u8>,
    /// Delay between end of tx and rx window 1, in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx1_delay: Option<u32>,
    /// Delay between end of tx and rx window 2, in ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx2_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join1_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join2_delay: Option<u32>,
    /// 0: ABP, 1: OTA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_join_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
    /// 0: unconfirmed uplinks, 1: confirmed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_mode: Option<u8>,
}

/// Body of a `/send` or `/sendb` request. For `/sendb` the `data` field carries
/// hex-encoded bytes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Uplink {
    pub data: String,
    pub port: u16,
}

impl Display for Uplink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' on port {}", self.data, self.port)
    }
}

/// The daemon answers every accepted request with a JSON array of the trimmed
/// response lines it read back from the modem.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct CommandReply {
    pub lines: Vec<String>,
}

impl CommandReply {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Display for CommandReply {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "\t{line}")?;
        }
        Ok(())
    }
}
