//! Request and response shapes of the device session's Ethereum methods.
//!
//! Field naming follows the SDK's wire format (camelCase), so a serialized
//! request matches what the transport puts on the wire byte for byte.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EthGetAddressParams {
    pub address_n_list: Vec<u32>,

    /// Ask the device to also show the address on its screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_display: Option<bool>,
}

/// An Ethereum transaction ready for on-device signing: every value field is
/// already a canonical `0x` prefixed hex string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EthSignTxParams {
    pub address_n_list: Vec<u32>,
    pub chain_id: u64,
    pub nonce: String,
    pub to: String,
    pub value: String,
    pub data: String,
    pub gas_limit: String,
    pub gas_price: String,
}

/// Raw signature parts as the device reports them. `r` and `s` are `0x`
/// prefixed hex strings, `v` is the full recovery value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthSignedTx {
    pub v: u64,
    pub r: String,
    pub s: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EthSignMessageParams {
    pub address_n_list: Vec<u32>,

    /// The message text, as the user should see it on the device screen.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthSignedMessage {
    pub address: String,
    pub signature: String,
}
