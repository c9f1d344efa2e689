//! Caller-side transaction shapes, as the wallet app hands them over.

use ethereum_types::{Address, U256};
use serde::Deserialize;
use serde_bytes::ByteBuf;

use crate::Error;

/// An unsigned legacy Ethereum transaction.
///
/// Numeric and payload fields keep the loose shape the wallet app produces
/// ([`TxField`]); they are normalized to canonical hex strings just before
/// the device round trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTx {
    pub chain_id: u64,

    /// Recipient. `None` would be a contract creation, which the device
    /// flow does not support.
    #[serde(default)]
    pub to: Option<Address>,

    pub nonce: TxField,
    pub value: TxField,
    pub data: TxField,
    pub gas_limit: TxField,
    pub gas_price: TxField,
}

/// A single transaction field: a big endian quantity, a raw byte payload, or
/// whatever else an upstream wallet component handed over. Only the first
/// two shapes survive normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TxField {
    Quantity(U256),
    Data(ByteBuf),
    Other(serde_json::Value),
}

impl TxField {
    /// Canonical hex rendering sent to the device: quantities as minimal
    /// `0x` hex (`0x0` for zero), bytes as full even-length `0x` hex (`0x`
    /// for empty).
    pub(crate) fn normalize(&self) -> Result<String, Error> {
        match self {
            TxField::Quantity(quantity) => Ok(format!("0x{quantity:x}")),
            TxField::Data(bytes) => Ok(format!("0x{}", hex::encode(bytes))),
            TxField::Other(value) => Err(Error::UnexpectedFieldType(value.to_string())),
        }
    }
}

impl From<U256> for TxField {
    fn from(quantity: U256) -> Self {
        TxField::Quantity(quantity)
    }
}

impl From<u64> for TxField {
    fn from(quantity: u64) -> Self {
        TxField::Quantity(U256::from(quantity))
    }
}

impl From<Vec<u8>> for TxField {
    fn from(bytes: Vec<u8>) -> Self {
        TxField::Data(ByteBuf::from(bytes))
    }
}

/// The `v`/`r`/`s` triple in the byte buffer convention the wallet app's
/// transaction machinery expects: `v` a single byte, `r` and `s` big endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSignature {
    pub v: Vec<u8>,
    pub r: Vec<u8>,
    pub s: Vec<u8>,
}
