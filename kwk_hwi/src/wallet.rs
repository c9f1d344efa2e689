use crate::protocol::{
    EthGetAddressParams, EthSignMessageParams, EthSignTxParams, EthSignedMessage, EthSignedTx,
};
use crate::Result;

/// An authenticated session with an Ethereum-capable signing device.
///
/// Every method is a blocking round trip: the caller is suspended until the
/// device (and possibly the user, on its screen) responds. Sessions do not
/// support overlapping requests, callers must serialize access themselves.
///
/// `Ok(None)` from a round trip means the device completed the exchange
/// without producing a result, e.g. the user rejected the request on screen.
/// Transport or firmware failures are reported as `Err`.
pub trait EthWallet {
    /// Whether the paired device advertises Ethereum signing support.
    fn supports_eth(&self) -> bool;

    /// Derive the address at the given path.
    fn eth_get_address(&self, params: EthGetAddressParams) -> Result<Option<String>>;

    /// Sign a transaction on the device.
    fn eth_sign_tx(&self, params: EthSignTxParams) -> Result<Option<EthSignedTx>>;

    /// Sign a personal message on the device.
    fn eth_sign_message(&self, params: EthSignMessageParams) -> Result<Option<EthSignedMessage>>;
}

/// Establishes the physical connection and binds it to a session.
pub trait Transport {
    /// Pair with a physically present device and return its session.
    fn pair_device(&self) -> Result<Box<dyn EthWallet>>;
}
