//! Test doubles for the device side of the keyring: a scripted
//! [`TestWallet`] session and a [`TestTransport`] pairing into it.
//!
//! The wallet derives addresses from a fixed table keyed by the hardened
//! account segment of the requested path, records every request it sees, and
//! exposes toggles for each failure a keyring must surface.

use std::sync::{Arc, Mutex};

use kwk_hwi::protocol::{
    EthGetAddressParams, EthSignMessageParams, EthSignTxParams, EthSignedMessage, EthSignedTx,
};
use kwk_hwi::{EthWallet, Transport, HARDENED};

/// Addresses the scripted device derives for accounts 0..3.
pub const TEST_ADDRESSES: [&str; 3] = [
    "0x3f2329C9ADFbcCd9A84f52c906E936A42dA18CB8",
    "0x70aE29E2d3E00F3146E0e4fB802358eaB9C60B85",
    "0x8eE3F97119189A8e2A5BDF7B22e61E5E1B562E7E",
];

/// Recovery value the scripted device reports for transactions (EIP-155,
/// chain id 1).
pub const TEST_TX_V: u64 = 38;
pub const TEST_TX_R: &str =
    "0x276ca64c57ca53f4cbbd44b9d0b1f010e59709cc0b4e4cd4affca571d73b482f";
pub const TEST_TX_S: &str =
    "0x46de861a53edd5ac1fcbd68fc98bb5c8e9a80cb1801dc7d0a44241e12e0b472d";
pub const TEST_MSG_SIGNATURE: &str =
    "0x13b7b973fe0b1345a56dcdeb1b89d1aeff7d15e4e12c20cee662d0eb9ac33fd32b602b900e15924f4ac4332cf5e5eac9cad3d3f1ed122a0e6fc75a32351f36791c";

#[derive(Debug)]
struct State {
    addresses: Vec<String>,
    supports_eth: bool,
    derive_returns_none: bool,
    sign_returns_none: bool,
    tx_v: u64,
    get_address_calls: Vec<EthGetAddressParams>,
    sign_tx_calls: Vec<EthSignTxParams>,
    sign_message_calls: Vec<EthSignMessageParams>,
}

/// A scripted device session. Clones share state, so a test can keep a
/// handle for assertions after handing a clone to the keyring.
#[derive(Clone, Debug)]
pub struct TestWallet {
    state: Arc<Mutex<State>>,
}

impl Default for TestWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWallet {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                addresses: TEST_ADDRESSES.iter().map(|a| a.to_string()).collect(),
                supports_eth: true,
                derive_returns_none: false,
                sign_returns_none: false,
                tx_v: TEST_TX_V,
                get_address_calls: Vec::new(),
                sign_tx_calls: Vec::new(),
                sign_message_calls: Vec::new(),
            })),
        }
    }

    /// A device without the Ethereum application.
    pub fn without_eth_support(self) -> Self {
        self.state.lock().unwrap().supports_eth = false;
        self
    }

    /// Every derivation round trip completes without an address.
    pub fn failing_derivation(self) -> Self {
        self.state.lock().unwrap().derive_returns_none = true;
        self
    }

    /// Every signing round trip completes without a signature.
    pub fn failing_signing(self) -> Self {
        self.state.lock().unwrap().sign_returns_none = true;
        self
    }

    /// Override the recovery value reported for transactions.
    pub fn with_tx_v(self, v: u64) -> Self {
        self.state.lock().unwrap().tx_v = v;
        self
    }

    pub fn get_address_calls(&self) -> Vec<EthGetAddressParams> {
        self.state.lock().unwrap().get_address_calls.clone()
    }

    pub fn sign_tx_calls(&self) -> Vec<EthSignTxParams> {
        self.state.lock().unwrap().sign_tx_calls.clone()
    }

    pub fn sign_message_calls(&self) -> Vec<EthSignMessageParams> {
        self.state.lock().unwrap().sign_message_calls.clone()
    }

    fn address_for_path(state: &State, address_n_list: &[u32]) -> Option<String> {
        let account = address_n_list.get(2).map(|n| (n & !HARDENED) as usize)?;
        state.addresses.get(account).cloned()
    }
}

impl EthWallet for TestWallet {
    fn supports_eth(&self) -> bool {
        self.state.lock().unwrap().supports_eth
    }

    fn eth_get_address(&self, params: EthGetAddressParams) -> kwk_hwi::Result<Option<String>> {
        let mut state = self.state.lock().unwrap();
        let address = if state.derive_returns_none {
            None
        } else {
            Self::address_for_path(&state, &params.address_n_list)
        };
        state.get_address_calls.push(params);
        Ok(address)
    }

    fn eth_sign_tx(&self, params: EthSignTxParams) -> kwk_hwi::Result<Option<EthSignedTx>> {
        let mut state = self.state.lock().unwrap();
        let signed = if state.sign_returns_none {
            None
        } else {
            Some(EthSignedTx {
                v: state.tx_v,
                r: TEST_TX_R.to_string(),
                s: TEST_TX_S.to_string(),
            })
        };
        state.sign_tx_calls.push(params);
        Ok(signed)
    }

    fn eth_sign_message(
        &self,
        params: EthSignMessageParams,
    ) -> kwk_hwi::Result<Option<EthSignedMessage>> {
        let mut state = self.state.lock().unwrap();
        let signed = if state.sign_returns_none {
            None
        } else {
            Some(EthSignedMessage {
                address: Self::address_for_path(&state, &params.address_n_list)
                    .unwrap_or_default(),
                signature: TEST_MSG_SIGNATURE.to_string(),
            })
        };
        state.sign_message_calls.push(params);
        Ok(signed)
    }
}

/// A transport pairing into clones of a shared [`TestWallet`].
#[derive(Clone, Debug)]
pub struct TestTransport {
    wallet: TestWallet,
    fail_pairing: bool,
}

impl TestTransport {
    pub fn new(wallet: TestWallet) -> Self {
        Self {
            wallet,
            fail_pairing: false,
        }
    }

    /// No device shows up on the bus.
    pub fn failing_pairing(mut self) -> Self {
        self.fail_pairing = true;
        self
    }
}

impl Transport for TestTransport {
    fn pair_device(&self) -> kwk_hwi::Result<Box<dyn EthWallet>> {
        if self.fail_pairing {
            return Err(kwk_hwi::Error::NoDeviceFound);
        }
        Ok(Box::new(self.wallet.clone()))
    }
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
