use kwk_hwi::protocol::{EthGetAddressParams, EthSignMessageParams, EthSignTxParams};
use kwk_hwi::{address_n_list_to_bip32, bip32_to_address_n_list, EthWallet, Transport};

use crate::transaction::{TxSignature, UnsignedTx};
use crate::{Error, Result};

/// Keyring adapter exposing a KeepKey device to a wallet application.
///
/// The adapter owns at most one device session, acquired by [`unlock`] and
/// kept for the lifetime of the instance, and an append-only list of derived
/// account addresses whose position in the list is the account's derivation
/// index. Construct one instance per logical wallet connection.
///
/// [`unlock`]: KeepKeyKeyring::unlock
pub struct KeepKeyKeyring {
    transport: Box<dyn Transport>,
    wallet: Option<Box<dyn EthWallet>>,
    accounts: Vec<String>,
}

impl core::fmt::Debug for KeepKeyKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KeepKeyKeyring(unlocked={}, accounts={})",
            self.is_unlocked(),
            self.accounts.len()
        )
    }
}

impl KeepKeyKeyring {
    /// Keyring type identifier the wallet app registers this adapter under.
    pub const TYPE: &'static str = "KeepKey Hardware";

    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            wallet: None,
            accounts: Vec::new(),
        }
    }

    /// Construct restoring previously serialized keyring state.
    ///
    /// Hardware keyrings persist nothing, so the state is accepted and
    /// discarded.
    pub fn with_state(transport: Box<dyn Transport>, state: serde_json::Value) -> Self {
        let mut keyring = Self::new(transport);
        keyring.deserialize(state);
        keyring
    }

    pub fn is_unlocked(&self) -> bool {
        self.wallet.is_some()
    }

    /// Pair with a physically present device and derive the first account,
    /// returning its address.
    ///
    /// Idempotent: an already unlocked keyring reports `"already unlocked"`
    /// without touching the device.
    pub fn unlock(&mut self) -> Result<String> {
        if self.is_unlocked() {
            return Ok("already unlocked".to_string());
        }

        let wallet = self.transport.pair_device()?;
        if !wallet.supports_eth() {
            return Err(Error::UnsupportedDevice);
        }
        self.wallet = Some(wallet);

        self.add_account()
    }

    /// The fixed derivation template with only the account segment varying:
    /// `m/44'/60'/{index}'/0/0`.
    pub fn address_n_list_for_account_index(index: u32) -> Vec<u32> {
        bip32_to_address_n_list(&format!("m/44'/60'/{index}'/0/0")).expect("static template")
    }

    /// Derive the next account on the device and append its address.
    pub fn add_account(&mut self) -> Result<String> {
        let wallet = self.wallet.as_ref().ok_or(Error::NotUnlocked)?;

        let index = self.accounts.len() as u32;
        let address_n_list = Self::address_n_list_for_account_index(index);
        tracing::debug!(
            "deriving account {index} at {}",
            address_n_list_to_bip32(&address_n_list)
        );
        let address = wallet
            .eth_get_address(EthGetAddressParams {
                address_n_list,
                show_display: None,
            })?
            .ok_or(Error::DerivationFailed)?;
        self.accounts.push(address.clone());
        Ok(address)
    }

    /// Derive `n` fresh accounts, one blocking device round trip at a time.
    ///
    /// A failure aborts the remaining derivations; accounts already added
    /// stay in the list.
    pub fn add_accounts(&mut self, n: usize) -> Result<Vec<String>> {
        let mut added = Vec::with_capacity(n);
        for _ in 0..n {
            added.push(self.add_account()?);
        }
        Ok(added)
    }

    /// Snapshot of the derived addresses, in derivation order.
    pub fn get_accounts(&self) -> Vec<String> {
        self.accounts.clone()
    }

    fn account_index(&self, with_account: &str) -> Result<u32> {
        self.accounts
            .iter()
            .position(|account| account == with_account)
            .map(|index| index as u32)
            .ok_or_else(|| Error::UnknownAccount(with_account.to_string()))
    }

    /// Sign a transaction on the device with the key behind `with_account`.
    ///
    /// Field values are normalized to canonical hex before the round trip;
    /// the device's raw signature parts come back reassembled as the
    /// byte-buffer triple the wallet app expects.
    pub fn sign_transaction(&self, with_account: &str, tx: &UnsignedTx) -> Result<TxSignature> {
        let wallet = self.wallet.as_ref().ok_or(Error::NotUnlocked)?;
        let account_index = self.account_index(with_account)?;
        let to = tx.to.ok_or(Error::MissingRecipient)?;

        let params = EthSignTxParams {
            address_n_list: Self::address_n_list_for_account_index(account_index),
            chain_id: tx.chain_id,
            nonce: tx.nonce.normalize()?,
            to: format!("{to:#x}"),
            value: tx.value.normalize()?,
            data: tx.data.normalize()?,
            gas_limit: tx.gas_limit.normalize()?,
            gas_price: tx.gas_price.normalize()?,
        };
        tracing::debug!(
            "signing transaction for {with_account} on chain {}",
            tx.chain_id
        );
        let signed = wallet.eth_sign_tx(params)?.ok_or(Error::SigningFailed)?;

        Ok(TxSignature {
            // the wallet app convention wants the low byte of the device's
            // recovery value
            v: vec![signed.v as u8],
            r: hex_to_bytes(&signed.r)?,
            s: hex_to_bytes(&signed.s)?,
        })
    }

    /// Alias of [`sign_personal_message`](KeepKeyKeyring::sign_personal_message).
    pub fn sign_message(&self, with_account: &str, msg_hex: &str) -> Result<String> {
        self.sign_personal_message(with_account, msg_hex)
    }

    /// Sign a personal message on the device.
    ///
    /// `msg_hex` is the `0x` prefixed hex encoding of the message bytes; the
    /// bytes are reinterpreted as UTF-8 text so the device can show them on
    /// screen. Returns the device's signature string verbatim.
    pub fn sign_personal_message(&self, with_account: &str, msg_hex: &str) -> Result<String> {
        let wallet = self.wallet.as_ref().ok_or(Error::NotUnlocked)?;
        let account_index = self.account_index(with_account)?;

        let message = String::from_utf8_lossy(&hex_to_bytes(msg_hex)?).into_owned();
        tracing::debug!("signing personal message for {with_account}");
        let signed = wallet
            .eth_sign_message(EthSignMessageParams {
                address_n_list: Self::address_n_list_for_account_index(account_index),
                message,
            })?
            .ok_or(Error::SigningFailed)?;

        Ok(signed.signature)
    }

    // Operations below have no device flow: they fail without any device
    // interaction, whatever the lock state.

    pub fn decrypt_message(
        &self,
        _with_account: &str,
        _encrypted_data: &serde_json::Value,
    ) -> Result<String> {
        Err(Error::NotSupported)
    }

    pub fn sign_typed_data(
        &self,
        _with_account: &str,
        _typed_data: &serde_json::Value,
    ) -> Result<String> {
        Err(Error::NotSupported)
    }

    pub fn get_encryption_public_key(&self, _with_account: &str) -> Result<String> {
        Err(Error::NotSupported)
    }

    pub fn get_app_key_address(&self, _with_account: &str, _origin: &str) -> Result<String> {
        Err(Error::NotSupported)
    }

    pub fn export_account(&self, _with_account: &str) -> Result<String> {
        Err(Error::NotSupported)
    }

    pub fn remove_account(&mut self, _with_account: &str) -> Result<()> {
        Err(Error::NotSupported)
    }

    pub fn forget_device(&mut self) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Persistence hook of the keyring interface. Hardware keyrings keep no
    /// secret material on the host, so the state is an empty object.
    pub fn serialize(&self) -> serde_json::Value {
        serde_json::json!({})
    }

    /// Counterpart of [`serialize`](KeepKeyKeyring::serialize): accepts and
    /// discards previous state.
    pub fn deserialize(&mut self, _state: serde_json::Value) {}
}

/// Decode a `0x` prefixed hex string into bytes.
fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    let stripped = hex_str
        .strip_prefix("0x")
        .ok_or_else(|| Error::NotHexPrefixed(hex_str.to_string()))?;
    Ok(hex::decode(stripped)?)
}
