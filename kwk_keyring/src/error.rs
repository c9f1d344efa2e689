/// Possible errors when operating the KeepKey keyring.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation needing a device session ran before [`unlock`] succeeded.
    ///
    /// [`unlock`]: crate::KeepKeyKeyring::unlock
    #[error("not unlocked")]
    NotUnlocked,

    /// The paired device does not advertise Ethereum signing support.
    #[error("wallet instance does not support ETH")]
    UnsupportedDevice,

    /// The caller referenced an address this keyring never derived.
    #[error("no account with provided address: {0}")]
    UnknownAccount(String),

    /// The transaction has no destination; contract creation is not
    /// supported by the device flow.
    #[error("to address expected")]
    MissingRecipient,

    #[error("unable to add account")]
    DerivationFailed,

    #[error("signing failed")]
    SigningFailed,

    /// A transaction field was neither a quantity nor raw bytes.
    #[error("unexpected transaction field shape: {0}")]
    UnexpectedFieldType(String),

    /// Fixed rejection for operations this device has no flow for.
    #[error("Not supported on this device")]
    NotSupported,

    #[error("expected a 0x prefixed hex string: {0}")]
    NotHexPrefixed(String),

    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    Device(#[from] kwk_hwi::Error),
}
