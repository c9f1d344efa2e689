#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod error;
mod keyring;
mod transaction;

pub use error::Error;
pub use keyring::KeepKeyKeyring;
pub use transaction::{TxField, TxSignature, UnsignedTx};

pub type Result<T> = std::result::Result<T, Error>;
