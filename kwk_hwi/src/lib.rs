#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! The device-side interface consumed by the KeepKey keyring.
//!
//! This crate defines the seam between the keyring adapter and the hardware
//! wallet SDK: the [`Transport`] trait pairs a physically present device into
//! an [`EthWallet`] session, the [`protocol`] module carries the request and
//! response shapes of the session's Ethereum methods, and [`path`] converts
//! between bip32 path strings and the `address_n` lists the device expects.
//!
//! Concrete transports (WebUSB, HID) and the on-device protocol live outside
//! this workspace.

pub mod error;
pub mod path;
pub mod protocol;
mod wallet;

pub use error::Error;
pub use path::{address_n_list_to_bip32, bip32_to_address_n_list, HARDENED};
pub use wallet::{EthWallet, Transport};

pub type Result<T> = std::result::Result<T, error::Error>;
