//! Bip32 path conversions.
//!
//! The device SDK addresses keys by `address_n` lists: one `u32` per path
//! segment, with the high bit marking hardened derivation.

use crate::Error;

/// High bit marking a hardened path segment.
pub const HARDENED: u32 = 0x8000_0000;

/// Parse a bip32 path string like `m/44'/60'/0'/0/0` into the `address_n`
/// list the device expects. Both `'` and `h` mark hardened segments.
pub fn bip32_to_address_n_list(path: &str) -> Result<Vec<u32>, Error> {
    let mut segments = path.split('/');
    if segments.next() != Some("m") {
        return Err(Error::InvalidPath(path.to_string()));
    }
    let mut address_n_list = Vec::new();
    for segment in segments {
        let (digits, hardened) = match segment
            .strip_suffix('\'')
            .or_else(|| segment.strip_suffix('h'))
        {
            Some(digits) => (digits, true),
            None => (segment, false),
        };
        let index: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidPath(path.to_string()))?;
        if index >= HARDENED {
            return Err(Error::InvalidPath(path.to_string()));
        }
        address_n_list.push(if hardened { index | HARDENED } else { index });
    }
    Ok(address_n_list)
}

/// Render an `address_n` list back to the string form, for logs and errors.
pub fn address_n_list_to_bip32(address_n_list: &[u32]) -> String {
    use std::fmt::Write;

    let mut path = String::from("m");
    for n in address_n_list {
        if n & HARDENED != 0 {
            let _ = write!(path, "/{}'", n & !HARDENED);
        } else {
            let _ = write!(path, "/{n}");
        }
    }
    path
}
