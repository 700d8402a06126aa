//! # Address
//!
//! 20-byte account/contract identifier.
//!
//! The all-zero address doubles as the "empty" sentinel in sorted-collection
//! hints: it means "no neighbor on this side".

use serde::{Deserialize, Serialize};
use std::fmt;

/// 20-byte account or contract address.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address, used as the empty-neighbor sentinel.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Whether this is the zero/empty sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Construct an address whose last byte is `b` (test helper, but useful
    /// for deterministic fixtures anywhere).
    #[must_use]
    pub fn from_low_byte(b: u8) -> Self {
        let mut bytes = [0u8; 20];
        bytes[19] = b;
        Address(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}
