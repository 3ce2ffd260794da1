use std::fmt;
use std::str::FromStr;

/// Length in octets of a hardware address.
pub const ADDR_LEN: usize = 6;

/// The broadcast address, all octets set to `0xFF`.
pub const BROADCAST: Address = Address([0xFF; ADDR_LEN]);

/// A fixed 6-byte hardware address.
///
/// Two addresses are equal iff their octet sequences are byte-identical.
/// The canonical text form is six uppercase two-hex-digit groups joined by
/// single colons, e.g. `AA:BB:CC:DD:EE:FF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; ADDR_LEN]);

impl Address {
    pub fn from_octets(octets: [u8; ADDR_LEN]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; ADDR_LEN] {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

/// Returned when a string does not parse as a colon-hex hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrParseError;

impl fmt::Display for AddrParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hardware address")
    }
}

impl std::error::Error for AddrParseError {}

impl FromStr for Address {
    type Err = AddrParseError;

    /// Parses six colon-separated hex pairs, case-insensitive. This is the
    /// inverse of `Display`, which always renders uppercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; ADDR_LEN];
        let mut groups = s.split(':');

        for slot in octets.iter_mut() {
            let group = groups.next().ok_or(AddrParseError)?;
            if group.len() != 2 {
                return Err(AddrParseError);
            }
            *slot = u8::from_str_radix(group, 16).map_err(|_| AddrParseError)?;
        }

        if groups.next().is_some() {
            return Err(AddrParseError);
        }

        Ok(Address(octets))
    }
}
