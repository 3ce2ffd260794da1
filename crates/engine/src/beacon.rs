use crate::addr::{Address, ADDR_LEN, BROADCAST};

/// Wire length in octets of a beacon frame.
pub const BEACON_LEN: usize = 2 * ADDR_LEN + 2;

/// The beacon protocol type, transmitted in network byte order.
pub const BEACON_TYPE: u16 = 0x3900;

/// The 14-octet link-layer broadcast frame advertising a peer's presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beacon {
    pub target: Address,
    pub source: Address,
}

impl Beacon {
    /// A beacon addressed to the broadcast address from `source`.
    pub fn from_source(source: Address) -> Self {
        Self {
            target: BROADCAST,
            source,
        }
    }

    pub fn encode(&self) -> [u8; BEACON_LEN] {
        let mut frame = [0u8; BEACON_LEN];
        frame[0..6].copy_from_slice(&self.target.octets());
        frame[6..12].copy_from_slice(&self.source.octets());
        frame[12..14].copy_from_slice(&BEACON_TYPE.to_be_bytes());
        frame
    }

    /// Decodes a frame, returning `None` if its protocol type field does not
    /// match the beacon type; such frames are ignored by the receiver.
    pub fn decode(frame: &[u8; BEACON_LEN]) -> Option<Self> {
        let protocol = u16::from_be_bytes([frame[12], frame[13]]);
        if protocol != BEACON_TYPE {
            return None;
        }

        let mut target = [0u8; ADDR_LEN];
        target.copy_from_slice(&frame[0..6]);

        let mut source = [0u8; ADDR_LEN];
        source.copy_from_slice(&frame[6..12]);

        Some(Beacon {
            target: Address::from_octets(target),
            source: Address::from_octets(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_lays_out_wire_format_exactly() {
        let source = Address::from_octets([1, 2, 3, 4, 5, 6]);
        let beacon = Beacon::from_source(source);
        let frame = beacon.encode();

        assert_eq!(&frame[0..6], &[0xFF; 6]);
        assert_eq!(&frame[6..12], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&frame[12..14], &0x3900u16.to_be_bytes());
    }

    #[test]
    fn decode_rejects_foreign_protocol_types() {
        let mut frame = Beacon::from_source(Address::default()).encode();
        frame[12..14].copy_from_slice(&0x0800u16.to_be_bytes());
        assert_eq!(Beacon::decode(&frame), None);
    }

    #[test]
    fn decode_accepts_its_own_encoding() {
        let beacon = Beacon::from_source(Address::from_octets([0xaa; 6]));
        let frame = beacon.encode();
        assert_eq!(Beacon::decode(&frame), Some(beacon));
    }
}
