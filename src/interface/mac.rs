use std::fmt::Display;

use rand::random;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const NULL: MacAddress = MacAddress([0; 6]);
    pub const BROADCAST: MacAddress = MacAddress([0xff; 6]);

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// A random private (locally administered, unicast) address.
    pub fn gen() -> MacAddress {
        let mut mac = random::<[u8; 6]>();
        mac[0] = (mac[0] | 0b0000_0010) & 0b1111_1110;
        MacAddress(mac)
    }

    pub fn is_unspecified(&self) -> bool {
        *self == MacAddress::NULL
    }

    pub fn is_broadcast(&self) -> bool {
        *self == MacAddress::BROADCAST
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(value: [u8; 6]) -> Self {
        MacAddress(value)
    }
}

impl From<MacAddress> for [u8; 6] {
    fn from(value: MacAddress) -> Self {
        value.0
    }
}

impl Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:x}:{:x}:{:x}:{:x}:{:x}:{:x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_is_private_unicast() {
        for _ in 0..64 {
            let mac = MacAddress::gen();
            let first = mac.as_slice()[0];
            assert_eq!(first & 0b01, 0, "unicast bit");
            assert_eq!(first & 0b10, 0b10, "locally administered bit");
            assert!(!mac.is_broadcast());
        }
    }

    #[test]
    fn special_addresses() {
        assert!(MacAddress::NULL.is_unspecified());
        assert!(MacAddress::BROADCAST.is_broadcast());
        assert!(!MacAddress::BROADCAST.is_unspecified());
        assert_eq!(MacAddress::from([0xff; 6]), MacAddress::BROADCAST);
    }
}
