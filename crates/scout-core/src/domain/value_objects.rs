//! Value objects shared across the domain.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Address family of a range or candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl AddressFamily {
    /// Family of a concrete address.
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Identifier of a bandit arm: the base address of an IPv4 /24 network.
///
/// Rendered as a dotted quad ending in `.0`, which is also the key used in
/// the persisted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(Ipv4Addr);

impl GroupId {
    /// Group containing an IPv4 address.
    pub fn of_v4(addr: Ipv4Addr) -> Self {
        Self(Ipv4Addr::from(u32::from(addr) & 0xFFFF_FF00))
    }

    /// Group containing an address. IPv6 addresses have no group.
    pub fn of(addr: &IpAddr) -> Option<Self> {
        match addr {
            IpAddr::V4(v4) => Some(Self::of_v4(*v4)),
            IpAddr::V6(_) => None,
        }
    }

    /// Base address of the /24.
    pub fn base(&self) -> Ipv4Addr {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = std::net::AddrParseError;

    /// Parses any IPv4 address and normalizes it to its /24 base.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Ipv4Addr>().map(Self::of_v4)
    }
}
