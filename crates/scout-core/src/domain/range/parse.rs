//! Line-oriented range list parsing.

use std::net::IpAddr;
use std::str::FromStr;

use super::{Ipv4Range, Ipv6Range};
use crate::domain::{AddressFamily, ScoutError};

/// A parsed range tagged by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressRange {
    /// IPv4 network
    V4(Ipv4Range),
    /// IPv6 network
    V6(Ipv6Range),
}

impl AddressRange {
    /// Family of the range.
    pub fn family(&self) -> AddressFamily {
        match self {
            Self::V4(_) => AddressFamily::V4,
            Self::V6(_) => AddressFamily::V6,
        }
    }

    /// The IPv4 range, if this is one.
    pub fn as_v4(&self) -> Option<Ipv4Range> {
        match self {
            Self::V4(r) => Some(*r),
            Self::V6(_) => None,
        }
    }

    /// The IPv6 range, if this is one.
    pub fn as_v6(&self) -> Option<Ipv6Range> {
        match self {
            Self::V6(r) => Some(*r),
            Self::V4(_) => None,
        }
    }
}

impl FromStr for AddressRange {
    type Err = ScoutError;

    /// Parses `addr/prefix` or a bare address (full-length prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ScoutError::InvalidRange(s.to_string());
        let (addr, prefix) = match s.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix.parse::<u8>().map_err(|_| invalid())?)),
            None => (s, None),
        };
        match addr.parse::<IpAddr>().map_err(|_| invalid())? {
            IpAddr::V4(v4) => Ipv4Range::new(v4, prefix.unwrap_or(32)).map(Self::V4),
            IpAddr::V6(v6) => Ipv6Range::new(v6, prefix.unwrap_or(128)).map(Self::V6),
        }
    }
}

/// Parse a range list: one CIDR per line.
///
/// Blank and unparsable lines are skipped, as are ranges of the other family.
pub fn parse_range_list(text: &str, family: AddressFamily) -> Vec<AddressRange> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.parse::<AddressRange>().ok())
        .filter(|range| range.family() == family)
        .collect()
}
