//! IPv6 CIDR ranges. IPv6 is sampled, never grouped or scored.

use std::fmt;
use std::net::Ipv6Addr;

use rand::Rng;

use crate::domain::ScoutError;

/// Largest host offset drawn inside an IPv6 range.
pub const MAX_V6_OFFSET: u128 = 1 << 16;

/// An IPv6 network in CIDR form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Range {
    base: u128,
    prefix: u8,
}

impl Ipv6Range {
    /// Create a range, masking host bits off `addr`.
    pub fn new(addr: Ipv6Addr, prefix: u8) -> Result<Self, ScoutError> {
        if prefix > 128 {
            return Err(ScoutError::InvalidRange(format!("{}/{}", addr, prefix)));
        }
        let mask = if prefix == 0 {
            0
        } else {
            u128::MAX << (128 - u32::from(prefix))
        };
        Ok(Self {
            base: u128::from(addr) & mask,
            prefix,
        })
    }

    /// Network address.
    pub fn base(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.base)
    }

    /// Prefix length.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Largest offset a draw may use: `min(2^16, size - 1)`.
    pub fn max_offset(&self) -> u128 {
        let host_bits = 128 - u32::from(self.prefix);
        if host_bits >= 17 {
            MAX_V6_OFFSET
        } else {
            ((1u128 << host_bits) - 1).min(MAX_V6_OFFSET)
        }
    }

    /// Random address at offset `[1, max_offset]` from the base.
    ///
    /// A /128 only has its base address.
    pub fn random_host<R: Rng + ?Sized>(&self, rng: &mut R) -> Ipv6Addr {
        let max = self.max_offset();
        if max == 0 {
            return self.base();
        }
        Ipv6Addr::from(self.base + rng.gen_range(1..=max))
    }

    /// Whether `addr` lies inside this range.
    pub fn contains(&self, addr: Ipv6Addr) -> bool {
        Ipv6Range::new(addr, self.prefix)
            .map(|r| r.base == self.base)
            .unwrap_or(false)
    }
}

impl fmt::Display for Ipv6Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base(), self.prefix)
    }
}
