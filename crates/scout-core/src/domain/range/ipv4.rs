//! IPv4 CIDR ranges.

use std::fmt;
use std::net::Ipv4Addr;

use rand::Rng;

use crate::domain::{GroupId, ScoutError};

/// Prefix length of a bandit group.
pub const GROUP_PREFIX: u8 = 24;

/// An IPv4 network in CIDR form. The base never has host bits set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    base: u32,
    prefix: u8,
}

impl Ipv4Range {
    /// Create a range, masking host bits off `addr`.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, ScoutError> {
        if prefix > 32 {
            return Err(ScoutError::InvalidRange(format!("{}/{}", addr, prefix)));
        }
        Ok(Self {
            base: u32::from(addr) & mask(prefix),
            prefix,
        })
    }

    /// Network address.
    pub fn base(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base)
    }

    /// Prefix length.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Number of addresses covered, network and broadcast included.
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// Number of distinct addresses `random_host` can return.
    pub fn host_count(&self) -> u64 {
        let size = self.size();
        if size > 2 {
            size - 2
        } else {
            size
        }
    }

    /// Whether `addr` lies inside this range.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & mask(self.prefix) == self.base
    }

    /// The bandit group this range is scored as.
    ///
    /// Ranges narrower than /24 share the id of their enclosing /24, which
    /// is the key outcomes for their addresses are recorded under.
    pub fn group_id(&self) -> GroupId {
        GroupId::of_v4(self.base())
    }

    /// Split into /24 groups. Ranges already /24 or narrower stay whole.
    pub fn groups(&self) -> impl Iterator<Item = Ipv4Range> + '_ {
        let (count, prefix) = if self.prefix < GROUP_PREFIX {
            (1u32 << (GROUP_PREFIX - self.prefix), GROUP_PREFIX)
        } else {
            (1, self.prefix)
        };
        (0..count).map(move |i| Ipv4Range {
            base: self.base + (i << (32 - u32::from(prefix))),
            prefix,
        })
    }

    /// Address at `offset` from the base. `offset` must be below `size()`.
    pub fn host(&self, offset: u64) -> Ipv4Addr {
        Ipv4Addr::from(self.base.wrapping_add(offset as u32))
    }

    /// Offsets eligible for host draws: `(first, last)` inclusive.
    ///
    /// Network and broadcast offsets are skipped when the range has more
    /// than two addresses.
    pub fn host_offsets(&self) -> (u64, u64) {
        let size = self.size();
        if size > 2 {
            (1, size - 2)
        } else {
            (0, size - 1)
        }
    }

    /// Uniformly random usable host.
    pub fn random_host<R: Rng + ?Sized>(&self, rng: &mut R) -> Ipv4Addr {
        let (first, last) = self.host_offsets();
        self.host(rng.gen_range(first..=last))
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base(), self.prefix)
    }
}

fn mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}
