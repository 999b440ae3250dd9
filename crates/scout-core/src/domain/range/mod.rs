//! # Address Ranges
//!
//! CIDR ranges as supplied by the range lists, plus the two operations the
//! generator needs from them: expansion into /24 groups (the bandit's arm
//! granularity) and uniform host draws.
//!
//! Parsing is non-strict: host bits set in the input are masked off, so
//! `104.16.3.7/20` denotes `104.16.0.0/20`.

mod ipv4;
mod ipv6;
mod parse;

pub use ipv4::{Ipv4Range, GROUP_PREFIX};
pub use ipv6::Ipv6Range;
pub use parse::{parse_range_list, AddressRange};
