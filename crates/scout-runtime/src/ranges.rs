//! # Range Lists
//!
//! `ipv4.txt` / `ipv6.txt` in the work directory, one CIDR per line. A
//! missing list is downloaded once from the published source; a failed
//! download leaves that family empty.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use scout_core::{parse_range_list, AddressFamily, AddressRange, Ipv4Range, Ipv6Range};

/// Published IPv4 range list
pub const IPV4_LIST_URL: &str = "https://www.cloudflare.com/ips-v4/";
/// Published IPv6 range list
pub const IPV6_LIST_URL: &str = "https://www.cloudflare.com/ips-v6/";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Which families to probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Ipv6Mode {
    /// IPv4 only
    #[default]
    #[value(skip)]
    Off,
    /// IPv4 and IPv6
    Both,
    /// IPv6 only
    Only,
}

impl Ipv6Mode {
    /// The command-line choice wins; otherwise `ipv6_enabled` means `Both`.
    pub fn resolve(flag: Option<Self>, ipv6_enabled: bool) -> Self {
        match flag {
            Some(mode) => mode,
            None if ipv6_enabled => Self::Both,
            None => Self::Off,
        }
    }

    pub fn wants_v4(self) -> bool {
        self != Self::Only
    }

    pub fn wants_v6(self) -> bool {
        self != Self::Off
    }
}

/// Ranges selected for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSet {
    pub v4: Vec<Ipv4Range>,
    pub v6: Vec<Ipv6Range>,
}

impl RangeSet {
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

/// Load a range list; a missing or unreadable file yields no ranges.
pub fn load_ranges(path: &Path, family: AddressFamily) -> Vec<AddressRange> {
    match fs::read_to_string(path) {
        Ok(text) => parse_range_list(&text, family),
        Err(_) => Vec::new(),
    }
}

/// Download `url` into `path` unless the file already exists.
///
/// Returns whether the file exists afterwards.
pub async fn fetch_if_missing(url: &str, path: &Path) -> bool {
    if path.exists() {
        return true;
    }
    info!("[ranges] {} missing, fetching {}", path.display(), url);
    match fetch(url).await {
        Ok(body) => match fs::write(path, body) {
            Ok(()) => true,
            Err(e) => {
                warn!("[ranges] Failed to write {}: {}", path.display(), e);
                false
            }
        },
        Err(e) => {
            warn!("[ranges] Failed to fetch {}: {}", url, e);
            false
        }
    }
}

async fn fetch(url: &str) -> Result<String, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("edge-scout/", env!("CARGO_PKG_VERSION")))
        .build()?;
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Fetch any missing list the mode needs, then load the selected families.
pub async fn prepare_ranges(v4_path: &Path, v6_path: &Path, mode: Ipv6Mode) -> RangeSet {
    let mut ranges = RangeSet::default();

    if mode.wants_v4() {
        fetch_if_missing(IPV4_LIST_URL, v4_path).await;
        ranges.v4 = load_ranges(v4_path, AddressFamily::V4)
            .iter()
            .filter_map(AddressRange::as_v4)
            .collect();
    }
    if mode.wants_v6() {
        fetch_if_missing(IPV6_LIST_URL, v6_path).await;
        ranges.v6 = load_ranges(v6_path, AddressFamily::V6)
            .iter()
            .filter_map(AddressRange::as_v6)
            .collect();
    }

    info!(
        "[ranges] Loaded {} IPv4 and {} IPv6 ranges",
        ranges.v4.len(),
        ranges.v6.len()
    );
    ranges
}
