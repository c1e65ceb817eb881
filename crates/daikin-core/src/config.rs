// ── Runtime discovery configuration ──
//
// Built once by the front end and handed to `Discovery`. Core never reads
// config files or flags.

use std::net::SocketAddr;
use std::time::Duration;

/// UDP port the adapters listen on for discovery probes.
pub const DEVICE_PORT: u16 = 30050;
/// Local port the discovery socket binds to.
pub const LOCAL_PORT: u16 = 30000;

/// Configuration for one discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Per-read deadline within a discovery round.
    pub poll_interval: Duration,
    /// Rounds per broadcast target. Zero skips the network entirely.
    pub poll_count: u32,
    /// Only broadcast on the interface with this exact name.
    pub interface: Option<String>,
    /// A known device address. Seeds the registry and disables probing.
    pub address: Option<String>,
    pub bind_addr: SocketAddr,
    pub device_port: u16,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            poll_count: 1,
            interface: None,
            address: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], LOCAL_PORT)),
            device_port: DEVICE_PORT,
        }
    }
}

impl DiscoveryConfig {
    /// Rounds that will actually run: zero when an address is configured.
    pub fn effective_poll_count(&self) -> u32 {
        if self.address.is_some() {
            0
        } else {
            self.poll_count
        }
    }
}
