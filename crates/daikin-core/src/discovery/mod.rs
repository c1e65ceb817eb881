// ── UDP broadcast discovery ──
//
// One socket for the whole run, one poller task per broadcast target.
// Each poller sends the probe, then reads replies until a read times out;
// every reply's sender lands in the shared registry. Bind and interface
// enumeration failures are fatal, per-packet errors are logged and the
// round carries on.

pub mod interfaces;

use std::net::{SocketAddr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use crate::config::DiscoveryConfig;
use crate::error::CoreError;
use crate::registry::Registry;

pub use interfaces::{InterfaceAddr, broadcast_address, broadcast_targets, local_addresses};

/// Probe payload the adapters answer to.
pub const DISCOVERY_PAYLOAD: &[u8] = b"DAIKIN_UDP/common/basic_info";

const RECV_BUFFER: usize = 2048;

// ── DiscoveryState ───────────────────────────────────────────────────

/// Progress of a discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DiscoveryState {
    Idle,
    EnumeratingInterfaces,
    Broadcasting,
    Collecting,
    Done,
    Failed,
}

// ── Discovery ────────────────────────────────────────────────────────

/// A single-use discovery engine.
pub struct Discovery {
    config: DiscoveryConfig,
    state: watch::Sender<DiscoveryState>,
}

impl Discovery {
    pub fn new(config: DiscoveryConfig) -> Self {
        let (state, _) = watch::channel(DiscoveryState::Idle);
        Self { config, state }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Subscribe to state transitions.
    pub fn state(&self) -> watch::Receiver<DiscoveryState> {
        self.state.subscribe()
    }

    fn transition(&self, next: DiscoveryState) {
        debug!(state = %next, "discovery state");
        self.state.send_replace(next);
    }

    fn fail(&self, err: CoreError) -> CoreError {
        self.transition(DiscoveryState::Failed);
        err
    }

    /// Run discovery on the local interfaces and return every device found.
    ///
    /// A configured address is registered up front and skips the network
    /// entirely, as does a poll count of zero.
    pub async fn run(&self) -> Result<Registry, CoreError> {
        let registry = Registry::new();
        if let Some(address) = &self.config.address {
            registry.insert(address.clone());
        }

        if self.config.effective_poll_count() == 0 {
            self.transition(DiscoveryState::Done);
            return Ok(registry);
        }

        self.transition(DiscoveryState::EnumeratingInterfaces);
        let addrs = local_addresses().map_err(|e| self.fail(e))?;
        let targets: Vec<SocketAddrV4> =
            broadcast_targets(&addrs, self.config.interface.as_deref())
                .map_err(|e| self.fail(e))?
                .into_iter()
                .map(|ip| SocketAddrV4::new(ip, self.config.device_port))
                .collect();

        if targets.is_empty() {
            warn!("no broadcast-capable IPv4 interface found");
        }

        self.poll_targets(&registry, &targets).await?;
        Ok(registry)
    }

    /// Probe explicit targets, recording replies in `registry`.
    pub async fn poll_targets(
        &self,
        registry: &Registry,
        targets: &[SocketAddrV4],
    ) -> Result<(), CoreError> {
        let rounds = self.config.effective_poll_count();
        if rounds == 0 {
            self.transition(DiscoveryState::Done);
            return Ok(());
        }

        self.transition(DiscoveryState::Broadcasting);
        let socket = self.bind().await.map_err(|e| self.fail(e))?;

        let mut pollers = JoinSet::new();
        for &target in targets {
            pollers.spawn(poll(
                Arc::clone(&socket),
                registry.clone(),
                target,
                rounds,
                self.config.poll_interval,
            ));
        }

        self.transition(DiscoveryState::Collecting);
        while let Some(joined) = pollers.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "discovery poller aborted");
            }
        }

        debug!(devices = registry.len(), "discovery finished");
        self.transition(DiscoveryState::Done);
        Ok(())
    }

    async fn bind(&self) -> Result<Arc<UdpSocket>, CoreError> {
        let bind_addr = self.config.bind_addr;
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| CoreError::network(format!("binding {bind_addr}"), e))?;
        socket
            .set_broadcast(true)
            .map_err(|e| CoreError::network("enabling broadcast", e))?;
        Ok(Arc::new(socket))
    }
}

/// One poller: `rounds` probe-and-collect cycles against `target`.
async fn poll(
    socket: Arc<UdpSocket>,
    registry: Registry,
    target: SocketAddrV4,
    rounds: u32,
    interval: Duration,
) {
    let mut buf = [0u8; RECV_BUFFER];
    for round in 0..rounds {
        debug!(%target, round, "sending discovery probe");
        if let Err(e) = socket.send_to(DISCOVERY_PAYLOAD, target).await {
            warn!(%target, error = %e, "discovery send failed");
        }

        loop {
            match tokio::time::timeout(interval, socket.recv_from(&mut buf)).await {
                Err(_) => break,
                Ok(Ok((n, from))) => record(&registry, from, n),
                Ok(Err(e)) => warn!(%target, error = %e, "discovery receive failed"),
            }
        }
    }
}

fn record(registry: &Registry, from: SocketAddr, bytes: usize) {
    trace!(sender = %from, bytes, "discovery reply");
    if registry.insert(from.ip().to_string()) {
        debug!(address = %from.ip(), "found device");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_address_short_circuits() {
        let config = DiscoveryConfig {
            address: Some("192.168.1.40".into()),
            ..DiscoveryConfig::default()
        };
        let discovery = Discovery::new(config);
        let state = discovery.state();

        let registry = discovery.run().await.unwrap();

        assert_eq!(registry.addresses(), vec!["192.168.1.40"]);
        assert_eq!(*state.borrow(), DiscoveryState::Done);
    }

    #[tokio::test]
    async fn bind_failure_is_fatal() {
        // TEST-NET-1 is never assigned locally, so the bind must fail.
        let config = DiscoveryConfig {
            bind_addr: "192.0.2.1:1".parse().unwrap(),
            ..DiscoveryConfig::default()
        };
        let discovery = Discovery::new(config);
        let target = SocketAddrV4::new([127, 0, 0, 1].into(), 9);

        let err = discovery
            .poll_targets(&Registry::new(), &[target])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Network { .. }));
        assert_eq!(*discovery.state().borrow(), DiscoveryState::Failed);
    }
}
