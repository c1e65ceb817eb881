// Local interface enumeration and broadcast target selection.
//
// Selection works on plain `InterfaceAddr` values so it can be exercised
// without touching the host's network configuration.

use std::net::{IpAddr, Ipv4Addr};

use tracing::debug;

use crate::error::CoreError;

/// One address assigned to a local interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub name: String,
    pub up: bool,
    pub broadcast: bool,
    pub multicast: bool,
    pub addr: IpAddr,
    pub netmask: Option<IpAddr>,
}

impl InterfaceAddr {
    fn usable(&self) -> bool {
        self.up && self.broadcast && self.multicast
    }
}

/// Directed broadcast address: every host bit set.
pub fn broadcast_address(addr: Ipv4Addr, netmask: Ipv4Addr) -> Ipv4Addr {
    Ipv4Addr::from(addr.to_bits() | !netmask.to_bits())
}

/// Broadcast addresses to probe, in interface order without duplicates.
///
/// Keeps interfaces that are up with broadcast and multicast enabled and,
/// when `filter` is set, whose name matches it exactly. Only IPv4 addresses
/// with an IPv4 netmask produce a target. A named filter that leaves no
/// target is an error.
pub fn broadcast_targets(
    addrs: &[InterfaceAddr],
    filter: Option<&str>,
) -> Result<Vec<Ipv4Addr>, CoreError> {
    let mut targets = Vec::new();
    let selected = addrs
        .iter()
        .filter(|a| a.usable())
        .filter(|a| filter.is_none_or(|name| a.name == name));

    for iface in selected {
        let IpAddr::V4(addr) = iface.addr else {
            debug!(interface = %iface.name, address = %iface.addr, "skipping non-IPv4 address");
            continue;
        };
        let Some(IpAddr::V4(mask)) = iface.netmask else {
            debug!(interface = %iface.name, address = %iface.addr, "skipping address without IPv4 netmask");
            continue;
        };
        let target = broadcast_address(addr, mask);
        if !targets.contains(&target) {
            debug!(interface = %iface.name, %target, "broadcast target");
            targets.push(target);
        }
    }

    if let Some(name) = filter {
        if targets.is_empty() {
            return Err(CoreError::NoSuchInterface {
                name: name.to_owned(),
            });
        }
    }
    Ok(targets)
}

/// Enumerate the host's interface addresses.
#[cfg(unix)]
pub fn local_addresses() -> Result<Vec<InterfaceAddr>, CoreError> {
    use nix::ifaddrs::getifaddrs;
    use nix::net::if_::InterfaceFlags;
    use nix::sys::socket::SockaddrStorage;

    fn ip_of(storage: &SockaddrStorage) -> Option<IpAddr> {
        if let Some(v4) = storage.as_sockaddr_in() {
            return Some(IpAddr::V4(v4.ip()));
        }
        storage.as_sockaddr_in6().map(|v6| IpAddr::V6(v6.ip()))
    }

    let ifaddrs = getifaddrs()
        .map_err(|e| CoreError::network("enumerating interfaces", e.into()))?;

    Ok(ifaddrs
        .filter_map(|ifa| {
            let addr = ifa.address.as_ref().and_then(ip_of)?;
            Some(InterfaceAddr {
                addr,
                netmask: ifa.netmask.as_ref().and_then(ip_of),
                up: ifa.flags.contains(InterfaceFlags::IFF_UP),
                broadcast: ifa.flags.contains(InterfaceFlags::IFF_BROADCAST),
                multicast: ifa.flags.contains(InterfaceFlags::IFF_MULTICAST),
                name: ifa.interface_name,
            })
        })
        .collect())
}

#[cfg(not(unix))]
pub fn local_addresses() -> Result<Vec<InterfaceAddr>, CoreError> {
    Err(CoreError::network(
        "enumerating interfaces",
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "interface enumeration is only available on unix",
        ),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn iface(name: &str, addr: &str, mask: &str) -> InterfaceAddr {
        InterfaceAddr {
            name: name.into(),
            up: true,
            broadcast: true,
            multicast: true,
            addr: addr.parse().unwrap(),
            netmask: Some(mask.parse().unwrap()),
        }
    }

    #[test]
    fn broadcast_of_slash_24() {
        assert_eq!(
            broadcast_address(Ipv4Addr::new(192, 168, 1, 10), Ipv4Addr::new(255, 255, 255, 0)),
            Ipv4Addr::new(192, 168, 1, 255)
        );
    }

    #[test]
    fn broadcast_of_odd_masks() {
        assert_eq!(
            broadcast_address(Ipv4Addr::new(10, 1, 2, 3), Ipv4Addr::new(255, 0, 0, 0)),
            Ipv4Addr::new(10, 255, 255, 255)
        );
        assert_eq!(
            broadcast_address(Ipv4Addr::new(172, 16, 5, 130), Ipv4Addr::new(255, 255, 255, 192)),
            Ipv4Addr::new(172, 16, 5, 191)
        );
    }

    #[test]
    fn single_interface_yields_its_broadcast() {
        let addrs = [iface("eth0", "192.168.1.10", "255.255.255.0")];
        assert_eq!(
            broadcast_targets(&addrs, None).unwrap(),
            vec![Ipv4Addr::new(192, 168, 1, 255)]
        );
    }

    #[test]
    fn skips_interfaces_missing_flags() {
        let mut down = iface("eth1", "10.0.0.5", "255.255.255.0");
        down.up = false;
        let mut loopback = iface("lo", "127.0.0.1", "255.0.0.0");
        loopback.broadcast = false;
        loopback.multicast = false;
        let mut no_mcast = iface("tun0", "10.8.0.2", "255.255.255.0");
        no_mcast.multicast = false;

        let addrs = [down, loopback, no_mcast, iface("eth0", "192.168.1.10", "255.255.255.0")];
        assert_eq!(
            broadcast_targets(&addrs, None).unwrap(),
            vec![Ipv4Addr::new(192, 168, 1, 255)]
        );
    }

    #[test]
    fn skips_ipv6_and_deduplicates() {
        let addrs = [
            iface("eth0", "192.168.1.10", "255.255.255.0"),
            iface("eth0", "fe80::1", "ffff:ffff:ffff:ffff::"),
            iface("eth0", "192.168.1.11", "255.255.255.0"),
        ];
        assert_eq!(
            broadcast_targets(&addrs, None).unwrap(),
            vec![Ipv4Addr::new(192, 168, 1, 255)]
        );
    }

    #[test]
    fn filter_matches_exact_name() {
        let addrs = [
            iface("eth0", "192.168.1.10", "255.255.255.0"),
            iface("eth0.5", "192.168.5.10", "255.255.255.0"),
        ];
        assert_eq!(
            broadcast_targets(&addrs, Some("eth0")).unwrap(),
            vec![Ipv4Addr::new(192, 168, 1, 255)]
        );
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let addrs = [iface("eth0", "192.168.1.10", "255.255.255.0")];
        let err = broadcast_targets(&addrs, Some("wlan0")).unwrap_err();
        assert!(matches!(err, CoreError::NoSuchInterface { ref name } if name == "wlan0"));
    }

    #[test]
    fn filter_on_ipv6_only_interface_is_an_error() {
        let addrs = [
            iface("eth0", "fe80::1", "ffff:ffff:ffff:ffff::"),
            iface("eth1", "192.168.1.10", "255.255.255.0"),
        ];
        let err = broadcast_targets(&addrs, Some("eth0")).unwrap_err();
        assert!(matches!(err, CoreError::NoSuchInterface { ref name } if name == "eth0"));
    }

    #[test]
    fn filter_on_address_without_netmask_is_an_error() {
        let mut bare = iface("eth0", "192.168.1.10", "255.255.255.0");
        bare.netmask = None;
        let err = broadcast_targets(&[bare], Some("eth0")).unwrap_err();
        assert!(matches!(err, CoreError::NoSuchInterface { .. }));
    }

    #[test]
    fn unfiltered_ipv6_only_host_is_empty() {
        let addrs = [iface("eth0", "fe80::1", "ffff:ffff:ffff:ffff::")];
        assert!(broadcast_targets(&addrs, None).unwrap().is_empty());
    }

    #[test]
    fn no_filter_and_no_interfaces_is_empty() {
        assert!(broadcast_targets(&[], None).unwrap().is_empty());
    }
}
