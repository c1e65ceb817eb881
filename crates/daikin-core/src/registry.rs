// ── Device registry ──
//
// Address-keyed set of discovered devices, shared by every discovery
// poller. Entries are only ever added; re-observing an address is a no-op.

use std::sync::Arc;

use daikin_api::Device;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Concurrent, append-only map from device address to its record.
///
/// Cheaply cloneable; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    devices: Arc<DashMap<String, Device>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `address`. Returns `true` if it was not known yet.
    pub fn insert(&self, address: impl Into<String>) -> bool {
        match self.devices.entry(address.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let device = Device::new(slot.key().clone());
                slot.insert(device);
                true
            }
        }
    }

    pub fn contains(&self, address: &str) -> bool {
        self.devices.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Known addresses, sorted.
    pub fn addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.devices.iter().map(|e| e.key().clone()).collect();
        addresses.sort();
        addresses
    }

    /// Take the device records out of the registry, sorted by address.
    ///
    /// Records are moved when this is the last handle and cloned otherwise.
    pub fn into_devices(self) -> Vec<Device> {
        let mut devices: Vec<Device> = match Arc::try_unwrap(self.devices) {
            Ok(map) => map.into_iter().map(|(_, device)| device).collect(),
            Err(shared) => shared.iter().map(|e| e.value().clone()).collect(),
        };
        devices.sort_by(|a, b| a.address.cmp(&b.address));
        devices
    }
}
