use std::collections::BTreeMap;

use crate::error::HostlistError;
use crate::hostlist::HostSet;

use super::format::{DeviceResult, SCM_NOT_FOUND};
use super::types::{sorted_hosts, HostResultMap};

/// Hosts and devices that produced one result text.
#[derive(Debug, Clone, Default)]
pub struct HostDeviceSet<S: HostSet> {
    pub hosts: S,
    /// One entry per contributing (host, device) pair, in first-seen order.
    pub devices: Vec<String>,
}

impl<S: HostSet> HostDeviceSet<S> {
    pub fn add_host(&mut self, host: &str) -> Result<(), HostlistError> {
        self.hosts.insert(host)?;
        Ok(())
    }

    pub fn add_device(&mut self, device: String) {
        self.devices.push(device);
    }
}

/// Result text → hosts/devices that produced it. Keys iterate in lexicographic order.
#[derive(Debug, Clone)]
pub struct HostDeviceResultMap<S: HostSet> {
    groups: BTreeMap<String, HostDeviceSet<S>>,
}

impl<S: HostSet> Default for HostDeviceResultMap<S> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<S: HostSet> HostDeviceResultMap<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a host under `result` without any device.
    pub fn add_host(&mut self, result: &str, host: &str) -> Result<(), HostlistError> {
        self.group_mut(result).add_host(host)
    }

    /// Record a device of `host` under `result`. The host is only counted once per
    /// group; the device is always appended.
    pub fn add_host_device(
        &mut self,
        result: &str,
        host: &str,
        device: String,
    ) -> Result<(), HostlistError> {
        let group = self.group_mut(result);
        group.add_host(host)?;
        group.add_device(device);
        Ok(())
    }

    fn group_mut(&mut self, result: &str) -> &mut HostDeviceSet<S> {
        self.groups.entry(result.to_string()).or_default()
    }

    pub fn get(&self, result: &str) -> Option<&HostDeviceSet<S>> {
        self.groups.get(result)
    }

    /// Groups ordered by result text.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostDeviceSet<S>)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Fold per-host results into groups of identical result text.
///
/// Hosts without devices are grouped under [`SCM_NOT_FOUND`]. Any hostname the
/// host set rejects aborts the whole pass.
pub fn condense<T, S>(results: &HostResultMap<T>) -> Result<HostDeviceResultMap<S>, HostlistError>
where
    T: DeviceResult,
    S: HostSet,
{
    let mut condensed = HostDeviceResultMap::new();

    for host in sorted_hosts(results) {
        let devices = &results[host];
        if devices.is_empty() {
            condensed.add_host(SCM_NOT_FOUND, host)?;
            continue;
        }

        for dev in devices {
            condensed.add_host_device(&dev.result_text(), host, dev.device())?;
        }
    }

    tracing::debug!(
        hosts = results.len(),
        groups = condensed.len(),
        "condensed firmware results"
    );
    Ok(condensed)
}
