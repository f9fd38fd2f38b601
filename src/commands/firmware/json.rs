use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::HostlistError;
use crate::hostlist::{HostSet, PrintConfig};

use super::condense::{condense, HostDeviceResultMap};
use super::format::DeviceResult;
use super::types::{sorted_hosts, HostResultMap};

/// One condensed group in `--json` output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonGroup {
    pub hosts: String,
    pub result: String,
    pub devices: Vec<String>,
}

/// One device in verbose `--json` output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonDevice {
    pub device: String,
    pub result: String,
    pub error: bool,
}

/// Condensed groups in result-text order, with host strings rendered for display.
pub fn condensed_json<T, S>(
    results: &HostResultMap<T>,
    config: &PrintConfig,
) -> Result<Vec<JsonGroup>, HostlistError>
where
    T: DeviceResult,
    S: HostSet,
{
    let condensed: HostDeviceResultMap<S> = condense(results)?;
    Ok(condensed
        .iter()
        .map(|(result, set)| JsonGroup {
            hosts: set.hosts.display_string(config),
            result: result.to_string(),
            devices: set.devices.clone(),
        })
        .collect())
}

/// Per-host device results keyed by hostname (sorted).
pub fn verbose_json<T: DeviceResult>(
    results: &HostResultMap<T>,
) -> BTreeMap<String, Vec<JsonDevice>> {
    sorted_hosts(results)
        .into_iter()
        .map(|host| {
            let devices = results[host]
                .iter()
                .map(|dev| JsonDevice {
                    device: dev.device(),
                    result: dev.result_text(),
                    error: dev.is_error(),
                })
                .collect();
            (host.to_string(), devices)
        })
        .collect()
}
