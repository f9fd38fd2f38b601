use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::format::ibytes;

/// Results collected from a fleet, keyed by hostname. Per-host vectors keep the
/// order in which the devices were discovered.
pub type HostResultMap<T> = HashMap<String, Vec<T>>;

/// Firmware query results for every host.
pub type HostScmQueryMap = HostResultMap<ScmQueryResult>;

/// Firmware update results for every host.
pub type HostScmUpdateMap = HostResultMap<ScmUpdateResult>;

/// Hostnames of a result map in lexicographic order.
pub fn sorted_hosts<T>(map: &HostResultMap<T>) -> Vec<&str> {
    let mut hosts: Vec<&str> = map.keys().map(String::as_str).collect();
    hosts.sort_unstable();
    hosts
}

/// Physical location and size of one SCM module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmModule {
    pub physical_id: u32,
    #[serde(default)]
    pub capacity: u64,
    #[serde(default)]
    pub socket_id: u32,
    #[serde(default)]
    pub controller_id: u32,
    #[serde(default)]
    pub channel_id: u32,
    #[serde(default)]
    pub channel_position: u32,
}

impl fmt::Display for ScmModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PhysicalID:{} Capacity:{} Location:(socket:{} memctrlr:{} chan:{} pos:{})",
            self.physical_id,
            ibytes(self.capacity),
            self.socket_id,
            self.controller_id,
            self.channel_id,
            self.channel_position,
        )
    }
}

/// Firmware details reported by a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmFirmwareInfo {
    #[serde(default)]
    pub active_version: String,
    #[serde(default)]
    pub staged_version: String,
    #[serde(default)]
    pub image_max_size_bytes: u64,
    #[serde(default)]
    pub update_status: String,
}

/// Outcome of querying one module's firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Info(ScmFirmwareInfo),
    /// The host answered but had nothing to report for the module.
    NoInfo,
    Error(String),
}

/// Outcome of staging a firmware update on one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Staged,
    Error(String),
}

/// Query result for one module on one host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawQueryResult")]
pub struct ScmQueryResult {
    pub module: ScmModule,
    pub outcome: QueryOutcome,
}

/// Update result for one module on one host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawUpdateResult")]
pub struct ScmUpdateResult {
    pub module: ScmModule,
    pub outcome: UpdateOutcome,
}

/// Wire shape of a query result: an error wins over any info sent alongside it.
#[derive(Deserialize)]
struct RawQueryResult {
    module: ScmModule,
    #[serde(default)]
    info: Option<ScmFirmwareInfo>,
    #[serde(default)]
    error: Option<String>,
}

impl From<RawQueryResult> for ScmQueryResult {
    fn from(raw: RawQueryResult) -> Self {
        let outcome = match (raw.error, raw.info) {
            (Some(err), _) => QueryOutcome::Error(err),
            (None, Some(info)) => QueryOutcome::Info(info),
            (None, None) => QueryOutcome::NoInfo,
        };
        Self {
            module: raw.module,
            outcome,
        }
    }
}

#[derive(Deserialize)]
struct RawUpdateResult {
    module: ScmModule,
    #[serde(default)]
    error: Option<String>,
}

impl From<RawUpdateResult> for ScmUpdateResult {
    fn from(raw: RawUpdateResult) -> Self {
        let outcome = match raw.error {
            Some(err) => UpdateOutcome::Error(err),
            None => UpdateOutcome::Staged,
        };
        Self {
            module: raw.module,
            outcome,
        }
    }
}
