use super::types::*;

pub const ERROR_PREFIX: &str = "Error";
pub const SCM_NOT_FOUND: &str = "No SCM devices detected";
pub const SCM_NO_INFO: &str = "No information available";
pub const SCM_UPDATE_SUCCESS: &str =
    "Success - The new firmware was staged. A reboot is required to apply.";

/// A per-device result that can appear in a firmware report.
///
/// `result_text` is the condensation key: two devices land in the same group iff
/// their texts are byte-identical, so it must only depend on the outcome itself.
pub trait DeviceResult {
    /// Stable identity of the device, printed under its host or group.
    fn device(&self) -> String;

    fn result_text(&self) -> String;

    fn is_error(&self) -> bool;
}

impl DeviceResult for ScmQueryResult {
    fn device(&self) -> String {
        self.module.to_string()
    }

    fn result_text(&self) -> String {
        match &self.outcome {
            QueryOutcome::Info(info) => format_firmware_info(info),
            QueryOutcome::NoInfo => format_error(SCM_NO_INFO),
            QueryOutcome::Error(msg) => format_error(msg),
        }
    }

    fn is_error(&self) -> bool {
        !matches!(self.outcome, QueryOutcome::Info(_))
    }
}

impl DeviceResult for ScmUpdateResult {
    fn device(&self) -> String {
        self.module.to_string()
    }

    fn result_text(&self) -> String {
        match &self.outcome {
            UpdateOutcome::Staged => SCM_UPDATE_SUCCESS.to_string(),
            UpdateOutcome::Error(msg) => format_error(msg),
        }
    }

    fn is_error(&self) -> bool {
        matches!(self.outcome, UpdateOutcome::Error(_))
    }
}

pub fn format_error(msg: &str) -> String {
    format!("{}: {}", ERROR_PREFIX, msg)
}

fn print_version(version: &str) -> &str {
    if version.is_empty() {
        "N/A"
    } else {
        version
    }
}

/// Fixed-field block describing a module's firmware, one field per line.
pub fn format_firmware_info(info: &ScmFirmwareInfo) -> String {
    format!(
        "Active Version: {}\nStaged Version: {}\nMaximum Firmware Image Size: {}\nLast Update Status: {}",
        print_version(&info.active_version),
        print_version(&info.staged_version),
        ibytes(info.image_max_size_bytes),
        info.update_status,
    )
}

/// Format a byte count with binary prefixes (e.g., 2.0 MiB, 15 MiB, 512 B).
///
/// Values are rounded to one decimal; the decimal is only shown below 10.
pub fn ibytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

    if bytes < 10 {
        return format!("{} B", bytes);
    }

    let mut exp = 0;
    let mut divisor: u64 = 1;
    while exp < UNITS.len() - 1 && bytes / divisor >= 1024 {
        divisor *= 1024;
        exp += 1;
    }

    let val = ((bytes as f64 / divisor as f64) * 10.0 + 0.5).floor() / 10.0;
    if val < 10.0 {
        format!("{:.1} {}", val, UNITS[exp])
    } else {
        format!("{:.0} {}", val, UNITS[exp])
    }
}
