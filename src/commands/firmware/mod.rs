pub mod condense;
pub mod format;
pub mod json;
pub mod renderer;
pub mod types;

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use console::Style;
use serde::de::DeserializeOwned;

use crate::error::FwctlError;
use crate::hostlist::{PrintConfig, RangedHostSet};
use crate::output::print_json;

use self::format::DeviceResult;
use self::types::{HostResultMap, HostScmQueryMap, HostScmUpdateMap};

/// How a report should be rendered.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub verbose: bool,
    pub json: bool,
    pub quiet: bool,
    pub print: PrintConfig,
}

/// Totals for one rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub hosts: usize,
    pub hosts_without_devices: usize,
    pub devices: usize,
    pub failed_devices: usize,
}

impl ReportSummary {
    pub fn from_results<T: DeviceResult>(results: &HostResultMap<T>) -> Self {
        let mut summary = Self {
            hosts: results.len(),
            ..Default::default()
        };
        for devices in results.values() {
            if devices.is_empty() {
                summary.hosts_without_devices += 1;
            }
            summary.devices += devices.len();
            summary.failed_devices += devices.iter().filter(|d| d.is_error()).count();
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed_devices > 0
    }
}

/// Entry point for `fwctl query`.
pub fn query(source: &str, opts: &ReportOptions) -> Result<ReportSummary> {
    let results: HostScmQueryMap = load_results(source)?;
    tracing::info!(hosts = results.len(), "loaded firmware query results");

    if opts.json {
        print_report_json(&results, opts)?;
    } else if opts.verbose {
        renderer::print_scm_query_map_verbose(&results, io::stdout().lock())?;
    } else {
        renderer::print_scm_query_map(&results, io::stdout().lock(), &opts.print)?;
    }

    finish(&results, opts)
}

/// Entry point for `fwctl update`.
pub fn update(source: &str, opts: &ReportOptions) -> Result<ReportSummary> {
    let results: HostScmUpdateMap = load_results(source)?;
    tracing::info!(hosts = results.len(), "loaded firmware update results");

    if opts.json {
        print_report_json(&results, opts)?;
    } else if opts.verbose {
        renderer::print_scm_update_map_verbose(&results, io::stdout().lock())?;
    } else {
        renderer::print_scm_update_map(&results, io::stdout().lock(), &opts.print)?;
    }

    finish(&results, opts)
}

/// Read collected results from a JSON file, or from stdin when `source` is `-`.
pub fn load_results<T: DeserializeOwned>(source: &str) -> Result<HostResultMap<T>> {
    let contents = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read results from stdin")?;
        buf
    } else {
        let path = Path::new(source);
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let source_name = if source == "-" { "stdin" } else { source };
    parse_results(&contents, source_name)
}

pub fn parse_results<T: DeserializeOwned>(
    contents: &str,
    source_name: &str,
) -> Result<HostResultMap<T>> {
    let results = serde_json::from_str(contents).map_err(|e| FwctlError::InvalidInput {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;
    Ok(results)
}

fn print_report_json<T: DeviceResult>(
    results: &HostResultMap<T>,
    opts: &ReportOptions,
) -> Result<()> {
    if opts.verbose {
        print_json(&json::verbose_json(results))
    } else {
        print_json(&json::condensed_json::<_, RangedHostSet>(results, &opts.print)?)
    }
}

fn finish<T: DeviceResult>(
    results: &HostResultMap<T>,
    opts: &ReportOptions,
) -> Result<ReportSummary> {
    let summary = ReportSummary::from_results(results);
    tracing::debug!(
        hosts = summary.hosts,
        devices = summary.devices,
        failed = summary.failed_devices,
        "report complete"
    );
    if !opts.quiet && !opts.json {
        eprintln!("{}", format_summary(&summary));
    }
    Ok(summary)
}

fn format_summary(summary: &ReportSummary) -> String {
    let green = Style::new().green().for_stderr();
    let red = Style::new().red().for_stderr();

    let ok = summary.devices - summary.failed_devices;
    let status = if summary.has_failures() {
        red.apply_to(format!("✗ {} failed", summary.failed_devices))
    } else {
        green.apply_to("✓ no failures".to_string())
    };
    let hosts = if summary.hosts_without_devices > 0 {
        format!(
            "{} hosts ({} without devices)",
            summary.hosts, summary.hosts_without_devices
        )
    } else {
        format!("{} hosts", summary.hosts)
    };
    format!("{}, {} devices: {} ok, {}", hosts, summary.devices, ok, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::firmware::types::{QueryOutcome, ScmUpdateResult, UpdateOutcome};

    #[test]
    fn test_parse_results_query() {
        let input = r#"{
            "node1": [],
            "node2": [{"module": {"physical_id": 3}, "error": "timeout"}]
        }"#;
        let results: HostScmQueryMap = parse_results(input, "test").unwrap();
        assert_eq!(results.len(), 2);
        assert!(results["node1"].is_empty());
        assert_eq!(
            results["node2"][0].outcome,
            QueryOutcome::Error("timeout".to_string())
        );
    }

    #[test]
    fn test_parse_results_invalid() {
        let err = parse_results::<ScmUpdateResult>("{not json", "broken.json").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse broken.json:"));
    }

    #[test]
    fn test_summary_counts() {
        let input = r#"{
            "node1": [],
            "node2": [
                {"module": {"physical_id": 1}},
                {"module": {"physical_id": 2}, "error": "busy"}
            ]
        }"#;
        let results: HostScmUpdateMap = parse_results(input, "test").unwrap();
        let summary = ReportSummary::from_results(&results);
        assert_eq!(
            summary,
            ReportSummary {
                hosts: 2,
                hosts_without_devices: 1,
                devices: 2,
                failed_devices: 1,
            }
        );
        assert!(summary.has_failures());
        assert_eq!(results["node2"][0].outcome, UpdateOutcome::Staged);
    }

    #[test]
    fn test_format_summary_no_failures() {
        console::set_colors_enabled_stderr(false);
        let summary = ReportSummary {
            hosts: 3,
            hosts_without_devices: 0,
            devices: 6,
            failed_devices: 0,
        };
        assert_eq!(
            format_summary(&summary),
            "3 hosts, 6 devices: 6 ok, ✓ no failures"
        );
    }

    #[test]
    fn test_format_summary_with_failures() {
        console::set_colors_enabled_stderr(false);
        let summary = ReportSummary {
            hosts: 4,
            hosts_without_devices: 1,
            devices: 5,
            failed_devices: 2,
        };
        assert_eq!(
            format_summary(&summary),
            "4 hosts (1 without devices), 5 devices: 3 ok, ✗ 2 failed"
        );
    }
}
