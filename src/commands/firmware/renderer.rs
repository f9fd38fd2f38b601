use std::io::{self, Write};

use crate::error::ReportError;
use crate::hostlist::{HostSet, PrintConfig, RangedHostSet};
use crate::output::{ErrWriter, IndentWriter};

use super::condense::{condense, HostDeviceResultMap};
use super::format::{DeviceResult, SCM_NOT_FOUND};
use super::types::*;

// ── Public entry points ─────────────────────────────────────────────────────

/// Print firmware query results, one block per host.
pub fn print_scm_query_map_verbose<W: Write>(
    results: &HostScmQueryMap,
    out: W,
) -> Result<(), ReportError> {
    print_verbose(results, out)
}

/// Print firmware query results with hosts grouped by identical result.
pub fn print_scm_query_map<W: Write>(
    results: &HostScmQueryMap,
    out: W,
    config: &PrintConfig,
) -> Result<(), ReportError> {
    print_condensed::<_, RangedHostSet, _>(results, out, config)
}

/// Print firmware update results, one block per host.
pub fn print_scm_update_map_verbose<W: Write>(
    results: &HostScmUpdateMap,
    out: W,
) -> Result<(), ReportError> {
    print_verbose(results, out)
}

/// Print firmware update results with hosts grouped by identical result.
pub fn print_scm_update_map<W: Write>(
    results: &HostScmUpdateMap,
    out: W,
    config: &PrintConfig,
) -> Result<(), ReportError> {
    print_condensed::<_, RangedHostSet, _>(results, out, config)
}

// ── Generic renderers ───────────────────────────────────────────────────────

/// Write every host in name order, each device in discovery order with its
/// result one level deeper. Write failures do not stop the report; the first
/// one is returned at the end.
pub fn print_verbose<T, W>(results: &HostResultMap<T>, out: W) -> Result<(), ReportError>
where
    T: DeviceResult,
    W: Write,
{
    let mut w = ErrWriter::new(out);
    write_verbose(results, &mut w)?;
    Ok(w.finish()?)
}

/// Condense `results` with host set `S`, then write one block per distinct
/// result text: the compacted hosts as header, the text, and the devices.
pub fn print_condensed<T, S, W>(
    results: &HostResultMap<T>,
    out: W,
    config: &PrintConfig,
) -> Result<(), ReportError>
where
    T: DeviceResult,
    S: HostSet,
    W: Write,
{
    let condensed: HostDeviceResultMap<S> = condense(results)?;

    let mut w = ErrWriter::new(out);
    write_condensed(&condensed, &mut w, config)?;
    Ok(w.finish()?)
}

// ── Section writers ─────────────────────────────────────────────────────────

fn write_verbose<T: DeviceResult>(
    results: &HostResultMap<T>,
    out: &mut impl Write,
) -> io::Result<()> {
    for host in sorted_hosts(results) {
        write_header(out, host)?;

        let mut iw = IndentWriter::new(&mut *out);
        let devices = &results[host];
        if devices.is_empty() {
            writeln!(iw, "{}", SCM_NOT_FOUND)?;
            continue;
        }

        for dev in devices {
            writeln!(iw, "{}", dev.device())?;
            let mut iw1 = IndentWriter::new(&mut iw);
            writeln!(iw1, "{}", dev.result_text())?;
        }
    }
    Ok(())
}

fn write_condensed<S: HostSet>(
    condensed: &HostDeviceResultMap<S>,
    out: &mut impl Write,
    config: &PrintConfig,
) -> io::Result<()> {
    for (result, set) in condensed.iter() {
        let hosts = set.hosts.display_string(config);
        write_header(out, &hosts)?;

        let mut iw = IndentWriter::new(&mut *out);
        writeln!(iw, "{}", result)?;

        let mut iw2 = IndentWriter::new(&mut iw);
        for dev in &set.devices {
            writeln!(iw2, "{}", dev)?;
        }
    }
    Ok(())
}

/// Title framed by dashed lines as long as the title.
fn write_header(out: &mut impl Write, title: &str) -> io::Result<()> {
    let line_break = "-".repeat(title.chars().count());
    writeln!(out, "{}\n{}\n{}", line_break, title, line_break)
}
