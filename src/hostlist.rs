use std::collections::BTreeSet;

use crate::error::HostlistError;

/// A set of hostnames that can render itself as one compact range expression.
///
/// The report engine only relies on this capability, so tests can substitute a
/// plain in-memory set for the real collapsing implementation.
pub trait HostSet: Default {
    /// Add a host. Returns `Ok(false)` if it was already present.
    fn insert(&mut self, host: &str) -> Result<bool, HostlistError>;

    fn contains(&self, host: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Canonical compact representation, independent of insertion order.
    fn ranged_string(&self) -> String;

    /// Compact representation for display, honoring the presentation options.
    fn display_string(&self, config: &PrintConfig) -> String {
        print_hosts(&self.ranged_string(), config)
    }
}

/// Presentation options for host strings in reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintConfig {
    /// Keep `:port` suffixes in rendered host strings.
    pub show_host_ports: bool,
}

/// Render a ranged host string for display, honoring the presentation options.
///
/// Ports are stripped unless requested; entries that become identical once their
/// ports are gone are only printed once.
pub fn print_hosts(ranged: &str, config: &PrintConfig) -> String {
    if config.show_host_ports {
        return ranged.to_string();
    }

    let mut entries: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = ranged.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ':' if depth == 0 => {
                while chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                    chars.next();
                }
            }
            ',' if depth == 0 => {
                if !entries.contains(&current) {
                    entries.push(current.clone());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() && !entries.contains(&current) {
        entries.push(current);
    }
    entries.join(",")
}

/// One parsed hostname. Field order drives the canonical sort: hosts that can
/// share a bracketed range end up adjacent, ordered by number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct HostName {
    prefix: String,
    width: usize,
    port: Option<u16>,
    number: Option<u64>,
}

impl HostName {
    fn parse(host: &str) -> Result<Self, HostlistError> {
        let (name, port) = match host.rsplit_once(':') {
            Some((name, port_str)) => {
                let port = port_str
                    .parse::<u16>()
                    .map_err(|_| HostlistError::InvalidPort(host.to_string()))?;
                (name, Some(port))
            }
            None => (host, None),
        };

        if name.is_empty() {
            return Err(HostlistError::EmptyHostname);
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        {
            return Err(HostlistError::InvalidHostname(host.to_string()));
        }

        let digits_start = name
            .rfind(|c: char| !c.is_ascii_digit())
            .map_or(0, |i| i + 1);
        let digits = &name[digits_start..];

        // Very long digit runs are not worth ranging; keep them verbatim.
        let number = if digits.is_empty() || digits.len() > 18 {
            None
        } else {
            digits.parse::<u64>().ok()
        };

        let (prefix, width) = match number {
            Some(_) => {
                let width = if digits.len() > 1 && digits.starts_with('0') {
                    digits.len()
                } else {
                    0
                };
                (name[..digits_start].to_string(), width)
            }
            None => (name.to_string(), 0),
        };

        Ok(Self {
            prefix,
            width,
            port,
            number,
        })
    }

    fn range_key(&self) -> (&str, usize, Option<u16>, bool) {
        (&self.prefix, self.width, self.port, self.number.is_some())
    }

    fn format_number(&self, n: u64) -> String {
        format!("{:0width$}", n, width = self.width)
    }
}

/// Host set that collapses numbered hostnames into bracketed ranges,
/// e.g. `node1,node2,node3,node5` becomes `node[1-3,5]`.
#[derive(Debug, Clone, Default)]
pub struct RangedHostSet {
    hosts: BTreeSet<HostName>,
}

impl RangedHostSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list of hostnames, failing on the first invalid one.
    pub fn from_hosts<I, S>(hosts: I) -> Result<Self, HostlistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for host in hosts {
            set.insert(host.as_ref())?;
        }
        Ok(set)
    }
}

impl HostSet for RangedHostSet {
    fn insert(&mut self, host: &str) -> Result<bool, HostlistError> {
        Ok(self.hosts.insert(HostName::parse(host)?))
    }

    fn contains(&self, host: &str) -> bool {
        HostName::parse(host).is_ok_and(|h| self.hosts.contains(&h))
    }

    fn len(&self) -> usize {
        self.hosts.len()
    }

    fn ranged_string(&self) -> String {
        render_hosts(&self.hosts)
    }

    /// Without ports, hosts are re-ranged so `node1:1,node2:2` shows as `node[1-2]`.
    fn display_string(&self, config: &PrintConfig) -> String {
        if config.show_host_ports {
            return self.ranged_string();
        }
        let stripped: BTreeSet<HostName> = self
            .hosts
            .iter()
            .map(|h| HostName {
                port: None,
                ..h.clone()
            })
            .collect();
        render_hosts(&stripped)
    }
}

/// Render sorted hosts as comma-separated groups of bracketed ranges.
fn render_hosts(hosts: &BTreeSet<HostName>) -> String {
    let hosts: Vec<&HostName> = hosts.iter().collect();
    let mut parts: Vec<String> = Vec::new();

    let mut start = 0;
    while start < hosts.len() {
        let key = hosts[start].range_key();
        let end = hosts[start..]
            .iter()
            .position(|h| h.range_key() != key)
            .map_or(hosts.len(), |offset| start + offset);
        parts.push(render_group(&hosts[start..end]));
        start = end;
    }

    parts.join(",")
}

/// Render hosts sharing one range key. Hosts without a number are never ranged.
fn render_group(group: &[&HostName]) -> String {
    let first = group[0];
    let mut out = String::new();

    let numbers: Vec<u64> = group.iter().filter_map(|h| h.number).collect();
    match numbers.as_slice() {
        [] => out.push_str(&first.prefix),
        [n] => {
            out.push_str(&first.prefix);
            out.push_str(&first.format_number(*n));
        }
        _ => {
            let ranges: Vec<String> = collapse_ranges(&numbers)
                .into_iter()
                .map(|(lo, hi)| {
                    if lo == hi {
                        first.format_number(lo)
                    } else {
                        format!("{}-{}", first.format_number(lo), first.format_number(hi))
                    }
                })
                .collect();
            out.push_str(&format!("{}[{}]", first.prefix, ranges.join(",")));
        }
    }

    if let Some(port) = first.port {
        out.push_str(&format!(":{}", port));
    }
    out
}

/// Collapse sorted, unique numbers into inclusive runs.
fn collapse_ranges(numbers: &[u64]) -> Vec<(u64, u64)> {
    let mut ranges: Vec<(u64, u64)> = Vec::new();
    for &n in numbers {
        match ranges.last_mut() {
            Some((_, hi)) if hi.checked_add(1) == Some(n) => *hi = n,
            _ => ranges.push((n, n)),
        }
    }
    ranges
}
