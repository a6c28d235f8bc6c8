//! Diagnostic commands
//!
//! Query parameters for ping, traceroute and DNS lookups are validated and
//! clamped here, before any work is queued. The resulting argument vectors
//! are executed out of band by the job runner.

use crate::error::{ProvisioningError, Result};
use inventory::NetworkDevice;
use serde::Serialize;
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

/// A command ready to hand to the job runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticCommand {
    pub argv: Vec<String>,
    pub timeout: Duration,
}

impl DiagnosticCommand {
    fn new<I, S>(argv: I, timeout_secs: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// `true` for `t/true/y/yes/1`, `false` for `f/false/n/no/0`, any case
pub fn parse_boolean(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "1" => Ok(true),
        "f" | "false" | "n" | "no" | "0" => Ok(false),
        _ => Err(ProvisioningError::InvalidParameter(format!(
            "Unable to parse \"{value}\" as a Boolean (true/false) value"
        ))),
    }
}

/// Integer parameter clamped to `[min, max]`, `default` when absent
pub fn parse_clamped(
    params: &HashMap<String, String>,
    name: &str,
    default: i64,
    min: i64,
    max: i64,
) -> Result<i64> {
    let Some(raw) = params.get(name) else {
        return Ok(default);
    };
    let value: i64 = raw.trim().parse().map_err(|_| {
        ProvisioningError::InvalidParameter(format!("unable to parse {name}=\"{raw}\" as integer"))
    })?;
    Ok(value.clamp(min, max))
}

/// Ping options after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PingParams {
    /// Seconds before ping gives up
    pub deadline: i64,
    pub count: i64,
    /// Packets sent without waiting for replies
    pub preload: i64,
}

impl Default for PingParams {
    fn default() -> Self {
        Self { deadline: 15, count: 4, preload: 2 }
    }
}

impl PingParams {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            deadline: parse_clamped(params, "deadline", 15, 5, 30)?,
            count: parse_clamped(params, "count", 4, 1, 30)?,
            preload: parse_clamped(params, "preload", 2, 0, 3)?,
        })
    }

    pub fn command(&self, target: &str) -> DiagnosticCommand {
        let timeout = (self.deadline + 5).clamp(5, 40).unsigned_abs();
        DiagnosticCommand::new(
            [
                "/bin/ping".to_string(),
                "-n".to_string(),
                "-w".to_string(),
                self.deadline.to_string(),
                "-i".to_string(),
                "0.2".to_string(),
                "-c".to_string(),
                self.count.to_string(),
                "-l".to_string(),
                self.preload.to_string(),
                target.to_string(),
            ],
            timeout,
        )
    }
}

pub fn traceroute_command(target: &str) -> DiagnosticCommand {
    DiagnosticCommand::new(
        [
            "/usr/bin/traceroute",
            "--sim-queries=10000",
            "--extensions",
            "--as-path-lookups",
            target,
        ],
        45,
    )
}

pub fn host_command(target: &str, verbose: bool) -> DiagnosticCommand {
    let mut argv = vec!["/usr/bin/host", "-W", "3"];
    if verbose {
        argv.push("-v");
    }
    argv.push(target);
    DiagnosticCommand::new(argv, 5)
}

/// `dig`, as a reverse lookup when the target is an address
pub fn dig_command(target: &str) -> DiagnosticCommand {
    let mut argv = vec!["/usr/bin/dig"];
    if target.parse::<IpAddr>().is_ok() {
        argv.push("-x");
    }
    argv.push(target);
    DiagnosticCommand::new(argv, 5)
}

/// Address used to reach a device: its primary static address, else its
/// primary hostname
pub fn device_target(device: &NetworkDevice) -> Result<String> {
    device
        .primary_static_ip()
        .map(|address| address.to_string())
        .or_else(|| device.primary_hostname().map(ToString::to_string))
        .ok_or(ProvisioningError::NoDiagnosticTarget(device.id))
}
