//! Command line interface.

use clap::{Parser, Subcommand, ValueEnum};

/// PXE boot configuration, DNS/DHCP records and provisioning state
#[derive(Debug, Parser)]
#[command(name = "pxe-intent", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// PXELinux configuration elements for a booting MAC address
    Tftp {
        mac: String,
        #[command(flatten)]
        origin: OriginArgs,
    },
    /// Default menu for a client the inventory does not know
    TftpDefault {
        /// MAC address reported by PXELinux, if any
        #[arg(long)]
        mac: Option<String>,
        /// `Cookie` header of the request; `_Syslinux_*` cookies are recorded
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Kickstart elements for an installing MAC address
    Kickstart {
        mac: String,
        #[command(flatten)]
        origin: OriginArgs,
    },
    /// Read or set a machine's boot mode
    Bootmode {
        #[command(subcommand)]
        action: BootModeCommand,
    },
    /// Boot and build history of a machine
    History { mac: String },
    /// DNS records of a site
    Dns { site: String },
    /// DNS zone serial of a site
    Serial { site: String },
    /// DHCP reservations and dynamic range of a site
    Dhcp { site: String },
    /// BIND zone or hosts file rows of a site
    Zone {
        site: String,
        #[arg(value_enum, default_value_t = ZoneKind::Forward)]
        kind: ZoneKind,
    },
    /// Activity at a site over the last day
    Dashboard { site: String },
    /// Unrecognized PXE clients, newest first
    Unrecognized {
        /// Only clients whose address resolves to this site
        #[arg(long)]
        site: Option<String>,
        /// Only clients seen in the last N hours
        #[arg(long)]
        hours: Option<i64>,
    },
    /// PuppetDB facts of a host
    Facts {
        certname: String,
        /// Print only this fact's value
        #[arg(long)]
        fact: Option<String>,
    },
    /// Ping command for a machine
    Ping {
        mac: String,
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        count: Option<String>,
        #[arg(long)]
        preload: Option<String>,
    },
    /// Traceroute command for a machine
    Traceroute { mac: String },
    /// host(1) lookup command
    Host {
        target: String,
        #[arg(long)]
        verbose: Option<String>,
    },
    /// dig(1) lookup command
    Dig { target: String },
}

#[derive(Debug, Subcommand)]
pub enum BootModeCommand {
    Get {
        mac: String,
    },
    Set {
        mac: String,
        /// local, rebuild, rebuildalt or rescue
        action: String,
        #[command(flatten)]
        origin: OriginArgs,
    },
}

/// Where a boot request came from
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OriginArgs {
    /// Diagnostic request: read state, record no history
    #[arg(long)]
    pub internal: bool,
    /// Raw query string of the boot request
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ZoneKind {
    Forward,
    Reverse,
    Hosts,
}
