//! Main controller implementation.
//!
//! Follows a boot request from MAC address to inventory lookup, boot
//! configuration and provisioning history, and answers the record and
//! diagnostic queries operators run against a site. Commands that change
//! state write the inventory snapshot back.

use crate::cli::{BootModeCommand, Command, OriginArgs, ZoneKind};
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::snapshot::InventorySnapshot;
use chrono::{Duration, Utc};
use inventory::{BootMode, DeviceId, InventoryStore, MacAddress, MemoryStore, NetworkDevice, PuppetDbClient, Site};
use provisioning::diagnostics::{self, PingParams};
use provisioning::{DeviceIntake, ProvisioningTracker, PxeSignal, RequestOrigin};
use pxe_config::{BootConfigEngine, BootUrls};
use records::{dashboard, dhcp, dns, zone, DhcpRange, DhcpRecord};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a command
#[derive(Debug)]
pub enum Output {
    Json(Value),
    Text(String),
}

impl Output {
    fn json<T: Serialize>(value: &T) -> Result<Self, ControllerError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value:#}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Serialize)]
struct BootModeState {
    id: DeviceId,
    boot_mode: BootMode,
}

#[derive(Debug, Serialize)]
struct DhcpConfiguration {
    range: Option<DhcpRange>,
    records: Vec<DhcpRecord>,
}

pub struct Controller {
    store: Arc<MemoryStore>,
    engine: BootConfigEngine,
    tracker: ProvisioningTracker,
    intake: DeviceIntake,
    puppetdb: PuppetDbClient,
    /// Where state changes are written back; `None` keeps them in memory
    snapshot_path: Option<PathBuf>,
}

impl Controller {
    /// Creates a controller over the configured inventory snapshot.
    pub async fn new(config: ControllerConfig) -> Result<Self, ControllerError> {
        let store = InventorySnapshot::load(&config.inventory_snapshot)?.into_store().await?;
        let mut controller = Self::with_store(store, config.clone())?;
        controller.snapshot_path = Some(config.inventory_snapshot);
        Ok(controller)
    }

    /// Creates a controller over an already populated store.
    pub fn with_store(store: MemoryStore, config: ControllerConfig) -> Result<Self, ControllerError> {
        let store = Arc::new(store);
        let engine = BootConfigEngine::new(config.pxe, BootUrls::new(config.public_base_url))?;
        Ok(Self {
            tracker: ProvisioningTracker::new(store.clone()),
            intake: DeviceIntake::new(store.clone()),
            puppetdb: PuppetDbClient::new(config.puppetdb_url)?,
            store,
            engine,
            snapshot_path: None,
        })
    }

    pub async fn run(&self, command: Command) -> Result<Output, ControllerError> {
        debug!("Running {:?}", command);
        match command {
            Command::Tftp { mac, origin } => {
                let (site, device, mac) = self.device(&mac).await?;
                let config = self.engine.tftp_config(&site, &device, &mac)?;
                self.tracker.record_tftp_request(device.id, request_origin(&origin)).await?;
                self.persist().await?;
                Output::json(&config)
            }
            Command::TftpDefault { mac, cookie } => {
                let mac = mac.map(|mac| mac.parse::<MacAddress>()).transpose()?;
                if let Some(signal) = cookie.as_deref().and_then(PxeSignal::from_cookie_header) {
                    self.intake.record(signal).await?;
                    self.persist().await?;
                }
                Output::json(&self.engine.default_menu(mac.as_ref()))
            }
            Command::Kickstart { mac, origin } => {
                let (site, device, mac) = self.device(&mac).await?;
                let config = self.engine.kickstart_config(&site, &device, &mac)?;
                self.tracker.record_kickstart_request(device.id, request_origin(&origin)).await?;
                self.persist().await?;
                Output::json(&config)
            }
            Command::Bootmode { action: BootModeCommand::Get { mac } } => {
                let (_, device, _) = self.device(&mac).await?;
                let mode = self.tracker.boot_mode(device.id).await?;
                Output::json(&BootModeState { id: device.id, boot_mode: mode })
            }
            Command::Bootmode { action: BootModeCommand::Set { mac, action, origin } } => {
                let (_, device, _) = self.device(&mac).await?;
                let change = self
                    .tracker
                    .set_boot_mode(device.id, &action, request_origin(&origin))
                    .await?;
                self.persist().await?;
                Output::json(&change)
            }
            Command::History { mac } => {
                let (_, device, _) = self.device(&mac).await?;
                Output::json(&self.tracker.history(device.id).await?)
            }
            Command::Dns { site } => {
                let (site, devices) = self.site(&site).await?;
                Output::json(&dns::site_records(&site, &devices)?)
            }
            Command::Serial { site } => {
                let (site, devices) = self.site(&site).await?;
                Ok(Output::Text(dns::dns_serial(&site, &devices, Utc::now())))
            }
            Command::Dhcp { site } => {
                let (site, devices) = self.site(&site).await?;
                Output::json(&DhcpConfiguration {
                    range: dhcp::dynamic_range(&site),
                    records: dhcp::site_records(&devices)?,
                })
            }
            Command::Zone { site, kind } => {
                let (site, devices) = self.site(&site).await?;
                let rows = match kind {
                    ZoneKind::Forward => zone::forward_rows(&site, &dns::site_records(&site, &devices)?),
                    ZoneKind::Reverse => zone::reverse_rows(&site, &dns::site_records(&site, &devices)?),
                    ZoneKind::Hosts => zone::hosts_rows(&devices),
                };
                Ok(Output::Text(render_rows(&rows)))
            }
            Command::Dashboard { site } => {
                let (site, devices) = self.site(&site).await?;
                let index = self.store.site_index().await?;
                let unrecognized = self.store.list_unrecognized_devices(None).await?;
                Output::json(&dashboard::dashboard(&site, &index, &devices, &unrecognized, Utc::now()))
            }
            Command::Unrecognized { site, hours } => {
                let since = hours.map(|hours| Utc::now() - Duration::hours(hours));
                let views = self.intake.views(since).await?;
                let views = match site {
                    Some(code) => {
                        let site = self.store.get_site_by_code(&code).await?;
                        dashboard::views_at_site(views, site.id)
                    }
                    None => views,
                };
                Output::json(&views)
            }
            Command::Facts { certname, fact } => match fact {
                Some(name) => Ok(Output::Json(
                    self.puppetdb.fact_value(&certname, &name).await?.unwrap_or(Value::Null),
                )),
                None => Output::json(&self.puppetdb.facts(&certname).await?),
            },
            Command::Ping { mac, deadline, count, preload } => {
                let params: HashMap<String, String> = [("deadline", deadline), ("count", count), ("preload", preload)]
                    .into_iter()
                    .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
                    .collect();
                let params = PingParams::from_query(&params)?;
                let (_, device, _) = self.device(&mac).await?;
                Output::json(&params.command(&diagnostics::device_target(&device)?))
            }
            Command::Traceroute { mac } => {
                let (_, device, _) = self.device(&mac).await?;
                Output::json(&diagnostics::traceroute_command(&diagnostics::device_target(&device)?))
            }
            Command::Host { target, verbose } => {
                let verbose = match verbose {
                    Some(value) => diagnostics::parse_boolean(&value)?,
                    None => false,
                };
                Output::json(&diagnostics::host_command(&target, verbose))
            }
            Command::Dig { target } => Output::json(&diagnostics::dig_command(&target)),
        }
    }

    /// Device owning `mac`, with its site and the normalized address
    async fn device(&self, mac: &str) -> Result<(Site, NetworkDevice, MacAddress), ControllerError> {
        let mac: MacAddress = mac.parse()?;
        let device = self.store.get_device_by_mac(&mac).await?.ok_or_else(|| {
            inventory::InventoryError::NotFound(format!("No network device with MAC address {mac}"))
        })?;
        let site = self.store.get_site(device.site_id).await?;
        Ok((site, device, mac))
    }

    async fn site(&self, code: &str) -> Result<(Site, Vec<NetworkDevice>), ControllerError> {
        let site = self.store.get_site_by_code(code).await?;
        let devices = self.store.list_devices(site.id).await?;
        Ok((site, devices))
    }

    async fn persist(&self) -> Result<(), ControllerError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        InventorySnapshot::from_store(self.store.as_ref()).await?.save(path)?;
        info!("Saved inventory snapshot to {}", path.display());
        Ok(())
    }
}

fn request_origin(args: &OriginArgs) -> RequestOrigin {
    if args.internal {
        RequestOrigin::Internal
    } else {
        RequestOrigin::from_query(args.query.as_deref().unwrap_or_default())
    }
}

fn render_rows(rows: &[zone::Row]) -> String {
    rows.iter()
        .map(|row| row.join(" ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
