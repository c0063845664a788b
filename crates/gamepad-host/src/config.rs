//! Driver configuration.
//!
//! Storage capacities are fixed at build time through const generics on
//! [`crate::GamepadHost`]; the defaults below match the usual single-port
//! embedded host. Runtime behaviour is tuned through [`DriverConfig`].

use crate::{DriverError, DriverResult};
use serde::{Deserialize, Serialize};

/// Device slots; addresses `1..=DEFAULT_MAX_DEVICES` are accepted.
pub const DEFAULT_MAX_DEVICES: usize = 4;

/// Interface instances per device.
pub const DEFAULT_MAX_INSTANCES: usize = 1;

/// Size of each per-instance endpoint buffer in bytes.
pub const DEFAULT_EP_BUFSIZE: usize = 64;

/// How a device's identity is checked when an interface is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMatch {
    /// Accept the interface when any single identity field matches.
    ///
    /// This is what deployed hosts have always done for the GunCon 2 and the
    /// Steel Battalion controller, so existing clone hardware keeps binding.
    #[default]
    Literal,
    /// Require the full VID/PID pair (or, for XID devices, the full
    /// class/subclass pair).
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub identity_match: IdentityMatch,

    /// Send the variant's mount command (GunCon 2: enable 60 Hz mode) when
    /// the interface is configured.
    ///
    /// Default: true.
    pub send_mount_command: bool,

    /// Emit a `trace!` hex dump of every inbound and outbound report.
    ///
    /// Default: false.
    pub trace_reports: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            identity_match: IdentityMatch::Literal,
            send_mount_command: true,
            trace_reports: false,
        }
    }
}

/// Build-time capacities of one driver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub max_devices: usize,
    pub max_instances: usize,
    pub buffer_size: usize,
    /// Longest report the variant decodes or sends.
    pub report_len: usize,
}

impl DriverConfig {
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::default()
    }

    /// Check the configuration against the capacities it will run with.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidConfig`] when a capacity is zero, too
    /// large to be addressed by the host stack's `u8` addresses, or when the
    /// endpoint buffer cannot hold a full report.
    pub fn validate(&self, capacity: &Capacity) -> DriverResult<()> {
        if capacity.max_devices == 0 || capacity.max_devices > usize::from(u8::MAX) {
            return Err(DriverError::InvalidConfig(
                "max_devices must be between 1 and 255",
            ));
        }
        if capacity.max_instances == 0 || capacity.max_instances > usize::from(u8::MAX) {
            return Err(DriverError::InvalidConfig(
                "max_instances must be between 1 and 255",
            ));
        }
        if capacity.buffer_size > usize::from(u16::MAX) {
            return Err(DriverError::InvalidConfig(
                "endpoint buffer exceeds the largest transfer length",
            ));
        }
        if capacity.buffer_size < capacity.report_len {
            return Err(DriverError::InvalidConfig(
                "endpoint buffer is smaller than one report",
            ));
        }
        Ok(())
    }
}

/// Builder for [`DriverConfig`].
#[derive(Debug, Default)]
pub struct DriverConfigBuilder {
    config: DriverConfig,
}

impl DriverConfigBuilder {
    #[must_use]
    pub fn identity_match(mut self, mode: IdentityMatch) -> Self {
        self.config.identity_match = mode;
        self
    }

    #[must_use]
    pub fn send_mount_command(mut self, enabled: bool) -> Self {
        self.config.send_mount_command = enabled;
        self
    }

    #[must_use]
    pub fn trace_reports(mut self, enabled: bool) -> Self {
        self.config.trace_reports = enabled;
        self
    }

    pub fn build(self) -> DriverConfig {
        self.config
    }
}
