//! Systemd unit descriptor types.
//!
//! This module contains type definitions for the systemd service files
//! shipped by generated packages: the `[Unit]`, `[Service]` and `[Install]`
//! sections, environment variable defaults, and the per-package unit
//! descriptor tying a service file to its startup script and instances.

use serde::Serialize;

/// A fixed `KEY=value` environment default declared by a unit.
///
/// Defaults are baked into the unit as `Environment=` lines and repeated in
/// the unit's `/etc/default` file, which overrides them when present.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    /// Variable name (e.g. `NODE_RPC_ADDR`)
    pub name: String,
    /// Default value, possibly empty
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// `[Unit]` section of a service file.
#[derive(Serialize, Debug, Clone, Default)]
pub struct UnitSection {
    /// Human-readable unit description
    pub description: String,
    /// Units this one is ordered after
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
    /// Hard dependencies pulled in and stopped together
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    /// Units this one is stopped/restarted together with
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub part_of: Vec<String>,
}

/// `[Service]` section of a service file.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ServiceSection {
    /// Optional `/etc/default` file overriding the baked-in environment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_file: Option<String>,
    /// Fixed environment defaults rendered as `Environment=` lines
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<EnvVar>,
    /// Command run as the service main process
    pub exec_start: String,
    /// Optional command run before the main process
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_start_pre: Option<String>,
    /// Service type (e.g. `oneshot`); systemd defaults to `simple` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    /// Keep the unit active after the main process exits (oneshot grouping units)
    pub remain_after_exit: bool,
    /// `StateDirectory=` under /var/lib
    pub state_directory: String,
    /// User the service runs as
    pub user: String,
}

/// `[Install]` section of a service file.
#[derive(Serialize, Debug, Clone, Default)]
pub struct InstallSection {
    /// Targets (or units) that pull this one in when enabled
    pub wanted_by: Vec<String>,
}

impl InstallSection {
    /// The common `WantedBy=multi-user.target` install section.
    pub fn multi_user() -> Self {
        Self {
            wanted_by: vec!["multi-user.target".to_string()],
        }
    }
}

/// A complete service file: unit, service and install sections.
#[derive(Serialize, Debug, Clone)]
pub struct ServiceFile {
    pub unit: UnitSection,
    pub service: ServiceSection,
    pub install: InstallSection,
}

/// A systemd unit shipped by a package.
///
/// The unit name is derived from the owning package name plus the optional
/// suffix; units carrying a non-empty `instances` list are instance templates
/// (`name@.service`) parameterized by `%i` at runtime.
#[derive(Serialize, Debug, Clone)]
pub struct SystemdUnit {
    /// Suffix appended to the package name to form the unit name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Rendered unit file contents
    pub service_file: ServiceFile,
    /// Name of the startup script referenced by `ExecStart=`; grouping units
    /// run no script of their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_script: Option<String>,
    /// Name of the prestart script referenced by `ExecStartPre=`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prestart_script: Option<String>,
    /// Configuration file shipped alongside the unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    /// Instance names the packaging scripts enable for template units
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<String>,
}

impl SystemdUnit {
    /// File name of this unit: `<package>[-<suffix>][@].service`.
    pub fn unit_name(&self, package_name: &str) -> String {
        let mut name = package_name.to_string();
        if let Some(suffix) = &self.suffix {
            name.push('-');
            name.push_str(suffix);
        }
        if !self.instances.is_empty() {
            name.push('@');
        }
        name.push_str(".service");
        name
    }
}
