//! Package descriptor types.
//!
//! A package bundles a set of systemd units with the shell snippets the
//! packaging toolchain runs on install and removal. Packages are pure data;
//! rendering and file layout live in the `emit` module.

use serde::Serialize;
use std::collections::HashSet;

use crate::systemd::SystemdUnit;

/// Descriptor for one generated package.
#[derive(Serialize, Debug, Clone)]
pub struct Package {
    /// Package name (e.g. `tezos-baker-008-PtEdo2Zk`)
    pub name: String,
    /// One-line package description
    pub description: String,
    /// Systemd units shipped by the package
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub systemd_units: Vec<SystemdUnit>,
    /// Protocol the package is bound to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    /// Suggested dependencies of the packaged binary
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional_deps: Vec<String>,
    /// Whether the package depends on the Sapling parameters package
    pub requires_sapling_params: bool,
    /// Shell snippet run after installation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postinst_steps: Option<String>,
    /// Shell snippet run after removal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postrm_steps: Option<String>,
}

impl Package {
    /// A package with the given name and description and nothing else; callers
    /// fill in the remaining fields via struct update syntax.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            systemd_units: Vec::new(),
            proto: None,
            optional_deps: Vec::new(),
            requires_sapling_params: false,
            postinst_steps: None,
            postrm_steps: None,
        }
    }

    /// Unit file names shipped by this package, in declaration order.
    pub fn unit_names(&self) -> Vec<String> {
        self.systemd_units
            .iter()
            .map(|unit| unit.unit_name(&self.name))
            .collect()
    }

    /// First unit name that appears more than once within this package.
    pub fn duplicate_unit_name(&self) -> Option<String> {
        let mut seen = HashSet::new();
        for name in self.unit_names() {
            if !seen.insert(name.clone()) {
                return Some(name);
            }
        }
        None
    }
}
