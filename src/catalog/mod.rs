//! # Package Catalog Module
//!
//! This module builds the full in-memory package set from the static network
//! list and the active protocols. Construction is a single pass with no I/O;
//! all file writing happens in the `emit` module afterwards.
//!
//! ## Key Components
//!
//! - `base.rs`: Client, admin client, signer (with transport units) and codec
//! - `node.rs`: Node package with per-network units and install scripts
//! - `daemons.rs`: Baker/accuser/endorser packages per active protocol
//! - `baking.rs`: Sapling parameters data package and baking meta-package
//!
//! ## Generated Set
//!
//! For N networks and P active protocols the catalog contains the four base
//! packages, the node package (N + 2 units: per-network, `custom`,
//! `edo2net`), 3*P daemon packages with a plain and an instantiated unit
//! each, the sapling parameters package and the baking meta-package.

pub mod baking;
pub mod base;
pub mod daemons;
pub mod node;

use crate::package::Package;
use crate::protocols::ActiveProtocols;

/// Networks the node package targets when none are given on the CLI.
pub const DEFAULT_NETWORKS: &[&str] = &["mainnet"];

/// `StateDirectory=` shared by every generated service unit.
pub const STATE_DIRECTORY: &str = "tezos";

/// Network that ships without a built-in node configuration; its config is
/// written by the node postinst instead.
pub const INLINE_CONFIG_NETWORK: &str = "edo2net";

/// Daemon kinds tied to a blockchain protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonKind {
    Baker,
    Accuser,
    Endorser,
}

impl DaemonKind {
    pub const ALL: [DaemonKind; 3] = [DaemonKind::Baker, DaemonKind::Accuser, DaemonKind::Endorser];

    /// Short name used in package and binary names.
    pub fn name(self) -> &'static str {
        match self {
            DaemonKind::Baker => "baker",
            DaemonKind::Accuser => "accuser",
            DaemonKind::Endorser => "endorser",
        }
    }

    /// Package description for this daemon kind.
    pub fn description(self) -> &'static str {
        match self {
            DaemonKind::Baker => "Daemon for baking",
            DaemonKind::Accuser => "Daemon for accusing",
            DaemonKind::Endorser => "Daemon for endorsing",
        }
    }
}

/// Instance names the daemon template units are enabled for: every target
/// network plus the inline-config network.
pub fn daemon_instances(networks: &[String]) -> Vec<String> {
    let mut instances: Vec<String> = networks.to_vec();
    if !instances.iter().any(|n| n == INLINE_CONFIG_NETWORK) {
        instances.push(INLINE_CONFIG_NETWORK.to_string());
    }
    instances
}

/// Build the complete package catalog for the given networks and protocols.
pub fn build_packages(networks: &[String], protocols: &ActiveProtocols) -> Vec<Package> {
    let mut packages = base::base_packages();

    packages.push(node::node_package(networks));

    let instances = daemon_instances(networks);
    for proto in &protocols.active {
        for kind in DaemonKind::ALL {
            packages.push(daemons::daemon_package(kind, proto, &instances));
        }
    }

    packages.push(baking::sapling_params_package());
    packages.push(baking::baking_package(&instances, &protocols.active));

    log::info!(
        "Built {} package descriptors for {} network(s) and {} protocol(s)",
        packages.len(),
        networks.len(),
        protocols.active.len()
    );

    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn networks() -> Vec<String> {
        vec!["mainnet".to_string()]
    }

    fn protocols() -> ActiveProtocols {
        ActiveProtocols {
            active: vec!["008-PtEdo2Zk".to_string(), "007-PsDELPH1".to_string()],
        }
    }

    #[test]
    fn test_one_package_per_daemon_kind_per_protocol() {
        let packages = build_packages(&networks(), &protocols());

        for proto in &protocols().active {
            for kind in ["baker", "accuser", "endorser"] {
                let name = format!("tezos-{}-{}", kind, proto);
                let matching: Vec<_> =
                    packages.iter().filter(|p| p.name == name).collect();
                assert_eq!(matching.len(), 1, "expected exactly one package '{}'", name);
                assert_eq!(matching[0].proto.as_deref(), Some(proto.as_str()));
            }
        }
    }

    #[test]
    fn test_catalog_contains_expected_package_count() {
        let packages = build_packages(&networks(), &protocols());
        // 4 base + node + 3 daemons * 2 protocols + sapling + baking
        assert_eq!(packages.len(), 4 + 1 + 6 + 2);
    }

    #[test]
    fn test_unit_names_unique_across_catalog() {
        let packages = build_packages(&networks(), &protocols());
        let mut seen = std::collections::HashSet::new();
        for package in &packages {
            for name in package.unit_names() {
                assert!(seen.insert(name.clone()), "duplicate unit name '{}'", name);
            }
        }
    }

    #[test]
    fn test_daemon_instances_include_inline_config_network() {
        let instances = daemon_instances(&networks());
        assert_eq!(instances, vec!["mainnet", "edo2net"]);

        // No duplicate when edo2net is already a target network
        let instances = daemon_instances(&[
            "mainnet".to_string(),
            "edo2net".to_string(),
        ]);
        assert_eq!(instances, vec!["mainnet", "edo2net"]);
    }

    #[test]
    fn test_package_names_unique() {
        let packages = build_packages(&networks(), &protocols());
        let mut seen = std::collections::HashSet::new();
        for package in &packages {
            assert!(seen.insert(package.name.clone()), "duplicate package '{}'", package.name);
        }
    }
}
