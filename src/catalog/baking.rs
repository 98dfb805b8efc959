//! Sapling parameters package and the baking meta-package.
//!
//! `tezos-baking` ships one grouping unit per target network: a oneshot
//! service that requires the node plus the baker and endorser instances for
//! that network, so baking on a network is a single `systemctl start` away.
//! The member units already declare `PartOf=`/`WantedBy=` back-references to
//! these grouping units.

use crate::package::Package;
use crate::scripts::{disable_unit, enable_unit};
use crate::systemd::{InstallSection, ServiceFile, ServiceSection, SystemdUnit, UnitSection};

const BAKING_PACKAGE: &str = "tezos-baking";

/// Data-only package shipping the Sapling parameters required in the runtime
/// by sapling-enabled binaries.
pub fn sapling_params_package() -> Package {
    Package::new(
        "tezos-sapling-params",
        "Sapling params required in the runtime by the Tezos binaries",
    )
}

/// Grouping unit for baking on one network.
fn baking_unit(network: &str, protos: &[String]) -> SystemdUnit {
    let mut requires = vec![format!("tezos-node-{}.service", network)];
    for proto in protos {
        requires.push(format!("tezos-baker-{}@{}.service", proto, network));
        requires.push(format!("tezos-endorser-{}@{}.service", proto, network));
    }

    SystemdUnit {
        suffix: Some(network.to_string()),
        service_file: ServiceFile {
            unit: UnitSection {
                description: format!("Tezos baking service for {}", network),
                after: vec!["network.target".to_string()],
                requires,
                ..Default::default()
            },
            service: ServiceSection {
                exec_start: "/bin/true".to_string(),
                service_type: Some("oneshot".to_string()),
                remain_after_exit: true,
                ..Default::default()
            },
            install: InstallSection::multi_user(),
        },
        startup_script: None,
        prestart_script: None,
        config_file: None,
        instances: vec![],
    }
}

/// Meta-package orchestrating node, baker and endorser services per network.
pub fn baking_package(networks: &[String], protos: &[String]) -> Package {
    let units: Vec<SystemdUnit> = networks
        .iter()
        .map(|network| baking_unit(network, protos))
        .collect();

    let mut postinst = String::new();
    let mut postrm = String::new();
    for network in networks {
        postinst.push_str(&enable_unit(&format!("{}-{}.service", BAKING_PACKAGE, network)));
        postrm.push_str(&disable_unit(&format!("{}-{}.service", BAKING_PACKAGE, network)));
    }

    Package {
        systemd_units: units,
        postinst_steps: Some(postinst),
        postrm_steps: Some(postrm),
        ..Package::new(
            BAKING_PACKAGE,
            "Package that provides systemd services that orchestrate other services from Tezos packages",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn networks() -> Vec<String> {
        vec!["mainnet".to_string(), "edo2net".to_string()]
    }

    fn protos() -> Vec<String> {
        vec!["008-PtEdo2Zk".to_string()]
    }

    #[test]
    fn test_one_grouping_unit_per_network() {
        let package = baking_package(&networks(), &protos());
        assert_eq!(
            package.unit_names(),
            vec![
                "tezos-baking-mainnet.service",
                "tezos-baking-edo2net.service",
            ]
        );
    }

    #[test]
    fn test_grouping_unit_requires_members() {
        let package = baking_package(&networks(), &protos());
        let mainnet = &package.systemd_units[0];
        let requires = &mainnet.service_file.unit.requires;
        assert!(requires.contains(&"tezos-node-mainnet.service".to_string()));
        assert!(requires.contains(&"tezos-baker-008-PtEdo2Zk@mainnet.service".to_string()));
        assert!(requires.contains(&"tezos-endorser-008-PtEdo2Zk@mainnet.service".to_string()));
    }

    #[test]
    fn test_grouping_unit_is_oneshot() {
        let package = baking_package(&networks(), &protos());
        let service = &package.systemd_units[0].service_file.service;
        assert_eq!(service.service_type.as_deref(), Some("oneshot"));
        assert!(service.remain_after_exit);
        assert_eq!(service.exec_start, "/bin/true");
    }

    #[test]
    fn test_sapling_params_is_data_only() {
        let package = sapling_params_package();
        assert!(package.systemd_units.is_empty());
        assert!(package.postinst_steps.is_none());
        assert!(package.postrm_steps.is_none());
    }

    #[test]
    fn test_baking_postinst_enables_grouping_units() {
        let package = baking_package(&networks(), &protos());
        let postinst = package.postinst_steps.as_deref().unwrap();
        assert!(postinst.contains("systemctl enable tezos-baking-mainnet.service"));
        assert!(postinst.contains("systemctl enable tezos-baking-edo2net.service"));
    }
}
