//! Protocol daemon packages: baker, accuser and endorser.
//!
//! Every active protocol gets one package per daemon kind. Each package
//! ships two units built by a single template factory: a plain unit started
//! standalone, and an instance template (`name@.service`) wired into the
//! node and baking units of the instance network via `%i`.

use super::{DaemonKind, STATE_DIRECTORY};
use crate::package::Package;
use crate::scripts::{
    TEZOS_HOME, TEZOS_USER, create_owned_dir, create_tezos_user, disable_unit, enable_unit,
};
use crate::systemd::{
    EnvVar, InstallSection, ServiceFile, ServiceSection, SystemdUnit, UnitSection,
};

fn startup_script(kind: DaemonKind) -> String {
    format!("tezos-{}-start", kind.name())
}

fn environment_file(kind: DaemonKind, proto: &str) -> String {
    format!("/etc/default/tezos-{}-{}", kind.name(), proto)
}

/// Environment defaults for a daemon unit. Only the baker needs the node
/// data dir; the plain unit leaves it for the operator, the instance
/// template derives it from the instance name.
fn daemon_env(kind: DaemonKind, proto: &str, instantiated: bool) -> Vec<EnvVar> {
    let mut env = vec![EnvVar::new("PROTOCOL", proto)];
    if kind == DaemonKind::Baker {
        let node_data_dir = if instantiated {
            format!("{}/node-%i", TEZOS_HOME)
        } else {
            String::new()
        };
        env.push(EnvVar::new("NODE_DATA_DIR", node_data_dir));
    }
    env
}

/// Plain daemon unit, started standalone against a locally configured node.
fn plain_unit(kind: DaemonKind, proto: &str) -> SystemdUnit {
    SystemdUnit {
        suffix: None,
        service_file: ServiceFile {
            unit: UnitSection {
                description: format!("Tezos {}", kind.name()),
                after: vec!["network.target".to_string()],
                ..Default::default()
            },
            service: ServiceSection {
                environment_file: Some(environment_file(kind, proto)),
                environment: daemon_env(kind, proto, false),
                exec_start: format!("/usr/bin/{}", startup_script(kind)),
                state_directory: STATE_DIRECTORY.to_string(),
                user: TEZOS_USER.to_string(),
                ..Default::default()
            },
            install: InstallSection::multi_user(),
        },
        startup_script: Some(startup_script(kind)),
        prestart_script: None,
        config_file: Some(format!("tezos-{}.conf", kind.name())),
        instances: vec![],
    }
}

/// Instance-template unit bound to the node and baking units of `%i`.
fn instance_unit(kind: DaemonKind, proto: &str, instances: &[String]) -> SystemdUnit {
    SystemdUnit {
        suffix: None,
        service_file: ServiceFile {
            unit: UnitSection {
                description: format!("Instantiated tezos {} daemon service", kind.name()),
                after: vec![
                    "network.target".to_string(),
                    "tezos-node-%i.service".to_string(),
                    "tezos-baking-%i.service".to_string(),
                ],
                requires: vec!["tezos-node-%i.service".to_string()],
                part_of: vec!["tezos-baking-%i.service".to_string()],
            },
            service: ServiceSection {
                environment_file: Some(environment_file(kind, proto)),
                environment: daemon_env(kind, proto, true),
                exec_start: format!("/usr/bin/{}", startup_script(kind)),
                state_directory: STATE_DIRECTORY.to_string(),
                user: TEZOS_USER.to_string(),
                ..Default::default()
            },
            install: InstallSection {
                wanted_by: vec![
                    "multi-user.target".to_string(),
                    "tezos-baking-%i.service".to_string(),
                ],
            },
        },
        startup_script: Some(startup_script(kind)),
        prestart_script: None,
        config_file: None,
        instances: instances.to_vec(),
    }
}

/// Build the package for one daemon kind and one active protocol.
pub fn daemon_package(kind: DaemonKind, proto: &str, instances: &[String]) -> Package {
    let name = format!("tezos-{}-{}", kind.name(), proto);

    let mut postinst = create_tezos_user();
    postinst.push_str(&create_owned_dir(&format!("{}/.tezos-client", TEZOS_HOME)));
    let mut postrm = String::new();
    for instance in instances {
        postinst.push_str(&enable_unit(&format!("{}@{}.service", name, instance)));
        postrm.push_str(&disable_unit(&format!("{}@{}.service", name, instance)));
    }

    Package {
        systemd_units: vec![plain_unit(kind, proto), instance_unit(kind, proto, instances)],
        proto: Some(proto.to_string()),
        optional_deps: vec!["tls".to_string(), "ledgerwallet-tezos".to_string()],
        // Only the baker touches sapling-enabled contracts
        requires_sapling_params: kind == DaemonKind::Baker,
        postinst_steps: Some(postinst),
        postrm_steps: Some(postrm),
        ..Package::new(name, kind.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTO: &str = "008-PtEdo2Zk";

    fn instances() -> Vec<String> {
        vec!["mainnet".to_string(), "edo2net".to_string()]
    }

    #[test]
    fn test_daemon_package_units() {
        let package = daemon_package(DaemonKind::Baker, PROTO, &instances());
        assert_eq!(package.name, "tezos-baker-008-PtEdo2Zk");
        assert_eq!(
            package.unit_names(),
            vec![
                "tezos-baker-008-PtEdo2Zk.service",
                "tezos-baker-008-PtEdo2Zk@.service",
            ]
        );
        assert_eq!(package.proto.as_deref(), Some(PROTO));
    }

    #[test]
    fn test_baker_environment_defaults() {
        let package = daemon_package(DaemonKind::Baker, PROTO, &instances());
        let plain = &package.systemd_units[0];
        assert_eq!(
            plain.service_file.service.environment,
            vec![
                EnvVar::new("PROTOCOL", PROTO),
                EnvVar::new("NODE_DATA_DIR", ""),
            ]
        );

        let instantiated = &package.systemd_units[1];
        assert_eq!(
            instantiated.service_file.service.environment,
            vec![
                EnvVar::new("PROTOCOL", PROTO),
                EnvVar::new("NODE_DATA_DIR", "/var/lib/tezos/node-%i"),
            ]
        );
    }

    #[test]
    fn test_accuser_and_endorser_env_is_protocol_only() {
        for kind in [DaemonKind::Accuser, DaemonKind::Endorser] {
            let package = daemon_package(kind, PROTO, &instances());
            for unit in &package.systemd_units {
                assert_eq!(
                    unit.service_file.service.environment,
                    vec![EnvVar::new("PROTOCOL", PROTO)],
                    "unexpected env for {}",
                    package.name
                );
            }
        }
    }

    #[test]
    fn test_instance_unit_bound_to_node_and_baking() {
        let package = daemon_package(DaemonKind::Endorser, PROTO, &instances());
        let instantiated = &package.systemd_units[1];
        let file = &instantiated.service_file;
        assert!(file.unit.requires.contains(&"tezos-node-%i.service".to_string()));
        assert!(file.unit.part_of.contains(&"tezos-baking-%i.service".to_string()));
        assert!(file.install.wanted_by.contains(&"tezos-baking-%i.service".to_string()));
        assert_eq!(instantiated.instances, instances());
    }

    #[test]
    fn test_shared_environment_file() {
        let package = daemon_package(DaemonKind::Accuser, PROTO, &instances());
        for unit in &package.systemd_units {
            assert_eq!(
                unit.service_file.service.environment_file.as_deref(),
                Some("/etc/default/tezos-accuser-008-PtEdo2Zk")
            );
        }
    }

    #[test]
    fn test_postinst_enables_each_instance() {
        let package = daemon_package(DaemonKind::Baker, PROTO, &instances());
        let postinst = package.postinst_steps.as_deref().unwrap();
        assert!(postinst.contains("useradd"));
        assert!(postinst.contains("mkdir -p /var/lib/tezos/.tezos-client"));
        assert!(postinst.contains("systemctl enable tezos-baker-008-PtEdo2Zk@mainnet.service"));
        assert!(postinst.contains("systemctl enable tezos-baker-008-PtEdo2Zk@edo2net.service"));

        let postrm = package.postrm_steps.as_deref().unwrap();
        assert!(postrm.contains("systemctl disable tezos-baker-008-PtEdo2Zk@mainnet.service"));
        assert!(postrm.contains("systemctl disable tezos-baker-008-PtEdo2Zk@edo2net.service"));
    }
}
