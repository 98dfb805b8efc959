//! Base packages: client, admin client, signer and codec.
//!
//! The signer package ships four units, one per transport (TCP, UNIX socket,
//! HTTP, HTTPS), each with its own `/etc/default` file and fixed environment
//! defaults.

use super::STATE_DIRECTORY;
use crate::package::Package;
use crate::scripts::{TEZOS_USER, create_tezos_user};
use crate::systemd::{
    EnvVar, InstallSection, ServiceFile, ServiceSection, SystemdUnit, UnitSection,
};

const SIGNER_CONFIG_FILE: &str = "tezos-signer.conf";
const SIGNER_STARTUP_SCRIPT: &str = "tezos-signer-start";

/// Build one signer unit for the given transport suffix.
fn signer_unit(
    suffix: &str,
    description: &str,
    environment: Vec<EnvVar>,
    launch_args: &str,
) -> SystemdUnit {
    SystemdUnit {
        suffix: Some(suffix.to_string()),
        service_file: ServiceFile {
            unit: UnitSection {
                description: description.to_string(),
                after: vec!["network.target".to_string()],
                ..Default::default()
            },
            service: ServiceSection {
                environment_file: Some(format!("/etc/default/tezos-signer-{}", suffix)),
                environment,
                exec_start: format!("/usr/bin/{} launch {}", SIGNER_STARTUP_SCRIPT, launch_args),
                state_directory: STATE_DIRECTORY.to_string(),
                user: TEZOS_USER.to_string(),
                ..Default::default()
            },
            install: InstallSection::multi_user(),
        },
        startup_script: Some(SIGNER_STARTUP_SCRIPT.to_string()),
        prestart_script: None,
        config_file: Some(SIGNER_CONFIG_FILE.to_string()),
        instances: vec![],
    }
}

/// Signer units for all supported transports.
pub fn signer_units() -> Vec<SystemdUnit> {
    vec![
        signer_unit(
            "tcp",
            "Tezos signer daemon running over TCP socket",
            vec![
                EnvVar::new("ADDRESS", "127.0.0.1"),
                EnvVar::new("PORT", "8000"),
                EnvVar::new("TIMEOUT", "1"),
            ],
            "socket signer --address ${ADDRESS} --port ${PORT} --timeout ${TIMEOUT}",
        ),
        signer_unit(
            "unix",
            "Tezos signer daemon running over UNIX socket",
            vec![EnvVar::new("SOCKET", "")],
            "local signer --socket ${SOCKET}",
        ),
        signer_unit(
            "http",
            "Tezos signer daemon running over HTTP",
            vec![
                EnvVar::new("CERT_PATH", ""),
                EnvVar::new("KEY_PATH", ""),
                EnvVar::new("ADDRESS", "127.0.0.1"),
                EnvVar::new("PORT", "8080"),
            ],
            "http signer --address ${ADDRESS} --port ${PORT}",
        ),
        signer_unit(
            "https",
            "Tezos signer daemon running over HTTPs",
            vec![
                EnvVar::new("CERT_PATH", ""),
                EnvVar::new("KEY_PATH", ""),
                EnvVar::new("ADDRESS", "127.0.0.1"),
                EnvVar::new("PORT", "8080"),
            ],
            "https signer ${CERT_PATH} ${KEY_PATH} --address ${ADDRESS} --port ${PORT}",
        ),
    ]
}

/// The four base packages shipped regardless of networks and protocols.
pub fn base_packages() -> Vec<Package> {
    vec![
        Package {
            optional_deps: vec!["tls".to_string(), "ledgerwallet-tezos".to_string()],
            requires_sapling_params: true,
            ..Package::new(
                "tezos-client",
                "CLI client for interacting with tezos blockchain",
            )
        },
        Package {
            optional_deps: vec!["tls".to_string()],
            ..Package::new("tezos-admin-client", "Administration tool for the node")
        },
        Package {
            systemd_units: signer_units(),
            optional_deps: vec!["tls".to_string(), "ledgerwallet-tezos".to_string()],
            postinst_steps: Some(create_tezos_user()),
            ..Package::new(
                "tezos-signer",
                "A client to remotely sign operations or blocks",
            )
        },
        Package::new("tezos-codec", "A client to decode and encode JSON"),
    ]
}
