//! Node package construction.
//!
//! One unit per target network, plus a `custom` unit for user-supplied node
//! configs and an `edo2net` unit whose config file is written by postinst
//! (the node binary has no built-in edo2net configuration).

use super::{INLINE_CONFIG_NETWORK, STATE_DIRECTORY};
use crate::package::Package;
use crate::scripts::{
    TEZOS_USER, create_tezos_user, disable_unit, enable_unit, install_node_wrapper,
    node_data_dir, remove_node_wrapper, write_file_heredoc,
};
use crate::systemd::{
    EnvVar, InstallSection, ServiceFile, ServiceSection, SystemdUnit, UnitSection,
};

const NODE_PACKAGE: &str = "tezos-node";
const NODE_STARTUP_SCRIPT: &str = "tezos-node-start";
const NODE_PRESTART_SCRIPT: &str = "tezos-node-prestart";

/// Embedded-protocol packages the node binary can be linked against.
const NODE_OPTIONAL_DEPS: &[&str] = &[
    "tezos-embedded-protocol-001-PtCJ7pwo",
    "tezos-embedded-protocol-002-PsYLVpVv",
    "tezos-embedded-protocol-003-PsddFKi3",
    "tezos-embedded-protocol-004-Pt24m4xi",
    "tezos-embedded-protocol-005-PsBABY5H",
    "tezos-embedded-protocol-005-PsBabyM1",
    "tezos-embedded-protocol-006-PsCARTHA",
];

/// Node config for edo2net, written into the data dir by postinst because
/// the node binary ships no predefined config for this network.
const EDO2NET_CONFIG: &str = r#"{
"p2p": {},
"network":
    { "genesis":
        { "timestamp": "2021-02-11T14:00:00Z",
          "block": "BLockGenesisGenesisGenesisGenesisGenesisdae8bZxCCxh",
          "protocol": "PtYuensgYBb3G3x1hLLbCmcav8ue8Kyd2khADcL5LsT5R1hcXex" },
      "genesis_parameters":
        { "values":
            { "genesis_pubkey":
                "edpkugeDwmwuwyyD3Q5enapgEYDxZLtEUFFSrvVwXASQMVEqsvTqWu" } },
      "chain_name": "TEZOS_EDO2NET_2021-02-11T14:00:00Z",
      "sandboxed_chain_name": "SANDBOXED_TEZOS",
      "default_bootstrap_peers":
        [ "edonet.tezos.co.il", "188.40.128.216:29732", "edo2net.kaml.fr",
          "edonet2.smartpy.io", "51.79.165.131", "edonetb.boot.tezostaquito.io" ] }
}"#;

/// Environment defaults shared by every node unit.
fn common_node_env() -> Vec<EnvVar> {
    vec![
        EnvVar::new("NODE_RPC_ADDR", "127.0.0.1:8732"),
        EnvVar::new("CERT_PATH", ""),
        EnvVar::new("KEY_PATH", ""),
    ]
}

/// Unit-template factory for node units: the per-network, `custom` and
/// `edo2net` units only differ in suffix, environment and description.
pub fn node_unit(suffix: &str, environment: Vec<EnvVar>, description: &str) -> SystemdUnit {
    let baking_unit = format!("tezos-baking-{}.service", suffix);
    SystemdUnit {
        suffix: Some(suffix.to_string()),
        service_file: ServiceFile {
            unit: UnitSection {
                description: description.to_string(),
                after: vec!["network.target".to_string(), baking_unit.clone()],
                requires: vec![],
                part_of: vec![baking_unit.clone()],
            },
            service: ServiceSection {
                environment,
                exec_start: format!("/usr/bin/{}", NODE_STARTUP_SCRIPT),
                exec_start_pre: Some(format!("/usr/bin/{}", NODE_PRESTART_SCRIPT)),
                state_directory: STATE_DIRECTORY.to_string(),
                user: TEZOS_USER.to_string(),
                ..Default::default()
            },
            install: InstallSection {
                wanted_by: vec!["multi-user.target".to_string(), baking_unit],
            },
        },
        startup_script: Some(NODE_STARTUP_SCRIPT.to_string()),
        prestart_script: Some(NODE_PRESTART_SCRIPT.to_string()),
        config_file: None,
        instances: vec![],
    }
}

/// Build the node package for the given target networks.
pub fn node_package(networks: &[String]) -> Package {
    let mut units = Vec::new();
    let mut postinst = create_tezos_user();
    let mut postrm = String::new();

    for network in networks {
        if network == INLINE_CONFIG_NETWORK {
            continue;
        }
        let data_dir = node_data_dir(network);
        let mut env = vec![
            EnvVar::new("DATA_DIR", &data_dir),
            EnvVar::new("NETWORK", network),
        ];
        env.extend(common_node_env());
        units.push(node_unit(network, env, &format!("Tezos node {}", network)));

        postinst.push_str(&format!("mkdir -p {}\n", data_dir));
        postinst.push_str(&format!(
            "[ ! -f {dir}/config.json ] && tezos-node config init --data-dir {dir} --network {network}\n",
            dir = data_dir,
            network = network
        ));
        postinst.push_str(&format!("chown -R {user}:{user} {dir}\n", user = TEZOS_USER, dir = data_dir));
        postinst.push_str(&install_node_wrapper(network));
        postinst.push_str(&enable_unit(&format!("tezos-node-{}.service", network)));

        postrm.push_str(&remove_node_wrapper(network));
        postrm.push_str(&disable_unit(&format!("tezos-node-{}.service", network)));
    }

    // Custom config service: the data dir exists but stays empty until the
    // operator points CUSTOM_NODE_CONFIG at a config file.
    let mut custom_env = vec![
        EnvVar::new("DATA_DIR", node_data_dir("custom")),
        EnvVar::new("CUSTOM_NODE_CONFIG", ""),
    ];
    custom_env.extend(common_node_env());
    units.push(node_unit("custom", custom_env, "Tezos node with custom config"));
    postinst.push_str(&format!("mkdir -p {}\n", node_data_dir("custom")));

    // edo2net service with the inline config document
    let mut edo2net_env = common_node_env();
    edo2net_env.push(EnvVar::new("DATA_DIR", node_data_dir(INLINE_CONFIG_NETWORK)));
    units.push(node_unit(
        INLINE_CONFIG_NETWORK,
        edo2net_env,
        &format!("Tezos node {}", INLINE_CONFIG_NETWORK),
    ));

    let edo2net_dir = node_data_dir(INLINE_CONFIG_NETWORK);
    postinst.push_str(&format!("mkdir -p {}\n", edo2net_dir));
    postinst.push_str(&format!("rm -f {}/config.json\n", edo2net_dir));
    postinst.push_str(&write_file_heredoc(
        &format!("{}/config.json", edo2net_dir),
        EDO2NET_CONFIG,
    ));
    postinst.push_str(&format!("chown -R {user}:{user} {dir}\n", user = TEZOS_USER, dir = edo2net_dir));
    postinst.push_str(&install_node_wrapper(INLINE_CONFIG_NETWORK));
    postinst.push_str(&enable_unit(&format!(
        "tezos-node-{}.service",
        INLINE_CONFIG_NETWORK
    )));

    postrm.push_str(&remove_node_wrapper(INLINE_CONFIG_NETWORK));
    postrm.push_str(&disable_unit(&format!(
        "tezos-node-{}.service",
        INLINE_CONFIG_NETWORK
    )));

    Package {
        systemd_units: units,
        optional_deps: NODE_OPTIONAL_DEPS.iter().map(|s| s.to_string()).collect(),
        requires_sapling_params: true,
        postinst_steps: Some(postinst),
        postrm_steps: Some(postrm),
        ..Package::new(
            NODE_PACKAGE,
            "Entry point for initializing, configuring and running a Tezos node",
        )
    }
}
