//! Shell snippet builders for postinst/postrm scripts.
//!
//! Provides small pure functions that return the shell fragments assembled
//! into package install and removal scripts: service user creation, data
//! directory setup, `systemctl enable`/`disable` lines and the per-network
//! node wrapper script.

/// User the generated services run as.
pub const TEZOS_USER: &str = "tezos";

/// Home directory of the service user; node data dirs live underneath it.
pub const TEZOS_HOME: &str = "/var/lib/tezos";

/// Create the service user if it does not exist yet.
pub fn create_tezos_user() -> String {
    format!(
        "useradd --home-dir {} {} || true\n",
        TEZOS_HOME, TEZOS_USER
    )
}

/// Enable a unit, tolerating a missing init system (e.g. inside chroots).
pub fn enable_unit(unit_name: &str) -> String {
    format!("systemctl enable {} > /dev/null || true\n", unit_name)
}

/// Disable a unit, tolerating a missing init system.
pub fn disable_unit(unit_name: &str) -> String {
    format!("systemctl disable {} > /dev/null || true\n", unit_name)
}

/// Create a directory owned by the service user.
pub fn create_owned_dir(dir: &str) -> String {
    format!(
        "mkdir -p {dir}\nchown -R {user}:{user} {dir}\n",
        dir = dir,
        user = TEZOS_USER
    )
}

/// Data directory of the node for the given network suffix.
pub fn node_data_dir(suffix: &str) -> String {
    format!("{}/node-{}", TEZOS_HOME, suffix)
}

/// Install a `/usr/bin/tezos-node-<network>` wrapper that runs `tezos-node`
/// against the data directory declared in the matching unit file.
pub fn install_node_wrapper(network: &str) -> String {
    format!(
        r#"cat > /usr/bin/tezos-node-{network} <<- 'EOM'
#! /usr/bin/env bash

TEZOS_NODE_DIR="$(cat $(systemctl show -p FragmentPath tezos-node-{network}.service | cut -d'=' -f2) | grep 'DATA_DIR' | cut -d '=' -f3 | cut -d '"' -f1)" tezos-node "$@"
EOM
chmod +x /usr/bin/tezos-node-{network}
"#,
        network = network
    )
}

/// Remove the wrapper installed by [`install_node_wrapper`].
pub fn remove_node_wrapper(network: &str) -> String {
    format!("rm -f /usr/bin/tezos-node-{}\n", network)
}

/// Write a heredoc document to the given path.
pub fn write_file_heredoc(path: &str, content: &str) -> String {
    format!("cat > {} <<- EOM\n{}\nEOM\n", path, content.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tezos_user_is_idempotent() {
        let snippet = create_tezos_user();
        assert!(snippet.contains("useradd --home-dir /var/lib/tezos tezos"));
        assert!(snippet.ends_with("|| true\n"));
    }

    #[test]
    fn test_enable_disable_lines() {
        assert_eq!(
            enable_unit("tezos-node-mainnet.service"),
            "systemctl enable tezos-node-mainnet.service > /dev/null || true\n"
        );
        assert_eq!(
            disable_unit("tezos-baker-008-PtEdo2Zk@mainnet.service"),
            "systemctl disable tezos-baker-008-PtEdo2Zk@mainnet.service > /dev/null || true\n"
        );
    }

    #[test]
    fn test_node_wrapper_references_unit_file() {
        let snippet = install_node_wrapper("mainnet");
        assert!(snippet.contains("cat > /usr/bin/tezos-node-mainnet"));
        assert!(snippet.contains("tezos-node-mainnet.service"));
        assert!(snippet.contains("chmod +x /usr/bin/tezos-node-mainnet"));
        assert!(snippet.contains(r#"tezos-node "$@""#));
    }

    #[test]
    fn test_owned_dir_creates_and_chowns() {
        let snippet = create_owned_dir("/var/lib/tezos/.tezos-client");
        assert!(snippet.contains("mkdir -p /var/lib/tezos/.tezos-client"));
        assert!(snippet.contains("chown -R tezos:tezos /var/lib/tezos/.tezos-client"));
    }

    #[test]
    fn test_heredoc_terminated() {
        let snippet = write_file_heredoc("/tmp/x.json", "{ \"p2p\": {} }\n");
        assert!(snippet.starts_with("cat > /tmp/x.json <<- EOM\n"));
        assert!(snippet.ends_with("\nEOM\n"));
    }
}
