//! Unit-file and environment-file text rendering.
//!
//! Descriptors are turned into deterministic systemd unit text here: fixed
//! section order, one directive per line, multi-valued directives joined with
//! spaces on a single line. The environment file body mirrors the unit's
//! `Environment=` defaults as plain `KEY=value` lines.

use super::types::{EnvVar, ServiceFile};

/// Render a service file descriptor to systemd unit text.
pub fn render_service_file(file: &ServiceFile) -> String {
    let mut out = String::new();

    out.push_str("[Unit]\n");
    out.push_str(&format!("Description={}\n", file.unit.description));
    if !file.unit.after.is_empty() {
        out.push_str(&format!("After={}\n", file.unit.after.join(" ")));
    }
    if !file.unit.requires.is_empty() {
        out.push_str(&format!("Requires={}\n", file.unit.requires.join(" ")));
    }
    if !file.unit.part_of.is_empty() {
        out.push_str(&format!("PartOf={}\n", file.unit.part_of.join(" ")));
    }
    out.push('\n');

    out.push_str("[Service]\n");
    if let Some(service_type) = &file.service.service_type {
        out.push_str(&format!("Type={}\n", service_type));
    }
    if let Some(environment_file) = &file.service.environment_file {
        // The leading dash tells systemd to skip a missing file, so fresh
        // installs start on the baked-in defaults alone.
        out.push_str(&format!("EnvironmentFile=-{}\n", environment_file));
    }
    for var in &file.service.environment {
        out.push_str(&format!("Environment=\"{}={}\"\n", var.name, var.value));
    }
    if let Some(exec_start_pre) = &file.service.exec_start_pre {
        out.push_str(&format!("ExecStartPre={}\n", exec_start_pre));
    }
    out.push_str(&format!("ExecStart={}\n", file.service.exec_start));
    if file.service.remain_after_exit {
        out.push_str("RemainAfterExit=yes\n");
    }
    if !file.service.state_directory.is_empty() {
        out.push_str(&format!("StateDirectory={}\n", file.service.state_directory));
    }
    if !file.service.user.is_empty() {
        out.push_str(&format!("User={}\n", file.service.user));
    }
    out.push('\n');

    out.push_str("[Install]\n");
    out.push_str(&format!("WantedBy={}\n", file.install.wanted_by.join(" ")));

    out
}

/// Render environment defaults to an `/etc/default` file body.
pub fn render_env_file(vars: &[EnvVar]) -> String {
    let mut out = String::new();
    for var in vars {
        out.push_str(&format!("{}={}\n", var.name, var.value));
    }
    out
}
