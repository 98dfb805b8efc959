//! # Systemd Unit Descriptor Module
//!
//! This module provides the typed descriptions of the systemd service files
//! shipped by generated packages, and the rendering of those descriptions to
//! unit-file and `/etc/default` text.
//!
//! ## Key Components
//!
//! - `types.rs`: Unit, service and install section descriptors
//! - `render.rs`: Deterministic text rendering of descriptors
//!
//! ## Unit Naming
//!
//! Unit file names are derived from the owning package name plus an optional
//! suffix (`tezos-node` + `mainnet` -> `tezos-node-mainnet.service`). Units
//! with a non-empty instance list render as `name@.service` templates whose
//! `%i` placeholder is substituted by systemd at instantiation time.
//!
//! ## Environment Defaults
//!
//! Every environment default is a fixed `KEY=value` literal declared on the
//! unit. Defaults are rendered twice: as `Environment=` lines inside the unit
//! and as the body of the unit's `/etc/default` file, which systemd reads
//! afterwards and which therefore overrides the baked-in values.

pub mod render;
pub mod types;

// Re-export commonly used types for convenience
pub use render::{render_env_file, render_service_file};
pub use types::{
    EnvVar,
    InstallSection,
    ServiceFile,
    ServiceSection,
    SystemdUnit,
    UnitSection,
};
