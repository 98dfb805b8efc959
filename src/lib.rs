//! # Tezpack - Packaging artifact generator for Tezos node and daemon services
//!
//! This library builds the in-memory descriptions of the Tezos service
//! packages and emits the Linux packaging artifacts consumed by an external
//! packaging toolchain: systemd unit files, `/etc/default` environment
//! files and postinst/postrm shell scripts.
//!
//! ## Overview
//!
//! Generation is a single synchronous pass parameterized by the target
//! networks and the set of active protocols read from a JSON file. For every
//! active protocol the catalog contains one baker, one accuser and one
//! endorser package; the node package carries one unit per target network
//! plus the `custom` and `edo2net` services.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `protocols`: Active protocol list loading and validation
//! - `systemd`: Unit descriptor types and unit-file text rendering
//! - `package`: Package descriptor types
//! - `scripts`: Shell snippet builders for install/removal scripts
//! - `catalog`: Construction of the full package set
//! - `emit`: Artifact tree emission and the `manifest.json` summary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tezpack::{catalog, emit, protocols};
//!
//! let protos = protocols::load_protocols(Path::new("protocols.json"))?;
//! let networks = vec!["mainnet".to_string()];
//! let packages = catalog::build_packages(&networks, &protos);
//! emit::write_artifacts(&packages, Path::new("out"))?;
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Invariants
//!
//! - Unit names are unique within a package and across the generated set;
//!   emission fails on a collision before writing any file.
//! - Environment defaults are fixed literals declared per unit type,
//!   overridable only through the unit's `/etc/default` file.
//!
//! ## Error Handling
//!
//! The library uses `color_eyre` for error reporting with context. Domain
//! validation failures (`protocols::ProtocolError`, `emit::EmitError`) are
//! typed `thiserror` enums converted into eyre reports at the boundary.

pub mod catalog;
pub mod emit;
pub mod package;
pub mod protocols;
pub mod scripts;
pub mod systemd;
