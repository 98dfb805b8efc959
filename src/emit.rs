//! Artifact emission.
//!
//! Takes the package catalog and writes the artifact tree: one directory per
//! package holding its rendered unit files, environment-defaults files and
//! install/removal scripts, plus a `manifest.json` summary at the output
//! root. Unit names are checked for collisions across the whole set before
//! any file is written.

use color_eyre::eyre::WrapErr;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::package::Package;
use crate::systemd::{render_env_file, render_service_file};

/// Emission failures
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Duplicate unit name '{0}' in generated set")]
    DuplicateUnitName(String),
}

/// Summary of everything that was written, serialized to `manifest.json`.
#[derive(Serialize, Debug)]
pub struct Manifest {
    pub packages: Vec<ManifestPackage>,
}

/// Per-package entry of the manifest.
#[derive(Serialize, Debug)]
pub struct ManifestPackage {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<ManifestUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional_deps: Vec<String>,
    pub requires_sapling_params: bool,
    /// Path of the postinst script, relative to the output root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postinst: Option<String>,
    /// Path of the postrm script, relative to the output root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postrm: Option<String>,
}

/// Per-unit entry of the manifest.
#[derive(Serialize, Debug)]
pub struct ManifestUnit {
    /// Unit file name (e.g. `tezos-node-mainnet.service`)
    pub name: String,
    /// Path of the rendered unit file, relative to the output root
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prestart_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    /// Path of the emitted environment-defaults file, relative to the output root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<String>,
}

/// Reject package sets whose unit names collide.
pub fn check_unit_names(packages: &[Package]) -> Result<(), EmitError> {
    let mut seen = HashSet::new();
    for package in packages {
        for name in package.unit_names() {
            if !seen.insert(name.clone()) {
                return Err(EmitError::DuplicateUnitName(name));
            }
        }
    }
    Ok(())
}

/// Write a shell script with a `#!/bin/sh` header and the executable bit set.
fn write_script(path: &Path, body: &str) -> color_eyre::Result<()> {
    let content = format!("#!/bin/sh\n\n{}", body);
    std::fs::write(path, content)
        .wrap_err_with(|| format!("Failed to write script '{}'", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Emit the artifact tree for the given packages into `output_dir`.
pub fn write_artifacts(packages: &[Package], output_dir: &Path) -> color_eyre::Result<Manifest> {
    check_unit_names(packages)?;

    let mut manifest = Manifest {
        packages: Vec::new(),
    };

    for package in packages {
        let package_dir = output_dir.join(&package.name);
        std::fs::create_dir_all(&package_dir).wrap_err_with(|| {
            format!("Failed to create package directory '{}'", package_dir.display())
        })?;

        let mut units = Vec::new();
        // Units may share an environment file (plain + instantiated daemon
        // units); the first unit declaring it provides the defaults.
        let mut written_defaults = HashSet::new();
        for unit in &package.systemd_units {
            let unit_name = unit.unit_name(&package.name);
            let unit_path = package_dir.join(&unit_name);
            std::fs::write(&unit_path, render_service_file(&unit.service_file))
                .wrap_err_with(|| format!("Failed to write unit file '{}'", unit_path.display()))?;
            debug!("Wrote unit file {}", unit_path.display());

            let default_file = match &unit.service_file.service.environment_file {
                Some(environment_file) => {
                    // /etc/default/tezos-signer-tcp -> <pkg>/default/tezos-signer-tcp
                    let basename = environment_file
                        .rsplit('/')
                        .next()
                        .unwrap_or(environment_file.as_str());
                    if written_defaults.insert(basename.to_string()) {
                        let default_dir = package_dir.join("default");
                        std::fs::create_dir_all(&default_dir)?;
                        let default_path = default_dir.join(basename);
                        std::fs::write(
                            &default_path,
                            render_env_file(&unit.service_file.service.environment),
                        )
                        .wrap_err_with(|| {
                            format!("Failed to write defaults file '{}'", default_path.display())
                        })?;
                    }
                    Some(format!("{}/default/{}", package.name, basename))
                }
                None => None,
            };

            units.push(ManifestUnit {
                name: unit_name.clone(),
                path: format!("{}/{}", package.name, unit_name),
                startup_script: unit.startup_script.clone(),
                prestart_script: unit.prestart_script.clone(),
                config_file: unit.config_file.clone(),
                default_file,
                instances: unit.instances.clone(),
            });
        }

        let postinst = match &package.postinst_steps {
            Some(steps) => {
                write_script(&package_dir.join("postinst"), steps)?;
                Some(format!("{}/postinst", package.name))
            }
            None => None,
        };
        let postrm = match &package.postrm_steps {
            Some(steps) => {
                write_script(&package_dir.join("postrm"), steps)?;
                Some(format!("{}/postrm", package.name))
            }
            None => None,
        };

        manifest.packages.push(ManifestPackage {
            name: package.name.clone(),
            description: package.description.clone(),
            units,
            proto: package.proto.clone(),
            optional_deps: package.optional_deps.clone(),
            requires_sapling_params: package.requires_sapling_params,
            postinst,
            postrm,
        });
    }

    let manifest_path = output_dir.join("manifest.json");
    let manifest_json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&manifest_path, manifest_json)
        .wrap_err_with(|| format!("Failed to write manifest '{}'", manifest_path.display()))?;

    let unit_count: usize = manifest.packages.iter().map(|p| p.units.len()).sum();
    info!(
        "Emitted {} package(s) with {} unit file(s) to {}",
        manifest.packages.len(),
        unit_count,
        output_dir.display()
    );

    Ok(manifest)
}
