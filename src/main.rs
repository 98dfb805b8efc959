use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use tezpack::{catalog, emit, protocols};

/// Packaging artifact generator for Tezos node and daemon services
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON file listing active protocols
    #[arg(short, long, default_value = "protocols.json")]
    protocols: PathBuf,

    /// Output directory for the generated packaging artifacts
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Target network; repeat the flag for multiple networks
    #[arg(short, long = "network", default_values_t = catalog::DEFAULT_NETWORKS.iter().map(|s| s.to_string()))]
    networks: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting Tezpack artifact generation");
    info!("Protocol list: {:?}", args.protocols);
    info!("Output directory: {:?}", args.output);
    info!("Target networks: {}", args.networks.join(", "));

    let protos = protocols::load_protocols(&args.protocols)?;

    // Clean up artifacts from a previous run
    if args.output.exists() && args.output != Path::new(".") {
        info!("Removing previous output directory");
        fs::remove_dir_all(&args.output).wrap_err_with(|| {
            format!("Failed to remove output directory '{}'", args.output.display())
        })?;
    }
    fs::create_dir_all(&args.output).wrap_err_with(|| {
        format!("Failed to create output directory '{}'", args.output.display())
    })?;

    let packages = catalog::build_packages(&args.networks, &protos);
    let manifest = emit::write_artifacts(&packages, &args.output)?;

    info!(
        "Generated {} packages, manifest at {:?}",
        manifest.packages.len(),
        args.output.join("manifest.json")
    );
    info!("Artifact generation completed successfully");
    Ok(())
}
