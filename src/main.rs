use clap::Parser;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use rusty_netgen::config::NetworkConfig;
use rusty_netgen::document::NetworkDocument;
use rusty_netgen::generator::generate;

/// Generate a grid network with distance-dependent connection probabilities
#[derive(Parser, Debug)]
#[command(name = "rusty-netgen", version, author, long_about = None)]
struct Args {
    /// Path to the network configuration (default: the ACNet2 reference network)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed of the random source, overriding the one of the configuration
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path of the generated network (default: <network_id>.net.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = match args.config {
        Some(ref path) => {
            info!("Loading network configuration from: {}", path.display());
            NetworkConfig::load_from(path)?
        }
        None => {
            info!("No configuration specified. Generating the ACNet2 reference network.");
            NetworkConfig::acnet2()
        }
    };

    let (populations, projections) = config.build()?;
    for population in populations.iter() {
        debug!(
            "Population {}: {}x{} {} cells",
            population.id(),
            population.rows(),
            population.columns(),
            population.component()
        );
    }

    // An unseeded run still logs its seed so that it can be reproduced.
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    info!("Random seed: {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let generated = generate(&populations, &projections, &mut rng)?;
    println!("{}", generated.report()?);

    let document = NetworkDocument::build(&config.network_id, &populations, &projections, &generated)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.net.json", config.network_id)));
    info!("Saving to file...");
    document.save_to(&output)?;
    info!("Written network file to: {}", output.display());

    Ok(())
}
