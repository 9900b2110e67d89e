//! This crate provides tools for generating spatially connected grid networks of point neurons in Rust.
//!
//! # Creating Populations and Projections
//!
//! ```rust
//! use rusty_netgen::population::GridPopulation;
//! use rusty_netgen::projection::Projection;
//!
//! // A 48x48 grid of pyramidal cells and a 24x24 grid of basket cells
//! let exc = GridPopulation::build("pyramidals_48", "pyr_4_sym", 48, 48, 40.0, 40.0).unwrap();
//! let inh = GridPopulation::build("baskets_12", "basket", 24, 24, 80.0, 80.0).unwrap();
//!
//! // Pyramidal cells project onto the dendrite (segment 1) of basket cells
//! let projection = Projection::build("SmallNet_pyr_bask", "pyramidals_48", "baskets_12", "AMPA_syn_inh", 0.45, 400.0)
//!     .unwrap()
//!     .with_segments(0, 1);
//!
//! assert_eq!(exc.size() + inh.size(), 2880);
//! assert_eq!(projection.connection_probability(0.0), 0.45);
//! ```
//!
//! ## From a File
//!
//! See [`config::NetworkConfig`], whose [`acnet2`](config::NetworkConfig::acnet2) constructor
//! describes the reference network.
//!
//! # Generating Connections
//!
//! ```rust
//! use rusty_netgen::config::NetworkConfig;
//! use rusty_netgen::generator::generate;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut config = NetworkConfig::acnet2();
//! for population in config.populations.iter_mut() {
//!     population.rows = 4;
//!     population.columns = 4;
//! }
//! let (populations, projections) = config.build().unwrap();
//!
//! // The same seed always yields the same network
//! let first = generate(&populations, &projections, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
//! let second = generate(&populations, &projections, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
//! assert_eq!(first, second);
//!
//! let report = first.report().unwrap();
//! assert_eq!(report.summaries.len(), 4);
//! ```

pub mod connection;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod population;
pub mod projection;
pub mod stats;

/// The relative position along a segment where both ends of a connection are attached.
pub const FRACTION_ALONG: f64 = 0.5;
/// The default length scale of a projection, in units of the row spacing of the first population.
pub const LENGTH_SCALE_FACTOR: f64 = 10.0;
