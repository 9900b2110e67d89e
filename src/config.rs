//! Network configuration, read from JSON files.
//!
//! ```json
//! {
//!   "network_id": "ACNet2_Full",
//!   "seed": 42,
//!   "populations": [
//!     { "id": "pyramidals_48", "component": "pyr_4_sym", "rows": 48, "columns": 48,
//!       "row_spacing": 40.0, "column_spacing": 40.0 }
//!   ],
//!   "projections": [
//!     { "id": "SmallNet_pyr_pyr", "presynaptic_population": "pyramidals_48",
//!       "postsynaptic_population": "pyramidals_48", "synapse": "AMPA_syn",
//!       "post_segment_id": 3, "probability": 0.15 }
//!   ]
//! }
//! ```
//!
//! When a projection does not set its `length_scale`, it defaults to
//! [`LENGTH_SCALE_FACTOR`](crate::LENGTH_SCALE_FACTOR) times the row spacing of the first population.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::error::ConnectivityError;
use super::generator::validate;
use super::population::GridPopulation;
use super::projection::Projection;
use super::LENGTH_SCALE_FACTOR;

/// Description of a grid population.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PopulationConfig {
    pub id: String,
    pub component: String,
    pub rows: usize,
    pub columns: usize,
    pub row_spacing: f64,
    pub column_spacing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_segments: Option<u32>,
}

/// Description of a projection; its length scale falls back to the default one when absent.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ProjectionConfig {
    pub id: String,
    pub presynaptic_population: String,
    pub postsynaptic_population: String,
    pub synapse: String,
    #[serde(default)]
    pub pre_segment_id: u32,
    pub post_segment_id: u32,
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_scale: Option<f64>,
}

/// Description of the network to generate.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NetworkConfig {
    pub network_id: String,
    /// Seed of the random source, a fresh one is drawn when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub populations: Vec<PopulationConfig>,
    pub projections: Vec<ProjectionConfig>,
}

impl NetworkConfig {
    /// The reference network: a 48x48 grid of pyramidal cells and a 24x24 grid of basket cells,
    /// connected all-to-all by four projections.
    pub fn acnet2() -> Self {
        let exc = "pyramidals_48";
        let inh = "baskets_12";

        let projection = |id: &str, pre: &str, post: &str, synapse: &str, segment: u32, p: f64| {
            ProjectionConfig {
                id: id.into(),
                presynaptic_population: pre.into(),
                postsynaptic_population: post.into(),
                synapse: synapse.into(),
                pre_segment_id: 0,
                post_segment_id: segment,
                probability: p,
                length_scale: None,
            }
        };

        NetworkConfig {
            network_id: "ACNet2_Full".into(),
            seed: None,
            populations: vec![
                PopulationConfig {
                    id: exc.into(),
                    component: "pyr_4_sym".into(),
                    rows: 48,
                    columns: 48,
                    row_spacing: 40.0,
                    column_spacing: 40.0,
                    num_segments: None,
                },
                PopulationConfig {
                    id: inh.into(),
                    component: "basket".into(),
                    rows: 24,
                    columns: 24,
                    row_spacing: 80.0,
                    column_spacing: 80.0,
                    num_segments: None,
                },
            ],
            projections: vec![
                // middle apical dendrite
                projection("SmallNet_pyr_pyr", exc, exc, "AMPA_syn", 3, 0.15),
                // dendrite
                projection("SmallNet_pyr_bask", exc, inh, "AMPA_syn_inh", 1, 0.45),
                // basal dendrite
                projection("SmallNet_bask_pyr", inh, exc, "GABA_syn", 6, 0.6),
                // soma
                projection("SmallNet_bask_bask", inh, inh, "GABA_syn_inh", 0, 0.6),
            ],
        }
    }

    /// Read a configuration from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<NetworkConfig, ConnectivityError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Returns the default length scale of the projections.
    pub fn default_length_scale(&self) -> Result<f64, ConnectivityError> {
        self.populations
            .first()
            .map(|p| LENGTH_SCALE_FACTOR * p.row_spacing)
            .ok_or_else(|| {
                ConnectivityError::EmptyPopulation("the configuration has no population".into())
            })
    }

    /// Build and validate the populations and projections of the network.
    pub fn build(&self) -> Result<(Vec<GridPopulation>, Vec<Projection>), ConnectivityError> {
        let default_length_scale = self.default_length_scale()?;

        let populations = self
            .populations
            .iter()
            .map(|p| {
                let population = GridPopulation::build(
                    p.id.as_str(),
                    p.component.as_str(),
                    p.rows,
                    p.columns,
                    p.row_spacing,
                    p.column_spacing,
                )?;
                match p.num_segments {
                    Some(n) => population.with_num_segments(n),
                    None => Ok(population),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let projections = self
            .projections
            .iter()
            .map(|p| {
                Ok(Projection::build(
                    p.id.as_str(),
                    p.presynaptic_population.as_str(),
                    p.postsynaptic_population.as_str(),
                    p.synapse.as_str(),
                    p.probability,
                    p.length_scale.unwrap_or(default_length_scale),
                )?
                .with_segments(p.pre_segment_id, p.post_segment_id))
            })
            .collect::<Result<Vec<_>, ConnectivityError>>()?;

        validate(&populations, &projections)?;

        Ok((populations, projections))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig::acnet2()
    }
}
