//! Network document produced by a generation run.
//!
//! The document follows the layout of a NeuroML network: populations listing their cell instances
//! with their locations, and projections listing their connections, each endpoint being referenced
//! by a `../<population>/<index>/<component>` path. It is persisted as JSON.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::error::ConnectivityError;
use super::generator::{find_population, Generated};
use super::population::GridPopulation;
use super::projection::Projection;

/// Location of a cell instance.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A cell instance of a population.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Instance {
    pub id: usize,
    pub location: Location,
}

/// A population and all its cell instances.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PopulationEntry {
    pub id: String,
    pub component: String,
    pub size: usize,
    pub instances: Vec<Instance>,
}

/// A connection, whose endpoints are referenced by `../<population>/<index>/<component>` paths.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ConnectionEntry {
    pub id: usize,
    pub pre_cell_id: String,
    pub pre_segment_id: u32,
    pub pre_fraction_along: f64,
    pub post_cell_id: String,
    pub post_segment_id: u32,
    pub post_fraction_along: f64,
}

/// A projection and all its connections, in creation order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ProjectionEntry {
    pub id: String,
    pub presynaptic_population: String,
    pub postsynaptic_population: String,
    pub synapse: String,
    pub connections: Vec<ConnectionEntry>,
}

/// The serialized description of a generated network.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NetworkDocument {
    pub id: String,
    pub populations: Vec<PopulationEntry>,
    pub projections: Vec<ProjectionEntry>,
}

impl NetworkDocument {
    /// Assemble the document of a generated network.
    /// Returns an error if the generated outcome does not match the provided projections.
    pub fn build(
        id: impl Into<String>,
        populations: &[GridPopulation],
        projections: &[Projection],
        generated: &Generated,
    ) -> Result<Self, ConnectivityError> {
        let population_entries = populations
            .iter()
            .map(|population| PopulationEntry {
                id: population.id().to_string(),
                component: population.component().to_string(),
                size: population.size(),
                instances: population
                    .cells()
                    .map(|cell| Instance {
                        id: cell.index,
                        location: Location {
                            x: cell.position.0,
                            y: 0.0,
                            z: cell.position.1,
                        },
                    })
                    .collect(),
            })
            .collect();

        let mut projection_entries = Vec::with_capacity(projections.len());
        for projection in projections.iter() {
            let outcome = generated.get(projection.id()).ok_or_else(|| {
                ConnectivityError::InvalidParameter(format!(
                    "No connection was generated for projection {}",
                    projection.id()
                ))
            })?;
            let pre = find_population(populations, projection.presynaptic_population())?;
            let post = find_population(populations, projection.postsynaptic_population())?;

            let connections = outcome
                .connections()
                .iter()
                .map(|c| ConnectionEntry {
                    id: c.id(),
                    pre_cell_id: pre.cell_path(c.source_index()),
                    pre_segment_id: c.source_segment_id(),
                    pre_fraction_along: c.fraction_along(),
                    post_cell_id: post.cell_path(c.target_index()),
                    post_segment_id: c.target_segment_id(),
                    post_fraction_along: c.fraction_along(),
                })
                .collect();

            projection_entries.push(ProjectionEntry {
                id: projection.id().to_string(),
                presynaptic_population: pre.id().to_string(),
                postsynaptic_population: post.id().to_string(),
                synapse: projection.synapse().to_string(),
                connections,
            });
        }

        Ok(NetworkDocument {
            id: id.into(),
            populations: population_entries,
            projections: projection_entries,
        })
    }

    /// Returns the total number of connections in the document.
    pub fn num_connections(&self) -> usize {
        self.projections.iter().map(|p| p.connections.len()).sum()
    }

    /// Write the document to the given path as pretty-printed JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConnectivityError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a document previously written with [`save_to`](NetworkDocument::save_to).
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<NetworkDocument, ConnectivityError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use rand::rngs::mock::StepRng;
    use tempfile::tempdir;

    fn small_network() -> (Vec<GridPopulation>, Vec<Projection>, Generated) {
        let populations = vec![
            GridPopulation::build("exc", "pyr", 2, 2, 40.0, 40.0).unwrap(),
            GridPopulation::build("inh", "basket", 1, 2, 80.0, 80.0).unwrap(),
        ];
        let projections = vec![
            Projection::build("exc_inh", "exc", "inh", "AMPA_syn_inh", 1.0, 1e6)
                .unwrap()
                .with_segments(0, 1),
            Projection::build("exc_exc", "exc", "exc", "AMPA_syn", 0.0, 1e6).unwrap(),
            Projection::build("inh_exc", "inh", "exc", "GABA_syn", 0.0, 1e6).unwrap(),
            Projection::build("inh_inh", "inh", "inh", "GABA_syn_inh", 0.0, 1e6).unwrap(),
        ];
        let generated = generate(&populations, &projections, &mut StepRng::new(1 << 63, 0)).unwrap();
        (populations, projections, generated)
    }

    #[test]
    fn test_build() {
        let (populations, projections, generated) = small_network();
        let document = NetworkDocument::build("net", &populations, &projections, &generated).unwrap();

        assert_eq!(document.populations.len(), 2);
        assert_eq!(document.populations[0].size, 4);
        assert_eq!(
            document.populations[0].instances[3],
            Instance {
                id: 3,
                location: Location {
                    x: 40.0,
                    y: 0.0,
                    z: 40.0
                }
            }
        );

        assert_eq!(document.num_connections(), 8);
        let first = &document.projections[0].connections[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.pre_cell_id, "../exc/0/pyr");
        assert_eq!(first.post_cell_id, "../inh/0/basket");
        assert_eq!(first.post_segment_id, 1);
        assert_eq!(first.pre_fraction_along, 0.5);
        assert_eq!(first.post_fraction_along, 0.5);
    }

    #[test]
    fn test_build_missing_outcome() {
        let (populations, mut projections, generated) = small_network();
        projections.push(Projection::build("inh_exc_bis", "inh", "exc", "GABA_syn", 0.5, 10.0).unwrap());
        assert!(matches!(
            NetworkDocument::build("net", &populations, &projections, &generated),
            Err(ConnectivityError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let (populations, projections, generated) = small_network();
        let document = NetworkDocument::build("net", &populations, &projections, &generated).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("net.net.json");
        document.save_to(&path).unwrap();

        let loaded = NetworkDocument::load_from(&path).unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            NetworkDocument::load_from(dir.path().join("missing.json")),
            Err(ConnectivityError::IOError(_))
        ));
    }
}
