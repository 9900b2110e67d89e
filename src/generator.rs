//! Distance-dependent generation of the connectivity between grid populations.
//!
//! For every projection, every (presynaptic, postsynaptic) cell pair is a candidate connection,
//! self-pairs included. A candidate at distance `d` is accepted with probability
//! `p0 * exp(-(d / sigma)^2)`: a uniform number `u` is drawn in [0, 1) and the connection is
//! created iff `0 < u <= p`.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use rusty_netgen::generator::generate;
//! use rusty_netgen::population::GridPopulation;
//! use rusty_netgen::projection::Projection;
//!
//! let populations = vec![GridPopulation::build("exc", "pyr", 4, 4, 40.0, 40.0).unwrap()];
//! let projections = vec![Projection::build("exc_exc", "exc", "exc", "AMPA_syn", 0.0, 400.0).unwrap()];
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let generated = generate(&populations, &projections, &mut rng).unwrap();
//! assert_eq!(generated.num_connections(), 0);
//! ```

use log::{debug, info, trace};
use nalgebra::DMatrix;
use rand::Rng;
use std::collections::HashSet;

use super::connection::Connection;
use super::error::ConnectivityError;
use super::population::GridPopulation;
use super::projection::Projection;
use super::stats::{DegreeStats, NetworkReport, ProjectionSummary};

/// The connections generated for one projection, together with the out-degree of its presynaptic cells.
#[derive(Debug, PartialEq, Clone)]
pub struct ProjectionOutcome {
    projection_id: String,
    connections: Vec<Connection>,
    out_degrees: DMatrix<u32>,
}

impl ProjectionOutcome {
    /// Returns the id of the projection.
    pub fn projection_id(&self) -> &str {
        &self.projection_id
    }

    /// Returns the connections, in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns the number of outgoing connections of each presynaptic cell, indexed by (row, column).
    pub fn out_degrees(&self) -> &DMatrix<u32> {
        &self.out_degrees
    }

    /// Returns the number of connections.
    pub fn num_connections(&self) -> usize {
        self.connections.len()
    }

    /// Returns the out-degree statistics of the projection.
    pub fn stats(&self) -> Result<DegreeStats, ConnectivityError> {
        DegreeStats::from_counts(&self.out_degrees)
    }
}

/// The outcome of a generation run, one entry per projection in the order they were provided.
#[derive(Debug, PartialEq, Clone)]
pub struct Generated {
    outcomes: Vec<ProjectionOutcome>,
}

impl Generated {
    /// Returns the outcomes of all projections.
    pub fn outcomes(&self) -> &[ProjectionOutcome] {
        &self.outcomes
    }

    /// Returns the outcome of the projection with the given id, if any.
    pub fn get(&self, projection_id: &str) -> Option<&ProjectionOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.projection_id == projection_id)
    }

    /// Returns the total number of connections over all projections.
    pub fn num_connections(&self) -> usize {
        self.outcomes.iter().map(|o| o.num_connections()).sum()
    }

    /// Returns the out-degree statistics of every projection.
    pub fn stats(&self) -> Result<Vec<(String, DegreeStats)>, ConnectivityError> {
        self.outcomes
            .iter()
            .map(|o| o.stats().map(|s| (o.projection_id.clone(), s)))
            .collect()
    }

    /// Returns the summary of the generated network.
    pub fn report(&self) -> Result<NetworkReport, ConnectivityError> {
        let summaries = self
            .outcomes
            .iter()
            .map(|o| {
                Ok(ProjectionSummary {
                    projection_id: o.projection_id.clone(),
                    num_connections: o.num_connections(),
                    stats: o.stats()?,
                })
            })
            .collect::<Result<Vec<_>, ConnectivityError>>()?;
        Ok(NetworkReport { summaries })
    }
}

/// Returns true if a uniform draw `u` accepts a candidate connection of probability `p`.
/// A draw of exactly zero is always rejected, so that a zero probability never yields a connection.
pub fn accepts(u: f64, p: f64) -> bool {
    0.0 < u && u <= p
}

/// Check that the populations and projections describe a consistent network.
///
/// Population ids must be unique, projections must refer to existing populations, exactly one
/// projection must connect every ordered pair of populations (self-pairs included), and segment
/// ids must exist on the cell models when their number of segments is known. A pair that should
/// stay unconnected is given a zero base probability.
pub fn validate(
    populations: &[GridPopulation],
    projections: &[Projection],
) -> Result<(), ConnectivityError> {
    if populations.is_empty() {
        return Err(ConnectivityError::EmptyPopulation(
            "at least one population is required".into(),
        ));
    }

    let mut population_ids = HashSet::new();
    for population in populations.iter() {
        if !population_ids.insert(population.id()) {
            return Err(ConnectivityError::DuplicatePopulation(
                population.id().to_string(),
            ));
        }
    }

    let mut pairs = HashSet::new();
    for projection in projections.iter() {
        let pre = find_population(populations, projection.presynaptic_population())?;
        let post = find_population(populations, projection.postsynaptic_population())?;

        if !pairs.insert((pre.id(), post.id())) {
            return Err(ConnectivityError::DuplicateProjection(format!(
                "{} connects {} to {}, which are already connected",
                projection.id(),
                pre.id(),
                post.id()
            )));
        }

        pre.check_segment(projection.pre_segment_id())?;
        post.check_segment(projection.post_segment_id())?;
    }

    for pre in populations.iter() {
        for post in populations.iter() {
            if !pairs.contains(&(pre.id(), post.id())) {
                return Err(ConnectivityError::MissingProjection(format!(
                    "no projection from {} to {}",
                    pre.id(),
                    post.id()
                )));
            }
        }
    }

    Ok(())
}

pub(crate) fn find_population<'a>(
    populations: &'a [GridPopulation],
    id: &str,
) -> Result<&'a GridPopulation, ConnectivityError> {
    populations
        .iter()
        .find(|p| p.id() == id)
        .ok_or_else(|| ConnectivityError::UnknownPopulation(id.to_string()))
}

/// Generate the connections of every projection.
///
/// The inputs are validated before any number is drawn from `rng`. Projections are processed in
/// the given order, presynaptic cells and then postsynaptic cells in increasing index order, and
/// exactly one number is drawn per candidate pair, so a seeded `rng` yields a reproducible network.
pub fn generate<R: Rng>(
    populations: &[GridPopulation],
    projections: &[Projection],
    rng: &mut R,
) -> Result<Generated, ConnectivityError> {
    validate(populations, projections)?;

    let mut outcomes = Vec::with_capacity(projections.len());
    for projection in projections.iter() {
        let pre = find_population(populations, projection.presynaptic_population())?;
        let post = find_population(populations, projection.postsynaptic_population())?;
        outcomes.push(connect(projection, pre, post, rng));
    }

    let generated = Generated { outcomes };
    info!(
        "Generated network with {} connections over {} projections",
        generated.num_connections(),
        generated.outcomes.len()
    );
    Ok(generated)
}

fn connect<R: Rng>(
    projection: &Projection,
    pre: &GridPopulation,
    post: &GridPopulation,
    rng: &mut R,
) -> ProjectionOutcome {
    debug!(
        "Connecting {} ({} cells) to {} ({} cells) along {}",
        pre.id(),
        pre.size(),
        post.id(),
        post.size(),
        projection.id()
    );

    let mut connections = Vec::new();
    let mut out_degrees = DMatrix::<u32>::zeros(pre.rows(), pre.columns());

    for source in pre.cells() {
        trace!(
            "Looking at connections for {} cell at ({}, {})",
            pre.id(),
            source.row,
            source.column
        );
        for target in post.cells() {
            let p = projection.connection_probability(source.distance_to(&target));
            let u: f64 = rng.gen();
            if accepts(u, p) {
                connections.push(Connection::new(
                    connections.len() + 1,
                    source.index,
                    projection.pre_segment_id(),
                    target.index,
                    projection.post_segment_id(),
                ));
                out_degrees[(source.row, source.column)] += 1;
            }
        }
    }

    debug!(
        "Projection {}: {} connections",
        projection.id(),
        connections.len()
    );

    ProjectionOutcome {
        projection_id: projection.id().to_string(),
        connections,
        out_degrees,
    }
}
