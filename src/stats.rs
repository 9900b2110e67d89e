//! Descriptive statistics of the generated connectivity.
//!
//! For every projection, the number of outgoing connections of each presynaptic cell is summarized
//! by its mean, (population) standard deviation, maximum and minimum.

use itertools::{Itertools, MinMaxResult};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ConnectivityError;

/// Summary of the out-degrees of the presynaptic cells of a projection.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DegreeStats {
    /// The mean out-degree.
    pub mean: f64,
    /// The standard deviation of the out-degrees, normalized by the number of cells.
    pub std_dev: f64,
    /// The largest out-degree.
    pub max: u32,
    /// The smallest out-degree.
    pub min: u32,
}

impl DegreeStats {
    /// Compute the statistics of an out-degree matrix.
    /// Returns an error if the matrix does not hold any cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::DMatrix;
    /// use rusty_netgen::stats::DegreeStats;
    ///
    /// let counts = DMatrix::from_row_slice(2, 2, &[0, 1, 2, 3]);
    /// let stats = DegreeStats::from_counts(&counts).unwrap();
    /// assert_eq!(stats.mean, 1.5);
    /// assert_eq!(stats.max, 3);
    /// assert_eq!(stats.min, 0);
    /// ```
    pub fn from_counts(counts: &DMatrix<u32>) -> Result<Self, ConnectivityError> {
        let (min, max) = match counts.iter().minmax() {
            MinMaxResult::NoElements => {
                return Err(ConnectivityError::EmptyPopulation(
                    "cannot compute out-degree statistics without any cell".into(),
                ))
            }
            MinMaxResult::OneElement(&x) => (x, x),
            MinMaxResult::MinMax(&min, &max) => (min, max),
        };

        let length = counts.len() as f64;
        let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / length;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / length;

        Ok(DegreeStats {
            mean,
            std_dev: variance.sqrt(),
            max,
            min,
        })
    }
}

/// One line of a network report.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// The projection id.
    pub projection_id: String,
    /// The number of connections generated for the projection.
    pub num_connections: usize,
    /// The out-degree statistics of the projection.
    pub stats: DegreeStats,
}

/// Human-readable summary of a generated network.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NetworkReport {
    /// One summary per projection, in generation order.
    pub summaries: Vec<ProjectionSummary>,
}

impl NetworkReport {
    /// Returns the total number of connections over all projections.
    pub fn num_connections(&self) -> usize {
        self.summaries.iter().map(|s| s.num_connections).sum()
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Generated network with {}",
            self.summaries
                .iter()
                .map(|s| format!("{} {}", s.num_connections, s.projection_id))
                .join(", ")
        )?;
        writeln!(f, "-----------------------------------")?;
        writeln!(f, "Information on network generated:")?;
        for summary in self.summaries.iter() {
            writeln!(
                f,
                "{}: mean {:.4}, std {:.4}, max {}, min {}",
                summary.projection_id,
                summary.stats.mean,
                summary.stats.std_dev,
                summary.stats.max,
                summary.stats.min
            )?;
        }
        Ok(())
    }
}
