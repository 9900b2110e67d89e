//! Module implementing projections, i.e., the connectivity rule between an ordered pair of populations.

use super::error::ConnectivityError;

/// Represents the rule connecting a presynaptic population to a postsynaptic population.
///
/// The probability for a cell pair at distance `d` to be connected is `p0 * exp(-(d / sigma)^2)`,
/// where `p0` is the base probability and `sigma` the length scale of the projection.
#[derive(Debug, PartialEq, Clone)]
pub struct Projection {
    id: String,
    presynaptic_population: String,
    postsynaptic_population: String,
    synapse: String,
    /// Segment of the presynaptic cell model where connections start.
    pre_segment_id: u32,
    /// Segment of the postsynaptic cell model where connections end.
    post_segment_id: u32,
    probability: f64,
    length_scale: f64,
}

impl Projection {
    /// Create a new projection with the specified parameters.
    /// Returns an error if the base probability is not in [0, 1] or if the length scale is not positive.
    /// An infinite length scale is accepted and yields a flat probability.
    pub fn build(
        id: impl Into<String>,
        presynaptic_population: impl Into<String>,
        postsynaptic_population: impl Into<String>,
        synapse: impl Into<String>,
        probability: f64,
        length_scale: f64,
    ) -> Result<Self, ConnectivityError> {
        let id = id.into();

        if !(0.0..=1.0).contains(&probability) {
            return Err(ConnectivityError::InvalidParameter(format!(
                "The base probability of projection {} must be in [0, 1], got {}",
                id, probability
            )));
        }

        if !(length_scale > 0.0) {
            return Err(ConnectivityError::InvalidParameter(format!(
                "The length scale of projection {} must be positive, got {}",
                id, length_scale
            )));
        }

        Ok(Projection {
            id,
            presynaptic_population: presynaptic_population.into(),
            postsynaptic_population: postsynaptic_population.into(),
            synapse: synapse.into(),
            pre_segment_id: 0,
            post_segment_id: 0,
            probability,
            length_scale,
        })
    }

    /// Set the segments where the connections of the projection are attached.
    pub fn with_segments(mut self, pre_segment_id: u32, post_segment_id: u32) -> Self {
        self.pre_segment_id = pre_segment_id;
        self.post_segment_id = post_segment_id;
        self
    }

    /// Returns the projection id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the id of the presynaptic population.
    pub fn presynaptic_population(&self) -> &str {
        &self.presynaptic_population
    }

    /// Returns the id of the postsynaptic population.
    pub fn postsynaptic_population(&self) -> &str {
        &self.postsynaptic_population
    }

    /// Returns the synapse type of the projection.
    pub fn synapse(&self) -> &str {
        &self.synapse
    }

    /// Returns the presynaptic segment id.
    pub fn pre_segment_id(&self) -> u32 {
        self.pre_segment_id
    }

    /// Returns the postsynaptic segment id.
    pub fn post_segment_id(&self) -> u32 {
        self.post_segment_id
    }

    /// Returns the base probability, i.e., the connection probability at zero distance.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Returns the length scale of the Gaussian falloff.
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Returns the probability for two cells at the given distance to be connected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_netgen::projection::Projection;
    ///
    /// let projection = Projection::build("pyr_pyr", "exc", "exc", "AMPA_syn", 0.5, 10.0).unwrap();
    /// assert_eq!(projection.connection_probability(0.0), 0.5);
    /// assert!((projection.connection_probability(10.0) - 0.5 * (-1.0_f64).exp()).abs() < 1e-12);
    /// ```
    pub fn connection_probability(&self, distance: f64) -> f64 {
        let ratio = distance / self.length_scale;
        self.probability * (-(ratio * ratio)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_invalid() {
        assert!(matches!(
            Projection::build("p", "a", "b", "syn", 1.5, 10.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
        assert!(matches!(
            Projection::build("p", "a", "b", "syn", -0.1, 10.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
        assert!(matches!(
            Projection::build("p", "a", "b", "syn", f64::NAN, 10.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
        assert!(matches!(
            Projection::build("p", "a", "b", "syn", 0.5, 0.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
        assert!(matches!(
            Projection::build("p", "a", "b", "syn", 0.5, f64::NAN),
            Err(ConnectivityError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_probability_is_non_increasing() {
        let projection = Projection::build("p", "a", "b", "syn", 0.6, 400.0).unwrap();
        let probabilities: Vec<f64> = (0..200)
            .map(|k| projection.connection_probability(k as f64 * 20.0))
            .collect();
        assert_eq!(probabilities[0], 0.6);
        assert!(probabilities.windows(2).all(|w| w[1] <= w[0]));
        assert!(probabilities[199] < 1e-12);
    }

    #[test]
    fn test_infinite_length_scale() {
        let projection = Projection::build("p", "a", "b", "syn", 0.3, f64::INFINITY).unwrap();
        assert_eq!(projection.connection_probability(0.0), 0.3);
        assert_eq!(projection.connection_probability(1e6), 0.3);
    }

    #[test]
    fn test_segments() {
        let projection = Projection::build("p", "a", "b", "syn", 0.3, 10.0).unwrap();
        assert_eq!(projection.pre_segment_id(), 0);
        assert_eq!(projection.post_segment_id(), 0);

        let projection = projection.with_segments(0, 6);
        assert_eq!(projection.post_segment_id(), 6);
    }
}
