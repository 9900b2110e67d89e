//! Module implementing the concept of connections in a network.

use serde::{Deserialize, Serialize};

use super::FRACTION_ALONG;

/// Represents a directed synaptic connection between two cells of a projection.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Connection {
    /// Connection ID, unique within its projection (1-based, in creation order)
    id: usize,
    /// Index of the presynaptic cell within its population
    source_index: usize,
    /// Segment of the presynaptic cell where the connection starts
    source_segment_id: u32,
    /// Index of the postsynaptic cell within its population
    target_index: usize,
    /// Segment of the postsynaptic cell where the connection ends
    target_segment_id: u32,
}

impl Connection {
    /// Create a new connection with the specified parameters.
    pub fn new(
        id: usize,
        source_index: usize,
        source_segment_id: u32,
        target_index: usize,
        target_segment_id: u32,
    ) -> Self {
        Connection {
            id,
            source_index,
            source_segment_id,
            target_index,
            target_segment_id,
        }
    }

    /// Returns the ID of the connection.
    /// The ID is unique within the projection.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the index of the source cell.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Returns the segment of the source cell.
    pub fn source_segment_id(&self) -> u32 {
        self.source_segment_id
    }

    /// Returns the index of the target cell.
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Returns the segment of the target cell.
    pub fn target_segment_id(&self) -> u32 {
        self.target_segment_id
    }

    /// Returns the relative position along both segments where the connection is attached.
    pub fn fraction_along(&self) -> f64 {
        FRACTION_ALONG
    }
}
