//! Module implementing rectangular grid populations of point neurons.
//!
//! A population of `rows x columns` cells is laid out in the (x, z) plane with a uniform spacing
//! along each axis. The cell at `(row, column)` has index `row * columns + column` and sits at
//! `(row * row_spacing, column * column_spacing)`.

use itertools::iproduct;

use super::error::ConnectivityError;

/// Represents a single cell of a grid population.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Cell {
    /// The index of the cell within its population.
    pub index: usize,
    /// The row of the cell in the grid.
    pub row: usize,
    /// The column of the cell in the grid.
    pub column: usize,
    /// The planar position (x, z) of the cell.
    pub position: (f64, f64),
}

impl Cell {
    /// Returns the Euclidean distance between the two cells in the plane.
    pub fn distance_to(&self, other: &Cell) -> f64 {
        let dx = self.position.0 - other.position.0;
        let dz = self.position.1 - other.position.1;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Represents a named rectangular grid of point neurons sharing the same cell component.
#[derive(Debug, PartialEq, Clone)]
pub struct GridPopulation {
    id: String,
    component: String,
    rows: usize,
    columns: usize,
    row_spacing: f64,
    column_spacing: f64,
    /// Number of segments of the cell model, if known.
    num_segments: Option<u32>,
}

impl GridPopulation {
    /// Create a new grid population with the specified parameters.
    /// Returns an error if the grid is empty or if a spacing is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_netgen::population::GridPopulation;
    ///
    /// let population = GridPopulation::build("pyramidals_48", "pyr_4_sym", 48, 48, 40.0, 40.0).unwrap();
    /// assert_eq!(population.size(), 2304);
    /// assert_eq!(population.index(1, 2), 50);
    /// ```
    pub fn build(
        id: impl Into<String>,
        component: impl Into<String>,
        rows: usize,
        columns: usize,
        row_spacing: f64,
        column_spacing: f64,
    ) -> Result<Self, ConnectivityError> {
        let id = id.into();

        if id.is_empty() {
            return Err(ConnectivityError::InvalidParameter(
                "Population id must not be empty".into(),
            ));
        }

        if rows == 0 || columns == 0 {
            return Err(ConnectivityError::EmptyPopulation(format!(
                "population {} has a {}x{} grid",
                id, rows, columns
            )));
        }

        if rows.checked_mul(columns).is_none() {
            return Err(ConnectivityError::InvalidParameter(format!(
                "The {}x{} grid of population {} has too many cells",
                rows, columns, id
            )));
        }

        for (axis, spacing) in [("row", row_spacing), ("column", column_spacing)] {
            if !(spacing > 0.0 && spacing.is_finite()) {
                return Err(ConnectivityError::InvalidParameter(format!(
                    "The {} spacing of population {} must be positive and finite, got {}",
                    axis, id, spacing
                )));
            }
        }

        Ok(GridPopulation {
            id,
            component: component.into(),
            rows,
            columns,
            row_spacing,
            column_spacing,
            num_segments: None,
        })
    }

    /// Declare the number of segments of the cell model, enabling segment id checks.
    pub fn with_num_segments(mut self, num_segments: u32) -> Result<Self, ConnectivityError> {
        if num_segments == 0 {
            return Err(ConnectivityError::InvalidParameter(format!(
                "The cell model of population {} must have at least one segment",
                self.id
            )));
        }
        self.num_segments = Some(num_segments);
        Ok(self)
    }

    /// Returns the population id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the cell component shared by all cells of the population.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the number of rows of the grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns of the grid.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the spacing between two consecutive rows.
    pub fn row_spacing(&self) -> f64 {
        self.row_spacing
    }

    /// Returns the spacing between two consecutive columns.
    pub fn column_spacing(&self) -> f64 {
        self.column_spacing
    }

    /// Returns the number of cells in the population.
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Returns the index of the cell at the given grid coordinates.
    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Returns the planar position (x, z) of the cell at the given grid coordinates.
    pub fn position(&self, row: usize, column: usize) -> (f64, f64) {
        (
            row as f64 * self.row_spacing,
            column as f64 * self.column_spacing,
        )
    }

    /// Returns the cell at the given grid coordinates.
    pub fn cell(&self, row: usize, column: usize) -> Result<Cell, ConnectivityError> {
        if row >= self.rows || column >= self.columns {
            return Err(ConnectivityError::InvalidParameter(format!(
                "Cell ({}, {}) is out of the {}x{} grid of population {}",
                row, column, self.rows, self.columns, self.id
            )));
        }
        Ok(self.cell_unchecked(row, column))
    }

    fn cell_unchecked(&self, row: usize, column: usize) -> Cell {
        Cell {
            index: self.index(row, column),
            row,
            column,
            position: self.position(row, column),
        }
    }

    /// Returns an iterator over all cells, in increasing index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        iproduct!(0..self.rows, 0..self.columns).map(|(row, column)| self.cell_unchecked(row, column))
    }

    /// Check that a connection can be attached to the given segment of the cell model.
    /// Any segment id is accepted when the number of segments is unknown.
    pub fn check_segment(&self, segment_id: u32) -> Result<(), ConnectivityError> {
        match self.num_segments {
            Some(n) if segment_id >= n => Err(ConnectivityError::InvalidParameter(format!(
                "Unknown segment {} on the cell model {} of population {} ({} segments)",
                segment_id, self.component, self.id, n
            ))),
            _ => Ok(()),
        }
    }

    /// Returns the path of a cell instance, as used to reference connection endpoints.
    pub fn cell_path(&self, index: usize) -> String {
        format!("../{}/{}/{}", self.id, index, self.component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_invalid() {
        assert!(matches!(
            GridPopulation::build("exc", "pyr", 0, 4, 10.0, 10.0),
            Err(ConnectivityError::EmptyPopulation(_))
        ));
        assert!(matches!(
            GridPopulation::build("exc", "pyr", 4, 4, 0.0, 10.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
        assert!(matches!(
            GridPopulation::build("exc", "pyr", 4, 4, 10.0, -1.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
        assert!(matches!(
            GridPopulation::build("exc", "pyr", 4, 4, f64::NAN, 10.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
        assert!(matches!(
            GridPopulation::build("", "pyr", 4, 4, 10.0, 10.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_build_too_many_cells() {
        assert!(matches!(
            GridPopulation::build("exc", "pyr", usize::MAX, 2, 1.0, 1.0),
            Err(ConnectivityError::InvalidParameter(_))
        ));

        let population = GridPopulation::build("exc", "pyr", usize::MAX, 1, 1.0, 1.0).unwrap();
        assert_eq!(population.size(), usize::MAX);
    }

    #[test]
    fn test_cells_are_dense() {
        let population = GridPopulation::build("exc", "pyr", 3, 5, 40.0, 20.0).unwrap();
        let indices: Vec<usize> = population.cells().map(|c| c.index).collect();
        assert_eq!(indices, (0..15).collect::<Vec<usize>>());

        let cell = population.cell(2, 3).unwrap();
        assert_eq!(cell.index, 13);
        assert_eq!(cell.position, (80.0, 60.0));

        assert!(population.cell(3, 0).is_err());
    }

    #[test]
    fn test_distance() {
        let population = GridPopulation::build("exc", "pyr", 4, 4, 30.0, 40.0).unwrap();
        let a = population.cell(0, 0).unwrap();
        let b = population.cell(1, 1).unwrap();
        assert_eq!(a.distance_to(&b), 50.0);
        assert_eq!(b.distance_to(&a), 50.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_segments() {
        let population = GridPopulation::build("inh", "basket", 2, 2, 80.0, 80.0).unwrap();
        assert_eq!(population.check_segment(42), Ok(()));

        let population = population.with_num_segments(2).unwrap();
        assert_eq!(population.check_segment(1), Ok(()));
        assert!(matches!(
            population.check_segment(2),
            Err(ConnectivityError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_cell_path() {
        let population = GridPopulation::build("baskets_12", "basket", 2, 2, 80.0, 80.0).unwrap();
        assert_eq!(population.cell_path(3), "../baskets_12/3/basket");
    }
}
