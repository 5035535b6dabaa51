use crate::math::{Point, Real, UnitVector, Vector};
use crate::water::{WaterField, WaterSample};
use na::{DMatrix, DMatrixViewMut};

/// Errors raised when building a [`WaterGrid`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaterGridError {
    /// A grid needs at least two nodes along each axis.
    #[error("a water grid needs at least 2x2 nodes, got {nrows}x{ncols}.")]
    TooSmall {
        /// The number of rows given.
        nrows: usize,
        /// The number of columns given.
        ncols: usize,
    },
    /// Two of the matrices describing the grid have different sizes.
    #[error("the {name} matrix is {got:?} but the surface heights are {expected:?}.")]
    DimensionMismatch {
        /// The name of the offending matrix.
        name: &'static str,
        /// The expected `(nrows, ncols)`.
        expected: (usize, usize),
        /// The actual `(nrows, ncols)`.
        got: (usize, usize),
    },
    /// The cell size isn't a positive finite number.
    #[error("the cell size must be positive and finite.")]
    InvalidCellSize,
}

/// A shallow-water grid: water surface, bed and current sampled on a regular XY grid.
///
/// Row `i` is at `y = origin.y + i * cell_size`, column `j` at
/// `x = origin.x + j * cell_size`. Values between nodes are interpolated
/// bilinearly. Everything outside of the grid is dry.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct WaterGrid {
    origin: Point<Real>,
    cell_size: Real,
    surface: DMatrix<Real>,
    bed: DMatrix<Real>,
    velocity_x: DMatrix<Real>,
    velocity_y: DMatrix<Real>,
}

impl WaterGrid {
    /// Creates a still water grid from its surface heights and bed elevations.
    ///
    /// Only the `x` and `y` components of `origin` are used.
    pub fn new(
        origin: Point<Real>,
        cell_size: Real,
        surface: DMatrix<Real>,
        bed: DMatrix<Real>,
    ) -> Result<Self, WaterGridError> {
        let (nrows, ncols) = surface.shape();

        if nrows < 2 || ncols < 2 {
            return Err(WaterGridError::TooSmall { nrows, ncols });
        }

        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(WaterGridError::InvalidCellSize);
        }

        check_shape("bed", &bed, (nrows, ncols))?;

        Ok(Self {
            origin: Point::new(origin.x, origin.y, 0.0),
            cell_size,
            surface,
            bed,
            velocity_x: DMatrix::zeros(nrows, ncols),
            velocity_y: DMatrix::zeros(nrows, ncols),
        })
    }

    /// Sets the planar water velocities at each node.
    pub fn set_velocities(
        &mut self,
        velocity_x: DMatrix<Real>,
        velocity_y: DMatrix<Real>,
    ) -> Result<(), WaterGridError> {
        let shape = self.surface.shape();
        check_shape("x velocity", &velocity_x, shape)?;
        check_shape("y velocity", &velocity_y, shape)?;
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
        Ok(())
    }

    /// The surface heights at each node.
    pub fn surface(&self) -> &DMatrix<Real> {
        &self.surface
    }

    /// Mutable access to the surface heights at each node.
    ///
    /// The heights can be changed but not the grid size. Use
    /// [`WaterGrid::set_surface`] to replace the whole matrix.
    pub fn surface_mut(&mut self) -> DMatrixViewMut<'_, Real> {
        let shape = self.surface.shape();
        self.surface.view_mut((0, 0), shape)
    }

    /// Replaces the surface heights at each node.
    ///
    /// The new matrix must have the same size as the bed.
    pub fn set_surface(&mut self, surface: DMatrix<Real>) -> Result<(), WaterGridError> {
        check_shape("surface", &surface, self.bed.shape())?;
        self.surface = surface;
        Ok(())
    }

    /// The bed elevation at each node.
    pub fn bed(&self) -> &DMatrix<Real> {
        &self.bed
    }

    /// The distance between two adjacent nodes.
    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    // Fractional (row, column) coordinates of the vertical of `pt`.
    fn grid_coords(&self, pt: &Point<Real>) -> (Real, Real) {
        (
            (pt.y - self.origin.y) / self.cell_size,
            (pt.x - self.origin.x) / self.cell_size,
        )
    }

    fn is_inside(&self, fi: Real, fj: Real) -> bool {
        let (nrows, ncols) = self.surface.shape();
        fi >= 0.0 && fj >= 0.0 && fi <= (nrows - 1) as Real && fj <= (ncols - 1) as Real
    }

    fn interpolate(&self, values: &DMatrix<Real>, fi: Real, fj: Real) -> Real {
        let (nrows, ncols) = values.shape();
        let fi = fi.max(0.0).min((nrows - 1) as Real);
        let fj = fj.max(0.0).min((ncols - 1) as Real);
        let i = (fi.floor() as usize).min(nrows - 2);
        let j = (fj.floor() as usize).min(ncols - 2);
        let ti = fi - i as Real;
        let tj = fj - j as Real;

        let h00 = values[(i, j)];
        let h01 = values[(i, j + 1)];
        let h10 = values[(i + 1, j)];
        let h11 = values[(i + 1, j + 1)];

        let h0 = h00 * (1.0 - tj) + h01 * tj;
        let h1 = h10 * (1.0 - tj) + h11 * tj;
        h0 * (1.0 - ti) + h1 * ti
    }
}

fn check_shape(
    name: &'static str,
    m: &DMatrix<Real>,
    expected: (usize, usize),
) -> Result<(), WaterGridError> {
    if m.shape() != expected {
        Err(WaterGridError::DimensionMismatch {
            name,
            expected,
            got: m.shape(),
        })
    } else {
        Ok(())
    }
}

impl WaterField for WaterGrid {
    fn sample_at(&self, position: &Point<Real>) -> WaterSample {
        let (fi, fj) = self.grid_coords(position);

        if !self.is_inside(fi, fj) {
            return WaterSample::dry();
        }

        let height = self.interpolate(&self.surface, fi, fj);
        let bed = self.interpolate(&self.bed, fi, fj);
        let velocity = Vector::new(
            self.interpolate(&self.velocity_x, fi, fj),
            self.interpolate(&self.velocity_y, fi, fj),
            0.0,
        );

        WaterSample {
            velocity,
            height,
            depth: (height - bed).max(0.0),
        }
    }

    fn normal_at(&self, position: &Point<Real>) -> UnitVector<Real> {
        let (nrows, ncols) = self.surface.shape();
        let (fi, fj) = self.grid_coords(position);
        let fi = fi.clamp(0.0, (nrows - 1) as Real);
        let fj = fj.clamp(0.0, (ncols - 1) as Real);

        // Central differences inside the grid, one-sided ones on its border.
        let (j0, j1) = ((fj - 1.0).max(0.0), (fj + 1.0).min((ncols - 1) as Real));
        let (i0, i1) = ((fi - 1.0).max(0.0), (fi + 1.0).min((nrows - 1) as Real));
        let dx = (self.interpolate(&self.surface, fi, j1) - self.interpolate(&self.surface, fi, j0))
            / ((j1 - j0) * self.cell_size);
        let dy = (self.interpolate(&self.surface, i1, fj) - self.interpolate(&self.surface, i0, fj))
            / ((i1 - i0) * self.cell_size);

        UnitVector::new_normalize(Vector::new(-dx, -dy, 1.0))
    }
}

#[cfg(test)]
mod test {
    use super::{WaterGrid, WaterGridError};
    use crate::math::{Point, Real, Vector};
    use crate::water::WaterField;
    use approx::assert_relative_eq;
    use na::DMatrix;

    fn slope() -> WaterGrid {
        // Surface rising by 1 per unit along +X, bed at -10.
        let surface = DMatrix::from_fn(3, 5, |_, j| j as Real);
        let bed = DMatrix::from_element(3, 5, -10.0);
        WaterGrid::new(Point::origin(), 1.0, surface, bed).unwrap()
    }

    #[test]
    fn bilinear_sampling_and_depth() {
        let grid = slope();
        let sample = grid.sample_at(&Point::new(2.5, 1.25, 100.0));
        assert_relative_eq!(sample.height, 2.5);
        assert_relative_eq!(sample.depth, 12.5);
    }

    #[test]
    fn outside_is_dry() {
        let grid = slope();
        let sample = grid.sample_at(&Point::new(-0.5, 1.0, 0.0));
        assert_eq!(sample.depth, 0.0);
        assert_eq!(sample.velocity, Vector::zeros());
    }

    #[test]
    fn normal_follows_the_gradient() {
        let grid = slope();
        let n = grid.normal_at(&Point::new(2.0, 1.0, 0.0));
        let expected = Vector::new(-1.0, 0.0, 1.0).normalize();
        assert_relative_eq!(*n, expected, epsilon = 1.0e-5);
    }

    #[test]
    fn normal_on_the_border_is_one_sided() {
        let grid = slope();
        let expected = Vector::new(-1.0, 0.0, 1.0).normalize();

        for x in [0.0, 0.5, 4.0] {
            let n = grid.normal_at(&Point::new(x, 1.0, 0.0));
            assert_relative_eq!(*n, expected, epsilon = 1.0e-5);
        }

        // Corner, and outside of the grid.
        let n = grid.normal_at(&Point::new(0.0, 0.0, 0.0));
        assert_relative_eq!(*n, expected, epsilon = 1.0e-5);
        let n = grid.normal_at(&Point::new(-3.0, 7.0, 0.0));
        assert_relative_eq!(*n, expected, epsilon = 1.0e-5);
    }

    #[test]
    fn surface_edits_keep_the_grid_size() {
        let mut grid = slope();
        grid.surface_mut().fill(2.0);
        assert_relative_eq!(grid.sample_at(&Point::new(1.5, 0.5, 0.0)).height, 2.0);

        assert_eq!(
            grid.set_surface(DMatrix::from_element(1, 1, 0.0)),
            Err(WaterGridError::DimensionMismatch {
                name: "surface",
                expected: (3, 5),
                got: (1, 1)
            })
        );
        assert_eq!(grid.surface().shape(), (3, 5));
        assert_relative_eq!(grid.sample_at(&Point::new(0.0, 0.0, -1.0)).height, 2.0);

        assert!(grid.set_surface(DMatrix::from_element(3, 5, 4.0)).is_ok());
        assert_relative_eq!(grid.sample_at(&Point::new(4.0, 2.0, 0.0)).height, 4.0);
    }

    #[test]
    fn mismatched_matrices_are_rejected() {
        let err = WaterGrid::new(
            Point::origin(),
            1.0,
            DMatrix::zeros(3, 3),
            DMatrix::zeros(2, 3),
        )
        .unwrap_err();
        assert_eq!(
            err,
            WaterGridError::DimensionMismatch {
                name: "bed",
                expected: (3, 3),
                got: (2, 3)
            }
        );

        let mut grid = slope();
        assert!(grid
            .set_velocities(DMatrix::zeros(3, 5), DMatrix::zeros(3, 4))
            .is_err());
    }
}
