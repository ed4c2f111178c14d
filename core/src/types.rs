use ndarray::Array2;

/// Single coordinate axis used for grid height, width, and positions.
pub type Coord = u8;

/// Count type used for cell counts and linear indices.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Numeric content of a matrix cell.
pub type Value = i32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major position of `coords` inside a grid of `size`.
pub const fn linear_index(coords: Coord2, size: Coord2) -> CellCount {
    mult(coords.0, size.1) + coords.1 as CellCount
}

/// Next coordinate after `coords` in raster order, `None` past the last cell.
pub const fn next_in_raster(coords: Coord2, bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (rows, cols) = bounds;

    if col + 1 < cols {
        Some((row, col + 1))
    } else if row + 1 < rows {
        Some((row + 1, 0))
    } else {
        None
    }
}

pub trait RasterIterExt {
    fn iter_raster(&self) -> RasterIter;
}

impl<T> RasterIterExt for Array2<T> {
    fn iter_raster(&self) -> RasterIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        RasterIter::new(size)
    }
}

/// Row-major walk over every coordinate of a grid.
#[derive(Debug)]
pub struct RasterIter {
    bounds: Coord2,
    next: Option<Coord2>,
}

impl RasterIter {
    pub fn new(bounds: Coord2) -> Self {
        let next = if bounds.0 > 0 && bounds.1 > 0 {
            Some((0, 0))
        } else {
            None
        };
        Self { bounds, next }
    }
}

impl Iterator for RasterIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = next_in_raster(current, self.bounds);
        Some(current)
    }
}
