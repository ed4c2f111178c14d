use super::*;

/// Every cell drawn independently from a range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMatrixGenerator {
    range: ValueRange,
}

impl RandomMatrixGenerator {
    pub fn new(range: ValueRange) -> Self {
        Self { range }
    }
}

impl MatrixGenerator for RandomMatrixGenerator {
    fn generate<R: Rng + ?Sized>(self, size: Coord2, rng: &mut R) -> Result<Matrix> {
        let values = (0..mult(size.0, size.1))
            .map(|_| self.range.sample(rng))
            .collect();
        Matrix::from_rows(size, values)
    }
}
