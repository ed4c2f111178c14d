use alloc::vec::Vec;

use super::*;

/// Lays out fixed values in raster order and pads the remaining cells with
/// random fillers.
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralMatrixGenerator {
    values: Vec<Value>,
    filler: ValueRange,
}

impl LiteralMatrixGenerator {
    pub fn new(values: Vec<Value>, filler: ValueRange) -> Self {
        Self { values, filler }
    }

    pub fn level_one(filler: ValueRange) -> Self {
        Self::new(LEVEL_ONE_VALUES.to_vec(), filler)
    }
}

impl MatrixGenerator for LiteralMatrixGenerator {
    fn generate<R: Rng + ?Sized>(self, size: Coord2, rng: &mut R) -> Result<Matrix> {
        let total_cells = usize::from(mult(size.0, size.1));
        let mut values = self.values;

        if values.len() > total_cells {
            log::warn!(
                "Literal values do not fit, got {} but only {} cells, extra values dropped",
                values.len(),
                total_cells
            );
            values.truncate(total_cells);
        }
        while values.len() < total_cells {
            values.push(self.filler.sample(rng));
        }

        Matrix::from_rows(size, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn level_one_keeps_literals_first_then_pads() {
        let mut rng = SmallRng::seed_from_u64(1);
        let filler = ValueRange::new(1, 15).unwrap();

        let matrix = LiteralMatrixGenerator::level_one(filler)
            .generate((4, 4), &mut rng)
            .unwrap();
        let values: Vec<_> = matrix.iter().collect();

        assert_eq!(values[..14], LEVEL_ONE_VALUES);
        assert!(values[14..].iter().all(|&value| filler.contains(value)));
    }

    #[test]
    fn level_one_shape_needs_no_padding() {
        let mut rng = SmallRng::seed_from_u64(1);
        let filler = ValueRange::new(0, 0).unwrap();

        let matrix = LiteralMatrixGenerator::level_one(filler)
            .generate(LEVEL_ONE_SHAPE, &mut rng)
            .unwrap();

        assert_eq!(matrix[(1, 1)], 14);
        assert_eq!(matrix[(6, 0)], 12);
    }

    #[test]
    fn extra_literals_are_dropped() {
        let mut rng = SmallRng::seed_from_u64(1);
        let filler = ValueRange::new(0, 0).unwrap();

        let matrix = LiteralMatrixGenerator::new(vec![1, 2, 3, 4, 5], filler)
            .generate((2, 2), &mut rng)
            .unwrap();

        assert_eq!(matrix.iter().collect::<Vec<_>>(), [1, 2, 3, 4]);
    }
}
