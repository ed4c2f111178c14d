use super::*;

/// A defective matrix together with the correction that repairs it, so that
/// `target = defect + correction` for every cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairPlan {
    defect: Matrix,
    correction: Matrix,
    target: Matrix,
}

impl RepairPlan {
    /// Keeps `target` as given and draws the defect; the correction is the difference.
    pub fn from_target<R: Rng + ?Sized>(
        target: Matrix,
        defect_range: ValueRange,
        rng: &mut R,
    ) -> Result<Self> {
        let defect = RandomMatrixGenerator::new(defect_range).generate(target.size(), rng)?;
        let correction = (&target - &defect)?;
        Ok(Self {
            defect,
            correction,
            target,
        })
    }

    /// Draws both defect and correction; the target is their sum.
    pub fn random<R: Rng + ?Sized>(
        size: Coord2,
        defect_range: ValueRange,
        correction_range: ValueRange,
        rng: &mut R,
    ) -> Result<Self> {
        let defect = RandomMatrixGenerator::new(defect_range).generate(size, rng)?;
        let correction = RandomMatrixGenerator::new(correction_range).generate(size, rng)?;
        let target = defect.zip_with(&correction, Value::checked_add)?;
        Ok(Self {
            defect,
            correction,
            target,
        })
    }

    pub fn defect(&self) -> &Matrix {
        &self.defect
    }

    pub fn correction(&self) -> &Matrix {
        &self.correction
    }

    pub fn target(&self) -> &Matrix {
        &self.target
    }

    pub fn size(&self) -> Coord2 {
        self.target.size()
    }

    /// Recomputes `target - defect` and compares it with the stored correction.
    pub fn is_consistent(&self) -> bool {
        (&self.target - &self.defect).is_ok_and(|correction| correction == self.correction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn correction_recomputes_exactly() {
        let mut rng = SmallRng::seed_from_u64(21);
        let range = ValueRange::new(-50, 50).unwrap();

        for size in [(1, 1), (3, 3), (6, 6), (2, 5)] {
            let plan = RepairPlan::random(size, range, range, &mut rng).unwrap();

            assert!(plan.is_consistent());
            for coords in RasterIter::new(size) {
                assert_eq!(
                    plan.target()[coords] - plan.defect()[coords],
                    plan.correction()[coords]
                );
            }
        }
    }

    #[test]
    fn ranges_that_overflow_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(21);
        let high = ValueRange::new(Value::MAX - 1, Value::MAX).unwrap();
        let low = ValueRange::new(Value::MIN, Value::MIN + 1).unwrap();

        assert_eq!(
            RepairPlan::random((2, 2), high, high, &mut rng),
            Err(GameError::InvalidRange)
        );
        let target = Matrix::from_elem((2, 2), 1);
        assert_eq!(
            RepairPlan::from_target(target, low, &mut rng),
            Err(GameError::InvalidRange)
        );
    }

    #[test]
    fn fixed_target_is_preserved() {
        let mut rng = SmallRng::seed_from_u64(21);
        let filler = ValueRange::new(1, 15).unwrap();
        let target = LiteralMatrixGenerator::level_one(filler)
            .generate((4, 4), &mut rng)
            .unwrap();

        let plan = RepairPlan::from_target(target.clone(), filler, &mut rng).unwrap();

        assert_eq!(plan.target(), &target);
        assert!(plan.is_consistent());
    }
}
