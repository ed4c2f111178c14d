use alloc::vec::Vec;
use core::time::Duration;

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid size, value range and time limit of one mission level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub size: Coord,
    pub min_val: Value,
    pub max_val: Value,
    pub time_limit_secs: u32,
}

impl LevelSpec {
    pub const fn new(size: Coord, min_val: Value, max_val: Value, time_limit_secs: u32) -> Self {
        Self {
            size,
            min_val,
            max_val,
            time_limit_secs,
        }
    }

    pub const fn grid_size(&self) -> Coord2 {
        (self.size, self.size)
    }

    pub fn value_range(&self) -> Result<ValueRange> {
        ValueRange::new(self.min_val, self.max_val)
    }

    pub const fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs as u64)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelSpec>", into = "Vec<LevelSpec>")]
pub struct LevelTable {
    levels: Vec<LevelSpec>,
}

impl LevelTable {
    pub fn new(levels: Vec<LevelSpec>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::InvalidConfig);
        }
        for level in &levels {
            level.value_range()?;
            if level.size == 0 {
                return Err(GameError::InvalidBoardShape);
            }
        }
        Ok(Self { levels })
    }

    /// Levels are numbered from 1.
    pub fn get(&self, level: u32) -> Option<LevelSpec> {
        let index = usize::try_from(level.checked_sub(1)?).ok()?;
        self.levels.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: alloc::vec![
                LevelSpec::new(4, 1, 15, 300),
                LevelSpec::new(5, -20, 20, 240),
                LevelSpec::new(6, -50, 50, 180),
            ],
        }
    }
}

impl TryFrom<Vec<LevelSpec>> for LevelTable {
    type Error = GameError;

    fn try_from(levels: Vec<LevelSpec>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<LevelTable> for Vec<LevelSpec> {
    fn from(table: LevelTable) -> Self {
        table.levels
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    /// Multiplied by the level number for every correct answer.
    pub reward_per_level: u32,
    pub penalty: u32,
}

impl ScoreTable {
    pub const fn reward(&self, level: u32) -> u32 {
        self.reward_per_level.saturating_mul(level)
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            reward_per_level: 100,
            penalty: 50,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionState {
    Active,
    TimedOut,
    LevelComplete,
    Complete,
}

impl MissionState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Progress through one timed level: which cells were repaired, the cursor
/// on the next one, and the running score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    level: u32,
    spec: LevelSpec,
    score: u32,
    plan: RepairPlan,
    filled: Array2<Option<Value>>,
    cursor: Option<Coord2>,
    started_at: Duration,
    state: MissionState,
}

impl Mission {
    /// Level 1 repairs the fixed literal values; later levels are fully random.
    pub fn start<R: Rng + ?Sized>(
        level: u32,
        spec: LevelSpec,
        score: u32,
        now: Duration,
        rng: &mut R,
    ) -> Result<Self> {
        let range = spec.value_range()?;
        let size = spec.grid_size();
        let plan = if level <= 1 {
            let target = LiteralMatrixGenerator::level_one(range).generate(size, rng)?;
            RepairPlan::from_target(target, range, rng)?
        } else {
            RepairPlan::random(size, range, range, rng)?
        };
        log::debug!("level {level} started: {}x{} grid", size.0, size.1);

        Ok(Self {
            level,
            spec,
            score,
            plan,
            filled: Array2::default(size.to_nd_index()),
            cursor: Some((0, 0)),
            started_at: now,
            state: MissionState::Active,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn spec(&self) -> LevelSpec {
        self.spec
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn plan(&self) -> &RepairPlan {
        &self.plan
    }

    pub fn cursor(&self) -> Option<Coord2> {
        self.cursor
    }

    pub fn state(&self) -> MissionState {
        self.state
    }

    pub fn filled_at(&self, coords: Coord2) -> Option<Value> {
        self.filled[coords.to_nd_index()]
    }

    pub fn deadline(&self) -> Duration {
        self.started_at + self.spec.time_limit()
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.deadline().saturating_sub(now)
    }

    /// Moves an active mission to `TimedOut` once `now` reaches the deadline.
    /// Returns whether the mission is timed out.
    pub fn check_deadline(&mut self, now: Duration) -> bool {
        if self.state.is_active() && now >= self.deadline() {
            log::debug!("level {} timed out", self.level);
            self.state = MissionState::TimedOut;
        }
        matches!(self.state, MissionState::TimedOut)
    }

    pub fn check_active(&self) -> Result<()> {
        match self.state {
            MissionState::Active => Ok(()),
            MissionState::TimedOut => Err(GameError::TimedOut),
            MissionState::LevelComplete => Err(GameError::AlreadyUnlocked),
            MissionState::Complete => Err(GameError::MissionOver),
        }
    }

    /// Value the player has to type for `coords`.
    pub fn expected_answer(&self, coords: Coord2) -> Value {
        self.plan.target()[coords]
    }

    /// Hidden value the gating challenge is built around.
    pub fn seed_for(&self, coords: Coord2) -> Value {
        self.plan.correction()[coords]
    }

    pub fn reward(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn penalize(&mut self, amount: u32) {
        self.score = self.score.saturating_sub(amount);
    }

    /// Stores an accepted answer and moves the cursor on. Returns the new cursor.
    pub fn record(&mut self, coords: Coord2, value: Value) -> Option<Coord2> {
        self.filled[coords.to_nd_index()] = Some(value);
        self.cursor = next_in_raster(coords, self.plan.size());
        self.cursor
    }

    /// Compares every filled cell against the target. On a mismatch the level
    /// is rewound to its first cell and `false` is returned.
    pub fn finish_level(&mut self) -> bool {
        let target = self.plan.target();
        let matches = self
            .filled
            .iter_raster()
            .all(|coords| self.filled[coords.to_nd_index()] == Some(target[coords]));

        if matches {
            self.state = MissionState::LevelComplete;
        } else {
            log::warn!("level {} bulk check failed, rewinding", self.level);
            self.filled.fill(None);
            self.cursor = Some((0, 0));
        }
        matches
    }

    pub fn complete(&mut self) {
        self.state = MissionState::Complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn mission(level: u32) -> Mission {
        let mut rng = SmallRng::seed_from_u64(17);
        let spec = LevelTable::default().get(level).unwrap();
        Mission::start(level, spec, 0, Duration::ZERO, &mut rng).unwrap()
    }

    #[test]
    fn level_one_repairs_the_literal_values() {
        let mission = mission(1);
        let target = mission.plan().target();

        assert_eq!(target.size(), (4, 4));
        assert_eq!(target.iter().take(14).collect::<Vec<_>>(), LEVEL_ONE_VALUES);
        assert!(mission.plan().is_consistent());
    }

    #[test]
    fn later_levels_are_random_and_consistent() {
        let mission = mission(3);

        assert_eq!(mission.plan().size(), (6, 6));
        assert!(mission.plan().is_consistent());
        let range = mission.spec().value_range().unwrap();
        assert!(mission.plan().defect().iter().all(|v| range.contains(v)));
    }

    #[test]
    fn deadline_is_one_way() {
        let mut mission = mission(1);

        assert!(!mission.check_deadline(Duration::from_secs(299)));
        assert_eq!(mission.remaining(Duration::from_secs(299)), Duration::from_secs(1));
        assert!(mission.check_deadline(Duration::from_secs(300)));
        assert_eq!(mission.state(), MissionState::TimedOut);
        assert!(mission.check_deadline(Duration::from_secs(1)));
        assert_eq!(mission.check_active(), Err(GameError::TimedOut));
        assert_eq!(mission.remaining(Duration::from_secs(400)), Duration::ZERO);
    }

    #[test]
    fn score_is_floored_at_zero() {
        let mut mission = mission(2);
        let scores = ScoreTable::default();

        mission.penalize(scores.penalty);
        assert_eq!(mission.score(), 0);
        mission.reward(scores.reward(mission.level()));
        assert_eq!(mission.score(), 200);
        mission.penalize(scores.penalty);
        assert_eq!(mission.score(), 150);
    }

    #[test]
    fn cursor_walks_in_raster_order() {
        let mut mission = mission(1);

        assert_eq!(mission.cursor(), Some((0, 0)));
        assert_eq!(mission.record((0, 0), 1), Some((0, 1)));
        assert_eq!(mission.record((0, 3), 1), Some((1, 0)));
        assert_eq!(mission.record((3, 3), 1), None);
    }

    #[test]
    fn bulk_check_accepts_full_match_and_rewinds_otherwise() {
        let mut mission = mission(1);
        for coords in RasterIter::new((4, 4)) {
            let value = mission.expected_answer(coords);
            mission.record(coords, value);
        }
        let mut corrupted = mission.clone();

        assert!(mission.finish_level());
        assert_eq!(mission.state(), MissionState::LevelComplete);

        corrupted.filled[[2, 2]] = Some(corrupted.expected_answer((2, 2)) + 1);
        assert!(!corrupted.finish_level());
        assert_eq!(corrupted.state(), MissionState::Active);
        assert_eq!(corrupted.cursor(), Some((0, 0)));
        assert_eq!(corrupted.filled_at((3, 3)), None);
    }

    #[test]
    fn empty_or_bad_level_tables_are_rejected() {
        assert_eq!(LevelTable::new(Vec::new()), Err(GameError::InvalidConfig));
        assert_eq!(
            LevelTable::new(alloc::vec![LevelSpec::new(3, 5, 1, 60)]),
            Err(GameError::InvalidRange)
        );
        assert_eq!(LevelTable::default().get(0), None);
        assert_eq!(LevelTable::default().get(4), None);
        assert!(!LevelTable::default().is_empty());
    }
}
