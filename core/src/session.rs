use core::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a session action changed, for the front-end to react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    NoChange,
    Selected(ChallengeKind),
    Cancelled,
    /// Input accepted by the mini-game, nothing unlocked yet.
    Played(Outcome),
    /// The mini-game was lost and restarted for the same target.
    ChallengeLost(ChallengeKind),
    /// Mini-game won; the numeric answer is now expected.
    AwaitingAnswer,
    WrongAnswer { score: u32 },
    Unlocked,
    GridComplete,
    LevelComplete { level: u32, score: u32 },
    /// The finished level did not match its target and starts over.
    RetryLevel,
    LevelStarted { level: u32 },
    MissionComplete { score: u32 },
    TimedOut,
    Restarted,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether the front-end should celebrate. Purely cosmetic.
    pub const fn celebrates(self) -> bool {
        matches!(
            self,
            Self::GridComplete | Self::LevelComplete { .. } | Self::MissionComplete { .. }
        )
    }
}

impl From<UnlockOutcome> for ActionOutcome {
    fn from(outcome: UnlockOutcome) -> Self {
        match outcome {
            UnlockOutcome::NoChange => Self::NoChange,
            UnlockOutcome::Unlocked => Self::Unlocked,
            UnlockOutcome::Completed => Self::GridComplete,
        }
    }
}

/// One game in progress: the grid, the mini-game cycle and, under the
/// two-stage policy, the timed mission around it.
///
/// Every mutating action takes `now`, measured from any fixed origin the
/// caller picks, and checks the mission deadline before doing anything else.
#[derive(Clone, Debug)]
pub struct Session<R> {
    config: SessionConfig,
    grid: GridState,
    mission: Option<Mission>,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(config: SessionConfig, mut rng: R, now: Duration) -> Result<Self> {
        config.validate()?;
        let (grid, mission) = Self::build(&config, 1, 0, now, &mut rng)?;
        Ok(Self {
            config,
            grid,
            mission,
            rng,
        })
    }

    fn build(
        config: &SessionConfig,
        level: u32,
        score: u32,
        now: Duration,
        rng: &mut R,
    ) -> Result<(GridState, Option<Mission>)> {
        match config.policy {
            UnlockPolicy::DirectWin => {
                let matrix = config.source.generate(config.size, rng)?;
                Ok((GridState::new(matrix, config.granularity), None))
            }
            UnlockPolicy::TwoStage => {
                let spec = config.levels.get(level).ok_or(GameError::InvalidConfig)?;
                let mission = Mission::start(level, spec, score, now, rng)?;
                let grid = GridState::new(mission.plan().target().clone(), Granularity::Cell);
                Ok((grid, Some(mission)))
            }
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.grid.attempt()
    }

    pub fn cell_state(&self, coords: Coord2) -> CellState {
        self.grid.cell_state(coords)
    }

    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.mission.as_ref().map(|mission| mission.remaining(now))
    }

    fn check_clock(&mut self, now: Duration) -> Result<()> {
        if let Some(mission) = &mut self.mission {
            mission.check_deadline(now);
            mission.check_active()?;
        }
        Ok(())
    }

    /// Runs the deadline check on its own, for callers with a periodic clock.
    pub fn tick(&mut self, now: Duration) -> ActionOutcome {
        let Some(mission) = &mut self.mission else {
            return ActionOutcome::NoChange;
        };
        if mission.state().is_active() && mission.check_deadline(now) {
            ActionOutcome::TimedOut
        } else {
            ActionOutcome::NoChange
        }
    }

    fn seed_for(&self, target: Target) -> Result<Value> {
        match (&self.mission, target) {
            (Some(mission), Target::Cell(coords)) => Ok(mission.seed_for(coords)),
            (Some(_), Target::Row(_)) => Err(GameError::InvalidTarget),
            (None, _) => Ok(self.grid.seed_for(target)),
        }
    }

    fn start_challenge(&mut self, target: Target) -> Result<ChallengeState> {
        let seed = self.seed_for(target)?;
        let spec = self
            .config
            .cycle
            .spec_at(target.linear_index(self.grid.size()));
        ChallengeState::start(spec, seed, &mut self.rng)
    }

    /// Opens the mini-game for `target`. Missions only accept the cursor cell.
    pub fn select(&mut self, target: Target, now: Duration) -> Result<ActionOutcome> {
        self.check_clock(now)?;
        let target = self.grid.validate_target(target)?;
        if self.grid.is_target_unlocked(target) {
            return Err(GameError::AlreadyUnlocked);
        }
        if self.grid.active() == Some(target) {
            return Ok(ActionOutcome::NoChange);
        }
        if let (Some(mission), Target::Cell(coords)) = (&self.mission, target) {
            if mission.cursor() != Some(coords) {
                return Err(GameError::NotCursorCell);
            }
        }

        let challenge = self.start_challenge(target)?;
        let kind = challenge.kind();
        self.grid.select(Attempt::new(target, challenge))?;
        Ok(ActionOutcome::Selected(kind))
    }

    /// Leaves the mini-game view, dropping its state.
    pub fn deselect(&mut self) -> ActionOutcome {
        match self.grid.deselect() {
            SelectOutcome::Changed => ActionOutcome::Cancelled,
            SelectOutcome::NoChange => ActionOutcome::NoChange,
        }
    }

    pub fn play(&mut self, input: ChallengeInput, now: Duration) -> Result<ActionOutcome> {
        self.check_clock(now)?;
        let attempt = self.grid.attempt_mut().ok_or(GameError::NoActiveAttempt)?;
        let target = attempt.target;
        let outcome = attempt.challenge.apply(input, &mut self.rng)?;

        match outcome {
            Outcome::Won => match self.config.policy {
                UnlockPolicy::DirectWin => Ok(self.grid.unlock(target)?.into()),
                UnlockPolicy::TwoStage => {
                    log::debug!("{target:?} awaiting answer");
                    Ok(ActionOutcome::AwaitingAnswer)
                }
            },
            Outcome::Lost => {
                let challenge = self.start_challenge(target)?;
                let kind = challenge.kind();
                log::debug!("{kind} lost on {target:?}, starting over");
                if let Some(attempt) = self.grid.attempt_mut() {
                    attempt.challenge = challenge;
                }
                Ok(ActionOutcome::ChallengeLost(kind))
            }
            outcome => Ok(ActionOutcome::Played(outcome)),
        }
    }

    /// Checks the typed answer for a cell whose mini-game is won. A wrong
    /// answer costs points and leaves the gate open.
    pub fn submit_answer(&mut self, text: &str, now: Duration) -> Result<ActionOutcome> {
        self.check_clock(now)?;
        if self.config.policy == UnlockPolicy::DirectWin {
            return Err(GameError::AnswerNotExpected);
        }
        let attempt = self.grid.attempt().ok_or(GameError::NoActiveAttempt)?;
        if !attempt.challenge.has_won() {
            return Err(GameError::ChallengeUnsolved);
        }
        let Target::Cell(coords) = attempt.target else {
            return Err(GameError::InvalidTarget);
        };
        let answer = parse_answer(text)?;
        let mission = self.mission.as_mut().ok_or(GameError::AnswerNotExpected)?;

        let expected = mission.expected_answer(coords);
        if answer != i64::from(expected) {
            mission.penalize(self.config.scores.penalty);
            log::debug!("wrong answer for {coords:?}, score {}", mission.score());
            return Ok(ActionOutcome::WrongAnswer {
                score: mission.score(),
            });
        }

        mission.reward(self.config.scores.reward(mission.level()));
        let cursor = mission.record(coords, expected);
        self.grid.unlock(Target::Cell(coords))?;
        if cursor.is_some() {
            return Ok(ActionOutcome::Unlocked);
        }

        if mission.finish_level() {
            log::debug!("level {} complete", mission.level());
            Ok(ActionOutcome::LevelComplete {
                level: mission.level(),
                score: mission.score(),
            })
        } else {
            self.grid.reset();
            Ok(ActionOutcome::RetryLevel)
        }
    }

    /// Moves a completed level on to the next one in the table.
    pub fn advance_level(&mut self, now: Duration) -> Result<ActionOutcome> {
        let mission = self.mission.as_mut().ok_or(GameError::LevelNotComplete)?;
        match mission.state() {
            MissionState::LevelComplete => {}
            MissionState::Complete => return Err(GameError::MissionOver),
            MissionState::TimedOut => return Err(GameError::TimedOut),
            MissionState::Active => return Err(GameError::LevelNotComplete),
        }

        let level = mission.level() + 1;
        let score = mission.score();
        if self.config.levels.get(level).is_none() {
            mission.complete();
            log::debug!("mission complete with {score} points");
            return Ok(ActionOutcome::MissionComplete { score });
        }

        let (grid, mission) = Self::build(&self.config, level, score, now, &mut self.rng)?;
        self.grid = grid;
        self.mission = mission;
        Ok(ActionOutcome::LevelStarted { level })
    }

    /// Starts over from scratch with fresh values; missions go back to level 1.
    pub fn restart(&mut self, now: Duration) -> Result<ActionOutcome> {
        let (grid, mission) = Self::build(&self.config, 1, 0, now, &mut self.rng)?;
        self.grid = grid;
        self.mission = mission;
        log::debug!("session restarted");
        Ok(ActionOutcome::Restarted)
    }
}
