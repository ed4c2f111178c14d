use alloc::vec::Vec;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a won challenge turns into an unlocked cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockPolicy {
    /// Winning the challenge unlocks the target.
    #[default]
    DirectWin,
    /// Winning the challenge opens the answer field; the typed value must
    /// then match the solution cell.
    TwoStage,
}

/// Where the hidden values of a direct-win grid come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixSource {
    Literal { values: Vec<Value>, filler: ValueRange },
    Random { range: ValueRange },
}

impl MatrixSource {
    pub fn generate<R: Rng + ?Sized>(&self, size: Coord2, rng: &mut R) -> Result<Matrix> {
        match self {
            Self::Literal { values, filler } => {
                LiteralMatrixGenerator::new(values.clone(), *filler).generate(size, rng)
            }
            Self::Random { range } => RandomMatrixGenerator::new(*range).generate(size, rng),
        }
    }
}

/// Named game variants.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// 7x2 fixed matrix, one challenge per row.
    FastTrack,
    /// Square grid, cell by cell.
    #[default]
    Grid,
    /// Timed levels with typed answers.
    Mission,
}

impl Preset {
    pub fn config(self) -> SessionConfig {
        match self {
            Self::FastTrack => SessionConfig::fast_track(),
            Self::Grid => SessionConfig::grid(),
            Self::Mission => SessionConfig::mission(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Grid size for direct-win sessions; missions take it from the level table.
    pub size: Coord2,
    pub source: MatrixSource,
    pub granularity: Granularity,
    pub policy: UnlockPolicy,
    pub cycle: ChallengeCycle,
    pub levels: LevelTable,
    pub scores: ScoreTable,
}

fn level_one_source() -> MatrixSource {
    MatrixSource::Literal {
        values: LEVEL_ONE_VALUES.to_vec(),
        filler: ValueRange::new_unchecked(1, 15),
    }
}

impl SessionConfig {
    pub fn fast_track() -> Self {
        Self {
            size: LEVEL_ONE_SHAPE,
            source: level_one_source(),
            granularity: Granularity::Row,
            policy: UnlockPolicy::DirectWin,
            cycle: ChallengeCycle::fast_track(DEFAULT_MAX_MISSES),
            levels: LevelTable::default(),
            scores: ScoreTable::default(),
        }
    }

    pub fn grid() -> Self {
        let hangman = HangmanParams::new(
            WordSource::NumberName(DEFAULT_WORDS.iter().map(|&word| word.into()).collect()),
            DEFAULT_MAX_MISSES,
        );
        Self {
            size: (4, 4),
            source: level_one_source(),
            granularity: Granularity::Cell,
            policy: UnlockPolicy::DirectWin,
            cycle: ChallengeCycle::standard(hangman),
            levels: LevelTable::default(),
            scores: ScoreTable::default(),
        }
    }

    pub fn mission() -> Self {
        Self {
            policy: UnlockPolicy::TwoStage,
            ..Self::grid()
        }
    }

    /// Applies one miss limit to every hangman entry of the cycle.
    pub fn with_max_misses(mut self, max_misses: u8) -> Self {
        self.cycle.set_max_misses(max_misses);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.policy == UnlockPolicy::TwoStage && self.granularity != Granularity::Cell {
            return Err(GameError::UnsupportedPolicy);
        }
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in [Preset::FastTrack, Preset::Grid, Preset::Mission] {
            assert_eq!(preset.config().validate(), Ok(()));
        }
    }

    #[test]
    fn two_stage_rows_are_rejected() {
        let config = SessionConfig {
            granularity: Granularity::Row,
            ..SessionConfig::mission()
        };
        assert_eq!(config.validate(), Err(GameError::UnsupportedPolicy));
    }

    #[test]
    fn miss_limit_reaches_every_hangman() {
        let config = SessionConfig::fast_track().with_max_misses(5);
        let limits: Vec<_> = config
            .cycle
            .entries()
            .iter()
            .filter_map(|spec| match spec {
                ChallengeSpec::Hangman(params) => Some(params.max_misses),
                _ => None,
            })
            .collect();

        assert_eq!(limits, [5, 5, 5]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SessionConfig::mission();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<SessionConfig>(&json).unwrap(), config);
    }
}
