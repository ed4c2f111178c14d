//! Optional TOML overrides on top of a preset.
//!
//! ```toml
//! mode = "mission"
//! seed = 42
//!
//! [grid]
//! size = [5, 5]
//! range = [-20, 20]
//!
//! [hangman]
//! max_misses = 7
//!
//! [[levels]]
//! size = 4
//! min_val = 1
//! max_val = 15
//! time_limit_secs = 300
//! ```
//!
//! Every key is optional; missing ones keep the preset's value.

use std::fs;
use std::path::Path;

use anyhow::Context;
use matrix_repair_core::{
    ChallengeCycle, Coord2, Granularity, LevelTable, MatrixSource, Preset, ScoreTable,
    SessionConfig, UnlockPolicy, ValueRange,
};
use serde::Deserialize;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct TomlConfig {
    mode: Option<Preset>,
    seed: Option<u64>,
    grid: TomlGrid,
    hangman: TomlHangman,
    cycle: Option<ChallengeCycle>,
    levels: Option<LevelTable>,
    scores: Option<ScoreTable>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct TomlGrid {
    size: Option<Coord2>,
    /// Switches to random values in this range instead of the literal data.
    range: Option<ValueRange>,
    granularity: Option<Granularity>,
    policy: Option<UnlockPolicy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct TomlHangman {
    max_misses: Option<u8>,
}

impl AppConfig {
    /// Reads `path` if given; `mode` from the command line wins over the file.
    pub fn load(path: Option<&Path>, mode: Option<Preset>) -> anyhow::Result<Self> {
        let toml_cfg = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                parse(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => TomlConfig::default(),
        };
        Self::from_toml(toml_cfg, mode)
    }

    fn from_toml(toml_cfg: TomlConfig, mode: Option<Preset>) -> anyhow::Result<Self> {
        let preset = mode.or(toml_cfg.mode).unwrap_or_default();
        log::debug!("preset: {preset:?}");

        let mut session = preset.config();
        if let Some(size) = toml_cfg.grid.size {
            session.size = size;
        }
        if let Some(range) = toml_cfg.grid.range {
            session.source = MatrixSource::Random { range };
        }
        if let Some(granularity) = toml_cfg.grid.granularity {
            session.granularity = granularity;
        }
        if let Some(policy) = toml_cfg.grid.policy {
            session.policy = policy;
        }
        if let Some(cycle) = toml_cfg.cycle {
            session.cycle = cycle;
        }
        if let Some(levels) = toml_cfg.levels {
            session.levels = levels;
        }
        if let Some(scores) = toml_cfg.scores {
            session.scores = scores;
        }
        if let Some(max_misses) = toml_cfg.hangman.max_misses {
            session = session.with_max_misses(max_misses);
        }
        session.validate()?;

        Ok(Self {
            session,
            seed: toml_cfg.seed,
        })
    }
}

fn parse(text: &str) -> anyhow::Result<TomlConfig> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_repair_core::{ChallengeKind, ChallengeSpec, GameError, LevelSpec};

    fn load_str(text: &str, mode: Option<Preset>) -> anyhow::Result<AppConfig> {
        AppConfig::from_toml(parse(text)?, mode)
    }

    #[test]
    fn empty_file_is_the_default_preset() {
        let config = load_str("", None).unwrap();

        assert_eq!(config.session, SessionConfig::grid());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn command_line_mode_wins() {
        let config = load_str("mode = \"fast-track\"", Some(Preset::Mission)).unwrap();
        assert_eq!(config.session.policy, UnlockPolicy::TwoStage);

        let config = load_str("mode = \"fast-track\"", None).unwrap();
        assert_eq!(config.session.granularity, Granularity::Row);
    }

    #[test]
    fn overrides_apply_on_top_of_the_preset() {
        let config = load_str(
            r#"
            mode = "mission"
            seed = 7

            [grid]
            size = [5, 3]
            range = [-4, 4]

            [hangman]
            max_misses = 5

            [[levels]]
            size = 3
            min_val = 0
            max_val = 9
            time_limit_secs = 90

            [[cycle]]
            kind = "arithmetic"
            style = "product"

            [[cycle]]
            kind = "hangman"
            words = { fixed = "CIPHER" }
            "#,
            None,
        )
        .unwrap();
        let session = config.session;

        assert_eq!(config.seed, Some(7));
        assert_eq!(session.size, (5, 3));
        assert_eq!(
            session.source,
            MatrixSource::Random {
                range: ValueRange::new(-4, 4).unwrap()
            }
        );
        assert_eq!(session.levels.get(1), Some(LevelSpec::new(3, 0, 9, 90)));
        assert_eq!(session.levels.len(), 1);
        assert_eq!(session.cycle.spec_at(0).kind(), ChallengeKind::Arithmetic);
        match session.cycle.spec_at(1) {
            ChallengeSpec::Hangman(params) => assert_eq!(params.max_misses, 5),
            other => panic!("unexpected spec {other:?}"),
        }
    }

    #[test]
    fn invalid_combinations_are_reported() {
        let err = load_str("[grid]\ngranularity = \"row\"", Some(Preset::Mission)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::UnsupportedPolicy)
        );

        assert!(load_str("[grid]\nrange = [9, 1]", None).is_err());
        assert!(load_str("cycle = []", None).is_err());
        assert!(load_str("colour = \"red\"", None).is_err());
    }
}
