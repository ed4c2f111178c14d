use std::fmt;
use std::time::Duration;

use matrix_repair_core::{ActionOutcome, CellState, Outcome, RasterIter, Session, Target};
use rand::Rng;

const CELL_WIDTH: usize = 5;

/// Text view of the grid, plus the active challenge if there is one.
pub struct Board<'a, R> {
    session: &'a Session<R>,
    now: Duration,
}

impl<'a, R: Rng> Board<'a, R> {
    pub fn new(session: &'a Session<R>, now: Duration) -> Self {
        Self { session, now }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.session.grid();
        let (rows, cols) = grid.size();
        match self.session.mission() {
            Some(mission) => writeln!(
                f,
                "Level {}  score {}  {}s left",
                mission.level(),
                mission.score(),
                mission.remaining(self.now).as_secs()
            ),
            None => writeln!(
                f,
                "{} of {} cells repaired",
                grid.unlocked_count(),
                usize::from(rows) * usize::from(cols)
            ),
        }
    }

    fn write_cell(&self, f: &mut fmt::Formatter<'_>, coords: (u8, u8)) -> fmt::Result {
        let grid = self.session.grid();
        let mission = self.session.mission();
        let active = grid.active().is_some_and(|target| target.contains(coords));
        let cursor = mission.and_then(|mission| mission.cursor()) == Some(coords);

        let text = match (grid.cell_state(coords), mission) {
            (CellState::Unlocked, _) => grid.matrix()[coords].to_string(),
            (CellState::AwaitingAnswer, _) => "?".into(),
            // corrupted value, shown until repaired
            (CellState::Locked, Some(mission)) => format!("~{}", mission.plan().defect()[coords]),
            (CellState::Locked, None) => "##".into(),
        };
        let marker = if active {
            '>'
        } else if cursor {
            '*'
        } else {
            ' '
        };
        write!(f, "{marker}{text:>width$}", width = CELL_WIDTH - 1)
    }
}

impl<R: Rng> fmt::Display for Board<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;

        let (rows, cols) = self.session.grid().size();
        f.write_str("   ")?;
        for col in 1..=cols {
            write!(f, "{col:>CELL_WIDTH$}")?;
        }
        for (row, col) in RasterIter::new((rows, cols)) {
            if col == 0 {
                write!(f, "\n{:>3}", row + 1)?;
            }
            self.write_cell(f, (row, col))?;
        }
        writeln!(f)?;

        if let Some(attempt) = self.session.attempt() {
            let target = match attempt.target {
                Target::Cell((row, col)) => format!("cell {},{}", row + 1, col + 1),
                Target::Row(row) => format!("row {}", row + 1),
            };
            writeln!(f, "\n{} for {target}:", attempt.challenge.kind())?;
            writeln!(f, "{}", attempt.challenge)?;
            if attempt.challenge.has_won() {
                writeln!(f, "Solved. Type: answer N")?;
            }
        }
        Ok(())
    }
}

/// One-line feedback after an action, `None` when there is nothing to say.
pub fn outcome_message(outcome: ActionOutcome) -> Option<String> {
    let message = match outcome {
        ActionOutcome::NoChange | ActionOutcome::Selected(_) => return None,
        ActionOutcome::Cancelled => "Back to the grid.".into(),
        ActionOutcome::Played(Outcome::Correct) => "Correct.".into(),
        ActionOutcome::Played(Outcome::Incorrect) => "Wrong, try again.".into(),
        ActionOutcome::Played(_) => return None,
        ActionOutcome::ChallengeLost(kind) => format!("{kind} lost. A new one begins."),
        ActionOutcome::AwaitingAnswer => "Challenge won. Now type the repaired value.".into(),
        ActionOutcome::WrongAnswer { score } => format!("Wrong value. Score {score}."),
        ActionOutcome::Unlocked => "Unlocked!".into(),
        ActionOutcome::GridComplete => "Matrix repaired!".into(),
        ActionOutcome::LevelComplete { level, score } => {
            format!("Level {level} repaired with {score} points. Type next to go on.")
        }
        ActionOutcome::RetryLevel => "The matrix does not check out. Level restarts.".into(),
        ActionOutcome::LevelStarted { level } => format!("Level {level} begins."),
        ActionOutcome::MissionComplete { score } => {
            format!("Mission complete! Final score {score}.")
        }
        ActionOutcome::TimedOut => "Time is up. Type restart to try again.".into(),
        ActionOutcome::Restarted => "New game.".into(),
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_repair_core::{ChallengeInput, SessionConfig};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const T0: Duration = Duration::ZERO;

    fn session(config: SessionConfig) -> Session<SmallRng> {
        Session::new(config, SmallRng::seed_from_u64(3), T0).unwrap()
    }

    #[test]
    fn locked_cells_stay_hidden_until_won() {
        let mut session = session(SessionConfig::fast_track());
        let before = Board::new(&session, T0).to_string();
        assert!(before.starts_with("0 of 14 cells repaired"));
        assert!(!before.contains("14\n"));

        session.select(Target::Row(1), T0).unwrap();
        for letter in "SILENC".chars() {
            session.play(ChallengeInput::Letter(letter), T0).unwrap();
        }

        let after = Board::new(&session, T0).to_string();
        assert!(after.starts_with("2 of 14 cells repaired"));
        assert!(after.contains("  2    9   14\n"));
        assert!(after.contains("  1   ##   ##\n"));
    }

    #[test]
    fn active_challenge_is_shown_below_the_grid() {
        let mut session = session(SessionConfig::fast_track());
        session.select(Target::Row(1), T0).unwrap();

        let text = Board::new(&session, T0).to_string();
        assert!(text.contains(">  ##>  ##"));
        assert!(text.contains("Hangman for row 2:"));
        assert!(text.contains("_ _ _ _ _ _ _"));
    }

    #[test]
    fn missions_show_the_corrupted_values_and_the_clock() {
        let session = session(SessionConfig::mission());
        let text = Board::new(&session, Duration::from_secs(20)).to_string();
        let defect = session.mission().unwrap().plan().defect()[(0, 0)];

        assert!(text.starts_with("Level 1  score 0  280s left"));
        assert!(text.contains(&format!("*{:>4}", format!("~{defect}"))));
    }

    #[test]
    fn quiet_outcomes_print_nothing() {
        assert_eq!(outcome_message(ActionOutcome::NoChange), None);
        assert_eq!(outcome_message(ActionOutcome::Played(Outcome::Pending)), None);
        assert_eq!(
            outcome_message(ActionOutcome::WrongAnswer { score: 50 }).as_deref(),
            Some("Wrong value. Score 50.")
        );
    }
}
