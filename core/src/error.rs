use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Selection does not match the unlock granularity")]
    InvalidTarget,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Value range is empty")]
    InvalidRange,
    #[error("Challenge cycle needs at least one entry")]
    EmptyCycle,
    #[error("Hangman words must be non-empty and alphabetic")]
    InvalidWord,
    #[error("Invalid configuration")]
    InvalidConfig,
    #[error("Two-stage unlocking requires cell granularity")]
    UnsupportedPolicy,
    #[error("Already unlocked")]
    AlreadyUnlocked,
    #[error("No cell or row is being attempted")]
    NoActiveAttempt,
    #[error("Cells must be repaired in order")]
    NotCursorCell,
    #[error("Win the challenge before submitting an answer")]
    ChallengeUnsolved,
    #[error("Challenge already finished")]
    ChallengeFinished,
    #[error("No numeric answer is expected here")]
    AnswerNotExpected,
    #[error("Input does not fit the current challenge")]
    InputMismatch,
    #[error("Guess a single letter from A to Z")]
    InvalidLetter,
    #[error("Letter already guessed")]
    DuplicateGuess,
    #[error("Sign bit must be 0 or 1")]
    InvalidSignBit,
    #[error("Empty input")]
    EmptyInput,
    #[error("Not a whole number")]
    NotANumber,
    #[error("Time is up, restart the mission")]
    TimedOut,
    #[error("Level is not complete yet")]
    LevelNotComplete,
    #[error("Mission already over")]
    MissionOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
