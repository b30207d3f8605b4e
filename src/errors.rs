use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    #[error("reference data error: {0}")]
    ReferenceData(#[from] ReferenceDataError),

    #[error("invalid decision: {0}")]
    Decision(#[from] DecisionError),

    #[error("battle state error: {0}")]
    BattleState(#[from] BattleStateError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("decision provider gave {attempts} invalid decisions in a row; last: {last}")]
    DecisionRetriesExhausted { attempts: u32, last: DecisionError },
}

/// Errors raised while loading or looking up species, move and item records
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("species not found: {0}")]
    SpeciesNotFound(String),

    #[error("move not found: {0}")]
    MoveNotFound(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("malformed data: {0}")]
    MalformedData(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// A decision the provider must replace before the round can advance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("move slot {0} does not exist")]
    InvalidMoveIndex(usize),

    #[error("{move_name} has no PP left")]
    NoPpRemaining { move_name: String },

    #[error("no {0} left in the bag")]
    ItemNotOwned(String),

    #[error("unknown item {0}")]
    UnknownItem(String),

    #[error("{0} would have no effect")]
    ItemHasNoEffect(String),

    #[error("can't use a capture device in a trainer battle")]
    CaptureNotAllowed,

    #[error("the team is already full")]
    TeamFull,

    #[error("team slot {0} does not exist")]
    InvalidTeamIndex(usize),

    #[error("team slot {0} has fainted")]
    SwapTargetFainted(usize),

    #[error("team slot {0} is already in battle")]
    SwapTargetAlreadyActive(usize),

    #[error("there's no running from a trainer battle")]
    RunNotAllowed,

    #[error("a replacement must be chosen")]
    WrongDecisionKind,
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    #[error("battle is not waiting for decisions (state: {0})")]
    NotAwaitingDecisions(String),

    #[error("battle is not waiting for a replacement (state: {0})")]
    NotAwaitingReplacement(String),

    #[error("battle has already ended")]
    BattleOver,

    #[error("a team must hold between 1 and 6 members, got {0}")]
    InvalidTeamSize(usize),
}

/// Errors encoding or decoding a persisted battle
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("binary snapshot: {0}")]
    Binary(#[from] postcard::Error),

    #[error("json snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse battle config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using ReferenceDataError
pub type ReferenceDataResult<T> = Result<T, ReferenceDataError>;

/// Type alias for Results using DecisionError
pub type DecisionResult<T> = Result<T, DecisionError>;
