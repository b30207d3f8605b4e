//! Legacy Battle Engine
//!
//! The rules core of a turn-based creature battle: damage, stat stages, status
//! ticks, capture, experience and the round state machine that sequences them.
//! Rendering, input and persistence belong to the host; the engine consumes
//! decisions and reports events and a terminal outcome.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod bag;
pub mod battle;
pub mod config;
pub mod data;
pub mod errors;
pub mod pokemon;
pub mod progression;
pub mod team;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokemon-legacy-battle` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the reference-data records.
pub use schema::{
    // Supporting Types & Enums
    BaseStats,
    EffectTarget,
    GrowthRate,
    ItemData,
    ItemKind,
    MoveCategory,
    MoveEffect,
    StatDirection,
    StatType,
    StatusType,
    // Core Data Structs
    MoveData,
    PokemonSpecies,
    PokemonType,
};

// --- From this crate's modules (`src/`) ---

// Battle orchestration and state.
pub use battle::ai::{RandomFoePolicy, ScoringPolicy};
pub use battle::decision::{Decision, DecisionContext, DecisionKind, DecisionProvider, ScriptedProvider};
pub use battle::engine::Battle;
pub use battle::rng::{RandomSource, SeededRng};
pub use battle::runner::{BattleInfo, BattleReport, BattleRunner};
pub use battle::state::{BattleEvent, BattleKind, BattleState, EventBus, GameState, Outcome, Side};

// Core runtime types for a battle.
pub use bag::Bag;
pub use pokemon::{MoveInstance, PokemonInst};
pub use team::Team;

// Reference data and configuration.
pub use config::{BattleConfig, SpeedTie};
pub use data::{DataStore, ReferenceData};

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, BattleStateError, ConfigError, DecisionError, DecisionResult,
    ReferenceDataError, ReferenceDataResult, SnapshotError,
};
