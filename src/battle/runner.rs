use crate::battle::decision::{DecisionKind, DecisionProvider};
use crate::battle::engine::Battle;
use crate::battle::rng::RandomSource;
use crate::battle::state::{BattleEvent, BattleKind, BattleState, EventBus, GameState, Outcome, Side};
use crate::errors::{BattleEngineError, BattleResult, BattleStateError};
use crate::pokemon::PokemonInst;
use crate::team::Team;
use schema::StatusType;
use tracing::{debug, warn};

/// High-level match driver: asks the friendly provider for each decision the
/// battle needs and re-prompts when one is rejected.
pub struct BattleRunner {
    battle: Battle,
    accumulated_events: Vec<BattleEvent>,
}

/// Information about the current battle state for API queries
#[derive(Debug, Clone, PartialEq)]
pub struct BattleInfo {
    pub kind: BattleKind,
    pub turn_number: u32,
    pub game_state: GameState,
    pub friendly: SideInfo,
    pub foe: SideInfo,
}

/// Information about one side's roster
#[derive(Debug, Clone, PartialEq)]
pub struct SideInfo {
    pub active_index: usize,
    pub team: Vec<PokemonInfo>,
    pub fainted_count: usize,
}

/// Information about a Pokemon for API queries
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonInfo {
    pub species: String,
    pub name: String,
    pub level: u8,
    pub current_hp: u16,
    pub max_hp: u16,
    pub is_fainted: bool,
    pub status: Option<StatusType>,
}

/// Everything the host needs once a match is over.
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub outcome: Outcome,
    pub state: BattleState,
    pub events: Vec<BattleEvent>,
}

impl PokemonInfo {
    fn from_pokemon(pokemon: &PokemonInst) -> Self {
        Self {
            species: pokemon.species.clone(),
            name: pokemon.name.clone(),
            level: pokemon.level,
            current_hp: pokemon.current_hp(),
            max_hp: pokemon.max_hp(),
            is_fainted: pokemon.is_fainted(),
            status: pokemon.status,
        }
    }
}

impl SideInfo {
    fn from_team(team: &Team) -> Self {
        Self {
            active_index: team.active_index(),
            team: team.members().iter().map(PokemonInfo::from_pokemon).collect(),
            fainted_count: team.members().iter().filter(|p| p.is_fainted()).count(),
        }
    }
}

impl BattleRunner {
    /// Wrap a battle. A fresh battle starts its event log with both send-outs.
    pub fn new(battle: Battle) -> Self {
        let accumulated_events = if battle.state().turn_number == 0 && !battle.is_over() {
            battle.opening_events().into_events()
        } else {
            Vec::new()
        };
        Self {
            battle,
            accumulated_events,
        }
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn into_battle(self) -> Battle {
        self.battle
    }

    /// Every event produced so far, oldest first.
    pub fn events(&self) -> &[BattleEvent] {
        &self.accumulated_events
    }

    /// Get current battle information for API queries
    pub fn get_battle_info(&self) -> BattleInfo {
        let state = self.battle.state();
        BattleInfo {
            kind: state.kind,
            turn_number: state.turn_number,
            game_state: state.game_state,
            friendly: SideInfo::from_team(&state.friendly),
            foe: SideInfo::from_team(&state.foe),
        }
    }

    /// Answer the one prompt the battle is waiting on.
    ///
    /// Rejected decisions are handed back to the provider through
    /// `DecisionContext::last_error`. After `max_decision_retries` re-prompts the runner
    /// gives up with [`BattleEngineError::DecisionRetriesExhausted`].
    pub fn step(
        &mut self,
        provider: &mut dyn DecisionProvider,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<EventBus> {
        let kind = self
            .battle
            .expected_decision()
            .ok_or(BattleStateError::BattleOver)?;
        let max_retries = self.battle.config().max_decision_retries;

        let mut last_error = None;
        let mut failures: u32 = 0;
        loop {
            let decision = {
                let context = self
                    .battle
                    .decision_context(Side::Friendly, kind, last_error.clone());
                provider.decide(&context, rng)
            };
            let result = match kind {
                DecisionKind::Turn => self.battle.resolve_round(decision, rng),
                DecisionKind::Replacement => self.battle.submit_replacement(decision),
            };
            match result {
                Ok(bus) => {
                    self.accumulated_events.extend(bus.events().iter().cloned());
                    return Ok(bus);
                }
                Err(BattleEngineError::Decision(error)) => {
                    failures += 1;
                    if failures > max_retries {
                        warn!(attempts = failures, %error, "giving up on decision provider");
                        return Err(BattleEngineError::DecisionRetriesExhausted {
                            attempts: failures,
                            last: error,
                        });
                    }
                    debug!(attempt = failures, %error, "re-prompting decision provider");
                    last_error = Some(error);
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Drive the match until it reaches a terminal outcome.
    pub fn run_to_completion(
        mut self,
        provider: &mut dyn DecisionProvider,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<BattleReport> {
        while !self.battle.is_over() {
            self.step(provider, rng)?;
        }
        let outcome = match self.battle.outcome() {
            Some(outcome) => outcome,
            None => {
                warn!("battle ended without an outcome, reporting it as quit");
                Outcome::Quit
            }
        };
        Ok(BattleReport {
            outcome,
            state: self.battle.into_state(),
            events: self.accumulated_events,
        })
    }
}
