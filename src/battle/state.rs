use crate::bag::Bag;
use crate::errors::SnapshotError;
use crate::pokemon::PokemonInst;
use crate::progression::BattleParticipationTracker;
use crate::team::Team;
use schema::{StatDirection, StatType, StatusType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Foe,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Friendly => Side::Foe,
            Side::Foe => Side::Friendly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleKind {
    Wild,
    Trainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    AwaitingDecisions,
    Resolving,
    /// The friendly active fainted mid-round and a replacement must be sent out.
    AwaitingReplacement,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Run,
    Quit,
    FriendlyTeamKO,
    FoeTeamKO,
    Captured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFailureReason {
    /// The acting combatant fainted before its turn came up.
    PokemonFainted,
    /// The combatant that chose the action was replaced before it could act.
    NoLongerActive,
    /// An offensive move had no standing target.
    NoEnemyPresent,
    NoPPRemaining,
    /// The foe policy answered with something the engine can't execute.
    InvalidAction,
}

/// Everything that happened during a round, in order.
///
/// Events name combatants by side and display name so the stream stays readable
/// after the state it came from has moved on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    // === Turn Management Events ===
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // === Switching Events ===
    PokemonSentOut {
        side: Side,
        pokemon: String,
    },
    PokemonSwitched {
        side: Side,
        old_pokemon: String,
        new_pokemon: String,
    },

    // === Move Events ===
    MoveUsed {
        side: Side,
        pokemon: String,
        move_name: String,
    },
    CriticalHit {
        side: Side,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    MultiHitCompleted {
        hits: u8,
    },
    ActionFailed {
        side: Side,
        pokemon: String,
        reason: ActionFailureReason,
    },

    // === Damage and Healing Events ===
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonHealed {
        side: Side,
        target: String,
        amount: u16,
        new_hp: u16,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },

    // === Status Events ===
    StatusApplied {
        side: Side,
        target: String,
        status: StatusType,
    },
    StatusDamage {
        side: Side,
        target: String,
        status: StatusType,
        damage: u16,
    },
    StatusCured {
        side: Side,
        target: String,
        status: StatusType,
    },

    // === Stat Stage Events ===
    StatStageChanged {
        side: Side,
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        side: Side,
        target: String,
        stat: StatType,
        direction: StatDirection,
    },

    // === Item and Capture Events ===
    ItemUsed {
        item: String,
        target: String,
    },
    CaptureAttempted {
        target: String,
        shakes: u8,
        captured: bool,
    },
    PokemonCaptured {
        pokemon: String,
        team_index: usize,
    },

    // === Escape Events ===
    RunAttempted {
        succeeded: bool,
    },

    // === Progression Events ===
    ExperienceGained {
        pokemon: String,
        amount: u32,
    },
    EffortValuesGained {
        pokemon: String,
        evs: [u8; 6],
    },
    LevelUp {
        pokemon: String,
        new_level: u8,
    },
    MoveLearned {
        pokemon: String,
        move_name: String,
    },
    MoveNotLearned {
        pokemon: String,
        move_name: String,
    },

    BattleEnded {
        outcome: Outcome,
    },
}

impl BattleEvent {
    /// Player-facing text for this event, or `None` for events that are only
    /// meaningful to code.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        match self {
            // === Turn Management Events ===
            BattleEvent::TurnStarted { turn_number } => Some(format!("=== Turn {} ===", turn_number)),
            BattleEvent::TurnEnded => None,

            // === Switching Events ===
            BattleEvent::PokemonSentOut { side, pokemon } => match (side, battle_state.kind) {
                (Side::Friendly, _) => Some(format!("Go! {}!", pokemon)),
                (Side::Foe, BattleKind::Wild) => Some(format!("A wild {} appeared!", pokemon)),
                (Side::Foe, BattleKind::Trainer) => Some(format!("The foe sent out {}!", pokemon)),
            },
            BattleEvent::PokemonSwitched {
                side,
                old_pokemon,
                new_pokemon,
            } => match side {
                Side::Friendly => Some(format!("Come back, {}! Go! {}!", old_pokemon, new_pokemon)),
                Side::Foe => Some(format!(
                    "The foe withdrew {} and sent out {}!",
                    old_pokemon, new_pokemon
                )),
            },

            // === Move Events ===
            BattleEvent::MoveUsed {
                side,
                pokemon,
                move_name,
            } => Some(format!(
                "{} used {}!",
                Self::pokemon_label(*side, pokemon, battle_state),
                move_name
            )),
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m == 0.0 => Some("It had no effect!".to_string()),
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::MultiHitCompleted { hits } => {
                if *hits == 1 {
                    Some("Hit 1 time!".to_string())
                } else {
                    Some(format!("Hit {} times!", hits))
                }
            }
            BattleEvent::ActionFailed {
                side,
                pokemon,
                reason,
            } => {
                let label = Self::pokemon_label(*side, pokemon, battle_state);
                Self::format_action_failure_reason(&label, reason)
            }

            // === Damage and Healing Events ===
            BattleEvent::DamageDealt {
                side,
                target,
                damage,
                ..
            } => Some(format!(
                "{} took {} damage!",
                Self::pokemon_label(*side, target, battle_state),
                damage
            )),
            BattleEvent::PokemonHealed {
                side, target, amount, ..
            } => Some(format!(
                "{} recovered {} HP!",
                Self::pokemon_label(*side, target, battle_state),
                amount
            )),
            BattleEvent::PokemonFainted { side, pokemon } => Some(format!(
                "{} fainted!",
                Self::pokemon_label(*side, pokemon, battle_state)
            )),

            // === Status Events ===
            BattleEvent::StatusApplied {
                side,
                target,
                status,
            } => Some(format!(
                "{} {}",
                Self::pokemon_label(*side, target, battle_state),
                Self::format_status_applied(*status)
            )),
            BattleEvent::StatusDamage {
                side,
                target,
                status,
                ..
            } => Some(format!(
                "{} is hurt by its {}!",
                Self::pokemon_label(*side, target, battle_state),
                Self::format_status_noun(*status)
            )),
            BattleEvent::StatusCured {
                side,
                target,
                status,
            } => Some(format!(
                "{}{}",
                Self::pokemon_label(*side, target, battle_state),
                Self::format_status_removed(*status)
            )),

            // === Stat Stage Events ===
            BattleEvent::StatStageChanged {
                side,
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let label = Self::pokemon_label(*side, target, battle_state);
                let change = new_stage - old_stage;
                let verb = match change {
                    c if c >= 2 => "sharply rose",
                    c if c > 0 => "rose",
                    c if c <= -2 => "harshly fell",
                    c if c < 0 => "fell",
                    _ => return None,
                };
                Some(format!("{}'s {} {}!", label, stat, verb))
            }
            BattleEvent::StatChangeBlocked {
                side,
                target,
                stat,
                direction,
            } => {
                let label = Self::pokemon_label(*side, target, battle_state);
                let limit = match direction {
                    StatDirection::Raise => "higher",
                    StatDirection::Lower => "lower",
                };
                Some(format!("{}'s {} won't go any {}!", label, stat, limit))
            }

            // === Item and Capture Events ===
            BattleEvent::ItemUsed { item, target } => Some(format!("Used a {} on {}!", item, target)),
            BattleEvent::CaptureAttempted {
                shakes, captured, ..
            } => {
                if *captured {
                    return None;
                }
                Some(
                    match shakes {
                        0 => "Oh no! The Pokémon broke free!",
                        1 => "Aww! It appeared to be caught!",
                        2 => "Aargh! Almost had it!",
                        _ => "Shoot! It was so close, too!",
                    }
                    .to_string(),
                )
            }
            BattleEvent::PokemonCaptured { pokemon, .. } => Some(format!("Gotcha! {} was caught!", pokemon)),

            // === Escape Events ===
            BattleEvent::RunAttempted { succeeded } => {
                if *succeeded {
                    Some("Got away safely!".to_string())
                } else {
                    Some("Couldn't escape!".to_string())
                }
            }

            // === Progression Events ===
            BattleEvent::ExperienceGained { pokemon, amount } => {
                Some(format!("{} gained {} Exp. Points!", pokemon, amount))
            }
            BattleEvent::EffortValuesGained { .. } => None,
            BattleEvent::LevelUp { pokemon, new_level } => {
                Some(format!("{} grew to level {}!", pokemon, new_level))
            }
            BattleEvent::MoveLearned { pokemon, move_name } => {
                Some(format!("{} learned {}!", pokemon, move_name))
            }
            BattleEvent::MoveNotLearned { pokemon, move_name } => Some(format!(
                "{} wants to learn {}, but it already knows four moves.",
                pokemon, move_name
            )),

            BattleEvent::BattleEnded { outcome } => match outcome {
                Outcome::FoeTeamKO => match battle_state.kind {
                    BattleKind::Wild => None,
                    BattleKind::Trainer => Some("You defeated the foe!".to_string()),
                },
                Outcome::FriendlyTeamKO => Some("You have no more Pokémon that can fight! You blacked out!".to_string()),
                Outcome::Run | Outcome::Captured => None,
                Outcome::Quit => Some("The battle was suspended.".to_string()),
            },
        }
    }

    fn pokemon_label(side: Side, name: &str, battle_state: &BattleState) -> String {
        match (side, battle_state.kind) {
            (Side::Friendly, _) => name.to_string(),
            (Side::Foe, BattleKind::Wild) => format!("Wild {}", name),
            (Side::Foe, BattleKind::Trainer) => format!("Foe {}", name),
        }
    }

    fn format_status_applied(status: StatusType) -> &'static str {
        match status {
            StatusType::Burned => "was burned!",
            StatusType::Frozen => "was frozen solid!",
            StatusType::Paralysed => "is paralysed! It may be unable to move!",
            StatusType::Poisoned => "was poisoned!",
            StatusType::Sleeping => "fell asleep!",
            StatusType::Confused => "became confused!",
        }
    }

    fn format_status_removed(status: StatusType) -> &'static str {
        match status {
            StatusType::Burned => "'s burn was healed!",
            StatusType::Frozen => " thawed out!",
            StatusType::Paralysed => " was cured of paralysis!",
            StatusType::Poisoned => " was cured of its poisoning!",
            StatusType::Sleeping => " woke up!",
            StatusType::Confused => " snapped out of its confusion!",
        }
    }

    fn format_status_noun(status: StatusType) -> &'static str {
        match status {
            StatusType::Burned => "burn",
            StatusType::Poisoned => "poison",
            StatusType::Frozen => "ice",
            StatusType::Paralysed => "paralysis",
            StatusType::Sleeping => "sleep",
            StatusType::Confused => "confusion",
        }
    }

    fn format_action_failure_reason(label: &str, reason: &ActionFailureReason) -> Option<String> {
        match reason {
            ActionFailureReason::PokemonFainted | ActionFailureReason::NoLongerActive => None,
            ActionFailureReason::NoEnemyPresent => Some("But there was no target...".to_string()),
            ActionFailureReason::NoPPRemaining => Some(format!("{} has no PP left!", label)),
            ActionFailureReason::InvalidAction => Some(format!("{} hesitated!", label)),
        }
    }
}

/// Event bus for collecting and managing battle events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Move every event of `other` onto the end of this bus.
    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print the formatted text of every event that has some.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for line in self.formatted(battle_state) {
            println!("{}", line);
        }
    }

    pub fn formatted(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "{:?}", event)?;
        }
        Ok(())
    }
}

/// The complete mutable state of one match. Everything needed to suspend and
/// resume a battle lives here; reference data and policies are supplied again on
/// resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub kind: BattleKind,
    pub friendly: Team,
    pub foe: Team,
    pub bag: Bag,
    pub participation: BattleParticipationTracker,
    pub turn_number: u32,
    pub game_state: GameState,
    pub outcome: Option<Outcome>,
}

impl BattleState {
    pub fn new(kind: BattleKind, friendly: Team, foe: Team, bag: Bag) -> Self {
        let mut participation = BattleParticipationTracker::new();
        participation.record_participation(friendly.active_index());
        Self {
            kind,
            friendly,
            foe,
            bag,
            participation,
            turn_number: 0,
            game_state: GameState::AwaitingDecisions,
            outcome: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.game_state != GameState::Terminal
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Friendly => &self.friendly,
            Side::Foe => &self.foe,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Friendly => &mut self.friendly,
            Side::Foe => &mut self.foe,
        }
    }

    pub fn active(&self, side: Side) -> &PokemonInst {
        self.team(side).active()
    }

    /// The attacker's and defender's active combatants, borrowed together.
    pub fn combatants_mut(&mut self, attacker: Side) -> (&mut PokemonInst, &mut PokemonInst) {
        match attacker {
            Side::Friendly => (self.friendly.active_mut(), self.foe.active_mut()),
            Side::Foe => (self.foe.active_mut(), self.friendly.active_mut()),
        }
    }

    /// Compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Human-readable snapshot.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
