use crate::bag::Bag;
use crate::battle::engine::Battle;
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleKind, BattleState};
use crate::battle::stats::Stats;
use crate::config::BattleConfig;
use crate::data::{DataStore, ReferenceData};
use crate::errors::BattleResult;
use crate::pokemon::PokemonInst;
use crate::team::Team;
use schema::StatusType;
use std::sync::Arc;

const SPECIES: &str = r#"[
    (pokedex_number: 393, name: "Piplup", types: [Water], catch_rate: 45, base_exp: 63,
     base_stats: (hp: 53, attack: 51, defense: 53, sp_attack: 61, sp_defense: 56, speed: 40),
     growth_rate: MediumSlow, ev_yield: (0, 0, 0, 1, 0, 0),
     learnset: [(1, "Pound"), (4, "Growl"), (8, "Bubble")]),
    (pokedex_number: 387, name: "Turtwig", types: [Grass], catch_rate: 45, base_exp: 64,
     base_stats: (hp: 55, attack: 68, defense: 64, sp_attack: 45, sp_defense: 55, speed: 31),
     growth_rate: MediumSlow, ev_yield: (0, 1, 0, 0, 0, 0),
     learnset: [(1, "Tackle"), (5, "Withdraw"), (9, "Absorb")]),
    (pokedex_number: 399, name: "Bidoof", types: [Normal], catch_rate: 255, base_exp: 50,
     base_stats: (hp: 59, attack: 45, defense: 40, sp_attack: 35, sp_defense: 40, speed: 31),
     growth_rate: MediumFast, ev_yield: (1, 0, 0, 0, 0, 0),
     learnset: [(1, "Tackle"), (5, "Growl"), (7, "Defense Curl"), (9, "Headbutt")]),
    (pokedex_number: 396, name: "Starly", types: [Normal, Flying], catch_rate: 255, base_exp: 56,
     base_stats: (hp: 40, attack: 55, defense: 30, sp_attack: 30, sp_defense: 30, speed: 60),
     growth_rate: MediumSlow, ev_yield: (0, 0, 0, 0, 0, 1),
     learnset: [(1, "Tackle"), (1, "Growl"), (5, "Quick Attack")]),
    (pokedex_number: 403, name: "Shinx", types: [Electric], catch_rate: 235, base_exp: 60,
     base_stats: (hp: 45, attack: 65, defense: 34, sp_attack: 40, sp_defense: 34, speed: 45),
     growth_rate: MediumSlow, ev_yield: (0, 1, 0, 0, 0, 0),
     learnset: [(1, "Tackle"), (5, "Leer"), (9, "Thunder Shock")]),
    (pokedex_number: 92, name: "Gastly", types: [Ghost, Poison], catch_rate: 190, base_exp: 62,
     base_stats: (hp: 30, attack: 35, defense: 30, sp_attack: 100, sp_defense: 35, speed: 80),
     growth_rate: MediumSlow, ev_yield: (0, 0, 0, 1, 0, 0),
     learnset: [(1, "Lick")]),
]"#;

const MOVES: &str = r#"[
    (name: "Tackle", move_type: Normal, category: Physical, power: Some(40), accuracy: Some(100), max_pp: 35, effect: None),
    (name: "Pound", move_type: Normal, category: Physical, power: Some(40), accuracy: Some(100), max_pp: 35, effect: None),
    (name: "Quick Attack", move_type: Normal, category: Physical, power: Some(40), accuracy: Some(100), max_pp: 30, effect: None),
    (name: "Headbutt", move_type: Normal, category: Physical, power: Some(70), accuracy: Some(100), max_pp: 15, effect: None),
    (name: "Fury Swipes", move_type: Normal, category: Physical, power: Some(18), accuracy: Some(80), max_pp: 15,
     effect: Some(MultiHit(min: 2, max: 5))),
    (name: "Growl", move_type: Normal, category: Status, power: None, accuracy: Some(100), max_pp: 40,
     effect: Some(StatChange(stat: Attack, stages: 1, target: Target, direction: Lower, chance: 100))),
    (name: "Leer", move_type: Normal, category: Status, power: None, accuracy: Some(100), max_pp: 30,
     effect: Some(StatChange(stat: Defense, stages: 1, target: Target, direction: Lower, chance: 100))),
    (name: "Withdraw", move_type: Water, category: Status, power: None, accuracy: None, max_pp: 40,
     effect: Some(StatChange(stat: Defense, stages: 1, target: User, direction: Raise, chance: 100))),
    (name: "Defense Curl", move_type: Normal, category: Status, power: None, accuracy: None, max_pp: 40,
     effect: Some(StatChange(stat: Defense, stages: 1, target: User, direction: Raise, chance: 100))),
    (name: "Swords Dance", move_type: Normal, category: Status, power: None, accuracy: None, max_pp: 20,
     effect: Some(StatChange(stat: Attack, stages: 2, target: User, direction: Raise, chance: 100))),
    (name: "Recover", move_type: Normal, category: Status, power: None, accuracy: None, max_pp: 10,
     effect: Some(Heal(percent: 50))),
    (name: "Bubble", move_type: Water, category: Special, power: Some(20), accuracy: Some(100), max_pp: 30,
     effect: Some(StatChange(stat: Speed, stages: 1, target: Target, direction: Lower, chance: 10))),
    (name: "Absorb", move_type: Grass, category: Special, power: Some(20), accuracy: Some(100), max_pp: 25,
     effect: Some(Heal(percent: 50))),
    (name: "Mega Drain", move_type: Grass, category: Special, power: Some(40), accuracy: Some(100), max_pp: 15,
     effect: Some(Heal(percent: 50))),
    (name: "Poison Sting", move_type: Poison, category: Physical, power: Some(15), accuracy: Some(100), max_pp: 35,
     effect: Some(Condition(status: Poisoned, chance: 30))),
    (name: "Poison Powder", move_type: Poison, category: Status, power: None, accuracy: Some(75), max_pp: 35,
     effect: Some(Condition(status: Poisoned, chance: 100))),
    (name: "Will-O-Wisp", move_type: Fire, category: Status, power: None, accuracy: Some(75), max_pp: 15,
     effect: Some(Condition(status: Burned, chance: 100))),
    (name: "Thunder Shock", move_type: Electric, category: Special, power: Some(40), accuracy: Some(100), max_pp: 30,
     effect: Some(Condition(status: Paralysed, chance: 10))),
    (name: "Lick", move_type: Ghost, category: Physical, power: Some(30), accuracy: Some(100), max_pp: 30,
     effect: Some(Condition(status: Paralysed, chance: 30))),
]"#;

const ITEMS: &str = r#"[
    (name: "Poke Ball", kind: CaptureDevice(modifier: 1.0)),
    (name: "Great Ball", kind: CaptureDevice(modifier: 1.5)),
    (name: "Potion", kind: Medicine(heal: Some(20), cures: None)),
    (name: "Antidote", kind: Medicine(heal: None, cures: Some(Poisoned))),
]"#;

/// The in-code reference data every battle test runs against.
pub fn test_data_store() -> DataStore {
    match DataStore::from_ron_strs(SPECIES, MOVES, ITEMS) {
        Ok(store) => store,
        Err(err) => panic!("Failed to build test reference data: {}", err),
    }
}

pub fn test_data() -> Arc<dyn ReferenceData> {
    Arc::new(test_data_store())
}

/// Every stat set to `value`, health included.
pub fn flat_stats(value: u16) -> Stats {
    Stats {
        health: value,
        attack: value,
        defense: value,
        sp_attack: value,
        sp_defense: value,
        speed: value,
    }
}

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Piplup", 50)
///     .with_moves(vec!["Tackle"])
///     .with_stats(flat_stats(100))
///     .with_status(StatusType::Poisoned)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: &'static str,
    level: u8,
    moves: Option<Vec<&'static str>>,
    status: Option<StatusType>,
    current_hp: Option<u16>,
    stats: Option<Stats>,
    speed: Option<u16>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: &'static str, level: u8) -> Self {
        Self {
            species,
            level,
            moves: None,
            status: None,
            current_hp: None,
            stats: None,
            speed: None,
        }
    }

    /// Sets the moves for the test Pokemon. Without this the learnset decides.
    pub fn with_moves(mut self, moves: Vec<&'static str>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_status(mut self, status: StatusType) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP for the test Pokemon. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Replace the derived stats outright.
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Override only the speed stat, applied after `with_stats`.
    pub fn with_speed(mut self, speed: u16) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let data = test_data_store();
        let mut pokemon =
            match PokemonInst::from_species(&data, self.species, self.level, self.moves.as_deref()) {
                Ok(pokemon) => pokemon,
                Err(err) => panic!("Failed to build {}: {}", self.species, err),
            };

        if let Some(stats) = self.stats {
            pokemon.stats = stats;
        }
        if let Some(speed) = self.speed {
            pokemon.stats.speed = speed;
        }
        pokemon.status = self.status;

        match self.current_hp {
            Some(hp) => pokemon.set_hp(hp),
            None => pokemon.set_hp_to_max(),
        }
        pokemon
    }
}

fn team(members: Vec<PokemonInst>, friendly: bool) -> Team {
    let members = members
        .into_iter()
        .map(|mut pokemon| {
            pokemon.friendly = friendly;
            pokemon
        })
        .collect();
    match Team::new(members) {
        Ok(team) => team,
        Err(err) => panic!("Invalid test team: {}", err),
    }
}

/// Builds a battle state without wrapping it in a `Battle`.
pub fn create_test_state(
    kind: BattleKind,
    friendly: Vec<PokemonInst>,
    foe: Vec<PokemonInst>,
    bag: Bag,
) -> BattleState {
    BattleState::new(kind, team(friendly, true), team(foe, false), bag)
}

pub fn create_battle(
    kind: BattleKind,
    friendly: Vec<PokemonInst>,
    foe: Vec<PokemonInst>,
    bag: Bag,
    config: BattleConfig,
) -> Battle {
    Battle::new(create_test_state(kind, friendly, foe, bag), test_data(), config)
}

/// Creates a wild battle with an empty bag and the default config.
pub fn create_wild_battle(friendly: Vec<PokemonInst>, foe: Vec<PokemonInst>) -> Battle {
    create_battle(BattleKind::Wild, friendly, foe, Bag::new(), BattleConfig::default())
}

pub fn create_trainer_battle(friendly: Vec<PokemonInst>, foe: Vec<PokemonInst>) -> Battle {
    create_battle(BattleKind::Trainer, friendly, foe, Bag::new(), BattleConfig::default())
}

/// Creates a `TurnRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// True if any event matches the predicate.
pub fn has_event(events: &[BattleEvent], predicate: impl Fn(&BattleEvent) -> bool) -> bool {
    events.iter().any(predicate)
}
