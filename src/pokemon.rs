use crate::battle::stats::{StatStages, Stats};
use crate::data::ReferenceData;
use crate::errors::ReferenceDataResult;
use schema::{BaseStats, GrowthRate, MoveData, PokemonSpecies, PokemonType, StatusType};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MAX_MOVES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: MoveData,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: MoveData) -> Self {
        let pp = data.max_pp;
        MoveInstance { data, pp }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn max_pp(&self) -> u8 {
        self.data.max_pp
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    pub fn restore_pp(&mut self, amount: u8) {
        self.pp = self.pp.saturating_add(amount).min(self.max_pp());
    }
}

/// One creature's battle-facing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,                    // Species name if no nickname
    pub species: String,                 // Key for looking up species data
    pub pokedex_number: u16,
    pub level: u8,
    pub friendly: bool,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub catch_rate: u8,
    pub base_exp: u16,
    pub growth_rate: GrowthRate,
    pub ev_yield: [u8; 6],
    pub ivs: [u8; 6],                    // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub evs: [u16; 6],                   // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub stats: Stats,
    hp: u16,
    pub stages: StatStages,
    pub status: Option<StatusType>,
    pub moves: Vec<MoveInstance>,
    pub exp: u32,
    pub level_exp: u32,
    pub level_up_exp: u32,
    pub crit_stage: u8,
}

impl PokemonInst {
    /// Create a new Pokemon instance from species data at full health.
    pub fn new(
        species: &PokemonSpecies,
        level: u8,
        moves: Vec<MoveData>,
        ivs: Option<[u8; 6]>,
    ) -> Self {
        let level = level.clamp(1, 100);
        let evs = [0; 6];
        let stats = Stats::derive(&species.base_stats, &evs, level);
        let level_exp = species.growth_rate.exp_for_level(level);

        PokemonInst {
            name: species.name.clone(),
            species: species.name.to_uppercase(),
            pokedex_number: species.pokedex_number,
            level,
            friendly: false,
            types: species.types.clone(),
            base_stats: species.base_stats.clone(),
            catch_rate: species.catch_rate,
            base_exp: species.base_exp,
            growth_rate: species.growth_rate,
            ev_yield: species.ev_yield,
            ivs: ivs.unwrap_or([0; 6]),
            evs,
            stats,
            hp: stats.health,
            stages: StatStages::default(),
            status: None,
            moves: moves
                .into_iter()
                .take(MAX_MOVES)
                .map(MoveInstance::new)
                .collect(),
            exp: level_exp,
            level_exp,
            level_up_exp: species.growth_rate.exp_for_level(level.saturating_add(1)),
            crit_stage: 0,
        }
    }

    /// Build a combatant by name. Without explicit moves, the latest four learnset
    /// moves available at `level` are used.
    pub fn from_species(
        data: &dyn ReferenceData,
        species: &str,
        level: u8,
        moves: Option<&[&str]>,
    ) -> ReferenceDataResult<Self> {
        let species_data = data.species(species)?;
        let move_names = match moves {
            Some(names) => names.to_vec(),
            None => species_data.default_moves(level),
        };
        let moves = move_names
            .into_iter()
            .map(|name| data.move_data(name).cloned())
            .collect::<ReferenceDataResult<Vec<_>>>()?;
        Ok(Self::new(species_data, level, moves, None))
    }

    pub fn current_hp(&self) -> u16 {
        self.hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.health
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.max_hp());
    }

    pub fn set_hp_to_max(&mut self) {
        self.hp = self.max_hp();
    }

    /// Apply damage, never dropping below zero. Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restore health up to the cap. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.max_hp() - self.hp.min(self.max_hp()));
        self.hp += restored;
        restored
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    pub fn knows_move(&self, name: &str) -> bool {
        self.moves.iter().any(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Add a move to a free slot. Returns false when all four slots are taken.
    pub fn learn_move(&mut self, data: MoveData) -> bool {
        if self.moves.len() >= MAX_MOVES {
            return false;
        }
        self.moves.push(MoveInstance::new(data));
        true
    }

    /// Recompute derived stats from level and EVs, carrying the change in the health
    /// cap over onto current health.
    pub fn recalculate_stats(&mut self) {
        let old_cap = self.stats.health;
        self.stats = Stats::derive(&self.base_stats, &self.evs, self.level);
        let new_cap = self.stats.health;
        if new_cap >= old_cap {
            self.hp = self.hp.saturating_add(new_cap - old_cap);
        }
        self.hp = self.hp.min(new_cap);
    }

    /// Clamp every bounded field back into range, logging each repair.
    /// Returns true if anything had to change.
    pub fn enforce_invariants(&mut self) -> bool {
        let mut repaired = false;
        if self.hp > self.max_hp() {
            warn!(
                pokemon = %self.name,
                hp = self.hp,
                cap = self.max_hp(),
                "health above cap, clamping"
            );
            self.hp = self.max_hp();
            repaired = true;
        }
        if self.stages.sanitize() {
            repaired = true;
        }
        if self.moves.len() > MAX_MOVES {
            warn!(pokemon = %self.name, moves = self.moves.len(), "too many moves, truncating");
            self.moves.truncate(MAX_MOVES);
            repaired = true;
        }
        for slot in self.moves.iter_mut() {
            if slot.pp > slot.max_pp() {
                warn!(pokemon = %self.name, move_name = %slot.data.name, "PP above max, clamping");
                slot.pp = slot.max_pp();
                repaired = true;
            }
        }
        repaired
    }
}
