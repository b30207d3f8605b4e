use crate::errors::{BattleStateError, DecisionError, DecisionResult};
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

pub const MAX_TEAM_SIZE: usize = 6;

/// An ordered roster of one to six combatants with an active pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pokemon: Vec<PokemonInst>,
    active_index: usize,
}

impl Team {
    /// The first non-fainted member starts active.
    pub fn new(pokemon: Vec<PokemonInst>) -> Result<Self, BattleStateError> {
        if pokemon.is_empty() || pokemon.len() > MAX_TEAM_SIZE {
            return Err(BattleStateError::InvalidTeamSize(pokemon.len()));
        }
        let active_index = pokemon.iter().position(|p| !p.is_fainted()).unwrap_or(0);
        Ok(Self {
            pokemon,
            active_index,
        })
    }

    /// Bring a deserialized roster back within bounds. An out-of-range or fainted
    /// active pointer moves to the first standing member unless `keep_fainted_active`
    /// is set. Returns whether the pointer moved.
    pub fn repair(&mut self, keep_fainted_active: bool) -> Result<bool, BattleStateError> {
        if self.pokemon.is_empty() || self.pokemon.len() > MAX_TEAM_SIZE {
            return Err(BattleStateError::InvalidTeamSize(self.pokemon.len()));
        }
        let in_range = self.active_index < self.pokemon.len();
        if in_range && (keep_fainted_active || !self.pokemon[self.active_index].is_fainted()) {
            return Ok(false);
        }
        let first_alive = self.pokemon.iter().position(|p| !p.is_fainted());
        let target = match (first_alive, in_range) {
            (Some(index), _) => index,
            (None, true) => return Ok(false),
            (None, false) => 0,
        };
        self.active_index = target;
        Ok(true)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> &PokemonInst {
        &self.pokemon[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut PokemonInst {
        &mut self.pokemon[self.active_index]
    }

    pub fn get(&self, index: usize) -> Option<&PokemonInst> {
        self.pokemon.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PokemonInst> {
        self.pokemon.get_mut(index)
    }

    pub fn members(&self) -> &[PokemonInst] {
        &self.pokemon
    }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut PokemonInst> {
        self.pokemon.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pokemon.len() >= MAX_TEAM_SIZE
    }

    pub fn all_fainted(&self) -> bool {
        self.pokemon.iter().all(PokemonInst::is_fainted)
    }

    pub fn alive(&self) -> Vec<&PokemonInst> {
        self.pokemon.iter().filter(|p| !p.is_fainted()).collect()
    }

    pub fn alive_indices(&self) -> Vec<usize> {
        self.pokemon
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_fainted())
            .map(|(i, _)| i)
            .collect()
    }

    /// Position of this exact combatant in the roster.
    pub fn index_of(&self, pokemon: &PokemonInst) -> Option<usize> {
        self.pokemon.iter().position(|p| std::ptr::eq(p, pokemon))
    }

    /// Check that `index` names a member who could be sent out.
    pub fn validate_switch(&self, index: usize) -> DecisionResult<()> {
        let target = self
            .pokemon
            .get(index)
            .ok_or(DecisionError::InvalidTeamIndex(index))?;
        if index == self.active_index {
            return Err(DecisionError::SwapTargetAlreadyActive(index));
        }
        if target.is_fainted() {
            return Err(DecisionError::SwapTargetFainted(index));
        }
        Ok(())
    }

    /// Move the active pointer. Member order is untouched.
    pub fn switch_active(&mut self, index: usize) -> DecisionResult<()> {
        self.validate_switch(index)?;
        self.active_index = index;
        Ok(())
    }

    /// Exchange the positions of two members. The active slot keeps its position, so
    /// swapping the active slot with another brings that member into battle.
    pub fn swap(&mut self, from: usize, to: usize) -> DecisionResult<()> {
        let len = self.pokemon.len();
        if from >= len {
            return Err(DecisionError::InvalidTeamIndex(from));
        }
        if to >= len {
            return Err(DecisionError::InvalidTeamIndex(to));
        }
        self.pokemon.swap(from, to);
        Ok(())
    }

    /// Append a member. Fails when the roster is already full.
    pub fn push(&mut self, pokemon: PokemonInst) -> DecisionResult<usize> {
        if self.is_full() {
            return Err(DecisionError::TeamFull);
        }
        self.pokemon.push(pokemon);
        Ok(self.pokemon.len() - 1)
    }
}
