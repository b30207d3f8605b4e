use crate::pokemon::PokemonInst;

/// Calculator for experience and EV rewards based on the defeated combatant
pub struct RewardCalculator;

impl RewardCalculator {
    /// Experience yielded by a defeated combatant: `base_exp * level / 7`.
    /// Trainer, traded and item modifiers are all fixed at 1.
    pub fn faint_yield(&self, defeated: &PokemonInst) -> f64 {
        defeated.base_exp as f64 * defeated.level as f64 / 7.0
    }

    /// Even split of `total` across every participant, rounded to the nearest point.
    pub fn exp_share(&self, total: f64, participants: usize) -> u32 {
        if participants == 0 {
            return 0;
        }
        (total / participants as f64).round() as u32
    }

    /// Effort values granted for defeating this combatant, HP..SPD order
    pub fn ev_yield(&self, defeated: &PokemonInst) -> [u8; 6] {
        defeated.ev_yield
    }
}
