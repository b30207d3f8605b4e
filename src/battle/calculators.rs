use crate::battle::effects::{resolve_effect, EffectOutcome};
use crate::battle::rng::RandomSource;
use crate::battle::stats::{crit_chance, stage_multiplier};
use crate::data::ReferenceData;
use crate::errors::{DecisionError, DecisionResult};
use crate::pokemon::PokemonInst;
use schema::{MoveCategory, MoveData, PokemonType, StatType, StatusType};
use tracing::debug;

/// Everything rolled for one use of a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Damage per hit, before clamping to the defender's health.
    pub damage: u16,
    pub effectiveness: f64,
    pub critical: bool,
    pub effect: EffectOutcome,
}

/// Product of the move type's multiplier against each of the defender's types.
pub fn type_multiplier(move_type: PokemonType, defender: &PokemonInst, chart: &dyn ReferenceData) -> f64 {
    defender
        .types
        .iter()
        .map(|&defending| chart.type_effectiveness(move_type, defending))
        .product()
}

/// Damage formula for a Physical or Special move. Status moves deal nothing.
///
/// On a critical hit the attacker's stage only counts when positive and the
/// defender's only when negative.
pub fn calculate_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    critical: bool,
    random_factor: f64,
    chart: &dyn ReferenceData,
) -> (u16, f64) {
    let effectiveness = type_multiplier(move_data.move_type, defender, chart);
    let (attack, attack_stage, defense, defense_stage) = match move_data.category {
        MoveCategory::Physical => (
            attacker.stats.attack,
            attacker.stages.get(StatType::Attack),
            defender.stats.defense,
            defender.stages.get(StatType::Defense),
        ),
        MoveCategory::Special => (
            attacker.stats.sp_attack,
            attacker.stages.get(StatType::SpecialAttack),
            defender.stats.sp_defense,
            defender.stages.get(StatType::SpecialDefense),
        ),
        MoveCategory::Status => return (0, effectiveness),
    };

    let (attack_stage, defense_stage) = if critical {
        (attack_stage.max(0), defense_stage.min(0))
    } else {
        (attack_stage, defense_stage)
    };
    let attack = attack as f64 * stage_multiplier(attack_stage);
    let defense = (defense as f64 * stage_multiplier(defense_stage)).max(1.0);

    let level_factor = (2 * attacker.level as u32 / 5 + 2) as f64;
    let power = move_data.power.unwrap_or(0) as f64;
    let base = (level_factor * power * (attack / defense).floor()).floor() / 50.0;

    let burn = if attacker.status == Some(StatusType::Burned)
        && move_data.category == MoveCategory::Physical
    {
        0.5
    } else {
        1.0
    };
    let subtotal = base * burn + 2.0;
    let crit_multiplier = if critical { 2.0 } else { 1.0 };
    let stab = if attacker.has_type(move_data.move_type) {
        1.5
    } else {
        1.0
    };

    let damage = (subtotal * crit_multiplier * random_factor * stab * effectiveness).floor();
    (damage.clamp(0.0, u16::MAX as f64) as u16, effectiveness)
}

/// Roll and compute one use of the move in `move_index`, spending one PP.
///
/// Draw order: secondary effect, then (damaging moves only) the critical roll and
/// the 85-100 random factor.
pub fn calculate_attack_outcome(
    attacker: &mut PokemonInst,
    move_index: usize,
    defender: &PokemonInst,
    chart: &dyn ReferenceData,
    rng: &mut dyn RandomSource,
) -> DecisionResult<MoveOutcome> {
    let move_data = attacker
        .moves
        .get(move_index)
        .map(|slot| slot.data.clone())
        .ok_or(DecisionError::InvalidMoveIndex(move_index))?;

    let effect = resolve_effect(move_data.effect.as_ref(), rng);

    let (damage, effectiveness, critical) = if move_data.is_damaging() {
        let roll = rng.next_in_range(0, 99, "critical hit") as f64 / 100.0;
        let critical = roll < crit_chance(attacker.crit_stage);
        let random_factor = rng.next_in_range(85, 100, "damage random factor") as f64 / 100.0;
        let (damage, effectiveness) =
            calculate_damage(attacker, defender, &move_data, critical, random_factor, chart);
        (damage, effectiveness, critical)
    } else {
        (0, type_multiplier(move_data.move_type, defender, chart), false)
    };

    attacker.moves[move_index].use_move();

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        move_name = %move_data.name,
        damage,
        effectiveness,
        critical,
        hits = effect.hits,
        "move outcome"
    );

    Ok(MoveOutcome {
        damage,
        effectiveness,
        critical,
        effect,
    })
}
