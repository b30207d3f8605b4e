use crate::data::ReferenceData;
use crate::errors::ReferenceDataResult;
use crate::pokemon::PokemonInst;
use crate::progression::rewards::RewardCalculator;
use crate::progression::BattleParticipationTracker;
use crate::team::Team;
use tracing::debug;

/// One level gained, with the learnset moves that came with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u8,
    pub learned: Vec<String>,
    /// Moves offered at this level that found no free slot.
    pub not_learned: Vec<String>,
}

/// Experience credited to one roster slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceAward {
    pub team_index: usize,
    pub amount: u32,
    pub level_ups: Vec<LevelUp>,
}

fn level_up(pokemon: &mut PokemonInst, data: &dyn ReferenceData) -> ReferenceDataResult<LevelUp> {
    pokemon.level += 1;
    pokemon.level_exp = pokemon.growth_rate.exp_for_level(pokemon.level);
    pokemon.level_up_exp = pokemon.growth_rate.exp_for_level(pokemon.level.saturating_add(1));
    pokemon.recalculate_stats();

    let mut report = LevelUp {
        new_level: pokemon.level,
        learned: Vec::new(),
        not_learned: Vec::new(),
    };
    let species = data.species(&pokemon.species)?;
    for move_name in species.moves_learned_at(pokemon.level) {
        if pokemon.knows_move(move_name) {
            continue;
        }
        let move_data = data.move_data(move_name)?.clone();
        if pokemon.learn_move(move_data) {
            report.learned.push(move_name.to_string());
        } else {
            report.not_learned.push(move_name.to_string());
        }
    }
    debug!(pokemon = %pokemon.name, level = pokemon.level, "level up");
    Ok(report)
}

/// Add experience and apply every level-up it pays for, one at a time.
/// At `max_level` surplus experience is dropped.
pub fn gain_experience(
    pokemon: &mut PokemonInst,
    amount: u32,
    data: &dyn ReferenceData,
    max_level: u8,
) -> ReferenceDataResult<Vec<LevelUp>> {
    pokemon.exp = pokemon.exp.saturating_add(amount);
    let mut level_ups = Vec::new();
    while pokemon.level < max_level && pokemon.exp >= pokemon.level_up_exp {
        level_ups.push(level_up(pokemon, data)?);
    }
    if pokemon.level >= max_level {
        pokemon.exp = pokemon.level_exp;
    }
    Ok(level_ups)
}

/// Add a defeated foe's effort-value yield and recompute stats.
pub fn award_effort_values(pokemon: &mut PokemonInst, ev_yield: [u8; 6]) {
    for (ev, gained) in pokemon.evs.iter_mut().zip(ev_yield) {
        *ev = ev.saturating_add(gained as u16);
    }
    pokemon.recalculate_stats();
}

/// Split a defeated foe's experience across every participant and credit the
/// ones still standing.
pub fn distribute_experience(
    team: &mut Team,
    participation: &BattleParticipationTracker,
    defeated: &PokemonInst,
    data: &dyn ReferenceData,
    max_level: u8,
) -> ReferenceDataResult<Vec<ExperienceAward>> {
    let calculator = RewardCalculator;
    let total = calculator.faint_yield(defeated);
    let share = calculator.exp_share(total, participation.count());
    debug!(defeated = %defeated.name, total, share, participants = participation.count(), "experience split");

    let mut awards = Vec::new();
    for team_index in participation.participants() {
        let Some(pokemon) = team.get_mut(team_index) else {
            continue;
        };
        if pokemon.is_fainted() {
            continue;
        }
        let level_ups = gain_experience(pokemon, share, data, max_level)?;
        awards.push(ExperienceAward {
            team_index,
            amount: share,
            level_ups,
        });
    }
    Ok(awards)
}
