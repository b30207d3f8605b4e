use crate::bag::Bag;
use crate::battle::ai::RandomFoePolicy;
use crate::battle::calculators::calculate_attack_outcome;
use crate::battle::catch::{attempt_capture, can_attempt_catch, status_capture_modifier};
use crate::battle::decision::{Decision, DecisionContext, DecisionKind, DecisionProvider};
use crate::battle::rng::RandomSource;
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleKind, BattleState, EventBus, GameState, Outcome, Side,
};
use crate::config::{BattleConfig, SpeedTie};
use crate::data::ReferenceData;
use crate::errors::{BattleResult, BattleStateError, DecisionError, DecisionResult};
use crate::progression::{award_effort_values, distribute_experience};
use crate::team::Team;
use schema::{EffectTarget, ItemData, ItemKind};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// An action queued for this round, bound to the roster slot that chose it.
#[derive(Debug, Clone)]
struct QueuedAction {
    side: Side,
    actor_index: usize,
    decision: Option<Decision>,
}

/// Move slots of `side`'s active combatant that still have PP.
pub fn legal_moves(state: &BattleState, side: Side) -> Vec<usize> {
    state
        .active(side)
        .moves
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.pp > 0)
        .map(|(index, _)| index)
        .collect()
}

/// Non-fainted, non-active roster slots of `side`.
pub fn legal_swaps(state: &BattleState, side: Side) -> Vec<usize> {
    let team = state.team(side);
    team.alive_indices()
        .into_iter()
        .filter(|&index| index != team.active_index())
        .collect()
}

/// Bag items the friendly side could use right now.
pub fn legal_items(state: &BattleState, data: &dyn ReferenceData) -> Vec<String> {
    state
        .bag
        .items()
        .filter(|(name, _)| check_item(state, data, name).is_ok())
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Check that the friendly side owns `name` and that using it would do something.
pub fn check_item<'d>(
    state: &BattleState,
    data: &'d dyn ReferenceData,
    name: &str,
) -> DecisionResult<&'d ItemData> {
    if state.bag.count(name) == 0 {
        return Err(DecisionError::ItemNotOwned(name.to_string()));
    }
    let item = data
        .item(name)
        .map_err(|_| DecisionError::UnknownItem(name.to_string()))?;

    match &item.kind {
        ItemKind::CaptureDevice { .. } => {
            can_attempt_catch(state.kind, &state.friendly, &state.foe)?;
        }
        ItemKind::Medicine { heal, cures } => {
            let active = state.friendly.active();
            let would_heal = heal.is_some() && active.current_hp() < active.max_hp();
            let would_cure = cures.is_some() && active.status == *cures;
            if active.is_fainted() || (!would_heal && !would_cure) {
                return Err(DecisionError::ItemHasNoEffect(name.to_string()));
            }
        }
    }
    Ok(item)
}

/// Validate a friendly round decision against the current state.
pub fn validate_decision(
    state: &BattleState,
    data: &dyn ReferenceData,
    decision: &Decision,
) -> DecisionResult<()> {
    match decision {
        Decision::UseMove { move_index } => {
            let slot = state
                .friendly
                .active()
                .moves
                .get(*move_index)
                .ok_or(DecisionError::InvalidMoveIndex(*move_index))?;
            if slot.pp == 0 {
                return Err(DecisionError::NoPpRemaining {
                    move_name: slot.name().to_string(),
                });
            }
            Ok(())
        }
        Decision::UseItem { item } => check_item(state, data, item).map(|_| ()),
        Decision::Swap { team_index } => state.friendly.validate_switch(*team_index),
        Decision::Run => match state.kind {
            BattleKind::Wild => Ok(()),
            BattleKind::Trainer => Err(DecisionError::RunNotAllowed),
        },
        Decision::Quit => Ok(()),
    }
}

/// Build what a provider for `side` gets to see.
pub fn decision_context<'a>(
    state: &'a BattleState,
    data: &dyn ReferenceData,
    side: Side,
    kind: DecisionKind,
    last_error: Option<DecisionError>,
) -> DecisionContext<'a> {
    let legal_items = match side {
        Side::Friendly => legal_items(state, data),
        Side::Foe => Vec::new(),
    };
    DecisionContext {
        side,
        kind,
        battle_kind: state.kind,
        active: state.active(side),
        opponent: state.active(side.opponent()),
        team: state.team(side),
        legal_moves: legal_moves(state, side),
        legal_items,
        legal_swaps: legal_swaps(state, side),
        last_error,
    }
}

/// Owns one match and resolves it round by round.
pub struct Battle {
    state: BattleState,
    data: Arc<dyn ReferenceData>,
    config: BattleConfig,
    foe_policy: Box<dyn DecisionProvider>,
}

impl Battle {
    pub fn new(state: BattleState, data: Arc<dyn ReferenceData>, config: BattleConfig) -> Self {
        info!(
            kind = ?state.kind,
            friendly = %state.friendly.active().name,
            foe = %state.foe.active().name,
            "battle created"
        );
        Self {
            state,
            data,
            config,
            foe_policy: Box::new(RandomFoePolicy),
        }
    }

    pub fn wild(
        friendly: Team,
        foe: Team,
        bag: Bag,
        data: Arc<dyn ReferenceData>,
        config: BattleConfig,
    ) -> Self {
        Self::new(BattleState::new(BattleKind::Wild, friendly, foe, bag), data, config)
    }

    pub fn trainer(
        friendly: Team,
        foe: Team,
        bag: Bag,
        data: Arc<dyn ReferenceData>,
        config: BattleConfig,
    ) -> Self {
        Self::new(BattleState::new(BattleKind::Trainer, friendly, foe, bag), data, config)
    }

    /// Pick up a persisted battle. Out-of-range fields are clamped and logged, and a
    /// round that was interrupted mid-resolution is reopened for decisions.
    ///
    /// A roster with no members or more than six cannot be repaired and is rejected.
    pub fn resume(
        mut state: BattleState,
        data: Arc<dyn ReferenceData>,
        config: BattleConfig,
    ) -> BattleResult<Self> {
        for pokemon in state.friendly.members_mut().chain(state.foe.members_mut()) {
            pokemon.enforce_invariants();
        }
        if state.game_state == GameState::Resolving {
            warn!(turn = state.turn_number, "snapshot taken mid-round, reopening for decisions");
            state.game_state = GameState::AwaitingDecisions;
        }

        let awaiting_replacement = state.game_state == GameState::AwaitingReplacement;
        if state.friendly.repair(awaiting_replacement)? {
            warn!(active = state.friendly.active_index(), "friendly active pointer repaired");
            state.participation.record_participation(state.friendly.active_index());
        }
        if state.foe.repair(false)? {
            warn!(active = state.foe.active_index(), "foe active pointer repaired");
        }
        if awaiting_replacement && !state.friendly.active().is_fainted() {
            warn!("replacement prompt with a standing active, reopening for decisions");
            state.game_state = GameState::AwaitingDecisions;
        }

        if state.is_running() {
            let settled = if state.foe.all_fainted() {
                Some(Outcome::FoeTeamKO)
            } else if state.friendly.all_fainted() {
                Some(Outcome::FriendlyTeamKO)
            } else {
                None
            };
            if let Some(outcome) = settled {
                warn!(?outcome, "snapshot has a wiped roster, ending the battle");
                state.outcome = Some(outcome);
                state.game_state = GameState::Terminal;
            }
        }
        Ok(Self::new(state, data, config))
    }

    pub fn with_foe_policy(mut self, policy: Box<dyn DecisionProvider>) -> Self {
        self.foe_policy = policy;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn data(&self) -> &dyn ReferenceData {
        self.data.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    pub fn is_over(&self) -> bool {
        !self.state.is_running()
    }

    /// Which kind of friendly decision the battle is waiting for, if any.
    pub fn expected_decision(&self) -> Option<DecisionKind> {
        match self.state.game_state {
            GameState::AwaitingDecisions => Some(DecisionKind::Turn),
            GameState::AwaitingReplacement => Some(DecisionKind::Replacement),
            GameState::Resolving | GameState::Terminal => None,
        }
    }

    pub fn legal_moves(&self, side: Side) -> Vec<usize> {
        legal_moves(&self.state, side)
    }

    pub fn legal_items(&self) -> Vec<String> {
        legal_items(&self.state, self.data.as_ref())
    }

    pub fn legal_swaps(&self, side: Side) -> Vec<usize> {
        legal_swaps(&self.state, side)
    }

    pub fn validate_decision(&self, decision: &Decision) -> DecisionResult<()> {
        validate_decision(&self.state, self.data.as_ref(), decision)
    }

    pub fn decision_context(
        &self,
        side: Side,
        kind: DecisionKind,
        last_error: Option<DecisionError>,
    ) -> DecisionContext<'_> {
        decision_context(&self.state, self.data.as_ref(), side, kind, last_error)
    }

    /// Events announcing both starting combatants.
    pub fn opening_events(&self) -> EventBus {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::PokemonSentOut {
            side: Side::Foe,
            pokemon: self.state.foe.active().name.clone(),
        });
        bus.push(BattleEvent::PokemonSentOut {
            side: Side::Friendly,
            pokemon: self.state.friendly.active().name.clone(),
        });
        bus
    }

    /// Resolve one full round from the friendly decision. The foe decision comes from
    /// the foe policy.
    ///
    /// An invalid decision is returned as an error and leaves the state untouched.
    /// An internal error part way through rolls the round back to where it started.
    pub fn resolve_round(
        &mut self,
        decision: Decision,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<EventBus> {
        match self.state.game_state {
            GameState::AwaitingDecisions => {}
            GameState::Terminal => return Err(BattleStateError::BattleOver.into()),
            other => return Err(BattleStateError::NotAwaitingDecisions(format!("{:?}", other)).into()),
        }
        if let Err(error) = self.validate_decision(&decision) {
            warn!(?decision, %error, "rejected friendly decision");
            return Err(error.into());
        }

        let mut bus = EventBus::new();
        if decision == Decision::Quit {
            self.finish(Outcome::Quit, &mut bus);
            return Ok(bus);
        }

        let checkpoint = self.state.clone();
        match self.play_round(decision, &mut bus, rng) {
            Ok(()) => Ok(bus),
            Err(error) => {
                error!(
                    turn = checkpoint.turn_number + 1,
                    %error,
                    "round aborted, state rolled back"
                );
                self.state = checkpoint;
                Err(error)
            }
        }
    }

    fn play_round(
        &mut self,
        decision: Decision,
        bus: &mut EventBus,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<()> {
        self.state.turn_number += 1;
        self.state.game_state = GameState::Resolving;
        bus.push(BattleEvent::TurnStarted {
            turn_number: self.state.turn_number,
        });
        info!(turn = self.state.turn_number, "round started");

        if decision == Decision::Run {
            self.execute_run(bus);
            return Ok(());
        }

        let foe_decision = self.foe_decision(rng);
        let order = self.action_order();
        let queue: Vec<QueuedAction> = order
            .iter()
            .map(|&side| QueuedAction {
                side,
                actor_index: self.state.team(side).active_index(),
                decision: match side {
                    Side::Friendly => Some(decision.clone()),
                    Side::Foe => foe_decision.clone(),
                },
            })
            .collect();

        for action in &queue {
            if !self.state.is_running() {
                break;
            }
            self.execute_action(action, bus, rng)?;
            self.check_faints(bus, rng)?;
        }

        for &side in &order {
            if !self.state.is_running() {
                break;
            }
            self.apply_status_damage(side, bus, rng)?;
        }

        self.finalize_round(bus);
        Ok(())
    }

    /// Answer a replacement prompt: a `Swap` to a standing teammate, or `Quit`.
    pub fn submit_replacement(&mut self, decision: Decision) -> BattleResult<EventBus> {
        match self.state.game_state {
            GameState::AwaitingReplacement => {}
            GameState::Terminal => return Err(BattleStateError::BattleOver.into()),
            other => return Err(BattleStateError::NotAwaitingReplacement(format!("{:?}", other)).into()),
        }

        let mut bus = EventBus::new();
        match decision {
            Decision::Swap { team_index } => {
                if let Err(error) = self.state.friendly.switch_active(team_index) {
                    warn!(team_index, %error, "rejected replacement");
                    return Err(error.into());
                }
                self.state.participation.record_participation(team_index);
                bus.push(BattleEvent::PokemonSentOut {
                    side: Side::Friendly,
                    pokemon: self.state.friendly.active().name.clone(),
                });
                self.state.game_state = GameState::AwaitingDecisions;
            }
            Decision::Quit => self.finish(Outcome::Quit, &mut bus),
            other => {
                warn!(decision = ?other, "replacement prompt needs a swap");
                return Err(DecisionError::WrongDecisionKind.into());
            }
        }
        Ok(bus)
    }

    fn foe_decision(&mut self, rng: &mut dyn RandomSource) -> Option<Decision> {
        let context = decision_context(
            &self.state,
            self.data.as_ref(),
            Side::Foe,
            DecisionKind::Turn,
            None,
        );
        let decision = self.foe_policy.decide(&context, rng);
        match decision {
            Decision::UseMove { move_index } if move_index < self.state.foe.active().moves.len() => {
                Some(decision)
            }
            other => {
                warn!(decision = ?other, "foe policy chose an unusable action");
                None
            }
        }
    }

    /// Raw speed, highest first. Stages are not consulted.
    fn action_order(&self) -> [Side; 2] {
        let friendly = self.state.friendly.active().stats.speed;
        let foe = self.state.foe.active().stats.speed;
        if friendly > foe {
            [Side::Friendly, Side::Foe]
        } else if foe > friendly {
            [Side::Foe, Side::Friendly]
        } else {
            match self.config.speed_tie {
                SpeedTie::FoeFirst => [Side::Foe, Side::Friendly],
                SpeedTie::FriendlyFirst => [Side::Friendly, Side::Foe],
            }
        }
    }

    fn execute_run(&mut self, bus: &mut EventBus) {
        let friendly = self.state.friendly.active().stats.speed;
        let foe = self.state.foe.active().stats.speed;
        let succeeded = friendly > foe;
        debug!(friendly, foe, succeeded, "run attempt");
        bus.push(BattleEvent::RunAttempted { succeeded });
        if succeeded {
            self.finish(Outcome::Run, bus);
        } else {
            self.finalize_round(bus);
        }
    }

    fn execute_action(
        &mut self,
        action: &QueuedAction,
        bus: &mut EventBus,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<()> {
        let team = self.state.team(action.side);
        let actor_name = team
            .get(action.actor_index)
            .unwrap_or_else(|| team.active())
            .name
            .clone();
        let failure = if team.active_index() != action.actor_index {
            Some(ActionFailureReason::NoLongerActive)
        } else if team.active().is_fainted() {
            Some(ActionFailureReason::PokemonFainted)
        } else if action.decision.is_none() {
            Some(ActionFailureReason::InvalidAction)
        } else {
            None
        };
        if let Some(reason) = failure {
            bus.push(BattleEvent::ActionFailed {
                side: action.side,
                pokemon: actor_name,
                reason,
            });
            return Ok(());
        }

        match &action.decision {
            Some(Decision::UseMove { move_index }) => self.execute_move(action.side, *move_index, bus, rng),
            Some(Decision::UseItem { item }) => self.execute_item(item, bus, rng),
            Some(Decision::Swap { team_index }) => self.execute_switch(action.side, *team_index, bus),
            // Run and Quit never reach the action queue.
            Some(Decision::Run) | Some(Decision::Quit) | None => Ok(()),
        }
    }

    fn execute_move(
        &mut self,
        side: Side,
        move_index: usize,
        bus: &mut EventBus,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<()> {
        let data = Arc::clone(&self.data);
        let (attacker, defender) = self.state.combatants_mut(side);
        let move_data = attacker
            .moves
            .get(move_index)
            .map(|slot| slot.data.clone())
            .ok_or(DecisionError::InvalidMoveIndex(move_index))?;

        bus.push(BattleEvent::MoveUsed {
            side,
            pokemon: attacker.name.clone(),
            move_name: move_data.name.clone(),
        });

        if move_data.is_offensive() && defender.is_fainted() {
            bus.push(BattleEvent::ActionFailed {
                side,
                pokemon: attacker.name.clone(),
                reason: ActionFailureReason::NoEnemyPresent,
            });
            return Ok(());
        }

        let outcome = calculate_attack_outcome(attacker, move_index, defender, data.as_ref(), rng)?;
        let target_side = side.opponent();

        if move_data.is_damaging() {
            let mut total_damage: u16 = 0;
            let mut hits = 0;
            for _ in 0..outcome.effect.hits {
                if defender.is_fainted() {
                    break;
                }
                let dealt = defender.take_damage(outcome.damage);
                total_damage = total_damage.saturating_add(dealt);
                hits += 1;
                bus.push(BattleEvent::DamageDealt {
                    side: target_side,
                    target: defender.name.clone(),
                    damage: dealt,
                    remaining_hp: defender.current_hp(),
                });
            }
            if outcome.critical {
                bus.push(BattleEvent::CriticalHit { side });
            }
            bus.push(BattleEvent::AttackTypeEffectiveness {
                multiplier: outcome.effectiveness,
            });
            if outcome.effect.hits > 1 {
                bus.push(BattleEvent::MultiHitCompleted { hits });
            }
            if outcome.effectiveness == 0.0 {
                // An immune target shrugs off the secondary effect too.
                return Ok(());
            }
            if outcome.effect.heal_percent > 0 && total_damage > 0 {
                let amount = (total_damage as u32 * outcome.effect.heal_percent as u32 / 100).max(1);
                let restored = attacker.heal(amount.min(u16::MAX as u32) as u16);
                if restored > 0 {
                    bus.push(BattleEvent::PokemonHealed {
                        side,
                        target: attacker.name.clone(),
                        amount: restored,
                        new_hp: attacker.current_hp(),
                    });
                }
            }
        } else if outcome.effect.heal_percent > 0 {
            let amount = (attacker.max_hp() as u32 * outcome.effect.heal_percent as u32 / 100).max(1);
            let restored = attacker.heal(amount.min(u16::MAX as u32) as u16);
            if restored > 0 {
                bus.push(BattleEvent::PokemonHealed {
                    side,
                    target: attacker.name.clone(),
                    amount: restored,
                    new_hp: attacker.current_hp(),
                });
            }
        }

        if let Some(status) = outcome.effect.status {
            if defender.status.is_none() && !defender.is_fainted() {
                defender.status = Some(status);
                bus.push(BattleEvent::StatusApplied {
                    side: target_side,
                    target: defender.name.clone(),
                    status,
                });
            }
        }

        if let Some(modification) = outcome.effect.stat_change {
            let (target, target_side) = match modification.target {
                EffectTarget::User => (attacker, side),
                EffectTarget::Target => (defender, target_side),
            };
            if target.is_fainted() {
                return Ok(());
            }
            let change = target.stages.modify(modification.stat, modification.delta());
            if change.old_stage == change.new_stage {
                bus.push(BattleEvent::StatChangeBlocked {
                    side: target_side,
                    target: target.name.clone(),
                    stat: modification.stat,
                    direction: modification.direction,
                });
            } else {
                bus.push(BattleEvent::StatStageChanged {
                    side: target_side,
                    target: target.name.clone(),
                    stat: modification.stat,
                    old_stage: change.old_stage,
                    new_stage: change.new_stage,
                });
                if change.limited {
                    debug!(stat = %modification.stat, "stage change clamped");
                }
            }
        }
        Ok(())
    }

    fn execute_item(&mut self, name: &str, bus: &mut EventBus, rng: &mut dyn RandomSource) -> BattleResult<()> {
        let item = self.data.item(name)?.clone();
        self.state.bag.take(name)?;

        match item.kind {
            ItemKind::CaptureDevice { modifier } => {
                let target = self.state.foe.active();
                bus.push(BattleEvent::ItemUsed {
                    item: item.name.clone(),
                    target: target.name.clone(),
                });
                let outcome = attempt_capture(target, modifier, status_capture_modifier(target.status), rng);
                bus.push(BattleEvent::CaptureAttempted {
                    target: target.name.clone(),
                    shakes: outcome.shakes,
                    captured: outcome.captured,
                });
                if outcome.captured {
                    let mut caught = target.clone();
                    caught.friendly = true;
                    caught.stages.reset();
                    let pokemon = caught.name.clone();
                    let team_index = self.state.friendly.push(caught)?;
                    info!(%pokemon, team_index, "capture succeeded");
                    bus.push(BattleEvent::PokemonCaptured { pokemon, team_index });
                    self.finish(Outcome::Captured, bus);
                }
            }
            ItemKind::Medicine { heal, cures } => {
                let active = self.state.friendly.active_mut();
                bus.push(BattleEvent::ItemUsed {
                    item: item.name.clone(),
                    target: active.name.clone(),
                });
                if let Some(amount) = heal {
                    let restored = active.heal(amount);
                    if restored > 0 {
                        bus.push(BattleEvent::PokemonHealed {
                            side: Side::Friendly,
                            target: active.name.clone(),
                            amount: restored,
                            new_hp: active.current_hp(),
                        });
                    }
                }
                if let Some(status) = cures {
                    if active.status == Some(status) {
                        active.status = None;
                        bus.push(BattleEvent::StatusCured {
                            side: Side::Friendly,
                            target: active.name.clone(),
                            status,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn execute_switch(&mut self, side: Side, team_index: usize, bus: &mut EventBus) -> BattleResult<()> {
        let team = self.state.team_mut(side);
        let old_pokemon = team.active().name.clone();
        team.switch_active(team_index)?;
        let new_pokemon = team.active().name.clone();
        if side == Side::Friendly {
            self.state.participation.record_participation(team_index);
        }
        bus.push(BattleEvent::PokemonSwitched {
            side,
            old_pokemon,
            new_pokemon,
        });
        Ok(())
    }

    /// Handle a fainted active on either side: rewards and a random replacement for
    /// the foe, a pending replacement for the friendly side, or the end of the battle.
    fn check_faints(&mut self, bus: &mut EventBus, rng: &mut dyn RandomSource) -> BattleResult<()> {
        if self.state.is_running() && self.state.foe.active().is_fainted() {
            self.handle_foe_faint(bus, rng)?;
        }
        if self.state.is_running()
            && self.state.game_state != GameState::AwaitingReplacement
            && self.state.friendly.active().is_fainted()
        {
            let pokemon = self.state.friendly.active().name.clone();
            info!(%pokemon, "friendly combatant fainted");
            bus.push(BattleEvent::PokemonFainted {
                side: Side::Friendly,
                pokemon,
            });
            if self.state.friendly.all_fainted() {
                self.finish(Outcome::FriendlyTeamKO, bus);
            } else {
                self.state.game_state = GameState::AwaitingReplacement;
            }
        }
        Ok(())
    }

    fn handle_foe_faint(&mut self, bus: &mut EventBus, rng: &mut dyn RandomSource) -> BattleResult<()> {
        let defeated = self.state.foe.active().clone();
        info!(pokemon = %defeated.name, "foe combatant fainted");
        bus.push(BattleEvent::PokemonFainted {
            side: Side::Foe,
            pokemon: defeated.name.clone(),
        });

        let active = self.state.friendly.active_mut();
        if !active.is_fainted() {
            award_effort_values(active, defeated.ev_yield);
            bus.push(BattleEvent::EffortValuesGained {
                pokemon: active.name.clone(),
                evs: defeated.ev_yield,
            });
        }

        let awards = distribute_experience(
            &mut self.state.friendly,
            &self.state.participation,
            &defeated,
            self.data.as_ref(),
            self.config.max_level,
        )?;
        for award in awards {
            let Some(pokemon) = self.state.friendly.get(award.team_index) else {
                continue;
            };
            let name = pokemon.name.clone();
            bus.push(BattleEvent::ExperienceGained {
                pokemon: name.clone(),
                amount: award.amount,
            });
            for level_up in award.level_ups {
                bus.push(BattleEvent::LevelUp {
                    pokemon: name.clone(),
                    new_level: level_up.new_level,
                });
                for move_name in level_up.learned {
                    bus.push(BattleEvent::MoveLearned {
                        pokemon: name.clone(),
                        move_name,
                    });
                }
                for move_name in level_up.not_learned {
                    bus.push(BattleEvent::MoveNotLearned {
                        pokemon: name.clone(),
                        move_name,
                    });
                }
            }
        }

        let alive = self.state.foe.alive_indices();
        if alive.is_empty() {
            self.finish(Outcome::FoeTeamKO, bus);
            return Ok(());
        }
        let pick = rng.next_in_range(0, alive.len() as u32 - 1, "foe replacement");
        let team_index = alive[pick as usize];
        self.state.foe.switch_active(team_index)?;
        let pokemon = self.state.foe.active().name.clone();
        debug!(%pokemon, team_index, "foe sent out a replacement");
        bus.push(BattleEvent::PokemonSentOut {
            side: Side::Foe,
            pokemon,
        });
        Ok(())
    }

    fn apply_status_damage(
        &mut self,
        side: Side,
        bus: &mut EventBus,
        rng: &mut dyn RandomSource,
    ) -> BattleResult<()> {
        let pokemon = self.state.team_mut(side).active_mut();
        if pokemon.is_fainted() {
            return Ok(());
        }
        let Some(status) = pokemon.status else {
            return Ok(());
        };
        let Some(fraction) = self.config.status_damage_fraction(status) else {
            return Ok(());
        };
        let damage = ((pokemon.max_hp() as f64 * fraction).floor() as u16).max(1);
        let dealt = pokemon.take_damage(damage);
        debug!(pokemon = %pokemon.name, %status, dealt, "status damage");
        bus.push(BattleEvent::StatusDamage {
            side,
            target: pokemon.name.clone(),
            status,
            damage: dealt,
        });
        self.check_faints(bus, rng)
    }

    fn finalize_round(&mut self, bus: &mut EventBus) {
        if !self.state.is_running() {
            return;
        }
        bus.push(BattleEvent::TurnEnded);
        if self.state.game_state != GameState::AwaitingReplacement {
            self.state.game_state = GameState::AwaitingDecisions;
        }
        info!(turn = self.state.turn_number, state = ?self.state.game_state, "round ended");
    }

    fn finish(&mut self, outcome: Outcome, bus: &mut EventBus) {
        self.state.outcome = Some(outcome);
        self.state.game_state = GameState::Terminal;
        for pokemon in self.state.friendly.members_mut() {
            pokemon.stages.reset();
        }
        bus.push(BattleEvent::BattleEnded { outcome });
        info!(?outcome, turn = self.state.turn_number, "battle ended");
    }
}
