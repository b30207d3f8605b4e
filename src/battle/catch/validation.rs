use crate::battle::state::BattleKind;
use crate::errors::{DecisionError, DecisionResult};
use crate::team::Team;

/// Check if catch attempts are allowed based on battle kind
pub fn is_catch_allowed(kind: BattleKind) -> bool {
    matches!(kind, BattleKind::Wild)
}

/// Validate that a capture device may be thrown at the foe's active combatant
pub fn can_attempt_catch(kind: BattleKind, friendly: &Team, foe: &Team) -> DecisionResult<()> {
    if !is_catch_allowed(kind) {
        return Err(DecisionError::CaptureNotAllowed);
    }
    if friendly.is_full() {
        return Err(DecisionError::TeamFull);
    }
    if foe.active().is_fainted() {
        return Err(DecisionError::ItemHasNoEffect("capture device".to_string()));
    }
    Ok(())
}
