use crate::battle::rng::RandomSource;
use crate::pokemon::PokemonInst;
use schema::StatusType;
use tracing::debug;

/// Number of shake checks a capture must survive.
pub const CAPTURE_DRAWS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub captured: bool,
    /// Draws that came in under the threshold before the attempt ended.
    pub shakes: u8,
}

/// Status condition multiplier for catch rate
pub fn status_capture_modifier(status: Option<StatusType>) -> f64 {
    match status {
        Some(StatusType::Sleeping) | Some(StatusType::Frozen) => 2.0,
        Some(StatusType::Paralysed) | Some(StatusType::Poisoned) | Some(StatusType::Burned) => 1.5,
        Some(StatusType::Confused) | None => 1.0,
    }
}

/// `a = ((3*max - 2*current) * catch_rate * device * status) / (3*max)`
pub fn catch_value(target: &PokemonInst, device_modifier: f64, status_modifier: f64) -> f64 {
    let max_hp = target.max_hp().max(1) as f64;
    let current_hp = target.current_hp() as f64;
    ((3.0 * max_hp - 2.0 * current_hp) * target.catch_rate as f64 * device_modifier * status_modifier)
        / (3.0 * max_hp)
}

/// Shake threshold `b` derived from the catch value. `None` when the attempt cannot succeed.
pub fn shake_threshold(a: f64) -> Option<u32> {
    if a <= 0.0 {
        return None;
    }
    let ratio = (16_711_680.0 / a).floor();
    let root = ratio.sqrt().floor().sqrt().floor();
    if root < 1.0 {
        // the catch value is so high every draw passes
        return Some(u32::MAX);
    }
    Some((1_048_560.0 / root).floor() as u32)
}

/// Throw a capture device. Up to four draws in 0..=65535; the first draw at or above
/// the threshold ends the attempt and no further draws are taken.
pub fn attempt_capture(
    target: &PokemonInst,
    device_modifier: f64,
    status_modifier: f64,
    rng: &mut dyn RandomSource,
) -> CaptureOutcome {
    let a = catch_value(target, device_modifier, status_modifier);
    let Some(b) = shake_threshold(a) else {
        debug!(target = %target.name, a, "capture cannot succeed");
        return CaptureOutcome {
            captured: false,
            shakes: 0,
        };
    };

    let mut shakes = 0;
    for _ in 0..CAPTURE_DRAWS {
        let draw = rng.next_in_range(0, 65535, "capture shake");
        if draw >= b {
            debug!(target = %target.name, a, b, draw, shakes, "capture broke free");
            return CaptureOutcome {
                captured: false,
                shakes,
            };
        }
        shakes += 1;
    }
    debug!(target = %target.name, a, b, "capture succeeded");
    CaptureOutcome {
        captured: true,
        shakes,
    }
}
