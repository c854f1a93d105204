// In: src/battle/move_effects/mod.rs

mod damage_effects;
mod special_effects;
mod stat_effects;
mod status_effects;

use crate::battle::commands::{MoveContext, MoveOutcome};
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleState, EventBus};
use crate::player::PlayerTarget;
use schema::Move;

use self::{damage_effects::*, special_effects::*, stat_effects::*, status_effects::*};

/// An effect is a fixed sequence of commands over one action's context.
pub type EffectFn = fn(&mut MoveContext);

/// The dispatch table: every move is wired to exactly one effect.
pub fn effect_for(move_used: Move) -> EffectFn {
    match move_used {
        Move::Tackle | Move::Scratch | Move::Pound | Move::QuickAttack => plain_hit,

        Move::Ember | Move::Flamethrower | Move::FirePunch => burn_chance_hit,
        Move::ThunderShock | Move::Thunderbolt | Move::BodySlam => paralysis_chance_hit,

        Move::ThunderWave | Move::StunSpore | Move::Glare => paralyze,

        Move::Growl
        | Move::TailWhip
        | Move::Leer
        | Move::StringShot
        | Move::Screech
        | Move::SwordsDance
        | Move::Harden
        | Move::Barrier
        | Move::Agility
        | Move::Growth
        | Move::Amnesia => stat_change,

        Move::DoubleEdge | Move::TakeDown => recoil_hit,
        Move::Absorb | Move::MegaDrain | Move::GigaDrain | Move::LeechLife => drain_hit,

        Move::SolarBeam | Move::RazorWind => two_turn_charge,
        Move::Fly | Move::Dig | Move::Dive => semi_invulnerable_charge,

        Move::Protect | Move::Detect => protect,
        Move::Substitute => substitute,
        Move::BatonPass => baton_pass,

        Move::FuryAttack | Move::DoubleSlap | Move::PinMissile | Move::FurySwipes => multi_hit,

        Move::StealthRock => stealth_rock,
        Move::Sandstorm | Move::RainDance | Move::SunnyDay | Move::Hail => set_field_weather,
    }
}

/// Build a fresh context for `user` and run the effect bound to `move_used`.
pub fn execute_move(
    state: &mut BattleState,
    user: PlayerTarget,
    move_used: Move,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> MoveOutcome {
    let mut ctx = MoveContext::new(state, user, move_used, rng, bus);
    let effect = effect_for(move_used);
    effect(&mut ctx);
    let outcome = ctx.outcome();
    tracing::debug!(%user, ?outcome, "move resolved");
    outcome
}

/// Moves that count as a successful protection for the engine's
/// `protect_count` bookkeeping.
pub fn is_protection_move(move_used: Move) -> bool {
    matches!(move_used, Move::Protect | Move::Detect)
}
