// In: src/battle/move_effects/special_effects.rs

use super::damage_effects::plain_hit;
use crate::battle::commands::{set_weather, MoveContext};
use crate::battle::state::BattleEvent;
use schema::EffectParam;

/// Solar Beam style: charge on the first use, strike on the second. The
/// charge is spent even if the strike misses.
pub(super) fn two_turn_charge(ctx: &mut MoveContext) {
    if !ctx.attacker.volatile.is_charging() {
        ctx.attacker.volatile.charging = Some(ctx.move_used);
        ctx.bus.push(BattleEvent::ChargingStarted {
            player: ctx.user,
            move_used: ctx.move_used,
        });
        return;
    }

    ctx.attacker.volatile.charging = None;
    plain_hit(ctx);
}

/// Fly style: the charging turn also hides the user until the strike.
pub(super) fn semi_invulnerable_charge(ctx: &mut MoveContext) {
    let EffectParam::Vanish(kind) = ctx.data.param else {
        tracing::warn!(move_used = ?ctx.move_used, "vanish effect without a hiding place");
        return ctx.fail();
    };

    if !ctx.attacker.volatile.is_charging() {
        ctx.attacker.volatile.charging = Some(ctx.move_used);
        ctx.attacker.volatile.semi_invulnerable = Some(kind);
        ctx.bus.push(BattleEvent::WentSemiInvulnerable {
            player: ctx.user,
            kind,
        });
        return;
    }

    ctx.attacker.volatile.charging = None;
    ctx.attacker.volatile.semi_invulnerable = None;
    plain_hit(ctx);
}

/// Success rate halves with each consecutive success: 100, 50, 25, 12, 6...
/// Resetting `protect_count` after other actions is the engine's job.
pub(super) fn protect(ctx: &mut MoveContext) {
    let streak = u32::from(ctx.attacker.volatile.protect_count);
    let success_rate = 100u32.checked_shr(streak).unwrap_or(0);

    if ctx.rng.random(100, "Protect Check") < success_rate {
        let volatile = &mut ctx.attacker.volatile;
        volatile.is_protected = true;
        volatile.protect_count = volatile.protect_count.saturating_add(1);
        ctx.move_failed = false;
        ctx.bus.push(BattleEvent::Protected { player: ctx.user });
    } else {
        ctx.attacker.volatile.protect_count = 0;
        ctx.attacker.volatile.is_protected = false;
        ctx.fail();
    }
}

/// Pay a quarter of max HP (at least 1) for a substitute. The user must
/// keep at least 1 HP after paying.
pub(super) fn substitute(ctx: &mut MoveContext) {
    let cost = (ctx.attacker.max_hp() / 4).max(1);
    if ctx.attacker.volatile.has_substitute() || ctx.attacker.current_hp() <= cost {
        return ctx.fail();
    }

    ctx.attacker.take_damage(cost);
    ctx.attacker.volatile.substitute_hp = Some(cost);
    ctx.bus.push(BattleEvent::SubstituteCreated {
        player: ctx.user,
        hp: cost,
    });
}

/// Lay Stealth Rock on the target's side; fails if already there.
pub(super) fn stealth_rock(ctx: &mut MoveContext) {
    if ctx.defender_side.stealth_rock {
        return ctx.fail();
    }
    ctx.defender_side.stealth_rock = true;
    ctx.bus.push(BattleEvent::HazardSet {
        side: ctx.target_player(),
    });
}

// TODO: fail when the requested weather is already active.
pub(super) fn set_field_weather(ctx: &mut MoveContext) {
    let EffectParam::Weather { weather, turns } = ctx.data.param else {
        tracing::warn!(move_used = ?ctx.move_used, "weather effect without a weather");
        return ctx.fail();
    };
    set_weather(ctx, weather, turns);
}
