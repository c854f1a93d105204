// In: src/battle/move_effects/damage_effects.rs

use crate::battle::commands::{
    accuracy_check, apply_burn, apply_damage, apply_drain, apply_paralysis, apply_recoil,
    calculate_damage, check_faint, lookup_type_effectiveness, MoveContext,
};
use crate::battle::state::BattleEvent;
use schema::{EffectParam, Target};

/// Accuracy, damage, faint check.
pub(super) fn plain_hit(ctx: &mut MoveContext) {
    accuracy_check(ctx);
    lookup_type_effectiveness(ctx);
    calculate_damage(ctx);
    apply_damage(ctx);
    check_faint(ctx, Target::Target);
}

/// A plain hit with a chance to burn. A KO'd target fails the burn's own
/// fainted guard.
pub(super) fn burn_chance_hit(ctx: &mut MoveContext) {
    accuracy_check(ctx);
    lookup_type_effectiveness(ctx);
    calculate_damage(ctx);
    apply_damage(ctx);
    let chance = ctx.data.effect_chance;
    apply_burn(ctx, chance);
    check_faint(ctx, Target::Target);
}

pub(super) fn paralysis_chance_hit(ctx: &mut MoveContext) {
    accuracy_check(ctx);
    lookup_type_effectiveness(ctx);
    calculate_damage(ctx);
    apply_damage(ctx);
    let chance = ctx.data.effect_chance;
    apply_paralysis(ctx, chance);
    check_faint(ctx, Target::Target);
}

/// Recoil can KO the attacker even when the defender survives, so both
/// sides get a faint check.
pub(super) fn recoil_hit(ctx: &mut MoveContext) {
    let EffectParam::Recoil(fraction) = ctx.data.param else {
        tracing::warn!(move_used = ?ctx.move_used, "recoil effect without a recoil fraction");
        return ctx.fail();
    };
    accuracy_check(ctx);
    lookup_type_effectiveness(ctx);
    calculate_damage(ctx);
    apply_damage(ctx);
    apply_recoil(ctx, fraction);
    check_faint(ctx, Target::Target);
    check_faint(ctx, Target::User);
}

pub(super) fn drain_hit(ctx: &mut MoveContext) {
    let EffectParam::Drain(fraction) = ctx.data.param else {
        tracing::warn!(move_used = ?ctx.move_used, "drain effect without a drain fraction");
        return ctx.fail();
    };
    accuracy_check(ctx);
    lookup_type_effectiveness(ctx);
    calculate_damage(ctx);
    apply_damage(ctx);
    apply_drain(ctx, fraction);
    check_faint(ctx, Target::Target);
    check_faint(ctx, Target::User);
}

/// One accuracy check, then 2-5 hits weighted {37.5, 37.5, 12.5, 12.5}%.
/// Stops early once either side faints.
pub(super) fn multi_hit(ctx: &mut MoveContext) {
    accuracy_check(ctx);
    lookup_type_effectiveness(ctx);
    if ctx.move_failed {
        ctx.hit_count = 0;
        return;
    }

    let first = ctx.rng.random(4, "Multi-Hit Count");
    let hits = if first > 1 {
        ctx.rng.random(4, "Multi-Hit Count (extended)") + 2
    } else {
        first + 2
    };

    let mut total: u16 = 0;
    for _ in 0..hits {
        calculate_damage(ctx);
        apply_damage(ctx);
        total = total.saturating_add(ctx.damage_dealt);
        ctx.hit_count += 1;

        if ctx.defender.is_fainted() || ctx.attacker.is_fainted() {
            check_faint(ctx, Target::Target);
            check_faint(ctx, Target::User);
            break;
        }
    }

    ctx.damage_dealt = total;
    ctx.bus.push(BattleEvent::MultiHit {
        hits: ctx.hit_count,
    });
    check_faint(ctx, Target::Target);
}
