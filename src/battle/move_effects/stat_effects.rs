// In: src/battle/move_effects/stat_effects.rs

use crate::battle::commands::{accuracy_check, modify_stat_stage, MoveContext};
use crate::battle::state::BattleEvent;
use schema::{EffectParam, Target};

/// Raise or lower one stat. Self-targeting moves skip the accuracy check.
pub(super) fn stat_change(ctx: &mut MoveContext) {
    let EffectParam::StatChange {
        target,
        stat,
        stages,
    } = ctx.data.param
    else {
        tracing::warn!(move_used = ?ctx.move_used, "stat effect without a stat change");
        return ctx.fail();
    };

    if target == Target::Target {
        accuracy_check(ctx);
    }
    modify_stat_stage(ctx, target, stat, stages);
}

/// Copy every stage from the user onto the target, replacing what was there.
/// Cannot miss or fail.
pub(super) fn baton_pass(ctx: &mut MoveContext) {
    ctx.defender.stat_stages = ctx.attacker.stat_stages;
    ctx.bus.push(BattleEvent::StatsPassed {
        from: ctx.user,
        to: ctx.target_player(),
    });
}
