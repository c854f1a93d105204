// In: src/battle/move_effects/status_effects.rs

use crate::battle::commands::{accuracy_check, apply_paralysis, MoveContext};

/// Pure paralysis. The status command's own guards decide immunity.
pub(super) fn paralyze(ctx: &mut MoveContext) {
    accuracy_check(ctx);
    let chance = ctx.data.effect_chance;
    apply_paralysis(ctx, chance);
}
