//! Single-purpose commands that move effects are built from.
//!
//! Every command reads and writes a [`MoveContext`]. Failure is data: once
//! `move_failed` is set, every command other than [`accuracy_check`] returns
//! without touching state, so an effect is just an ordered list of calls.

use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus, Field, Side};
use crate::battle::stats::{effective_attack, effective_defense, hit_threshold};
use crate::config::BattleConfig;
use crate::player::PlayerTarget;
use crate::pokemon::{Combatant, StatusCondition};
use schema::{Fraction, Move, MoveData, PokemonType, StatType, Target, Weather, IMMUNE, NEUTRAL};
use tracing::{debug, trace};

/// Everything one action can touch, plus its scratch results.
pub struct MoveContext<'a> {
    pub attacker: &'a mut Combatant,
    pub defender: &'a mut Combatant,
    pub attacker_side: &'a mut Side,
    pub defender_side: &'a mut Side,
    pub field: &'a mut Field,
    pub rng: &'a mut TurnRng,
    pub bus: &'a mut EventBus,
    pub config: &'a BattleConfig,
    pub user: PlayerTarget,
    pub move_used: Move,
    pub data: MoveData,

    pub move_failed: bool,
    pub damage_dealt: u16,
    pub recoil_dealt: u16,
    pub drain_received: u16,
    pub hit_count: u8,
    /// Always false until critical hits are modeled.
    pub critical_hit: bool,
    /// Combined type multiplier in quarter units (4 = neutral).
    pub effectiveness: u8,
    pub power_override: Option<u8>,
    pub type_override: Option<PokemonType>,

    faint_reported: [bool; 2],
}

/// What an action left behind once its context is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub move_used: Move,
    pub move_failed: bool,
    pub damage_dealt: u16,
    pub recoil_dealt: u16,
    pub drain_received: u16,
    pub hit_count: u8,
    pub effectiveness: u8,
}

impl<'a> MoveContext<'a> {
    pub fn new(
        state: &'a mut BattleState,
        user: PlayerTarget,
        move_used: Move,
        rng: &'a mut TurnRng,
        bus: &'a mut EventBus,
    ) -> Self {
        let BattleState {
            combatants,
            sides,
            field,
            config,
            ..
        } = state;
        let (attacker, defender) = split_pair(combatants, user);
        let (attacker_side, defender_side) = split_pair(sides, user);
        let faint_reported = [attacker.is_fainted(), defender.is_fainted()];

        Self {
            attacker,
            defender,
            attacker_side,
            defender_side,
            field,
            rng,
            bus,
            config,
            user,
            move_used,
            data: move_used.data(),
            move_failed: false,
            damage_dealt: 0,
            recoil_dealt: 0,
            drain_received: 0,
            hit_count: 0,
            critical_hit: false,
            effectiveness: NEUTRAL,
            power_override: None,
            type_override: None,
            faint_reported,
        }
    }

    pub fn target_player(&self) -> PlayerTarget {
        self.user.opponent()
    }

    pub fn move_type(&self) -> PokemonType {
        self.type_override.unwrap_or(self.data.move_type)
    }

    pub fn combatant(&self, target: Target) -> &Combatant {
        match target {
            Target::User => &*self.attacker,
            Target::Target => &*self.defender,
        }
    }

    pub fn combatant_mut(&mut self, target: Target) -> &mut Combatant {
        match target {
            Target::User => &mut *self.attacker,
            Target::Target => &mut *self.defender,
        }
    }

    fn player(&self, target: Target) -> PlayerTarget {
        match target {
            Target::User => self.user,
            Target::Target => self.user.opponent(),
        }
    }

    /// Mark the move as failed and report it.
    pub fn fail(&mut self) {
        self.move_failed = true;
        self.bus.push(BattleEvent::MoveFailed {
            player: self.user,
            move_used: self.move_used,
        });
    }

    pub fn outcome(&self) -> MoveOutcome {
        MoveOutcome {
            move_used: self.move_used,
            move_failed: self.move_failed,
            damage_dealt: self.damage_dealt,
            recoil_dealt: self.recoil_dealt,
            drain_received: self.drain_received,
            hit_count: self.hit_count,
            effectiveness: self.effectiveness,
        }
    }
}

/// Borrow both entries of a per-player pair, `first`'s entry first.
fn split_pair<T>(pair: &mut [T; 2], first: PlayerTarget) -> (&mut T, &mut T) {
    let [player1, player2] = pair;
    match first {
        PlayerTarget::Player1 => (player1, player2),
        PlayerTarget::Player2 => (player2, player1),
    }
}

/// Gate for opponent-targeting moves: protection, semi-invulnerability,
/// then (when enabled) the accuracy roll.
pub fn accuracy_check(ctx: &mut MoveContext) {
    if ctx.move_failed {
        return;
    }

    if ctx.defender.volatile.is_protected {
        debug!(move_used = ?ctx.move_used, "blocked by protection");
        ctx.move_failed = true;
        ctx.bus.push(BattleEvent::MoveBlocked {
            target: ctx.target_player(),
        });
        return;
    }

    let hits = if ctx.defender.volatile.is_semi_invulnerable() {
        false
    } else if !ctx.config.accuracy_checks || ctx.data.cannot_miss() {
        true
    } else {
        let threshold = hit_threshold(ctx.data.accuracy, ctx.attacker, ctx.defender);
        ctx.rng.random(100, "Accuracy Check") < threshold
    };

    if !hits {
        debug!(move_used = ?ctx.move_used, "missed");
        ctx.move_failed = true;
        ctx.bus.push(BattleEvent::MoveMissed {
            player: ctx.user,
            move_used: ctx.move_used,
        });
    }
}

/// Record the combined type multiplier. With type effectiveness enabled an
/// immune target fails the move.
pub fn lookup_type_effectiveness(ctx: &mut MoveContext) {
    if ctx.move_failed {
        return;
    }
    let (type1, type2) = ctx.defender.types();
    ctx.effectiveness = PokemonType::combined_effectiveness(ctx.move_type(), type1, type2);
    trace!(effectiveness = ctx.effectiveness, "type effectiveness");

    if !ctx.config.type_effectiveness {
        return;
    }
    ctx.bus.push(BattleEvent::AttackTypeEffectiveness {
        multiplier: ctx.effectiveness,
    });
    if ctx.effectiveness == IMMUNE {
        ctx.move_failed = true;
    }
}

/// `floor(floor(22 * power * atk / def) / 50) + 2`, at least 1. Writes
/// `damage_dealt` and leaves HP alone.
pub fn calculate_damage(ctx: &mut MoveContext) {
    if ctx.move_failed {
        return;
    }
    let power = u32::from(ctx.power_override.unwrap_or(ctx.data.power));
    let attack = u32::from(effective_attack(ctx.attacker, ctx.data.category));
    let defense = u32::from(effective_defense(ctx.defender, ctx.data.category)).max(1);

    let mut damage = (22 * power * attack / defense) / 50 + 2;
    if ctx.config.type_effectiveness {
        damage = damage * u32::from(ctx.effectiveness) / u32::from(NEUTRAL);
    }
    let damage = damage.clamp(1, u32::from(u16::MAX));

    debug!(power, attack, defense, damage, "damage calculated");
    ctx.damage_dealt = damage as u16;
}

/// Subtract `damage_dealt` from the defender, clamping at 0.
pub fn apply_damage(ctx: &mut MoveContext) {
    if ctx.move_failed || ctx.damage_dealt == 0 {
        return;
    }
    ctx.defender.take_damage(ctx.damage_dealt);
    ctx.bus.push(BattleEvent::DamageDealt {
        target: ctx.target_player(),
        damage: ctx.damage_dealt,
        remaining_hp: ctx.defender.current_hp(),
    });
}

/// Settle the fainted flag for one side of the action and report a new faint.
pub fn check_faint(ctx: &mut MoveContext, target: Target) {
    if ctx.move_failed {
        return;
    }
    let player = ctx.player(target);
    let slot = match target {
        Target::User => 0,
        Target::Target => 1,
    };
    let combatant = ctx.combatant_mut(target);
    combatant.sync_faint();
    if combatant.is_fainted() && !ctx.faint_reported[slot] {
        ctx.faint_reported[slot] = true;
        debug!(%player, "fainted");
        ctx.bus.push(BattleEvent::PokemonFainted { player });
    }
}

/// Shift one battle stat by `delta`, clamped to [-6, 6]. A change aimed at a
/// protected opponent is blocked and fails the move.
pub fn modify_stat_stage(ctx: &mut MoveContext, target: Target, stat: StatType, delta: i8) {
    if ctx.move_failed {
        return;
    }
    if !stat.is_modifiable() {
        trace!(?stat, "stat cannot be modified by moves");
        return;
    }
    if target == Target::Target && ctx.defender.volatile.is_protected {
        ctx.move_failed = true;
        ctx.bus.push(BattleEvent::MoveBlocked {
            target: ctx.target_player(),
        });
        return;
    }

    let player = ctx.player(target);
    let (old_stage, new_stage) = ctx.combatant_mut(target).stat_stages.change(stat, delta);
    if old_stage == new_stage {
        ctx.bus.push(BattleEvent::StatChangeBlocked {
            target: player,
            stat,
        });
    } else {
        ctx.bus.push(BattleEvent::StatStageChanged {
            target: player,
            stat,
            old_stage,
            new_stage,
        });
    }
}

/// Burn the defender with `chance` percent. Fire types are immune.
pub fn apply_burn(ctx: &mut MoveContext, chance: u8) {
    if ctx.defender.has_type(PokemonType::Fire) {
        return;
    }
    apply_status(ctx, StatusCondition::Burn, chance, "Burn Chance");
}

/// Paralyze the defender with `chance` percent. Electric moves cannot
/// paralyze Electric types.
pub fn apply_paralysis(ctx: &mut MoveContext, chance: u8) {
    if ctx.move_type() == PokemonType::Electric && ctx.defender.has_type(PokemonType::Electric) {
        return;
    }
    apply_status(ctx, StatusCondition::Paralysis, chance, "Paralysis Chance");
}

fn apply_status(ctx: &mut MoveContext, status: StatusCondition, chance: u8, reason: &str) {
    if ctx.move_failed || ctx.defender.is_fainted() || ctx.defender.status.is_some() {
        return;
    }
    if !ctx.rng.chance(chance, reason) {
        return;
    }
    ctx.defender.status = Some(status);
    ctx.bus.push(BattleEvent::StatusApplied {
        target: ctx.target_player(),
        status,
    });
}

/// The attacker loses `fraction` of the damage it dealt, at least 1.
pub fn apply_recoil(ctx: &mut MoveContext, fraction: Fraction) {
    if ctx.move_failed || ctx.damage_dealt == 0 {
        return;
    }
    let recoil = fraction.of(ctx.damage_dealt).max(1);
    ctx.attacker.take_damage(recoil);
    ctx.recoil_dealt = recoil;
    ctx.bus.push(BattleEvent::RecoilTaken {
        target: ctx.user,
        damage: recoil,
        remaining_hp: ctx.attacker.current_hp(),
    });
}

/// The attacker recovers `fraction` of the damage it dealt, at least 1,
/// never above max HP.
pub fn apply_drain(ctx: &mut MoveContext, fraction: Fraction) {
    if ctx.move_failed || ctx.damage_dealt == 0 {
        return;
    }
    let drain = fraction.of(ctx.damage_dealt).max(1);
    let healed = ctx.attacker.heal(drain);
    ctx.drain_received = healed;
    if healed > 0 {
        ctx.bus.push(BattleEvent::PokemonHealed {
            target: ctx.user,
            amount: healed,
            new_hp: ctx.attacker.current_hp(),
        });
    }
}

/// Overwrite the field weather. The last setter wins.
pub fn set_weather(ctx: &mut MoveContext, weather: Weather, turns: u8) {
    if ctx.move_failed {
        return;
    }
    ctx.field.weather = weather;
    ctx.field.turns_remaining = turns;
    ctx.bus.push(BattleEvent::WeatherStarted { weather, turns });
}

/// Stealth Rock damage on entry: `max_hp * rock_effectiveness / 32`, at
/// least 1 unless immune. Returns the damage dealt.
pub fn apply_stealth_rock(
    combatant: &mut Combatant,
    side: &Side,
    player: PlayerTarget,
    bus: &mut EventBus,
) -> u16 {
    if !side.stealth_rock || combatant.is_fainted() {
        return 0;
    }
    let (type1, type2) = combatant.types();
    let effectiveness = PokemonType::combined_effectiveness(PokemonType::Rock, type1, type2);
    if effectiveness == IMMUNE {
        return 0;
    }

    let raw = u32::from(combatant.max_hp()) * u32::from(effectiveness) / 32;
    // Small combatants can resist the hazard down to nothing.
    let raw = if combatant.max_hp() >= 32 { raw.max(1) } else { raw };
    let damage = u16::try_from(raw).unwrap_or(u16::MAX);
    if damage == 0 {
        return 0;
    }
    let fainted = combatant.take_damage(damage);
    bus.push(BattleEvent::HazardDamage {
        target: player,
        damage,
        remaining_hp: combatant.current_hp(),
    });
    if fainted {
        bus.push(BattleEvent::PokemonFainted { player });
    }
    damage
}
