//! Resolving attacks, spells, skills, items and enemy moves.
//!
//! Every resolver writes its narration to a [`MessageSink`] and updates the
//! per-battle counters of both sides. None of them fail: a pointless or
//! impossible action is reported in the log and returns an empty outcome.

use super::damage::{roll_magic, roll_physical};
use super::types::{Hit, ItemOutcome, SkillOutcome};
use crate::collaborators::{Inventory, MessageSink};
use crate::combatant::Combatant;
use crate::core::constants::BASIC_SPELL_NAME;
use crate::core::dice::Dice;
use crate::enemies::{choose_move, render_move_text, Enemy, MoveDamage};
use crate::items::{item_def, ItemKind};
use crate::skills::{DamageKind, Infliction, Skill, TargetMode};
use crate::status::{add_or_refresh, StatusKind};

/// Index of the first enemy still standing.
pub fn first_living(enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(Enemy::is_alive)
}

/// `preferred` if it names a living enemy, otherwise the first living one.
fn living_target(enemies: &[Enemy], preferred: usize) -> Option<usize> {
    match enemies.get(preferred) {
        Some(enemy) if enemy.is_alive() => Some(preferred),
        _ => first_living(enemies),
    }
}

/// Deals `damage` to `target` and books it on both sides' counters.
/// Returns true when the hit was the killing blow.
pub fn apply_hit(source: &mut Combatant, target: &mut Combatant, damage: u32) -> bool {
    let was_alive = target.is_alive();
    target.apply_damage(damage);

    source.counters.damage_dealt = source.counters.damage_dealt.saturating_add(damage);
    target.counters.damage_taken = target.counters.damage_taken.saturating_add(damage);

    let killed = was_alive && !target.is_alive();
    if killed {
        source.counters.kills += 1;
    }
    killed
}

/// Rolls a skill's status against one target. A landed status counts toward
/// the source's `statuses_inflicted`.
pub fn maybe_inflict<S>(
    inflict: Option<Infliction>,
    source: &mut Combatant,
    target: &mut Combatant,
    dice: &mut impl Dice,
    log: &mut S,
) -> bool
where
    S: MessageSink + ?Sized,
{
    let Some(inflict) = inflict else {
        return false;
    };
    if !target.is_alive() || inflict.duration == 0 || inflict.chance <= 0.0 {
        return false;
    }
    if dice.roll_unit() > inflict.chance {
        return false;
    }

    add_or_refresh(target, inflict.status, inflict.duration, inflict.power);
    log.emit(format!(
        "{} is afflicted with {}!",
        target.name,
        inflict.status.name().to_lowercase()
    ));
    source.counters.statuses_inflicted += 1;
    true
}

/// Basic physical attack. A dead or missing target falls through to the
/// first living enemy.
pub fn resolve_attack<S>(
    actor: &mut Combatant,
    enemies: &mut [Enemy],
    target: usize,
    dice: &mut impl Dice,
    log: &mut S,
) -> Option<Hit>
where
    S: MessageSink + ?Sized,
{
    let Some(index) = living_target(enemies, target) else {
        tracing::warn!(actor = %actor.name, "attack with no living enemy");
        return None;
    };
    let enemy = &mut enemies[index].unit;

    let damage = roll_physical(actor, enemy, dice);
    let killed = apply_hit(actor, enemy, damage);
    log.emit(format!(
        "{} attacks {} for {} damage!",
        actor.name, enemy.name, damage
    ));

    Some(Hit {
        target: index,
        damage,
        killed,
    })
}

/// The basic Magic command: casts Fire for `mp_cost` MP.
pub fn resolve_magic<S>(
    actor: &mut Combatant,
    enemies: &mut [Enemy],
    target: usize,
    mp_cost: u32,
    dice: &mut impl Dice,
    log: &mut S,
) -> Option<Hit>
where
    S: MessageSink + ?Sized,
{
    let Some(index) = living_target(enemies, target) else {
        tracing::warn!(actor = %actor.name, "spell with no living enemy");
        return None;
    };
    if !actor.spend_mp(mp_cost) {
        log.emit(format!(
            "{} tried to cast a spell, but is out of MP!",
            actor.name
        ));
        return None;
    }
    let enemy = &mut enemies[index].unit;

    let damage = roll_magic(actor, enemy, dice);
    let killed = apply_hit(actor, enemy, damage);
    log.emit(format!(
        "{} casts {} on {} for {} damage!",
        actor.name, BASIC_SPELL_NAME, enemy.name, damage
    ));

    Some(Hit {
        target: index,
        damage,
        killed,
    })
}

fn skill_damage(
    skill: &Skill,
    actor: &Combatant,
    target: &Combatant,
    dice: &mut impl Dice,
) -> u32 {
    let mut base = match skill.damage {
        DamageKind::Physical => roll_physical(actor, target, dice),
        DamageKind::Magic => roll_magic(actor, target, dice),
    };
    if let Some(execute) = skill.execute {
        if skill.executes(target) {
            base = (base as f64 * execute.mult) as u32;
        }
    }
    (base as f64 * skill.mult) as u32
}

/// Uses a skill. Level and MP are checked here, at the moment of use.
///
/// Area skills strike every living enemy once. Single-target skills strike
/// `hits` times, moving on to the next living enemy when the target falls.
/// Each hit rolls the skill's status separately, and lifesteal heals a
/// fraction of the total damage afterwards.
pub fn resolve_skill<S>(
    actor: &mut Combatant,
    skill: &Skill,
    enemies: &mut [Enemy],
    target: usize,
    dice: &mut impl Dice,
    log: &mut S,
) -> SkillOutcome
where
    S: MessageSink + ?Sized,
{
    if !skill.is_unlocked(actor) {
        log.emit(format!("{} hasn't learned {} yet!", actor.name, skill.name));
        return SkillOutcome::Locked;
    }
    if !actor.spend_mp(skill.mp_cost) {
        log.emit(format!("Not enough MP to use {}!", skill.name));
        return SkillOutcome::NotEnoughMp;
    }

    if skill.is_status_only() {
        resolve_status_skill(actor, skill, enemies, target, dice, log);
        return SkillOutcome::Used {
            hits: Vec::new(),
            healed: 0,
        };
    }

    let mut hits = Vec::new();
    match skill.target {
        TargetMode::All => {
            for (index, enemy) in enemies.iter_mut().enumerate() {
                if !enemy.is_alive() {
                    continue;
                }
                let unit = &mut enemy.unit;
                let damage = skill_damage(skill, actor, unit, dice);
                let killed = apply_hit(actor, unit, damage);
                log.emit(format!(
                    "{} uses {} on {} for {} damage!",
                    actor.name, skill.name, unit.name, damage
                ));
                hits.push(Hit {
                    target: index,
                    damage,
                    killed,
                });
                maybe_inflict(skill.inflict, actor, unit, dice, log);
            }
        }
        TargetMode::Single => {
            let mut current = target;
            for hit_number in 1..=skill.hits {
                let Some(index) = living_target(enemies, current) else {
                    break;
                };
                current = index;
                let unit = &mut enemies[index].unit;

                let damage = skill_damage(skill, actor, unit, dice);
                let killed = apply_hit(actor, unit, damage);
                if skill.hits > 1 {
                    log.emit(format!(
                        "{}'s {} hits {} for {} damage! (hit {})",
                        actor.name, skill.name, unit.name, damage, hit_number
                    ));
                } else {
                    log.emit(format!(
                        "{} uses {} on {} for {} damage!",
                        actor.name, skill.name, unit.name, damage
                    ));
                }
                hits.push(Hit {
                    target: index,
                    damage,
                    killed,
                });
                maybe_inflict(skill.inflict, actor, unit, dice, log);
            }
        }
    }

    let total: u32 = hits.iter().map(|h| h.damage).sum();
    let mut healed = 0;
    if skill.lifesteal > 0.0 && total > 0 {
        let amount = (total as f64 * skill.lifesteal) as u32;
        healed = actor.heal(amount);
        if healed > 0 {
            log.emit(format!("{} absorbs {} HP!", actor.name, healed));
        }
    }

    SkillOutcome::Used { hits, healed }
}

fn resolve_status_skill<S>(
    actor: &mut Combatant,
    skill: &Skill,
    enemies: &mut [Enemy],
    target: usize,
    dice: &mut impl Dice,
    log: &mut S,
) where
    S: MessageSink + ?Sized,
{
    let targets: Vec<usize> = match skill.target {
        TargetMode::All => (0..enemies.len()).filter(|&i| enemies[i].is_alive()).collect(),
        TargetMode::Single if skill.hits > 0 => living_target(enemies, target).into_iter().collect(),
        TargetMode::Single => Vec::new(),
    };

    if targets.is_empty() {
        log.emit(format!(
            "{} uses {}, but nothing happens...",
            actor.name, skill.name
        ));
        return;
    }

    for index in targets {
        let unit = &mut enemies[index].unit;
        log.emit(format!("{} uses {} on {}!", actor.name, skill.name, unit.name));
        maybe_inflict(skill.inflict, actor, unit, dice, log);
    }
}

/// Uses one consumable from the inventory on `target`.
///
/// Nothing is consumed when the item is out of stock, cannot be used in
/// battle, or the target has fallen. Otherwise exactly one unit is spent,
/// even if the target was already full.
pub fn use_item<S>(
    user: &str,
    item_id: &str,
    target: &mut Combatant,
    inventory: &mut impl Inventory,
    log: &mut S,
) -> ItemOutcome
where
    S: MessageSink + ?Sized,
{
    if inventory.has_item(item_id) == 0 {
        log.emit("No more of that item!".to_string());
        return ItemOutcome::Depleted;
    }

    let (name, hp_restore, mp_restore) = match item_def(item_id) {
        Some(def) => match def.kind {
            ItemKind::Consumable {
                hp_restore,
                mp_restore,
            } => (def.name, hp_restore, mp_restore),
            ItemKind::Weapon { .. } => {
                log.emit(format!("{} can't be used in battle!", def.name));
                return ItemOutcome::NotUsable;
            }
        },
        None => {
            log.emit("Nothing happens...".to_string());
            return ItemOutcome::NotUsable;
        }
    };

    if !target.is_alive() {
        log.emit(format!("{} cannot use items right now.", target.name));
        return ItemOutcome::TargetDown;
    }

    let mut healed = 0;
    if hp_restore > 0 {
        healed = target.heal(hp_restore);
        if healed == 0 {
            log.emit(format!("{} is already at full HP.", target.name));
        }
        log.emit(format!(
            "{} uses {} on {}, restoring {} HP!",
            user, name, target.name, healed
        ));
    }

    let mut restored = 0;
    if mp_restore > 0 {
        restored = target.restore_mp(mp_restore);
        if hp_restore == 0 {
            log.emit(format!(
                "{} uses {} on {}, restoring {} MP!",
                user, name, target.name, restored
            ));
        } else if restored > 0 {
            log.emit(format!("{} restored {} MP!", target.name, restored));
        }
    }

    if !inventory.consume_item(item_id, 1) {
        tracing::warn!(item = item_id, "inventory refused to consume an owned item");
    }

    ItemOutcome::Used {
        hp: healed,
        mp: restored,
    }
}

/// One enemy turn: pick a random living party member, draw a move from the
/// enemy's behaviour table and resolve it. Stunned enemies lose the turn.
pub fn resolve_enemy_action<S>(
    enemy: &mut Enemy,
    party: &mut [Combatant],
    dice: &mut impl Dice,
    log: &mut S,
) -> Option<Hit>
where
    S: MessageSink + ?Sized,
{
    if !enemy.is_alive() {
        return None;
    }
    if enemy.unit.has_status(StatusKind::Stun) {
        log.emit(format!("{} is stunned and cannot act!", enemy.name()));
        return None;
    }

    let living: Vec<usize> = (0..party.len()).filter(|&i| party[i].is_alive()).collect();
    if living.is_empty() {
        return None;
    }
    let index = living[dice.pick_index(living.len())];
    let target = &mut party[index];

    let chosen = choose_move(enemy.kind, dice.roll_unit());
    let damage = match chosen.damage {
        MoveDamage::Physical { bonus } => roll_physical(&enemy.unit, target, dice) + bonus,
        MoveDamage::Magic => roll_magic(&enemy.unit, target, dice),
        MoveDamage::None => 0,
    };

    let killed = if damage > 0 {
        apply_hit(&mut enemy.unit, target, damage)
    } else {
        false
    };
    log.emit(render_move_text(
        chosen.text,
        &enemy.unit.name,
        &target.name,
        damage,
    ));

    if let Some(status) = chosen.status {
        let lands = status.chance >= 1.0 || dice.roll_unit() < status.chance;
        if lands && target.is_alive() {
            add_or_refresh(target, status.kind, status.duration, status.power);
            if let Some(text) = status.text {
                log.emit(render_move_text(text, &enemy.unit.name, &target.name, damage));
            }
        }
    }

    if chosen.drain > 0.0 && damage > 0 {
        let healed = enemy.unit.heal((damage as f64 * chosen.drain) as u32);
        if healed > 0 {
            log.emit(format!("{} drains {} HP!", enemy.unit.name, healed));
        }
    }

    (damage > 0).then_some(Hit {
        target: index,
        damage,
        killed,
    })
}
