//! The turn controller.
//!
//! A [`BattleSession`] owns the party and the enemy group for one encounter
//! and walks the menu states the way the battle screen does. Every living
//! member acts once per round, in party order, before the enemy phase; a
//! member who is stunned still counts as having acted. Enemy statuses tick
//! after each party action and party statuses tick at the end of the enemy
//! phase.

use super::rewards::distribute_xp;
use super::types::{BattleAction, BattleState, RewardSnapshot, Winner};
use crate::collaborators::{
    Inventory, MemberRecord, MessageLog, MessageSink, PartyStore, ReferenceLevel,
};
use crate::combat::{
    first_living, resolve_attack, resolve_enemy_action, resolve_magic, resolve_skill, use_item,
};
use crate::combatant::{Combatant, Command};
use crate::core::config::BattleConfig;
use crate::core::dice::Dice;
use crate::core::error::EngineError;
use crate::enemies::{count_items, grant_rewards_for_group, pick_enemy_group, Enemy};
use crate::items::item_name;
use crate::skills::{find_skill, Skill, TargetMode};
use crate::status::{tick_statuses, StatusKind};
use std::collections::BTreeSet;

/// Command picked in the menus but not yet aimed.
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Attack,
    Magic,
    Skill(&'static Skill),
    Item(String),
}

#[derive(Debug, Clone)]
pub struct BattleSession {
    pub party: Vec<Combatant>,
    pub enemies: Vec<Enemy>,
    config: BattleConfig,
    state: BattleState,
    log: MessageLog,
    /// Party slots that already acted this round
    acted: BTreeSet<usize>,
    current: usize,
    round: u32,
    pending: Option<Pending>,
    target_index: usize,
    ally_index: usize,
    rewards: Option<RewardSnapshot>,
}

impl BattleSession {
    pub fn new(party: Vec<Combatant>, config: BattleConfig) -> Result<Self, EngineError> {
        if party.is_empty() {
            return Err(EngineError::EmptyParty);
        }
        config.validate()?;

        Ok(Self {
            party,
            enemies: Vec::new(),
            log: MessageLog::new(config.log_capacity),
            config,
            state: BattleState::PlayerChoice,
            acted: BTreeSet::new(),
            current: 0,
            round: 0,
            pending: None,
            target_index: 0,
            ally_index: 0,
            rewards: None,
        })
    }

    // =========================================================================
    // Encounter lifecycle
    // =========================================================================

    /// Spawns a random group scaled to `reference` and starts fighting it.
    pub fn start_encounter(&mut self, reference: &impl ReferenceLevel, dice: &mut impl Dice) {
        let level = reference.reference_level();
        let group = pick_enemy_group(level, self.config.max_group_size, dice);
        self.start_with_enemies(group);
    }

    /// Starts a battle against a given group. The party is restored to full
    /// HP/MP with statuses and counters cleared.
    pub fn start_with_enemies(&mut self, enemies: Vec<Enemy>) {
        for member in &mut self.party {
            member.reset_for_battle();
        }
        self.enemies = enemies;
        self.log.clear();
        self.acted.clear();
        self.pending = None;
        self.target_index = 0;
        self.ally_index = 0;
        self.rewards = None;
        self.round = 1;
        self.current = 0;

        if self.enemies.is_empty() {
            tracing::warn!("battle started without enemies");
            self.rewards = Some(RewardSnapshot::default());
            self.set_state(BattleState::End(Winner::Hero));
            return;
        }

        if self.enemies.len() == 1 {
            self.log
                .emit(format!("A wild {} appears!", self.enemies[0].name()));
        } else {
            let names: Vec<&str> = self.enemies.iter().map(Enemy::name).collect();
            self.log
                .emit(format!("Enemies appear: {}!", names.join(", ")));
        }

        tracing::info!(
            enemies = self.enemies.len(),
            party = self.party.len(),
            "battle started"
        );
        self.set_state(BattleState::PlayerChoice);
    }

    /// Pulls authoritative attack, level and XP values from the party store.
    pub fn sync_from(&mut self, store: &impl PartyStore) {
        for (index, member) in self.party.iter_mut().enumerate() {
            let Some(record) = store.member(index) else {
                continue;
            };
            member.attack = record.attack;
            member.level = record.level;
            member.xp = record.xp;
            member.xp_to_next = record.xp_to_next;
        }
    }

    /// Pushes HP/MP, level and XP back to the party store.
    pub fn publish_to(&self, store: &mut impl PartyStore) {
        for (index, member) in self.party.iter().enumerate() {
            store.publish(index, MemberRecord::from_combatant(member));
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.state {
            BattleState::End(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Party slot of the member whose turn it is.
    pub fn current_actor(&self) -> usize {
        self.current
    }

    pub fn actor(&self) -> &Combatant {
        &self.party[self.current]
    }

    pub fn has_acted(&self, index: usize) -> bool {
        self.acted.contains(&index)
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn rewards(&self) -> Option<&RewardSnapshot> {
        self.rewards.as_ref()
    }

    /// Enemy highlighted in target selection.
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Ally highlighted in item targeting.
    pub fn ally_index(&self) -> usize {
        self.ally_index
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }

    pub fn party_wiped(&self) -> bool {
        self.party.iter().all(|m| !m.is_alive())
    }

    // =========================================================================
    // Menu inputs
    // =========================================================================

    /// Top-level command for the current actor. Defend and Run resolve
    /// immediately; the others open a sub-menu.
    pub fn choose_command(
        &mut self,
        command: Command,
        inventory: &mut impl Inventory,
        dice: &mut impl Dice,
    ) {
        if self.state != BattleState::PlayerChoice {
            tracing::warn!(state = ?self.state, ?command, "command outside the command menu");
            return;
        }

        match command {
            Command::Attack | Command::Magic => {
                let Some(first) = first_living(&self.enemies) else {
                    return;
                };
                self.pending = Some(if command == Command::Attack {
                    Pending::Attack
                } else {
                    Pending::Magic
                });
                self.target_index = first;
                self.set_state(BattleState::TargetSelect);
            }
            Command::Skill => self.set_state(BattleState::SkillMenu),
            Command::Item => self.set_state(BattleState::ItemMenu),
            Command::Defend => self.perform(BattleAction::Defend, inventory, dice),
            Command::Run => self.perform(BattleAction::Run, inventory, dice),
        }
    }

    /// Picks a skill from the skill menu. A locked or unaffordable skill is
    /// refused with a message and the menu stays open. Area skills fire at
    /// once; single-target skills move on to target selection.
    pub fn choose_skill(&mut self, name: &str, inventory: &mut impl Inventory, dice: &mut impl Dice) {
        if self.state != BattleState::SkillMenu {
            tracing::warn!(state = ?self.state, skill = name, "skill chosen outside the skill menu");
            return;
        }
        let actor = &self.party[self.current];
        let Some(skill) = find_skill(name).filter(|s| s.usable_by(actor.job)) else {
            tracing::warn!(skill = name, actor = %actor.name, "skill not available to actor");
            return;
        };

        if !skill.is_unlocked(actor) {
            let line = format!("{} hasn't learned {} yet!", actor.name, skill.name);
            self.log.emit(line);
            return;
        }
        if !skill.can_afford(actor) {
            self.log.emit(format!("Not enough MP to use {}!", skill.name));
            return;
        }

        match skill.target {
            TargetMode::All => {
                let action = BattleAction::Skill {
                    name: skill.name.to_string(),
                    target: 0,
                };
                self.perform(action, inventory, dice);
            }
            TargetMode::Single => {
                if let Some(first) = first_living(&self.enemies) {
                    self.pending = Some(Pending::Skill(skill));
                    self.target_index = first;
                    self.set_state(BattleState::TargetSelect);
                }
            }
        }
    }

    /// Picks an item from the item menu and moves to ally targeting.
    pub fn choose_item(&mut self, item_id: &str) {
        if self.state != BattleState::ItemMenu {
            tracing::warn!(state = ?self.state, item = item_id, "item chosen outside the item menu");
            return;
        }
        self.pending = Some(Pending::Item(item_id.to_string()));
        self.ally_index = self
            .party
            .iter()
            .position(Combatant::is_alive)
            .unwrap_or(self.current);
        self.set_state(BattleState::ItemTarget);
    }

    pub fn next_target(&mut self) {
        self.target_index = cycle_living(self.target_index, self.enemies.len(), true, |i| {
            self.enemies[i].is_alive()
        });
    }

    pub fn prev_target(&mut self) {
        self.target_index = cycle_living(self.target_index, self.enemies.len(), false, |i| {
            self.enemies[i].is_alive()
        });
    }

    pub fn next_ally(&mut self) {
        self.ally_index = cycle_living(self.ally_index, self.party.len(), true, |i| {
            self.party[i].is_alive()
        });
    }

    pub fn prev_ally(&mut self) {
        self.ally_index = cycle_living(self.ally_index, self.party.len(), false, |i| {
            self.party[i].is_alive()
        });
    }

    /// Fires the pending Attack, Magic or skill at the highlighted enemy.
    pub fn confirm_target(&mut self, inventory: &mut impl Inventory, dice: &mut impl Dice) {
        if self.state != BattleState::TargetSelect {
            tracing::warn!(state = ?self.state, "target confirmed outside target selection");
            return;
        }
        let target = self.target_index;
        if !self.enemies.get(target).is_some_and(Enemy::is_alive) {
            self.log.emit("That target is already down.".to_string());
            return;
        }

        let action = match self.pending.take() {
            Some(Pending::Attack) => BattleAction::Attack { target },
            Some(Pending::Magic) => BattleAction::Magic { target },
            Some(Pending::Skill(skill)) => BattleAction::Skill {
                name: skill.name.to_string(),
                target,
            },
            Some(Pending::Item(_)) | None => {
                tracing::warn!("target selection without an enemy-targeted command");
                self.set_state(BattleState::PlayerChoice);
                return;
            }
        };
        self.perform(action, inventory, dice);
    }

    /// Uses the pending item on the highlighted ally.
    pub fn confirm_item_target(&mut self, inventory: &mut impl Inventory, dice: &mut impl Dice) {
        if self.state != BattleState::ItemTarget {
            tracing::warn!(state = ?self.state, "item target confirmed outside item targeting");
            return;
        }
        let Some(Pending::Item(item_id)) = self.pending.take() else {
            tracing::warn!("item targeting without a chosen item");
            self.set_state(BattleState::ItemMenu);
            return;
        };
        let action = BattleAction::Item {
            item_id,
            target: self.ally_index,
        };
        self.perform(action, inventory, dice);
    }

    /// Backs out of the current sub-menu without spending the turn.
    pub fn cancel(&mut self) {
        let back = match self.state {
            BattleState::TargetSelect => {
                if matches!(self.pending, Some(Pending::Skill(_))) {
                    BattleState::SkillMenu
                } else {
                    BattleState::PlayerChoice
                }
            }
            BattleState::SkillMenu | BattleState::ItemMenu => BattleState::PlayerChoice,
            BattleState::ItemTarget => BattleState::ItemMenu,
            _ => return,
        };
        self.pending = None;
        self.set_state(back);
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolves `action` for the current actor, then advances the turn.
    pub fn perform(
        &mut self,
        action: BattleAction,
        inventory: &mut impl Inventory,
        dice: &mut impl Dice,
    ) {
        if !self.state.awaits_player() {
            tracing::warn!(state = ?self.state, ?action, "party action outside the party phase");
            return;
        }
        self.pending = None;
        let index = self.current;
        tracing::debug!(actor = %self.party[index].name, ?action, "party action");

        if self.party[index].has_status(StatusKind::Stun) {
            let actor = &mut self.party[index];
            actor.defending = false;
            let line = format!("{} is stunned and can't move!", actor.name);
            self.log.emit(line);
            self.finish_party_turn(index, inventory, dice);
            return;
        }

        let defends = action == BattleAction::Defend;
        match action {
            BattleAction::Attack { target } => {
                resolve_attack(
                    &mut self.party[index],
                    &mut self.enemies,
                    target,
                    dice,
                    &mut self.log,
                );
            }
            BattleAction::Magic { target } => {
                resolve_magic(
                    &mut self.party[index],
                    &mut self.enemies,
                    target,
                    self.config.magic_mp_cost,
                    dice,
                    &mut self.log,
                );
            }
            BattleAction::Skill { name, target } => {
                match find_skill(&name).filter(|s| s.usable_by(self.party[index].job)) {
                    Some(skill) => {
                        resolve_skill(
                            &mut self.party[index],
                            skill,
                            &mut self.enemies,
                            target,
                            dice,
                            &mut self.log,
                        );
                    }
                    None => self.log.emit("No skill selected.".to_string()),
                }
            }
            BattleAction::Item { item_id, target } => {
                let user = self.party[index].name.clone();
                match self.party.get_mut(target) {
                    Some(ally) => {
                        use_item(&user, &item_id, ally, inventory, &mut self.log);
                    }
                    None => {
                        tracing::warn!(target, "item aimed at a missing party slot");
                        self.log.emit("Nothing happens...".to_string());
                    }
                }
            }
            BattleAction::Defend => {
                let actor = &mut self.party[index];
                actor.set_defending(true);
                let line = format!("{} braces for impact!", actor.name);
                self.log.emit(line);
            }
            BattleAction::Run => {
                let name = self.party[index].name.clone();
                if dice.roll_unit() < self.config.escape_chance {
                    self.log.emit(format!("{name} successfully escaped!"));
                    tracing::info!(round = self.round, "party escaped");
                    self.set_state(BattleState::End(Winner::Escape));
                    return;
                }
                self.log
                    .emit(format!("{name} tried to run, but couldn't escape!"));
            }
        }

        if !defends {
            self.party[index].defending = false;
        }
        self.finish_party_turn(index, inventory, dice);
    }

    /// Tick enemy statuses, then either declare victory or hand the turn to
    /// the next member who has not acted, or to the enemies.
    fn finish_party_turn(
        &mut self,
        index: usize,
        inventory: &mut impl Inventory,
        dice: &mut impl Dice,
    ) {
        tick_statuses(self.enemies.iter_mut().map(|e| &mut e.unit), &mut self.log);

        if self.all_enemies_dead() {
            self.declare_victory(inventory, dice);
            return;
        }

        let first_action = self.acted.insert(index);
        debug_assert!(first_action, "party slot {index} acted twice in one round");
        let n = self.party.len();
        let next = (1..=n)
            .map(|offset| (index + offset) % n)
            .find(|&i| self.party[i].is_alive() && !self.acted.contains(&i));

        match next {
            Some(i) => {
                debug_assert!(self.party[i].is_alive());
                self.current = i;
                self.set_state(BattleState::PlayerChoice);
            }
            None => {
                self.acted.clear();
                self.set_state(BattleState::EnemyTurn);
            }
        }
    }

    /// Every living enemy acts once, then party statuses tick and defend
    /// stances drop. Ends the battle on a wipe, otherwise opens a new round.
    pub fn run_enemy_phase(&mut self, dice: &mut impl Dice) {
        if self.state != BattleState::EnemyTurn {
            tracing::warn!(state = ?self.state, "enemy phase requested out of turn");
            return;
        }

        for enemy in &mut self.enemies {
            if self.party.iter().all(|m| !m.is_alive()) {
                break;
            }
            resolve_enemy_action(enemy, &mut self.party, dice, &mut self.log);
        }

        tick_statuses(self.party.iter_mut(), &mut self.log);
        for member in &mut self.party {
            member.defending = false;
        }

        if self.party_wiped() {
            self.log.emit("The party has fallen...".to_string());
            tracing::info!(round = self.round, "party defeated");
            self.set_state(BattleState::End(Winner::Enemy));
            return;
        }

        self.acted.clear();
        self.round += 1;
        self.current = self
            .party
            .iter()
            .position(Combatant::is_alive)
            .unwrap_or(0);
        self.set_state(BattleState::PlayerChoice);
    }

    fn declare_victory(&mut self, inventory: &mut impl Inventory, dice: &mut impl Dice) {
        self.log.emit("All enemies are defeated!".to_string());

        let group = grant_rewards_for_group(&self.enemies, dice);
        self.log.emit(format!("Party gains {} XP!", group.xp));
        if group.gold > 0 {
            self.log.emit(format!("Found {} G!", group.gold));
        }
        if !group.items.is_empty() {
            let names: Vec<&str> = group.items.iter().map(|&id| item_name(id)).collect();
            self.log.emit(format!("Loot: {}", names.join(", ")));
        }

        let awards = distribute_xp(
            &mut self.party,
            group.xp,
            self.config.baseline_xp_percent,
            &mut self.log,
        );

        inventory.add_gold(group.gold);
        for id in &group.items {
            inventory.add_item(id, 1);
        }
        let items = count_items(&group.items);

        tracing::info!(
            round = self.round,
            xp = group.xp,
            gold = group.gold,
            drops = group.items.len(),
            "battle won"
        );
        self.rewards = Some(RewardSnapshot {
            xp: group.xp,
            gold: group.gold,
            items,
            awards,
        });
        self.set_state(BattleState::End(Winner::Hero));
    }

    fn set_state(&mut self, state: BattleState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "battle state");
        }
        self.state = state;
    }
}

/// Next (or previous) index after `current` whose slot passes `alive`,
/// wrapping around. Stays put when nothing else qualifies.
fn cycle_living(current: usize, len: usize, forward: bool, alive: impl Fn(usize) -> bool) -> usize {
    if len == 0 {
        return 0;
    }
    (1..=len)
        .map(|offset| {
            if forward {
                (current + offset) % len
            } else {
                (current + len - offset) % len
            }
        })
        .find(|&i| alive(i))
        .unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::starting_party;
    use crate::core::dice::FixedDice;
    use crate::enemies::{create_enemy, EnemyKind};
    use crate::items::Stash;

    fn session() -> BattleSession {
        let mut session = BattleSession::new(starting_party(), BattleConfig::default()).unwrap();
        session.start_with_enemies(vec![create_enemy(EnemyKind::Bat, 1)]);
        session
    }

    #[test]
    fn test_cycle_living_wraps_both_ways() {
        let alive = [true, false, true, true];
        let is_alive = |i: usize| alive[i];
        assert_eq!(cycle_living(0, 4, true, is_alive), 2);
        assert_eq!(cycle_living(3, 4, true, is_alive), 0);
        assert_eq!(cycle_living(0, 4, false, is_alive), 3);
        assert_eq!(cycle_living(2, 4, false, is_alive), 0);
    }

    #[test]
    fn test_cycle_living_stays_put_when_alone() {
        assert_eq!(cycle_living(1, 3, true, |i| i == 1), 1);
        assert_eq!(cycle_living(1, 3, false, |_| false), 1);
        assert_eq!(cycle_living(0, 0, true, |_| true), 0);
    }

    #[test]
    fn test_stun_wears_off_after_one_lost_turn() {
        let mut session = session();
        let mut stash = Stash::starter();
        let mut dice = FixedDice::new().fallback_unit(0.99);
        crate::status::add_or_refresh(&mut session.party[0], StatusKind::Stun, 1, 0);

        for _ in 0..3 {
            session.perform(BattleAction::Defend, &mut stash, &mut dice);
        }
        assert!(session.party[0].has_status(StatusKind::Stun));
        assert!(!session.party[0].defending);

        session.run_enemy_phase(&mut dice);
        assert!(!session.party[0].has_status(StatusKind::Stun));
        assert!(session.log().contains("Hero is no longer affected by stun."));
    }

    #[test]
    fn test_enemy_statuses_tick_after_each_party_action() {
        let mut session = session();
        let mut stash = Stash::starter();
        let mut dice = FixedDice::new();
        crate::status::add_or_refresh(&mut session.enemies[0].unit, StatusKind::Poison, 3, 2);

        session.perform(BattleAction::Defend, &mut stash, &mut dice);
        session.perform(BattleAction::Defend, &mut stash, &mut dice);

        assert_eq!(session.enemies[0].unit.hp, 21);
        assert_eq!(session.enemies[0].unit.status(StatusKind::Poison).map(|s| s.duration), Some(1));
    }

    #[test]
    fn test_poison_tick_can_win_the_battle() {
        let mut session = session();
        let mut stash = Stash::new(0);
        let mut dice = FixedDice::new();
        session.enemies[0].unit.hp = 2;
        crate::status::add_or_refresh(&mut session.enemies[0].unit, StatusKind::Poison, 3, 2);

        session.perform(BattleAction::Defend, &mut stash, &mut dice);

        assert_eq!(session.winner(), Some(Winner::Hero));
        assert_eq!(session.rewards().map(|r| r.xp), Some(14));
    }

    #[test]
    fn test_bat_bite_poisons_a_defender() {
        let mut session = session();
        let mut stash = Stash::starter();
        // fang move (0.1), then the poison roll (0.2) lands
        let mut dice = FixedDice::new().with_units([0.1, 0.2]).fallback_unit(0.99);

        for _ in 0..3 {
            session.perform(BattleAction::Defend, &mut stash, &mut dice);
        }
        session.run_enemy_phase(&mut dice);

        // (9-5)/2 = 2 from the bite, then 2 poison at the end of the phase
        assert_eq!(session.party[0].hp, 96);
        assert!(session.party[0].has_status(StatusKind::Poison));
        assert!(session.log().contains("Hero is afflicted with poison!"));
    }
}
