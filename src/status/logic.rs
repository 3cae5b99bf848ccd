//! Applying and ticking statuses.

use super::types::{Status, StatusKind};
use crate::collaborators::MessageSink;
use crate::combatant::Combatant;

/// Applies a status, or refreshes an existing one of the same kind.
///
/// A refresh keeps the larger duration and the larger power; statuses never
/// stack.
pub fn add_or_refresh(target: &mut Combatant, kind: StatusKind, duration: u32, power: u32) {
    if let Some(existing) = target.statuses.iter_mut().find(|s| s.kind == kind) {
        existing.duration = existing.duration.max(duration);
        existing.power = existing.power.max(power);
        return;
    }
    target.statuses.push(Status::new(kind, duration, power));
}

/// Ticks every status on every living combatant of one side.
///
/// Damage-over-time kinds deal `max(1, power)` first. Each status then loses
/// one round and is dropped at zero; the expiry line is only emitted while
/// the bearer is still standing. A combatant killed by a tick loses all
/// remaining statuses.
pub fn tick_statuses<'a, S>(side: impl IntoIterator<Item = &'a mut Combatant>, log: &mut S)
where
    S: MessageSink + ?Sized,
{
    for unit in side {
        if !unit.is_alive() {
            continue;
        }

        let statuses = std::mem::take(&mut unit.statuses);
        let mut remaining = Vec::with_capacity(statuses.len());

        for mut status in statuses {
            match status.kind {
                StatusKind::Poison => {
                    let damage = status.power.max(1);
                    unit.apply_damage(damage);
                    log.emit(format!("{} suffers {} poison damage!", unit.name, damage));
                }
                StatusKind::Bleed => {
                    let damage = status.power.max(1);
                    unit.apply_damage(damage);
                    log.emit(format!("{} bleeds for {} damage!", unit.name, damage));
                }
                StatusKind::Weaken | StatusKind::Stun | StatusKind::Curse => {}
            }

            status.duration = status.duration.saturating_sub(1);
            if status.duration > 0 && unit.is_alive() {
                remaining.push(status);
            } else if unit.is_alive() {
                log.emit(format!(
                    "{} is no longer affected by {}.",
                    unit.name,
                    status.kind.name().to_lowercase()
                ));
            }
        }

        unit.statuses = remaining;
    }
}

/// Comma-separated status codes, e.g. `"PSN, BLD"`. Empty when unaffected.
pub fn status_codes(unit: &Combatant) -> String {
    let mut codes: Vec<&str> = Vec::new();
    for status in &unit.statuses {
        let code = status.kind.code();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Job;

    fn target() -> Combatant {
        Combatant::new("Slime", Job::Warrior, 35, 0, 8, 0, 2, 5)
    }

    #[test]
    fn test_refresh_takes_max_of_each_field() {
        let mut t = target();
        add_or_refresh(&mut t, StatusKind::Poison, 3, 1);
        add_or_refresh(&mut t, StatusKind::Poison, 2, 4);

        assert_eq!(t.statuses.len(), 1);
        assert_eq!(t.statuses[0], Status::new(StatusKind::Poison, 3, 4));
    }

    #[test]
    fn test_different_kinds_coexist_in_order() {
        let mut t = target();
        add_or_refresh(&mut t, StatusKind::Weaken, 3, 0);
        add_or_refresh(&mut t, StatusKind::Bleed, 2, 3);
        let kinds: Vec<_> = t.statuses.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StatusKind::Weaken, StatusKind::Bleed]);
        assert_eq!(status_codes(&t), "WKN, BLD");
    }

    #[test]
    fn test_poison_ticks_and_expires() {
        let mut t = target();
        add_or_refresh(&mut t, StatusKind::Poison, 2, 3);
        let mut log: Vec<String> = Vec::new();

        tick_statuses(std::iter::once(&mut t), &mut log);
        assert_eq!(t.hp, 32);
        assert_eq!(t.statuses[0].duration, 1);

        tick_statuses(std::iter::once(&mut t), &mut log);
        assert_eq!(t.hp, 29);
        assert!(t.statuses.is_empty());
        assert_eq!(
            log,
            vec![
                "Slime suffers 3 poison damage!",
                "Slime suffers 3 poison damage!",
                "Slime is no longer affected by poison.",
            ]
        );
    }

    #[test]
    fn test_zero_power_dot_still_deals_one() {
        let mut t = target();
        add_or_refresh(&mut t, StatusKind::Bleed, 1, 0);
        let mut log: Vec<String> = Vec::new();
        tick_statuses(std::iter::once(&mut t), &mut log);
        assert_eq!(t.hp, 34);
        assert_eq!(log[0], "Slime bleeds for 1 damage!");
    }

    #[test]
    fn test_non_damage_statuses_only_count_down() {
        let mut t = target();
        add_or_refresh(&mut t, StatusKind::Stun, 1, 0);
        add_or_refresh(&mut t, StatusKind::Weaken, 2, 0);
        let mut log: Vec<String> = Vec::new();

        tick_statuses(std::iter::once(&mut t), &mut log);

        assert_eq!(t.hp, 35);
        assert!(!t.has_status(StatusKind::Stun));
        assert!(t.has_status(StatusKind::Weaken));
        assert_eq!(log, vec!["Slime is no longer affected by stun."]);
    }

    #[test]
    fn test_lethal_tick_drops_statuses_silently() {
        let mut t = target();
        t.hp = 2;
        add_or_refresh(&mut t, StatusKind::Poison, 3, 5);
        add_or_refresh(&mut t, StatusKind::Weaken, 3, 0);
        let mut log: Vec<String> = Vec::new();

        tick_statuses(std::iter::once(&mut t), &mut log);

        assert_eq!(t.hp, 0);
        assert!(t.statuses.is_empty());
        assert_eq!(log, vec!["Slime suffers 5 poison damage!"]);
    }

    #[test]
    fn test_dead_units_are_skipped() {
        let mut alive = target();
        let mut dead = target();
        dead.hp = 0;
        add_or_refresh(&mut alive, StatusKind::Poison, 2, 2);
        add_or_refresh(&mut dead, StatusKind::Poison, 2, 2);
        let mut log: Vec<String> = Vec::new();

        tick_statuses([&mut alive, &mut dead], &mut log);

        assert_eq!(alive.statuses[0].duration, 1);
        assert_eq!(dead.statuses[0].duration, 2);
        assert_eq!(log.len(), 1);
    }
}
