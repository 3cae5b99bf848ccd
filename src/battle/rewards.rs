//! Splitting victory XP across the surviving party.

use super::types::XpAward;
use crate::collaborators::MessageSink;
use crate::combatant::{BattleCounters, Combatant, Job};
use crate::core::constants::{SCORE_PER_KILL, SCORE_PER_STATUS};

/// Performance score: damage dealt, plus 15 per kill and 8 per status landed.
pub fn performance_score(counters: &BattleCounters) -> u64 {
    counters.damage_dealt as u64
        + counters.kills as u64 * SCORE_PER_KILL
        + counters.statuses_inflicted as u64 * SCORE_PER_STATUS
}

/// Splits `amount` evenly over `n` shares; the first `amount % n` shares get
/// one extra unit.
fn even_split(amount: u32, n: usize) -> Vec<u32> {
    let n32 = n as u32;
    let share = amount / n32;
    let remainder = (amount % n32) as usize;
    (0..n).map(|i| share + u32::from(i < remainder)).collect()
}

/// Splits `pool` proportionally to `scores` (floored), then hands the
/// flooring leftover out one unit at a time in descending score order.
fn weighted_split(pool: u32, scores: &[u64]) -> Vec<u32> {
    let total: u64 = scores.iter().sum();
    let mut shares: Vec<u32> = scores
        .iter()
        .map(|&score| (pool as u64 * score / total) as u32)
        .collect();

    let assigned: u32 = shares.iter().sum();
    let leftover = pool - assigned;
    if leftover > 0 {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
        for j in 0..leftover as usize {
            shares[order[j % order.len()]] += 1;
        }
    }
    shares
}

/// Distributes `total_xp` over the living members of `party`.
///
/// `baseline_percent` of the total is split evenly, the remainder in party
/// order. The rest is a bonus pool weighted by [`performance_score`]; when
/// nobody scored it is split evenly as well, so the gains always add up to
/// `total_xp`. XP is applied immediately, level-up lines go to `log`, and
/// the awards come back MVP first.
pub fn distribute_xp<S>(
    party: &mut [Combatant],
    total_xp: u32,
    baseline_percent: u32,
    log: &mut S,
) -> Vec<XpAward>
where
    S: MessageSink + ?Sized,
{
    let living: Vec<usize> = (0..party.len()).filter(|&i| party[i].is_alive()).collect();
    if living.is_empty() {
        return Vec::new();
    }

    let baseline = (total_xp as u64 * baseline_percent.min(100) as u64 / 100) as u32;
    let bonus_pool = total_xp - baseline;

    let scores: Vec<u64> = living
        .iter()
        .map(|&i| performance_score(&party[i].counters))
        .collect();
    let total_score: u64 = scores.iter().sum();

    let base_shares = even_split(baseline, living.len());
    let bonus_shares = if bonus_pool == 0 {
        vec![0; living.len()]
    } else if total_score == 0 {
        even_split(bonus_pool, living.len())
    } else {
        weighted_split(bonus_pool, &scores)
    };

    let mut awards = Vec::with_capacity(living.len());
    for (slot, &index) in living.iter().enumerate() {
        let member = &mut party[index];
        let xp = base_shares[slot] + bonus_shares[slot];
        let level_before = member.level;
        let xp_before = member.xp;
        let xp_to_next_before = member.xp_to_next;

        if member.grant_xp(xp) {
            for level in level_before + 1..=member.level {
                log.emit(format!("{} reached level {}!", member.name, level));
                if member.job == Job::Hero {
                    log.emit(format!(
                        "{}'s stats increased and HP/MP restored!",
                        member.name
                    ));
                } else {
                    log.emit("HP/MP restored!".to_string());
                }
            }
        }

        awards.push(XpAward {
            name: member.name.clone(),
            index,
            xp,
            level_before,
            level_after: member.level,
            score: scores[slot],
            xp_before,
            xp_to_next_before,
        });
    }

    awards.sort_by(|a, b| b.score.cmp(&a.score));
    tracing::debug!(total_xp, baseline, bonus_pool, members = awards.len(), "distributed xp");
    awards
}
