//! Plays consecutive encounters with the autopilot.
//!
//! The party's level and XP persist between battles through a
//! [`PartyRoster`], and loot accumulates in a shared [`Stash`], the same way
//! the game carries progress from one fight to the next.

use super::autopilot::choose_action;
use super::config::SimConfig;
use super::report::{BattleRecord, SimReport};
use crate::battle::{BattleSession, BattleState};
use crate::collaborators::PartyRoster;
use crate::combatant::starting_party;
use crate::core::error::EngineError;
use crate::items::Stash;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, EngineError> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut session = BattleSession::new(starting_party(), config.battle_config.clone())?;
    let mut roster = PartyRoster::from_party(&session.party);
    let mut stash = Stash::starter();
    let mut records = Vec::with_capacity(config.battles as usize);

    for battle in 1..=config.battles {
        let record = simulate_battle(
            battle,
            &mut session,
            &mut roster,
            &mut stash,
            config.max_rounds_per_battle,
            &mut rng,
        );

        if config.verbose {
            println!(
                "Battle {}/{} - {:?} in {} rounds vs {} (+{} XP, +{} G)",
                battle,
                config.battles,
                record.winner,
                record.rounds,
                record.enemies.join(", "),
                record.xp,
                record.gold
            );
        }
        records.push(record);
    }

    tracing::info!(battles = config.battles, gold = stash.gold, "simulation finished");
    Ok(SimReport::from_battles(records, &roster, &stash))
}

/// One encounter: sync from the roster, fight to the end (or the round cap),
/// then publish back.
fn simulate_battle(
    battle: u32,
    session: &mut BattleSession,
    roster: &mut PartyRoster,
    stash: &mut Stash,
    max_rounds: u32,
    rng: &mut ChaCha8Rng,
) -> BattleRecord {
    session.sync_from(&*roster);
    let reference_level = session.party[0].level;
    session.start_encounter(&reference_level, rng);
    let enemies = session.enemies.iter().map(|e| e.name().to_string()).collect();

    while session.round() <= max_rounds {
        match session.state() {
            BattleState::End(_) => break,
            BattleState::EnemyTurn => session.run_enemy_phase(rng),
            _ => {
                let action = choose_action(session, &*stash);
                session.perform(action, stash, rng);
            }
        }
    }

    if !session.is_over() {
        tracing::warn!(battle, max_rounds, "battle hit the round cap");
    }
    session.publish_to(roster);

    let (xp, gold) = session
        .rewards()
        .map(|r| (r.xp, r.gold))
        .unwrap_or((0, 0));

    BattleRecord {
        battle,
        winner: session.winner(),
        rounds: session.round(),
        enemies,
        xp,
        gold,
    }
}
