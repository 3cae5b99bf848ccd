//! Integration test: Batch simulator
//!
//! Runs seeded simulations end to end, including a battle config loaded
//! from disk

use skirmish::battle::Winner;
use skirmish::core::BattleConfig;
use skirmish::simulator::{run_simulation, SimConfig};
use std::io::Write;

#[test]
fn test_seeded_simulation_is_deterministic() {
    let config = SimConfig {
        battles: 30,
        seed: Some(1234),
        ..Default::default()
    };

    let first = run_simulation(&config).unwrap();
    let second = run_simulation(&config).unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.to_json(), second.to_json());
}

#[test]
fn test_long_run_levels_the_party() {
    let config = SimConfig {
        battles: 60,
        seed: Some(99),
        ..Default::default()
    };

    let report = run_simulation(&config).unwrap();

    assert_eq!(report.battles, 60);
    assert!(report.wins > 0, "the starting party should win some fights");
    assert!(report.final_party.iter().any(|m| m.level > 1));
    assert_eq!(report.escapes, 0, "the autopilot never runs");
    for record in &report.records {
        assert!(!record.enemies.is_empty() && record.enemies.len() <= 3);
        if record.winner != Some(Winner::Hero) {
            assert_eq!((record.xp, record.gold), (0, 0));
        }
    }
}

#[test]
fn test_config_file_changes_encounters() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "max_group_size": 1 }}"#).unwrap();

    let config = SimConfig {
        battles: 15,
        seed: Some(5),
        battle_config: BattleConfig::load(file.path()).unwrap(),
        ..Default::default()
    };

    let report = run_simulation(&config).unwrap();
    assert!(report.records.iter().all(|r| r.enemies.len() == 1));
}

#[test]
fn test_text_report_lists_outcomes() {
    let report = run_simulation(&SimConfig::quick(8)).unwrap();
    let text = report.to_text();

    assert!(text.contains("Wins:"));
    assert!(text.contains("Hero"));
    assert!(text.contains("Mage"));
}
