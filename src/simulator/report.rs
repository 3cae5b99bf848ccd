//! Simulation report generation.

use crate::battle::Winner;
use crate::collaborators::PartyRoster;
use crate::items::Stash;
use serde::Serialize;

/// Outcome of one simulated encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleRecord {
    /// 1-based position in the run
    pub battle: u32,
    /// None when the round cap was hit first
    pub winner: Option<Winner>,
    pub rounds: u32,
    pub enemies: Vec<String>,
    pub xp: u32,
    pub gold: u32,
}

/// Level and XP of one member at the end of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub battles: u32,
    pub wins: u32,
    pub defeats: u32,
    pub escapes: u32,
    pub stalemates: u32,
    pub avg_rounds: f64,
    pub total_xp: u64,
    pub gold_earned: u64,
    pub final_gold: u32,
    pub final_party: Vec<MemberSummary>,
    pub records: Vec<BattleRecord>,
}

impl SimReport {
    pub fn from_battles(records: Vec<BattleRecord>, roster: &PartyRoster, stash: &Stash) -> Self {
        let count = |winner: Option<Winner>| records.iter().filter(|r| r.winner == winner).count() as u32;
        let battles = records.len() as u32;

        let avg_rounds = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.rounds as f64).sum::<f64>() / records.len() as f64
        };

        let final_party = roster
            .members
            .iter()
            .map(|m| MemberSummary {
                name: m.name.clone(),
                level: m.level,
                xp: m.xp,
                xp_to_next: m.xp_to_next,
            })
            .collect();

        Self {
            battles,
            wins: count(Some(Winner::Hero)),
            defeats: count(Some(Winner::Enemy)),
            escapes: count(Some(Winner::Escape)),
            stalemates: count(None),
            avg_rounds,
            total_xp: records.iter().map(|r| r.xp as u64).sum(),
            gold_earned: records.iter().map(|r| r.gold as u64).sum(),
            final_gold: stash.gold,
            final_party,
            records,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        self.wins as f64 / self.battles as f64
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Battles: {}\n\n", self.battles));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Wins:        {:>5} ({:.1}%)\n",
            self.wins,
            self.win_rate() * 100.0
        ));
        report.push_str(&format!("  Defeats:     {:>5}\n", self.defeats));
        report.push_str(&format!("  Escapes:     {:>5}\n", self.escapes));
        if self.stalemates > 0 {
            report.push_str(&format!("  Stalemates:  {:>5}\n", self.stalemates));
        }
        report.push_str(&format!("  Avg Rounds:  {:>7.1}\n\n", self.avg_rounds));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  XP Earned:   {}\n", self.total_xp));
        report.push_str(&format!("  Gold Earned: {}\n", self.gold_earned));
        report.push_str(&format!("  Final Gold:  {}\n\n", self.final_gold));

        report.push_str("── FINAL PARTY ──────────────────────────────────────────────────\n");
        for member in &self.final_party {
            report.push_str(&format!(
                "  {:<10} Lv {:>3}   XP {:>5}/{}\n",
                member.name, member.level, member.xp, member.xp_to_next
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate JSON output for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::starting_party;

    fn record(battle: u32, winner: Option<Winner>, rounds: u32, xp: u32, gold: u32) -> BattleRecord {
        BattleRecord {
            battle,
            winner,
            rounds,
            enemies: vec!["Slime".to_string()],
            xp,
            gold,
        }
    }

    #[test]
    fn test_report_generation() {
        let roster = PartyRoster::from_party(&starting_party());
        let stash = Stash::new(250);
        let records = vec![
            record(1, Some(Winner::Hero), 2, 5, 4),
            record(2, Some(Winner::Hero), 4, 8, 6),
            record(3, Some(Winner::Escape), 1, 0, 0),
            record(4, Some(Winner::Enemy), 9, 0, 0),
        ];

        let report = SimReport::from_battles(records, &roster, &stash);

        assert_eq!(report.battles, 4);
        assert_eq!((report.wins, report.defeats, report.escapes), (2, 1, 1));
        assert_eq!(report.stalemates, 0);
        assert_eq!(report.avg_rounds, 4.0);
        assert_eq!(report.total_xp, 13);
        assert_eq!(report.gold_earned, 10);
        assert_eq!(report.final_gold, 250);
        assert_eq!(report.win_rate(), 0.5);

        let text = report.to_text();
        assert!(text.contains("SIMULATION REPORT"));
        assert!(text.contains("Warrior"));
        assert!(!text.contains("Stalemates"));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_battles(Vec::new(), &PartyRoster::default(), &Stash::new(0));
        assert_eq!(report.avg_rounds, 0.0);
        assert_eq!(report.win_rate(), 0.0);
    }

    #[test]
    fn test_json_output() {
        let roster = PartyRoster::from_party(&starting_party());
        let report = SimReport::from_battles(
            vec![record(1, None, 200, 0, 0)],
            &roster,
            &Stash::new(0),
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["stalemates"], 1);
        assert_eq!(json["records"][0]["winner"], serde_json::Value::Null);
        assert_eq!(json["final_party"][2]["name"], "Mage");
    }
}
