//! Session Statistics
//!
//! Per-account aggregates shown in a card header.

use serde::Serialize;

use crate::snapshot::{Account, Tier};

/// CSS colour for a non-negative session LP total
pub const WIN_COLOR: &str = "var(--win-color)";
/// CSS colour for a negative session LP total
pub const LOSS_COLOR: &str = "var(--loss-color)";
/// Winrate colour at or above 50%
pub const WINRATE_GOOD_COLOR: &str = "#4ade80";
/// Winrate colour below 50%
pub const WINRATE_BAD_COLOR: &str = "#f87171";

/// Display aggregates for one account's session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    /// Every listed match, including those with unknown LP
    pub total_games: usize,
    /// Sum of the known LP deltas, saturating at the `i64` bounds
    pub total_lp_gain: i64,
    pub winrate: f64,
    pub rank_text: String,
}

impl SessionStats {
    pub fn compute(account: &Account) -> Self {
        let matches = account.matches();

        Self {
            total_games: matches.len(),
            total_lp_gain: matches
                .iter()
                .filter_map(|m| m.lp_change.known())
                .fold(0, i64::saturating_add),
            winrate: account.winrate(),
            rank_text: rank_text(account),
        }
    }

    /// `+` for a strictly positive total, nothing otherwise
    pub fn lp_sign(&self) -> &'static str {
        if self.total_lp_gain > 0 {
            "+"
        } else {
            ""
        }
    }

    /// Signed total, e.g. `+25`, `-10` or `0`
    pub fn lp_text(&self) -> String {
        format!("{}{}", self.lp_sign(), self.total_lp_gain)
    }

    pub fn lp_color(&self) -> &'static str {
        if self.total_lp_gain >= 0 {
            WIN_COLOR
        } else {
            LOSS_COLOR
        }
    }

    pub fn winrate_color(&self) -> &'static str {
        if self.winrate >= 50.0 {
            WINRATE_GOOD_COLOR
        } else {
            WINRATE_BAD_COLOR
        }
    }

    /// `1 Game`, `0 Games`, `3 Games`
    pub fn games_label(&self) -> String {
        let suffix = if self.total_games == 1 { "" } else { "s" };
        format!("{} Game{}", self.total_games, suffix)
    }
}

/// Rank line for a card header.
///
/// Apex tiers have no divisions, so only the LP is shown next to the tier.
pub fn rank_text(account: &Account) -> String {
    let info = &account.rank_info;
    match info.tier() {
        Tier::Unranked => "Unranked".to_string(),
        Tier::Apex(tier) => format!("{} • {} LP", tier, info.lp),
        Tier::Standard(tier) => format!("{} {} • {} LP", tier, info.rank, info.lp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{LpChange, Match, RankInfo};

    fn account(tier: &str, rank: &str, lp: i64) -> Account {
        Account {
            game_name: "Byron Love".to_string(),
            tag_line: "Yoshi".to_string(),
            dpm: "https://dpm.lol/Byron Love-Yoshi".to_string(),
            rank_info: RankInfo {
                tier: tier.to_string(),
                rank: rank.to_string(),
                lp,
                absolute_score: None,
            },
            winrate: None,
            matches: None,
        }
    }

    fn game(lp_change: LpChange, resultat: &str) -> Match {
        Match {
            id: None,
            champion: "Yasuo".to_string(),
            icon: "https://cdn/Yasuo.png".to_string(),
            resultat: resultat.to_string(),
            kda: None,
            lp_change,
            timestamp: None,
        }
    }

    fn with_lp(changes: &[LpChange]) -> SessionStats {
        let mut acc = account("GOLD", "II", 40);
        acc.matches = Some(changes.iter().map(|&c| game(c, "Victoire")).collect());
        SessionStats::compute(&acc)
    }

    #[test]
    fn test_rank_text() {
        assert_eq!(rank_text(&account("UNRANKED", "", 0)), "Unranked");
        assert_eq!(
            rank_text(&account("CHALLENGER", "I", 350)),
            "CHALLENGER • 350 LP"
        );
        assert_eq!(rank_text(&account("GOLD", "II", 40)), "GOLD II • 40 LP");
    }

    #[test]
    fn test_totals_skip_unknown_lp() {
        let stats = with_lp(&[
            LpChange::Known(20),
            LpChange::Unknown,
            LpChange::Known(-12),
            LpChange::Unknown,
        ]);
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.total_lp_gain, 8);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let stats = with_lp(&[LpChange::Known(i64::MAX), LpChange::Known(1)]);
        assert_eq!(stats.total_lp_gain, i64::MAX);
        assert_eq!(stats.lp_sign(), "+");

        let stats = with_lp(&[LpChange::Known(i64::MIN), LpChange::Known(-1)]);
        assert_eq!(stats.total_lp_gain, i64::MIN);
        assert_eq!(stats.lp_color(), LOSS_COLOR);
    }

    #[test]
    fn test_huge_deltas_from_json() {
        let mut acc = account("GOLD", "II", 40);
        acc.matches = Some(
            serde_json::from_str(&format!(
                r#"[{{"champion": "Ahri", "icon": "a", "resultat": "Victoire", "lp_change": {}}},
                    {{"champion": "Ahri", "icon": "a", "resultat": "Victoire", "lp_change": 1}}]"#,
                i64::MAX
            ))
            .unwrap(),
        );
        assert_eq!(SessionStats::compute(&acc).total_lp_gain, i64::MAX);
    }

    #[test]
    fn test_absent_matches() {
        let stats = SessionStats::compute(&account("GOLD", "IV", 0));
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.total_lp_gain, 0);
        assert_eq!(stats.games_label(), "0 Games");
    }

    #[test]
    fn test_sign_and_color() {
        let positive = with_lp(&[LpChange::Known(25)]);
        assert_eq!(positive.lp_text(), "+25");
        assert_eq!(positive.lp_color(), WIN_COLOR);

        let negative = with_lp(&[LpChange::Known(-10)]);
        assert_eq!(negative.lp_text(), "-10");
        assert_eq!(negative.lp_color(), LOSS_COLOR);

        let zero = with_lp(&[]);
        assert_eq!(zero.lp_text(), "0");
        assert_eq!(zero.lp_color(), WIN_COLOR);
    }

    #[test]
    fn test_winrate_color() {
        let mut acc = account("GOLD", "II", 40);

        acc.winrate = Some(50.0);
        assert_eq!(SessionStats::compute(&acc).winrate_color(), WINRATE_GOOD_COLOR);

        acc.winrate = Some(49.0);
        assert_eq!(SessionStats::compute(&acc).winrate_color(), WINRATE_BAD_COLOR);

        acc.winrate = None;
        let stats = SessionStats::compute(&acc);
        assert_eq!(stats.winrate, 0.0);
        assert_eq!(stats.winrate_color(), WINRATE_BAD_COLOR);
    }

    #[test]
    fn test_games_label() {
        assert_eq!(with_lp(&[LpChange::Known(1)]).games_label(), "1 Game");
        assert_eq!(
            with_lp(&[LpChange::Known(1), LpChange::Unknown]).games_label(),
            "2 Games"
        );
    }
}
