//! Event Recap
//!
//! End-of-event summary over a snapshot: one line per account plus four
//! awards. Ties go to the account listed first.

use serde::Serialize;
use std::fmt::Write;

use crate::render::SessionStats;
use crate::snapshot::Snapshot;

/// Session totals for one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub name: String,
    /// `gameName#tagLine`
    pub riot_id: String,
    /// Ladder position, from the producer's score or derived from the rank
    pub ladder_score: i64,
    pub games: usize,
    pub winrate: f64,
    pub lp_gained: i64,
}

/// An award holder and the value that earned it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Award<T> {
    pub player: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recap {
    pub event_ended: bool,
    pub accounts: Vec<AccountSummary>,
    pub most_games: Option<Award<usize>>,
    pub fewest_games: Option<Award<usize>>,
    /// Only accounts with at least one game compete
    pub worst_winrate: Option<Award<f64>>,
    pub top_lp: Option<Award<i64>>,
}

impl Recap {
    pub fn compute(snapshot: &Snapshot) -> Self {
        let accounts: Vec<AccountSummary> = snapshot
            .accounts
            .iter()
            .map(|acc| {
                let stats = SessionStats::compute(acc);
                AccountSummary {
                    name: acc.game_name.clone(),
                    riot_id: acc.riot_id(),
                    ladder_score: acc.rank_info.ladder_score(),
                    games: stats.total_games,
                    winrate: stats.winrate,
                    lp_gained: stats.total_lp_gain,
                }
            })
            .collect();

        let mut most_games: Option<Award<usize>> = None;
        let mut fewest_games: Option<Award<usize>> = None;
        let mut worst_winrate: Option<Award<f64>> = None;
        let mut top_lp: Option<Award<i64>> = None;

        for summary in &accounts {
            if most_games.as_ref().map_or(true, |a| summary.games > a.value) {
                most_games = Some(award(summary, summary.games));
            }
            if fewest_games.as_ref().map_or(true, |a| summary.games < a.value) {
                fewest_games = Some(award(summary, summary.games));
            }
            if summary.games > 0
                && worst_winrate
                    .as_ref()
                    .map_or(true, |a| summary.winrate < a.value)
            {
                worst_winrate = Some(award(summary, summary.winrate));
            }
            if top_lp.as_ref().map_or(true, |a| summary.lp_gained > a.value) {
                top_lp = Some(award(summary, summary.lp_gained));
            }
        }

        Self {
            event_ended: snapshot.event_ended,
            accounts,
            most_games,
            fewest_games,
            worst_winrate,
            top_lp,
        }
    }

    /// Plain-text report, suitable for archiving
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if self.accounts.is_empty() {
            out.push_str("No accounts to summarize.\n");
            return out;
        }

        for a in &self.accounts {
            let _ = writeln!(
                out,
                "{}, games: {}, WR: {}%, LP gained: {}",
                a.name, a.games, a.winrate, a.lp_gained
            );
        }

        out.push_str("\n--- EVENT RECAP ---\n");
        if let Some(a) = &self.fewest_games {
            let _ = writeln!(out, "  Fewest games: {} ({} games)", a.player, a.value);
        }
        if let Some(a) = &self.most_games {
            let _ = writeln!(out, "  Most games: {} ({} games)", a.player, a.value);
        }
        if let Some(a) = &self.worst_winrate {
            let _ = writeln!(out, "  Worst winrate: {} ({}% WR)", a.player, a.value);
        }
        if let Some(a) = &self.top_lp {
            let sign = if a.value > 0 { "+" } else { "" };
            let _ = writeln!(out, "  Top LP gain: {} ({}{} LP)", a.player, sign, a.value);
        }
        out.push_str("-------------------\n");

        out
    }
}

fn award<T>(summary: &AccountSummary, value: T) -> Award<T> {
    Award {
        player: summary.name.clone(),
        value,
    }
}
