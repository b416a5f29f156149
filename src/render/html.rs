//! Card Markup
//!
//! Builds the dashboard HTML. Every interpolated value goes through
//! [`escape`]; snapshot text comes from an external process.

use std::fmt::Write;

use super::stats::SessionStats;
use crate::snapshot::{Account, Match, Snapshot};

/// Shown in place of the history when an account has no session matches
pub const NO_MATCHES_PLACEHOLDER: &str = "Aucun match sur la période";

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One row of the match history
pub fn render_match_row(m: &Match) -> String {
    let class = if m.is_win() { "win" } else { "loss" };

    format!(
        r#"<div class="match-row {class}">
<div class="champ-info">
<div class="champ-icon-wrapper"><img src="{icon}" class="champ-icon zoom-effect" alt="{champion}"></div>
<span>{champion}</span>
</div>
<div class="match-center">
<div class="match-result">{result}</div>
<div class="match-kda">{kda}</div>
</div>
<div class="lp-change">{lp} LP</div>
</div>
"#,
        class = class,
        icon = escape(&m.icon),
        champion = escape(&m.champion),
        result = escape(&m.resultat),
        kda = escape(m.kda_text()),
        lp = escape(&m.lp_change.display()),
    )
}

/// All match rows in supplied order, or the placeholder row
pub fn render_match_history(matches: &[Match]) -> String {
    if matches.is_empty() {
        return format!(
            r#"<div class="no-matches" style="padding:20px; text-align:center; color:#555;">{}</div>
"#,
            NO_MATCHES_PLACEHOLDER
        );
    }

    matches.iter().map(render_match_row).collect()
}

/// A complete player card
pub fn render_card(account: &Account) -> String {
    let stats = SessionStats::compute(account);

    format!(
        r#"<div class="player-card">
<div class="card-header">
<a href="{dpm}" target="_blank" class="player-name-link">{name} <span class="player-tag">#{tag}</span></a>
<div class="header-infos-row">
<div class="rank-display">{rank}</div>
<div class="session-stats">
<div class="stat-games">{games}</div>
<div style="display: flex; align-items: center; gap: 8px;">
<div class="stat-lp" style="color: {lp_color}">{lp} LP</div>
<div class="stat-winrate" style="color: {wr_color}; font-weight: bold; font-size: 0.9em;">{winrate}% WR</div>
</div>
</div>
</div>
</div>
<div class="match-history">
{history}</div>
</div>
"#,
        dpm = escape(&account.dpm),
        name = escape(&account.game_name),
        tag = escape(&account.tag_line),
        rank = escape(&stats.rank_text),
        games = stats.games_label(),
        lp_color = stats.lp_color(),
        lp = stats.lp_text(),
        wr_color = stats.winrate_color(),
        winrate = stats.winrate,
        history = render_match_history(account.matches()),
    )
}

/// Every card, in account order
pub fn render_dashboard(snapshot: &Snapshot) -> String {
    snapshot.accounts.iter().map(render_card).collect()
}

/// Options for the standalone page shell
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    /// Seconds between browser reloads, 0 disables the reload
    pub refresh_secs: u64,
    pub win_color: String,
    pub loss_color: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Rankboard".to_string(),
            refresh_secs: 60,
            win_color: "#4ade80".to_string(),
            loss_color: "#f87171".to_string(),
        }
    }
}

/// Wrap dashboard markup in a full document with the `#dashboard` container
pub fn render_page(dashboard: &str, options: &PageOptions) -> String {
    let mut page = String::with_capacity(dashboard.len() + 512);

    page.push_str("<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n");
    if options.refresh_secs > 0 {
        let _ = writeln!(
            page,
            r#"<meta http-equiv="refresh" content="{}">"#,
            options.refresh_secs
        );
    }
    let _ = writeln!(page, "<title>{}</title>", escape(&options.title));
    let _ = writeln!(
        page,
        "<style>:root {{ --win-color: {}; --loss-color: {}; }}</style>",
        escape(&options.win_color),
        escape(&options.loss_color)
    );
    page.push_str("</head>\n<body>\n");
    page.push_str("<div id=\"dashboard\">\n");
    page.push_str(dashboard);
    page.push_str("</div>\n</body>\n</html>\n");

    page
}
