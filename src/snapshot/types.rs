//! Snapshot document types
//!
//! The snapshot is produced by an external ranked-ladder poller and read as-is:
//! - `Snapshot`: the whole document, an ordered list of accounts
//! - `Account`: one tracked player with rank and session matches
//! - `Match`: one played game in the session
//! - `LpChange`: the LP delta of a match, which may be unknown
//! - `Tier`: classification of a ranked tier for display

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::error::SnapshotResult;

/// Marker the producer writes when a match's LP delta could not be attributed
pub const UNKNOWN_LP: &str = "?";

/// Result text the producer writes for a won match
pub const VICTORY: &str = "Victoire";

/// Root snapshot document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// Set by the producer once the event window has closed
    #[serde(default)]
    pub event_ended: bool,
    /// Tracked accounts, in display order
    pub accounts: Vec<Account>,
}

impl Snapshot {
    /// Parse a snapshot from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> SnapshotResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One tracked player account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(rename = "gameName")]
    pub game_name: String,
    #[serde(rename = "tagLine")]
    pub tag_line: String,
    /// Link to the external profile page
    pub dpm: String,
    pub rank_info: RankInfo,
    /// Session winrate in percent, 0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winrate: Option<f64>,
    /// Session matches, most recent first as supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<Match>>,
}

impl Account {
    /// Display identifier `gameName#tagLine`
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }

    /// Session matches, empty when the producer omitted the field
    pub fn matches(&self) -> &[Match] {
        self.matches.as_deref().unwrap_or(&[])
    }

    /// Winrate with the absent case folded to 0
    pub fn winrate(&self) -> f64 {
        self.winrate.unwrap_or(0.0)
    }
}

/// Current ranked position of an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankInfo {
    pub tier: String,
    /// Division (I..IV), empty for apex tiers and unranked accounts
    #[serde(default)]
    pub rank: String,
    pub lp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_score: Option<i64>,
}

impl RankInfo {
    /// Classify the tier string
    pub fn tier(&self) -> Tier {
        Tier::parse(&self.tier)
    }

    /// Single comparable number for the whole ladder position.
    ///
    /// Uses the producer's `absolute_score` when present.
    pub fn ladder_score(&self) -> i64 {
        self.absolute_score.unwrap_or_else(|| {
            self.tier()
                .base_score()
                .saturating_add(division_offset(&self.rank))
                .saturating_add(self.lp)
        })
    }
}

fn division_offset(rank: &str) -> i64 {
    match rank {
        "III" => 100,
        "II" => 200,
        "I" => 300,
        _ => 0,
    }
}

/// Ranked tier classification used for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tier {
    Unranked,
    /// MASTER, GRANDMASTER or CHALLENGER: no divisions
    Apex(String),
    /// Any other tier, shown with its division
    Standard(String),
}

impl Tier {
    /// Tiers above the division system
    pub const APEX: [&'static str; 3] = ["MASTER", "GRANDMASTER", "CHALLENGER"];

    pub fn parse(tier: &str) -> Self {
        if tier == "UNRANKED" {
            Tier::Unranked
        } else if Self::APEX.contains(&tier) {
            Tier::Apex(tier.to_string())
        } else {
            Tier::Standard(tier.to_string())
        }
    }

    pub fn is_apex(&self) -> bool {
        matches!(self, Tier::Apex(_))
    }

    /// Ladder score at 0 LP in the lowest division of the tier
    pub fn base_score(&self) -> i64 {
        if self.is_apex() {
            return 2800;
        }
        match self {
            Tier::Standard(tier) => match tier.as_str() {
                "BRONZE" => 400,
                "SILVER" => 800,
                "GOLD" => 1200,
                "PLATINUM" => 1600,
                "EMERALD" => 2000,
                "DIAMOND" => 2400,
                _ => 0,
            },
            _ => 0,
        }
    }
}

/// One match of the session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub champion: String,
    /// Champion icon URL
    pub icon: String,
    /// `"Victoire"` for a win, anything else is a loss
    pub resultat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kda: Option<String>,
    #[serde(default)]
    pub lp_change: LpChange,
    /// Game end time (ms since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Match {
    pub fn is_win(&self) -> bool {
        self.resultat == VICTORY
    }

    /// KDA text, empty when absent
    pub fn kda_text(&self) -> &str {
        self.kda.as_deref().unwrap_or("")
    }
}

/// LP delta of a single match
///
/// On the wire this is an integer, the string `"?"` or `null`. Any other
/// value is rejected when the snapshot is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LpChange {
    Known(i64),
    #[default]
    Unknown,
}

impl LpChange {
    /// The delta when it counts toward session totals
    pub fn known(self) -> Option<i64> {
        match self {
            LpChange::Known(lp) => Some(lp),
            LpChange::Unknown => None,
        }
    }

    /// Row text without the unit: `+18`, `-9`, `0` or `?`
    pub fn display(self) -> String {
        match self {
            LpChange::Known(lp) if lp > 0 => format!("+{}", lp),
            LpChange::Known(lp) => lp.to_string(),
            LpChange::Unknown => UNKNOWN_LP.to_string(),
        }
    }
}

impl Serialize for LpChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LpChange::Known(lp) => serializer.serialize_i64(*lp),
            LpChange::Unknown => serializer.serialize_str(UNKNOWN_LP),
        }
    }
}

impl<'de> Deserialize<'de> for LpChange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LpChangeVisitor)
    }
}

struct LpChangeVisitor;

impl<'de> Visitor<'de> for LpChangeVisitor {
    type Value = LpChange;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, \"?\" or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<LpChange, E> {
        Ok(LpChange::Known(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<LpChange, E> {
        i64::try_from(v)
            .map(LpChange::Known)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<LpChange, E> {
        if v == UNKNOWN_LP {
            Ok(LpChange::Unknown)
        } else {
            Err(E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<LpChange, E> {
        Ok(LpChange::Unknown)
    }

    fn visit_none<E: de::Error>(self) -> Result<LpChange, E> {
        Ok(LpChange::Unknown)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<LpChange, D::Error> {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "event_ended": false,
        "accounts": [
            {
                "gameName": "LeGreedou",
                "tagLine": "PLATE",
                "dpm": "https://dpm.lol/LeGreedou-PLATE",
                "rank_info": {"tier": "GOLD", "rank": "II", "lp": 40, "absolute_score": 1440},
                "winrate": 50,
                "matches": [
                    {"id": "EUW1_1", "champion": "Ahri", "icon": "https://cdn/Ahri.png",
                     "resultat": "Victoire", "kda": "7/2/9", "lp_change": 20, "timestamp": 1733338800000},
                    {"id": "EUW1_2", "champion": "Zed", "icon": "https://cdn/Zed.png",
                     "resultat": "Défaite", "kda": "1/8/3", "lp_change": "?"}
                ]
            },
            {
                "gameName": "Soreoe",
                "tagLine": "oeoeo",
                "dpm": "https://dpm.lol/Soreoe-oeoeo",
                "rank_info": {"tier": "UNRANKED", "rank": "", "lp": 0}
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_snapshot() {
        let snapshot = Snapshot::from_json(SAMPLE).unwrap();
        assert!(!snapshot.event_ended);
        assert_eq!(snapshot.accounts.len(), 2);

        let first = &snapshot.accounts[0];
        assert_eq!(first.riot_id(), "LeGreedou#PLATE");
        assert_eq!(first.matches().len(), 2);
        assert_eq!(first.matches()[0].lp_change, LpChange::Known(20));
        assert_eq!(first.matches()[1].lp_change, LpChange::Unknown);
        assert!(first.matches()[0].is_win());
        assert!(!first.matches()[1].is_win());

        let second = &snapshot.accounts[1];
        assert!(second.matches().is_empty());
        assert_eq!(second.winrate(), 0.0);
    }

    #[test]
    fn test_account_order_preserved() {
        let snapshot = Snapshot::from_json(SAMPLE).unwrap();
        let names: Vec<_> = snapshot.accounts.iter().map(|a| a.game_name.as_str()).collect();
        assert_eq!(names, vec!["LeGreedou", "Soreoe"]);
    }

    #[test]
    fn test_lp_change_variants() {
        let parse = |v: &str| serde_json::from_str::<LpChange>(v);
        assert_eq!(parse("18").unwrap(), LpChange::Known(18));
        assert_eq!(parse("-9").unwrap(), LpChange::Known(-9));
        assert_eq!(parse("\"?\"").unwrap(), LpChange::Unknown);
        assert_eq!(parse("null").unwrap(), LpChange::Unknown);
        assert!(parse("\"12\"").is_err());
        assert!(parse("1.5").is_err());
        assert!(parse("true").is_err());
    }

    #[test]
    fn test_missing_lp_change_is_unknown() {
        let m: Match = serde_json::from_str(
            r#"{"champion": "Lux", "icon": "x", "resultat": "Victoire"}"#,
        )
        .unwrap();
        assert_eq!(m.lp_change, LpChange::Unknown);
        assert_eq!(m.kda_text(), "");
    }

    #[test]
    fn test_lp_change_display() {
        assert_eq!(LpChange::Known(18).display(), "+18");
        assert_eq!(LpChange::Known(-9).display(), "-9");
        assert_eq!(LpChange::Known(0).display(), "0");
        assert_eq!(LpChange::Unknown.display(), "?");
    }

    #[test]
    fn test_lp_change_serializes_back_to_wire_form() {
        assert_eq!(serde_json::to_string(&LpChange::Known(-4)).unwrap(), "-4");
        assert_eq!(serde_json::to_string(&LpChange::Unknown).unwrap(), "\"?\"");
    }

    #[test]
    fn test_missing_rank_info_fails() {
        let result = Snapshot::from_json(
            r#"{"accounts": [{"gameName": "A", "tagLine": "B", "dpm": "x"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tier_classification() {
        assert_eq!(Tier::parse("UNRANKED"), Tier::Unranked);
        assert!(Tier::parse("GRANDMASTER").is_apex());
        assert_eq!(Tier::parse("GOLD"), Tier::Standard("GOLD".to_string()));
    }

    #[test]
    fn test_ladder_score() {
        let gold = RankInfo {
            tier: "GOLD".to_string(),
            rank: "II".to_string(),
            lp: 40,
            absolute_score: None,
        };
        assert_eq!(gold.ladder_score(), 1440);

        let master = RankInfo {
            tier: "MASTER".to_string(),
            rank: String::new(),
            lp: 120,
            absolute_score: None,
        };
        assert_eq!(master.ladder_score(), 2920);

        let stored = RankInfo {
            absolute_score: Some(42),
            ..master
        };
        assert_eq!(stored.ladder_score(), 42);

        let unranked = RankInfo {
            tier: "UNRANKED".to_string(),
            rank: String::new(),
            lp: 0,
            absolute_score: None,
        };
        assert_eq!(unranked.ladder_score(), 0);
    }

    #[test]
    fn test_ladder_score_saturates() {
        let info = RankInfo {
            tier: "CHALLENGER".to_string(),
            rank: "I".to_string(),
            lp: i64::MAX,
            absolute_score: None,
        };
        assert_eq!(info.ladder_score(), i64::MAX);
    }
}
