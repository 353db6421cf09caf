//! Typed view over a parsed replay header.

use crate::replay::fields::{keys, PlayerRecord};

/// The team field value marking a red-side player.
const TEAM_RED: &str = "200";

/// Match-level metadata plus the full player roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchMetadata {
    /// Game client version the replay was recorded with, e.g. "13.1.1".
    pub game_version: String,
    /// Match length in milliseconds.
    pub game_duration_ms: u64,
    /// Platform match identifier, when the header carried one.
    pub match_id: Option<u64>,
    /// All player records in original header order.
    pub players: Vec<PlayerRecord>,
}

impl MatchMetadata {
    /// Blue-side players, stable in original record order.
    ///
    /// A record is blue unless its team field says red, so the two side
    /// iterators always partition the full roster even for malformed input.
    pub fn blue_players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| !is_red(p))
    }

    /// Red-side players, stable in original record order.
    pub fn red_players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| is_red(p))
    }
}

fn is_red(player: &PlayerRecord) -> bool {
    player.get(keys::TEAM) == TEAM_RED
}

/// Identifier of the map a match was played on.
///
/// Never stored verbatim in the header; always derived by a pure inference
/// function over the roster (see [`crate::replay::parser::infer_map`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapId {
    SummonersRift,
    TwistedTreeline,
    HowlingAbyss,
    Unknown,
}

impl MapId {
    /// Numeric map identifier as used in asset paths.
    pub fn numeric(self) -> &'static str {
        match self {
            MapId::SummonersRift => "11",
            MapId::TwistedTreeline => "10",
            MapId::HowlingAbyss => "12",
            MapId::Unknown => "0",
        }
    }

    /// Human-readable map name.
    pub fn display_name(self) -> &'static str {
        match self {
            MapId::SummonersRift => "Summoner's Rift",
            MapId::TwistedTreeline => "Twisted Treeline",
            MapId::HowlingAbyss => "Howling Abyss",
            MapId::Unknown => "Unknown",
        }
    }
}

/// Match outcome derived from the rosters' win fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    BlueVictory,
    RedVictory,
    NoContest,
}

impl Winner {
    /// Display label for the outcome.
    pub fn label(self) -> &'static str {
        match self {
            Winner::BlueVictory => "Blue Victory",
            Winner::RedVictory => "Red Victory",
            Winner::NoContest => "No Contest",
        }
    }
}

/// Infer the match outcome from the first blue player's win field, falling
/// back to the red roster when the blue side is empty.
///
/// The win field carries "Win" or "Fail", compared case-insensitively.
/// With both rosters empty there is nothing to decide: `NoContest`.
pub fn infer_winner(metadata: &MatchMetadata) -> Winner {
    if let Some(first_blue) = metadata.blue_players().next() {
        if first_blue.get(keys::WIN).eq_ignore_ascii_case("win") {
            Winner::BlueVictory
        } else {
            Winner::RedVictory
        }
    } else if let Some(first_red) = metadata.red_players().next() {
        if first_red.get(keys::WIN).eq_ignore_ascii_case("win") {
            Winner::RedVictory
        } else {
            Winner::BlueVictory
        }
    } else {
        Winner::NoContest
    }
}

/// Fields derived from the raw header rather than read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredData {
    pub map: MapId,
    pub winner: Winner,
}

/// A fully parsed replay header.
///
/// The original raw payload is retained when parsing succeeds so the header
/// can be re-emitted losslessly (see [`crate::replay::parser::serialize`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayHeader {
    pub metadata: MatchMetadata,
    pub inferred: InferredData,
    pub(crate) raw_json: Option<String>,
}

impl ReplayHeader {
    /// The raw textual payload this header was parsed from, if retained.
    pub fn raw_json(&self) -> Option<&str> {
        self.raw_json.as_deref()
    }
}

/// Format a millisecond duration as "{m} minutes and {s} seconds".
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!(
        "{} minutes and {} seconds",
        total_secs / 60,
        total_secs % 60
    )
}

/// Format a player's kills/deaths/assists line.
///
/// Absent fields show as "0" rather than dropping out of the line.
pub fn kda(player: &PlayerRecord) -> String {
    let stat = |key: &str| player.get_u64(key).unwrap_or(0);
    format!(
        "{} / {} / {}",
        stat(keys::KILLS),
        stat(keys::DEATHS),
        stat(keys::ASSISTS)
    )
}

/// Whether a record belongs to the given user, for roster highlighting.
///
/// The current user name is an explicit parameter; the library reads no
/// ambient settings. Comparison is case-insensitive, and an empty user name
/// highlights nobody.
pub fn is_highlighted(player: &PlayerRecord, current_user: &str) -> bool {
    !current_user.is_empty() && player.get(keys::NAME).eq_ignore_ascii_case(current_user)
}
