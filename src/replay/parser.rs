//! Replay header decoding and re-serialization.
//!
//! The container's file-reading layer hands us the header segment as raw
//! bytes of JSON. Decoding is strict only about the payload being JSON at
//! all; individual fields are extracted leniently so corrupted or
//! version-drifted headers still produce a usable model with defaults.
//!
//! The player roster arrives in one of two shapes: a nested JSON array, or
//! the container's native form where the array itself is JSON-encoded into
//! a string field. Both parse; an undecodable roster degrades to empty.

use std::fmt;
use std::str::Utf8Error;

use serde_json::{Map, Value};

use crate::replay::fields::{keys, PlayerRecord};
use crate::replay::model::{
    infer_winner, InferredData, MapId, MatchMetadata, ReplayHeader,
};

/// Error type for header decoding.
///
/// Only structurally invalid payloads fail; missing fields never do.
#[derive(Debug)]
pub enum ParseError {
    /// Payload bytes are not valid UTF-8.
    Utf8(Utf8Error),
    /// Payload text is not valid JSON.
    Json(serde_json::Error),
    /// Payload decoded to something other than a JSON object.
    NotAnObject,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Utf8(e) => write!(f, "header is not valid UTF-8: {}", e),
            ParseError::Json(e) => write!(f, "header is not valid JSON: {}", e),
            ParseError::NotAnObject => write!(f, "header is not a JSON object"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Utf8(e) => Some(e),
            ParseError::Json(e) => Some(e),
            ParseError::NotAnObject => None,
        }
    }
}

/// Pure derivation of the map identifier from the parsed roster.
pub type MapInference = fn(&[PlayerRecord]) -> MapId;

/// Default map inference.
///
/// The header never names the map, so it is derived from roster shape:
/// any player carrying a team position implies Summoner's Rift; otherwise
/// a roster of up to six players fits Twisted Treeline, and exactly ten
/// position-less players fits Howling Abyss. Anything else is unknown.
pub fn infer_map(players: &[PlayerRecord]) -> MapId {
    if players
        .iter()
        .any(|p| !p.get(keys::TEAM_POSITION).is_empty())
    {
        return MapId::SummonersRift;
    }
    match players.len() {
        0 => MapId::Unknown,
        1..=6 => MapId::TwistedTreeline,
        10 => MapId::HowlingAbyss,
        _ => MapId::Unknown,
    }
}

/// Header parser with a pluggable map inference rule.
pub struct HeaderParser {
    infer_map: MapInference,
}

impl HeaderParser {
    pub fn new() -> Self {
        Self { infer_map }
    }

    /// Use a custom map inference rule. The rule must be pure: same roster,
    /// same map, no I/O.
    pub fn with_map_inference(infer_map: MapInference) -> Self {
        Self { infer_map }
    }

    /// Decode a raw header segment into a [`ReplayHeader`].
    ///
    /// The original payload text is retained on the model for lossless
    /// re-emit. Fails only when the payload is not a JSON object at all.
    pub fn parse(&self, raw: &[u8]) -> Result<ReplayHeader, ParseError> {
        let text = std::str::from_utf8(raw).map_err(ParseError::Utf8)?;
        let value: Value = serde_json::from_str(text).map_err(ParseError::Json)?;
        let obj = value.as_object().ok_or(ParseError::NotAnObject)?;

        let metadata = MatchMetadata {
            game_version: obj
                .get("gameVersion")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            game_duration_ms: lenient_u64(obj.get("gameLength")).unwrap_or(0),
            match_id: lenient_u64(obj.get("matchId")),
            players: extract_players(obj.get("statsJson")),
        };
        let inferred = InferredData {
            map: (self.infer_map)(&metadata.players),
            winner: infer_winner(&metadata),
        };

        Ok(ReplayHeader {
            metadata,
            inferred,
            raw_json: Some(text.to_string()),
        })
    }
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a raw header segment with the default parser.
pub fn parse(raw: &[u8]) -> Result<ReplayHeader, ParseError> {
    HeaderParser::new().parse(raw)
}

/// Re-emit a header as JSON text.
///
/// When the model retained its original payload, that text is returned
/// verbatim. Otherwise a structurally-equivalent re-encoding is produced,
/// using the container's native string-encoded roster shape so the result
/// parses back to a model with the same match identifier, duration, and
/// player counts.
pub fn serialize(header: &ReplayHeader) -> String {
    if let Some(raw) = header.raw_json() {
        return raw.to_string();
    }

    let meta = &header.metadata;
    let stats: Vec<&PlayerRecord> = meta.players.iter().collect();
    let stats_text = serde_json::to_string(&stats).unwrap_or_else(|_| "[]".to_string());

    let mut obj = Map::new();
    obj.insert(
        "gameVersion".to_string(),
        Value::String(meta.game_version.clone()),
    );
    obj.insert("gameLength".to_string(), Value::from(meta.game_duration_ms));
    if let Some(id) = meta.match_id {
        obj.insert("matchId".to_string(), Value::from(id));
    }
    obj.insert("statsJson".to_string(), Value::String(stats_text));

    Value::Object(obj).to_string()
}

/// Pull a u64 out of a JSON number or numeric string, `None` otherwise.
fn lenient_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Decode the player roster from either supported shape.
fn extract_players(stats: Option<&Value>) -> Vec<PlayerRecord> {
    let decoded_from_string;
    let array = match stats {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::String(encoded)) => {
            match serde_json::from_str::<Value>(encoded) {
                Ok(Value::Array(items)) => {
                    decoded_from_string = items;
                    decoded_from_string.as_slice()
                }
                _ => return Vec::new(),
            }
        }
        _ => return Vec::new(),
    };

    array
        .iter()
        .filter_map(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect()
        })
        .collect()
}

/// Flatten a JSON scalar to the string form stat consumers expect.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::model::Winner;

    /// A header in the container's native shape: string-encoded roster.
    fn native_header() -> String {
        let stats: Vec<serde_json::Value> = (0..10)
            .map(|i| {
                serde_json::json!({
                    "NAME": format!("player{}", i),
                    "SKIN": if i == 0 { "Ahri" } else { "Garen" },
                    "TEAM": if i < 5 { "100" } else { "200" },
                    "WIN": if i < 5 { "Win" } else { "Fail" },
                    "TEAM_POSITION": "MIDDLE",
                    "GOLD_EARNED": 10_000 + i,
                })
            })
            .collect();
        serde_json::json!({
            "gameVersion": "13.1.1",
            "gameLength": 1_754_000u64,
            "matchId": 4_242_424_242u64,
            "statsJson": serde_json::to_string(&stats).unwrap(),
        })
        .to_string()
    }

    #[test]
    fn test_parse_native_header() {
        let header = parse(native_header().as_bytes()).unwrap();
        assert_eq!(header.metadata.game_version, "13.1.1");
        assert_eq!(header.metadata.game_duration_ms, 1_754_000);
        assert_eq!(header.metadata.match_id, Some(4_242_424_242));
        assert_eq!(header.metadata.players.len(), 10);
        assert_eq!(header.metadata.blue_players().count(), 5);
        assert_eq!(header.metadata.red_players().count(), 5);
        assert_eq!(header.inferred.winner, Winner::BlueVictory);
        assert_eq!(header.inferred.map, MapId::SummonersRift);
        // Numeric stat values are flattened to strings
        assert_eq!(header.metadata.players[0].get("GOLD_EARNED"), "10000");
    }

    #[test]
    fn test_parse_nested_roster() {
        let raw = serde_json::json!({
            "gameVersion": "12.8.1",
            "gameLength": 900_000u64,
            "statsJson": [
                {"NAME": "a", "TEAM": "100", "WIN": "Fail"},
                {"NAME": "b", "TEAM": "200", "WIN": "Win"},
            ],
        })
        .to_string();
        let header = parse(raw.as_bytes()).unwrap();
        assert_eq!(header.metadata.players.len(), 2);
        assert_eq!(header.inferred.winner, Winner::RedVictory);
        assert_eq!(header.inferred.map, MapId::TwistedTreeline);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse(b"\x00RIOT\x01\x02"),
            Err(ParseError::Json(_)) | Err(ParseError::Utf8(_))
        ));
        assert!(matches!(parse(b"[1,2,3]"), Err(ParseError::NotAnObject)));
    }

    #[test]
    fn test_missing_fields_degrade() {
        let header = parse(b"{}").unwrap();
        assert_eq!(header.metadata.game_version, "");
        assert_eq!(header.metadata.game_duration_ms, 0);
        assert_eq!(header.metadata.match_id, None);
        assert!(header.metadata.players.is_empty());
        assert_eq!(header.inferred.winner, Winner::NoContest);
        assert_eq!(header.inferred.map, MapId::Unknown);
    }

    #[test]
    fn test_corrupt_roster_degrades() {
        let raw = serde_json::json!({
            "gameVersion": "13.1.1",
            "gameLength": 1000u64,
            "statsJson": "{not valid json",
        })
        .to_string();
        let header = parse(raw.as_bytes()).unwrap();
        assert!(header.metadata.players.is_empty());
    }

    #[test]
    fn test_lenient_numeric_fields() {
        let raw = r#"{"gameLength": "1234", "matchId": "99"}"#;
        let header = parse(raw.as_bytes()).unwrap();
        assert_eq!(header.metadata.game_duration_ms, 1234);
        assert_eq!(header.metadata.match_id, Some(99));
    }

    #[test]
    fn test_raw_round_trip_is_verbatim() {
        let raw = native_header();
        let header = parse(raw.as_bytes()).unwrap();
        assert_eq!(serialize(&header), raw);
    }

    #[test]
    fn test_reencoded_round_trip_is_equivalent() {
        let mut header = parse(native_header().as_bytes()).unwrap();
        header.raw_json = None;

        let reencoded = serialize(&header);
        let reparsed = parse(reencoded.as_bytes()).unwrap();
        assert_eq!(reparsed.metadata.match_id, header.metadata.match_id);
        assert_eq!(
            reparsed.metadata.game_duration_ms,
            header.metadata.game_duration_ms
        );
        assert_eq!(
            reparsed.metadata.players.len(),
            header.metadata.players.len()
        );
        assert_eq!(reparsed.inferred, header.inferred);
    }

    #[test]
    fn test_custom_map_inference() {
        fn always_abyss(_: &[PlayerRecord]) -> MapId {
            MapId::HowlingAbyss
        }
        let parser = HeaderParser::with_map_inference(always_abyss);
        let header = parser.parse(b"{}").unwrap();
        assert_eq!(header.inferred.map, MapId::HowlingAbyss);
    }

    #[test]
    fn test_default_map_inference_shapes() {
        let positionless = |n: usize| -> Vec<PlayerRecord> {
            (0..n)
                .map(|i| {
                    [("NAME".to_string(), format!("p{}", i))]
                        .into_iter()
                        .collect()
                })
                .collect()
        };
        assert_eq!(infer_map(&positionless(10)), MapId::HowlingAbyss);
        assert_eq!(infer_map(&positionless(6)), MapId::TwistedTreeline);
        assert_eq!(infer_map(&positionless(8)), MapId::Unknown);
        assert_eq!(infer_map(&[]), MapId::Unknown);
    }
}
