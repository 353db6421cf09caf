//! Safe access to loosely-typed player stat fields.
//!
//! Replay headers carry one flat key/value bag per player ("NAME", "SKIN",
//! "GOLD_EARNED", ...). The set of keys changes across game versions, and
//! values are untyped strings that may not parse as numbers. All lookups go
//! through [`PlayerRecord::get`], which returns an empty string for absent
//! keys so callers never branch on presence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Well-known stat keys. Not exhaustive; headers may carry more.
pub mod keys {
    pub const NAME: &str = "NAME";
    pub const SKIN: &str = "SKIN";
    pub const TEAM: &str = "TEAM";
    pub const WIN: &str = "WIN";
    pub const LEVEL: &str = "LEVEL";
    pub const KILLS: &str = "CHAMPIONS_KILLED";
    pub const DEATHS: &str = "NUM_DEATHS";
    pub const ASSISTS: &str = "ASSISTS";
    pub const MINIONS_KILLED: &str = "MINIONS_KILLED";
    pub const GOLD_EARNED: &str = "GOLD_EARNED";
    pub const TEAM_POSITION: &str = "TEAM_POSITION";
}

/// Number of item slots per player (six inventory slots plus trinket).
pub const ITEM_SLOTS: usize = 7;

/// One player's flat stat bag within a replay header.
///
/// Immutable after parse. Field values are kept exactly as they appeared in
/// the payload; no trimming or case folding happens on lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerRecord {
    fields: HashMap<String, String>,
}

impl PlayerRecord {
    /// Build a record from raw key/value pairs.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Look up a field, returning `""` when the key is absent.
    ///
    /// Present values come back unmodified. Callers needing numbers should
    /// use [`PlayerRecord::get_u64`] or parse defensively themselves.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Parse a field as `u64`, `None` when absent or non-numeric.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.fields.get(key)?.parse().ok()
    }

    /// Parse a field as `i64`, `None` when absent or non-numeric.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key)?.parse().ok()
    }

    /// Whether the record carries the given key at all.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The seven item slot values, "ITEM0" through "ITEM6", in slot order.
    ///
    /// Absent slots come back as `""`, the same sentinel an empty slot uses.
    pub fn item_ids(&self) -> Vec<&str> {
        (0..ITEM_SLOTS)
            .map(|slot| self.get(&format!("ITEM{}", slot)))
            .collect()
    }
}

impl FromIterator<(String, String)> for PlayerRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> PlayerRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_absent_key_is_empty_string() {
        let r = record(&[("NAME", "Azapho")]);
        assert_eq!(r.get("SKIN"), "");
        assert_eq!(r.get(""), "");
        assert_eq!(PlayerRecord::default().get("NAME"), "");
    }

    #[test]
    fn test_present_value_unmodified() {
        let r = record(&[("NAME", "  spaced  "), ("WIN", "Win")]);
        assert_eq!(r.get("NAME"), "  spaced  ");
        // Keys are case-sensitive as stored
        assert_eq!(r.get("win"), "");
    }

    #[test]
    fn test_numeric_parse_degrades() {
        let r = record(&[("GOLD_EARNED", "12345"), ("LEVEL", "banana")]);
        assert_eq!(r.get_u64(keys::GOLD_EARNED), Some(12345));
        assert_eq!(r.get_u64(keys::LEVEL), None);
        assert_eq!(r.get_u64("MISSING"), None);
    }

    #[test]
    fn test_item_ids_in_slot_order() {
        let r = record(&[("ITEM0", "3089"), ("ITEM2", "1001"), ("ITEM6", "3340")]);
        let items = r.item_ids();
        assert_eq!(items.len(), ITEM_SLOTS);
        assert_eq!(items[0], "3089");
        assert_eq!(items[1], "");
        assert_eq!(items[2], "1001");
        assert_eq!(items[6], "3340");
    }
}
