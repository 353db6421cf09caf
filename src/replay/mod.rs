//! Replay header model, parsing, and persistence.
//!
//! A replay container's header segment is structured JSON describing one
//! match: version, duration, identifier, and a flat key/value stat bag per
//! player. This module turns that segment into a typed [`ReplayHeader`]
//! and re-emits it losslessly.

pub mod fields;
pub mod model;
pub mod parser;
pub mod writer;

pub use fields::{keys, PlayerRecord, ITEM_SLOTS};
pub use model::{
    format_duration, infer_winner, is_highlighted, kda, InferredData, MapId, MatchMetadata,
    ReplayHeader, Winner,
};
pub use parser::{infer_map, parse, serialize, HeaderParser, MapInference, ParseError};
pub use writer::{write_header_file, PersistError};
