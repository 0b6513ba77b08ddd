pub mod chord;
pub mod key;
pub mod keyboard;
pub mod keymap;

pub use chord::{Chord, ChordError, MatchResult, PendingSequence, DEFAULT_MAX_CHORD_LENGTH};
pub use key::{parse_keys, Key, KeyError, KeyPart, KeySymbol, Modifier};
pub use keymap::{Keymap, KeymapError, Resolution};
