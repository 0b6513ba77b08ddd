// Chords and the pending key sequence typed in normal mode
use super::key::{parse_keys, Key, KeyError};
use std::fmt;
use thiserror::Error;

/// Longest chord in the default vocabulary
pub const DEFAULT_MAX_CHORD_LENGTH: usize = 4;

/// How a pending sequence relates to one registered chord
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    PartialMatch,
    ExactMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordError {
    #[error("chord has no keys")]
    Empty,
    #[error("chord {chord} has {len} keys, the limit is {max}")]
    TooLong { chord: String, len: usize, max: usize },
    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Compare a pending sequence against a registered chord, key by key.
///
/// `pending` must not be empty.
pub fn compare(registered: &[Key], pending: &[Key]) -> MatchResult {
    debug_assert!(!pending.is_empty(), "compared an empty key sequence");

    if pending.is_empty() || pending.len() > registered.len() {
        return MatchResult::NoMatch;
    }
    if registered.iter().zip(pending).any(|(a, b)| a != b) {
        return MatchResult::NoMatch;
    }
    if pending.len() == registered.len() {
        MatchResult::ExactMatch
    } else {
        MatchResult::PartialMatch
    }
}

/// An immutable, bounded sequence of keys bound to one operation
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chord {
    keys: Vec<Key>,
}

impl Chord {
    pub fn new(keys: Vec<Key>, max_len: usize) -> Result<Self, ChordError> {
        if keys.is_empty() {
            return Err(ChordError::Empty);
        }
        if keys.len() > max_len {
            return Err(ChordError::TooLong {
                chord: display_keys(&keys),
                len: keys.len(),
                max: max_len,
            });
        }
        Ok(Self { keys })
    }

    /// Parse a chord from key notation such as `"gg"` or `"<C-q>"`
    pub fn parse(notation: &str, max_len: usize) -> Result<Self, ChordError> {
        Self::new(parse_keys(notation)?, max_len)
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare(&self, pending: &[Key]) -> MatchResult {
        compare(&self.keys, pending)
    }

    /// True when `self` is shorter than `other` and matches its first keys
    pub fn is_strict_prefix_of(&self, other: &Chord) -> bool {
        other.compare(&self.keys) == MatchResult::PartialMatch
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_keys(&self.keys))
    }
}

fn display_keys(keys: &[Key]) -> String {
    keys.iter().map(Key::to_string).collect()
}

/// The chord currently being typed
#[derive(Clone, Debug, Default)]
pub struct PendingSequence {
    keys: Vec<Key>,
}

impl PendingSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push(key);
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl fmt::Display for PendingSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_keys(&self.keys))
    }
}
