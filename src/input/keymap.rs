//! Chord table for normal mode and the per-keystroke resolution policy

use super::chord::{Chord, ChordError, MatchResult};
use super::key::{Key, KeySymbol};
use crate::model::Operation;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("binding for '{operation}': {source}")]
    InvalidChord {
        operation: String,
        #[source]
        source: ChordError,
    },
    #[error("binding for '{operation}': {key} never reaches the chord table")]
    UnreachableKey {
        operation: String,
        key: String,
    },
    #[error("unknown operation '{0}' in key bindings")]
    UnknownOperation(String),
    #[error("chord {chord} is bound to both {existing} and {requested}")]
    Ambiguous {
        chord: String,
        existing: Operation,
        requested: Operation,
    },
}

/// Outcome of feeding the pending sequence through the table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Some chord continues past the pending keys; wait for more
    Pending,
    /// The pending keys complete this operation's chord
    Fire(Operation),
    /// Nothing matches; drop the attempt
    Abandon,
}

/// Registered chords, in registration order. No two operations share a chord.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: Vec<(Chord, Operation)>,
    max_chord_length: usize,
}

impl Keymap {
    pub fn new(max_chord_length: usize) -> Self {
        Self {
            bindings: Vec::new(),
            max_chord_length,
        }
    }

    /// Table holding every operation's built-in chord
    pub fn with_defaults(max_chord_length: usize) -> Result<Self, KeymapError> {
        Self::with_overrides(max_chord_length, &BTreeMap::new())
    }

    /// Built-in chords merged with config overrides. The length limit is
    /// checked on the merged table, so a small limit works as long as every
    /// long default has been rebound.
    pub fn with_overrides(
        max_chord_length: usize,
        overrides: &BTreeMap<String, String>,
    ) -> Result<Self, KeymapError> {
        let mut keymap = Self::new(usize::MAX);
        for operation in Operation::ALL {
            keymap.bind_notation(operation, operation.default_chord())?;
        }
        keymap.apply_overrides(overrides)?;

        keymap.max_chord_length = max_chord_length;
        for (chord, operation) in &keymap.bindings {
            keymap.check_length(*operation, chord)?;
        }
        Ok(keymap)
    }

    fn check_length(&self, operation: Operation, chord: &Chord) -> Result<(), KeymapError> {
        if chord.len() > self.max_chord_length {
            return Err(KeymapError::InvalidChord {
                operation: operation.name().to_string(),
                source: ChordError::TooLong {
                    chord: chord.to_string(),
                    len: chord.len(),
                    max: self.max_chord_length,
                },
            });
        }
        Ok(())
    }

    pub fn max_chord_length(&self) -> usize {
        self.max_chord_length
    }

    /// Bind `operation` to `chord`, replacing its previous chord in place.
    /// Two operations with the same chord are rejected here so that
    /// resolution never has to pick between exact matches. Only letters and
    /// `:` are routed to the chord table in normal mode, so any other key
    /// would leave the binding dead.
    pub fn bind(&mut self, operation: Operation, chord: Chord) -> Result<(), KeymapError> {
        self.check_length(operation, &chord)?;

        if let Some(key) = chord
            .keys()
            .iter()
            .find(|key| !key.symbol.is_letter() && key.symbol != KeySymbol::Colon)
        {
            return Err(KeymapError::UnreachableKey {
                operation: operation.name().to_string(),
                key: key.to_string(),
            });
        }

        if let Some((_, existing)) = self
            .bindings
            .iter()
            .find(|(bound, op)| *bound == chord && *op != operation)
        {
            return Err(KeymapError::Ambiguous {
                chord: chord.to_string(),
                existing: *existing,
                requested: operation,
            });
        }

        match self.bindings.iter_mut().find(|(_, op)| *op == operation) {
            Some(slot) => slot.0 = chord,
            None => self.bindings.push((chord, operation)),
        }
        Ok(())
    }

    pub fn bind_notation(&mut self, operation: Operation, notation: &str) -> Result<(), KeymapError> {
        let chord = Chord::parse(notation, self.max_chord_length).map_err(|source| {
            KeymapError::InvalidChord {
                operation: operation.name().to_string(),
                source,
            }
        })?;
        self.bind(operation, chord)
    }

    /// Apply `operation name -> notation` overrides from the config file
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<(), KeymapError> {
        for (name, notation) in overrides {
            let operation = Operation::from_name(name)
                .ok_or_else(|| KeymapError::UnknownOperation(name.clone()))?;
            self.bind_notation(operation, notation)?;
        }
        Ok(())
    }

    pub fn chord_for(&self, operation: Operation) -> Option<&Chord> {
        self.bindings
            .iter()
            .find(|(_, op)| *op == operation)
            .map(|(chord, _)| chord)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Chord, Operation)> {
        self.bindings.iter().map(|(chord, op)| (chord, *op))
    }

    /// Pairs `(shorter, longer)` where the shorter chord can never fire
    /// because it is a strict prefix of the longer one
    pub fn shadowed(&self) -> Vec<(Operation, Operation)> {
        let mut shadowed = Vec::new();
        for (short, short_op) in &self.bindings {
            for (long, long_op) in &self.bindings {
                if short.is_strict_prefix_of(long) {
                    shadowed.push((*short_op, *long_op));
                }
            }
        }
        shadowed
    }

    /// Decide what the pending keys mean. A partial match anywhere defers
    /// dispatch; otherwise the first exact match in registration order fires.
    pub fn resolve(&self, pending: &[Key]) -> Resolution {
        let mut exact = None;
        for (chord, operation) in &self.bindings {
            match chord.compare(pending) {
                MatchResult::PartialMatch => return Resolution::Pending,
                MatchResult::ExactMatch if exact.is_none() => exact = Some(*operation),
                _ => {}
            }
        }
        exact.map_or(Resolution::Abandon, Resolution::Fire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::chord::DEFAULT_MAX_CHORD_LENGTH;
    use crate::input::key::parse_keys;

    fn defaults() -> Keymap {
        Keymap::with_defaults(DEFAULT_MAX_CHORD_LENGTH).unwrap()
    }

    fn resolve(keymap: &Keymap, notation: &str) -> Resolution {
        keymap.resolve(&parse_keys(notation).unwrap())
    }

    #[test]
    fn test_defaults_cover_every_operation() {
        let keymap = defaults();
        for op in Operation::ALL {
            assert!(keymap.chord_for(op).is_some(), "{op} has no chord");
        }
        assert!(keymap.shadowed().is_empty());
    }

    #[test]
    fn test_resolve_single_and_multi_key() {
        let keymap = defaults();
        assert_eq!(resolve(&keymap, "j"), Resolution::Fire(Operation::SelectNext));
        assert_eq!(resolve(&keymap, "g"), Resolution::Pending);
        assert_eq!(resolve(&keymap, "gg"), Resolution::Fire(Operation::SelectFirst));
        assert_eq!(resolve(&keymap, "G"), Resolution::Fire(Operation::SelectLast));
        assert_eq!(resolve(&keymap, "<C-q>"), Resolution::Fire(Operation::Exit));
        assert_eq!(resolve(&keymap, ":"), Resolution::Fire(Operation::EnterCommandLine));
    }

    #[test]
    fn test_resolve_abandons_unknown_sequences() {
        let keymap = defaults();
        assert_eq!(resolve(&keymap, "z"), Resolution::Abandon);
        assert_eq!(resolve(&keymap, "gx"), Resolution::Abandon);
        assert_eq!(resolve(&keymap, "<C-j>"), Resolution::Abandon);
    }

    #[test]
    fn test_prefix_blocks_shorter_binding() {
        let mut keymap = Keymap::new(4);
        keymap.bind_notation(Operation::SelectFirst, "g").unwrap();
        keymap.bind_notation(Operation::SelectLast, "gg").unwrap();

        assert_eq!(resolve(&keymap, "g"), Resolution::Pending);
        assert_eq!(resolve(&keymap, "gg"), Resolution::Fire(Operation::SelectLast));
        assert_eq!(
            keymap.shadowed(),
            vec![(Operation::SelectFirst, Operation::SelectLast)]
        );
    }

    #[test]
    fn test_identical_chords_are_rejected() {
        let mut keymap = defaults();
        let err = keymap.bind_notation(Operation::Paste, "yy").unwrap_err();
        assert_eq!(
            err,
            KeymapError::Ambiguous {
                chord: "yy".to_string(),
                existing: Operation::Yank,
                requested: Operation::Paste,
            }
        );
    }

    #[test]
    fn test_rebinding_replaces_in_place() {
        let mut keymap = defaults();
        keymap.bind_notation(Operation::Yank, "Y").unwrap();
        assert_eq!(resolve(&keymap, "Y"), Resolution::Fire(Operation::Yank));
        assert_eq!(resolve(&keymap, "yy"), Resolution::Abandon);
        assert_eq!(keymap.bindings().count(), Operation::COUNT);
    }

    #[test]
    fn test_overrides() {
        let mut keymap = defaults();
        let mut overrides = BTreeMap::new();
        overrides.insert("select_first".to_string(), "<C-g>".to_string());
        keymap.apply_overrides(&overrides).unwrap();
        assert_eq!(resolve(&keymap, "<C-g>"), Resolution::Fire(Operation::SelectFirst));

        overrides.insert("fly".to_string(), "f".to_string());
        assert_eq!(
            keymap.apply_overrides(&overrides),
            Err(KeymapError::UnknownOperation("fly".to_string()))
        );
    }

    #[test]
    fn test_keys_outside_chord_routing_are_rejected() {
        for notation in ["<Esc>", ";", "<Tab>", "/", "g/"] {
            let mut keymap = defaults();
            assert!(
                matches!(
                    keymap.bind_notation(Operation::Exit, notation),
                    Err(KeymapError::UnreachableKey { .. })
                ),
                "{notation} was accepted"
            );
            assert_eq!(resolve(&keymap, "<C-q>"), Resolution::Fire(Operation::Exit));
        }
    }

    #[test]
    fn test_limit_applies_after_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("select_first".to_string(), "f".to_string());
        overrides.insert("rename".to_string(), "r".to_string());
        overrides.insert("yank".to_string(), "y".to_string());

        let keymap = Keymap::with_overrides(1, &overrides).unwrap();
        assert_eq!(resolve(&keymap, "f"), Resolution::Fire(Operation::SelectFirst));
        assert_eq!(resolve(&keymap, "y"), Resolution::Fire(Operation::Yank));
        assert!(keymap.bindings().all(|(chord, _)| chord.len() == 1));

        overrides.remove("rename");
        assert!(matches!(
            Keymap::with_overrides(1, &overrides),
            Err(KeymapError::InvalidChord { ref operation, .. }) if operation == "rename"
        ));
    }

    #[test]
    fn test_too_long_chord_is_rejected() {
        let mut keymap = Keymap::new(2);
        assert!(matches!(
            keymap.bind_notation(Operation::Rename, "cwx"),
            Err(KeymapError::InvalidChord { .. })
        ));
    }
}
