// Key model - a single logical key press plus its modifiers
use std::fmt;
use thiserror::Error;

/// Base symbol of a key press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySymbol {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Escape,
    Colon,
    Slash,
    Semicolon,
    Tab,
}

const LETTERS: [KeySymbol; 26] = [
    KeySymbol::A, KeySymbol::B, KeySymbol::C, KeySymbol::D, KeySymbol::E, KeySymbol::F,
    KeySymbol::G, KeySymbol::H, KeySymbol::I, KeySymbol::J, KeySymbol::K, KeySymbol::L,
    KeySymbol::M, KeySymbol::N, KeySymbol::O, KeySymbol::P, KeySymbol::Q, KeySymbol::R,
    KeySymbol::S, KeySymbol::T, KeySymbol::U, KeySymbol::V, KeySymbol::W, KeySymbol::X,
    KeySymbol::Y, KeySymbol::Z,
];

impl KeySymbol {
    /// Letter symbol for an ASCII letter, ignoring case
    pub fn from_letter(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let offset = (c.to_ascii_lowercase() as u8 - b'a') as usize;
        Some(LETTERS[offset])
    }

    pub fn is_letter(self) -> bool {
        self.letter().is_some()
    }

    /// Lowercase character for letter symbols
    pub fn letter(self) -> Option<char> {
        LETTERS
            .iter()
            .position(|s| *s == self)
            .map(|offset| (b'a' + offset as u8) as char)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Control,
    Meta,
}

/// One component of a key press as reported by the host toolkit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPart {
    Symbol(KeySymbol),
    Modifier(Modifier),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("modifier {0:?} given more than once")]
    DuplicateModifier(Modifier),
    #[error("key has two symbols ({first:?} and {second:?})")]
    MultipleSymbols { first: KeySymbol, second: KeySymbol },
    #[error("key has no symbol")]
    MissingSymbol,
    #[error("invalid key notation '{0}'")]
    InvalidNotation(String),
}

/// A single key press. Equality covers the symbol and all three modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    pub symbol: KeySymbol,
    pub shift: bool,
    pub control: bool,
    pub meta: bool,
}

impl Key {
    pub const fn new(symbol: KeySymbol) -> Self {
        Self {
            symbol,
            shift: false,
            control: false,
            meta: false,
        }
    }

    pub const fn shifted(symbol: KeySymbol) -> Self {
        Self {
            shift: true,
            ..Self::new(symbol)
        }
    }

    pub const fn ctrl(symbol: KeySymbol) -> Self {
        Self {
            control: true,
            ..Self::new(symbol)
        }
    }

    /// Build a key from loose parts, rejecting repeated modifiers and
    /// anything other than exactly one symbol.
    pub fn from_parts(parts: &[KeyPart]) -> Result<Self, KeyError> {
        let mut symbol: Option<KeySymbol> = None;
        let (mut shift, mut control, mut meta) = (false, false, false);

        for part in parts {
            match *part {
                KeyPart::Symbol(next) => {
                    if let Some(first) = symbol {
                        return Err(KeyError::MultipleSymbols { first, second: next });
                    }
                    symbol = Some(next);
                }
                KeyPart::Modifier(modifier) => {
                    let flag = match modifier {
                        Modifier::Shift => &mut shift,
                        Modifier::Control => &mut control,
                        Modifier::Meta => &mut meta,
                    };
                    if *flag {
                        return Err(KeyError::DuplicateModifier(modifier));
                    }
                    *flag = true;
                }
            }
        }

        let symbol = symbol.ok_or(KeyError::MissingSymbol)?;
        Ok(Self {
            symbol,
            shift,
            control,
            meta,
        })
    }

    /// Parse the notation of exactly one key, e.g. `"g"`, `"G"` or `"<C-q>"`
    pub fn parse(notation: &str) -> Result<Self, KeyError> {
        match parse_keys(notation)?.as_slice() {
            [key] => Ok(*key),
            _ => Err(KeyError::InvalidNotation(notation.to_string())),
        }
    }
}

/// Parse a sequence of keys written in vim-like notation.
///
/// Supported formats:
/// - Single characters: "g", "G" (Shift+g), ":", "/", ";"
/// - Modified keys: "<C-q>", "<S-d>", "<M-x>" or "<A-x>", combinable as "<C-S-x>"
/// - Named keys: "<Esc>", "<Tab>"
///
/// Tokens are concatenated, so "gg" and "c<C-w>" are two-key sequences.
pub fn parse_keys(notation: &str) -> Result<Vec<Key>, KeyError> {
    let invalid = || KeyError::InvalidNotation(notation.to_string());
    let mut keys = Vec::new();
    let mut remaining = notation.trim();

    if remaining.is_empty() {
        return Err(invalid());
    }

    while let Some(c) = remaining.chars().next() {
        if c == '<' {
            let end = remaining.find('>').ok_or_else(invalid)?;
            keys.push(parse_bracketed(&remaining[1..end]).map_err(|e| match e {
                KeyError::InvalidNotation(_) => invalid(),
                other => other,
            })?);
            remaining = &remaining[end + 1..];
        } else {
            keys.push(parse_char(c).ok_or_else(invalid)?);
            remaining = &remaining[c.len_utf8()..];
        }
    }

    Ok(keys)
}

fn parse_char(c: char) -> Option<Key> {
    match c {
        ':' => Some(Key::new(KeySymbol::Colon)),
        '/' => Some(Key::new(KeySymbol::Slash)),
        ';' => Some(Key::new(KeySymbol::Semicolon)),
        c if c.is_ascii_uppercase() => KeySymbol::from_letter(c).map(Key::shifted),
        c => KeySymbol::from_letter(c).map(Key::new),
    }
}

/// Content inside `< >`
fn parse_bracketed(inner: &str) -> Result<Key, KeyError> {
    let invalid = || KeyError::InvalidNotation(inner.to_string());
    let mut pieces: Vec<&str> = inner.split('-').collect();
    let base = pieces.pop().filter(|b| !b.is_empty()).ok_or_else(invalid)?;

    let mut parts = Vec::with_capacity(pieces.len() + 1);
    for prefix in pieces {
        let modifier = match prefix.to_ascii_lowercase().as_str() {
            "s" => Modifier::Shift,
            "c" => Modifier::Control,
            "m" | "a" => Modifier::Meta,
            _ => return Err(invalid()),
        };
        parts.push(KeyPart::Modifier(modifier));
    }

    let symbol = match base.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeySymbol::Escape,
        "tab" => KeySymbol::Tab,
        _ => {
            let mut chars = base.chars();
            match (chars.next(), chars.next()) {
                (Some(':'), None) => KeySymbol::Colon,
                (Some('/'), None) => KeySymbol::Slash,
                (Some(';'), None) => KeySymbol::Semicolon,
                (Some(c), None) => KeySymbol::from_letter(c).ok_or_else(invalid)?,
                _ => return Err(invalid()),
            }
        }
    };
    parts.push(KeyPart::Symbol(symbol));

    Key::from_parts(&parts)
}

fn symbol_name(symbol: KeySymbol) -> String {
    match symbol {
        KeySymbol::Escape => "Esc".to_string(),
        KeySymbol::Tab => "Tab".to_string(),
        KeySymbol::Colon => ":".to_string(),
        KeySymbol::Slash => "/".to_string(),
        KeySymbol::Semicolon => ";".to_string(),
        letter => letter.letter().map(String::from).unwrap_or_default(),
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let named = matches!(self.symbol, KeySymbol::Escape | KeySymbol::Tab);

        if !self.control && !self.meta && !named {
            if !self.shift {
                return f.write_str(&symbol_name(self.symbol));
            }
            if let Some(c) = self.symbol.letter() {
                return write!(f, "{}", c.to_ascii_uppercase());
            }
        }

        f.write_str("<")?;
        if self.control {
            f.write_str("C-")?;
        }
        if self.meta {
            f.write_str("M-")?;
        }
        if self.shift {
            f.write_str("S-")?;
        }
        write!(f, "{}>", symbol_name(self.symbol))
    }
}
