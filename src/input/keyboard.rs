// Translation from egui key events to engine keys
use super::key::{Key, KeyPart, KeySymbol, Modifier};
use eframe::egui;

/// Engine key for an egui key press, or `None` for keys outside the vocabulary
pub fn translate(key: egui::Key, modifiers: egui::Modifiers) -> Option<Key> {
    let symbol = match key {
        egui::Key::Escape => KeySymbol::Escape,
        egui::Key::Colon => KeySymbol::Colon,
        egui::Key::Slash => KeySymbol::Slash,
        egui::Key::Tab => KeySymbol::Tab,
        // US layouts report ':' as shifted ';'
        egui::Key::Semicolon if modifiers.shift => KeySymbol::Colon,
        egui::Key::Semicolon => KeySymbol::Semicolon,
        other => letter_symbol(other)?,
    };

    let mut parts = vec![KeyPart::Symbol(symbol)];
    // Shift only distinguishes letters; punctuation already carries it
    if modifiers.shift && symbol.is_letter() {
        parts.push(KeyPart::Modifier(Modifier::Shift));
    }
    if modifiers.ctrl || modifiers.mac_cmd {
        parts.push(KeyPart::Modifier(Modifier::Control));
    }
    if modifiers.alt {
        parts.push(KeyPart::Modifier(Modifier::Meta));
    }

    Key::from_parts(&parts).ok()
}

fn letter_symbol(key: egui::Key) -> Option<KeySymbol> {
    let mut chars = key.name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => KeySymbol::from_letter(c),
        _ => None,
    }
}

/// Presses from this frame's events, in order. Releases are skipped;
/// auto-repeat presses count, so holding `j` keeps moving.
pub fn pressed_keys(events: &[egui::Event]) -> Vec<Key> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => translate(*key, *modifiers),
            _ => None,
        })
        .collect()
}
