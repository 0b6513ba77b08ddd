//! vifman: a file browser driven by vi-style key chords
//!
//! The [`engine::ModalEngine`] turns key presses and submitted command lines
//! into calls on a [`host::Host`]. The desktop shell in [`app`] is one such
//! host.

pub mod app;
pub mod commands;
pub mod config;
pub mod engine;
pub mod entry;
pub mod host;
pub mod input;
pub mod io;
pub mod model;
pub mod style;
mod view;
