mod clipboard;
mod mode;
mod operation;

pub use clipboard::Clipboard;
pub use mode::{LineHandler, Mode};
pub use operation::Operation;
