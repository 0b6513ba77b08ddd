mod directory;
mod ops;

pub use directory::{find_next, read_directory};
pub use ops::{copy_entry, create_directory, create_file, open_with_default, remove_entry, rename_entry};
